//! Saved colors and palettes over a flat key-value store.
//!
//! Every mutation reads the whole collection, changes it in memory and writes
//! it back. There is no locking: two writers racing on the same key keep only
//! the last write.
//!
//! Reads are lenient and skip whatever no longer parses. Writes are not: an
//! entry that fails to parse is carried through untouched, and a document that
//! is not a JSON array at all is never overwritten.

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::color::Color;
use crate::model::Palette;

pub const SAVED_COLORS_KEY: &str = "colora_saved_colors";
pub const SAVED_PALETTES_KEY: &str = "colora_saved_palettes";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed for {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("saved {key} is unreadable, refusing to overwrite it: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not serialize {key}: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// String-keyed, string-valued persistent storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// One `<key>.json` file per key under a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { key: key.to_string(), source }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let io = |source| StoreError::Io { key: key.to_string(), source };
        std::fs::create_dir_all(&self.dir).map_err(io)?;
        // Write-then-rename so a crash never leaves a half-written collection.
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        std::fs::write(&tmp, value).map_err(io)?;
        std::fs::rename(&tmp, self.path(key)).map_err(io)
    }
}

/// The two saved collections.
pub struct Collections<S> {
    store: S,
}

impl<S: KeyValueStore> Collections<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn list_colors(&self) -> Result<Vec<Color>, StoreError> {
        self.load(SAVED_COLORS_KEY)
    }

    pub fn list_palettes(&self) -> Result<Vec<Palette>, StoreError> {
        self.load(SAVED_PALETTES_KEY)
    }

    /// Returns `false` when the color was already saved (in any letter case).
    pub fn add_color(&self, color: Color) -> Result<bool, StoreError> {
        let mut entries = self.load_raw(SAVED_COLORS_KEY)?;
        if entries.iter().any(|v| parsed::<Color>(v) == Some(color)) {
            return Ok(false);
        }
        entries.push(Value::String(color.to_string()));
        self.save(SAVED_COLORS_KEY, &entries)?;
        tracing::info!(%color, "color saved");
        Ok(true)
    }

    /// Returns `false` when the color was not saved; that is not an error.
    pub fn remove_color(&self, color: Color) -> Result<bool, StoreError> {
        let mut entries = self.load_raw(SAVED_COLORS_KEY)?;
        let before = entries.len();
        entries.retain(|v| parsed::<Color>(v) != Some(color));
        if entries.len() == before {
            return Ok(false);
        }
        self.save(SAVED_COLORS_KEY, &entries)?;
        tracing::info!(%color, "color removed");
        Ok(true)
    }

    /// Returns `false` when a palette with the same title exists; the first wins.
    pub fn add_palette(&self, palette: &Palette) -> Result<bool, StoreError> {
        let mut entries = self.load_raw(SAVED_PALETTES_KEY)?;
        if entries
            .iter()
            .filter_map(parsed::<Palette>)
            .any(|p| p.title == palette.title)
        {
            return Ok(false);
        }
        let value = serde_json::to_value(palette).map_err(|source| StoreError::Serialization {
            key: SAVED_PALETTES_KEY.to_string(),
            source,
        })?;
        entries.push(value);
        self.save(SAVED_PALETTES_KEY, &entries)?;
        tracing::info!(title = %palette.title, "palette saved");
        Ok(true)
    }

    /// Removes by position in [`list_palettes`](Self::list_palettes).
    /// Out-of-range indices change nothing.
    pub fn remove_palette(&self, index: usize) -> Result<Option<Palette>, StoreError> {
        let mut entries = self.load_raw(SAVED_PALETTES_KEY)?;
        let Some((at, removed)) = entries
            .iter()
            .enumerate()
            .filter_map(|(at, v)| parsed::<Palette>(v).map(|p| (at, p)))
            .nth(index)
        else {
            return Ok(None);
        };
        entries.remove(at);
        self.save(SAVED_PALETTES_KEY, &entries)?;
        tracing::info!(title = %removed.title, "palette removed");
        Ok(Some(removed))
    }

    /// Missing key reads as empty; entries that no longer parse are skipped.
    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StoreError> {
        let entries = match self.load_raw(key) {
            Ok(entries) => entries,
            Err(StoreError::Corrupt { source, .. }) => {
                tracing::warn!(key, error = %source, "saved collection is unreadable, treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };
        Ok(entries
            .into_iter()
            .filter_map(|v| match serde_json::from_value(v) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!(key, error = %e, "skipping malformed saved entry");
                    None
                }
            })
            .collect())
    }

    /// The stored entries as-is. A document that is not a JSON array is an error.
    fn load_raw(&self, key: &str) -> Result<Vec<Value>, StoreError> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt { key: key.to_string(), source })
    }

    fn save(&self, key: &str, entries: &[Value]) -> Result<(), StoreError> {
        let json = serde_json::to_string(entries)
            .map_err(|source| StoreError::Serialization { key: key.to_string(), source })?;
        self.store.set(key, &json)
    }
}

fn parsed<T: DeserializeOwned>(value: &Value) -> Option<T> {
    T::deserialize(value).ok()
}

#[cfg(test)]
pub(crate) mod fakes {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::{KeyValueStore, StoreError};

    /// In-process store.
    #[derive(Default)]
    pub struct MemoryStore {
        entries: Mutex<HashMap<String, String>>,
    }

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.entries.lock().unwrap().insert(key.to_string(), value.to_string());
            Ok(())
        }
    }
}
