//! Command-line and environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use crate::backend::{GeminiSettings, DEFAULT_BASE_URL, DEFAULT_MODEL};

#[derive(Debug, Parser)]
#[command(name = "colora")]
#[command(version, about = "Sample a color, tune it, and get AI-generated palettes")]
pub struct Config {
    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model used for palette generation
    #[arg(long, env = "COLORA_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// API base URL
    #[arg(long, env = "COLORA_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Where saved colors, palettes and the log live
    #[arg(long, env = "COLORA_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Image file kept fresh by a capture tool, used as the live camera
    #[arg(long, env = "COLORA_CAMERA_FRAME")]
    pub camera_frame: Option<PathBuf>,

    /// Palette request timeout in seconds
    #[arg(long, default_value_t = 60)]
    pub timeout_secs: u64,

    /// Language for color names and palette descriptions
    #[arg(long, env = "COLORA_LANGUAGE", default_value = "English")]
    pub language: String,

    /// Log file (defaults to colora.log in the data directory)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|d| d.join("colora"))
                .context("no platform data directory; pass --data-dir"),
        }
    }

    pub fn log_path(&self, data_dir: &std::path::Path) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| data_dir.join("colora.log"))
    }

    pub fn gemini(&self) -> GeminiSettings {
        GeminiSettings {
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            api_key: self.api_key.clone().filter(|k| !k.trim().is_empty()),
            language: self.language.clone(),
            timeout: Duration::from_secs(self.timeout_secs.max(1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cfg = Config::try_parse_from([
            "colora",
            "--api-key",
            "k",
            "--model",
            "m",
            "--data-dir",
            "/tmp/colora-test",
            "--timeout-secs",
            "0",
        ])
        .unwrap();
        let g = cfg.gemini();
        assert_eq!(g.model, "m");
        assert_eq!(g.api_key.as_deref(), Some("k"));
        assert_eq!(g.timeout, Duration::from_secs(1));
        let dir = cfg.data_dir().unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/colora-test"));
        assert_eq!(cfg.log_path(&dir), dir.join("colora.log"));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let cfg = Config::try_parse_from(["colora", "--api-key", "  "]).unwrap();
        assert!(cfg.gemini().api_key.is_none());
    }
}
