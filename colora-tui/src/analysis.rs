//! Palette analysis contract: prompt, response schema, and boundary validation.

use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;

use crate::color::Color;
use crate::model::{AnalysisResult, EXPECTED_BOLD_COLORS, EXPECTED_PALETTES};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("could not read the palette analysis: {0}")]
    Parse(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("the service returned no content")]
    EmptyResponse,

    #[error("no API key configured (set GEMINI_API_KEY or pass --api-key)")]
    MissingApiKey,

    #[error("request cancelled")]
    Cancelled,
}

/// One round trip to a palette generator.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn request_analysis(&self, base: Color) -> Result<AnalysisResult, AnalysisError>;
}

/// Natural-language instruction for one base color.
pub fn build_prompt(base: Color, language: &str) -> String {
    format!(
        "Analyze the hex color {base}.\n\
         1. Give it a descriptive name in {language}.\n\
         2. Generate 3 recommended color palettes (Neutrals, Analogous, Contrast). \
         Each palette must have 3 colors with their usage percentages (60%, 30%, 10%).\n\
         3. Generate a list of 4 \"bold\" colors (boldColors) that are contrasting or \
         unexpected but still work aesthetically with the base color. THEY MUST BE HEX CODES \
         ONLY (e.g. #FF5500).\n\
         Briefly explain in each palette description why it works. \
         Write names, titles and descriptions in {language}."
    )
}

/// Structured-output schema mirroring [`AnalysisResult`].
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "baseColor": {
                "type": "OBJECT",
                "properties": {
                    "hex": { "type": "STRING" },
                    "name": { "type": "STRING" },
                    "rgb": { "type": "STRING" }
                },
                "required": ["hex", "name", "rgb"]
            },
            "palettes": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "items": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "color": { "type": "STRING" },
                                    "percentage": { "type": "NUMBER" }
                                },
                                "required": ["color", "percentage"]
                            }
                        }
                    },
                    "required": ["title", "description", "items"]
                }
            },
            "boldColors": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "4 strictly HEX color codes that combine well but are risky"
            }
        },
        "required": ["baseColor", "palettes", "boldColors"]
    })
}

/// Parse the generated JSON text. Either the whole document validates or
/// nothing is returned: every required field must be present and every color
/// must be a strict `#RRGGBB` code.
pub fn parse_analysis(text: &str) -> Result<AnalysisResult, AnalysisError> {
    let result: AnalysisResult =
        serde_json::from_str(text.trim()).map_err(|e| AnalysisError::Parse(e.to_string()))?;

    if result.palettes.len() != EXPECTED_PALETTES {
        tracing::warn!(count = result.palettes.len(), "unexpected palette count");
    }
    if result.bold_colors.len() != EXPECTED_BOLD_COLORS {
        tracing::warn!(count = result.bold_colors.len(), "unexpected bold color count");
    }
    if let Some(p) = result.palettes.iter().find(|p| p.items.is_empty()) {
        return Err(AnalysisError::Parse(format!("palette {:?} has no colors", p.title)));
    }
    Ok(result)
}

#[cfg(test)]
pub(crate) mod fakes {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::sync::Notify;

    /// Answers requests from a script, optionally holding each answer until
    /// the gate is opened.
    #[derive(Default)]
    pub struct ScriptedService {
        replies: Mutex<VecDeque<Result<AnalysisResult, AnalysisError>>>,
        calls: AtomicUsize,
        pub gate: Option<Arc<Notify>>,
    }

    impl ScriptedService {
        pub fn replying(replies: impl IntoIterator<Item = Result<AnalysisResult, AnalysisError>>) -> Self {
            Self { replies: Mutex::new(replies.into_iter().collect()), ..Default::default() }
        }

        pub fn gated(mut self, gate: Arc<Notify>) -> Self {
            self.gate = Some(gate);
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AnalysisService for ScriptedService {
        async fn request_analysis(&self, _base: Color) -> Result<AnalysisResult, AnalysisError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(AnalysisError::EmptyResponse))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"{
        "baseColor": { "hex": "#6366F1", "name": "Indigo Dusk", "rgb": "rgb(99, 102, 241)" },
        "palettes": [
            { "title": "Neutrals", "description": "Calm.", "items": [
                { "color": "#6366F1", "percentage": 60 },
                { "color": "#F5F5F4", "percentage": 30 },
                { "color": "#1C1917", "percentage": 10 } ] },
            { "title": "Analogous", "description": "Soft.", "items": [
                { "color": "#6366F1", "percentage": 60 },
                { "color": "#8B5CF6", "percentage": 30 },
                { "color": "#3B82F6", "percentage": 10 } ] },
            { "title": "Contrast", "description": "Pop.", "items": [
                { "color": "#6366F1", "percentage": 60 },
                { "color": "#F59E0B", "percentage": 30 },
                { "color": "#fde68a", "percentage": 10.5 } ] }
        ],
        "boldColors": ["#FF5500", "#00C2A8", "#E11D48", "#84CC16"],
        "extra": "ignored"
    }"##;

    #[test]
    fn parses_well_formed_document() {
        let a = parse_analysis(SAMPLE).unwrap();
        assert_eq!(a.base_color.hex.to_string(), "#6366F1");
        assert_eq!(a.palettes.len(), 3);
        assert_eq!(a.bold_colors.len(), 4);
        assert_eq!(a.palettes[2].items[2].color.to_string(), "#FDE68A");
        assert_eq!(a.palettes[2].items[2].percentage, 10.5);
    }

    #[test]
    fn non_json_is_a_parse_error() {
        let err = parse_analysis("Sorry, I can't help with that.").unwrap_err();
        assert!(matches!(err, AnalysisError::Parse(_)));
    }

    #[test]
    fn missing_required_field_is_a_parse_error() {
        let mut doc: Value = serde_json::from_str(SAMPLE).unwrap();
        doc.as_object_mut().unwrap().remove("boldColors");
        let err = parse_analysis(&doc.to_string()).unwrap_err();
        assert!(matches!(err, AnalysisError::Parse(_)));

        let mut doc: Value = serde_json::from_str(SAMPLE).unwrap();
        doc["baseColor"].as_object_mut().unwrap().remove("name");
        assert!(parse_analysis(&doc.to_string()).is_err());
    }

    #[test]
    fn invalid_hex_anywhere_rejects_whole_document() {
        let mut doc: Value = serde_json::from_str(SAMPLE).unwrap();
        doc["boldColors"][3] = json!("orange");
        assert!(matches!(parse_analysis(&doc.to_string()), Err(AnalysisError::Parse(_))));

        let mut doc: Value = serde_json::from_str(SAMPLE).unwrap();
        doc["palettes"][1]["items"][0]["color"] = json!("#12345");
        assert!(parse_analysis(&doc.to_string()).is_err());
    }

    #[test]
    fn count_mismatch_is_tolerated() {
        let mut doc: Value = serde_json::from_str(SAMPLE).unwrap();
        doc["boldColors"].as_array_mut().unwrap().truncate(2);
        let a = parse_analysis(&doc.to_string()).unwrap();
        assert_eq!(a.bold_colors.len(), 2);
    }

    #[test]
    fn empty_palette_is_rejected() {
        let mut doc: Value = serde_json::from_str(SAMPLE).unwrap();
        doc["palettes"][0]["items"] = json!([]);
        assert!(parse_analysis(&doc.to_string()).is_err());
    }

    #[test]
    fn prompt_embeds_hex_and_language() {
        let p = build_prompt("#6366F1".parse().unwrap(), "Spanish");
        assert!(p.contains("#6366F1"));
        assert!(p.contains("Spanish"));
        assert!(p.contains("60%, 30%, 10%"));
    }

    #[test]
    fn schema_requires_top_level_fields() {
        let schema = response_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert_eq!(required, ["baseColor", "palettes", "boldColors"]);
        assert_eq!(
            schema["properties"]["palettes"]["items"]["properties"]["items"]["items"]["required"],
            json!(["color", "percentage"])
        );
    }
}
