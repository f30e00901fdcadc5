//! Service configuration

use quill_llm::ProviderKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Everything a request needs before aggregation begins: where the vault
/// lives, the per-resource relative paths, and the model selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioSettings {
    /// Root directory containing all narrative source documents
    pub vault_root: PathBuf,

    /// Relative path of the active manuscript
    pub manuscript_path: String,

    /// Relative path of the story bible
    pub story_bible_path: String,

    /// Relative path of the running extractions log
    pub extractions_path: String,

    /// Relative path of the sliding-window excerpt
    pub sliding_window_path: String,

    /// Folder holding one note file per character
    pub character_folder: String,

    /// Model provider name ("anthropic" or "openai")
    pub provider: String,

    /// Provider-specific model identifier
    pub model: String,

    /// Provider API key
    pub api_key: String,

    /// Maximum tokens per generation; the provider default applies if unset
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

impl StudioSettings {
    /// Validate that every required field is present.
    ///
    /// A missing field is a caller error and the message names the field,
    /// so the caller can identify exactly what to fix.
    pub fn validate(&self) -> Result<(), String> {
        if self.vault_root.as_os_str().is_empty() {
            return Err("vault_root is not set".to_string());
        }

        let required = [
            ("manuscript_path", &self.manuscript_path),
            ("story_bible_path", &self.story_bible_path),
            ("extractions_path", &self.extractions_path),
            ("sliding_window_path", &self.sliding_window_path),
            ("character_folder", &self.character_folder),
            ("model", &self.model),
            ("api_key", &self.api_key),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(format!("{} is not set", field));
            }
        }

        self.provider
            .parse::<ProviderKind>()
            .map_err(|e| e.to_string())?;

        Ok(())
    }

    /// Load settings from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize settings to a TOML string.
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
