//! Builder configuration
//!
//! Settings for the page-builder draft autosave and layout limits. Every
//! field has a default, so a partial JSON object deserializes cleanly.
use crate::models::DEFAULT_MAX_COLUMNS;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable overriding the draft directory
pub const DRAFT_DIR_ENV: &str = "CAMPUSFORMS_DRAFT_DIR";

/// Upper bound accepted for `max_columns`
const MAX_SUPPORTED_COLUMNS: usize = 12;

/// Configuration for the page builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Directory holding draft files; resolved by [`Self::resolve_draft_dir`]
    pub draft_dir: Option<PathBuf>,

    /// Name of the draft slot
    pub draft_key: String,

    /// Quiet period before an edited draft is written
    pub autosave_debounce_ms: u64,

    /// Columns a section may be split into
    pub max_columns: usize,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            draft_dir: None,
            draft_key: "page_builder_draft".to_string(),
            autosave_debounce_ms: 1000,
            max_columns: DEFAULT_MAX_COLUMNS,
        }
    }
}

impl BuilderConfig {
    /// Directory drafts are written to
    ///
    /// `CAMPUSFORMS_DRAFT_DIR` wins, then `draft_dir`, then
    /// `~/.campusforms/drafts/`.
    pub fn resolve_draft_dir(&self) -> Result<PathBuf, std::io::Error> {
        if let Ok(env_dir) = std::env::var(DRAFT_DIR_ENV) {
            tracing::info!("Using draft directory from {}: {}", DRAFT_DIR_ENV, env_dir);
            return Ok(PathBuf::from(env_dir));
        }

        if let Some(dir) = &self.draft_dir {
            return Ok(dir.clone());
        }

        let home_dir = dirs::home_dir().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Cannot determine home directory",
            )
        })?;

        Ok(home_dir.join(".campusforms").join("drafts"))
    }

    /// File name for the draft slot
    pub fn draft_file_name(&self) -> String {
        format!("{}.json", sanitize_key(&self.draft_key))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if sanitize_key(&self.draft_key).is_empty() {
            return Err("draft_key cannot be empty".to_string());
        }

        if self.autosave_debounce_ms == 0 {
            return Err("autosave_debounce_ms must be greater than 0".to_string());
        }

        if self.max_columns == 0 || self.max_columns > MAX_SUPPORTED_COLUMNS {
            return Err(format!(
                "max_columns must be between 1 and {}",
                MAX_SUPPORTED_COLUMNS
            ));
        }

        Ok(())
    }
}

/// Make a draft key filesystem-safe
fn sanitize_key(key: &str) -> String {
    key.chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '<' | '>' | '|' | '"' | '.' => '-',
            _ => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BuilderConfig::default();
        assert_eq!(config.draft_key, "page_builder_draft");
        assert_eq!(config.autosave_debounce_ms, 1000);
        assert_eq!(config.max_columns, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = BuilderConfig::default();

        config.draft_key = "  ".to_string();
        assert!(config.validate().is_err());

        config.draft_key = "draft".to_string();
        config.autosave_debounce_ms = 0;
        assert!(config.validate().is_err());

        config.autosave_debounce_ms = 250;
        config.max_columns = 0;
        assert!(config.validate().is_err());

        config.max_columns = 13;
        assert!(config.validate().is_err());

        config.max_columns = 6;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let config: BuilderConfig =
            serde_json::from_value(serde_json::json!({ "autosave_debounce_ms": 300 })).unwrap();
        assert_eq!(config.autosave_debounce_ms, 300);
        assert_eq!(config.draft_key, "page_builder_draft");
        assert!(config.draft_dir.is_none());
    }

    #[test]
    fn test_draft_file_name_is_sanitized() {
        let config = BuilderConfig {
            draft_key: "../pages/new".to_string(),
            ..BuilderConfig::default()
        };
        assert_eq!(config.draft_file_name(), "---pages-new.json");
    }

    #[test]
    fn test_explicit_draft_dir() {
        if std::env::var(DRAFT_DIR_ENV).is_ok() {
            return;
        }
        let config = BuilderConfig {
            draft_dir: Some(PathBuf::from("/tmp/campusforms-drafts")),
            ..BuilderConfig::default()
        };
        assert_eq!(
            config.resolve_draft_dir().unwrap(),
            PathBuf::from("/tmp/campusforms-drafts")
        );
    }
}
