use crate::EditorError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "prooftree.config.json";

/// Editor configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Maximum undo levels kept in history (0 = unlimited)
    #[serde(default)]
    pub history_limit: usize,

    /// Name hashed into the prefix of every generated ID
    #[serde(default = "default_session_seed")]
    pub session_seed: String,
}

fn default_session_seed() -> String {
    "prooftree".to_string()
}

impl EditorConfig {
    /// Load config from a directory, falling back to defaults if none exists
    pub fn load(dir: &Path) -> Result<Self, EditorError> {
        let config_path = dir.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: EditorConfig = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(EditorConfig::default())
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: 0,
            session_seed: default_session_seed(),
        }
    }
}
