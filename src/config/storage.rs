//! Storage configuration types.

use serde::Deserialize;

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Storage type discriminator. Only "sqlite" is implemented.
    #[serde(rename = "type")]
    pub storage_type: String,
    /// SQLite database file path.
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            storage_type: "sqlite".to_string(),
            path: "spiff.db".to_string(),
        }
    }
}
