//! Runtime configuration

use serde::{Deserialize, Serialize};

/// Maximum length of a single console print (10 KB)
pub const DEFAULT_MAX_PRINT_LENGTH: usize = 10_000;

/// Maximum size of a stored row (64 KB)
pub const DEFAULT_MAX_ROW_SIZE: usize = 65_536;

/// Limits and switches applied to every action
///
/// Missing fields take their default when deserialized, so a partial
/// config such as `{"debug_mode": true}` is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Longest message a contract may print in one call; longer prints are truncated
    pub max_print_length: usize,

    /// Largest row payload a contract may store
    pub max_row_size: usize,

    /// Debug mode (forwards contract prints to the logger)
    pub debug_mode: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_print_length: DEFAULT_MAX_PRINT_LENGTH,
            max_row_size: DEFAULT_MAX_ROW_SIZE,
            debug_mode: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config() {
        let config: RuntimeConfig = serde_json::from_str(r#"{"debug_mode": true}"#).unwrap();
        assert!(config.debug_mode);
        assert_eq!(config.max_print_length, DEFAULT_MAX_PRINT_LENGTH);
        assert_eq!(config.max_row_size, DEFAULT_MAX_ROW_SIZE);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: RuntimeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RuntimeConfig::default());
    }
}
