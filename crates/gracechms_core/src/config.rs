//! Process configuration read from the environment.
//!
//! # Invariants
//! - Blank or missing variables fall back to defaults; loading never fails.
//! - Log level validation is left to [`crate::logging::init_logging`].

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "GRACECHMS_DB_PATH";
pub const REFERENCE_DIR_VAR: &str = "GRACECHMS_REFERENCE_DIR";
pub const LOG_LEVEL_VAR: &str = "GRACECHMS_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "GRACECHMS_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "gracechms.sqlite3";
const DEFAULT_REFERENCE_DIR: &str = "reference";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// SQLite file backing the collection store.
    pub db_path: PathBuf,
    /// Directory holding `<name>.html` reference pages.
    pub reference_dir: PathBuf,
    pub log_level: String,
    /// Rolling log directory; file logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl ShellConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|trimmed| !trimmed.is_empty())
        };

        Self {
            db_path: value(DB_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
            reference_dir: PathBuf::from(
                value(REFERENCE_DIR_VAR).unwrap_or_else(|| DEFAULT_REFERENCE_DIR.to_string()),
            ),
            log_level: value(LOG_LEVEL_VAR).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: value(LOG_DIR_VAR).map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ShellConfig, DB_PATH_VAR, LOG_DIR_VAR, REFERENCE_DIR_VAR};
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn missing_variables_use_defaults() {
        let config = ShellConfig::default();
        assert_eq!(
            config.db_path,
            std::env::temp_dir().join("gracechms.sqlite3")
        );
        assert_eq!(config.reference_dir, PathBuf::from("reference"));
        assert_eq!(config.log_level, default_log_level());
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn blank_variables_are_treated_as_missing() {
        let config = ShellConfig::from_lookup(lookup_from(&[
            (DB_PATH_VAR, "   "),
            (LOG_DIR_VAR, ""),
        ]));
        assert_eq!(
            config.db_path,
            std::env::temp_dir().join("gracechms.sqlite3")
        );
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn explicit_values_are_trimmed() {
        let config = ShellConfig::from_lookup(lookup_from(&[
            (DB_PATH_VAR, " /data/church.sqlite3 "),
            (REFERENCE_DIR_VAR, "/srv/pages"),
        ]));
        assert_eq!(config.db_path, PathBuf::from("/data/church.sqlite3"));
        assert_eq!(config.reference_dir, PathBuf::from("/srv/pages"));
    }
}
