use anyhow::Result;
use std::{env, fs, path::PathBuf};
use tracing::debug;

use crate::scan::ExclusionSet;

/// Comma-separated names or glob patterns excluded on top of the defaults.
pub const EXCLUDE_VAR: &str = "OXD_EXCLUDE";

#[derive(Debug, Clone)]
pub struct Config {
    /// Always the current working directory outside of tests.
    pub data_dir: PathBuf,
    pub exclusions: ExclusionSet,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            exclusions: ExclusionSet::default(),
        }
    }
}

impl Config {
    /// Build from the process environment, then exclude the running
    /// executable if it sits inside the data directory.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::from_vars(|key| env::var(key).ok())?;
        config.exclude_own_executable();
        Ok(config)
    }

    /// Build from an arbitrary variable lookup. The data directory is never
    /// taken from the environment; only the exclusion set is.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(extra) = lookup(EXCLUDE_VAR) {
            let entries = extra
                .split(',')
                .map(str::trim)
                .filter(|e| !e.is_empty());
            config.exclusions = ExclusionSet::with_patterns(entries)?;
        }

        Ok(config)
    }

    fn exclude_own_executable(&mut self) {
        let Ok(exe) = env::current_exe() else {
            return;
        };
        let (Some(exe_dir), Some(exe_name)) = (exe.parent(), exe.file_name()) else {
            return;
        };
        let same_dir = match (fs::canonicalize(exe_dir), fs::canonicalize(&self.data_dir)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        };
        if same_dir {
            let name = exe_name.to_string_lossy();
            debug!(name = %name, "excluding own executable");
            if self.exclusions.insert(&name).is_err() {
                debug!(name = %name, "executable name is not a valid pattern; not excluded");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_variables() -> Result<()> {
        let config = Config::from_vars(lookup(&[]))?;
        assert_eq!(config.data_dir, PathBuf::from("."));
        assert!(config.exclusions.is_excluded("edit_history.csv"));
        assert_eq!(config.exclusions.len(), 4);
        Ok(())
    }

    #[test]
    fn test_exclude_variable_extends_defaults() -> Result<()> {
        let config = Config::from_vars(lookup(&[(EXCLUDE_VAR, " *.tmp , notes.txt,, ")]))?;
        assert_eq!(config.data_dir, PathBuf::from("."));
        assert!(config.exclusions.is_excluded("x.tmp"));
        assert!(config.exclusions.is_excluded("notes.txt"));
        assert!(config.exclusions.is_excluded("desktop.ini"));
        assert!(!config.exclusions.is_excluded("A1_forsma4.csv"));
        Ok(())
    }

    #[test]
    fn test_data_dir_is_not_configurable() -> Result<()> {
        let config = Config::from_vars(lookup(&[("OXD_DATA_DIR", "/data/result")]))?;
        assert_eq!(config.data_dir, PathBuf::from("."));
        Ok(())
    }

    #[test]
    fn test_invalid_pattern_fails() {
        assert!(Config::from_vars(lookup(&[(EXCLUDE_VAR, "[oops")])).is_err());
    }
}
