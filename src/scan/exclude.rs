use anyhow::{Context, Result};
use glob::Pattern;
use std::collections::HashSet;

/// Files that live next to the data tables but are never data:
/// the edit-history log, the Windows folder settings file, the legacy
/// calculation script, and the instrument's binary project file.
pub const DEFAULT_EXCLUSIONS: [&str; 4] =
    ["edit_history.csv", "desktop.ini", "oxd.go", "充放電.SMP"];

/// Filenames the scan must skip. Each entry matches itself exactly; entries
/// containing glob metacharacters (`*`, `?`, `[`) also match as a pattern.
#[derive(Debug, Clone)]
pub struct ExclusionSet {
    names: HashSet<String>,
    patterns: Vec<Pattern>,
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self {
            names: DEFAULT_EXCLUSIONS.iter().map(|s| s.to_string()).collect(),
            patterns: Vec::new(),
        }
    }
}

impl ExclusionSet {
    /// An empty set that excludes nothing.
    pub fn empty() -> Self {
        Self {
            names: HashSet::new(),
            patterns: Vec::new(),
        }
    }

    /// Add one name or pattern.
    pub fn insert(&mut self, entry: &str) -> Result<()> {
        if entry.contains(['*', '?', '[']) {
            let pattern = Pattern::new(entry)
                .with_context(|| format!("invalid exclusion pattern `{}`", entry))?;
            self.patterns.push(pattern);
        }
        self.names.insert(entry.to_string());
        Ok(())
    }

    /// The default set plus every entry of `entries`.
    pub fn with_patterns<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for entry in entries {
            set.insert(entry.as_ref())?;
        }
        Ok(set)
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.names.contains(name) || self.patterns.iter().any(|p| p.matches(name))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_the_non_data_files() {
        let set = ExclusionSet::default();
        for name in DEFAULT_EXCLUSIONS {
            assert!(set.is_excluded(name), "{} should be excluded", name);
        }
        assert!(!set.is_excluded("A1_forsma4.csv"));
        assert!(!set.is_excluded("Edit_History.csv"));
        assert!(!set.is_excluded("edit_history.csv.bak"));
    }

    #[test]
    fn patterns_extend_the_defaults() -> Result<()> {
        let set = ExclusionSet::with_patterns(["*.SMP", "notes.txt"])?;
        assert!(set.is_excluded("run2.SMP"));
        assert!(set.is_excluded("notes.txt"));
        assert!(set.is_excluded("desktop.ini"));
        assert!(!set.is_excluded("run2.csv"));
        Ok(())
    }

    #[test]
    fn bracketed_names_still_match_literally() -> Result<()> {
        let mut set = ExclusionSet::empty();
        set.insert("sample[1].csv")?;
        assert!(set.is_excluded("sample[1].csv"));
        assert!(set.is_excluded("sample1.csv"));
        Ok(())
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let err = ExclusionSet::with_patterns(["data[.csv"]).unwrap_err();
        assert!(err.to_string().contains("invalid exclusion pattern"));
    }
}
