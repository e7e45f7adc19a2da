// src/scan/mod.rs
use std::{fs, path::Path, path::PathBuf};
use tracing::{debug, warn};

pub mod exclude;

pub use exclude::{ExclusionSet, DEFAULT_EXCLUSIONS};

/// One name from the directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: PathBuf,
}

impl DirectoryEntry {
    /// False only for entries that resolve to something other than a regular
    /// file. An entry whose metadata cannot be read (a dangling symlink, a
    /// permission error) stays in, so opening it fails the run.
    pub fn is_data_candidate(&self) -> bool {
        fs::metadata(&self.path).map_or(true, |meta| meta.is_file())
    }
}

/// Entries selected for processing, plus what was left out.
#[derive(Debug, Default)]
pub struct Selection {
    pub files: Vec<DirectoryEntry>,
    pub excluded: usize,
    pub not_files: usize,
}

/// List `dir`, sorted by filename. A directory that cannot be read yields an
/// empty listing; so does any entry that errors mid-listing.
pub fn list_entries<P: AsRef<Path>>(dir: P) -> Vec<DirectoryEntry> {
    let dir = dir.as_ref();
    let read = match fs::read_dir(dir) {
        Ok(read) => read,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "cannot list directory; treating as empty");
            return Vec::new();
        }
    };

    let mut entries: Vec<DirectoryEntry> = read
        .filter_map(|entry| entry.ok())
        .map(|entry| DirectoryEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            path: entry.path(),
        })
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}

/// The data-file candidates of `dir` that are not in `exclusions`, in listing order.
pub fn data_files<P: AsRef<Path>>(dir: P, exclusions: &ExclusionSet) -> Selection {
    let mut selection = Selection::default();
    for entry in list_entries(dir) {
        if exclusions.is_excluded(&entry.name) {
            debug!(name = %entry.name, "excluded");
            selection.excluded += 1;
        } else if !entry.is_data_candidate() {
            debug!(name = %entry.name, "not a regular file; skipped");
            selection.not_files += 1;
        } else {
            selection.files.push(entry);
        }
    }
    selection
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_listing_is_sorted() -> Result<()> {
        let tmp = tempdir()?;
        for name in ["c.csv", "a.csv", "b.csv"] {
            fs::write(tmp.path().join(name), "1,2,3\n")?;
        }

        let names: Vec<String> = list_entries(tmp.path())
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["a.csv", "b.csv", "c.csv"]);
        Ok(())
    }

    #[test]
    fn test_unreadable_directory_is_empty() -> Result<()> {
        let tmp = tempdir()?;
        assert!(list_entries(tmp.path().join("missing")).is_empty());
        Ok(())
    }

    #[test]
    fn test_data_files_skips_exclusions_and_directories() -> Result<()> {
        let tmp = tempdir()?;
        for name in ["b_forsma4.csv", "a_forsma4.csv", "desktop.ini", "edit_history.csv"] {
            fs::write(tmp.path().join(name), "1,2,3\n")?;
        }
        fs::create_dir(tmp.path().join("figure"))?;

        let selection = data_files(tmp.path(), &ExclusionSet::default());
        let names: Vec<&str> = selection.files.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a_forsma4.csv", "b_forsma4.csv"]);
        assert_eq!(selection.excluded, 2);
        assert_eq!(selection.not_files, 1);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_kept_for_opening() -> Result<()> {
        let tmp = tempdir()?;
        fs::write(tmp.path().join("a.csv"), "1,2,3\n")?;
        std::os::unix::fs::symlink(tmp.path().join("gone.csv"), tmp.path().join("b.csv"))?;

        let selection = data_files(tmp.path(), &ExclusionSet::default());
        let names: Vec<&str> = selection.files.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.csv", "b.csv"]);
        assert_eq!(selection.not_files, 0);
        Ok(())
    }
}
