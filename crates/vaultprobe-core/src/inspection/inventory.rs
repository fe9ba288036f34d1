//! Listing of the extracted vault tree.

use std::path::Path;
use std::path::PathBuf;

use tracing::debug;
use walkdir::WalkDir;

/// One file or directory found after extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryEntry {
    /// Path relative to the extraction root.
    pub path: PathBuf,
    /// Size in bytes; zero for directories.
    pub size: u64,
    /// Whether the entry is a directory.
    pub is_dir: bool,
}

/// Everything the extractor produced, sorted by path.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    /// Entries in walk order (sorted by file name at each level).
    pub entries: Vec<InventoryEntry>,
    /// Problems noticed while walking.
    pub warnings: Vec<String>,
}

impl Inventory {
    /// Walks `root` recursively.
    ///
    /// Unreadable entries become warnings. A name containing a backslash is
    /// flagged: archives written with Windows separators unpack on other
    /// systems as flat files named `credentials\id\record.yml` at the root,
    /// which is one way every record ends up lost.
    pub fn collect(root: &Path) -> Self {
        let mut inventory = Self::default();

        for item in WalkDir::new(root).min_depth(1).sort_by_file_name() {
            let entry = match item {
                Ok(entry) => entry,
                Err(e) => {
                    inventory.warnings.push(format!("cannot list extracted entry: {e}"));
                    continue;
                }
            };
            let relative = entry
                .path()
                .strip_prefix(root)
                .unwrap_or_else(|_| entry.path())
                .to_path_buf();
            let is_dir = entry.file_type().is_dir();
            let size = if is_dir {
                0
            } else {
                entry.metadata().map_or(0, |m| m.len())
            };

            if entry.file_name().to_string_lossy().contains('\\') {
                inventory.warnings.push(format!(
                    "extracted name {} contains a backslash; the archive was likely written with Windows path separators",
                    relative.display()
                ));
            }

            inventory.entries.push(InventoryEntry {
                path: relative,
                size,
                is_dir,
            });
        }

        debug!(entries = inventory.entries.len(), "collected extracted inventory");
        inventory
    }

    /// Number of regular files.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_dir).count()
    }

    /// Sum of file sizes.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_collect_sorted_tree() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join("metadata.yml"), "credential_count: 1\n").unwrap();
        fs::create_dir_all(root.join("credentials/b")).unwrap();
        fs::create_dir_all(root.join("credentials/a")).unwrap();
        fs::write(root.join("credentials/a/record.yml"), "12345").unwrap();

        let inventory = Inventory::collect(root);
        let paths: Vec<_> = inventory.entries.iter().map(|e| e.path.clone()).collect();
        assert_eq!(
            paths,
            [
                PathBuf::from("credentials"),
                PathBuf::from("credentials/a"),
                PathBuf::from("credentials/a/record.yml"),
                PathBuf::from("credentials/b"),
                PathBuf::from("metadata.yml"),
            ]
        );
        assert_eq!(inventory.file_count(), 2);
        assert_eq!(inventory.total_size(), 5 + 20);
        assert!(inventory.warnings.is_empty());
    }

    #[test]
    fn test_empty_root() {
        let temp = TempDir::new().unwrap();
        let inventory = Inventory::collect(temp.path());
        assert!(inventory.entries.is_empty());
        assert_eq!(inventory.total_size(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_backslash_names_flagged() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(r"credentials\abc\record.yml"), "id: abc").unwrap();

        let inventory = Inventory::collect(temp.path());
        assert_eq!(inventory.warnings.len(), 1);
        assert!(inventory.warnings[0].contains("backslash"));
    }
}
