//! Shared fixtures for vaultprobe-core integration tests.

#![allow(dead_code, clippy::unwrap_used, clippy::missing_panics_doc)]

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use tempfile::TempDir;
use vaultprobe_core::ArchiveExtractor;
use vaultprobe_core::formats::detect::SEVENZ_MAGIC;

/// Returns a well-formed record document for `id`.
pub fn record_yaml(id: &str) -> String {
    format!(
        "id: {id}\nname: Entry {id}\ncredential_type: login\nfields:\n  username:\n    value: alice\n  password:\n    value: hunter2\n    sensitive: true\ntags: []\n"
    )
}

/// Declarative description of an extracted vault tree.
#[derive(Debug, Clone, Default)]
pub struct VaultLayout {
    files: Vec<(PathBuf, Vec<u8>)>,
    dirs: Vec<PathBuf>,
}

impl VaultLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn metadata(self, text: &str) -> Self {
        self.file("metadata.yml", text)
    }

    pub fn count(self, n: u64) -> Self {
        self.metadata(&format!("version: '1.0'\nformat: memory-v1\ncredential_count: {n}\n"))
    }

    pub fn records_root(self) -> Self {
        self.dir("credentials")
    }

    pub fn record(self, id: &str) -> Self {
        self.file(format!("credentials/{id}/record.yml"), record_yaml(id))
    }

    pub fn raw_record(self, dir: &str, body: &str) -> Self {
        self.file(format!("credentials/{dir}/record.yml"), body)
    }

    pub fn empty_credential_dir(self, dir: &str) -> Self {
        self.dir(format!("credentials/{dir}"))
    }

    pub fn file(mut self, path: impl Into<PathBuf>, body: impl AsRef<[u8]>) -> Self {
        self.files.push((path.into(), body.as_ref().to_vec()));
        self
    }

    pub fn dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.dirs.push(path.into());
        self
    }

    pub fn write_to(&self, root: &Path) -> std::io::Result<()> {
        for dir in &self.dirs {
            fs::create_dir_all(root.join(dir))?;
        }
        for (path, body) in &self.files {
            let target = root.join(path);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(target, body)?;
        }
        Ok(())
    }

    /// Materializes the layout in a fresh temp dir.
    pub fn materialize(&self) -> TempDir {
        let temp = TempDir::new().unwrap();
        self.write_to(temp.path()).unwrap();
        temp
    }
}

/// Extractor that lays out a fixed vault tree instead of decoding anything.
pub struct FakeExtractor {
    pub layout: VaultLayout,
    pub expected_passphrase: Option<String>,
}

impl FakeExtractor {
    pub fn new(layout: VaultLayout) -> Self {
        Self {
            layout,
            expected_passphrase: None,
        }
    }

    pub fn with_passphrase(mut self, passphrase: &str) -> Self {
        self.expected_passphrase = Some(passphrase.to_string());
        self
    }
}

impl ArchiveExtractor for FakeExtractor {
    fn extract(
        &self,
        _archive: &Path,
        passphrase: Option<&str>,
        dest: &Path,
    ) -> vaultprobe_core::Result<()> {
        if let Some(expected) = &self.expected_passphrase
            && passphrase != Some(expected.as_str())
        {
            return Err(vaultprobe_core::DiagnosticError::ExtractionFailed {
                exit_code: Some(2),
                output: "ERROR: Wrong password".to_string(),
            });
        }
        self.layout.write_to(dest)?;
        Ok(())
    }

    fn name(&self) -> &str {
        "fake"
    }
}

/// Writes a file that passes the container signature check.
pub fn signed_archive(dir: &Path) -> PathBuf {
    let path = dir.join("vault.7z");
    let mut bytes = SEVENZ_MAGIC.to_vec();
    bytes.extend_from_slice(&[0x00, 0x04]);
    fs::write(&path, bytes).unwrap();
    path
}
