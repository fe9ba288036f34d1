//! In-process 7z extraction.
//!
//! Decoding is delegated to `sevenz-rust2`; this module only wires the
//! password, enforces the deadline between entries and refuses entry names
//! that would land outside the destination.

use std::cell::Cell;
use std::fs;
use std::fs::File;
use std::io::Read;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;
use std::time::Instant;

use sevenz_rust2::Password;
use tracing::debug;
use tracing::info;

use super::ArchiveExtractor;
use crate::DiagnosticError;
use crate::Result;

/// Extracts 7z containers with the bundled decoder.
#[derive(Debug, Clone, Default)]
pub struct SevenZipExtractor {
    timeout: Option<Duration>,
}

impl SevenZipExtractor {
    /// Creates an extractor without a time limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the time limit. The deadline is checked before each entry.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl ArchiveExtractor for SevenZipExtractor {
    fn extract(&self, archive: &Path, passphrase: Option<&str>, dest: &Path) -> Result<()> {
        let source = File::open(archive)?;
        let password = passphrase.map_or_else(Password::empty, Password::from);
        let deadline = self.timeout.map(|t| Instant::now() + t);
        let timed_out = Cell::new(false);
        let mut entries = 0usize;

        info!(archive = %archive.display(), encrypted = passphrase.is_some(), "extracting in-process");

        let extract_fn = |entry: &sevenz_rust2::ArchiveEntry,
                          reader: &mut dyn Read,
                          _dest_dir: &PathBuf|
         -> std::result::Result<bool, sevenz_rust2::Error> {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                timed_out.set(true);
                return Err(sevenz_rust2::Error::Other("extraction deadline exceeded".into()));
            }

            let relative = entry_path(&entry.name).ok_or_else(|| {
                sevenz_rust2::Error::Other(format!("unsafe entry path: {}", entry.name).into())
            })?;
            if relative.as_os_str().is_empty() {
                // Archives built from a directory carry an entry for the
                // directory itself.
                if entry.is_directory() {
                    return Ok(true);
                }
                return Err(sevenz_rust2::Error::Other("file entry without a name".into()));
            }
            let target = dest.join(relative);

            if entry.is_directory() {
                fs::create_dir_all(&target)?;
            } else {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)?;
                }
                let mut file = File::create(&target)?;
                std::io::copy(reader, &mut file)?;
            }

            entries += 1;
            Ok(true)
        };

        let outcome =
            sevenz_rust2::decompress_with_extract_fn_and_password(source, dest, password, extract_fn);

        match outcome {
            Ok(()) => {
                debug!(entries, "in-process extraction complete");
                Ok(())
            }
            Err(_) if timed_out.get() => Err(DiagnosticError::ExtractionTimeout {
                timeout: self.timeout.unwrap_or_default(),
            }),
            Err(e) => Err(DiagnosticError::ExtractionFailed {
                exit_code: None,
                output: decoder_message(&e, passphrase.is_some()),
            }),
        }
    }

    fn name(&self) -> &str {
        "sevenz-native"
    }
}

/// Renders decoder errors the way the `7z` tool words them, so callers can
/// tell passphrase problems from damaged archives.
fn decoder_message(err: &sevenz_rust2::Error, has_passphrase: bool) -> String {
    match err {
        sevenz_rust2::Error::PasswordRequired => {
            "password required: the archive is encrypted and no passphrase was given".to_string()
        }
        sevenz_rust2::Error::MaybeBadPassword(e) => format!("wrong password ({e})"),
        sevenz_rust2::Error::ChecksumVerificationFailed if has_passphrase => {
            "checksum mismatch: wrong password or corrupted data".to_string()
        }
        other => other.to_string(),
    }
}

/// Maps an archive entry name onto a relative path, or `None` if it is
/// absolute or climbs out of the destination. Names that refer to the
/// archive root map to an empty path.
fn entry_path(name: &str) -> Option<PathBuf> {
    let path = Path::new(name);
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(out)
}
