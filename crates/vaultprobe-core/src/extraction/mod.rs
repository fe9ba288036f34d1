//! Container extraction backends.
//!
//! The diagnostic pipeline only depends on the [`ArchiveExtractor`] trait, so
//! tests can substitute a fake that lays out a vault tree directly.

pub mod command;
pub mod scratch;
pub mod sevenz;

use std::path::Path;

use crate::DiagnosticConfig;
use crate::Result;
use crate::config::ExtractorKind;

pub use command::CommandExtractor;
pub use scratch::ScratchDir;
pub use sevenz::SevenZipExtractor;

/// Unpacks a container into a destination directory.
///
/// Implementations make a single attempt; there is no retry.
pub trait ArchiveExtractor {
    /// Extracts `archive` into `dest`, decrypting with `passphrase` if given.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DiagnosticError::ExtractionFailed`] when unpacking
    /// reports failure and [`crate::DiagnosticError::ExtractionTimeout`] when
    /// it exceeds the backend's time limit.
    fn extract(&self, archive: &Path, passphrase: Option<&str>, dest: &Path) -> Result<()>;

    /// Short backend name used in logs and reports.
    fn name(&self) -> &str;
}

impl<E: ArchiveExtractor + ?Sized> ArchiveExtractor for &E {
    fn extract(&self, archive: &Path, passphrase: Option<&str>, dest: &Path) -> Result<()> {
        (**self).extract(archive, passphrase, dest)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<E: ArchiveExtractor + ?Sized> ArchiveExtractor for Box<E> {
    fn extract(&self, archive: &Path, passphrase: Option<&str>, dest: &Path) -> Result<()> {
        (**self).extract(archive, passphrase, dest)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Builds the extractor selected by `config.extractor`, applying
/// `config.timeout`.
///
/// # Errors
///
/// Returns [`crate::DiagnosticError::ExtractionFailed`] when
/// [`ExtractorKind::Command`] is requested and no `7z` binary can be found.
pub fn extractor_for(config: &DiagnosticConfig) -> Result<Box<dyn ArchiveExtractor>> {
    let native = || -> Box<dyn ArchiveExtractor> {
        Box::new(SevenZipExtractor::new().with_timeout(config.timeout))
    };

    match config.extractor {
        ExtractorKind::Native => Ok(native()),
        ExtractorKind::Command => {
            let command = CommandExtractor::discover()?.with_timeout(config.timeout);
            Ok(Box::new(command))
        }
        ExtractorKind::Auto => Ok(CommandExtractor::discover().map_or_else(
            |_| native(),
            |command| Box::new(command.with_timeout(config.timeout)) as Box<dyn ArchiveExtractor>,
        )),
    }
}
