//! Integrity diagnostics for encrypted credential vault archives.
//!
//! A vault is a 7z container holding a `metadata.yml` summary that declares
//! how many credentials it stores, plus one directory per credential under
//! `credentials/`, each with a `record.yml`. `vaultprobe-core` unpacks the
//! container into a scratch directory, compares the declared count with what
//! can actually be recovered and classifies any mismatch.
//!
//! # Examples
//!
//! ```no_run
//! use vaultprobe_core::DiagnosticConfig;
//! use vaultprobe_core::diagnose_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DiagnosticConfig::default();
//! let result = diagnose_archive("vault.7z", None, &config)?;
//! for finding in result.offending_findings() {
//!     println!("{finding}");
//! }
//! println!("{}", result.classification.description());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod extraction;
pub mod formats;
pub mod inspection;
pub mod report;
pub mod types;

// Re-export main API types
pub use api::diagnose_archive;
pub use api::diagnose_archive_with;
pub use api::diagnose_extracted;
pub use config::DiagnosticConfig;
pub use config::ExtractorKind;
pub use error::DiagnosticError;
pub use error::Result;
pub use extraction::ArchiveExtractor;
pub use inspection::Classification;
pub use inspection::diagnose;
pub use report::DiagnosticResult;
