//! Typed documents and findings produced during a diagnostic run.

pub mod finding;
pub mod metadata;
pub mod record;

pub use finding::DirectoryFinding;
pub use finding::FindingKind;
pub use metadata::VaultMetadata;
pub use record::CredentialRecord;
