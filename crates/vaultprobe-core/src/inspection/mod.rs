//! Diagnostic stages run over an extracted vault tree.
//!
//! Stages run in order and never re-enter an earlier one:
//!
//! 1. [`read_metadata`] parses the root summary document (fatal on failure).
//! 2. [`scan_records`] walks the per-credential directories, recording one
//!    finding per directory instead of failing.
//! 3. [`diagnose`] classifies the outcome.

pub mod diagnose;
pub mod inventory;
pub mod metadata;
pub mod records;

pub use diagnose::Classification;
pub use diagnose::diagnose;
pub use inventory::Inventory;
pub use inventory::InventoryEntry;
pub use metadata::read_metadata;
pub use records::ScanOutcome;
pub use records::scan_records;
