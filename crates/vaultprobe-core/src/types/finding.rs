//! Per-directory observations made by the record scanner.

use std::fmt;

/// What the scanner concluded about one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindingKind {
    /// The record document exists and parsed.
    Ok,
    /// The directory holds no record document.
    MissingRecord,
    /// The record document exists but could not be read or parsed.
    ParseError {
        /// Reader or parser message.
        detail: String,
    },
    /// The records root itself is absent. Only ever emitted once, alone.
    RecordsRootMissing,
}

/// One observation about a credential directory or the records root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryFinding {
    /// Directory name relative to the records root, or the records root name
    /// for [`FindingKind::RecordsRootMissing`].
    pub dir_name: String,

    /// Outcome for this directory.
    pub kind: FindingKind,
}

impl DirectoryFinding {
    /// A directory whose record parsed.
    pub fn ok(dir_name: impl Into<String>) -> Self {
        Self {
            dir_name: dir_name.into(),
            kind: FindingKind::Ok,
        }
    }

    /// A directory without a record document.
    pub fn missing_record(dir_name: impl Into<String>) -> Self {
        Self {
            dir_name: dir_name.into(),
            kind: FindingKind::MissingRecord,
        }
    }

    /// A directory whose record document failed to parse.
    pub fn parse_error(dir_name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            dir_name: dir_name.into(),
            kind: FindingKind::ParseError {
                detail: detail.into(),
            },
        }
    }

    /// The records root is absent.
    pub fn records_root_missing(root_name: impl Into<String>) -> Self {
        Self {
            dir_name: root_name.into(),
            kind: FindingKind::RecordsRootMissing,
        }
    }

    /// Returns `true` for [`FindingKind::Ok`].
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self.kind, FindingKind::Ok)
    }

    /// Returns `true` for [`FindingKind::RecordsRootMissing`].
    #[must_use]
    pub const fn is_root_missing(&self) -> bool {
        matches!(self.kind, FindingKind::RecordsRootMissing)
    }

    /// Stable kebab-case tag for the finding kind.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self.kind {
            FindingKind::Ok => "ok",
            FindingKind::MissingRecord => "missing-record",
            FindingKind::ParseError { .. } => "parse-error",
            FindingKind::RecordsRootMissing => "records-root-missing",
        }
    }

    /// Parser message for [`FindingKind::ParseError`].
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match &self.kind {
            FindingKind::ParseError { detail } => Some(detail),
            _ => None,
        }
    }
}

impl fmt::Display for DirectoryFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FindingKind::ParseError { detail } => {
                write!(f, "{}({}): {detail}", self.tag(), self.dir_name)
            }
            _ => write!(f, "{}({})", self.tag(), self.dir_name),
        }
    }
}
