//! Count mismatch classification.

use std::fmt;

use crate::types::DirectoryFinding;

/// Overall diagnosis for a completed run.
///
/// Exactly one applies to any `(expected, actual, findings)` triple; see
/// [`diagnose`] for the rule order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Declared and recovered counts agree and every directory is intact.
    Consistent,
    /// Credentials were declared but the records root is absent.
    RootMissing,
    /// Credentials were declared, the root exists, nothing was recovered.
    AllRecordsLost,
    /// Fewer credentials recovered than declared.
    PartialLoss,
    /// More credentials recovered than declared; metadata was not updated.
    StaleMetadataUndercount,
    /// Counts agree only because broken directories offset something else.
    Inconsistent,
}

impl Classification {
    /// Every classification, in rule order.
    pub const ALL: [Self; 6] = [
        Self::Consistent,
        Self::RootMissing,
        Self::AllRecordsLost,
        Self::PartialLoss,
        Self::StaleMetadataUndercount,
        Self::Inconsistent,
    ];

    /// Returns `true` only for [`Classification::Consistent`].
    #[must_use]
    pub const fn is_consistent(self) -> bool {
        matches!(self, Self::Consistent)
    }

    /// Stable kebab-case identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Consistent => "consistent",
            Self::RootMissing => "root-missing",
            Self::AllRecordsLost => "all-records-lost",
            Self::PartialLoss => "partial-loss",
            Self::StaleMetadataUndercount => "stale-metadata-undercount",
            Self::Inconsistent => "inconsistent",
        }
    }

    /// One-line explanation of the likely cause.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Consistent => "credential count matches and every record is readable",
            Self::RootMissing => {
                "metadata declares credentials but the records directory is absent from the archive"
            }
            Self::AllRecordsLost => {
                "metadata declares credentials but none of the record documents could be recovered"
            }
            Self::PartialLoss => "some declared credentials could not be recovered",
            Self::StaleMetadataUndercount => {
                "more credentials were recovered than declared; metadata was not updated"
            }
            Self::Inconsistent => {
                "counts agree but some directories are broken; the match is coincidental"
            }
        }
    }

    /// Usual reasons a vault ends up with this classification, most likely
    /// first. Empty when there is nothing to explain.
    #[must_use]
    pub const fn likely_causes(self) -> &'static [&'static str] {
        match self {
            Self::RootMissing => &[
                "credential files were never written before the archive was compressed",
                "the records directory was written under a different name or location",
                "the compressor skipped the records directory",
                "paths were built with Windows separators and stored as flat file names",
            ],
            Self::AllRecordsLost => &[
                "credential files were not written during archive creation",
                "credential files were written with wrong paths or names",
                "the compressor failed to include the record files",
                "Windows path handling broke record file creation",
            ],
            Self::PartialLoss => &[
                "some record writes failed or were interrupted",
                "records were deleted without updating the metadata",
            ],
            Self::StaleMetadataUndercount => &[
                "credentials were added without updating the metadata document",
            ],
            Self::Consistent | Self::Inconsistent => &[],
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a run. Pure; first matching rule wins.
///
/// 1. `expected == actual` and every finding ok: `Consistent`
/// 2. `actual == 0 < expected` and the records root is missing: `RootMissing`
/// 3. `actual == 0 < expected`: `AllRecordsLost`
/// 4. `actual < expected`: `PartialLoss`
/// 5. `actual > expected`: `StaleMetadataUndercount`
/// 6. otherwise (`expected == actual` with a bad finding): `Inconsistent`
///
/// # Examples
///
/// ```
/// use vaultprobe_core::Classification;
/// use vaultprobe_core::diagnose;
/// use vaultprobe_core::types::DirectoryFinding;
///
/// let findings = [DirectoryFinding::missing_record("abc123")];
/// assert_eq!(diagnose(1, 0, &findings), Classification::AllRecordsLost);
/// ```
#[must_use]
pub fn diagnose(expected: u64, actual: u64, findings: &[DirectoryFinding]) -> Classification {
    let all_ok = findings.iter().all(DirectoryFinding::is_ok);
    let root_missing = findings.iter().any(DirectoryFinding::is_root_missing);

    if expected == actual && all_ok {
        Classification::Consistent
    } else if actual == 0 && expected > 0 && root_missing {
        Classification::RootMissing
    } else if actual == 0 && expected > 0 {
        Classification::AllRecordsLost
    } else if actual < expected {
        Classification::PartialLoss
    } else if actual > expected {
        Classification::StaleMetadataUndercount
    } else {
        Classification::Inconsistent
    }
}
