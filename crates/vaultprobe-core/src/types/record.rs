//! Per-credential record documents.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Parsed `record.yml` from one credential directory.
///
/// `id`, `name`, `credential_type` and `fields` are required. Older vaults
/// wrote the display name as `title`, which is accepted as an alias.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CredentialRecord {
    /// Identifier, expected to be unique within the vault.
    pub id: String,

    /// Display name.
    #[serde(alias = "title")]
    pub name: String,

    /// Credential kind (`login`, `credit_card`, `secure_note`, ...).
    pub credential_type: String,

    /// Field name to opaque field value.
    pub fields: BTreeMap<String, serde_yaml::Value>,

    /// Keys this crate does not interpret (tags, notes, timestamps).
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl CredentialRecord {
    /// Parses a record document from YAML text.
    ///
    /// The error is returned as a plain message because record failures are
    /// folded into findings rather than propagated.
    pub fn from_yaml(text: &str) -> Result<Self, String> {
        serde_yaml::from_str(text).map_err(|e| e.to_string())
    }

    /// Number of fields on the record.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}
