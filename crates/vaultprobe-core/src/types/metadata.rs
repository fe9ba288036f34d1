//! The vault's root summary document.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::DiagnosticError;
use crate::Result;

/// Parsed `metadata.yml`.
///
/// Only `credential_count` is interpreted. Every other key is kept verbatim in
/// [`extra`](Self::extra) so newer vault formats still load.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VaultMetadata {
    /// Number of credentials the vault claims to hold.
    pub credential_count: u64,

    /// Keys this crate does not interpret.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl VaultMetadata {
    /// Parses a metadata document from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`DiagnosticError::MalformedMetadata`] if the text is not a
    /// YAML mapping or `credential_count` is absent, negative or not an
    /// integer.
    ///
    /// # Examples
    ///
    /// ```
    /// use vaultprobe_core::types::VaultMetadata;
    ///
    /// let meta = VaultMetadata::from_yaml("credential_count: 3\nversion: '1.0'\n").unwrap();
    /// assert_eq!(meta.credential_count, 3);
    /// assert!(meta.extra.contains_key("version"));
    /// ```
    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|e| DiagnosticError::MalformedMetadata {
            detail: e.to_string(),
        })
    }

    /// Looks up an uninterpreted key as a string, if it is one.
    #[must_use]
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(serde_yaml::Value::as_str)
    }
}
