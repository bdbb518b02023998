//! Flat key-value intake.
//!
//! The parameter set is read from a flat string-to-string mapping. Getters
//! consume keys as they are read; [`FlatInput::finish`] then rejects any key
//! nobody asked for, so a misspelt field fails loudly instead of being
//! silently ignored.

use super::error::ConfigurationError;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

/// A flat key-value record with consumption tracking.
#[derive(Clone, Debug, Default)]
pub struct FlatInput {
    entries: BTreeMap<String, String>,
    consumed: BTreeSet<String>,
}

impl FlatInput {
    /// Wrap an existing mapping.
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        Self {
            entries,
            consumed: BTreeSet::new(),
        }
    }

    /// Build from `(key, value)` pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Insert or replace an entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Returns true if `key` is present (consumed or not).
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read a required text value.
    pub fn text(&mut self, key: &str) -> Result<String, ConfigurationError> {
        self.optional_text(key)?
            .ok_or_else(|| ConfigurationError::MissingField(key.to_string()))
    }

    /// Read an optional text value. Blank text counts as malformed.
    pub fn optional_text(&mut self, key: &str) -> Result<Option<String>, ConfigurationError> {
        match self.take(key) {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Err(ConfigurationError::malformed(
                key,
                raw,
                "expected non-empty text",
            )),
            Some(raw) => Ok(Some(raw.trim().to_string())),
        }
    }

    /// Read a required decimal value.
    pub fn decimal(&mut self, key: &str) -> Result<Decimal, ConfigurationError> {
        self.optional_decimal(key)?
            .ok_or_else(|| ConfigurationError::MissingField(key.to_string()))
    }

    /// Read an optional decimal value.
    pub fn optional_decimal(&mut self, key: &str) -> Result<Option<Decimal>, ConfigurationError> {
        match self.take(key) {
            None => Ok(None),
            Some(raw) => parse_decimal(key, &raw).map(Some),
        }
    }

    /// Keys from `keys` that are absent.
    pub fn missing<'a>(&self, keys: &[&'a str]) -> Vec<&'a str> {
        keys.iter()
            .copied()
            .filter(|k| !self.entries.contains_key(*k))
            .collect()
    }

    /// Fail on the first key that was never read.
    pub fn finish(self) -> Result<(), ConfigurationError> {
        match self
            .entries
            .keys()
            .find(|k| !self.consumed.contains(k.as_str()))
        {
            Some(unknown) => Err(ConfigurationError::UnknownField(unknown.clone())),
            None => Ok(()),
        }
    }

    fn take(&mut self, key: &str) -> Option<String> {
        let value = self.entries.get(key).cloned();
        if value.is_some() {
            self.consumed.insert(key.to_string());
        }
        value
    }
}

/// Parse decimal text, accepting plain and scientific notation.
pub fn parse_decimal(key: &str, raw: &str) -> Result<Decimal, ConfigurationError> {
    let trimmed = raw.trim().replace('_', "");
    Decimal::from_str(&trimmed)
        .or_else(|_| Decimal::from_scientific(&trimmed))
        .map_err(|e| ConfigurationError::malformed(key, raw, format!("expected a decimal number: {}", e)))
}
