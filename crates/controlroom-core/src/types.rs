// SPDX-FileCopyrightText: 2026 Control Room Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the registry, the validator, and the dashboard.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Unique identity of a panel inside a registry.
///
/// Keys produced by discovery come from [`crate::identity::resolve`]; manual
/// registration may supply any non-empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistryKey(String);

impl RegistryKey {
    /// Wrap an already-derived key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RegistryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RegistryKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RegistryKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RegistryKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RegistryKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Fixed icon vocabulary understood by the dashboard templates.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Database,
    Layers,
    Link,
    Chart,
    Radio,
    Cog,
}

impl Icon {
    /// Comma-separated list of every accepted icon name, for error messages.
    pub fn vocabulary() -> String {
        Icon::iter()
            .map(|icon| icon.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Which registration keeps a registry key when two candidates claim it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ConflictPolicy {
    /// The first registration is kept; later claimants are dropped.
    #[default]
    FirstWins,
    /// The latest registration overwrites the earlier one.
    LastWins,
}
