// SPDX-FileCopyrightText: 2026 Control Room Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error and diagnostic types for panel discovery and registration.
//!
//! Nothing here is fatal to the host. Discovery collects these values into a
//! report and keeps going; the CLI renders them through miette.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use std::fmt;
use std::path::PathBuf;

use miette::Diagnostic;
use strum::Display;
use thiserror::Error;

use crate::types::RegistryKey;

/// Required capabilities every panel must declare, in check order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum RequiredField {
    Name,
    Description,
    Icon,
}

impl RequiredField {
    pub const ALL: [RequiredField; 3] = [
        RequiredField::Name,
        RequiredField::Description,
        RequiredField::Icon,
    ];
}

/// A candidate panel does not have the shape the dashboard needs.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ValidationError {
    /// A required field is absent or blank.
    #[error("missing required field `{field}`")]
    #[diagnostic(
        code(controlroom::panel::missing_field),
        help("declare a non-empty `{field}` on the panel")
    )]
    MissingField { field: RequiredField },

    /// The icon is not part of the fixed vocabulary.
    #[error("invalid icon `{value}`")]
    #[diagnostic(code(controlroom::panel::invalid_icon), help("use one of: {valid}"))]
    InvalidIcon { value: String, valid: String },
}

impl ValidationError {
    /// Name of the offending field, for structured log records.
    pub fn field(&self) -> RequiredField {
        match self {
            ValidationError::MissingField { field } => *field,
            ValidationError::InvalidIcon { .. } => RequiredField::Icon,
        }
    }
}

/// A plugin reference could not be resolved into a panel.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The manifest file the entry point refers to does not exist.
    #[error("manifest not found at {}", .path.display())]
    MissingManifest { path: PathBuf },

    /// The manifest exists but could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest is not a well-formed panel declaration.
    #[error("invalid panel manifest {}: {reason}", .path.display())]
    InvalidManifest { path: PathBuf, reason: String },

    /// A loader function reported its own failure.
    #[error("{0}")]
    Loader(String),
}

impl LoadError {
    pub fn loader(message: impl Into<String>) -> Self {
        LoadError::Loader(message.into())
    }
}

/// The primary error type for a panel that could not be registered.
#[derive(Debug, Error, Diagnostic)]
pub enum PanelError {
    /// The plugin reference failed to load.
    #[error("failed to load panel '{entry_point}' from {reference} ({distribution}): {source}")]
    #[diagnostic(code(controlroom::discovery::load))]
    Discovery {
        distribution: String,
        entry_point: String,
        reference: String,
        #[source]
        source: LoadError,
    },

    /// The owning distribution name is not a valid packaging name.
    #[error("entry point '{entry_point}' belongs to invalid distribution name `{distribution}`")]
    #[diagnostic(code(controlroom::discovery::invalid_distribution))]
    InvalidDistribution {
        distribution: String,
        entry_point: String,
    },

    /// The loaded panel is missing a required field or has a bad icon.
    #[error("panel '{key}' from {origin} failed validation: {source}")]
    #[diagnostic(code(controlroom::panel::validation))]
    Validation {
        key: RegistryKey,
        origin: String,
        #[source]
        #[diagnostic_source]
        source: ValidationError,
    },

    /// Manual registration was attempted without a key.
    #[error("a registry key is required for manual registration")]
    #[diagnostic(code(controlroom::registry::missing_key))]
    MissingKey,
}

impl PanelError {
    /// Distribution the failure is attributed to, when known.
    pub fn distribution(&self) -> Option<&str> {
        match self {
            PanelError::Discovery { distribution, .. }
            | PanelError::InvalidDistribution { distribution, .. } => Some(distribution),
            PanelError::Validation { .. } | PanelError::MissingKey => None,
        }
    }
}

/// Which candidate kept a contested registry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConflictResolution {
    /// The existing entry was kept; the newcomer was dropped.
    KeptExisting,
    /// The newcomer replaced the existing entry.
    Replaced,
}

/// Two candidates resolved to the same registry key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationConflict {
    pub key: RegistryKey,
    /// Where the entry that was already registered came from.
    pub existing: String,
    /// Where the contending candidate came from.
    pub incoming: String,
    pub resolution: ConflictResolution,
}

impl fmt::Display for RegistrationConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "panel id '{}' registered by {} is also claimed by {} ({})",
            self.key, self.existing, self.incoming, self.resolution
        )
    }
}

/// A panel's navigation target could not be reversed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("panel '{key}' is registered but route `{route}` could not be resolved: {reason}")]
#[diagnostic(
    code(controlroom::link::unresolved),
    help("make sure the panel's app is installed and its routes are mounted")
)]
pub struct LinkResolutionFailure {
    pub key: RegistryKey,
    pub route: String,
    pub reason: String,
}
