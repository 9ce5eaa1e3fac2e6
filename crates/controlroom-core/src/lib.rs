// SPDX-FileCopyrightText: 2026 Control Room Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Control Room.
//!
//! This crate provides the foundational error types, the registry key and icon
//! vocabulary, and the identity derivation used throughout the workspace.

pub mod error;
pub mod identity;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{
    ConflictResolution, LinkResolutionFailure, LoadError, PanelError, RegistrationConflict,
    RequiredField, ValidationError,
};
pub use types::{ConflictPolicy, Icon, RegistryKey};
