// SPDX-FileCopyrightText: 2026 Control Room Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./controlroom.toml` > `~/.config/controlroom/controlroom.toml`
//! > `/etc/controlroom/controlroom.toml` with environment variable overrides via
//! the `CONTROLROOM_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::ControlRoomConfig;

/// File name looked up in every layer of the hierarchy.
pub const CONFIG_FILE_NAME: &str = "controlroom.toml";

/// System-wide configuration path.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/controlroom/controlroom.toml";

/// Per-user configuration path, if the platform has a config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("controlroom").join(CONFIG_FILE_NAME))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/controlroom/controlroom.toml` (system-wide)
/// 3. `~/.config/controlroom/controlroom.toml` (user XDG config)
/// 4. `./controlroom.toml` (local directory)
/// 5. `CONTROLROOM_*` environment variables
pub fn load_config() -> Result<ControlRoomConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<ControlRoomConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ControlRoomConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ControlRoomConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ControlRoomConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(ControlRoomConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(CONFIG_FILE_NAME))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `CONTROLROOM_REGISTRY_CONFLICT_POLICY` must map to
/// `registry.conflict_policy`, not `registry.conflict.policy`.
fn env_provider() -> Env {
    Env::prefixed("CONTROLROOM_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        let mapped = key
            .as_str()
            .replacen("logging_", "logging.", 1)
            .replacen("registry_", "registry.", 1)
            .replacen("discovery_", "discovery.", 1)
            .replacen("admin_", "admin.", 1)
            .replacen("host_", "host.", 1);
        mapped.into()
    })
}
