// SPDX-FileCopyrightText: 2026 Control Room Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Control Room.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::collections::BTreeMap;
use std::path::PathBuf;

use controlroom_core::ConflictPolicy;
use serde::{Deserialize, Serialize};

/// Top-level Control Room configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ControlRoomConfig {
    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Registry behavior settings.
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Where panels are discovered from.
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Admin sidebar integration settings.
    #[serde(default)]
    pub admin: AdminConfig,

    /// Host application collaborators (installed apps, mounted routes).
    #[serde(default)]
    pub host: HostConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Registry configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Which candidate keeps a registry key claimed twice.
    #[serde(default)]
    pub conflict_policy: ConflictPolicy,
}

/// Panel discovery configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DiscoveryConfig {
    /// Scan panels linked into the binary through the plugin group.
    #[serde(default = "default_inventory")]
    pub inventory: bool,

    /// Directories holding `<distribution>/panel.toml` manifests.
    #[serde(default)]
    pub manifest_dirs: Vec<PathBuf>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            inventory: default_inventory(),
            manifest_dirs: Vec::new(),
        }
    }
}

fn default_inventory() -> bool {
    true
}

/// Admin sidebar integration.
///
/// By default a panel only appears under the Control Room entry. Setting
/// `register_panels_in_admin` makes every panel also keep its own admin
/// section; `panel_admin_registration` overrides that per registry key, with
/// `"*"` acting as the default for keys not listed.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AdminConfig {
    /// Global default for dual registration.
    #[serde(default)]
    pub register_panels_in_admin: bool,

    /// Per-registry-key overrides.
    #[serde(default)]
    pub panel_admin_registration: BTreeMap<String, bool>,
}

/// Host application collaborators the dashboard consults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HostConfig {
    /// URL namespace the dashboard itself is mounted under.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// App names enabled in the host project.
    #[serde(default)]
    pub installed_apps: Vec<String>,

    /// Mounted routes, `"namespace:name"` to URL path. `{0}`, `{1}`, ... are
    /// substituted with reverse arguments.
    #[serde(default)]
    pub routes: BTreeMap<String, String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            installed_apps: Vec::new(),
            routes: BTreeMap::new(),
        }
    }
}

fn default_namespace() -> String {
    "control_room".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_conservative() {
        let config = ControlRoomConfig::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.registry.conflict_policy, ConflictPolicy::FirstWins);
        assert!(config.discovery.inventory);
        assert!(config.discovery.manifest_dirs.is_empty());
        assert!(!config.admin.register_panels_in_admin);
        assert!(config.admin.panel_admin_registration.is_empty());
        assert_eq!(config.host.namespace, "control_room");
    }

    #[test]
    fn admin_overrides_deserialize_with_wildcard() {
        let toml_str = r#"
[admin]
register_panels_in_admin = true

[admin.panel_admin_registration]
dj_redis_panel = false
"*" = true
"#;
        let config: ControlRoomConfig = toml::from_str(toml_str).unwrap();
        assert!(config.admin.register_panels_in_admin);
        assert_eq!(
            config.admin.panel_admin_registration.get("dj_redis_panel"),
            Some(&false)
        );
        assert_eq!(config.admin.panel_admin_registration.get("*"), Some(&true));
    }

    #[test]
    fn conflict_policy_deserializes_kebab_case() {
        let config: ControlRoomConfig = toml::from_str(
            r#"
[registry]
conflict_policy = "last-wins"
"#,
        )
        .unwrap();
        assert_eq!(config.registry.conflict_policy, ConflictPolicy::LastWins);
    }

    #[test]
    fn unknown_conflict_policy_is_rejected() {
        let result = toml::from_str::<ControlRoomConfig>(
            r#"
[registry]
conflict_policy = "random-wins"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn host_routes_deny_unknown_fields() {
        let result = toml::from_str::<ControlRoomConfig>(
            r#"
[host]
installed_app = ["dj_redis_panel"]
"#,
        );
        assert!(result.is_err());
    }
}
