// SPDX-FileCopyrightText: 2026 Control Room Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Admin sidebar integration for registered panels.
//!
//! Every panel gets one proxy entry grouped under the Control Room app. The
//! policy decides whether a panel's own placeholder model additionally stays
//! visible under its original app ("dual registration").

use std::collections::{BTreeMap, HashSet};

use controlroom_config::model::AdminConfig;
use serde::Serialize;
use tracing::debug;

use crate::catalog::is_featured;
use crate::registry::Registry;

/// Override key that applies to every panel without its own entry.
pub const WILDCARD: &str = "*";

/// Sidebar label prefix for community panels. `[` sorts after `Z`, so these
/// always follow the featured panels.
pub const COMMUNITY_PREFIX: &str = "[+] ";

/// Whether the panel under `key` should also stay registered under its own app.
///
/// An exact override for `key` wins, then the `"*"` override, then
/// `global_default`.
pub fn should_dual_register(
    key: &str,
    global_default: bool,
    overrides: &BTreeMap<String, bool>,
) -> bool {
    overrides
        .get(key)
        .or_else(|| overrides.get(WILDCARD))
        .copied()
        .unwrap_or(global_default)
}

/// Dual-registration policy backed by the `[admin]` config section.
#[derive(Debug, Clone, Default)]
pub struct AdminIntegration {
    global_default: bool,
    overrides: BTreeMap<String, bool>,
}

impl AdminIntegration {
    pub fn new(global_default: bool, overrides: BTreeMap<String, bool>) -> Self {
        Self {
            global_default,
            overrides,
        }
    }

    pub fn from_config(config: &AdminConfig) -> Self {
        Self::new(
            config.register_panels_in_admin,
            config.panel_admin_registration.clone(),
        )
    }

    pub fn should_dual_register(&self, key: &str) -> bool {
        should_dual_register(key, self.global_default, &self.overrides)
    }
}

/// Who may use an admin entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdminPermissions {
    pub add: bool,
    pub delete: bool,
    /// View and change are granted to staff users only.
    pub staff_only: bool,
}

/// The proxy admin entry generated for one panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminEntry {
    pub key: String,
    pub model_name: String,
    pub label: String,
    pub app_label: String,
    /// Route the entry redirects to, `"{app_name}:{url_name}"`.
    pub redirect_route: String,
    pub featured: bool,
    pub permissions: AdminPermissions,
}

/// Proxy model name for a registry key: separators removed, title-cased,
/// suffixed with `PanelProxy`.
pub fn proxy_model_name(key: &str) -> String {
    let compact: String = key.chars().filter(|c| *c != '-' && *c != '_').collect();
    format!("{}PanelProxy", title_case(&compact))
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Build the admin entries for every registered panel, in registry order.
///
/// Two keys collapsing to the same model name (`dj_cache` and `djcache`) keep
/// only the first entry.
pub fn admin_entries(registry: &Registry, app_label: &str) -> Vec<AdminEntry> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for panel in registry.panels() {
        let key = panel.registry_id.as_str();
        let model_name = proxy_model_name(key);
        if !seen.insert(model_name.clone()) {
            debug!(panel = %key, model = %model_name, "admin proxy already generated, skipping");
            continue;
        }

        let featured = is_featured(key);
        let label = if featured {
            panel.name.clone()
        } else {
            format!("{COMMUNITY_PREFIX}{}", panel.name)
        };

        entries.push(AdminEntry {
            key: key.to_string(),
            model_name,
            label,
            app_label: app_label.to_string(),
            redirect_route: panel.route(),
            featured,
            permissions: AdminPermissions {
                add: false,
                delete: false,
                staff_only: true,
            },
        });
    }

    entries
}

/// A model a panel app registered in the admin as a sidebar placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderModel {
    pub app_label: String,
    pub label: String,
    /// Placeholders are unmanaged; managed models are never hidden.
    pub managed: bool,
}

/// Placeholder models to remove from their original app.
///
/// A placeholder is hidden when it is unmanaged, belongs to a registered
/// panel, and the policy does not dual-register that panel.
pub fn hidden_placeholders<'a>(
    registry: &Registry,
    policy: &AdminIntegration,
    models: &'a [PlaceholderModel],
) -> Vec<&'a PlaceholderModel> {
    models
        .iter()
        .filter(|m| !m.managed && !m.app_label.is_empty())
        .filter(|m| registry.is_registered(&m.app_label))
        .filter(|m| !policy.should_dual_register(&m.app_label))
        .collect()
}
