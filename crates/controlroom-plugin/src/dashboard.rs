// SPDX-FileCopyrightText: 2026 Control Room Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dashboard view models.
//!
//! Turns registry entries and featured catalog entries into serializable
//! cards. Rendering them is the host's business.

use controlroom_core::Icon;
use controlroom_core::identity::normalize_package_name;
use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::{FeaturedPanel, featured_panels, is_featured};
use crate::host::{AppInventory, RouteResolver};
use crate::link::{LinkResolver, PLACEHOLDER_URL, ResolvedLink};
use crate::panel::Descriptor;
use crate::registry::Registry;

/// Route name of the install instructions page, inside the host namespace.
pub const INSTALL_ROUTE: &str = "install_panel";

/// Card state shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelStatus {
    Installed,
    NotInstalled,
    ComingSoon,
}

impl PanelStatus {
    pub fn label(self) -> &'static str {
        match self {
            PanelStatus::Installed => "INSTALLED",
            PanelStatus::NotInstalled => "NOT INSTALLED",
            PanelStatus::ComingSoon => "COMING SOON",
        }
    }
}

/// The three independent conditions for a panel to be usable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfigStatus {
    /// The panel is in the registry.
    pub installed: bool,
    /// The panel's app is enabled in the host.
    pub in_installed_apps: bool,
    /// The panel's entry route reverses.
    pub urls_registered: bool,
}

impl ConfigStatus {
    pub fn is_configured(&self) -> bool {
        self.installed && self.in_installed_apps && self.urls_registered
    }
}

/// One dashboard card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: Icon,
    pub url: String,
    pub status: PanelStatus,
    pub status_label: &'static str,
    pub installed: bool,
    pub configured: bool,
    pub in_installed_apps: bool,
    pub urls_registered: bool,
    pub featured: bool,
    pub coming_soon: bool,
    pub package: Option<String>,
    pub docs_url: Option<String>,
    pub pypi_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_error: Option<String>,
}

/// Builds dashboard cards from a registry and the host's routing seams.
pub struct Dashboard<'a> {
    registry: &'a Registry,
    routes: &'a dyn RouteResolver,
    apps: &'a dyn AppInventory,
    namespace: &'a str,
}

impl<'a> Dashboard<'a> {
    pub fn new(
        registry: &'a Registry,
        routes: &'a dyn RouteResolver,
        apps: &'a dyn AppInventory,
        namespace: &'a str,
    ) -> Self {
        Self {
            registry,
            routes,
            apps,
            namespace,
        }
    }

    /// Configuration status of the panel registered under `key`.
    pub fn config_status(&self, key: &str) -> ConfigStatus {
        match self.registry.panel(key) {
            Some(descriptor) => self.evaluate(&descriptor).0,
            None => ConfigStatus::default(),
        }
    }

    fn evaluate(&self, descriptor: &Descriptor) -> (ConfigStatus, ResolvedLink) {
        let link = LinkResolver::new(self.routes).resolve_url(descriptor);
        let status = ConfigStatus {
            installed: true,
            in_installed_apps: self.apps.is_installed(&descriptor.app_name),
            urls_registered: !link.is_placeholder(),
        };
        (status, link)
    }

    /// URL of the install instructions page for `id`, or the placeholder.
    pub fn install_url(&self, id: &str) -> String {
        let route = format!("{}:{INSTALL_ROUTE}", self.namespace);
        self.routes.reverse(&route, &[id]).unwrap_or_else(|e| {
            debug!(panel = %id, error = %e, "install page is not mounted");
            PLACEHOLDER_URL.to_string()
        })
    }

    /// Card for a registered panel.
    ///
    /// Links to the panel when fully configured, otherwise to the install page
    /// when one exists for it, otherwise to the placeholder.
    pub fn panel_view(&self, descriptor: &Descriptor) -> PanelView {
        let id = descriptor.registry_id.as_str();
        let featured = is_featured(id);
        let (status, link) = self.evaluate(descriptor);
        let configured = status.is_configured();

        if !configured && !link.is_placeholder() {
            warn!(
                panel = %id,
                app = %descriptor.app_name,
                "panel is registered but its app is not installed in the host"
            );
        }

        let has_install_page = featured || descriptor.package.is_some();
        let url = if configured {
            link.url.clone()
        } else if has_install_page {
            self.install_url(id)
        } else {
            PLACEHOLDER_URL.to_string()
        };

        PanelView {
            id: id.to_string(),
            name: descriptor.name.clone(),
            description: descriptor.description.clone(),
            icon: descriptor.icon,
            url,
            status: PanelStatus::Installed,
            status_label: PanelStatus::Installed.label(),
            installed: true,
            configured,
            in_installed_apps: status.in_installed_apps,
            urls_registered: status.urls_registered,
            featured,
            coming_soon: false,
            package: descriptor.package.clone(),
            docs_url: descriptor.docs_url.clone(),
            pypi_url: descriptor.pypi_url.clone(),
            link_error: link.failure.map(|f| f.to_string()),
        }
    }

    fn catalog_view(&self, featured: &FeaturedPanel) -> PanelView {
        let status = if featured.coming_soon {
            PanelStatus::ComingSoon
        } else {
            PanelStatus::NotInstalled
        };
        PanelView {
            id: featured.id.to_string(),
            name: featured.name.to_string(),
            description: featured.description.to_string(),
            icon: featured.icon,
            url: self.install_url(featured.id),
            status,
            status_label: status.label(),
            installed: false,
            configured: false,
            in_installed_apps: false,
            urls_registered: false,
            featured: true,
            coming_soon: featured.coming_soon,
            package: Some(featured.package.to_string()),
            docs_url: Some(featured.docs_url.to_string()),
            pypi_url: Some(featured.pypi_url.to_string()),
            link_error: None,
        }
    }

    /// Every featured panel in catalog order, live when installed.
    ///
    /// A registered key matches a featured entry after normalization, so a
    /// panel installed as `Dj-Redis-Panel` still fills the Redis card.
    pub fn featured_panels(&self) -> Vec<PanelView> {
        let registered = self.registry.panels();
        featured_panels()
            .iter()
            .map(|featured| {
                let installed = registered.iter().find(|d| {
                    normalize_package_name(d.registry_id.as_str()) == featured.id
                });
                match installed {
                    Some(descriptor) => self.panel_view(descriptor),
                    None => self.catalog_view(featured),
                }
            })
            .collect()
    }

    /// Registered panels outside the featured catalog, in registry order.
    pub fn community_panels(&self) -> Vec<PanelView> {
        self.registry
            .panels()
            .iter()
            .filter(|d| !is_featured(d.registry_id.as_str()))
            .map(|d| self.panel_view(d))
            .collect()
    }
}
