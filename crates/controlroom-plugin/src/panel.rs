// SPDX-FileCopyrightText: 2026 Control Room Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The panel plugin contract and the validated descriptor the registry stores.
//!
//! A plugin implements [`Panel`] (or ships a `panel.toml` manifest, see
//! [`crate::manifest`]). The registry never keeps the plugin object itself:
//! it keeps the [`Descriptor`] the validator built from it.

use controlroom_core::{Icon, RegistryKey};
use serde::Serialize;

/// Entry route name used when a panel does not declare one.
pub const DEFAULT_URL_NAME: &str = "index";

/// Capabilities a panel plugin exposes to the host.
///
/// The three required capabilities return `Option` so the validator can report
/// exactly which one a malformed plugin left out instead of failing to load it.
pub trait Panel: Send + Sync {
    /// Human-readable name shown on the dashboard card.
    fn name(&self) -> Option<&str>;

    /// One-line summary of what the panel does.
    fn description(&self) -> Option<&str>;

    /// Icon name from the fixed vocabulary (`database`, `layers`, ...).
    fn icon(&self) -> Option<&str>;

    /// Legacy self-declared identifier.
    ///
    /// Accepted for compatibility and always discarded: registry keys come from
    /// the distribution name.
    fn id(&self) -> Option<&str> {
        None
    }

    /// Route namespace of the panel's app. Defaults to the registry key.
    fn app_name(&self) -> Option<&str> {
        None
    }

    /// Installable package name; enables the install instructions page.
    fn package(&self) -> Option<&str> {
        None
    }

    fn docs_url(&self) -> Option<&str> {
        None
    }

    fn pypi_url(&self) -> Option<&str> {
        None
    }

    /// Name of the panel's entry route inside its app namespace.
    fn url_name(&self) -> Option<String> {
        None
    }
}

/// A validated, immutable panel record.
///
/// Built only by [`crate::validate::validate`]; shared out of the registry as
/// `Arc<Descriptor>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Descriptor {
    pub registry_id: RegistryKey,
    pub name: String,
    pub description: String,
    pub icon: Icon,
    pub app_name: String,
    pub package: Option<String>,
    pub docs_url: Option<String>,
    pub pypi_url: Option<String>,
    pub url_name: String,
    /// Owning distribution; `None` for manual registrations.
    pub distribution: Option<String>,
}

impl Descriptor {
    /// Fully qualified entry route, `"{app_name}:{url_name}"`.
    pub fn route(&self) -> String {
        format!("{}:{}", self.app_name, self.url_name)
    }

    /// Attribute the descriptor to the distribution that installed it.
    ///
    /// A discovered panel without an explicit package name is installable under
    /// its distribution name.
    pub fn with_distribution(mut self, distribution: impl Into<String>) -> Self {
        let distribution = distribution.into();
        if self.package.is_none() {
            self.package = Some(distribution.clone());
        }
        self.distribution = Some(distribution);
        self
    }
}

/// Owned panel declaration with every capability optional.
///
/// This is the in-memory form of a `panel.toml` manifest and the simplest way
/// for a host to register a panel by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelSpec {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub id: Option<String>,
    pub app_name: Option<String>,
    pub package: Option<String>,
    pub docs_url: Option<String>,
    pub pypi_url: Option<String>,
    pub url_name: Option<String>,
}

impl PanelSpec {
    /// A panel declaring only the three required capabilities.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            description: Some(description.into()),
            icon: Some(icon.into()),
            ..Self::default()
        }
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn with_url_name(mut self, url_name: impl Into<String>) -> Self {
        self.url_name = Some(url_name.into());
        self
    }

    pub fn with_docs_url(mut self, docs_url: impl Into<String>) -> Self {
        self.docs_url = Some(docs_url.into());
        self
    }
}

impl Panel for PanelSpec {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn app_name(&self) -> Option<&str> {
        self.app_name.as_deref()
    }

    fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    fn docs_url(&self) -> Option<&str> {
        self.docs_url.as_deref()
    }

    fn pypi_url(&self) -> Option<&str> {
        self.pypi_url.as_deref()
    }

    fn url_name(&self) -> Option<String> {
        self.url_name.clone()
    }
}
