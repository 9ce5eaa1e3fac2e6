// SPDX-FileCopyrightText: 2026 Control Room Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixture panels and entry point builders.

use controlroom_core::{LoadError, RequiredField};
use controlroom_plugin::{EntryPoint, Panel};

/// A panel implemented directly against the trait, relying on its defaults
/// for everything it does not set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixturePanel {
    name: Option<&'static str>,
    description: Option<&'static str>,
    icon: Option<&'static str>,
    id: Option<&'static str>,
    app_name: Option<&'static str>,
    package: Option<&'static str>,
    url_name: Option<&'static str>,
}

impl FixturePanel {
    /// A panel declaring only the required capabilities.
    pub const fn new(
        name: &'static str,
        description: &'static str,
        icon: &'static str,
    ) -> Self {
        Self {
            name: Some(name),
            description: Some(description),
            icon: Some(icon),
            id: None,
            app_name: None,
            package: None,
            url_name: None,
        }
    }

    /// `Test Panel` with the `cog` icon.
    pub const fn minimal() -> Self {
        Self::new("Test Panel", "A test panel", "cog")
    }

    /// A copy of this panel with one required capability removed.
    pub const fn without(mut self, field: RequiredField) -> Self {
        match field {
            RequiredField::Name => self.name = None,
            RequiredField::Description => self.description = None,
            RequiredField::Icon => self.icon = None,
        }
        self
    }

    pub const fn with_icon(mut self, icon: &'static str) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Declare the legacy `id` the registry is expected to ignore.
    pub const fn with_legacy_id(mut self, id: &'static str) -> Self {
        self.id = Some(id);
        self
    }

    pub const fn with_app_name(mut self, app_name: &'static str) -> Self {
        self.app_name = Some(app_name);
        self
    }

    pub const fn with_package(mut self, package: &'static str) -> Self {
        self.package = Some(package);
        self
    }

    pub const fn with_url_name(mut self, url_name: &'static str) -> Self {
        self.url_name = Some(url_name);
        self
    }
}

impl Panel for FixturePanel {
    fn name(&self) -> Option<&str> {
        self.name
    }

    fn description(&self) -> Option<&str> {
        self.description
    }

    fn icon(&self) -> Option<&str> {
        self.icon
    }

    fn id(&self) -> Option<&str> {
        self.id
    }

    fn app_name(&self) -> Option<&str> {
        self.app_name
    }

    fn package(&self) -> Option<&str> {
        self.package
    }

    fn url_name(&self) -> Option<String> {
        self.url_name.map(str::to_string)
    }
}

/// An entry point of `distribution` that loads a copy of `panel`.
pub fn entry_point(distribution: &str, panel: FixturePanel) -> EntryPoint {
    EntryPoint::new(
        distribution,
        "panel",
        format!("{}::Panel", distribution.replace('-', "_")),
        move || Ok(Box::new(panel) as Box<dyn Panel>),
    )
}

/// An entry point of `distribution` whose reference cannot be resolved.
pub fn failing_entry_point(distribution: &str, reason: &'static str) -> EntryPoint {
    EntryPoint::new(
        distribution,
        "panel",
        format!("{}::Missing", distribution.replace('-', "_")),
        move || Err(LoadError::loader(reason)),
    )
}
