// SPDX-FileCopyrightText: 2026 Control Room Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Panel discovery, validation, registry, and dashboard integration.
//!
//! Third-party crates expose a [`Panel`] through the `controlroom.panels`
//! plugin group. The [`EntryPointScanner`] enumerates them, the validator checks
//! their shape, and the [`Registry`] stores the resulting descriptors under a
//! key derived from the distribution name. The admin, link, and dashboard
//! modules read the registry to build what the host renders.

pub mod admin;
pub mod catalog;
pub mod dashboard;
pub mod host;
pub mod link;
pub mod manifest;
pub mod panel;
pub mod registry;
pub mod scanner;
pub mod validate;

pub use admin::{AdminEntry, AdminIntegration, admin_entries, should_dual_register};
pub use catalog::{FeaturedPanel, featured_panels, is_featured, search_catalog};
pub use dashboard::{ConfigStatus, Dashboard, PanelStatus, PanelView};
pub use host::{AppInventory, ReverseError, RouteResolver, StaticApps, StaticRoutes};
pub use link::{LinkResolver, PLACEHOLDER_URL, ResolvedLink};
pub use manifest::{load_panel_manifest, parse_panel_manifest};
pub use panel::{Descriptor, Panel, PanelSpec};
pub use registry::{DiscoveryReport, Origin, Registration, Registry};
pub use scanner::{
    EntryPoint, EntryPointScanner, EntryPointSource, InventorySource, ManifestDirSource,
    PanelEntryPoint, StaticSource,
};
pub use validate::validate;

// Re-exported so plugin crates can `inventory::submit!` without depending on it directly.
pub use inventory;
