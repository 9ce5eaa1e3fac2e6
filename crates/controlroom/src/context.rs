// SPDX-FileCopyrightText: 2026 Control Room Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Startup wiring: configuration to scanner, registry, and host seams.

use controlroom_config::ControlRoomConfig;
use controlroom_plugin::{
    AdminIntegration, Dashboard, DiscoveryReport, EntryPointScanner, Registry, StaticApps,
    StaticRoutes,
};
use tracing::debug;

/// Everything a subcommand needs after the discovery pass.
pub struct AppContext {
    pub config: ControlRoomConfig,
    pub registry: Registry,
    pub report: DiscoveryReport,
    pub routes: StaticRoutes,
    pub apps: StaticApps,
    pub admin: AdminIntegration,
}

impl AppContext {
    /// Build the registry from `config` and run one discovery pass.
    pub fn bootstrap(config: ControlRoomConfig, demo: bool) -> Self {
        let registry = Registry::new(config.registry.conflict_policy);
        if demo {
            crate::demo::register_demo_panels(&registry);
        }

        let scanner = EntryPointScanner::from_config(&config.discovery);
        debug!(sources = ?scanner.source_labels(), "scanning plugin group");
        let report = registry.autodiscover(&scanner);

        Self {
            routes: StaticRoutes::from_config(&config.host),
            apps: StaticApps::from_config(&config.host),
            admin: AdminIntegration::from_config(&config.admin),
            registry,
            report,
            config,
        }
    }

    pub fn dashboard(&self) -> Dashboard<'_> {
        Dashboard::new(
            &self.registry,
            &self.routes,
            &self.apps,
            &self.config.host.namespace,
        )
    }
}
