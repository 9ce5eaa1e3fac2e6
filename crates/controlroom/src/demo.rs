// SPDX-FileCopyrightText: 2026 Control Room Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bundled demo panels for trying the dashboard without installing anything.

use controlroom_plugin::{PanelSpec, Registration, Registry};
use tracing::warn;

/// Register the `example` and `demo` panels by hand.
pub fn register_demo_panels(registry: &Registry) {
    let panels = [
        (
            "example",
            PanelSpec::new(
                "Example Panel",
                "An example panel showing how third-party panels plug in.",
                "cog",
            )
            .with_url_name("index"),
        ),
        (
            "demo",
            PanelSpec::new("Demo Panel", "A second demo panel with a chart icon.", "chart"),
        ),
    ];

    for (key, panel) in panels {
        match registry.register(key, &panel) {
            Ok(Registration::Inserted | Registration::Refreshed) => {}
            Ok(Registration::Conflict(conflict)) => {
                warn!(panel = %key, %conflict, "demo panel not registered");
            }
            Err(e) => warn!(panel = %key, error = %e, "demo panel rejected"),
        }
    }
}
