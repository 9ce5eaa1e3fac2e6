// SPDX-FileCopyrightText: 2026 Control Room Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Control Room integration tests.
//!
//! Provides fixture panels, a recording route resolver, and a harness that
//! wires a scanner and registry together without touching the real plugin
//! group.
//!
//! # Components
//!
//! - [`FixturePanel`] - Configurable panel with every capability optional
//! - [`MockRoutes`] - Route resolver that records every reverse call
//! - [`TestHarness`] - Registry plus static entry points plus manifest dirs

pub mod fixtures;
pub mod harness;
pub mod mock_routes;

pub use fixtures::{FixturePanel, entry_point, failing_entry_point};
pub use harness::TestHarness;
pub use mock_routes::MockRoutes;
