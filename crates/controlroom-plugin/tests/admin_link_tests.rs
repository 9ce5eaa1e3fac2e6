// SPDX-FileCopyrightText: 2026 Control Room Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Admin policy, link resolution, and dashboard views over a discovered registry.

use std::collections::BTreeMap;

use controlroom_plugin::admin::{PlaceholderModel, hidden_placeholders};
use controlroom_plugin::{
    AdminIntegration, Dashboard, LinkResolver, PLACEHOLDER_URL, StaticApps, admin_entries,
    should_dual_register,
};
use controlroom_test_utils::{FixturePanel, MockRoutes, TestHarness, entry_point};

fn overrides(pairs: &[(&str, bool)]) -> BTreeMap<String, bool> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn harness() -> TestHarness {
    let harness = TestHarness::builder()
        .with_entry(entry_point(
            "dj-redis-panel",
            FixturePanel::new("Redis Panel", "Monitor Redis", "database"),
        ))
        .with_entry(entry_point(
            "acme-audit-panel",
            FixturePanel::new("Audit", "Audit log browser", "cog"),
        ))
        .build()
        .unwrap();
    harness.discover();
    harness
}

#[test]
fn override_true_with_global_false() {
    assert!(should_dual_register(
        "dj_redis_panel",
        false,
        &overrides(&[("dj_redis_panel", true)])
    ));
}

#[test]
fn override_false_with_global_true() {
    assert!(!should_dual_register(
        "dj_redis_panel",
        true,
        &overrides(&[("dj_redis_panel", false)])
    ));
    assert!(should_dual_register(
        "dj_cache_panel",
        true,
        &overrides(&[("dj_redis_panel", false)])
    ));
}

#[test]
fn unresolvable_link_gives_placeholder_and_one_failure() {
    let harness = harness();
    let routes = MockRoutes::new();
    let panel = harness.registry().panel("dj_redis_panel").unwrap();

    let link = LinkResolver::new(&routes).resolve_url(&panel);

    assert_eq!(link.url, PLACEHOLDER_URL);
    assert!(link.failure.is_some());
    assert_eq!(routes.calls(), vec!["dj_redis_panel:index"]);
}

#[test]
fn resolvable_link_reverses_once() {
    let harness = harness();
    let routes = MockRoutes::new().mount("dj_redis_panel:index", "/admin/dj-redis-panel/");
    let panel = harness.registry().panel("dj_redis_panel").unwrap();

    let link = LinkResolver::new(&routes).resolve_url(&panel);

    assert_eq!(link.url, "/admin/dj-redis-panel/");
    assert!(!link.is_placeholder());
    assert_eq!(routes.call_count(), 1);
}

#[test]
fn admin_entries_follow_registry_order() {
    let harness = harness();
    let entries = admin_entries(harness.registry(), "control_room");

    let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["Redis Panel", "[+] Audit"]);
    assert_eq!(entries[1].model_name, "AcmeauditpanelPanelProxy");
    assert_eq!(entries[1].redirect_route, "acme_audit_panel:index");
}

#[test]
fn placeholders_follow_policy() {
    let harness = harness();
    let models = vec![
        PlaceholderModel {
            app_label: "dj_redis_panel".into(),
            label: "dj_redis_panel.RedisPanelPlaceholder".into(),
            managed: false,
        },
        PlaceholderModel {
            app_label: "acme_audit_panel".into(),
            label: "acme_audit_panel.AuditPlaceholder".into(),
            managed: false,
        },
    ];

    let hide_all = AdminIntegration::new(false, BTreeMap::new());
    assert_eq!(hidden_placeholders(harness.registry(), &hide_all, &models).len(), 2);

    let keep_redis = AdminIntegration::new(false, overrides(&[("dj_redis_panel", true)]));
    let hidden = hidden_placeholders(harness.registry(), &keep_redis, &models);
    assert_eq!(hidden.len(), 1);
    assert_eq!(hidden[0].app_label, "acme_audit_panel");
}

#[test]
fn dashboard_splits_featured_and_community() {
    let harness = harness();
    let routes = MockRoutes::new()
        .mount("dj_redis_panel:index", "/admin/dj-redis-panel/")
        .mount("control_room:install_panel", "/admin/control-room/install/{0}/");
    let apps = StaticApps::new(["dj_redis_panel"]);
    let dashboard = Dashboard::new(harness.registry(), &routes, &apps, "control_room");

    let featured = dashboard.featured_panels();
    assert_eq!(featured.len(), 6);
    assert!(featured[0].configured);
    assert_eq!(featured[0].url, "/admin/dj-redis-panel/");
    assert!(!featured[1].installed);

    let community = dashboard.community_panels();
    assert_eq!(community.len(), 1);
    assert_eq!(community[0].id, "acme_audit_panel");
    // Discovered panels are installable under their distribution name.
    assert_eq!(community[0].package.as_deref(), Some("acme-audit-panel"));
    assert_eq!(
        community[0].url,
        "/admin/control-room/install/acme_audit_panel/"
    );
}
