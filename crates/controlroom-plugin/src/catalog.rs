// SPDX-FileCopyrightText: 2026 Control Room Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Featured panel catalog.
//!
//! Hardcoded list of curated panels shown on the dashboard whether or not they
//! are installed. No network calls are made.

use controlroom_core::Icon;
use controlroom_core::identity::normalize_package_name;
use serde::Serialize;

/// A curated panel advertised on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeaturedPanel {
    /// Registry key the panel gets once installed.
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: Icon,
    pub package: &'static str,
    pub docs_url: &'static str,
    pub pypi_url: &'static str,
    /// Announced but not yet released.
    pub coming_soon: bool,
}

static FEATURED_PANELS: [FeaturedPanel; 6] = [
    FeaturedPanel {
        id: "dj_redis_panel",
        name: "Redis Panel",
        description: "Monitor connections, memory, keys, and throughput.",
        icon: Icon::Database,
        package: "dj-redis-panel",
        docs_url: "https://github.com/yassi/dj-redis-panel",
        pypi_url: "https://pypi.org/project/dj-redis-panel/",
        coming_soon: false,
    },
    FeaturedPanel {
        id: "dj_cache_panel",
        name: "Cache Panel",
        description: "Inspect cached entries, hit/miss ratios.",
        icon: Icon::Layers,
        package: "dj-cache-panel",
        docs_url: "https://github.com/yassi/dj-cache-panel",
        pypi_url: "https://pypi.org/project/dj-cache-panel/",
        coming_soon: false,
    },
    FeaturedPanel {
        id: "dj_celery_panel",
        name: "Celery Panel",
        description: "Track workers, monitor task queues.",
        icon: Icon::Chart,
        package: "dj-celery-panel",
        docs_url: "https://github.com/yassi/dj-celery-panel",
        pypi_url: "https://pypi.org/project/dj-celery-panel/",
        coming_soon: false,
    },
    FeaturedPanel {
        id: "dj_urls_panel",
        name: "URLs Panel",
        description: "Browse registered URL patterns.",
        icon: Icon::Link,
        package: "dj-urls-panel",
        docs_url: "https://github.com/yassi/dj-urls-panel",
        pypi_url: "https://pypi.org/project/dj-urls-panel/",
        coming_soon: false,
    },
    FeaturedPanel {
        id: "dj_signals_panel",
        name: "Signals Panel",
        description: "Monitor signals, debug connections.",
        icon: Icon::Link,
        package: "dj-signals-panel",
        docs_url: "https://github.com/yassi/dj-signals-panel",
        pypi_url: "https://pypi.org/project/dj-signals-panel/",
        coming_soon: true,
    },
    FeaturedPanel {
        id: "dj_error_panel",
        name: "Error Panel",
        description: "Monitor errors, stack traces, and exceptions.",
        icon: Icon::Link,
        package: "dj-error-panel",
        docs_url: "https://github.com/yassi/dj-error-panel",
        pypi_url: "https://pypi.org/project/dj-error-panel/",
        coming_soon: true,
    },
];

/// Every featured panel, in dashboard order.
pub fn featured_panels() -> &'static [FeaturedPanel] {
    &FEATURED_PANELS
}

pub fn featured_panel_ids() -> Vec<&'static str> {
    FEATURED_PANELS.iter().map(|p| p.id).collect()
}

/// Look up a featured panel by registry key or package name.
///
/// Comparison is normalized, so `dj-cache-panel`, `Dj_Cache_Panel` and
/// `dj_cache_panel` all find the same entry.
pub fn featured_panel(id: &str) -> Option<&'static FeaturedPanel> {
    let wanted = normalize_package_name(id);
    FEATURED_PANELS.iter().find(|p| p.id == wanted)
}

pub fn is_featured(id: &str) -> bool {
    featured_panel(id).is_some()
}

/// Search the featured catalog by query string.
///
/// Filters entries whose name or description contains the query (case-insensitive).
/// If query is empty, returns all entries.
pub fn search_catalog(query: &str) -> Vec<&'static FeaturedPanel> {
    let query_lower = query.to_lowercase();
    FEATURED_PANELS
        .iter()
        .filter(|p| {
            query.is_empty()
                || p.name.to_lowercase().contains(&query_lower)
                || p.description.to_lowercase().contains(&query_lower)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_six_entries() {
        assert_eq!(featured_panels().len(), 6);
        assert_eq!(featured_panel_ids()[0], "dj_redis_panel");
    }

    #[test]
    fn two_entries_are_coming_soon() {
        let soon: Vec<&str> = featured_panels()
            .iter()
            .filter(|p| p.coming_soon)
            .map(|p| p.id)
            .collect();
        assert_eq!(soon, vec!["dj_signals_panel", "dj_error_panel"]);
    }

    #[test]
    fn ids_match_normalized_package_names() {
        for panel in featured_panels() {
            assert_eq!(normalize_package_name(panel.package), panel.id);
        }
    }

    #[test]
    fn lookup_is_normalized() {
        assert_eq!(featured_panel("dj-cache-panel").unwrap().id, "dj_cache_panel");
        assert!(is_featured("Dj_Redis_Panel"));
        assert!(!is_featured("example"));
    }

    #[test]
    fn search_catalog_case_insensitive() {
        let results = search_catalog("CELERY");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "dj_celery_panel");
    }

    #[test]
    fn search_catalog_by_description() {
        let results = search_catalog("hit/miss");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "dj_cache_panel");
    }

    #[test]
    fn search_catalog_empty_returns_all() {
        assert_eq!(search_catalog("").len(), 6);
    }

    #[test]
    fn search_catalog_no_match() {
        assert!(search_catalog("xyz_nonexistent").is_empty());
    }
}
