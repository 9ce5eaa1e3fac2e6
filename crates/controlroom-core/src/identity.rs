// SPDX-FileCopyrightText: 2026 Control Room Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registry identity derivation from distribution names.
//!
//! A panel never chooses its own key. The key is a pure function of the name
//! its package was installed under, so two independently published panels
//! cannot collide on a hand-picked string.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::RegistryKey;

/// Separator substituted for every hyphen in a distribution name.
pub const KEY_SEPARATOR: char = '_';

/// Packaging charset: alphanumerics, with `.`, `_` and `-` allowed inside.
static DISTRIBUTION_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9]|[A-Za-z0-9][A-Za-z0-9._-]*[A-Za-z0-9])$")
        .expect("distribution name pattern is a valid regex")
});

/// Derive the registry key for a distribution.
///
/// Replaces every `-` with [`KEY_SEPARATOR`] and nothing else; case is kept
/// exactly as the packaging metadata reports it. Callers reject invalid names
/// with [`is_valid_distribution_name`] first.
pub fn resolve(distribution: &str) -> RegistryKey {
    RegistryKey::new(distribution.replace('-', &KEY_SEPARATOR.to_string()))
}

/// Normalize a package name for equality comparison (lowercase, `-` to `_`).
///
/// Used when matching an installed distribution against the featured catalog,
/// where `Dj-Cache-Panel` and `dj_cache_panel` name the same project.
pub fn normalize_package_name(name: &str) -> String {
    name.to_lowercase().replace('-', "_")
}

/// Whether `name` is a syntactically valid distribution name.
pub fn is_valid_distribution_name(name: &str) -> bool {
    DISTRIBUTION_NAME.is_match(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn resolve_replaces_hyphens() {
        assert_eq!(resolve("my-panel").as_str(), "my_panel");
        assert_eq!(resolve("a-b-c-d").as_str(), "a_b_c_d");
    }

    #[test]
    fn resolve_preserves_case_and_other_characters() {
        assert_eq!(resolve("Dj-Cache-Panel").as_str(), "Dj_Cache_Panel");
        assert_eq!(resolve("dj.cache_panel").as_str(), "dj.cache_panel");
        assert_eq!(resolve("dj_cache_panel").as_str(), "dj_cache_panel");
    }

    #[test]
    fn normalize_lowercases() {
        assert_eq!(normalize_package_name("MyPanel"), "mypanel");
        assert_eq!(normalize_package_name("Dj-Cache-Panel"), "dj_cache_panel");
        assert_eq!(normalize_package_name("dj_cache_panel"), "dj_cache_panel");
    }

    #[test]
    fn distribution_name_charset() {
        assert!(is_valid_distribution_name("dj-redis-panel"));
        assert!(is_valid_distribution_name("x"));
        assert!(is_valid_distribution_name("Panel.Pkg_2"));
        assert!(!is_valid_distribution_name(""));
        assert!(!is_valid_distribution_name("-leading"));
        assert!(!is_valid_distribution_name("trailing-"));
        assert!(!is_valid_distribution_name("has space"));
        assert!(!is_valid_distribution_name("slash/name"));
    }

    proptest! {
        #[test]
        fn resolve_is_deterministic(name in "[A-Za-z0-9]([A-Za-z0-9._-]{0,30}[A-Za-z0-9])?") {
            prop_assume!(is_valid_distribution_name(&name));
            let first = resolve(&name);
            let second = resolve(&name);
            prop_assert_eq!(&first, &second);
            prop_assert!(!first.as_str().contains('-'));
            prop_assert_eq!(first.as_str().len(), name.len());
        }

        #[test]
        fn hyphenated_names_collide_with_underscored(parts in proptest::collection::vec("[a-z0-9]{1,8}", 1..5)) {
            let hyphenated = parts.join("-");
            let underscored = parts.join("_");
            prop_assert_eq!(resolve(&hyphenated), resolve(&underscored));
        }
    }
}
