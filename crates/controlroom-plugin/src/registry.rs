// SPDX-FileCopyrightText: 2026 Control Room Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Panel registry: registry key to validated descriptor.
//!
//! The `Registry` is an explicit instance owned by the host and shared by
//! reference (or `Arc`). Discovery writes it under one write lock per pass;
//! readers take snapshots of `Arc<Descriptor>` so a reload never mutates a
//! descriptor someone is still holding.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use controlroom_core::identity;
use controlroom_core::{
    ConflictPolicy, ConflictResolution, PanelError, RegistrationConflict, RegistryKey,
};
use tracing::{debug, info, warn};

use crate::panel::{Descriptor, Panel};
use crate::scanner::EntryPointScanner;
use crate::validate::validate;

/// Where a registry entry came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Registered by the host with [`Registry::register`].
    Manual,
    /// Found by [`Registry::autodiscover`].
    EntryPoint { distribution: String, name: String },
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Manual => write!(f, "manual registration"),
            Origin::EntryPoint { distribution, name } => {
                write!(f, "distribution '{distribution}' (entry point '{name}')")
            }
        }
    }
}

/// Outcome of inserting one descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// The key was free and now holds the descriptor.
    Inserted,
    /// The same entry point re-registered its panel on a later pass.
    Refreshed,
    /// Another entry already held the key; the policy decided the winner.
    Conflict(RegistrationConflict),
}

/// Everything one discovery pass did.
#[derive(Debug, Default)]
pub struct DiscoveryReport {
    /// Keys newly claimed in this pass, including keys taken over from an
    /// entry point that has since gone away.
    pub registered: Vec<RegistryKey>,
    /// Keys whose entry was re-registered by the same entry point.
    pub refreshed: Vec<RegistryKey>,
    pub conflicts: Vec<RegistrationConflict>,
    /// Entry points that failed to load or validate.
    pub failures: Vec<PanelError>,
    /// Discovered keys whose entry point disappeared since the last pass.
    pub pruned: Vec<RegistryKey>,
}

impl DiscoveryReport {
    /// No failures and no conflicts.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.conflicts.is_empty()
    }
}

struct Entry {
    descriptor: Arc<Descriptor>,
    origin: Origin,
    pass: u64,
}

#[derive(Default)]
struct State {
    entries: Vec<Entry>,
    index: HashMap<RegistryKey, usize>,
    pass: u64,
    discovered: bool,
}

impl State {
    fn insert(
        &mut self,
        policy: ConflictPolicy,
        descriptor: Descriptor,
        origin: Origin,
    ) -> Registration {
        let key = descriptor.registry_id.clone();
        let pass = self.pass;

        let Some(&slot) = self.index.get(&key) else {
            self.index.insert(key, self.entries.len());
            self.entries.push(Entry {
                descriptor: Arc::new(descriptor),
                origin,
                pass,
            });
            return Registration::Inserted;
        };

        let existing = &mut self.entries[slot];
        // A discovered entry not yet seen in this pass is a leftover, not a rival.
        let is_leftover = matches!(origin, Origin::EntryPoint { .. })
            && matches!(existing.origin, Origin::EntryPoint { .. })
            && existing.pass < pass;
        if is_leftover {
            let outcome = if existing.origin == origin {
                Registration::Refreshed
            } else {
                Registration::Inserted
            };
            *existing = Entry {
                descriptor: Arc::new(descriptor),
                origin,
                pass,
            };
            return outcome;
        }

        let resolution = match policy {
            ConflictPolicy::FirstWins => ConflictResolution::KeptExisting,
            ConflictPolicy::LastWins => ConflictResolution::Replaced,
        };
        let conflict = RegistrationConflict {
            key,
            existing: existing.origin.to_string(),
            incoming: origin.to_string(),
            resolution,
        };
        warn!(
            panel = %conflict.key,
            existing = %conflict.existing,
            incoming = %conflict.incoming,
            resolution = %resolution,
            "duplicate panel id"
        );

        if resolution == ConflictResolution::Replaced {
            *existing = Entry {
                descriptor: Arc::new(descriptor),
                origin,
                pass,
            };
        }
        Registration::Conflict(conflict)
    }

    /// Drop discovered entries the current pass did not see again.
    fn prune(&mut self) -> Vec<RegistryKey> {
        let pass = self.pass;
        let mut pruned = Vec::new();
        self.entries.retain(|entry| {
            let stale = matches!(entry.origin, Origin::EntryPoint { .. }) && entry.pass < pass;
            if stale {
                pruned.push(entry.descriptor.registry_id.clone());
            }
            !stale
        });
        if !pruned.is_empty() {
            self.reindex();
        }
        pruned
    }

    fn reindex(&mut self) {
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.descriptor.registry_id.clone(), i))
            .collect();
    }
}

/// Registry of validated panels in insertion order.
pub struct Registry {
    policy: ConflictPolicy,
    state: RwLock<State>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(ConflictPolicy::default())
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("policy", &self.policy)
            .field("keys", &self.keys())
            .finish()
    }
}

impl Registry {
    /// Create an empty registry with the given conflict policy.
    pub fn new(policy: ConflictPolicy) -> Self {
        Self {
            policy,
            state: RwLock::new(State::default()),
        }
    }

    pub fn policy(&self) -> ConflictPolicy {
        self.policy
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validate `panel` and register it by hand under `key`.
    ///
    /// Manual registrations are never pruned by discovery. A key that is
    /// already taken yields `Registration::Conflict`, not an error.
    pub fn register(
        &self,
        key: impl Into<RegistryKey>,
        panel: &dyn Panel,
    ) -> Result<Registration, PanelError> {
        let key = key.into();
        if key.as_str().trim().is_empty() {
            return Err(PanelError::MissingKey);
        }

        let descriptor = validate(key.clone(), panel).map_err(|source| {
            warn!(panel = %key, field = %source.field(), error = %source, "panel failed validation");
            PanelError::Validation {
                key: key.clone(),
                origin: Origin::Manual.to_string(),
                source,
            }
        })?;

        let outcome = self.write().insert(self.policy, descriptor, Origin::Manual);
        if outcome == Registration::Inserted {
            debug!(panel = %key, "registered panel");
        }
        Ok(outcome)
    }

    /// Run one discovery pass over every entry point the scanner finds.
    ///
    /// Each candidate gets the key derived from its distribution name, is
    /// validated, and is inserted. Failures and conflicts are collected in the
    /// report. Running it again over an unchanged installation leaves the
    /// registry as it was.
    ///
    /// Entry points are loaded before the write lock is taken, so a loader may
    /// read this registry.
    pub fn autodiscover(&self, scanner: &EntryPointScanner) -> DiscoveryReport {
        let mut report = DiscoveryReport::default();
        let results: Vec<_> = scanner.scan().collect();
        let mut state = self.write();
        state.pass += 1;

        for result in results {
            let candidate = match result {
                Ok(candidate) => candidate,
                Err(err) => {
                    report.failures.push(err);
                    continue;
                }
            };

            let key = identity::resolve(&candidate.distribution);
            let origin = Origin::EntryPoint {
                distribution: candidate.distribution.clone(),
                name: candidate.entry_point.clone(),
            };

            let descriptor = match validate(key.clone(), candidate.panel.as_ref()) {
                Ok(d) => d.with_distribution(candidate.distribution),
                Err(source) => {
                    warn!(
                        panel = %key,
                        distribution = %candidate.distribution,
                        field = %source.field(),
                        error = %source,
                        "panel failed validation"
                    );
                    report.failures.push(PanelError::Validation {
                        key,
                        origin: origin.to_string(),
                        source,
                    });
                    continue;
                }
            };

            match state.insert(self.policy, descriptor, origin) {
                Registration::Inserted => {
                    debug!(panel = %key, "registered panel");
                    report.registered.push(key);
                }
                Registration::Refreshed => report.refreshed.push(key),
                Registration::Conflict(conflict) => report.conflicts.push(conflict),
            }
        }

        report.pruned = state.prune();
        for key in &report.pruned {
            info!(panel = %key, "panel no longer installed, removed from registry");
        }
        state.discovered = true;

        info!(
            panels = state.entries.len(),
            registered = report.registered.len(),
            failures = report.failures.len(),
            conflicts = report.conflicts.len(),
            "panel discovery complete"
        );
        report
    }

    /// Look up one panel by key.
    pub fn panel(&self, key: &str) -> Option<Arc<Descriptor>> {
        let state = self.read();
        state
            .index
            .get(key)
            .map(|&i| Arc::clone(&state.entries[i].descriptor))
    }

    /// Snapshot of every panel in first-registration order.
    pub fn panels(&self) -> Vec<Arc<Descriptor>> {
        self.read()
            .entries
            .iter()
            .map(|e| Arc::clone(&e.descriptor))
            .collect()
    }

    pub fn keys(&self) -> Vec<RegistryKey> {
        self.read()
            .entries
            .iter()
            .map(|e| e.descriptor.registry_id.clone())
            .collect()
    }

    /// Where the entry under `key` came from.
    pub fn origin(&self, key: &str) -> Option<Origin> {
        let state = self.read();
        state.index.get(key).map(|&i| state.entries[i].origin.clone())
    }

    pub fn is_registered(&self, key: &str) -> bool {
        self.read().index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().entries.is_empty()
    }

    /// Whether at least one discovery pass has run since creation or reset.
    pub fn has_discovered(&self) -> bool {
        self.read().discovered
    }

    /// Remove every entry and forget past discovery passes.
    pub fn reset(&self) {
        *self.write() = State::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::PanelSpec;
    use crate::scanner::{EntryPoint, StaticSource};

    fn spec(name: &str) -> PanelSpec {
        PanelSpec::new(name, format!("{name} description"), "cog")
    }

    fn entry(distribution: &str, name: &str) -> EntryPoint {
        let panel = spec(name);
        EntryPoint::new(distribution, "panel", format!("{distribution}::Panel"), move || {
            Ok(Box::new(panel.clone()) as Box<dyn Panel>)
        })
    }

    fn scanner(entries: Vec<EntryPoint>) -> EntryPointScanner {
        EntryPointScanner::new().with_source(entries.into_iter().collect::<StaticSource>())
    }

    #[test]
    fn register_and_lookup() {
        let registry = Registry::default();
        let outcome = registry.register("example", &spec("Example")).unwrap();
        assert_eq!(outcome, Registration::Inserted);
        assert!(registry.is_registered("example"));
        assert_eq!(registry.panel("example").unwrap().name, "Example");
        assert_eq!(registry.origin("example"), Some(Origin::Manual));
        assert!(registry.panel("missing").is_none());
    }

    #[test]
    fn register_requires_a_key() {
        let registry = Registry::default();
        assert!(matches!(
            registry.register("", &spec("Nameless")),
            Err(PanelError::MissingKey)
        ));
    }

    #[test]
    fn register_rejects_invalid_panel() {
        let registry = Registry::default();
        let err = registry
            .register("broken", &PanelSpec::new("Broken", "bad icon", "sparkles"))
            .unwrap_err();
        assert!(matches!(err, PanelError::Validation { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn duplicate_manual_registration_keeps_first_by_default() {
        let registry = Registry::default();
        registry.register("test", &spec("First")).unwrap();
        let outcome = registry.register("test", &spec("Second")).unwrap();

        match outcome {
            Registration::Conflict(c) => {
                assert_eq!(c.key.as_str(), "test");
                assert_eq!(c.resolution, ConflictResolution::KeptExisting);
            }
            other => panic!("expected conflict, got {other:?}"),
        }
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.panel("test").unwrap().name, "First");
    }

    #[test]
    fn last_wins_policy_replaces_in_place() {
        let registry = Registry::new(ConflictPolicy::LastWins);
        registry.register("a", &spec("A")).unwrap();
        registry.register("b", &spec("B1")).unwrap();
        registry.register("c", &spec("C")).unwrap();
        registry.register("b", &spec("B2")).unwrap();

        let names: Vec<String> = registry.panels().iter().map(|d| d.name.clone()).collect();
        assert_eq!(names, vec!["A", "B2", "C"]);
    }

    #[test]
    fn panels_preserve_insertion_order() {
        let registry = Registry::default();
        for key in ["zeta", "alpha", "mid"] {
            registry.register(key, &spec(key)).unwrap();
        }
        let keys: Vec<String> = registry.keys().into_iter().map(|k| k.into_inner()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn autodiscover_derives_keys_from_distribution() {
        let registry = Registry::default();
        let report = registry.autodiscover(&scanner(vec![entry("dj-redis-panel", "Redis")]));

        assert_eq!(report.registered, vec![RegistryKey::from("dj_redis_panel")]);
        let d = registry.panel("dj_redis_panel").unwrap();
        assert_eq!(d.distribution.as_deref(), Some("dj-redis-panel"));
        assert_eq!(d.package.as_deref(), Some("dj-redis-panel"));
        assert_eq!(d.app_name, "dj_redis_panel");
        assert!(registry.has_discovered());
    }

    #[test]
    fn autodiscover_is_idempotent() {
        let registry = Registry::default();
        registry.register("example", &spec("Example")).unwrap();
        let scanner = scanner(vec![
            entry("dj-redis-panel", "Redis"),
            entry("dj-cache-panel", "Cache"),
        ]);

        let first = registry.autodiscover(&scanner);
        assert!(first.is_clean());
        let before = registry.keys();

        let second = registry.autodiscover(&scanner);
        assert!(second.is_clean());
        assert!(second.registered.is_empty());
        assert_eq!(second.refreshed.len(), 2);
        assert_eq!(registry.keys(), before);
    }

    #[test]
    fn autodiscover_collects_validation_failures() {
        let registry = Registry::default();
        let bad = EntryPoint::new("dj-bad-panel", "panel", "x", || {
            Ok(Box::new(PanelSpec {
                name: Some("Bad".into()),
                ..PanelSpec::default()
            }) as Box<dyn Panel>)
        });
        let report =
            registry.autodiscover(&scanner(vec![bad, entry("dj-redis-panel", "Redis")]));

        assert_eq!(report.failures.len(), 1);
        assert!(matches!(
            report.failures[0],
            PanelError::Validation { ref key, .. } if key.as_str() == "dj_bad_panel"
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn discovery_conflicts_with_manual_entry() {
        let registry = Registry::default();
        registry.register("dj_redis_panel", &spec("Manual")).unwrap();
        let report = registry.autodiscover(&scanner(vec![entry("dj-redis-panel", "Redis")]));

        assert_eq!(report.conflicts.len(), 1);
        assert_eq!(report.conflicts[0].existing, "manual registration");
        assert_eq!(registry.panel("dj_redis_panel").unwrap().name, "Manual");
    }

    #[test]
    fn vanished_distributions_are_pruned() {
        let registry = Registry::default();
        registry.register("example", &spec("Example")).unwrap();
        registry.autodiscover(&scanner(vec![
            entry("dj-redis-panel", "Redis"),
            entry("dj-cache-panel", "Cache"),
        ]));

        let report = registry.autodiscover(&scanner(vec![entry("dj-cache-panel", "Cache")]));
        assert_eq!(report.pruned, vec![RegistryKey::from("dj_redis_panel")]);
        assert!(!registry.is_registered("dj_redis_panel"));
        assert!(registry.is_registered("example"));
        assert_eq!(registry.panel("dj_cache_panel").unwrap().name, "Cache");
    }

    #[test]
    fn leftover_entry_from_another_distribution_is_taken_over() {
        let registry = Registry::default();
        registry.autodiscover(&scanner(vec![
            entry("dj-cache-panel", "Dashed"),
            entry("dj_cache_panel", "Underscored"),
        ]));
        assert_eq!(registry.panel("dj_cache_panel").unwrap().name, "Dashed");

        let report = registry.autodiscover(&scanner(vec![entry("dj_cache_panel", "Underscored")]));
        assert!(report.conflicts.is_empty());
        assert!(report.pruned.is_empty());
        assert_eq!(report.registered, vec![RegistryKey::from("dj_cache_panel")]);
        assert_eq!(registry.panel("dj_cache_panel").unwrap().name, "Underscored");
        assert_eq!(
            registry.origin("dj_cache_panel"),
            Some(Origin::EntryPoint {
                distribution: "dj_cache_panel".into(),
                name: "panel".into(),
            })
        );
    }

    #[test]
    fn loader_may_read_the_registry() {
        let registry = Arc::new(Registry::default());
        registry.register("example", &spec("Example")).unwrap();

        let seen = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let loader_registry = Arc::clone(&registry);
        let loader_seen = Arc::clone(&seen);
        let reader = EntryPoint::new("dj-urls-panel", "panel", "dj_urls_panel::Panel", move || {
            loader_seen.store(loader_registry.len(), std::sync::atomic::Ordering::SeqCst);
            Ok(Box::new(spec("Urls")) as Box<dyn Panel>)
        });

        let report = registry.autodiscover(&scanner(vec![reader]));
        assert!(report.is_clean());
        assert_eq!(seen.load(std::sync::atomic::Ordering::SeqCst), 1);
        assert!(registry.is_registered("dj_urls_panel"));
    }

    #[test]
    fn reset_clears_everything() {
        let registry = Registry::default();
        registry.register("example", &spec("Example")).unwrap();
        registry.autodiscover(&scanner(vec![entry("dj-redis-panel", "Redis")]));
        registry.reset();
        assert!(registry.is_empty());
        assert!(!registry.has_discovered());
    }

    #[test]
    fn registry_is_shareable_across_threads() {
        let registry = Arc::new(Registry::default());
        registry.register("example", &spec("Example")).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.panels().len())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 1);
        }
    }
}
