// SPDX-FileCopyrightText: 2026 Control Room Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entry point enumeration for the `controlroom.panels` plugin group.
//!
//! A plugin group is a set of [`EntryPointSource`]s. Each source lists entry
//! points (distribution name, entry point name, reference, loader) and the
//! [`EntryPointScanner`] resolves them one at a time into loaded panels.
//!
//! Three sources exist:
//! - [`InventorySource`]: `PanelEntryPoint` statics submitted at link time with
//!   `inventory::submit!`.
//! - [`StaticSource`]: an explicit list built by the host.
//! - [`ManifestDirSource`]: `<dir>/<distribution>/panel.toml` on disk.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use controlroom_core::identity::is_valid_distribution_name;
use controlroom_core::{LoadError, PanelError};
use tracing::{debug, warn};

use crate::manifest::{MANIFEST_FILE_NAME, load_panel_manifest};
use crate::panel::Panel;

/// Name of the process-wide plugin group panels register under.
pub const PLUGIN_GROUP: &str = "controlroom.panels";

/// Loader function stored in a link-time entry point.
pub type LoadFn = fn() -> Result<Box<dyn Panel>, LoadError>;

type Loader = dyn Fn() -> Result<Box<dyn Panel>, LoadError> + Send + Sync;

/// Link-time registration record for the `controlroom.panels` group.
///
/// ```rust,ignore
/// inventory::submit! {
///     PanelEntryPoint {
///         distribution: "dj-redis-panel",
///         name: "panel",
///         value: "dj_redis_panel::RedisPanel",
///         load: || Ok(Box::new(RedisPanel)),
///     }
/// }
/// ```
pub struct PanelEntryPoint {
    /// Name the owning package was published under.
    pub distribution: &'static str,
    /// Entry point name inside the group.
    pub name: &'static str,
    /// Human-readable reference to the panel type, for diagnostics.
    pub value: &'static str,
    pub load: LoadFn,
}

inventory::collect!(PanelEntryPoint);

/// One entry point of the plugin group, not yet loaded.
#[derive(Clone)]
pub struct EntryPoint {
    pub distribution: String,
    pub name: String,
    pub value: String,
    loader: Arc<Loader>,
}

impl EntryPoint {
    pub fn new(
        distribution: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
        loader: impl Fn() -> Result<Box<dyn Panel>, LoadError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            distribution: distribution.into(),
            name: name.into(),
            value: value.into(),
            loader: Arc::new(loader),
        }
    }

    /// Resolve the reference into a panel.
    pub fn load(&self) -> Result<Box<dyn Panel>, LoadError> {
        (self.loader)()
    }
}

impl From<&PanelEntryPoint> for EntryPoint {
    fn from(ep: &PanelEntryPoint) -> Self {
        EntryPoint::new(ep.distribution, ep.name, ep.value, ep.load)
    }
}

impl fmt::Debug for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryPoint")
            .field("distribution", &self.distribution)
            .field("name", &self.name)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

/// A place entry points of the plugin group come from.
pub trait EntryPointSource: Send + Sync {
    /// Short label used in log records.
    fn label(&self) -> &str;

    /// Enumerate the entry points this source currently provides.
    ///
    /// Called again on every scan so newly installed plugins are picked up.
    fn entry_points(&self) -> Vec<EntryPoint>;
}

/// Entry points submitted at link time with `inventory::submit!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct InventorySource;

impl EntryPointSource for InventorySource {
    fn label(&self) -> &str {
        PLUGIN_GROUP
    }

    fn entry_points(&self) -> Vec<EntryPoint> {
        inventory::iter::<PanelEntryPoint>
            .into_iter()
            .map(EntryPoint::from)
            .collect()
    }
}

/// An explicit list of entry points supplied by the host.
#[derive(Debug, Default, Clone)]
pub struct StaticSource {
    entries: Vec<EntryPoint>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, entry: EntryPoint) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn push(&mut self, entry: EntryPoint) {
        self.entries.push(entry);
    }
}

impl FromIterator<EntryPoint> for StaticSource {
    fn from_iter<I: IntoIterator<Item = EntryPoint>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl EntryPointSource for StaticSource {
    fn label(&self) -> &str {
        "static"
    }

    fn entry_points(&self) -> Vec<EntryPoint> {
        self.entries.clone()
    }
}

/// Panels installed as `<dir>/<distribution>/panel.toml`.
///
/// The distribution name is the directory name; nothing in the manifest can
/// change it. A distribution directory without a manifest is still listed so
/// the missing file is reported.
#[derive(Debug, Clone)]
pub struct ManifestDirSource {
    dirs: Vec<PathBuf>,
}

impl ManifestDirSource {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }
}

impl EntryPointSource for ManifestDirSource {
    fn label(&self) -> &str {
        "manifest-dirs"
    }

    fn entry_points(&self) -> Vec<EntryPoint> {
        let mut found = Vec::new();

        for base in &self.dirs {
            if !base.is_dir() {
                debug!(dir = %base.display(), "manifest directory does not exist, skipping");
                continue;
            }

            let entries = match std::fs::read_dir(base) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(dir = %base.display(), error = %e, "failed to read manifest directory");
                    continue;
                }
            };

            let mut dist_dirs: Vec<PathBuf> = entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| path.is_dir())
                .filter(|path| {
                    path.file_name()
                        .is_some_and(|n| !n.to_string_lossy().starts_with('.'))
                })
                .collect();
            dist_dirs.sort();

            for dist_dir in dist_dirs {
                let Some(distribution) = dist_dir.file_name().map(|n| n.to_string_lossy().into_owned())
                else {
                    continue;
                };
                let manifest = dist_dir.join(MANIFEST_FILE_NAME);
                let reference = manifest.display().to_string();
                found.push(EntryPoint::new(distribution, "panel", reference, move || {
                    load_panel_manifest(&manifest).map(|spec| Box::new(spec) as Box<dyn Panel>)
                }));
            }
        }

        found
    }
}

/// A panel loaded from an entry point, awaiting validation.
pub struct Candidate {
    pub distribution: String,
    pub entry_point: String,
    pub reference: String,
    pub panel: Box<dyn Panel>,
}

impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("distribution", &self.distribution)
            .field("entry_point", &self.entry_point)
            .field("reference", &self.reference)
            .finish_non_exhaustive()
    }
}

/// Enumerates the plugin group across all configured sources.
#[derive(Default)]
pub struct EntryPointScanner {
    sources: Vec<Box<dyn EntryPointSource>>,
}

impl EntryPointScanner {
    /// A scanner with no sources; it finds nothing.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, source: impl EntryPointSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Build the scanner described by the `[discovery]` config section.
    pub fn from_config(config: &controlroom_config::model::DiscoveryConfig) -> Self {
        let mut scanner = Self::new();
        if config.inventory {
            scanner = scanner.with_source(InventorySource);
        }
        if !config.manifest_dirs.is_empty() {
            scanner = scanner.with_source(ManifestDirSource::new(config.manifest_dirs.clone()));
        }
        scanner
    }

    /// Labels of the configured sources, in scan order.
    pub fn source_labels(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.label()).collect()
    }

    /// Lazily enumerate and load every entry point of the group.
    ///
    /// Each call re-enumerates the sources. A failure is yielded (and logged
    /// once) in place of the candidate; it never stops the scan.
    pub fn scan(&self) -> impl Iterator<Item = Result<Candidate, PanelError>> + '_ {
        self.sources.iter().flat_map(|source| {
            let entry_points = source.entry_points();
            debug!(source = source.label(), count = entry_points.len(), "enumerated entry points");
            entry_points.into_iter().map(load_candidate)
        })
    }
}

fn load_candidate(ep: EntryPoint) -> Result<Candidate, PanelError> {
    if !is_valid_distribution_name(&ep.distribution) {
        warn!(
            distribution = %ep.distribution,
            entry_point = %ep.name,
            "skipping entry point with invalid distribution name"
        );
        return Err(PanelError::InvalidDistribution {
            distribution: ep.distribution,
            entry_point: ep.name,
        });
    }

    match ep.load() {
        Ok(panel) => Ok(Candidate {
            distribution: ep.distribution,
            entry_point: ep.name,
            reference: ep.value,
            panel,
        }),
        Err(source) => {
            warn!(
                distribution = %ep.distribution,
                entry_point = %ep.name,
                error = %source,
                "failed to load panel"
            );
            Err(PanelError::Discovery {
                distribution: ep.distribution,
                entry_point: ep.name,
                reference: ep.value,
                source,
            })
        }
    }
}
