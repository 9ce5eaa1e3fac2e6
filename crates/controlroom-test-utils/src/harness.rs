// SPDX-FileCopyrightText: 2026 Control Room Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end discovery tests.
//!
//! `TestHarness` assembles a registry and a scanner over a static entry point
//! list plus a temporary manifest directory, so tests exercise the full
//! scan, validate, register pipeline in isolation from the process-wide group.

use std::path::Path;

use controlroom_core::ConflictPolicy;
use controlroom_plugin::manifest::MANIFEST_FILE_NAME;
use controlroom_plugin::{
    DiscoveryReport, EntryPoint, EntryPointScanner, ManifestDirSource, Registry, StaticSource,
};
use tempfile::TempDir;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    entries: Vec<EntryPoint>,
    manifests: Vec<(String, String)>,
    policy: ConflictPolicy,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            manifests: Vec::new(),
            policy: ConflictPolicy::default(),
        }
    }

    /// Add a static entry point.
    pub fn with_entry(mut self, entry: EntryPoint) -> Self {
        self.entries.push(entry);
        self
    }

    /// Install `<distribution>/panel.toml` with the given content.
    pub fn with_manifest(mut self, distribution: &str, content: &str) -> Self {
        self.manifests
            .push((distribution.to_string(), content.to_string()));
        self
    }

    pub fn with_policy(mut self, policy: ConflictPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Write the manifests to disk and build the harness.
    pub fn build(self) -> std::io::Result<TestHarness> {
        let dir = tempfile::tempdir()?;
        for (distribution, content) in &self.manifests {
            write_manifest(dir.path(), distribution, content)?;
        }

        let scanner = EntryPointScanner::new()
            .with_source(self.entries.into_iter().collect::<StaticSource>())
            .with_source(ManifestDirSource::new(vec![dir.path().to_path_buf()]));

        Ok(TestHarness {
            registry: Registry::new(self.policy),
            scanner,
            dir,
        })
    }
}

/// An isolated registry with its own plugin group.
pub struct TestHarness {
    registry: Registry,
    scanner: EntryPointScanner,
    dir: TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Run one discovery pass.
    pub fn discover(&self) -> DiscoveryReport {
        self.registry.autodiscover(&self.scanner)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn scanner(&self) -> &EntryPointScanner {
        &self.scanner
    }

    /// Install another manifest between discovery passes.
    pub fn install_manifest(&self, distribution: &str, content: &str) -> std::io::Result<()> {
        write_manifest(self.dir.path(), distribution, content)
    }

    /// Remove an installed manifest distribution between discovery passes.
    pub fn uninstall_manifest(&self, distribution: &str) -> std::io::Result<()> {
        std::fs::remove_dir_all(self.dir.path().join(distribution))
    }

    pub fn manifest_dir(&self) -> &Path {
        self.dir.path()
    }
}

fn write_manifest(root: &Path, distribution: &str, content: &str) -> std::io::Result<()> {
    let dist_dir = root.join(distribution);
    std::fs::create_dir_all(&dist_dir)?;
    std::fs::write(dist_dir.join(MANIFEST_FILE_NAME), content)
}
