// SPDX-FileCopyrightText: 2026 Control Room Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Panel manifest parsing from `panel.toml` files.
//!
//! A manifest is the declarative form of the [`Panel`](crate::panel::Panel)
//! contract. Parsing only checks TOML syntax and field types; whether the
//! required fields are present is the validator's job, so a manifest missing
//! `icon` still parses and is reported as `missing required field icon`.

use std::io;
use std::path::Path;

use controlroom_core::LoadError;
use serde::Deserialize;

use crate::panel::PanelSpec;

/// File name looked up inside each distribution directory.
pub const MANIFEST_FILE_NAME: &str = "panel.toml";

/// Intermediate TOML deserialization struct for `panel.toml`.
#[derive(Debug, Deserialize)]
struct PanelManifestFile {
    panel: PanelSection,
}

/// The `[panel]` section of a `panel.toml` file.
#[derive(Debug, Deserialize)]
struct PanelSection {
    name: Option<String>,
    description: Option<String>,
    icon: Option<String>,
    id: Option<String>,
    app_name: Option<String>,
    package: Option<String>,
    docs_url: Option<String>,
    pypi_url: Option<String>,
    url_name: Option<String>,
}

/// Parse a panel manifest from TOML content.
pub fn parse_panel_manifest(toml_content: &str) -> Result<PanelSpec, toml::de::Error> {
    let file: PanelManifestFile = toml::from_str(toml_content)?;
    let section = file.panel;

    Ok(PanelSpec {
        name: section.name,
        description: section.description,
        icon: section.icon,
        id: section.id,
        app_name: section.app_name,
        package: section.package,
        docs_url: section.docs_url,
        pypi_url: section.pypi_url,
        url_name: section.url_name,
    })
}

/// Read and parse the manifest at `path`.
pub fn load_panel_manifest(path: &Path) -> Result<PanelSpec, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            LoadError::MissingManifest {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    parse_panel_manifest(&content).map_err(|e| LoadError::InvalidManifest {
        path: path.to_path_buf(),
        reason: e.message().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_manifest() {
        let toml = r#"
[panel]
name = "Redis Panel"
description = "Monitor connections, memory, keys, and throughput."
icon = "database"
app_name = "dj_redis_panel"
package = "dj-redis-panel"
docs_url = "https://github.com/yassi/dj-redis-panel"
pypi_url = "https://pypi.org/project/dj-redis-panel/"
url_name = "index"
"#;
        let spec = parse_panel_manifest(toml).unwrap();
        assert_eq!(spec.name.as_deref(), Some("Redis Panel"));
        assert_eq!(spec.icon.as_deref(), Some("database"));
        assert_eq!(spec.package.as_deref(), Some("dj-redis-panel"));
        assert_eq!(spec.url_name.as_deref(), Some("index"));
    }

    #[test]
    fn parse_keeps_missing_required_fields_for_validation() {
        let toml = r#"
[panel]
name = "No Icon"
description = "forgot the icon"
"#;
        let spec = parse_panel_manifest(toml).unwrap();
        assert!(spec.icon.is_none());
    }

    #[test]
    fn parse_accepts_legacy_id() {
        let toml = r#"
[panel]
id = "my_custom_id"
name = "Legacy"
description = "still declares an id"
icon = "cog"
"#;
        let spec = parse_panel_manifest(toml).unwrap();
        assert_eq!(spec.id.as_deref(), Some("my_custom_id"));
    }

    #[test]
    fn parse_requires_panel_section() {
        assert!(parse_panel_manifest("[plugin]\nname = \"x\"\n").is_err());
    }

    #[test]
    fn parse_rejects_wrong_types() {
        assert!(parse_panel_manifest("[panel]\nname = 42\n").is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_panel_manifest(&dir.path().join(MANIFEST_FILE_NAME)).unwrap_err();
        assert!(matches!(err, LoadError::MissingManifest { .. }));
    }

    #[test]
    fn load_reports_invalid_manifest_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILE_NAME);
        std::fs::write(&path, "[panel\nname = ").unwrap();
        let err = load_panel_manifest(&path).unwrap_err();
        assert!(matches!(err, LoadError::InvalidManifest { .. }));
        assert!(err.to_string().contains("panel.toml"));
    }
}
