// SPDX-FileCopyrightText: 2026 Control Room Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shape validation for loaded panels.

use std::str::FromStr;

use controlroom_core::{Icon, RegistryKey, RequiredField, ValidationError};

use crate::panel::{DEFAULT_URL_NAME, Descriptor, Panel};

/// Check a loaded panel against the required capability set and build its
/// descriptor under `key`.
///
/// Fields are checked in the order name, description, icon; the first missing
/// one is reported. A self-declared `id` is ignored.
pub fn validate(key: RegistryKey, panel: &dyn Panel) -> Result<Descriptor, ValidationError> {
    let name = required(RequiredField::Name, panel.name())?;
    let description = required(RequiredField::Description, panel.description())?;
    let icon_name = required(RequiredField::Icon, panel.icon())?;

    let icon = Icon::from_str(&icon_name).map_err(|_| ValidationError::InvalidIcon {
        value: icon_name.clone(),
        valid: Icon::vocabulary(),
    })?;

    let app_name = optional(panel.app_name()).unwrap_or_else(|| key.as_str().to_string());
    let url_name = panel
        .url_name()
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_URL_NAME.to_string());

    Ok(Descriptor {
        registry_id: key,
        name,
        description,
        icon,
        app_name,
        package: optional(panel.package()),
        docs_url: optional(panel.docs_url()),
        pypi_url: optional(panel.pypi_url()),
        url_name,
        distribution: None,
    })
}

fn required(field: RequiredField, value: Option<&str>) -> Result<String, ValidationError> {
    optional(value).ok_or(ValidationError::MissingField { field })
}

fn optional(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}
