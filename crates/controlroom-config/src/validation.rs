// SPDX-FileCopyrightText: 2026 Control Room Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks the constraints serde cannot express: log level names, blank keys in
//! the admin override table, and route names of the form `namespace:name`.

use crate::diagnostic::ConfigError;
use crate::model::ControlRoomConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns every problem found rather than stopping at the first one.
pub fn validate_config(config: &ControlRoomConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.logging.level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::validation(format!(
            "logging.level `{}` is not one of: {}",
            config.logging.level,
            LOG_LEVELS.join(", ")
        )));
    }

    for key in config.admin.panel_admin_registration.keys() {
        if key.trim().is_empty() {
            errors.push(ConfigError::validation(
                "admin.panel_admin_registration contains an empty panel id",
            ));
        }
    }

    for (i, dir) in config.discovery.manifest_dirs.iter().enumerate() {
        if dir.as_os_str().is_empty() {
            errors.push(ConfigError::validation(format!(
                "discovery.manifest_dirs[{i}] must not be empty"
            )));
        }
    }

    if config.host.namespace.trim().is_empty() {
        errors.push(ConfigError::validation("host.namespace must not be empty"));
    }

    for (i, app) in config.host.installed_apps.iter().enumerate() {
        if app.trim().is_empty() {
            errors.push(ConfigError::validation(format!(
                "host.installed_apps[{i}] must not be empty"
            )));
        }
    }

    for (name, path) in &config.host.routes {
        match name.split_once(':') {
            Some((namespace, route)) if !namespace.is_empty() && !route.is_empty() => {}
            _ => errors.push(ConfigError::validation(format!(
                "host.routes key `{name}` must have the form `namespace:name`"
            ))),
        }
        if path.trim().is_empty() {
            errors.push(ConfigError::validation(format!(
                "host.routes `{name}` must map to a non-empty path"
            )));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(errors: &[ConfigError]) -> Vec<String> {
        errors.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&ControlRoomConfig::default()).is_ok());
    }

    #[test]
    fn unknown_log_level_fails() {
        let mut config = ControlRoomConfig::default();
        config.logging.level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(messages(&errors)[0].contains("logging.level"));
    }

    #[test]
    fn log_level_is_case_insensitive() {
        let mut config = ControlRoomConfig::default();
        config.logging.level = "DEBUG".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn blank_override_key_fails() {
        let mut config = ControlRoomConfig::default();
        config
            .admin
            .panel_admin_registration
            .insert(" ".to_string(), true);
        let errors = validate_config(&config).unwrap_err();
        assert!(messages(&errors)[0].contains("empty panel id"));
    }

    #[test]
    fn route_without_namespace_fails() {
        let mut config = ControlRoomConfig::default();
        config
            .host
            .routes
            .insert("index".to_string(), "/admin/".to_string());
        config
            .host
            .routes
            .insert("dj_redis_panel:".to_string(), "/admin/redis/".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(
            errors
                .iter()
                .all(|e| matches!(e, ConfigError::Validation { message } if message.contains("namespace:name")))
        );
    }

    #[test]
    fn collects_all_errors() {
        let mut config = ControlRoomConfig::default();
        config.logging.level = "loud".to_string();
        config.host.namespace = String::new();
        config.host.installed_apps = vec!["".to_string()];
        config
            .host
            .routes
            .insert("dj_redis_panel:index".to_string(), " ".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn valid_routes_pass() {
        let mut config = ControlRoomConfig::default();
        config.host.routes.insert(
            "dj_redis_panel:index".to_string(),
            "/admin/dj-redis-panel/".to_string(),
        );
        config.host.installed_apps = vec!["dj_redis_panel".to_string()];
        assert!(validate_config(&config).is_ok());
    }
}
