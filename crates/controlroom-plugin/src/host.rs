// SPDX-FileCopyrightText: 2026 Control Room Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seams to the host application: route reversal and the installed app list.

use std::collections::{BTreeMap, HashSet};

use controlroom_config::model::HostConfig;
use thiserror::Error;

/// A named route could not be turned into a path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReverseError {
    #[error("no route named `{route}` is mounted")]
    NoSuchRoute { route: String },

    #[error("route `{route}` needs argument {{{index}}} but only {given} were given")]
    MissingArgument {
        route: String,
        index: usize,
        given: usize,
    },
}

/// Turns a `namespace:name` route into a URL path.
pub trait RouteResolver: Send + Sync {
    fn reverse(&self, route: &str, args: &[&str]) -> Result<String, ReverseError>;
}

/// Table-backed routes, e.g. from the `[host.routes]` config section.
///
/// Paths may contain positional placeholders `{0}`, `{1}`, ...
#[derive(Debug, Clone, Default)]
pub struct StaticRoutes {
    routes: BTreeMap<String, String>,
}

impl StaticRoutes {
    pub fn new(routes: BTreeMap<String, String>) -> Self {
        Self { routes }
    }

    pub fn from_config(config: &HostConfig) -> Self {
        Self::new(config.routes.clone())
    }

    pub fn with_route(mut self, route: impl Into<String>, path: impl Into<String>) -> Self {
        self.routes.insert(route.into(), path.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl RouteResolver for StaticRoutes {
    fn reverse(&self, route: &str, args: &[&str]) -> Result<String, ReverseError> {
        let template = self.routes.get(route).ok_or_else(|| ReverseError::NoSuchRoute {
            route: route.to_string(),
        })?;

        let mut path = template.clone();
        let mut index = 0;
        loop {
            let placeholder = format!("{{{index}}}");
            if !path.contains(&placeholder) {
                break;
            }
            let value = args.get(index).ok_or_else(|| ReverseError::MissingArgument {
                route: route.to_string(),
                index,
                given: args.len(),
            })?;
            path = path.replace(&placeholder, value);
            index += 1;
        }
        Ok(path)
    }
}

/// Which apps the host has enabled.
pub trait AppInventory: Send + Sync {
    fn is_installed(&self, app_name: &str) -> bool;
}

/// Config-backed app list (`host.installed_apps`).
#[derive(Debug, Clone, Default)]
pub struct StaticApps {
    apps: HashSet<String>,
}

impl StaticApps {
    pub fn new<I, S>(apps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            apps: apps.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &HostConfig) -> Self {
        Self::new(config.installed_apps.iter().cloned())
    }
}

impl AppInventory for StaticApps {
    fn is_installed(&self, app_name: &str) -> bool {
        self.apps.contains(app_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_plain_route() {
        let routes = StaticRoutes::default().with_route("dj_redis_panel:index", "/admin/redis/");
        assert_eq!(
            routes.reverse("dj_redis_panel:index", &[]).unwrap(),
            "/admin/redis/"
        );
    }

    #[test]
    fn reverse_substitutes_arguments() {
        let routes = StaticRoutes::default()
            .with_route("control_room:install_panel", "/admin/control-room/install/{0}/");
        assert_eq!(
            routes
                .reverse("control_room:install_panel", &["dj_cache_panel"])
                .unwrap(),
            "/admin/control-room/install/dj_cache_panel/"
        );
    }

    #[test]
    fn reverse_unknown_route_fails() {
        let err = StaticRoutes::default().reverse("nope:index", &[]).unwrap_err();
        assert_eq!(
            err,
            ReverseError::NoSuchRoute {
                route: "nope:index".into()
            }
        );
    }

    #[test]
    fn reverse_missing_argument_fails() {
        let routes = StaticRoutes::default().with_route("a:b", "/x/{0}/{1}/");
        let err = routes.reverse("a:b", &["one"]).unwrap_err();
        assert!(matches!(err, ReverseError::MissingArgument { index: 1, given: 1, .. }));
    }

    #[test]
    fn static_apps_from_config() {
        let mut config = HostConfig::default();
        config.installed_apps = vec!["dj_redis_panel".into()];
        let apps = StaticApps::from_config(&config);
        assert!(apps.is_installed("dj_redis_panel"));
        assert!(!apps.is_installed("dj_cache_panel"));
    }
}
