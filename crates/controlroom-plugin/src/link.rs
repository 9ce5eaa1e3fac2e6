// SPDX-FileCopyrightText: 2026 Control Room Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Best-effort navigation links for registered panels.

use controlroom_core::LinkResolutionFailure;
use serde::Serialize;
use tracing::warn;

use crate::host::RouteResolver;
use crate::panel::Descriptor;

/// Link rendered when a panel's route cannot be reversed.
pub const PLACEHOLDER_URL: &str = "#";

/// Result of resolving a panel's entry link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLink {
    pub url: String,
    /// Present exactly when `url` is the placeholder.
    #[serde(skip)]
    pub failure: Option<LinkResolutionFailure>,
}

impl ResolvedLink {
    pub fn is_placeholder(&self) -> bool {
        self.failure.is_some()
    }
}

/// Resolves `"{app_name}:{url_name}"` through the host's routes.
pub struct LinkResolver<'a> {
    routes: &'a dyn RouteResolver,
}

impl<'a> LinkResolver<'a> {
    pub fn new(routes: &'a dyn RouteResolver) -> Self {
        Self { routes }
    }

    /// Resolve the panel's entry URL, falling back to [`PLACEHOLDER_URL`].
    ///
    /// Never fails: an unresolvable route yields the placeholder plus one
    /// diagnostic, which is also logged once.
    pub fn resolve_url(&self, descriptor: &Descriptor) -> ResolvedLink {
        let route = descriptor.route();
        match self.routes.reverse(&route, &[]) {
            Ok(url) => ResolvedLink { url, failure: None },
            Err(e) => {
                let failure = LinkResolutionFailure {
                    key: descriptor.registry_id.clone(),
                    route,
                    reason: e.to_string(),
                };
                warn!(
                    panel = %failure.key,
                    route = %failure.route,
                    reason = %failure.reason,
                    "panel link could not be resolved"
                );
                ResolvedLink {
                    url: PLACEHOLDER_URL.to_string(),
                    failure: Some(failure),
                }
            }
        }
    }
}
