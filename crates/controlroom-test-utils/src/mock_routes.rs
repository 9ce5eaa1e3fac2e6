// SPDX-FileCopyrightText: 2026 Control Room Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock route resolver for deterministic link tests.
//!
//! `MockRoutes` serves a fixed set of mounted routes and records every route
//! name it was asked to reverse.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use controlroom_plugin::{ReverseError, RouteResolver};

/// A route resolver with a fixed route table and a call log.
#[derive(Debug, Default)]
pub struct MockRoutes {
    mounted: BTreeMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl MockRoutes {
    /// A resolver with no routes mounted; every reverse fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount `route` at `path`. `{0}` in the path is replaced by the first argument.
    pub fn mount(mut self, route: &str, path: &str) -> Self {
        self.mounted.insert(route.to_string(), path.to_string());
        self
    }

    /// Every route name passed to `reverse`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl RouteResolver for MockRoutes {
    fn reverse(&self, route: &str, args: &[&str]) -> Result<String, ReverseError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route.to_string());

        let path = self.mounted.get(route).ok_or_else(|| ReverseError::NoSuchRoute {
            route: route.to_string(),
        })?;
        Ok(match args.first() {
            Some(arg) => path.replace("{0}", arg),
            None => path.clone(),
        })
    }
}
