// SPDX-FileCopyrightText: 2026 Control Room Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `controlroom doctor` command implementation.
//!
//! Reports every discovery failure, registry conflict, and panel whose link or
//! app is not set up in the host.

use std::io::IsTerminal;

use controlroom_core::PanelError;
use controlroom_plugin::{DiscoveryReport, PanelView, admin_entries};

use crate::context::AppContext;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
}

impl CheckResult {
    fn new(name: impl Into<String>, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status,
            message: message.into(),
        }
    }
}

/// Run the `controlroom doctor` command.
///
/// With `--plain`, disables colored output.
pub fn run_doctor(ctx: &AppContext, plain: bool) {
    let use_color = !plain && std::io::stdout().is_terminal();
    let results = collect_checks(ctx);

    println!();
    println!("  controlroom doctor");
    println!("  {}", "-".repeat(50));

    let mut fail_count = 0;
    let mut warn_count = 0;

    for result in &results {
        let line = match result.status {
            CheckStatus::Pass => {
                if use_color {
                    use colored::Colorize;
                    format!("    {} {:<24} {}", "✓".green(), result.name, result.message)
                } else {
                    format!("    [OK]   {:<24} {}", result.name, result.message)
                }
            }
            CheckStatus::Warn => {
                warn_count += 1;
                if use_color {
                    use colored::Colorize;
                    format!(
                        "    {} {:<24} {}",
                        "!".yellow(),
                        result.name,
                        result.message.as_str().yellow()
                    )
                } else {
                    format!("    [WARN] {:<24} {}", result.name, result.message)
                }
            }
            CheckStatus::Fail => {
                fail_count += 1;
                if use_color {
                    use colored::Colorize;
                    format!(
                        "    {} {:<24} {}",
                        "✗".red(),
                        result.name,
                        result.message.as_str().red()
                    )
                } else {
                    format!("    [FAIL] {:<24} {}", result.name, result.message)
                }
            }
        };
        println!("{line}");
    }

    println!();
    if fail_count > 0 || warn_count > 0 {
        let issues = fail_count + warn_count;
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    } else {
        println!("  All checks passed.");
    }
    println!();
}

fn collect_checks(ctx: &AppContext) -> Vec<CheckResult> {
    let mut results = vec![check_discovery(&ctx.report, ctx.registry.len())];
    results.extend(ctx.report.failures.iter().map(check_failure));
    results.extend(ctx.report.conflicts.iter().map(|c| {
        CheckResult::new(c.key.as_str(), CheckStatus::Warn, c.to_string())
    }));

    let dashboard = ctx.dashboard();
    for descriptor in ctx.registry.panels() {
        results.push(check_panel(&dashboard.panel_view(&descriptor)));
    }

    let entries = admin_entries(&ctx.registry, &ctx.config.host.namespace);
    let dual = entries
        .iter()
        .filter(|e| ctx.admin.should_dual_register(&e.key))
        .count();
    results.push(CheckResult::new(
        "Admin integration",
        CheckStatus::Pass,
        format!("{} entries, {dual} also kept in their own app", entries.len()),
    ));
    results
}

fn check_discovery(report: &DiscoveryReport, registered: usize) -> CheckResult {
    let status = if report.failures.is_empty() {
        CheckStatus::Pass
    } else {
        CheckStatus::Warn
    };
    CheckResult::new(
        "Discovery",
        status,
        format!(
            "{registered} panel(s) registered, {} failed",
            report.failures.len()
        ),
    )
}

fn check_failure(failure: &PanelError) -> CheckResult {
    let name = match failure {
        PanelError::Validation { key, .. } => key.to_string(),
        other => other.distribution().unwrap_or("panel").to_string(),
    };
    CheckResult::new(name, CheckStatus::Fail, failure.to_string())
}

fn check_panel(view: &PanelView) -> CheckResult {
    if view.configured {
        return CheckResult::new(&view.id, CheckStatus::Pass, format!("configured at {}", view.url));
    }
    let message = match (&view.link_error, view.in_installed_apps) {
        (Some(error), _) => error.clone(),
        (None, false) => "app is not listed in host.installed_apps".to_string(),
        (None, true) => "not configured".to_string(),
    };
    CheckResult::new(&view.id, CheckStatus::Warn, message)
}
