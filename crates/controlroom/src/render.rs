// SPDX-FileCopyrightText: 2026 Control Room Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Table and JSON output for the listing subcommands.

use std::io::IsTerminal;

use colored::Colorize;
use controlroom_plugin::catalog::search_catalog;
use controlroom_plugin::{PanelStatus, PanelView, admin_entries};
use miette::IntoDiagnostic;
use serde::Serialize;

use crate::context::AppContext;

fn print_json<T: Serialize + ?Sized>(value: &T) -> miette::Result<()> {
    let json = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{json}");
    Ok(())
}

fn use_color() -> bool {
    std::io::stdout().is_terminal()
}

fn status_cell(view: &PanelView) -> String {
    let text = if view.installed && !view.configured {
        "NEEDS SETUP"
    } else {
        view.status_label
    };
    if !use_color() {
        return text.to_string();
    }
    match view.status {
        PanelStatus::Installed if view.configured => text.green().to_string(),
        PanelStatus::Installed => text.yellow().to_string(),
        PanelStatus::NotInstalled => text.dimmed().to_string(),
        PanelStatus::ComingSoon => text.cyan().to_string(),
    }
}

/// `controlroom panels`: every registered panel in registry order.
pub fn panels(ctx: &AppContext, json: bool) -> miette::Result<()> {
    let dashboard = ctx.dashboard();
    let views: Vec<PanelView> = ctx
        .registry
        .panels()
        .iter()
        .map(|d| dashboard.panel_view(d))
        .collect();

    if json {
        return print_json(&views);
    }

    if views.is_empty() {
        println!("No panels registered.");
        return Ok(());
    }

    println!("{:<24} {:<22} {:<9} {:<12} URL", "ID", "NAME", "ICON", "STATUS");
    for view in &views {
        println!(
            "{:<24} {:<22} {:<9} {:<12} {}",
            view.id,
            view.name,
            view.icon,
            status_cell(view),
            view.url
        );
    }
    if !ctx.report.failures.is_empty() {
        println!();
        println!(
            "{} panel(s) failed to load; run `controlroom doctor` for details.",
            ctx.report.failures.len()
        );
    }
    Ok(())
}

/// `controlroom featured`: the curated catalog with live status.
pub fn featured(ctx: &AppContext, search: Option<&str>, json: bool) -> miette::Result<()> {
    let mut views = ctx.dashboard().featured_panels();
    if let Some(query) = search {
        let matching: Vec<&str> = search_catalog(query).iter().map(|p| p.id).collect();
        views.retain(|v| matching.contains(&v.id.as_str()));
    }

    if json {
        return print_json(&views);
    }

    for view in &views {
        println!("{:<20} {:<14} {}", view.name, status_cell(view), view.description);
        if let Some(pypi) = &view.pypi_url {
            let pypi = if use_color() {
                pypi.as_str().dimmed().to_string()
            } else {
                pypi.clone()
            };
            println!("{:<20} {pypi}", "");
        }
    }
    Ok(())
}

/// `controlroom admin`: generated admin entries and the dual-registration decision.
pub fn admin(ctx: &AppContext, json: bool) -> miette::Result<()> {
    let entries = admin_entries(&ctx.registry, &ctx.config.host.namespace);

    if json {
        return print_json(&entries);
    }

    println!("{:<30} {:<26} {:<28} DUAL", "MODEL", "LABEL", "REDIRECT");
    for entry in &entries {
        let dual = if ctx.admin.should_dual_register(&entry.key) {
            "yes"
        } else {
            "no"
        };
        println!(
            "{:<30} {:<26} {:<28} {}",
            entry.model_name, entry.label, entry.redirect_route, dual
        );
    }
    Ok(())
}
