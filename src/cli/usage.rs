//! Usage rendering: parameter signatures, per-command usage lines and
//! the full help listing.
//!
//! Everything here returns a `String`; only the dispatcher prints.
//! Padding is computed on plain text before styling is applied, so
//! ANSI escapes never skew column alignment. `help_entries` is the
//! machine-readable counterpart consumed by the binary's `--json`
//! flag.

use serde::Serialize;

use crate::registry::{DEFAULT_PAD_WIDTH, OpSpec, ParamSpec, Provider, Registry};
use crate::style::{Role, StyleOptions, color, truncate_ellipsis};

/// Render one parameter: `<Type $name>` when required,
/// `<[Type $name = default]>` when a default exists. The type segment
/// is omitted for untyped parameters; an absence-of-value default is
/// rendered as the literal `NULL`.
pub fn render_param(param: &ParamSpec, style: &StyleOptions) -> String {
    let mut inner = String::new();
    if let Some(label) = param.kind.label() {
        inner.push_str(&color(Role::Primary, label, style));
        inner.push(' ');
    }
    inner.push_str(&color(Role::Accent, format!("${}", param.name), style));
    match &param.default {
        Some(default) => {
            inner.push_str(&color(Role::Dim, format!(" = {default}"), style));
            format!("<[{inner}]>")
        }
        None => format!("<{inner}>"),
    }
}

/// Render a full parameter list: single-space separated with a
/// trailing space, empty string for an empty list.
pub fn render_usage(params: &[ParamSpec], style: &StyleOptions) -> String {
    if params.is_empty() {
        return String::new();
    }
    let rendered: Vec<String> = params.iter().map(|p| render_param(p, style)).collect();
    format!("{} ", rendered.join(" "))
}

/// Usage line for one resolved command, shown on validation failures.
pub fn render_command_usage(provider: &Provider, op: &OpSpec, style: &StyleOptions) -> String {
    format!(
        "Usage: {} {}",
        color(Role::Success, provider.qualified(&op.name), style),
        render_usage(&op.params, style)
    )
}

/// Top-level block for the no-command path: generic usage plus the
/// full help listing.
pub fn render_overview(registry: &Registry, style: &StyleOptions) -> String {
    let mut out = String::from("Usage:\n");
    out.push_str(&color(Role::Success, " command [arguments]", style));
    out.push_str("\n\n");
    out.push_str(&render_help(registry, style));
    out
}

/// Help listing covering every non-lifecycle operation of every
/// provider, in registry order.
pub fn render_help(registry: &Registry, style: &StyleOptions) -> String {
    let mut out = String::from("Available commands:\n");
    for provider in registry.providers() {
        out.push_str(&render_provider(provider, style));
    }
    out
}

fn render_provider(provider: &Provider, style: &StyleOptions) -> String {
    let listed: Vec<&OpSpec> = provider.ops.iter().filter(|op| !op.is_lifecycle()).collect();

    // Column width across this provider's operations, measured on the
    // alias-qualified display names.
    let width = listed
        .iter()
        .map(|op| provider.qualified(&op.name).chars().count() + 2)
        .max()
        .unwrap_or(0)
        .max(DEFAULT_PAD_WIDTH);

    let mut out = String::new();
    for op in listed {
        let name = provider.qualified(&op.name);
        out.push(' ');
        out.push_str(&color(Role::Success, format!("{name:<width$}"), style));
        out.push_str(&render_usage(&op.params, style));
        if let Some(summary) = op.summary.as_deref().and_then(first_doc_line) {
            let cap = style.term_width.saturating_sub(width).max(20);
            out.push_str(&color(Role::Secondary, truncate_ellipsis(summary, cap), style));
        }
        out.push('\n');
    }
    out
}

/// First descriptive line of a registered summary text.
pub fn first_doc_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).find(|line| !line.is_empty())
}

/* -------------------------------------------------------------------------- */
/* Machine-readable listing                                                   */
/* -------------------------------------------------------------------------- */

/// One help record for JSON output.
#[derive(Debug, Serialize)]
pub struct CommandInfo {
    pub command: String,
    pub usage: String,
    pub summary: Option<String>,
}

/// Flat, registry-ordered records for every non-lifecycle operation.
pub fn help_entries(registry: &Registry) -> Vec<CommandInfo> {
    let plain = StyleOptions::plain();
    let mut entries = Vec::new();
    for provider in registry.providers() {
        for op in provider.ops.iter().filter(|op| !op.is_lifecycle()) {
            entries.push(CommandInfo {
                command: provider.qualified(&op.name),
                usage: render_usage(&op.params, &plain).trim_end().to_string(),
                summary: op
                    .summary
                    .as_deref()
                    .and_then(first_doc_line)
                    .map(str::to_string),
            });
        }
    }
    entries
}
