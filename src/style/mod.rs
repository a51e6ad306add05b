/*!
Styling primitives for human-readable output paths.

Goals:
  - Centralize style decision logic (NO_COLOR env, --plain flag).
  - Keep zero non-std dependencies (no terminal crates).
  - Degrade gracefully when ANSI is disabled: `color` returns its
    input verbatim, so nothing downstream may depend on escape codes.

Width detection is best-effort via:
    env COLUMNS -> parse -> clamp (40..=220) else default 100.

Public API Summary:
  - StyleOptions::detect() / StyleOptions::plain()
  - color(role, text, &StyleOptions) -> String
  - truncate_ellipsis(s, max_chars) -> String

NOTE:
  - This module avoids logging or printing directly (returns strings).
  - JSON output paths SHOULD NOT use these helpers to keep machine
    output clean.
*/

/* -------------------------------------------------------------------------- */
/* Style Options                                                              */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone)]
pub struct StyleOptions {
    pub use_color: bool,
    pub term_width: usize,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self::detect()
    }
}

impl StyleOptions {
    pub fn detect() -> Self {
        let use_color = std::env::var_os("NO_COLOR").is_none();

        let width = std::env::var("COLUMNS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .map(|w| w.clamp(40, 220))
            .unwrap_or(100);

        StyleOptions {
            use_color,
            term_width: width,
        }
    }

    /// Styling disabled entirely; `color` passes text through untouched.
    pub fn plain() -> Self {
        StyleOptions {
            use_color: false,
            term_width: 100,
        }
    }
}

/* -------------------------------------------------------------------------- */
/* Color Roles                                                                */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone, Copy)]
pub enum Role {
    /// Declared parameter types.
    Primary,
    /// Operation summaries.
    Secondary,
    /// Parameter names.
    Accent,
    /// Command names.
    Success,
    Warning,
    Error,
    /// Default values.
    Dim,
}

pub fn color(role: Role, text: impl AsRef<str>, style: &StyleOptions) -> String {
    if !style.use_color {
        return text.as_ref().to_string();
    }
    let code = match role {
        Role::Primary => "38;5;45",    // cyan-ish
        Role::Secondary => "38;5;250", // gray
        Role::Accent => "38;5;117",    // light blue
        Role::Success => "38;5;82",    // green
        Role::Warning => "38;5;214",   // orange
        Role::Error => "38;5;196",     // red
        Role::Dim => "2",              // faint
    };
    format!("\x1b[{code}m{}\x1b[0m", text.as_ref())
}

/* -------------------------------------------------------------------------- */
/* Truncation                                                                 */
/* -------------------------------------------------------------------------- */

pub fn truncate_ellipsis(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str("...");
    out
}

/* --------------------------------- Tests ---------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_passthrough() {
        let style = StyleOptions::plain();
        assert_eq!(color(Role::Error, "boom", &style), "boom");
    }

    #[test]
    fn colored_wraps_with_escape() {
        let style = StyleOptions {
            use_color: true,
            term_width: 100,
        };
        let out = color(Role::Success, "ok", &style);
        assert!(out.starts_with("\x1b["));
        assert!(out.ends_with("\x1b[0m"));
        assert!(out.contains("ok"));
    }

    #[test]
    fn truncate_short_untouched() {
        assert_eq!(truncate_ellipsis("hello", 10), "hello");
    }

    #[test]
    fn truncate_long_adds_ellipsis() {
        assert_eq!(truncate_ellipsis("abcdefghij", 8), "abcde...");
    }
}
