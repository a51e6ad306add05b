//! User-facing error taxonomy for the dispatch pipeline.
//!
//! Every variant is terminal: the boundary renders a diagnostic,
//! optionally contextual usage or the full help listing, and the
//! process exits. Argument positions are 0-based.

use thiserror::Error;

/// Validated primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    Int,
    Float,
}

impl NumericKind {
    pub fn describe(&self) -> &'static str {
        match self {
            NumericKind::Int => "an integer",
            NumericKind::Float => "a float",
        }
    }
}

/// Why a resolved operation must not be invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForbiddenReason {
    NotPublic,
    Lifecycle,
}

impl ForbiddenReason {
    pub fn describe(&self) -> &'static str {
        match self {
            ForbiddenReason::NotPublic => "not public",
            ForbiddenReason::Lifecycle => "reserved lifecycle operation",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("unknown command ({0})")]
    UnknownCommand(String),

    #[error("command is not available ({})", .reason.describe())]
    Forbidden {
        name: String,
        reason: ForbiddenReason,
    },

    #[error("missing argument {position} for ${name} (no default value)")]
    MissingArgument { position: usize, name: String },

    #[error("argument {position} must be {}", .expected.describe())]
    TypeMismatch {
        position: usize,
        expected: NumericKind,
    },

    /// Descriptor lookup failed after a successful resolution. A fatal
    /// configuration bug, not a user input error.
    #[error("could not get operation '{name}': {detail}")]
    Introspection { name: String, detail: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_cli_wording() {
        assert_eq!(
            CliError::UnknownCommand("mul".into()).to_string(),
            "unknown command (mul)"
        );
        assert_eq!(
            CliError::MissingArgument {
                position: 1,
                name: "b".into(),
            }
            .to_string(),
            "missing argument 1 for $b (no default value)"
        );
        assert_eq!(
            CliError::TypeMismatch {
                position: 0,
                expected: NumericKind::Int,
            }
            .to_string(),
            "argument 0 must be an integer"
        );
        assert_eq!(
            CliError::Forbidden {
                name: "secret".into(),
                reason: ForbiddenReason::NotPublic,
            }
            .to_string(),
            "command is not available (not public)"
        );
    }
}
