/*!
Command pipeline: resolve → validate → dispatch, plus usage rendering
and the error taxonomy.

Directory Layout:
  src/cli/
    mod.rs          (this file)
    resolve.rs      (command token → provider/operation resolution)
    validate.rs     (arity + primitive type checks over raw tokens)
    usage.rs        (parameter/usage/help rendering + JSON records)
    dispatch.rs     (orchestration + terminal Outcome)
    error.rs        (user-facing error taxonomy)

Conventions:
  - Rendering functions return `String`s and never print; only
    `dispatch` writes to stdout/stderr.
  - Structured errors carry 0-based argument positions.
  - Resolution ties are broken by registry order, first match wins.
*/

pub mod dispatch;
pub mod error;
pub mod resolve;
pub mod usage;
pub mod validate;

pub use dispatch::{Outcome, dispatch};
pub use error::{CliError, ForbiddenReason, NumericKind};
pub use resolve::{Resolution, resolve};
pub use usage::{CommandInfo, help_entries, render_help, render_param, render_usage};
pub use validate::{CheckedArgs, validate};
