//! cmdcast: expose registered provider operations as command-line
//! subcommands.
//!
//! A caller declares a [`registry::Registry`] of providers, each an
//! ordered table of operations with parameter descriptors and a
//! handler. The pipeline then resolves the first CLI token (optionally
//! `alias:`-qualified), validates the remaining tokens against the
//! operation's parameters, and invokes the handler with the raw
//! strings. Without a command token, a generated help listing covers
//! every discoverable operation.
//!
//! ```
//! use cmdcast::registry::{Handler, OpSpec, ParamKind, ParamSpec, Provider, Registry};
//! use cmdcast::style::StyleOptions;
//!
//! let mut registry = Registry::new();
//! registry.register(
//!     Provider::new("math").with_op(
//!         OpSpec::new(
//!             "add",
//!             Handler::shared(|args| {
//!                 let a: i64 = args[0].parse()?;
//!                 let b: i64 = args[1].parse()?;
//!                 println!("{}", a + b);
//!                 Ok(())
//!             }),
//!         )
//!         .with_summary("Add two integers")
//!         .with_param(ParamSpec::required("a", ParamKind::Int))
//!         .with_param(ParamSpec::required("b", ParamKind::Int)),
//!     ),
//! )?;
//!
//! let tokens: Vec<String> = ["add", "3", "4"].map(String::from).to_vec();
//! let outcome = cmdcast::dispatch(&registry, &tokens, &StyleOptions::plain());
//! assert_eq!(outcome, cmdcast::Outcome::Invoked);
//! # Ok::<(), cmdcast::registry::RegistryError>(())
//! ```

pub mod cli;
pub mod registry;
pub mod style;
pub mod utils;

pub use cli::dispatch::{Outcome, dispatch};
pub use cli::error::CliError;
pub use registry::{
    Handler, OpSpec, ParamDefault, ParamKind, ParamSpec, Provider, Registry, RegistryError,
};
