//! Dispatch orchestration: resolve the command token, gate forbidden
//! operations, validate arguments, invoke the handler.
//!
//! The whole pass runs to completion synchronously and returns a
//! terminal [`Outcome`]; the binary maps it to the process exit
//! status. Help goes to stdout, diagnostics to stderr.

use crate::cli::error::{CliError, ForbiddenReason};
use crate::cli::resolve::resolve;
use crate::cli::usage::{render_command_usage, render_help, render_overview};
use crate::cli::validate::validate;
use crate::registry::Registry;
use crate::style::{Role, StyleOptions, color};

/// Terminal state of one dispatch pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No command token: the full listing was shown. A success exit.
    HelpShown,
    /// The resolved operation ran (successfully).
    Invoked,
    /// A diagnostic was shown. A failure exit.
    ErrorShown,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::HelpShown | Outcome::Invoked => 0,
            Outcome::ErrorShown => 1,
        }
    }
}

/// Run one command-line against the registry. `tokens` is the argument
/// vector after the program name: command token first, raw operation
/// arguments after it.
pub fn dispatch(registry: &Registry, tokens: &[String], style: &StyleOptions) -> Outcome {
    let Some(command) = tokens.first() else {
        print!("{}", render_overview(registry, style));
        return Outcome::HelpShown;
    };
    let raw_args = &tokens[1..];

    let Some(resolution) = resolve(registry, command) else {
        report(&CliError::UnknownCommand(command.clone()), style);
        println!();
        print!("{}", render_help(registry, style));
        return Outcome::ErrorShown;
    };
    crate::log_debug!(
        "resolved '{}' to operation '{}' on provider '{}'",
        command,
        resolution.operation,
        resolution.provider.name
    );

    // The table cannot change between resolve and describe, so a miss
    // here is a configuration bug.
    let Some(op) = resolution.provider.describe(&resolution.operation) else {
        report(
            &CliError::Introspection {
                name: resolution.operation.clone(),
                detail: format!("not in the table of provider '{}'", resolution.provider.name),
            },
            style,
        );
        return Outcome::ErrorShown;
    };

    if !op.public {
        report(
            &CliError::Forbidden {
                name: op.name.clone(),
                reason: ForbiddenReason::NotPublic,
            },
            style,
        );
        return Outcome::ErrorShown;
    }
    if op.is_lifecycle() {
        report(
            &CliError::Forbidden {
                name: op.name.clone(),
                reason: ForbiddenReason::Lifecycle,
            },
            style,
        );
        return Outcome::ErrorShown;
    }

    let checked = match validate(&op.params, raw_args) {
        Ok(checked) => checked,
        Err(err) => {
            println!("{}", render_command_usage(resolution.provider, op, style));
            report(&err, style);
            return Outcome::ErrorShown;
        }
    };

    let call = op.handler.prepare();
    match call(checked.tokens()) {
        Ok(()) => Outcome::Invoked,
        Err(err) => {
            eprintln!("{}", color(Role::Error, format!("Error: {err:#}"), style));
            Outcome::ErrorShown
        }
    }
}

fn report(err: &CliError, style: &StyleOptions) {
    eprintln!("{}", color(Role::Error, format!("Error: {err}"), style));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Handler, OpSpec, ParamDefault, ParamKind, ParamSpec, Provider};
    use anyhow::bail;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Handler that records every argument vector it is invoked with.
    fn capture(log: &Rc<RefCell<Vec<Vec<String>>>>) -> Handler {
        let log = Rc::clone(log);
        Handler::shared(move |args| {
            log.borrow_mut().push(args.to_vec());
            Ok(())
        })
    }

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn math_registry(log: &Rc<RefCell<Vec<Vec<String>>>>) -> Registry {
        Registry::single(
            Provider::new("math")
                .with_op(
                    OpSpec::new("add", capture(log))
                        .with_param(ParamSpec::required("a", ParamKind::Int))
                        .with_param(ParamSpec::required("b", ParamKind::Int)),
                )
                .with_op(
                    OpSpec::new("pow", capture(log))
                        .with_param(ParamSpec::required("base", ParamKind::Int))
                        .with_param(ParamSpec::optional(
                            "exp",
                            ParamKind::Int,
                            ParamDefault::Int(2),
                        )),
                )
                .with_op(OpSpec::new("secret", capture(log)).hidden())
                .with_op(OpSpec::new("__reset", capture(log))),
        )
        .unwrap()
    }

    #[test]
    fn valid_command_invokes_with_raw_tokens() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let registry = math_registry(&log);
        let outcome = dispatch(&registry, &tokens(&["add", "3", "4"]), &StyleOptions::plain());
        assert_eq!(outcome, Outcome::Invoked);
        assert_eq!(log.borrow().as_slice(), &[tokens(&["3", "4"])]);
    }

    #[test]
    fn missing_argument_stops_before_invocation() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let registry = math_registry(&log);
        let outcome = dispatch(&registry, &tokens(&["add", "3"]), &StyleOptions::plain());
        assert_eq!(outcome, Outcome::ErrorShown);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn unknown_command_is_an_error() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let registry = math_registry(&log);
        let outcome = dispatch(&registry, &tokens(&["mul", "3", "4"]), &StyleOptions::plain());
        assert_eq!(outcome, Outcome::ErrorShown);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn no_command_shows_help() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let registry = math_registry(&log);
        let outcome = dispatch(&registry, &[], &StyleOptions::plain());
        assert_eq!(outcome, Outcome::HelpShown);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn defaulted_parameter_may_be_omitted() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let registry = math_registry(&log);
        let outcome = dispatch(&registry, &tokens(&["pow", "3"]), &StyleOptions::plain());
        assert_eq!(outcome, Outcome::Invoked);
        // The provider applies its own default; no token is synthesized.
        assert_eq!(log.borrow().as_slice(), &[tokens(&["3"])]);
    }

    #[test]
    fn non_public_operation_resolves_but_never_runs() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let registry = math_registry(&log);
        let outcome = dispatch(&registry, &tokens(&["secret"]), &StyleOptions::plain());
        assert_eq!(outcome, Outcome::ErrorShown);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn lifecycle_operation_never_runs_on_exact_match() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let registry = math_registry(&log);
        let outcome = dispatch(&registry, &tokens(&["__reset"]), &StyleOptions::plain());
        assert_eq!(outcome, Outcome::ErrorShown);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn alias_qualified_dispatch_reaches_aliased_provider() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = Registry::new();
        registry
            .register(Provider::aliased("text", "text").with_op(
                OpSpec::new("upper", capture(&log))
                    .with_param(ParamSpec::required("value", ParamKind::Untyped)),
            ))
            .unwrap();
        let outcome = dispatch(
            &registry,
            &tokens(&["text:upper", "hi"]),
            &StyleOptions::plain(),
        );
        assert_eq!(outcome, Outcome::Invoked);
        assert_eq!(log.borrow().as_slice(), &[tokens(&["hi"])]);
    }

    #[test]
    fn handler_failure_surfaces_as_error() {
        let registry = Registry::single(
            Provider::new("math")
                .with_op(OpSpec::new("boom", Handler::shared(|_| bail!("provider exploded")))),
        )
        .unwrap();
        let outcome = dispatch(&registry, &tokens(&["boom"]), &StyleOptions::plain());
        assert_eq!(outcome, Outcome::ErrorShown);
    }

    #[test]
    fn excess_tokens_are_passed_through() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let registry = math_registry(&log);
        let outcome = dispatch(
            &registry,
            &tokens(&["add", "3", "4", "extra"]),
            &StyleOptions::plain(),
        );
        assert_eq!(outcome, Outcome::Invoked);
        assert_eq!(log.borrow().as_slice(), &[tokens(&["3", "4", "extra"])]);
    }
}
