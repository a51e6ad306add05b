/*!
cmdcast demo binary.

Invocation layout:
  cmdcast [FLAGS] <command> [arg1] [arg2] ...

`<command>` is either a bare operation name or `alias:name`. Commands
come from the registered demo providers:
  math (no alias) : add, div, pow
  text (aliased)  : text:upper, text:repeat, text:trim
                    (also reachable bare while unshadowed)

Examples:
  cmdcast add 3 4
  cmdcast div 10 4
  cmdcast pow 2 8
  cmdcast text:upper hello
  cmdcast repeat hi 3
  cmdcast              (prints the command listing)
  cmdcast --json       (machine-readable listing)

Flags / env:
  -v / -vv     Debug / trace logging
  -q / --quiet Errors only
  --plain      Disable ANSI styling (NO_COLOR also respected)
  --json       Print the command listing as JSON and exit
*/

use anyhow::{Context, Result, bail};
use clap::Parser;

use cmdcast::cli::usage::help_entries;
use cmdcast::registry::{
    Handler, OpSpec, ParamDefault, ParamKind, ParamSpec, Provider, Registry,
};
use cmdcast::style::StyleOptions;
use cmdcast::{dispatch, utils};

#[derive(Parser, Debug)]
#[command(
    name = "cmdcast",
    version,
    about = "Dispatch registered provider operations as CLI commands"
)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Silence all non-error output
    #[arg(short, long)]
    quiet: bool,

    /// Disable ANSI styling (NO_COLOR is also respected)
    #[arg(long)]
    plain: bool,

    /// Print the command listing as JSON and exit
    #[arg(long)]
    json: bool,

    /// Command token followed by its raw arguments
    #[arg(value_name = "COMMAND [ARGS]", trailing_var_arg = true, allow_hyphen_values = true)]
    tokens: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    utils::init_logging(utils::derive_level(cli.verbose, cli.quiet));

    let registry = demo_registry()?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&help_entries(&registry))?);
        return Ok(());
    }

    let style = if cli.plain {
        StyleOptions::plain()
    } else {
        StyleOptions::detect()
    };

    let outcome = dispatch(&registry, &cli.tokens, &style);
    let code = outcome.exit_code();
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

/* -------------------------------------------------------------------------- */
/* Demo Providers                                                             */
/* -------------------------------------------------------------------------- */

fn demo_registry() -> Result<Registry> {
    let mut registry = Registry::new();
    registry.register(math_provider())?;
    registry.register(text_provider())?;
    Ok(registry)
}

/// Provider-level arithmetic operations; no per-call state.
fn math_provider() -> Provider {
    Provider::new("math")
        .with_op(
            OpSpec::new(
                "add",
                Handler::shared(|args| {
                    let a: i64 = args[0].parse()?;
                    let b: i64 = args[1].parse()?;
                    println!("{}", a + b);
                    Ok(())
                }),
            )
            .with_summary("Add two integers")
            .with_param(ParamSpec::required("a", ParamKind::Int))
            .with_param(ParamSpec::required("b", ParamKind::Int)),
        )
        .with_op(
            OpSpec::new(
                "div",
                Handler::shared(|args| {
                    let a: f64 = args[0].parse()?;
                    let b: f64 = args[1].parse()?;
                    if b == 0.0 {
                        bail!("division by zero");
                    }
                    println!("{}", a / b);
                    Ok(())
                }),
            )
            .with_summary("Divide two numbers")
            .with_param(ParamSpec::required("a", ParamKind::Float))
            .with_param(ParamSpec::required("b", ParamKind::Float)),
        )
        .with_op(
            OpSpec::new(
                "pow",
                Handler::shared(|args| {
                    let base: i64 = args[0].parse()?;
                    let exp: u32 = match args.get(1) {
                        Some(raw) => raw.parse()?,
                        None => 2,
                    };
                    let result = base
                        .checked_pow(exp)
                        .with_context(|| format!("overflow computing {base}^{exp}"))?;
                    println!("{result}");
                    Ok(())
                }),
            )
            .with_summary("Raise an integer to a power")
            .with_param(ParamSpec::required("base", ParamKind::Int))
            .with_param(ParamSpec::optional("exp", ParamKind::Int, ParamDefault::Int(2))),
        )
}

/// Per-invocation text transformer; a fresh instance is constructed
/// for each dispatch.
struct TextTools {
    scratch: String,
}

impl TextTools {
    fn new() -> Self {
        TextTools {
            scratch: String::new(),
        }
    }

    fn upper(mut self, args: &[String]) -> Result<()> {
        self.scratch.push_str(&args[0]);
        println!("{}", self.scratch.to_uppercase());
        Ok(())
    }

    fn repeat(self, args: &[String]) -> Result<()> {
        let times: usize = match args.get(1) {
            Some(raw) => raw.parse()?,
            None => 2,
        };
        println!("{}", args[0].repeat(times));
        Ok(())
    }

    fn trim(self, args: &[String]) -> Result<()> {
        match args.get(1) {
            Some(set) => println!("{}", args[0].trim_matches(|c: char| set.contains(c))),
            None => println!("{}", args[0].trim()),
        }
        Ok(())
    }

    fn scramble(self, args: &[String]) -> Result<()> {
        let mut chars: Vec<char> = args[0].chars().collect();
        chars.reverse();
        println!("{}", chars.into_iter().collect::<String>());
        Ok(())
    }
}

/// Instance-scoped text operations under the `text:` alias, plus a
/// non-public entry and a lifecycle entry exercising the forbidden
/// paths.
fn text_provider() -> Provider {
    Provider::aliased("text", "text")
        .with_op(
            OpSpec::new(
                "upper",
                Handler::per_call(|| {
                    let tools = TextTools::new();
                    Box::new(move |args| tools.upper(args))
                }),
            )
            .with_summary("Uppercase a string")
            .with_param(ParamSpec::required("value", ParamKind::Declared("string".into()))),
        )
        .with_op(
            OpSpec::new(
                "repeat",
                Handler::per_call(|| {
                    let tools = TextTools::new();
                    Box::new(move |args| tools.repeat(args))
                }),
            )
            .with_summary("Repeat a string")
            .with_param(ParamSpec::required("value", ParamKind::Declared("string".into())))
            .with_param(ParamSpec::optional("times", ParamKind::Int, ParamDefault::Int(2))),
        )
        .with_op(
            OpSpec::new(
                "trim",
                Handler::per_call(|| {
                    let tools = TextTools::new();
                    Box::new(move |args| tools.trim(args))
                }),
            )
            .with_summary("Trim whitespace, or a custom character set")
            .with_param(ParamSpec::required("value", ParamKind::Declared("string".into())))
            .with_param(ParamSpec::optional("chars", ParamKind::Untyped, ParamDefault::Null)),
        )
        .with_op(
            OpSpec::new(
                "scramble",
                Handler::per_call(|| {
                    let tools = TextTools::new();
                    Box::new(move |args| tools.scramble(args))
                }),
            )
            .with_param(ParamSpec::required("value", ParamKind::Untyped))
            .hidden(),
        )
        .with_op(OpSpec::new("__flush", Handler::shared(|_| Ok(()))))
}
