//! The Variadic Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions. Failures are rendered as miette diagnostics on
//! stderr and the process exits with status 1.

use std::process;

use clap::Parser;
use miette::{miette, IntoDiagnostic, WrapErr};

use crate::binding::CallArgs;
use crate::cli::args::{Command, VariadicArgs};
use crate::decorator::variadic;
use crate::registry::{build_default_registry, FunctionRegistry};
use crate::value::{RangeSpec, TypeTag, Value};

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = VariadicArgs::parse();
    init_logging(args.verbose);

    // Dispatch to the appropriate subcommand handler.
    let result = match args.command {
        Command::Flatten { atomic, json, args } => handle_flatten(atomic, json, &args),
        Command::Call {
            name,
            atomic,
            keywords,
            json,
            args,
        } => handle_call(&name, atomic, &keywords, json, &args),
        Command::List => handle_list(),
        Command::Signature { name } => handle_signature(&name),
    };

    if let Err(report) = result {
        eprintln!("{report:?}");
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

fn handle_flatten(atomic: Vec<TypeTag>, json: bool, raw: &[String]) -> miette::Result<()> {
    let values = parse_values(raw)?;
    let flat = variadic(atomic).flatten(values).into_values()?;
    output::print_value(&Value::List(flat), json);
    Ok(())
}

fn handle_call(
    name: &str,
    atomic: Vec<TypeTag>,
    keywords: &[String],
    json: bool,
    raw: &[String],
) -> miette::Result<()> {
    let registry = build_default_registry(&variadic(atomic))?;
    let function = lookup(&registry, name)?;

    let mut call = CallArgs::from(parse_values(raw)?);
    for entry in keywords {
        let (key, value) = entry
            .split_once('=')
            .ok_or_else(|| miette!("keyword argument '{}' must look like KEY=VALUE", entry))?;
        call = call.kw(key, parse_value(value)?);
    }

    let result = function.call(call)?;
    output::print_value(&result, json);
    Ok(())
}

fn handle_list() -> miette::Result<()> {
    let registry = build_default_registry(&variadic(TypeTag::Int))?;
    let names = registry.list();
    output::print_listing(
        names
            .iter()
            .filter_map(|name| registry.get(name))
            .map(|callable| callable.as_ref()),
    );
    Ok(())
}

fn handle_signature(name: &str) -> miette::Result<()> {
    let registry = build_default_registry(&variadic(TypeTag::Int))?;
    output::print_signature(lookup(&registry, name)?.as_ref());
    Ok(())
}

fn lookup<'r>(
    registry: &'r FunctionRegistry,
    name: &str,
) -> miette::Result<&'r std::rc::Rc<dyn crate::function::Callable>> {
    registry.get(name).ok_or_else(|| {
        miette!(
            help = format!("available functions: {}", registry.list().join(", ")),
            "unknown function '{}'",
            name
        )
    })
}

fn parse_values(raw: &[String]) -> miette::Result<Vec<Value>> {
    raw.iter().map(|arg| parse_value(arg)).collect()
}

/// Parses one command-line argument: `range(a, b[, step])`, then JSON, and
/// finally falls back to a bare string.
fn parse_value(raw: &str) -> miette::Result<Value> {
    let trimmed = raw.trim();
    if let Some(inner) = trimmed
        .strip_prefix("range(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_range(inner).wrap_err_with(|| format!("invalid range '{}'", raw));
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(json) => Ok(Value::from(json)),
        Err(_) => Ok(Value::String(raw.to_string())),
    }
}

fn parse_range(inner: &str) -> miette::Result<Value> {
    let bounds = inner
        .split(',')
        .map(|part| part.trim().parse::<i64>())
        .collect::<Result<Vec<i64>, _>>()
        .into_diagnostic()?;
    let range = match bounds.as_slice() {
        [stop] => RangeSpec::new(0, *stop),
        [start, stop] => RangeSpec::new(*start, *stop),
        [start, stop, step] => RangeSpec::stepped(*start, *stop, *step)
            .ok_or_else(|| miette!("range step must not be zero"))?,
        _ => return Err(miette!("expected 1 to 3 integers")),
    };
    Ok(Value::Range(range))
}
