//! Defines the command-line arguments and subcommands for the Variadic CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{ArgAction, Parser, Subcommand};

use crate::value::TypeTag;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "variadic",
    version,
    about = "Flatten nested argument groups and call variadic functions."
)]
pub struct VariadicArgs {
    /// Raise log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Flatten the given arguments one level and print the sequence.
    Flatten {
        /// Types kept as single elements (repeatable).
        #[arg(short, long, value_enum, default_value = "int")]
        atomic: Vec<TypeTag>,
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
        /// Arguments: JSON values, `range(start, stop[, step])`, or bare words.
        #[arg(allow_negative_numbers = true)]
        args: Vec<String>,
    },
    /// Call a registered function through its flattening wrapper.
    Call {
        /// Name of the function to call (see `list`).
        #[arg(required = true)]
        name: String,
        /// Types kept as single elements (repeatable).
        #[arg(short, long, value_enum, default_value = "int")]
        atomic: Vec<TypeTag>,
        /// Keyword argument as KEY=VALUE (repeatable).
        #[arg(long = "kw", value_name = "KEY=VALUE")]
        keywords: Vec<String>,
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
        /// Positional arguments, parsed like `flatten`'s.
        #[arg(allow_negative_numbers = true)]
        args: Vec<String>,
    },
    /// List all registered functions with their signatures.
    List,
    /// Show one function's signature and documentation.
    Signature {
        #[arg(required = true)]
        name: String,
    },
}
