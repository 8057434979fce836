use clap::{ArgAction, Parser};
use std::path::PathBuf;

use super::paths::DEFAULT_INTERPRETER;

/// Pilot - console front end for the pilot orchestrator
#[derive(Parser, Debug)]
#[command(name = "pilot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit line-delimited JSON instead of human-readable text
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub json: bool,

    /// Enable verbose logging
    #[arg(
        short,
        long,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub verbose: bool,

    /// Install root holding requirements.txt and venv/ (defaults to the executable's directory)
    #[arg(long, env = "PILOT_ROOT")]
    pub root: Option<PathBuf>,

    /// Interpreter the runtime components are installed for
    #[arg(long, env = "PILOT_PYTHON", default_value = DEFAULT_INTERPRETER)]
    pub python: PathBuf,
}

/// Long flags that take a value.
const VALUE_FLAGS: &[&str] = &["--root", "--python"];

/// Flags without a value.
const SWITCHES: &[&str] = &["-h", "--help", "-V", "--version"];

/// Boolean flags: bare, or with an explicit `=true` / `=false`.
const BOOL_FLAGS: &[&str] = &["--json", "-v", "--verbose"];

fn has_inline_value(arg: &str, flags: &[&str]) -> bool {
    flags.iter().any(|flag| {
        arg.strip_prefix(flag)
            .is_some_and(|rest| rest.starts_with('='))
    })
}

/// Split the command line into arguments `Cli` understands and everything
/// else, which is passed through untouched. The program name stays first in
/// the known list.
pub fn split_known_args<I>(args: I) -> (Vec<String>, Vec<String>)
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut known: Vec<String> = args.next().into_iter().collect();
    let mut passthrough = Vec::new();

    while let Some(arg) = args.next() {
        if SWITCHES.contains(&arg.as_str()) || BOOL_FLAGS.contains(&arg.as_str()) {
            known.push(arg);
        } else if VALUE_FLAGS.contains(&arg.as_str()) {
            known.push(arg);
            if let Some(value) = args.next() {
                known.push(value);
            }
        } else if has_inline_value(&arg, VALUE_FLAGS) || has_inline_value(&arg, BOOL_FLAGS) {
            known.push(arg);
        } else {
            passthrough.push(arg);
        }
    }

    (known, passthrough)
}
