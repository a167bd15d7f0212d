//! CLI interface for Voyago.
//!
//! Codec commands (`encode`, `decode`, `link`) are one-shot: arguments in,
//! token or JSON out. `shell` runs an interactive navigation session over stdin
//! or a script file.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::logging::Verbosity;
use crate::route::{self, Route};
use crate::shell::Shell;

/// Voyago: trip navigation from the command line.
#[derive(Debug, Parser)]
#[command(name = "voyago", after_long_help = TOKEN_HELP)]
pub struct Cli {
    /// More log output (-v debug, -vv trace). `RUST_LOG` overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Errors only.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

const TOKEN_HELP: &str = r"Route tokens:
  trips                     trips list
  trip_detail/<id>          one trip
  add_trip                  new trip
  add_trip?tripId=<id>      edit a trip
  map                       map of all trips
  profile                   profile and statistics

Deep links prefix a token with voyago:// (e.g. voyago://trip_detail/42).";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Encode a JSON route as its token.
    ///
    /// Example: voyago encode '{"kind":"tripDetail","tripId":42}'
    Encode {
        /// Route as JSON.
        json: String,
    },

    /// Decode a token into JSON.
    Decode {
        /// Route token, or a deep link with --link.
        token: String,

        /// Treat the input as a `voyago://` deep link.
        #[arg(long)]
        link: bool,
    },

    /// Print the canonical deep link for a token.
    Link {
        /// Route token.
        token: String,
    },

    /// Run a navigation session.
    ///
    /// Reads commands from stdin, or from `--script` when given.
    /// Type `help` inside the session for the command list.
    Shell {
        /// Read commands from this file instead of stdin.
        #[arg(long)]
        script: Option<PathBuf>,

        /// Start destination token. Overrides `VOYAGO_START` and the config file.
        #[arg(long)]
        start: Option<String>,

        /// Print the final back stack as JSON on exit.
        #[arg(long)]
        json: bool,
    },
}

/// Run a parsed command, returning an error message on failure.
pub fn run(command: Command, config: &Config) -> Result<(), String> {
    match command {
        Command::Encode { json } => cmd_encode(&json),
        Command::Decode { token, link } => cmd_decode(&token, link),
        Command::Link { token } => cmd_link(&token),
        Command::Shell {
            script,
            start,
            json,
        } => cmd_shell(config, script, start.as_deref(), json),
    }
}

fn cmd_encode(json: &str) -> Result<(), String> {
    let route: Route =
        serde_json::from_str(json).map_err(|e| format!("invalid route JSON: {e}"))?;
    println!("{route}");
    Ok(())
}

fn cmd_decode(token: &str, link: bool) -> Result<(), String> {
    let decoded = if link {
        route::decode_deep_link(token)
    } else {
        route::decode(token)
    };
    let route = decoded.map_err(|e| e.to_string())?;
    let json = serde_json::to_string_pretty(&route)
        .map_err(|e| format!("failed to serialize route: {e}"))?;
    println!("{json}");
    Ok(())
}

fn cmd_link(token: &str) -> Result<(), String> {
    let route = route::decode(token).map_err(|e| e.to_string())?;
    println!("{}", route::deep_link(&route));
    Ok(())
}

fn cmd_shell(
    config: &Config,
    script: Option<PathBuf>,
    start: Option<&str>,
    json: bool,
) -> Result<(), String> {
    let start = config.start_route(start).map_err(|e| e.to_string())?;
    let mut shell = Shell::new(start, io::stdout().lock());

    let result = match script {
        Some(path) => {
            let file = File::open(&path)
                .map_err(|e| format!("failed to open {}: {e}", path.display()))?;
            shell.run(BufReader::new(file))
        }
        None => shell.run(io::stdin().lock()),
    };
    result.map_err(|e| format!("shell failed: {e}"))?;

    if json {
        let json = shell
            .stack_json()
            .map_err(|e| format!("failed to serialize stack: {e}"))?;
        println!("{json}");
    }

    Ok(())
}
