use std::process;

use clap::Parser;

use voyago::Config;
use voyago::cli::{self, Cli};
use voyago::logging;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbosity());

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = cli::run(cli.command, &config) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
