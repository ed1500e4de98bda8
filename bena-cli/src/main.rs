//! Entry point for the `bena` command-line interface.
#![forbid(unsafe_code)]

use bena_cli::CliError;

fn main() {
    match bena_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("bena: {err}");
            std::process::exit(1);
        }
    }
}
