use envdomain_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() {
    // Initialize logging as early as possible; falls back to stderr.
    let target = logging::init();
    tracing::debug!(%target, "log output ready");

    // Parse CLI and dispatch.
    if let Err(err) = CliCommand::run_from_args() {
        eprintln!("envdomain error: {:#}", err);
        std::process::exit(1);
    }
}
