#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! dbperms: inspect and manage access-control permissions on workspace objects.

mod api;
mod cli;
mod commands;
mod config;
mod errors;
mod logging;
mod types;

use clap::Parser;

use cli::{Cli, OutputCtx, write_error};
use config::Overrides;
use types::ErrorOutput;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.debug);

    let ctx = OutputCtx::new(cli.output, cli.json, cli.no_header);
    let overrides = Overrides {
        profile: cli.profile.clone(),
        host: cli.host.clone(),
    };

    let mut out = std::io::stdout().lock();
    match commands::dispatch(&cli.command, || commands::connect(&overrides), &ctx, &mut out) {
        Ok(()) => {}
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            let error_output = ErrorOutput::from_cli_error(&err);
            write_error(&error_output, cli.output, cli.json);
            std::process::exit(err.exit_code());
        }
    }
}
