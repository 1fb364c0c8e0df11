mod cli;
mod commands;
mod error;
mod logging;

use std::time::Duration;

use backoffice_client::{Client, ClientConfig};
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut config = ClientConfig::from_env().unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    tracing::info!(base_url = %config.base_url, "using backoffice api");
    let client = Client::new(config);

    let result = match &cli.command {
        Command::List(args) => commands::list(&client, args),
        Command::Get(args) => commands::get(&client, args),
        Command::Submit(args) => commands::submit(&client, args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        if client.session().is_logged_out() {
            eprintln!("session expired, log in again");
        }
        std::process::exit(1);
    }
}
