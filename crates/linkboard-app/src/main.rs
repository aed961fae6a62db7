//! Main application entry point.

use clap::Parser;
use linkboard_app::{App, AppConfig, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    log::info!("Starting Linkboard");

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to read configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match App::new(config).run(&cli.command) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
