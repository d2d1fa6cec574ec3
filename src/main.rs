use clap::Parser;
use lsa_trainer::{Cli, Config, Pipeline};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lsa_trainer=info")))
        .init();

    // an unknown mode stops here, before anything is read
    let cli = Cli::parse();

    let params = match Config::new(cli) {
        Ok(config) => config.get_params(),
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    info!("{}", params);

    match Pipeline::run(&params) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{} failed: {}", params.mode, e);
            ExitCode::FAILURE
        }
    }
}
