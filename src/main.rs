//! `specular-grid` binary.

use std::process::ExitCode;

use specular_grid::{app, config::Config, logging};

fn main() -> ExitCode {
    let config = Config::from_env();
    logging::init_logging(config.logging.clone());

    match app::run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("FATAL: {err}");
            ExitCode::FAILURE
        }
    }
}
