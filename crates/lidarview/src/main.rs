//! lidarview binary: `lidarview [config.json]`.

use std::process::ExitCode;

use lidarview::ViewerConfig;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => match ViewerConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("failed to load {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => ViewerConfig::default(),
    };

    match lidarview::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
