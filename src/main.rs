use clap::Parser;
use std::process::ExitCode;

use tts_batch::cli::Args;
use tts_batch::config_loader::Settings;
use tts_batch::logging::init_logging;

fn main() -> ExitCode {
    let args = Args::parse();

    let settings = match Settings::load(args.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load settings: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&settings.log_config(args.verbose)) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    match tts_batch::run(&args, &settings) {
        Ok(summary) => {
            log::debug!("{:?}", summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{} ({:?} error)", e, e.severity());
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
