use sinklog::cli::{build_cli, parse_config, run_command};
use sinklog::internal::config::VERSION;
use sinklog::internal::logger::init_logger;
use tracing::{debug, error};

fn main() -> anyhow::Result<()> {
    // Parse command line arguments first
    let matches = build_cli().get_matches();
    let config = match parse_config(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let logger = match init_logger(&config) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Failed to initialize logger: {}", e);
            std::process::exit(1);
        }
    };

    debug!("sinklog {} started", VERSION);
    debug!(
        "Level: {}, mode: {}, logs dir: {}",
        config.level,
        config.mode,
        config.logs_dir.display()
    );

    if let Err(e) = run_command(&matches, &logger, &config) {
        error!("Command failed: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
