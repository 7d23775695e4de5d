use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing::debug;

use crate::internal::config::{DeploymentMode, LoggingConfig};
use crate::internal::logger::{Fields, Level, Logger};

const LEVELS: [&str; 4] = ["error", "warn", "info", "debug"];

pub fn build_cli() -> Command {
    // Leak the version string to get a 'static lifetime
    let version: &'static str =
        Box::leak(crate::internal::config::get_version_info().into_boxed_str());

    Command::new("sinklog")
        .version(version)
        .about("Structured logging to the console and, in production, to log files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .help("Path to a config file (keys: log_level, node_env, logs_dir, log_color)"),
        )
        .arg(
            Arg::new("level")
                .long("level")
                .global(true)
                .value_parser(LEVELS)
                .help("Global minimum level, overrides LOG_LEVEL"),
        )
        .arg(
            Arg::new("env")
                .long("env")
                .global(true)
                .help("Deployment mode, overrides NODE_ENV (production enables log files)"),
        )
        .arg(
            Arg::new("logs-dir")
                .long("logs-dir")
                .global(true)
                .help("Directory for error.log and combined.log, overrides LOGS_DIR"),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Disable colored console output"),
        )
        .subcommand(
            Command::new("emit")
                .about("Emit a single record")
                .arg(
                    Arg::new("record-level")
                        .required(true)
                        .value_parser(LEVELS)
                        .help("Record level (error|warn|info|debug)"),
                )
                .arg(Arg::new("message").required(true).help("Message text"))
                .arg(
                    Arg::new("field")
                        .long("field")
                        .short('f')
                        .action(ArgAction::Append)
                        .help("Structured field as key=value (repeatable)"),
                ),
        )
        .subcommand(
            Command::new("pipe")
                .about("Emit every non-empty line read from stdin")
                .arg(
                    Arg::new("record-level")
                        .long("as")
                        .value_name("LEVEL")
                        .value_parser(LEVELS)
                        .default_value("info")
                        .help("Level for each line"),
                ),
        )
        .subcommand(Command::new("show-config").about("Print the resolved configuration"))
}

/// Load configuration from file and environment, then apply command-line overrides
pub fn parse_config(matches: &ArgMatches) -> anyhow::Result<LoggingConfig> {
    let file = matches.get_one::<String>("config").map(Path::new);
    let config = LoggingConfig::load_with_file(file).context("Failed to load logging configuration")?;
    apply_overrides(matches, config)
}

pub fn apply_overrides(
    matches: &ArgMatches,
    mut config: LoggingConfig,
) -> anyhow::Result<LoggingConfig> {
    if let Some(level) = matches.get_one::<String>("level") {
        config.level = level.parse()?;
    }

    if let Some(mode) = matches.get_one::<String>("env") {
        config.mode = DeploymentMode::from_env_value(mode);
    }

    if let Some(dir) = matches.get_one::<String>("logs-dir") {
        config.logs_dir = PathBuf::from(dir);
    }

    if matches.get_flag("no-color") {
        config.color = false;
    }

    Ok(config)
}

/// Collect `-f key=value` arguments
pub fn parse_fields(matches: &ArgMatches) -> anyhow::Result<Fields> {
    let mut fields = Fields::new();
    if let Some(pairs) = matches.get_many::<String>("field") {
        for pair in pairs {
            let (key, value) = Fields::parse_pair(pair)?;
            fields.insert(key, value);
        }
    }
    Ok(fields)
}

fn record_level(matches: &ArgMatches) -> anyhow::Result<Level> {
    let level = matches
        .get_one::<String>("record-level")
        .map(String::as_str)
        .unwrap_or("info");
    Ok(level.parse()?)
}

/// Execute the selected subcommand against `logger`
pub fn run_command(
    matches: &ArgMatches,
    logger: &Logger,
    config: &LoggingConfig,
) -> anyhow::Result<()> {
    match matches.subcommand() {
        Some(("emit", sub)) => {
            let level = record_level(sub)?;
            let message = sub
                .get_one::<String>("message")
                .map(String::as_str)
                .unwrap_or_default();
            let fields = parse_fields(sub)?;
            logger.emit(level, message, Some(&fields));
        }
        Some(("pipe", sub)) => {
            let level = record_level(sub)?;
            let count = pipe_lines(io::stdin().lock(), logger, level)?;
            debug!("Forwarded {} lines from stdin", count);
        }
        Some(("show-config", _)) => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        _ => anyhow::bail!("no command given"),
    }
    Ok(())
}

/// Emit each non-empty line of `input` at `level`, returning how many were emitted.
/// Invalid UTF-8 is replaced rather than ending the stream.
pub fn pipe_lines<R: BufRead>(mut input: R, logger: &Logger, level: Level) -> anyhow::Result<usize> {
    let mut count = 0;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = input
            .read_until(b'\n', &mut buf)
            .context("Failed to read from stdin")?;
        if read == 0 {
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            continue;
        }
        logger.emit(level, line, None);
        count += 1;
    }
    Ok(count)
}
