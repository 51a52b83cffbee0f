//! Logging initialization for snagger_app.
//!
//! Writes logs to `./snagger.log` in the current working directory.

use std::fs::File;
use std::path::PathBuf;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Destination for log output, chosen via `SNAGGER_LOG`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDestination {
    /// Write to ./snagger.log in current directory.
    File,
    /// Write to terminal (stdout).
    Terminal,
    /// Write to both file and terminal.
    Both,
}

/// Reads `SNAGGER_LOG` (`file` | `term`); anything else logs to both.
pub fn destination_from_env() -> LogDestination {
    match std::env::var("SNAGGER_LOG") {
        Ok(value) => parse_destination(&value),
        Err(_) => LogDestination::Both,
    }
}

fn parse_destination(value: &str) -> LogDestination {
    match value.trim().to_ascii_lowercase().as_str() {
        "file" => LogDestination::File,
        "term" | "terminal" => LogDestination::Terminal,
        _ => LogDestination::Both,
    }
}

/// Initialize the logger with the specified destination.
///
/// For `LogDestination::File` or `Both`, creates `./snagger.log` in the
/// current working directory.
pub fn initialize(destination: LogDestination) {
    let level = LevelFilter::Info;

    let config = build_config();

    let loggers: Vec<Box<dyn SharedLogger>> = match destination {
        LogDestination::File => {
            if let Some(file_logger) = create_file_logger(level, config) {
                vec![file_logger]
            } else {
                return;
            }
        }
        LogDestination::Terminal => {
            vec![TermLogger::new(
                level,
                config,
                TerminalMode::Mixed,
                ColorChoice::Auto,
            )]
        }
        LogDestination::Both => {
            let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
                level,
                config.clone(),
                TerminalMode::Mixed,
                ColorChoice::Auto,
            )];
            if let Some(file_logger) = create_file_logger(level, config) {
                loggers.push(file_logger);
            }
            loggers
        }
    };

    let _ = CombinedLogger::init(loggers);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(level: LevelFilter, config: Config) -> Option<Box<WriteLogger<File>>> {
    let log_path = PathBuf::from("./snagger.log");
    match File::create(&log_path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!(
                "Warning: Could not create log file at {:?}: {}",
                log_path, err
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_destination, LogDestination};

    #[test]
    fn destination_parses_known_values() {
        assert_eq!(parse_destination("file"), LogDestination::File);
        assert_eq!(parse_destination("term"), LogDestination::Terminal);
        assert_eq!(parse_destination("Terminal"), LogDestination::Terminal);
    }

    #[test]
    fn unknown_values_default_to_both() {
        assert_eq!(parse_destination(""), LogDestination::Both);
        assert_eq!(parse_destination("everything"), LogDestination::Both);
    }
}
