//! Logger initialization.
//!
//! Logs go to stderr; stdout is reserved for the report.

use std::io::Write;

use colored::*;
use log::{Level, LevelFilter};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Initializes `env_logger` with the given level and line format.
///
/// `RUST_LOG` is read first and `level` is applied on top of it, so
/// `RUST_LOG=hickory_resolver=debug` still works alongside `--log-level`.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already set.
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("hyper_util", LevelFilter::Info);
    // hickory logs every NXDOMAIN from a blocklist zone; those are "not listed", not failures
    builder.filter_module("hickory_proto", LevelFilter::Error);
    builder.filter_module("hickory_resolver", LevelFilter::Warn);
    builder.filter_module("reputation_check", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                let line = json_line(
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    &record.args().to_string(),
                );
                writeln!(buf, "{line}")
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let line = plain_line(record.level(), record.target(), &record.args().to_string());
                writeln!(buf, "{line}")
            });
        }
    }

    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

/// One JSON object per record.
fn json_line(ts_millis: i64, level: Level, target: &str, msg: &str) -> String {
    serde_json::json!({
        "ts": ts_millis,
        "level": level.as_str(),
        "target": target,
        "msg": msg,
    })
    .to_string()
}

/// `LEVEL target: message`, with the level colored when colors are enabled.
fn plain_line(level: Level, target: &str, msg: &str) -> String {
    let tag = format!("{:<5}", level.as_str());
    let tag = match level {
        Level::Error => tag.red().bold(),
        Level::Warn => tag.yellow(),
        Level::Info => tag.green(),
        Level::Debug => tag.blue(),
        Level::Trace => tag.purple(),
    };
    format!("{} {}: {}", tag, target.cyan(), msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_line_escapes_message() {
        let line = json_line(1_700_000_000_000, Level::Warn, "reputation_check::dns", "say \"hi\"");
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["ts"], 1_700_000_000_000_i64);
        assert_eq!(value["level"], "WARN");
        assert_eq!(value["target"], "reputation_check::dns");
        assert_eq!(value["msg"], "say \"hi\"");
    }

    #[test]
    fn test_plain_line_without_colors() {
        colored::control::set_override(false);
        assert_eq!(
            plain_line(Level::Info, "reputation_check", "checking 17 services"),
            "INFO  reputation_check: checking 17 services"
        );
    }

    #[test]
    fn test_second_init_reports_logger_error() {
        // Only one logger per process; whichever call loses must say so
        let _ = init_logger_with(LevelFilter::Info, LogFormat::Json);
        let result = init_logger_with(LevelFilter::Debug, LogFormat::Plain);
        assert!(matches!(result, Err(InitializationError::LoggerError(_))));
    }
}
