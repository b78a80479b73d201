//! Command-line interface parsing for the APOD viewer
//!
//! This module handles parsing of CLI arguments using clap, including the
//! --date flag for fetching a specific day on startup and the --cache-file
//! flag for overriding the history file location.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use thiserror::Error;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The date argument was not in YYYY-MM-DD format
    #[error("Invalid date: '{0}'. Expected YYYY-MM-DD, e.g. 2024-01-01")]
    InvalidDate(String),
}

/// APOD viewer - Browse NASA's Astronomy Picture of the Day from the terminal
#[derive(Parser, Debug)]
#[command(name = "apodview")]
#[command(about = "NASA Astronomy Picture of the Day viewer with a local CSV history")]
#[command(version)]
pub struct Cli {
    /// Fetch this date immediately on startup
    ///
    /// Examples:
    ///   apodview --date 2024-01-01   # Open with that day's picture loaded
    ///
    /// Without this flag the viewer opens on today's date with nothing fetched.
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<String>,

    /// Path of the CSV history file
    ///
    /// Defaults to the platform data directory
    /// (~/.local/share/apodview/apod_history.csv on Linux).
    #[arg(long, value_name = "PATH")]
    pub cache_file: Option<PathBuf>,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    /// Date to preselect and fetch immediately (if specified)
    pub initial_date: Option<NaiveDate>,
    /// History file override (if specified)
    pub cache_file: Option<PathBuf>,
}

/// Parses a date string argument into a NaiveDate.
///
/// Only the format is checked here; whether the service has an entry for the
/// date is left to the fetch itself.
///
/// # Arguments
/// * `s` - The date string from CLI
///
/// # Returns
/// * `Ok(NaiveDate)` if the string is a valid YYYY-MM-DD date
/// * `Err(CliError::InvalidDate)` otherwise
pub fn parse_date_arg(s: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| CliError::InvalidDate(s.to_string()))
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Arguments
    /// * `cli` - The parsed CLI struct
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if an invalid date was specified
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let initial_date = match &cli.date {
            None => None,
            Some(date_str) => Some(parse_date_arg(date_str)?),
        };

        Ok(StartupConfig {
            initial_date,
            cache_file: cli.cache_file.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_arg_valid() {
        let date = parse_date_arg("2024-01-01").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_parse_date_arg_rejects_wrong_format() {
        assert!(parse_date_arg("01/01/2024").is_err());
        assert!(parse_date_arg("2024-1-1x").is_err());
        assert!(parse_date_arg("yesterday").is_err());
    }

    #[test]
    fn test_parse_date_arg_rejects_impossible_date() {
        let result = parse_date_arg("2024-02-31");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Invalid date"));
        assert!(err.to_string().contains("2024-02-31"));
    }

    #[test]
    fn test_startup_config_default() {
        let config = StartupConfig::default();
        assert!(config.initial_date.is_none());
        assert!(config.cache_file.is_none());
    }

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["apodview"]);
        assert!(cli.date.is_none());
        assert!(cli.cache_file.is_none());
    }

    #[test]
    fn test_cli_parse_date_flag() {
        let cli = Cli::parse_from(["apodview", "--date", "2024-01-01"]);
        assert_eq!(cli.date.as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn test_cli_parse_cache_file_flag() {
        let cli = Cli::parse_from(["apodview", "--cache-file", "/tmp/history.csv"]);
        assert_eq!(cli.cache_file, Some(PathBuf::from("/tmp/history.csv")));
    }

    #[test]
    fn test_startup_config_from_cli_no_flags() {
        let cli = Cli::parse_from(["apodview"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert!(config.initial_date.is_none());
        assert!(config.cache_file.is_none());
    }

    #[test]
    fn test_startup_config_from_cli_with_date() {
        let cli = Cli::parse_from(["apodview", "--date", "2023-06-16"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(
            config.initial_date,
            Some(NaiveDate::from_ymd_opt(2023, 6, 16).unwrap())
        );
    }

    #[test]
    fn test_startup_config_from_cli_invalid_date() {
        let cli = Cli::parse_from(["apodview", "--date", "not-a-date"]);
        let result = StartupConfig::from_cli(&cli);
        assert!(result.is_err());
    }
}
