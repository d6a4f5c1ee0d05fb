//! Configuration management for the address book assistant.
//!
//! This module handles loading and validating configuration from environment
//! variables, with an optional `.env` file in the working directory.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::path::PathBuf;

/// File name of the book inside the home directory when no path is configured.
pub const DEFAULT_BOOK_FILE: &str = "ab_data.json";

/// Configuration for the assistant.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the address book is loaded from and saved to
    pub book_path: PathBuf,

    /// Window used by the `birthdays` command, in days (default: 7)
    pub birthday_window_days: u32,

    /// Log level used when `RUST_LOG` is not set (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `ASSISTANT_X_BOOK_PATH`: data file (default: `~/ab_data.json`)
    /// - `ASSISTANT_X_BIRTHDAY_WINDOW_DAYS`: window for `birthdays` (default: 7)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // Try to load .env file if it exists (but don't fail if it doesn't)
        let _ = dotenvy::dotenv();

        let book_path = match env::var("ASSISTANT_X_BOOK_PATH") {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            Ok(_) => {
                return Err(ConfigError::InvalidValue {
                    var: "ASSISTANT_X_BOOK_PATH".to_string(),
                    reason: "Cannot be empty".to_string(),
                })
            }
            Err(_) => Self::default_book_path().ok_or(ConfigError::MissingHome)?,
        };

        let birthday_window_days = Self::parse_env_u32("ASSISTANT_X_BIRTHDAY_WINDOW_DAYS", 7)?;
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            book_path,
            birthday_window_days,
            log_level,
        })
    }

    /// `~/ab_data.json`, if a home directory is known.
    pub fn default_book_path() -> Option<PathBuf> {
        env::var_os("HOME")
            .or_else(|| env::var_os("USERPROFILE"))
            .filter(|home| !home.is_empty())
            .map(|home| PathBuf::from(home).join(DEFAULT_BOOK_FILE))
    }

    /// Parse an environment variable as u32 with a default value.
    fn parse_env_u32(var_name: &str, default: u32) -> ConfigResult<u32> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u32>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            book_path: PathBuf::from(DEFAULT_BOOK_FILE),
            birthday_window_days: 7,
            log_level: "error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    // Helper to set env vars for a test and restore the previous values
    struct EnvGuard {
        vars: Vec<(String, Option<std::ffi::OsString>)>,
    }

    impl EnvGuard {
        fn new() -> Self {
            EnvGuard { vars: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            self.vars.push((key.to_string(), env::var_os(key)));
            env::set_var(key, value);
        }

        fn unset(&mut self, key: &str) {
            self.vars.push((key.to_string(), env::var_os(key)));
            env::remove_var(key);
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (var, previous) in self.vars.iter().rev() {
                match previous {
                    Some(value) => env::set_var(var, value),
                    None => env::remove_var(var),
                }
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.birthday_window_days, 7);
        assert_eq!(config.log_level, "error");
        assert_eq!(config.book_path, PathBuf::from(DEFAULT_BOOK_FILE));
    }

    #[test]
    #[serial]
    fn test_config_from_env_valid() {
        let mut guard = EnvGuard::new();
        guard.set("ASSISTANT_X_BOOK_PATH", "/tmp/contacts.json");
        guard.set("ASSISTANT_X_BIRTHDAY_WINDOW_DAYS", "14");

        let config = Config::from_env().unwrap();
        assert_eq!(config.book_path, PathBuf::from("/tmp/contacts.json"));
        assert_eq!(config.birthday_window_days, 14);
    }

    #[test]
    #[serial]
    fn test_config_default_path_under_home() {
        let mut guard = EnvGuard::new();
        guard.set("HOME", "/home/tester");
        guard.unset("ASSISTANT_X_BOOK_PATH");

        let config = Config::from_env().unwrap();
        assert_eq!(
            config.book_path,
            PathBuf::from("/home/tester").join(DEFAULT_BOOK_FILE)
        );
    }

    #[test]
    #[serial]
    fn test_config_empty_book_path() {
        let mut guard = EnvGuard::new();
        guard.set("ASSISTANT_X_BOOK_PATH", "  ");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => {
                assert_eq!(var, "ASSISTANT_X_BOOK_PATH");
            }
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_invalid_window() {
        let mut guard = EnvGuard::new();
        guard.set("ASSISTANT_X_BOOK_PATH", "/tmp/contacts.json");
        guard.set("ASSISTANT_X_BIRTHDAY_WINDOW_DAYS", "-3");

        let result = Config::from_env();
        assert!(
            matches!(result, Err(ConfigError::InvalidValue { ref var, .. }) if var == "ASSISTANT_X_BIRTHDAY_WINDOW_DAYS"),
            "Config should fail with negative window, got: {:?}",
            result
        );
    }

    #[test]
    #[serial]
    fn test_parse_env_u32() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_U32", "42");

        assert_eq!(Config::parse_env_u32("TEST_U32", 10).unwrap(), 42);
        assert_eq!(Config::parse_env_u32("NONEXISTENT_U32", 10).unwrap(), 10);
    }
}
