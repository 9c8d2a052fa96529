use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use connectors::{
    jira::config::JiraConfig,
    sql::postgres::config::{DEFAULT_PORT, PgConfig, PgSslMode},
};
use engine_core::settings::SyncSettings;

use crate::error::CliError;

const DEFAULT_ENV_FILE: &str = ".env";

/// Environment variable manager that loads from system and .env files.
///
/// Variables already present in the process environment take precedence
/// over values read from a file.
#[derive(Debug, Clone)]
pub struct EnvManager {
    vars: HashMap<String, String>,
}

impl EnvManager {
    pub fn new() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Process environment plus `path`, or `./.env` when no path is given
    /// and that file exists.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let mut env = Self::new();
        match path {
            Some(path) => env.load_from_file(path)?,
            None if Path::new(DEFAULT_ENV_FILE).is_file() => {
                env.load_from_file(DEFAULT_ENV_FILE)?
            }
            None => {}
        }
        Ok(env)
    }

    /// Load variables from a .env file
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), CliError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read env file {}: {}", path.display(), e))
        })?;

        self.parse_env_content(&content)?;
        Ok(())
    }

    /// Non-empty value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn require(&self, key: &str) -> Result<&str, CliError> {
        self.get(key)
            .ok_or_else(|| CliError::Config(format!("Missing required variable {key}")))
    }

    /// Parses `key` when set, otherwise returns `default`.
    pub fn parse_or<T>(&self, key: &str, default: T) -> Result<T, CliError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(key) {
            Some(raw) => raw
                .parse()
                .map_err(|e| CliError::Config(format!("Invalid value for {key}: {e}"))),
            None => Ok(default),
        }
    }

    pub fn jira_config(&self) -> Result<JiraConfig, CliError> {
        Ok(JiraConfig {
            base_url: self.require("JIRA_URL")?.to_string(),
            username: self.require("JIRA_USERNAME")?.to_string(),
            api_token: self.require("JIRA_API_TOKEN")?.to_string(),
        })
    }

    pub fn pg_config(&self) -> Result<PgConfig, CliError> {
        Ok(PgConfig {
            host: self.require("DB_HOST")?.to_string(),
            port: self.parse_or("DB_PORT", DEFAULT_PORT)?,
            dbname: self.require("DB_NAME")?.to_string(),
            user: self.require("DB_USER")?.to_string(),
            password: self.require("DB_PASSWORD")?.to_string(),
            ssl_mode: self.parse_or("DB_SSLMODE", PgSslMode::default())?,
        })
    }

    pub fn sync_settings(&self) -> Result<SyncSettings, CliError> {
        let defaults = SyncSettings::default();
        let delay_ms = self.parse_or("SYNC_DELAY_MS", defaults.issue_delay.as_millis() as u64)?;
        let lookback_days = self.parse_or("SYNC_LOOKBACK_DAYS", defaults.lookback_days)?;
        if lookback_days < 0 {
            return Err(CliError::Config(format!(
                "SYNC_LOOKBACK_DAYS must not be negative, got {lookback_days}"
            )));
        }

        Ok(SyncSettings {
            project: self.get("SYNC_PROJECT").map_or(defaults.project, str::to_string),
            table: self.get("SYNC_TABLE").map_or(defaults.table, str::to_string),
            issue_delay: Duration::from_millis(delay_ms),
            lookback_days,
            ..defaults
        })
    }

    fn parse_env_content(&mut self, content: &str) -> Result<(), CliError> {
        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let line = line.strip_prefix("export ").unwrap_or(line);

            // Parse KEY=VALUE format
            if let Some(eq_pos) = line.find('=') {
                let key = line[..eq_pos].trim();
                let value = line[eq_pos + 1..].trim();

                if key.is_empty() {
                    return Err(CliError::Config(format!(
                        "Invalid env file: empty key at line {}",
                        line_num + 1
                    )));
                }

                let value = Self::unquote_value(value);
                self.vars.entry(key.to_string()).or_insert(value);
            } else {
                return Err(CliError::Config(format!(
                    "Invalid env file: malformed line {} (expected KEY=VALUE)",
                    line_num + 1
                )));
            }
        }

        Ok(())
    }

    fn unquote_value(value: &str) -> String {
        let value = value.trim();

        for quote in ['"', '\''] {
            if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
                return value[1..value.len() - 1].to_string();
            }
        }

        value.to_string()
    }
}

impl Default for EnvManager {
    fn default() -> Self {
        Self::new()
    }
}
