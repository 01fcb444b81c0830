//! Configuration management for the Restaurant Desk server.
//!
//! Loads and validates configuration from environment variables. A `.env` file
//! is read with `dotenvy`, which does not write to stdout (reserved for MCP).

use crate::domain::{lookup_phone_metadata, BusinessHours, PrepPolicy};
use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Configuration for the Restaurant Desk server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Opening hour, inclusive (default: 6)
    pub open_hour: u32,

    /// Closing hour, inclusive (default: 23)
    pub close_hour: u32,

    /// Minutes before service that prep should start (default: 30)
    pub prep_lead_time_minutes: u32,

    /// Minutes that must remain between the end of prep and service (default: 15)
    pub prep_safety_buffer_minutes: u32,

    /// Country code used when a form does not send one (default: "+1-US")
    pub default_country_code: String,

    /// Smallest party accepted (default: 1)
    pub min_party_size: u32,

    /// Largest party accepted (default: 20)
    pub max_party_size: u32,

    /// Populate stores with demo data at startup (default: true)
    pub seed_demo_data: bool,

    /// Log level used when RUST_LOG is unset (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `DESK_OPEN_HOUR` / `DESK_CLOSE_HOUR`: business hours (default: 6 / 23)
    /// - `PREP_LEAD_TIME_MINUTES`: prep lead time (default: 30)
    /// - `PREP_SAFETY_BUFFER_MINUTES`: safety buffer (default: 15)
    /// - `DEFAULT_PHONE_COUNTRY`: fallback country code (default: "+1-US")
    /// - `MIN_PARTY_SIZE` / `MAX_PARTY_SIZE`: party bounds (default: 1 / 20)
    /// - `SEED_DEMO_DATA`: load demo records (default: true)
    /// - `LOG_LEVEL`: logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        Self::check_dotenv(dotenvy::dotenv())?;

        let defaults = Config::default();

        let open_hour = Self::parse_env_u32("DESK_OPEN_HOUR", defaults.open_hour)?;
        let close_hour = Self::parse_env_u32("DESK_CLOSE_HOUR", defaults.close_hour)?;

        if open_hour > 23 {
            return Err(ConfigError::InvalidValue {
                var: "DESK_OPEN_HOUR".to_string(),
                reason: "Must be between 0 and 23".to_string(),
            });
        }
        if close_hour > 23 {
            return Err(ConfigError::InvalidValue {
                var: "DESK_CLOSE_HOUR".to_string(),
                reason: "Must be between 0 and 23".to_string(),
            });
        }
        if open_hour >= close_hour {
            return Err(ConfigError::InvalidValue {
                var: "DESK_CLOSE_HOUR".to_string(),
                reason: format!("Must be later than DESK_OPEN_HOUR ({})", open_hour),
            });
        }

        let prep_lead_time_minutes =
            Self::parse_env_u32("PREP_LEAD_TIME_MINUTES", defaults.prep_lead_time_minutes)?;
        let prep_safety_buffer_minutes = Self::parse_env_u32(
            "PREP_SAFETY_BUFFER_MINUTES",
            defaults.prep_safety_buffer_minutes,
        )?;

        let min_party_size = Self::parse_env_u32("MIN_PARTY_SIZE", defaults.min_party_size)?;
        let max_party_size = Self::parse_env_u32("MAX_PARTY_SIZE", defaults.max_party_size)?;

        if min_party_size == 0 {
            return Err(ConfigError::InvalidValue {
                var: "MIN_PARTY_SIZE".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }
        if max_party_size < min_party_size {
            return Err(ConfigError::InvalidValue {
                var: "MAX_PARTY_SIZE".to_string(),
                reason: format!("Must be at least MIN_PARTY_SIZE ({})", min_party_size),
            });
        }

        let default_country_code =
            env::var("DEFAULT_PHONE_COUNTRY").unwrap_or(defaults.default_country_code);
        if lookup_phone_metadata(&default_country_code).used_fallback {
            return Err(ConfigError::InvalidValue {
                var: "DEFAULT_PHONE_COUNTRY".to_string(),
                reason: format!("Unsupported country code: {}", default_country_code),
            });
        }

        let seed_demo_data = Self::parse_env_bool("SEED_DEMO_DATA", defaults.seed_demo_data)?;
        let log_level = env::var("LOG_LEVEL").unwrap_or(defaults.log_level);

        Ok(Config {
            open_hour,
            close_hour,
            prep_lead_time_minutes,
            prep_safety_buffer_minutes,
            default_country_code,
            min_party_size,
            max_party_size,
            seed_demo_data,
            log_level,
        })
    }

    /// Business hours window.
    pub fn business_hours(&self) -> BusinessHours {
        BusinessHours::new(self.open_hour, self.close_hour)
    }

    /// Lead time and buffer for feasibility checks.
    pub fn prep_policy(&self) -> PrepPolicy {
        PrepPolicy::new(self.prep_lead_time_minutes, self.prep_safety_buffer_minutes)
    }

    /// A missing .env file is fine; one that fails to parse is not.
    fn check_dotenv<T>(result: Result<T, dotenvy::Error>) -> ConfigResult<()> {
        match result {
            Ok(_) => Ok(()),
            Err(e) if e.not_found() => Ok(()),
            Err(e) => Err(ConfigError::DotenvError(e.to_string())),
        }
    }

    /// Parse an environment variable as u32 with a default value.
    fn parse_env_u32(var_name: &str, default: u32) -> ConfigResult<u32> {
        match env::var(var_name) {
            Ok(val) => val.trim().parse::<u32>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as a boolean flag with a default value.
    fn parse_env_bool(var_name: &str, default: bool) -> ConfigResult<bool> {
        match env::var(var_name) {
            Ok(val) => match val.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be true or false, got: {}", val),
                }),
            },
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            open_hour: 6,
            close_hour: 23,
            prep_lead_time_minutes: 30,
            prep_safety_buffer_minutes: 15,
            default_country_code: "+1-US".to_string(),
            min_party_size: 1,
            max_party_size: 20,
            seed_demo_data: true,
            log_level: "error".to_string(),
        }
    }
}
