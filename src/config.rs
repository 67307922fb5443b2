use chrono::NaiveDate;
use std::fmt;
use std::net::SocketAddr;

pub const ADDR_VAR: &str = "STUDY_PLANNER_HTTP_ADDR";
pub const PORT_VAR: &str = "PORT";
pub const SEED_VAR: &str = "STUDY_PLANNER_SEED";
pub const TODAY_VAR: &str = "STUDY_PLANNER_TODAY";

const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    key: &'static str,
    value: String,
    expected: &'static str,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} has invalid value '{}' (expected {})",
            self.key, self.value, self.expected
        )
    }
}

impl std::error::Error for ConfigError {}

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// Fixed RNG seed for every request; fresh entropy per request when unset.
    pub seed: Option<u64>,
    /// Pinned planning date; the local date when unset.
    pub today: Option<NaiveDate>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            seed: None,
            today: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ADDR_VAR) {
            config.addr = parse_value(ADDR_VAR, &raw, "an address like 0.0.0.0:3000")?;
        } else if let Some(raw) = lookup(PORT_VAR) {
            let port: u16 = parse_value(PORT_VAR, &raw, "a port number")?;
            config.addr.set_port(port);
        }

        if let Some(raw) = lookup(SEED_VAR) {
            config.seed = Some(parse_value(SEED_VAR, &raw, "an unsigned integer")?);
        }

        if let Some(raw) = lookup(TODAY_VAR) {
            let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| ConfigError {
                key: TODAY_VAR,
                value: raw.clone(),
                expected: "a date like 2025-01-31",
            })?;
            config.today = Some(date);
        }

        Ok(config)
    }
}

fn parse_value<T: std::str::FromStr>(
    key: &'static str,
    raw: &str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError {
        key,
        value: raw.to_string(),
        expected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_listen_on_port_3000() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.seed, None);
        assert_eq!(config.today, None);
    }

    #[test]
    fn port_applies_without_full_address() {
        let config = config_from(&[("PORT", "8081")]).unwrap();
        assert_eq!(config.addr.to_string(), "0.0.0.0:8081");
    }

    #[test]
    fn full_address_wins_over_port() {
        let config = config_from(&[
            ("STUDY_PLANNER_HTTP_ADDR", "127.0.0.1:9000"),
            ("PORT", "8081"),
        ])
        .unwrap();
        assert_eq!(config.addr.to_string(), "127.0.0.1:9000");
    }

    #[test]
    fn seed_and_today_are_parsed() {
        let config = config_from(&[
            ("STUDY_PLANNER_SEED", "17"),
            ("STUDY_PLANNER_TODAY", "2025-02-03"),
        ])
        .unwrap();
        assert_eq!(config.seed, Some(17));
        assert_eq!(config.today, NaiveDate::from_ymd_opt(2025, 2, 3));
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = config_from(&[("STUDY_PLANNER_SEED", "lots")]).unwrap_err();
        assert!(err.to_string().contains("STUDY_PLANNER_SEED"));
        assert!(config_from(&[("PORT", "99999")]).is_err());
        assert!(config_from(&[("STUDY_PLANNER_TODAY", "tomorrow")]).is_err());
    }
}
