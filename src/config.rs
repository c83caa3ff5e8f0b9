use std::{env, net::SocketAddr};

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub listen_addr: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://planner.db".to_string());

        let database_max_connections: u32 = lookup("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid DATABASE_MAX_CONNECTIONS: {err}")))?;

        let listen_addr: SocketAddr = lookup("APP_LISTEN_ADDR")
            .unwrap_or_else(|| "127.0.0.1:3333".to_string())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid APP_LISTEN_ADDR: {err}")))?;

        Ok(Self {
            database_url,
            database_max_connections,
            listen_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.database_url, "sqlite://planner.db");
        assert_eq!(config.database_max_connections, 10);
        assert_eq!(config.listen_addr, "127.0.0.1:3333".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn values_are_read_from_lookup() {
        let config = config_from(&[
            ("DATABASE_URL", "sqlite:///tmp/trips.db"),
            ("DATABASE_MAX_CONNECTIONS", "3"),
            ("APP_LISTEN_ADDR", "0.0.0.0:8080"),
        ])
        .unwrap();
        assert_eq!(config.database_url, "sqlite:///tmp/trips.db");
        assert_eq!(config.database_max_connections, 3);
        assert_eq!(config.listen_addr.port(), 8080);
    }

    #[test]
    fn unparsable_listen_addr_is_a_config_error() {
        let err = config_from(&[("APP_LISTEN_ADDR", "localhost")]).unwrap_err();
        assert!(matches!(err, AppError::Config(ref m) if m.starts_with("invalid APP_LISTEN_ADDR")));
    }

    #[test]
    fn unparsable_max_connections_is_a_config_error() {
        let err = config_from(&[("DATABASE_MAX_CONNECTIONS", "many")]).unwrap_err();
        assert!(
            matches!(err, AppError::Config(ref m) if m.starts_with("invalid DATABASE_MAX_CONNECTIONS"))
        );
    }
}
