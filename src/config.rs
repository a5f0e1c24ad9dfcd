//! Runtime configuration from process environment (and `.env` via dotenvy).

use crate::error::ConfigError;
use sqlx::postgres::PgConnectOptions;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

/// Deployment environment. Anything other than production exposes error diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    pub fn exposes_error_details(self) -> bool {
        self != Environment::Production
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err("expected development, test or production".into()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DbConfig {
    /// Full connection URL; when set it wins over the individual parts.
    pub url: Option<String>,
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub port: u16,
    pub pool_size: u32,
}

impl DbConfig {
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        match &self.url {
            Some(url) => PgConnectOptions::from_str(url).map_err(|e| ConfigError::Invalid {
                key: "DATABASE_URL",
                value: redact_url(url),
                reason: e.to_string(),
            }),
            None => {
                let opts = PgConnectOptions::new()
                    .host(&self.host)
                    .port(self.port)
                    .username(&self.user)
                    .database(&self.database);
                Ok(if self.password.is_empty() {
                    opts
                } else {
                    opts.password(&self.password)
                })
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub db: DbConfig,
    pub host: IpAddr,
    pub port: u16,
    pub environment: Environment,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let db = DbConfig {
            url: get("DATABASE_URL"),
            host: get("DB_HOST").unwrap_or_else(|| "localhost".into()),
            user: get("DB_USER").unwrap_or_else(|| "postgres".into()),
            password: lookup("DB_PASSWORD").unwrap_or_default(),
            database: get("DB_DATABASE").unwrap_or_else(|| "college_db".into()),
            port: parse_or("DB_PORT", get("DB_PORT"), 5432)?,
            pool_size: parse_or("DB_POOL_SIZE", get("DB_POOL_SIZE"), 10)?,
        };
        if db.pool_size == 0 {
            return Err(ConfigError::Invalid {
                key: "DB_POOL_SIZE",
                value: "0".into(),
                reason: "pool needs at least one connection".into(),
            });
        }
        let host = parse_or("SERVER_HOST", get("SERVER_HOST"), IpAddr::from([0, 0, 0, 0]))?;
        let port = parse_or("SERVER_PORT", get("SERVER_PORT"), 3000)?;
        let environment = match get("APP_ENV") {
            Some(v) => v.parse::<Environment>().map_err(|reason| ConfigError::Invalid {
                key: "APP_ENV",
                value: v.clone(),
                reason,
            })?,
            None => Environment::Development,
        };
        Ok(AppConfig {
            db,
            host,
            port,
            environment,
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(v) => v.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: v.clone(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

fn redact_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &url[..scheme_end], &url[at..])
        }
        _ => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = config_from(&[]).unwrap();
        assert_eq!(cfg.db.host, "localhost");
        assert_eq!(cfg.db.user, "postgres");
        assert_eq!(cfg.db.password, "");
        assert_eq!(cfg.db.database, "college_db");
        assert_eq!(cfg.db.port, 5432);
        assert_eq!(cfg.db.pool_size, 10);
        assert!(cfg.db.url.is_none());
        assert_eq!(cfg.listen_addr(), "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.environment, Environment::Development);
    }

    #[test]
    fn reads_overrides() {
        let cfg = config_from(&[
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6543"),
            ("DB_POOL_SIZE", "4"),
            ("SERVER_HOST", "127.0.0.1"),
            ("SERVER_PORT", "8080"),
            ("APP_ENV", "Production"),
        ])
        .unwrap();
        assert_eq!(cfg.db.host, "db.internal");
        assert_eq!(cfg.db.port, 6543);
        assert_eq!(cfg.db.pool_size, 4);
        assert_eq!(cfg.listen_addr(), "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.environment, Environment::Production);
        assert!(!cfg.environment.exposes_error_details());
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let cfg = config_from(&[("SERVER_PORT", ""), ("DB_HOST", "  ")]).unwrap();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.db.host, "localhost");
    }

    #[test]
    fn rejects_bad_port() {
        let err = config_from(&[("SERVER_PORT", "http")]).unwrap_err();
        assert!(err.to_string().contains("SERVER_PORT"));
    }

    #[test]
    fn rejects_unknown_environment() {
        let err = config_from(&[("APP_ENV", "staging")]).unwrap_err();
        assert!(err.to_string().contains("APP_ENV"));
    }

    #[test]
    fn rejects_empty_pool() {
        assert!(config_from(&[("DB_POOL_SIZE", "0")]).is_err());
    }

    #[test]
    fn database_url_wins_over_parts() {
        let cfg = config_from(&[
            ("DATABASE_URL", "postgres://app:secret@db:5433/school"),
            ("DB_HOST", "ignored"),
        ])
        .unwrap();
        let opts = cfg.db.connect_options().unwrap();
        assert_eq!(opts.get_host(), "db");
        assert_eq!(opts.get_port(), 5433);
        assert_eq!(opts.get_database(), Some("school"));
    }

    #[test]
    fn redacts_credentials() {
        assert_eq!(
            redact_url("postgres://app:secret@db/school"),
            "postgres://***@db/school"
        );
        assert_eq!(redact_url("postgres://db/school"), "postgres://db/school");
    }
}
