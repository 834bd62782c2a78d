//! Process configuration read from the environment.
//!
//! A `.env` file in the working directory is loaded first with `dotenvy`, so
//! values there act as defaults that real environment variables override.

use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

/// Errors raised while reading configuration. All of them are fatal at startup.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Deployment environment. Only `Development` exposes the OpenAPI document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(()),
        }
    }
}

/// The configuration parameters for the application.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Connection string for the SQLite database (`DATABASE_URL`).
    pub database_url: String,
    /// Address the HTTP listener binds to (`BIND_ADDR`).
    pub bind_addr: SocketAddr,
    /// `APP_ENV`
    pub environment: Environment,
    /// The single origin allowed by the CORS policy (`CORS_ORIGIN`).
    pub cors_origin: String,
    /// Capacity of the mediator's message queue (`MEDIATOR_BUFFER`).
    pub mediator_buffer: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: "sqlite://activities.db".to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            environment: Environment::Production,
            cors_origin: "http://localhost:3000".to_string(),
            mediator_buffer: 32,
        }
    }
}

impl Settings {
    /// Reads settings from `.env` and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`, falling back to [`Settings::default`]
    /// for every variable that is unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            bind_addr: parse(&lookup, "BIND_ADDR")?.unwrap_or(defaults.bind_addr),
            environment: parse(&lookup, "APP_ENV")?.unwrap_or(defaults.environment),
            cors_origin: lookup("CORS_ORIGIN").unwrap_or(defaults.cors_origin),
            mediator_buffer: parse(&lookup, "MEDIATOR_BUFFER")?
                .filter(|n: &usize| *n > 0)
                .unwrap_or(defaults.mediator_buffer),
        })
    }
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
