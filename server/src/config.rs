//! Application configuration loaded via OrthoConfig.
//!
//! Values are merged from command-line arguments, `FOLIO_`-prefixed
//! environment variables, and configuration files, in that order of
//! precedence.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Configuration values controlling the server process.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FOLIO")]
pub struct AppConfig {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string.
    ///
    /// When absent the server falls back to in-memory storage, which is
    /// intended for local development and tests only.
    pub database_url: Option<String>,
}

impl AppConfig {
    /// Return the configured bind address, falling back to the default.
    ///
    /// # Errors
    /// Fails when the configured value is not a valid socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for application configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> AppConfig {
        AppConfig::load_from_iter([OsString::from("folio-server")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("FOLIO_BIND_ADDR", None::<String>),
            ("FOLIO_DATABASE_URL", None::<String>),
        ]);

        let config = load_from_empty_args();
        assert_eq!(
            config.bind_addr().expect("default address parses"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("valid literal")
        );
        assert!(config.database_url.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("FOLIO_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            (
                "FOLIO_DATABASE_URL",
                Some("postgres://folio@localhost/folio".to_owned()),
            ),
        ]);

        let config = load_from_empty_args();
        assert_eq!(
            config.bind_addr().expect("override parses"),
            "127.0.0.1:9090".parse::<SocketAddr>().expect("valid literal")
        );
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://folio@localhost/folio")
        );
    }

    #[rstest]
    fn malformed_bind_addr_is_reported() {
        let _guard = lock_env([
            ("FOLIO_BIND_ADDR", Some("not-an-address".to_owned())),
            ("FOLIO_DATABASE_URL", None::<String>),
        ]);

        let config = load_from_empty_args();
        assert!(config.bind_addr().is_err());
    }
}
