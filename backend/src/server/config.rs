//! Server settings loaded via OrthoConfig.
//!
//! Values layer as defaults, then a configuration file, then `DASHBOARD_*`
//! environment variables, then command-line flags.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Configuration for the HTTP server and its user store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DASHBOARD")]
pub struct ServerSettings {
    /// Interface to bind; defaults to all interfaces.
    pub host: Option<IpAddr>,
    /// Port to bind; defaults to 5000.
    pub port: Option<u16>,
    /// PostgreSQL connection string. Without one, users live in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

impl ServerSettings {
    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool size for the database adapter.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("dashboard-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_bind_all_interfaces_on_5000_in_memory() {
        let _guard = lock_env([
            ("DASHBOARD_HOST", None::<String>),
            ("DASHBOARD_PORT", None::<String>),
            ("DASHBOARD_DATABASE_URL", None::<String>),
            ("DASHBOARD_DB_MAX_CONNECTIONS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), "0.0.0.0:5000".parse().expect("addr"));
        assert_eq!(settings.database_url(), None);
        assert_eq!(settings.db_max_connections(), DEFAULT_DB_MAX_CONNECTIONS);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("DASHBOARD_HOST", Some("127.0.0.1".to_owned())),
            ("DASHBOARD_PORT", Some("8088".to_owned())),
            (
                "DASHBOARD_DATABASE_URL",
                Some("postgres://localhost/dashboard".to_owned()),
            ),
            ("DASHBOARD_DB_MAX_CONNECTIONS", Some("4".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), "127.0.0.1:8088".parse().expect("addr"));
        assert_eq!(
            settings.database_url(),
            Some("postgres://localhost/dashboard")
        );
        assert_eq!(settings.db_max_connections(), 4);
    }

    #[rstest]
    fn blank_database_url_means_in_memory() {
        let _guard = lock_env([("DASHBOARD_DATABASE_URL", Some("  ".to_owned()))]);

        assert_eq!(load_from_empty_args().database_url(), None);
    }
}
