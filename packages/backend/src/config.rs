use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_JWT_EXPIRES_IN: &str = "3h";
const DEFAULT_BCRYPT_COST: u32 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub database_url: String,
    pub jwt: JwtConfig,
    pub bcrypt_cost: u32,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: Option<String>,
    pub expires_in: String,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let host = std::env::var("HOST")
            .ok()
            .and_then(|value| value.parse::<IpAddr>().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(default_database_url);

        let secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|value| !value.is_empty());
        let expires_in = std::env::var("JWT_EXPIRES_IN")
            .unwrap_or_else(|_| DEFAULT_JWT_EXPIRES_IN.to_string());

        let bcrypt_cost = std::env::var("BCRYPT_COST")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .filter(|cost| (4..=31).contains(cost))
            .unwrap_or(DEFAULT_BCRYPT_COST);

        Self {
            host,
            port,
            log_level,
            database_url,
            jwt: JwtConfig { secret, expires_in },
            bcrypt_cost,
        }
    }

    /// Settings for tests and embedded use: loopback, ephemeral port, cheap hashing.
    pub fn for_database(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            log_level: "info".to_string(),
            database_url: database_url.into(),
            jwt: JwtConfig {
                secret: Some(jwt_secret.into()),
                expires_in: DEFAULT_JWT_EXPIRES_IN.to_string(),
            },
            bcrypt_cost: 4,
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vocab-deck")
        .join("data.db")
}

fn default_database_url() -> String {
    format!("sqlite:{}?mode=rwc", default_database_path().display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_database_url_points_at_sqlite_file() {
        let url = default_database_url();
        assert!(url.starts_with("sqlite:"));
        assert!(url.ends_with("data.db?mode=rwc"));
    }

    #[test]
    fn test_config_binds_loopback() {
        let config = Config::for_database("sqlite::memory:", "secret");
        assert_eq!(config.bind_addr().ip(), IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(config.jwt.secret.as_deref(), Some("secret"));
    }
}
