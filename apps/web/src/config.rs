//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use yatube_core::pagination::DEFAULT_PER_PAGE;
use yatube_infra::{DatabaseConfig, JwtConfig};

const DEFAULT_SITE_URL: &str = "http://127.0.0.1:8080";

/// Settings handlers read at request time.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Posts per listing page.
    pub posts_per_page: u64,
    /// Mark the session cookie `Secure`.
    pub secure_cookies: bool,
    /// Scheme and host that links in outgoing mail point at, without a
    /// trailing slash.
    pub site_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            posts_per_page: DEFAULT_PER_PAGE,
            secure_cookies: false,
            site_url: DEFAULT_SITE_URL.to_string(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub settings: Settings,
    /// JSON file with groups to load at startup.
    pub fixtures_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = parse_env("PORT").unwrap_or(8080);

        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parse_env("DB_MAX_CONNECTIONS").unwrap_or(100),
            min_connections: parse_env("DB_MIN_CONNECTIONS").unwrap_or(10),
        });

        let settings = Settings {
            posts_per_page: parse_env("POSTS_PER_PAGE")
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_PER_PAGE),
            secure_cookies: env::var("SESSION_COOKIE_SECURE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            site_url: env::var("SITE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| format!("http://{host}:{port}")),
        };

        Self {
            host,
            port,
            database,
            jwt: JwtConfig::from_env(),
            settings,
            fixtures_path: env::var("FIXTURES_PATH").ok().map(PathBuf::from),
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}
