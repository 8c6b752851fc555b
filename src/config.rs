use std::env;
use std::str::FromStr;
use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::admin::registry::AdminRegistry;
use crate::services::cache_service::CacheService;

const SQLITE_DEV_URL: &str = "sqlite://db.sqlite3?mode=rwc";
const DEV_JWT_SECRET: &str = "dev-insecure-jwt-secret";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheBackend {
    Redis(String),
    Memory,
    Disabled,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub run_migrations: bool,
    pub cache_backend: CacheBackend,
    pub posts_per_page: u64,
    pub jwt_secret: String,
    pub jwt_expires_in: i64,
    pub admin_username: Option<String>,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    pub log_level: String,
    pub log_sql: bool,
    pub security_headers: bool,
    pub ssl_redirect: bool,
}

#[derive(Clone, axum::extract::FromRef)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub cache: CacheService,
    pub config: Arc<Config>,
    pub admin: Arc<AdminRegistry>,
}

impl Config {
    pub fn init() -> Result<Config, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Production and
    /// development differ only in their defaults and in which dev-only
    /// switches (`USE_SQLITE`, `DISABLE_CACHE`) are honoured.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = match get("APP_ENV").as_deref() {
            None | Some("development") | Some("dev") => Environment::Development,
            Some("production") | Some("prod") => Environment::Production,
            Some(other) => return Err(format!("APP_ENV must be development or production, got '{}'", other)),
        };
        let is_dev = environment == Environment::Development;

        let server_host = get("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let server_port = parse_or(&get, "PORT", 3000u16)?;

        let use_sqlite = is_dev && parse_bool_or(&get, "USE_SQLITE", false)?;
        let database_url = if use_sqlite {
            SQLITE_DEV_URL.to_string()
        } else {
            get("DATABASE_URL").ok_or("DATABASE_URL must be set (or USE_SQLITE=true in development)")?
        };
        let run_migrations = parse_bool_or(&get, "RUN_MIGRATIONS", true)?;

        let disable_cache = is_dev && parse_bool_or(&get, "DISABLE_CACHE", false)?;
        let cache_backend = match (disable_cache, get("REDIS_URL")) {
            (true, _) => CacheBackend::Disabled,
            (false, Some(url)) => CacheBackend::Redis(url),
            (false, None) => CacheBackend::Memory,
        };

        let posts_per_page = parse_or(&get, "POSTS_PER_PAGE", 10u64)?;
        if posts_per_page == 0 {
            return Err("POSTS_PER_PAGE must be at least 1".to_string());
        }

        let jwt_secret = match (get("JWT_SECRET"), environment) {
            (Some(secret), _) => secret,
            (None, Environment::Development) => DEV_JWT_SECRET.to_string(),
            (None, Environment::Production) => return Err("JWT_SECRET must be set in production".to_string()),
        };
        let jwt_expires_in = parse_or(&get, "JWT_EXPIRATION_MINUTES", 60i64)?;

        let log_level = get("LOG_LEVEL").unwrap_or_else(|| if is_dev { "debug" } else { "info" }.to_string());
        let log_sql = parse_bool_or(&get, "LOG_SQL", is_dev)?;
        let ssl_redirect = parse_bool_or(&get, "SECURE_SSL_REDIRECT", !is_dev)?;

        Ok(Config {
            environment,
            server_host,
            server_port,
            database_url,
            run_migrations,
            cache_backend,
            posts_per_page,
            jwt_secret,
            jwt_expires_in,
            admin_username: get("ADMIN_USERNAME"),
            admin_email: get("ADMIN_EMAIL"),
            admin_password: get("ADMIN_PASSWORD"),
            log_level,
            log_sql,
            security_headers: !is_dev,
            ssl_redirect,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| format!("{} has an invalid value: '{}'", key, raw)),
        None => Ok(default),
    }
}

fn parse_bool_or<G>(get: &G, key: &str, default: bool) -> Result<bool, String>
where
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(format!("{} must be a boolean, got '{}'", key, raw)),
        },
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<Config, String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn development_defaults() {
        let cfg = config(&[("DATABASE_URL", "postgres://localhost/blog")]).unwrap();
        assert_eq!(cfg.environment, Environment::Development);
        assert_eq!(cfg.server_port, 3000);
        assert_eq!(cfg.posts_per_page, 10);
        assert_eq!(cfg.cache_backend, CacheBackend::Memory);
        assert_eq!(cfg.log_level, "debug");
        assert!(cfg.log_sql);
        assert!(!cfg.security_headers);
        assert!(!cfg.ssl_redirect);
        assert_eq!(cfg.jwt_secret, DEV_JWT_SECRET);
    }

    #[test]
    fn sqlite_and_cache_switches_apply_in_development() {
        let cfg = config(&[("USE_SQLITE", "true"), ("DISABLE_CACHE", "1")]).unwrap();
        assert_eq!(cfg.database_url, SQLITE_DEV_URL);
        assert_eq!(cfg.cache_backend, CacheBackend::Disabled);
    }

    #[test]
    fn production_ignores_dev_switches_and_hardens() {
        let cfg = config(&[
            ("APP_ENV", "production"),
            ("DATABASE_URL", "postgres://db/blog"),
            ("JWT_SECRET", "s3cret"),
            ("USE_SQLITE", "true"),
            ("DISABLE_CACHE", "true"),
            ("REDIS_URL", "redis://cache:6379"),
        ])
        .unwrap();
        assert_eq!(cfg.database_url, "postgres://db/blog");
        assert_eq!(cfg.cache_backend, CacheBackend::Redis("redis://cache:6379".to_string()));
        assert!(cfg.security_headers);
        assert!(cfg.ssl_redirect);
        assert_eq!(cfg.log_level, "info");
        assert!(!cfg.log_sql);
    }

    #[test]
    fn production_requires_jwt_secret() {
        let err = config(&[("APP_ENV", "production"), ("DATABASE_URL", "postgres://db/blog")]).unwrap_err();
        assert!(err.contains("JWT_SECRET"));
    }

    #[test]
    fn missing_database_url_is_an_error() {
        assert!(config(&[]).unwrap_err().contains("DATABASE_URL"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(config(&[("USE_SQLITE", "true"), ("PORT", "http")]).is_err());
        assert!(config(&[("USE_SQLITE", "true"), ("POSTS_PER_PAGE", "0")]).is_err());
        assert!(config(&[("USE_SQLITE", "maybe")]).is_err());
        assert!(config(&[("USE_SQLITE", "true"), ("APP_ENV", "staging")]).is_err());
    }
}
