use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        // Host left empty; normalize() fills it from SERVER_HOST or the
        // loopback fallback.
        Self { host: String::new(), port: 8000, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

/// HTTP-facing behavior: browser origin allow-list and the policy for
/// GET /todos/ on an empty table (200 with `[]`, or 404 like the by-id
/// lookups).
#[derive(Debug, Clone, Deserialize, Default)]
pub struct HttpConfig {
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
    #[serde(default)]
    pub empty_list_as_not_found: bool,
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load from CONFIG_PATH (falling back to built-in defaults when the
    /// file is absent), then normalize and validate.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default().unwrap_or_default();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if self.worker_threads.unwrap_or(0) == 0 {
            self.worker_threads = Some(4);
        }
        Ok(())
    }
}

impl DatabaseConfig {
    /// Fill the URL from the environment when the TOML omits it, and rewrite
    /// the `postgresql://` dialect prefix to the `postgres://` form the sqlx
    /// driver expects.
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
        if let Some(rest) = self.url.strip_prefix("postgresql://") {
            self.url = format!("postgres://{rest}");
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.url.trim().is_empty() {
            let lower = self.url.to_lowercase();
            if !(lower.starts_with("postgres://") || lower.starts_with("sqlite:")) {
                return Err(anyhow!("database.url must start with postgres:// or sqlite:"));
            }
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_sections() {
        let cfg: AppConfig = toml::from_str("").expect("empty toml");
        assert!(cfg.server.host.is_empty());
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.database.max_connections, 10);
        assert!(!cfg.http.empty_list_as_not_found);
        assert!(cfg.http.cors_allowed_origins.is_empty());
    }

    #[test]
    fn host_falls_back_to_env_then_loopback() {
        // Pin the database URL so the ambient DATABASE_URL plays no part
        let toml_src = "[database]\nurl = \"sqlite::memory:\"";

        std::env::remove_var("SERVER_HOST");
        let mut cfg: AppConfig = toml::from_str(toml_src).expect("toml");
        cfg.normalize_and_validate().expect("normalize");
        assert_eq!(cfg.server.host, "127.0.0.1");

        std::env::set_var("SERVER_HOST", "0.0.0.0");
        let mut cfg: AppConfig = toml::from_str(toml_src).expect("toml");
        cfg.normalize_and_validate().expect("normalize");
        assert_eq!(cfg.server.host, "0.0.0.0");
        std::env::remove_var("SERVER_HOST");
    }

    #[test]
    fn parses_full_config() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000
            worker_threads = 2

            [database]
            url = "postgres://u:p@localhost:5432/dailydo"
            max_connections = 5
            min_connections = 1

            [http]
            cors_allowed_origins = ["http://localhost:3000"]
            empty_list_as_not_found = true
            "#,
        )
        .expect("full toml");
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.database.max_connections, 5);
        assert_eq!(cfg.http.cors_allowed_origins, vec!["http://localhost:3000"]);
        assert!(cfg.http.empty_list_as_not_found);
    }

    #[test]
    fn rewrites_postgresql_dialect_prefix() {
        let mut db = DatabaseConfig {
            url: "postgresql://u:p@localhost/dailydo".into(),
            ..Default::default()
        };
        db.normalize_from_env();
        assert_eq!(db.url, "postgres://u:p@localhost/dailydo");
    }

    #[test]
    fn rejects_unknown_scheme_and_bad_pool_bounds() {
        let db = DatabaseConfig { url: "mysql://x".into(), ..Default::default() };
        assert!(db.validate().is_err());

        let db = DatabaseConfig {
            url: "sqlite::memory:".into(),
            max_connections: 1,
            min_connections: 2,
            ..Default::default()
        };
        assert!(db.validate().is_err());
    }
}
