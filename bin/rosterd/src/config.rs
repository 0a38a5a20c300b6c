//! Server-side configuration, loaded once at startup from a TOML file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Server configuration file.
///
/// ```toml
/// listen = "0.0.0.0:8080"
///
/// [storage]
/// data_dir = "/var/lib/roster"
///
/// [jwt]
/// secret = "..."
///
/// [bootstrap]
/// admin_username = "admin1"
/// admin_password = "secret"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Listen address; the CLI `--listen` flag overrides it.
    #[serde(default = "default_listen")]
    pub listen: String,

    pub storage: StorageConfig,
    pub jwt: JwtConfig,

    /// Optional first-run admin account seeding.
    #[serde(default)]
    pub bootstrap: Option<BootstrapConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the service's data files.
    pub data_dir: String,

    /// Path to the SQLite database file.
    /// Defaults to `{data_dir}/roster.sqlite` if not specified.
    #[serde(default)]
    pub sqlite_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// JWT signing secret. Constant for the process lifetime; rotating
    /// it (and thereby invalidating all outstanding tokens) means
    /// editing the config and restarting.
    pub secret: String,

    /// Token lifetime in seconds (default: 10h).
    #[serde(default = "default_expire_secs")]
    pub expire_secs: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BootstrapConfig {
    pub admin_username: String,
    pub admin_password: String,
}

fn default_listen() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_expire_secs() -> i64 {
    36_000 // 10h
}

impl ServerConfig {
    /// Resolve a context name or path to a config file path.
    ///
    /// A bare name resolves to `/etc/roster/<name>.toml`; anything
    /// containing `/` or `.` is used as a path directly.
    pub fn resolve_path(name_or_path: &str) -> PathBuf {
        if name_or_path.contains('/') || name_or_path.contains('.') {
            PathBuf::from(name_or_path)
        } else {
            PathBuf::from(format!("/etc/roster/{}.toml", name_or_path))
        }
    }

    /// Load configuration from disk.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ServerConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Resolve the SQLite database path, falling back to
    /// `{data_dir}/roster.sqlite`.
    pub fn resolve_sqlite_path(&self) -> PathBuf {
        match &self.storage.sqlite_path {
            Some(p) => PathBuf::from(p),
            None => PathBuf::from(&self.storage.data_dir).join("roster.sqlite"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let config: ServerConfig = toml::from_str(
            r#"
            [storage]
            data_dir = "/tmp/roster"

            [jwt]
            secret = "s3cret"
            "#,
        )
        .unwrap();
        assert_eq!(config.listen, "0.0.0.0:8080");
        assert_eq!(config.jwt.expire_secs, 36_000);
        assert!(config.bootstrap.is_none());
        assert_eq!(
            config.resolve_sqlite_path(),
            PathBuf::from("/tmp/roster/roster.sqlite")
        );
    }

    #[test]
    fn parse_full_config() {
        let config: ServerConfig = toml::from_str(
            r#"
            listen = "127.0.0.1:9090"

            [storage]
            data_dir = "/data"
            sqlite_path = "/data/custom.sqlite"

            [jwt]
            secret = "s3cret"
            expire_secs = 3600

            [bootstrap]
            admin_username = "admin1"
            admin_password = "secret"
            "#,
        )
        .unwrap();
        assert_eq!(config.listen, "127.0.0.1:9090");
        assert_eq!(config.jwt.expire_secs, 3600);
        assert_eq!(
            config.resolve_sqlite_path(),
            PathBuf::from("/data/custom.sqlite")
        );
        assert_eq!(config.bootstrap.unwrap().admin_username, "admin1");
    }

    #[test]
    fn resolve_path_name_vs_path() {
        assert_eq!(
            ServerConfig::resolve_path("prod"),
            PathBuf::from("/etc/roster/prod.toml")
        );
        assert_eq!(
            ServerConfig::resolve_path("./local.toml"),
            PathBuf::from("./local.toml")
        );
    }
}
