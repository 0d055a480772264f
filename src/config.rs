//! Process configuration.
//!
//! Built once in `main` from defaults, an optional TOML file and `CORE_*`
//! environment variables, then shared read-only as `Arc<Config>`.

use crate::error::CoreError;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file looked up when `CORE_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

const REDACTED: &str = "<redacted>";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub app_name: String,
    pub listen_host: String,
    pub app_port: u16,
    /// May carry credentials; never logged verbatim.
    pub database_url: String,
    pub install_script: PathBuf,
    pub seed_photo: PathBuf,
    pub seed_user_id: i64,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "core".to_string(),
            listen_host: "0.0.0.0".to_string(),
            app_port: 8000,
            database_url: "sqlite://core.sqlite".to_string(),
            install_script: PathBuf::from("sql/core.sql"),
            seed_photo: PathBuf::from("assets/default-avatar.png"),
            seed_user_id: 1,
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit `path` must exist; without one, `config.toml` is merged
    /// only when present. Environment variables prefixed with `CORE_` win.
    pub fn load(path: Option<&Path>) -> Result<Self, CoreError> {
        let file = match path {
            Some(p) => {
                if !p.is_file() {
                    return Err(CoreError::Io(std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("configuration file not found: {}", p.display()),
                    )));
                }
                p.to_path_buf()
            }
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        Self::from_figment(
            Figment::from(Serialized::defaults(Config::default()))
                .merge(Toml::file(file))
                .merge(Env::prefixed("CORE_")),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<Self, CoreError> {
        let cfg: Config = figment.extract()?;
        if cfg.app_name.trim().is_empty() {
            return Err(CoreError::Bootstrap(
                "configuration `app_name` must not be empty".to_string(),
            ));
        }
        Ok(cfg)
    }

    /// Socket address the HTTP server binds to.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.listen_host, self.app_port)
    }

    /// Ordered key/value view for the startup dump. Sensitive values are redacted.
    pub fn diagnostic_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("app_name", self.app_name.clone()),
            ("listen_host", self.listen_host.clone()),
            ("app_port", self.app_port.to_string()),
            ("database_url", REDACTED.to_string()),
            ("install_script", self.install_script.display().to_string()),
            ("seed_photo", self.seed_photo.display().to_string()),
            ("seed_user_id", self.seed_user_id.to_string()),
            ("loglevel", self.loglevel.clone()),
        ]
    }
}
