use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Optional config file looked up in the working directory.
pub const CONFIG_FILE: &str = "portagen.toml";

/// Prefix for environment overrides, e.g. `PORTAGEN_EXPORT__STAGING_DIR`.
pub const ENV_PREFIX: &str = "PORTAGEN_";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen_addr: String,
    pub database_url: String,
    pub loglevel: String,
    /// HMAC secret for bearer tokens. Startup refuses an empty value.
    pub jwt_secret: String,
    pub jwt_ttl_days: i64,
    /// Accounts registered with one of these emails become admins.
    pub admin_emails: Vec<String>,
    pub cors_origins: Vec<String>,
    pub body_limit_mb: usize,
    pub seed_templates: bool,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Parent directory for per-request staging directories.
    pub staging_dir: PathBuf,
    /// Chrome/Chromium binary; autodetected when unset.
    pub chrome_path: Option<PathBuf>,
    pub chrome_sandbox: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:5000".to_string(),
            database_url: "sqlite://portagen.db".to_string(),
            loglevel: "info".to_string(),
            jwt_secret: String::new(),
            jwt_ttl_days: 30,
            admin_emails: Vec::new(),
            cors_origins: vec![
                "http://localhost:5173".to_string(),
                "http://localhost:3000".to_string(),
            ],
            body_limit_mb: 2,
            seed_templates: true,
            export: ExportConfig::default(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            staging_dir: PathBuf::from("temp"),
            chrome_path: None,
            chrome_sandbox: true,
        }
    }
}

impl Config {
    /// Defaults, then `portagen.toml`, then `PORTAGEN_*` environment variables.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn is_admin_email(&self, email: &str) -> bool {
        self.admin_emails
            .iter()
            .any(|admin| admin.eq_ignore_ascii_case(email))
    }

    pub fn body_limit_bytes(&self) -> usize {
        self.body_limit_mb * 1024 * 1024
    }
}
