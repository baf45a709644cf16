use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Runtime mode of the client host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Development,
    Production,
}

impl Default for Mode {
    fn default() -> Self {
        Self::Development
    }
}

impl Mode {
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Ok(Mode::Development),
            "prod" | "production" => Ok(Mode::Production),
            other => Err(format!("Unknown mode: {}", other)),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Client configuration.
///
/// All values have environment defaults; the API endpoints and application
/// origins are fixed per mode. Tenant routing is carried by header, never
/// encoded into the endpoint URL.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub mode: Mode,
    #[serde(default = "default_base_domain")]
    pub base_domain: String,
    #[serde(default = "default_dev_api_url")]
    pub dev_api_url: String,
    #[serde(default = "default_prod_api_url")]
    pub prod_api_url: String,
    #[serde(default = "default_dev_app_origin")]
    pub dev_app_origin: String,
    #[serde(default = "default_prod_app_origin")]
    pub prod_app_origin: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_redirect_delay_ms")]
    pub redirect_delay_ms: u64,
    #[serde(default = "default_login_path")]
    pub login_path: String,
}

impl ClientConfig {
    /// Load configuration from `CLINIO__`-prefixed environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_env("CLINIO")
    }

    /// Load configuration from the environment with a custom prefix.
    pub fn load_from_env(prefix: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(
                Environment::with_prefix(prefix)
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("mode", "development")?
            .set_default("base_domain", default_base_domain())?
            .set_default("dev_api_url", default_dev_api_url())?
            .set_default("prod_api_url", default_prod_api_url())?
            .set_default("dev_app_origin", default_dev_app_origin())?
            .set_default("prod_app_origin", default_prod_app_origin())?
            .set_default("timeout_secs", default_timeout_secs())?
            .set_default("redirect_delay_ms", default_redirect_delay_ms())?
            .set_default("login_path", default_login_path())?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_base_domain(mut self, base_domain: impl Into<String>) -> Self {
        self.base_domain = base_domain.into();
        self
    }

    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay_ms = delay.as_millis() as u64;
        self
    }

    /// API endpoint for the current mode.
    pub fn api_base_url(&self) -> &str {
        if self.mode.is_development() {
            &self.dev_api_url
        } else {
            &self.prod_api_url
        }
    }

    /// Origin of the public (central) application for the current mode.
    pub fn public_origin(&self) -> &str {
        if self.mode.is_development() {
            &self.dev_app_origin
        } else {
            &self.prod_app_origin
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Development,
            base_domain: default_base_domain(),
            dev_api_url: default_dev_api_url(),
            prod_api_url: default_prod_api_url(),
            dev_app_origin: default_dev_app_origin(),
            prod_app_origin: default_prod_app_origin(),
            timeout_secs: default_timeout_secs(),
            redirect_delay_ms: default_redirect_delay_ms(),
            login_path: default_login_path(),
        }
    }
}

fn default_base_domain() -> String {
    "clinio.app".to_string()
}

fn default_dev_api_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_prod_api_url() -> String {
    "https://clinio-backend.onrender.com/api".to_string()
}

fn default_dev_app_origin() -> String {
    "http://localhost:5173".to_string()
}

fn default_prod_app_origin() -> String {
    "https://clinio.app".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_redirect_delay_ms() -> u64 {
    2000
}

fn default_login_path() -> String {
    "/login".to_string()
}
