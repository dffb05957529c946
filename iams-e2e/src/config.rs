use config::{Config, ConfigError, Environment, File};
use iams_sdk::{auth::Credentials, PollPolicy};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

pub const DEFAULT_CONFIG_FILE: &str = "iams-e2e.toml";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct E2eConfig {
    pub api: ApiConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub poll: PollConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    pub token_url: String,
    pub client_id: String,
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_scope")]
    pub scope: String,
    pub token_file: PathBuf,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PollConfig {
    pub timeout_secs: u64,
    pub interval_ms: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HttpConfig {
    pub timeout_secs: u64,
}

fn default_scope() -> String {
    "openid".to_string()
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 90,
            interval_ms: 1000,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl Default for E2eConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "https://iams.qa.agilopshub.com".to_string(),
            },
            auth: AuthConfig {
                token_url: "https://iams-keycloak.qa.agilopshub.com/realms/AOH/protocol/openid-connect/token"
                    .to_string(),
                client_id: "web".to_string(),
                username: "agiltester".to_string(),
                password: String::new(),
                scope: default_scope(),
                token_file: PathBuf::from(".auth/auth.json"),
            },
            poll: PollConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

impl E2eConfig {
    /// Load from `path` (or `iams-e2e.toml`), layering `IAMS_E2E__*` env vars on top
    ///
    /// A missing file is created with defaults first. The password is left
    /// empty there and is expected to come from `IAMS_E2E__AUTH__PASSWORD`.
    pub fn load(path: Option<PathBuf>) -> Result<(Self, PathBuf), ConfigError> {
        let config_path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        if !config_path.exists() {
            if let Some(parent) = config_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        ConfigError::Message(format!("Failed to create config directory: {e}"))
                    })?;
                }
            }
            let default_config = toml::to_string_pretty(&E2eConfig::default()).map_err(|e| {
                ConfigError::Message(format!("Failed to render default config: {e}"))
            })?;
            std::fs::write(&config_path, default_config).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.clone()))
            .add_source(
                Environment::with_prefix("IAMS_E2E")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let mut config: E2eConfig = builder.try_deserialize()?;

        // Expand tilde in token file path
        if config.auth.token_file.starts_with("~") {
            if let Some(home) = dirs::home_dir() {
                let path_str = config.auth.token_file.to_string_lossy();
                let expanded = path_str.replacen('~', &home.to_string_lossy(), 1);
                config.auth.token_file = PathBuf::from(expanded);
            }
        }

        Ok((config, config_path))
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.auth.username.clone(),
            self.auth.password.clone(),
            self.auth.client_id.clone(),
        )
        .with_scope(self.auth.scope.clone())
    }

    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy::new(
            Duration::from_secs(self.poll.timeout_secs),
            Duration::from_millis(self.poll.interval_ms),
        )
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }
}
