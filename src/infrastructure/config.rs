use crate::domain::error::ServiceError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub logging: Logging,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LlmConfig {
    pub openai_key: Option<String>,
    pub anthropic_key: Option<String>,
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,
    #[serde(default = "default_anthropic_base_url")]
    pub anthropic_base_url: String,
    /// Per-request deadline in seconds, applied by the HTTP handlers
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Logging {
    #[serde(default = "default_enable")]
    pub enable: bool,
    pub path: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            openai_key: None,
            anthropic_key: None,
            openai_base_url: default_openai_base_url(),
            anthropic_base_url: default_anthropic_base_url(),
            timeout: default_timeout(),
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            path: None,
            level: default_log_level(),
        }
    }
}

// Defaults
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_static_dir() -> String {
    "web/static".to_string()
}
fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}
fn default_anthropic_base_url() -> String {
    "https://api.anthropic.com/v1".to_string()
}
fn default_timeout() -> u64 {
    30
}

/// Upper bound for `llm.timeout` (one day)
pub const MAX_TIMEOUT_SECS: u64 = 86_400;

/// Boolean parsing with the same accepted spellings as Go's `strconv.ParseBool`
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
fn default_enable() -> bool {
    true
}
fn default_log_level() -> String {
    "INFO".to_string()
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.llm.timeout)
    }

    /// Effective log level; `debug = true` forces DEBUG
    pub fn log_level(&self) -> &str {
        if self.debug {
            "DEBUG"
        } else {
            self.logging.level.as_str()
        }
    }

    pub fn openai_key(&self) -> Option<&str> {
        self.llm.openai_key.as_deref().filter(|k| !k.is_empty())
    }

    pub fn anthropic_key(&self) -> Option<&str> {
        self.llm.anthropic_key.as_deref().filter(|k| !k.is_empty())
    }

    /// Override values from the process environment
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Override values from `lookup` (PORT, OPENAI_API_KEY, ANTHROPIC_API_KEY,
    /// DEBUG, TIMEOUT). Unparsable values are ignored; TIMEOUT is capped at
    /// [`MAX_TIMEOUT_SECS`].
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(port) = lookup("PORT").and_then(|v| v.parse::<u16>().ok()) {
            self.server.port = port;
        }
        if let Some(key) = lookup("OPENAI_API_KEY") {
            self.llm.openai_key = Some(key);
        }
        if let Some(key) = lookup("ANTHROPIC_API_KEY") {
            self.llm.anthropic_key = Some(key);
        }
        if let Some(debug) = lookup("DEBUG").and_then(|v| parse_bool(&v)) {
            self.debug = debug;
        }
        if let Some(timeout) = lookup("TIMEOUT")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|t| *t > 0)
        {
            self.llm.timeout = timeout.min(MAX_TIMEOUT_SECS);
        }
    }

    fn normalize(mut self) -> Self {
        if self.llm.timeout == 0 {
            self.llm.timeout = default_timeout();
        }
        self.llm.timeout = self.llm.timeout.min(MAX_TIMEOUT_SECS);
        self
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("translator").join("config.toml"))
}

pub fn parse_config(content: &str) -> Result<Config, ServiceError> {
    Ok(toml::from_str::<Config>(content)?.normalize())
}

/// Load configuration from `path`, or from the default location.
///
/// An explicit path must exist and parse. A broken file at the default
/// location only produces a warning and the defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config, ServiceError> {
    if let Some(path) = path {
        let content = fs::read_to_string(path).map_err(|e| {
            ServiceError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        return parse_config(&content);
    }

    if let Some(path) = get_config_path() {
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            match parse_config(&content) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to parse config file: {}. Using defaults.",
                        e
                    );
                }
            }
        }
    }

    Ok(Config::default())
}

/// Write a sample config to `path` (or the default location) and return
/// where it went. An existing file is left untouched.
pub fn generate_config_sample(path: Option<&Path>) -> Result<PathBuf, ServiceError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => get_config_path().ok_or_else(|| {
            ServiceError::Config("Cannot determine config directory".to_string())
        })?,
    };

    if path.exists() {
        return Err(ServiceError::Config(format!(
            "Config file already exists at: {}",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Empty strings instead of None so the keys show up in the file
    let mut sample = Config::default();
    sample.llm.openai_key = Some(String::new());
    sample.llm.anthropic_key = Some(String::new());
    sample.logging.path = Some(String::new());
    let toml_content = toml::to_string_pretty(&sample)
        .map_err(|e| ServiceError::Config(format!("Failed to serialize config: {}", e)))?;
    fs::write(&path, toml_content)
        .map_err(|e| ServiceError::Config(format!("Failed to write config file: {}", e)))?;

    Ok(path)
}
