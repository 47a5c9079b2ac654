//! Configuration management for the RFP Analyzer.
//!
//! Settings are merged from several sources, lowest precedence first:
//! - Built-in defaults
//! - Optional YAML config file (`rfp.yaml` or `RFP_CONFIG`)
//! - Environment variables (a `.env` file is loaded if present)
//! - Command-line flags (`with_overrides`)
//!
//! Credentials are only ever read from the environment. The YAML file may
//! name the variable to read them from via `apiKeyEnv`.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Default search index queried when none is configured.
pub const DEFAULT_INDEX_NAME: &str = "rfp-syryu-obj";

/// Azure AI Search REST api-version.
pub const DEFAULT_SEARCH_API_VERSION: &str = "2023-11-01";

/// Azure OpenAI REST api-version.
pub const DEFAULT_OPENAI_API_VERSION: &str = "2023-12-01-preview";

/// Transport timeout applied to both HTTP clients.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const DEFAULT_CONFIG_FILE: &str = "rfp.yaml";

/// Connection settings for the search service.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SearchConfig {
    pub endpoint: String,
    pub api_key: String,
    pub index_name: String,
    pub api_version: String,
}

/// Connection settings for the generation service.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct OpenAiConfig {
    pub endpoint: String,
    pub api_key: String,
    /// Deployment name; also sent as the model identifier.
    pub deployment: String,
    pub api_version: String,
}

// Keys stay out of logs.
impl fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &redact(&self.api_key))
            .field("index_name", &self.index_name)
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &redact(&self.api_key))
            .field("deployment", &self.deployment)
            .field("api_version", &self.api_version)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Config file that was merged, if any
    pub config_file: Option<PathBuf>,

    /// Search service settings
    pub search: SearchConfig,

    /// Generation service settings
    pub openai: OpenAiConfig,

    /// HTTP request timeout in seconds
    pub timeout_secs: u64,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    search: Option<SearchSection>,
    openai: Option<OpenAiSection>,
    http: Option<HttpSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchSection {
    endpoint: Option<String>,
    index_name: Option<String>,
    api_version: Option<String>,
    api_key_env: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OpenAiSection {
    endpoint: Option<String>,
    deployment: Option<String>,
    api_version: Option<String>,
    api_key_env: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HttpSection {
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            search: SearchConfig {
                index_name: DEFAULT_INDEX_NAME.to_string(),
                api_version: DEFAULT_SEARCH_API_VERSION.to_string(),
                ..Default::default()
            },
            openai: OpenAiConfig {
                api_version: DEFAULT_OPENAI_API_VERSION.to_string(),
                ..Default::default()
            },
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file, `.env` and the environment.
    ///
    /// Environment variables:
    /// - `AZURE_SEARCH_ENDPOINT`, `AZURE_SEARCH_API_KEY`, `AZURE_SEARCH_INDEX`
    /// - `AZURE_SEARCH_API_VERSION`
    /// - `AZURE_OPENAI_ENDPOINT`, `AZURE_OPENAI_API_KEY`, `AZURE_DEPLOYMENT_MODEL`
    /// - `AZURE_OPENAI_API_VERSION`
    /// - `RFP_HTTP_TIMEOUT_SECS`, `RFP_CONFIG`
    /// - `RUST_LOG`, `NO_COLOR`
    ///
    /// An explicitly named config file must exist. The default `rfp.yaml`
    /// in the current directory is merged only when present.
    ///
    /// Loading never checks that required values are present; see
    /// [`AppConfig::validate`].
    pub fn load(config_file: Option<&Path>) -> AppResult<Self> {
        // A missing .env file is fine
        dotenvy::dotenv().ok();

        let explicit = config_file
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os("RFP_CONFIG").map(PathBuf::from));

        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(AppError::Config(format!(
                    "Config file does not exist: {:?}",
                    path
                )));
            }
            Some(path) => Some(path),
            None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.exists()),
        };

        let yaml = match &path {
            Some(path) => {
                tracing::debug!("Reading config file {:?}", path);
                Some(std::fs::read_to_string(path).map_err(|e| {
                    AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
                })?)
            }
            None => None,
        };

        let mut config = Self::from_sources(yaml.as_deref(), |key| std::env::var(key).ok())?;
        config.config_file = path;
        Ok(config)
    }

    /// Build a configuration from YAML text and an environment lookup.
    pub fn from_sources<F>(yaml: Option<&str>, env: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(yaml) = yaml {
            let file: ConfigFile = serde_yaml::from_str(yaml)
                .map_err(|e| AppError::Config(format!("Failed to parse config file: {}", e)))?;
            config.merge_file(file, &env);
        }

        config.apply_env(&env)?;
        Ok(config)
    }

    fn merge_file<F>(&mut self, file: ConfigFile, env: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(search) = file.search {
            if let Some(endpoint) = search.endpoint {
                self.search.endpoint = endpoint;
            }
            if let Some(index_name) = search.index_name {
                self.search.index_name = index_name;
            }
            if let Some(api_version) = search.api_version {
                self.search.api_version = api_version;
            }
            if let Some(key) = search.api_key_env.and_then(|var| env(&var)) {
                self.search.api_key = key;
            }
        }

        if let Some(openai) = file.openai {
            if let Some(endpoint) = openai.endpoint {
                self.openai.endpoint = endpoint;
            }
            if let Some(deployment) = openai.deployment {
                self.openai.deployment = deployment;
            }
            if let Some(api_version) = openai.api_version {
                self.openai.api_version = api_version;
            }
            if let Some(key) = openai.api_key_env.and_then(|var| env(&var)) {
                self.openai.api_key = key;
            }
        }

        if let Some(timeout) = file.http.and_then(|http| http.timeout_secs) {
            self.timeout_secs = timeout;
        }

        if let Some(logging) = file.logging {
            if let Some(level) = logging.level {
                self.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                self.no_color = !color;
            }
        }
    }

    fn apply_env<F>(&mut self, env: &F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let string_vars: [(&str, &mut String); 8] = [
            ("AZURE_SEARCH_ENDPOINT", &mut self.search.endpoint),
            ("AZURE_SEARCH_API_KEY", &mut self.search.api_key),
            ("AZURE_SEARCH_INDEX", &mut self.search.index_name),
            ("AZURE_SEARCH_API_VERSION", &mut self.search.api_version),
            ("AZURE_OPENAI_ENDPOINT", &mut self.openai.endpoint),
            ("AZURE_OPENAI_API_KEY", &mut self.openai.api_key),
            ("AZURE_DEPLOYMENT_MODEL", &mut self.openai.deployment),
            ("AZURE_OPENAI_API_VERSION", &mut self.openai.api_version),
        ];

        for (key, slot) in string_vars {
            if let Some(value) = env(key) {
                *slot = value;
            }
        }

        if let Some(timeout) = env("RFP_HTTP_TIMEOUT_SECS") {
            self.timeout_secs = timeout.trim().parse().map_err(|e| {
                AppError::Config(format!("Invalid RFP_HTTP_TIMEOUT_SECS '{}': {}", timeout, e))
            })?;
        }

        if let Some(level) = env("RUST_LOG") {
            self.log_level = Some(level);
        }

        if env("NO_COLOR").is_some() {
            self.no_color = true;
        }

        Ok(())
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables and the config file.
    pub fn with_overrides(
        mut self,
        index_name: Option<String>,
        deployment: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(index_name) = index_name {
            self.search.index_name = index_name;
        }

        if let Some(deployment) = deployment {
            self.openai.deployment = deployment;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Check that every required connection parameter is present.
    ///
    /// Empty and whitespace-only values count as missing. All missing keys
    /// are reported together.
    pub fn validate(&self) -> AppResult<()> {
        let required = [
            ("AZURE_SEARCH_ENDPOINT", &self.search.endpoint),
            ("AZURE_SEARCH_API_KEY", &self.search.api_key),
            ("AZURE_SEARCH_INDEX", &self.search.index_name),
            ("AZURE_OPENAI_ENDPOINT", &self.openai.endpoint),
            ("AZURE_OPENAI_API_KEY", &self.openai.api_key),
            ("AZURE_DEPLOYMENT_MODEL", &self.openai.deployment),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(key, _)| *key)
            .collect();

        if !missing.is_empty() {
            return Err(AppError::Config(format!(
                "Missing required configuration: {}",
                missing.join(", ")
            )));
        }

        for (key, endpoint) in [
            ("AZURE_SEARCH_ENDPOINT", &self.search.endpoint),
            ("AZURE_OPENAI_ENDPOINT", &self.openai.endpoint),
        ] {
            if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
                return Err(AppError::Config(format!(
                    "{} must be an http(s) URL, got '{}'",
                    key, endpoint
                )));
            }
        }

        if self.timeout_secs == 0 {
            return Err(AppError::Config(
                "HTTP timeout must be at least one second".to_string(),
            ));
        }

        Ok(())
    }
}
