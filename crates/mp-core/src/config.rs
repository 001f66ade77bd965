//! Configuration management
//!
//! Settings are resolved in this order of precedence:
//! 1. Environment variables
//! 2. `meta-page.toml` (or the file passed with `--config`)
//! 3. Defaults
//!
//! Inside the config file, `${VAR_NAME}` is expanded from the environment.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::Error;

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "meta-page.toml";

/// Graph API settings for the managed page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaConfig {
    /// Graph API version segment, e.g. `v18.0`
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Id of the managed page
    #[serde(default)]
    pub page_id: String,

    /// Page access token appended to every Graph API call
    #[serde(skip_serializing, default)]
    pub page_access_token: String,

    /// Token echoed by the platform during webhook subscription
    #[serde(skip_serializing, default = "default_verify_token")]
    pub verify_token: String,

    /// Graph API host, overridable for staging and tests
    #[serde(default = "default_graph_base_url")]
    pub graph_base_url: String,
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            api_version: default_api_version(),
            page_id: String::new(),
            page_access_token: String::new(),
            verify_token: default_verify_token(),
            graph_base_url: default_graph_base_url(),
        }
    }
}

/// Inbound texts that trigger canned replies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// Message text answered with the promotion sequence
    #[serde(default = "default_test_phrase")]
    pub test_phrase: String,

    /// Postback title answered with the booking deep link
    #[serde(default = "default_booking_label")]
    pub booking_label: String,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            test_phrase: default_test_phrase(),
            booking_label: default_booking_label(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port for the HTTP server
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

/// Main configuration for the Meta page backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub meta: MetaConfig,

    #[serde(default)]
    pub triggers: TriggerConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_api_version() -> String {
    "v18.0".to_string()
}

fn default_verify_token() -> String {
    "ren_verify_12345".to_string()
}

fn default_graph_base_url() -> String {
    "https://graph.facebook.com".to_string()
}

fn default_test_phrase() -> String {
    "這是測試用口令".to_string()
}

fn default_booking_label() -> String {
    "立即預訂".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Reads the first non-empty variable among `names`
fn first_var<F>(lookup: &F, names: &[&str]) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    names
        .iter()
        .filter_map(|name| lookup(*name))
        .find(|value| !value.is_empty())
}

impl Config {
    /// Replaces `${VAR_NAME}` with the variable's value.
    ///
    /// Unknown variables expand to an empty string.
    fn expand_env_vars<F>(value: &str, lookup: &F) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut result = String::new();
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' && chars.peek() == Some(&'{') {
                chars.next();

                let mut var_name = String::new();
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                    var_name.push(c);
                }

                if let Some(env_value) = lookup(&var_name) {
                    result.push_str(&env_value);
                }
            } else {
                result.push(c);
            }
        }

        result
    }

    /// Load settings from a TOML file, then apply environment overrides
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();

        let toml_content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        Self::from_toml_str(&toml_content, |name| std::env::var(name).ok())
    }

    fn from_toml_str<F>(content: &str, lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let expanded_content = Self::expand_env_vars(content, &lookup);

        let mut config: Config = toml::from_str(&expanded_content)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;

        config.apply_overrides(&lookup);
        config.validate()?;

        Ok(config)
    }

    /// Load settings from the given file, `meta-page.toml`, or the environment
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        if let Some(path) = path {
            return Self::from_toml_file(path);
        }

        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            tracing::debug!("Loading configuration from {}", DEFAULT_CONFIG_FILE);
            return Self::from_toml_file(DEFAULT_CONFIG_FILE);
        }

        Self::from_env()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> crate::Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        config.apply_overrides(&lookup);
        config.validate()?;
        Ok(config)
    }

    /// Environment values win over file values.
    ///
    /// Page id and token also accept the lower-case names the page
    /// deployment scripts export.
    fn apply_overrides<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(version) = first_var(lookup, &["API_VERSION"]) {
            self.meta.api_version = version;
        }
        if let Some(page_id) = first_var(lookup, &["PAGE_ID", "page_id"]) {
            self.meta.page_id = page_id;
        }
        if let Some(token) = first_var(lookup, &["PAGE_ACCESS_TOKEN", "page_access_token"]) {
            self.meta.page_access_token = token;
        }
        if let Some(token) = first_var(lookup, &["META_VERIFY_TOKEN"]) {
            self.meta.verify_token = token;
        }
        if let Some(url) = first_var(lookup, &["GRAPH_BASE_URL"]) {
            self.meta.graph_base_url = url;
        }

        if let Some(phrase) = first_var(lookup, &["TRIGGER_TEST_PHRASE"]) {
            self.triggers.test_phrase = phrase;
        }
        if let Some(label) = first_var(lookup, &["TRIGGER_BOOKING_LABEL"]) {
            self.triggers.booking_label = label;
        }

        if let Some(port) = first_var(lookup, &["API_PORT"]) {
            match port.parse() {
                Ok(p) => self.server.port = p,
                Err(_) => tracing::warn!("Ignoring invalid API_PORT: {}", port),
            }
        }
    }

    fn validate(&self) -> crate::Result<()> {
        if self.meta.page_id.trim().is_empty() {
            return Err(Error::Config("PAGE_ID not set".to_string()));
        }
        if self.meta.page_access_token.trim().is_empty() {
            return Err(Error::Config("PAGE_ACCESS_TOKEN not set".to_string()));
        }
        Ok(())
    }
}
