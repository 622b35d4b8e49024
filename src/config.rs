use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::figma::{FigmaAuth, ImageFormat, MAX_SCALE, MIN_SCALE};

pub const DEFAULT_API_BASE_URL: &str = "https://api.figma.com";
pub const DEFAULT_OUTPUT_DIR: &str = "output_components";
pub const DEFAULT_LAYOUT_PATH: &str = "layout.json";
pub const DEFAULT_LAYOUT_NAME: &str = "figma-layout";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0}")]
    Read(#[from] std::io::Error),
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub file_key: Option<String>,
    pub token: Option<String>,
    pub output_dir: PathBuf,
    pub layout_path: PathBuf,
    pub api_base_url: String,
    pub component: ComponentConfig,
    pub timeouts: Timeouts,
    pub images: ImageConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ComponentConfig {
    /// Overrides the identifier derived from the frame name.
    pub name: Option<String>,
    pub selector_prefix: String,
    pub layout_name: String,
}

impl Default for ComponentConfig {
    fn default() -> Self {
        Self {
            name: None,
            selector_prefix: "app".to_string(),
            layout_name: DEFAULT_LAYOUT_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    #[serde(with = "humantime_serde")]
    pub document: Duration,
    #[serde(with = "humantime_serde")]
    pub images: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            document: Duration::from_secs(30),
            images: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub scale: f32,
    pub format: ImageFormat,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            format: ImageFormat::Png,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file_key: None,
            token: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            layout_path: PathBuf::from(DEFAULT_LAYOUT_PATH),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            component: ComponentConfig::default(),
            timeouts: Timeouts::default(),
            images: ImageConfig::default(),
        }
    }
}

impl Config {
    /// Load from an explicit path, then `~/.config/fcg/config.toml`, then defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match Self::central_config_path() {
            Some(central) if central.is_file() => Self::from_file(&central),
            _ => Ok(Self::default()),
        }
    }

    pub fn central_config_path() -> Option<PathBuf> {
        let home = std::env::var_os("HOME").filter(|h| !h.is_empty())?;
        Some(
            PathBuf::from(home)
                .join(".config")
                .join("fcg")
                .join("config.toml"),
        )
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&content),
            _ => Self::from_toml_str(&content),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_SCALE..=MAX_SCALE).contains(&self.images.scale) {
            return Err(ConfigError::Invalid(format!(
                "images.scale must be between {MIN_SCALE} and {MAX_SCALE} (got {})",
                self.images.scale
            )));
        }
        if self.timeouts.document.is_zero() || self.timeouts.images.is_zero() {
            return Err(ConfigError::Invalid(
                "timeouts.document and timeouts.images must be non-zero".to_string(),
            ));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "output_dir must not be empty".to_string(),
            ));
        }
        if self.component.selector_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "component.selector_prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Environment tokens win over the config file.
    pub fn auth(&self) -> Option<FigmaAuth> {
        FigmaAuth::from_env().or_else(|| {
            self.token
                .as_ref()
                .filter(|t| !t.trim().is_empty())
                .map(|t| FigmaAuth::PersonalAccessToken(t.trim().to_string()))
        })
    }
}
