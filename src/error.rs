use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::ParseError;

use crate::resource::ResourceParseError;

#[derive(Debug, Error)]
pub enum FcgError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] ParseError),

    #[error("Access denied: {message}")]
    AccessDenied { message: String },

    #[error("Figma API error (status: {status:?}): {message}")]
    FigmaApi {
        status: Option<StatusCode>,
        message: String,
    },

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Document structure error: {0}")]
    Document(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FcgError {
    pub fn figma_api(status: Option<StatusCode>, message: impl Into<String>) -> Self {
        FcgError::FigmaApi {
            status,
            message: message.into(),
        }
    }

    pub fn document(message: impl Into<String>) -> Self {
        FcgError::Document(message.into())
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            FcgError::Io(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Check file paths/permissions and that the output directory is writable.",
            ),
            FcgError::Network(e) => ErrorPayload::new(
                ErrorCategory::Network,
                e.to_string(),
                "Check connectivity/proxy/VPN; raise timeouts.document in the config for large files.",
            ),
            FcgError::InvalidUrl(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Verify api_base_url in the config (e.g., https://api.figma.com).",
            ),
            FcgError::AccessDenied { message } => ErrorPayload::new(
                ErrorCategory::Auth,
                format!("Access denied: {message}"),
                "Check FIGMA_TOKEN and that the token owner can view the file.",
            ),
            FcgError::FigmaApi { status, message } => {
                let remediation = match status.map(|s| s.as_u16()) {
                    Some(404) => "Verify the file key; copy it from the Figma URL (/file/<KEY>/ or /design/<KEY>/).",
                    Some(429) => "Rate limited by Figma; wait for the Retry-After period and rerun.",
                    _ => "Check the file key and token; rerun with --verbose for request details.",
                };
                ErrorPayload::new(
                    ErrorCategory::Figma,
                    format!("Figma API error (status {:?}): {}", status, message),
                    remediation,
                )
            }
            FcgError::Image(e) => ErrorPayload::new(
                ErrorCategory::Image,
                e.to_string(),
                "The exported image could not be decoded; rerun without --download-assets.",
            ),
            FcgError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Check that the input JSON is a Figma document or layout file.",
            ),
            FcgError::Document(msg) => ErrorPayload::new(
                ErrorCategory::Document,
                msg.to_string(),
                "Make sure the first page has a frame, or pass a Figma URL with ?node-id= pointing at one.",
            ),
            FcgError::Config(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("figma_token") || lower.contains("token") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Set FIGMA_TOKEN (or FIGMA_OAUTH_TOKEN), or put token = \"...\" in the config file.",
                    )
                } else if lower.contains("file key") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Pass --file <KEY|URL> or set file_key in the config file.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Check flags/paths and the config file (TOML or YAML).",
                    )
                }
            }
        }
    }
}

impl From<ResourceParseError> for FcgError {
    fn from(err: ResourceParseError) -> Self {
        FcgError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FcgError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Config,
    Network,
    Auth,
    Figma,
    Document,
    Image,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}
