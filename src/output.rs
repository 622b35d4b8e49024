use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ErrorPayload;

/// Schema version for output payloads.
pub const FCG_OUTPUT_VERSION: &str = "0.1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum FcgOutput {
    Fetch(FetchOutput),
    Component(ComponentOutput),
    Extract(ExtractOutput),
    Emit(ComponentOutput),
    Error(ErrorOutput),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchOutput {
    pub version: String,
    pub file_key: String,
    pub document_name: String,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentOutput {
    pub version: String,
    pub identifier: String,
    pub class_name: String,
    pub selector: String,
    pub files: Vec<PathBuf>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assets: Vec<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractOutput {
    pub version: String,
    pub file_key: String,
    pub layout_path: PathBuf,
    pub page_background_color: String,
    pub frame_count: usize,
    /// Frames that ended up with the "not found" image marker.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_images: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub error: ErrorPayload,
}
