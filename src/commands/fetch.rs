use std::path::PathBuf;
use std::process::ExitCode;

use fcg_lib::{FcgError, FcgOutput, FetchOutput, FCG_OUTPUT_VERSION};
use serde_json::Value;
use tracing::info;

use super::finish;
use crate::cli::OutputFormat;
use crate::settings::{build_client, load_config, resolve_file_reference};

/// Run the fetch command.
pub async fn run_fetch(
    config_path: Option<PathBuf>,
    file: Option<String>,
    output: Option<PathBuf>,
    format: OutputFormat,
) -> ExitCode {
    finish(fetch(config_path, file, output).await, format)
}

async fn fetch(
    config_path: Option<PathBuf>,
    file: Option<String>,
    output: Option<PathBuf>,
) -> Result<FcgOutput, FcgError> {
    let config = load_config(config_path.as_deref())?;
    let reference = resolve_file_reference(file.as_deref(), &config)?;
    let client = build_client(&config)?;

    let raw = client.fetch_file_json(&reference.file_key).await?;
    let document_name = raw
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let path =
        output.unwrap_or_else(|| PathBuf::from(format!("figma_{}.json", reference.file_key)));
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, serde_json::to_string_pretty(&raw)?)?;
    info!(path = %path.display(), "document saved");

    Ok(FcgOutput::Fetch(FetchOutput {
        version: FCG_OUTPUT_VERSION.to_string(),
        file_key: reference.file_key,
        document_name,
        output_path: path,
    }))
}
