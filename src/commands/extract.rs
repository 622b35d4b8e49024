use std::path::PathBuf;
use std::process::ExitCode;

use fcg_lib::{build_layout, write_layout, ExtractOutput, FcgError, FcgOutput, FCG_OUTPUT_VERSION};
use tracing::info;

use super::finish;
use crate::cli::OutputFormat;
use crate::settings::{
    build_client, load_config, resolve_file_reference, resolve_image_options, resolve_layout_path,
};

/// Run the extract command.
pub async fn run_extract(
    config_path: Option<PathBuf>,
    file: Option<String>,
    layout: Option<PathBuf>,
    scale: Option<f32>,
    format: OutputFormat,
) -> ExitCode {
    finish(extract(config_path, file, layout, scale).await, format)
}

async fn extract(
    config_path: Option<PathBuf>,
    file: Option<String>,
    layout_path: Option<PathBuf>,
    scale: Option<f32>,
) -> Result<FcgOutput, FcgError> {
    let config = load_config(config_path.as_deref())?;
    let reference = resolve_file_reference(file.as_deref(), &config)?;
    let options = resolve_image_options(scale, &config.images)?;
    let client = build_client(&config)?;

    let layout = build_layout(&client, &reference.file_key, options).await?;

    let path = resolve_layout_path(layout_path, &config);
    write_layout(&path, &layout)?;
    info!(path = %path.display(), "layout written");

    let missing_images = layout
        .frames
        .iter()
        .filter(|f| f.image_src().is_none())
        .map(|f| f.id.clone())
        .collect();

    Ok(FcgOutput::Extract(ExtractOutput {
        version: FCG_OUTPUT_VERSION.to_string(),
        file_key: reference.file_key,
        layout_path: path,
        page_background_color: layout.page_background_color,
        frame_count: layout.frames.len(),
        missing_images,
    }))
}
