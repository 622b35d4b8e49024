use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;

use fcg_lib::{download_assets, generate_page, read_layout, ComponentTarget, FcgError, FcgOutput};
use tracing::info;

use super::{component_output, finish};
use crate::cli::OutputFormat;
use crate::settings::{build_client, load_config, resolve_layout_path, resolve_output_dir};

const ASSETS_DIR: &str = "assets";

/// Run the emit command.
pub async fn run_emit(
    config_path: Option<PathBuf>,
    layout: Option<PathBuf>,
    name: Option<String>,
    output_dir: Option<PathBuf>,
    download: bool,
    format: OutputFormat,
) -> ExitCode {
    let result = emit(config_path, layout, name, output_dir, download).await;
    finish(result, format)
}

async fn emit(
    config_path: Option<PathBuf>,
    layout_path: Option<PathBuf>,
    name: Option<String>,
    output_dir: Option<PathBuf>,
    download: bool,
) -> Result<FcgOutput, FcgError> {
    let config = load_config(config_path.as_deref())?;
    let layout_path = resolve_layout_path(layout_path, &config);
    let layout = read_layout(&layout_path).map_err(|err| match err {
        FcgError::Io(e) => FcgError::Config(format!(
            "Cannot read layout file {}: {e}; run `fcg extract` first",
            layout_path.display()
        )),
        other => other,
    })?;
    info!(path = %layout_path.display(), frames = layout.frames.len(), "layout loaded");

    let output_dir = resolve_output_dir(output_dir, &config);
    let assets = if download {
        let client = build_client(&config)?;
        download_assets(&client, &layout, &output_dir.join(ASSETS_DIR)).await?
    } else {
        HashMap::new()
    };

    let target = ComponentTarget {
        output_dir: &output_dir,
        name: Some(name.as_deref().unwrap_or(&config.component.layout_name)),
        selector_prefix: &config.component.selector_prefix,
    };
    let emitted = generate_page(&layout, &assets, &target)?;

    let mut asset_paths: Vec<PathBuf> = assets.values().map(|p| output_dir.join(p)).collect();
    asset_paths.sort();
    Ok(FcgOutput::Emit(component_output(emitted, asset_paths)))
}
