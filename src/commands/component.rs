use std::path::{Path, PathBuf};
use std::process::ExitCode;

use fcg_lib::{generate_component, ComponentTarget, FcgError, FcgOutput, FigmaFile};
use tracing::info;

use super::{component_output, finish};
use crate::cli::OutputFormat;
use crate::settings::{build_client, load_config, resolve_file_reference, resolve_output_dir};

/// Run the component command.
#[allow(clippy::too_many_arguments)]
pub async fn run_component(
    config_path: Option<PathBuf>,
    file: Option<String>,
    input: Option<PathBuf>,
    node_id: Option<String>,
    name: Option<String>,
    output_dir: Option<PathBuf>,
    format: OutputFormat,
) -> ExitCode {
    let result = component(config_path, file, input, node_id, name, output_dir).await;
    finish(result, format)
}

async fn component(
    config_path: Option<PathBuf>,
    file: Option<String>,
    input: Option<PathBuf>,
    node_id: Option<String>,
    name: Option<String>,
    output_dir: Option<PathBuf>,
) -> Result<FcgOutput, FcgError> {
    let config = load_config(config_path.as_deref())?;

    let (document, url_node_id) = match input {
        Some(path) => (read_document(&path)?, None),
        None => {
            let reference = resolve_file_reference(file.as_deref(), &config)?;
            let client = build_client(&config)?;
            let document = client.fetch_file(&reference.file_key).await?;
            (document, reference.node_id)
        }
    };
    info!(document = %document.name, "document loaded");

    let output_dir = resolve_output_dir(output_dir, &config);
    let target = ComponentTarget {
        output_dir: &output_dir,
        name: name.as_deref().or(config.component.name.as_deref()),
        selector_prefix: &config.component.selector_prefix,
    };
    let node_id = node_id.or(url_node_id);
    let emitted = generate_component(&document.document, node_id.as_deref(), &target)?;

    Ok(FcgOutput::Component(component_output(emitted, Vec::new())))
}

/// A document saved by `fcg fetch`.
fn read_document(path: &Path) -> Result<FigmaFile, FcgError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
