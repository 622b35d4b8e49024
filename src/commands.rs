mod component;
mod emit;
mod extract;
mod fetch;

use std::process::ExitCode;

use fcg_lib::{ComponentOutput, EmittedComponent, FcgError, FcgOutput, FCG_OUTPUT_VERSION};

use crate::cli::OutputFormat;
use crate::formatting::{render_error, write_output};

pub use component::run_component;
pub use emit::run_emit;
pub use extract::run_extract;
pub use fetch::run_fetch;

/// Print the payload (or the error) and map it to an exit code.
fn finish(result: Result<FcgOutput, FcgError>, format: OutputFormat) -> ExitCode {
    match result.and_then(|body| write_output(&body, format)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => render_error(err, format),
    }
}

fn component_output(emitted: EmittedComponent, assets: Vec<std::path::PathBuf>) -> ComponentOutput {
    ComponentOutput {
        version: FCG_OUTPUT_VERSION.to_string(),
        identifier: emitted.identifier,
        class_name: emitted.class_name,
        selector: emitted.selector,
        files: emitted.files,
        assets,
    }
}
