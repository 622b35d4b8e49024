use std::fmt::Write as FmtWrite;
use std::io::{self, IsTerminal};
use std::process::ExitCode;

use fcg_lib::{ErrorOutput, FcgError, FcgOutput, FCG_OUTPUT_VERSION};

use crate::cli::OutputFormat;

/// Write the status payload to stdout in the requested format.
pub fn write_output(body: &FcgOutput, format: OutputFormat) -> Result<(), FcgError> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(body)?),
        OutputFormat::Pretty => write_pretty_output(body)?,
    }
    Ok(())
}

/// Render an error and return the fatal exit code.
pub fn render_error(err: FcgError, format: OutputFormat) -> ExitCode {
    tracing::debug!(error = ?err, "command failed");
    let error_payload = err.to_payload();
    let payload = FcgOutput::Error(ErrorOutput {
        version: FCG_OUTPUT_VERSION.to_string(),
        message: Some(error_payload.message.clone()),
        error: error_payload,
    });

    match format {
        OutputFormat::Json => {
            let content =
                serde_json::to_string(&payload).unwrap_or_else(|_| "{\"mode\":\"error\"}".into());
            println!("{content}");
        }
        OutputFormat::Pretty => {
            if let Err(write_err) = write_pretty_output(&payload) {
                eprintln!("Failed to write error output: {}", write_err);
            }
        }
    };

    ExitCode::from(2)
}

fn write_pretty_output(body: &FcgOutput) -> io::Result<()> {
    if io::stdout().is_terminal() {
        println!("{}", format_pretty(body, true));
        return Ok(());
    }

    // Non-tty: keep the JSON shape for pipelines.
    let content =
        serde_json::to_string_pretty(body).unwrap_or_else(|_| "{\"mode\":\"error\"}".to_string());
    println!("{content}");
    Ok(())
}

/// Format output for human consumption in a terminal.
pub fn format_pretty(body: &FcgOutput, colorize: bool) -> String {
    let mut buf = String::new();
    match body {
        FcgOutput::Fetch(out) => {
            let header = color("[FETCH]", "36", colorize);
            writeln!(buf, "{} {} ({})", header, out.document_name, out.file_key).ok();
            writeln!(buf, "Saved: {}", out.output_path.display()).ok();
        }
        FcgOutput::Component(out) | FcgOutput::Emit(out) => {
            let label = if matches!(body, FcgOutput::Emit(_)) {
                "[EMIT]"
            } else {
                "[COMPONENT]"
            };
            let header = color(label, "32", colorize);
            writeln!(buf, "{} {} <{}>", header, out.class_name, out.selector).ok();
            writeln!(buf, "Files:").ok();
            for file in &out.files {
                writeln!(buf, "- {}", file.display()).ok();
            }
            if !out.assets.is_empty() {
                writeln!(buf, "Assets:").ok();
                for asset in &out.assets {
                    writeln!(buf, "- {}", asset.display()).ok();
                }
            }
        }
        FcgOutput::Extract(out) => {
            let header = color("[EXTRACT]", "34", colorize);
            writeln!(
                buf,
                "{} {} frame(s) from {}",
                header, out.frame_count, out.file_key
            )
            .ok();
            writeln!(buf, "Page background: {}", out.page_background_color).ok();
            writeln!(buf, "Layout: {}", out.layout_path.display()).ok();
            if !out.missing_images.is_empty() {
                let warn = color("Missing images:", "33", colorize);
                writeln!(buf, "{} {}", warn, out.missing_images.join(", ")).ok();
            }
        }
        FcgOutput::Error(out) => {
            let header = color("[ERROR]", "31", colorize);
            let message = out
                .message
                .as_deref()
                .unwrap_or_else(|| out.error.message.as_str());
            writeln!(buf, "{} {}", header, message).ok();
            if let Some(remediation) = &out.error.remediation {
                writeln!(buf, "Hint: {}", remediation).ok();
            }
        }
    }
    buf
}

fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fcg_lib::{ComponentOutput, ErrorCategory, ErrorPayload, ExtractOutput};
    use std::path::PathBuf;

    #[test]
    fn render_error_always_returns_fatal_exit_code() {
        let code = render_error(FcgError::Config("boom".to_string()), OutputFormat::Json);
        assert_eq!(code, ExitCode::from(2));
    }

    #[test]
    fn format_pretty_lists_component_files() {
        let output = FcgOutput::Component(ComponentOutput {
            version: FCG_OUTPUT_VERSION.to_string(),
            identifier: "card".into(),
            class_name: "CardComponent".into(),
            selector: "app-card".into(),
            files: vec![
                PathBuf::from("out/card.component.html"),
                PathBuf::from("out/card.component.css"),
            ],
            assets: Vec::new(),
        });

        let pretty = format_pretty(&output, false);
        assert!(pretty.contains("[COMPONENT] CardComponent <app-card>"));
        assert!(pretty.contains("- out/card.component.css"));
        assert!(!pretty.contains("Assets:"));
    }

    #[test]
    fn format_pretty_flags_missing_images() {
        let output = FcgOutput::Extract(ExtractOutput {
            version: FCG_OUTPUT_VERSION.to_string(),
            file_key: "ABC123".into(),
            layout_path: PathBuf::from("layout.json"),
            page_background_color: "#e5e5e5".into(),
            frame_count: 2,
            missing_images: vec!["1:3".into()],
        });

        let pretty = format_pretty(&output, false);
        assert!(pretty.contains("[EXTRACT] 2 frame(s) from ABC123"));
        assert!(pretty.contains("Missing images: 1:3"));
    }

    #[test]
    fn format_pretty_handles_errors() {
        let output = FcgOutput::Error(ErrorOutput {
            version: FCG_OUTPUT_VERSION.to_string(),
            message: Some("bad input".to_string()),
            error: ErrorPayload {
                category: ErrorCategory::Config,
                message: "bad input".to_string(),
                remediation: Some("check flags".to_string()),
            },
        });

        let pretty = format_pretty(&output, false);
        assert!(pretty.contains("[ERROR] bad input"));
        assert!(pretty.contains("Hint: check flags"));
    }
}
