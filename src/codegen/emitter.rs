//! Component emitter: markup, stylesheet and an Angular component class.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::slugify;
use crate::error::Result;

/// Identifier used when a name slugs down to nothing.
pub const FALLBACK_IDENTIFIER: &str = "figma-component";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmittedComponent {
    pub identifier: String,
    pub class_name: String,
    pub selector: String,
    pub files: Vec<PathBuf>,
}

pub fn component_identifier(name: &str) -> String {
    let slug = slugify(name);
    if slug.is_empty() {
        FALLBACK_IDENTIFIER.to_string()
    } else {
        slug
    }
}

/// `hero-banner` -> `HeroBannerComponent`
pub fn class_name(identifier: &str) -> String {
    let mut out: String = identifier
        .split('-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, 'C');
    }
    out.push_str("Component");
    out
}

pub fn component_class_source(identifier: &str, class_name: &str, selector: &str) -> String {
    format!(
        r#"import {{ Component, OnInit }} from '@angular/core';

@Component({{
  selector: '{selector}',
  templateUrl: './{identifier}.component.html',
  styleUrls: ['./{identifier}.component.css']
}})
export class {class_name} implements OnInit {{
  constructor() {{ }}
  ngOnInit(): void {{ }}
}}
"#
    )
}

/// Write `<id>.component.{html,css,ts}` into `output_dir`, replacing existing files.
pub fn emit_component(
    output_dir: &Path,
    identifier: &str,
    selector_prefix: &str,
    markup: &str,
    stylesheet: &str,
) -> Result<EmittedComponent> {
    let identifier = component_identifier(identifier);
    let class_name = class_name(&identifier);
    let selector = format!("{}-{}", selector_prefix.trim(), identifier);

    fs::create_dir_all(output_dir)?;

    let source = component_class_source(&identifier, &class_name, &selector);
    let outputs = [
        (format!("{identifier}.component.html"), markup),
        (format!("{identifier}.component.css"), stylesheet),
        (format!("{identifier}.component.ts"), source.as_str()),
    ];

    let mut files = Vec::with_capacity(outputs.len());
    for (file_name, content) in outputs {
        let path = output_dir.join(file_name);
        fs::write(&path, content)?;
        files.push(path);
    }

    info!(
        component = %identifier,
        dir = %output_dir.display(),
        "component written"
    );

    Ok(EmittedComponent {
        identifier,
        class_name,
        selector,
        files,
    })
}
