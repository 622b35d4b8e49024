use thiserror::Error;
use url::Url;

/// A Figma file addressed either by its raw key or by a share URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference {
    pub file_key: String,
    pub node_id: Option<String>,
}

#[derive(Debug, Error)]
pub enum ResourceParseError {
    #[error("Empty Figma file reference. Hint: pass a file key or a Figma URL.")]
    EmptyReference,
    #[error("Invalid URL '{value}': {message}. Hint: include http(s):// and ensure the URL is well-formed.")]
    InvalidUrl { value: String, message: String },
    #[error("'{url}' is not a Figma URL. Hint: use https://www.figma.com/file/<FILE_KEY>/... or a raw file key.")]
    NotFigmaUrl { url: String },
    #[error("Figma URL missing file key in '{url}'. Hint: use https://www.figma.com/file/<FILE_KEY>/... and node-id if needed.")]
    FigmaMissingFileKey { url: String },
    #[error("Invalid Figma file key '{key}'. Hint: file keys are alphanumeric.")]
    InvalidFileKey { key: String },
}

pub fn parse_file_reference(value: &str) -> Result<FileReference, ResourceParseError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ResourceParseError::EmptyReference);
    }

    if value.starts_with("http://") || value.starts_with("https://") {
        return parse_figma_url(value);
    }

    if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ResourceParseError::InvalidFileKey {
            key: value.to_string(),
        });
    }

    Ok(FileReference {
        file_key: value.to_string(),
        node_id: None,
    })
}

fn parse_figma_url(value: &str) -> Result<FileReference, ResourceParseError> {
    let url = Url::parse(value).map_err(|e| ResourceParseError::InvalidUrl {
        value: value.to_string(),
        message: e.to_string(),
    })?;

    let host = url.host_str().unwrap_or("");
    if !host.contains("figma.com") {
        return Err(ResourceParseError::NotFigmaUrl {
            url: value.to_string(),
        });
    }

    let path_segments: Vec<&str> = url.path_segments().map(|c| c.collect()).unwrap_or_default();

    let file_key = path_segments
        .iter()
        .position(|&s| s == "file" || s == "design")
        .and_then(|i| path_segments.get(i + 1))
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .ok_or_else(|| ResourceParseError::FigmaMissingFileKey {
            url: value.to_string(),
        })?;

    let node_id = url
        .query_pairs()
        .find(|(k, _)| k == "node-id")
        .map(|(_, v)| v.replace('-', ":"));

    Ok(FileReference { file_key, node_id })
}
