use std::path::{Path, PathBuf};

use fcg_lib::config::ImageConfig;
use fcg_lib::figma::validate_scale;
use fcg_lib::{
    parse_file_reference, Config, FcgError, FigmaAuth, FigmaClient, FileReference,
    ImageExportOptions,
};
use tracing::debug;

/// Load config from a file, central config, or return defaults.
/// Priority: explicit path > ~/.config/fcg/config.toml > defaults
pub fn load_config(path: Option<&Path>) -> Result<Config, FcgError> {
    let cfg = Config::load(path).map_err(|e| {
        let loc = path
            .map(|p| p.display().to_string())
            .or_else(|| Config::central_config_path().map(|p| p.display().to_string()))
            .unwrap_or_else(|| "defaults".to_string());
        FcgError::Config(format!("Failed to read config {}: {}", loc, e))
    })?;

    cfg.validate().map_err(|e| {
        let prefix = path
            .map(|p| format!("Invalid config ({}): {}", p.display(), e))
            .unwrap_or_else(|| format!("Invalid config: {}", e));
        FcgError::Config(prefix)
    })?;
    debug!(
        source = %path.map(|p| p.display().to_string()).unwrap_or_else(|| "defaults".into()),
        "{}",
        format_effective_config(&cfg)
    );
    Ok(cfg)
}

/// File reference from the CLI, else `file_key` from config.
pub fn resolve_file_reference(
    cli_file: Option<&str>,
    config: &Config,
) -> Result<FileReference, FcgError> {
    let raw = cli_file
        .or(config.file_key.as_deref())
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| {
            FcgError::Config(
                "No Figma file key given; pass --file or set file_key in the config".to_string(),
            )
        })?;
    Ok(parse_file_reference(raw)?)
}

pub fn resolve_output_dir(cli: Option<PathBuf>, config: &Config) -> PathBuf {
    cli.unwrap_or_else(|| config.output_dir.clone())
}

pub fn resolve_layout_path(cli: Option<PathBuf>, config: &Config) -> PathBuf {
    cli.unwrap_or_else(|| config.layout_path.clone())
}

/// CLI scale over config scale. An out-of-range scale is rejected here, before
/// the image stage could degrade it into missing images.
pub fn resolve_image_options(
    cli_scale: Option<f32>,
    images: &ImageConfig,
) -> Result<ImageExportOptions, FcgError> {
    let scale = cli_scale.unwrap_or(images.scale);
    validate_scale(scale)?;
    Ok(ImageExportOptions {
        scale,
        format: images.format,
    })
}

/// Build a client from environment/config credentials and config timeouts.
pub fn build_client(config: &Config) -> Result<FigmaClient, FcgError> {
    let auth: FigmaAuth = config.auth().ok_or_else(|| {
        FcgError::Config(
            "Missing Figma token; set FIGMA_TOKEN or FIGMA_OAUTH_TOKEN, or token in the config"
                .to_string(),
        )
    })?;
    FigmaClient::with_base_url_and_timeouts(auth, &config.api_base_url, config.timeouts)
}

/// Format effective config as a single-line string. The token is never printed.
pub fn format_effective_config(config: &Config) -> String {
    format!(
        "Effective config: file_key={}, token={}, output_dir={}, layout_path={}, api={}, selector_prefix={}, timeouts: document={}s, images={}s, images: scale={}, format={}",
        config.file_key.as_deref().unwrap_or("-"),
        if config.token.is_some() { "set" } else { "unset" },
        config.output_dir.display(),
        config.layout_path.display(),
        config.api_base_url,
        config.component.selector_prefix,
        config.timeouts.document.as_secs(),
        config.timeouts.images.as_secs(),
        config.images.scale,
        config.images.format.as_str(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use fcg_lib::ImageFormat;
    use std::time::Duration;

    #[test]
    fn cli_file_reference_wins_over_config() {
        let cfg = Config {
            file_key: Some("FROMCONFIG".into()),
            ..Config::default()
        };
        let reference = resolve_file_reference(
            Some("https://www.figma.com/design/FROMCLI/Site?node-id=4-2"),
            &cfg,
        )
        .expect("reference");
        assert_eq!(reference.file_key, "FROMCLI");
        assert_eq!(reference.node_id.as_deref(), Some("4:2"));
    }

    #[test]
    fn config_file_key_is_the_fallback() {
        let cfg = Config {
            file_key: Some("FROMCONFIG".into()),
            ..Config::default()
        };
        let reference = resolve_file_reference(None, &cfg).expect("reference");
        assert_eq!(reference.file_key, "FROMCONFIG");
        assert!(reference.node_id.is_none());
    }

    #[test]
    fn missing_file_key_is_a_config_error() {
        let err = resolve_file_reference(None, &Config::default()).unwrap_err();
        assert!(matches!(err, FcgError::Config(ref m) if m.contains("file key")));
    }

    #[test]
    fn paths_prefer_cli() {
        let cfg = Config::default();
        assert_eq!(
            resolve_output_dir(Some(PathBuf::from("dist")), &cfg),
            PathBuf::from("dist")
        );
        assert_eq!(
            resolve_output_dir(None, &cfg),
            PathBuf::from("output_components")
        );
        assert_eq!(resolve_layout_path(None, &cfg), PathBuf::from("layout.json"));
    }

    #[test]
    fn image_options_take_cli_scale() {
        let images = ImageConfig {
            scale: 1.5,
            format: ImageFormat::Jpg,
        };
        let opts = resolve_image_options(Some(3.0), &images).expect("options");
        assert!((opts.scale - 3.0).abs() < f32::EPSILON);
        assert_eq!(opts.format.as_str(), "jpg");
        let opts = resolve_image_options(None, &images).expect("options");
        assert!((opts.scale - 1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn image_options_reject_cli_scale_out_of_range() {
        let images = ImageConfig {
            scale: 1.0,
            format: ImageFormat::Png,
        };
        let err = resolve_image_options(Some(10.0), &images).unwrap_err();
        assert!(matches!(err, FcgError::Config(_)));
    }

    #[test]
    fn format_effective_config_hides_token() {
        let mut cfg = Config {
            token: Some("secret-token".into()),
            ..Config::default()
        };
        cfg.timeouts.images = Duration::from_secs(12);
        let summary = format_effective_config(&cfg);
        assert!(summary.contains("token=set"));
        assert!(!summary.contains("secret-token"));
        assert!(summary.contains("images=12s"));
        assert!(summary.contains("format=png"));
    }
}
