use fcg_lib::FcgError;

#[test]
fn config_error_display_includes_message() {
    let err = FcgError::Config("missing file key".to_string());

    assert_eq!(format!("{}", err), "Configuration error: missing file key");
}

#[test]
fn io_error_display_wraps_source() {
    let io_err = std::io::Error::other("disk full");
    let err: FcgError = io_err.into();
    let rendered = format!("{}", err);

    assert!(rendered.starts_with("IO error: "));
    assert!(rendered.contains("disk full"));
}

#[test]
fn figma_api_helper_includes_status_and_message() {
    let err = FcgError::figma_api(Some(reqwest::StatusCode::NOT_FOUND), "not found");

    assert_eq!(
        format!("{}", err),
        "Figma API error (status: Some(404)): not found"
    );
}

#[test]
fn figma_api_helper_handles_missing_status() {
    let err = FcgError::figma_api(None, "render timeout");

    assert_eq!(
        format!("{}", err),
        "Figma API error (status: None): render timeout"
    );
}

#[test]
fn document_helper_uses_message() {
    let err = FcgError::document("no frame on first page");

    assert_eq!(
        format!("{}", err),
        "Document structure error: no frame on first page"
    );
}

#[test]
fn access_denied_display_includes_message() {
    let err = FcgError::AccessDenied {
        message: "token lacks access".to_string(),
    };

    assert_eq!(format!("{}", err), "Access denied: token lacks access");
}
