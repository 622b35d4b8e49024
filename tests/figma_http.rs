mod support;

use fcg_lib::{
    build_layout, FcgError, FigmaAuth, FigmaClient, ImageExportOptions, IMAGE_NOT_FOUND,
};
use serde_json::json;
use support::{sample_document, serve, Route};

fn client(base: &str) -> FigmaClient {
    FigmaClient::with_base_url(FigmaAuth::PersonalAccessToken("token".into()), base)
        .expect("client")
}

#[tokio::test]
async fn fetch_file_parses_document() {
    let base = serve(vec![Route::json("/v1/files/ABC123", 200, sample_document())]).await;

    let file = client(&base).fetch_file("ABC123").await.expect("fetch");
    assert_eq!(file.name, "Marketing Site");
    assert_eq!(file.document.children.len(), 1);
    assert_eq!(file.document.children[0].children.len(), 2);
}

#[tokio::test]
async fn forbidden_is_access_denied() {
    let base = serve(vec![Route::json(
        "/v1/files/",
        403,
        json!({ "status": 403, "err": "Invalid token" }),
    )])
    .await;

    let err = client(&base).fetch_file("ABC123").await.unwrap_err();
    match err {
        FcgError::AccessDenied { message } => assert_eq!(message, "Invalid token"),
        other => panic!("expected access denied, got {other:?}"),
    }
}

#[tokio::test]
async fn not_found_keeps_status() {
    let base = serve(vec![]).await;

    let err = client(&base).fetch_file("MISSING").await.unwrap_err();
    assert!(matches!(
        err,
        FcgError::FigmaApi { status: Some(s), .. } if s.as_u16() == 404
    ));
}

#[tokio::test]
async fn rate_limit_message_carries_retry_after() {
    let base = serve(vec![Route::json("/v1/files/", 429, json!({}))
        .with_header("Retry-After", "17")])
    .await;

    let err = client(&base).fetch_file("ABC123").await.unwrap_err();
    assert!(err.to_string().contains("retry after 17s"), "got: {err}");
}

#[tokio::test]
async fn export_images_drops_null_renders() {
    let base = serve(vec![Route::json(
        "/v1/images/ABC123",
        200,
        json!({
            "err": null,
            "images": { "1:2": "https://cdn.example/1-2.png", "2:1": null }
        }),
    )])
    .await;

    let images = client(&base)
        .export_images(
            "ABC123",
            &["1:2".to_string(), "2:1".to_string()],
            ImageExportOptions::default(),
        )
        .await
        .expect("export");
    assert_eq!(images.len(), 1);
    assert_eq!(images["1:2"], "https://cdn.example/1-2.png");
}

#[tokio::test]
async fn export_error_field_is_an_api_error() {
    let base = serve(vec![Route::json(
        "/v1/images/ABC123",
        200,
        json!({ "err": "Render timeout", "images": {} }),
    )])
    .await;

    let err = client(&base)
        .export_images("ABC123", &["1:2".to_string()], ImageExportOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, FcgError::FigmaApi { status: None, .. }));
}

#[tokio::test]
async fn layout_merges_images_and_normalizes() {
    let base = serve(vec![
        Route::json("/v1/files/ABC123", 200, sample_document()),
        Route::json(
            "/v1/images/ABC123",
            200,
            json!({ "err": null, "images": { "1:2": "https://cdn.example/home.png" } }),
        ),
    ])
    .await;

    let layout = build_layout(&client(&base), "ABC123", ImageExportOptions::default())
        .await
        .expect("layout");

    assert_eq!(layout.page_background_color, "#e5e5e5");
    let home = &layout.frames[0];
    let about = &layout.frames[1];
    assert_eq!((home.x, about.x), (0, 1600));
    assert_eq!(home.image_url.as_deref(), Some("https://cdn.example/home.png"));
    assert_eq!(about.image_url.as_deref(), Some(IMAGE_NOT_FOUND));
    assert_eq!(about.background_color, "#ffffff");
}

#[tokio::test]
async fn layout_survives_image_endpoint_failure() {
    let base = serve(vec![
        Route::json("/v1/files/ABC123", 200, sample_document()),
        Route::json("/v1/images/ABC123", 500, json!({ "err": "boom" })),
    ])
    .await;

    let layout = build_layout(&client(&base), "ABC123", ImageExportOptions::default())
        .await
        .expect("layout");

    assert_eq!(layout.frames.len(), 2);
    assert!(layout
        .frames
        .iter()
        .all(|f| f.image_url.as_deref() == Some(IMAGE_NOT_FOUND)));
}
