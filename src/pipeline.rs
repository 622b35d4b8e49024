//! End-to-end stages shared by the CLI commands.
//!
//! Document fetch failures are fatal. Missing canvases and image export
//! failures degrade to empty results and a logged warning.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::codegen::page::render_page;
use crate::codegen::{emit_component, walk_frame, EmittedComponent};
use crate::config::DEFAULT_LAYOUT_NAME;
use crate::error::Result;
use crate::figma::{select_frame, FigmaClient, ImageExportOptions, Node};
use crate::layout::{
    extract_layout, fetch_frame_images, merge_image_urls, normalize_positions, Layout,
};

/// Where and under which name a component is written.
#[derive(Debug, Clone)]
pub struct ComponentTarget<'a> {
    pub output_dir: &'a Path,
    /// Overrides the name taken from the frame.
    pub name: Option<&'a str>,
    pub selector_prefix: &'a str,
}

/// Fetch the document, extract frames, attach image URLs and normalize positions.
pub async fn build_layout(
    client: &FigmaClient,
    file_key: &str,
    options: ImageExportOptions,
) -> Result<Layout> {
    let file = client.fetch_file(file_key).await?;
    info!(document = %file.name, "fetched document");

    let mut layout = extract_layout(&file.document);
    let ids = layout.frame_ids();
    let images = fetch_frame_images(client, file_key, &ids, options).await;
    merge_image_urls(&mut layout.frames, &images);
    normalize_positions(&mut layout.frames);

    info!(frames = layout.frames.len(), "layout ready");
    Ok(layout)
}

/// Walk the selected frame and write its component files.
pub fn generate_component(
    document: &Node,
    node_id: Option<&str>,
    target: &ComponentTarget<'_>,
) -> Result<EmittedComponent> {
    let frame = select_frame(document, node_id)?;
    info!(frame = %frame.name, id = %frame.id, children = frame.children.len(), "walking frame");

    let walked = walk_frame(frame);
    let name = target.name.unwrap_or(&frame.name);
    emit_component(
        target.output_dir,
        name,
        target.selector_prefix,
        &walked.markup,
        &walked.stylesheet,
    )
}

/// Write the page component for a layout checkpoint.
pub fn generate_page(
    layout: &Layout,
    assets: &HashMap<String, PathBuf>,
    target: &ComponentTarget<'_>,
) -> Result<EmittedComponent> {
    let page = render_page(layout, assets);
    emit_component(
        target.output_dir,
        target.name.unwrap_or(DEFAULT_LAYOUT_NAME),
        target.selector_prefix,
        &page.markup,
        &page.stylesheet,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figma::FigmaAuth;
    use crate::layout::IMAGE_NOT_FOUND;
    use crate::FcgError;
    use serde_json::json;
    use tempfile::TempDir;

    fn document() -> Node {
        serde_json::from_value(json!({
            "id": "0:0",
            "type": "DOCUMENT",
            "children": [{
                "id": "0:1",
                "type": "CANVAS",
                "children": [{
                    "id": "1:1",
                    "name": "Landing Page",
                    "type": "FRAME",
                    "children": [
                        { "id": "1:2", "name": "Title", "type": "TEXT", "characters": "Hello",
                          "absoluteBoundingBox": { "x": 10, "y": 10, "width": 100, "height": 30 } },
                        { "id": "1:3", "name": "Box", "type": "RECTANGLE" }
                    ]
                }]
            }]
        }))
        .expect("document")
    }

    #[test]
    fn component_uses_first_frame_by_default() {
        let dir = TempDir::new().expect("tempdir");
        let target = ComponentTarget {
            output_dir: dir.path(),
            name: None,
            selector_prefix: "app",
        };

        let emitted = generate_component(&document(), None, &target).expect("component");
        assert_eq!(emitted.identifier, "landing-page");
        assert_eq!(emitted.selector, "app-landing-page");
        let html = std::fs::read_to_string(dir.path().join("landing-page.component.html"))
            .expect("html");
        assert!(html.contains(">Hello</p>"));
        assert!(html.contains("class=\"box\""));
    }

    #[test]
    fn component_name_override_wins() {
        let dir = TempDir::new().expect("tempdir");
        let target = ComponentTarget {
            output_dir: dir.path(),
            name: Some("Hero"),
            selector_prefix: "ui",
        };

        let emitted = generate_component(&document(), None, &target).expect("component");
        assert_eq!(emitted.class_name, "HeroComponent");
        assert_eq!(emitted.selector, "ui-hero");
    }

    #[test]
    fn unknown_node_id_is_a_document_error() {
        let dir = TempDir::new().expect("tempdir");
        let target = ComponentTarget {
            output_dir: dir.path(),
            name: None,
            selector_prefix: "app",
        };

        let err = generate_component(&document(), Some("9:9"), &target).unwrap_err();
        assert!(matches!(err, FcgError::Document(_)));
        assert!(std::fs::read_dir(dir.path()).expect("dir").next().is_none());
    }

    #[test]
    fn page_defaults_to_layout_identifier() {
        let dir = TempDir::new().expect("tempdir");
        let layout = Layout {
            page_background_color: "#ffffff".into(),
            frames: vec![crate::layout::FrameRecord {
                id: "1:1".into(),
                name: "Home".into(),
                width: 10,
                height: 10,
                x: 0,
                y: 0,
                background_color: "#000000".into(),
                image_url: Some(IMAGE_NOT_FOUND.into()),
            }],
        };
        let target = ComponentTarget {
            output_dir: dir.path(),
            name: None,
            selector_prefix: "app",
        };

        let emitted = generate_page(&layout, &HashMap::new(), &target).expect("page");
        assert_eq!(emitted.identifier, "figma-layout");
        assert!(dir.path().join("figma-layout.component.css").is_file());
    }

    #[tokio::test]
    async fn document_fetch_failure_is_fatal() {
        let client = FigmaClient::with_base_url(
            FigmaAuth::PersonalAccessToken("token".into()),
            "http://127.0.0.1:1",
        )
        .expect("client");

        let err = build_layout(&client, "ABC123", ImageExportOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, FcgError::Network(_)));
    }
}
