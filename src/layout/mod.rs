//! Frame/canvas extraction, position normalization and the layout checkpoint file.

pub mod images;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{FcgError, Result};
use crate::figma::color::{color_or, first_solid, parse_hex, WHITE_HEX};
use crate::figma::{ColorEncoding, Geometry, Node, NodeKind};

pub use images::{download_assets, fetch_frame_images, merge_image_urls, IMAGE_NOT_FOUND};

/// Projection of one top-level frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRecord {
    pub id: String,
    pub name: String,
    pub width: i64,
    pub height: i64,
    pub x: i64,
    pub y: i64,
    pub background_color: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl FrameRecord {
    pub fn from_node(node: &Node) -> Self {
        let geometry = Geometry::read(node.absolute_bounding_box.as_ref());
        let background = node
            .background_color
            .as_ref()
            .or_else(|| first_solid(&node.fills));

        Self {
            id: node.id.clone(),
            name: node.name.clone(),
            width: round_px(geometry.width),
            height: round_px(geometry.height),
            x: round_px(geometry.x),
            y: round_px(geometry.y),
            background_color: color_or(background, ColorEncoding::Hex, WHITE_HEX),
            image_url: None,
        }
    }

    /// The image URL, unless missing or the "not found" sentinel.
    pub fn image_src(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .filter(|url| *url != IMAGE_NOT_FOUND && !url.is_empty())
    }
}

/// Page background plus frames in canvas order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub page_background_color: String,
    pub frames: Vec<FrameRecord>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            page_background_color: WHITE_HEX.to_string(),
            frames: Vec::new(),
        }
    }
}

impl Layout {
    /// Furthest right and bottom edges over all frames (0 when empty).
    pub fn extent(&self) -> (i64, i64) {
        self.frames.iter().fold((0, 0), |(w, h), f| {
            (
                w.max(f.x.saturating_add(f.width)),
                h.max(f.y.saturating_add(f.height)),
            )
        })
    }

    pub fn frame_ids(&self) -> Vec<String> {
        self.frames.iter().map(|f| f.id.clone()).collect()
    }
}

/// Pixel coordinates are kept within the `i32` range.
fn round_px(value: f64) -> i64 {
    if value.is_finite() {
        value.round().clamp(i32::MIN as f64, i32::MAX as f64) as i64
    } else {
        0
    }
}

/// First canvas of the document, its visible top-level frames, and its background.
///
/// A document without a canvas is not an error: the result is empty with a
/// white background.
pub fn extract_layout(document: &Node) -> Layout {
    let Some(canvas) = document.first_child_of_kind(NodeKind::Canvas) else {
        warn!("no canvas found in document; layout will be empty");
        return Layout::default();
    };

    let frames: Vec<FrameRecord> = canvas
        .children
        .iter()
        .filter(|c| c.kind == NodeKind::Frame && c.is_visible())
        .map(FrameRecord::from_node)
        .collect();
    debug!(canvas = %canvas.name, frames = frames.len(), "extracted frames");

    Layout {
        page_background_color: color_or(
            canvas.background_color.as_ref(),
            ColorEncoding::Hex,
            WHITE_HEX,
        ),
        frames,
    }
}

/// Shift frames so neither axis has a negative minimum. Non-negative minimums are left alone.
pub fn normalize_positions(frames: &mut [FrameRecord]) {
    let min_x = frames.iter().map(|f| f.x).min().unwrap_or(0);
    let min_y = frames.iter().map(|f| f.y).min().unwrap_or(0);
    let shift_x = if min_x < 0 { min_x.saturating_neg() } else { 0 };
    let shift_y = if min_y < 0 { min_y.saturating_neg() } else { 0 };

    if shift_x == 0 && shift_y == 0 {
        return;
    }
    debug!(shift_x, shift_y, "normalizing frame positions");
    for frame in frames.iter_mut() {
        frame.x = frame.x.saturating_add(shift_x);
        frame.y = frame.y.saturating_add(shift_y);
    }
}

pub fn write_layout(path: &Path, layout: &Layout) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(layout)?;
    fs::write(path, content)?;
    Ok(())
}

/// Read a layout checkpoint. Every color must be a `#rrggbb` or `#rgb` hex value.
pub fn read_layout(path: &Path) -> Result<Layout> {
    let content = fs::read_to_string(path)?;
    let layout: Layout = serde_json::from_str(&content)?;

    if !is_hex_color(&layout.page_background_color) {
        return Err(FcgError::document(format!(
            "layout {}: invalid page_background_color {:?}",
            path.display(),
            layout.page_background_color
        )));
    }
    if let Some(frame) = layout
        .frames
        .iter()
        .find(|f| !is_hex_color(&f.background_color))
    {
        return Err(FcgError::document(format!(
            "layout {}: frame {} has invalid background_color {:?}",
            path.display(),
            frame.id,
            frame.background_color
        )));
    }
    Ok(layout)
}

fn is_hex_color(value: &str) -> bool {
    value.starts_with('#') && value.trim() == value && parse_hex(value).is_some()
}
