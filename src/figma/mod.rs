//! Figma integration: the document model, the REST client, and the
//! per-node attribute readers used by code generation.
//!
//! This module provides:
//! - [`FigmaClient`] - HTTP client for the Figma REST API
//! - [`Node`] / [`NodeKind`] - the typed document tree
//! - [`color`] - paint to CSS color conversion
//! - [`geometry`] - bounding boxes with defaults applied

pub mod api_types;
pub mod client;
pub mod color;
pub mod geometry;


pub use api_types::{
    BoundingBox, Color, FigmaFile, FigmaImageExport, ImageFormat, Node, NodeKind, Paint,
    TypeStyle,
};
pub use client::{validate_scale, FigmaAuth, FigmaClient, ImageExportOptions, MAX_SCALE, MIN_SCALE};
pub use color::ColorEncoding;
pub use geometry::Geometry;

use crate::error::{FcgError, Result};

/// Pick the frame a component is generated from.
///
/// With a node id the matching node anywhere in the tree is used; otherwise the
/// first frame of the first canvas.
pub fn select_frame<'a>(document: &'a Node, node_id: Option<&str>) -> Result<&'a Node> {
    if let Some(id) = node_id {
        return document
            .find_by_id(id)
            .ok_or_else(|| FcgError::document(format!("node {id} not found in document")));
    }

    let canvas = document
        .first_child_of_kind(NodeKind::Canvas)
        .ok_or_else(|| FcgError::document("no canvas found in document"))?;
    canvas
        .first_child_of_kind(NodeKind::Frame)
        .ok_or_else(|| {
            FcgError::document(format!("canvas '{}' contains no frame", canvas.name))
        })
}
