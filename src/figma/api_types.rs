//! Figma API response types for parsing JSON from the Figma REST API.
//!
//! Optional fields are resolved here, at the document boundary, so the rest of
//! the crate never has to probe raw JSON.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;

/// Supported image export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpg,
    Svg,
    Pdf,
}

impl ImageFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Svg => "svg",
            ImageFormat::Pdf => "pdf",
        }
    }
}

/// A Figma file response from the files endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaFile {
    #[serde(default)]
    pub name: String,
    pub document: Node,
}

/// Node type tag. Unknown tags become [`NodeKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "String")]
pub enum NodeKind {
    Document,
    Canvas,
    Frame,
    Text,
    Rectangle,
    Ellipse,
    #[default]
    Other,
}

impl From<String> for NodeKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "DOCUMENT" => NodeKind::Document,
            "CANVAS" => NodeKind::Canvas,
            "FRAME" => NodeKind::Frame,
            "TEXT" => NodeKind::Text,
            "RECTANGLE" => NodeKind::Rectangle,
            "ELLIPSE" => NodeKind::Ellipse,
            _ => NodeKind::Other,
        }
    }
}

/// One node of the document tree.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: NodeKind,
    /// Absent means visible.
    pub visible: Option<bool>,
    pub absolute_bounding_box: Option<BoundingBox>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fills: Vec<Paint>,
    pub background_color: Option<Color>,
    pub characters: Option<String>,
    pub style: Option<TypeStyle>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }

    pub fn first_child_of_kind(&self, kind: NodeKind) -> Option<&Node> {
        self.children.iter().find(|c| c.kind == kind)
    }

    /// Depth-first search for a node by id, including `self`.
    pub fn find_by_id(&self, id: &str) -> Option<&Node> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_id(id))
    }
}

/// Bounding box coordinates from Figma. Each field may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct BoundingBox {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// Typography style from Figma. Only the font size reaches generated markup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeStyle {
    pub font_size: Option<f64>,
}

/// Paint/fill data from Figma.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paint {
    #[serde(rename = "type", default)]
    pub paint_type: String,
    pub visible: Option<bool>,
    pub color: Option<Color>,
}

/// Color from Figma (0.0-1.0 range). Alpha is not carried into CSS and is not read.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Color {
    #[serde(default, deserialize_with = "lenient_channel")]
    pub r: f64,
    #[serde(default, deserialize_with = "lenient_channel")]
    pub g: f64,
    #[serde(default, deserialize_with = "lenient_channel")]
    pub b: f64,
}

impl Color {
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

/// Malformed channels (strings, null, NaN) read as 0.
fn lenient_channel<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0))
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Response from the images export endpoint. Nodes that failed to render map to `null`.
#[derive(Debug, Deserialize)]
pub struct FigmaImageExport {
    #[serde(default)]
    pub images: HashMap<String, Option<String>>,
    #[serde(default)]
    pub err: Option<String>,
}
