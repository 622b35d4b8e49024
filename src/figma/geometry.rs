//! Bounding-box resolution with per-field defaults.

use super::api_types::BoundingBox;

/// Default width/height for shapes placed without a size.
pub const SHAPE_DEFAULT_SIZE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    /// Every missing field becomes 0.
    pub fn read(bbox: Option<&BoundingBox>) -> Self {
        Self::read_with_size_default(bbox, 0.0)
    }

    /// Missing x/y become 0, missing width/height become [`SHAPE_DEFAULT_SIZE`].
    pub fn read_for_shape(bbox: Option<&BoundingBox>) -> Self {
        Self::read_with_size_default(bbox, SHAPE_DEFAULT_SIZE)
    }

    fn read_with_size_default(bbox: Option<&BoundingBox>, size: f64) -> Self {
        let bbox = bbox.copied().unwrap_or_default();
        Self {
            x: finite_or(bbox.x, 0.0),
            y: finite_or(bbox.y, 0.0),
            width: finite_or(bbox.width, size),
            height: finite_or(bbox.height, size),
        }
    }

    pub fn position_style(&self) -> String {
        format!(
            "position: absolute; left: {}px; top: {}px; width: {}px; height: {}px;",
            self.x, self.y, self.width, self.height
        )
    }
}

fn finite_or(value: Option<f64>, default: f64) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(default)
}
