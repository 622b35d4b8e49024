//! Node renderer: one child node to one positioned element.
//!
//! Dispatch goes through [`renderer_for`], a table from [`NodeKind`] to a
//! render function. Kinds without a renderer produce nothing.

use crate::figma::color::{paint_color, TRANSPARENT};
use crate::figma::{ColorEncoding, Geometry, Node, NodeKind};

/// Font size used when a text node carries no style.
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

/// Rendered element: the markup line and the inline style it carries.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub markup: String,
    pub style: String,
}

pub type RenderFn = fn(&Node, &str) -> Option<Fragment>;

pub fn renderer_for(kind: NodeKind) -> RenderFn {
    match kind {
        NodeKind::Text => render_text,
        NodeKind::Rectangle => render_rectangle,
        NodeKind::Ellipse => render_ellipse,
        NodeKind::Document | NodeKind::Canvas | NodeKind::Frame | NodeKind::Other => skip,
    }
}

pub fn render_node(node: &Node, class_name: &str) -> Option<Fragment> {
    renderer_for(node.kind)(node, class_name)
}

fn fill_color(node: &Node) -> String {
    paint_color(&node.fills, ColorEncoding::Rgb, TRANSPARENT)
}

fn render_text(node: &Node, class_name: &str) -> Option<Fragment> {
    let geometry = Geometry::read_for_shape(node.absolute_bounding_box.as_ref());
    let font_size = node
        .style
        .as_ref()
        .and_then(|s| s.font_size)
        .filter(|s| s.is_finite())
        .unwrap_or(DEFAULT_FONT_SIZE);
    let style = format!(
        "{} font-size: {}px; color: {};",
        geometry.position_style(),
        font_size,
        fill_color(node)
    );
    // Text is emitted verbatim.
    let text = node.characters.as_deref().unwrap_or("");
    Some(Fragment {
        markup: format!("<p class=\"{class_name}\" style=\"{style}\">{text}</p>\n"),
        style,
    })
}

fn render_rectangle(node: &Node, class_name: &str) -> Option<Fragment> {
    let style = box_style(node, "");
    Some(block(class_name, style))
}

fn render_ellipse(node: &Node, class_name: &str) -> Option<Fragment> {
    let style = box_style(node, " border-radius: 50%;");
    Some(block(class_name, style))
}

fn skip(_node: &Node, _class_name: &str) -> Option<Fragment> {
    None
}

fn box_style(node: &Node, extra: &str) -> String {
    let geometry = Geometry::read_for_shape(node.absolute_bounding_box.as_ref());
    format!(
        "{} background-color: {};{extra}",
        geometry.position_style(),
        fill_color(node)
    )
}

fn block(class_name: &str, style: String) -> Fragment {
    Fragment {
        markup: format!("<div class=\"{class_name}\" style=\"{style}\"></div>\n"),
        style,
    }
}
