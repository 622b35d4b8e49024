//! Tree walker: a frame's direct children to markup and stylesheet text.

use std::fmt::Write as FmtWrite;

use super::render::render_node;
use super::{sanitize_name, ClassNames};
use crate::figma::color::{paint_color, TRANSPARENT};
use crate::figma::{ColorEncoding, Geometry, Node};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalkOutput {
    pub markup: String,
    pub stylesheet: String,
}

/// Walk the direct children of `frame` in order. Class names are shared between
/// the markup and the stylesheet.
pub fn walk_frame(frame: &Node) -> WalkOutput {
    let mut names = ClassNames::new();
    let mut out = WalkOutput::default();

    for child in &frame.children {
        let class_name = names.allocate(&sanitize_name(&child.name), &child.id);

        if let Some(fragment) = render_node(child, &class_name) {
            out.markup.push_str(&fragment.markup);
        }
        if let Some(rule) = style_rule(child, &class_name) {
            out.stylesheet.push_str(&rule);
        }
    }

    out
}

/// Class rule for a child that carries a bounding box.
fn style_rule(node: &Node, class_name: &str) -> Option<String> {
    let bbox = node.absolute_bounding_box.as_ref()?;
    let geometry = Geometry::read(Some(bbox));

    let mut rule = String::new();
    writeln!(rule, ".{class_name} {{").ok();
    writeln!(rule, "    position: absolute;").ok();
    writeln!(rule, "    left: {}px; top: {}px;", geometry.x, geometry.y).ok();
    writeln!(
        rule,
        "    width: {}px; height: {}px;",
        geometry.width, geometry.height
    )
    .ok();
    if !node.fills.is_empty() {
        writeln!(
            rule,
            "    background-color: {};",
            paint_color(&node.fills, ColorEncoding::Rgb, TRANSPARENT)
        )
        .ok();
    }
    rule.push_str("}\n\n");
    Some(rule)
}
