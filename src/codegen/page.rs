//! Page emission from a layout checkpoint: frames as absolutely positioned blocks.

use std::collections::HashMap;
use std::fmt::Write as FmtWrite;
use std::path::PathBuf;

use super::{escape_attr, slugify, ClassNames};
use crate::layout::{FrameRecord, Layout};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageOutput {
    pub markup: String,
    pub stylesheet: String,
}

/// Render the page. `assets` maps frame ids to local image paths that replace
/// the remote URL.
pub fn render_page(layout: &Layout, assets: &HashMap<String, PathBuf>) -> PageOutput {
    let mut names = ClassNames::new();
    let classes: Vec<String> = layout
        .frames
        .iter()
        .map(|f| names.allocate(&format!("frame-{}", slugify(&f.name)), &f.id))
        .collect();

    PageOutput {
        markup: page_markup(layout, &classes, assets),
        stylesheet: page_stylesheet(layout, &classes),
    }
}

fn page_markup(
    layout: &Layout,
    classes: &[String],
    assets: &HashMap<String, PathBuf>,
) -> String {
    let mut html = String::from("<div class=\"page\">\n");
    for (frame, class) in layout.frames.iter().zip(classes) {
        writeln!(
            html,
            "  <div class=\"frame {class}\" data-node-id=\"{}\">",
            escape_attr(&frame.id)
        )
        .ok();
        if let Some(src) = image_source(frame, assets) {
            writeln!(
                html,
                "    <img src=\"{}\" alt=\"{}\" width=\"{}\" height=\"{}\">",
                escape_attr(&src),
                escape_attr(&frame.name),
                frame.width,
                frame.height
            )
            .ok();
        }
        html.push_str("  </div>\n");
    }
    html.push_str("</div>\n");
    html
}

fn image_source(frame: &FrameRecord, assets: &HashMap<String, PathBuf>) -> Option<String> {
    if let Some(local) = assets.get(&frame.id) {
        // Forward slashes so the path works as a URL on every platform.
        let parts: Vec<String> = local
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        return Some(parts.join("/"));
    }
    frame.image_src().map(str::to_owned)
}

fn page_stylesheet(layout: &Layout, classes: &[String]) -> String {
    let (width, height) = layout.extent();
    let mut css = String::new();

    writeln!(css, ".page {{").ok();
    writeln!(css, "    position: relative;").ok();
    writeln!(css, "    width: {width}px; height: {height}px;").ok();
    writeln!(css, "    background-color: {};", layout.page_background_color).ok();
    css.push_str("}\n\n");

    css.push_str(".frame {\n    position: absolute;\n    overflow: hidden;\n}\n\n");
    css.push_str(".frame img {\n    display: block;\n    width: 100%;\n    height: 100%;\n}\n\n");

    for (frame, class) in layout.frames.iter().zip(classes) {
        writeln!(css, ".{class} {{").ok();
        writeln!(css, "    left: {}px; top: {}px;", frame.x, frame.y).ok();
        writeln!(
            css,
            "    width: {}px; height: {}px;",
            frame.width, frame.height
        )
        .ok();
        writeln!(css, "    background-color: {};", frame.background_color).ok();
        css.push_str("}\n\n");
    }
    css
}
