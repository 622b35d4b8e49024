//! Markup, stylesheet and component-class generation.
//!
//! - [`render`] - per-node markup fragments
//! - [`walker`] - frame children to markup + stylesheet
//! - [`page`] - layout checkpoint to an absolutely positioned page
//! - [`emitter`] - component files on disk

pub mod emitter;
pub mod page;
pub mod render;
pub mod walker;

use std::collections::HashSet;

pub use emitter::{emit_component, EmittedComponent};
pub use walker::{walk_frame, WalkOutput};

/// Class-name form of a node name: spaces become hyphens, lower-cased.
///
/// Only alphanumerics, `-` and `_` are kept, so the result is usable both as a
/// `class` attribute value and as a CSS selector.
pub fn sanitize_name(name: &str) -> String {
    name.replace(' ', "-")
        .to_lowercase()
        .chars()
        .filter(|ch| ch.is_alphanumeric() || *ch == '-' || *ch == '_')
        .collect()
}

/// Filename/identifier-safe slug: ASCII alphanumerics separated by single hyphens.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Hands out unique class names; a repeated base gets the node id appended.
#[derive(Debug, Default)]
pub struct ClassNames {
    seen: HashSet<String>,
}

impl ClassNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self, base: &str, node_id: &str) -> String {
        let id_slug = node_id.replace([':', ';'], "-");
        let mut candidate = if base.is_empty() {
            format!("node-{id_slug}")
        } else {
            base.to_string()
        };
        if self.seen.contains(&candidate) {
            candidate = format!("{candidate}-{id_slug}");
        }
        let mut counter = 2;
        let stem = candidate.clone();
        while self.seen.contains(&candidate) {
            candidate = format!("{stem}-{counter}");
            counter += 1;
        }
        self.seen.insert(candidate.clone());
        candidate
    }
}

/// Escape a value for a double-quoted HTML attribute.
pub(crate) fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_spaces_and_lowercases() {
        assert_eq!(sanitize_name("Primary Button"), "primary-button");
    }

    #[test]
    fn sanitize_drops_characters_outside_css_identifiers() {
        assert_eq!(sanitize_name("Say \"hi\""), "say-hi");
        assert_eq!(sanitize_name("a<b>{c}.d"), "abcd");
        assert_eq!(sanitize_name("Café_2"), "café_2");
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("  Hero / Banner 2 "), "hero-banner-2");
        assert_eq!(slugify("***"), "");
    }

    #[test]
    fn colliding_names_get_the_node_id() {
        let mut names = ClassNames::new();
        assert_eq!(names.allocate("card", "1:2"), "card");
        assert_eq!(names.allocate("card", "1:3"), "card-1-3");
        assert_eq!(names.allocate("", "4:5"), "node-4-5");
    }

    #[test]
    fn repeated_id_collisions_still_unique() {
        let mut names = ClassNames::new();
        names.allocate("card", "1:2");
        names.allocate("card", "1:2");
        assert_eq!(names.allocate("card", "1:2"), "card-1-2-2");
    }

    #[test]
    fn escape_attr_handles_quotes() {
        assert_eq!(escape_attr(r#"a "b" & <c>"#), "a &quot;b&quot; &amp; &lt;c&gt;");
    }
}
