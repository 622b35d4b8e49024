//! Figma Component Generator (FCG) Library
//!
//! Turns a Figma document into an Angular-style component: markup, stylesheet
//! and a component class. A second pass extracts the top-level frames of the
//! first page, attaches their rendered images and lays them out on a page.
//!
//! # Module Overview
//!
//! - [`figma`] - Figma REST client, document model, color and geometry readers
//! - [`codegen`] - node rendering, frame walking and component emission
//! - [`layout`] - frame extraction, image merge, normalization and the layout file
//! - [`pipeline`] - the end-to-end stages used by the CLI
//! - [`config`] - configuration file support
//! - [`resource`] - file key / Figma URL parsing
//! - [`output`] - JSON output schemas
//!
//! # Example
//!
//! ```no_run
//! use fcg_lib::{build_layout, write_layout, FigmaAuth, FigmaClient, ImageExportOptions};
//!
//! # async fn example() -> fcg_lib::Result<()> {
//! let client = FigmaClient::new(FigmaAuth::PersonalAccessToken("token".into()))?;
//! let layout = build_layout(&client, "FILEKEY", ImageExportOptions::default()).await?;
//! write_layout(std::path::Path::new("layout.json"), &layout)?;
//! # Ok(())
//! # }
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod figma;
pub mod layout;
pub mod output;
pub mod pipeline;
pub mod resource;

pub use codegen::{emit_component, walk_frame, EmittedComponent, WalkOutput};
pub use config::Config;
pub use error::{ErrorCategory, ErrorPayload, FcgError, Result};
pub use figma::{
    select_frame, ColorEncoding, FigmaAuth, FigmaClient, FigmaFile, ImageExportOptions,
    ImageFormat, Node, NodeKind,
};
pub use layout::{
    download_assets, extract_layout, fetch_frame_images, merge_image_urls, normalize_positions,
    read_layout, write_layout, FrameRecord, Layout, IMAGE_NOT_FOUND,
};
pub use output::{
    ComponentOutput, ErrorOutput, ExtractOutput, FcgOutput, FetchOutput, FCG_OUTPUT_VERSION,
};
pub use pipeline::{build_layout, generate_component, generate_page, ComponentTarget};
pub use resource::{parse_file_reference, FileReference, ResourceParseError};
