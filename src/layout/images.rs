//! Rendered-image lookup for frames, plus optional asset download.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use image::ImageFormat as RasterFormat;
use tracing::{debug, info, warn};

use super::{FrameRecord, Layout};
use crate::codegen::slugify;
use crate::error::Result;
use crate::figma::{FigmaClient, ImageExportOptions};

/// Stored in `image_url` when no render exists for a frame.
pub const IMAGE_NOT_FOUND: &str = "not found";

/// One batched export request for all ids. Any failure is logged and yields an
/// empty map so the caller can continue without images.
pub async fn fetch_frame_images(
    client: &FigmaClient,
    file_key: &str,
    node_ids: &[String],
    options: ImageExportOptions,
) -> HashMap<String, String> {
    if node_ids.is_empty() {
        debug!("no frames to export; skipping image request");
        return HashMap::new();
    }

    match client.export_images(file_key, node_ids, options).await {
        Ok(images) => {
            info!(
                requested = node_ids.len(),
                received = images.len(),
                "fetched frame image URLs"
            );
            images
        }
        Err(err) => {
            warn!(error = %err, "image export failed; continuing without frame images");
            HashMap::new()
        }
    }
}

/// Attach an image URL to each frame, or [`IMAGE_NOT_FOUND`] when absent.
pub fn merge_image_urls(frames: &mut [FrameRecord], images: &HashMap<String, String>) {
    for frame in frames.iter_mut() {
        match images.get(&frame.id) {
            Some(url) => frame.image_url = Some(url.clone()),
            None => {
                warn!(frame = %frame.name, id = %frame.id, "no image for frame");
                frame.image_url = Some(IMAGE_NOT_FOUND.to_string());
            }
        }
    }
}

/// Download each available frame image into `assets_dir` as PNG.
///
/// Returns frame id -> path relative to the component directory. Frames whose
/// download or decode fails keep their remote URL.
pub async fn download_assets(
    client: &FigmaClient,
    layout: &Layout,
    assets_dir: &Path,
) -> Result<HashMap<String, PathBuf>> {
    let mut saved = HashMap::new();
    if layout.frames.iter().all(|f| f.image_src().is_none()) {
        return Ok(saved);
    }

    fs::create_dir_all(assets_dir)?;
    let dir_name = assets_dir
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("assets"));

    for frame in &layout.frames {
        let Some(url) = frame.image_src() else {
            continue;
        };
        let file_name = asset_file_name(frame);

        let bytes = match client.download_image(url).await {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(frame = %frame.name, error = %err, "asset download failed; keeping remote URL");
                continue;
            }
        };

        if let Err(err) = save_png(&bytes, &assets_dir.join(&file_name)) {
            warn!(frame = %frame.name, error = %err, "asset could not be decoded; keeping remote URL");
            continue;
        }
        debug!(frame = %frame.name, file = %file_name, "saved asset");
        saved.insert(frame.id.clone(), dir_name.join(file_name));
    }

    Ok(saved)
}

fn asset_file_name(frame: &FrameRecord) -> String {
    let stem = slugify(&frame.name);
    let id = frame.id.replace([':', ';'], "-");
    if stem.is_empty() {
        format!("frame-{id}.png")
    } else {
        format!("{stem}-{id}.png")
    }
}

fn save_png(bytes: &[u8], path: &Path) -> Result<()> {
    let decoded = image::load_from_memory(bytes)?;
    decoded.save_with_format(path, RasterFormat::Png)?;
    Ok(())
}
