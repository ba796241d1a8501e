//! Stage 5: resample and re-encode every raw texture slot of a material.
//!
//! Runs once per distinct material, never per mesh. The material handed in is
//! never mutated; the result is a fresh material value (same identity) whose
//! processed slots carry `TextureState::Compressed`. That state is the
//! idempotence guard: a compressed texture passed through again is returned
//! unchanged.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::imageops::{self, FilterType};
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use rustc_hash::FxHashMap;

use crate::errors::{CompressError, Result};
use crate::pipeline::CompressOptions;
use crate::resources::image::{EncodedFormat, Image, RasterSource};
use crate::resources::material::Material;
use crate::resources::texture::{Texture, TextureState};

/// Compresses every populated texture slot of `material`.
///
/// Returns a new material value carrying the same identity. Slots that fail
/// to process pass through as their original raw texture; one bad texture
/// never fails the pipeline.
#[must_use]
pub fn compress_material(material: &Material, options: &CompressOptions) -> Material {
    let mut slots: FxHashMap<String, Texture> = FxHashMap::default();

    for (slot, texture) in material.texture_slots() {
        slots.insert(slot.clone(), compress_texture(slot, texture, options));
    }

    material.with_texture_slots(slots)
}

/// Compresses a single texture slot, passing it through on any failure.
#[must_use]
pub fn compress_texture(slot: &str, texture: &Texture, options: &CompressOptions) -> Texture {
    if texture.state == TextureState::Compressed {
        log::debug!("compress_texture: slot '{slot}' already compressed, skipping");
        return texture.clone();
    }

    match try_compress(slot, texture, options) {
        Ok(compressed) => compressed,
        Err(err) => {
            log::warn!("compress_texture: passing '{slot}' through raw: {err}");
            texture.clone()
        }
    }
}

fn try_compress(slot: &str, texture: &Texture, options: &CompressOptions) -> Result<Texture> {
    if let RasterSource::External { uri } = &texture.image.source {
        return Err(CompressError::UnsupportedTextureSource {
            slot: slot.to_string(),
            detail: format!("external source '{uri}'"),
        });
    }

    let pixels = texture.image.decode()?;
    let (src_w, src_h) = pixels.dimensions();
    let (target_w, target_h) = target_dimensions(
        src_w,
        src_h,
        options.max_texture_dimension,
        options.min_texture_dimension,
    );

    let resampled = if (target_w, target_h) == (src_w, src_h) {
        pixels
    } else {
        imageops::resize(&pixels, target_w, target_h, FilterType::Triangle)
    };

    let transparent = match scan_alpha(slot, &resampled) {
        Ok(transparent) => transparent,
        Err(err @ CompressError::AlphaSampleRestricted { .. }) => {
            log::warn!("compress_texture: {err}");
            false
        }
        Err(err) => return Err(err),
    };

    let (data, format) = if transparent {
        encode_png(&resampled, options.transparent_quality)?
    } else {
        encode_jpeg(&resampled, options.jpeg_quality)?
    };

    let image = Image::new(
        &texture.image.name,
        RasterSource::Encoded {
            data,
            format,
            width: target_w,
            height: target_h,
        },
    );

    Ok(Texture {
        name: texture.name.clone(),
        image,
        color_space: texture.color_space,
        state: TextureState::Compressed,
    })
}

/// Target dimensions for a resample: aspect-preserving, longer side capped at
/// `max_dim`, both sides floored at `min_dim`, never upscaled past the source.
#[must_use]
pub fn target_dimensions(width: u32, height: u32, max_dim: u32, min_dim: u32) -> (u32, u32) {
    let longer = width.max(height);
    if longer == 0 {
        return (width, height);
    }

    let scale = if longer > max_dim {
        max_dim as f32 / longer as f32
    } else {
        1.0
    };

    let target_w = ((width as f32 * scale).round() as u32).max(1);
    let target_h = ((height as f32 * scale).round() as u32).max(1);

    // The floor wins over aspect ratio for degenerate thin sources, but a
    // source already below the minimum keeps its size.
    (
        target_w.max(min_dim.min(width)),
        target_h.max(min_dim.min(height)),
    )
}

/// Scans the alpha channel. `true` when any pixel is below full opacity.
fn scan_alpha(slot: &str, pixels: &RgbaImage) -> Result<bool> {
    if pixels.as_raw().is_empty() {
        return Err(CompressError::AlphaSampleRestricted {
            slot: slot.to_string(),
        });
    }
    Ok(pixels.pixels().any(|p| p.0[3] < u8::MAX))
}

fn encode_jpeg(pixels: &RgbaImage, quality: f32) -> Result<(Vec<u8>, EncodedFormat)> {
    let quality = (quality.clamp(0.01, 1.0) * 100.0).round() as u8;
    let rgb = image::DynamicImage::ImageRgba8(pixels.clone()).to_rgb8();

    let mut data = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(Cursor::new(&mut data), quality);
    encoder
        .encode(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
        .map_err(|err| CompressError::ImageEncode(err.to_string()))?;

    Ok((data, EncodedFormat::Jpeg))
}

fn encode_png(pixels: &RgbaImage, quality: f32) -> Result<(Vec<u8>, EncodedFormat)> {
    // PNG is lossless; quality only picks how hard the compressor works.
    let compression = if quality >= 0.75 {
        CompressionType::Best
    } else {
        CompressionType::Fast
    };

    let mut data = Vec::new();
    let encoder = PngEncoder::new_with_quality(
        Cursor::new(&mut data),
        compression,
        PngFilterType::Adaptive,
    );
    encoder
        .write_image(
            pixels.as_raw(),
            pixels.width(),
            pixels.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|err| CompressError::ImageEncode(err.to_string()))?;

    Ok((data, EncodedFormat::Png))
}
