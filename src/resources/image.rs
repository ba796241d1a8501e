use std::sync::atomic::{AtomicU64, Ordering};

use image::RgbaImage;

use crate::errors::{CompressError, Result};

// Global Image ID generator (u64 for cheap map lookups and Eq)
static NEXT_IMAGE_ID: AtomicU64 = AtomicU64::new(1);

/// Container format of an encoded raster payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodedFormat {
    Png,
    Jpeg,
    WebP,
}

impl EncodedFormat {
    #[must_use]
    pub fn from_image_format(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Png => Some(Self::Png),
            image::ImageFormat::Jpeg => Some(Self::Jpeg),
            image::ImageFormat::WebP => Some(Self::WebP),
            _ => None,
        }
    }
}

/// Where a texture's pixels actually live.
///
/// The pipeline resamples `Pixels` and `Encoded` sources. `External` sources
/// (GPU-resident, remote, or otherwise not CPU-readable) are the "unsupported
/// kind": textures backed by them pass through the compressor unmodified.
#[derive(Debug, Clone)]
pub enum RasterSource {
    /// Decoded 8-bit RGBA pixels.
    Pixels(RgbaImage),
    /// An encoded payload plus the dimensions parsed from its header.
    Encoded {
        data: Vec<u8>,
        format: EncodedFormat,
        width: u32,
        height: u32,
    },
    /// A source this pipeline cannot read back.
    External { uri: String },
}

/// A raster image with a process-unique identity.
///
/// The id survives cloning so that "same underlying picture" can be tracked
/// across the original and optimized scenes.
#[derive(Debug, Clone)]
pub struct Image {
    id: u64,
    pub name: String,
    pub source: RasterSource,
}

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for Image {}

impl Image {
    #[must_use]
    pub fn new(name: &str, source: RasterSource) -> Self {
        Self {
            id: NEXT_IMAGE_ID.fetch_add(1, Ordering::Relaxed),
            name: name.to_string(),
            source,
        }
    }

    /// Wraps decoded RGBA pixels.
    #[must_use]
    pub fn from_pixels(name: &str, pixels: RgbaImage) -> Self {
        Self::new(name, RasterSource::Pixels(pixels))
    }

    /// Wraps an encoded payload, reading dimensions from its header.
    pub fn from_encoded(name: &str, data: Vec<u8>) -> Result<Self> {
        let format = image::guess_format(&data)?;
        let Some(format) = EncodedFormat::from_image_format(format) else {
            return Err(CompressError::ImageDecode(format!(
                "unhandled container format {format:?}"
            )));
        };
        let (width, height) = image::load_from_memory(&data)
            .map(|img| (img.width(), img.height()))?;
        Ok(Self::new(
            name,
            RasterSource::Encoded {
                data,
                format,
                width,
                height,
            },
        ))
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Pixel dimensions, when the source knows them.
    #[must_use]
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match &self.source {
            RasterSource::Pixels(img) => Some(img.dimensions()),
            RasterSource::Encoded { width, height, .. } => Some((*width, *height)),
            RasterSource::External { .. } => None,
        }
    }

    /// Decodes the source into RGBA pixels.
    ///
    /// Fails for [`RasterSource::External`] and for corrupt payloads; callers
    /// in the pipeline treat that as a pass-through condition, not a fatal one.
    pub fn decode(&self) -> Result<RgbaImage> {
        match &self.source {
            RasterSource::Pixels(img) => Ok(img.clone()),
            RasterSource::Encoded { data, .. } => {
                let decoded = image::load_from_memory(data)?;
                Ok(decoded.to_rgba8())
            }
            RasterSource::External { uri } => Err(CompressError::ImageDecode(format!(
                "external source '{uri}' is not CPU-readable"
            ))),
        }
    }
}
