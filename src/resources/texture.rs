use crate::resources::image::Image;

/// Color space tag carried by a texture.
///
/// Color data (base color, emissive) is authored in sRGB; data maps (normals,
/// roughness, occlusion) are linear. The compressor preserves the tag; it
/// only affects how a renderer samples the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    Linear,
    Srgb,
}

/// Whether a texture has already been through the compressor.
///
/// Carried on the owned value rather than a hidden metadata bag so that the
/// idempotence guard is visible in the type: a `Compressed` texture is never
/// re-processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureState {
    Raw,
    Compressed,
}

/// A texture slot value: raster image, color-space tag, compression state.
#[derive(Debug, Clone)]
pub struct Texture {
    pub name: String,
    pub image: Image,
    pub color_space: ColorSpace,
    pub state: TextureState,
}

impl Texture {
    /// A fresh, uncompressed texture.
    #[must_use]
    pub fn new_raw(name: &str, image: Image, color_space: ColorSpace) -> Self {
        Self {
            name: name.to_string(),
            image,
            color_space,
            state: TextureState::Raw,
        }
    }

    /// A 1x1 solid color texture. Test and placeholder fodder.
    #[must_use]
    pub fn solid_color(name: &str, color: [u8; 4]) -> Self {
        let pixels = image::RgbaImage::from_pixel(1, 1, image::Rgba(color));
        Self::new_raw(name, Image::from_pixels(name, pixels), ColorSpace::Srgb)
    }

    #[must_use]
    pub fn is_compressed(&self) -> bool {
        self.state == TextureState::Compressed
    }
}
