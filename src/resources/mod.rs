//! Core resource definitions.
//!
//! Decoded, CPU-side data structures with no GPU or file-format dependency:
//! - Mesh: geometry-plus-material pairing (one draw unit)
//! - Geometry: vertex attribute buffers
//! - Material: texture slot map with stable identity
//! - Texture: raster source plus color space and compression state
//! - Image: raster source container

pub mod geometry;
pub mod image;
pub mod material;
pub mod mesh;
pub mod primitives;
pub mod texture;

pub use geometry::{BoundingBox, Geometry};
pub use image::{EncodedFormat, Image, RasterSource};
pub use material::Material;
pub use mesh::Mesh;
pub use texture::{ColorSpace, Texture, TextureState};
