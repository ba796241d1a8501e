//! Batch optimizer for decoded, in-memory 3D scenes.
//!
//! `meshpress` takes a scene graph of mesh instances (geometry buffers, a
//! world transform and a material with zero or more texture slots) and
//! produces a smaller, equivalent-looking scene: draw units merged per
//! material, vertices welded, textures downsampled and re-encoded.
//!
//! Parsing or writing 3D file containers is out of scope; build the input
//! [`Scene`] from whatever loader you use and hand the returned
//! [`CompressedScene`] back to it.

pub mod errors;
pub mod pipeline;
pub mod resources;
pub mod scene;

pub use errors::{CompressError, Result};
pub use pipeline::{compress, CompressOptions, CompressedScene, CompressionStats, MergedMesh};
pub use resources::{
    BoundingBox, ColorSpace, EncodedFormat, Geometry, Image, Material, Mesh, RasterSource,
    Texture, TextureState,
};
pub use scene::{Node, NodeHandle, Scene, Transform};
