use std::sync::Arc;

use crate::resources::geometry::Geometry;
use crate::resources::material::Material;

/// One draw unit: a geometry-plus-material pairing renderable in a single pass.
///
/// Meshes reference shared resources; several meshes may point at the same
/// [`Material`] (that is what the pipeline's material grouping relies on) or
/// the same [`Geometry`]. The pipeline never mutates the referenced resources
/// in place; it clones before transforming.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,

    pub geometry: Arc<Geometry>,
    pub material: Arc<Material>,

    pub visible: bool,
}

impl Mesh {
    #[must_use]
    pub fn new(geometry: Arc<Geometry>, material: Arc<Material>) -> Self {
        Self {
            name: "Mesh".to_string(),
            geometry,
            material,
            visible: true,
        }
    }
}
