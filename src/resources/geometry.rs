use glam::{Affine3A, Vec3};
use uuid::Uuid;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    #[must_use]
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Transforms all eight corners and re-fits the box around them.
    #[must_use]
    pub fn transform(&self, matrix: &Affine3A) -> Self {
        let corners = [
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
        ];

        let mut new_min = Vec3::splat(f32::INFINITY);
        let mut new_max = Vec3::splat(f32::NEG_INFINITY);

        for point in corners {
            let transformed = matrix.transform_point3(point);
            new_min = new_min.min(transformed);
            new_max = new_max.max(transformed);
        }

        Self {
            min: new_min,
            max: new_max,
        }
    }
}

/// Vertex attribute buffers for one geometry.
///
/// All attributes are flat, planar `f32` buffers: positions and normals hold
/// three components per vertex, UVs hold two. The index buffer, when present,
/// references vertices of this geometry; without one the vertices form a
/// non-indexed triangle list.
///
/// Morph targets are carried as parallel displacement buffers keyed by
/// position in `morph_target_names`. The optimization pipeline discards them,
/// since merged static geometry cannot support blend shapes.
#[derive(Debug, Clone)]
pub struct Geometry {
    pub uuid: Uuid,
    pub name: String,

    positions: Vec<f32>,
    normals: Option<Vec<f32>>,
    uvs: Option<Vec<f32>>,
    indices: Option<Vec<u32>>,

    pub morph_positions: Vec<Vec<f32>>,
    pub morph_normals: Vec<Vec<f32>>,
    pub morph_target_names: Vec<String>,
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new()
    }
}

impl Geometry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: "Geometry".to_string(),
            positions: Vec::new(),
            normals: None,
            uvs: None,
            indices: None,
            morph_positions: Vec::new(),
            morph_normals: Vec::new(),
            morph_target_names: Vec::new(),
        }
    }

    /// Number of vertices, derived from the position buffer.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[must_use]
    pub fn has_positions(&self) -> bool {
        !self.positions.is_empty()
    }

    // ========================================================================
    // Attribute accessors
    // ========================================================================

    #[must_use]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    #[must_use]
    pub fn normals(&self) -> Option<&[f32]> {
        self.normals.as_deref()
    }

    #[must_use]
    pub fn uvs(&self) -> Option<&[f32]> {
        self.uvs.as_deref()
    }

    #[must_use]
    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    pub fn set_positions(&mut self, positions: Vec<f32>) {
        debug_assert_eq!(positions.len() % 3, 0);
        self.positions = positions;
    }

    pub fn set_normals(&mut self, normals: Option<Vec<f32>>) {
        if let Some(buf) = &normals {
            debug_assert_eq!(buf.len() % 3, 0);
        }
        self.normals = normals;
    }

    pub fn set_uvs(&mut self, uvs: Option<Vec<f32>>) {
        if let Some(buf) = &uvs {
            debug_assert_eq!(buf.len() % 2, 0);
        }
        self.uvs = uvs;
    }

    pub fn set_indices(&mut self, indices: Option<Vec<u32>>) {
        self.indices = indices;
    }

    /// Position of vertex `i` as a vector.
    #[must_use]
    pub fn position(&self, i: usize) -> Option<Vec3> {
        let start = i * 3;
        let lane = self.positions.get(start..start + 3)?;
        Some(Vec3::new(lane[0], lane[1], lane[2]))
    }

    /// Drops all morph-target buffers.
    pub fn clear_morph_targets(&mut self) {
        self.morph_positions.clear();
        self.morph_normals.clear();
        self.morph_target_names.clear();
    }

    #[must_use]
    pub fn has_morph_targets(&self) -> bool {
        !self.morph_positions.is_empty() || !self.morph_normals.is_empty()
    }

    // ========================================================================
    // Derived data
    // ========================================================================

    /// Derives per-vertex normals from triangle winding.
    ///
    /// Face normals are accumulated area-weighted (the cross product's length
    /// is twice the triangle area, so larger faces contribute more) and
    /// normalized in a final pass. Works on both indexed and non-indexed
    /// triangle lists; out-of-range indices are ignored.
    pub fn compute_vertex_normals(&mut self) {
        let vertex_count = self.vertex_count();
        if vertex_count == 0 {
            return;
        }

        let positions = &self.positions;
        let read_pos = |i: usize| {
            let start = i * 3;
            Vec3::new(positions[start], positions[start + 1], positions[start + 2])
        };
        let mut normals = vec![Vec3::ZERO; vertex_count];

        let mut accumulate_triangle = |i0: usize, i1: usize, i2: usize| {
            if i0 >= vertex_count || i1 >= vertex_count || i2 >= vertex_count {
                return;
            }

            let v0 = read_pos(i0);
            let v1 = read_pos(i1);
            let v2 = read_pos(i2);

            let face_normal = (v1 - v0).cross(v2 - v0);

            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        };

        if let Some(indices) = &self.indices {
            for chunk in indices.chunks_exact(3) {
                accumulate_triangle(chunk[0] as usize, chunk[1] as usize, chunk[2] as usize);
            }
        } else {
            // Non-indexed: every 3 consecutive vertices form a triangle.
            for i in (0..vertex_count).step_by(3) {
                if i + 2 < vertex_count {
                    accumulate_triangle(i, i + 1, i + 2);
                }
            }
        }

        let mut out = Vec::with_capacity(vertex_count * 3);
        for n in &normals {
            let n = n.normalize_or_zero();
            out.extend_from_slice(&n.to_array());
        }
        self.normals = Some(out);
    }

    /// Translates every vertex position in place.
    pub fn translate(&mut self, offset: Vec3) {
        for lane in self.positions.chunks_exact_mut(3) {
            lane[0] += offset.x;
            lane[1] += offset.y;
            lane[2] += offset.z;
        }
    }

    /// Computes the axis-aligned bounding box of the position buffer.
    ///
    /// Returns `None` for empty geometry.
    #[must_use]
    pub fn compute_bounding_box(&self) -> Option<BoundingBox> {
        if self.positions.is_empty() {
            return None;
        }

        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);

        for lane in self.positions.chunks_exact(3) {
            let v = Vec3::new(lane[0], lane[1], lane[2]);
            min = min.min(v);
            max = max.max(v);
        }

        Some(BoundingBox { min, max })
    }
}
