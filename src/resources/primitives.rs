//! Procedural test geometry: a unit-style plane and box.
//!
//! Handy for exercising the pipeline without a scene loader.

use crate::resources::geometry::Geometry;

/// A plane in the XY plane, facing +Z, with `width_segments` x
/// `height_segments` quads.
#[must_use]
pub fn create_plane(width: f32, height: f32, width_segments: u32, height_segments: u32) -> Geometry {
    let width_half = width / 2.0;
    let height_half = height / 2.0;

    let grid_x = width_segments.max(1);
    let grid_y = height_segments.max(1);

    let grid_x1 = grid_x + 1;
    let grid_y1 = grid_y + 1;

    let segment_width = width / grid_x as f32;
    let segment_height = height / grid_y as f32;

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut uvs = Vec::new();
    let mut indices = Vec::new();

    for iy in 0..grid_y1 {
        let y = iy as f32 * segment_height - height_half;
        for ix in 0..grid_x1 {
            let x = ix as f32 * segment_width - width_half;

            positions.extend_from_slice(&[x, -y, 0.0]);
            normals.extend_from_slice(&[0.0, 0.0, 1.0]);
            uvs.extend_from_slice(&[
                ix as f32 / grid_x as f32,
                1.0 - (iy as f32 / grid_y as f32),
            ]);
        }
    }

    for iy in 0..grid_y {
        for ix in 0..grid_x {
            let a = ix + grid_x1 * iy;
            let b = ix + grid_x1 * (iy + 1);
            let c = (ix + 1) + grid_x1 * (iy + 1);
            let d = (ix + 1) + grid_x1 * iy;

            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    let mut geo = Geometry::new();
    geo.name = "Plane".to_string();
    geo.set_positions(positions);
    geo.set_normals(Some(normals));
    geo.set_uvs(Some(uvs));
    geo.set_indices(Some(indices));
    geo
}

/// An axis-aligned box with 24 vertices (4 per face) and per-face normals.
#[must_use]
pub fn create_box(width: f32, height: f32, depth: f32) -> Geometry {
    let w = width / 2.0;
    let h = height / 2.0;
    let d = depth / 2.0;

    #[rustfmt::skip]
    let positions: [[f32; 3]; 24] = [
        // Front face (+Z)
        [-w, -h, d], [w, -h, d], [w, h, d], [-w, h, d],
        // Back face (-Z)
        [-w, -h, -d], [-w, h, -d], [w, h, -d], [w, -h, -d],
        // Top face (+Y)
        [-w, h, -d], [-w, h, d], [w, h, d], [w, h, -d],
        // Bottom face (-Y)
        [-w, -h, -d], [w, -h, -d], [w, -h, d], [-w, -h, d],
        // Right face (+X)
        [w, -h, -d], [w, h, -d], [w, h, d], [w, -h, d],
        // Left face (-X)
        [-w, -h, -d], [-w, -h, d], [-w, h, d], [-w, h, -d],
    ];

    #[rustfmt::skip]
    let face_normals: [[f32; 3]; 6] = [
        [0.0, 0.0, 1.0], [0.0, 0.0, -1.0],
        [0.0, 1.0, 0.0], [0.0, -1.0, 0.0],
        [1.0, 0.0, 0.0], [-1.0, 0.0, 0.0],
    ];

    #[rustfmt::skip]
    let face_uvs: [[f32; 2]; 4] = [
        [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0],
    ];

    let mut flat_positions = Vec::with_capacity(24 * 3);
    let mut flat_normals = Vec::with_capacity(24 * 3);
    let mut flat_uvs = Vec::with_capacity(24 * 2);

    for (i, p) in positions.iter().enumerate() {
        flat_positions.extend_from_slice(p);
        flat_normals.extend_from_slice(&face_normals[i / 4]);
        flat_uvs.extend_from_slice(&face_uvs[i % 4]);
    }

    // Two CCW triangles per face
    let indices: Vec<u32> = (0..6u32)
        .flat_map(|face| {
            let base = face * 4;
            [base, base + 1, base + 2, base, base + 2, base + 3]
        })
        .collect();

    let mut geo = Geometry::new();
    geo.name = "Box".to_string();
    geo.set_positions(flat_positions);
    geo.set_normals(Some(flat_normals));
    geo.set_uvs(Some(flat_uvs));
    geo.set_indices(Some(indices));
    geo
}
