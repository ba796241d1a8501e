//! Stage 4: bake, concatenate and weld one material group.
//!
//! Baking the world transform into the vertex data is mandatory here: the
//! merged output is a single draw unit, so the per-instance transforms no
//! longer exist afterwards.

use glam::{Mat3, Vec3};
use rustc_hash::FxHashMap;

use crate::errors::{CompressError, Result};
use crate::pipeline::grouper::MergeGroup;
use crate::pipeline::CompressOptions;
use crate::resources::geometry::Geometry;

// Quantization cells for the non-position attributes of the weld key.
// Vertices are only merged when position, normal and UV all land in the same
// cell; anything looser would corrupt textured seams.
const NORMAL_WELD_CELL: f32 = 1e-3;
const UV_WELD_CELL: f32 = 1e-4;

/// Merges a whole group into a single geometry.
///
/// Every instance is baked into world space (positions with the full affine,
/// normals with the renormalized inverse-transpose upper 3x3), the buffers
/// are concatenated with a running index offset, and the result is welded.
///
/// Fails only for shape violations the normalizer should have prevented;
/// the caller skips the group and proceeds with the others.
pub fn merge_group(group: &MergeGroup, options: &CompressOptions) -> Result<Geometry> {
    let total_vertices: usize = group
        .instances
        .iter()
        .map(|i| i.geometry.vertex_count())
        .sum();

    let mut positions: Vec<Vec3> = Vec::with_capacity(total_vertices);
    let mut normals: Vec<Vec3> = Vec::with_capacity(total_vertices);
    let mut uvs: Vec<f32> = Vec::with_capacity(total_vertices * 2);
    let mut indices: Vec<u32> = Vec::new();

    let merge_failed = |reason: String| CompressError::GeometryMergeFailed {
        material: group.material.name.clone(),
        reason,
    };

    for instance in &group.instances {
        let geometry = &instance.geometry;
        let vertex_count = geometry.vertex_count();
        let offset = positions.len() as u32;

        let normal_buf = geometry
            .normals()
            .filter(|buf| buf.len() == vertex_count * 3)
            .ok_or_else(|| merge_failed(format!("'{}' has malformed normals", instance.name)))?;
        let uv_buf = geometry
            .uvs()
            .filter(|buf| buf.len() == vertex_count * 2)
            .ok_or_else(|| merge_failed(format!("'{}' has malformed UVs", instance.name)))?;

        // Bake positions with the full affine transform.
        let world = instance.world;
        for lane in geometry.positions().chunks_exact(3) {
            positions.push(world.transform_point3(Vec3::new(lane[0], lane[1], lane[2])));
        }

        // Normals use the inverse-transpose upper 3x3, renormalized so
        // non-uniform scale cannot skew shading.
        let normal_matrix = Mat3::from(world.matrix3).inverse().transpose();
        for lane in normal_buf.chunks_exact(3) {
            let n = normal_matrix * Vec3::new(lane[0], lane[1], lane[2]);
            normals.push(n.normalize_or_zero());
        }

        uvs.extend_from_slice(uv_buf);

        match geometry.indices() {
            Some(index_buf) => {
                for &index in index_buf {
                    if index as usize >= vertex_count {
                        return Err(merge_failed(format!(
                            "'{}' index {index} out of range for {vertex_count} vertices",
                            instance.name
                        )));
                    }
                    indices.push(index + offset);
                }
            }
            // Non-indexed triangle list: identity indices.
            None => indices.extend(offset..offset + vertex_count as u32),
        }
    }

    let mut merged = weld(&positions, &normals, &uvs, &indices, options.weld_tolerance);
    merged.name = format!("{}_merged", group.material.name);
    Ok(merged)
}

/// Welds vertices whose position, normal and UV coincide within tolerance.
///
/// Each vertex is keyed by its quantized attributes; the first vertex in a
/// cell becomes the representative and keeps its exact values, later hits
/// are remapped onto it. First-occurrence ordering makes the result stable,
/// and because representatives keep their original values, welding an
/// already-welded buffer with the same tolerance changes nothing.
#[must_use]
pub fn weld(
    positions: &[Vec3],
    normals: &[Vec3],
    uvs: &[f32],
    indices: &[u32],
    tolerance: f32,
) -> Geometry {
    let tolerance = tolerance.max(f32::EPSILON);

    let quantize = |v: f32, cell: f32| (f64::from(v) / f64::from(cell)).round() as i64;

    let mut cell_to_index: FxHashMap<[i64; 8], u32> = FxHashMap::default();
    let mut remap: Vec<u32> = Vec::with_capacity(positions.len());

    let mut out_positions: Vec<Vec3> = Vec::new();
    let mut out_normals: Vec<Vec3> = Vec::new();
    let mut out_uvs: Vec<f32> = Vec::new();

    for (i, position) in positions.iter().enumerate() {
        let normal = normals[i];
        let (u, v) = (uvs[i * 2], uvs[i * 2 + 1]);

        let key = [
            quantize(position.x, tolerance),
            quantize(position.y, tolerance),
            quantize(position.z, tolerance),
            quantize(normal.x, NORMAL_WELD_CELL),
            quantize(normal.y, NORMAL_WELD_CELL),
            quantize(normal.z, NORMAL_WELD_CELL),
            quantize(u, UV_WELD_CELL),
            quantize(v, UV_WELD_CELL),
        ];

        let next = out_positions.len() as u32;
        let index = *cell_to_index.entry(key).or_insert_with(|| {
            out_positions.push(*position);
            out_normals.push(normal);
            out_uvs.extend_from_slice(&[u, v]);
            next
        });
        remap.push(index);
    }

    let new_indices: Vec<u32> = indices.iter().map(|&i| remap[i as usize]).collect();

    let mut geometry = Geometry::new();
    geometry.set_positions(bytemuck::cast_slice(&out_positions).to_vec());
    geometry.set_normals(Some(bytemuck::cast_slice(&out_normals).to_vec()));
    geometry.set_uvs(Some(out_uvs));
    geometry.set_indices(Some(new_indices));
    geometry
}
