//! Stage 6: before/after counters for the whole pass.

use crate::pipeline::{CompressOptions, MergedMesh};
use crate::resources::material::BASE_COLOR_SLOT;
use crate::resources::texture::TextureState;

/// Aggregate counters of one compression pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompressionStats {
    pub original_vertex_count: usize,
    pub merged_vertex_count: usize,
    pub original_mesh_count: usize,
    pub merged_mesh_count: usize,
    /// Sum of `width x height` over the counted compressed texture slots.
    pub total_texture_pixels: u64,
    /// `round(100 * (1 - merged / original))`, clamped to `0..=100`;
    /// reported as `0` when there were no original vertices.
    pub vertex_reduction_percent: u32,
}

/// Computes the stats for a finished pass.
///
/// The texture footprint counts only slots the compressor actually resampled
/// (`TextureState::Compressed`): either the base color slot alone, or every
/// slot when `include_all_texture_slots` is set.
#[must_use]
pub fn calculate(
    original_mesh_count: usize,
    original_vertex_count: usize,
    meshes: &[MergedMesh],
    options: &CompressOptions,
) -> CompressionStats {
    let merged_vertex_count: usize = meshes.iter().map(|m| m.geometry.vertex_count()).sum();

    let vertex_reduction_percent = if original_vertex_count == 0 {
        0
    } else {
        let ratio = merged_vertex_count as f64 / original_vertex_count as f64;
        (100.0 * (1.0 - ratio)).round().clamp(0.0, 100.0) as u32
    };

    let mut total_texture_pixels: u64 = 0;
    for mesh in meshes {
        for (slot, texture) in mesh.material.texture_slots() {
            if !options.include_all_texture_slots && slot != BASE_COLOR_SLOT {
                continue;
            }
            if texture.state != TextureState::Compressed {
                continue;
            }
            if let Some((width, height)) = texture.image.dimensions() {
                total_texture_pixels += u64::from(width) * u64::from(height);
            }
        }
    }

    CompressionStats {
        original_vertex_count,
        merged_vertex_count,
        original_mesh_count,
        merged_mesh_count: meshes.len(),
        total_texture_pixels,
        vertex_reduction_percent,
    }
}
