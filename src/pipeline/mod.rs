//! The asset-optimization pipeline.
//!
//! A linear sequence of pure stages, each consuming the previous stage's
//! output:
//!
//! 1. [`collector`] flattens the scene tree into `(geometry, world, material)`
//!    triples.
//! 2. [`normalizer`] guarantees position/normal/uv attributes and strips
//!    morph-target data.
//! 3. [`grouper`] partitions instances by material identity.
//! 4. [`merger`] bakes world transforms, concatenates each group and welds
//!    near-duplicate vertices.
//! 5. [`texture_compressor`] resizes and re-encodes every raw texture slot,
//!    once per distinct material.
//! 6. [`stats`] computes before/after counts.
//! 7. [`reposition`] recenters the merged output on the ground plane.
//!
//! A pass is one-shot and single-threaded; it never mutates the input
//! [`Scene`]. Per-group work (merging, texture compression) touches no shared
//! state, so a caller that wants concurrency can split groups across workers,
//! but this crate does not schedule that itself.
//!
//! No failure inside a pass is fatal: bad geometry or textures degrade to
//! "skip this unit, log, continue" (see [`crate::errors`]).

pub mod collector;
pub mod grouper;
pub mod merger;
pub mod normalizer;
pub mod reposition;
pub mod stats;
pub mod texture_compressor;

pub use collector::MeshInstance;
pub use grouper::MergeGroup;
pub use stats::CompressionStats;

use crate::resources::geometry::Geometry;
use crate::resources::material::Material;
use crate::scene::Scene;

/// Tuning knobs for a compression pass.
#[derive(Debug, Clone)]
pub struct CompressOptions {
    /// Cap on the longer side of a resampled texture.
    pub max_texture_dimension: u32,
    /// Floor on each side of a resampled texture. Sources already smaller
    /// than this keep their size; nothing is ever upscaled.
    pub min_texture_dimension: u32,
    /// Position tolerance for vertex welding.
    pub weld_tolerance: f32,
    /// Quality for the lossy (opaque) encode path, 0..=1.
    pub jpeg_quality: f32,
    /// Quality for the alpha-capable encode path, 0..=1.
    pub transparent_quality: f32,
    /// Height the merged output's bounding-box minimum is grounded at.
    pub ground_y: f32,
    /// Count every texture slot in the pixel-footprint stat instead of only
    /// the base color slot.
    pub include_all_texture_slots: bool,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            max_texture_dimension: 1024,
            min_texture_dimension: 128,
            weld_tolerance: 1e-5,
            jpeg_quality: 0.8,
            transparent_quality: 0.9,
            ground_y: 0.0,
            include_all_texture_slots: false,
        }
    }
}

/// One merged draw unit of the optimized scene.
#[derive(Debug, Clone)]
pub struct MergedMesh {
    pub geometry: Geometry,
    pub material: Material,
}

/// The optimized scene handed back to the caller: exactly one mesh per
/// non-empty merge group, plus before/after stats.
#[derive(Debug, Clone, Default)]
pub struct CompressedScene {
    pub meshes: Vec<MergedMesh>,
    pub stats: CompressionStats,
}

/// Runs the full pipeline over `scene`.
///
/// Never fails and never mutates `scene`: an empty tree yields an empty
/// [`CompressedScene`] with all-zero stats, and per-unit failures are logged
/// and skipped.
#[must_use]
pub fn compress(scene: &Scene, options: &CompressOptions) -> CompressedScene {
    let instances = collector::collect_meshes(scene);
    if instances.is_empty() {
        log::info!("compress: no meshes found in scene {}", scene.id);
        return CompressedScene::default();
    }

    let original_mesh_count = instances.len();
    let original_vertex_count: usize = instances.iter().map(|i| i.geometry.vertex_count()).sum();

    let normalized: Vec<MeshInstance> = instances
        .into_iter()
        .filter_map(normalizer::normalize)
        .collect();

    let groups = grouper::group_by_material(normalized);

    let mut meshes = Vec::with_capacity(groups.len());
    for group in &groups {
        let geometry = match merger::merge_group(group, options) {
            Ok(geometry) => geometry,
            Err(err) => {
                // One bad group must not abort the pass.
                log::warn!("compress: {err}");
                continue;
            }
        };
        let material = texture_compressor::compress_material(&group.material, options);
        meshes.push(MergedMesh { geometry, material });
    }

    let stats = stats::calculate(original_mesh_count, original_vertex_count, &meshes, options);

    reposition::reposition(&mut meshes, options.ground_y);

    log::debug!(
        "compress: {} meshes / {} vertices -> {} meshes / {} vertices ({}% vertex reduction)",
        stats.original_mesh_count,
        stats.original_vertex_count,
        stats.merged_mesh_count,
        stats.merged_vertex_count,
        stats.vertex_reduction_percent,
    );

    CompressedScene { meshes, stats }
}
