//! Stage 3: partition normalized instances by material identity.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use uuid::Uuid;

use crate::pipeline::collector::MeshInstance;
use crate::resources::material::Material;

/// All instances sharing one material, in first-seen order.
///
/// The `material` is the group's representative: the specific shared instance,
/// not a copy. The texture compressor clones it exactly once before replacing
/// slots.
#[derive(Debug, Clone)]
pub struct MergeGroup {
    pub material: Arc<Material>,
    pub instances: Vec<MeshInstance>,
}

/// Groups instances by `material.uuid`.
///
/// Identity is UUID equality, never structural equality: two materials with
/// identical field values but different uuids stay in separate groups.
/// Group order follows the first occurrence of each material in the input,
/// so identical input order gives identical output order and comparable
/// run-to-run stats.
#[must_use]
pub fn group_by_material(instances: Vec<MeshInstance>) -> Vec<MergeGroup> {
    let mut groups: Vec<MergeGroup> = Vec::new();
    let mut index_by_uuid: FxHashMap<Uuid, usize> = FxHashMap::default();

    for instance in instances {
        let index = *index_by_uuid
            .entry(instance.material.uuid)
            .or_insert_with(|| {
                groups.push(MergeGroup {
                    material: instance.material.clone(),
                    instances: Vec::new(),
                });
                groups.len() - 1
            });
        groups[index].instances.push(instance);
    }

    groups
}
