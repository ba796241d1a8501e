use rustc_hash::FxHashMap;
use uuid::Uuid;

use crate::resources::texture::Texture;

/// Slot name of the base color map. Stats use this slot when
/// `include_all_texture_slots` is off.
pub const BASE_COLOR_SLOT: &str = "map";

/// Well-known texture slot names.
pub const TEXTURE_SLOTS: &[&str] = &[
    BASE_COLOR_SLOT,
    "normal_map",
    "roughness_map",
    "metalness_map",
    "emissive_map",
    "ao_map",
];

/// A material definition: a stable identity plus named texture slots.
///
/// Identity is the [`Uuid`], never the field values. Two materials with
/// identical slots but different uuids are different materials and are never
/// grouped together; conversely, cloning (including
/// [`Material::with_texture_slots`]) preserves the uuid because the clone
/// still denotes the same material definition.
///
/// Materials are treated as immutable values by the pipeline: the texture
/// compressor never writes through a shared reference, it builds a new value
/// with replaced slots.
#[derive(Debug, Clone)]
pub struct Material {
    pub uuid: Uuid,
    pub name: String,

    texture_slots: FxHashMap<String, Texture>,
}

impl Default for Material {
    fn default() -> Self {
        Self::new("Material")
    }
}

impl Material {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.to_string(),
            texture_slots: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn texture_slots(&self) -> &FxHashMap<String, Texture> {
        &self.texture_slots
    }

    #[must_use]
    pub fn texture(&self, slot: &str) -> Option<&Texture> {
        self.texture_slots.get(slot)
    }

    pub fn set_texture(&mut self, slot: &str, texture: Texture) {
        self.texture_slots.insert(slot.to_string(), texture);
    }

    pub fn remove_texture(&mut self, slot: &str) -> Option<Texture> {
        self.texture_slots.remove(slot)
    }

    /// A new material value carrying the same identity with replaced slots.
    #[must_use]
    pub fn with_texture_slots(&self, texture_slots: FxHashMap<String, Texture>) -> Self {
        Self {
            uuid: self.uuid,
            name: self.name.clone(),
            texture_slots,
        }
    }
}
