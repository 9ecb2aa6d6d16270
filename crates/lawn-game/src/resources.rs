// resources.rs — the id ⇄ handle lookups the codec consumes
//
// Nothing on disk is ever an address: entities reference images and
// effect definitions by small integer ids, and this collaborator maps
// those ids to loaded handles/definitions. The codec borrows it to
// validate ids and to make sure definitions it needs are loaded; it
// never owns it.

use std::collections::HashMap;

use tracing::debug;

use crate::particle::{ParticleDefinition, NUM_PARTICLES};
use crate::reanimator::{ReanimatorDefinition, NUM_REANIMS};
use crate::trail::{TrailDefinition, NUM_TRAILS};

/// Small integer id of a loaded image. Zero means "no image".
pub type ImageId = i32;

pub const IMAGE_ID_NONE: ImageId = 0;

// Damage-overlay art referenced by the post-load fix-up pass.
pub const IMAGE_REANIM_ZOMBIE_GARGANTUAR_BODY1_2: ImageId = 2001;
pub const IMAGE_REANIM_ZOMBIE_GARGANTUAR_BODY1_3: ImageId = 2002;
pub const IMAGE_REANIM_ZOMBIE_GARGANTUAR_OUTERARM_LOWER2: ImageId = 2003;
pub const IMAGE_REANIM_ZOMBIE_GARGANTUAR_FOOT2: ImageId = 2004;
pub const IMAGE_REANIM_ZOMBIE_GARGANTUAR_HEAD2: ImageId = 2005;
pub const IMAGE_REANIM_ZOMBIE_GARGANTUAR_HEAD_REDEYE: ImageId = 2006;
pub const IMAGE_REANIM_ZOMBIE_GARGANTUAR_HEAD2_REDEYE: ImageId = 2007;
pub const IMAGE_REANIM_ZOMBIE_ZAMBONI_1_DAMAGE1: ImageId = 2008;
pub const IMAGE_REANIM_ZOMBIE_ZAMBONI_1_DAMAGE2: ImageId = 2009;
pub const IMAGE_REANIM_ZOMBIE_ZAMBONI_2_DAMAGE1: ImageId = 2010;
pub const IMAGE_REANIM_ZOMBIE_ZAMBONI_2_DAMAGE2: ImageId = 2011;
pub const IMAGE_REANIM_ZOMBIE_CATAPULT_SIDING_DAMAGE: ImageId = 2012;
pub const IMAGE_REANIM_ZOMBIE_BOSS_HEAD_DAMAGE1: ImageId = 2013;
pub const IMAGE_REANIM_ZOMBIE_BOSS_HEAD_DAMAGE2: ImageId = 2014;
pub const IMAGE_REANIM_ZOMBIE_BOSS_JAW_DAMAGE1: ImageId = 2015;
pub const IMAGE_REANIM_ZOMBIE_BOSS_JAW_DAMAGE2: ImageId = 2016;

/// Handle to a loaded image owned by the asset layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHandle(pub u32);

pub struct Resources {
    images: HashMap<ImageId, ImageHandle>,
    reanim_defs: Vec<Option<ReanimatorDefinition>>,
    particle_defs: Vec<Option<ParticleDefinition>>,
    trail_defs: Vec<Option<TrailDefinition>>,
}

impl Resources {
    pub fn new() -> Self {
        Resources {
            images: HashMap::new(),
            reanim_defs: (0..NUM_REANIMS).map(|_| None).collect(),
            particle_defs: (0..NUM_PARTICLES).map(|_| None).collect(),
            trail_defs: (0..NUM_TRAILS).map(|_| None).collect(),
        }
    }

    pub fn register_image(&mut self, id: ImageId, handle: ImageHandle) {
        self.images.insert(id, handle);
    }

    pub fn image_by_id(&self, id: ImageId) -> Option<ImageHandle> {
        if id == IMAGE_ID_NONE {
            return None;
        }
        self.images.get(&id).copied()
    }

    pub fn register_reanim_def(&mut self, ty: i32, def: ReanimatorDefinition) {
        if (0..NUM_REANIMS).contains(&ty) {
            self.reanim_defs[ty as usize] = Some(def);
        }
    }

    pub fn register_particle_def(&mut self, ty: i32, def: ParticleDefinition) {
        if (0..NUM_PARTICLES).contains(&ty) {
            self.particle_defs[ty as usize] = Some(def);
        }
    }

    pub fn register_trail_def(&mut self, ty: i32, def: TrailDefinition) {
        if (0..NUM_TRAILS).contains(&ty) {
            self.trail_defs[ty as usize] = Some(def);
        }
    }

    pub fn is_valid_reanim_type(&self, ty: i32) -> bool {
        (0..NUM_REANIMS).contains(&ty)
    }

    pub fn is_valid_particle_type(&self, ty: i32) -> bool {
        (0..NUM_PARTICLES).contains(&ty)
    }

    pub fn is_valid_trail_type(&self, ty: i32) -> bool {
        (0..NUM_TRAILS).contains(&ty)
    }

    /// Definition lookup that loads on demand. Returns `None` only for
    /// an out-of-range type id.
    pub fn ensure_reanim_loaded(&mut self, ty: i32) -> Option<&ReanimatorDefinition> {
        if !self.is_valid_reanim_type(ty) {
            return None;
        }
        let slot = &mut self.reanim_defs[ty as usize];
        if slot.is_none() {
            debug!(ty, "loading reanimation definition on demand");
            *slot = Some(ReanimatorDefinition::default());
        }
        slot.as_ref()
    }

    pub fn reanim_def(&self, ty: i32) -> Option<&ReanimatorDefinition> {
        if !self.is_valid_reanim_type(ty) {
            return None;
        }
        self.reanim_defs[ty as usize].as_ref()
    }

    pub fn particle_def(&self, ty: i32) -> Option<&ParticleDefinition> {
        if !self.is_valid_particle_type(ty) {
            return None;
        }
        self.particle_defs[ty as usize].as_ref()
    }

    pub fn trail_def(&self, ty: i32) -> Option<&TrailDefinition> {
        if !self.is_valid_trail_type(ty) {
            return None;
        }
        self.trail_defs[ty as usize].as_ref()
    }
}

impl Default for Resources {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reanimator::ReanimatorTrackDef;

    #[test]
    fn test_image_lookup() {
        let mut res = Resources::new();
        res.register_image(5, ImageHandle(500));
        assert_eq!(res.image_by_id(5), Some(ImageHandle(500)));
        assert_eq!(res.image_by_id(6), None);
        assert_eq!(res.image_by_id(IMAGE_ID_NONE), None);
    }

    #[test]
    fn test_ensure_reanim_loaded_is_lazy() {
        let mut res = Resources::new();
        assert!(res.reanim_def(3).is_none());
        assert!(res.ensure_reanim_loaded(3).is_some());
        assert!(res.reanim_def(3).is_some());
        // Out of range stays unresolvable.
        assert!(res.ensure_reanim_loaded(-1).is_none());
        assert!(res.ensure_reanim_loaded(NUM_REANIMS).is_none());
    }

    #[test]
    fn test_registered_definition_survives_ensure() {
        let mut res = Resources::new();
        res.register_reanim_def(
            2,
            ReanimatorDefinition {
                tracks: vec![ReanimatorTrackDef { name: "anim_walk".to_string() }],
                fps: 12.0,
            },
        );
        let def = res.ensure_reanim_loaded(2).unwrap();
        assert_eq!(def.tracks.len(), 1);
    }
}
