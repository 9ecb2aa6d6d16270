// effect_system.rs — the holders for every visual-effect entity table

use crate::attachment::{Attachment, MAX_ATTACHMENTS};
use crate::data_array::DataArray;
use crate::particle::{
    TodParticle, TodParticleEmitter, TodParticleSystem, MAX_PARTICLES, MAX_PARTICLE_EMITTERS,
    MAX_PARTICLE_SYSTEMS,
};
use crate::reanimator::{Reanimation, MAX_REANIMATIONS};
use crate::trail::{Trail, MAX_TRAILS};

pub struct EffectSystem {
    pub particle_systems: DataArray<TodParticleSystem>,
    pub emitters: DataArray<TodParticleEmitter>,
    pub particles: DataArray<TodParticle>,
    pub reanimations: DataArray<Reanimation>,
    pub trails: DataArray<Trail>,
    pub attachments: DataArray<Attachment>,
}

impl EffectSystem {
    pub fn new() -> Self {
        EffectSystem {
            particle_systems: DataArray::new(MAX_PARTICLE_SYSTEMS, "particle systems"),
            emitters: DataArray::new(MAX_PARTICLE_EMITTERS, "particle emitters"),
            particles: DataArray::new(MAX_PARTICLES, "particles"),
            reanimations: DataArray::new(MAX_REANIMATIONS, "reanimations"),
            trails: DataArray::new(MAX_TRAILS, "trails"),
            attachments: DataArray::new(MAX_ATTACHMENTS, "attachments"),
        }
    }
}

impl Default for EffectSystem {
    fn default() -> Self {
        Self::new()
    }
}
