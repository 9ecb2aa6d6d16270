// particle.rs — particle effect state: systems own emitters, emitters
// own particles; all three live in slot tables and reference each other
// by id

use crate::board::{Color, Vector2};
use crate::resources::ImageId;

pub const PARTICLE_NONE: i32 = -1;
pub const NUM_PARTICLES: i32 = 112;

pub const NUM_PARTICLE_TRACKS: usize = 6;
pub const NUM_SYSTEM_TRACKS: usize = 7;
pub const MAX_PARTICLE_FIELDS: usize = 4;

pub const MAX_PARTICLE_SYSTEMS: u32 = 1024;
pub const MAX_PARTICLE_EMITTERS: u32 = 1024;
pub const MAX_PARTICLES: u32 = 8192;

/// One emitter layer of a particle definition. Emitters reference their
/// layer by index into this list.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EmitterDefinition {
    pub name: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParticleDefinition {
    pub emitter_defs: Vec<EmitterDefinition>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct TodParticle {
    /// Owning emitter, restored by the codec on load.
    pub particle_emitter_id: u32,
    pub particle_duration: i32,
    pub particle_age: i32,
    pub particle_time_value: f32,
    pub particle_last_time_value: f32,
    pub animation_time_value: f32,
    pub velocity: Vector2,
    pub position: Vector2,
    pub image_frame: i32,
    pub spin_position: f32,
    pub spin_velocity: f32,
    pub cross_fade_particle_id: u32,
    pub cross_fade_duration: i32,
    pub particle_interp: [f32; NUM_PARTICLE_TRACKS],
    pub particle_field_interp: [[f32; 2]; MAX_PARTICLE_FIELDS],
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct TodParticleEmitter {
    /// Index into the owning definition's emitter layer list.
    pub emitter_def_index: i32,
    pub particle_list: Vec<u32>,
    pub system_center: Vector2,
    pub color_override: Color,
    pub image_override: ImageId,
    pub spawn_accum: f32,
    pub particles_spawned: i32,
    pub system_age: i32,
    pub system_duration: i32,
    pub system_time_value: f32,
    pub system_last_time_value: f32,
    pub dead: bool,
    pub extra_additive_draw_override: bool,
    pub scale_override: f32,
    pub cross_fade_emitter_id: u32,
    pub emitter_cross_fade_countdown: i32,
    pub frame_override: i32,
    pub track_interp: [f32; NUM_SYSTEM_TRACKS],
    pub system_field_interp: [[f32; 2]; MAX_PARTICLE_FIELDS],
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct TodParticleSystem {
    /// Definition type id; `PARTICLE_NONE` when unset.
    pub particle_type: i32,
    pub emitter_list: Vec<u32>,
    pub effect_type: i32,
    pub dead: bool,
    pub is_attachment: bool,
    pub render_order: i32,
    pub dont_update: bool,
}

