// zombie.rs — zombie entity state

use crate::board::{GameObject, Rect};

pub const NUM_ZOMBIE_TYPES: usize = 100;

// Zombie type values are frozen save-format data.
pub const ZOMBIE_NORMAL: i32 = 0;
pub const ZOMBIE_FLAG: i32 = 1;
pub const ZOMBIE_TRAFFIC_CONE: i32 = 2;
pub const ZOMBIE_POLEVAULTER: i32 = 3;
pub const ZOMBIE_PAIL: i32 = 4;
pub const ZOMBIE_NEWSPAPER: i32 = 5;
pub const ZOMBIE_DOOR: i32 = 6;
pub const ZOMBIE_FOOTBALL: i32 = 7;
pub const ZOMBIE_DANCER: i32 = 8;
pub const ZOMBIE_BACKUP_DANCER: i32 = 9;
pub const ZOMBIE_DUCKY_TUBE: i32 = 10;
pub const ZOMBIE_SNORKEL: i32 = 11;
pub const ZOMBIE_ZAMBONI: i32 = 12;
pub const ZOMBIE_BOBSLED: i32 = 13;
pub const ZOMBIE_DOLPHIN_RIDER: i32 = 14;
pub const ZOMBIE_JACK_IN_THE_BOX: i32 = 15;
pub const ZOMBIE_BALLOON: i32 = 16;
pub const ZOMBIE_DIGGER: i32 = 17;
pub const ZOMBIE_POGO: i32 = 18;
pub const ZOMBIE_YETI: i32 = 19;
pub const ZOMBIE_BUNGEE: i32 = 20;
pub const ZOMBIE_LADDER: i32 = 21;
pub const ZOMBIE_CATAPULT: i32 = 22;
pub const ZOMBIE_GARGANTUAR: i32 = 23;
pub const ZOMBIE_IMP: i32 = 24;
pub const ZOMBIE_BOSS: i32 = 25;
pub const ZOMBIE_REDEYE_GARGANTUAR: i32 = 32;

pub const MAX_ZOMBIE_FOLLOWERS: usize = 4;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Zombie {
    pub game_object: GameObject,
    pub zombie_type: i32,
    pub zombie_phase: i32,
    pub pos_x: f32,
    pub pos_y: f32,
    pub vel_x: f32,
    pub anim_counter: i32,
    pub anim_ticks_per_frame: i32,
    pub anim_frames: i32,
    pub frame: i32,
    pub prev_frame: i32,
    pub variant: bool,
    pub is_eating: bool,
    pub just_got_shot_counter: i32,
    pub shield_just_got_shot_counter: i32,
    pub shield_recoil_counter: i32,
    pub zombie_age: i32,
    pub zombie_height: i32,
    pub phase_counter: i32,
    pub from_wave: i32,
    pub dropped_loot: bool,
    pub zombie_fade: i32,
    pub use_ladder_col: i32,
    pub target_col: i32,
    pub altitude: f32,
    pub hit_umbrella: bool,
    pub zombie_rect: Rect,
    pub zombie_attack_rect: Rect,
    pub chilled_counter: i32,
    pub buttered_counter: i32,
    pub ice_trap_counter: i32,
    pub mind_controlled: bool,
    pub blowing_away: bool,
    pub has_head: bool,
    pub has_arm: bool,
    pub has_object: bool,
    pub in_pool: bool,
    pub on_high_ground: bool,
    pub yucky_face: bool,
    pub yucky_face_counter: i32,
    pub helm_type: i32,
    pub body_health: i32,
    pub body_max_health: i32,
    pub helm_health: i32,
    pub helm_max_health: i32,
    pub shield_type: i32,
    pub shield_health: i32,
    pub shield_max_health: i32,
    pub flying_health: i32,
    pub flying_max_health: i32,
    pub dead: bool,
    pub related_zombie_id: u32,
    pub follower_zombie_id: [u32; MAX_ZOMBIE_FOLLOWERS],
    pub playing_song: bool,
    pub particle_offset_x: i32,
    pub particle_offset_y: i32,
    pub attachment_id: u32,
    pub summon_counter: i32,
    pub body_reanim_id: u32,
    pub scale_zombie: f32,
    pub vel_z: f32,
    pub original_anim_rate: f32,
    pub target_plant_id: u32,
    pub boss_mode: i32,
    pub target_row: i32,
    pub boss_bungee_counter: i32,
    pub boss_stomp_counter: i32,
    pub boss_head_counter: i32,
    pub boss_fire_ball_reanim_id: u32,
    pub special_head_reanim_id: u32,
    pub fireball_row: i32,
    pub is_fireball: bool,
    pub mowered_reanim_id: u32,
    pub last_portal_x: i32,
}

impl Zombie {
    /// Damage stage derived from body health, used to pick damage
    /// overlay art after a load.
    pub fn body_damage_index(&self) -> i32 {
        if self.body_max_health <= 0 {
            return 0;
        }
        if self.body_health < self.body_max_health / 3 {
            2
        } else if self.body_health < self.body_max_health * 2 / 3 {
            1
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_damage_index_stages() {
        let mut z = Zombie::default();
        z.body_max_health = 270;
        z.body_health = 270;
        assert_eq!(z.body_damage_index(), 0);
        z.body_health = 179;
        assert_eq!(z.body_damage_index(), 1);
        z.body_health = 89;
        assert_eq!(z.body_damage_index(), 2);
    }

    #[test]
    fn test_body_damage_index_unset_health() {
        let z = Zombie::default();
        assert_eq!(z.body_damage_index(), 0);
    }
}
