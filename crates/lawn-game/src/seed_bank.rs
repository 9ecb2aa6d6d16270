// seed_bank.rs — the seed packet row at the top of the screen

use crate::board::GameObject;
use crate::plant::SEED_NONE;

pub const SEEDBANK_MAX: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct SeedPacket {
    pub game_object: GameObject,
    pub refresh_counter: i32,
    pub refresh_time: i32,
    pub index: i32,
    pub offset_x: i32,
    pub packet_type: i32,
    pub imitater_type: i32,
    pub slot_machine_count_down: i32,
    pub slot_machining_next_seed: i32,
    pub slot_machining_position: f32,
    pub active: bool,
    pub refreshing: bool,
    pub times_used: i32,
}

impl Default for SeedPacket {
    fn default() -> Self {
        SeedPacket {
            game_object: GameObject::default(),
            refresh_counter: 0,
            refresh_time: 0,
            index: 0,
            offset_x: 0,
            packet_type: SEED_NONE,
            imitater_type: SEED_NONE,
            slot_machine_count_down: 0,
            slot_machining_next_seed: SEED_NONE,
            slot_machining_position: 0.0,
            active: true,
            refreshing: false,
            times_used: 0,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct SeedBank {
    pub game_object: GameObject,
    pub num_packets: i32,
    pub cutscene_darken: i32,
    pub conveyor_belt_counter: i32,
    pub seed_packets: [SeedPacket; SEEDBANK_MAX],
}
