// challenge.rs — per-mode minigame/puzzle state

use crate::plant::SEED_NONE;

pub const BEGHOULED_GRID_X: usize = 9;
pub const BEGHOULED_GRID_Y: usize = 6;
pub const NUM_BEGHOULED_UPGRADES: usize = 4;
pub const NUM_CLOUDS: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct Challenge {
    pub challenge_state: i32,
    pub challenge_state_counter: i32,
    pub conveyor_belt_counter: i32,
    pub challenge_score: i32,
    pub show_bowling_line: bool,
    pub last_conveyor_seed_type: i32,
    pub survival_stage: i32,
    pub slot_machine_roll_count: i32,
    pub reanim_challenge_id: u32,
    pub reanim_clouds: [u32; NUM_CLOUDS],
    pub clouds_counter: [i32; NUM_CLOUDS],
    pub challenge_grid_x: i32,
    pub challenge_grid_y: i32,
    pub scary_potter_pots: i32,
    pub rain_counter: i32,
    pub tree_of_wisdom_talk_index: i32,
    pub beghouled_mouse_capture: bool,
    pub beghouled_mouse_down_x: i32,
    pub beghouled_mouse_down_y: i32,
    pub beghouled_eaten: [[bool; BEGHOULED_GRID_Y]; BEGHOULED_GRID_X],
    pub beghouled_purchased_upgrade: [bool; NUM_BEGHOULED_UPGRADES],
    pub beghouled_matches_this_move: i32,
}

impl Default for Challenge {
    fn default() -> Self {
        Challenge {
            challenge_state: 0,
            challenge_state_counter: 0,
            conveyor_belt_counter: 0,
            challenge_score: 0,
            show_bowling_line: false,
            last_conveyor_seed_type: SEED_NONE,
            survival_stage: 0,
            slot_machine_roll_count: 0,
            reanim_challenge_id: 0,
            reanim_clouds: [0; NUM_CLOUDS],
            clouds_counter: [0; NUM_CLOUDS],
            challenge_grid_x: 0,
            challenge_grid_y: 0,
            scary_potter_pots: 0,
            rain_counter: 0,
            tree_of_wisdom_talk_index: 0,
            beghouled_mouse_capture: false,
            beghouled_mouse_down_x: 0,
            beghouled_mouse_down_y: 0,
            beghouled_eaten: [[false; BEGHOULED_GRID_Y]; BEGHOULED_GRID_X],
            beghouled_purchased_upgrade: [false; NUM_BEGHOULED_UPGRADES],
            beghouled_matches_this_move: 0,
        }
    }
}
