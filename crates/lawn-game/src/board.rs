// board.rs — the live game session the save codec serializes
//
// The board owns the grid and wave state, the six lawn entity tables,
// the effect system holders, and the singleton records (cursor, advice,
// seed bank, challenge, music). The codec borrows all of it for the
// duration of one pass; nothing here knows about file formats.

use crate::challenge::Challenge;
use crate::coin::Coin;
use crate::cursor::{CursorObject, CursorPreview};
use crate::data_array::DataArray;
use crate::effect_system::EffectSystem;
use crate::grid_item::GridItem;
use crate::lawn_mower::LawnMower;
use crate::message_widget::MessageWidget;
use crate::music::Music;
use crate::plant::Plant;
use crate::projectile::Projectile;
use crate::seed_bank::SeedBank;
use crate::zombie::{Zombie, NUM_ZOMBIE_TYPES};

pub const MAX_GRID_SIZE_X: usize = 9;
pub const MAX_GRID_SIZE_Y: usize = 6;
pub const MAX_ZOMBIE_WAVES: usize = 100;
pub const MAX_ZOMBIES_IN_WAVE: usize = 50;
pub const MAX_FWOOSHES_IN_ROW: usize = 12;
pub const NUM_ADVICE_TYPES: usize = 42;

// Configured entity table capacities. These are properties of the
// build: a save claiming different capacities is rejected.
pub const MAX_ZOMBIES: u32 = 1024;
pub const MAX_PLANTS: u32 = 512;
pub const MAX_PROJECTILES: u32 = 1024;
pub const MAX_COINS: u32 = 1024;
pub const MAX_MOWERS: u32 = 32;
pub const MAX_GRID_ITEMS: u32 = 128;

// Board results.
pub const BOARD_RESULT_NONE: i32 = 0;
pub const BOARD_RESULT_WON: i32 = 1;
pub const BOARD_RESULT_LOST: i32 = 2;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: i32,
    pub green: i32,
    pub blue: i32,
    pub alpha: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3 {
    pub m00: f32,
    pub m01: f32,
    pub m02: f32,
    pub m10: f32,
    pub m11: f32,
    pub m12: f32,
    pub m20: f32,
    pub m21: f32,
    pub m22: f32,
}

impl Default for Matrix3 {
    fn default() -> Self {
        Matrix3 {
            m00: 1.0, m01: 0.0, m02: 0.0,
            m10: 0.0, m11: 1.0, m12: 0.0,
            m20: 0.0, m21: 0.0, m22: 1.0,
        }
    }
}

/// Common positional state shared by the on-screen lawn entities.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GameObject {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub visible: bool,
    pub row: i32,
    pub render_order: i32,
}

/// Weighted pick history for row selection.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TodSmoothArray {
    pub item: i32,
    pub weight: f32,
    pub last_picked: f32,
    pub second_last_picked: f32,
}

pub struct Board {
    pub paused: bool,
    pub grid_square_type: [[i32; MAX_GRID_SIZE_Y]; MAX_GRID_SIZE_X],
    pub grid_cel_look: [[i32; MAX_GRID_SIZE_Y]; MAX_GRID_SIZE_X],
    pub grid_cel_fog: [[i32; MAX_GRID_SIZE_Y + 1]; MAX_GRID_SIZE_X],
    pub enable_gravestones: bool,
    pub special_grave_stone_x: i32,
    pub special_grave_stone_y: i32,
    pub fog_offset: f32,
    pub fog_blown_count_down: i32,
    pub plant_row: [i32; MAX_GRID_SIZE_Y],
    pub wave_row_got_lawn_mowered: [i32; MAX_GRID_SIZE_Y],
    pub bonus_lawn_mowers_remaining: i32,
    pub ice_min_x: [i32; MAX_GRID_SIZE_Y],
    pub ice_timer: [i32; MAX_GRID_SIZE_Y],
    pub ice_particle_id: [u32; MAX_GRID_SIZE_Y],
    pub row_picking_array: [TodSmoothArray; MAX_GRID_SIZE_Y],
    pub zombies_in_wave: [[i32; MAX_ZOMBIES_IN_WAVE]; MAX_ZOMBIE_WAVES],
    pub zombie_allowed: [bool; NUM_ZOMBIE_TYPES],
    pub sun_count_down: i32,
    pub num_suns_fallen: i32,
    pub shake_counter: i32,
    pub shake_amount_x: i32,
    pub shake_amount_y: i32,
    pub background: i32,
    pub level: i32,
    pub sod_position: i32,
    pub sun_money: i32,
    pub num_waves: i32,
    pub main_counter: i32,
    pub current_wave: i32,
    pub total_spawned_waves: i32,
    pub tutorial_state: i32,
    pub tutorial_particle_id: u32,
    pub tutorial_timer: i32,
    pub last_bungee_wave: i32,
    pub zombie_health_to_next_wave: i32,
    pub zombie_health_wave_start: i32,
    pub zombie_count_down: i32,
    pub zombie_count_down_start: i32,
    pub huge_wave_count_down: i32,
    pub help_displayed: [bool; NUM_ADVICE_TYPES],
    pub help_index: i32,
    pub final_boss_killed: bool,
    pub show_shovel: bool,
    pub level_complete: bool,
    pub board_fade_out_counter: i32,
    pub next_survival_stage_counter: i32,
    pub level_award_spawned: bool,
    pub progress_meter_width: i32,
    pub flag_raise_counter: i32,
    pub ice_trap_counter: i32,
    pub board_rand_seed: i32,
    pub pool_sparkly_particle_id: u32,
    pub fwoosh_id: [[u32; MAX_FWOOSHES_IN_ROW]; MAX_GRID_SIZE_Y],
    pub fwoosh_count_down: i32,
    pub time_stop_counter: i32,
    pub dropped_first_coin: bool,
    pub killed_yeti: bool,
    pub mustache_mode: bool,
    pub super_mower_mode: bool,
    pub future_mode: bool,
    pub pinata_mode: bool,
    pub dance_mode: bool,
    pub daisy_mode: bool,
    pub sukhbir_mode: bool,
    pub prev_board_result: i32,
    pub triggered_lawn_mowers: i32,
    pub play_time_active_level: i32,
    pub play_time_inactive_level: i32,
    pub graves_cleared: i32,
    pub plants_eaten: i32,
    pub plants_shoveled: i32,
    pub coins_collected: i32,

    // Entity tables.
    pub zombies: DataArray<Zombie>,
    pub plants: DataArray<Plant>,
    pub projectiles: DataArray<Projectile>,
    pub coins: DataArray<Coin>,
    pub lawn_mowers: DataArray<LawnMower>,
    pub grid_items: DataArray<GridItem>,
    pub effects: EffectSystem,

    // Singleton records.
    pub cursor_object: CursorObject,
    pub cursor_preview: CursorPreview,
    pub advice: MessageWidget,
    pub seed_bank: SeedBank,
    pub challenge: Challenge,
    pub music: Music,

    /// Runtime flag set by a successful load; never serialized.
    pub resumable: bool,
}

impl Board {
    pub fn new() -> Self {
        Board {
            paused: false,
            grid_square_type: [[0; MAX_GRID_SIZE_Y]; MAX_GRID_SIZE_X],
            grid_cel_look: [[0; MAX_GRID_SIZE_Y]; MAX_GRID_SIZE_X],
            grid_cel_fog: [[0; MAX_GRID_SIZE_Y + 1]; MAX_GRID_SIZE_X],
            enable_gravestones: false,
            special_grave_stone_x: -1,
            special_grave_stone_y: -1,
            fog_offset: 0.0,
            fog_blown_count_down: 0,
            plant_row: [0; MAX_GRID_SIZE_Y],
            wave_row_got_lawn_mowered: [0; MAX_GRID_SIZE_Y],
            bonus_lawn_mowers_remaining: 0,
            ice_min_x: [0; MAX_GRID_SIZE_Y],
            ice_timer: [0; MAX_GRID_SIZE_Y],
            ice_particle_id: [0; MAX_GRID_SIZE_Y],
            row_picking_array: [TodSmoothArray::default(); MAX_GRID_SIZE_Y],
            zombies_in_wave: [[-1; MAX_ZOMBIES_IN_WAVE]; MAX_ZOMBIE_WAVES],
            zombie_allowed: [false; NUM_ZOMBIE_TYPES],
            sun_count_down: 0,
            num_suns_fallen: 0,
            shake_counter: 0,
            shake_amount_x: 0,
            shake_amount_y: 0,
            background: 0,
            level: 1,
            sod_position: 0,
            sun_money: 50,
            num_waves: 0,
            main_counter: 0,
            current_wave: 0,
            total_spawned_waves: 0,
            tutorial_state: 0,
            tutorial_particle_id: 0,
            tutorial_timer: -1,
            last_bungee_wave: -1,
            zombie_health_to_next_wave: -1,
            zombie_health_wave_start: 0,
            zombie_count_down: 0,
            zombie_count_down_start: 0,
            huge_wave_count_down: 0,
            help_displayed: [false; NUM_ADVICE_TYPES],
            help_index: 0,
            final_boss_killed: false,
            show_shovel: false,
            level_complete: false,
            board_fade_out_counter: -1,
            next_survival_stage_counter: 0,
            level_award_spawned: false,
            progress_meter_width: 0,
            flag_raise_counter: 0,
            ice_trap_counter: 0,
            board_rand_seed: 0,
            pool_sparkly_particle_id: 0,
            fwoosh_id: [[0; MAX_FWOOSHES_IN_ROW]; MAX_GRID_SIZE_Y],
            fwoosh_count_down: 0,
            time_stop_counter: 0,
            dropped_first_coin: false,
            killed_yeti: false,
            mustache_mode: false,
            super_mower_mode: false,
            future_mode: false,
            pinata_mode: false,
            dance_mode: false,
            daisy_mode: false,
            sukhbir_mode: false,
            prev_board_result: BOARD_RESULT_NONE,
            triggered_lawn_mowers: 0,
            play_time_active_level: 0,
            play_time_inactive_level: 0,
            graves_cleared: 0,
            plants_eaten: 0,
            plants_shoveled: 0,
            coins_collected: 0,
            zombies: DataArray::new(MAX_ZOMBIES, "zombies"),
            plants: DataArray::new(MAX_PLANTS, "plants"),
            projectiles: DataArray::new(MAX_PROJECTILES, "projectiles"),
            coins: DataArray::new(MAX_COINS, "coins"),
            lawn_mowers: DataArray::new(MAX_MOWERS, "mowers"),
            grid_items: DataArray::new(MAX_GRID_ITEMS, "grid items"),
            effects: EffectSystem::new(),
            cursor_object: CursorObject::default(),
            cursor_preview: CursorPreview::default(),
            advice: MessageWidget::default(),
            seed_bank: SeedBank::default(),
            challenge: Challenge::default(),
            music: Music::default(),
            resumable: false,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
