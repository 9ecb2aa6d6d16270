// cursor.rs — what the player is holding and where it would land

use crate::board::GameObject;
use crate::plant::SEED_NONE;

pub const CURSOR_TYPE_NORMAL: i32 = 0;
pub const CURSOR_TYPE_PLANT_FROM_BANK: i32 = 1;
pub const CURSOR_TYPE_SHOVEL: i32 = 2;
pub const CURSOR_TYPE_GLOVE: i32 = 3;
pub const CURSOR_TYPE_MONEY_SIGN: i32 = 4;
pub const CURSOR_TYPE_DUPLICATOR: i32 = 5;
pub const CURSOR_TYPE_WHEELBARROW: i32 = 6;
pub const CURSOR_TYPE_TREE_FOOD: i32 = 7;
pub const CURSOR_TYPE_HAMMER: i32 = 8;
pub const CURSOR_TYPE_COBCANNON_TARGET: i32 = 9;

#[derive(Debug, Clone, PartialEq)]
pub struct CursorObject {
    pub game_object: GameObject,
    pub seed_bank_index: i32,
    pub seed_type: i32,
    pub imitater_type: i32,
    pub cursor_type: i32,
    pub coin_id: u32,
    pub glove_plant_id: u32,
    pub duplicator_plant_id: u32,
    pub cob_cannon_plant_id: u32,
    pub hammer_down_counter: i32,
    pub reanim_cursor_id: u32,
}

impl Default for CursorObject {
    fn default() -> Self {
        CursorObject {
            game_object: GameObject::default(),
            seed_bank_index: -1,
            seed_type: SEED_NONE,
            imitater_type: SEED_NONE,
            cursor_type: CURSOR_TYPE_NORMAL,
            coin_id: 0,
            glove_plant_id: 0,
            duplicator_plant_id: 0,
            cob_cannon_plant_id: 0,
            hammer_down_counter: 0,
            reanim_cursor_id: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CursorPreview {
    pub game_object: GameObject,
    pub grid_x: i32,
    pub grid_y: i32,
}

impl Default for CursorPreview {
    fn default() -> Self {
        CursorPreview {
            game_object: GameObject::default(),
            grid_x: -1,
            grid_y: -1,
        }
    }
}
