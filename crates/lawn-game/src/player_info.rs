// player_info.rs — per-user profile records
//
// Profiles use the versioned flat sync layout rather than the chunked
// save container: the first field of the details record is a version
// stamp, and a stamp from a different build leaves the freshly-reset
// profile untouched.

use std::path::{Path, PathBuf};

use lawn_common::data_rw::{DataError, DataReader, DataResult, DataWriter};
use lawn_common::files;
use lawn_common::sync::DataSync;
use tracing::warn;

use crate::plant::SEED_NONE;

pub const USER_VERSION: i32 = 12;
pub const MAX_POTTED_PLANTS: usize = 200;
pub const NUM_CHALLENGE_RECORDS: usize = 100;
pub const NUM_PURCHASES: usize = 80;
pub const NUM_ACHIEVEMENTS: usize = 20;

pub const FACING_RIGHT: i32 = 0;
pub const FACING_LEFT: i32 = 1;

/// A zen-garden plant as stored in the profile.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PottedPlant {
    pub seed_type: i32,
    pub which_zen_garden: i32,
    pub x: i32,
    pub y: i32,
    pub facing: i32,
    pub last_watered_time: i64,
    pub draw_variation: i32,
    pub plant_age: i32,
    pub times_fed: i32,
    pub feedings_per_grow: i32,
    pub plant_need: i32,
    pub last_need_fulfilled_time: i64,
    pub last_fertilized_time: i64,
    pub last_chocolate_time: i64,
}

impl PottedPlant {
    fn sync(&mut self, sync: &mut DataSync) -> DataResult<()> {
        sync.sync_i32(&mut self.seed_type)?;
        sync.sync_i32(&mut self.which_zen_garden)?;
        sync.sync_i32(&mut self.x)?;
        sync.sync_i32(&mut self.y)?;
        sync.sync_i32(&mut self.facing)?;
        sync.sync_i64(&mut self.last_watered_time)?;
        sync.sync_i32(&mut self.draw_variation)?;
        sync.sync_i32(&mut self.plant_age)?;
        sync.sync_i32(&mut self.times_fed)?;
        sync.sync_i32(&mut self.feedings_per_grow)?;
        sync.sync_i32(&mut self.plant_need)?;
        sync.sync_i64(&mut self.last_need_fulfilled_time)?;
        sync.sync_i64(&mut self.last_fertilized_time)?;
        sync.sync_i64(&mut self.last_chocolate_time)?;
        Ok(())
    }
}

pub struct PlayerInfo {
    pub name: String,
    pub use_seq: u32,
    pub id: u32,
    pub level: i32,
    pub coins: i32,
    pub finished_adventure: i32,
    pub challenge_records: [i32; NUM_CHALLENGE_RECORDS],
    pub purchases: [i32; NUM_PURCHASES],
    pub play_time_active_player: i32,
    pub play_time_inactive_player: i32,
    pub has_used_cheat_keys: i32,
    pub has_woken_stinky: i32,
    pub has_unlocked_minigames: i32,
    pub has_unlocked_puzzle_mode: i32,
    pub has_unlocked_survival_mode: i32,
    pub needs_message_on_game_selector: i32,
    pub has_seen_stinky: i32,
    pub stinky_pos_x: i32,
    pub stinky_pos_y: i32,
    pub last_stinky_chocolate_time: i64,
    pub potted_plants: Vec<PottedPlant>,
    pub earned_achievements: [bool; NUM_ACHIEVEMENTS],
    pub shown_achievements: [bool; NUM_ACHIEVEMENTS],
}

impl PlayerInfo {
    pub fn new() -> Self {
        PlayerInfo {
            name: String::new(),
            use_seq: 0,
            id: 0,
            level: 1,
            coins: 0,
            finished_adventure: 0,
            challenge_records: [0; NUM_CHALLENGE_RECORDS],
            purchases: [0; NUM_PURCHASES],
            play_time_active_player: 0,
            play_time_inactive_player: 0,
            has_used_cheat_keys: 0,
            has_woken_stinky: 0,
            has_unlocked_minigames: 0,
            has_unlocked_puzzle_mode: 0,
            has_unlocked_survival_mode: 0,
            needs_message_on_game_selector: 0,
            has_seen_stinky: 0,
            stinky_pos_x: 0,
            stinky_pos_y: 0,
            last_stinky_chocolate_time: 0,
            potted_plants: Vec::new(),
            earned_achievements: [false; NUM_ACHIEVEMENTS],
            shown_achievements: [false; NUM_ACHIEVEMENTS],
        }
    }

    /// Restore everything except the identity fields synced by
    /// `sync_summary`.
    pub fn reset(&mut self) {
        let name = std::mem::take(&mut self.name);
        let use_seq = self.use_seq;
        let id = self.id;
        *self = PlayerInfo::new();
        self.name = name;
        self.use_seq = use_seq;
        self.id = id;
    }

    /// The identity line stored in the profile index.
    pub fn sync_summary(&mut self, sync: &mut DataSync) -> DataResult<()> {
        sync.sync_string(&mut self.name)?;
        sync.sync_u32(&mut self.use_seq)?;
        sync.sync_u32(&mut self.id)?;
        Ok(())
    }

    /// The full profile record. The leading version stamp gates the
    /// rest: a stamp from another build leaves the reset defaults in
    /// place and is not an error.
    pub fn sync_details(&mut self, sync: &mut DataSync) -> DataResult<()> {
        if sync.is_reading() {
            self.reset();
        }

        let mut version = USER_VERSION;
        sync.sync_i32(&mut version)?;
        sync.set_version(version);
        if version != USER_VERSION {
            warn!(version, expected = USER_VERSION, "profile version stamp mismatch");
            return Ok(());
        }

        sync.sync_i32(&mut self.level)?;
        sync.sync_i32(&mut self.coins)?;
        sync.sync_i32(&mut self.finished_adventure)?;
        for record in self.challenge_records.iter_mut() {
            sync.sync_i32(record)?;
        }
        for purchase in self.purchases.iter_mut() {
            sync.sync_i32(purchase)?;
        }
        sync.sync_i32(&mut self.play_time_active_player)?;
        sync.sync_i32(&mut self.play_time_inactive_player)?;
        sync.sync_i32(&mut self.has_used_cheat_keys)?;
        sync.sync_i32(&mut self.has_woken_stinky)?;
        sync.sync_i32(&mut self.has_unlocked_minigames)?;
        sync.sync_i32(&mut self.has_unlocked_puzzle_mode)?;
        sync.sync_i32(&mut self.has_unlocked_survival_mode)?;
        sync.sync_i32(&mut self.needs_message_on_game_selector)?;
        sync.sync_i32(&mut self.has_seen_stinky)?;
        sync.sync_i32(&mut self.stinky_pos_x)?;
        sync.sync_i32(&mut self.stinky_pos_y)?;
        sync.sync_i64(&mut self.last_stinky_chocolate_time)?;

        let mut num_potted = self.potted_plants.len() as i32;
        sync.sync_i32(&mut num_potted)?;
        if sync.is_reading() {
            if !(0..=MAX_POTTED_PLANTS as i32).contains(&num_potted) {
                return Err(DataError::OutOfData);
            }
            self.potted_plants.clear();
            for _ in 0..num_potted {
                let mut plant = PottedPlant {
                    seed_type: SEED_NONE,
                    ..Default::default()
                };
                plant.sync(sync)?;
                self.potted_plants.push(plant);
            }
        } else {
            for plant in self.potted_plants.iter_mut() {
                plant.sync(sync)?;
            }
        }

        // Achievements are stored as 20 x 16-bit values (0/1).
        for i in 0..NUM_ACHIEVEMENTS {
            let mut value: u16 = self.earned_achievements[i] as u16;
            sync.sync_u16(&mut value)?;
            if sync.is_reading() {
                self.earned_achievements[i] = value != 0;
                self.shown_achievements[i] = self.earned_achievements[i];
            }
        }

        Ok(())
    }

    pub fn details_path(base_dir: &Path, id: u32) -> PathBuf {
        base_dir.join("userdata").join(format!("user{}.dat", id))
    }

    /// Load the details record; any structural failure resets the
    /// profile rather than leaving it half-applied.
    pub fn load_details(&mut self, base_dir: &Path) {
        let path = Self::details_path(base_dir, self.id);
        let data = match files::load_file(&path) {
            Ok(data) => data,
            Err(_) => return,
        };
        let mut reader = DataReader::from_vec(data);
        let mut sync = DataSync::from_reader(&mut reader);
        if self.sync_details(&mut sync).is_err() {
            warn!(path = %path.display(), "failed to read player data, resetting it");
            self.reset();
        }
    }

    pub fn save_details(&mut self, base_dir: &Path) -> DataResult<()> {
        let mut writer = DataWriter::open_memory(0x400);
        {
            let mut sync = DataSync::from_writer(&mut writer);
            self.sync_details(&mut sync)?;
        }
        let path = Self::details_path(base_dir, self.id);
        files::save_file(&path, writer.data())
    }

    pub fn delete_user_files(&self, base_dir: &Path) -> DataResult<()> {
        files::erase_file(Self::details_path(base_dir, self.id))
    }
}

impl Default for PlayerInfo {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> PlayerInfo {
        let mut info = PlayerInfo::new();
        info.name = "Crazy Dave".to_string();
        info.id = 3;
        info.level = 42;
        info.coins = 1750;
        info.finished_adventure = 1;
        info.challenge_records[10] = 7;
        info.purchases[2] = 1001;
        info.earned_achievements[0] = true;
        info.earned_achievements[19] = true;
        info.potted_plants.push(PottedPlant {
            seed_type: 1,
            which_zen_garden: 0,
            x: 2,
            y: 1,
            facing: FACING_LEFT,
            last_watered_time: 1_700_000_000,
            ..Default::default()
        });
        info
    }

    fn write_details(info: &mut PlayerInfo) -> Vec<u8> {
        let mut writer = DataWriter::open_memory(0x400);
        {
            let mut sync = DataSync::from_writer(&mut writer);
            info.sync_details(&mut sync).unwrap();
        }
        writer.take_data()
    }

    #[test]
    fn test_details_round_trip() {
        let mut info = sample_profile();
        let data = write_details(&mut info);

        let mut loaded = PlayerInfo::new();
        loaded.id = 3;
        let mut reader = DataReader::from_memory(&data);
        let mut sync = DataSync::from_reader(&mut reader);
        loaded.sync_details(&mut sync).unwrap();

        assert_eq!(loaded.level, 42);
        assert_eq!(loaded.coins, 1750);
        assert_eq!(loaded.challenge_records[10], 7);
        assert_eq!(loaded.purchases[2], 1001);
        assert_eq!(loaded.potted_plants.len(), 1);
        assert_eq!(loaded.potted_plants[0].facing, FACING_LEFT);
        assert!(loaded.earned_achievements[0]);
        assert!(loaded.shown_achievements[19]);
    }

    #[test]
    fn test_version_stamp_gates_record() {
        let mut info = sample_profile();
        let mut data = write_details(&mut info);
        // Corrupt the version stamp (first four bytes).
        data[0] = data[0].wrapping_add(1);

        let mut loaded = PlayerInfo::new();
        let mut reader = DataReader::from_memory(&data);
        let mut sync = DataSync::from_reader(&mut reader);
        loaded.sync_details(&mut sync).unwrap();

        // Record ignored: reset defaults survive.
        assert_eq!(loaded.level, 1);
        assert_eq!(loaded.coins, 0);
        assert!(loaded.potted_plants.is_empty());
    }

    #[test]
    fn test_truncated_details_is_error() {
        let mut info = sample_profile();
        let data = write_details(&mut info);
        let mut reader = DataReader::from_memory(&data[..data.len() / 2]);
        let mut sync = DataSync::from_reader(&mut reader);
        let mut loaded = PlayerInfo::new();
        assert!(loaded.sync_details(&mut sync).is_err());
    }

    #[test]
    fn test_save_and_load_details_files() {
        let base = std::env::temp_dir().join("lawn_player_info_test");
        let mut info = sample_profile();
        info.save_details(&base).unwrap();

        let mut loaded = PlayerInfo::new();
        loaded.id = 3;
        loaded.load_details(&base);
        assert_eq!(loaded.level, 42);
        assert_eq!(loaded.potted_plants.len(), 1);

        info.delete_user_files(&base).unwrap();
        let _ = std::fs::remove_dir_all(&base);
    }
}
