// music.rs — layered music playback state

pub const MUSIC_TUNE_NONE: i32 = -1;
pub const MUSIC_DRUMS_OFF: i32 = 0;
pub const MUSIC_DRUMS_ON_QUEUED: i32 = 1;
pub const MUSIC_DRUMS_ON: i32 = 2;
pub const MUSIC_DRUMS_FADING: i32 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct Music {
    pub cur_music_tune: i32,
    pub cur_music_file_main: i32,
    pub cur_music_file_drums: i32,
    pub cur_music_file_hihats: i32,
    pub burst_override: i32,
    pub base_bpm: f32,
    pub base_mod_speed: f32,
    pub music_burst_state: i32,
    pub burst_state_counter: i32,
    pub music_drums_state: i32,
    pub queued_drum_track_packed_order: i32,
    pub drums_state_counter: i32,
    pub pause_offset: i32,
    pub pause_offset_drums: i32,
    pub paused: bool,
    /// Runtime capability flag: set when audio assets fail to load.
    /// Written for diagnostics but never restored from a save.
    pub music_disabled: bool,
    pub fade_out_counter: i32,
    pub fade_out_duration: i32,
}

impl Default for Music {
    fn default() -> Self {
        Music {
            cur_music_tune: MUSIC_TUNE_NONE,
            cur_music_file_main: -1,
            cur_music_file_drums: -1,
            cur_music_file_hihats: -1,
            burst_override: -1,
            base_bpm: 0.0,
            base_mod_speed: 0.0,
            music_burst_state: 0,
            burst_state_counter: 0,
            music_drums_state: MUSIC_DRUMS_OFF,
            queued_drum_track_packed_order: 0,
            drums_state_counter: 0,
            pause_offset: 0,
            pause_offset_drums: 0,
            paused: false,
            music_disabled: false,
            fade_out_counter: -1,
            fade_out_duration: 0,
        }
    }
}
