// save_portable.rs — the self-describing chunked save format
//
// Layout: a fixed header (magic, format version, payload size, payload
// CRC-32) followed by a flat sequence of tagged, length-prefixed
// chunks. Each chunk wraps its field payload in an inner version +
// field record, and every field inside is itself tagged and
// length-prefixed, so unknown tags are skippable at every level.
// Unknown chunk types and unknown field ids are skipped without error;
// missing fields keep their default values.

use lawn_common::data_rw::{DataError, DataReader, DataResult, DataWriter};
use tracing::{debug, warn};

use crate::board::{Board, Color, GameObject, Matrix3, Rect, TodSmoothArray, Vector2};
use crate::coin::Coin;
use crate::cursor::{CursorObject, CursorPreview};
use crate::data_array::{DataArray, DATA_ARRAY_KEY_MASK};
use crate::grid_item::GridItem;
use crate::lawn_mower::LawnMower;
use crate::message_widget::MessageWidget;
use crate::music::Music;
use crate::particle::{TodParticle, TodParticleEmitter, TodParticleSystem, PARTICLE_NONE};
use crate::plant::Plant;
use crate::projectile::Projectile;
use crate::reanimator::{Reanimation, ReanimatorTrackInstance, ReanimatorTransform, REANIM_NONE};
use crate::resources::Resources;
use crate::seed_bank::{SeedBank, SeedPacket, SEEDBANK_MAX};
use crate::trail::{Trail, TRAIL_NONE};
use crate::zombie::Zombie;

pub const SAVE_FILE_MAGIC: &[u8; 12] = b"LAWN_SAVE4\0\0";
pub const SAVE_FILE_VERSION: u32 = 1;
pub const SAVE_CHUNK_VERSION: u32 = 1;
pub const SAVE_HEADER_SIZE: usize = 24;

pub const CHUNK_BOARD_BASE: u32 = 1;
pub const CHUNK_ZOMBIES: u32 = 2;
pub const CHUNK_PLANTS: u32 = 3;
pub const CHUNK_PROJECTILES: u32 = 4;
pub const CHUNK_COINS: u32 = 5;
pub const CHUNK_MOWERS: u32 = 6;
pub const CHUNK_GRIDITEMS: u32 = 7;
pub const CHUNK_PARTICLE_EMITTERS: u32 = 8;
pub const CHUNK_PARTICLE_PARTICLES: u32 = 9;
pub const CHUNK_PARTICLE_SYSTEMS: u32 = 10;
pub const CHUNK_REANIMATIONS: u32 = 11;
pub const CHUNK_TRAILS: u32 = 12;
pub const CHUNK_ATTACHMENTS: u32 = 13;
pub const CHUNK_CURSOR: u32 = 14;
pub const CHUNK_CURSOR_PREVIEW: u32 = 15;
pub const CHUNK_ADVICE: u32 = 16;
pub const CHUNK_SEEDBANK: u32 = 17;
pub const CHUNK_SEEDPACKETS: u32 = 18;
pub const CHUNK_CHALLENGE: u32 = 19;
pub const CHUNK_MUSIC: u32 = 20;

/// Every chunk type the portable writer emits, in file order.
pub const CHUNK_ORDER: [u32; 20] = [
    CHUNK_BOARD_BASE,
    CHUNK_ZOMBIES,
    CHUNK_PLANTS,
    CHUNK_PROJECTILES,
    CHUNK_COINS,
    CHUNK_MOWERS,
    CHUNK_GRIDITEMS,
    CHUNK_PARTICLE_EMITTERS,
    CHUNK_PARTICLE_PARTICLES,
    CHUNK_PARTICLE_SYSTEMS,
    CHUNK_REANIMATIONS,
    CHUNK_TRAILS,
    CHUNK_ATTACHMENTS,
    CHUNK_CURSOR,
    CHUNK_CURSOR_PREVIEW,
    CHUNK_ADVICE,
    CHUNK_SEEDBANK,
    CHUNK_SEEDPACKETS,
    CHUNK_CHALLENGE,
    CHUNK_MUSIC,
];

// The one field id a chunk envelope carries.
const FIELD_CHUNK_PAYLOAD: u32 = 1;

// Field ids inside entity records. Frozen once shipped.
const FIELD_GAME_OBJECT: u32 = 1;
const FIELD_TAIL: u32 = 100;

// ============================================================
// Sync context
// ============================================================

enum SyncBacking<'a, 'b> {
    Reader(&'a mut DataReader<'b>),
    Writer(&'a mut DataWriter),
}

/// Direction-tagged sync state over one cursor. Cursor failures set the
/// `failed` flag instead of propagating, zeroing the out-value on read,
/// so one corrupt field cannot take down more than its enclosing pass.
pub struct PortableSaveContext<'a, 'b> {
    pub failed: bool,
    backing: SyncBacking<'a, 'b>,
}

impl<'a, 'b> PortableSaveContext<'a, 'b> {
    pub fn reading(reader: &'a mut DataReader<'b>) -> Self {
        PortableSaveContext { failed: false, backing: SyncBacking::Reader(reader) }
    }

    pub fn writing(writer: &'a mut DataWriter) -> Self {
        PortableSaveContext { failed: false, backing: SyncBacking::Writer(writer) }
    }

    pub fn is_reading(&self) -> bool {
        matches!(self.backing, SyncBacking::Reader(_))
    }

    /// Bytes left in a memory-backed reader; unbounded otherwise.
    pub(crate) fn remaining_bytes(&self) -> usize {
        match self.backing {
            SyncBacking::Reader(ref reader) => reader.remaining().unwrap_or(usize::MAX),
            SyncBacking::Writer(_) => usize::MAX,
        }
    }

    pub fn sync_bytes(&mut self, data: &mut [u8]) {
        match self.backing {
            SyncBacking::Reader(ref mut reader) => {
                if reader.read_bytes(data).is_err() {
                    self.failed = true;
                    data.fill(0);
                }
            }
            SyncBacking::Writer(ref mut writer) => {
                if writer.write_bytes(data).is_err() {
                    self.failed = true;
                }
            }
        }
    }

    pub fn sync_bool(&mut self, value: &mut bool) {
        match self.backing {
            SyncBacking::Reader(ref mut reader) => match reader.read_bool() {
                Ok(v) => *value = v,
                Err(_) => {
                    self.failed = true;
                    *value = false;
                }
            },
            SyncBacking::Writer(ref mut writer) => {
                if writer.write_bool(*value).is_err() {
                    self.failed = true;
                }
            }
        }
    }

    pub fn sync_u32(&mut self, value: &mut u32) {
        match self.backing {
            SyncBacking::Reader(ref mut reader) => match reader.read_u32() {
                Ok(v) => *value = v,
                Err(_) => {
                    self.failed = true;
                    *value = 0;
                }
            },
            SyncBacking::Writer(ref mut writer) => {
                if writer.write_u32(*value).is_err() {
                    self.failed = true;
                }
            }
        }
    }

    pub fn sync_i32(&mut self, value: &mut i32) {
        let mut raw = *value as u32;
        self.sync_u32(&mut raw);
        *value = raw as i32;
    }

    pub fn sync_u64(&mut self, value: &mut u64) {
        let mut low = (*value & 0xFFFF_FFFF) as u32;
        let mut high = (*value >> 32) as u32;
        self.sync_u32(&mut low);
        self.sync_u32(&mut high);
        if self.is_reading() {
            *value = ((high as u64) << 32) | low as u64;
        }
    }

    pub fn sync_i64(&mut self, value: &mut i64) {
        let mut raw = *value as u64;
        self.sync_u64(&mut raw);
        *value = raw as i64;
    }

    pub fn sync_f32(&mut self, value: &mut f32) {
        match self.backing {
            SyncBacking::Reader(ref mut reader) => match reader.read_f32() {
                Ok(v) => *value = v,
                Err(_) => {
                    self.failed = true;
                    *value = 0.0;
                }
            },
            SyncBacking::Writer(ref mut writer) => {
                if writer.write_f32(*value).is_err() {
                    self.failed = true;
                }
            }
        }
    }

    pub fn sync_string(&mut self, value: &mut String) {
        match self.backing {
            SyncBacking::Reader(ref mut reader) => match reader.read_string() {
                Ok(v) => *value = v,
                Err(_) => {
                    self.failed = true;
                    value.clear();
                }
            },
            SyncBacking::Writer(ref mut writer) => {
                if writer.write_string(value).is_err() {
                    self.failed = true;
                }
            }
        }
    }
}

// ============================================================
// TLV plumbing
// ============================================================

pub(crate) fn append_u32_le(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn append_chunk(out: &mut Vec<u8>, chunk_type: u32, chunk_data: &[u8]) {
    append_u32_le(out, chunk_type);
    append_u32_le(out, chunk_data.len() as u32);
    out.extend_from_slice(chunk_data);
}

pub(crate) struct TlvReader<'a> {
    data: &'a [u8],
    pos: usize,
    ok: bool,
}

impl<'a> TlvReader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        TlvReader { data, pos: 0, ok: true }
    }

    pub(crate) fn has_more(&self) -> bool {
        self.ok && self.pos < self.data.len()
    }

    pub(crate) fn read_u32(&mut self) -> Option<u32> {
        if self.pos + 4 > self.data.len() {
            self.ok = false;
            return None;
        }
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.data[self.pos..self.pos + 4]);
        self.pos += 4;
        Some(u32::from_le_bytes(bytes))
    }

    pub(crate) fn read_bytes(&mut self, len: usize) -> Option<&'a [u8]> {
        if self.pos + len > self.data.len() || len > self.data.len() {
            self.ok = false;
            return None;
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Some(slice)
    }
}

/// Encode one field through a fresh writing context and append it as
/// (id, length, bytes). A failed encode appends nothing; the reader
/// will fall back to the field's default.
fn append_field<F>(out: &mut Vec<u8>, field_id: u32, sync_fn: F)
where
    F: FnOnce(&mut PortableSaveContext),
{
    let mut writer = DataWriter::open_memory(0x100);
    {
        let mut ctx = PortableSaveContext::writing(&mut writer);
        sync_fn(&mut ctx);
        if ctx.failed {
            return;
        }
    }
    append_u32_le(out, field_id);
    append_u32_le(out, writer.len() as u32);
    out.extend_from_slice(writer.data());
}

/// Decode one field from its byte span. Returns false when the field's
/// sync pass failed; the caller keeps scanning siblings either way.
fn apply_field<F>(data: &[u8], sync_fn: F) -> bool
where
    F: FnOnce(&mut PortableSaveContext),
{
    let mut reader = DataReader::from_memory(data);
    let mut ctx = PortableSaveContext::reading(&mut reader);
    sync_fn(&mut ctx);
    !ctx.failed
}

fn write_tlv_blob(ctx: &mut PortableSaveContext, blob: &mut Vec<u8>) {
    let mut size = blob.len() as u32;
    ctx.sync_u32(&mut size);
    if size > 0 {
        ctx.sync_bytes(blob);
    }
}

fn read_tlv_blob(ctx: &mut PortableSaveContext) -> Option<Vec<u8>> {
    let mut size = 0u32;
    ctx.sync_u32(&mut size);
    if ctx.failed {
        return None;
    }
    if size as usize > ctx.remaining_bytes() {
        ctx.failed = true;
        return None;
    }
    let mut blob = vec![0u8; size as usize];
    if size > 0 {
        ctx.sync_bytes(&mut blob);
    }
    if ctx.failed {
        None
    } else {
        Some(blob)
    }
}

// ============================================================
// Shared composite sync helpers
// ============================================================

pub(crate) fn sync_rect(ctx: &mut PortableSaveContext, rect: &mut Rect) {
    ctx.sync_i32(&mut rect.x);
    ctx.sync_i32(&mut rect.y);
    ctx.sync_i32(&mut rect.width);
    ctx.sync_i32(&mut rect.height);
}

pub(crate) fn sync_color(ctx: &mut PortableSaveContext, color: &mut Color) {
    ctx.sync_i32(&mut color.red);
    ctx.sync_i32(&mut color.green);
    ctx.sync_i32(&mut color.blue);
    ctx.sync_i32(&mut color.alpha);
}

pub(crate) fn sync_vector2(ctx: &mut PortableSaveContext, vector: &mut Vector2) {
    ctx.sync_f32(&mut vector.x);
    ctx.sync_f32(&mut vector.y);
}

pub(crate) fn sync_matrix(ctx: &mut PortableSaveContext, matrix: &mut Matrix3) {
    ctx.sync_f32(&mut matrix.m00);
    ctx.sync_f32(&mut matrix.m01);
    ctx.sync_f32(&mut matrix.m02);
    ctx.sync_f32(&mut matrix.m10);
    ctx.sync_f32(&mut matrix.m11);
    ctx.sync_f32(&mut matrix.m12);
    ctx.sync_f32(&mut matrix.m20);
    ctx.sync_f32(&mut matrix.m21);
    ctx.sync_f32(&mut matrix.m22);
}

pub(crate) fn sync_game_object(ctx: &mut PortableSaveContext, object: &mut GameObject) {
    ctx.sync_i32(&mut object.x);
    ctx.sync_i32(&mut object.y);
    ctx.sync_i32(&mut object.width);
    ctx.sync_i32(&mut object.height);
    ctx.sync_bool(&mut object.visible);
    ctx.sync_i32(&mut object.row);
    ctx.sync_i32(&mut object.render_order);
}

pub(crate) fn sync_smooth_array(ctx: &mut PortableSaveContext, entry: &mut TodSmoothArray) {
    ctx.sync_i32(&mut entry.item);
    ctx.sync_f32(&mut entry.weight);
    ctx.sync_f32(&mut entry.last_picked);
    ctx.sync_f32(&mut entry.second_last_picked);
}

pub(crate) fn sync_i32_slice(ctx: &mut PortableSaveContext, values: &mut [i32]) {
    for value in values {
        ctx.sync_i32(value);
    }
}

pub(crate) fn sync_u32_slice(ctx: &mut PortableSaveContext, values: &mut [u32]) {
    for value in values {
        ctx.sync_u32(value);
    }
}

pub(crate) fn sync_bool_slice(ctx: &mut PortableSaveContext, values: &mut [bool]) {
    for value in values {
        ctx.sync_bool(value);
    }
}

pub(crate) fn sync_f32_slice(ctx: &mut PortableSaveContext, values: &mut [f32]) {
    for value in values {
        ctx.sync_f32(value);
    }
}

/// A list of slot ids: count then ids. Rebuilt wholesale on read.
pub(crate) fn sync_data_id_list(ctx: &mut PortableSaveContext, list: &mut Vec<u32>) {
    let mut count = list.len() as i32;
    ctx.sync_i32(&mut count);
    if ctx.is_reading() {
        list.clear();
        if ctx.failed {
            return;
        }
        if count < 0 || (count as usize).saturating_mul(4) > ctx.remaining_bytes() {
            ctx.failed = true;
            return;
        }
        for _ in 0..count {
            let mut id = 0u32;
            ctx.sync_u32(&mut id);
            if ctx.failed {
                return;
            }
            list.push(id);
        }
    } else {
        for id in list.iter_mut() {
            ctx.sync_u32(id);
        }
    }
}

// ============================================================
// Resource / definition references
// ============================================================
// Definition references travel as the small integer type id that was
// used to look the definition up; never as an address. An id outside
// the closed range fails the surrounding pass.

pub(crate) fn sync_reanim_def(ctx: &mut PortableSaveContext, res: &mut Resources, ty: &mut i32) {
    if ctx.is_reading() {
        let mut value = 0i32;
        ctx.sync_i32(&mut value);
        if value == REANIM_NONE {
            *ty = REANIM_NONE;
        } else if res.is_valid_reanim_type(value) {
            let _ = res.ensure_reanim_loaded(value);
            *ty = value;
        } else {
            ctx.failed = true;
        }
    } else {
        ctx.sync_i32(ty);
    }
}

pub(crate) fn sync_particle_def(ctx: &mut PortableSaveContext, res: &Resources, ty: &mut i32) {
    if ctx.is_reading() {
        let mut value = 0i32;
        ctx.sync_i32(&mut value);
        if value == PARTICLE_NONE {
            *ty = PARTICLE_NONE;
        } else if res.is_valid_particle_type(value) {
            *ty = value;
        } else {
            ctx.failed = true;
        }
    } else {
        ctx.sync_i32(ty);
    }
}

pub(crate) fn sync_trail_def(ctx: &mut PortableSaveContext, res: &Resources, ty: &mut i32) {
    if ctx.is_reading() {
        let mut value = 0i32;
        ctx.sync_i32(&mut value);
        if value == TRAIL_NONE {
            *ty = TRAIL_NONE;
        } else if res.is_valid_trail_type(value) {
            *ty = value;
        } else {
            ctx.failed = true;
        }
    } else {
        ctx.sync_i32(ty);
    }
}

// ============================================================
// Entity tails
// ============================================================

pub(crate) fn sync_zombie_tail(ctx: &mut PortableSaveContext, zombie: &mut Zombie) {
    ctx.sync_i32(&mut zombie.zombie_type);
    ctx.sync_i32(&mut zombie.zombie_phase);
    ctx.sync_f32(&mut zombie.pos_x);
    ctx.sync_f32(&mut zombie.pos_y);
    ctx.sync_f32(&mut zombie.vel_x);
    ctx.sync_i32(&mut zombie.anim_counter);
    ctx.sync_i32(&mut zombie.anim_ticks_per_frame);
    ctx.sync_i32(&mut zombie.anim_frames);
    ctx.sync_i32(&mut zombie.frame);
    ctx.sync_i32(&mut zombie.prev_frame);
    ctx.sync_bool(&mut zombie.variant);
    ctx.sync_bool(&mut zombie.is_eating);
    ctx.sync_i32(&mut zombie.just_got_shot_counter);
    ctx.sync_i32(&mut zombie.shield_just_got_shot_counter);
    ctx.sync_i32(&mut zombie.shield_recoil_counter);
    ctx.sync_i32(&mut zombie.zombie_age);
    ctx.sync_i32(&mut zombie.zombie_height);
    ctx.sync_i32(&mut zombie.phase_counter);
    ctx.sync_i32(&mut zombie.from_wave);
    ctx.sync_bool(&mut zombie.dropped_loot);
    ctx.sync_i32(&mut zombie.zombie_fade);
    ctx.sync_i32(&mut zombie.use_ladder_col);
    ctx.sync_i32(&mut zombie.target_col);
    ctx.sync_f32(&mut zombie.altitude);
    ctx.sync_bool(&mut zombie.hit_umbrella);
    sync_rect(ctx, &mut zombie.zombie_rect);
    sync_rect(ctx, &mut zombie.zombie_attack_rect);
    ctx.sync_i32(&mut zombie.chilled_counter);
    ctx.sync_i32(&mut zombie.buttered_counter);
    ctx.sync_i32(&mut zombie.ice_trap_counter);
    ctx.sync_bool(&mut zombie.mind_controlled);
    ctx.sync_bool(&mut zombie.blowing_away);
    ctx.sync_bool(&mut zombie.has_head);
    ctx.sync_bool(&mut zombie.has_arm);
    ctx.sync_bool(&mut zombie.has_object);
    ctx.sync_bool(&mut zombie.in_pool);
    ctx.sync_bool(&mut zombie.on_high_ground);
    ctx.sync_bool(&mut zombie.yucky_face);
    ctx.sync_i32(&mut zombie.yucky_face_counter);
    ctx.sync_i32(&mut zombie.helm_type);
    ctx.sync_i32(&mut zombie.body_health);
    ctx.sync_i32(&mut zombie.body_max_health);
    ctx.sync_i32(&mut zombie.helm_health);
    ctx.sync_i32(&mut zombie.helm_max_health);
    ctx.sync_i32(&mut zombie.shield_type);
    ctx.sync_i32(&mut zombie.shield_health);
    ctx.sync_i32(&mut zombie.shield_max_health);
    ctx.sync_i32(&mut zombie.flying_health);
    ctx.sync_i32(&mut zombie.flying_max_health);
    ctx.sync_bool(&mut zombie.dead);
    ctx.sync_u32(&mut zombie.related_zombie_id);
    sync_u32_slice(ctx, &mut zombie.follower_zombie_id);
    ctx.sync_bool(&mut zombie.playing_song);
    ctx.sync_i32(&mut zombie.particle_offset_x);
    ctx.sync_i32(&mut zombie.particle_offset_y);
    ctx.sync_u32(&mut zombie.attachment_id);
    ctx.sync_i32(&mut zombie.summon_counter);
    ctx.sync_u32(&mut zombie.body_reanim_id);
    ctx.sync_f32(&mut zombie.scale_zombie);
    ctx.sync_f32(&mut zombie.vel_z);
    ctx.sync_f32(&mut zombie.original_anim_rate);
    ctx.sync_u32(&mut zombie.target_plant_id);
    ctx.sync_i32(&mut zombie.boss_mode);
    ctx.sync_i32(&mut zombie.target_row);
    ctx.sync_i32(&mut zombie.boss_bungee_counter);
    ctx.sync_i32(&mut zombie.boss_stomp_counter);
    ctx.sync_i32(&mut zombie.boss_head_counter);
    ctx.sync_u32(&mut zombie.boss_fire_ball_reanim_id);
    ctx.sync_u32(&mut zombie.special_head_reanim_id);
    ctx.sync_i32(&mut zombie.fireball_row);
    ctx.sync_bool(&mut zombie.is_fireball);
    ctx.sync_u32(&mut zombie.mowered_reanim_id);
    ctx.sync_i32(&mut zombie.last_portal_x);
}

pub(crate) fn sync_plant_tail(ctx: &mut PortableSaveContext, plant: &mut Plant) {
    ctx.sync_i32(&mut plant.seed_type);
    ctx.sync_i32(&mut plant.plant_col);
    ctx.sync_i32(&mut plant.anim_counter);
    ctx.sync_i32(&mut plant.frame);
    ctx.sync_i32(&mut plant.frame_length);
    ctx.sync_i32(&mut plant.num_frames);
    ctx.sync_i32(&mut plant.state);
    ctx.sync_i32(&mut plant.plant_health);
    ctx.sync_i32(&mut plant.plant_max_health);
    ctx.sync_i32(&mut plant.subclass);
    ctx.sync_i32(&mut plant.disappear_countdown);
    ctx.sync_i32(&mut plant.do_special_countdown);
    ctx.sync_i32(&mut plant.state_countdown);
    ctx.sync_i32(&mut plant.launch_counter);
    ctx.sync_i32(&mut plant.launch_rate);
    sync_rect(ctx, &mut plant.plant_rect);
    sync_rect(ctx, &mut plant.plant_attack_rect);
    ctx.sync_i32(&mut plant.target_x);
    ctx.sync_i32(&mut plant.target_y);
    ctx.sync_i32(&mut plant.start_row);
    ctx.sync_u32(&mut plant.particle_id);
    ctx.sync_i32(&mut plant.shooting_counter);
    ctx.sync_u32(&mut plant.body_reanim_id);
    ctx.sync_u32(&mut plant.head_reanim_id);
    ctx.sync_u32(&mut plant.blink_reanim_id);
    ctx.sync_u32(&mut plant.light_reanim_id);
    ctx.sync_u32(&mut plant.sleeping_reanim_id);
    ctx.sync_i32(&mut plant.blink_countdown);
    ctx.sync_i32(&mut plant.recently_eaten_countdown);
    ctx.sync_i32(&mut plant.eaten_flash_countdown);
    ctx.sync_i32(&mut plant.imitater_type);
    ctx.sync_i32(&mut plant.potted_plant_index);
    ctx.sync_u32(&mut plant.target_zombie_id);
    ctx.sync_i32(&mut plant.wakeup_counter);
    ctx.sync_bool(&mut plant.is_asleep);
    ctx.sync_bool(&mut plant.squished);
    ctx.sync_i32(&mut plant.on_bungee_state);
    ctx.sync_bool(&mut plant.highlighted);
}

pub(crate) fn sync_projectile_tail(ctx: &mut PortableSaveContext, projectile: &mut Projectile) {
    ctx.sync_i32(&mut projectile.projectile_type);
    ctx.sync_i32(&mut projectile.motion_type);
    ctx.sync_i32(&mut projectile.frame);
    ctx.sync_i32(&mut projectile.num_frames);
    ctx.sync_i32(&mut projectile.anim_counter);
    ctx.sync_f32(&mut projectile.pos_x);
    ctx.sync_f32(&mut projectile.pos_y);
    ctx.sync_f32(&mut projectile.pos_z);
    ctx.sync_f32(&mut projectile.vel_x);
    ctx.sync_f32(&mut projectile.vel_y);
    ctx.sync_f32(&mut projectile.vel_z);
    ctx.sync_f32(&mut projectile.shadow_y);
    ctx.sync_bool(&mut projectile.dead);
    ctx.sync_i32(&mut projectile.projectile_age);
    ctx.sync_i32(&mut projectile.click_backoff_counter);
    ctx.sync_f32(&mut projectile.rotation);
    ctx.sync_f32(&mut projectile.rotation_speed);
    ctx.sync_bool(&mut projectile.on_high_ground);
    ctx.sync_i32(&mut projectile.damage_range_flags);
    ctx.sync_i32(&mut projectile.hit_torchwood_grid_x);
    ctx.sync_u32(&mut projectile.target_zombie_id);
    ctx.sync_u32(&mut projectile.attachment_id);
}

pub(crate) fn sync_coin_tail(ctx: &mut PortableSaveContext, coin: &mut Coin) {
    ctx.sync_i32(&mut coin.coin_type);
    ctx.sync_i32(&mut coin.coin_motion);
    ctx.sync_f32(&mut coin.pos_x);
    ctx.sync_f32(&mut coin.pos_y);
    ctx.sync_f32(&mut coin.vel_x);
    ctx.sync_f32(&mut coin.vel_y);
    ctx.sync_f32(&mut coin.scale);
    ctx.sync_bool(&mut coin.dead);
    ctx.sync_i32(&mut coin.coin_age);
    ctx.sync_f32(&mut coin.ground_y);
    ctx.sync_i32(&mut coin.disappear_counter);
    ctx.sync_bool(&mut coin.is_being_collected);
    ctx.sync_u32(&mut coin.attached_reanim_id);
    ctx.sync_i32(&mut coin.collection_seed_type);
    ctx.sync_i32(&mut coin.times_pickedup);
}

pub(crate) fn sync_mower_tail(ctx: &mut PortableSaveContext, mower: &mut LawnMower) {
    ctx.sync_f32(&mut mower.pos_x);
    ctx.sync_f32(&mut mower.pos_y);
    ctx.sync_i32(&mut mower.render_order);
    ctx.sync_i32(&mut mower.row);
    ctx.sync_i32(&mut mower.chomp_counter);
    ctx.sync_i32(&mut mower.mower_state);
    ctx.sync_i32(&mut mower.mower_type);
    ctx.sync_i32(&mut mower.mower_height);
    ctx.sync_bool(&mut mower.dead);
    ctx.sync_bool(&mut mower.visible);
    ctx.sync_i32(&mut mower.squished_counter);
    ctx.sync_f32(&mut mower.altitude);
    ctx.sync_u32(&mut mower.reanim_id);
}

pub(crate) fn sync_grid_item_tail(ctx: &mut PortableSaveContext, item: &mut GridItem) {
    ctx.sync_i32(&mut item.grid_item_type);
    ctx.sync_i32(&mut item.grid_item_state);
    ctx.sync_i32(&mut item.grid_x);
    ctx.sync_i32(&mut item.grid_y);
    ctx.sync_i32(&mut item.grid_item_counter);
    ctx.sync_i32(&mut item.render_order);
    ctx.sync_bool(&mut item.dead);
    ctx.sync_bool(&mut item.highlighted);
    ctx.sync_i32(&mut item.transparent_counter);
    ctx.sync_i32(&mut item.sun_count);
    ctx.sync_i32(&mut item.scary_pot_type);
    ctx.sync_i32(&mut item.seed_type_in_pot);
    ctx.sync_f32(&mut item.motion_x);
    ctx.sync_f32(&mut item.motion_y);
    ctx.sync_u32(&mut item.grid_item_reanim_id);
    ctx.sync_u32(&mut item.grid_item_particle_id);
}

pub(crate) fn sync_attachment_tail(
    ctx: &mut PortableSaveContext,
    attachment: &mut crate::attachment::Attachment,
) {
    for effect in attachment.effect_array.iter_mut() {
        ctx.sync_u32(&mut effect.effect_id);
        ctx.sync_i32(&mut effect.effect_type);
        sync_matrix(ctx, &mut effect.offset);
        ctx.sync_bool(&mut effect.dont_draw_if_parent_hidden);
        ctx.sync_bool(&mut effect.dont_propagate_color);
    }
    ctx.sync_i32(&mut attachment.num_effects);
    ctx.sync_bool(&mut attachment.dead);
}

pub(crate) fn sync_cursor_tail(ctx: &mut PortableSaveContext, cursor: &mut CursorObject) {
    ctx.sync_i32(&mut cursor.seed_bank_index);
    ctx.sync_i32(&mut cursor.seed_type);
    ctx.sync_i32(&mut cursor.imitater_type);
    ctx.sync_i32(&mut cursor.cursor_type);
    ctx.sync_u32(&mut cursor.coin_id);
    ctx.sync_u32(&mut cursor.glove_plant_id);
    ctx.sync_u32(&mut cursor.duplicator_plant_id);
    ctx.sync_u32(&mut cursor.cob_cannon_plant_id);
    ctx.sync_i32(&mut cursor.hammer_down_counter);
    ctx.sync_u32(&mut cursor.reanim_cursor_id);
}

pub(crate) fn sync_cursor_preview_tail(ctx: &mut PortableSaveContext, preview: &mut CursorPreview) {
    ctx.sync_i32(&mut preview.grid_x);
    ctx.sync_i32(&mut preview.grid_y);
}

pub(crate) fn sync_message_widget_tail(ctx: &mut PortableSaveContext, widget: &mut MessageWidget) {
    ctx.sync_string(&mut widget.label);
    ctx.sync_i32(&mut widget.display_time);
    ctx.sync_i32(&mut widget.duration);
    ctx.sync_i32(&mut widget.message_style);
    ctx.sync_i32(&mut widget.reanim_type);
    ctx.sync_i32(&mut widget.slide_off_time);
    ctx.sync_string(&mut widget.label_next);
    ctx.sync_i32(&mut widget.message_style_next);
}

pub(crate) fn sync_seed_bank_tail(ctx: &mut PortableSaveContext, bank: &mut SeedBank) {
    ctx.sync_i32(&mut bank.num_packets);
    ctx.sync_i32(&mut bank.cutscene_darken);
    ctx.sync_i32(&mut bank.conveyor_belt_counter);
}

pub(crate) fn sync_seed_packet_tail(ctx: &mut PortableSaveContext, packet: &mut SeedPacket) {
    ctx.sync_i32(&mut packet.refresh_counter);
    ctx.sync_i32(&mut packet.refresh_time);
    ctx.sync_i32(&mut packet.index);
    ctx.sync_i32(&mut packet.offset_x);
    ctx.sync_i32(&mut packet.packet_type);
    ctx.sync_i32(&mut packet.imitater_type);
    ctx.sync_i32(&mut packet.slot_machine_count_down);
    ctx.sync_i32(&mut packet.slot_machining_next_seed);
    ctx.sync_f32(&mut packet.slot_machining_position);
    ctx.sync_bool(&mut packet.active);
    ctx.sync_bool(&mut packet.refreshing);
    ctx.sync_i32(&mut packet.times_used);
}

pub(crate) fn sync_challenge_tail(
    ctx: &mut PortableSaveContext,
    challenge: &mut crate::challenge::Challenge,
) {
    ctx.sync_i32(&mut challenge.challenge_state);
    ctx.sync_i32(&mut challenge.challenge_state_counter);
    ctx.sync_i32(&mut challenge.conveyor_belt_counter);
    ctx.sync_i32(&mut challenge.challenge_score);
    ctx.sync_bool(&mut challenge.show_bowling_line);
    ctx.sync_i32(&mut challenge.last_conveyor_seed_type);
    ctx.sync_i32(&mut challenge.survival_stage);
    ctx.sync_i32(&mut challenge.slot_machine_roll_count);
    ctx.sync_u32(&mut challenge.reanim_challenge_id);
    sync_u32_slice(ctx, &mut challenge.reanim_clouds);
    sync_i32_slice(ctx, &mut challenge.clouds_counter);
    ctx.sync_i32(&mut challenge.challenge_grid_x);
    ctx.sync_i32(&mut challenge.challenge_grid_y);
    ctx.sync_i32(&mut challenge.scary_potter_pots);
    ctx.sync_i32(&mut challenge.rain_counter);
    ctx.sync_i32(&mut challenge.tree_of_wisdom_talk_index);
    ctx.sync_bool(&mut challenge.beghouled_mouse_capture);
    ctx.sync_i32(&mut challenge.beghouled_mouse_down_x);
    ctx.sync_i32(&mut challenge.beghouled_mouse_down_y);
    for column in challenge.beghouled_eaten.iter_mut() {
        sync_bool_slice(ctx, column);
    }
    sync_bool_slice(ctx, &mut challenge.beghouled_purchased_upgrade);
    ctx.sync_i32(&mut challenge.beghouled_matches_this_move);
}

pub(crate) fn sync_music_tail(ctx: &mut PortableSaveContext, music: &mut Music) {
    ctx.sync_i32(&mut music.cur_music_tune);
    ctx.sync_i32(&mut music.cur_music_file_main);
    ctx.sync_i32(&mut music.cur_music_file_drums);
    ctx.sync_i32(&mut music.cur_music_file_hihats);
    ctx.sync_i32(&mut music.burst_override);
    ctx.sync_f32(&mut music.base_bpm);
    ctx.sync_f32(&mut music.base_mod_speed);
    ctx.sync_i32(&mut music.music_burst_state);
    ctx.sync_i32(&mut music.burst_state_counter);
    ctx.sync_i32(&mut music.music_drums_state);
    ctx.sync_i32(&mut music.queued_drum_track_packed_order);
    ctx.sync_i32(&mut music.drums_state_counter);
    ctx.sync_i32(&mut music.pause_offset);
    ctx.sync_i32(&mut music.pause_offset_drums);
    ctx.sync_bool(&mut music.paused);
    // music_disabled is a runtime capability flag (set when audio
    // assets fail to load); it is never restored from a save.
    if ctx.is_reading() {
        let mut saved_disabled = false;
        ctx.sync_bool(&mut saved_disabled);
    } else {
        ctx.sync_bool(&mut music.music_disabled);
    }
    ctx.sync_i32(&mut music.fade_out_counter);
    ctx.sync_i32(&mut music.fade_out_duration);
}

// ============================================================
// Effect entities
// ============================================================

pub(crate) fn sync_reanim_transform(ctx: &mut PortableSaveContext, t: &mut ReanimatorTransform) {
    ctx.sync_f32(&mut t.trans_x);
    ctx.sync_f32(&mut t.trans_y);
    ctx.sync_f32(&mut t.skew_x);
    ctx.sync_f32(&mut t.skew_y);
    ctx.sync_f32(&mut t.scale_x);
    ctx.sync_f32(&mut t.scale_y);
    ctx.sync_f32(&mut t.frame);
    ctx.sync_f32(&mut t.alpha);
    ctx.sync_i32(&mut t.image);
}

pub(crate) fn sync_reanim_track_instance(
    ctx: &mut PortableSaveContext,
    instance: &mut ReanimatorTrackInstance,
) {
    ctx.sync_i32(&mut instance.blend_counter);
    ctx.sync_i32(&mut instance.blend_time);
    sync_reanim_transform(ctx, &mut instance.blend_transform);
    ctx.sync_f32(&mut instance.shake_override);
    ctx.sync_f32(&mut instance.shake_x);
    ctx.sync_f32(&mut instance.shake_y);
    ctx.sync_u32(&mut instance.attachment_id);
    ctx.sync_i32(&mut instance.image_override);
    ctx.sync_i32(&mut instance.render_group);
    sync_color(ctx, &mut instance.track_color);
    ctx.sync_bool(&mut instance.ignore_clip_rect);
    ctx.sync_bool(&mut instance.truncate_disappearing_frames);
    ctx.sync_bool(&mut instance.ignore_color_override);
    ctx.sync_bool(&mut instance.ignore_extra_additive_color);
}

pub(crate) fn sync_reanimation(
    ctx: &mut PortableSaveContext,
    res: &mut Resources,
    reanim: &mut Reanimation,
) {
    sync_reanim_def(ctx, res, &mut reanim.reanimation_type);
    if ctx.failed {
        return;
    }
    ctx.sync_f32(&mut reanim.anim_time);
    ctx.sync_f32(&mut reanim.anim_rate);
    ctx.sync_i32(&mut reanim.loop_type);
    ctx.sync_bool(&mut reanim.dead);
    ctx.sync_i32(&mut reanim.frame_start);
    ctx.sync_i32(&mut reanim.frame_count);
    ctx.sync_i32(&mut reanim.frame_base_pose);
    sync_matrix(ctx, &mut reanim.overlay_matrix);
    sync_color(ctx, &mut reanim.color_override);
    ctx.sync_i32(&mut reanim.loop_count);
    ctx.sync_bool(&mut reanim.is_attachment);
    ctx.sync_i32(&mut reanim.render_order);
    sync_color(ctx, &mut reanim.extra_additive_color);
    ctx.sync_bool(&mut reanim.enable_extra_additive_draw);
    sync_color(ctx, &mut reanim.extra_overlay_color);
    ctx.sync_bool(&mut reanim.enable_extra_overlay_draw);
    ctx.sync_f32(&mut reanim.last_frame_time);
    ctx.sync_i32(&mut reanim.filter_effect);

    // Track instances: count then fixed-shape records. Storage is
    // freshly allocated on read to match the decoded count. A writer
    // whose instance storage does not match its definition emits
    // zeroed records so the shape stays intact.
    let def_track_count = res
        .reanim_def(reanim.reanimation_type)
        .map(|def| def.tracks.len())
        .unwrap_or(0);
    let mut count = reanim.track_instances.len() as i32;
    ctx.sync_i32(&mut count);
    if ctx.is_reading() {
        if ctx.failed {
            return;
        }
        if count < 0 || (count as usize).saturating_mul(4) > ctx.remaining_bytes() {
            ctx.failed = true;
            return;
        }
        reanim.track_instances = vec![ReanimatorTrackInstance::default(); count as usize];
        for instance in reanim.track_instances.iter_mut() {
            if ctx.failed {
                return;
            }
            sync_reanim_track_instance(ctx, instance);
        }
    } else if reanim.track_instances.len() == count as usize && count as usize == def_track_count {
        for instance in reanim.track_instances.iter_mut() {
            sync_reanim_track_instance(ctx, instance);
        }
    } else {
        debug!(
            ty = reanim.reanimation_type,
            "track instance storage out of shape, writing scratch records"
        );
        let mut scratch = vec![ReanimatorTrackInstance::default(); count.max(0) as usize];
        for instance in scratch.iter_mut() {
            sync_reanim_track_instance(ctx, instance);
        }
    }
}

pub(crate) fn sync_particle(ctx: &mut PortableSaveContext, particle: &mut TodParticle) {
    ctx.sync_i32(&mut particle.particle_duration);
    ctx.sync_i32(&mut particle.particle_age);
    ctx.sync_f32(&mut particle.particle_time_value);
    ctx.sync_f32(&mut particle.particle_last_time_value);
    ctx.sync_f32(&mut particle.animation_time_value);
    sync_vector2(ctx, &mut particle.velocity);
    sync_vector2(ctx, &mut particle.position);
    ctx.sync_i32(&mut particle.image_frame);
    ctx.sync_f32(&mut particle.spin_position);
    ctx.sync_f32(&mut particle.spin_velocity);
    ctx.sync_u32(&mut particle.cross_fade_particle_id);
    ctx.sync_i32(&mut particle.cross_fade_duration);
    sync_f32_slice(ctx, &mut particle.particle_interp);
    for pair in particle.particle_field_interp.iter_mut() {
        sync_f32_slice(ctx, pair);
    }
}

pub(crate) fn sync_particle_emitter(
    ctx: &mut PortableSaveContext,
    particles: &mut DataArray<TodParticle>,
    emitter_id: u32,
    emitter: &mut TodParticleEmitter,
) {
    ctx.sync_i32(&mut emitter.emitter_def_index);
    sync_data_id_list(ctx, &mut emitter.particle_list);
    sync_vector2(ctx, &mut emitter.system_center);
    sync_color(ctx, &mut emitter.color_override);
    ctx.sync_i32(&mut emitter.image_override);
    ctx.sync_f32(&mut emitter.spawn_accum);
    ctx.sync_i32(&mut emitter.particles_spawned);
    ctx.sync_i32(&mut emitter.system_age);
    ctx.sync_i32(&mut emitter.system_duration);
    ctx.sync_f32(&mut emitter.system_time_value);
    ctx.sync_f32(&mut emitter.system_last_time_value);
    ctx.sync_bool(&mut emitter.dead);
    ctx.sync_bool(&mut emitter.extra_additive_draw_override);
    ctx.sync_f32(&mut emitter.scale_override);
    ctx.sync_u32(&mut emitter.cross_fade_emitter_id);
    ctx.sync_i32(&mut emitter.emitter_cross_fade_countdown);
    ctx.sync_i32(&mut emitter.frame_override);
    sync_f32_slice(ctx, &mut emitter.track_interp);
    for pair in emitter.system_field_interp.iter_mut() {
        sync_f32_slice(ctx, pair);
    }

    let particle_ids = emitter.particle_list.clone();
    for pid in particle_ids {
        if ctx.failed {
            return;
        }
        match particles.get_mut(pid) {
            Some(particle) => {
                if ctx.is_reading() {
                    particle.particle_emitter_id = emitter_id;
                }
                sync_particle(ctx, particle);
            }
            None => {
                // The particle table no longer has this slot; the
                // emitter's id list is structurally inconsistent.
                warn!(pid, "particle id does not resolve, failing chunk");
                ctx.failed = true;
                return;
            }
        }
    }
}

pub(crate) fn sync_particle_system(
    ctx: &mut PortableSaveContext,
    res: &Resources,
    emitters: &mut DataArray<TodParticleEmitter>,
    particles: &mut DataArray<TodParticle>,
    system: &mut TodParticleSystem,
) {
    sync_particle_def(ctx, res, &mut system.particle_type);
    if ctx.failed {
        return;
    }
    sync_data_id_list(ctx, &mut system.emitter_list);
    let emitter_ids = system.emitter_list.clone();
    for eid in emitter_ids {
        if ctx.failed {
            return;
        }
        match emitters.get_mut(eid) {
            Some(emitter) => sync_particle_emitter(ctx, particles, eid, emitter),
            None => {
                warn!(eid, "emitter id does not resolve, failing chunk");
                ctx.failed = true;
                return;
            }
        }
    }
    ctx.sync_i32(&mut system.effect_type);
    ctx.sync_bool(&mut system.dead);
    ctx.sync_bool(&mut system.is_attachment);
    ctx.sync_i32(&mut system.render_order);
    ctx.sync_bool(&mut system.dont_update);
}

pub(crate) fn sync_trail(ctx: &mut PortableSaveContext, res: &Resources, trail: &mut Trail) {
    sync_trail_def(ctx, res, &mut trail.trail_type);
    if ctx.failed {
        return;
    }
    for point in trail.trail_points.iter_mut() {
        sync_vector2(ctx, &mut point.pos);
    }
    ctx.sync_i32(&mut trail.num_trail_points);
    ctx.sync_bool(&mut trail.dead);
    ctx.sync_i32(&mut trail.render_order);
    ctx.sync_i32(&mut trail.trail_age);
    ctx.sync_i32(&mut trail.trail_duration);
    sync_f32_slice(ctx, &mut trail.trail_interp);
    sync_vector2(ctx, &mut trail.trail_center);
    ctx.sync_bool(&mut trail.is_attachment);
    sync_color(ctx, &mut trail.color_override);
}

// ============================================================
// Entity tables on the wire
// ============================================================

/// The shared table header: free-list head, high-water mark, live
/// count, id generator, configured capacity. The file's capacity must
/// match this build's or the chunk fails.
fn sync_data_array_header<T>(
    ctx: &mut PortableSaveContext,
    arr: &mut DataArray<T>,
) -> DataResult<()> {
    ctx.sync_u32(&mut arr.free_list_head);
    ctx.sync_u32(&mut arr.max_used_count);
    ctx.sync_u32(&mut arr.size);
    ctx.sync_u32(&mut arr.next_key);
    let mut max_size = arr.max_size;
    ctx.sync_u32(&mut max_size);
    if ctx.is_reading() {
        if max_size != arr.max_size {
            ctx.failed = true;
            return Err(DataError::CapacityMismatch);
        }
        if arr.max_used_count > arr.max_size
            || arr.size > arr.max_size
            || arr.free_list_head > arr.max_used_count
        {
            ctx.failed = true;
            return Err(DataError::OutOfData);
        }
    }
    if ctx.failed {
        Err(DataError::OutOfData)
    } else {
        Ok(())
    }
}

fn write_data_array_tlv<T: Default, F>(
    ctx: &mut PortableSaveContext,
    arr: &mut DataArray<T>,
    mut write_fn: F,
) where
    F: FnMut(&mut Vec<u8>, &mut T),
{
    if let Err(e) = sync_data_array_header(ctx, arr) {
        warn!(table = arr.name, error = %e, "table header rejected");
        return;
    }
    for i in 0..arr.max_used_count as usize {
        if ctx.failed {
            return;
        }
        let slot = &mut arr.block[i];
        ctx.sync_u32(&mut slot.id);
        let active = slot.id & DATA_ARRAY_KEY_MASK != 0;
        let mut item_data = Vec::new();
        if active {
            write_fn(&mut item_data, &mut slot.item);
        }
        let mut item_len = item_data.len() as u32;
        ctx.sync_u32(&mut item_len);
        if item_len > 0 {
            ctx.sync_bytes(&mut item_data);
        }
    }
}

fn read_data_array_tlv<T: Default, F>(
    ctx: &mut PortableSaveContext,
    arr: &mut DataArray<T>,
    mut read_fn: F,
) where
    F: FnMut(u32, &[u8], &mut T),
{
    if let Err(e) = sync_data_array_header(ctx, arr) {
        warn!(table = arr.name, error = %e, "table header rejected");
        return;
    }
    for i in 0..arr.max_used_count as usize {
        if ctx.failed {
            return;
        }
        let slot = &mut arr.block[i];
        ctx.sync_u32(&mut slot.id);
        let mut item_len = 0u32;
        ctx.sync_u32(&mut item_len);
        // Missing fields keep the freshly-reset defaults.
        slot.item = T::default();
        if ctx.failed {
            return;
        }
        if item_len as usize > ctx.remaining_bytes() {
            ctx.failed = true;
            return;
        }
        let mut item_data = vec![0u8; item_len as usize];
        if item_len > 0 {
            ctx.sync_bytes(&mut item_data);
            if ctx.failed {
                return;
            }
        }
        let mut tlv = TlvReader::new(&item_data);
        while tlv.has_more() {
            let Some(field_id) = tlv.read_u32() else { break };
            let Some(field_len) = tlv.read_u32() else { break };
            let Some(field_data) = tlv.read_bytes(field_len as usize) else { break };
            read_fn(field_id, field_data, &mut slot.item);
        }
    }
}

/// Ids-only variant for the particle and emitter index tables, whose
/// item content is reconstructed from the particle-system chunk.
fn sync_data_array_ids_only<T: Default>(ctx: &mut PortableSaveContext, arr: &mut DataArray<T>) {
    if let Err(e) = sync_data_array_header(ctx, arr) {
        warn!(table = arr.name, error = %e, "table header rejected");
        return;
    }
    for i in 0..arr.max_used_count as usize {
        if ctx.failed {
            return;
        }
        ctx.sync_u32(&mut arr.block[i].id);
        if ctx.is_reading() {
            arr.block[i].item = T::default();
        }
    }
}

// ============================================================
// Chunks
// ============================================================

fn sync_board_base(ctx: &mut PortableSaveContext, board: &mut Board) {
    if ctx.is_reading() {
        let Some(blob) = read_tlv_blob(ctx) else { return };
        let mut tlv = TlvReader::new(&blob);
        while tlv.has_more() {
            let Some(field_id) = tlv.read_u32() else { break };
            let Some(field_len) = tlv.read_u32() else { break };
            let Some(data) = tlv.read_bytes(field_len as usize) else { break };
            match field_id {
                1 => { apply_field(data, |c| c.sync_bool(&mut board.paused)); }
                2 => { apply_field(data, |c| for row in board.grid_square_type.iter_mut() { sync_i32_slice(c, row) }); }
                3 => { apply_field(data, |c| for row in board.grid_cel_look.iter_mut() { sync_i32_slice(c, row) }); }
                4 => { apply_field(data, |c| for row in board.grid_cel_fog.iter_mut() { sync_i32_slice(c, row) }); }
                5 => { apply_field(data, |c| c.sync_bool(&mut board.enable_gravestones)); }
                6 => { apply_field(data, |c| c.sync_i32(&mut board.special_grave_stone_x)); }
                7 => { apply_field(data, |c| c.sync_i32(&mut board.special_grave_stone_y)); }
                8 => { apply_field(data, |c| c.sync_f32(&mut board.fog_offset)); }
                9 => { apply_field(data, |c| c.sync_i32(&mut board.fog_blown_count_down)); }
                10 => { apply_field(data, |c| sync_i32_slice(c, &mut board.plant_row)); }
                11 => { apply_field(data, |c| sync_i32_slice(c, &mut board.wave_row_got_lawn_mowered)); }
                12 => { apply_field(data, |c| c.sync_i32(&mut board.bonus_lawn_mowers_remaining)); }
                13 => { apply_field(data, |c| sync_i32_slice(c, &mut board.ice_min_x)); }
                14 => { apply_field(data, |c| sync_i32_slice(c, &mut board.ice_timer)); }
                15 => { apply_field(data, |c| sync_u32_slice(c, &mut board.ice_particle_id)); }
                16 => { apply_field(data, |c| for entry in board.row_picking_array.iter_mut() { sync_smooth_array(c, entry) }); }
                17 => { apply_field(data, |c| for wave in board.zombies_in_wave.iter_mut() { sync_i32_slice(c, wave) }); }
                18 => { apply_field(data, |c| sync_bool_slice(c, &mut board.zombie_allowed)); }
                19 => { apply_field(data, |c| c.sync_i32(&mut board.sun_count_down)); }
                20 => { apply_field(data, |c| c.sync_i32(&mut board.num_suns_fallen)); }
                21 => { apply_field(data, |c| c.sync_i32(&mut board.shake_counter)); }
                22 => { apply_field(data, |c| c.sync_i32(&mut board.shake_amount_x)); }
                23 => { apply_field(data, |c| c.sync_i32(&mut board.shake_amount_y)); }
                24 => { apply_field(data, |c| c.sync_i32(&mut board.background)); }
                25 => { apply_field(data, |c| c.sync_i32(&mut board.level)); }
                26 => { apply_field(data, |c| c.sync_i32(&mut board.sod_position)); }
                27 => { apply_field(data, |c| c.sync_i32(&mut board.sun_money)); }
                28 => { apply_field(data, |c| c.sync_i32(&mut board.num_waves)); }
                29 => { apply_field(data, |c| c.sync_i32(&mut board.main_counter)); }
                30 => { apply_field(data, |c| c.sync_i32(&mut board.current_wave)); }
                31 => { apply_field(data, |c| c.sync_i32(&mut board.total_spawned_waves)); }
                32 => { apply_field(data, |c| c.sync_i32(&mut board.tutorial_state)); }
                33 => { apply_field(data, |c| c.sync_u32(&mut board.tutorial_particle_id)); }
                34 => { apply_field(data, |c| c.sync_i32(&mut board.tutorial_timer)); }
                35 => { apply_field(data, |c| c.sync_i32(&mut board.last_bungee_wave)); }
                36 => { apply_field(data, |c| c.sync_i32(&mut board.zombie_health_to_next_wave)); }
                37 => { apply_field(data, |c| c.sync_i32(&mut board.zombie_health_wave_start)); }
                38 => { apply_field(data, |c| c.sync_i32(&mut board.zombie_count_down)); }
                39 => { apply_field(data, |c| c.sync_i32(&mut board.zombie_count_down_start)); }
                40 => { apply_field(data, |c| c.sync_i32(&mut board.huge_wave_count_down)); }
                41 => { apply_field(data, |c| sync_bool_slice(c, &mut board.help_displayed)); }
                42 => { apply_field(data, |c| c.sync_i32(&mut board.help_index)); }
                43 => { apply_field(data, |c| c.sync_bool(&mut board.final_boss_killed)); }
                44 => { apply_field(data, |c| c.sync_bool(&mut board.show_shovel)); }
                45 => { apply_field(data, |c| c.sync_bool(&mut board.level_complete)); }
                46 => { apply_field(data, |c| c.sync_i32(&mut board.board_fade_out_counter)); }
                47 => { apply_field(data, |c| c.sync_i32(&mut board.next_survival_stage_counter)); }
                48 => { apply_field(data, |c| c.sync_bool(&mut board.level_award_spawned)); }
                49 => { apply_field(data, |c| c.sync_i32(&mut board.progress_meter_width)); }
                50 => { apply_field(data, |c| c.sync_i32(&mut board.flag_raise_counter)); }
                51 => { apply_field(data, |c| c.sync_i32(&mut board.ice_trap_counter)); }
                52 => { apply_field(data, |c| c.sync_i32(&mut board.board_rand_seed)); }
                53 => { apply_field(data, |c| c.sync_u32(&mut board.pool_sparkly_particle_id)); }
                54 => { apply_field(data, |c| for row in board.fwoosh_id.iter_mut() { sync_u32_slice(c, row) }); }
                55 => { apply_field(data, |c| c.sync_i32(&mut board.fwoosh_count_down)); }
                56 => { apply_field(data, |c| c.sync_i32(&mut board.time_stop_counter)); }
                57 => { apply_field(data, |c| c.sync_bool(&mut board.dropped_first_coin)); }
                58 => { apply_field(data, |c| c.sync_bool(&mut board.killed_yeti)); }
                59 => { apply_field(data, |c| c.sync_bool(&mut board.mustache_mode)); }
                60 => { apply_field(data, |c| c.sync_bool(&mut board.super_mower_mode)); }
                61 => { apply_field(data, |c| c.sync_bool(&mut board.future_mode)); }
                62 => { apply_field(data, |c| c.sync_bool(&mut board.pinata_mode)); }
                63 => { apply_field(data, |c| c.sync_bool(&mut board.dance_mode)); }
                64 => { apply_field(data, |c| c.sync_bool(&mut board.daisy_mode)); }
                65 => { apply_field(data, |c| c.sync_bool(&mut board.sukhbir_mode)); }
                66 => { apply_field(data, |c| c.sync_i32(&mut board.prev_board_result)); }
                67 => { apply_field(data, |c| c.sync_i32(&mut board.triggered_lawn_mowers)); }
                68 => { apply_field(data, |c| c.sync_i32(&mut board.play_time_active_level)); }
                69 => { apply_field(data, |c| c.sync_i32(&mut board.play_time_inactive_level)); }
                70 => { apply_field(data, |c| c.sync_i32(&mut board.graves_cleared)); }
                71 => { apply_field(data, |c| c.sync_i32(&mut board.plants_eaten)); }
                72 => { apply_field(data, |c| c.sync_i32(&mut board.plants_shoveled)); }
                73 => { apply_field(data, |c| c.sync_i32(&mut board.coins_collected)); }
                _ => {}
            }
        }
    } else {
        let mut blob = Vec::new();
        append_field(&mut blob, 1, |c| c.sync_bool(&mut board.paused));
        append_field(&mut blob, 2, |c| for row in board.grid_square_type.iter_mut() { sync_i32_slice(c, row) });
        append_field(&mut blob, 3, |c| for row in board.grid_cel_look.iter_mut() { sync_i32_slice(c, row) });
        append_field(&mut blob, 4, |c| for row in board.grid_cel_fog.iter_mut() { sync_i32_slice(c, row) });
        append_field(&mut blob, 5, |c| c.sync_bool(&mut board.enable_gravestones));
        append_field(&mut blob, 6, |c| c.sync_i32(&mut board.special_grave_stone_x));
        append_field(&mut blob, 7, |c| c.sync_i32(&mut board.special_grave_stone_y));
        append_field(&mut blob, 8, |c| c.sync_f32(&mut board.fog_offset));
        append_field(&mut blob, 9, |c| c.sync_i32(&mut board.fog_blown_count_down));
        append_field(&mut blob, 10, |c| sync_i32_slice(c, &mut board.plant_row));
        append_field(&mut blob, 11, |c| sync_i32_slice(c, &mut board.wave_row_got_lawn_mowered));
        append_field(&mut blob, 12, |c| c.sync_i32(&mut board.bonus_lawn_mowers_remaining));
        append_field(&mut blob, 13, |c| sync_i32_slice(c, &mut board.ice_min_x));
        append_field(&mut blob, 14, |c| sync_i32_slice(c, &mut board.ice_timer));
        append_field(&mut blob, 15, |c| sync_u32_slice(c, &mut board.ice_particle_id));
        append_field(&mut blob, 16, |c| for entry in board.row_picking_array.iter_mut() { sync_smooth_array(c, entry) });
        append_field(&mut blob, 17, |c| for wave in board.zombies_in_wave.iter_mut() { sync_i32_slice(c, wave) });
        append_field(&mut blob, 18, |c| sync_bool_slice(c, &mut board.zombie_allowed));
        append_field(&mut blob, 19, |c| c.sync_i32(&mut board.sun_count_down));
        append_field(&mut blob, 20, |c| c.sync_i32(&mut board.num_suns_fallen));
        append_field(&mut blob, 21, |c| c.sync_i32(&mut board.shake_counter));
        append_field(&mut blob, 22, |c| c.sync_i32(&mut board.shake_amount_x));
        append_field(&mut blob, 23, |c| c.sync_i32(&mut board.shake_amount_y));
        append_field(&mut blob, 24, |c| c.sync_i32(&mut board.background));
        append_field(&mut blob, 25, |c| c.sync_i32(&mut board.level));
        append_field(&mut blob, 26, |c| c.sync_i32(&mut board.sod_position));
        append_field(&mut blob, 27, |c| c.sync_i32(&mut board.sun_money));
        append_field(&mut blob, 28, |c| c.sync_i32(&mut board.num_waves));
        append_field(&mut blob, 29, |c| c.sync_i32(&mut board.main_counter));
        append_field(&mut blob, 30, |c| c.sync_i32(&mut board.current_wave));
        append_field(&mut blob, 31, |c| c.sync_i32(&mut board.total_spawned_waves));
        append_field(&mut blob, 32, |c| c.sync_i32(&mut board.tutorial_state));
        append_field(&mut blob, 33, |c| c.sync_u32(&mut board.tutorial_particle_id));
        append_field(&mut blob, 34, |c| c.sync_i32(&mut board.tutorial_timer));
        append_field(&mut blob, 35, |c| c.sync_i32(&mut board.last_bungee_wave));
        append_field(&mut blob, 36, |c| c.sync_i32(&mut board.zombie_health_to_next_wave));
        append_field(&mut blob, 37, |c| c.sync_i32(&mut board.zombie_health_wave_start));
        append_field(&mut blob, 38, |c| c.sync_i32(&mut board.zombie_count_down));
        append_field(&mut blob, 39, |c| c.sync_i32(&mut board.zombie_count_down_start));
        append_field(&mut blob, 40, |c| c.sync_i32(&mut board.huge_wave_count_down));
        append_field(&mut blob, 41, |c| sync_bool_slice(c, &mut board.help_displayed));
        append_field(&mut blob, 42, |c| c.sync_i32(&mut board.help_index));
        append_field(&mut blob, 43, |c| c.sync_bool(&mut board.final_boss_killed));
        append_field(&mut blob, 44, |c| c.sync_bool(&mut board.show_shovel));
        append_field(&mut blob, 45, |c| c.sync_bool(&mut board.level_complete));
        append_field(&mut blob, 46, |c| c.sync_i32(&mut board.board_fade_out_counter));
        append_field(&mut blob, 47, |c| c.sync_i32(&mut board.next_survival_stage_counter));
        append_field(&mut blob, 48, |c| c.sync_bool(&mut board.level_award_spawned));
        append_field(&mut blob, 49, |c| c.sync_i32(&mut board.progress_meter_width));
        append_field(&mut blob, 50, |c| c.sync_i32(&mut board.flag_raise_counter));
        append_field(&mut blob, 51, |c| c.sync_i32(&mut board.ice_trap_counter));
        append_field(&mut blob, 52, |c| c.sync_i32(&mut board.board_rand_seed));
        append_field(&mut blob, 53, |c| c.sync_u32(&mut board.pool_sparkly_particle_id));
        append_field(&mut blob, 54, |c| for row in board.fwoosh_id.iter_mut() { sync_u32_slice(c, row) });
        append_field(&mut blob, 55, |c| c.sync_i32(&mut board.fwoosh_count_down));
        append_field(&mut blob, 56, |c| c.sync_i32(&mut board.time_stop_counter));
        append_field(&mut blob, 57, |c| c.sync_bool(&mut board.dropped_first_coin));
        append_field(&mut blob, 58, |c| c.sync_bool(&mut board.killed_yeti));
        append_field(&mut blob, 59, |c| c.sync_bool(&mut board.mustache_mode));
        append_field(&mut blob, 60, |c| c.sync_bool(&mut board.super_mower_mode));
        append_field(&mut blob, 61, |c| c.sync_bool(&mut board.future_mode));
        append_field(&mut blob, 62, |c| c.sync_bool(&mut board.pinata_mode));
        append_field(&mut blob, 63, |c| c.sync_bool(&mut board.dance_mode));
        append_field(&mut blob, 64, |c| c.sync_bool(&mut board.daisy_mode));
        append_field(&mut blob, 65, |c| c.sync_bool(&mut board.sukhbir_mode));
        append_field(&mut blob, 66, |c| c.sync_i32(&mut board.prev_board_result));
        append_field(&mut blob, 67, |c| c.sync_i32(&mut board.triggered_lawn_mowers));
        append_field(&mut blob, 68, |c| c.sync_i32(&mut board.play_time_active_level));
        append_field(&mut blob, 69, |c| c.sync_i32(&mut board.play_time_inactive_level));
        append_field(&mut blob, 70, |c| c.sync_i32(&mut board.graves_cleared));
        append_field(&mut blob, 71, |c| c.sync_i32(&mut board.plants_eaten));
        append_field(&mut blob, 72, |c| c.sync_i32(&mut board.plants_shoveled));
        append_field(&mut blob, 73, |c| c.sync_i32(&mut board.coins_collected));
        write_tlv_blob(ctx, &mut blob);
    }
}

fn sync_zombies(ctx: &mut PortableSaveContext, board: &mut Board) {
    if ctx.is_reading() {
        read_data_array_tlv(ctx, &mut board.zombies, |field_id, data, zombie| match field_id {
            FIELD_GAME_OBJECT => { apply_field(data, |c| sync_game_object(c, &mut zombie.game_object)); }
            FIELD_TAIL => { apply_field(data, |c| sync_zombie_tail(c, zombie)); }
            _ => {}
        });
    } else {
        write_data_array_tlv(ctx, &mut board.zombies, |out, zombie| {
            append_field(out, FIELD_GAME_OBJECT, |c| sync_game_object(c, &mut zombie.game_object));
            append_field(out, FIELD_TAIL, |c| sync_zombie_tail(c, zombie));
        });
    }
}

fn sync_plants(ctx: &mut PortableSaveContext, board: &mut Board) {
    if ctx.is_reading() {
        read_data_array_tlv(ctx, &mut board.plants, |field_id, data, plant| match field_id {
            FIELD_GAME_OBJECT => { apply_field(data, |c| sync_game_object(c, &mut plant.game_object)); }
            FIELD_TAIL => { apply_field(data, |c| sync_plant_tail(c, plant)); }
            _ => {}
        });
    } else {
        write_data_array_tlv(ctx, &mut board.plants, |out, plant| {
            append_field(out, FIELD_GAME_OBJECT, |c| sync_game_object(c, &mut plant.game_object));
            append_field(out, FIELD_TAIL, |c| sync_plant_tail(c, plant));
        });
    }
}

fn sync_projectiles(ctx: &mut PortableSaveContext, board: &mut Board) {
    if ctx.is_reading() {
        read_data_array_tlv(ctx, &mut board.projectiles, |field_id, data, projectile| match field_id {
            FIELD_GAME_OBJECT => { apply_field(data, |c| sync_game_object(c, &mut projectile.game_object)); }
            FIELD_TAIL => { apply_field(data, |c| sync_projectile_tail(c, projectile)); }
            _ => {}
        });
    } else {
        write_data_array_tlv(ctx, &mut board.projectiles, |out, projectile| {
            append_field(out, FIELD_GAME_OBJECT, |c| sync_game_object(c, &mut projectile.game_object));
            append_field(out, FIELD_TAIL, |c| sync_projectile_tail(c, projectile));
        });
    }
}

fn sync_coins(ctx: &mut PortableSaveContext, board: &mut Board) {
    if ctx.is_reading() {
        read_data_array_tlv(ctx, &mut board.coins, |field_id, data, coin| match field_id {
            FIELD_GAME_OBJECT => { apply_field(data, |c| sync_game_object(c, &mut coin.game_object)); }
            FIELD_TAIL => { apply_field(data, |c| sync_coin_tail(c, coin)); }
            _ => {}
        });
    } else {
        write_data_array_tlv(ctx, &mut board.coins, |out, coin| {
            append_field(out, FIELD_GAME_OBJECT, |c| sync_game_object(c, &mut coin.game_object));
            append_field(out, FIELD_TAIL, |c| sync_coin_tail(c, coin));
        });
    }
}

fn sync_mowers(ctx: &mut PortableSaveContext, board: &mut Board) {
    if ctx.is_reading() {
        read_data_array_tlv(ctx, &mut board.lawn_mowers, |field_id, data, mower| {
            if field_id == FIELD_TAIL {
                apply_field(data, |c| sync_mower_tail(c, mower));
            }
        });
    } else {
        write_data_array_tlv(ctx, &mut board.lawn_mowers, |out, mower| {
            append_field(out, FIELD_TAIL, |c| sync_mower_tail(c, mower));
        });
    }
}

fn sync_grid_items(ctx: &mut PortableSaveContext, board: &mut Board) {
    if ctx.is_reading() {
        read_data_array_tlv(ctx, &mut board.grid_items, |field_id, data, item| {
            if field_id == FIELD_TAIL {
                apply_field(data, |c| sync_grid_item_tail(c, item));
            }
        });
    } else {
        write_data_array_tlv(ctx, &mut board.grid_items, |out, item| {
            append_field(out, FIELD_TAIL, |c| sync_grid_item_tail(c, item));
        });
    }
}

fn sync_particle_systems_chunk(
    ctx: &mut PortableSaveContext,
    board: &mut Board,
    res: &mut Resources,
) {
    let effects = &mut board.effects;
    let particle_systems = &mut effects.particle_systems;
    let emitters = &mut effects.emitters;
    let particles = &mut effects.particles;
    if ctx.is_reading() {
        read_data_array_tlv(ctx, particle_systems, |field_id, data, system| {
            if field_id == FIELD_CHUNK_PAYLOAD {
                apply_field(data, |c| sync_particle_system(c, res, emitters, particles, system));
            }
        });
    } else {
        write_data_array_tlv(ctx, particle_systems, |out, system| {
            append_field(out, FIELD_CHUNK_PAYLOAD, |c| {
                sync_particle_system(c, res, emitters, particles, system)
            });
        });
    }
}

fn sync_reanimations_chunk(ctx: &mut PortableSaveContext, board: &mut Board, res: &mut Resources) {
    if ctx.is_reading() {
        read_data_array_tlv(ctx, &mut board.effects.reanimations, |field_id, data, reanim| {
            if field_id == FIELD_CHUNK_PAYLOAD {
                apply_field(data, |c| sync_reanimation(c, res, reanim));
            }
        });
    } else {
        write_data_array_tlv(ctx, &mut board.effects.reanimations, |out, reanim| {
            append_field(out, FIELD_CHUNK_PAYLOAD, |c| sync_reanimation(c, res, reanim));
        });
    }
}

fn sync_trails_chunk(ctx: &mut PortableSaveContext, board: &mut Board, res: &mut Resources) {
    if ctx.is_reading() {
        read_data_array_tlv(ctx, &mut board.effects.trails, |field_id, data, trail| {
            if field_id == FIELD_CHUNK_PAYLOAD {
                apply_field(data, |c| sync_trail(c, res, trail));
            }
        });
    } else {
        write_data_array_tlv(ctx, &mut board.effects.trails, |out, trail| {
            append_field(out, FIELD_CHUNK_PAYLOAD, |c| sync_trail(c, res, trail));
        });
    }
}

fn sync_attachments(ctx: &mut PortableSaveContext, board: &mut Board) {
    if ctx.is_reading() {
        read_data_array_tlv(ctx, &mut board.effects.attachments, |field_id, data, attachment| {
            if field_id == FIELD_TAIL {
                apply_field(data, |c| sync_attachment_tail(c, attachment));
            }
        });
    } else {
        write_data_array_tlv(ctx, &mut board.effects.attachments, |out, attachment| {
            append_field(out, FIELD_TAIL, |c| sync_attachment_tail(c, attachment));
        });
    }
}

fn sync_cursor_chunk(ctx: &mut PortableSaveContext, board: &mut Board) {
    if ctx.is_reading() {
        let Some(blob) = read_tlv_blob(ctx) else { return };
        let mut tlv = TlvReader::new(&blob);
        while tlv.has_more() {
            let Some(field_id) = tlv.read_u32() else { break };
            let Some(field_len) = tlv.read_u32() else { break };
            let Some(data) = tlv.read_bytes(field_len as usize) else { break };
            match field_id {
                FIELD_GAME_OBJECT => { apply_field(data, |c| sync_game_object(c, &mut board.cursor_object.game_object)); }
                FIELD_TAIL => { apply_field(data, |c| sync_cursor_tail(c, &mut board.cursor_object)); }
                _ => {}
            }
        }
    } else {
        let mut blob = Vec::new();
        append_field(&mut blob, FIELD_GAME_OBJECT, |c| sync_game_object(c, &mut board.cursor_object.game_object));
        append_field(&mut blob, FIELD_TAIL, |c| sync_cursor_tail(c, &mut board.cursor_object));
        write_tlv_blob(ctx, &mut blob);
    }
}

fn sync_cursor_preview_chunk(ctx: &mut PortableSaveContext, board: &mut Board) {
    if ctx.is_reading() {
        let Some(blob) = read_tlv_blob(ctx) else { return };
        let mut tlv = TlvReader::new(&blob);
        while tlv.has_more() {
            let Some(field_id) = tlv.read_u32() else { break };
            let Some(field_len) = tlv.read_u32() else { break };
            let Some(data) = tlv.read_bytes(field_len as usize) else { break };
            match field_id {
                FIELD_GAME_OBJECT => { apply_field(data, |c| sync_game_object(c, &mut board.cursor_preview.game_object)); }
                FIELD_TAIL => { apply_field(data, |c| sync_cursor_preview_tail(c, &mut board.cursor_preview)); }
                _ => {}
            }
        }
    } else {
        let mut blob = Vec::new();
        append_field(&mut blob, FIELD_GAME_OBJECT, |c| sync_game_object(c, &mut board.cursor_preview.game_object));
        append_field(&mut blob, FIELD_TAIL, |c| sync_cursor_preview_tail(c, &mut board.cursor_preview));
        write_tlv_blob(ctx, &mut blob);
    }
}

fn sync_advice_chunk(ctx: &mut PortableSaveContext, board: &mut Board) {
    if ctx.is_reading() {
        let Some(blob) = read_tlv_blob(ctx) else { return };
        let mut tlv = TlvReader::new(&blob);
        while tlv.has_more() {
            let Some(field_id) = tlv.read_u32() else { break };
            let Some(field_len) = tlv.read_u32() else { break };
            let Some(data) = tlv.read_bytes(field_len as usize) else { break };
            if field_id == FIELD_TAIL {
                apply_field(data, |c| sync_message_widget_tail(c, &mut board.advice));
            }
        }
    } else {
        let mut blob = Vec::new();
        append_field(&mut blob, FIELD_TAIL, |c| sync_message_widget_tail(c, &mut board.advice));
        write_tlv_blob(ctx, &mut blob);
    }
}

fn sync_seed_bank_chunk(ctx: &mut PortableSaveContext, board: &mut Board) {
    if ctx.is_reading() {
        let Some(blob) = read_tlv_blob(ctx) else { return };
        let mut tlv = TlvReader::new(&blob);
        while tlv.has_more() {
            let Some(field_id) = tlv.read_u32() else { break };
            let Some(field_len) = tlv.read_u32() else { break };
            let Some(data) = tlv.read_bytes(field_len as usize) else { break };
            match field_id {
                FIELD_GAME_OBJECT => { apply_field(data, |c| sync_game_object(c, &mut board.seed_bank.game_object)); }
                FIELD_TAIL => { apply_field(data, |c| sync_seed_bank_tail(c, &mut board.seed_bank)); }
                _ => {}
            }
        }
    } else {
        let mut blob = Vec::new();
        append_field(&mut blob, FIELD_GAME_OBJECT, |c| sync_game_object(c, &mut board.seed_bank.game_object));
        append_field(&mut blob, FIELD_TAIL, |c| sync_seed_bank_tail(c, &mut board.seed_bank));
        write_tlv_blob(ctx, &mut blob);
    }
}

fn sync_seed_packets_chunk(ctx: &mut PortableSaveContext, board: &mut Board) {
    let mut count = SEEDBANK_MAX as i32;
    ctx.sync_i32(&mut count);
    if ctx.failed {
        return;
    }
    let count = count.clamp(0, SEEDBANK_MAX as i32) as usize;
    for i in 0..count {
        if ctx.failed {
            return;
        }
        let packet = &mut board.seed_bank.seed_packets[i];
        if ctx.is_reading() {
            let Some(item_data) = read_tlv_blob(ctx) else { return };
            *packet = SeedPacket::default();
            let mut tlv = TlvReader::new(&item_data);
            while tlv.has_more() {
                let Some(field_id) = tlv.read_u32() else { break };
                let Some(field_len) = tlv.read_u32() else { break };
                let Some(data) = tlv.read_bytes(field_len as usize) else { break };
                match field_id {
                    FIELD_GAME_OBJECT => { apply_field(data, |c| sync_game_object(c, &mut packet.game_object)); }
                    FIELD_TAIL => { apply_field(data, |c| sync_seed_packet_tail(c, packet)); }
                    _ => {}
                }
            }
        } else {
            let mut item_data = Vec::new();
            append_field(&mut item_data, FIELD_GAME_OBJECT, |c| sync_game_object(c, &mut packet.game_object));
            append_field(&mut item_data, FIELD_TAIL, |c| sync_seed_packet_tail(c, packet));
            write_tlv_blob(ctx, &mut item_data);
        }
    }
}

fn sync_challenge_chunk(ctx: &mut PortableSaveContext, board: &mut Board) {
    if ctx.is_reading() {
        let Some(blob) = read_tlv_blob(ctx) else { return };
        let mut tlv = TlvReader::new(&blob);
        while tlv.has_more() {
            let Some(field_id) = tlv.read_u32() else { break };
            let Some(field_len) = tlv.read_u32() else { break };
            let Some(data) = tlv.read_bytes(field_len as usize) else { break };
            if field_id == FIELD_TAIL {
                apply_field(data, |c| sync_challenge_tail(c, &mut board.challenge));
            }
        }
    } else {
        let mut blob = Vec::new();
        append_field(&mut blob, FIELD_TAIL, |c| sync_challenge_tail(c, &mut board.challenge));
        write_tlv_blob(ctx, &mut blob);
    }
}

fn sync_music_chunk(ctx: &mut PortableSaveContext, board: &mut Board) {
    if ctx.is_reading() {
        let Some(blob) = read_tlv_blob(ctx) else { return };
        let mut tlv = TlvReader::new(&blob);
        while tlv.has_more() {
            let Some(field_id) = tlv.read_u32() else { break };
            let Some(field_len) = tlv.read_u32() else { break };
            let Some(data) = tlv.read_bytes(field_len as usize) else { break };
            if field_id == FIELD_TAIL {
                apply_field(data, |c| sync_music_tail(c, &mut board.music));
            }
        }
    } else {
        let mut blob = Vec::new();
        append_field(&mut blob, FIELD_TAIL, |c| sync_music_tail(c, &mut board.music));
        write_tlv_blob(ctx, &mut blob);
    }
}

fn is_known_chunk(chunk_type: u32) -> bool {
    (CHUNK_BOARD_BASE..=CHUNK_MUSIC).contains(&chunk_type)
}

fn sync_chunk(
    chunk_type: u32,
    ctx: &mut PortableSaveContext,
    board: &mut Board,
    res: &mut Resources,
) {
    match chunk_type {
        CHUNK_BOARD_BASE => sync_board_base(ctx, board),
        CHUNK_ZOMBIES => sync_zombies(ctx, board),
        CHUNK_PLANTS => sync_plants(ctx, board),
        CHUNK_PROJECTILES => sync_projectiles(ctx, board),
        CHUNK_COINS => sync_coins(ctx, board),
        CHUNK_MOWERS => sync_mowers(ctx, board),
        CHUNK_GRIDITEMS => sync_grid_items(ctx, board),
        CHUNK_PARTICLE_EMITTERS => sync_data_array_ids_only(ctx, &mut board.effects.emitters),
        CHUNK_PARTICLE_PARTICLES => sync_data_array_ids_only(ctx, &mut board.effects.particles),
        CHUNK_PARTICLE_SYSTEMS => sync_particle_systems_chunk(ctx, board, res),
        CHUNK_REANIMATIONS => sync_reanimations_chunk(ctx, board, res),
        CHUNK_TRAILS => sync_trails_chunk(ctx, board, res),
        CHUNK_ATTACHMENTS => sync_attachments(ctx, board),
        CHUNK_CURSOR => sync_cursor_chunk(ctx, board),
        CHUNK_CURSOR_PREVIEW => sync_cursor_preview_chunk(ctx, board),
        CHUNK_ADVICE => sync_advice_chunk(ctx, board),
        CHUNK_SEEDBANK => sync_seed_bank_chunk(ctx, board),
        CHUNK_SEEDPACKETS => sync_seed_packets_chunk(ctx, board),
        CHUNK_CHALLENGE => sync_challenge_chunk(ctx, board),
        CHUNK_MUSIC => sync_music_chunk(ctx, board),
        _ => {}
    }
}

fn write_chunk(
    payload: &mut Vec<u8>,
    chunk_type: u32,
    board: &mut Board,
    res: &mut Resources,
) -> bool {
    let mut field_writer = DataWriter::open_memory(0x4000);
    {
        let mut ctx = PortableSaveContext::writing(&mut field_writer);
        sync_chunk(chunk_type, &mut ctx, board, res);
        if ctx.failed {
            warn!(chunk_type, "chunk failed to encode");
            return false;
        }
    }

    let mut chunk = Vec::with_capacity(field_writer.len() + 12);
    append_u32_le(&mut chunk, SAVE_CHUNK_VERSION);
    append_u32_le(&mut chunk, FIELD_CHUNK_PAYLOAD);
    append_u32_le(&mut chunk, field_writer.len() as u32);
    chunk.extend_from_slice(field_writer.data());
    append_chunk(payload, chunk_type, &chunk);
    true
}

/// Put the subsystem a failed chunk targets back into its default
/// state, so a rejected chunk is never left half-applied.
fn reset_chunk_state(chunk_type: u32, board: &mut Board) {
    match chunk_type {
        CHUNK_ZOMBIES => board.zombies.clear(),
        CHUNK_PLANTS => board.plants.clear(),
        CHUNK_PROJECTILES => board.projectiles.clear(),
        CHUNK_COINS => board.coins.clear(),
        CHUNK_MOWERS => board.lawn_mowers.clear(),
        CHUNK_GRIDITEMS => board.grid_items.clear(),
        CHUNK_PARTICLE_EMITTERS => board.effects.emitters.clear(),
        CHUNK_PARTICLE_PARTICLES => board.effects.particles.clear(),
        CHUNK_PARTICLE_SYSTEMS => board.effects.particle_systems.clear(),
        CHUNK_REANIMATIONS => board.effects.reanimations.clear(),
        CHUNK_TRAILS => board.effects.trails.clear(),
        CHUNK_ATTACHMENTS => board.effects.attachments.clear(),
        CHUNK_CURSOR => board.cursor_object = CursorObject::default(),
        CHUNK_CURSOR_PREVIEW => board.cursor_preview = CursorPreview::default(),
        CHUNK_ADVICE => board.advice = MessageWidget::default(),
        CHUNK_SEEDBANK => board.seed_bank = SeedBank::default(),
        CHUNK_SEEDPACKETS => {
            for packet in board.seed_bank.seed_packets.iter_mut() {
                *packet = SeedPacket::default();
            }
        }
        CHUNK_CHALLENGE => board.challenge = crate::challenge::Challenge::default(),
        CHUNK_MUSIC => board.music = Music::default(),
        _ => {}
    }
}

fn read_chunk(chunk_type: u32, data: &[u8], board: &mut Board, res: &mut Resources) -> bool {
    if !is_known_chunk(chunk_type) {
        debug!(chunk_type, "skipping unknown chunk type");
        return true;
    }
    let mut tlv = TlvReader::new(data);
    let Some(chunk_version) = tlv.read_u32() else { return false };
    if chunk_version != SAVE_CHUNK_VERSION {
        warn!(chunk_type, chunk_version, "unsupported chunk version");
        return false;
    }

    let mut applied = false;
    while tlv.has_more() {
        let Some(field_id) = tlv.read_u32() else { break };
        let Some(field_len) = tlv.read_u32() else { break };
        let Some(field_data) = tlv.read_bytes(field_len as usize) else { break };
        if field_id == FIELD_CHUNK_PAYLOAD {
            let mut reader = DataReader::from_memory(field_data);
            let mut ctx = PortableSaveContext::reading(&mut reader);
            sync_chunk(chunk_type, &mut ctx, board, res);
            if ctx.failed {
                return false;
            }
            applied = true;
        }
    }
    applied
}

// ============================================================
// File level
// ============================================================

pub(crate) fn build_portable_payload(board: &mut Board, res: &mut Resources) -> Option<Vec<u8>> {
    let mut payload = Vec::with_capacity(0x10000);
    for chunk_type in CHUNK_ORDER {
        if !write_chunk(&mut payload, chunk_type, board, res) {
            return None;
        }
    }
    Some(payload)
}

pub(crate) fn build_save_file(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(SAVE_HEADER_SIZE + payload.len());
    out.extend_from_slice(SAVE_FILE_MAGIC);
    append_u32_le(&mut out, SAVE_FILE_VERSION);
    append_u32_le(&mut out, payload.len() as u32);
    append_u32_le(&mut out, lawn_common::crc::crc_block(payload));
    out.extend_from_slice(payload);
    out
}

fn read_header_u32(data: &[u8], offset: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&data[offset..offset + 4]);
    u32::from_le_bytes(bytes)
}

/// Write the session through the portable format.
pub fn save_game_portable<P: AsRef<std::path::Path>>(
    board: &mut Board,
    res: &mut Resources,
    path: P,
) -> bool {
    let Some(payload) = build_portable_payload(board, res) else {
        return false;
    };
    let out = build_save_file(&payload);
    match lawn_common::files::save_file(path.as_ref(), &out) {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "failed to write save file");
            false
        }
    }
}

/// Parse a portable save into `board`. Header, version, size and
/// checksum are all validated before any chunk is applied; unknown
/// chunks are skipped; a failed chunk spoils only itself. The load
/// succeeds only if the board-base chunk applied.
pub fn load_game_portable<P: AsRef<std::path::Path>>(
    board: &mut Board,
    res: &mut Resources,
    path: P,
) -> bool {
    let Ok(data) = lawn_common::files::load_file(path.as_ref()) else {
        return false;
    };
    load_game_portable_from_bytes(board, res, &data)
}

/// Validate the fixed header and checksum, returning the payload span.
fn validate_portable_header(data: &[u8]) -> DataResult<&[u8]> {
    if data.len() < SAVE_HEADER_SIZE {
        return Err(DataError::OutOfData);
    }
    if &data[0..12] != SAVE_FILE_MAGIC {
        return Err(DataError::HeaderMismatch);
    }
    let version = read_header_u32(data, 12);
    let payload_size = read_header_u32(data, 16) as usize;
    let payload_crc = read_header_u32(data, 20);
    if version != SAVE_FILE_VERSION {
        return Err(DataError::HeaderMismatch);
    }
    if payload_size + SAVE_HEADER_SIZE > data.len() {
        return Err(DataError::OutOfData);
    }
    let payload = &data[SAVE_HEADER_SIZE..SAVE_HEADER_SIZE + payload_size];
    if lawn_common::crc::crc_block(payload) != payload_crc {
        return Err(DataError::ChecksumMismatch);
    }
    Ok(payload)
}

pub(crate) fn load_game_portable_from_bytes(
    board: &mut Board,
    res: &mut Resources,
    data: &[u8],
) -> bool {
    let payload = match validate_portable_header(data) {
        Ok(payload) => payload,
        Err(e) => {
            debug!(error = %e, "portable save rejected");
            return false;
        }
    };

    let mut base_loaded = false;
    let mut tlv = TlvReader::new(payload);
    while tlv.has_more() {
        let Some(chunk_type) = tlv.read_u32() else { break };
        let Some(chunk_len) = tlv.read_u32() else { break };
        let Some(chunk_data) = tlv.read_bytes(chunk_len as usize) else { break };
        if read_chunk(chunk_type, chunk_data, board, res) {
            if chunk_type == CHUNK_BOARD_BASE {
                base_loaded = true;
            }
        } else {
            warn!(chunk_type, "chunk failed to apply");
            reset_chunk_state(chunk_type, board);
        }
    }
    base_loaded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::MAX_ZOMBIES;
    use crate::test_fixtures::{
        assert_boards_match, make_resources, make_test_board, TEST_REANIM_GARGANTUAR,
    };
    use crate::zombie::ZOMBIE_FOOTBALL;
    use rand::{Rng, SeedableRng};

    fn split_chunks(payload: &[u8]) -> Vec<(u32, Vec<u8>)> {
        let mut chunks = Vec::new();
        let mut tlv = TlvReader::new(payload);
        while tlv.has_more() {
            let chunk_type = tlv.read_u32().unwrap();
            let chunk_len = tlv.read_u32().unwrap();
            let chunk_data = tlv.read_bytes(chunk_len as usize).unwrap();
            chunks.push((chunk_type, chunk_data.to_vec()));
        }
        chunks
    }

    fn join_chunks(chunks: &[(u32, Vec<u8>)]) -> Vec<u8> {
        let mut payload = Vec::new();
        for (chunk_type, chunk_data) in chunks {
            append_chunk(&mut payload, *chunk_type, chunk_data);
        }
        payload
    }

    fn encode_field<F>(field_id: u32, sync_fn: F) -> Vec<u8>
    where
        F: FnOnce(&mut PortableSaveContext),
    {
        let mut out = Vec::new();
        append_field(&mut out, field_id, sync_fn);
        out
    }

    // A zombies chunk with explicitly-provided slot items, so tests can
    // exercise forward/backward field compatibility and capacity checks.
    fn build_zombies_chunk(capacity: u32, items: &[(u32, Vec<u8>)]) -> Vec<u8> {
        let mut inner = Vec::new();
        let count = items.len() as u32;
        append_u32_le(&mut inner, count); // free list head: no free slots
        append_u32_le(&mut inner, count); // high-water mark
        append_u32_le(&mut inner, count); // live count
        append_u32_le(&mut inner, count + 1); // id generator
        append_u32_le(&mut inner, capacity);
        for (id, item_data) in items {
            append_u32_le(&mut inner, *id);
            append_u32_le(&mut inner, item_data.len() as u32);
            inner.extend_from_slice(item_data);
        }
        let mut chunk = Vec::new();
        append_u32_le(&mut chunk, SAVE_CHUNK_VERSION);
        append_u32_le(&mut chunk, FIELD_CHUNK_PAYLOAD);
        append_u32_le(&mut chunk, inner.len() as u32);
        chunk.extend_from_slice(&inner);
        chunk
    }

    #[test]
    fn test_round_trip_populated_board() {
        let mut res = make_resources();
        let mut board = make_test_board();

        let path = std::env::temp_dir().join("lawn_portable_round_trip.sav");
        assert!(save_game_portable(&mut board, &mut res, &path));

        let mut loaded = Board::new();
        assert!(load_game_portable(&mut loaded, &mut res, &path));
        assert_boards_match(&board, &loaded, true);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_empty_board_round_trip() {
        let mut res = make_resources();
        let mut board = Board::new();
        let payload = build_portable_payload(&mut board, &mut res).unwrap();
        let file = build_save_file(&payload);

        let mut loaded = Board::new();
        assert!(load_game_portable_from_bytes(&mut loaded, &mut res, &file));
        assert_eq!(loaded.zombies.size, 0);
        assert_eq!(loaded.plants.size, 0);
        assert_eq!(loaded.projectiles.size, 0);
        assert_eq!(loaded.coins.size, 0);
        assert_eq!(loaded.lawn_mowers.size, 0);
        assert_eq!(loaded.grid_items.size, 0);
        assert_eq!(loaded.effects.particle_systems.size, 0);
        assert_eq!(loaded.effects.reanimations.size, 0);
        assert_eq!(loaded.effects.trails.size, 0);
        assert_eq!(loaded.effects.attachments.size, 0);
    }

    #[test]
    fn test_unknown_chunk_between_valid_chunks_is_skipped() {
        let mut res = make_resources();
        let mut board = make_test_board();
        let payload = build_portable_payload(&mut board, &mut res).unwrap();

        let mut chunks = split_chunks(&payload);
        chunks.insert(1, (999, vec![0xAA; 37]));
        let file = build_save_file(&join_chunks(&chunks));

        let mut loaded = Board::new();
        assert!(load_game_portable_from_bytes(&mut loaded, &mut res, &file));
        // Chunks on both sides of the foreign one still applied.
        assert_eq!(loaded.sun_money, board.sun_money);
        assert_eq!(loaded.music.cur_music_tune, board.music.cur_music_tune);
    }

    #[test]
    fn test_unknown_field_in_chunk_is_skipped() {
        let mut res = make_resources();
        let mut zombie = Zombie::default();
        zombie.zombie_type = ZOMBIE_FOOTBALL;
        zombie.body_health = 80;
        zombie.game_object.row = 4;

        let mut item = encode_field(55, |c| {
            let mut junk = 0x7F00BA5Ei32;
            c.sync_i32(&mut junk);
        });
        item.extend(encode_field(FIELD_GAME_OBJECT, |c| {
            sync_game_object(c, &mut zombie.game_object)
        }));
        item.extend(encode_field(FIELD_TAIL, |c| sync_zombie_tail(c, &mut zombie)));

        let id = 1u32 << 16;
        let chunk = build_zombies_chunk(MAX_ZOMBIES, &[(id, item)]);

        let mut board = Board::new();
        assert!(read_chunk(CHUNK_ZOMBIES, &chunk, &mut board, &mut res));
        let loaded = board.zombies.get(id).unwrap();
        assert_eq!(loaded.zombie_type, ZOMBIE_FOOTBALL);
        assert_eq!(loaded.body_health, 80);
        assert_eq!(loaded.game_object.row, 4);
    }

    #[test]
    fn test_missing_field_takes_default() {
        let mut res = make_resources();
        let mut zombie = Zombie::default();
        zombie.zombie_type = ZOMBIE_FOOTBALL;
        zombie.body_health = 80;

        // Only the tail record; no game-object field.
        let item = encode_field(FIELD_TAIL, |c| sync_zombie_tail(c, &mut zombie));
        let id = 1u32 << 16;
        let chunk = build_zombies_chunk(MAX_ZOMBIES, &[(id, item)]);

        let mut board = Board::new();
        assert!(read_chunk(CHUNK_ZOMBIES, &chunk, &mut board, &mut res));
        let loaded = board.zombies.get(id).unwrap();
        assert_eq!(loaded.zombie_type, ZOMBIE_FOOTBALL);
        assert_eq!(loaded.game_object, crate::board::GameObject::default());
    }

    #[test]
    fn test_capacity_mismatch_rejects_chunk_only() {
        let mut res = make_resources();
        let mut board = make_test_board();
        let payload = build_portable_payload(&mut board, &mut res).unwrap();

        let mut chunks = split_chunks(&payload);
        let zombies = chunks
            .iter_mut()
            .find(|(ty, _)| *ty == CHUNK_ZOMBIES)
            .unwrap();
        // Capacity lives after the chunk prefix (version, field id,
        // inner length) and four table header words.
        let capacity_offset = 12 + 16;
        zombies.1[capacity_offset..capacity_offset + 4]
            .copy_from_slice(&(MAX_ZOMBIES + 1).to_le_bytes());
        let file = build_save_file(&join_chunks(&chunks));

        let mut loaded = Board::new();
        assert!(load_game_portable_from_bytes(&mut loaded, &mut res, &file));
        // The zombies chunk was rejected; everything else applied.
        assert_eq!(loaded.zombies.size, 0);
        assert_eq!(loaded.plants.size, board.plants.size);
        assert_eq!(loaded.sun_money, board.sun_money);
    }

    #[test]
    fn test_wrong_chunk_version_rejects_chunk() {
        let mut res = make_resources();
        let mut zombie = Zombie::default();
        let item = encode_field(FIELD_TAIL, |c| sync_zombie_tail(c, &mut zombie));
        let mut chunk = build_zombies_chunk(MAX_ZOMBIES, &[(1 << 16, item)]);
        chunk[0..4].copy_from_slice(&99u32.to_le_bytes());
        let mut board = Board::new();
        assert!(!read_chunk(CHUNK_ZOMBIES, &chunk, &mut board, &mut res));
    }

    #[test]
    fn test_single_byte_corruption_never_panics() {
        let mut res = make_resources();
        let mut board = make_test_board();
        let payload = build_portable_payload(&mut board, &mut res).unwrap();
        let file = build_save_file(&payload);

        let mut rng = rand::rngs::StdRng::seed_from_u64(0x5EED);
        for _ in 0..200 {
            let pos = rng.gen_range(0..file.len());
            let bit = 1u8 << rng.gen_range(0..8);
            let mut corrupt = file.clone();
            corrupt[pos] ^= bit;

            let mut loaded = Board::new();
            let ok = load_game_portable_from_bytes(&mut loaded, &mut res, &corrupt);
            if !ok {
                // A rejected load leaves the default session untouched.
                assert_eq!(loaded.level, Board::new().level);
            }
        }
    }

    #[test]
    fn test_payload_corruption_fails_checksum() {
        let mut res = make_resources();
        let mut board = make_test_board();
        let payload = build_portable_payload(&mut board, &mut res).unwrap();
        let mut file = build_save_file(&payload);
        let mid = SAVE_HEADER_SIZE + payload.len() / 2;
        file[mid] ^= 0x10;

        let mut loaded = Board::new();
        assert!(!load_game_portable_from_bytes(&mut loaded, &mut res, &file));
    }

    #[test]
    fn test_truncated_file_is_rejected() {
        let mut res = make_resources();
        let mut board = make_test_board();
        let payload = build_portable_payload(&mut board, &mut res).unwrap();
        let file = build_save_file(&payload);

        let mut loaded = Board::new();
        assert!(!load_game_portable_from_bytes(&mut loaded, &mut res, &file[..file.len() / 2]));
        assert!(!load_game_portable_from_bytes(&mut loaded, &mut res, &file[..SAVE_HEADER_SIZE - 1]));
        assert!(!load_game_portable_from_bytes(&mut loaded, &mut res, &[]));
    }

    #[test]
    fn test_wrong_magic_is_rejected() {
        let mut res = make_resources();
        let mut board = make_test_board();
        let payload = build_portable_payload(&mut board, &mut res).unwrap();
        let mut file = build_save_file(&payload);
        file[0] = b'X';

        let mut loaded = Board::new();
        assert!(!load_game_portable_from_bytes(&mut loaded, &mut res, &file));
    }

    #[test]
    fn test_missing_board_base_chunk_fails_load() {
        let mut res = make_resources();
        let mut board = make_test_board();
        let payload = build_portable_payload(&mut board, &mut res).unwrap();
        let chunks: Vec<(u32, Vec<u8>)> = split_chunks(&payload)
            .into_iter()
            .filter(|(ty, _)| *ty != CHUNK_BOARD_BASE)
            .collect();
        let file = build_save_file(&join_chunks(&chunks));

        let mut loaded = Board::new();
        assert!(!load_game_portable_from_bytes(&mut loaded, &mut res, &file));
    }

    #[test]
    fn test_music_disabled_flag_is_not_restored() {
        let mut res = make_resources();
        let mut board = make_test_board();
        board.music.music_disabled = true;
        let payload = build_portable_payload(&mut board, &mut res).unwrap();
        let file = build_save_file(&payload);

        let mut loaded = Board::new();
        assert!(load_game_portable_from_bytes(&mut loaded, &mut res, &file));
        assert!(!loaded.music.music_disabled);
        assert_eq!(loaded.music.cur_music_tune, board.music.cur_music_tune);
    }

    #[test]
    fn test_reanimation_def_out_of_range_spoils_only_that_item() {
        let mut res = make_resources();
        let mut board = make_test_board();
        {
            let (_, reanim) = board.effects.reanimations.iter_mut().next().unwrap();
            reanim.reanimation_type = crate::reanimator::NUM_REANIMS + 5;
        }
        let payload = build_portable_payload(&mut board, &mut res).unwrap();
        let file = build_save_file(&payload);

        let mut loaded = Board::new();
        assert!(load_game_portable_from_bytes(&mut loaded, &mut res, &file));
        // The slot survives but its field pass failed, leaving the
        // freshly-reset default instead of the bogus definition id.
        assert_eq!(loaded.effects.reanimations.size, 1);
        let (_, reanim) = loaded.effects.reanimations.iter().next().unwrap();
        assert_eq!(reanim.reanimation_type, 0);
        assert!(reanim.track_instances.is_empty());
        assert_eq!(loaded.sun_money, board.sun_money);
    }

    #[test]
    fn test_loaded_reanimation_tracks_match_definition() {
        let mut res = make_resources();
        let mut board = make_test_board();
        let payload = build_portable_payload(&mut board, &mut res).unwrap();
        let file = build_save_file(&payload);

        let mut loaded = Board::new();
        assert!(load_game_portable_from_bytes(&mut loaded, &mut res, &file));
        let (_, reanim) = loaded.effects.reanimations.iter().next().unwrap();
        assert_eq!(reanim.reanimation_type, TEST_REANIM_GARGANTUAR);
        assert_eq!(reanim.track_instances.len(), 4);
        assert_eq!(reanim.track_instances[1].render_group, 3);
        assert_eq!(reanim.track_instances[3].shake_x, 1.5);
    }
}
