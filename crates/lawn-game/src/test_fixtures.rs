// test_fixtures.rs — a populated session and resource set shared by the
// save codec tests

use crate::board::Board;
use crate::challenge::Challenge;
use crate::data_array::{DataArray, DATA_ARRAY_KEY_MASK};
use crate::grid_item::GRIDITEM_GRAVESTONE;
use crate::lawn_mower::{MOWER_LAWN, MOWER_STATE_READY};
use crate::message_widget::MESSAGE_STYLE_HINT_STAY;
use crate::particle::{EmitterDefinition, ParticleDefinition};
use crate::plant::{SEED_PEASHOOTER, SEED_SUNFLOWER};
use crate::reanimator::{ReanimatorDefinition, ReanimatorTrackDef, ReanimatorTrackInstance};
use crate::resources::{ImageHandle, Resources};
use crate::zombie::{ZOMBIE_GARGANTUAR, ZOMBIE_NORMAL};

pub(crate) const TEST_REANIM_GARGANTUAR: i32 = 2;
pub(crate) const TEST_PARTICLE_EFFECT: i32 = 1;
pub(crate) const TEST_TRAIL_TYPE: i32 = 0;

pub(crate) fn make_resources() -> Resources {
    let mut res = Resources::new();
    res.register_image(7, ImageHandle(700));
    res.register_reanim_def(
        TEST_REANIM_GARGANTUAR,
        ReanimatorDefinition {
            tracks: vec![
                ReanimatorTrackDef { name: "Zombie_gargantua_body1".to_string() },
                ReanimatorTrackDef { name: "Zombie_gargantuar_outerarm_lower".to_string() },
                ReanimatorTrackDef { name: "Zombie_gargantuar_outerleg_foot".to_string() },
                ReanimatorTrackDef { name: "anim_head1".to_string() },
            ],
            fps: 12.0,
        },
    );
    res.register_particle_def(
        TEST_PARTICLE_EFFECT,
        ParticleDefinition {
            emitter_defs: vec![
                EmitterDefinition { name: "main".to_string() },
                EmitterDefinition { name: "sparks".to_string() },
            ],
        },
    );
    res
}

/// A session with at least one live entity in every table and
/// non-default values in every singleton record.
pub(crate) fn make_test_board() -> Board {
    let mut board = Board::new();

    board.paused = false;
    board.level = 32;
    board.background = 2;
    board.sun_money = 425;
    board.num_waves = 12;
    board.current_wave = 5;
    board.main_counter = 90210;
    board.sun_count_down = 350;
    board.board_rand_seed = -12345;
    board.grid_square_type[3][2] = 1;
    board.grid_cel_look[1][1] = 4;
    board.plant_row[2] = 1;
    board.ice_timer[4] = 300;
    board.zombies_in_wave[4][0] = ZOMBIE_NORMAL;
    board.zombies_in_wave[4][1] = ZOMBIE_GARGANTUAR;
    board.zombie_allowed[ZOMBIE_NORMAL as usize] = true;
    board.zombie_allowed[ZOMBIE_GARGANTUAR as usize] = true;
    board.row_picking_array[1].weight = 0.75;
    board.row_picking_array[1].item = 1;
    board.help_displayed[3] = true;
    board.show_shovel = true;
    board.progress_meter_width = 88;
    board.graves_cleared = 4;
    board.coins_collected = 230;

    // A gargantuar far enough into its health bar to pick damage art.
    let reanim_id = board.effects.reanimations.alloc();
    {
        let reanim = board.effects.reanimations.get_mut(reanim_id).unwrap();
        reanim.reanimation_type = TEST_REANIM_GARGANTUAR;
        reanim.anim_time = 0.4;
        reanim.anim_rate = 12.0;
        reanim.render_order = 40;
        reanim.track_instances = vec![ReanimatorTrackInstance::default(); 4];
        reanim.track_instances[1].render_group = 3;
        reanim.track_instances[3].shake_x = 1.5;
    }

    let gargantuar_id = board.zombies.alloc();
    {
        let zombie = board.zombies.get_mut(gargantuar_id).unwrap();
        zombie.zombie_type = ZOMBIE_GARGANTUAR;
        zombie.pos_x = 610.0;
        zombie.pos_y = 180.0;
        zombie.game_object.row = 2;
        zombie.game_object.visible = true;
        zombie.body_health = 500;
        zombie.body_max_health = 3000;
        zombie.has_head = true;
        zombie.body_reanim_id = reanim_id;
        zombie.from_wave = 4;
    }
    let basic_id = board.zombies.alloc();
    {
        let zombie = board.zombies.get_mut(basic_id).unwrap();
        zombie.zombie_type = ZOMBIE_NORMAL;
        zombie.pos_x = 720.0;
        zombie.body_health = 270;
        zombie.body_max_health = 270;
        zombie.has_head = true;
    }

    let plant_id = board.plants.alloc();
    {
        let plant = board.plants.get_mut(plant_id).unwrap();
        plant.seed_type = SEED_PEASHOOTER;
        plant.plant_col = 3;
        plant.game_object.row = 2;
        plant.plant_health = 300;
        plant.plant_max_health = 300;
        plant.launch_rate = 150;
    }

    let projectile_id = board.projectiles.alloc();
    {
        let projectile = board.projectiles.get_mut(projectile_id).unwrap();
        projectile.projectile_type = 0;
        projectile.pos_x = 400.0;
        projectile.vel_x = 3.33;
        projectile.target_zombie_id = basic_id;
    }

    let coin_id = board.coins.alloc();
    {
        let coin = board.coins.get_mut(coin_id).unwrap();
        coin.coin_type = 3;
        coin.pos_x = 120.0;
        coin.pos_y = 80.0;
        coin.vel_y = -1.5;
    }

    let mower_id = board.lawn_mowers.alloc();
    {
        let mower = board.lawn_mowers.get_mut(mower_id).unwrap();
        mower.mower_type = MOWER_LAWN;
        mower.mower_state = MOWER_STATE_READY;
        mower.row = 1;
        mower.pos_x = -20.0;
        mower.visible = true;
    }

    let grid_item_id = board.grid_items.alloc();
    {
        let item = board.grid_items.get_mut(grid_item_id).unwrap();
        item.grid_item_type = GRIDITEM_GRAVESTONE;
        item.grid_x = 7;
        item.grid_y = 3;
        item.grid_item_counter = 55;
    }

    // One particle system owning one emitter owning two particles.
    let p1 = board.effects.particles.alloc();
    let p2 = board.effects.particles.alloc();
    {
        let particle = board.effects.particles.get_mut(p1).unwrap();
        particle.particle_age = 10;
        particle.position.x = 50.0;
        particle.spin_velocity = 0.2;
    }
    {
        let particle = board.effects.particles.get_mut(p2).unwrap();
        particle.particle_age = 20;
        particle.position.y = 60.0;
    }
    let emitter_id = board.effects.emitters.alloc();
    {
        let emitter = board.effects.emitters.get_mut(emitter_id).unwrap();
        emitter.emitter_def_index = 1;
        emitter.particle_list = vec![p1, p2];
        emitter.particles_spawned = 2;
        emitter.system_age = 33;
        emitter.scale_override = 1.25;
    }
    let system_id = board.effects.particle_systems.alloc();
    {
        let system = board.effects.particle_systems.get_mut(system_id).unwrap();
        system.particle_type = TEST_PARTICLE_EFFECT;
        system.emitter_list = vec![emitter_id];
        system.effect_type = 9;
        system.render_order = 12;
    }
    for pid in [p1, p2] {
        board.effects.particles.get_mut(pid).unwrap().particle_emitter_id = emitter_id;
    }

    let trail_id = board.effects.trails.alloc();
    {
        let trail = board.effects.trails.get_mut(trail_id).unwrap();
        trail.trail_type = TEST_TRAIL_TYPE;
        trail.num_trail_points = 2;
        trail.trail_points[0].pos.x = 10.0;
        trail.trail_points[1].pos.x = 14.0;
        trail.trail_duration = 40;
    }

    let attachment_id = board.effects.attachments.alloc();
    {
        let attachment = board.effects.attachments.get_mut(attachment_id).unwrap();
        attachment.num_effects = 1;
        attachment.effect_array[0].effect_id = reanim_id;
        attachment.effect_array[0].effect_type = 1;
    }

    board.cursor_object.seed_bank_index = 1;
    board.cursor_object.seed_type = SEED_SUNFLOWER;
    board.cursor_preview.grid_x = 4;
    board.cursor_preview.grid_y = 2;
    board.advice.label = "ADVICE_CLICK_ON_SUN".to_string();
    board.advice.display_time = 200;
    board.advice.message_style = MESSAGE_STYLE_HINT_STAY;
    board.seed_bank.num_packets = 2;
    board.seed_bank.seed_packets[0].packet_type = SEED_PEASHOOTER;
    board.seed_bank.seed_packets[0].index = 0;
    board.seed_bank.seed_packets[1].packet_type = SEED_SUNFLOWER;
    board.seed_bank.seed_packets[1].index = 1;
    board.seed_bank.seed_packets[1].refresh_counter = 320;
    board.challenge = Challenge {
        challenge_state: 2,
        challenge_score: 950,
        survival_stage: 3,
        ..Challenge::default()
    };
    board.music.cur_music_tune = 4;
    board.music.base_bpm = 124.0;
    board.music.music_drums_state = 2;

    board
}

pub(crate) fn assert_tables_match<T: PartialEq + std::fmt::Debug>(
    a: &DataArray<T>,
    b: &DataArray<T>,
    compare_next_key: bool,
) {
    assert_eq!(a.free_list_head, b.free_list_head, "{} free list head", a.name);
    assert_eq!(a.max_used_count, b.max_used_count, "{} high-water mark", a.name);
    assert_eq!(a.size, b.size, "{} live count", a.name);
    assert_eq!(a.max_size, b.max_size, "{} capacity", a.name);
    if compare_next_key {
        assert_eq!(a.next_key, b.next_key, "{} id generator", a.name);
    }
    for i in 0..a.max_used_count as usize {
        assert_eq!(a.block[i].id, b.block[i].id, "{} slot {} id", a.name, i);
        if a.block[i].id & DATA_ARRAY_KEY_MASK != 0 {
            assert_eq!(a.block[i].item, b.block[i].item, "{} slot {} item", a.name, i);
        }
    }
}

/// Structural equality over everything the codec round-trips.
pub(crate) fn assert_boards_match(a: &Board, b: &Board, compare_next_key: bool) {
    assert_eq!(a.paused, b.paused);
    assert_eq!(a.level, b.level);
    assert_eq!(a.background, b.background);
    assert_eq!(a.sun_money, b.sun_money);
    assert_eq!(a.num_waves, b.num_waves);
    assert_eq!(a.current_wave, b.current_wave);
    assert_eq!(a.main_counter, b.main_counter);
    assert_eq!(a.sun_count_down, b.sun_count_down);
    assert_eq!(a.board_rand_seed, b.board_rand_seed);
    assert_eq!(a.grid_square_type, b.grid_square_type);
    assert_eq!(a.grid_cel_look, b.grid_cel_look);
    assert_eq!(a.grid_cel_fog, b.grid_cel_fog);
    assert_eq!(a.plant_row, b.plant_row);
    assert_eq!(a.ice_timer, b.ice_timer);
    assert_eq!(a.ice_min_x, b.ice_min_x);
    assert_eq!(a.zombies_in_wave, b.zombies_in_wave);
    assert_eq!(a.zombie_allowed, b.zombie_allowed);
    assert_eq!(a.row_picking_array, b.row_picking_array);
    assert_eq!(a.help_displayed, b.help_displayed);
    assert_eq!(a.show_shovel, b.show_shovel);
    assert_eq!(a.progress_meter_width, b.progress_meter_width);
    assert_eq!(a.graves_cleared, b.graves_cleared);
    assert_eq!(a.coins_collected, b.coins_collected);

    assert_tables_match(&a.zombies, &b.zombies, compare_next_key);
    assert_tables_match(&a.plants, &b.plants, compare_next_key);
    assert_tables_match(&a.projectiles, &b.projectiles, compare_next_key);
    assert_tables_match(&a.coins, &b.coins, compare_next_key);
    assert_tables_match(&a.lawn_mowers, &b.lawn_mowers, compare_next_key);
    assert_tables_match(&a.grid_items, &b.grid_items, compare_next_key);
    assert_tables_match(&a.effects.particle_systems, &b.effects.particle_systems, compare_next_key);
    assert_tables_match(&a.effects.emitters, &b.effects.emitters, compare_next_key);
    assert_tables_match(&a.effects.particles, &b.effects.particles, compare_next_key);
    assert_tables_match(&a.effects.reanimations, &b.effects.reanimations, compare_next_key);
    assert_tables_match(&a.effects.trails, &b.effects.trails, compare_next_key);
    assert_tables_match(&a.effects.attachments, &b.effects.attachments, compare_next_key);

    assert_eq!(a.cursor_object, b.cursor_object);
    assert_eq!(a.cursor_preview, b.cursor_preview);
    assert_eq!(a.advice, b.advice);
    assert_eq!(a.seed_bank, b.seed_bank);
    assert_eq!(a.challenge, b.challenge);
    assert_eq!(a.music, b.music);
}
