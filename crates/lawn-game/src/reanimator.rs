// reanimator.rs — skeletal animation instances
//
// A reanimation references its definition by small-integer type id; the
// definition's track list dictates how many track instances the
// instance carries.

use crate::board::{Color, Matrix3};
use crate::resources::ImageId;

pub const REANIM_NONE: i32 = -1;
pub const NUM_REANIMS: i32 = 96;

pub const MAX_REANIMATIONS: u32 = 4096;

pub const REANIM_LOOP: i32 = 0;
pub const REANIM_PLAY_ONCE: i32 = 1;
pub const REANIM_PLAY_ONCE_AND_HOLD: i32 = 2;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReanimatorTrackDef {
    pub name: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReanimatorDefinition {
    pub tracks: Vec<ReanimatorTrackDef>,
    pub fps: f32,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReanimatorTransform {
    pub trans_x: f32,
    pub trans_y: f32,
    pub skew_x: f32,
    pub skew_y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub frame: f32,
    pub alpha: f32,
    pub image: ImageId,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReanimatorTrackInstance {
    pub blend_counter: i32,
    pub blend_time: i32,
    pub blend_transform: ReanimatorTransform,
    pub shake_override: f32,
    pub shake_x: f32,
    pub shake_y: f32,
    pub attachment_id: u32,
    pub image_override: ImageId,
    pub render_group: i32,
    pub track_color: Color,
    pub ignore_clip_rect: bool,
    pub truncate_disappearing_frames: bool,
    pub ignore_color_override: bool,
    pub ignore_extra_additive_color: bool,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Reanimation {
    /// Definition type id; `REANIM_NONE` when unset.
    pub reanimation_type: i32,
    pub anim_time: f32,
    pub anim_rate: f32,
    pub loop_type: i32,
    pub dead: bool,
    pub frame_start: i32,
    pub frame_count: i32,
    pub frame_base_pose: i32,
    pub overlay_matrix: Matrix3,
    pub color_override: Color,
    pub loop_count: i32,
    pub is_attachment: bool,
    pub render_order: i32,
    pub extra_additive_color: Color,
    pub enable_extra_additive_draw: bool,
    pub extra_overlay_color: Color,
    pub enable_extra_overlay_draw: bool,
    pub last_frame_time: f32,
    pub filter_effect: i32,
    /// One instance per definition track; sized on load from the
    /// definition's track count.
    pub track_instances: Vec<ReanimatorTrackInstance>,
}

impl Reanimation {
    /// Override the image drawn for a named track. No-op when the
    /// definition has no such track or the instance storage is absent.
    pub fn set_image_override(
        &mut self,
        definition: &ReanimatorDefinition,
        track_name: &str,
        image: ImageId,
    ) {
        if let Some(index) = definition.tracks.iter().position(|t| t.name == track_name) {
            if let Some(instance) = self.track_instances.get_mut(index) {
                instance.image_override = image;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_image_override_by_track_name() {
        let definition = ReanimatorDefinition {
            tracks: vec![
                ReanimatorTrackDef { name: "anim_body".to_string() },
                ReanimatorTrackDef { name: "anim_head1".to_string() },
            ],
            fps: 12.0,
        };
        let mut reanim = Reanimation {
            track_instances: vec![ReanimatorTrackInstance::default(); 2],
            ..Default::default()
        };
        reanim.set_image_override(&definition, "anim_head1", 7);
        assert_eq!(reanim.track_instances[0].image_override, 0);
        assert_eq!(reanim.track_instances[1].image_override, 7);
        // Unknown track name is ignored.
        reanim.set_image_override(&definition, "missing", 9);
        assert_eq!(reanim.track_instances[1].image_override, 7);
    }
}
