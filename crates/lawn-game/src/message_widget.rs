// message_widget.rs — the advice banner shown above the lawn

pub const MESSAGE_STYLE_HINT_FAST: i32 = 0;
pub const MESSAGE_STYLE_HINT_STAY: i32 = 1;
pub const MESSAGE_STYLE_BIG_MIDDLE: i32 = 2;
pub const MESSAGE_STYLE_BIG_MIDDLE_FAST: i32 = 3;
pub const MESSAGE_STYLE_HOUSE_NAME: i32 = 4;
pub const MESSAGE_STYLE_HINT_LONG: i32 = 5;
pub const MESSAGE_STYLE_SLOT_MACHINE: i32 = 6;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct MessageWidget {
    pub label: String,
    pub display_time: i32,
    pub duration: i32,
    pub message_style: i32,
    pub reanim_type: i32,
    pub slide_off_time: i32,
    pub label_next: String,
    pub message_style_next: i32,
}
