use engine::Vec2;

use crate::app::catalog::RoomDescriptor;

use super::collision::{door_rect, Rect};

/// Movable things the session asks the renderer to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Marker {
    Player,
    Enemy,
    Loot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Screen {
    Title,
    Loading,
    Playing,
    GameOver { score: u32 },
    Error { message: String },
}

/// Everything static about a freshly drawn room.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RoomLayout {
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) doors: Vec<Rect>,
}

impl RoomLayout {
    pub(crate) fn for_room(room: &RoomDescriptor) -> Self {
        Self {
            width: room.width,
            height: room.height,
            doors: room
                .doors
                .iter()
                .map(|door| door_rect(door, room.width))
                .collect(),
        }
    }
}

/// Output sink for a session. Drawing a room clears every marker and door of the last one.
pub(crate) trait RoomRenderer {
    fn draw_room(&mut self, layout: &RoomLayout);
    fn place(&mut self, marker: Marker, position: Vec2);
    fn remove(&mut self, marker: Marker);
    fn show_score(&mut self, score: u32);
    fn show_screen(&mut self, screen: Screen);
}
