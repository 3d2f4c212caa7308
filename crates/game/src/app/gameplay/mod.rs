//! Room-run rules: collision, movement, enemy pursuit, room transitions and the session
//! controller that ties them together each tick.

mod collision;
mod enemy;
mod movement;
mod render;
mod session;
mod spawns;
mod transition;

use engine::Vec2;

#[cfg(test)]
pub(crate) use collision::Rect;
pub(crate) use collision::Size;
pub(crate) use render::{Marker, RoomLayout, RoomRenderer, Screen};
pub(crate) use session::{GameSession, SessionPhase};
pub(crate) use spawns::RandomSpawns;
#[cfg(test)]
pub(crate) use spawns::SpawnSource;

pub(crate) const PLAYER_SIZE: Size = Size::new(20.0, 20.0);
pub(crate) const MARKER_SIZE: Size = Size::new(10.0, 10.0);
pub(crate) const ENEMY_SIZE: Size = MARKER_SIZE;
pub(crate) const LOOT_SIZE: Size = MARKER_SIZE;
/// Pixels per tick on each held axis.
pub(crate) const BASE_SPEED: f32 = 2.0;
pub(crate) const LOOT_POINTS: u32 = 50;
pub(crate) const PLAYER_SPAWN: Vec2 = Vec2::new(50.0, 50.0);
pub(crate) const ROOM_ENTRY_Y: f32 = 20.0;
