use engine::Vec2;

use super::movement::DirectionSet;
use super::BASE_SPEED;

/// Greedy pursuit: step toward the player on each axis, nothing on a tie.
pub(crate) fn enemy_intent(player: Vec2, enemy: Vec2) -> DirectionSet {
    DirectionSet {
        up: player.y < enemy.y,
        down: player.y > enemy.y,
        left: player.x < enemy.x,
        right: player.x > enemy.x,
    }
}

/// Per-axis enemy speed; grows slowly with score.
pub(crate) fn enemy_speed(score: u32) -> f32 {
    BASE_SPEED - 0.5 + score as f32 / 10_000.0
}
