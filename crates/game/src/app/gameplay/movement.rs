use engine::{InputAction, InputSnapshot, Vec2};

use super::collision::Size;

/// Four held directions, for the player's keys and the enemy's synthetic ones alike.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct DirectionSet {
    pub(crate) up: bool,
    pub(crate) down: bool,
    pub(crate) left: bool,
    pub(crate) right: bool,
}

impl DirectionSet {
    pub(crate) fn from_input(input: &InputSnapshot) -> Self {
        Self {
            up: input.is_down(InputAction::MoveUp),
            down: input.is_down(InputAction::MoveDown),
            left: input.is_down(InputAction::MoveLeft),
            right: input.is_down(InputAction::MoveRight),
        }
    }

    fn axis(negative: bool, positive: bool) -> f32 {
        match (negative, positive) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Moves `speed` per held axis and clamps into `[0, area - size]`. Diagonals are not normalized.
/// Opposite keys on one axis cancel out, even against a wall.
pub(crate) fn integrate(
    position: Vec2,
    directions: DirectionSet,
    speed: f32,
    area: Size,
    size: Size,
) -> Vec2 {
    let max_x = (area.width - size.width).max(0.0);
    let max_y = (area.height - size.height).max(0.0);
    let dx = DirectionSet::axis(directions.left, directions.right) * speed;
    let dy = DirectionSet::axis(directions.up, directions.down) * speed;
    Vec2::new(
        (position.x + dx).clamp(0.0, max_x),
        (position.y + dy).clamp(0.0, max_y),
    )
}
