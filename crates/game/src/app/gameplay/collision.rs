use engine::Vec2;

use crate::app::catalog::Door;

const SIDE_DOOR_SIZE: Size = Size::new(10.0, 25.0);
const FLAT_DOOR_SIZE: Size = Size::new(25.0, 10.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Size {
    pub(crate) width: f32,
    pub(crate) height: f32,
}

impl Size {
    pub(crate) const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned box in room-local pixels; `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Rect {
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) width: f32,
    pub(crate) height: f32,
}

impl Rect {
    pub(crate) const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub(crate) const fn at(position: Vec2, size: Size) -> Self {
        Self::new(position.x, position.y, size.width, size.height)
    }

    pub(crate) fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub(crate) fn right(&self) -> f32 {
        self.x + self.width
    }

    pub(crate) fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Closed-interval overlap: touching edges count. Absent boxes never overlap.
pub(crate) fn overlaps(a: Option<&Rect>, b: Option<&Rect>) -> bool {
    let (Some(a), Some(b)) = (a, b) else {
        return false;
    };
    !(a.right() < b.x || a.x > b.right() || a.bottom() < b.y || a.y > b.bottom())
}

/// Box drawn for a door, centred on the door point.
pub(crate) fn door_rect(door: &Door, room_width: f32) -> Rect {
    let size = if door.is_on_side_wall(room_width) {
        SIDE_DOOR_SIZE
    } else {
        FLAT_DOOR_SIZE
    };
    Rect::new(
        door.x - size.width / 2.0,
        door.y - size.height / 2.0,
        size.width,
        size.height,
    )
}
