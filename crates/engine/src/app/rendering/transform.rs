use crate::app::{PlayArea, Vec2};

pub const MAX_PLAY_AREA_SCALE: i32 = 3;
pub const PLAY_AREA_MARGIN_PX: i32 = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Maps play-area pixels (origin top-left, y down) onto the window framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayAreaTransform {
    pub origin_x: i32,
    pub origin_y: i32,
    pub scale: i32,
}

impl PlayAreaTransform {
    pub fn to_screen_px(&self, point: Vec2) -> (i32, i32) {
        (
            self.origin_x.saturating_add(self.length_px(point.x)),
            self.origin_y.saturating_add(self.length_px(point.y)),
        )
    }

    pub fn length_px(&self, length: f32) -> i32 {
        (length * self.scale as f32).round() as i32
    }
}

/// Largest integer scale that keeps the area inside the viewport margins, centred.
/// Areas wider than `i32::MAX` pixels saturate instead of wrapping.
pub fn fit_play_area(viewport: Viewport, area: PlayArea) -> PlayAreaTransform {
    let available_w = viewport.width as i32 - PLAY_AREA_MARGIN_PX * 2;
    let available_h = viewport.height as i32 - PLAY_AREA_MARGIN_PX * 2;
    let area_w = area.width.max(0.0).ceil() as i32;
    let area_h = area.height.max(0.0).ceil() as i32;

    let mut scale = 1;
    for candidate in (1..=MAX_PLAY_AREA_SCALE).rev() {
        if area_w.saturating_mul(candidate) <= available_w
            && area_h.saturating_mul(candidate) <= available_h
        {
            scale = candidate;
            break;
        }
    }

    PlayAreaTransform {
        origin_x: (viewport.width as i32).saturating_sub(area_w.saturating_mul(scale)) / 2,
        origin_y: (viewport.height as i32).saturating_sub(area_h.saturating_mul(scale)) / 2,
        scale,
    }
}
