use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture};
use winit::window::Window;

use crate::app::tools::{
    draw_filled_rect, draw_overlay, draw_rect_outline, draw_text, line_advance, text_width_px,
};
use crate::app::{Banner, Entity, OverlayData, RenderableKind, SceneWorld};

use super::{fit_play_area, PlayAreaTransform, Viewport};

const CLEAR_COLOR: [u8; 4] = [20, 22, 28, 255];
const PLAY_AREA_COLOR: [u8; 4] = [236, 236, 230, 255];
const PLAY_AREA_BORDER_COLOR: [u8; 4] = [12, 12, 14, 255];
const STATUS_TEXT_COLOR: [u8; 4] = [244, 248, 252, 255];
const STATUS_TEXT_SCALE: i32 = 2;
const STATUS_TEXT_GAP_PX: i32 = 8;
const BANNER_PANEL_BG_COLOR: [u8; 4] = [10, 12, 16, 230];
const BANNER_PANEL_BORDER_COLOR: [u8; 4] = [92, 106, 126, 255];
const BANNER_TITLE_COLOR: [u8; 4] = [255, 214, 90, 255];
const BANNER_LINE_COLOR: [u8; 4] = [222, 228, 236, 255];
const BANNER_TITLE_SCALE: i32 = 5;
const BANNER_LINE_SCALE: i32 = 2;
const BANNER_PADDING_PX: i32 = 24;

pub struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    viewport: Viewport,
}

impl Renderer {
    pub fn new(window: Arc<Window>) -> Result<Self, Error> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(Arc::clone(&window), size.width, size.height)?;
        Ok(Self {
            window,
            pixels,
            viewport: Viewport {
                width: size.width,
                height: size.height,
            },
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(Arc::clone(&self.window), width, height)?;
        self.viewport = Viewport { width, height };
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn build_pixels(
        window: Arc<Window>,
        width: u32,
        height: u32,
    ) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(width, height, window);
        Pixels::new(width, height, surface)
    }

    pub(crate) fn render_world(
        &mut self,
        world: &SceneWorld,
        overlay_data: Option<&OverlayData>,
    ) -> Result<(), Error> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Ok(());
        }

        let viewport = self.viewport;
        let frame = self.pixels.frame_mut();
        draw_world(frame, viewport, world);
        if let Some(data) = overlay_data {
            draw_overlay(frame, viewport.width, viewport.height, data);
        }

        self.pixels.render().map_err(|err| {
            tracing::error!(error = %err, "render_failed");
            err
        })
    }
}

/// Paints the whole frame: background, play area with its display list, status line, banner.
pub(crate) fn draw_world(frame: &mut [u8], viewport: Viewport, world: &SceneWorld) {
    for chunk in frame.chunks_exact_mut(4) {
        chunk.copy_from_slice(&CLEAR_COLOR);
    }

    let play_area = world
        .play_area()
        .filter(|_| world.play_area_visible())
        .map(|area| (area, fit_play_area(viewport, area)));

    if let Some((area, transform)) = play_area {
        let area_w = transform.length_px(area.width);
        let area_h = transform.length_px(area.height);
        draw_filled_rect(
            frame,
            viewport.width,
            viewport.height,
            transform.origin_x,
            transform.origin_y,
            area_w,
            area_h,
            PLAY_AREA_COLOR,
        );
        for entity in world.entities() {
            draw_entity(frame, viewport, &transform, entity);
        }
        draw_rect_outline(
            frame,
            viewport.width,
            viewport.height,
            transform.origin_x.saturating_sub(1),
            transform.origin_y.saturating_sub(1),
            area_w.saturating_add(2),
            area_h.saturating_add(2),
            PLAY_AREA_BORDER_COLOR,
        );
    }

    if let Some(text) = world.status_text() {
        let (x, y) = match play_area {
            Some((_, transform)) => (
                transform.origin_x,
                transform
                    .origin_y
                    .saturating_sub(STATUS_TEXT_GAP_PX + line_advance(STATUS_TEXT_SCALE)),
            ),
            None => (STATUS_TEXT_GAP_PX, STATUS_TEXT_GAP_PX),
        };
        draw_text(
            frame,
            viewport.width,
            viewport.height,
            x,
            y.max(0),
            text,
            STATUS_TEXT_SCALE,
            STATUS_TEXT_COLOR,
        );
    }

    if let Some(banner) = world.banner() {
        draw_banner(frame, viewport, banner);
    }
}

fn draw_entity(frame: &mut [u8], viewport: Viewport, transform: &PlayAreaTransform, entity: &Entity) {
    let (x, y) = transform.to_screen_px(entity.transform.position);
    let RenderableKind::Rect {
        width,
        height,
        color,
    } = entity.renderable.kind;
    draw_filled_rect(
        frame,
        viewport.width,
        viewport.height,
        x,
        y,
        transform.length_px(width).max(1),
        transform.length_px(height).max(1),
        color,
    );
}

fn draw_banner(frame: &mut [u8], viewport: Viewport, banner: &Banner) {
    let title_w = text_width_px(&banner.title, BANNER_TITLE_SCALE);
    let lines_w = banner
        .lines
        .iter()
        .map(|line| text_width_px(line, BANNER_LINE_SCALE))
        .max()
        .unwrap_or(0);
    let content_w = title_w.max(lines_w);
    let content_h = line_advance(BANNER_TITLE_SCALE)
        + banner.lines.len() as i32 * line_advance(BANNER_LINE_SCALE);

    let panel_w = content_w + BANNER_PADDING_PX * 2;
    let panel_h = content_h + BANNER_PADDING_PX * 2;
    let panel_left = (viewport.width as i32 - panel_w) / 2;
    let panel_top = (viewport.height as i32 - panel_h) / 2;
    draw_filled_rect(
        frame,
        viewport.width,
        viewport.height,
        panel_left,
        panel_top,
        panel_w,
        panel_h,
        BANNER_PANEL_BG_COLOR,
    );
    draw_rect_outline(
        frame,
        viewport.width,
        viewport.height,
        panel_left,
        panel_top,
        panel_w,
        panel_h,
        BANNER_PANEL_BORDER_COLOR,
    );

    let centre_x = viewport.width as i32 / 2;
    let mut y = panel_top + BANNER_PADDING_PX;
    draw_text(
        frame,
        viewport.width,
        viewport.height,
        centre_x - title_w / 2,
        y,
        &banner.title,
        BANNER_TITLE_SCALE,
        BANNER_TITLE_COLOR,
    );
    y += line_advance(BANNER_TITLE_SCALE);
    for line in &banner.lines {
        draw_text(
            frame,
            viewport.width,
            viewport.height,
            centre_x - text_width_px(line, BANNER_LINE_SCALE) / 2,
            y,
            line,
            BANNER_LINE_SCALE,
            BANNER_LINE_COLOR,
        );
        y += line_advance(BANNER_LINE_SCALE);
    }
}
