mod overlay;
mod raster;
mod text;

pub(crate) use overlay::{draw_overlay, OverlayData};
pub(crate) use raster::{draw_filled_rect, draw_rect_outline};
pub(crate) use text::{draw_text, line_advance, text_width_px};
