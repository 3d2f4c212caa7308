mod renderer;
mod transform;

pub use renderer::Renderer;
pub use transform::{fit_play_area, PlayAreaTransform, Viewport};
