mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod scene;
mod tools;

pub use input::InputAction;
pub use loop_runner::{run_app, AppError, LoopConfig, SLOW_FRAME_ENV_VAR};
pub use metrics::LoopMetricsSnapshot;
pub use rendering::{fit_play_area, PlayAreaTransform, Renderer, Viewport};
pub use scene::{
    Banner, Entity, EntityId, InputSnapshot, PlayArea, RenderableDesc, RenderableKind, Scene,
    SceneCommand, SceneWorld, Transform, Vec2,
};
pub(crate) use tools::OverlayData;
