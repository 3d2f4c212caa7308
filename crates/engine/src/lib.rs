pub mod app;

pub use app::{
    fit_play_area, run_app, AppError, Banner, Entity, EntityId, InputAction, InputSnapshot,
    LoopConfig, LoopMetricsSnapshot, PlayArea, PlayAreaTransform, RenderableDesc, RenderableKind,
    Renderer, Scene, SceneCommand, SceneWorld, Transform, Vec2, Viewport, SLOW_FRAME_ENV_VAR,
};
