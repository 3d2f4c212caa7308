//! Top-level game controller: title screen, catalog loading, play, game over.

use engine::{InputSnapshot, Scene, SceneCommand, SceneWorld};
use tracing::{info, warn};

use super::bootstrap::GameConfig;
use super::catalog::{CatalogError, PendingCatalog};
use super::gameplay::{GameSession, RandomSpawns, RoomRenderer, Screen, SessionPhase};
use super::stage::{StageEntities, StageRenderer};

enum Phase {
    Title,
    Loading(PendingCatalog),
    Playing(GameSession),
    GameOver(GameSession),
    Failed(CatalogError),
}

impl Phase {
    fn label(&self) -> &'static str {
        match self {
            Phase::Title => "title",
            Phase::Loading(_) => "loading",
            Phase::Playing(_) => "playing",
            Phase::GameOver(_) => "game_over",
            Phase::Failed(_) => "failed",
        }
    }

    fn session(&self) -> Option<&GameSession> {
        match self {
            Phase::Playing(session) | Phase::GameOver(session) => Some(session),
            _ => None,
        }
    }
}

pub(crate) struct RoomRunApp {
    config: GameConfig,
    phase: Phase,
    stage: StageEntities,
    runs_started: u32,
}

impl RoomRunApp {
    pub(crate) fn new(config: GameConfig) -> Self {
        Self {
            config,
            phase: Phase::Title,
            stage: StageEntities::default(),
            runs_started: 0,
        }
    }

    /// Clears the stage and kicks off a fresh catalog load.
    pub(crate) fn start(&mut self, world: &mut SceneWorld) {
        let mut stage = StageRenderer::new(world, &mut self.stage);
        stage.reset();
        stage.show_screen(Screen::Loading);

        self.runs_started = self.runs_started.saturating_add(1);
        let pending = PendingCatalog::spawn(self.config.catalog_source.clone());
        info!(
            run = self.runs_started,
            origin = pending.origin(),
            "run_starting"
        );
        self.phase = Phase::Loading(pending);
    }

    /// Abandons whatever is in flight; a pending load's result is discarded.
    pub(crate) fn restart(&mut self, world: &mut SceneWorld) {
        info!(from_phase = self.phase.label(), "restart_requested");
        self.phase = Phase::Title;
        self.start(world);
    }

    fn poll_catalog(&mut self, world: &mut SceneWorld) {
        let Phase::Loading(pending) = &self.phase else {
            return;
        };
        let Some(result) = pending.poll() else {
            return;
        };

        let mut stage = StageRenderer::new(world, &mut self.stage);
        self.phase = match result {
            Ok(catalog) => {
                info!(
                    origin = pending.origin(),
                    room_count = catalog.len(),
                    "catalog_loaded"
                );
                let spawns = Box::new(RandomSpawns::new(self.config.seed));
                Phase::Playing(GameSession::new(catalog, spawns, &mut stage))
            }
            Err(error) => {
                warn!(error = %error, "catalog_load_failed");
                stage.show_screen(Screen::Error {
                    message: error.to_string(),
                });
                Phase::Failed(error)
            }
        };
    }

    fn tick_session(&mut self, dt_seconds: f32, input: &InputSnapshot, world: &mut SceneWorld) {
        let Phase::Playing(session) = &mut self.phase else {
            return;
        };
        let mut stage = StageRenderer::new(world, &mut self.stage);
        if session.tick(dt_seconds, input, &mut stage) == SessionPhase::Running {
            return;
        }

        info!(
            score = session.score(),
            rooms_entered = session.rooms_entered(),
            "run_ended"
        );
        if let Phase::Playing(session) = std::mem::replace(&mut self.phase, Phase::Title) {
            self.phase = Phase::GameOver(session);
        }
    }
}

impl Scene for RoomRunApp {
    fn load(&mut self, world: &mut SceneWorld) {
        self.phase = Phase::Title;
        let mut stage = StageRenderer::new(world, &mut self.stage);
        stage.reset();
        stage.show_screen(Screen::Title);
        info!("title_screen");
    }

    fn update(
        &mut self,
        fixed_dt_seconds: f32,
        input: &InputSnapshot,
        world: &mut SceneWorld,
    ) -> SceneCommand {
        if input.quit_requested() {
            return SceneCommand::Quit;
        }

        match self.phase {
            Phase::Title => {
                if input.start_pressed() {
                    self.start(world);
                }
            }
            _ if input.restart_pressed() => self.restart(world),
            Phase::Loading(_) => self.poll_catalog(world),
            Phase::Playing(_) => self.tick_session(fixed_dt_seconds, input, world),
            Phase::GameOver(_) | Phase::Failed(_) => {}
        }

        SceneCommand::None
    }

    fn unload(&mut self, world: &mut SceneWorld) {
        self.phase = Phase::Title;
        StageRenderer::new(world, &mut self.stage).reset();
    }

    fn debug_title(&self) -> Option<String> {
        Some(match self.phase.session() {
            Some(session) => format!("Room Run - Score: {}", session.score()),
            None => "Room Run".to_string(),
        })
    }

    fn debug_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Phase: {}", self.phase.label())];
        match &self.phase {
            Phase::Loading(pending) => lines.push(format!("Source: {}", pending.origin())),
            Phase::Failed(error) => lines.push(format!("Error: {error}")),
            _ => {}
        }
        if let Some(session) = self.phase.session() {
            let player = session.state().player;
            lines.push(format!(
                "Room: {} / {}",
                session.current_room_index(),
                session.rooms_entered()
            ));
            lines.push(format!("Score: {}", session.score()));
            lines.push(format!("Player: {:.1}, {:.1}", player.x, player.y));
            match session.loot_position() {
                Some(loot) => lines.push(format!("Loot: {:.1}, {:.1}", loot.x, loot.y)),
                None => lines.push("Loot: collected".to_string()),
            }
            lines.push(format!("Doors: {}", self.stage.door_count()));
            if session.is_game_over() {
                lines.push("Caught".to_string());
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::time::{Duration, Instant};

    use engine::InputAction;

    use super::*;
    use crate::app::catalog::CatalogSource;
    use crate::app::gameplay::Marker;
    use crate::app::stage::GAME_TITLE;

    const DT: f32 = 1.0 / 60.0;

    fn app_with(source: CatalogSource) -> (RoomRunApp, SceneWorld) {
        let mut app = RoomRunApp::new(GameConfig {
            catalog_source: source,
            seed: Some(11),
        });
        let mut world = SceneWorld::default();
        app.load(&mut world);
        (app, world)
    }

    fn start() -> InputSnapshot {
        InputSnapshot::empty().with_start_pressed(true)
    }

    fn restart() -> InputSnapshot {
        InputSnapshot::empty().with_restart_pressed(true)
    }

    fn pump_until_loaded(app: &mut RoomRunApp, world: &mut SceneWorld) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while matches!(app.phase, Phase::Loading(_)) {
            assert!(Instant::now() < deadline, "catalog load timed out");
            app.update(DT, &InputSnapshot::empty(), world);
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn load_shows_title_screen() {
        let (app, world) = app_with(CatalogSource::Embedded);

        assert_eq!(app.phase.label(), "title");
        assert_eq!(world.banner().map(|b| b.title.as_str()), Some(GAME_TITLE));
        assert!(!world.play_area_visible());
        assert_eq!(app.debug_title(), Some("Room Run".to_string()));
    }

    #[test]
    fn title_ignores_restart_and_movement() {
        let (mut app, mut world) = app_with(CatalogSource::Embedded);

        app.update(DT, &restart(), &mut world);
        app.update(
            DT,
            &InputSnapshot::empty().with_action_down(InputAction::MoveDown, true),
            &mut world,
        );

        assert_eq!(app.phase.label(), "title");
    }

    #[test]
    fn start_loads_embedded_catalog_into_play() {
        let (mut app, mut world) = app_with(CatalogSource::Embedded);

        app.update(DT, &start(), &mut world);
        assert_eq!(app.phase.label(), "loading");
        assert_eq!(world.banner().map(|b| b.title.as_str()), Some("LOADING"));

        pump_until_loaded(&mut app, &mut world);

        assert_eq!(app.phase.label(), "playing");
        assert!(world.banner().is_none());
        assert!(world.play_area_visible());
        assert!(app.stage.marker(Marker::Player).is_some());
        assert_eq!(app.debug_title(), Some("Room Run - Score: 0".to_string()));
        assert!(app
            .debug_lines()
            .iter()
            .any(|line| line.starts_with("Room: 0")));
    }

    #[test]
    fn failed_load_shows_error_until_restart() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("rooms.json");
        let mut file = std::fs::File::create(&path).expect("create");
        file.write_all(br#"[{"width": 0, "height": 100, "doors": [], "enemy": false}]"#)
            .expect("write");

        let (mut app, mut world) = app_with(CatalogSource::File(path.clone()));
        app.update(DT, &start(), &mut world);
        pump_until_loaded(&mut app, &mut world);

        assert_eq!(app.phase.label(), "failed");
        assert_eq!(world.banner().map(|b| b.title.as_str()), Some("ERROR"));
        app.update(DT, &start(), &mut world);
        assert_eq!(app.phase.label(), "failed");

        std::fs::write(&path, br#"[{"width": 300, "height": 200, "doors": [], "enemy": false}]"#)
            .expect("rewrite");
        app.update(DT, &restart(), &mut world);
        assert_eq!(app.phase.label(), "loading");
        pump_until_loaded(&mut app, &mut world);
        assert_eq!(app.phase.label(), "playing");
        assert_eq!(app.runs_started, 2);
    }

    #[test]
    fn restart_mid_run_resets_the_session() {
        let (mut app, mut world) = app_with(CatalogSource::Embedded);
        app.update(DT, &start(), &mut world);
        pump_until_loaded(&mut app, &mut world);

        let right = InputSnapshot::empty().with_action_down(InputAction::MoveRight, true);
        for _ in 0..5 {
            app.update(DT, &right, &mut world);
        }

        app.update(DT, &restart(), &mut world);
        assert_eq!(app.phase.label(), "loading");
        assert!(app.stage.marker(Marker::Player).is_none());
        assert_eq!(world.entity_count(), 0);

        pump_until_loaded(&mut app, &mut world);
        let session = app.phase.session().expect("fresh session");
        assert_eq!(session.score(), 0);
        assert_eq!(session.current_room_index(), 0);
    }

    #[test]
    fn enemy_contact_ends_the_run_until_restart() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("rooms.json");
        // Player fills the room, so the enemy spawns on top of it.
        std::fs::write(
            &path,
            br#"[{"width": 20, "height": 20, "doors": [], "enemy": true}]"#,
        )
        .expect("write");

        let (mut app, mut world) = app_with(CatalogSource::File(path));
        app.update(DT, &start(), &mut world);
        pump_until_loaded(&mut app, &mut world);
        assert_eq!(app.phase.label(), "playing");

        app.update(DT, &InputSnapshot::empty(), &mut world);
        assert_eq!(app.phase.label(), "game_over");
        assert_eq!(world.banner().map(|b| b.title.as_str()), Some("GAME OVER"));
        assert!(!world.play_area_visible());

        let session = app.phase.session().expect("finished session");
        assert!(session.is_game_over());
        let score = session.score();
        let frozen = session.state().clone();

        let held = InputSnapshot::empty()
            .with_action_down(InputAction::MoveRight, true)
            .with_action_down(InputAction::MoveDown, true)
            .with_start_pressed(true);
        for _ in 0..10 {
            assert_eq!(app.update(DT, &held, &mut world), SceneCommand::None);
        }
        assert_eq!(app.phase.label(), "game_over");
        let session = app.phase.session().expect("finished session");
        assert_eq!(session.score(), score);
        assert_eq!(session.state(), &frozen);
        assert_eq!(app.debug_title(), Some(format!("Room Run - Score: {score}")));

        app.update(DT, &restart(), &mut world);
        assert_eq!(app.phase.label(), "loading");
        pump_until_loaded(&mut app, &mut world);
        assert_eq!(app.phase.label(), "playing");
        let fresh = app.phase.session().expect("fresh session");
        assert_eq!(fresh.score(), 0);
        assert!(!fresh.is_game_over());
        assert_eq!(app.runs_started, 2);
    }

    #[test]
    fn quit_wins_over_everything() {
        let (mut app, mut world) = app_with(CatalogSource::Embedded);
        let input = start().with_quit_requested(true);

        assert_eq!(app.update(DT, &input, &mut world), SceneCommand::Quit);
        assert_eq!(app.phase.label(), "title");
    }

    #[test]
    fn unload_clears_the_stage() {
        let (mut app, mut world) = app_with(CatalogSource::Embedded);
        app.update(DT, &start(), &mut world);
        pump_until_loaded(&mut app, &mut world);

        app.unload(&mut world);

        assert_eq!(world.entity_count(), 0);
        assert!(world.banner().is_none());
        assert!(app.phase.session().is_none());
    }
}
