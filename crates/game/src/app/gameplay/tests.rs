use std::collections::{HashMap, VecDeque};

use super::*;
use crate::app::catalog::{CatalogSource, Door, RoomCatalog, RoomDescriptor};
use engine::{InputAction, InputSnapshot, Vec2};

const DT: f32 = 1.0 / 60.0;

/// Hands out pre-scripted targets and positions; falls back to the far corner.
struct ScriptedSpawns {
    targets: VecDeque<usize>,
    positions: VecDeque<Vec2>,
}

impl ScriptedSpawns {
    fn new(targets: &[usize], positions: &[Vec2]) -> Box<Self> {
        Box::new(Self {
            targets: targets.iter().copied().collect(),
            positions: positions.iter().copied().collect(),
        })
    }
}

impl SpawnSource for ScriptedSpawns {
    fn transition_target(&mut self, room_count: usize) -> usize {
        self.targets.pop_front().unwrap_or(room_count - 1)
    }

    fn position_within(&mut self, room: &RoomDescriptor) -> Vec2 {
        self.positions
            .pop_front()
            .unwrap_or(Vec2::new(room.width - 10.0, room.height - 10.0))
    }
}

#[derive(Default)]
struct RecordingRenderer {
    layout: Option<RoomLayout>,
    rooms_drawn: u32,
    markers: HashMap<Marker, Vec2>,
    removed: Vec<Marker>,
    score: Option<u32>,
    screens: Vec<Screen>,
}

impl RoomRenderer for RecordingRenderer {
    fn draw_room(&mut self, layout: &RoomLayout) {
        self.layout = Some(layout.clone());
        self.rooms_drawn += 1;
        self.markers.clear();
    }

    fn place(&mut self, marker: Marker, position: Vec2) {
        self.markers.insert(marker, position);
    }

    fn remove(&mut self, marker: Marker) {
        self.markers.remove(&marker);
        self.removed.push(marker);
    }

    fn show_score(&mut self, score: u32) {
        self.score = Some(score);
    }

    fn show_screen(&mut self, screen: Screen) {
        self.screens.push(screen);
    }
}

fn room(width: f32, height: f32, doors: &[(f32, f32)], has_enemy: bool) -> RoomDescriptor {
    RoomDescriptor {
        width,
        height,
        doors: doors.iter().map(|&(x, y)| Door { x, y }).collect(),
        has_enemy,
    }
}

fn catalog(rooms: Vec<RoomDescriptor>) -> RoomCatalog {
    RoomCatalog::from_rooms(rooms).expect("non-empty catalog")
}

fn held(actions: &[InputAction]) -> InputSnapshot {
    actions
        .iter()
        .fold(InputSnapshot::empty(), |snapshot, action| {
            snapshot.with_action_down(*action, true)
        })
}

#[test]
fn new_session_draws_start_room_at_entry_point() {
    let catalog = CatalogSource::Embedded.load().expect("embedded catalog");
    let mut renderer = RecordingRenderer::default();
    let session = GameSession::new(
        catalog,
        ScriptedSpawns::new(&[], &[Vec2::new(20.0, 120.0)]),
        &mut renderer,
    );

    assert_eq!(session.current_room_index(), 0);
    assert_eq!(session.score(), 0);
    assert!(!session.is_game_over());
    assert_eq!(session.state().enemy, None);
    assert_eq!(session.state().player, Vec2::new(75.0, 0.0));
    assert_eq!(session.loot_position(), Some(Vec2::new(20.0, 120.0)));

    let layout = renderer.layout.as_ref().expect("room drawn");
    assert_eq!((layout.width, layout.height), (150.0, 150.0));
    assert_eq!(layout.doors.len(), 3);
    assert_eq!(renderer.markers.get(&Marker::Player), Some(&Vec2::new(75.0, 0.0)));
    assert_eq!(renderer.markers.get(&Marker::Loot), Some(&Vec2::new(20.0, 120.0)));
    assert!(!renderer.markers.contains_key(&Marker::Enemy));
    assert_eq!(renderer.screens, vec![Screen::Playing]);
    assert_eq!(renderer.score, Some(0));
}

#[test]
fn player_moves_two_pixels_per_held_axis_and_stays_in_room() {
    let mut renderer = RecordingRenderer::default();
    let mut session = GameSession::new(
        catalog(vec![room(150.0, 150.0, &[], false)]),
        ScriptedSpawns::new(&[], &[Vec2::new(0.0, 140.0)]),
        &mut renderer,
    );

    session.tick(DT, &held(&[InputAction::MoveRight]), &mut renderer);
    assert_eq!(session.state().player, Vec2::new(77.0, 0.0));

    for _ in 0..200 {
        session.tick(
            DT,
            &held(&[InputAction::MoveRight, InputAction::MoveUp]),
            &mut renderer,
        );
        let player = session.state().player;
        assert!((0.0..=130.0).contains(&player.x), "{player:?}");
        assert!((0.0..=130.0).contains(&player.y), "{player:?}");
    }
    assert_eq!(session.state().player, Vec2::new(130.0, 0.0));
    assert_eq!(renderer.markers.get(&Marker::Player), Some(&Vec2::new(130.0, 0.0)));
}

#[test]
fn loot_adds_fifty_once_per_room_visit() {
    let mut renderer = RecordingRenderer::default();
    let mut session = GameSession::new(
        catalog(vec![room(150.0, 150.0, &[], false)]),
        ScriptedSpawns::new(&[], &[Vec2::new(80.0, 21.0)]),
        &mut renderer,
    );

    session.tick(DT, &InputSnapshot::empty(), &mut renderer);
    assert_eq!(session.score(), 0);

    let down = held(&[InputAction::MoveDown]);
    session.tick(DT, &down, &mut renderer);
    assert_eq!(session.score(), 50);
    assert_eq!(session.loot_position(), None);
    assert_eq!(renderer.removed, vec![Marker::Loot]);
    assert_eq!(renderer.score, Some(50));

    for _ in 0..10 {
        session.tick(DT, &down, &mut renderer);
    }
    assert_eq!(session.score(), 50);
}

#[test]
fn enemy_chases_player_until_game_over() {
    let mut renderer = RecordingRenderer::default();
    let mut session = GameSession::new(
        catalog(vec![room(150.0, 150.0, &[], true)]),
        ScriptedSpawns::new(&[], &[Vec2::new(0.0, 140.0), Vec2::new(130.0, 130.0)]),
        &mut renderer,
    );
    assert_eq!(session.state().enemy, Some(Vec2::new(130.0, 130.0)));

    session.tick(DT, &InputSnapshot::empty(), &mut renderer);
    assert_eq!(session.state().enemy, Some(Vec2::new(128.5, 128.5)));

    let mut ticks = 1;
    while session.tick(DT, &InputSnapshot::empty(), &mut renderer) == SessionPhase::Running {
        ticks += 1;
        assert!(ticks < 200, "enemy never reached the player");
    }

    assert!(session.is_game_over());
    assert_eq!(renderer.screens.last(), Some(&Screen::GameOver { score: 0 }));
}

#[test]
fn game_over_is_terminal() {
    let mut renderer = RecordingRenderer::default();
    let mut session = GameSession::new(
        catalog(vec![room(150.0, 150.0, &[], true)]),
        ScriptedSpawns::new(&[], &[Vec2::new(0.0, 140.0), Vec2::new(80.0, 5.0)]),
        &mut renderer,
    );

    assert_eq!(
        session.tick(DT, &InputSnapshot::empty(), &mut renderer),
        SessionPhase::GameOver
    );
    let frozen = session.state().clone();
    let screens = renderer.screens.len();

    for _ in 0..30 {
        let phase = session.tick(
            DT,
            &held(&[InputAction::MoveDown, InputAction::MoveLeft]),
            &mut renderer,
        );
        assert_eq!(phase, SessionPhase::GameOver);
    }
    assert_eq!(session.state(), &frozen);
    assert_eq!(renderer.screens.len(), screens);
}

#[test]
fn walking_into_the_door_enters_the_second_room() {
    let rooms = vec![
        room(150.0, 150.0, &[(0.0, 75.0)], false),
        room(200.0, 200.0, &[(200.0, 100.0)], true),
    ];
    let mut renderer = RecordingRenderer::default();
    let mut session = GameSession::new(
        catalog(rooms),
        ScriptedSpawns::new(
            &[1],
            &[
                Vec2::new(130.0, 130.0),
                Vec2::new(10.0, 180.0),
                Vec2::new(180.0, 180.0),
            ],
        ),
        &mut renderer,
    );

    let walk = held(&[InputAction::MoveLeft, InputAction::MoveDown]);
    let mut ticks = 0;
    while session.current_room_index() == 0 {
        session.tick(DT, &walk, &mut renderer);
        ticks += 1;
        assert!(ticks < 60, "player never reached the door");
    }

    assert_eq!(session.current_room(), &catalog_room_two());
    assert_eq!(session.score(), 0);
    assert_eq!(session.state().enemy, Some(Vec2::new(180.0, 180.0)));
    assert!(renderer.markers.contains_key(&Marker::Enemy));
    assert_eq!(renderer.layout.as_ref().map(|layout| layout.width), Some(200.0));
    assert_eq!(renderer.rooms_drawn, 2);

    session.tick(DT, &InputSnapshot::empty(), &mut renderer);
    assert_eq!(session.state().player, Vec2::new(100.0, 20.0));
    assert_eq!(session.current_room_index(), 1);
    assert_eq!(session.rooms_entered(), 1);
}

fn catalog_room_two() -> RoomDescriptor {
    room(200.0, 200.0, &[(200.0, 100.0)], true)
}

#[test]
fn only_the_first_touched_door_triggers() {
    let rooms = vec![
        room(150.0, 150.0, &[(75.0, 30.0), (80.0, 30.0)], false),
        room(150.0, 150.0, &[], false),
        room(150.0, 150.0, &[], false),
    ];
    let mut renderer = RecordingRenderer::default();
    let mut session = GameSession::new(
        catalog(rooms),
        ScriptedSpawns::new(&[1, 2], &[Vec2::new(0.0, 140.0)]),
        &mut renderer,
    );

    let down = held(&[InputAction::MoveDown]);
    while session.current_room_index() == 0 {
        session.tick(DT, &down, &mut renderer);
    }
    assert_eq!(session.current_room_index(), 1);
    assert_eq!(session.rooms_entered(), 1);
    assert_eq!(session.state().player, Vec2::new(75.0, 0.0));
}

#[test]
fn door_transitions_never_return_to_the_start_room() {
    let rooms = (0..4)
        .map(|_| room(150.0, 150.0, &[(75.0, 30.0)], false))
        .collect();
    let mut renderer = RecordingRenderer::default();
    let mut session = GameSession::new(catalog(rooms), Box::new(RandomSpawns::new(Some(3))), &mut renderer);

    let down = held(&[InputAction::MoveDown]);
    let mut left_start = false;
    for _ in 0..300 {
        session.tick(DT, &down, &mut renderer);
        if session.rooms_entered() > 0 {
            left_start = true;
            assert_ne!(session.current_room_index(), 0);
        }
    }
    assert!(left_start);
    assert!(session.rooms_entered() > 50, "{}", session.rooms_entered());
    assert_eq!(session.score() % LOOT_POINTS, 0);
}

#[test]
fn single_room_catalog_redraws_the_start_room() {
    let mut renderer = RecordingRenderer::default();
    let mut session = GameSession::new(
        catalog(vec![room(150.0, 150.0, &[(75.0, 30.0)], false)]),
        ScriptedSpawns::new(&[], &[Vec2::new(0.0, 140.0), Vec2::new(140.0, 0.0)]),
        &mut renderer,
    );

    let down = held(&[InputAction::MoveDown]);
    while session.rooms_entered() == 0 {
        session.tick(DT, &down, &mut renderer);
    }
    assert_eq!(session.current_room_index(), 0);
    assert_eq!(session.loot_position(), Some(Vec2::new(140.0, 0.0)));
    assert_eq!(renderer.rooms_drawn, 2);
}

#[test]
fn room_entry_does_not_change_score() {
    let rooms = vec![
        room(150.0, 150.0, &[(0.0, 75.0)], false),
        room(150.0, 150.0, &[], false),
    ];
    let mut renderer = RecordingRenderer::default();
    let mut session = GameSession::new(
        catalog(rooms),
        ScriptedSpawns::new(&[1], &[Vec2::new(130.0, 130.0), Vec2::new(0.0, 140.0)]),
        &mut renderer,
    );

    let walk = held(&[InputAction::MoveLeft, InputAction::MoveDown]);
    while session.rooms_entered() == 0 {
        session.tick(DT, &walk, &mut renderer);
    }
    assert_eq!(session.score(), 0);
    assert_eq!(renderer.score, Some(0));
}
