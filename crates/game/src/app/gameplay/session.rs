use engine::{InputSnapshot, Vec2};
use tracing::{debug, info, warn};

use crate::app::catalog::{RoomCatalog, RoomDescriptor};

use super::collision::{overlaps, Rect, Size};
use super::enemy::{enemy_intent, enemy_speed};
use super::movement::{integrate, DirectionSet};
use super::render::{Marker, RoomLayout, RoomRenderer, Screen};
use super::spawns::SpawnSource;
use super::transition::{RoomTransition, TRANSITION_DURATION};
use super::{
    BASE_SPEED, ENEMY_SIZE, LOOT_POINTS, LOOT_SIZE, PLAYER_SIZE, PLAYER_SPAWN, ROOM_ENTRY_Y,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SessionPhase {
    Running,
    GameOver,
}

/// Positions are top-left corners in room-local pixels.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EntityState {
    pub(crate) player: Vec2,
    pub(crate) enemy: Option<Vec2>,
    pub(crate) score: u32,
    pub(crate) game_over: bool,
}

/// One run through the catalog, from the start room until the enemy catches the player.
pub(crate) struct GameSession {
    catalog: RoomCatalog,
    spawns: Box<dyn SpawnSource>,
    room_index: usize,
    state: EntityState,
    loot: Option<Vec2>,
    door_rects: Vec<Rect>,
    transition: Option<RoomTransition>,
    rooms_entered: u32,
}

impl GameSession {
    /// Draws room 0 and starts the entry move to the middle of its top edge.
    pub(crate) fn new(
        catalog: RoomCatalog,
        spawns: Box<dyn SpawnSource>,
        renderer: &mut dyn RoomRenderer,
    ) -> Self {
        if catalog.len() == 1 {
            warn!("single_room_catalog; doors lead back to the start room");
        }
        let mut session = Self {
            catalog,
            spawns,
            room_index: 0,
            state: EntityState {
                player: PLAYER_SPAWN,
                enemy: None,
                score: 0,
                game_over: false,
            },
            loot: None,
            door_rects: Vec::new(),
            transition: None,
            rooms_entered: 0,
        };

        renderer.show_screen(Screen::Playing);
        session.draw_current_room(renderer);
        let entry = Vec2::new(session.current_room().width / 2.0, 0.0);
        session.begin_transition(entry);
        session.publish(renderer);
        info!(
            room_count = session.catalog.len(),
            has_enemy = session.state.enemy.is_some(),
            "session_started"
        );
        session
    }

    pub(crate) fn tick(
        &mut self,
        dt_seconds: f32,
        input: &InputSnapshot,
        renderer: &mut dyn RoomRenderer,
    ) -> SessionPhase {
        if self.state.game_over {
            return SessionPhase::GameOver;
        }

        self.advance_transition(dt_seconds);

        let area = self.room_area();
        self.state.player = integrate(
            self.state.player,
            DirectionSet::from_input(input),
            BASE_SPEED,
            area,
            PLAYER_SIZE,
        );
        if let Some(enemy) = self.state.enemy {
            let intent = enemy_intent(self.state.player, enemy);
            self.state.enemy = Some(integrate(
                enemy,
                intent,
                enemy_speed(self.state.score),
                area,
                ENEMY_SIZE,
            ));
        }
        self.publish(renderer);

        self.check_doors(renderer);
        self.check_loot(renderer);
        self.check_enemy(renderer)
    }

    pub(crate) fn is_game_over(&self) -> bool {
        self.state.game_over
    }

    pub(crate) fn score(&self) -> u32 {
        self.state.score
    }

    pub(crate) fn current_room_index(&self) -> usize {
        self.room_index
    }

    pub(crate) fn current_room(&self) -> &RoomDescriptor {
        self.catalog
            .get(self.room_index)
            .unwrap_or_else(|| self.catalog.start_room())
    }

    pub(crate) fn state(&self) -> &EntityState {
        &self.state
    }

    pub(crate) fn loot_position(&self) -> Option<Vec2> {
        self.loot
    }

    pub(crate) fn rooms_entered(&self) -> u32 {
        self.rooms_entered
    }

    fn room_area(&self) -> Size {
        let room = self.current_room();
        Size::new(room.width, room.height)
    }

    fn player_rect(&self) -> Rect {
        Rect::at(self.state.player, PLAYER_SIZE)
    }

    fn advance_transition(&mut self, dt_seconds: f32) {
        let Some(transition) = self.transition.as_mut() else {
            return;
        };
        self.state.player = transition.step(dt_seconds);
        if transition.is_finished() {
            self.transition = None;
        }
    }

    /// Replaces any move still in flight.
    fn begin_transition(&mut self, target: Vec2) {
        let mut transition = RoomTransition::new(target, TRANSITION_DURATION);
        self.state.player = transition.step(0.0);
        self.transition = Some(transition);
    }

    fn draw_current_room(&mut self, renderer: &mut dyn RoomRenderer) {
        let room = self
            .catalog
            .get(self.room_index)
            .unwrap_or_else(|| self.catalog.start_room());
        let layout = RoomLayout::for_room(room);
        renderer.draw_room(&layout);
        self.door_rects = layout.doors;

        let loot = self.spawns.position_within(room);
        renderer.place(Marker::Loot, loot);
        self.loot = Some(loot);

        self.state.enemy = if room.has_enemy {
            let enemy = self.spawns.position_within(room);
            renderer.place(Marker::Enemy, enemy);
            Some(enemy)
        } else {
            None
        };
        renderer.place(Marker::Player, self.state.player);
    }

    fn publish(&self, renderer: &mut dyn RoomRenderer) {
        renderer.place(Marker::Player, self.state.player);
        if let Some(enemy) = self.state.enemy {
            renderer.place(Marker::Enemy, enemy);
        }
        renderer.show_score(self.state.score);
    }

    /// Only the first touched door counts.
    fn check_doors(&mut self, renderer: &mut dyn RoomRenderer) {
        let player = self.player_rect();
        let Some(door_index) = self
            .door_rects
            .iter()
            .position(|door| overlaps(Some(&player), Some(door)))
        else {
            return;
        };

        let room_count = self.catalog.len();
        let target = self.spawns.transition_target(room_count).min(room_count - 1);
        let from_room = self.room_index;
        self.room_index = target;
        self.rooms_entered = self.rooms_entered.saturating_add(1);

        let entry = Vec2::new(self.current_room().width / 2.0, ROOM_ENTRY_Y);
        self.begin_transition(entry);
        self.draw_current_room(renderer);
        info!(
            from_room,
            room = target,
            door = door_index,
            has_enemy = self.state.enemy.is_some(),
            "room_entered"
        );
    }

    fn check_loot(&mut self, renderer: &mut dyn RoomRenderer) {
        let loot = self.loot.map(|position| Rect::at(position, LOOT_SIZE));
        if !overlaps(Some(&self.player_rect()), loot.as_ref()) {
            return;
        }
        self.loot = None;
        renderer.remove(Marker::Loot);
        self.state.score = self.state.score.saturating_add(LOOT_POINTS);
        renderer.show_score(self.state.score);
        info!(score = self.state.score, room = self.room_index, "loot_collected");
    }

    fn check_enemy(&mut self, renderer: &mut dyn RoomRenderer) -> SessionPhase {
        let enemy = self.state.enemy.map(|position| Rect::at(position, ENEMY_SIZE));
        if !overlaps(Some(&self.player_rect()), enemy.as_ref()) {
            return SessionPhase::Running;
        }
        self.state.game_over = true;
        self.transition = None;
        renderer.show_screen(Screen::GameOver {
            score: self.state.score,
        });
        info!(
            score = self.state.score,
            room = self.room_index,
            rooms_entered = self.rooms_entered,
            "game_over"
        );
        debug!(player = ?self.state.player, enemy = ?self.state.enemy, "game_over_contact");
        SessionPhase::GameOver
    }
}
