//! Adapter from the session's render calls onto the engine display list.

use std::collections::HashMap;

use engine::{Banner, EntityId, PlayArea, RenderableDesc, RenderableKind, SceneWorld, Transform, Vec2};

use super::gameplay::{Marker, RoomLayout, RoomRenderer, Screen, Size, MARKER_SIZE, PLAYER_SIZE};

const PLAYER_COLOR: [u8; 4] = [52, 120, 246, 255];
const ENEMY_COLOR: [u8; 4] = [220, 50, 47, 255];
const LOOT_COLOR: [u8; 4] = [240, 190, 40, 255];
const DOOR_COLOR: [u8; 4] = [139, 90, 43, 255];
const BANNER_WRAP_CHARS: usize = 44;

pub(crate) const GAME_TITLE: &str = "ROOM RUN";

/// Display-list ids owned by the stage, kept between ticks.
#[derive(Debug, Default)]
pub(crate) struct StageEntities {
    markers: HashMap<Marker, EntityId>,
    doors: Vec<EntityId>,
}

impl StageEntities {
    #[cfg(test)]
    pub(crate) fn marker(&self, marker: Marker) -> Option<EntityId> {
        self.markers.get(&marker).copied()
    }

    pub(crate) fn door_count(&self) -> usize {
        self.doors.len()
    }
}

pub(crate) struct StageRenderer<'a> {
    world: &'a mut SceneWorld,
    entities: &'a mut StageEntities,
}

impl<'a> StageRenderer<'a> {
    pub(crate) fn new(world: &'a mut SceneWorld, entities: &'a mut StageEntities) -> Self {
        Self { world, entities }
    }

    /// Drops every tracked entity and all screen state.
    pub(crate) fn reset(&mut self) {
        self.world.clear();
        self.entities.markers.clear();
        self.entities.doors.clear();
    }

    fn despawn_room_entities(&mut self) {
        for id in self.entities.doors.drain(..) {
            self.world.despawn(id);
        }
        for (_, id) in self.entities.markers.drain() {
            self.world.despawn(id);
        }
    }
}

impl RoomRenderer for StageRenderer<'_> {
    fn draw_room(&mut self, layout: &RoomLayout) {
        self.despawn_room_entities();
        self.world.set_play_area(PlayArea {
            width: layout.width,
            height: layout.height,
        });
        for door in &layout.doors {
            let id = self.world.spawn(
                Transform {
                    position: door.position(),
                },
                rect_renderable(Size::new(door.width, door.height), DOOR_COLOR, "door"),
            );
            self.entities.doors.push(id);
        }
    }

    fn place(&mut self, marker: Marker, position: Vec2) {
        if let Some(id) = self.entities.markers.get(&marker) {
            if self.world.set_position(*id, position) {
                return;
            }
        }
        let id = self
            .world
            .spawn(Transform { position }, marker_renderable(marker));
        self.entities.markers.insert(marker, id);
    }

    fn remove(&mut self, marker: Marker) {
        if let Some(id) = self.entities.markers.remove(&marker) {
            self.world.despawn(id);
        }
    }

    fn show_score(&mut self, score: u32) {
        self.world.set_status_text(Some(score_text(score)));
    }

    fn show_screen(&mut self, screen: Screen) {
        match screen {
            Screen::Title => {
                self.world.set_play_area_visible(false);
                self.world.set_status_text(None);
                self.world.set_banner(Some(Banner {
                    title: GAME_TITLE.to_string(),
                    lines: vec![
                        "Collect loot. Avoid the enemy.".to_string(),
                        "WASD / arrows to move".to_string(),
                        "Press Enter to start".to_string(),
                    ],
                }));
            }
            Screen::Loading => {
                self.world.set_play_area_visible(false);
                self.world.set_status_text(None);
                self.world.set_banner(Some(Banner {
                    title: "LOADING".to_string(),
                    lines: vec!["Fetching rooms...".to_string()],
                }));
            }
            Screen::Playing => {
                self.world.set_banner(None);
                self.world.set_play_area_visible(true);
            }
            Screen::GameOver { score } => {
                self.world.set_play_area_visible(false);
                self.world.set_banner(Some(Banner {
                    title: "GAME OVER".to_string(),
                    lines: vec![score_text(score), "Press R to restart".to_string()],
                }));
            }
            Screen::Error { message } => {
                self.world.set_play_area_visible(false);
                self.world.set_status_text(None);
                let mut lines = wrap_words(&message, BANNER_WRAP_CHARS);
                lines.push(String::new());
                lines.push("Press R to retry".to_string());
                self.world.set_banner(Some(Banner {
                    title: "ERROR".to_string(),
                    lines,
                }));
            }
        }
    }
}

pub(crate) fn score_text(score: u32) -> String {
    format!("Score: {score}")
}

fn marker_renderable(marker: Marker) -> RenderableDesc {
    match marker {
        Marker::Player => rect_renderable(PLAYER_SIZE, PLAYER_COLOR, "player"),
        Marker::Enemy => rect_renderable(MARKER_SIZE, ENEMY_COLOR, "enemy"),
        Marker::Loot => rect_renderable(MARKER_SIZE, LOOT_COLOR, "loot"),
    }
}

fn rect_renderable(size: Size, color: [u8; 4], debug_name: &'static str) -> RenderableDesc {
    RenderableDesc {
        kind: RenderableKind::Rect {
            width: size.width,
            height: size.height,
            color,
        },
        debug_name,
    }
}

/// Greedy word wrap; words longer than `width` get a line of their own.
fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.len()
        } else {
            current.len() + 1 + word.len()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::gameplay::Rect;

    fn layout() -> RoomLayout {
        RoomLayout {
            width: 150.0,
            height: 100.0,
            doors: vec![
                Rect::new(-5.0, 37.5, 10.0, 25.0),
                Rect::new(62.5, 95.0, 25.0, 10.0),
            ],
        }
    }

    fn names(world: &SceneWorld) -> Vec<&'static str> {
        world
            .entities()
            .iter()
            .map(|entity| entity.renderable.debug_name)
            .collect()
    }

    #[test]
    fn drawing_a_room_resizes_play_area_and_spawns_doors() {
        let mut world = SceneWorld::default();
        let mut entities = StageEntities::default();
        let mut stage = StageRenderer::new(&mut world, &mut entities);
        stage.draw_room(&layout());
        stage.place(Marker::Loot, Vec2::new(10.0, 10.0));
        stage.place(Marker::Player, Vec2::new(50.0, 50.0));
        stage.show_screen(Screen::Playing);
        world.apply_pending();

        assert_eq!(
            world.play_area(),
            Some(PlayArea {
                width: 150.0,
                height: 100.0
            })
        );
        assert!(world.play_area_visible());
        assert_eq!(names(&world), vec!["door", "door", "loot", "player"]);
        assert_eq!(entities.door_count(), 2);
    }

    #[test]
    fn redrawing_replaces_old_room_entities() {
        let mut world = SceneWorld::default();
        let mut entities = StageEntities::default();
        {
            let mut stage = StageRenderer::new(&mut world, &mut entities);
            stage.draw_room(&layout());
            stage.place(Marker::Enemy, Vec2::new(90.0, 90.0));
        }
        world.apply_pending();
        {
            let mut stage = StageRenderer::new(&mut world, &mut entities);
            stage.draw_room(&RoomLayout {
                width: 200.0,
                height: 200.0,
                doors: Vec::new(),
            });
            stage.place(Marker::Player, Vec2::new(75.0, 0.0));
        }
        world.apply_pending();

        assert_eq!(names(&world), vec!["player"]);
        assert!(entities.marker(Marker::Enemy).is_none());
    }

    #[test]
    fn placing_an_existing_marker_moves_it() {
        let mut world = SceneWorld::default();
        let mut entities = StageEntities::default();
        let mut stage = StageRenderer::new(&mut world, &mut entities);
        stage.place(Marker::Player, Vec2::new(1.0, 2.0));
        stage.place(Marker::Player, Vec2::new(3.0, 4.0));
        world.apply_pending();

        assert_eq!(world.entity_count(), 1);
        let id = entities.marker(Marker::Player).expect("player id");
        let entity = world.find_entity(id).expect("player entity");
        assert_eq!(entity.transform.position, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn removing_loot_despawns_it() {
        let mut world = SceneWorld::default();
        let mut entities = StageEntities::default();
        let mut stage = StageRenderer::new(&mut world, &mut entities);
        stage.place(Marker::Loot, Vec2::new(1.0, 2.0));
        stage.remove(Marker::Loot);
        stage.remove(Marker::Loot);
        world.apply_pending();

        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn game_over_hides_play_area_and_keeps_score_line() {
        let mut world = SceneWorld::default();
        let mut entities = StageEntities::default();
        let mut stage = StageRenderer::new(&mut world, &mut entities);
        stage.draw_room(&layout());
        stage.show_screen(Screen::Playing);
        stage.show_score(150);
        stage.show_screen(Screen::GameOver { score: 150 });

        assert!(!world.play_area_visible());
        assert_eq!(world.status_text(), Some("Score: 150"));
        let banner = world.banner().expect("banner");
        assert_eq!(banner.title, "GAME OVER");
        assert_eq!(banner.lines[0], "Score: 150");
    }

    #[test]
    fn error_screen_wraps_message_and_offers_retry() {
        let mut world = SceneWorld::default();
        let mut entities = StageEntities::default();
        let mut stage = StageRenderer::new(&mut world, &mut entities);
        stage.show_screen(Screen::Error {
            message: "failed to fetch room catalog from http://example.invalid/rooms: request failed"
                .to_string(),
        });

        let banner = world.banner().expect("banner");
        assert_eq!(banner.title, "ERROR");
        assert!(banner.lines.len() >= 3);
        assert!(banner.lines.iter().all(|line| line.len() <= BANNER_WRAP_CHARS));
        assert_eq!(banner.lines.last().map(String::as_str), Some("Press R to retry"));
        assert!(world.status_text().is_none());
    }

    #[test]
    fn reset_clears_world_and_tracking() {
        let mut world = SceneWorld::default();
        let mut entities = StageEntities::default();
        let mut stage = StageRenderer::new(&mut world, &mut entities);
        stage.draw_room(&layout());
        stage.place(Marker::Player, Vec2::new(0.0, 0.0));
        stage.show_score(50);
        stage.reset();
        world.apply_pending();

        assert_eq!(world.entity_count(), 0);
        assert!(world.status_text().is_none());
        assert!(entities.marker(Marker::Player).is_none());
        assert_eq!(entities.door_count(), 0);
    }

    #[test]
    fn wrap_words_breaks_on_spaces() {
        assert_eq!(
            wrap_words("alpha beta gamma", 10),
            vec!["alpha beta".to_string(), "gamma".to_string()]
        );
        assert_eq!(wrap_words("", 10), Vec::<String>::new());
        assert_eq!(
            wrap_words("supercalifragilistic x", 5),
            vec!["supercalifragilistic".to_string(), "x".to_string()]
        );
    }
}
