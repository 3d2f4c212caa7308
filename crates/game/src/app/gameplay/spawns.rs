use engine::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::app::catalog::RoomDescriptor;

use super::MARKER_SIZE;

/// Randomness used by a session: where loot/enemies appear and which room a door leads to.
pub(crate) trait SpawnSource {
    /// Index of the next room, in `[1, room_count - 1]`. Only a single-room catalog yields 0.
    fn transition_target(&mut self, room_count: usize) -> usize;

    /// Top-left corner for a 10x10 marker somewhere inside `room`.
    fn position_within(&mut self, room: &RoomDescriptor) -> Vec2;
}

#[derive(Debug)]
pub(crate) struct RandomSpawns {
    rng: StdRng,
}

impl RandomSpawns {
    pub(crate) fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }
}

impl SpawnSource for RandomSpawns {
    fn transition_target(&mut self, room_count: usize) -> usize {
        if room_count <= 1 {
            return 0;
        }
        self.rng.random_range(1..room_count)
    }

    fn position_within(&mut self, room: &RoomDescriptor) -> Vec2 {
        let x = spawn_coordinate(self.rng.random::<f32>(), room.width);
        let y = spawn_coordinate(self.rng.random::<f32>(), room.height);
        Vec2::new(x, y)
    }
}

/// `floor(unit * (dimension - marker))`, never negative.
pub(crate) fn spawn_coordinate(unit: f32, dimension: f32) -> f32 {
    (unit * (dimension - MARKER_SIZE.width).max(0.0)).floor()
}
