//! Obstacle pairs and the stream that scrolls them past the avatar
//!
//! Pairs spawn at the right edge whenever the latest one has travelled far
//! enough, move left at one shared velocity and retire off the left edge.
//! Because velocity is uniform and spawning is position-triggered, spawn
//! order is also right-to-left order, so the stream is a plain FIFO.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Body, Shape};
use crate::config::Config;

/// Which half of a pair a body is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Bottom,
    Top,
}

/// One passable gap: a bottom and a top barrier at the same x
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstaclePair {
    pub id: u32,
    /// Shared horizontal centre of both bodies
    pub x: f32,
    /// Vertical centre of the bottom body (randomized per spawn)
    pub offset: f32,
    pub gap: f32,
    pub width: f32,
    pub half_height: f32,
    /// Already counted toward the score
    pub scored: bool,
}

impl ObstaclePair {
    /// Pair at the spawn edge whose gap starts at `gap_floor`
    pub fn new(id: u32, config: &Config, gap_floor: f32) -> Self {
        Self {
            id,
            x: config.spawn_x(),
            offset: gap_floor - config.obstacle_half_height,
            gap: config.obstacle_gap,
            width: config.obstacle_width,
            half_height: config.obstacle_half_height,
            scored: false,
        }
    }

    /// Top edge of the bottom body
    #[inline]
    pub fn gap_floor(&self) -> f32 {
        self.offset + self.half_height
    }

    /// Bottom edge of the top body
    #[inline]
    pub fn gap_ceiling(&self) -> f32 {
        self.gap_floor() + self.gap
    }

    /// Vertical centre of the top body
    #[inline]
    pub fn pair_center_y(&self) -> f32 {
        self.offset + self.gap + 2.0 * self.half_height
    }

    /// X the avatar's leading edge must pass to score this pair
    #[inline]
    pub fn trailing_edge(&self, clearance: f32) -> f32 {
        self.x + 0.5 * self.width + clearance
    }

    pub fn body(&self, side: Side) -> ObstacleBody {
        let y = match side {
            Side::Bottom => self.offset,
            Side::Top => self.pair_center_y(),
        };
        ObstacleBody {
            pair_id: self.id,
            side,
            pos: Vec2::new(self.x, y),
            half_extents: Vec2::new(0.5 * self.width, self.half_height),
        }
    }

    /// Both bodies, bottom first
    pub fn bodies(&self) -> [ObstacleBody; 2] {
        [self.body(Side::Bottom), self.body(Side::Top)]
    }
}

/// A single barrier, derived from its pair on demand
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleBody {
    pub pair_id: u32,
    pub side: Side,
    pub pos: Vec2,
    pub half_extents: Vec2,
}

impl Body for ObstacleBody {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn shape(&self) -> Shape {
        Shape::Rect {
            half_extents: self.half_extents,
        }
    }
}

/// Ordered set of active pairs, oldest (leftmost) first. Never empty, so it
/// is only built through [`ObstacleStream::new`].
#[derive(Debug, Clone, Serialize)]
pub struct ObstacleStream {
    pairs: VecDeque<ObstaclePair>,
    /// Horizontal velocity shared by every pair
    velocity: f32,
    spawn_trigger_x: f32,
    retire_x: f32,
    next_id: u32,
}

impl ObstacleStream {
    /// Stream holding one freshly spawned pair
    pub fn new(config: &Config, rng: &mut impl Rng) -> Self {
        let mut stream = Self {
            pairs: VecDeque::new(),
            velocity: config.obstacle_velocity,
            spawn_trigger_x: config.spawn_trigger_x(),
            retire_x: config.retire_x,
            next_id: 1,
        };
        stream.spawn(config, rng);
        stream
    }

    fn spawn(&mut self, config: &Config, rng: &mut impl Rng) {
        let gap_floor = rng.random_range(config.gap_floor_min..=config.gap_floor_max);
        let pair = ObstaclePair::new(self.next_id, config, gap_floor);
        log::debug!("Spawned pair {} with gap {}..{}", pair.id, pair.gap_floor(), pair.gap_ceiling());
        self.next_id += 1;
        self.pairs.push_back(pair);
    }

    /// Move every pair by the shared velocity
    pub fn advance(&mut self, dt: f32) {
        let dx = self.velocity * dt;
        for pair in &mut self.pairs {
            pair.x += dx;
        }
    }

    /// Spawn a new pair once the latest has crossed the trigger.
    /// Returns true if one was spawned.
    pub fn maybe_spawn(&mut self, config: &Config, rng: &mut impl Rng) -> bool {
        if self.latest().x < self.spawn_trigger_x {
            self.spawn(config, rng);
            true
        } else {
            false
        }
    }

    /// Drop pairs that have left the screen, oldest first. The latest pair
    /// is never retired. Returns how many were removed.
    pub fn retire(&mut self) -> usize {
        let mut retired = 0;
        while self.pairs.len() > 1 && self.pairs.front().is_some_and(|p| p.x < self.retire_x) {
            if let Some(pair) = self.pairs.pop_front() {
                log::debug!("Retired pair {}", pair.id);
            }
            retired += 1;
        }
        retired
    }

    /// Most recently spawned pair (also the rightmost)
    pub fn latest(&self) -> &ObstaclePair {
        // Constructed with one pair and `retire` keeps the last
        &self.pairs[self.pairs.len() - 1]
    }

    pub fn latest_mut(&mut self) -> &mut ObstaclePair {
        let last = self.pairs.len() - 1;
        &mut self.pairs[last]
    }

    /// Oldest pair not yet scored
    pub fn next_unscored_mut(&mut self) -> Option<&mut ObstaclePair> {
        self.pairs.iter_mut().find(|p| !p.scored)
    }

    /// First pair whose trailing edge is still ahead of `x`
    pub fn next_ahead_of(&self, x: f32) -> Option<&ObstaclePair> {
        self.pairs.iter().find(|p| p.x + 0.5 * p.width > x)
    }

    pub fn pairs(&self) -> impl Iterator<Item = &ObstaclePair> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Every active body, pair by pair in spawn order
    pub fn bodies(&self) -> impl Iterator<Item = ObstacleBody> + '_ {
        self.pairs.iter().flat_map(|p| p.bodies())
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_new_stream_has_one_pair_at_spawn_edge() {
        let config = Config::default();
        let stream = ObstacleStream::new(&config, &mut rng());
        assert_eq!(stream.len(), 1);
        assert_eq!(stream.latest().x, config.screen_width + 80.0);
    }

    #[test]
    fn test_pair_geometry() {
        let config = Config::default();
        let pair = ObstaclePair::new(1, &config, 300.0);
        assert_eq!(pair.offset, 300.0 - 642.0);
        assert_eq!(pair.gap_floor(), 300.0);
        assert_eq!(pair.gap_ceiling(), 500.0);
        assert_eq!(pair.pair_center_y(), pair.offset + 200.0 + 642.0 * 2.0);

        let [bottom, top] = pair.bodies();
        assert_eq!(bottom.pos.x, top.pos.x);
        assert_eq!(bottom.pos.y + bottom.half_extents.y, 300.0);
        assert_eq!(top.pos.y - top.half_extents.y, 500.0);
        assert_eq!(top.side, Side::Top);
    }

    #[test]
    fn test_gap_floor_stays_in_range() {
        let config = Config::default();
        let mut rng = rng();
        let mut stream = ObstacleStream::new(&config, &mut rng);
        for _ in 0..200 {
            stream.advance(1.0);
            stream.maybe_spawn(&config, &mut rng);
            stream.retire();
            let floor = stream.latest().gap_floor();
            assert!((config.gap_floor_min..=config.gap_floor_max).contains(&floor));
        }
    }

    #[test]
    fn test_spawns_once_latest_crosses_trigger() {
        let config = Config::default();
        assert_eq!(config.spawn_trigger_x(), config.screen_width - 300.0);
        let mut rng = rng();
        let mut stream = ObstacleStream::new(&config, &mut rng);
        let first_id = stream.latest().id;

        // 580 -> 200 is 380px at 250px/s: still not past after 1.5s
        for _ in 0..15 {
            stream.advance(0.1);
            assert!(!stream.maybe_spawn(&config, &mut rng));
        }
        assert_eq!(stream.len(), 1);

        // 1.6s puts it at 180
        stream.advance(0.1);
        assert!(stream.maybe_spawn(&config, &mut rng));
        assert_eq!(stream.len(), 2);
        assert_ne!(stream.latest().id, first_id);
        assert_eq!(stream.latest().x, config.spawn_x());

        // New latest is far from the trigger, nothing more spawns
        assert!(!stream.maybe_spawn(&config, &mut rng));
        assert_eq!(stream.len(), 2);
    }

    #[test]
    fn test_retire_removes_offscreen_only() {
        let config = Config::default();
        let mut rng = rng();
        let mut stream = ObstacleStream::new(&config, &mut rng);
        stream.advance(1.6);
        stream.maybe_spawn(&config, &mut rng);
        assert_eq!(stream.retire(), 0);

        // First pair at 180 - 250 = -70, second at 580 - 250 = 330
        stream.advance(1.0);
        assert_eq!(stream.retire(), 1);
        assert_eq!(stream.len(), 1);
    }

    #[test]
    fn test_retire_keeps_latest() {
        let config = Config::default();
        let mut stream = ObstacleStream::new(&config, &mut rng());
        stream.advance(100.0);
        assert_eq!(stream.retire(), 0);
        assert_eq!(stream.len(), 1);
    }

    #[test]
    fn test_next_unscored() {
        let config = Config::default();
        let mut rng = rng();
        let mut stream = ObstacleStream::new(&config, &mut rng);
        stream.advance(1.6);
        stream.maybe_spawn(&config, &mut rng);

        let first = stream.next_unscored_mut().unwrap();
        first.scored = true;
        let first_id = first.id;
        assert_ne!(stream.next_unscored_mut().unwrap().id, first_id);
    }

    proptest! {
        /// Pairs stay strictly ordered by x and retirement only takes from the
        /// left, whatever the step sizes.
        #[test]
        fn prop_pairs_stay_ordered(
            seed in any::<u64>(),
            steps in prop::collection::vec(0.0f32..0.5, 1..300),
        ) {
            let config = Config::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut stream = ObstacleStream::new(&config, &mut rng);

            for dt in steps {
                stream.advance(dt);
                stream.maybe_spawn(&config, &mut rng);
                let before: Vec<u32> = stream.pairs().map(|p| p.id).collect();
                let retired = stream.retire();
                let after: Vec<u32> = stream.pairs().map(|p| p.id).collect();

                prop_assert!(!stream.is_empty());
                prop_assert_eq!(&before[retired..], &after[..]);
                let xs: Vec<f32> = stream.pairs().map(|p| p.x).collect();
                prop_assert!(xs.windows(2).all(|w| w[0] < w[1]));
                prop_assert_eq!(stream.latest().id, *after.last().unwrap());
            }
        }
    }
}
