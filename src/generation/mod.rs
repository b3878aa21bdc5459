//! # Generation Module
//!
//! Procedural level generation: layout strategies, connectivity repair and
//! decoration passes, tied together by [`LevelGenerator`].
//!
//! Every random draw comes from a single seeded [`StdRng`] that is passed by
//! `&mut` through each stage, so a `(width, height, seed, level, theme)` tuple
//! always produces the same level.

pub mod cave;
pub mod connectivity;
pub mod corridors;
pub mod decoration;
pub mod dungeon;
pub mod fortress;
pub mod generator;

pub use cave::*;
pub use connectivity::*;
pub use corridors::*;
pub use decoration::*;
pub use dungeon::*;
pub use fortress::*;
pub use generator::*;

use crate::level::{Grid, Position};
use crate::{BurrowError, BurrowResult};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tuning parameters for level generation.
///
/// The defaults reproduce the reference behaviour; every value can be
/// overridden, e.g. from a JSON file, and is checked by [`validate`].
///
/// [`validate`]: GenerationConfig::validate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Minimum room width for the dungeon theme
    pub min_room_width: u32,
    /// Maximum room width for the dungeon theme
    pub max_room_width: u32,
    /// Minimum room height for the dungeon theme
    pub min_room_height: u32,
    /// Maximum room height for the dungeon theme
    pub max_room_height: u32,
    /// Rooms requested at level 0
    pub base_room_count: u32,
    /// Extra rooms requested per level
    pub rooms_per_level: u32,
    /// Cap on requested rooms
    pub max_room_count: u32,
    /// Failed placements allowed per requested room
    pub placement_attempts_per_room: u32,
    /// Probability that an interior cave tile starts as floor (0.0 to 1.0)
    pub cave_floor_chance: f64,
    /// Automaton iterations at level 0
    pub cave_base_iterations: u32,
    /// Cap on the extra iterations added by depth (one per two levels)
    pub cave_max_extra_iterations: u32,
    /// A cave tile with at least this many wall neighbours becomes wall
    pub wall_threshold: u8,
    /// A cave tile with at most this many wall neighbours becomes floor
    pub floor_threshold: u8,
    /// Side length of every fortress room
    pub fortress_room_size: u32,
    /// Gap between neighbouring fortress rooms
    pub fortress_corridor_width: u32,
    /// Probability that a door candidate becomes a door (0.0 to 1.0)
    pub door_chance: f64,
    /// Hazard pools allowed at level 0 (one more every three levels)
    pub base_pool_count: u32,
    /// Smallest hazard pool side
    pub min_pool_size: u32,
    /// Largest hazard pool side
    pub max_pool_size: u32,
    /// Lava may only appear on levels deeper than this
    pub lava_min_level: u32,
    /// Probability that an eligible pool is lava rather than water (0.0 to 1.0)
    pub lava_chance: f64,
    /// One chest per this many rooms
    pub rooms_per_chest: u32,
    /// Cap on chest draws
    pub max_chests: u32,
    /// Random probes when searching for a floor tile
    pub spawn_probes: u32,
    /// Reject out-of-bounds writes instead of clipping them
    pub strict_bounds: bool,
}

impl GenerationConfig {
    /// Creates the default generation configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::GenerationConfig;
    ///
    /// let config = GenerationConfig::new();
    /// assert_eq!(config.door_chance, 0.3);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new() -> Self {
        Self {
            min_room_width: 4,
            max_room_width: 12,
            min_room_height: 4,
            max_room_height: 8,
            base_room_count: 8,
            rooms_per_level: 2,
            max_room_count: 30,
            placement_attempts_per_room: 10,
            cave_floor_chance: 0.45,
            cave_base_iterations: 4,
            cave_max_extra_iterations: 3,
            wall_threshold: 5,
            floor_threshold: 3,
            fortress_room_size: 6,
            fortress_corridor_width: 2,
            door_chance: 0.3,
            base_pool_count: 2,
            min_pool_size: 2,
            max_pool_size: 5,
            lava_min_level: 5,
            lava_chance: 0.3,
            rooms_per_chest: 3,
            max_chests: 5,
            spawn_probes: 100,
            strict_bounds: false,
        }
    }

    /// Creates the default configuration with strict bounds checking.
    pub fn strict() -> Self {
        Self {
            strict_bounds: true,
            ..Self::new()
        }
    }

    /// Number of rooms the dungeon theme tries to place on a level.
    pub fn target_room_count(&self, level: u32) -> u32 {
        self.base_room_count
            .saturating_add(self.rooms_per_level.saturating_mul(level))
            .min(self.max_room_count)
    }

    /// Number of automaton iterations the cave theme runs on a level.
    pub fn cave_iterations(&self, level: u32) -> u32 {
        self.cave_base_iterations + (level / 2).min(self.cave_max_extra_iterations)
    }

    /// Largest number of hazard pools a level may receive.
    pub fn max_pool_count(&self, level: u32) -> u32 {
        self.base_pool_count + level / 3
    }

    /// Number of chest draws for a level with the given number of rooms.
    pub fn chest_count(&self, room_count: usize) -> usize {
        (room_count / self.rooms_per_chest as usize).min(self.max_chests as usize)
    }

    /// Checks that the parameters are internally consistent.
    pub fn validate(&self) -> BurrowResult<()> {
        let probabilities = [
            ("cave_floor_chance", self.cave_floor_chance),
            ("door_chance", self.door_chance),
            ("lava_chance", self.lava_chance),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(BurrowError::InvalidConfig(format!(
                    "{} must be within 0.0..=1.0, got {}",
                    name, value
                )));
            }
        }

        let ranges = [
            ("room width", self.min_room_width, self.max_room_width),
            ("room height", self.min_room_height, self.max_room_height),
            ("pool size", self.min_pool_size, self.max_pool_size),
        ];
        for (name, min, max) in ranges {
            if min > max {
                return Err(BurrowError::InvalidConfig(format!(
                    "{} range is empty ({}..={})",
                    name, min, max
                )));
            }
        }

        // Chests need at least one tile that is not on a room edge.
        if self.min_room_width < 3 || self.min_room_height < 3 || self.fortress_room_size < 3 {
            return Err(BurrowError::InvalidConfig(
                "rooms must be at least 3 tiles on each side".to_string(),
            ));
        }
        if self.min_pool_size == 0 {
            return Err(BurrowError::InvalidConfig(
                "pool size must be at least 1".to_string(),
            ));
        }
        if self.rooms_per_chest == 0 {
            return Err(BurrowError::InvalidConfig(
                "rooms_per_chest must be at least 1".to_string(),
            ));
        }
        if self.floor_threshold >= self.wall_threshold || self.wall_threshold > 8 {
            return Err(BurrowError::InvalidConfig(format!(
                "automaton thresholds must satisfy floor < wall <= 8, got {} and {}",
                self.floor_threshold, self.wall_threshold
            )));
        }

        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// An axis-aligned rectangular room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Index of this room in placement order
    pub id: u32,
    /// Top-left corner of the room
    pub top_left: Position,
    /// Width of the room in tiles
    pub width: u32,
    /// Height of the room in tiles
    pub height: u32,
}

impl Room {
    /// Creates a new room with the given parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{Room, Position};
    ///
    /// let room = Room::new(1, Position::new(5, 5), 10, 8);
    /// assert_eq!(room.id, 1);
    /// assert_eq!(room.center(), Position::new(10, 9));
    /// ```
    pub fn new(id: u32, top_left: Position, width: u32, height: u32) -> Self {
        Self {
            id,
            top_left,
            width,
            height,
        }
    }

    /// Gets the bottom-right corner of the room.
    pub fn bottom_right(&self) -> Position {
        Position::new(
            self.top_left.x + self.width as i32 - 1,
            self.top_left.y + self.height as i32 - 1,
        )
    }

    /// Gets the center position of the room, rounding towards the top-left.
    pub fn center(&self) -> Position {
        Position::new(
            self.top_left.x + self.width as i32 / 2,
            self.top_left.y + self.height as i32 / 2,
        )
    }

    /// Checks if this room intersects another once both are grown by one
    /// tile on every side.
    ///
    /// Rooms that pass this test are separated by at least one wall tile.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{Room, Position};
    ///
    /// let a = Room::new(0, Position::new(1, 1), 4, 4);
    /// let touching = Room::new(1, Position::new(6, 1), 4, 4);
    /// let apart = Room::new(2, Position::new(7, 1), 4, 4);
    ///
    /// assert!(a.intersects(&touching));
    /// assert!(!a.intersects(&apart));
    /// ```
    pub fn intersects(&self, other: &Room) -> bool {
        self.top_left.x <= other.top_left.x + other.width as i32 + 1
            && self.top_left.x + self.width as i32 + 1 >= other.top_left.x
            && self.top_left.y <= other.top_left.y + other.height as i32 + 1
            && self.top_left.y + self.height as i32 + 1 >= other.top_left.y
    }

    /// Gets all positions at least one tile away from every edge.
    pub fn interior_positions(&self) -> Vec<Position> {
        let mut positions = Vec::new();

        for y in (self.top_left.y + 1)..(self.top_left.y + self.height as i32 - 1) {
            for x in (self.top_left.x + 1)..(self.top_left.x + self.width as i32 - 1) {
                positions.push(Position::new(x, y));
            }
        }

        positions
    }

    /// Gets all positions within this room.
    pub fn all_positions(&self) -> Vec<Position> {
        let mut positions = Vec::new();

        for y in self.top_left.y..(self.top_left.y + self.height as i32) {
            for x in self.top_left.x..(self.top_left.x + self.width as i32) {
                positions.push(Position::new(x, y));
            }
        }

        positions
    }
}

/// Selects the layout strategy for a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Rooms joined by corridors
    #[default]
    Dungeon,
    /// Organic caves grown by a cellular automaton
    Cave,
    /// Regular lattice of equal rooms
    Fortress,
}

impl Theme {
    /// Every theme.
    pub const ALL: [Theme; 3] = [Theme::Dungeon, Theme::Cave, Theme::Fortress];

    /// Resolves a theme name. Unknown names fall back to [`Theme::Dungeon`].
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::Theme;
    ///
    /// assert_eq!(Theme::from_name("cave"), Theme::Cave);
    /// assert_eq!(Theme::from_name("mixed"), Theme::Dungeon);
    /// ```
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "cave" => Theme::Cave,
            "fortress" => Theme::Fortress,
            _ => Theme::Dungeon,
        }
    }

    /// Canonical lowercase name of the theme.
    pub fn name(self) -> &'static str {
        match self {
            Theme::Dungeon => "dungeon",
            Theme::Cave => "cave",
            Theme::Fortress => "fortress",
        }
    }

    /// Returns the strategy that carves levels of this theme.
    pub fn strategy(self) -> Box<dyn LayoutStrategy> {
        match self {
            Theme::Dungeon => Box::new(RoomCorridorGenerator::new()),
            Theme::Cave => Box::new(CellularCaveGenerator::new()),
            Theme::Fortress => Box::new(FortressGridGenerator::new()),
        }
    }
}

impl From<&str> for Theme {
    fn from(name: &str) -> Self {
        Theme::from_name(name)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A layout strategy carves walkable space into a wall-filled grid.
///
/// Strategies only ever write inside the grid's border and draw all their
/// randomness from the supplied generator.
pub trait LayoutStrategy {
    /// Carves a layout for the given depth and returns the rooms it created,
    /// in placement order.
    fn carve(
        &self,
        grid: &mut Grid,
        level: u32,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> BurrowResult<Vec<Room>>;

    /// Whether the strategy places its own stairs.
    fn places_stairs(&self) -> bool {
        false
    }

    /// Gets the strategy name for logging and debugging.
    fn strategy_type(&self) -> &'static str;
}

/// Utility functions shared by the generation passes.
pub mod utils {
    use super::*;
    use crate::level::Tile;
    use pathfinding::prelude::bfs_reach;
    use rand::{Rng, SeedableRng};

    /// Creates a seeded random number generator.
    pub fn create_rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    /// Draws a position uniformly from the grid interior.
    pub fn random_interior_position(grid: &Grid, rng: &mut StdRng) -> Position {
        let x = rng.gen_range(1..grid.width() as i32 - 1);
        let y = rng.gen_range(1..grid.height() as i32 - 1);
        Position::new(x, y)
    }

    /// Probes random interior positions for a floor tile.
    ///
    /// Gives up after `probes` misses.
    pub fn find_random_floor(grid: &Grid, rng: &mut StdRng, probes: u32) -> Option<Position> {
        (0..probes)
            .map(|_| random_interior_position(grid, rng))
            .find(|&pos| grid.get_tile(pos) == Tile::Floor)
    }

    /// Counts the positions reachable from `start` through passable tiles
    /// with 4-directional movement.
    pub fn reachable_count(grid: &Grid, start: Position) -> usize {
        bfs_reach(start, |&pos: &Position| {
            pos.cardinal_adjacent_positions()
                .into_iter()
                .filter(|&next| grid.get_tile(next).is_passable())
                .collect::<Vec<_>>()
        })
        .count()
    }

    /// Validates that a level meets the structural guarantees.
    ///
    /// The outer ring must be solid wall and every passable tile must be
    /// reachable from every other one.
    pub fn validate_level(grid: &Grid) -> BurrowResult<()> {
        if let Some(pos) = grid
            .positions()
            .find(|&p| grid.is_border(p) && grid.get_tile(p) != Tile::Wall)
        {
            return Err(BurrowError::GenerationFailed(format!(
                "border tile at {} is {:?}",
                pos,
                grid.get_tile(pos)
            )));
        }

        let passable: Vec<Position> = grid
            .positions()
            .filter(|&p| grid.get_tile(p).is_passable())
            .collect();
        let Some(&start) = passable.first() else {
            return Ok(());
        };

        let reached = reachable_count(grid, start);
        if reached != passable.len() {
            return Err(BurrowError::GenerationFailed(format!(
                "only {} of {} passable tiles are reachable from {}",
                reached,
                passable.len(),
                start
            )));
        }

        Ok(())
    }
}
