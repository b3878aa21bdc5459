//! # Level Generator
//!
//! The public entry point. A [`LevelGenerator`] owns the grid dimensions,
//! the seed and the random number generator derived from it, and runs the
//! full pipeline for each requested level:
//!
//! 1. Carve a layout with the theme's [`LayoutStrategy`]
//! 2. Place stairs, unless the strategy already did
//! 3. Add doors, hazard pools and chests
//! 4. Pick the spawn point

use super::decoration::{add_chests, add_doors, add_hazard_pools, find_spawn_point, place_stairs};
use super::{utils, GenerationConfig, Room, Theme};
use crate::config::{MAX_RANDOM_SEED, MIN_DIMENSION};
use crate::level::{Grid, Position, Tile};
use crate::{BurrowError, BurrowResult};
use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Everything produced by one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Seed of the generator that produced this level
    pub seed: u64,
    /// Depth the level was generated for
    pub level: u32,
    /// Theme used for the layout
    pub theme: Theme,
    /// Final tile grid
    pub grid: Grid,
    /// Rooms in placement order; empty for caves
    pub rooms: Vec<Room>,
    /// Where the player enters the level
    pub spawn_point: Position,
    /// Location of the way up, if one was placed
    pub stairs_up: Option<Position>,
    /// Location of the way down, if one was placed
    pub stairs_down: Option<Position>,
}

impl GenerationResult {
    /// Counts the tiles of a given kind in the final grid.
    pub fn tile_count(&self, tile: Tile) -> usize {
        self.grid.count(tile)
    }

    /// Serializes the result to JSON, with the grid as rows of glyphs.
    pub fn to_json(&self) -> BurrowResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restores a result previously written by [`to_json`](Self::to_json).
    pub fn from_json(json: &str) -> BurrowResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Seeded level generator.
///
/// Every random draw of every `generate` call comes from one generator
/// seeded at construction, so two instances built with the same arguments
/// and asked for the same levels produce identical results. Successive
/// calls on one instance continue the same random stream.
///
/// # Examples
///
/// ```
/// use burrow::{LevelGenerator, Theme};
///
/// let mut a = LevelGenerator::new(48, 32, Some(7)).unwrap();
/// let mut b = LevelGenerator::new(48, 32, Some(7)).unwrap();
///
/// assert_eq!(
///     a.generate(3, Theme::Cave).unwrap(),
///     b.generate(3, Theme::Cave).unwrap()
/// );
/// ```
#[derive(Debug)]
pub struct LevelGenerator {
    width: u32,
    height: u32,
    seed: u64,
    config: GenerationConfig,
    rng: StdRng,
    last: Option<GenerationResult>,
}

impl LevelGenerator {
    /// Creates a generator with the default configuration.
    ///
    /// Fails with [`BurrowError::InvalidDimensions`] when either side is
    /// below 3. Without a seed, one is drawn at random; [`seed`](Self::seed)
    /// reports it so the level can be reproduced later.
    pub fn new(width: u32, height: u32, seed: Option<u64>) -> BurrowResult<Self> {
        Self::with_config(width, height, seed, GenerationConfig::default())
    }

    /// Creates a generator with a custom configuration.
    pub fn with_config(
        width: u32,
        height: u32,
        seed: Option<u64>,
        config: GenerationConfig,
    ) -> BurrowResult<Self> {
        if width < MIN_DIMENSION || height < MIN_DIMENSION {
            return Err(BurrowError::InvalidDimensions { width, height });
        }
        config.validate()?;

        let seed = seed.unwrap_or_else(|| rand::thread_rng().gen_range(0..=MAX_RANDOM_SEED));
        debug!("Level generator {}x{} seeded with {}", width, height, seed);

        Ok(Self {
            width,
            height,
            seed,
            config,
            rng: utils::create_rng(seed),
            last: None,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The seed driving this generator.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Generates a level, replacing any previously generated one.
    ///
    /// Level 0 is treated as level 1.
    pub fn generate(&mut self, level: u32, theme: Theme) -> BurrowResult<GenerationResult> {
        let level = if level == 0 {
            warn!("Level 0 requested, generating level 1 instead");
            1
        } else {
            level
        };

        let mut grid = if self.config.strict_bounds {
            Grid::new_strict(self.width, self.height)?
        } else {
            Grid::new(self.width, self.height)?
        };

        let strategy = theme.strategy();
        debug!(
            "Generating level {} ({}) with {}",
            level,
            theme,
            strategy.strategy_type()
        );
        let rooms = strategy.carve(&mut grid, level, &self.config, &mut self.rng)?;

        if !strategy.places_stairs() {
            place_stairs(&mut grid, &rooms, &self.config, &mut self.rng)?;
        }
        let doors = add_doors(&mut grid, &rooms, &self.config, &mut self.rng)?;
        let pools = add_hazard_pools(&mut grid, level, &self.config, &mut self.rng)?;
        let chests = add_chests(&mut grid, &rooms, &self.config, &mut self.rng)?;
        let spawn_point = find_spawn_point(&grid, &rooms, &self.config, &mut self.rng);

        debug!(
            "Decorated with {} doors, {} pools, {} chests",
            doors, pools, chests
        );
        if cfg!(debug_assertions) {
            if let Err(e) = utils::validate_level(&grid) {
                error!("Generated level failed validation: {}", e);
            }
        }
        info!(
            "Generated {} level {} ({}x{}, seed {}, {} rooms)",
            theme,
            level,
            self.width,
            self.height,
            self.seed,
            rooms.len()
        );

        let result = GenerationResult {
            seed: self.seed,
            level,
            theme,
            stairs_up: grid.find_all(Tile::StairsUp).first().copied(),
            stairs_down: grid.find_all(Tile::StairsDown).first().copied(),
            grid,
            rooms,
            spawn_point,
        };
        self.last = Some(result.clone());
        Ok(result)
    }

    /// Where the player enters the most recently generated level.
    ///
    /// Fails with [`BurrowError::NotGenerated`] before the first
    /// [`generate`](Self::generate).
    pub fn get_spawn_point(&self) -> BurrowResult<Position> {
        self.last
            .as_ref()
            .map(|result| result.spawn_point)
            .ok_or(BurrowError::NotGenerated)
    }

    /// The most recently generated level, if any.
    pub fn last_result(&self) -> Option<&GenerationResult> {
        self.last.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_small_dimensions() {
        assert!(matches!(
            LevelGenerator::new(2, 2, None),
            Err(BurrowError::InvalidDimensions { width: 2, height: 2 })
        ));
        assert!(LevelGenerator::new(3, 2, Some(1)).is_err());
        assert!(LevelGenerator::new(3, 3, Some(1)).is_ok());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = GenerationConfig::new();
        config.lava_chance = -0.1;
        assert!(matches!(
            LevelGenerator::with_config(20, 20, Some(1), config),
            Err(BurrowError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_random_seed_is_reported() {
        let generator = LevelGenerator::new(10, 10, None).unwrap();
        assert!(generator.seed() <= MAX_RANDOM_SEED);
        assert_eq!(LevelGenerator::new(10, 10, Some(77)).unwrap().seed(), 77);
    }

    #[test]
    fn test_spawn_point_requires_generation() {
        let mut generator = LevelGenerator::new(30, 20, Some(5)).unwrap();
        assert!(matches!(
            generator.get_spawn_point(),
            Err(BurrowError::NotGenerated)
        ));
        assert!(generator.last_result().is_none());

        let result = generator.generate(1, Theme::Dungeon).unwrap();
        assert_eq!(generator.get_spawn_point().unwrap(), result.spawn_point);
        assert_eq!(generator.last_result(), Some(&result));
    }

    #[test]
    fn test_regenerating_discards_previous_level() {
        let mut generator = LevelGenerator::new(40, 30, Some(9)).unwrap();
        generator.generate(2, Theme::Fortress).unwrap();
        let cave = generator.generate(2, Theme::Cave).unwrap();

        assert!(cave.rooms.is_empty());
        assert_eq!(generator.last_result().map(|r| r.theme), Some(Theme::Cave));
    }

    #[test]
    fn test_level_zero_is_clamped() {
        let mut generator = LevelGenerator::new(30, 20, Some(5)).unwrap();
        assert_eq!(generator.generate(0, Theme::Dungeon).unwrap().level, 1);
    }

    #[test]
    fn test_stairs_recorded_in_result() {
        let mut generator = LevelGenerator::new(60, 30, Some(31)).unwrap();
        let result = generator.generate(2, Theme::Fortress).unwrap();

        let first = result.rooms.first().map(Room::center);
        assert_eq!(result.stairs_up, first);
        assert_eq!(result.stairs_down, result.rooms.last().map(Room::center));
        assert_eq!(result.spawn_point, first.unwrap());
    }

    #[test]
    fn test_result_json_round_trip() {
        let mut generator = LevelGenerator::new(25, 15, Some(3)).unwrap();
        let result = generator.generate(4, Theme::Dungeon).unwrap();

        let json = result.to_json().unwrap();
        assert!(json.contains("\"theme\": \"dungeon\""));
        assert_eq!(GenerationResult::from_json(&json).unwrap(), result);
    }

    #[test]
    fn test_strict_result_json_round_trip() {
        let mut generator =
            LevelGenerator::with_config(30, 20, Some(3), GenerationConfig::strict()).unwrap();
        let result = generator.generate(2, Theme::Dungeon).unwrap();

        let mut back = GenerationResult::from_json(&result.to_json().unwrap()).unwrap();
        assert_eq!(back, result);
        assert!(matches!(
            back.grid.set_tile(Position::new(-1, 0), Tile::Floor),
            Err(BurrowError::OutOfBounds { x: -1, y: 0 })
        ));
    }
}
