//! # Cave Generation
//!
//! Organic caves for the cave theme: random noise smoothed by a cellular
//! automaton, then stitched into a single connected cave system.

use super::connectivity::connect_regions;
use super::{GenerationConfig, LayoutStrategy, Room};
use crate::level::{Grid, Tile};
use crate::BurrowResult;
use log::debug;
use rand::{rngs::StdRng, Rng};

/// Cave generator based on a wall-count cellular automaton.
///
/// Produces no rooms; stairs and spawn points for caves are found by
/// probing for floor tiles afterwards.
#[derive(Debug, Clone, Default)]
pub struct CellularCaveGenerator;

impl CellularCaveGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Seeds the interior with floor at the configured probability.
    fn seed_noise(
        &self,
        grid: &mut Grid,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> BurrowResult<()> {
        for pos in grid.interior_positions().collect::<Vec<_>>() {
            if rng.gen_bool(config.cave_floor_chance) {
                grid.set_tile(pos, Tile::Floor)?;
            }
        }
        Ok(())
    }

    /// Runs one automaton generation.
    ///
    /// Neighbour counts are read from the previous generation only; the
    /// result is written to a fresh copy that then replaces the grid.
    fn step(&self, grid: &mut Grid, config: &GenerationConfig) -> BurrowResult<()> {
        let mut next = grid.clone();

        for pos in grid.interior_positions() {
            let walls = grid.count_adjacent_walls(pos);
            if walls >= config.wall_threshold {
                next.set_tile(pos, Tile::Wall)?;
            } else if walls <= config.floor_threshold {
                next.set_tile(pos, Tile::Floor)?;
            }
        }

        *grid = next;
        Ok(())
    }
}

impl LayoutStrategy for CellularCaveGenerator {
    fn carve(
        &self,
        grid: &mut Grid,
        level: u32,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> BurrowResult<Vec<Room>> {
        self.seed_noise(grid, config, rng)?;

        let iterations = config.cave_iterations(level);
        for _ in 0..iterations {
            self.step(grid, config)?;
        }
        debug!(
            "Cave smoothed in {} iterations, {} floor tiles",
            iterations,
            grid.count(Tile::Floor)
        );

        connect_regions(grid, rng)?;
        Ok(Vec::new())
    }

    fn strategy_type(&self) -> &'static str {
        "CellularCaveGenerator"
    }
}
