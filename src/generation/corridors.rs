//! # Corridor Carving
//!
//! One-tile-wide straight and L-shaped corridors. Carving is clipped to the
//! grid interior, so corridors can never open the outer wall ring.

use crate::level::{Grid, Position, Tile};
use crate::BurrowResult;
use rand::{rngs::StdRng, Rng};

/// Carves floor along row `y` from `x1` to `x2` inclusive.
pub fn carve_horizontal(grid: &mut Grid, x1: i32, x2: i32, y: i32) -> BurrowResult<()> {
    for x in x1.min(x2)..=x1.max(x2) {
        carve(grid, Position::new(x, y))?;
    }
    Ok(())
}

/// Carves floor along column `x` from `y1` to `y2` inclusive.
pub fn carve_vertical(grid: &mut Grid, x: i32, y1: i32, y2: i32) -> BurrowResult<()> {
    for y in y1.min(y2)..=y1.max(y2) {
        carve(grid, Position::new(x, y))?;
    }
    Ok(())
}

/// Carves an L-shaped corridor between two points.
///
/// The elbow order is drawn per corridor: half the time the corridor runs
/// horizontally from `start` and turns at `end.x`, otherwise it runs
/// vertically first and turns at `end.y`.
pub fn carve_l_corridor(
    grid: &mut Grid,
    start: Position,
    end: Position,
    rng: &mut StdRng,
) -> BurrowResult<()> {
    if rng.gen_bool(0.5) {
        carve_horizontal(grid, start.x, end.x, start.y)?;
        carve_vertical(grid, end.x, start.y, end.y)
    } else {
        carve_vertical(grid, start.x, start.y, end.y)?;
        carve_horizontal(grid, start.x, end.x, end.y)
    }
}

fn carve(grid: &mut Grid, pos: Position) -> BurrowResult<()> {
    if grid.is_interior(pos) {
        grid.set_tile(pos, Tile::Floor)?;
    }
    Ok(())
}
