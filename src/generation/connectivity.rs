//! # Connectivity Repair
//!
//! Finds disconnected floor regions and joins them with corridors until a
//! single region remains.

use super::corridors::carve_l_corridor;
use crate::level::{Grid, Position, Tile};
use crate::BurrowResult;
use log::{debug, error};
use rand::{rngs::StdRng, Rng};

/// Finds every maximal 4-connected region of floor tiles.
///
/// Regions are returned in discovery order of a row-major scan, and each
/// region lists its tiles in fill order. Only [`Tile::Floor`] takes part;
/// every other tile, and everything off the grid, acts as a boundary.
pub fn find_regions(grid: &Grid) -> Vec<Vec<Position>> {
    let width = grid.width() as usize;
    let mut visited = vec![false; width * grid.height() as usize];
    let index = |pos: Position| pos.y as usize * width + pos.x as usize;
    let mut regions = Vec::new();

    for start in grid.positions() {
        if visited[index(start)] || grid.get_tile(start) != Tile::Floor {
            continue;
        }

        let mut region = Vec::new();
        let mut stack = vec![start];
        visited[index(start)] = true;

        while let Some(pos) = stack.pop() {
            region.push(pos);
            for next in pos.cardinal_adjacent_positions() {
                // Off-grid neighbours read as walls, so they never pass.
                if grid.get_tile(next) == Tile::Floor && !visited[index(next)] {
                    visited[index(next)] = true;
                    stack.push(next);
                }
            }
        }

        regions.push(region);
    }

    regions
}

/// Joins all floor regions into one by carving corridors between them.
///
/// Regions are ranked largest first. Each smaller region is linked to a
/// random tile of everything merged so far. Returns the number of regions
/// found before repair.
pub fn connect_regions(grid: &mut Grid, rng: &mut StdRng) -> BurrowResult<usize> {
    let mut regions = find_regions(grid);
    let found = regions.len();
    if found <= 1 {
        return Ok(found);
    }

    // Stable sort keeps discovery order among equal sizes.
    regions.sort_by(|a, b| b.len().cmp(&a.len()));
    let mut rest = regions.into_iter();
    let mut merged = rest.next().unwrap_or_default();

    for region in rest {
        let from = merged[rng.gen_range(0..merged.len())];
        let to = region[rng.gen_range(0..region.len())];
        carve_l_corridor(grid, from, to, rng)?;
        merged.extend(region);
    }

    let remaining = find_regions(grid).len();
    if remaining > 1 {
        error!(
            "Connectivity repair left {} regions out of {}",
            remaining, found
        );
    }
    debug_assert!(remaining <= 1, "connectivity repair left {} regions", remaining);
    debug!("Merged {} floor regions", found);

    Ok(found)
}
