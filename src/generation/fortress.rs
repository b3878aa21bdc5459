//! # Fortress Generation
//!
//! Regular fortress layouts: equal square rooms on a lattice, each joined to
//! its right and lower neighbours by straight corridors.

use super::corridors::{carve_horizontal, carve_vertical};
use super::dungeon::carve_room;
use super::{GenerationConfig, LayoutStrategy, Room};
use crate::level::{Grid, Position};
use crate::BurrowResult;
use log::debug;
use rand::rngs::StdRng;

/// Lattice-based fortress generator.
///
/// Fully deterministic: it draws nothing from the random number generator.
#[derive(Debug, Clone, Default)]
pub struct FortressGridGenerator;

/// Placement of the room lattice on a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FortressLattice {
    /// Rooms per lattice row
    pub columns: u32,
    /// Number of lattice rows
    pub rows: u32,
    /// Distance between the top-left corners of neighbouring rooms
    pub step: u32,
    /// Side of every room
    pub room_size: u32,
}

impl FortressLattice {
    /// Computes the lattice for a grid of the given size.
    ///
    /// Rooms start at (1, 1) and repeat every `room_size + corridor_width`
    /// tiles for as long as a room still ends short of the last interior
    /// row or column.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{FortressLattice, GenerationConfig};
    ///
    /// let lattice = FortressLattice::new(40, 40, &GenerationConfig::new());
    /// assert_eq!((lattice.columns, lattice.rows), (4, 4));
    /// assert_eq!(lattice.room_count(), 16);
    /// ```
    pub fn new(width: u32, height: u32, config: &GenerationConfig) -> Self {
        let room_size = config.fortress_room_size;
        let step = (room_size + config.fortress_corridor_width).max(1);
        let fit = |dimension: u32| {
            // Count of k with 1 + k*step + room_size < dimension - 1.
            let limit = dimension.saturating_sub(room_size + 1);
            if limit <= 1 {
                0
            } else {
                (limit - 2) / step + 1
            }
        };

        Self {
            columns: fit(width),
            rows: fit(height),
            step,
            room_size,
        }
    }

    pub fn room_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Top-left corner of the room at a lattice cell.
    pub fn origin(&self, column: u32, row: u32) -> Position {
        Position::new(
            1 + (column * self.step) as i32,
            1 + (row * self.step) as i32,
        )
    }
}

impl FortressGridGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Links every room to its right neighbour in the same lattice row and
    /// to the room directly below it.
    fn connect_rooms(&self, grid: &mut Grid, rooms: &[Room], columns: usize) -> BurrowResult<()> {
        for (i, room) in rooms.iter().enumerate() {
            let center = room.center();

            if (i + 1) % columns != 0 {
                if let Some(right) = rooms.get(i + 1) {
                    let start = room.top_left.x + room.width as i32;
                    carve_horizontal(grid, start, right.top_left.x, center.y)?;
                }
            }

            if let Some(below) = rooms.get(i + columns) {
                let start = room.top_left.y + room.height as i32;
                carve_vertical(grid, center.x, start, below.top_left.y)?;
            }
        }
        Ok(())
    }
}

impl LayoutStrategy for FortressGridGenerator {
    fn carve(
        &self,
        grid: &mut Grid,
        _level: u32,
        config: &GenerationConfig,
        _rng: &mut StdRng,
    ) -> BurrowResult<Vec<Room>> {
        let lattice = FortressLattice::new(grid.width(), grid.height(), config);
        let mut rooms = Vec::with_capacity(lattice.room_count());

        for row in 0..lattice.rows {
            for column in 0..lattice.columns {
                let room = Room::new(
                    rooms.len() as u32,
                    lattice.origin(column, row),
                    lattice.room_size,
                    lattice.room_size,
                );
                carve_room(grid, &room)?;
                rooms.push(room);
            }
        }

        if lattice.columns > 0 {
            self.connect_rooms(grid, &rooms, lattice.columns as usize)?;
        }
        debug!(
            "Fortress lattice {}x{} with {} rooms",
            lattice.columns,
            lattice.rows,
            rooms.len()
        );

        Ok(rooms)
    }

    fn strategy_type(&self) -> &'static str {
        "FortressGridGenerator"
    }
}
