//! # Dungeon Generation
//!
//! Classic room-and-corridor layouts for the dungeon theme.
//!
//! Rooms are placed by rejection sampling: random rectangles are drawn and
//! kept only when they stay clear of every room accepted so far. Each new
//! room is joined to the previous one by an L-shaped corridor, which chains
//! all rooms into one connected layout.

use super::corridors::carve_l_corridor;
use super::decoration::room_stairs;
use super::{GenerationConfig, LayoutStrategy, Room};
use crate::level::{Grid, Position, Tile};
use crate::BurrowResult;
use log::debug;
use rand::{rngs::StdRng, Rng};

/// Primary dungeon generator using the room-and-corridor algorithm.
///
/// This generator creates dungeons by:
/// 1. Drawing candidate rooms and rejecting those that crowd existing rooms
/// 2. Connecting each accepted room to its predecessor with an L corridor
/// 3. Placing stairs up in the first room and stairs down in the last
#[derive(Debug, Clone, Default)]
pub struct RoomCorridorGenerator;

impl RoomCorridorGenerator {
    /// Creates a new dungeon generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{LayoutStrategy, RoomCorridorGenerator};
    ///
    /// let generator = RoomCorridorGenerator::new();
    /// assert!(generator.places_stairs());
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Places rooms until the target count is reached or the attempt budget
    /// runs out, carving each room and its corridor as it is accepted.
    fn place_rooms(
        &self,
        grid: &mut Grid,
        level: u32,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> BurrowResult<Vec<Room>> {
        let target = config.target_room_count(level) as usize;
        let max_attempts = target * config.placement_attempts_per_room as usize;
        let mut rooms: Vec<Room> = Vec::with_capacity(target);
        let mut attempts = 0;

        while rooms.len() < target && attempts < max_attempts {
            attempts += 1;

            let Some(room) = self.generate_room_candidate(grid, config, rng, rooms.len() as u32)
            else {
                continue;
            };

            if rooms.iter().any(|existing| room.intersects(existing)) {
                continue;
            }

            carve_room(grid, &room)?;
            if let Some(previous) = rooms.last() {
                carve_l_corridor(grid, room.center(), previous.center(), rng)?;
            }
            rooms.push(room);
        }

        debug!(
            "Placed {}/{} rooms in {} attempts",
            rooms.len(),
            target,
            attempts
        );

        Ok(rooms)
    }

    /// Draws a candidate room that lies entirely inside the border.
    ///
    /// Returns `None` when the drawn size leaves no legal position, which
    /// counts as a failed attempt.
    fn generate_room_candidate(
        &self,
        grid: &Grid,
        config: &GenerationConfig,
        rng: &mut StdRng,
        room_id: u32,
    ) -> Option<Room> {
        let width = rng.gen_range(config.min_room_width..=config.max_room_width);
        let height = rng.gen_range(config.min_room_height..=config.max_room_height);

        let max_x = grid.width() as i32 - width as i32 - 1;
        let max_y = grid.height() as i32 - height as i32 - 1;
        if max_x < 1 || max_y < 1 {
            return None;
        }

        let x = rng.gen_range(1..=max_x);
        let y = rng.gen_range(1..=max_y);

        Some(Room::new(room_id, Position::new(x, y), width, height))
    }

    /// Marks the first room's centre as the way up and the last room's
    /// centre as the way down (see [`room_stairs`] for a lone room).
    fn add_stairs(&self, grid: &mut Grid, rooms: &[Room]) -> BurrowResult<()> {
        if let Some((up, down)) = room_stairs(rooms) {
            grid.set_tile(up, Tile::StairsUp)?;
            grid.set_tile(down, Tile::StairsDown)?;
        }
        Ok(())
    }
}

/// Carves out a room by setting every tile inside it to floor.
///
/// Tiles on or beyond the grid border are left untouched.
pub fn carve_room(grid: &mut Grid, room: &Room) -> BurrowResult<()> {
    for pos in room.all_positions() {
        if grid.is_interior(pos) {
            grid.set_tile(pos, Tile::Floor)?;
        }
    }
    Ok(())
}

impl LayoutStrategy for RoomCorridorGenerator {
    fn carve(
        &self,
        grid: &mut Grid,
        level: u32,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> BurrowResult<Vec<Room>> {
        let rooms = self.place_rooms(grid, level, config, rng)?;
        self.add_stairs(grid, &rooms)?;
        Ok(rooms)
    }

    fn places_stairs(&self) -> bool {
        true
    }

    fn strategy_type(&self) -> &'static str {
        "RoomCorridorGenerator"
    }
}
