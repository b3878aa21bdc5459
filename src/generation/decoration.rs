//! # Decoration Passes
//!
//! Passes that run after a layout has been carved, whatever its theme:
//! stairs, doors, hazard pools and chests, plus the spawn point search.
//!
//! Every pass is best-effort. A draw that lands on an unsuitable tile is
//! skipped, never retried, so counts are upper bounds rather than promises.

use super::utils::find_random_floor;
use super::{GenerationConfig, Room};
use crate::level::{Grid, Position, Tile};
use crate::BurrowResult;
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, Rng};

/// Chooses stair positions for a list of rooms.
///
/// The way up is the first room's centre and the way down the last room's
/// centre. A lone room keeps both: the way down moves to the room's first
/// interior tile, or its corner when the room is too small to have one
/// besides the centre.
///
/// Writing both stairs to a lone room's centre would leave only the way
/// down; this layout always offers one staircase in each direction.
pub fn room_stairs(rooms: &[Room]) -> Option<(Position, Position)> {
    let (first, last) = (rooms.first()?, rooms.last()?);
    let up = first.center();
    if rooms.len() > 1 {
        return Some((up, last.center()));
    }

    let corner = first.top_left + Position::new(1, 1);
    let down = if corner != up { corner } else { first.top_left };
    Some((up, down))
}

/// Places stairs for layouts whose strategy did not.
///
/// Rooms get stairs from [`room_stairs`]. Without rooms, each staircase
/// takes a random floor tile, or is left out if probing finds none.
pub fn place_stairs(
    grid: &mut Grid,
    rooms: &[Room],
    config: &GenerationConfig,
    rng: &mut StdRng,
) -> BurrowResult<()> {
    if let Some((up, down)) = room_stairs(rooms) {
        grid.set_tile(up, Tile::StairsUp)?;
        grid.set_tile(down, Tile::StairsDown)?;
        return Ok(());
    }

    for stairs in [Tile::StairsUp, Tile::StairsDown] {
        if let Some(pos) = find_random_floor(grid, rng, config.spawn_probes) {
            grid.set_tile(pos, stairs)?;
        }
    }
    Ok(())
}

/// Adds doors where a room's top or bottom edge opens straight onto floor.
///
/// Returns the number of doors placed.
pub fn add_doors(
    grid: &mut Grid,
    rooms: &[Room],
    config: &GenerationConfig,
    rng: &mut StdRng,
) -> BurrowResult<usize> {
    let border_row = grid.height() as i32 - 1;
    let mut doors = 0;

    for room in rooms {
        let top = room.top_left.y;
        let bottom = top + room.height as i32 - 1;

        for x in room.top_left.x..room.top_left.x + room.width as i32 {
            let edge = Position::new(x, top);
            if top > 0
                && grid.get_tile(edge) == Tile::Floor
                && grid.get_tile(Position::new(x, top - 1)) == Tile::Floor
                && rng.gen_bool(config.door_chance)
            {
                grid.set_tile(edge, Tile::Door)?;
                doors += 1;
            }

            let edge = Position::new(x, bottom);
            if bottom + 1 < border_row
                && grid.get_tile(edge) == Tile::Floor
                && grid.get_tile(Position::new(x, bottom + 1)) == Tile::Floor
                && rng.gen_bool(config.door_chance)
            {
                grid.set_tile(edge, Tile::Door)?;
                doors += 1;
            }
        }
    }

    Ok(doors)
}

/// Floods random squares with water, or lava on deep levels.
///
/// Only floor tiles inside a square change. Returns the number of pools
/// drawn, which never exceeds [`GenerationConfig::max_pool_count`].
pub fn add_hazard_pools(
    grid: &mut Grid,
    level: u32,
    config: &GenerationConfig,
    rng: &mut StdRng,
) -> BurrowResult<u32> {
    let pools = rng.gen_range(0..=config.max_pool_count(level));

    for _ in 0..pools {
        let size = rng.gen_range(config.min_pool_size..=config.max_pool_size) as i32;
        let max_x = grid.width() as i32 - size - 1;
        let max_y = grid.height() as i32 - size - 1;
        if max_x < 1 || max_y < 1 {
            continue;
        }

        let x = rng.gen_range(1..=max_x);
        let y = rng.gen_range(1..=max_y);
        let hazard = if level > config.lava_min_level && rng.gen_bool(config.lava_chance) {
            Tile::Lava
        } else {
            Tile::Water
        };

        for dy in 0..size {
            for dx in 0..size {
                let pos = Position::new(x + dx, y + dy);
                if grid.get_tile(pos) == Tile::Floor {
                    grid.set_tile(pos, hazard)?;
                }
            }
        }
    }

    Ok(pools)
}

/// Drops chests on random floor tiles inside random rooms.
///
/// Each draw picks a room, then one of its [`Room::interior_positions`];
/// rooms without an interior are skipped. Returns the number of chests
/// actually placed.
pub fn add_chests(
    grid: &mut Grid,
    rooms: &[Room],
    config: &GenerationConfig,
    rng: &mut StdRng,
) -> BurrowResult<usize> {
    let mut placed = 0;

    for _ in 0..config.chest_count(rooms.len()) {
        let room = &rooms[rng.gen_range(0..rooms.len())];
        let Some(&pos) = room.interior_positions().choose(rng) else {
            continue;
        };
        if grid.get_tile(pos) == Tile::Floor {
            grid.set_tile(pos, Tile::Chest)?;
            placed += 1;
        }
    }

    Ok(placed)
}

/// Picks where the player enters the level.
///
/// The first room's centre if there are rooms; otherwise a probed floor tile,
/// falling back to the grid centre. The fallback is not guaranteed to be
/// walkable.
pub fn find_spawn_point(
    grid: &Grid,
    rooms: &[Room],
    config: &GenerationConfig,
    rng: &mut StdRng,
) -> Position {
    if let Some(first) = rooms.first() {
        return first.center();
    }

    find_random_floor(grid, rng, config.spawn_probes).unwrap_or_else(|| {
        Position::new(grid.width() as i32 / 2, grid.height() as i32 / 2)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::dungeon::carve_room;
    use crate::generation::utils;

    fn with_certain_doors(mut config: GenerationConfig) -> GenerationConfig {
        config.door_chance = 1.0;
        config
    }

    #[test]
    fn test_doors_only_where_room_edge_meets_floor() {
        // Room spans rows 2..=4; a corridor enters the top edge at x=3 and
        // the bottom edge at x=5.
        let mut grid = Grid::from_ascii(
            "#########\n\
             ###.#####\n\
             ##.....##\n\
             ##.....##\n\
             ##.....##\n\
             #####.###\n\
             #####.###\n\
             #########",
        )
        .unwrap();
        let room = Room::new(0, Position::new(2, 2), 5, 3);
        let mut rng = utils::create_rng(1);

        let config = with_certain_doors(GenerationConfig::new());
        let doors = add_doors(&mut grid, &[room], &config, &mut rng).unwrap();

        assert_eq!(doors, 2);
        assert_eq!(grid.get_tile(Position::new(3, 2)), Tile::Door);
        assert_eq!(grid.get_tile(Position::new(5, 4)), Tile::Door);
    }

    #[test]
    fn test_no_doors_with_zero_chance() {
        let mut grid = Grid::from_ascii("#####\n#...#\n#...#\n#...#\n#####").unwrap();
        let room = Room::new(0, Position::new(1, 2), 3, 1);
        let mut config = GenerationConfig::new();
        config.door_chance = 0.0;
        let mut rng = utils::create_rng(1);

        assert_eq!(add_doors(&mut grid, &[room], &config, &mut rng).unwrap(), 0);
        assert_eq!(grid.count(Tile::Door), 0);
    }

    #[test]
    fn test_pools_only_flood_floor() {
        let mut grid = Grid::new(30, 30).unwrap();
        carve_room(&mut grid, &Room::new(0, Position::new(1, 1), 14, 28)).unwrap();
        let walls_before = grid.count(Tile::Wall);

        for seed in 0..20 {
            let mut rng = utils::create_rng(seed);
            let pools = add_hazard_pools(&mut grid, 1, &GenerationConfig::new(), &mut rng).unwrap();
            assert!(pools <= 2);
        }

        assert_eq!(grid.count(Tile::Wall), walls_before);
        assert_eq!(grid.count(Tile::Lava), 0);
        assert!(grid.count(Tile::Water) > 0);
    }

    #[test]
    fn test_lava_needs_depth() {
        let mut config = GenerationConfig::new();
        config.lava_chance = 1.0;
        config.base_pool_count = 50;

        let mut shallow = Grid::new(20, 20).unwrap();
        shallow.fill(Tile::Floor);
        let mut rng = utils::create_rng(5);
        add_hazard_pools(&mut shallow, 5, &config, &mut rng).unwrap();
        assert_eq!(shallow.count(Tile::Lava), 0);

        let mut deep = Grid::new(20, 20).unwrap();
        deep.fill(Tile::Floor);
        let mut rng = utils::create_rng(5);
        let pools = add_hazard_pools(&mut deep, 6, &config, &mut rng).unwrap();
        assert!(pools == 0 || deep.count(Tile::Lava) > 0);
        assert_eq!(deep.count(Tile::Water), 0);
    }

    #[test]
    fn test_chests_stay_inside_room_interiors() {
        let mut grid = Grid::new(40, 20).unwrap();
        let rooms: Vec<Room> = (0..9)
            .map(|i| Room::new(i, Position::new(1 + 4 * i as i32, 1), 3, 3))
            .collect();
        for room in &rooms {
            carve_room(&mut grid, room).unwrap();
        }
        let mut rng = utils::create_rng(11);

        let placed = add_chests(&mut grid, &rooms, &GenerationConfig::new(), &mut rng).unwrap();

        // 3x3 rooms have exactly one interior tile: their centre.
        assert!((1..=3).contains(&placed));
        assert_eq!(grid.count(Tile::Chest), placed);
        for pos in grid.find_all(Tile::Chest) {
            assert!(rooms.iter().any(|r| r.center() == pos));
        }
    }

    #[test]
    fn test_chests_skip_rooms_without_interior() {
        let mut grid = Grid::new(30, 10).unwrap();
        let rooms: Vec<Room> = (0..6)
            .map(|i| Room::new(i, Position::new(1 + 4 * i as i32, 1), 2, 6))
            .collect();
        for room in &rooms {
            carve_room(&mut grid, room).unwrap();
        }
        let mut rng = utils::create_rng(4);

        assert_eq!(add_chests(&mut grid, &rooms, &GenerationConfig::new(), &mut rng).unwrap(), 0);
        assert_eq!(grid.count(Tile::Chest), 0);
    }

    #[test]
    fn test_no_chests_without_enough_rooms() {
        let mut grid = Grid::new(20, 20).unwrap();
        let rooms = vec![Room::new(0, Position::new(2, 2), 5, 5)];
        carve_room(&mut grid, &rooms[0]).unwrap();
        let mut rng = utils::create_rng(11);

        assert_eq!(add_chests(&mut grid, &rooms, &GenerationConfig::new(), &mut rng).unwrap(), 0);
        assert_eq!(add_chests(&mut grid, &[], &GenerationConfig::new(), &mut rng).unwrap(), 0);
    }

    #[test]
    fn test_room_stairs() {
        let a = Room::new(0, Position::new(2, 2), 6, 4);
        let b = Room::new(1, Position::new(12, 2), 4, 4);
        assert_eq!(room_stairs(&[]), None);
        assert_eq!(
            room_stairs(&[a.clone(), b]),
            Some((Position::new(5, 4), Position::new(14, 4)))
        );
        assert_eq!(
            room_stairs(&[a]),
            Some((Position::new(5, 4), Position::new(3, 3)))
        );

        let tiny = Room::new(0, Position::new(2, 2), 3, 3);
        assert_eq!(
            room_stairs(&[tiny]),
            Some((Position::new(3, 3), Position::new(2, 2)))
        );
    }

    #[test]
    fn test_stairs_without_rooms_use_floor_tiles() {
        let mut grid = Grid::new(10, 10).unwrap();
        carve_room(&mut grid, &Room::new(0, Position::new(1, 1), 8, 8)).unwrap();
        let mut rng = utils::create_rng(21);

        place_stairs(&mut grid, &[], &GenerationConfig::new(), &mut rng).unwrap();

        assert_eq!(grid.count(Tile::StairsUp), 1);
        assert_eq!(grid.count(Tile::StairsDown), 1);
    }

    #[test]
    fn test_stairs_skipped_on_solid_rock() {
        let mut grid = Grid::new(10, 10).unwrap();
        let mut rng = utils::create_rng(21);

        place_stairs(&mut grid, &[], &GenerationConfig::new(), &mut rng).unwrap();
        assert_eq!(grid.count(Tile::Wall), 100);
    }

    #[test]
    fn test_spawn_point_fallbacks() {
        let config = GenerationConfig::new();
        let mut rng = utils::create_rng(8);

        let solid = Grid::new(11, 7).unwrap();
        assert_eq!(
            find_spawn_point(&solid, &[], &config, &mut rng),
            Position::new(5, 3)
        );

        let room = Room::new(0, Position::new(2, 2), 4, 4);
        assert_eq!(
            find_spawn_point(&solid, &[room], &config, &mut rng),
            Position::new(4, 4)
        );
    }
}
