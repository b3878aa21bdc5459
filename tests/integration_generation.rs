//! Integration tests for the level generation pipeline.

use burrow::generation::utils::{reachable_count, validate_level};
use burrow::{
    BurrowError, BurrowResult, FortressGridGenerator, FortressLattice, GenerationConfig, Grid,
    LayoutStrategy, LevelGenerator, Position, Theme, Tile,
};
use rand::{rngs::StdRng, SeedableRng};

fn border_is_solid(grid: &Grid) -> bool {
    grid.positions()
        .filter(|&p| grid.is_border(p))
        .all(|p| grid.get_tile(p) == Tile::Wall)
}

#[test]
fn test_small_dungeon_has_one_staircase_each_way() -> BurrowResult<()> {
    let mut generator = LevelGenerator::new(20, 20, Some(42))?;
    let result = generator.generate(1, Theme::Dungeon)?;

    assert!(border_is_solid(&result.grid));
    assert!(!result.rooms.is_empty());
    assert_eq!(result.tile_count(Tile::StairsUp), 1);
    assert_eq!(result.tile_count(Tile::StairsDown), 1);
    assert_eq!(result.stairs_up, Some(result.rooms[0].center()));

    Ok(())
}

#[test]
fn test_cave_is_fully_reachable() -> BurrowResult<()> {
    let mut generator = LevelGenerator::new(30, 30, Some(7))?;
    let result = generator.generate(3, Theme::Cave)?;
    let grid = &result.grid;

    assert!(result.rooms.is_empty());
    let passable: Vec<Position> = grid
        .positions()
        .filter(|&p| grid.get_tile(p).is_passable())
        .collect();
    assert!(!passable.is_empty());
    assert_eq!(reachable_count(grid, passable[0]), passable.len());

    Ok(())
}

#[test]
fn test_tiny_dimensions_are_rejected() {
    assert!(matches!(
        LevelGenerator::new(2, 2, None),
        Err(BurrowError::InvalidDimensions { .. })
    ));
}

#[test]
fn test_spawn_point_before_generation_fails() {
    let generator = LevelGenerator::new(20, 20, Some(1)).unwrap();
    assert!(matches!(
        generator.get_spawn_point(),
        Err(BurrowError::NotGenerated)
    ));
}

#[test]
fn test_fortress_rooms_follow_the_lattice() -> BurrowResult<()> {
    let config = GenerationConfig::new();
    let lattice = FortressLattice::new(40, 40, &config);
    assert_eq!(lattice.room_count(), 16);

    let mut generator = LevelGenerator::new(40, 40, Some(1))?;
    let result = generator.generate(10, Theme::Fortress)?;
    assert_eq!(result.rooms.len(), lattice.room_count());

    // Before decoration every room is a solid 6x6 block of floor.
    let mut grid = Grid::new(40, 40)?;
    let mut rng = StdRng::seed_from_u64(1);
    let rooms = FortressGridGenerator::new().carve(&mut grid, 10, &config, &mut rng)?;
    assert_eq!(rooms, result.rooms);
    for room in &rooms {
        assert_eq!((room.width, room.height), (6, 6));
        for pos in room.all_positions() {
            assert_eq!(grid.get_tile(pos), Tile::Floor);
        }
    }

    Ok(())
}

#[test]
fn test_identical_inputs_give_identical_levels() -> BurrowResult<()> {
    for theme in Theme::ALL {
        let mut a = LevelGenerator::new(64, 36, Some(2024))?;
        let mut b = LevelGenerator::new(64, 36, Some(2024))?;

        let first = a.generate(4, theme)?;
        let second = b.generate(4, theme)?;
        assert_eq!(first, second);
        assert_eq!(a.get_spawn_point()?, b.get_spawn_point()?);
    }
    Ok(())
}

#[test]
fn test_every_theme_produces_a_valid_level() -> BurrowResult<()> {
    for theme in Theme::ALL {
        for seed in [3, 17, 123_456] {
            let mut generator = LevelGenerator::new(80, 40, Some(seed))?;
            let result = generator.generate(7, theme)?;
            validate_level(&result.grid)?;
        }
    }
    Ok(())
}

#[test]
fn test_unknown_theme_falls_back_to_dungeon() -> BurrowResult<()> {
    let mut a = LevelGenerator::new(50, 30, Some(11))?;
    let mut b = LevelGenerator::new(50, 30, Some(11))?;

    let mixed = a.generate(2, Theme::from_name("mixed"))?;
    let dungeon = b.generate(2, Theme::Dungeon)?;
    assert_eq!(mixed, dungeon);

    Ok(())
}

#[test]
fn test_strict_mode_generation_never_writes_out_of_bounds() -> BurrowResult<()> {
    for theme in Theme::ALL {
        let mut generator =
            LevelGenerator::with_config(33, 21, Some(5), GenerationConfig::strict())?;
        let result = generator.generate(8, theme)?;
        assert!(border_is_solid(&result.grid));
    }
    Ok(())
}

#[test]
fn test_ascii_output_round_trips() -> BurrowResult<()> {
    let mut generator = LevelGenerator::new(40, 20, Some(99))?;
    let result = generator.generate(6, Theme::Cave)?;

    let text = result.grid.to_ascii();
    assert_eq!(text.lines().count(), 20);
    assert!(text.lines().all(|line| line.chars().count() == 40));
    assert_eq!(Grid::from_ascii(&text)?, result.grid);

    Ok(())
}
