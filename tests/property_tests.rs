//! Property-based tests for the structural guarantees of generated levels.

use burrow::generation::utils::validate_level;
use burrow::{GenerationConfig, LevelGenerator, Theme, Tile};
use proptest::prelude::*;

fn any_theme() -> impl Strategy<Value = Theme> {
    prop::sample::select(Theme::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn generation_is_deterministic(
        width in 3u32..60,
        height in 3u32..40,
        seed in any::<u64>(),
        level in 1u32..15,
        theme in any_theme(),
    ) {
        let mut a = LevelGenerator::new(width, height, Some(seed)).unwrap();
        let mut b = LevelGenerator::new(width, height, Some(seed)).unwrap();

        let first = a.generate(level, theme).unwrap();
        let second = b.generate(level, theme).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn border_stays_solid_and_everything_is_reachable(
        width in 3u32..60,
        height in 3u32..40,
        seed in any::<u64>(),
        level in 1u32..15,
        theme in any_theme(),
    ) {
        let mut generator = LevelGenerator::new(width, height, Some(seed)).unwrap();
        let result = generator.generate(level, theme).unwrap();

        prop_assert!(validate_level(&result.grid).is_ok());
    }

    #[test]
    fn rooms_never_crowd_each_other(
        width in 10u32..80,
        height in 10u32..50,
        seed in any::<u64>(),
        level in 1u32..15,
        theme in prop::sample::select(vec![Theme::Dungeon, Theme::Fortress]),
    ) {
        let mut generator = LevelGenerator::new(width, height, Some(seed)).unwrap();
        let result = generator.generate(level, theme).unwrap();

        for (i, a) in result.rooms.iter().enumerate() {
            for b in &result.rooms[i + 1..] {
                prop_assert!(!a.intersects(b), "{:?} crowds {:?}", a, b);
            }
        }
    }

    #[test]
    fn decoration_counts_stay_bounded(
        width in 10u32..80,
        height in 10u32..50,
        seed in any::<u64>(),
        level in 1u32..20,
        theme in any_theme(),
    ) {
        let config = GenerationConfig::new();
        let mut generator = LevelGenerator::new(width, height, Some(seed)).unwrap();
        let result = generator.generate(level, theme).unwrap();

        prop_assert!(result.tile_count(Tile::Chest) <= config.chest_count(result.rooms.len()));
        prop_assert!(result.tile_count(Tile::StairsUp) <= 1);
        prop_assert!(result.tile_count(Tile::StairsDown) <= 1);
        if level <= config.lava_min_level {
            prop_assert_eq!(result.tile_count(Tile::Lava), 0);
        }
    }
}
