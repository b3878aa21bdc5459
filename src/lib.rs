//! # Burrow
//!
//! A seeded procedural level generator for roguelike maps.
//!
//! ## Architecture Overview
//!
//! Generation is a single-pass pipeline driven by one seeded random number
//! generator, so every layout can be reproduced from its seed:
//!
//! - **Level**: tile vocabulary, positions and the bounds-checked [`Grid`]
//! - **Strategies**: interchangeable [`LayoutStrategy`] implementations that
//!   carve a layout into the grid (rooms and corridors, caves, fortresses)
//! - **Connectivity**: flood-fill region analysis and corridor repair that
//!   guarantees every passable tile is reachable
//! - **Decoration**: doors, hazard pools, chests and stairs
//! - **Façade**: [`LevelGenerator`], which owns the seed and ties it together
//!
//! ## Example
//!
//! ```
//! use burrow::{LevelGenerator, Theme, Tile};
//!
//! let mut generator = LevelGenerator::new(40, 30, Some(42)).unwrap();
//! let result = generator.generate(2, Theme::Dungeon).unwrap();
//!
//! assert_eq!(result.grid.get_tile(burrow::Position::new(0, 0)), Tile::Wall);
//! assert!(!result.rooms.is_empty());
//! ```

pub mod generation;
pub mod level;

// Core module re-exports
pub use generation::*;
pub use level::*;

pub use generation::{
    CellularCaveGenerator, FortressGridGenerator, GenerationConfig, GenerationResult,
    LayoutStrategy, LevelGenerator, Room, RoomCorridorGenerator, Theme,
};
pub use level::{Grid, Position, Tile};

/// Core error type for the Burrow level generator.
#[derive(thiserror::Error, Debug)]
pub enum BurrowError {
    /// Grid dimensions too small to hold a border and an interior
    #[error("Invalid dimensions {width}x{height}: both must be at least 3")]
    InvalidDimensions { width: u32, height: u32 },

    /// Spawn point or result queried before any level was generated
    #[error("No level has been generated yet")]
    NotGenerated,

    /// Write outside the grid while in strict mode
    #[error("Position ({x}, {y}) is out of bounds")]
    OutOfBounds { x: i32, y: i32 },

    /// Generation parameters are inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Character that does not encode any tile
    #[error("Invalid tile glyph: {0:?}")]
    InvalidGlyph(char),

    /// Generated level failed validation
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type used throughout the Burrow codebase.
pub type BurrowResult<T> = Result<T, BurrowError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generator configuration constants.
pub mod config {
    /// Default level width in tiles
    pub const DEFAULT_LEVEL_WIDTH: u32 = 80;

    /// Default level height in tiles
    pub const DEFAULT_LEVEL_HEIGHT: u32 = 40;

    /// Smallest width or height that still leaves an interior inside the border
    pub const MIN_DIMENSION: u32 = 3;

    /// Upper bound (inclusive) for seeds drawn when the caller supplies none
    pub const MAX_RANDOM_SEED: u64 = 999_999;
}
