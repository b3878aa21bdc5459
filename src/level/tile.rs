//! # Tiles
//!
//! The closed set of tile kinds a generated level is made of, plus the
//! single-character glyphs used when a level crosses a text boundary.

use crate::{BurrowError, BurrowResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell of a generated level.
///
/// Tiles carry no attributes; the grid is the only store of level state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tile {
    /// Solid rock. The only tile that blocks movement.
    #[default]
    Wall,
    Floor,
    Door,
    StairsDown,
    StairsUp,
    Water,
    Lava,
    Chest,
}

impl Tile {
    /// Every tile kind, in declaration order.
    pub const ALL: [Tile; 8] = [
        Tile::Wall,
        Tile::Floor,
        Tile::Door,
        Tile::StairsDown,
        Tile::StairsUp,
        Tile::Water,
        Tile::Lava,
        Tile::Chest,
    ];

    /// Returns the glyph used for this tile in text encodings.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::Tile;
    ///
    /// assert_eq!(Tile::Wall.glyph(), '#');
    /// assert_eq!(Tile::StairsDown.glyph(), '>');
    /// ```
    pub fn glyph(self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Floor => '.',
            Tile::Door => '+',
            Tile::StairsDown => '>',
            Tile::StairsUp => '<',
            Tile::Water => '~',
            Tile::Lava => '^',
            Tile::Chest => 'C',
        }
    }

    /// Parses a glyph back into a tile.
    pub fn from_glyph(glyph: char) -> BurrowResult<Tile> {
        match glyph {
            '#' => Ok(Tile::Wall),
            '.' => Ok(Tile::Floor),
            '+' => Ok(Tile::Door),
            '>' => Ok(Tile::StairsDown),
            '<' => Ok(Tile::StairsUp),
            '~' => Ok(Tile::Water),
            '^' => Ok(Tile::Lava),
            'C' => Ok(Tile::Chest),
            other => Err(BurrowError::InvalidGlyph(other)),
        }
    }

    /// Whether a walker can enter this tile. Only walls block.
    pub fn is_passable(self) -> bool {
        !matches!(self, Tile::Wall)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}
