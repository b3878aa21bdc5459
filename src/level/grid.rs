//! # Tile Grid
//!
//! Fixed-size, row-major storage for a level's tiles.
//!
//! Reads are total: anything outside the grid reads as [`Tile::Wall`], which is
//! what the cave automaton and the flood fill rely on to treat the map edge as
//! solid rock. Writes outside the grid are clipped, or rejected when the grid
//! is in strict mode.

use super::{Position, Tile};
use crate::{config, BurrowError, BurrowResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A `width × height` grid of tiles with its origin at the top-left corner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridSnapshot", into = "GridSnapshot")]
pub struct Grid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
    strict: bool,
}

/// Text form of a grid used for serialization: one glyph string per row.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GridSnapshot {
    width: u32,
    height: u32,
    rows: Vec<String>,
    #[serde(default)]
    strict: bool,
}

impl Grid {
    /// Creates a grid filled with walls.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{Grid, Position, Tile};
    ///
    /// let grid = Grid::new(10, 8).unwrap();
    /// assert_eq!(grid.get_tile(Position::new(4, 4)), Tile::Wall);
    /// assert!(Grid::new(2, 8).is_err());
    /// ```
    pub fn new(width: u32, height: u32) -> BurrowResult<Self> {
        if width < config::MIN_DIMENSION || height < config::MIN_DIMENSION {
            return Err(BurrowError::InvalidDimensions { width, height });
        }

        Ok(Self {
            width,
            height,
            tiles: vec![Tile::Wall; width as usize * height as usize],
            strict: false,
        })
    }

    /// Creates a wall-filled grid that rejects out-of-bounds writes.
    pub fn new_strict(width: u32, height: u32) -> BurrowResult<Self> {
        let mut grid = Self::new(width, height)?;
        grid.strict = true;
        Ok(grid)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Checks whether a position lies inside the grid.
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Checks whether a position lies inside the grid but off the outer ring.
    pub fn is_interior(&self, pos: Position) -> bool {
        pos.x > 0
            && pos.y > 0
            && (pos.x as u32) < self.width - 1
            && (pos.y as u32) < self.height - 1
    }

    /// Checks whether a position is on the outermost ring of the grid.
    pub fn is_border(&self, pos: Position) -> bool {
        self.is_in_bounds(pos) && !self.is_interior(pos)
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.is_in_bounds(pos) {
            Some(pos.y as usize * self.width as usize + pos.x as usize)
        } else {
            None
        }
    }

    /// Reads the tile at a position. Out-of-bounds positions read as walls.
    pub fn get_tile(&self, pos: Position) -> Tile {
        self.index(pos).map_or(Tile::Wall, |i| self.tiles[i])
    }

    /// Writes a tile at a position.
    ///
    /// Out-of-bounds writes are ignored, or fail with
    /// [`BurrowError::OutOfBounds`] in strict mode.
    pub fn set_tile(&mut self, pos: Position, tile: Tile) -> BurrowResult<()> {
        match self.index(pos) {
            Some(i) => {
                self.tiles[i] = tile;
                Ok(())
            }
            None if self.strict => Err(BurrowError::OutOfBounds { x: pos.x, y: pos.y }),
            None => Ok(()),
        }
    }

    /// Resets every tile to the given kind.
    pub fn fill(&mut self, tile: Tile) {
        self.tiles.fill(tile);
    }

    /// Counts the walls among the 8 neighbours of a position.
    ///
    /// Neighbours outside the grid count as walls.
    pub fn count_adjacent_walls(&self, pos: Position) -> u8 {
        pos.adjacent_positions()
            .iter()
            .filter(|&&p| self.get_tile(p) == Tile::Wall)
            .count() as u8
    }

    /// Counts the tiles of a given kind.
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    /// Iterates over every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| Position::new(x, y)))
    }

    /// Iterates over every interior position in row-major order.
    pub fn interior_positions(&self) -> impl Iterator<Item = Position> + '_ {
        (1..self.height as i32 - 1)
            .flat_map(move |y| (1..self.width as i32 - 1).map(move |x| Position::new(x, y)))
    }

    /// Returns the positions of every tile of a given kind, row-major.
    pub fn find_all(&self, tile: Tile) -> Vec<Position> {
        self.positions()
            .filter(|&p| self.get_tile(p) == tile)
            .collect()
    }

    /// Returns the tiles of one row.
    pub fn row(&self, y: u32) -> &[Tile] {
        let start = y as usize * self.width as usize;
        &self.tiles[start..start + self.width as usize]
    }

    /// Encodes the grid as one line of glyphs per row.
    pub fn to_ascii(&self) -> String {
        self.to_string()
    }

    /// Parses a grid from lines of glyphs.
    ///
    /// Every line must have the same length; blank trailing lines are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{Grid, Position, Tile};
    ///
    /// let grid = Grid::from_ascii("####\n#.C#\n####").unwrap();
    /// assert_eq!(grid.width(), 4);
    /// assert_eq!(grid.get_tile(Position::new(2, 1)), Tile::Chest);
    /// ```
    pub fn from_ascii(text: &str) -> BurrowResult<Self> {
        let rows: Vec<&str> = text.lines().filter(|line| !line.is_empty()).collect();
        Self::from_rows(&rows)
    }

    fn from_rows<S: AsRef<str>>(rows: &[S]) -> BurrowResult<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count()) as u32;
        let mut grid = Self::new(width, height)?;

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() as u32 != width {
                return Err(BurrowError::InvalidDimensions { width, height });
            }
            for (x, glyph) in row.chars().enumerate() {
                grid.set_tile(Position::new(x as i32, y as i32), Tile::from_glyph(glyph)?)?;
            }
        }

        Ok(grid)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            let line: String = self.row(y).iter().map(|t| t.glyph()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl From<Grid> for GridSnapshot {
    fn from(grid: Grid) -> Self {
        let rows = (0..grid.height)
            .map(|y| grid.row(y).iter().map(|t| t.glyph()).collect())
            .collect();
        Self {
            width: grid.width,
            height: grid.height,
            rows,
            strict: grid.strict,
        }
    }
}

impl TryFrom<GridSnapshot> for Grid {
    type Error = BurrowError;

    fn try_from(snapshot: GridSnapshot) -> Result<Self, Self::Error> {
        let mut grid = Self::from_rows(&snapshot.rows)?;
        if grid.width != snapshot.width || grid.height != snapshot.height {
            return Err(BurrowError::InvalidDimensions {
                width: snapshot.width,
                height: snapshot.height,
            });
        }
        grid.strict = snapshot.strict;
        Ok(grid)
    }
}
