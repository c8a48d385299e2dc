//! Maze grid types.

/// Tile edge length in logical pixels.
pub const TILE_SIZE: u32 = 40;
pub const MAZE_COLS: usize = 20;
pub const MAZE_ROWS: usize = 26;
/// Level files are numbered 1 through this.
pub const MAX_LEVELS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tile {
    #[default]
    Path,
    Void,
    Exit,
    /// A code the loader did not recognise, or data past the end of file.
    Unknown,
}

impl Tile {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Path,
            1 => Self::Void,
            2 => Self::Exit,
            _ => Self::Unknown,
        }
    }
}

/// The view currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Level {
    #[default]
    Lunar,
    Maze,
}

impl Level {
    pub fn toggled(self) -> Self {
        match self {
            Self::Lunar => Self::Maze,
            Self::Maze => Self::Lunar,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Lunar => "Lunar surface",
            Self::Maze => "Maze",
        }
    }
}

/// A fixed-size maze grid stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    tiles: Vec<Tile>,
    /// Level number the grid came from; `None` for an empty maze.
    pub number: Option<u32>,
}

impl Default for Maze {
    fn default() -> Self {
        Self::empty()
    }
}

impl Maze {
    /// An all-path grid. Stands in when a level fails to load.
    pub fn empty() -> Self {
        Self {
            tiles: vec![Tile::Path; MAZE_ROWS * MAZE_COLS],
            number: None,
        }
    }

    pub(super) fn from_tiles(tiles: Vec<Tile>, number: Option<u32>) -> Self {
        Self { tiles, number }
    }

    pub fn is_loaded(&self) -> bool {
        self.number.is_some()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, row: usize, col: usize) -> Option<Tile> {
        if row >= MAZE_ROWS || col >= MAZE_COLS {
            return None;
        }
        self.tiles.get(row * MAZE_COLS + col).copied()
    }

    /// Pixel origin of tile `index`.
    pub fn tile_origin(index: usize) -> (u32, u32) {
        let row = (index / MAZE_COLS) as u32;
        let col = (index % MAZE_COLS) as u32;
        (col * TILE_SIZE, row * TILE_SIZE)
    }

    pub fn count(&self, kind: Tile) -> usize {
        self.tiles.iter().filter(|t| **t == kind).count()
    }

    /// Grid size in logical pixels.
    pub fn pixel_size() -> (u32, u32) {
        (MAZE_COLS as u32 * TILE_SIZE, MAZE_ROWS as u32 * TILE_SIZE)
    }
}
