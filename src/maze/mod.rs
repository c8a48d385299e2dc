//! Tile maze, loaded from `level<N>.txt` files.

pub mod loader;
pub mod types;

pub use loader::{level_file_name, load, parse, try_load};
pub use types::{Level, Maze, Tile, MAX_LEVELS, MAZE_COLS, MAZE_ROWS, TILE_SIZE};
