//! Level file loading.
//!
//! A level file holds one digit per tile followed by a two-character
//! separator (`", "`, or `",\n"` at the end of a row).

use super::types::*;
use std::fs;
use std::io;
use std::path::Path;

/// Characters per tile record: the digit plus its separator.
const RECORD_LEN: usize = 3;

pub fn level_file_name(level: u32) -> String {
    format!("level{level}.txt")
}

/// Parse level text. Missing trailing tiles come out as `Tile::Unknown`.
pub fn parse(text: &str, number: Option<u32>) -> Maze {
    let mut records = text.chars().step_by(RECORD_LEN);
    let tiles = (0..MAZE_ROWS * MAZE_COLS)
        .map(|_| match records.next() {
            Some(ch) => Tile::from_code(ch.to_digit(10).map_or(-1, |d| d as i32)),
            None => Tile::Unknown,
        })
        .collect();
    Maze::from_tiles(tiles, number)
}

/// Read `level<N>.txt` from `dir`.
pub fn try_load(dir: &Path, level: u32) -> io::Result<Maze> {
    if level == 0 || level > MAX_LEVELS {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("level {level} outside 1..={MAX_LEVELS}"),
        ));
    }
    let text = fs::read_to_string(dir.join(level_file_name(level)))?;
    Ok(parse(&text, Some(level)))
}

/// Like `try_load`, but a failure is logged and yields an empty maze.
pub fn load(dir: &Path, level: u32) -> Maze {
    match try_load(dir, level) {
        Ok(maze) => {
            log::info!(
                "loaded {} ({} void tiles)",
                level_file_name(level),
                maze.count(Tile::Void)
            );
            maze
        }
        Err(e) => {
            log::warn!("could not load {}: {e}", level_file_name(level));
            Maze::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_dir() -> std::path::PathBuf {
        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "lander_maze_test_{}_{}",
            std::process::id(),
            id
        ));
        fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    fn row(codes: &[u8]) -> String {
        let cells: Vec<String> = codes.iter().map(|c| c.to_string()).collect();
        format!("{},\n", cells.join(", "))
    }

    #[test]
    fn test_level_file_name() {
        assert_eq!(level_file_name(1), "level1.txt");
        assert_eq!(level_file_name(10), "level10.txt");
    }

    #[test]
    fn test_parse_rows() {
        let mut text = row(&[1; MAZE_COLS]);
        let mut second = [0u8; MAZE_COLS];
        second[0] = 1;
        second[MAZE_COLS - 1] = 2;
        text.push_str(&row(&second));

        let maze = parse(&text, Some(1));
        assert_eq!(maze.tile(0, 0), Some(Tile::Void));
        assert_eq!(maze.tile(0, MAZE_COLS - 1), Some(Tile::Void));
        assert_eq!(maze.tile(1, 0), Some(Tile::Void));
        assert_eq!(maze.tile(1, 1), Some(Tile::Path));
        assert_eq!(maze.tile(1, MAZE_COLS - 1), Some(Tile::Exit));
        // Past the end of the data
        assert_eq!(maze.tile(2, 0), Some(Tile::Unknown));
    }

    #[test]
    fn test_parse_unknown_character() {
        let maze = parse("x, 1, ", None);
        assert_eq!(maze.tile(0, 0), Some(Tile::Unknown));
        assert_eq!(maze.tile(0, 1), Some(Tile::Void));
    }

    #[test]
    fn test_try_load_from_dir() {
        let dir = temp_dir();
        let text: String = (0..MAZE_ROWS).map(|_| row(&[1; MAZE_COLS])).collect();
        fs::write(dir.join("level3.txt"), text).expect("write level");

        let maze = try_load(&dir, 3).expect("level should load");
        assert_eq!(maze.number, Some(3));
        assert_eq!(maze.count(Tile::Void), MAZE_ROWS * MAZE_COLS);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_level_gives_empty_maze() {
        let dir = temp_dir();
        let maze = load(&dir, 2);
        assert!(!maze.is_loaded());
        assert_eq!(maze, Maze::empty());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_level_out_of_range() {
        let dir = temp_dir();
        let err = try_load(&dir, MAX_LEVELS + 1).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(try_load(&dir, 0).is_err());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_shipped_level_parses() {
        let text = include_str!("../../assets/level1.txt");
        let maze = parse(text, Some(1));
        assert_eq!(maze.count(Tile::Unknown), 0);
        assert!(maze.count(Tile::Void) > 0);
        assert_eq!(maze.count(Tile::Exit), 1);
    }
}
