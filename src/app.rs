//! Launch and suspend: what happens around the play session.

use crate::game::{logic, GameMode, LanderGame, Session, SharedGame};
use crate::maze::{self, Level};
use crate::utils::{SaveManager, SaveRecord, Settings};
use rand::Rng;
use std::io;

/// Build the session from settings: canvas size, difficulty and maze.
pub fn build_session(settings: &Settings, open_maze: bool) -> Session {
    let mut game = LanderGame::new();
    logic::set_surface_size(&mut game, settings.canvas_width, settings.canvas_height);
    logic::set_difficulty(&mut game, settings.difficulty);

    let mut session = Session::new(game, maze::load(&settings.assets_dir, settings.maze_level));
    if open_maze {
        session.level = Level::Maze;
    }
    session
}

/// Restore the saved record if there is one, otherwise show the title
/// screen. With `fresh` set the save is ignored.
pub fn launch<R: Rng>(
    shared: &SharedGame,
    saves: Option<&SaveManager>,
    fresh: bool,
    rng: &mut R,
) -> GameMode {
    // A new field so the first frame has something to draw
    logic::layout_field(&mut shared.lock().game, rng);

    let restored = match saves {
        Some(manager) if !fresh && manager.save_exists() => match manager.load() {
            Ok(record) => {
                log::info!("restoring state saved at {}", record.saved_at);
                shared.restore_state(&record.state);
                true
            }
            Err(e) => {
                log::warn!("discarding unreadable save: {e}");
                false
            }
        },
        _ => false,
    };

    if !restored {
        shared.set_state(GameMode::Ready, None);
    }
    shared.mode()
}

/// Pause and write the suspend record plus settings.
pub fn suspend(shared: &SharedGame, saves: Option<&SaveManager>, settings: &mut Settings) {
    match saves {
        Some(manager) => {
            if let Err(e) = save_only(shared, manager) {
                log::error!("save failed: {e}");
            }
        }
        None => shared.pause(),
    }

    settings.difficulty = shared.lock().game.difficulty;
    if let Err(e) = settings.save() {
        log::warn!("settings not saved: {e}");
    }
}

/// Pause and write the suspend record. Used on focus loss.
pub fn save_only(shared: &SharedGame, manager: &SaveManager) -> io::Result<()> {
    shared.pause();
    manager.save(&SaveRecord::now(shared.save_state()))
}
