pub mod logic;
pub mod session;
pub mod types;

pub use session::{GameThread, Session, SharedGame};
pub use types::{
    Diamond, Difficulty, GameEvent, GameMode, LanderGame, Rect, SavedState, StatusEvent,
    TickOutcome,
};
