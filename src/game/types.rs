//! Lunar Lander Extended data structures.
//!
//! A side-scrolling arcade game: Blob hops along the lunar ground while the
//! world scrolls beneath it, collecting bobbing diamonds and avoiding craters
//! that drain its energy.

use crate::core::constants::*;
use crate::core::Vector2;
use serde::{Deserialize, Serialize};

/// Game mode. Exactly one is active; physics only runs in `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Ready,
    Running,
    Pause,
    Lose,
    Win,
}

impl GameMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ready => "Ready",
            Self::Running => "Running",
            Self::Pause => "Paused",
            Self::Lose => "Lost",
            Self::Win => "Won",
        }
    }

    /// True for the modes from which a key press starts a fresh run.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Ready | Self::Lose | Self::Win)
    }
}

/// Difficulty setting. Stored and persisted; physics does not read it yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Integer code used by the saved state record.
    pub fn code(&self) -> i32 {
        match self {
            Self::Easy => 0,
            Self::Hard => 1,
            Self::Medium => 2,
        }
    }

    /// Unknown codes fall back to `Easy`.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => Self::Hard,
            2 => Self::Medium,
            _ => Self::Easy,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

/// A collectible diamond. `x` is relative to the scroll origin, `y` absolute.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Diamond {
    pub x: f32,
    pub y: f32,
    /// Vertical bob speed in px/s; the sign flips at the screen margins.
    pub speed: f32,
    pub visible: bool,
}

/// Axis-aligned rectangle with half-open containment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.left < self.right
            && self.top < self.bottom
            && x >= self.left
            && x < self.right
            && y >= self.top
            && y < self.bottom
    }
}

/// Text for the status display, emitted by every `set_state`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusEvent {
    pub text: String,
    pub visible: bool,
    /// Only present on the transition into `Running`.
    pub diamonds: Option<u32>,
}

/// Something that happened during one physics tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    DiamondCollected { index: usize },
    CraterBounce { index: usize },
    EnergyDrained { remaining: i32 },
}

/// Result of one call to `update_physics`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    pub events: Vec<GameEvent>,
    /// `None` when the tick did not advance (not running, or inside the
    /// start/resume grace period).
    pub status: Option<StatusEvent>,
}

impl TickOutcome {
    pub fn advanced(&self) -> bool {
        self.status.is_some()
    }
}

/// The small state record written on suspend and read back on resume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavedState {
    pub difficulty: i32,
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub ball_width: i32,
    pub ball_height: i32,
    pub diamonds: u32,
}

/// Main game state.
#[derive(Debug, Clone)]
pub struct LanderGame {
    pub mode: GameMode,
    pub difficulty: Difficulty,

    /// Logical canvas size. The ground line is `y == canvas_height`.
    pub canvas_width: u32,
    pub canvas_height: u32,

    // Blob
    /// Screen position; x stays fixed while the world scrolls.
    pub ball: Vector2,
    pub velocity: Vector2,
    pub ball_width: i32,
    pub ball_height: i32,
    /// Set by a jump, consumed by the next physics tick.
    pub jumping: bool,
    /// Steering input in degrees (already negated from the raw input).
    pub tilt_angle: f32,
    /// Cosmetic rotation in degrees, derived from the scroll offset.
    pub heading: f32,

    // World
    /// Horizontal scroll of the world under the blob.
    pub scroll: f32,
    pub diamonds: [Diamond; NUMBER_OF_DIAMONDS],
    /// Crater centres, relative to the scroll origin.
    pub craters: [f32; NUMBER_OF_CRATERS],

    // Score
    pub energy: i32,
    pub diamonds_collected: u32,

    // Timing
    /// Timestamp (ms) of the last physics tick. May lie in the future to
    /// delay the first tick after a start or resume.
    pub last_time_ms: u64,
}

impl Default for LanderGame {
    fn default() -> Self {
        Self::new()
    }
}

impl LanderGame {
    /// A game in `Ready` mode with the blob parked near the top-left corner.
    /// The field is empty until `start_game` or `layout_field` fills it.
    pub fn new() -> Self {
        Self {
            mode: GameMode::Ready,
            difficulty: Difficulty::Easy,

            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,

            ball: Vector2::new(1.0, 1.0),
            velocity: Vector2::default(),
            ball_width: BALL_WIDTH,
            ball_height: BALL_HEIGHT,
            jumping: false,
            tilt_angle: 0.0,
            heading: 0.0,

            scroll: 0.0,
            diamonds: [Diamond::default(); NUMBER_OF_DIAMONDS],
            craters: [0.0; NUMBER_OF_CRATERS],

            energy: TOTAL_ENERGY,
            diamonds_collected: 0,

            last_time_ms: 0,
        }
    }

    /// Blob's bounding rectangle. The sprite is drawn half as wide as its
    /// nominal width, standing on `ball.y`.
    pub fn actor_rect(&self) -> Rect {
        let quarter_w = self.ball_width as f32 / 4.0;
        let half_h = self.ball_height as f32 / 2.0;
        Rect {
            left: self.ball.x - quarter_w,
            top: self.ball.y - half_h,
            right: self.ball.x + quarter_w,
            bottom: self.ball.y,
        }
    }

    /// True when Blob rests on (or below) the ground line.
    pub fn on_ground(&self) -> bool {
        self.ball.y >= self.canvas_height as f32
    }

    /// Screen x of a diamond or crater given its scroll-relative x.
    pub fn screen_x(&self, relative_x: f32) -> f32 {
        relative_x + self.scroll
    }

    /// Remaining energy as a fraction of the full meter.
    pub fn energy_fraction(&self) -> f32 {
        (self.energy as f32 / TOTAL_ENERGY as f32).clamp(0.0, 1.0)
    }

    pub fn visible_diamonds(&self) -> usize {
        self.diamonds.iter().filter(|d| d.visible).count()
    }
}
