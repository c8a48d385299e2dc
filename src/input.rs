//! Input adapters: keyboard, touch and tilt sensor.
//!
//! Terminal keys are mapped to UI-agnostic enums first, then dispatched on
//! the current game mode.

use crate::core::constants::TILT_HOLD_MS;
use crate::game::logic::STOPPED_MESSAGE;
use crate::game::{Difficulty, GameMode, SharedGame};
use crossterm::event::KeyCode;
use rand::Rng;

/// Keys the game itself reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKey {
    /// Starts or resumes, but does nothing mid-run.
    Start,
    /// Starts or resumes when idle, jumps mid-run.
    StartOrJump,
    /// Jumps mid-run only.
    Jump,
    TiltLeft,
    TiltRight,
}

impl GameKey {
    pub fn starts(&self) -> bool {
        matches!(self, Self::Start | Self::StartOrJump)
    }

    pub fn is_tilt(&self) -> bool {
        matches!(self, Self::TiltLeft | Self::TiltRight)
    }
}

/// Menu actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    NewGame,
    Stop,
    Pause,
    Resume,
    SetDifficulty(Difficulty),
    ToggleLevel,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Game(GameKey),
    Menu(MenuCommand),
    Other,
}

pub fn map_key(code: KeyCode) -> KeyInput {
    match code {
        KeyCode::Up | KeyCode::Char(' ') => KeyInput::Game(GameKey::StartOrJump),
        KeyCode::Down => KeyInput::Game(GameKey::Start),
        KeyCode::Enter => KeyInput::Game(GameKey::Jump),
        KeyCode::Left => KeyInput::Game(GameKey::TiltLeft),
        KeyCode::Right => KeyInput::Game(GameKey::TiltRight),
        KeyCode::Esc => KeyInput::Menu(MenuCommand::Quit),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            's' => KeyInput::Game(GameKey::Start),
            'q' => KeyInput::Game(GameKey::TiltLeft),
            'w' => KeyInput::Game(GameKey::TiltRight),
            'n' => KeyInput::Menu(MenuCommand::NewGame),
            'x' => KeyInput::Menu(MenuCommand::Stop),
            'p' => KeyInput::Menu(MenuCommand::Pause),
            'r' => KeyInput::Menu(MenuCommand::Resume),
            '1' => KeyInput::Menu(MenuCommand::SetDifficulty(Difficulty::Easy)),
            '2' => KeyInput::Menu(MenuCommand::SetDifficulty(Difficulty::Medium)),
            '3' => KeyInput::Menu(MenuCommand::SetDifficulty(Difficulty::Hard)),
            'm' => KeyInput::Menu(MenuCommand::ToggleLevel),
            _ => KeyInput::Other,
        },
        _ => KeyInput::Other,
    }
}

/// Key press. Returns true when the key was handled.
pub fn key_down<R: Rng>(shared: &SharedGame, key: GameKey, tilt_step: f32, rng: &mut R) -> bool {
    let mode = shared.mode();

    if key.starts() && mode.is_idle() {
        shared.start(rng);
        return true;
    }
    if key.starts() && mode == GameMode::Pause {
        shared.unpause();
        return true;
    }
    if mode != GameMode::Running {
        return false;
    }

    match key {
        GameKey::StartOrJump | GameKey::Jump => shared.do_jump(),
        GameKey::TiltLeft => shared.do_accelerate(-tilt_step),
        GameKey::TiltRight => shared.do_accelerate(tilt_step),
        GameKey::Start => return false,
    }
    true
}

/// Key release. Letting go of a tilt key levels out.
pub fn key_up(shared: &SharedGame, key: GameKey) -> bool {
    if shared.mode() != GameMode::Running {
        return false;
    }
    match key {
        GameKey::StartOrJump | GameKey::Jump => true,
        GameKey::TiltLeft | GameKey::TiltRight => {
            shared.do_accelerate(0.0);
            true
        }
        GameKey::Start => false,
    }
}

/// Touch or mouse press: start or resume when idle, jump mid-run.
pub fn touch_down<R: Rng>(shared: &SharedGame, rng: &mut R) {
    match shared.mode() {
        GameMode::Running => shared.do_jump(),
        GameMode::Pause => shared.unpause(),
        _ => shared.start(rng),
    }
}

/// Run a menu command. Returns false for `Quit`.
pub fn apply_menu<R: Rng>(shared: &SharedGame, command: MenuCommand, rng: &mut R) -> bool {
    match command {
        MenuCommand::NewGame => shared.start(rng),
        MenuCommand::Stop => shared.set_state(GameMode::Lose, Some(STOPPED_MESSAGE)),
        MenuCommand::Pause => shared.pause(),
        MenuCommand::Resume => shared.unpause(),
        MenuCommand::SetDifficulty(difficulty) => shared.set_difficulty(difficulty),
        MenuCommand::ToggleLevel => {
            let level = shared.toggle_level();
            log::debug!("switched to {}", level.name());
        }
        MenuCommand::Quit => return false,
    }
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Turn an accelerometer sample into a tilt angle in degrees, `[0, 360)`.
///
/// Landscape swaps the axes first. A zero-length vector reads as level.
/// Returns `None` for samples with fewer than three axes.
pub fn tilt_from_accelerometer(values: &[f32], orientation: Orientation) -> Option<f32> {
    let [v0, v1, v2] = match values {
        [a, b, c, ..] => [*a, *b, *c],
        _ => return None,
    };
    let (x, y, z) = match orientation {
        Orientation::Portrait => (v0, v1, v2),
        Orientation::Landscape => (-v1, v0, v2),
    };

    let magnitude = (x * x + y * y + z * z).sqrt();
    let tilt = if magnitude == 0.0 {
        0.0
    } else {
        (x / magnitude).asin().to_degrees()
    };
    Some(if tilt < 0.0 { tilt + 360.0 } else { tilt })
}

/// Feed a sensor sample to the game.
pub fn sensor_changed(shared: &SharedGame, values: &[f32], orientation: Orientation) {
    if let Some(tilt) = tilt_from_accelerometer(values, orientation) {
        shared.do_accelerate(tilt);
    }
}

/// Synthesised key release for terminals that never report one.
///
/// Each tilt key press re-arms the timer. Once it runs out the caller
/// treats the key as released.
#[derive(Debug, Clone, Copy, Default)]
pub struct TiltHold {
    held: Option<(GameKey, u64)>,
    hold_ms: u64,
}

impl TiltHold {
    pub fn new(hold_ms: u64) -> Self {
        Self {
            held: None,
            hold_ms: if hold_ms == 0 { TILT_HOLD_MS } else { hold_ms },
        }
    }

    pub fn press(&mut self, key: GameKey, now_ms: u64) {
        if key.is_tilt() {
            self.held = Some((key, now_ms + self.hold_ms));
        }
    }

    pub fn release(&mut self) {
        self.held = None;
    }

    /// The held key, if its timer ran out. Clears the hold.
    pub fn take_expired(&mut self, now_ms: u64) -> Option<GameKey> {
        match self.held {
            Some((key, until)) if now_ms >= until => {
                self.held = None;
                Some(key)
            }
            _ => None,
        }
    }
}
