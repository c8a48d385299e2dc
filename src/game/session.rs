//! Shared game session and the background loop thread.
//!
//! The loop thread ticks physics and presents frames while the main thread
//! reads input. Both go through `SharedGame`, which serialises every access
//! to the game behind one mutex.

use super::logic;
use super::types::*;
use crate::audio::{PlayParams, SoundEffect, SoundSink};
use crate::maze::{Level, Maze};
use rand::Rng;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Everything the loop thread and the input side share.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub game: LanderGame,
    /// Latest status display contents.
    pub status: StatusEvent,
    /// Which view is on screen.
    pub level: Level,
    pub maze: Maze,
}

impl Session {
    pub fn new(game: LanderGame, maze: Maze) -> Self {
        Self {
            game,
            status: StatusEvent::default(),
            level: Level::Lunar,
            maze,
        }
    }
}

/// Cloneable handle to the session plus the session clock.
#[derive(Debug, Clone)]
pub struct SharedGame {
    inner: Arc<Mutex<Session>>,
    epoch: Instant,
}

impl SharedGame {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
            epoch: Instant::now(),
        }
    }

    /// Milliseconds since the session was created.
    pub fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    /// Lock the session. A panic on the other side leaves the data usable,
    /// so a poisoned lock is recovered rather than propagated.
    pub fn lock(&self) -> MutexGuard<'_, Session> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn mode(&self) -> GameMode {
        self.lock().game.mode
    }

    pub fn start<R: Rng>(&self, rng: &mut R) {
        let now = self.now_ms();
        let mut session = self.lock();
        session.status = logic::start_game(&mut session.game, now, rng);
    }

    pub fn pause(&self) {
        let mut session = self.lock();
        if let Some(status) = logic::pause(&mut session.game) {
            session.status = status;
        }
    }

    pub fn unpause(&self) {
        let now = self.now_ms();
        let mut session = self.lock();
        session.status = logic::unpause(&mut session.game, now);
    }

    pub fn set_state(&self, mode: GameMode, message: Option<&str>) {
        let mut session = self.lock();
        session.status = logic::set_state(&mut session.game, mode, message);
    }

    pub fn set_difficulty(&self, difficulty: Difficulty) {
        logic::set_difficulty(&mut self.lock().game, difficulty);
    }

    pub fn do_jump(&self) {
        logic::do_jump(&mut self.lock().game);
    }

    pub fn do_accelerate(&self, tilt_degrees: f32) {
        logic::do_accelerate(&mut self.lock().game, tilt_degrees);
    }

    pub fn set_surface_size(&self, width: u32, height: u32) {
        logic::set_surface_size(&mut self.lock().game, width, height);
    }

    pub fn save_state(&self) -> SavedState {
        logic::save_state(&self.lock().game)
    }

    pub fn restore_state(&self, saved: &SavedState) {
        let mut session = self.lock();
        session.status = logic::restore_state(&mut session.game, saved);
    }

    /// Switch between the lunar field and the maze view.
    pub fn toggle_level(&self) -> Level {
        let mut session = self.lock();
        session.level = session.level.toggled();
        session.level
    }

    /// Run one physics tick if the game is running. Plays the capture sound
    /// for every diamond collected during the tick.
    pub fn tick(&self, sound: &mut dyn SoundSink) -> TickOutcome {
        let now = self.now_ms();
        let mut session = self.lock();
        tick_session(&mut session, now, sound)
    }
}

fn tick_session(session: &mut Session, now_ms: u64, sound: &mut dyn SoundSink) -> TickOutcome {
    if session.game.mode != GameMode::Running {
        return TickOutcome::default();
    }

    let outcome = logic::update_physics(&mut session.game, now_ms);
    for event in &outcome.events {
        if let GameEvent::DiamondCollected { index } = event {
            log::debug!("diamond {index} collected");
            sound.play(SoundEffect::Bling, PlayParams::default());
        }
    }
    if let Some(status) = &outcome.status {
        if status.visible {
            log::info!("run ended: {}", session.game.mode.name());
        }
        session.status = status.clone();
    }
    outcome
}

/// Handle to the background loop thread.
pub struct GameThread {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl GameThread {
    /// Spawn the loop. Each iteration ticks physics, hands the session to
    /// `present`, then sleeps out the rest of `frame_interval`. A present
    /// error stops the loop.
    pub fn spawn<P>(
        shared: SharedGame,
        mut sound: Box<dyn SoundSink>,
        frame_interval: Duration,
        mut present: P,
    ) -> io::Result<Self>
    where
        P: FnMut(&Session) -> io::Result<()> + Send + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let handle = thread::Builder::new()
            .name("lander-loop".to_string())
            .spawn(move || {
                log::info!("loop thread started");
                while flag.load(Ordering::Acquire) {
                    let frame_start = Instant::now();
                    {
                        let now = shared.now_ms();
                        let mut session = shared.lock();
                        tick_session(&mut session, now, sound.as_mut());
                        if let Err(e) = present(&session) {
                            log::error!("frame presentation failed: {e}");
                            flag.store(false, Ordering::Release);
                            break;
                        }
                    }
                    let spent = frame_start.elapsed();
                    if spent < frame_interval {
                        thread::sleep(frame_interval - spent);
                    }
                }
                log::info!("loop thread stopped");
            })?;

        Ok(Self {
            running,
            handle: Some(handle),
        })
    }

    /// False once `stop` was called or the loop bailed out on its own.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Clear the running flag and wait for the thread to finish.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("loop thread panicked");
            }
        }
    }
}

impl Drop for GameThread {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingSink;
    use crate::core::constants::RESUME_GRACE_MS;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn shared() -> SharedGame {
        SharedGame::new(Session::new(LanderGame::new(), Maze::empty()))
    }

    #[test]
    fn test_start_sets_running_status() {
        let shared = shared();
        shared.start(&mut ChaCha8Rng::seed_from_u64(1));
        let session = shared.lock();
        assert_eq!(session.game.mode, GameMode::Running);
        assert!(!session.status.visible);
        assert_eq!(session.status.diamonds, Some(0));
    }

    #[test]
    fn test_pause_then_unpause() {
        let shared = shared();
        shared.start(&mut ChaCha8Rng::seed_from_u64(1));
        shared.pause();
        assert_eq!(shared.mode(), GameMode::Pause);
        assert!(shared.lock().status.visible);
        shared.unpause();
        assert_eq!(shared.mode(), GameMode::Running);
    }

    #[test]
    fn test_toggle_level() {
        let shared = shared();
        assert_eq!(shared.toggle_level(), Level::Maze);
        assert_eq!(shared.toggle_level(), Level::Lunar);
    }

    #[test]
    fn test_tick_plays_sound_per_diamond() {
        let mut session = Session::new(LanderGame::new(), Maze::empty());
        logic::start_game(&mut session.game, 0, &mut ChaCha8Rng::seed_from_u64(3));
        for crater in session.game.craters.iter_mut() {
            *crater = 50_000.0;
        }
        session.game.scroll = 0.0;
        let scroll = session.game.scroll;
        let ground = session.game.canvas_height as f32;
        session.game.ball.set(120.0, ground);
        for (i, diamond) in session.game.diamonds.iter_mut().enumerate() {
            diamond.visible = i < 2;
            diamond.x = 120.0 - scroll;
            diamond.y = ground - 5.0;
            diamond.speed = 0.0;
        }

        let mut sink = RecordingSink::default();
        let outcome = tick_session(&mut session, RESUME_GRACE_MS, &mut sink);
        assert!(outcome.advanced());
        assert_eq!(sink.played.len(), 2);
        assert_eq!(session.game.diamonds_collected, 2);
    }

    #[test]
    fn test_tick_ignored_when_paused() {
        let mut session = Session::new(LanderGame::new(), Maze::empty());
        let mut sink = RecordingSink::default();
        let outcome = tick_session(&mut session, 1_000, &mut sink);
        assert!(!outcome.advanced());
        assert!(sink.played.is_empty());
    }
}
