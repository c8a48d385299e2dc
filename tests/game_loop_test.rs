//! Integration test: the background loop thread
//!
//! Spawns `GameThread` against a shared session with a counting present
//! callback and checks that frames keep coming, physics advances while
//! running, and the thread shuts down cleanly.

use lander_ext::audio::SilentSink;
use lander_ext::game::{GameMode, GameThread, LanderGame, Session, SharedGame};
use lander_ext::input::{self, GameKey};
use lander_ext::maze::Maze;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

const FRAME: Duration = Duration::from_millis(5);

fn shared() -> SharedGame {
    SharedGame::new(Session::new(LanderGame::new(), Maze::empty()))
}

fn counting_thread(shared: &SharedGame) -> (GameThread, Arc<AtomicUsize>) {
    let frames = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&frames);
    let thread = GameThread::spawn(shared.clone(), Box::new(SilentSink), FRAME, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    })
    .expect("spawn loop thread");
    (thread, frames)
}

/// Poll `cond` until it holds or two seconds pass.
fn wait_for(mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    cond()
}

// =============================================================================
// Frame delivery
// =============================================================================

#[test]
fn test_presents_frames_while_idle() {
    let shared = shared();
    let (mut thread, frames) = counting_thread(&shared);

    assert!(wait_for(|| frames.load(Ordering::SeqCst) >= 3));
    assert!(thread.is_running());
    assert_eq!(shared.mode(), GameMode::Ready);

    thread.stop();
    assert!(!thread.is_running());
    let after_stop = frames.load(Ordering::SeqCst);
    thread::sleep(FRAME * 4);
    assert_eq!(frames.load(Ordering::SeqCst), after_stop);
}

#[test]
fn test_present_error_stops_loop() {
    let shared = shared();
    let thread = GameThread::spawn(shared, Box::new(SilentSink), FRAME, |_| {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal gone"))
    })
    .expect("spawn loop thread");

    assert!(wait_for(|| !thread.is_running()));
}

// =============================================================================
// Physics through the thread
// =============================================================================

#[test]
fn test_running_game_advances_on_loop_thread() {
    let shared = shared();
    let mut rng = ChaCha8Rng::seed_from_u64(17);
    let (mut thread, _frames) = counting_thread(&shared);

    assert!(input::key_down(&shared, GameKey::StartOrJump, 6.0, &mut rng));
    assert_eq!(shared.mode(), GameMode::Running);
    let armed_at = shared.lock().game.last_time_ms;

    assert!(wait_for(|| shared.lock().game.last_time_ms > armed_at));
    thread.stop();
}

#[test]
fn test_paused_game_holds_still_on_loop_thread() {
    let shared = shared();
    let mut rng = ChaCha8Rng::seed_from_u64(18);
    shared.start(&mut rng);
    shared.pause();
    let before = shared.lock().game.ball;

    let (mut thread, frames) = counting_thread(&shared);
    assert!(wait_for(|| frames.load(Ordering::SeqCst) >= 5));
    thread.stop();

    assert_eq!(shared.mode(), GameMode::Pause);
    assert_eq!(shared.lock().game.ball, before);
}

#[test]
fn test_drop_stops_thread() {
    let shared = shared();
    let frames = {
        let (_thread, frames) = counting_thread(&shared);
        assert!(wait_for(|| frames.load(Ordering::SeqCst) >= 1));
        frames
    };
    let count = frames.load(Ordering::SeqCst);
    thread::sleep(FRAME * 4);
    assert_eq!(frames.load(Ordering::SeqCst), count);
}
