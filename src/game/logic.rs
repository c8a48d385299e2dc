//! Lunar Lander Extended game logic: field layout, physics integration,
//! collision and scoring, and game mode transitions.
//!
//! Everything here is plain arithmetic over `LanderGame`. Timestamps are
//! passed in by the caller so the loop thread owns the clock.

use super::types::*;
use crate::core::constants::*;
use rand::Rng;

/// Message shown above the loss text when Blob runs out of energy.
pub const OUT_OF_ENERGY_MESSAGE: &str = "Out of energy!";

/// Message shown when a run is stopped from the menu.
pub const STOPPED_MESSAGE: &str = "Stopped.";

/// Scatter diamonds and craters across the world, left to right.
pub fn layout_field<R: Rng>(game: &mut LanderGame, rng: &mut R) {
    let width = game.canvas_width as f32;
    let diamond_base_y = game.canvas_height as f32 - game.ball_height as f32;

    let mut x = width / 3.0;
    for (i, diamond) in game.diamonds.iter_mut().enumerate() {
        if i > 0 {
            x += rng.gen_range(0.0..DIAMOND_SPACING);
        }
        let speed = if i == 0 {
            rng.gen_range(0.0..MAX_DIAMOND_MOVEMENT)
        } else {
            rng.gen_range(0.0..MAX_DIAMOND_MOVEMENT) + DIAMOND_MIN_SPEED
        };
        *diamond = Diamond {
            x,
            y: diamond_base_y - rng.gen_range(0.0..MAX_DIAMOND_MOVEMENT),
            speed,
            visible: true,
        };
    }

    let mut x = (game.canvas_width / 2) as f32;
    for (i, crater) in game.craters.iter_mut().enumerate() {
        if i > 0 {
            x += rng.gen_range(0.0..CRATER_SPACING) + CRATER_WIDTH;
        }
        *crater = x;
    }
}

/// Start a new run: reset Blob, energy and the field, and arm the clock
/// `RESUME_GRACE_MS` into the future so the first tick waits a moment.
pub fn start_game<R: Rng>(game: &mut LanderGame, now_ms: u64, rng: &mut R) -> StatusEvent {
    let width = game.canvas_width as f32;
    let height = game.canvas_height as f32;

    game.ball
        .set(width / 4.0, height - game.ball_height as f32 / 4.0);
    game.velocity.zero();
    game.energy = TOTAL_ENERGY;
    layout_field(game, rng);
    game.scroll = width / 2.0;
    game.last_time_ms = now_ms + RESUME_GRACE_MS;

    log::info!(
        "new run started ({} difficulty, {}x{} canvas)",
        game.difficulty.name(),
        game.canvas_width,
        game.canvas_height
    );
    set_state(game, GameMode::Running, None)
}

/// Pause, but only from `Running`. Returns `None` when nothing changed.
pub fn pause(game: &mut LanderGame) -> Option<StatusEvent> {
    if game.mode == GameMode::Running {
        Some(set_state(game, GameMode::Pause, None))
    } else {
        None
    }
}

/// Resume. Moves the clock forward so the first tick does not see the whole
/// paused interval as elapsed time.
pub fn unpause(game: &mut LanderGame, now_ms: u64) -> StatusEvent {
    game.last_time_ms = now_ms + RESUME_GRACE_MS;
    set_state(game, GameMode::Running, None)
}

pub fn set_difficulty(game: &mut LanderGame, difficulty: Difficulty) {
    game.difficulty = difficulty;
}

/// Commit a game mode and build the status text for it.
///
/// Entering `Running` hides the status display and reports the diamond
/// count. Every other mode shows its text, with `message` on a line above.
/// `Win` and `Lose` reset the diamond count.
pub fn set_state(game: &mut LanderGame, mode: GameMode, message: Option<&str>) -> StatusEvent {
    if game.mode != mode {
        log::debug!("mode {} -> {}", game.mode.name(), mode.name());
    }
    game.mode = mode;

    if mode == GameMode::Running {
        return StatusEvent {
            text: String::new(),
            visible: false,
            diamonds: Some(game.diamonds_collected),
        };
    }

    let mut text = mode_text(mode, game.diamonds_collected);
    if let Some(message) = message {
        text = format!("{message}\n{text}");
    }
    if matches!(mode, GameMode::Win | GameMode::Lose) {
        game.diamonds_collected = 0;
    }

    StatusEvent {
        text,
        visible: true,
        diamonds: None,
    }
}

fn mode_text(mode: GameMode, diamonds: u32) -> String {
    match mode {
        GameMode::Ready => "Lunar Lander Extended\nPress Space or Up to start".to_string(),
        GameMode::Pause => "Paused\nPress Space or Up to resume".to_string(),
        GameMode::Lose => "Game over\nPress Space or Up to play again".to_string(),
        GameMode::Win => format!(
            "You collected {diamonds} diamonds!\nPress Space or Up to play again"
        ),
        GameMode::Running => String::new(),
    }
}

/// Jump, but only while standing on the ground.
pub fn do_jump(game: &mut LanderGame) {
    if game.on_ground() {
        game.velocity.y = INITIAL_JUMP_SPEED;
        game.jumping = true;
    }
}

/// Store the steering angle. The input's sign is flipped.
pub fn do_accelerate(game: &mut LanderGame, tilt_degrees: f32) {
    game.tilt_angle = -tilt_degrees;
}

/// Resize the logical canvas. Zero sizes are bumped to 1.
pub fn set_surface_size(game: &mut LanderGame, width: u32, height: u32) {
    game.canvas_width = width.max(1);
    game.canvas_height = height.max(1);
}

/// Snapshot the fields that survive a suspend.
pub fn save_state(game: &LanderGame) -> SavedState {
    SavedState {
        difficulty: game.difficulty.code(),
        x: game.ball.x,
        y: game.ball.y,
        dx: game.velocity.x,
        dy: game.velocity.y,
        ball_width: game.ball_width,
        ball_height: game.ball_height,
        diamonds: game.diamonds_collected,
    }
}

/// Load a saved record. Always lands in `Pause`.
pub fn restore_state(game: &mut LanderGame, saved: &SavedState) -> StatusEvent {
    let status = set_state(game, GameMode::Pause, None);
    game.difficulty = Difficulty::from_code(saved.difficulty);
    game.ball.set(saved.x, saved.y);
    game.velocity.set(saved.dx, saved.dy);
    game.ball_width = saved.ball_width;
    game.ball_height = saved.ball_height;
    game.diamonds_collected = saved.diamonds;
    status
}

/// Advance the simulation to `now_ms`.
///
/// Does nothing unless the game is running and `now_ms` has reached the
/// last tick time. Otherwise integrates motion, moves the diamonds, runs one
/// collision pass and commits the resulting mode.
pub fn update_physics(game: &mut LanderGame, now_ms: u64) -> TickOutcome {
    if game.mode != GameMode::Running || game.last_time_ms > now_ms {
        return TickOutcome::default();
    }

    let elapsed = (now_ms - game.last_time_ms) as f32 / 1000.0;
    integrate(game, elapsed);
    game.last_time_ms = now_ms;
    move_diamonds(game, elapsed);

    let mut events = Vec::new();
    let (result, message) = check_collisions(game, &mut events);
    let status = set_state(game, result, message);

    TickOutcome {
        events,
        status: Some(status),
    }
}

/// Velocity and position update for `elapsed` seconds.
fn integrate(game: &mut LanderGame, elapsed: f32) {
    let tilt_radians = std::f32::consts::PI * game.tilt_angle / 180.0;
    let ddx = PHYS_DOWN_ACCEL_SEC * PHYS_ACCEL_FACTOR_X * elapsed * tilt_radians.sin()
        * PHYS_ACCEL_FACTOR_X
        / 2.0;
    let ddy = PHYS_DOWN_ACCEL_SEC * (GRAVITY_MOON / 1.6) * elapsed;

    // The jump impulse was already applied to dy; the flag only lasts a tick.
    if game.jumping {
        game.jumping = false;
    }

    let dx_old = game.velocity.x;
    let dy_old = game.velocity.y;

    game.velocity.x = (game.velocity.x + ddx).clamp(-PHYS_SPEED_MAX, PHYS_SPEED_MAX);
    game.velocity.y += ddy;

    // Average of old and new speed over the period
    game.scroll += elapsed * (game.velocity.x + dx_old) / 2.0;
    game.ball.y += elapsed * (game.velocity.y + dy_old) / 2.0;

    let scroll_min = -SCROLL_MIN_CANVAS_WIDTHS * game.canvas_width as f32;
    if game.scroll > SCROLL_MAX {
        game.scroll = SCROLL_MAX;
        game.velocity.x = 0.0;
    }
    if game.scroll < scroll_min {
        game.scroll = scroll_min;
        game.velocity.x = 0.0;
    }

    game.ball.y = game.ball.y.clamp(0.0, game.canvas_height as f32);

    let turns = game.scroll / HEADING_WAVELENGTH;
    game.heading = 360.0 - (turns - turns.floor()) * 360.0;
}

/// Bob every diamond up and down between the screen margins.
fn move_diamonds(game: &mut LanderGame, elapsed: f32) {
    let lower = game.canvas_height as f32 - DIAMOND_BOUNCE_MARGIN;
    for diamond in game.diamonds.iter_mut() {
        diamond.y += elapsed * diamond.speed;
        if diamond.y > lower || diamond.y < DIAMOND_BOUNCE_MARGIN {
            diamond.speed = -diamond.speed;
        }
    }
}

/// One collision and scoring pass. Returns the next mode and an optional
/// message for the status display.
fn check_collisions(
    game: &mut LanderGame,
    events: &mut Vec<GameEvent>,
) -> (GameMode, Option<&'static str>) {
    if game.diamonds_collected as usize >= NUMBER_OF_DIAMONDS {
        return (GameMode::Win, None);
    }

    let rect = game.actor_rect();
    let scroll = game.scroll;
    let mut result = GameMode::Running;
    let mut message = None;

    for (index, diamond) in game.diamonds.iter_mut().enumerate() {
        if diamond.visible && rect.contains(diamond.x + scroll, diamond.y) {
            diamond.visible = false;
            game.diamonds_collected += 1;
            events.push(GameEvent::DiamondCollected { index });
        }
    }

    let ground = game.canvas_height as f32;
    let lip_y = ground - CRATER_LIP_HEIGHT;
    let half_span = CRATER_WIDTH / 3.0;

    for (index, &crater_x) in game.craters.iter().enumerate() {
        let center = crater_x + scroll;

        // Hitting either lip knocks Blob back up
        if rect.contains(center - half_span, lip_y) || rect.contains(center + half_span, lip_y) {
            game.velocity.x *= CRATER_BOUNCE_DAMPING;
            game.velocity.y = CRATER_BOUNCE_SPEED;
            events.push(GameEvent::CraterBounce { index });
        }

        // Energy only drains while fully inside the crater, low down
        if rect.left > center - half_span
            && rect.right < center + half_span
            && rect.bottom > ground - CRATER_HEIGHT / 2.0
        {
            game.energy -= 1;
            if game.energy <= 0 {
                game.energy = 0;
                result = GameMode::Lose;
                message = Some(OUT_OF_ENERGY_MESSAGE);
            }
            events.push(GameEvent::EnergyDrained {
                remaining: game.energy,
            });
        }
    }

    (result, message)
}
