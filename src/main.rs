use crossterm::event::{
    self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags, MouseEventKind,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use lander_ext::app;
use lander_ext::audio;
use lander_ext::cli::{self, CliCommand};
use lander_ext::game::{GameThread, SharedGame};
use lander_ext::input::{self, KeyInput, MenuCommand, TiltHold};
use lander_ext::ui;
use lander_ext::utils::{build_info, logging, persistence, SaveManager, Settings};
use rand::Rng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

fn main() -> io::Result<()> {
    let options = match cli::parse_args(std::env::args().skip(1)) {
        Ok(CliCommand::Run(options)) => options,
        Ok(CliCommand::Version) => {
            println!("{}", build_info::version_line());
            return Ok(());
        }
        Ok(CliCommand::Help) => {
            println!("{}", cli::HELP);
            return Ok(());
        }
        Err(msg) => {
            eprintln!("{}", msg);
            eprintln!("Run 'lander-ext --help' for usage.");
            std::process::exit(1);
        }
    };

    match persistence::app_dir() {
        Ok(dir) => {
            if let Err(e) = logging::init(&dir) {
                eprintln!("Warning: logging disabled: {}", e);
            }
        }
        Err(e) => eprintln!("Warning: logging disabled: {}", e),
    }

    let mut settings = Settings::load();
    options.apply(&mut settings);

    let saves = match SaveManager::new() {
        Ok(manager) => Some(manager),
        Err(e) => {
            log::warn!("saving disabled: {e}");
            None
        }
    };

    let shared = SharedGame::new(app::build_session(&settings, options.maze));
    let mut rng = rand::thread_rng();
    let mode = app::launch(&shared, saves.as_ref(), options.new_game, &mut rng);
    log::info!("launched in {} mode", mode.name());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let key_release = supports_keyboard_enhancement().unwrap_or(false);
    if key_release {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }

    let result = play(&shared, &settings, saves.as_ref(), key_release, &mut rng);

    app::suspend(&shared, saves.as_ref(), &mut settings);

    // Restore terminal
    let mut stdout = io::stdout();
    if key_release {
        execute!(stdout, PopKeyboardEnhancementFlags)?;
    }
    execute!(
        stdout,
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    disable_raw_mode()?;

    if let Err(e) = &result {
        log::error!("exiting after error: {e}");
    }
    result
}

/// Run the loop thread and the input loop until the player quits.
fn play<R: Rng>(
    shared: &SharedGame,
    settings: &Settings,
    saves: Option<&SaveManager>,
    key_release: bool,
    rng: &mut R,
) -> io::Result<()> {
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    let mut game_thread = GameThread::spawn(
        shared.clone(),
        audio::default_sink(settings.sound),
        Duration::from_millis(settings.frame_interval_ms),
        move |session| terminal.draw(|frame| ui::draw(frame, session)).map(|_| ()),
    )?;

    let result = input_loop(shared, &game_thread, settings, saves, key_release, rng);
    game_thread.stop();
    result
}

fn input_loop<R: Rng>(
    shared: &SharedGame,
    game_thread: &GameThread,
    settings: &Settings,
    saves: Option<&SaveManager>,
    key_release: bool,
    rng: &mut R,
) -> io::Result<()> {
    let mut hold = TiltHold::new(settings.tilt_hold_ms);

    while game_thread.is_running() {
        if let Some(key) = hold.take_expired(shared.now_ms()) {
            input::key_up(shared, key);
        }

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => {
                if !handle_key(shared, key, settings, &mut hold, key_release, rng) {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => {
                if let MouseEventKind::Down(_) = mouse.kind {
                    input::touch_down(shared, rng);
                }
            }
            Event::FocusLost => {
                if let Some(manager) = saves {
                    if let Err(e) = app::save_only(shared, manager) {
                        log::error!("save on focus loss failed: {e}");
                    }
                } else {
                    shared.pause();
                }
            }
            Event::Resize(width, height) => {
                log::debug!("terminal resized to {width}x{height}");
            }
            _ => {}
        }
    }
    Ok(())
}

/// Returns false when the player asked to quit.
fn handle_key<R: Rng>(
    shared: &SharedGame,
    key: KeyEvent,
    settings: &Settings,
    hold: &mut TiltHold,
    key_release: bool,
    rng: &mut R,
) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return false;
    }

    match (input::map_key(key.code), key.kind) {
        (KeyInput::Game(game_key), KeyEventKind::Release) => {
            hold.release();
            input::key_up(shared, game_key);
        }
        (KeyInput::Game(game_key), _) => {
            let handled = input::key_down(shared, game_key, settings.tilt_step_degrees, rng);
            if handled && !key_release {
                hold.press(game_key, shared.now_ms());
            }
        }
        (KeyInput::Menu(command), KeyEventKind::Press) => {
            if command == MenuCommand::Quit {
                return false;
            }
            input::apply_menu(shared, command, rng);
        }
        _ => {}
    }
    true
}
