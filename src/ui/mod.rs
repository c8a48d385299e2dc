pub mod game_common;
pub mod lander_scene;
pub mod maze_scene;

use crate::game::Session;
use crate::maze::Level;
use crate::utils::build_info::{BUILD_COMMIT, BUILD_DATE};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

/// Draw one frame: the active view plus a one-line footer.
pub fn draw(frame: &mut Frame, session: &Session) {
    let size = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(size);

    match session.level {
        Level::Lunar => lander_scene::render_lander_scene(frame, chunks[0], session),
        Level::Maze => maze_scene::render_maze_scene(frame, chunks[0], &session.maze),
    }
    draw_footer(frame, chunks[1]);
}

fn draw_footer(frame: &mut Frame, area: Rect) {
    let text = format!(
        "lander-ext v{}  {}  {}",
        env!("CARGO_PKG_VERSION"),
        BUILD_COMMIT,
        BUILD_DATE
    );
    frame.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Right),
        area,
    );
}
