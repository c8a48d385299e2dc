//! Maze view: the tile grid scaled to the play field.

use super::game_common::{
    create_game_layout, render_info_panel_frame, render_status_bar, render_too_small,
};
use crate::maze::{Maze, Tile, MAZE_COLS, MAZE_ROWS};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const MIN_WIDTH: u16 = 40;
const MIN_HEIGHT: u16 = 14;

pub fn render_maze_scene(frame: &mut Frame, area: Rect, maze: &Maze) {
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_too_small(frame, area, "Maze", MIN_WIDTH, MIN_HEIGHT);
        return;
    }

    let layout = create_game_layout(frame, area, " Maze ", Color::Magenta, 8, 22);

    if maze.is_loaded() {
        let rows = tile_rows(maze, layout.content.width, layout.content.height);
        for (i, line) in rows.into_iter().enumerate() {
            let row_area = Rect::new(
                layout.content.x,
                layout.content.y + i as u16,
                layout.content.width,
                1,
            );
            frame.render_widget(Paragraph::new(line), row_area);
        }
    } else {
        let y = layout.content.y + layout.content.height / 2;
        frame.render_widget(
            Paragraph::new("No maze loaded")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(ratatui::layout::Alignment::Center),
            Rect::new(layout.content.x, y, layout.content.width, 1),
        );
    }

    render_status_bar(
        frame,
        layout.status_bar,
        "Maze",
        Color::Magenta,
        &[("[M]", "Surface"), ("[P]", "Pause"), ("[Esc]", "Quit")],
    );

    let inner = render_info_panel_frame(frame, layout.info_panel);
    let label = Style::default().fg(Color::DarkGray);
    let level = maze
        .number
        .map_or_else(|| "-".to_string(), |n| n.to_string());
    let lines = vec![
        Line::from(vec![Span::styled("Level: ", label), Span::raw(level)]),
        Line::from(vec![
            Span::styled("Walls: ", label),
            Span::raw(maze.count(Tile::Void).to_string()),
        ]),
        Line::from(vec![
            Span::styled("Exits: ", label),
            Span::styled(
                maze.count(Tile::Exit).to_string(),
                Style::default().fg(Color::Green),
            ),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn tile_cell(tile: Tile) -> Span<'static> {
    match tile {
        Tile::Void => Span::styled("█", Style::default().fg(Color::Black).bg(Color::DarkGray)),
        Tile::Exit => Span::styled("E", Style::default().fg(Color::Green)),
        Tile::Path => Span::raw(" "),
        Tile::Unknown => Span::styled("?", Style::default().fg(Color::Red)),
    }
}

/// One line per screen row, sampling the tile under each cell.
fn tile_rows(maze: &Maze, width: u16, height: u16) -> Vec<Line<'static>> {
    let width = width.max(1) as usize;
    let height = height.max(1) as usize;
    (0..height)
        .map(|y| {
            let row = y * MAZE_ROWS / height;
            let spans: Vec<Span> = (0..width)
                .map(|x| {
                    let col = x * MAZE_COLS / width;
                    tile_cell(maze.tile(row, col).unwrap_or(Tile::Path))
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}
