//! Lunar surface rendering.
//!
//! Draws the ground, craters, bobbing diamonds, Blob with its heading
//! marker and the HUD into a cell buffer, then flushes the buffer row by row.
//! World coordinates are the logical canvas, scaled to the play field.

use super::game_common::{
    create_game_layout, mode_color, render_info_panel_frame, render_status_bar,
    render_status_overlay, render_too_small,
};
use crate::core::constants::*;
use crate::game::{GameMode, LanderGame, Session};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const MIN_WIDTH: u16 = 40;
const MIN_HEIGHT: u16 = 14;

/// Render the lunar surface view.
pub fn render_lander_scene(frame: &mut Frame, area: Rect, session: &Session) {
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_too_small(frame, area, "Lunar Lander Extended", MIN_WIDTH, MIN_HEIGHT);
        return;
    }

    let game = &session.game;
    let layout = create_game_layout(
        frame,
        area,
        " Lunar Lander Extended ",
        Color::LightBlue,
        8,
        22,
    );

    render_play_field(frame, layout.content, game);

    if session.status.visible {
        render_status_overlay(frame, layout.content, &session.status.text, game.mode);
    }

    render_status_bar_content(frame, layout.status_bar, game);
    render_info_panel(frame, layout.info_panel, game);
}

/// Cell in the render buffer.
#[derive(Clone, Copy, PartialEq, Debug)]
pub(super) struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

/// Maps logical canvas coordinates onto buffer cells.
struct Projection {
    cols: usize,
    /// Row of the ground line (Blob's feet at y == canvas height).
    ground_row: usize,
    x_scale: f32,
    y_scale: f32,
}

impl Projection {
    fn new(game: &LanderGame, cols: usize, rows: usize) -> Self {
        let ground_row = rows.saturating_sub(2);
        Self {
            cols,
            ground_row,
            x_scale: cols as f32 / game.canvas_width as f32,
            y_scale: ground_row as f32 / game.canvas_height as f32,
        }
    }

    fn col(&self, x: f32) -> Option<usize> {
        let col = (x * self.x_scale).floor();
        (col >= 0.0 && (col as usize) < self.cols).then_some(col as usize)
    }

    fn row(&self, y: f32) -> usize {
        ((y * self.y_scale).round().max(0.0) as usize).min(self.ground_row)
    }
}

/// Convert HSV (hue in degrees, s and v in [0, 1]) to a terminal colour.
pub fn hsv_color(hue: f32, saturation: f32, value: f32) -> Color {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = value * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = value - c;
    let channel = |v: f32| ((v + m) * 255.0).round() as u8;
    Color::Rgb(channel(r), channel(g), channel(b))
}

/// Energy bar colour: red when empty through green when full.
pub fn energy_color(fraction: f32) -> Color {
    hsv_color(fraction.clamp(0.0, 1.0) * 120.0, 1.0, 1.0)
}

/// Glyph on top of Blob, turning with the heading.
fn heading_glyph(heading: f32) -> char {
    const GLYPHS: [char; 4] = ['|', '/', '-', '\\'];
    let octant = ((heading.rem_euclid(360.0) + 22.5) / 45.0) as usize % 8;
    GLYPHS[octant % 4]
}

fn put(buffer: &mut [Vec<Cell>], row: usize, col: usize, cell: Cell) {
    if let Some(slot) = buffer.get_mut(row).and_then(|r| r.get_mut(col)) {
        *slot = cell;
    }
}

fn put_text(buffer: &mut [Vec<Cell>], row: usize, col: usize, text: &str, fg: Color) {
    for (i, ch) in text.chars().enumerate() {
        put(
            buffer,
            row,
            col + i,
            Cell {
                ch,
                fg,
                bg: Color::Reset,
            },
        );
    }
}

/// Build the play field buffer. Split out from rendering so it can be
/// inspected in tests.
pub(super) fn build_buffer(game: &LanderGame, cols: usize, rows: usize) -> Vec<Vec<Cell>> {
    let mut buffer = vec![vec![Cell::default(); cols]; rows];
    if cols == 0 || rows < 3 {
        return buffer;
    }
    let proj = Projection::new(game, cols, rows);

    // -- Stars, drifting slowly with the scroll --
    let drift = (game.scroll * proj.x_scale / 4.0).floor() as i64;
    for row in 0..proj.ground_row.saturating_sub(2) {
        for col in 0..cols {
            let world_col = (col as i64 - drift).rem_euclid(997) as usize;
            let hash = (row * 137 + world_col * 251 + 97) % 180;
            let ch = match hash {
                0 => '.',
                1 => '*',
                _ => continue,
            };
            buffer[row][col] = Cell {
                ch,
                fg: Color::DarkGray,
                bg: Color::Reset,
            };
        }
    }

    // -- Ground and soil --
    let soil_row = proj.ground_row + 1;
    for col in 0..cols {
        buffer[soil_row][col] = Cell {
            ch: if col % 3 == 0 { '.' } else { '=' },
            fg: Color::Rgb(140, 120, 100),
            bg: Color::Rgb(30, 25, 20),
        };
    }

    // -- Craters --
    for &crater in &game.craters {
        let center = game.screen_x(crater);
        let left = ((center - CRATER_WIDTH / 2.0) * proj.x_scale).floor();
        let right = ((center + CRATER_WIDTH / 2.0) * proj.x_scale).floor();
        if right < 0.0 || left >= cols as f32 {
            continue;
        }
        let first = left.max(0.0) as usize;
        let last = (right as usize).min(cols - 1);
        for col in first..=last {
            let ch = if col as f32 == left {
                '\\'
            } else if col as f32 == right {
                '/'
            } else {
                '_'
            };
            buffer[soil_row][col] = Cell {
                ch,
                fg: Color::Gray,
                bg: Color::Black,
            };
        }
    }

    // -- Diamonds --
    for diamond in game.diamonds.iter().filter(|d| d.visible) {
        if let Some(col) = proj.col(game.screen_x(diamond.x)) {
            put(
                &mut buffer,
                proj.row(diamond.y),
                col,
                Cell {
                    ch: '◆',
                    fg: Color::Cyan,
                    bg: Color::Reset,
                },
            );
        }
    }

    // -- Blob: body on the feet row, heading marker above --
    if let Some(col) = proj.col(game.ball.x) {
        let feet = proj.row(game.ball.y);
        let body = feet.max(1);
        for (dx, ch) in [(-1i64, '('), (0, 'o'), (1, ')')] {
            let c = col as i64 + dx;
            if c >= 0 {
                put(
                    &mut buffer,
                    body,
                    c as usize,
                    Cell {
                        ch,
                        fg: Color::LightGreen,
                        bg: Color::Reset,
                    },
                );
            }
        }
        put(
            &mut buffer,
            body - 1,
            col,
            Cell {
                ch: heading_glyph(game.heading),
                fg: Color::White,
                bg: Color::Reset,
            },
        );
    }

    // -- HUD: diamond counter (top-left) --
    put_text(
        &mut buffer,
        0,
        1,
        &format!("Diamonds: {}", game.diamonds_collected),
        Color::White,
    );

    // -- HUD: energy gauge (top-right) --
    let gauge_cells = ((GAUGE_WIDTH * proj.x_scale).round() as usize).clamp(5, cols / 2);
    let fraction = game.energy_fraction();
    let filled = (fraction * gauge_cells as f32).round() as usize;
    let start = cols.saturating_sub(gauge_cells + 1);
    let color = energy_color(fraction);
    for i in 0..gauge_cells {
        put(
            &mut buffer,
            0,
            start + i,
            Cell {
                ch: if i < filled { '█' } else { '░' },
                fg: if i < filled { color } else { Color::DarkGray },
                bg: Color::Reset,
            },
        );
    }

    buffer
}

/// Render the main play field.
fn render_play_field(frame: &mut Frame, area: Rect, game: &LanderGame) {
    if area.height < 3 || area.width < 10 {
        return;
    }

    let buffer = build_buffer(game, area.width as usize, area.height as usize);

    for (row_idx, row_data) in buffer.iter().enumerate() {
        let mut spans: Vec<Span> = Vec::new();
        let mut current_fg = Color::Reset;
        let mut current_bg = Color::Reset;
        let mut current_text = String::new();

        for &cell in row_data.iter() {
            if (cell.fg != current_fg || cell.bg != current_bg) && !current_text.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut current_text),
                    Style::default().fg(current_fg).bg(current_bg),
                ));
            }
            current_fg = cell.fg;
            current_bg = cell.bg;
            current_text.push(cell.ch);
        }
        if !current_text.is_empty() {
            spans.push(Span::styled(
                current_text,
                Style::default().fg(current_fg).bg(current_bg),
            ));
        }

        let row_area = Rect::new(area.x, area.y + row_idx as u16, area.width, 1);
        frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
    }
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, game: &LanderGame) {
    let controls: &[(&str, &str)] = match game.mode {
        GameMode::Running => &[
            ("[←/→]", "Steer"),
            ("[Space/↑]", "Jump"),
            ("[P]", "Pause"),
            ("[X]", "Stop"),
        ],
        GameMode::Pause => &[("[Space/↑]", "Resume"), ("[N]", "New"), ("[Esc]", "Quit")],
        _ => &[
            ("[Space/↑]", "Start"),
            ("[1-3]", "Difficulty"),
            ("[M]", "Maze"),
            ("[Esc]", "Quit"),
        ],
    };
    render_status_bar(frame, area, game.mode.name(), mode_color(game.mode), controls);
}

fn render_info_panel(frame: &mut Frame, area: Rect, game: &LanderGame) {
    if area.width < 2 {
        return;
    }
    let inner = render_info_panel_frame(frame, area);

    let energy_pct = (game.energy_fraction() * 100.0).round() as u32;
    let label = Style::default().fg(Color::DarkGray);

    let lines = vec![
        Line::from(vec![
            Span::styled("Difficulty: ", label),
            Span::styled(game.difficulty.name(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Energy:   ", label),
            Span::styled(
                format!("{}%", energy_pct),
                Style::default()
                    .fg(energy_color(game.energy_fraction()))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Diamonds: ", label),
            Span::styled(
                format!("{}/{}", game.diamonds_collected, NUMBER_OF_DIAMONDS),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(vec![
            Span::styled("Speed:    ", label),
            Span::styled(
                format!("{:+.0}", game.velocity.x),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::styled("Heading:  ", label),
            Span::styled(
                format!("{:.0}°", game.heading),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Collect all diamonds.",
            Style::default().fg(Color::Yellow),
        )),
        Line::from(Span::styled("Craters drain energy.", label)),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
