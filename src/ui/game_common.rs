//! Shared UI components for the game views.

use crate::game::GameMode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Layout areas returned by `create_game_layout`.
pub struct GameLayout {
    /// Play field, top left inside the outer border
    pub content: Rect,
    /// Status bar (2 lines), bottom left inside the outer border
    pub status_bar: Rect,
    /// Info panel on the right, with its own border
    pub info_panel: Rect,
}

/// Outer border plus the content / status bar / info panel split.
///
/// ```text
/// ┌─ Title ─────────────────────────┬─ Info ──────┐
/// │   [content area]                │  [info]     │
/// │ [status bar - 2 lines]          │             │
/// └─────────────────────────────────┴─────────────┘
/// ```
pub fn create_game_layout(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
    content_min_height: u16,
    info_panel_width: u16,
) -> GameLayout {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(info_panel_width)])
        .split(inner);

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(content_min_height), Constraint::Length(2)])
        .split(h_chunks[0]);

    GameLayout {
        content: v_chunks[0],
        status_bar: v_chunks[1],
        info_panel: h_chunks[1],
    }
}

/// Two-line status bar: a status message and a row of key hints.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status_text: &str,
    status_color: Color,
    controls: &[(&str, &str)],
) {
    if area.height < 1 {
        return;
    }

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(Alignment::Center);
    frame.render_widget(status, Rect { height: 1, ..area });

    if area.height >= 2 && !controls.is_empty() {
        let mut spans = Vec::new();
        for (i, (key, action)) in controls.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*key, Style::default().fg(Color::White)));
            spans.push(Span::styled(
                format!(" {}", action),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let controls_line = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(
            controls_line,
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
        );
    }
}

/// Info panel frame with the standard " Info " title. Returns the inner area.
pub fn render_info_panel_frame(frame: &mut Frame, area: Rect) -> Rect {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// Colour used for a mode's status text and borders.
pub fn mode_color(mode: GameMode) -> Color {
    match mode {
        GameMode::Ready => Color::LightBlue,
        GameMode::Running => Color::White,
        GameMode::Pause => Color::Yellow,
        GameMode::Lose => Color::Red,
        GameMode::Win => Color::Green,
    }
}

/// Centered modal with the status display text. The first line is the
/// title; the rest is body text.
pub fn render_status_overlay(frame: &mut Frame, area: Rect, text: &str, mode: GameMode) {
    let color = mode_color(mode);
    let mut lines_iter = text.lines();
    let Some(first) = lines_iter.next() else {
        return;
    };
    let rest: Vec<&str> = lines_iter.collect();

    let widest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0) as u16;
    let width = (widest + 6).min(area.width);
    let height = (rest.len() as u16 + 4).min(area.height);
    let modal = Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    );

    frame.render_widget(Clear, modal);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let mut lines = vec![Line::from(Span::styled(
        first.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))];
    lines.push(Line::from(""));
    for line in rest {
        lines.push(Line::from(Span::styled(
            line.to_string(),
            Style::default().fg(Color::White),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);
}

/// Shown instead of a view when the terminal is too small for it.
pub fn render_too_small(frame: &mut Frame, area: Rect, title: &str, min_w: u16, min_h: u16) {
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Terminal too small: need {}x{}", min_w, min_h)),
        Line::from(format!("Current: {}x{}", area.width, area.height)),
    ];
    let text = Paragraph::new(lines).alignment(Alignment::Center);
    let y = area.y + area.height.saturating_sub(3) / 2;
    frame.render_widget(text, Rect::new(area.x, y, area.width, area.height.min(3)));
}
