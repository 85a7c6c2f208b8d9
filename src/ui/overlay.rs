use ratatui::prelude::*;
use ratatui::widgets::*;

const PANEL_BG: Color = Color::Rgb(15, 15, 25);
const KEY: Color = Color::Rgb(80, 200, 255);
const HINT: Color = Color::Rgb(100, 100, 130);

/// Centre a `w` x `h` box inside `area`, shrinking it to fit.
pub fn centered(area: Rect, w: u16, h: u16) -> Rect {
    let w = w.min(area.width.saturating_sub(4));
    let h = h.min(area.height.saturating_sub(4));
    let x = area.x + area.width.saturating_sub(w) / 2;
    let y = area.y + area.height.saturating_sub(h) / 2;
    Rect::new(x, y, w, h)
}

fn panel(frame: &mut Frame, area: Rect, title: &str, accent: Color, lines: Vec<Line>) {
    let overlay_area = centered(area, 40, 9);

    // Clear background
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(accent))
        .title(title.to_string())
        .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(PANEL_BG));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let p = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().bg(PANEL_BG));
    frame.render_widget(p, inner);
}

fn hint(key: &'static str, action: &'static str) -> Vec<Span<'static>> {
    vec![
        Span::styled(key, Style::default().fg(KEY).add_modifier(Modifier::BOLD)),
        Span::styled(action, Style::default().fg(HINT)),
    ]
}

pub fn render_pause(frame: &mut Frame, area: Rect) {
    let accent = Color::Rgb(255, 220, 80);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "GAME PAUSED",
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(hint("Space", " continue")),
        Line::from(hint("Esc", " main menu")),
    ];
    panel(frame, area, " ⏸ Paused ", accent, lines);
}

pub fn render_game_over(frame: &mut Frame, area: Rect, winner: &str, left: u32, right: u32) {
    let accent = Color::Rgb(200, 120, 255);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            winner.to_string(),
            Style::default().fg(Color::Rgb(255, 215, 0)).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{} - {}", left, right),
            Style::default().fg(Color::Rgb(180, 180, 200)),
        )),
        Line::from(""),
        Line::from(hint("R", " play again")),
        Line::from(hint("Esc", " main menu")),
    ];
    panel(frame, area, " 🏆 Game Over ", accent, lines);
}
