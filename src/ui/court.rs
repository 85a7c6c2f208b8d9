use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::audio::SoundSink;
use crate::game::{Mode, Rect as CourtRect, Screen, Session};

const BG: Color = Color::Rgb(10, 10, 20);

/// Cell span covered by a court rectangle: `[x0, x1) × [y0, y1)`, at least one
/// cell in each direction and clipped to the grid.
pub fn cell_span(rect: &CourtRect, sx: f32, sy: f32, w: usize, h: usize) -> (usize, usize, usize, usize) {
    if w == 0 || h == 0 {
        return (0, 0, 0, 0);
    }
    let x0 = ((rect.left() * sx).max(0.0) as usize).min(w - 1);
    let y0 = ((rect.top() * sy).max(0.0) as usize).min(h - 1);
    let x1 = ((rect.right() * sx).ceil().max(0.0) as usize).clamp(x0 + 1, w);
    let y1 = ((rect.bottom() * sy).ceil().max(0.0) as usize).clamp(y0 + 1, h);
    (x0, x1, y0, y1)
}

fn render_field<S: SoundSink>(session: &Session<S>, width: usize, height: usize) -> Vec<Line<'static>> {
    let w = width;
    let h = height;
    let field = &session.config().field;

    // Scale factors
    let sx = w as f32 / field.width;
    let sy = h as f32 / field.height;

    let mut grid: Vec<Vec<(char, Style)>> = vec![vec![(' ', Style::default().bg(BG)); w]; h];

    // Dashed centre line
    if w > 0 {
        let cx = w / 2;
        for (y, row) in grid.iter_mut().enumerate() {
            if y % 2 == 0 {
                row[cx] = ('┆', Style::default().fg(Color::Rgb(70, 70, 90)).bg(BG));
            }
        }
    }

    // Paddles
    let paddle_colors = [Color::Rgb(80, 200, 255), Color::Rgb(255, 120, 120)];
    for (paddle, color) in [session.left(), session.right()].into_iter().zip(paddle_colors) {
        let (x0, x1, y0, y1) = cell_span(paddle.rect(), sx, sy, w, h);
        for row in grid.iter_mut().take(y1).skip(y0) {
            for cell in row.iter_mut().take(x1).skip(x0) {
                *cell = ('█', Style::default().fg(color).bg(BG));
            }
        }
    }

    // Ball, plus a faint trail while it is moving
    let ball = session.ball();
    if w > 0 && h > 0 {
        let bx = ((ball.rect().center_x() * sx) as usize).min(w - 1);
        let by = ((ball.rect().center_y() * sy) as usize).min(h - 1);
        let (vx, vy) = ball.velocity();
        if ball.is_active() {
            let tx = (ball.rect().center_x() - vx * 3.0) * sx;
            let ty = (ball.rect().center_y() - vy * 3.0) * sy;
            if tx >= 0.0 && ty >= 0.0 {
                let (tx, ty) = (tx as usize, ty as usize);
                if tx < w && ty < h && (tx != bx || ty != by) {
                    grid[ty][tx] = ('·', Style::default().fg(Color::Rgb(100, 100, 120)).bg(BG));
                }
            }
        }
        grid[by][bx] = (
            '●',
            Style::default()
                .fg(Color::Rgb(255, 255, 255))
                .bg(BG)
                .add_modifier(Modifier::BOLD),
        );
    }

    grid.into_iter()
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .into_iter()
                .map(|(ch, style)| Span::styled(String::from(ch), style))
                .collect();
            Line::from(spans)
        })
        .collect()
}

pub fn right_player_name(mode: Mode) -> &'static str {
    match mode {
        Mode::SinglePlayer => "CPU",
        Mode::TwoPlayer => "P2",
    }
}

pub fn render_court<S: SoundSink>(frame: &mut Frame, area: Rect, session: &Session<S>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .title(" 🏓 Pong ")
        .title_style(
            Style::default()
                .fg(Color::Rgb(200, 120, 255))
                .add_modifier(Modifier::BOLD),
        );

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(inner);

    // Scoreboard
    let score = session.score();
    let status = Line::from(vec![
        Span::styled(
            format!(" P1 {} ", score.left),
            Style::default()
                .fg(Color::Rgb(80, 200, 255))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{} {} ", score.right, right_player_name(session.mode())),
            Style::default()
                .fg(Color::Rgb(255, 120, 120))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("First to {}", session.config().rules.win_score),
            Style::default().fg(Color::Rgb(255, 220, 80)),
        ),
    ]);
    frame.render_widget(Paragraph::new(status).alignment(Alignment::Center), chunks[0]);

    // Court
    let fw = chunks[1].width as usize;
    let fh = chunks[1].height as usize;
    let lines = render_field(session, fw, fh);
    frame.render_widget(Paragraph::new(lines), chunks[1]);

    // Help bar
    let key = Style::default().fg(Color::Rgb(80, 200, 255));
    let dim = Style::default().fg(Color::DarkGray);
    let sep = Style::default().fg(Color::Rgb(60, 60, 60));
    let mut help = vec![Span::styled(" W/S ", key), Span::styled("P1 ", dim)];
    if session.mode() == Mode::TwoPlayer {
        help.push(Span::styled("│ ", sep));
        help.push(Span::styled("↑/↓ ", key));
        help.push(Span::styled("P2 ", dim));
    }
    help.push(Span::styled("│ ", sep));
    help.push(Span::styled("Esc ", key));
    help.push(Span::styled("Pause", dim));
    if session.screen() == Screen::Playing && !session.ball().is_active() {
        help.push(Span::styled("  │  ", sep));
        help.push(Span::styled(
            "Get ready...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(help)), chunks[2]);
}
