use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::config::{difficulty_label, GameConfig};

const BANNER: &str = r#"
 ╔═══════════════════════════════════════════╗
 ║  ██████╗  ██████╗ ███╗   ██╗ ██████╗      ║
 ║  ██╔══██╗██╔═══██╗████╗  ██║██╔════╝      ║
 ║  ██████╔╝██║   ██║██╔██╗ ██║██║  ███╗     ║
 ║  ██╔═══╝ ██║   ██║██║╚██╗██║██║   ██║     ║
 ║  ██║     ╚██████╔╝██║ ╚████║╚██████╔╝     ║
 ║  ╚═╝      ╚═════╝ ╚═╝  ╚═══╝ ╚═════╝      ║
 ╚═══════════════════════════════════════════╝"#;

struct MenuOption {
    key: &'static str,
    name: &'static str,
    desc: &'static str,
    color: Color,
}

const OPTIONS: [MenuOption; 3] = [
    MenuOption { key: "1", name: "Single Player", desc: "You vs the computer", color: Color::Rgb(80, 200, 255) },
    MenuOption { key: "2", name: "Two Players", desc: "Share the keyboard", color: Color::Rgb(255, 120, 120) },
    MenuOption { key: "Q", name: "Quit", desc: "Leave the arcade", color: Color::Rgb(140, 140, 160) },
];

fn controls() -> Vec<Line<'static>> {
    let key = Style::default().fg(Color::Rgb(80, 200, 255));
    let text = Style::default().fg(Color::Rgb(140, 140, 140));
    vec![
        Line::from(""),
        Line::from(vec![Span::styled("    W / S            ", key), Span::styled("Left paddle", text)]),
        Line::from(vec![Span::styled("    ↑ / ↓            ", key), Span::styled("Right paddle (2P)", text)]),
        Line::from(vec![Span::styled("    Esc / P          ", key), Span::styled("Pause", text)]),
        Line::from(vec![Span::styled("    Space            ", key), Span::styled("Resume", text)]),
        Line::from(vec![Span::styled("    R                ", key), Span::styled("Play again", text)]),
        Line::from(vec![Span::styled("    Ctrl+C           ", key), Span::styled("Quit anytime", text)]),
    ]
}

pub fn render_menu(frame: &mut Frame, area: Rect, config: &GameConfig) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10), // Banner
            Constraint::Length(8),  // Options
            Constraint::Min(0),     // Rules + controls
            Constraint::Length(1),  // Footer
        ])
        .split(area);

    let banner = Paragraph::new(BANNER)
        .style(
            Style::default()
                .fg(Color::Rgb(200, 120, 255))
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[0]);

    let mut lines: Vec<Line> = vec![Line::from("")];
    for option in &OPTIONS {
        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", option.key),
                Style::default()
                    .fg(Color::Rgb(255, 220, 80))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{:<15}", option.name),
                Style::default().fg(option.color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(option.desc, Style::default().fg(Color::Rgb(120, 120, 140))),
        ]));
        lines.push(Line::from(""));
    }
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[1]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);

    let difficulty = config.rules.ai_difficulty;
    let rules = Paragraph::new(vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("    First to         ", Style::default().fg(Color::Rgb(80, 200, 255))),
            Span::styled(
                config.rules.win_score.to_string(),
                Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("    Computer         ", Style::default().fg(Color::Rgb(80, 200, 255))),
            Span::styled(
                format!("{} ({:.2})", difficulty_label(difficulty), difficulty),
                Style::default().fg(Color::Rgb(255, 120, 120)).add_modifier(Modifier::BOLD),
            ),
        ]),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(50, 100, 140)))
            .title(" 🏆 Rules ")
            .title_style(Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(rules, cols[0]);

    let keys = Paragraph::new(controls()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(50, 100, 140)))
            .title(" 🎮 Controls ")
            .title_style(Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(keys, cols[1]);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("  🦀 ", Style::default().fg(Color::Rgb(255, 100, 50))),
        Span::styled(
            concat!("v", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Rgb(80, 80, 100)),
        ),
        Span::styled("  │  ", Style::default().fg(Color::Rgb(40, 40, 60))),
        Span::styled("Press a key to select", Style::default().fg(Color::Rgb(100, 100, 130))),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[3]);
}
