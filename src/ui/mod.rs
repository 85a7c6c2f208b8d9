pub mod court;
pub mod menu;
pub mod overlay;

use ratatui::prelude::*;

use crate::app::App;
use crate::game::Screen;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let session = &app.session;

    match session.screen() {
        Screen::MainMenu => menu::render_menu(frame, area, session.config()),
        Screen::Playing => court::render_court(frame, area, session),
        Screen::Paused => {
            court::render_court(frame, area, session);
            overlay::render_pause(frame, area);
        }
        Screen::GameOver => {
            court::render_court(frame, area, session);
            let score = session.score();
            let winner = session.winner_label().unwrap_or("Game Over");
            overlay::render_game_over(frame, area, winner, score.left, score.right);
        }
    }
}
