use rustpong::audio::SoundEvent;
use rustpong::config::GameConfig;
use rustpong::game::{Command, Flow, Key, KeySnapshot, Mode, Screen, Session};

fn config(win_score: u32) -> GameConfig {
    let mut config = GameConfig::default();
    config.seed = Some(42);
    config.rules.win_score = win_score;
    config
}

// Left paddle pinned to the top wall, right paddle to the bottom. Serves
// leave the centre at most half as steep as they are fast, so they can
// never reach either paddle before crossing a goal line.
fn out_of_the_way() -> KeySnapshot {
    KeySnapshot::none().with(Key::W).with(Key::ArrowDown)
}

fn play_out(session: &mut Session<Vec<SoundEvent>>, max_frames: usize) -> usize {
    for frame in 0..max_frames {
        if session.screen() == Screen::GameOver {
            return frame;
        }
        session.tick(out_of_the_way());
    }
    max_frames
}

#[test]
fn test_two_player_game_runs_to_game_over() {
    let mut session = Session::new(config(3), Vec::new());
    assert_eq!(session.handle(Command::StartTwoPlayer), Flow::Continue);
    assert_eq!(session.screen(), Screen::Playing);
    assert_eq!(session.mode(), Mode::TwoPlayer);

    let frames = play_out(&mut session, 5_000);
    assert!(frames < 5_000, "game never finished");
    assert_eq!(session.screen(), Screen::GameOver);

    let score = session.score();
    assert_eq!(score.left.max(score.right), 3);
    let points = (score.left + score.right) as usize;

    let sounds = session.sounds();
    let scores = sounds.iter().filter(|e| **e == SoundEvent::Score).count();
    assert_eq!(scores, points);
    assert!(!sounds.contains(&SoundEvent::PaddleHit));

    let label = session.winner_label().unwrap();
    assert!(label == "Player 1 Wins!" || label == "Player 2 Wins!");
}

#[test]
fn test_game_over_is_frozen_until_replay() {
    let mut session = Session::new(config(1), Vec::new());
    session.handle(Command::StartTwoPlayer);
    play_out(&mut session, 2_000);
    assert_eq!(session.screen(), Screen::GameOver);

    let score = session.score();
    let heard = session.sounds().len();
    for _ in 0..300 {
        session.tick(out_of_the_way());
    }
    assert_eq!(session.screen(), Screen::GameOver);
    assert_eq!(session.score(), score);
    assert_eq!(session.sounds().len(), heard);
    assert!(!session.ball().is_active());

    session.handle(Command::Replay);
    assert_eq!(session.screen(), Screen::Playing);
    assert_eq!(session.mode(), Mode::TwoPlayer);
    assert_eq!((session.score().left, session.score().right), (0, 0));
    assert!(session.launch_pending().is_some());
}

#[test]
fn test_pause_freezes_the_rally() {
    let mut session = Session::new(config(5), Vec::new());
    session.handle(Command::StartSinglePlayer);
    for _ in 0..70 {
        session.tick(KeySnapshot::none());
    }
    assert!(session.ball().is_active());

    session.handle(Command::Pause);
    let ball = *session.ball().rect();
    let ai = *session.right().rect();
    for _ in 0..120 {
        session.tick(KeySnapshot::none());
    }
    assert_eq!(*session.ball().rect(), ball);
    assert_eq!(*session.right().rect(), ai);

    session.handle(Command::Resume);
    session.tick(KeySnapshot::none());
    assert_ne!(*session.ball().rect(), ball);
}

#[test]
fn test_menu_round_trip_abandons_the_game() {
    let mut session = Session::new(config(5), Vec::new());
    session.handle(Command::StartSinglePlayer);
    session.handle(Command::Pause);
    session.handle(Command::ReturnToMenu);
    assert_eq!(session.screen(), Screen::MainMenu);
    assert_eq!(session.launch_pending(), None);

    // Ticks on the menu do nothing
    for _ in 0..200 {
        session.tick(out_of_the_way());
    }
    assert!(!session.ball().is_active());
    assert!(session.sounds().is_empty());

    assert_eq!(session.handle(Command::Quit), Flow::Quit);
}

#[test]
fn test_same_seed_same_game() {
    let run = || {
        let mut session = Session::new(config(2), Vec::new());
        session.handle(Command::StartTwoPlayer);
        play_out(&mut session, 2_000);
        (session.score(), session.sounds().clone())
    };
    assert_eq!(run(), run());
}

#[test]
fn test_config_file_overrides_rules() {
    let config = GameConfig::from_toml(
        r#"
        seed = 7

        [rules]
        win_score = 2
        ai_difficulty = 0.25
        "#,
    )
    .unwrap();
    assert_eq!(config.rules.win_score, 2);
    assert_eq!(config.field.width, 800.0);

    let mut session = Session::new(config, Vec::new());
    session.handle(Command::StartTwoPlayer);
    play_out(&mut session, 2_000);
    assert_eq!(session.screen(), Screen::GameOver);
    assert_eq!(session.score().left.max(session.score().right), 2);
}
