use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::Show,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use rustpong::app::App;
use rustpong::audio;
use rustpong::config::GameConfig;
use rustpong::event::{Event, EventHandler, FrameClock};
use rustpong::input::HoldPolicy;
use rustpong::ui;

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

#[derive(Parser)]
#[command(name = "rustpong")]
#[command(version, about = "Two-paddle arcade ball game for the terminal")]
struct Cli {
    /// TOML config file; missing keys use the defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Computer opponent skill, 0.0 to 1.0
    #[arg(long)]
    difficulty: Option<f32>,

    /// Points needed to win a game
    #[arg(long)]
    win_score: Option<u32>,

    /// Seed for serve directions and AI error
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the log (default: rustpong.log next to the executable)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the effective config as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(d) = cli.difficulty {
        config.rules.ai_difficulty = d;
    }
    if let Some(n) = cli.win_score {
        config.rules.win_score = n;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    config.validate().context("Invalid command line options")?;
    Ok(config)
}

fn log_path() -> PathBuf {
    // Store next to the executable
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            return dir.join("rustpong.log");
        }
    }
    PathBuf::from("rustpong.log")
}

fn init_logging(path: PathBuf) -> Result<()> {
    let file = File::create(&path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(terminal: &mut Tui, app: &mut App, clock: &mut FrameClock) -> Result<()> {
    let events = EventHandler::new(5);

    loop {
        for event in events.drain() {
            match event {
                Event::Key(key) => app.on_key(key),
            }
        }
        if app.should_quit {
            break;
        }

        app.on_tick();
        terminal
            .draw(|frame| ui::render(frame, app))
            .context("Failed to draw frame")?;

        clock.wait();
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    init_logging(cli.log_file.clone().unwrap_or_else(log_path))?;
    log::info!(
        "starting: {}x{} @ {} fps, first to {}, difficulty {}",
        config.field.width,
        config.field.height,
        config.field.fps,
        config.rules.win_score,
        config.rules.ai_difficulty
    );

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;

    // Key releases are only reported with the enhancement flags
    let enhanced = matches!(supports_keyboard_enhancement(), Ok(true));
    let result = play(config, enhanced);
    let restored = restore_terminal(enhanced);

    match &result {
        Err(e) => log::error!("game loop failed: {:#}", e),
        Ok(()) => log::info!("bye"),
    }
    result.and(restored)
}

fn play(config: GameConfig, enhanced: bool) -> Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let hold = if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )
        .context("Failed to enable key release events")?;
        HoldPolicy::UntilRelease
    } else {
        log::warn!(
            "terminal does not report key releases, holding keys for {} frames",
            config.input.hold_frames
        );
        HoldPolicy::Frames(config.input.hold_frames)
    };

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.clear()?;

    let mut clock = FrameClock::new(config.frame_duration());
    let sounds = audio::sink_for(config.sound.backend);
    let mut app = App::new(config, sounds, hold);

    run(&mut terminal, &mut app, &mut clock)
}

/// Undo every terminal mode `main` and `play` may have set. Each step runs
/// even if an earlier one failed; the first failure is returned.
fn restore_terminal(enhanced: bool) -> Result<()> {
    let mut stdout = io::stdout();
    if enhanced {
        if let Err(e) = execute!(stdout, PopKeyboardEnhancementFlags) {
            log::warn!("failed to pop keyboard enhancement flags: {}", e);
        }
    }
    let raw = disable_raw_mode().context("Failed to disable raw mode");
    let screen = execute!(stdout, LeaveAlternateScreen, Show)
        .context("Failed to leave alternate screen");
    raw.and(screen)
}
