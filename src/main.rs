mod app;
mod effects;
mod event;
mod ui;

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rustvaders::{Tunables, World, TICK_INTERVAL};

use app::App;
use event::{Event, EventHandler};

type Term = Terminal<CrosstermBackend<io::Stdout>>;

#[derive(Parser, Debug)]
#[command(
    name = "rustvaders",
    version,
    about = "Space Invaders in the terminal: a three-wave campaign with a boss, or endless waves"
)]
struct Cli {
    /// Seed for enemy fire. A random seed is picked and logged when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds per simulation tick.
    #[arg(long, default_value_t = TICK_INTERVAL.as_millis() as u64)]
    tick_ms: u64,

    /// Logical playfield width.
    #[arg(long, default_value_t = rustvaders::config::CANVAS_WIDTH)]
    width: f32,

    /// Logical playfield height.
    #[arg(long, default_value_t = rustvaders::config::CANVAS_HEIGHT)]
    height: f32,

    /// Write logs to this file. The terminal is owned by the game, so nothing
    /// is logged without it.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Skip the menu and start in campaign mode.
    #[arg(long, conflicts_with = "infinite")]
    campaign: bool,

    /// Skip the menu and start in infinite mode.
    #[arg(long)]
    infinite: bool,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn setup_terminal() -> Result<(Term, bool)> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Release events let held keys stop the instant they are let go.
    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok((terminal, enhanced))
}

fn restore_terminal(terminal: &mut Term, enhanced: bool) -> Result<()> {
    if enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run(terminal: &mut Term, app: &mut App, tick_rate: Duration) -> Result<()> {
    let events = EventHandler::new(tick_rate);
    loop {
        terminal.draw(|frame| ui::render(frame, &*app))?;

        match events.next()? {
            Event::Tick => app.on_tick(),
            Event::Key(key) => app.on_key(key),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    if cli.tick_ms == 0 {
        bail!("--tick-ms must be at least 1");
    }

    let tunables = Tunables {
        canvas_width: cli.width,
        canvas_height: cli.height,
        ..Tunables::default()
    };
    tunables.validate().context("invalid playfield size")?;

    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(seed, tick_ms = cli.tick_ms, "starting rustvaders");

    let mut world = World::new(tunables, seed);
    if cli.campaign {
        world.start_campaign();
    } else if cli.infinite {
        world.start_infinite_mode();
    }

    let tick_rate = Duration::from_millis(cli.tick_ms);
    let (mut terminal, enhanced) = setup_terminal()?;
    let mut app = App::new(world, tick_rate, enhanced);
    let result = run(&mut terminal, &mut app, tick_rate);
    restore_terminal(&mut terminal, enhanced)?;

    if let Err(err) = &result {
        error!(error = %err, "game loop failed");
    }
    info!(score = app.world.state().score(), "exited");
    result
}
