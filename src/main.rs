mod render;

use std::fs::File;
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use maze_chase::config::{default_save_path, DEFAULT_ANIMATION_MS, DEFAULT_RENDER_FPS, DEFAULT_TICK_MS};
use maze_chase::effects::ParticleField;
use maze_chase::{Dir, Game, GameError, GameEvent, Phase, SaveStore, Settings};
use rand::rngs::ThreadRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use render::Renderer;

const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Parser)]
#[command(name = "maze-chase", version, about = "Eat every pellet, dodge the chasers")]
struct Cli {
    /// Milliseconds between simulation ticks.
    #[arg(long, env = "MAZE_CHASE_TICK_MS", default_value_t = DEFAULT_TICK_MS)]
    tick_ms: u64,

    /// Milliseconds between particle animation steps.
    #[arg(long, env = "MAZE_CHASE_ANIM_MS", default_value_t = DEFAULT_ANIMATION_MS)]
    anim_ms: u64,

    #[arg(long, env = "MAZE_CHASE_FPS", default_value_t = DEFAULT_RENDER_FPS)]
    fps: u64,

    /// Fixed seed for reproducible mazes and chaser behaviour.
    #[arg(long, env = "MAZE_CHASE_SEED")]
    seed: Option<u64>,

    /// Save file used by F5 and F9.
    #[arg(long, env = "MAZE_CHASE_SAVE")]
    save: Option<PathBuf>,

    /// Write logs here. The terminal belongs to the game, so nothing is logged without it.
    #[arg(long, env = "MAZE_CHASE_LOG")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            tick: Duration::from_millis(self.tick_ms),
            animation: Duration::from_millis(self.anim_ms),
            render_fps: self.fps,
            seed: self.seed,
            save_path: self.save.clone().unwrap_or_else(default_save_path),
        }
        .validate()
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }
    let settings = cli.settings();
    info!(?settings, "starting");

    let mut stdout = io::stdout();
    terminal::enable_raw_mode().context("enabling raw mode")?;
    stdout
        .execute(EnterAlternateScreen)
        .context("entering alternate screen")?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, &settings);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Steer(Dir),
    Start,
    Pause,
    Save,
    Load,
    Restart,
    Quit,
}

fn command_for(key: KeyEvent) -> Option<Command> {
    let code = match key.code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };
    let command = match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => Command::Steer(Dir::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => Command::Steer(Dir::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => Command::Steer(Dir::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => Command::Steer(Dir::Right),
        KeyCode::Enter | KeyCode::Char(' ') => Command::Start,
        KeyCode::Char('p') => Command::Pause,
        KeyCode::F(5) => Command::Save,
        KeyCode::F(9) => Command::Load,
        KeyCode::Char('r') => Command::Restart,
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        _ => return None,
    };
    Some(command)
}

/// Everything the front end owns besides the terminal.
struct Session {
    game: Game,
    particles: ParticleField,
    store: SaveStore,
    notice: Option<(String, Instant)>,
    sparks: ThreadRng,
}

impl Session {
    fn new(settings: &Settings) -> Self {
        Self {
            game: Game::from_settings(settings),
            particles: ParticleField::new(),
            store: SaveStore::new(&settings.save_path),
            notice: None,
            sparks: rand::thread_rng(),
        }
    }

    /// Returns false when the player asked to quit.
    fn apply(&mut self, command: Command) -> bool {
        let events = match command {
            Command::Steer(dir) => {
                self.game.set_pending_direction(dir);
                Vec::new()
            }
            Command::Start => self.game.request_start(),
            Command::Pause => self.game.toggle_pause(),
            Command::Restart => {
                self.particles.clear();
                self.notify("New game");
                self.game.restart()
            }
            Command::Save => {
                self.save();
                Vec::new()
            }
            Command::Load => {
                self.load();
                Vec::new()
            }
            Command::Quit => return false,
        };
        self.absorb(events);
        true
    }

    fn absorb(&mut self, events: Vec<GameEvent>) {
        for event in events {
            if let GameEvent::Effect(effect) = &event {
                self.particles.burst(effect, &mut self.sparks);
            }
            if let Some(text) = event.notice() {
                self.notify(text);
            }
        }
    }

    fn save(&mut self) {
        match self.game.snapshot().and_then(|snap| self.store.save(&snap)) {
            Ok(()) => {
                let text = format!("Saved to {}", self.store.path().display());
                self.notify(text);
            }
            Err(err) => self.report("Save failed", &err),
        }
    }

    fn load(&mut self) {
        match self.store.load().and_then(|snap| self.game.restore(&snap)) {
            Ok(report) => {
                self.particles.clear();
                self.absorb(report.phase_change.into_iter().collect());
                match report.degraded {
                    None => self.notify("Game loaded. Press P or Enter to resume."),
                    Some(err) => self.notify(format!("Game loaded, chasers sent home: {err}")),
                }
            }
            Err(err) => self.report("Load failed", &err),
        }
    }

    fn report(&mut self, what: &str, err: &GameError) {
        warn!(%err, "{what}");
        if err.is_user_visible() {
            self.notify(format!("{what}: {err}"));
        }
    }

    fn notify(&mut self, text: impl Into<String>) {
        self.notice = Some((text.into(), Instant::now()));
    }

    fn notice(&mut self) -> Option<&str> {
        if matches!(&self.notice, Some((_, at)) if at.elapsed() > NOTICE_TTL) {
            self.notice = None;
        }
        self.notice.as_ref().map(|(text, _)| text.as_str())
    }
}

fn run(stdout: &mut Stdout, settings: &Settings) -> Result<()> {
    let mut session = Session::new(settings);
    let grid = session.game.grid();
    let mut renderer = Renderer::new(grid.width(), grid.height());
    let frame_time = settings.frame_time();
    let mut last_tick = Instant::now();
    let mut last_anim = Instant::now();

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                    if let Some(command) = command_for(key) {
                        if !session.apply(command) {
                            info!(score = session.game.score(), "quit");
                            return Ok(());
                        }
                    }
                }
                Event::Resize(..) => renderer.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= settings.tick {
            last_tick = Instant::now();
            let events = session.game.tick();
            session.absorb(events);
        }
        if last_anim.elapsed() >= settings.animation {
            last_anim = Instant::now();
            if session.game.phase() == Phase::Playing {
                session.particles.step();
            }
        }

        let notice = session.notice().map(str::to_owned);
        renderer.draw(stdout, &session.game, &session.particles, notice.as_deref())?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn movement_keys_share_directions() {
        for code in [KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('k'), KeyCode::Char('W')] {
            assert_eq!(command_for(key(code)), Some(Command::Steer(Dir::Up)));
        }
        assert_eq!(command_for(key(KeyCode::Char('h'))), Some(Command::Steer(Dir::Left)));
        assert_eq!(command_for(key(KeyCode::Char('d'))), Some(Command::Steer(Dir::Right)));
    }

    #[test]
    fn control_keys() {
        assert_eq!(command_for(key(KeyCode::Enter)), Some(Command::Start));
        assert_eq!(command_for(key(KeyCode::Char(' '))), Some(Command::Start));
        assert_eq!(command_for(key(KeyCode::Char('p'))), Some(Command::Pause));
        assert_eq!(command_for(key(KeyCode::F(5))), Some(Command::Save));
        assert_eq!(command_for(key(KeyCode::F(9))), Some(Command::Load));
        assert_eq!(command_for(key(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(command_for(key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn cli_defaults_match_settings() {
        let cli = Cli::parse_from(["maze-chase"]);
        let settings = cli.settings();
        assert_eq!(settings.tick, Duration::from_millis(DEFAULT_TICK_MS));
        assert_eq!(settings.render_fps, DEFAULT_RENDER_FPS);
    }
}
