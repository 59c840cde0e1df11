//! Game state and the phase machine around the tick.
//!
//! `Game` exclusively owns the grid, the seeker and the chasers. Input arrives
//! through `set_pending_direction`, `request_start`, `toggle_pause` and
//! `restart`; a scheduler calls `tick` at a fixed rate. Everything a renderer
//! needs is readable through the accessors between ticks.

mod tick;


use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::agent::{Chaser, Seeker};
use crate::config::Settings;
use crate::events::{GameEvent, Phase};
use crate::grid::{Dir, Grid};

pub const STARTING_LIVES: u32 = 3;

/// Ticks of power mode at `level`: 150, ten fewer per level, never below 50.
pub fn power_duration(level: u32) -> u32 {
    150 - level.saturating_sub(1).saturating_mul(10).min(100)
}

/// Ticks between chaser moves. Faster every three levels, slower in power mode.
pub fn chaser_cadence(level: u32, power_mode: bool) -> u32 {
    let base = if power_mode { 6 } else { 4 };
    let speedup = if power_mode {
        0
    } else {
        (level.saturating_sub(1) / 3).min(2)
    };
    (base - speedup).max(2)
}

#[derive(Debug)]
pub struct Game {
    pub(crate) grid: Grid,
    pub(crate) seeker: Seeker,
    pub(crate) chasers: Vec<Chaser>,
    pub(crate) score: u32,
    pub(crate) lives: u32,
    pub(crate) level: u32,
    pub(crate) power_mode: bool,
    pub(crate) power_timer: u32,
    pub(crate) scatter_timer: u64,
    pub(crate) seeker_cooldown: u32,
    pub(crate) chaser_cooldown: u32,
    /// Chaser cooldown firings so far; scared chasers sit out the odd ones.
    pub(crate) chaser_firings: u64,
    pub(crate) phase: Phase,
    pub(crate) rng: ChaCha8Rng,
}

impl Game {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            grid: Grid::level_one(),
            seeker: Seeker::new(),
            chasers: Chaser::roster(),
            score: 0,
            lives: STARTING_LIVES,
            level: 1,
            power_mode: false,
            power_timer: 0,
            scatter_timer: 0,
            seeker_cooldown: 0,
            chaser_cooldown: 0,
            chaser_firings: 0,
            phase: Phase::Idle,
            rng,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.seed)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn seeker(&self) -> &Seeker {
        &self.seeker
    }

    pub fn chasers(&self) -> &[Chaser] {
        &self.chasers
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn power_mode(&self) -> bool {
        self.power_mode
    }

    pub fn power_timer(&self) -> u32 {
        self.power_timer
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Latches a direction for the seeker. Ignored outside a running game.
    pub fn set_pending_direction(&mut self, dir: Dir) {
        if matches!(self.phase, Phase::Playing | Phase::Paused) {
            self.seeker.pending = Some(dir);
        }
    }

    /// Start or resume. With no lives left this starts a fresh game.
    pub fn request_start(&mut self) -> Vec<GameEvent> {
        if self.phase == Phase::Playing {
            return Vec::new();
        }
        if self.lives == 0 {
            self.reset_all();
        }
        self.set_phase(Phase::Playing).into_iter().collect()
    }

    pub fn toggle_pause(&mut self) -> Vec<GameEvent> {
        let next = match self.phase {
            Phase::Playing => Phase::Paused,
            // Only a start can leave a game with no lives, and it resets first.
            Phase::Paused if self.lives == 0 => return Vec::new(),
            Phase::Paused => Phase::Playing,
            Phase::Idle | Phase::GameOver => return Vec::new(),
        };
        self.set_phase(next).into_iter().collect()
    }

    /// Full reset to level 1, waiting for a start.
    pub fn restart(&mut self) -> Vec<GameEvent> {
        self.reset_all();
        info!("game reset to level 1");
        self.set_phase(Phase::Idle).into_iter().collect()
    }

    pub(crate) fn set_phase(&mut self, to: Phase) -> Option<GameEvent> {
        let from = self.phase;
        if from == to {
            return None;
        }
        self.phase = to;
        info!(?from, ?to, "phase change");
        Some(GameEvent::PhaseChanged { from, to })
    }

    fn reset_all(&mut self) {
        self.grid = Grid::level_one();
        self.seeker = Seeker::new();
        self.chasers = Chaser::roster();
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.level = 1;
        self.clear_power();
        self.scatter_timer = 0;
        self.seeker_cooldown = 0;
        self.chaser_cooldown = 0;
        self.chaser_firings = 0;
    }

    /// Agents back to their spawn cells; score, level and maze are kept.
    pub(crate) fn reset_positions(&mut self) {
        self.seeker.respawn();
        for chaser in &mut self.chasers {
            chaser.send_home();
        }
    }

    pub(crate) fn clear_power(&mut self) {
        self.power_mode = false;
        self.power_timer = 0;
        for chaser in &mut self.chasers {
            chaser.scared = false;
        }
    }
}
