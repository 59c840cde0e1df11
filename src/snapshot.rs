//! Save-game data layout and the capture/restore pair on `Game`.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::agent::{Agent, SEEKER_SPAWN};
use crate::error::{GameError, GameResult};
use crate::events::{GameEvent, Phase};
use crate::game::Game;
use crate::grid::{Grid, Pos, Tile, MAZE_HEIGHT, MAZE_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellPos {
    pub x: usize,
    pub y: usize,
}

impl CellPos {
    fn to_pos(self) -> Option<Pos> {
        (self.x < MAZE_WIDTH && self.y < MAZE_HEIGHT).then(|| Pos::new(self.x, self.y))
    }
}

impl From<Pos> for CellPos {
    fn from(pos: Pos) -> Self {
        Self { x: pos.x, y: pos.y }
    }
}

/// Everything needed to resume a game. The maze is stored after
/// consumption so half-eaten levels come back as they were.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveSnapshot {
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub maze: Vec<Vec<Tile>>,
    pub seeker: CellPos,
    /// Matched by index to the chaser roster.
    pub chasers: Vec<CellPos>,
}

#[derive(Debug, Default)]
pub struct RestoreReport {
    /// Set when chaser positions were skipped instead of applied.
    pub degraded: Option<GameError>,
    /// The switch into `Paused`, absent when the game was already paused.
    pub phase_change: Option<GameEvent>,
}

impl RestoreReport {
    pub fn is_complete(&self) -> bool {
        self.degraded.is_none()
    }
}

impl Game {
    pub fn snapshot(&self) -> GameResult<SaveSnapshot> {
        if self.lives == 0 {
            return Err(GameError::SaveRejected);
        }
        Ok(SaveSnapshot {
            score: self.score,
            lives: self.lives,
            level: self.level,
            maze: self.grid.to_rows(),
            seeker: self.seeker.pos().into(),
            chasers: self.chasers.iter().map(|c| c.pos().into()).collect(),
        })
    }

    /// Applies a snapshot and leaves the game paused. A malformed maze rejects
    /// the whole load; a chaser list that does not fit the roster only skips
    /// the chaser positions.
    pub fn restore(&mut self, snapshot: &SaveSnapshot) -> GameResult<RestoreReport> {
        let grid = Grid::from_rows(&snapshot.maze)?;

        self.grid = grid;
        self.score = snapshot.score;
        self.lives = snapshot.lives;
        self.level = snapshot.level.max(1);
        self.seeker.pending = None;
        self.seeker.pos = snapshot.seeker.to_pos().unwrap_or_else(|| {
            warn!(?snapshot.seeker, "saved seeker position out of bounds, using spawn");
            SEEKER_SPAWN
        });
        if self.seeker.pos != SEEKER_SPAWN && !self.grid.tile(self.seeker.pos).is_passable() {
            warn!(pos = ?self.seeker.pos, "saved seeker position is inside a wall");
        }
        self.clear_power();
        self.seeker_cooldown = 0;
        self.chaser_cooldown = 0;

        let mut report = RestoreReport::default();
        let positions: Vec<Pos> = snapshot.chasers.iter().filter_map(|c| c.to_pos()).collect();
        if snapshot.chasers.len() == self.chasers.len() && positions.len() == self.chasers.len() {
            for (chaser, pos) in self.chasers.iter_mut().zip(positions) {
                chaser.pos = pos;
            }
        } else {
            let err = GameError::StateMismatch {
                expected: self.chasers.len(),
                found: positions.len(),
            };
            warn!(%err, "chaser positions not restored");
            for chaser in &mut self.chasers {
                chaser.send_home();
            }
            report.degraded = Some(err);
        }

        report.phase_change = self.set_phase(Phase::Paused);
        info!(score = self.score, lives = self.lives, level = self.level, "game restored");
        Ok(report)
    }
}
