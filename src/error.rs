use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::grid::{MAZE_HEIGHT, MAZE_WIDTH};

pub type GameResult<T> = Result<T, GameError>;

#[derive(Debug, Error)]
pub enum GameError {
    /// Destination impassable or outside the maze. The tick drops these.
    #[error("cannot move to ({x}, {y})")]
    InvalidMove { x: isize, y: isize },

    #[error("no saved game at {}", path.display())]
    NoSnapshot { path: PathBuf },

    #[error("save storage at {} is unavailable: {source}", path.display())]
    PersistenceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot save when the game is over")]
    SaveRejected,

    #[error("saved game has {found} chasers, roster has {expected}")]
    StateMismatch { expected: usize, found: usize },

    #[error("saved game is malformed: {0}")]
    MalformedSnapshot(#[from] serde_json::Error),

    #[error("saved maze is {rows}x{cols}, expected {}x{}", MAZE_HEIGHT, MAZE_WIDTH)]
    MazeShape { rows: usize, cols: usize },
}

impl GameError {
    /// Whether the error should be shown to the player.
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, GameError::InvalidMove { .. })
    }
}
