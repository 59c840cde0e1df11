//! Simulation core of a maze-chase arcade game: a seeker eats pellets in a
//! grid maze while four chasers hunt, scatter and flee.

pub mod agent;
pub mod chaser_ai;
pub mod config;
pub mod effects;
pub mod error;
pub mod events;
pub mod game;
pub mod grid;
pub mod maze;
pub mod snapshot;
pub mod store;

pub use agent::{Agent, Chaser, Personality, Seeker};
pub use config::Settings;
pub use error::{GameError, GameResult};
pub use events::{EffectCause, EffectEvent, GameEvent, Phase};
pub use game::Game;
pub use grid::{Dir, Grid, Pos, Tile};
pub use snapshot::{RestoreReport, SaveSnapshot};
pub use store::SaveStore;
