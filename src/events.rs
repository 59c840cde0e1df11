use crate::agent::Rgb;
use crate::grid::Pos;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Playing,
    Paused,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectCause {
    PelletEaten,
    PowerPelletEaten,
    ChaserEaten,
    SeekerCaught,
}

impl EffectCause {
    pub fn color(self) -> Rgb {
        match self {
            EffectCause::PelletEaten => Rgb(255, 200, 100),
            EffectCause::PowerPelletEaten => Rgb(255, 255, 0),
            EffectCause::ChaserEaten => Rgb(255, 255, 255),
            EffectCause::SeekerCaught => Rgb(255, 0, 0),
        }
    }
}

/// Fire-and-forget cue for the particle layer. Not part of game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectEvent {
    pub pos: Pos,
    pub color: Rgb,
    pub cause: EffectCause,
}

impl EffectEvent {
    pub fn new(pos: Pos, cause: EffectCause) -> Self {
        Self {
            pos,
            color: cause.color(),
            cause,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Effect(EffectEvent),
    LevelUp { level: u32 },
    LifeLost { lives: u32 },
    GameOver { score: u32 },
    PhaseChanged { from: Phase, to: Phase },
}

impl GameEvent {
    /// Text for the notification line, if the event warrants one.
    pub fn notice(&self) -> Option<String> {
        match self {
            GameEvent::LevelUp { level } => Some(format!(
                "Level {level}! New maze, faster chasers. Press P or Enter."
            )),
            GameEvent::LifeLost { lives } => Some(format!("Caught! {lives} lives left")),
            GameEvent::GameOver { score } => Some(format!("Game over, final score {score}")),
            GameEvent::Effect(_) | GameEvent::PhaseChanged { .. } => None,
        }
    }
}
