use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

pub const DEFAULT_TICK_MS: u64 = 50;
pub const DEFAULT_ANIMATION_MS: u64 = 50;
pub const DEFAULT_RENDER_FPS: u64 = 60;

const SAVE_DIR: &str = "maze-chase";
const SAVE_FILE: &str = "save.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Interval between simulation ticks.
    pub tick: Duration,
    /// Interval between cosmetic animation steps.
    pub animation: Duration,
    pub render_fps: u64,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub save_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(DEFAULT_TICK_MS),
            animation: Duration::from_millis(DEFAULT_ANIMATION_MS),
            render_fps: DEFAULT_RENDER_FPS,
            seed: None,
            save_path: default_save_path(),
        }
    }
}

impl Settings {
    /// Replaces zero intervals and rates with the defaults.
    pub fn validate(mut self) -> Self {
        if self.tick.is_zero() {
            warn!("tick interval must be positive, using {DEFAULT_TICK_MS} ms");
            self.tick = Duration::from_millis(DEFAULT_TICK_MS);
        }
        if self.animation.is_zero() {
            warn!("animation interval must be positive, using {DEFAULT_ANIMATION_MS} ms");
            self.animation = Duration::from_millis(DEFAULT_ANIMATION_MS);
        }
        if self.render_fps == 0 {
            warn!("render rate must be positive, using {DEFAULT_RENDER_FPS} fps");
            self.render_fps = DEFAULT_RENDER_FPS;
        }
        self
    }

    pub fn frame_time(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.render_fps.max(1))
    }
}

/// `$LOCALAPPDATA/maze-chase/save.json`, else under `$HOME`, else the working directory.
pub fn default_save_path() -> PathBuf {
    let base = env::var_os("LOCALAPPDATA")
        .or_else(|| env::var_os("HOME"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    base.join(SAVE_DIR).join(SAVE_FILE)
}
