use tracing::{info, trace};

use super::{chaser_cadence, power_duration, Game};
use crate::agent::Agent;
use crate::chaser_ai;
use crate::events::{EffectCause, EffectEvent, GameEvent, Phase};
use crate::grid::{Pos, Tile, PELLET_SCORE, POWER_PELLET_SCORE};
use crate::maze;

const SEEKER_COOLDOWN: u32 = 2;
const SCATTER_PERIOD: u64 = 200;
const CHASER_POINTS: u32 = 200;

impl Game {
    /// One simulation step. Does nothing unless the game is playing.
    ///
    /// Order matters: seeker, power decay, chasers, scatter, collisions,
    /// level check.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.phase != Phase::Playing {
            return events;
        }

        self.move_seeker(&mut events);
        self.decay_power();
        self.move_chasers();
        self.advance_scatter();
        if self.resolve_collisions(&mut events) {
            return events;
        }
        if self.grid.remaining_collectibles() == 0 {
            self.advance_level(&mut events);
        }
        events
    }

    fn move_seeker(&mut self, events: &mut Vec<GameEvent>) {
        if self.seeker_cooldown > 0 {
            self.seeker_cooldown -= 1;
            return;
        }
        let Some(dir) = self.seeker.pending else {
            return;
        };
        match self.grid.step(self.seeker.pos, dir) {
            Ok(next) => {
                self.seeker.pos = next;
                self.seeker.facing = dir;
                self.seeker_cooldown = SEEKER_COOLDOWN;
                self.collect(next, events);
            }
            Err(err) => trace!(%err, "seeker move rejected"),
        }
    }

    fn collect(&mut self, pos: Pos, events: &mut Vec<GameEvent>) {
        match self.grid.consume(pos) {
            Some(Tile::Pellet) => {
                self.score = self.score.saturating_add(PELLET_SCORE);
                events.push(GameEvent::Effect(EffectEvent::new(
                    pos,
                    EffectCause::PelletEaten,
                )));
            }
            Some(Tile::PowerPellet) => {
                self.score = self.score.saturating_add(POWER_PELLET_SCORE);
                self.power_mode = true;
                self.power_timer = power_duration(self.level);
                for chaser in &mut self.chasers {
                    chaser.scared = true;
                }
                trace!(timer = self.power_timer, "power mode");
                events.push(GameEvent::Effect(EffectEvent::new(
                    pos,
                    EffectCause::PowerPelletEaten,
                )));
            }
            _ => {}
        }
    }

    fn decay_power(&mut self) {
        if !self.power_mode {
            return;
        }
        self.power_timer = self.power_timer.saturating_sub(1);
        if self.power_timer == 0 {
            self.clear_power();
        }
    }

    fn move_chasers(&mut self) {
        if self.chaser_cooldown > 0 {
            self.chaser_cooldown -= 1;
            return;
        }
        let scared_rest = self.chaser_firings % 2 == 1;
        self.chaser_firings += 1;
        let seeker = self.seeker.pos;
        for chaser in &mut self.chasers {
            if chaser.scared && scared_rest {
                continue;
            }
            chaser_ai::advance(chaser, seeker, &self.grid, &mut self.rng);
        }
        self.chaser_cooldown = chaser_cadence(self.level, self.power_mode);
    }

    fn advance_scatter(&mut self) {
        self.scatter_timer += 1;
        if self.scatter_timer % SCATTER_PERIOD == 0 {
            for chaser in &mut self.chasers {
                chaser.scatter = !chaser.scatter;
            }
        }
    }

    /// Returns true when the collision ended the game.
    fn resolve_collisions(&mut self, events: &mut Vec<GameEvent>) -> bool {
        for idx in 0..self.chasers.len() {
            if !self.seeker.shares_cell(&self.chasers[idx]) {
                continue;
            }
            if self.power_mode {
                let chaser = &mut self.chasers[idx];
                self.score = self
                    .score
                    .saturating_add(CHASER_POINTS.saturating_mul(self.level));
                events.push(GameEvent::Effect(EffectEvent::new(
                    chaser.pos,
                    EffectCause::ChaserEaten,
                )));
                chaser.send_home();
                chaser.scared = false;
                continue;
            }

            self.lives = self.lives.saturating_sub(1);
            events.push(GameEvent::Effect(EffectEvent::new(
                self.seeker.pos,
                EffectCause::SeekerCaught,
            )));
            if self.lives == 0 {
                info!(score = self.score, level = self.level, "game over");
                events.push(GameEvent::GameOver { score: self.score });
                events.extend(self.set_phase(Phase::GameOver));
                return true;
            }
            info!(lives = self.lives, "seeker caught");
            events.push(GameEvent::LifeLost { lives: self.lives });
            self.reset_positions();
            break;
        }
        false
    }

    fn advance_level(&mut self, events: &mut Vec<GameEvent>) {
        self.level = self.level.saturating_add(1);
        self.grid = maze::maze_for_level(self.level, &mut self.rng);
        self.reset_positions();
        self.clear_power();
        self.seeker_cooldown = 0;
        self.chaser_cooldown = 0;
        info!(level = self.level, pellets = self.grid.remaining_collectibles(), "level up");
        events.push(GameEvent::LevelUp { level: self.level });
        events.extend(self.set_phase(Phase::Paused));
    }
}
