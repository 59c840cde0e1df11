use rand::Rng;

use crate::agent::Rgb;
use crate::events::EffectEvent;

const BURST: usize = 8;
const MAX_SPEED: f32 = 0.125;
const DECAY: f32 = 0.05;
const SHRINK: f32 = 0.95;

/// Cosmetic particle, in cell units. Centre of cell `(x, y)` is `(x + 0.5, y + 0.5)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub life: f32,
    pub size: f32,
    pub color: Rgb,
}

#[derive(Debug, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn burst(&mut self, event: &EffectEvent, rng: &mut impl Rng) {
        let cx = event.pos.x as f32 + 0.5;
        let cy = event.pos.y as f32 + 0.5;
        for _ in 0..BURST {
            self.particles.push(Particle {
                x: cx,
                y: cy,
                vx: rng.gen_range(-MAX_SPEED..=MAX_SPEED),
                vy: rng.gen_range(-MAX_SPEED..=MAX_SPEED),
                life: 1.0,
                size: rng.gen_range(3..=6) as f32,
                color: event.color,
            });
        }
    }

    /// One animation step; dead particles are dropped in place.
    pub fn step(&mut self) {
        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            p.life -= DECAY;
            p.size *= SHRINK;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EffectCause;
    use crate::grid::Pos;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn burst_spawns_at_cell_centre() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut field = ParticleField::new();
        field.burst(&EffectEvent::new(Pos::new(4, 7), EffectCause::PelletEaten), &mut rng);
        assert_eq!(field.particles().len(), BURST);
        for p in field.particles() {
            assert_eq!((p.x, p.y), (4.5, 7.5));
            assert!(p.vx.abs() <= MAX_SPEED && p.vy.abs() <= MAX_SPEED);
            assert!((3.0..=6.0).contains(&p.size));
            assert_eq!(p.color, EffectCause::PelletEaten.color());
        }
    }

    #[test]
    fn particles_expire_after_twenty_steps() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut field = ParticleField::new();
        field.burst(&EffectEvent::new(Pos::new(1, 1), EffectCause::SeekerCaught), &mut rng);
        for _ in 0..19 {
            field.step();
        }
        assert!(!field.is_empty());
        // Float decay lands a hair above or below zero on step 20; 21 is always past it.
        field.step();
        field.step();
        assert!(field.is_empty());
    }
}
