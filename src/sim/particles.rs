//! Particle effects: explosions, sparkles, shockwaves and collect streams.
//!
//! Every effect is a [`Burst`] request fed to [`ParticleEngine::spawn_burst`];
//! the named helpers (`explosion`, `sparkle`, `collect_stream`) only pick
//! parameters. Rates are per second so effects look the same at any refresh
//! rate.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rand_between;
use crate::from_angle;
use crate::palette::Rgb;

/// Pixels per frame at 60 fps -> pixels per second
const PER_FRAME: f32 = 60.0;

/// How a particle is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    Normal,
    /// Expanding ring, stationary
    Shockwave,
    /// Streams toward the player after a pickup
    Collect,
}

/// A single decaying particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1 at spawn, removed at 0
    pub life: f32,
    /// Life lost per second
    pub decay: f32,
    pub size: f32,
    /// Size gained per second (shockwaves)
    pub growth: f32,
    pub color: Rgb,
    pub kind: ParticleKind,
}

/// Parameters for one burst of particles
#[derive(Debug, Clone, Copy)]
pub struct Burst {
    pub count: usize,
    /// Speed range (px/s)
    pub speed: (f32, f32),
    /// Radius range (px)
    pub size: (f32, f32),
    /// Life lost per second
    pub decay: f32,
    pub kind: ParticleKind,
    /// Aim `(angle, spread)` in radians; `None` scatters in all directions
    pub aim: Option<(f32, f32)>,
}

impl Burst {
    pub fn explosion(large: bool) -> Self {
        let max_speed = if large { 8.0 } else { 5.0 };
        Self {
            count: if large { 40 } else { 20 },
            speed: (2.0 * PER_FRAME, (max_speed + 2.0) * PER_FRAME),
            size: (2.0, if large { 8.0 } else { 6.0 }),
            decay: 0.02 * PER_FRAME,
            kind: ParticleKind::Normal,
            aim: None,
        }
    }

    pub fn sparkle() -> Self {
        Self {
            count: 10,
            speed: (PER_FRAME, 4.0 * PER_FRAME),
            size: (1.0, 4.0),
            decay: 0.03 * PER_FRAME,
            kind: ParticleKind::Normal,
            aim: None,
        }
    }

    pub fn collect_stream(angle: f32) -> Self {
        Self {
            count: 15,
            speed: (3.0 * PER_FRAME, 7.0 * PER_FRAME),
            size: (2.0, 6.0),
            decay: 0.04 * PER_FRAME,
            kind: ParticleKind::Collect,
            aim: Some((angle, 0.5)),
        }
    }
}

/// Owns every live particle
#[derive(Debug, Clone)]
pub struct ParticleEngine {
    particles: Vec<Particle>,
    cap: usize,
}

impl ParticleEngine {
    pub fn new(cap: usize) -> Self {
        Self {
            particles: Vec::new(),
            cap,
        }
    }

    /// Change the particle cap, dropping the oldest if over
    pub fn set_cap(&mut self, cap: usize) {
        self.cap = cap;
        self.enforce_cap();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Spawn a burst at `pos`
    pub fn spawn_burst<R: Rng>(&mut self, rng: &mut R, pos: Vec2, color: Rgb, burst: &Burst) {
        if self.cap == 0 {
            return;
        }
        self.particles.reserve(burst.count);
        for _ in 0..burst.count {
            let angle = match burst.aim {
                Some((center, spread)) => center + (rng.random::<f32>() - 0.5) * spread,
                None => rng.random::<f32>() * std::f32::consts::TAU,
            };
            let speed = rand_between(rng, burst.speed.0, burst.speed.1);
            self.particles.push(Particle {
                pos,
                vel: from_angle(angle) * speed,
                life: 1.0,
                decay: burst.decay,
                size: rand_between(rng, burst.size.0, burst.size.1),
                growth: 0.0,
                color,
                kind: burst.kind,
            });
        }
        self.enforce_cap();
    }

    /// Expanding ring at `pos`
    pub fn spawn_shockwave(&mut self, pos: Vec2, color: Rgb) {
        if self.cap == 0 {
            return;
        }
        self.particles.push(Particle {
            pos,
            vel: Vec2::ZERO,
            life: 1.0,
            decay: 0.05 * PER_FRAME,
            size: 10.0,
            growth: 2.0 * PER_FRAME,
            color,
            kind: ParticleKind::Shockwave,
        });
        self.enforce_cap();
    }

    /// Debris burst; large explosions also get a shockwave
    pub fn explosion<R: Rng>(&mut self, rng: &mut R, pos: Vec2, color: Rgb, large: bool) {
        self.spawn_burst(rng, pos, color, &Burst::explosion(large));
        if large {
            self.spawn_shockwave(pos, color);
        }
    }

    /// Small celebratory burst
    pub fn sparkle<R: Rng>(&mut self, rng: &mut R, pos: Vec2, color: Rgb) {
        self.spawn_burst(rng, pos, color, &Burst::sparkle());
    }

    /// Stream of particles flying from `from` toward `to`
    pub fn collect_stream<R: Rng>(&mut self, rng: &mut R, from: Vec2, to: Vec2, color: Rgb) {
        let d = to - from;
        let angle = d.y.atan2(d.x);
        self.spawn_burst(rng, from, color, &Burst::collect_stream(angle));
    }

    /// Advance every particle and drop the dead
    pub fn tick(&mut self, dt: f32) {
        for p in self.particles.iter_mut() {
            p.pos += p.vel * dt;
            p.life -= p.decay * dt;
            p.size += p.growth * dt;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    fn enforce_cap(&mut self) {
        if self.particles.len() > self.cap {
            let excess = self.particles.len() - self.cap;
            self.particles.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_large_explosion_adds_shockwave() {
        let mut engine = ParticleEngine::new(1000);
        engine.explosion(&mut rng(), Vec2::ZERO, Rgb::new(255, 0, 0), true);
        assert_eq!(engine.len(), 41);
        let waves = engine
            .particles()
            .iter()
            .filter(|p| p.kind == ParticleKind::Shockwave)
            .count();
        assert_eq!(waves, 1);

        engine.explosion(&mut rng(), Vec2::ZERO, Rgb::new(255, 0, 0), false);
        assert_eq!(engine.len(), 61);
    }

    #[test]
    fn test_tick_moves_and_decays() {
        let mut engine = ParticleEngine::new(10);
        engine.spawn_burst(
            &mut rng(),
            Vec2::ZERO,
            Rgb::new(1, 2, 3),
            &Burst {
                count: 1,
                speed: (100.0, 100.0),
                size: (3.0, 3.0),
                decay: 2.0,
                kind: ParticleKind::Normal,
                aim: Some((0.0, 0.0)),
            },
        );
        engine.tick(0.25);
        let p = &engine.particles()[0];
        assert!((p.pos.x - 25.0).abs() < 1e-3);
        assert!(p.pos.y.abs() < 1e-3);
        assert!((p.life - 0.5).abs() < 1e-5);
        engine.tick(0.25);
        assert!(engine.is_empty());
    }

    #[test]
    fn test_shockwave_grows() {
        let mut engine = ParticleEngine::new(10);
        engine.spawn_shockwave(Vec2::ZERO, Rgb::new(0, 0, 0));
        engine.tick(0.1);
        assert!((engine.particles()[0].size - 22.0).abs() < 1e-4);
    }

    #[test]
    fn test_stream_heads_toward_target() {
        let mut engine = ParticleEngine::new(100);
        engine.collect_stream(&mut rng(), Vec2::ZERO, Vec2::new(0.0, 100.0), Rgb::new(0, 0, 0));
        assert_eq!(engine.len(), 15);
        assert!(engine.particles().iter().all(|p| p.vel.y > 0.0));
        assert!(engine.particles().iter().all(|p| p.kind == ParticleKind::Collect));
    }

    #[test]
    fn test_cap_drops_oldest() {
        let mut engine = ParticleEngine::new(5);
        engine.spawn_shockwave(Vec2::new(-1.0, -1.0), Rgb::new(0, 0, 0));
        engine.sparkle(&mut rng(), Vec2::ZERO, Rgb::new(0, 0, 0));
        assert_eq!(engine.len(), 5);
        assert!(engine.particles().iter().all(|p| p.kind == ParticleKind::Normal));

        let mut off = ParticleEngine::new(0);
        off.explosion(&mut rng(), Vec2::ZERO, Rgb::new(0, 0, 0), true);
        assert!(off.is_empty());
    }
}
