//! Asteroids mode
//!
//! Asteroids close in on the home planet from a ring outside the screen.
//! Clicking a hostile (gray) one shoots it down; letting it through costs a
//! life. Friendly (white) asteroids must be left alone. The run ends after a
//! fixed duration or when the lives run out.

use glam::Vec2;
use rand::Rng;

use super::entities::{Asteroid, AsteroidKind, LaserBeam, Trajectory};
use super::state::{Difficulty, GameSession};
use crate::consts::*;
use crate::{from_angle, palette};

/// Seconds between spawns at `elapsed`; `None` once the run is over
pub fn spawn_interval(elapsed: f32) -> Option<f32> {
    if elapsed < 30.0 {
        Some(1.5)
    } else if elapsed < 40.0 {
        Some(1.0)
    } else if elapsed < ASTEROIDS_DURATION {
        Some(0.7)
    } else {
        None
    }
}

/// Approach speed (px/s) of an asteroid spawned at `elapsed`
pub fn asteroid_speed(elapsed: f32, difficulty: Difficulty) -> f32 {
    (ASTEROID_BASE_SPEED + elapsed * ASTEROID_SPEED_RAMP) * difficulty.speed_scale()
}

/// Radius spirals stop shrinking at
fn spiral_floor(difficulty: Difficulty) -> f32 {
    match difficulty {
        Difficulty::Hard => SPIRAL_FLOOR_HARD,
        _ => SPIRAL_FLOOR_MEDIUM,
    }
}

/// One spiral step: swing the asteroid around `center` while pulling it in,
/// but never aim inside `floor`. Asteroids that reach the floor keep circling
/// near it.
pub fn spiral_step(asteroid: &mut Asteroid, center: Vec2, floor: f32, dt: f32) {
    let offset = asteroid.pos - center;
    let dist = offset.length();
    let angle = offset.y.atan2(offset.x) + SPIRAL_ANGULAR_SPEED * dt;
    let step = asteroid.speed * dt;
    let target = center + from_angle(angle) * floor.max(dist - step);

    let to_target = target - asteroid.pos;
    let move_dist = to_target.length();
    if move_dist > 1.0 {
        asteroid.pos += to_target / move_dist * step;
    }
}

/// Per-run asteroids state
#[derive(Debug, Clone, Default)]
pub struct AsteroidsState {
    pub asteroids: Vec<Asteroid>,
    /// Run time of the last spawn
    pub last_spawn_at: Option<f32>,
}

impl AsteroidsState {
    pub fn update(&mut self, gs: &mut GameSession, dt: f32) {
        let elapsed = gs.run.elapsed;
        let Some(interval) = spawn_interval(elapsed) else {
            log::info!("Asteroid field cleared after {:.0}s", elapsed);
            gs.game_over();
            return;
        };
        if self.last_spawn_at.is_none_or(|t| elapsed - t > interval) {
            self.spawn(gs);
            self.last_spawn_at = Some(elapsed);
        }

        let center = gs.viewport.center();
        let floor = spiral_floor(gs.run.difficulty);
        for asteroid in &mut self.asteroids {
            asteroid.rotation += asteroid.rotation_speed * dt;
            match asteroid.trajectory {
                Trajectory::Straight => asteroid.pos += asteroid.vel * dt,
                Trajectory::Spiral => spiral_step(asteroid, center, floor, dt),
            }
        }

        let mut impacts = Vec::new();
        self.asteroids.retain(|a| {
            let dist = a.pos.distance(center);
            if dist < a.size + CENTER_PLANET_RADIUS {
                if a.kind == AsteroidKind::Hostile {
                    impacts.push(a.pos);
                }
                return false;
            }
            dist > ASTEROID_REMOVE_RADIUS
        });
        for at in impacts {
            gs.hostile_hit(at);
        }
    }

    fn spawn(&mut self, gs: &mut GameSession) {
        let difficulty = gs.run.difficulty;
        let center = gs.viewport.center();
        let rng = &mut gs.rng;

        let angle = rng.random::<f32>() * std::f32::consts::TAU;
        let distance = gs.viewport.width.max(gs.viewport.height) / 2.0 + ASTEROID_SPAWN_OFFSET;
        let pos = center + from_angle(angle) * distance;
        let speed = asteroid_speed(gs.run.elapsed, difficulty);
        let kind = if rng.random::<f32>() < ASTEROID_HOSTILE_CHANCE {
            AsteroidKind::Hostile
        } else {
            AsteroidKind::Friendly
        };
        let trajectory = match difficulty {
            Difficulty::Easy => Trajectory::Straight,
            Difficulty::Medium => Trajectory::Spiral,
            Difficulty::Hard => {
                if rng.random::<bool>() {
                    Trajectory::Spiral
                } else {
                    Trajectory::Straight
                }
            }
        };
        let size = ASTEROID_MIN_SIZE + rng.random::<f32>() * ASTEROID_SIZE_RANGE;
        let rotation = rng.random::<f32>() * std::f32::consts::TAU;
        let rotation_speed = (rng.random::<f32>() - 0.5) * 2.0 * ASTEROID_MAX_SPIN;

        let id = gs.next_entity_id();
        log::debug!("Spawned {:?} asteroid {} ({:?}, {:.0} px/s)", kind, id, trajectory, speed);
        self.asteroids.push(Asteroid {
            id,
            pos,
            vel: (center - pos).normalize_or_zero() * speed,
            speed,
            size,
            rotation,
            rotation_speed,
            kind,
            trajectory,
        });
    }

    /// Shoot at `pos`; every asteroid under the pointer is resolved
    pub fn click(&mut self, gs: &mut GameSession, pos: Vec2) {
        let mut struck = Vec::new();
        self.asteroids.retain(|a| {
            if a.contains(pos) {
                struck.push((a.pos, a.kind));
                false
            } else {
                true
            }
        });

        let center = gs.viewport.center();
        for (at, kind) in struck {
            match kind {
                AsteroidKind::Hostile => {
                    gs.add_score(ASTEROID_HOSTILE_POINTS * gs.run.multiplier());
                    gs.laser_beams
                        .push(LaserBeam::new(center, at, CENTER_LASER_DECAY));
                    gs.particles
                        .explosion(&mut gs.rng, at, palette::KILL_ORANGE, true);
                }
                AsteroidKind::Friendly => {
                    gs.particles
                        .explosion(&mut gs.rng, at, palette::DAMAGE_RED, true);
                    gs.lose_life();
                }
            }
        }
    }
}
