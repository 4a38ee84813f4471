//! Simulation module
//!
//! All gameplay logic lives here. This module has no rendering or platform
//! dependencies:
//! - Every rate is per second, scaled by a clamped frame delta
//! - Seeded RNG only, owned by the session
//! - Stable iteration order (spawn order)

pub mod asteroids;
pub mod background;
pub mod climbing;
pub mod clock;
pub mod collect;
pub mod entities;
pub mod particles;
pub mod state;
pub mod tick;

use rand::Rng;

pub use asteroids::AsteroidsState;
pub use background::Background;
pub use climbing::ClimbingState;
pub use clock::{FrameClock, clamp_dt};
pub use collect::CollectState;
pub use entities::{
    Asteroid, AsteroidKind, ClimbingObstacle, CollectPlanet, LaserBeam, ObstacleKind, Powerup,
    PowerupKind, TrailPoint, Trajectory,
};
pub use particles::{Burst, Particle, ParticleEngine, ParticleKind};
pub use state::{
    Difficulty, GameEvent, GameMode, GamePhase, GameSession, ModeState, PlayerEffects,
    SessionState, Viewport,
};
pub use tick::{HeldKeys, TickInput, tick};

/// Uniform sample in `[lo, hi)`; collapses to `lo` for an empty range
#[inline]
pub(crate) fn rand_between<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi <= lo {
        return lo;
    }
    lo + rng.random::<f32>() * (hi - lo)
}
