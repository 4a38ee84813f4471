//! Transient entities owned by the mode state machines
//!
//! Every store is a plain `Vec`; updates mutate in place and then drop the dead
//! with `retain`, so iteration order is always spawn order.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::palette::{self, Rgb, TargetColor};

/// Asteroid allegiance in asteroids mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AsteroidKind {
    /// Gray rock: must be shot before it reaches the planet
    Hostile,
    /// White rock: harmless on impact, costs a life if shot
    Friendly,
}

impl AsteroidKind {
    pub fn color(self) -> Rgb {
        match self {
            AsteroidKind::Hostile => palette::HOSTILE_GRAY,
            AsteroidKind::Friendly => palette::FRIENDLY_WHITE,
        }
    }
}

/// How an asteroid closes on the planet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trajectory {
    Straight,
    Spiral,
}

/// An incoming asteroid (asteroids mode)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    /// Straight-line velocity toward the planet at spawn
    pub vel: Vec2,
    /// Scalar speed used by both trajectories (px/s)
    pub speed: f32,
    pub size: f32,
    pub rotation: f32,
    /// Spin (rad/s)
    pub rotation_speed: f32,
    pub kind: AsteroidKind,
    pub trajectory: Trajectory,
}

impl Asteroid {
    pub fn contains(&self, point: Vec2) -> bool {
        self.pos.distance(point) < self.size
    }
}

/// What a climbing-mode object is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Asteroid,
    Star,
    Crystal,
}

impl ObstacleKind {
    pub fn is_hostile(self) -> bool {
        self == ObstacleKind::Asteroid
    }

    /// Base points for collecting (before the difficulty multiplier)
    pub fn points(self) -> u64 {
        match self {
            ObstacleKind::Asteroid => 0,
            ObstacleKind::Star => STAR_POINTS,
            ObstacleKind::Crystal => CRYSTAL_POINTS,
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            ObstacleKind::Asteroid => palette::OBSTACLE_GRAY,
            ObstacleKind::Star => palette::STAR_GOLD,
            ObstacleKind::Crystal => palette::CRYSTAL_BLUE,
        }
    }
}

/// A falling climbing-mode object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClimbingObstacle {
    pub pos: Vec2,
    pub size: f32,
    pub kind: ObstacleKind,
}

/// Power-up types (climbing mode, hard only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    Shield,
    /// Destroys every hostile obstacle on screen
    Explosion,
    Health,
    /// Halves scroll speed for a while
    SpeedBoost,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 4] = [
        PowerupKind::Shield,
        PowerupKind::Explosion,
        PowerupKind::Health,
        PowerupKind::SpeedBoost,
    ];

    pub fn color(self) -> Rgb {
        match self {
            PowerupKind::Shield => palette::SHIELD_BLUE,
            PowerupKind::Explosion => palette::POWERUP_BLAST,
            PowerupKind::Health => palette::SUCCESS_GREEN,
            PowerupKind::SpeedBoost => palette::SPEED_YELLOW,
        }
    }
}

/// A falling power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub pos: Vec2,
    pub kind: PowerupKind,
    pub size: f32,
    /// Animation phase for the icon
    pub animation_time: f32,
}

/// A planet in collect mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectPlanet {
    pub id: u32,
    pub pos: Vec2,
    pub color: TargetColor,
    pub size: f32,
    pub is_target: bool,
    pub collected: bool,
    /// Anchor for difficulty motion, captured on the first tick
    pub origin: Option<Vec2>,
    /// Oscillation (medium) or orbit (hard) phase
    pub phase: f32,
}

impl CollectPlanet {
    pub fn contains(&self, point: Vec2) -> bool {
        self.pos.distance(point) < self.size
    }
}

/// Fading laser visual
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaserBeam {
    pub start: Vec2,
    pub end: Vec2,
    pub life: f32,
    /// Life lost per second
    pub decay: f32,
}

impl LaserBeam {
    pub fn new(start: Vec2, end: Vec2, decay: f32) -> Self {
        Self {
            start,
            end,
            life: 1.0,
            decay,
        }
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// One point of the climber's afterimage
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub life: f32,
}

/// Advance laser beams and drop the faded ones
pub fn tick_lasers(beams: &mut Vec<LaserBeam>, dt: f32) {
    for beam in beams.iter_mut() {
        beam.life -= beam.decay * dt;
    }
    beams.retain(|b| b.life > 0.0);
}

/// Fade trail points and drop the dead ones
pub fn tick_trail(trail: &mut Vec<TrailPoint>, dt: f32) {
    for point in trail.iter_mut() {
        point.life -= TRAIL_DECAY * dt;
    }
    trail.retain(|p| p.life > 0.0);
}
