//! Space Arcade - three space minigames driven by one animation loop
//!
//! Core modules:
//! - `sim`: Frame-rate independent simulation (modes, particles, background)
//! - `renderer`: Draw-list contract consumed by the host canvas
//! - `leaderboard`: In-memory top-10 table
//! - `settings`: Player preferences and effect toggles
//! - `palette`: Typed color tables

pub mod leaderboard;
pub mod palette;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Largest delta a single frame may advance (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Lives at the start of every run, also the cap for health pickups
    pub const START_LIVES: u8 = 3;
    /// Leaderboard size
    pub const LEADERBOARD_SIZE: usize = 10;

    // --- Collect mode ---
    pub const COLLECT_PLANET_RADIUS: f32 = 25.0;
    pub const COLLECT_BASE_PLANETS: u32 = 12;
    pub const COLLECT_BASE_TARGETS: u32 = 3;
    pub const COLLECT_BASE_TIMER: f32 = 20.0;
    pub const COLLECT_MIN_TIMER: f32 = 5.0;
    /// Horizontal spawn margin from the viewport edges
    pub const COLLECT_MARGIN_X: f32 = 100.0;
    /// Vertical spawn margin (keeps planets clear of the HUD and drop zone)
    pub const COLLECT_MARGIN_Y: f32 = 200.0;
    pub const DROP_ZONE_WIDTH: f32 = 200.0;
    pub const DROP_ZONE_HEIGHT: f32 = 100.0;
    /// Drop zone center sits this far above the bottom edge
    pub const DROP_ZONE_BOTTOM_OFFSET: f32 = 130.0;
    /// Medium difficulty wobble (rad/s, px)
    pub const OSCILLATION_SPEED: f32 = 3.0;
    pub const OSCILLATION_AMPLITUDE: f32 = 15.0;
    /// Hard difficulty orbit (rad/s, px)
    pub const ORBIT_SPEED: f32 = 0.6;
    pub const ORBIT_RADIUS: f32 = 60.0;

    // --- Asteroids mode ---
    pub const ASTEROID_BASE_SPEED: f32 = 50.0;
    /// Speed gained per second of play
    pub const ASTEROID_SPEED_RAMP: f32 = 5.0;
    /// Spawn ring sits this far beyond half the larger viewport side
    pub const ASTEROID_SPAWN_OFFSET: f32 = 150.0;
    pub const ASTEROID_HOSTILE_CHANCE: f32 = 0.6;
    pub const ASTEROID_MIN_SIZE: f32 = 30.0;
    pub const ASTEROID_SIZE_RANGE: f32 = 20.0;
    /// Max spin either way (rad/s)
    pub const ASTEROID_MAX_SPIN: f32 = 3.0;
    /// Radius of the defended planet; the hit disk is asteroid size plus this
    pub const CENTER_PLANET_RADIUS: f32 = 40.0;
    /// Asteroids this close to center are dropped whatever their type
    pub const ASTEROID_REMOVE_RADIUS: f32 = 50.0;
    pub const SPIRAL_ANGULAR_SPEED: f32 = 3.0;
    pub const SPIRAL_FLOOR_MEDIUM: f32 = 100.0;
    pub const SPIRAL_FLOOR_HARD: f32 = 120.0;
    /// Forced end of an asteroids run (seconds)
    pub const ASTEROIDS_DURATION: f32 = 60.0;
    pub const ASTEROID_HOSTILE_POINTS: u64 = 5;

    // --- Climbing mode ---
    pub const PLAYER_SPEED: f32 = 300.0;
    pub const PLAYER_RADIUS: f32 = 30.0;
    pub const PLAYER_EDGE_MARGIN: f32 = 50.0;
    pub const PLAYER_TRAIL_LEN: usize = 30;
    pub const TRAIL_DECAY: f32 = 1.2;
    pub const DISTANCE_PER_POINT: f32 = 100.0;
    /// Objects and powerups are culled this far below the viewport
    pub const CULL_MARGIN: f32 = 50.0;
    pub const POWERUP_INTERVAL: f32 = 3.0;
    pub const POWERUP_SIZE: f32 = 16.0;
    pub const POWERUP_ANIM_RATE: f32 = 6.0;
    pub const EXPLOSION_POWERUP_POINTS: u64 = 50;
    pub const SPEED_BOOST_DURATION: f32 = 5.0;
    pub const SPEED_BOOST_FACTOR: f32 = 0.5;
    pub const STAR_POINTS: u64 = 10;
    pub const CRYSTAL_POINTS: u64 = 5;
    pub const STAR_SIZE: f32 = 10.0;
    pub const CRYSTAL_SIZE: f32 = 12.0;
    pub const LASER_COOLDOWN: f32 = 3.0;
    pub const LASER_HIT_WIDTH: f32 = 20.0;
    pub const LASER_KILL_POINTS: u64 = 10;
    pub const DOUBLE_CLICK_WINDOW: f32 = 0.3;
    pub const DOUBLE_CLICK_RADIUS: f32 = 50.0;
    pub const SCREEN_SHAKE_ON_HIT: f32 = 10.0;
    pub const SCREEN_SHAKE_DECAY: f32 = 40.0;

    // --- Laser beam visuals (life per second) ---
    pub const CENTER_LASER_DECAY: f32 = 6.0;
    pub const PLAYER_LASER_DECAY: f32 = 3.0;
}

/// Distance from `p` to the infinite line through `a` and `b`.
///
/// Returns `None` for a degenerate line (`a == b`).
#[inline]
pub fn point_line_distance(p: Vec2, a: Vec2, b: Vec2) -> Option<f32> {
    let dir = b - a;
    let len = dir.length();
    if len <= f32::EPSILON {
        return None;
    }
    Some(dir.perp_dot(p - a).abs() / len)
}

/// Unit vector for an angle in radians
#[inline]
pub fn from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_line_distance() {
        let d = point_line_distance(Vec2::new(5.0, 3.0), Vec2::ZERO, Vec2::new(10.0, 0.0));
        assert!((d.unwrap() - 3.0).abs() < 1e-5);
        // Beyond the end of the segment still measures perpendicular distance
        let d = point_line_distance(Vec2::new(50.0, -4.0), Vec2::ZERO, Vec2::new(10.0, 0.0));
        assert!((d.unwrap() - 4.0).abs() < 1e-5);
        assert!(point_line_distance(Vec2::ONE, Vec2::ZERO, Vec2::ZERO).is_none());
    }
}
