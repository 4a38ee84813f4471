//! Climbing mode
//!
//! An endless vertical scroller. The player steers with the movement keys
//! while obstacle clusters fall past; asteroids hurt, stars and crystals pay
//! out. Difficulty ramps through four time-based phases. Double-clicking
//! fires a laser along the click direction.

use glam::Vec2;
use rand::Rng;

use super::entities::{
    ClimbingObstacle, LaserBeam, ObstacleKind, Powerup, PowerupKind, TrailPoint, tick_trail,
};
use super::rand_between;
use super::state::{Difficulty, GameEvent, GameSession, Viewport};
use super::tick::HeldKeys;
use crate::consts::*;
use crate::{palette, point_line_distance};

/// Obstacle clusters per second
pub fn spawn_rate(elapsed: f32) -> f32 {
    if elapsed < 10.0 {
        3.0
    } else if elapsed < 20.0 {
        6.0
    } else if elapsed < 30.0 {
        8.0
    } else {
        10.0
    }
}

/// Object density multiplier; keeps growing after 30s
pub fn density(elapsed: f32) -> f32 {
    if elapsed < 10.0 {
        0.3
    } else if elapsed < 20.0 {
        0.65
    } else if elapsed < 30.0 {
        1.0
    } else {
        1.2 + (elapsed - 30.0) * 0.02
    }
}

/// Scroll speed (px/s) before any speed boost
pub fn scroll_speed(elapsed: f32) -> f32 {
    if elapsed < 10.0 {
        90.0 + elapsed * 3.0
    } else if elapsed < 20.0 {
        120.0 + (elapsed - 10.0) * 6.0
    } else if elapsed < 30.0 {
        180.0 + (elapsed - 20.0) * 9.0
    } else {
        270.0 + (elapsed - 30.0) * 12.0
    }
}

/// Horizontal gap left at the screen edges for a cluster
pub fn corridor_width(density: f32) -> f32 {
    if density < 0.5 {
        200.0
    } else if density < 0.8 {
        120.0
    } else {
        80.0
    }
}

/// Run score: whole distance units times the multiplier, plus pickup bonus
pub fn climbing_score(distance: f32, multiplier: u64, bonus: u64) -> u64 {
    (distance / DISTANCE_PER_POINT).floor().max(0.0) as u64 * multiplier + bonus
}

fn asteroid_size<R: Rng>(rng: &mut R, density: f32) -> f32 {
    if density < 0.5 {
        rand_between(rng, 15.0, 30.0)
    } else if density < 0.8 {
        rand_between(rng, 20.0, 40.0)
    } else {
        let roll = rng.random::<f32>();
        if roll < 0.3 {
            rand_between(rng, 15.0, 25.0)
        } else if roll < 0.6 {
            rand_between(rng, 30.0, 45.0)
        } else {
            rand_between(rng, 50.0, 70.0)
        }
    }
}

/// Per-run climbing state
#[derive(Debug, Clone)]
pub struct ClimbingState {
    pub player: Vec2,
    pub trail: Vec<TrailPoint>,
    pub obstacles: Vec<ClimbingObstacle>,
    pub powerups: Vec<Powerup>,
    /// Total scrolled distance (px)
    pub distance: f32,
    /// Points from pickups and kills, on top of the distance score
    pub bonus: u64,
    /// Effective scroll speed of the last frame
    pub scroll_speed: f32,
    /// Seconds until the laser can fire again
    pub laser_cooldown: f32,
    last_cluster_at: Option<f32>,
    last_powerup_at: Option<f32>,
    /// Run time and position of the previous click
    last_click: Option<(f32, Vec2)>,
}

impl ClimbingState {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            player: viewport.center(),
            trail: Vec::with_capacity(PLAYER_TRAIL_LEN),
            obstacles: Vec::new(),
            powerups: Vec::new(),
            distance: 0.0,
            bonus: 0,
            scroll_speed: scroll_speed(0.0),
            laser_cooldown: 0.0,
            last_cluster_at: None,
            last_powerup_at: None,
            last_click: None,
        }
    }

    pub fn laser_ready(&self) -> bool {
        self.laser_cooldown <= 0.0
    }

    pub fn update(&mut self, gs: &mut GameSession, keys: &HeldKeys, dt: f32) {
        let elapsed = gs.run.elapsed;
        let viewport = gs.viewport;

        self.move_player(keys, viewport, dt);
        self.laser_cooldown = (self.laser_cooldown - dt).max(0.0);

        self.trail.push(TrailPoint {
            pos: self.player,
            life: 1.0,
        });
        if self.trail.len() > PLAYER_TRAIL_LEN {
            self.trail.remove(0);
        }
        tick_trail(&mut self.trail, dt);

        let mut speed = scroll_speed(elapsed);
        if gs.player.speed_boost > 0.0 {
            speed *= SPEED_BOOST_FACTOR;
            gs.player.speed_boost = (gs.player.speed_boost - dt).max(0.0);
        }
        self.scroll_speed = speed;
        self.distance += speed * dt;
        self.sync_score(gs);

        if gs.run.difficulty == Difficulty::Hard
            && self
                .last_powerup_at
                .is_none_or(|t| elapsed - t > POWERUP_INTERVAL)
        {
            self.spawn_powerup(gs);
            self.last_powerup_at = Some(elapsed);
        }

        let d = density(elapsed);
        if self
            .last_cluster_at
            .is_none_or(|t| elapsed - t > 1.0 / spawn_rate(elapsed))
        {
            self.spawn_cluster(gs, d);
            self.last_cluster_at = Some(elapsed);
        }

        let player = self.player;
        let floor = viewport.height + CULL_MARGIN;
        let mut picked = Vec::new();
        for powerup in &mut self.powerups {
            powerup.pos.y += speed * dt;
            powerup.animation_time += POWERUP_ANIM_RATE * dt;
        }
        self.powerups.retain(|p| {
            if player.distance(p.pos) < PLAYER_RADIUS + p.size {
                picked.push((p.kind, p.pos));
                return false;
            }
            p.pos.y < floor
        });
        for (kind, at) in picked {
            self.collect_powerup(gs, kind, at);
        }

        let multiplier = gs.run.multiplier();
        let bonus = &mut self.bonus;
        self.obstacles.retain_mut(|o| {
            o.pos.y += speed * dt;
            if player.distance(o.pos) >= PLAYER_RADIUS + o.size {
                return o.pos.y < floor;
            }
            if o.kind.is_hostile() {
                let shielded = gs.player.shield_active;
                gs.hostile_hit(o.pos);
                if !shielded && gs.settings.effective_screen_shake() {
                    gs.screen_shake = SCREEN_SHAKE_ON_HIT;
                }
            } else {
                *bonus += o.kind.points() * multiplier;
                gs.particles
                    .collect_stream(&mut gs.rng, o.pos, player, o.kind.color());
            }
            false
        });
        self.sync_score(gs);
    }

    fn move_player(&mut self, keys: &HeldKeys, viewport: Viewport, dt: f32) {
        let step = PLAYER_SPEED * dt;
        let p = &mut self.player;
        if keys.left {
            p.x = (p.x - step).max(PLAYER_EDGE_MARGIN);
        }
        if keys.right {
            p.x = (p.x + step).min(viewport.width - PLAYER_EDGE_MARGIN);
        }
        if keys.up {
            p.y = (p.y - step).max(PLAYER_EDGE_MARGIN);
        }
        if keys.down {
            p.y = (p.y + step).min(viewport.height - PLAYER_EDGE_MARGIN);
        }
    }

    /// Recompute the score; never lowers it and never touches a finished run
    fn sync_score(&self, gs: &mut GameSession) {
        if !gs.is_playing() {
            return;
        }
        let total = climbing_score(self.distance, gs.run.multiplier(), self.bonus);
        gs.run.score = gs.run.score.max(total);
    }

    fn spawn_cluster(&mut self, gs: &mut GameSession, density: f32) {
        let rng = &mut gs.rng;
        let width = gs.viewport.width;
        let count = ((2.0 + rng.random::<f32>() * 2.0) * density).floor() as usize;
        let corridor = corridor_width(density);
        let asteroid_chance = 0.5 + density * 0.25;

        for _ in 0..count {
            let pos = Vec2::new(
                rand_between(rng, corridor / 2.0, width - corridor / 2.0),
                -CULL_MARGIN - rng.random::<f32>() * 100.0,
            );
            let roll = rng.random::<f32>();
            let (kind, size) = if roll < asteroid_chance {
                (ObstacleKind::Asteroid, asteroid_size(rng, density))
            } else if roll < asteroid_chance + 0.15 {
                (ObstacleKind::Star, STAR_SIZE)
            } else {
                (ObstacleKind::Crystal, CRYSTAL_SIZE)
            };
            self.obstacles.push(ClimbingObstacle { pos, size, kind });
        }
    }

    fn spawn_powerup(&mut self, gs: &mut GameSession) {
        let rng = &mut gs.rng;
        let kind = PowerupKind::ALL[rng.random_range(0..PowerupKind::ALL.len())];
        let x = rand_between(rng, 100.0, gs.viewport.width - 100.0);
        log::debug!("Power-up {:?} incoming", kind);
        self.powerups.push(Powerup {
            pos: Vec2::new(x, -CULL_MARGIN),
            kind,
            size: POWERUP_SIZE,
            animation_time: 0.0,
        });
    }

    fn collect_powerup(&mut self, gs: &mut GameSession, kind: PowerupKind, at: Vec2) {
        gs.particles.sparkle(&mut gs.rng, at, kind.color());
        match kind {
            PowerupKind::Shield => gs.player.shield_active = true,
            PowerupKind::Explosion => {
                let mut destroyed = 0;
                self.obstacles.retain(|o| {
                    if o.kind.is_hostile() {
                        gs.particles
                            .explosion(&mut gs.rng, o.pos, palette::POWERUP_BLAST, true);
                        destroyed += 1;
                        false
                    } else {
                        true
                    }
                });
                self.bonus += destroyed * EXPLOSION_POWERUP_POINTS;
            }
            PowerupKind::Health => {
                if gs.is_playing() {
                    gs.run.lives = (gs.run.lives + 1).min(START_LIVES);
                }
            }
            PowerupKind::SpeedBoost => gs.player.speed_boost = SPEED_BOOST_DURATION,
        }
        gs.push_event(GameEvent::PowerupCollected { kind });
    }

    /// Register a click; a second click close in time and space fires the laser
    pub fn click(&mut self, gs: &mut GameSession, pos: Vec2) {
        let now = gs.run.elapsed;
        if let Some((then, prev)) = self.last_click
            && now - then < DOUBLE_CLICK_WINDOW
            && prev.distance(pos) < DOUBLE_CLICK_RADIUS
        {
            self.fire_laser(gs, pos);
        }
        self.last_click = Some((now, pos));
    }

    /// Fire from the player toward `target`. Returns false while recharging.
    pub fn fire_laser(&mut self, gs: &mut GameSession, target: Vec2) -> bool {
        if !self.laser_ready() {
            return false;
        }
        let start = self.player;
        let beam = LaserBeam::new(start, target, PLAYER_LASER_DECAY);
        let length = beam.length();
        gs.laser_beams.push(beam);

        let mut kills = 0;
        self.obstacles.retain(|o| {
            if !o.kind.is_hostile() {
                return true;
            }
            let on_line = point_line_distance(o.pos, start, target)
                .is_some_and(|d| d < LASER_HIT_WIDTH);
            if on_line && o.pos.distance(start) < length {
                gs.particles
                    .explosion(&mut gs.rng, o.pos, palette::LASER_CYAN, true);
                kills += 1;
                return false;
            }
            true
        });

        self.bonus += kills * LASER_KILL_POINTS;
        self.laser_cooldown = LASER_COOLDOWN;
        gs.push_event(GameEvent::LaserFired);
        log::debug!("Laser fired, {} asteroids destroyed", kills);
        self.sync_score(gs);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::{GameMode, GamePhase, ModeState};
    use proptest::prelude::*;

    fn run(difficulty: Difficulty) -> (GameSession, ClimbingState) {
        let mut gs = GameSession::new(11, Viewport::new(800.0, 600.0), Settings::default());
        gs.start_run(GameMode::Climbing, difficulty, 0.0);
        let ModeState::Climbing(state) = std::mem::take(&mut gs.mode) else {
            panic!("climbing run without climbing state");
        };
        (gs, state)
    }

    fn rock(pos: Vec2) -> ClimbingObstacle {
        ClimbingObstacle {
            pos,
            size: 20.0,
            kind: ObstacleKind::Asteroid,
        }
    }

    #[test]
    fn test_cluster_spawn_bounds() {
        let (mut gs, mut state) = run(Difficulty::Hard);
        let width = gs.viewport.width;
        for density in [0.3, 0.65, 1.0, 2.0] {
            let half = corridor_width(density) / 2.0;
            let mut kinds = [0usize; 3];
            for _ in 0..3000 {
                state.obstacles.clear();
                state.spawn_cluster(&mut gs, density);
                let n = state.obstacles.len() as f32;
                assert!(n >= (2.0 * density).floor() && n < 4.0 * density);

                for o in &state.obstacles {
                    assert!(o.pos.x >= half && o.pos.x <= width - half);
                    assert!(o.pos.y >= -150.0 && o.pos.y <= -50.0);
                    match o.kind {
                        ObstacleKind::Asteroid => {
                            kinds[0] += 1;
                            let ok = if density < 0.5 {
                                (15.0..=30.0).contains(&o.size)
                            } else if density < 0.8 {
                                (20.0..=40.0).contains(&o.size)
                            } else {
                                (15.0..=25.0).contains(&o.size)
                                    || (30.0..=45.0).contains(&o.size)
                                    || (50.0..=70.0).contains(&o.size)
                            };
                            assert!(ok, "size {} at density {}", o.size, density);
                        }
                        ObstacleKind::Star => {
                            kinds[1] += 1;
                            assert_eq!(o.size, STAR_SIZE);
                        }
                        ObstacleKind::Crystal => {
                            kinds[2] += 1;
                            assert_eq!(o.size, CRYSTAL_SIZE);
                        }
                    }
                }
            }

            let total = kinds.iter().sum::<usize>() as f32;
            let asteroid_share = kinds[0] as f32 / total;
            let expected = (0.5 + density * 0.25).min(1.0);
            assert!(
                (asteroid_share - expected).abs() < 0.06,
                "asteroid share {} at density {}",
                asteroid_share,
                density
            );
            if density >= 2.0 {
                assert_eq!(kinds[1] + kinds[2], 0);
            } else if density < 0.5 {
                let star_share = kinds[1] as f32 / total;
                assert!((star_share - 0.15).abs() < 0.05, "star share {}", star_share);
            }
        }
    }

    #[test]
    fn test_score_formula() {
        assert_eq!(climbing_score(250.0, 2, 0), 4);
        assert_eq!(climbing_score(99.9, 3, 0), 0);
        assert_eq!(climbing_score(1000.0, 1, 15), 25);
    }

    #[test]
    fn test_phase_tables() {
        assert_eq!(spawn_rate(5.0), 3.0);
        assert_eq!(spawn_rate(45.0), 10.0);
        assert_eq!(density(15.0), 0.65);
        assert!((density(40.0) - 1.4).abs() < 1e-5);
        assert_eq!(scroll_speed(0.0), 90.0);
        assert_eq!(scroll_speed(10.0), 120.0);
        assert_eq!(scroll_speed(20.0), 180.0);
        assert_eq!(scroll_speed(30.0), 270.0);
        assert_eq!(corridor_width(0.3), 200.0);
        assert_eq!(corridor_width(0.65), 120.0);
        assert_eq!(corridor_width(1.2), 80.0);
    }

    #[test]
    fn test_distance_drives_score() {
        let (mut gs, mut state) = run(Difficulty::Medium);
        state.distance = 250.0;
        state.update(&mut gs, &HeldKeys::default(), 0.0);
        assert_eq!(gs.run.score, 4);
    }

    #[test]
    fn test_player_clamped_to_margin() {
        let (mut gs, mut state) = run(Difficulty::Easy);
        let keys = HeldKeys {
            right: true,
            up: true,
            ..Default::default()
        };
        for _ in 0..500 {
            state.update(&mut gs, &keys, 0.016);
            state.obstacles.clear();
        }
        assert_eq!(state.player, Vec2::new(800.0 - 50.0, 50.0));
        assert_eq!(state.trail.len(), PLAYER_TRAIL_LEN);
    }

    #[test]
    fn test_hostile_contact() {
        let (mut gs, mut state) = run(Difficulty::Easy);
        gs.player.shield_active = true;
        state.obstacles.push(rock(state.player));
        state.update(&mut gs, &HeldKeys::default(), 0.0);
        assert_eq!(gs.run.lives, 3);
        assert!(!gs.player.shield_active);
        assert_eq!(gs.screen_shake, 0.0);

        state.obstacles.push(rock(state.player));
        state.update(&mut gs, &HeldKeys::default(), 0.0);
        assert_eq!(gs.run.lives, 2);
        assert_eq!(gs.screen_shake, SCREEN_SHAKE_ON_HIT);
    }

    #[test]
    fn test_collectibles_pay_multiplied() {
        let (mut gs, mut state) = run(Difficulty::Hard);
        state.obstacles.push(ClimbingObstacle {
            pos: state.player,
            size: STAR_SIZE,
            kind: ObstacleKind::Star,
        });
        state.obstacles.push(ClimbingObstacle {
            pos: state.player + Vec2::new(5.0, 0.0),
            size: CRYSTAL_SIZE,
            kind: ObstacleKind::Crystal,
        });
        state.update(&mut gs, &HeldKeys::default(), 0.0);
        assert_eq!(state.bonus, 45);
        assert_eq!(gs.run.score, 45);
        assert_eq!(gs.run.lives, 3);
    }

    #[test]
    fn test_powerup_effects() {
        let (mut gs, mut state) = run(Difficulty::Hard);
        let at = state.player;

        gs.run.lives = 3;
        state.collect_powerup(&mut gs, PowerupKind::Health, at);
        assert_eq!(gs.run.lives, 3);
        gs.run.lives = 1;
        state.collect_powerup(&mut gs, PowerupKind::Health, at);
        assert_eq!(gs.run.lives, 2);

        state.obstacles = vec![
            rock(Vec2::new(100.0, 100.0)),
            rock(Vec2::new(300.0, 100.0)),
            ClimbingObstacle {
                pos: Vec2::new(200.0, 100.0),
                size: STAR_SIZE,
                kind: ObstacleKind::Star,
            },
        ];
        state.collect_powerup(&mut gs, PowerupKind::Explosion, at);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.bonus, 100);

        state.collect_powerup(&mut gs, PowerupKind::Shield, at);
        assert!(gs.player.shield_active);

        state.collect_powerup(&mut gs, PowerupKind::SpeedBoost, at);
        state.obstacles.clear();
        state.update(&mut gs, &HeldKeys::default(), 0.05);
        assert_eq!(state.scroll_speed, scroll_speed(0.0) * SPEED_BOOST_FACTOR);
        assert!((gs.player.speed_boost - (SPEED_BOOST_DURATION - 0.05)).abs() < 1e-5);

        let collected = gs
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::PowerupCollected { .. }))
            .count();
        assert_eq!(collected, 5);
    }

    #[test]
    fn test_powerups_only_on_hard() {
        let (mut gs, mut state) = run(Difficulty::Medium);
        state.update(&mut gs, &HeldKeys::default(), 0.016);
        assert!(state.powerups.is_empty());

        let (mut gs, mut state) = run(Difficulty::Hard);
        state.update(&mut gs, &HeldKeys::default(), 0.016);
        assert_eq!(state.powerups.len(), 1);
        assert_eq!(state.powerups[0].pos.y, -CULL_MARGIN + scroll_speed(0.0) * 0.016);
    }

    #[test]
    fn test_double_click_fires_laser() {
        let (mut gs, mut state) = run(Difficulty::Hard);
        let player = state.player;
        let target = player + Vec2::new(0.0, -200.0);
        state.obstacles = vec![
            rock(player + Vec2::new(5.0, -100.0)),
            rock(player + Vec2::new(100.0, -100.0)),
            rock(player + Vec2::new(0.0, -300.0)),
        ];

        state.click(&mut gs, target);
        assert!(gs.laser_beams.is_empty());
        state.click(&mut gs, target + Vec2::new(10.0, 0.0));
        assert_eq!(gs.laser_beams.len(), 1);
        assert_eq!(state.obstacles.len(), 2);
        assert_eq!(state.bonus, LASER_KILL_POINTS);
        assert!(!state.laser_ready());

        // Recharging
        assert!(!state.fire_laser(&mut gs, target));
        assert_eq!(gs.laser_beams.len(), 1);
    }

    #[test]
    fn test_slow_clicks_do_not_fire() {
        let (mut gs, mut state) = run(Difficulty::Hard);
        let target = Vec2::new(400.0, 100.0);
        state.click(&mut gs, target);
        gs.run.elapsed += 0.5;
        state.click(&mut gs, target);
        assert!(gs.laser_beams.is_empty());

        // Far apart in space
        state.click(&mut gs, Vec2::new(100.0, 100.0));
        assert!(gs.laser_beams.is_empty());
    }

    #[test]
    fn test_lethal_hit_freezes_score() {
        let (mut gs, mut state) = run(Difficulty::Hard);
        gs.run.lives = 1;
        state.distance = 1000.0;
        state.obstacles.push(rock(state.player));
        state.update(&mut gs, &HeldKeys::default(), 0.0);
        assert_eq!(gs.phase, GamePhase::GameOver);
        let final_score = gs.run.score;
        state.bonus += 500;
        state.update(&mut gs, &HeldKeys::default(), 0.05);
        assert_eq!(gs.run.score, final_score);
        assert_eq!(gs.leaderboard.entries()[0].score, final_score);
    }

    proptest! {
        #[test]
        fn prop_score_never_decreases(
            steps in proptest::collection::vec((0u8..16, 0.0f32..0.05), 1..200)
        ) {
            let (mut gs, mut state) = run(Difficulty::Hard);
            let mut last = 0;
            for (mask, dt) in steps {
                let keys = HeldKeys {
                    left: mask & 1 != 0,
                    right: mask & 2 != 0,
                    up: mask & 4 != 0,
                    down: mask & 8 != 0,
                };
                gs.run.elapsed += dt;
                state.update(&mut gs, &keys, dt);
                prop_assert!(gs.run.score >= last);
                prop_assert!(gs.run.lives <= START_LIVES);
                prop_assert!(state.player.x >= PLAYER_EDGE_MARGIN && state.player.x <= 750.0);
                last = gs.run.score;
            }
        }
    }
}
