//! Collect mode
//!
//! Each round picks a target color and scatters planets; the player drags
//! every target-colored planet into the drop zone before the round timer
//! expires. Dropping a wrong planet costs a life.

use glam::Vec2;
use rand::Rng;

use super::entities::CollectPlanet;
use super::rand_between;
use super::state::{Difficulty, GameEvent, GameSession, Viewport};
use crate::consts::*;
use crate::palette::{self, TargetColor};

/// Target planets in a round
pub fn round_targets(round: u32) -> u32 {
    COLLECT_BASE_TARGETS + round / 2
}

/// All planets in a round, targets included
pub fn round_planets(round: u32) -> u32 {
    COLLECT_BASE_PLANETS + round.saturating_sub(1) * 2
}

/// Round timer in seconds
pub fn round_timer(round: u32, difficulty: Difficulty) -> f32 {
    let base = (COLLECT_BASE_TIMER - round.saturating_sub(1) as f32 * 2.0).max(COLLECT_MIN_TIMER);
    base * difficulty.timer_scale()
}

/// The rectangle planets are dropped into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropZone {
    pub center: Vec2,
    pub size: Vec2,
}

impl DropZone {
    pub fn for_viewport(viewport: Viewport) -> Self {
        Self {
            center: Vec2::new(viewport.width / 2.0, viewport.height - DROP_ZONE_BOTTOM_OFFSET),
            size: Vec2::new(DROP_ZONE_WIDTH, DROP_ZONE_HEIGHT),
        }
    }

    /// Strictly inside (edges excluded)
    pub fn contains(&self, point: Vec2) -> bool {
        let d = (point - self.center).abs();
        d.x < self.size.x / 2.0 && d.y < self.size.y / 2.0
    }
}

/// Per-run collect state
#[derive(Debug, Clone)]
pub struct CollectState {
    pub round: u32,
    pub target_color: TargetColor,
    pub planets: Vec<CollectPlanet>,
    /// Seconds the round was given
    pub round_time: f32,
    /// Seconds remaining
    pub time_left: f32,
    pub collected: u32,
    /// ID of the planet under the pointer, if any
    dragging: Option<u32>,
}

impl CollectState {
    /// Set up round 1
    pub fn start(gs: &mut GameSession) -> Self {
        let mut state = Self {
            round: 0,
            target_color: TargetColor::Blue,
            planets: Vec::new(),
            round_time: 0.0,
            time_left: 0.0,
            collected: 0,
            dragging: None,
        };
        state.next_round(gs);
        state
    }

    pub fn dragging(&self) -> Option<u32> {
        self.dragging
    }

    /// Remaining time as a fraction of the round, for the timer bar
    pub fn timer_fraction(&self) -> f32 {
        if self.round_time <= 0.0 {
            return 0.0;
        }
        (self.time_left / self.round_time).clamp(0.0, 1.0)
    }

    pub fn targets_remaining(&self) -> usize {
        self.planets
            .iter()
            .filter(|p| p.is_target && !p.collected)
            .count()
    }

    /// Advance to the next round, regenerating the whole planet set
    fn next_round(&mut self, gs: &mut GameSession) {
        self.round += 1;
        self.collected = 0;
        self.dragging = None;
        self.planets.clear();

        let rng = &mut gs.rng;
        self.target_color = TargetColor::ALL[rng.random_range(0..TargetColor::ALL.len())];
        let others: Vec<TargetColor> = TargetColor::ALL
            .into_iter()
            .filter(|&c| c != self.target_color)
            .collect();

        let targets = round_targets(self.round);
        let total = round_planets(self.round).max(targets);
        let (w, h) = (gs.viewport.width, gs.viewport.height);

        for i in 0..total {
            let is_target = i < targets;
            let color = if is_target {
                self.target_color
            } else {
                others[gs.rng.random_range(0..others.len())]
            };
            let pos = Vec2::new(
                rand_between(&mut gs.rng, COLLECT_MARGIN_X, w - COLLECT_MARGIN_X),
                rand_between(&mut gs.rng, COLLECT_MARGIN_Y, h - COLLECT_MARGIN_Y),
            );
            let phase = gs.rng.random::<f32>() * std::f32::consts::TAU;
            let id = gs.next_entity_id();
            self.planets.push(CollectPlanet {
                id,
                pos,
                color,
                size: COLLECT_PLANET_RADIUS,
                is_target,
                collected: false,
                origin: None,
                phase,
            });
        }

        self.round_time = round_timer(self.round, gs.run.difficulty);
        self.time_left = self.round_time;
        gs.push_event(GameEvent::RoundChanged { round: self.round });
        log::info!(
            "Round {}: collect {} {} of {} planets in {:.1}s",
            self.round,
            targets,
            self.target_color.name(),
            total,
            self.round_time
        );
    }

    /// Per-frame update: planet motion, then timeout and success checks
    pub fn update(&mut self, gs: &mut GameSession, dt: f32) {
        let difficulty = gs.run.difficulty;
        for planet in &mut self.planets {
            if planet.collected || self.dragging == Some(planet.id) {
                continue;
            }
            let origin = *planet.origin.get_or_insert(planet.pos);
            match difficulty {
                Difficulty::Easy => {}
                Difficulty::Medium => {
                    planet.phase += OSCILLATION_SPEED * dt;
                    planet.pos.x = origin.x + planet.phase.sin() * OSCILLATION_AMPLITUDE;
                }
                Difficulty::Hard => {
                    planet.phase += ORBIT_SPEED * dt;
                    planet.pos = origin + crate::from_angle(planet.phase) * ORBIT_RADIUS;
                }
            }
        }

        self.time_left = (self.time_left - dt).max(0.0);
        if self.time_left <= 0.0 {
            let center = gs.viewport.center();
            gs.particles
                .explosion(&mut gs.rng, center, palette::TIMEOUT_RED, true);
            log::debug!("Round {} timed out", self.round);
            gs.lose_life();
            if gs.is_playing() {
                self.next_round(gs);
            }
            return;
        }

        if !self.planets.is_empty() && self.targets_remaining() == 0 {
            gs.add_score(self.round as u64 * 10 * gs.run.multiplier());
            let at = Vec2::new(gs.viewport.width / 2.0, 100.0);
            gs.particles
                .sparkle(&mut gs.rng, at, palette::SUCCESS_GREEN);
            self.next_round(gs);
        }
    }

    /// Begin dragging the first uncollected planet under `pos`
    pub fn pointer_down(&mut self, pos: Vec2) {
        self.dragging = self
            .planets
            .iter()
            .find(|p| !p.collected && p.contains(pos))
            .map(|p| p.id);
    }

    /// Move the dragged planet to the pointer
    pub fn pointer_move(&mut self, pos: Vec2) {
        let Some(id) = self.dragging else {
            return;
        };
        if let Some(planet) = self.planets.iter_mut().find(|p| p.id == id) {
            planet.pos = pos;
        }
    }

    /// Release the drag; a release inside the drop zone resolves the planet
    pub fn pointer_up(&mut self, gs: &mut GameSession, pos: Vec2) {
        let Some(id) = self.dragging.take() else {
            return;
        };
        if !DropZone::for_viewport(gs.viewport).contains(pos) {
            return;
        }
        // Planet may have been regenerated away by a round change
        let Some(planet) = self
            .planets
            .iter_mut()
            .find(|p| p.id == id && !p.collected)
        else {
            return;
        };

        planet.collected = true;
        if planet.is_target {
            self.collected += 1;
            let color = planet.color.rgb();
            gs.particles.sparkle(&mut gs.rng, pos, color);
        } else {
            gs.particles
                .explosion(&mut gs.rng, pos, palette::TIMEOUT_RED, true);
            gs.lose_life();
        }
    }
}
