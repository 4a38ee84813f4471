//! Per-frame simulation tick
//!
//! One call per display frame: the active mode first, then particles, lasers,
//! screen shake and the backdrop. Pointer handlers run between frames and
//! mutate the session directly.

use glam::Vec2;

use super::clock::clamp_dt;
use super::entities::tick_lasers;
use super::state::{GameSession, ModeState};
use crate::consts::*;

/// Movement keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl HeldKeys {
    /// Update from a DOM `KeyboardEvent.key` value. Returns false for keys
    /// that don't steer.
    pub fn set_key(&mut self, key: &str, pressed: bool) -> bool {
        let slot = match key {
            "ArrowLeft" | "a" | "A" => &mut self.left,
            "ArrowRight" | "d" | "D" => &mut self.right,
            "ArrowUp" | "w" | "W" => &mut self.up,
            "ArrowDown" | "s" | "S" => &mut self.down,
            _ => return false,
        };
        *slot = pressed;
        true
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Input state sampled at tick time
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub keys: HeldKeys,
}

/// Advance the session by `dt` seconds (clamped)
pub fn tick(state: &mut GameSession, input: &TickInput, dt: f32) {
    let dt = clamp_dt(dt);

    if state.is_playing() {
        state.run.elapsed += dt;
        state.with_mode(|mode, gs| match mode {
            ModeState::Idle => {}
            ModeState::Collect(collect) => collect.update(gs, dt),
            ModeState::Asteroids(asteroids) => asteroids.update(gs, dt),
            ModeState::Climbing(climbing) => climbing.update(gs, &input.keys, dt),
        });
    }

    state.particles.tick(dt);
    tick_lasers(&mut state.laser_beams, dt);
    state.screen_shake = (state.screen_shake - SCREEN_SHAKE_DECAY * dt).max(0.0);

    let effects = state.settings.background_effects;
    state
        .background
        .tick(&mut state.rng, dt, state.viewport, effects);
}

impl GameSession {
    /// Pointer pressed at canvas-relative `pos`
    pub fn pointer_down(&mut self, pos: Vec2) {
        if !self.is_playing() {
            return;
        }
        if let ModeState::Collect(collect) = &mut self.mode {
            collect.pointer_down(pos);
        }
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        if !self.is_playing() {
            return;
        }
        if let ModeState::Collect(collect) = &mut self.mode {
            collect.pointer_move(pos);
        }
    }

    pub fn pointer_up(&mut self, pos: Vec2) {
        if !self.is_playing() {
            return;
        }
        self.with_mode(|mode, gs| {
            if let ModeState::Collect(collect) = mode {
                collect.pointer_up(gs, pos);
            }
        });
    }

    /// A completed click (press and release) at `pos`
    pub fn click(&mut self, pos: Vec2) {
        if !self.is_playing() {
            return;
        }
        self.with_mode(|mode, gs| match mode {
            ModeState::Asteroids(asteroids) => asteroids.click(gs, pos),
            ModeState::Climbing(climbing) => climbing.click(gs, pos),
            _ => {}
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::{Difficulty, GameEvent, GameMode, GamePhase, Viewport};
    use proptest::prelude::*;

    fn session() -> GameSession {
        GameSession::new(3, Viewport::new(1024.0, 768.0), Settings::default())
    }

    #[test]
    fn test_held_keys() {
        let mut keys = HeldKeys::default();
        assert!(keys.set_key("ArrowLeft", true));
        assert!(keys.set_key("W", true));
        assert!(!keys.set_key("Enter", true));
        assert!(keys.left && keys.up && !keys.right && !keys.down);
        keys.set_key("a", false);
        assert!(!keys.left);
        keys.clear();
        assert_eq!(keys, HeldKeys::default());
    }

    #[test]
    fn test_menu_only_animates_backdrop() {
        let mut gs = session();
        tick(&mut gs, &TickInput::default(), 0.016);
        assert_eq!(gs.phase, GamePhase::Menu);
        assert_eq!(gs.run.elapsed, 0.0);
        assert!(gs.background.time > 0.0);
    }

    #[test]
    fn test_stalled_frame_is_clamped() {
        let mut gs = session();
        gs.start_run(GameMode::Collect, Difficulty::Easy, 0.0);
        tick(&mut gs, &TickInput::default(), 3.0);
        assert_eq!(gs.run.elapsed, MAX_FRAME_DT);
        tick(&mut gs, &TickInput::default(), -1.0);
        assert_eq!(gs.run.elapsed, MAX_FRAME_DT);
    }

    #[test]
    fn test_screen_shake_decays() {
        let mut gs = session();
        gs.screen_shake = SCREEN_SHAKE_ON_HIT;
        tick(&mut gs, &TickInput::default(), 0.05);
        assert!((gs.screen_shake - 8.0).abs() < 1e-4);
        for _ in 0..10 {
            tick(&mut gs, &TickInput::default(), 0.05);
        }
        assert_eq!(gs.screen_shake, 0.0);
    }

    #[test]
    fn test_asteroids_run_times_out() {
        let mut gs = session();
        gs.start_run(GameMode::Asteroids, Difficulty::Easy, 0.0);
        for _ in 0..1300 {
            tick(&mut gs, &TickInput::default(), 0.05);
            if !gs.is_playing() {
                break;
            }
        }
        assert_eq!(gs.phase, GamePhase::GameOver);
        assert!(gs.run.elapsed >= ASTEROIDS_DURATION || gs.run.lives == 0);
        let overs = gs
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(overs, 1);
    }

    #[test]
    fn test_pointer_drag_through_session() {
        let mut gs = session();
        gs.start_run(GameMode::Collect, Difficulty::Easy, 0.0);
        let (id, pos) = match &gs.mode {
            ModeState::Collect(c) => (c.planets[0].id, c.planets[0].pos),
            _ => panic!("expected collect state"),
        };
        gs.pointer_down(pos);
        gs.pointer_move(Vec2::new(20.0, 20.0));
        let ModeState::Collect(c) = &gs.mode else {
            panic!("expected collect state");
        };
        assert_eq!(c.dragging(), Some(id));
        assert_eq!(c.planets[0].pos, Vec2::new(20.0, 20.0));
        gs.pointer_up(Vec2::new(20.0, 20.0));
        let ModeState::Collect(c) = &gs.mode else {
            panic!("expected collect state");
        };
        assert_eq!(c.dragging(), None);
    }

    #[test]
    fn test_input_ignored_after_game_over() {
        let mut gs = session();
        gs.start_run(GameMode::Climbing, Difficulty::Hard, 0.0);
        gs.game_over();
        gs.click(Vec2::new(10.0, 10.0));
        gs.click(Vec2::new(10.0, 10.0));
        assert!(gs.laser_beams.is_empty());
    }

    proptest! {
        #[test]
        fn prop_runs_stay_in_bounds(
            mode in 0usize..3,
            seed in any::<u64>(),
            frames in proptest::collection::vec((0.0f32..0.1, any::<bool>(), -50.0f32..1100.0, -50.0f32..800.0), 1..300)
        ) {
            let mut gs = GameSession::new(seed, Viewport::new(1024.0, 768.0), Settings::default());
            gs.start_run(GameMode::ALL[mode], Difficulty::Hard, 0.0);
            let mut input = TickInput::default();
            let mut last_score = 0;
            for (dt, press, x, y) in frames {
                input.keys.left = press;
                input.keys.down = !press;
                if press {
                    gs.click(Vec2::new(x, y));
                }
                tick(&mut gs, &input, dt);
                prop_assert!(gs.run.lives <= START_LIVES);
                prop_assert!(gs.run.score >= last_score);
                prop_assert!(gs.leaderboard.len() <= 1);
                last_score = gs.run.score;
            }
        }
    }
}
