//! Game state and core simulation types
//!
//! [`GameSession`] is the single owned root the frame scheduler holds. Mode
//! state machines borrow it mutably inside a tick; input handlers mutate it
//! between ticks. Nothing here is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::asteroids::AsteroidsState;
use super::background::Background;
use super::climbing::ClimbingState;
use super::collect::CollectState;
use super::entities::{LaserBeam, PowerupKind};
use super::particles::ParticleEngine;
use crate::consts::*;
use crate::leaderboard::Leaderboard;
use crate::palette::{self, SkinColors};
use crate::settings::Settings;

/// The three minigames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Drag planets of the target color into the drop zone
    #[default]
    Collect,
    /// Shoot hostile asteroids before they reach the planet
    Asteroids,
    /// Endless vertical scroller
    Climbing,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [GameMode::Collect, GameMode::Asteroids, GameMode::Climbing];

    pub fn name(self) -> &'static str {
        match self {
            GameMode::Collect => "Collect the Planets",
            GameMode::Asteroids => "Asteroids",
            GameMode::Climbing => "Space Climb",
        }
    }

    /// Modes that skip the difficulty menu. Climbing always runs on hard with
    /// every power-up enabled.
    pub fn fixed_difficulty(self) -> Option<Difficulty> {
        match self {
            GameMode::Climbing => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Selected difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Score multiplier (1/2/3)
    pub fn multiplier(self) -> u64 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    /// Asteroid speed scale
    pub fn speed_scale(self) -> f32 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 1.25,
            Difficulty::Hard => 1.5,
        }
    }

    /// Collect round timer scale
    pub fn timer_scale(self) -> f32 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 0.8,
            Difficulty::Hard => 0.5,
        }
    }
}

/// Top-level phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// No run in progress
    #[default]
    Menu,
    /// A run is being simulated
    Playing,
    /// Run ended; stores stay visible until the player leaves
    GameOver,
}

/// Canvas size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Per-run scoring and timing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub score: u64,
    pub lives: u8,
    /// Simulated seconds since the run started
    pub elapsed: f32,
    /// Host timestamp (ms) the run started at
    pub start_time_ms: f64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(GameMode::default(), Difficulty::default(), 0.0)
    }
}

impl SessionState {
    pub fn new(mode: GameMode, difficulty: Difficulty, start_time_ms: f64) -> Self {
        Self {
            mode,
            difficulty,
            score: 0,
            lives: START_LIVES,
            elapsed: 0.0,
            start_time_ms,
        }
    }

    pub fn multiplier(&self) -> u64 {
        self.difficulty.multiplier()
    }
}

/// Shield and speed boost held by the player
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerEffects {
    pub shield_active: bool,
    /// Seconds of speed boost remaining
    pub speed_boost: f32,
}

/// Notifications for the UI layer, drained by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted { mode: GameMode, difficulty: Difficulty },
    RoundChanged { round: u32 },
    LifeLost { lives: u8 },
    ShieldAbsorbed,
    PowerupCollected { kind: PowerupKind },
    LaserFired,
    GameOver { final_score: u64, rank: Option<usize> },
}

/// Mode-specific state machine
#[derive(Debug, Clone, Default)]
pub enum ModeState {
    #[default]
    Idle,
    Collect(CollectState),
    Asteroids(AsteroidsState),
    Climbing(ClimbingState),
}

/// Complete game state, owned by the frame scheduler
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Current (or just finished) run
    pub run: SessionState,
    pub mode: ModeState,
    pub player: PlayerEffects,
    pub particles: ParticleEngine,
    pub background: Background,
    /// Laser visuals from either shooting mode
    pub laser_beams: Vec<LaserBeam>,
    pub leaderboard: Leaderboard,
    pub settings: Settings,
    /// Player planet colors resolved from `settings.skin`
    pub skin: SkinColors,
    pub viewport: Viewport,
    /// Screen shake magnitude (px), decays every tick
    pub screen_shake: f32,
    /// Rank achieved by the last finished run
    pub last_rank: Option<usize>,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameSession {
    /// Create a session sitting at the menu
    pub fn new(seed: u64, viewport: Viewport, settings: Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let background = Background::new(&mut rng, viewport, settings.quality.star_count());
        Self {
            seed,
            rng,
            phase: GamePhase::Menu,
            run: SessionState::default(),
            mode: ModeState::Idle,
            player: PlayerEffects::default(),
            particles: ParticleEngine::new(settings.max_particles()),
            background,
            laser_beams: Vec::new(),
            leaderboard: Leaderboard::new(),
            skin: settings.skin_colors(),
            settings,
            viewport,
            screen_shake: 0.0,
            last_rank: None,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Begin a fresh run, discarding whatever was on screen
    pub fn start_run(&mut self, mode: GameMode, difficulty: Difficulty, now_ms: f64) {
        self.clear_run_stores();
        self.run = SessionState::new(mode, difficulty, now_ms);
        self.player = PlayerEffects::default();
        self.phase = GamePhase::Playing;
        self.last_rank = None;
        self.events.push(GameEvent::RunStarted { mode, difficulty });
        log::info!("Starting {} on {:?}", mode.name(), difficulty);

        self.mode = match mode {
            GameMode::Collect => ModeState::Collect(CollectState::start(self)),
            GameMode::Asteroids => ModeState::Asteroids(AsteroidsState::default()),
            GameMode::Climbing => ModeState::Climbing(ClimbingState::new(self.viewport)),
        };
    }

    /// Same mode and difficulty again
    pub fn restart(&mut self, now_ms: f64) {
        let (mode, difficulty) = (self.run.mode, self.run.difficulty);
        self.start_run(mode, difficulty, now_ms);
    }

    /// Tear the run down and go back to the menu
    pub fn return_to_menu(&mut self) {
        self.clear_run_stores();
        self.run = SessionState::default();
        self.player = PlayerEffects::default();
        self.phase = GamePhase::Menu;
    }

    fn clear_run_stores(&mut self) {
        self.mode = ModeState::Idle;
        self.particles.clear();
        self.laser_beams.clear();
        self.screen_shake = 0.0;
    }

    /// Add points to the running score
    pub fn add_score(&mut self, points: u64) {
        self.run.score = self.run.score.saturating_add(points);
    }

    /// Lose one life; the last one ends the run.
    /// Returns false when no life could be taken (not playing, or none left).
    pub fn lose_life(&mut self) -> bool {
        if !self.is_playing() || self.run.lives == 0 {
            return false;
        }
        self.run.lives -= 1;
        self.events.push(GameEvent::LifeLost {
            lives: self.run.lives,
        });
        log::debug!("Life lost, {} left", self.run.lives);
        if self.run.lives == 0 {
            self.game_over();
        }
        true
    }

    /// A hostile object reached the player at `at`. The shield soaks the hit
    /// if up; otherwise a life is lost. Returns true if a life was lost.
    pub fn hostile_hit(&mut self, at: Vec2) -> bool {
        if self.player.shield_active {
            self.player.shield_active = false;
            self.particles
                .explosion(&mut self.rng, at, palette::SHIELD_BLUE, true);
            self.events.push(GameEvent::ShieldAbsorbed);
            return false;
        }
        self.particles
            .explosion(&mut self.rng, at, palette::DAMAGE_RED, true);
        self.lose_life()
    }

    /// End the run and record it on the leaderboard. Only the first call for
    /// a run has any effect; later calls return the same rank.
    pub fn game_over(&mut self) -> Option<usize> {
        if !self.is_playing() {
            return self.last_rank;
        }
        self.phase = GamePhase::GameOver;
        let rank = self.leaderboard.add_entry(
            self.settings.display_name(),
            self.run.score,
            self.run.mode,
        );
        self.last_rank = rank;
        self.events.push(GameEvent::GameOver {
            final_score: self.run.score,
            rank,
        });
        log::info!(
            "Game over in {}: score {} after {:.1}s",
            self.run.mode.name(),
            self.run.score,
            self.run.elapsed
        );
        rank
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all queued UI notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Resize; the starfield is regenerated for the new bounds
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let stars = self.settings.quality.star_count();
        self.background.reseed(&mut self.rng, viewport, stars);
    }

    /// Swap in new settings
    pub fn apply_settings(&mut self, settings: Settings) {
        let reseed = settings.quality.star_count() != self.settings.quality.star_count();
        self.particles.set_cap(settings.max_particles());
        if settings.skin != self.settings.skin {
            self.skin = settings.skin_colors();
        }
        self.settings = settings;
        if reseed {
            let stars = self.settings.quality.star_count();
            self.background.reseed(&mut self.rng, self.viewport, stars);
        }
    }

    /// Run `f` with the mode state detached from the session so both can be
    /// borrowed mutably.
    pub(crate) fn with_mode<T>(&mut self, f: impl FnOnce(&mut ModeState, &mut GameSession) -> T) -> T {
        let mut mode = std::mem::take(&mut self.mode);
        let out = f(&mut mode, self);
        self.mode = mode;
        out
    }
}
