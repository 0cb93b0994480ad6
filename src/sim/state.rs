//! Game state and core entity types
//!
//! Everything the renderer reads and the tick pipeline mutates lives here.
//! One `GameState` per session, owned by the caller - there is no ambient
//! singleton.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects;
use super::score::Scoreboard;
use super::spawn::Spawner;
use crate::consts::*;

/// Palette indices for color tags
///
/// The sim never touches actual colors; entities carry an index and the
/// renderer resolves it against the active theme.
pub mod palette {
    /// Player body color (theme primary)
    pub const PRIMARY: u32 = 0;
    /// Obstacle color (theme secondary)
    pub const SECONDARY: u32 = 1;
    /// Jump/landing sparks
    pub const WHITE: u32 = 2;
    /// Coin burst
    pub const COIN_YELLOW: u32 = 3;
    /// Combo text
    pub const COMBO_GOLD: u32 = 4;
    /// "+50" text
    pub const SCORE_GREEN: u32 = 5;
}

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Initial idle state, waiting for a start command
    Menu,
    /// Active gameplay - the only phase that runs the tick pipeline
    Playing,
    /// Terminal until restart
    GameOver,
}

/// Gameplay events emitted during a tick, drained by the host
///
/// These drive the audio, persistence and messaging collaborators.
/// Dropping them never affects simulation correctness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Jumped,
    Landed,
    ObstacleCleared { points: u32 },
    ComboAdvanced { multiplier: u32 },
    CoinCollected { points: u32 },
    Crashed,
    GameOver {
        score: u32,
        high_score: u32,
        new_high_score: bool,
    },
}

/// Trail point behind the player (newest last)
#[derive(Debug, Clone, Copy)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub life: f32,
}

/// Number of trail points to keep
pub const TRAIL_LENGTH: usize = 5;

/// The player avatar - exactly one per session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner; x never changes, the world scrolls instead
    pub pos: Vec2,
    /// Square body edge length
    pub size: f32,
    /// Vertical velocity (positive = downward)
    pub vel_y: f32,
    /// True from jump until ground clamp
    pub airborne: bool,
    /// Tumble angle in degrees, clamped to ±MAX_ROTATION
    pub rotation: f32,
    /// Visual scale (squashes briefly on jump)
    pub scale: f32,
    /// Ticks the mouth stays open after jump/pickup
    pub mouth_ticks: u32,
    /// Ticks until the jump squash relaxes
    pub squash_ticks: u32,
    /// Idle chewing animation: 4 phases cycling every 60 ticks
    pub mouth_cycle: u8,
    pub mouth_timer: u32,
    /// Eye sparkle phase, wraps at TAU
    pub eye_sparkle: f32,
    /// Emotion scalar: positive = happy, negative = sad, decays toward 0
    pub happy: f32,
    /// Fading motion trail (render-only)
    #[serde(skip)]
    pub trail: Vec<TrailPoint>,
}

impl Player {
    pub fn new(ground_y: f32) -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, ground_y - PLAYER_SIZE - 15.0),
            size: PLAYER_SIZE,
            vel_y: 0.0,
            airborne: false,
            rotation: 0.0,
            scale: 1.0,
            mouth_ticks: 0,
            squash_ticks: 0,
            mouth_cycle: 0,
            mouth_timer: 0,
            eye_sparkle: 0.0,
            happy: 0.0,
            trail: Vec::with_capacity(TRAIL_LENGTH + 1),
        }
    }

    /// Bottom edge y coordinate
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size
    }

    /// Center of the body
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    /// Apply the jump impulse. Caller is responsible for the preconditions
    /// (grounded, session playing).
    pub fn apply_jump(&mut self) {
        self.vel_y = JUMP_FORCE;
        self.airborne = true;
        self.rotation = -MAX_ROTATION;
        self.scale = 0.8;
        self.squash_ticks = JUMP_SQUASH_TICKS;
        self.mouth_ticks = MOUTH_OPEN_TICKS;
    }

    /// Record the current center to the trail and age existing points
    pub fn record_trail(&mut self) {
        self.trail.push(TrailPoint {
            pos: self.center(),
            life: 1.0,
        });
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.remove(0);
        }
        for point in &mut self.trail {
            point.life -= 0.2;
        }
        self.trail.retain(|p| p.life > 0.0);
    }
}

/// Obstacle shape kinds
///
/// Identical kinds always use identical sizes so spawn difficulty stays
/// predictable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    SpikeShort,
    SpikeTall,
    Platform,
}

impl ObstacleKind {
    /// Fixed (width, height) for this kind
    pub const fn size(self) -> Vec2 {
        match self {
            ObstacleKind::SpikeShort => Vec2::new(35.0, 60.0),
            ObstacleKind::SpikeTall => Vec2::new(35.0, 90.0),
            ObstacleKind::Platform => Vec2::new(80.0, 40.0),
        }
    }
}

/// A scrolling obstacle, spawned at the right field edge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: ObstacleKind,
    pub color: u32,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, field_width: f32, ground_y: f32) -> Self {
        let size = kind.size();
        Self {
            pos: Vec2::new(field_width, ground_y - size.y),
            size,
            kind,
            color: palette::SECONDARY,
        }
    }
}

/// Collectible kinds (only coins for now)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollectibleKind {
    #[default]
    Coin,
}

/// A scrolling pickup, removed on collection or off-screen exit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub pos: Vec2,
    pub size: Vec2,
    pub rotation: f32,
    pub kind: CollectibleKind,
}

impl Collectible {
    pub fn coin(field_width: f32, ground_y: f32) -> Self {
        Self {
            pos: Vec2::new(field_width, ground_y - COIN_ALTITUDE),
            size: Vec2::splat(COIN_SIZE),
            rotation: 0.0,
            kind: CollectibleKind::Coin,
        }
    }
}

/// A cosmetic spark, pruned when life reaches zero
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: u32,
    pub life: f32,
    pub decay: f32,
}

/// A floating score/combo label
#[derive(Debug, Clone)]
pub struct TextEffect {
    pub text: String,
    pub pos: Vec2,
    pub color: u32,
    pub life: f32,
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Seeded RNG driving spawn and burst decisions
    pub rng: Pcg32,
    /// Play-field dimensions
    pub field: Vec2,
    /// y of the ground line (top of the ground strip)
    pub ground_y: f32,
    /// Current phase
    pub phase: GamePhase,
    /// Score/combo/multiplier bookkeeping
    pub scoring: Scoreboard,
    /// Leftward scroll speed, only ever increases
    pub speed: f32,
    /// Obstacle/coin spawn scheduling
    pub spawner: Spawner,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub collectibles: Vec<Collectible>,
    #[serde(skip)]
    pub particles: Vec<Particle>,
    #[serde(skip)]
    pub texts: Vec<TextEffect>,
    /// Best score seen this process (seeded from persistence at startup)
    pub high_score: u32,
    /// Active color theme, consumed by the renderer
    pub theme: usize,
    /// Camera shake intensity, decays each tick
    pub screen_shake: f32,
    /// Deterministic crash grace countdown; `Some(0)` never survives a tick
    pub pending_game_over: Option<u32>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events emitted this tick, drained by the host
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh session in the menu phase with the default field size
    pub fn new(seed: u64) -> Self {
        Self::with_field(seed, Vec2::new(FIELD_WIDTH, FIELD_HEIGHT))
    }

    /// Create a fresh session for a specific field size
    pub fn with_field(seed: u64, field: Vec2) -> Self {
        let ground_y = field.y - GROUND_HEIGHT;
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            field,
            ground_y,
            phase: GamePhase::Menu,
            scoring: Scoreboard::new(),
            speed: START_SPEED,
            spawner: Spawner::new(),
            player: Player::new(ground_y),
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            particles: Vec::new(),
            texts: Vec::new(),
            high_score: 0,
            theme: 0,
            screen_shake: 0.0,
            pending_game_over: None,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Begin playing. A no-op unless the session is in the menu.
    pub fn start(&mut self) {
        if self.phase != GamePhase::Menu {
            return;
        }
        self.phase = GamePhase::Playing;
        self.player.happy = 1.0;
        let origin = self.player.pos;
        effects::spawn_burst(
            &mut self.particles,
            &mut self.rng,
            origin,
            START_BURST,
            palette::PRIMARY,
        );
        self.events.push(GameEvent::Started);
        log::info!("session started (seed {})", self.seed);
    }

    /// Jump command. A no-op unless playing and grounded.
    pub fn jump(&mut self) {
        if self.phase != GamePhase::Playing || self.pending_game_over.is_some() {
            return;
        }
        if self.player.airborne {
            return;
        }
        self.player.apply_jump();
        let origin = Vec2::new(
            self.player.pos.x + self.player.size / 2.0,
            self.player.bottom(),
        );
        effects::spawn_burst(
            &mut self.particles,
            &mut self.rng,
            origin,
            JUMP_BURST,
            palette::WHITE,
        );
        self.events.push(GameEvent::Jumped);
    }

    /// Restart from game over, reusing the session seed. High score and
    /// theme persist; everything else returns to start-of-session defaults
    /// and play begins immediately.
    pub fn restart(&mut self) {
        let seed = self.seed;
        self.restart_with_seed(seed);
    }

    /// Restart with a fresh seed (hosts pass wall-clock entropy here)
    pub fn restart_with_seed(&mut self, seed: u64) {
        if self.phase != GamePhase::GameOver {
            return;
        }
        let high_score = self.high_score;
        let theme = self.theme;
        *self = Self::with_field(seed, self.field);
        self.high_score = high_score;
        self.theme = theme;
        self.start();
    }

    /// Finish the session: settle the high score and go terminal
    pub(super) fn end_session(&mut self) {
        self.pending_game_over = None;
        self.phase = GamePhase::GameOver;
        self.screen_shake = 10.0;
        let score = self.scoring.score;
        let new_high_score = score > self.high_score;
        if new_high_score {
            self.high_score = score;
        }
        self.events.push(GameEvent::GameOver {
            score,
            high_score: self.high_score,
            new_high_score,
        });
        log::info!(
            "game over: score {} (best {}{})",
            score,
            self.high_score,
            if new_high_score { ", new record" } else { "" }
        );
    }

    /// Drain the events emitted since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_defaults() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.scoring.score, 0);
        assert_eq!(state.scoring.combo, 0);
        assert_eq!(state.scoring.multiplier, 1);
        assert_eq!(state.speed, START_SPEED);
        assert!(state.obstacles.is_empty());
        assert!(state.collectibles.is_empty());
        assert!(state.particles.is_empty());
        assert!(state.texts.is_empty());
        // Player starts slightly above the ground, grounded flag clear
        assert!(state.player.bottom() < state.ground_y);
        assert!(!state.player.airborne);
    }

    #[test]
    fn obstacle_kinds_have_fixed_sizes() {
        // Same kind, same box - spawn difficulty contract
        assert_eq!(ObstacleKind::SpikeShort.size(), Vec2::new(35.0, 60.0));
        assert_eq!(ObstacleKind::SpikeTall.size(), Vec2::new(35.0, 90.0));
        assert_eq!(ObstacleKind::Platform.size(), Vec2::new(80.0, 40.0));
    }

    #[test]
    fn start_only_from_menu() {
        let mut state = GameState::new(7);
        state.start();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.take_events(), vec![GameEvent::Started]);

        // Starting again is silently ignored
        state.start();
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn jump_ignored_outside_playing() {
        let mut state = GameState::new(7);
        state.jump();
        assert!(!state.player.airborne);
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn jump_while_airborne_is_noop() {
        let mut state = GameState::new(7);
        state.start();
        state.take_events();

        state.jump();
        assert!(state.player.airborne);
        assert_eq!(state.player.vel_y, JUMP_FORCE);
        assert_eq!(state.take_events(), vec![GameEvent::Jumped]);

        // Second jump changes nothing
        let before = state.player.clone();
        state.jump();
        assert_eq!(state.player.vel_y, before.vel_y);
        assert_eq!(state.player.pos, before.pos);
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn restart_preserves_high_score() {
        let mut state = GameState::new(7);
        state.start();
        state.scoring.score = 420;
        state.end_session();
        assert_eq!(state.high_score, 420);

        state.restart();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.scoring.score, 0);
        assert_eq!(state.high_score, 420);
    }
}
