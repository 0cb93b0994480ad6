//! Cube Dash - a side-scrolling jump-and-dash arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, scoring)
//! - `renderer`: Canvas2D rendering (wasm only)
//! - `platform`: Browser/native timestamp and messaging abstraction
//! - `highscore`: Best-effort persisted high score
//! - `settings`: Player preferences

pub mod highscore;
pub mod platform;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod renderer;

pub use settings::Settings;

/// Game tuning constants
///
/// Units: pixels and pixels-per-tick. The simulation is a fixed-increment
/// model nominally running at 60 ticks per second; all time values below are
/// expressed in ticks.
pub mod consts {
    /// Nominal tick rate (Hz). Informational - the sim itself is unit-less.
    pub const TICK_HZ: u32 = 60;

    /// Default play-field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 450.0;
    /// Height of the ground strip at the bottom of the field
    pub const GROUND_HEIGHT: f32 = 120.0;

    /// Player defaults - fixed x, square body
    pub const PLAYER_X: f32 = 100.0;
    pub const PLAYER_SIZE: f32 = 45.0;

    /// Vertical physics (per tick)
    pub const GRAVITY: f32 = 0.9;
    pub const JUMP_FORCE: f32 = -18.0;
    /// Rotation tracks vertical velocity at this rate, clamped to ±MAX_ROTATION
    pub const ROTATION_RATE: f32 = 0.5;
    pub const MAX_ROTATION: f32 = 25.0;

    /// Horizontal scroll speed applied to obstacles/collectibles
    pub const START_SPEED: f32 = 8.0;
    /// Speed increase per tick (monotonic ramp)
    pub const SPEED_RAMP: f32 = 0.001;

    /// Obstacle spawn scheduling (ticks)
    pub const START_SPAWN_INTERVAL: f32 = 70.0;
    pub const SPAWN_INTERVAL_STEP: f32 = 0.2;
    pub const MIN_SPAWN_INTERVAL: f32 = 40.0;

    /// Collectible spawn probability per tick
    pub const COIN_CHANCE: f64 = 0.02;
    pub const COIN_SIZE: f32 = 20.0;
    /// Coins spawn this far above the ground line
    pub const COIN_ALTITUDE: f32 = 80.0;
    /// Coin spin per tick (radians)
    pub const COIN_SPIN: f32 = 0.1;

    /// Scoring
    pub const OBSTACLE_SCORE: u32 = 10;
    pub const COIN_SCORE: u32 = 50;
    /// Multiplier advances every this many consecutive clears
    pub const COMBO_STEP: u32 = 5;

    /// Crash grace delay before the session ends (300ms at 60Hz)
    pub const CRASH_DELAY_TICKS: u32 = 18;

    /// Cosmetic countdowns (200ms / 100ms / 150ms at 60Hz)
    pub const MOUTH_OPEN_TICKS: u32 = 12;
    pub const JUMP_SQUASH_TICKS: u32 = 6;
    pub const COIN_MOUTH_TICKS: u32 = 9;

    /// Text effects float up and fade at these per-tick rates
    pub const TEXT_RISE: f32 = 2.0;
    pub const TEXT_FADE: f32 = 0.02;

    /// Particle burst sizes per event
    pub const JUMP_BURST: usize = 8;
    pub const LAND_BURST: usize = 6;
    pub const CLEAR_BURST: usize = 5;
    pub const COIN_BURST: usize = 15;
    pub const START_BURST: usize = 20;
    pub const CRASH_BURST: usize = 20;
}
