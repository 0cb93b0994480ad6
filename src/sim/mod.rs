//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed-increment ticks only (no wall-clock timers)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod effects;
pub mod physics;
pub mod score;
pub mod spawn;
pub mod state;
pub mod tick;

pub use physics::Aabb;
pub use score::Scoreboard;
pub use spawn::{SpawnBatch, Spawner};
pub use state::{
    Collectible, CollectibleKind, GameEvent, GamePhase, GameState, Obstacle, ObstacleKind,
    Particle, Player, TextEffect, palette,
};
pub use tick::{TickInput, tick};
