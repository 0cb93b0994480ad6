//! Fixed-increment simulation tick
//!
//! One call per animation frame while playing. The pipeline order follows
//! the classic runner loop: commands, player physics, spawning, scrolling,
//! clears, collisions, scoring, effect lifecycle. Menu and game-over are
//! idle except for leftover cosmetics.

use glam::Vec2;

use super::effects;
use super::physics;
use super::state::{GameEvent, GamePhase, GameState, palette};
use crate::consts::*;

/// Input commands for a single tick
///
/// One-shot flags: the host sets them when an input event arrives and
/// clears them after the tick consumes them. Commands invalid for the
/// current phase are silently ignored.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (space/tap). Only honored while playing and grounded.
    pub jump: bool,
    /// Start command. Only honored in the menu.
    pub start: bool,
    /// Restart command. Only honored at game over.
    pub restart: bool,
    /// Demo mode - a tiny AI jumps over incoming obstacles
    pub idle_mode: bool,
}

/// Advance the session by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    let phase_before = state.phase;
    if input.start {
        state.start();
    }
    if input.restart {
        state.restart();
    }
    if state.phase != phase_before {
        // Transition ticks only arm the session; simulation begins on the
        // next tick, from an untouched fresh state.
        step_cosmetics(state);
        return;
    }

    if state.phase != GamePhase::Playing {
        // Idle phases: leftover cosmetic effects keep animating, nothing
        // else moves and no score mutates.
        step_cosmetics(state);
        return;
    }

    state.time_ticks += 1;

    // Crash grace: the outcome is already decided, the world is frozen for
    // a few ticks of visual effect before the session ends.
    if let Some(ticks) = state.pending_game_over {
        if ticks <= 1 {
            state.end_session();
        } else {
            state.pending_game_over = Some(ticks - 1);
        }
        step_cosmetics(state);
        return;
    }

    let mut jump = input.jump;
    if input.idle_mode {
        jump |= auto_pilot_wants_jump(state);
    }
    if jump {
        state.jump();
    }

    // Player physics and animation
    physics::integrate(&mut state.player);
    animate_player(state);
    if physics::ground_clamp(&mut state.player, state.ground_y) {
        let origin = Vec2::new(
            state.player.pos.x + state.player.size / 2.0,
            state.player.bottom(),
        );
        effects::spawn_burst(
            &mut state.particles,
            &mut state.rng,
            origin,
            LAND_BURST,
            palette::WHITE,
        );
        state.events.push(GameEvent::Landed);
    }
    state.player.record_trail();

    // Spawning
    let batch = state
        .spawner
        .step(&mut state.rng, state.field.x, state.ground_y);
    if let Some(obstacle) = batch.obstacle {
        state.obstacles.push(obstacle);
    }
    if let Some(coin) = batch.coin {
        state.collectibles.push(coin);
    }

    // Scroll the world leftward
    let speed = state.speed;
    for obstacle in &mut state.obstacles {
        obstacle.pos.x -= speed;
    }
    for coin in &mut state.collectibles {
        coin.pos.x -= speed;
        coin.rotation += COIN_SPIN;
    }

    // Cleared obstacles: right edge past the left field edge. Compaction on
    // a copy - never remove while iterating.
    let obstacles = std::mem::take(&mut state.obstacles);
    for obstacle in obstacles {
        if obstacle.pos.x + obstacle.size.x < 0.0 {
            let outcome = state.scoring.award_clear();
            state.events.push(GameEvent::ObstacleCleared {
                points: outcome.points,
            });
            effects::spawn_burst(
                &mut state.particles,
                &mut state.rng,
                obstacle.pos,
                CLEAR_BURST,
                obstacle.color,
            );
            if let Some(multiplier) = outcome.combo_advanced {
                effects::spawn_text(
                    &mut state.texts,
                    format!("COMBO x{multiplier}"),
                    obstacle.pos,
                    palette::COMBO_GOLD,
                );
                state.events.push(GameEvent::ComboAdvanced { multiplier });
                state.player.happy = 0.5;
            }
        } else {
            state.obstacles.push(obstacle);
        }
    }

    // Player vs obstacles: any overlap starts the crash countdown
    let player_box = state.player.aabb();
    if state
        .obstacles
        .iter()
        .any(|o| player_box.overlaps(&o.aabb()))
    {
        state.player.mouth_ticks = MOUTH_OPEN_TICKS;
        state.player.happy = -1.0;
        effects::spawn_burst(
            &mut state.particles,
            &mut state.rng,
            state.player.center(),
            CRASH_BURST,
            palette::PRIMARY,
        );
        state.events.push(GameEvent::Crashed);
        state.pending_game_over = Some(CRASH_DELAY_TICKS);
        // The crash skips the coin pass, but coins that scrolled off this
        // tick must not linger frozen through the countdown.
        state.collectibles.retain(|c| c.pos.x + c.size.x >= 0.0);
        step_cosmetics(state);
        return;
    }

    // Coins: collected on first overlap (no re-trigger - the coin is gone)
    // or dropped once fully off-screen.
    let coins = std::mem::take(&mut state.collectibles);
    for coin in coins {
        if player_box.overlaps(&coin.aabb()) {
            let points = state.scoring.award_coin();
            state.events.push(GameEvent::CoinCollected { points });
            effects::spawn_text(
                &mut state.texts,
                format!("+{points}"),
                coin.pos,
                palette::SCORE_GREEN,
            );
            effects::spawn_burst(
                &mut state.particles,
                &mut state.rng,
                coin.pos,
                COIN_BURST,
                palette::COIN_YELLOW,
            );
            state.player.mouth_ticks = COIN_MOUTH_TICKS;
            state.player.happy = 0.8;
        } else if coin.pos.x + coin.size.x >= 0.0 {
            state.collectibles.push(coin);
        }
    }

    // Difficulty ramp - scroll speed only ever increases
    state.speed += SPEED_RAMP;

    step_cosmetics(state);
}

/// Advance particles, text effects and screen shake
fn step_cosmetics(state: &mut GameState) {
    effects::step_particles(&mut state.particles);
    effects::step_texts(&mut state.texts);
    state.screen_shake *= 0.9;
    if state.screen_shake < 0.1 {
        state.screen_shake = 0.0;
    }
}

/// Per-tick cosmetic animation counters on the player
fn animate_player(state: &mut GameState) {
    let player = &mut state.player;

    player.eye_sparkle += 0.05;
    if player.eye_sparkle > std::f32::consts::TAU {
        player.eye_sparkle = 0.0;
    }

    player.mouth_timer += 1;
    if player.mouth_timer > 60 {
        player.mouth_cycle = (player.mouth_cycle + 1) % 4;
        player.mouth_timer = 0;
    }

    if player.mouth_ticks > 0 {
        player.mouth_ticks -= 1;
    }

    if player.squash_ticks > 0 {
        player.squash_ticks -= 1;
        if player.squash_ticks == 0 {
            player.scale = 1.0;
        }
    }

    if player.happy > 0.0 {
        player.happy = (player.happy - 0.01).max(0.0);
    }
}

/// Demo AI: jump when a grounded obstacle is about to arrive
fn auto_pilot_wants_jump(state: &GameState) -> bool {
    if state.player.airborne {
        return false;
    }
    let player_right = state.player.pos.x + state.player.size;
    let lead = state.speed * 14.0;
    state.obstacles.iter().any(|o| {
        o.pos.x + o.size.x > state.player.pos.x && o.pos.x < player_right + lead
    })
}
