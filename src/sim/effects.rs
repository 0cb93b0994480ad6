//! Transient visual effects: particle bursts and floating text
//!
//! Purely cosmetic. Particles get independent random velocity, size and
//! decay; text effects rise and fade at fixed rates. Both are pruned at the
//! end of every tick, before the next tick's spawns, so no dead entry ever
//! survives a tick boundary.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Particle, TextEffect};
use crate::consts::*;

/// Hard cap on live particles; the oldest are evicted to make room
pub const MAX_PARTICLES: usize = 256;

/// Spawn a burst of `count` particles at `origin`
pub fn spawn_burst(
    particles: &mut Vec<Particle>,
    rng: &mut Pcg32,
    origin: Vec2,
    count: usize,
    color: u32,
) {
    for _ in 0..count {
        if particles.len() >= MAX_PARTICLES {
            particles.remove(0);
        }
        particles.push(Particle {
            pos: origin,
            vel: Vec2::new(rng.random_range(-4.0..4.0), rng.random_range(-4.0..4.0)),
            size: rng.random_range(2.0..6.0),
            color,
            life: 1.0,
            decay: rng.random_range(0.01..0.03),
        });
    }
}

/// Spawn a floating label at `pos`
pub fn spawn_text(texts: &mut Vec<TextEffect>, text: String, pos: Vec2, color: u32) {
    texts.push(TextEffect {
        text,
        pos,
        color,
        life: 1.0,
    });
}

/// Advance all particles one tick and prune the dead
pub fn step_particles(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.life -= p.decay;
    }
    particles.retain(|p| p.life > 0.0);
}

/// Advance all text effects one tick and prune the dead
pub fn step_texts(texts: &mut Vec<TextEffect>) {
    for t in texts.iter_mut() {
        t.pos.y -= TEXT_RISE;
        t.life -= TEXT_FADE;
    }
    texts.retain(|t| t.life > 0.0);
}
