//! Score, combo and multiplier bookkeeping
//!
//! Clearing an obstacle pays `10 × multiplier` and extends the combo; every
//! 5th consecutive clear bumps the multiplier. Coins pay a flat 50 no matter
//! the multiplier. Score never decreases within a session.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Outcome of an obstacle clear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearOutcome {
    /// Points credited for this clear
    pub points: u32,
    /// Set when this clear advanced the multiplier (its new value)
    pub combo_advanced: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Total session score
    pub score: u32,
    /// Consecutive obstacle clears since the session started
    pub combo: u32,
    /// Score multiplier, starts at 1 and only grows
    pub multiplier: u32,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Scoreboard {
    pub fn new() -> Self {
        Self {
            score: 0,
            combo: 0,
            multiplier: 1,
        }
    }

    /// Credit an obstacle clear at the current multiplier, then advance the
    /// combo. The multiplier step applies to the *next* clear.
    pub fn award_clear(&mut self) -> ClearOutcome {
        let points = OBSTACLE_SCORE * self.multiplier;
        self.score += points;
        self.combo += 1;

        let combo_advanced = if self.combo.is_multiple_of(COMBO_STEP) {
            self.multiplier += 1;
            Some(self.multiplier)
        } else {
            None
        };

        ClearOutcome {
            points,
            combo_advanced,
        }
    }

    /// Credit a coin pickup: flat value, multiplier-independent, no combo.
    pub fn award_coin(&mut self) -> u32 {
        self.score += COIN_SCORE;
        COIN_SCORE
    }
}
