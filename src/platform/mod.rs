//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Timestamps (entropy for reseeding)
//! - Score messaging to an embedding page
//!
//! Storage lives next to the data it persists (`highscore`, `settings`).

use serde::Serialize;

/// Payload posted to the embedding page after each game over
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScoreMessage {
    score: u32,
    high_score: u32,
}

/// Milliseconds since the Unix epoch, used to reseed sessions
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Post the final score to the embedding page (WASM only)
///
/// Best effort: a standalone page has no parent listening and that is fine.
#[cfg(target_arch = "wasm32")]
pub fn post_score(score: u32, high_score: u32) {
    let message = ScoreMessage { score, high_score };
    let Ok(json) = serde_json::to_string(&message) else {
        return;
    };
    if let Some(window) = web_sys::window() {
        if let Ok(parent) = window.parent() {
            if let Some(parent) = parent {
                let _ = parent.post_message(&wasm_bindgen::JsValue::from_str(&json), "*");
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn post_score(score: u32, high_score: u32) {
    log::debug!("final score {score} (best {high_score})");
    // Keep the payload shape exercised on native
    let _ = serde_json::to_string(&ScoreMessage { score, high_score });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_message_uses_camel_case_keys() {
        let json = serde_json::to_string(&ScoreMessage {
            score: 120,
            high_score: 450,
        })
        .unwrap();
        assert_eq!(json, r#"{"score":120,"highScore":450}"#);
    }

    #[test]
    fn now_ms_is_nonzero_and_monotonic_enough() {
        let a = now_ms();
        let b = now_ms();
        assert!(a > 0);
        assert!(b >= a);
    }
}
