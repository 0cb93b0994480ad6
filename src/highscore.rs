//! Best-score persistence
//!
//! A single integer under one LocalStorage key. Storage is best effort:
//! private browsing or a disabled store never breaks gameplay, and a
//! malformed value reads as zero.

/// LocalStorage key (used only in wasm32)
#[allow(dead_code)]
const STORAGE_KEY: &str = "cube_dash_high_score";

/// Load the persisted best score (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn load() -> u32 {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        if let Ok(Some(raw)) = storage.get_item(STORAGE_KEY) {
            match raw.parse::<u32>() {
                Ok(score) => {
                    log::info!("Loaded high score {score}");
                    return score;
                }
                Err(_) => {
                    log::warn!("Discarding malformed high score {raw:?}");
                }
            }
        }
    }

    0
}

/// Save the best score (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn save(score: u32) {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        let _ = storage.set_item(STORAGE_KEY, &score.to_string());
        log::info!("High score saved ({score})");
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load() -> u32 {
    0
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save(_score: u32) {
    // No-op for native
}
