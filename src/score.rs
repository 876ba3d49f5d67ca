//! Best survival time persistence
//!
//! A single integer in LocalStorage under a fixed key. The stored value is
//! a plain decimal string; anything missing, unparsable or non-finite reads
//! back as zero rather than surfacing an error.

/// LocalStorage key (used only in wasm32)
#[allow(dead_code)]
const STORAGE_KEY: &str = "dodge_jump_best";

/// Parse a stored best-score string, defaulting to 0 on any garbage
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn parse_best(raw: &str) -> u32 {
    match raw.trim().parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => n.floor() as u32,
        _ => 0,
    }
}

/// Load the best survival time in seconds (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn load_best() -> u32 {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        if let Ok(Some(raw)) = storage.get_item(STORAGE_KEY) {
            let best = parse_best(&raw);
            log::info!("Loaded best score: {best}s");
            return best;
        }
    }

    log::info!("No best score found, starting fresh");
    0
}

/// Save the best survival time in seconds (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn save_best(best: u32) {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        if storage.set_item(STORAGE_KEY, &best.to_string()).is_ok() {
            log::info!("Best score saved: {best}s");
        } else {
            log::warn!("Failed to persist best score");
        }
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load_best() -> u32 {
    0
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_best(_best: u32) {
    // No-op for native
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_integers() {
        assert_eq!(parse_best("0"), 0);
        assert_eq!(parse_best("42"), 42);
        assert_eq!(parse_best(" 17 "), 17);
    }

    #[test]
    fn test_parse_floors_fractions() {
        assert_eq!(parse_best("12.9"), 12);
    }

    #[test]
    fn test_parse_garbage_defaults_to_zero() {
        assert_eq!(parse_best(""), 0);
        assert_eq!(parse_best("best"), 0);
        assert_eq!(parse_best("NaN"), 0);
        assert_eq!(parse_best("inf"), 0);
        assert_eq!(parse_best("-5"), 0);
    }
}
