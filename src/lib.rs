//! Moramora Janken core crate.
//!
//! Browser rock-scissors-paper duel against the Moramora character. The pure
//! game rules live in [`logic`], page-supplied presentation tuning in
//! [`config`], and the shuffle / lock / reveal round driver plus its DOM
//! glue in [`round`]. The logic and the round state machine are host-testable;
//! only the glue needs a browser.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod logic;
pub mod round;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Start the game with the built-in timings and message pools.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    round::start_round_mode(config::GameConfig::default())
}

/// Start the game with a page-supplied JSON config blob: timings,
/// per-outcome message pools, and expression image paths. Fields omitted
/// from the JSON keep their defaults.
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let cfg = config::GameConfig::from_json(json)
        .map_err(|e| JsValue::from_str(&format!("invalid config JSON: {e}")))?;
    round::start_round_mode(cfg)
}
