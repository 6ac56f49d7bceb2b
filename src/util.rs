// Browser helpers shared by the components
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// 64 random bits from `Math.random`, used to seed a round's RNG.
pub fn fresh_seed() -> u64 {
    let half = || (js_sys::Math::random() * u32::MAX as f64) as u64;
    (half() << 32) | half()
}

pub fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
}
