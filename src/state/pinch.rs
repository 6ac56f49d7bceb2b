//! Hand landmarks in, pinch point out.
//!
//! The detector reports each hand as 21 normalized landmarks in image space.
//! The webcam preview is mirrored, so x is flipped when mapping to the canvas.

use serde::{Deserialize, Serialize};

/// Landmark indices of the 21-point hand model.
pub mod landmarks {
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_FINGER_TIP: usize = 8;
    pub const COUNT: usize = 21;
}

/// Bone pairs of the hand skeleton, drawn on the overlay.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4),
    (0, 5),
    (5, 6),
    (6, 7),
    (7, 8),
    (5, 9),
    (9, 10),
    (10, 11),
    (11, 12),
    (9, 13),
    (13, 14),
    (14, 15),
    (15, 16),
    (13, 17),
    (0, 17),
    (17, 18),
    (18, 19),
    (19, 20),
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

/// One hand's landmarks, in detector order.
pub type Hand = Vec<Landmark>;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PinchPoint {
    pub x: f64,
    pub y: f64,
    pub active: bool,
}

/// Parse the `multiHandLandmarks` payload (a JSON array of hands). A missing
/// or null payload means no hands.
pub fn parse_hands(json: &str) -> Result<Vec<Hand>, serde_json::Error> {
    let hands: Option<Vec<Hand>> = serde_json::from_str(json)?;
    Ok(hands.unwrap_or_default())
}

/// Normalized landmark to canvas pixels, mirrored horizontally.
pub fn to_canvas(lm: &Landmark, width: f64, height: f64) -> (f64, f64) {
    (width * (1.0 - lm.x), height * lm.y)
}

/// Pinch state of the first hand. Only thumb tip and index tip are read.
///
/// The returned point is the thumb/index midpoint whenever a usable hand is
/// present, `active` only when the two tips are closer than
/// `ratio * min(width, height)`.
pub fn detect_pinch(hands: &[Hand], width: f64, height: f64, ratio: f64) -> PinchPoint {
    let Some(hand) = hands.first() else {
        return PinchPoint::default();
    };
    let (Some(thumb), Some(index)) = (
        hand.get(landmarks::THUMB_TIP),
        hand.get(landmarks::INDEX_FINGER_TIP),
    ) else {
        return PinchPoint::default();
    };
    let (tx, ty) = to_canvas(thumb, width, height);
    let (ix, iy) = to_canvas(index, width, height);
    let dist = (tx - ix).hypot(ty - iy);
    let threshold = width.min(height) * ratio;
    PinchPoint {
        x: (tx + ix) / 2.0,
        y: (ty + iy) / 2.0,
        active: dist < threshold,
    }
}
