pub mod drag;
pub mod geometry;
pub mod pinch;

pub use drag::apply_pinch;
pub use geometry::GridGeometry;
pub use pinch::{Hand, PinchPoint, detect_pinch, parse_hands};
