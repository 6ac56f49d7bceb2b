//! Canvas drawing for the board and the hand overlay.
//!
//! Everything draws through [`Surface`] so the scene logic runs without a
//! browser; the only real implementation is `CanvasRenderingContext2d`.

use std::f64::consts::PI;
use web_sys::CanvasRenderingContext2d;

use crate::model::{Piece, PuzzleState, Target};
use crate::state::pinch::{HAND_CONNECTIONS, landmarks, to_canvas};
use crate::state::{GridGeometry, Hand, PinchPoint};

const GRID_LINE: &str = "rgb(0, 0, 0)";
const CORNER_FILL: &str = "white";
const TARGET_OUTLINE: &str = "rgba(0,0,0,0.85)";
const PIECE_OUTLINE: &str = "#222";
const PIECE_DOT: &str = "rgba(0,0,0,0.7)";
const TARGET_ALPHA: f64 = 0.9;
const BONE_COLOR: &str = "#22c55e";
const JOINT_COLOR: &str = "#ec4899";
const CURSOR_IDLE: &str = "rgba(255,255,255,0.6)";
const CURSOR_ACTIVE: &str = "rgba(217, 0, 255, 0.9)";

/// Minimal 2D drawing target.
pub trait Surface {
    fn clear(&self, width: f64, height: f64);
    fn save(&self);
    fn restore(&self);
    fn set_alpha(&self, alpha: f64);
    fn set_fill(&self, color: &str);
    fn set_stroke(&self, color: &str);
    fn set_line_width(&self, width: f64);
    fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64);
    fn stroke_rect(&self, x: f64, y: f64, w: f64, h: f64);
    fn fill_circle(&self, x: f64, y: f64, radius: f64);
    fn stroke_circle(&self, x: f64, y: f64, radius: f64);
    fn line(&self, x1: f64, y1: f64, x2: f64, y2: f64);
}

impl Surface for CanvasRenderingContext2d {
    fn clear(&self, width: f64, height: f64) {
        self.clear_rect(0.0, 0.0, width, height);
    }
    fn save(&self) {
        CanvasRenderingContext2d::save(self);
    }
    fn restore(&self) {
        CanvasRenderingContext2d::restore(self);
    }
    fn set_alpha(&self, alpha: f64) {
        self.set_global_alpha(alpha);
    }
    fn set_fill(&self, color: &str) {
        self.set_fill_style_str(color);
    }
    fn set_stroke(&self, color: &str) {
        self.set_stroke_style_str(color);
    }
    fn set_line_width(&self, width: f64) {
        CanvasRenderingContext2d::set_line_width(self, width);
    }
    fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64) {
        CanvasRenderingContext2d::fill_rect(self, x, y, w, h);
    }
    fn stroke_rect(&self, x: f64, y: f64, w: f64, h: f64) {
        CanvasRenderingContext2d::stroke_rect(self, x, y, w, h);
    }
    fn fill_circle(&self, x: f64, y: f64, radius: f64) {
        self.begin_path();
        self.arc(x, y, radius, 0.0, PI * 2.0).ok();
        self.fill();
    }
    fn stroke_circle(&self, x: f64, y: f64, radius: f64) {
        self.begin_path();
        self.arc(x, y, radius, 0.0, PI * 2.0).ok();
        self.stroke();
    }
    fn line(&self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.begin_path();
        self.move_to(x1, y1);
        self.line_to(x2, y2);
        self.stroke();
    }
}

fn draw_grid<S: Surface + ?Sized>(s: &S, geo: &GridGeometry) {
    let cs = geo.cell_size;
    let dot = (cs * 0.06).max(2.0);
    s.set_line_width(1.0);
    for r in 0..geo.grid_size {
        for c in 0..geo.grid_size {
            let x = geo.offset_x + c as f64 * cs;
            let y = geo.offset_y + r as f64 * cs;
            s.set_stroke(GRID_LINE);
            s.stroke_rect(x, y, cs, cs);
            // corner markers
            for (px, py) in [(x, y), (x + cs, y), (x, y + cs), (x + cs, y + cs)] {
                s.set_fill(CORNER_FILL);
                s.fill_rect(px - dot / 2.0, py - dot / 2.0, dot, dot);
                s.stroke_rect(px - dot / 2.0, py - dot / 2.0, dot, dot);
            }
        }
    }
}

fn draw_target<S: Surface + ?Sized>(s: &S, geo: &GridGeometry, target: &Target) {
    let (x, y) = geo.cell_origin(target.cell);
    s.save();
    s.set_alpha(TARGET_ALPHA);
    s.set_fill(&target.color);
    s.fill_rect(x, y, geo.cell_size, geo.cell_size);
    s.set_stroke(TARGET_OUTLINE);
    s.stroke_rect(x, y, geo.cell_size, geo.cell_size);
    s.restore();
}

fn draw_piece<S: Surface + ?Sized>(s: &S, geo: &GridGeometry, piece: &Piece) {
    let cs = geo.cell_size;
    let (x, y) = geo.cell_origin(piece.cell);
    s.set_fill(&piece.color);
    s.fill_rect(x, y, cs, cs);
    s.set_stroke(PIECE_OUTLINE);
    s.stroke_rect(x, y, cs, cs);
    let (cx, cy) = geo.cell_center(piece.cell);
    s.set_fill(PIECE_DOT);
    s.fill_circle(cx, cy, (cs * 0.06).max(3.0));
}

/// Full board redraw: grid, then the target while the pattern is visible,
/// the piece otherwise. Safe to call in any phase.
pub fn draw_scene<S: Surface + ?Sized>(s: &S, state: &PuzzleState) {
    let geo = state.geometry();
    s.clear(state.canvas_width, state.canvas_height);
    draw_grid(s, &geo);
    if state.phase.shows_pattern() {
        if let Some(target) = &state.target {
            draw_target(s, &geo, target);
        }
    } else {
        for piece in &state.pieces {
            draw_piece(s, &geo, piece);
        }
    }
}

/// Hand skeletons (mirrored like the pinch math) and a cursor at the pinch point.
pub fn draw_overlay<S: Surface + ?Sized>(
    s: &S,
    width: f64,
    height: f64,
    hands: &[Hand],
    pinch: PinchPoint,
) {
    s.clear(width, height);
    for hand in hands {
        let pts: Vec<(f64, f64)> = hand
            .iter()
            .take(landmarks::COUNT)
            .map(|lm| to_canvas(lm, width, height))
            .collect();
        s.set_stroke(BONE_COLOR);
        s.set_line_width(2.0);
        for &(a, b) in HAND_CONNECTIONS.iter() {
            if let (Some(&(x1, y1)), Some(&(x2, y2))) = (pts.get(a), pts.get(b)) {
                s.line(x1, y1, x2, y2);
            }
        }
        s.set_fill(JOINT_COLOR);
        for &(x, y) in &pts {
            s.fill_circle(x, y, 3.0);
        }
    }
    if !hands.is_empty() {
        let radius = (width.min(height) * 0.02).max(4.0);
        s.set_line_width(2.0);
        if pinch.active {
            s.set_fill(CURSOR_ACTIVE);
            s.fill_circle(pinch.x, pinch.y, radius);
        } else {
            s.set_stroke(CURSOR_IDLE);
            s.stroke_circle(pinch.x, pinch.y, radius);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Phase, PuzzleAction};
    use crate::state::pinch::Landmark;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear(f64, f64),
        Alpha(f64),
        Fill(String),
        Stroke(String),
        FillRect(f64, f64, f64, f64),
        StrokeRect(f64, f64, f64, f64),
        FillCircle(f64, f64, f64),
        StrokeCircle(f64, f64, f64),
        Line,
        Other,
    }

    #[derive(Default)]
    struct Recorder {
        ops: RefCell<Vec<Op>>,
    }

    impl Recorder {
        fn push(&self, op: Op) {
            self.ops.borrow_mut().push(op);
        }
        fn ops(&self) -> Vec<Op> {
            self.ops.borrow().clone()
        }
        fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
            self.ops.borrow().iter().filter(|op| pred(op)).count()
        }
    }

    impl Surface for Recorder {
        fn clear(&self, width: f64, height: f64) {
            self.push(Op::Clear(width, height));
        }
        fn save(&self) {
            self.push(Op::Other);
        }
        fn restore(&self) {
            self.push(Op::Other);
        }
        fn set_alpha(&self, alpha: f64) {
            self.push(Op::Alpha(alpha));
        }
        fn set_fill(&self, color: &str) {
            self.push(Op::Fill(color.to_string()));
        }
        fn set_stroke(&self, color: &str) {
            self.push(Op::Stroke(color.to_string()));
        }
        fn set_line_width(&self, _width: f64) {
            self.push(Op::Other);
        }
        fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64) {
            self.push(Op::FillRect(x, y, w, h));
        }
        fn stroke_rect(&self, x: f64, y: f64, w: f64, h: f64) {
            self.push(Op::StrokeRect(x, y, w, h));
        }
        fn fill_circle(&self, x: f64, y: f64, radius: f64) {
            self.push(Op::FillCircle(x, y, radius));
        }
        fn stroke_circle(&self, x: f64, y: f64, radius: f64) {
            self.push(Op::StrokeCircle(x, y, radius));
        }
        fn line(&self, _x1: f64, _y1: f64, _x2: f64, _y2: f64) {
            self.push(Op::Line);
        }
    }

    fn scattered() -> PuzzleState {
        let mut s = PuzzleState::default();
        s.apply(PuzzleAction::StartRound { seed: 4 });
        let round = s.round;
        while s.countdown.is_some() {
            s.apply(PuzzleAction::CountdownTick { round });
        }
        s.apply(PuzzleAction::Scatter { round, seed: 5 });
        s
    }

    #[test]
    fn idle_board_is_grid_only() {
        let rec = Recorder::default();
        draw_scene(&rec, &PuzzleState::default());
        assert_eq!(rec.ops()[0], Op::Clear(640.0, 480.0));
        // one cell outline plus four corner outlines per cell
        assert_eq!(rec.count(|op| matches!(op, Op::StrokeRect(..))), 25 * 5);
        assert_eq!(rec.count(|op| matches!(op, Op::FillCircle(..))), 0);
        assert_eq!(rec.count(|op| matches!(op, Op::Alpha(_))), 0);
    }

    #[test]
    fn pattern_phase_draws_target_not_piece() {
        let mut s = PuzzleState::default();
        s.apply(PuzzleAction::StartRound { seed: 8 });
        let rec = Recorder::default();
        draw_scene(&rec, &s);
        let geo = s.geometry();
        let (x, y) = geo.cell_origin(s.target.as_ref().unwrap().cell);
        let ops = rec.ops();
        assert!(ops.contains(&Op::Alpha(TARGET_ALPHA)));
        assert!(ops.contains(&Op::FillRect(x, y, geo.cell_size, geo.cell_size)));
        assert_eq!(rec.count(|op| matches!(op, Op::FillCircle(..))), 0);
    }

    #[test]
    fn scattered_phase_draws_piece_with_center_dot() {
        let s = scattered();
        let rec = Recorder::default();
        draw_scene(&rec, &s);
        let geo = s.geometry();
        let piece = s.piece().unwrap();
        let (cx, cy) = geo.cell_center(piece.cell);
        let ops = rec.ops();
        assert!(ops.contains(&Op::Fill(piece.color.clone())));
        assert!(ops.contains(&Op::FillCircle(cx, cy, (geo.cell_size * 0.06).max(3.0))));
        assert!(!ops.contains(&Op::Alpha(TARGET_ALPHA)));
    }

    #[test]
    fn peek_shows_target_again() {
        let mut s = scattered();
        s.apply(PuzzleAction::Hint);
        assert_eq!(s.phase, Phase::Peeking);
        let rec = Recorder::default();
        draw_scene(&rec, &s);
        assert!(rec.ops().contains(&Op::Alpha(TARGET_ALPHA)));
        assert_eq!(rec.count(|op| matches!(op, Op::FillCircle(..))), 0);
    }

    #[test]
    fn zero_canvas_still_draws() {
        let mut s = scattered();
        s.apply(PuzzleAction::Resize { width: 0.0, height: 0.0 });
        let rec = Recorder::default();
        draw_scene(&rec, &s);
        assert!(rec.ops().contains(&Op::FillRect(0.0, 0.0, 0.0, 0.0)));
    }

    #[test]
    fn overlay_draws_skeleton_and_cursor() {
        let hand: Hand = (0..landmarks::COUNT)
            .map(|i| Landmark { x: i as f64 / 40.0, y: 0.5, z: 0.0 })
            .collect();
        let rec = Recorder::default();
        let pinch = PinchPoint { x: 10.0, y: 20.0, active: true };
        draw_overlay(&rec, 640.0, 480.0, &[hand], pinch);
        assert_eq!(rec.count(|op| *op == Op::Line), HAND_CONNECTIONS.len());
        assert_eq!(
            rec.count(|op| matches!(op, Op::FillCircle(_, _, r) if *r == 3.0)),
            landmarks::COUNT
        );
        assert_eq!(
            rec.count(|op| matches!(op, Op::FillCircle(x, y, _) if *x == 10.0 && *y == 20.0)),
            1
        );
    }

    #[test]
    fn overlay_without_hands_only_clears() {
        let rec = Recorder::default();
        draw_overlay(&rec, 640.0, 480.0, &[], PinchPoint::default());
        assert_eq!(rec.ops(), vec![Op::Clear(640.0, 480.0)]);
    }
}
