// Pinch-driven dragging of the round's piece
use crate::model::{Phase, PuzzleState};
use crate::state::PinchPoint;

/// Grab the piece under an active pinch, if nothing is held yet.
fn try_start_drag(state: &mut PuzzleState, pinch: PinchPoint) -> bool {
    if !pinch.active || state.dragging.is_some() || state.phase != Phase::Scattered {
        return false;
    }
    let cell = state.geometry().cell_at(pinch.x, pinch.y);
    match state.pieces.iter().position(|p| p.cell == cell) {
        Some(idx) => {
            log::debug!("drag start: piece {} at {:?}", idx, cell);
            state.dragging = Some(idx);
            true
        }
        None => false,
    }
}

/// Snap the held piece to the cell under the pinch; release it once the pinch opens.
fn update_drag(state: &mut PuzzleState, pinch: PinchPoint) -> bool {
    let Some(idx) = state.dragging else {
        return false;
    };
    if !pinch.active {
        log::debug!("drag end: piece {} rests at {:?}", idx, state.pieces.get(idx).map(|p| p.cell));
        state.dragging = None;
        return true;
    }
    let cell = state.geometry().cell_at(pinch.x, pinch.y);
    match state.pieces.get_mut(idx) {
        Some(piece) if piece.cell != cell => {
            piece.cell = cell;
            true
        }
        Some(_) => false,
        None => {
            state.dragging = None;
            true
        }
    }
}

/// One detector frame worth of drag handling. Returns whether anything changed.
pub fn apply_pinch(state: &mut PuzzleState, pinch: PinchPoint) -> bool {
    let started = try_start_drag(state, pinch);
    let moved = update_drag(state, pinch);
    started || moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cell, Piece, PuzzleAction};

    fn scattered_with_piece_at(cell: Cell) -> PuzzleState {
        let mut s = PuzzleState::default();
        s.apply(PuzzleAction::StartRound { seed: 1 });
        s.phase = Phase::Scattered;
        s.countdown = None;
        s.pieces = vec![Piece {
            cell,
            color: "red".into(),
            correct: Cell::new(0, 0),
        }];
        s
    }

    fn pinch_on(s: &PuzzleState, cell: Cell, active: bool) -> PinchPoint {
        let (x, y) = s.geometry().cell_center(cell);
        PinchPoint { x, y, active }
    }

    #[test]
    fn pinch_on_piece_starts_drag() {
        let mut s = scattered_with_piece_at(Cell::new(1, 1));
        let p = pinch_on(&s, Cell::new(1, 1), true);
        assert!(apply_pinch(&mut s, p));
        assert_eq!(s.dragging, Some(0));
    }

    #[test]
    fn pinch_on_empty_cell_does_nothing() {
        let mut s = scattered_with_piece_at(Cell::new(1, 1));
        let p = pinch_on(&s, Cell::new(3, 3), true);
        assert!(!apply_pinch(&mut s, p));
        assert_eq!(s.dragging, None);
        assert_eq!(s.pieces[0].cell, Cell::new(1, 1));
    }

    #[test]
    fn open_hand_never_grabs() {
        let mut s = scattered_with_piece_at(Cell::new(1, 1));
        let p = pinch_on(&s, Cell::new(1, 1), false);
        assert!(!apply_pinch(&mut s, p));
        assert_eq!(s.dragging, None);
    }

    #[test]
    fn no_grab_while_pattern_is_visible() {
        let mut s = scattered_with_piece_at(Cell::new(1, 1));
        s.phase = Phase::Peeking;
        let p = pinch_on(&s, Cell::new(1, 1), true);
        assert!(!apply_pinch(&mut s, p));
        s.phase = Phase::ShowingPattern;
        assert!(!apply_pinch(&mut s, p));
        assert_eq!(s.dragging, None);
    }

    #[test]
    fn held_piece_follows_pinch_and_stays_on_release() {
        let mut s = scattered_with_piece_at(Cell::new(1, 1));
        let grab = pinch_on(&s, Cell::new(1, 1), true);
        apply_pinch(&mut s, grab);
        let p = pinch_on(&s, Cell::new(4, 2), true);
        assert!(apply_pinch(&mut s, p));
        assert_eq!(s.pieces[0].cell, Cell::new(4, 2));
        // same cell again is not a change
        assert!(!apply_pinch(&mut s, p));
        let release = pinch_on(&s, Cell::new(0, 0), false);
        assert!(apply_pinch(&mut s, release));
        assert_eq!(s.dragging, None);
        assert_eq!(s.pieces[0].cell, Cell::new(4, 2));
    }

    #[test]
    fn pinch_off_grid_snaps_to_edge() {
        let mut s = scattered_with_piece_at(Cell::new(2, 2));
        let grab = pinch_on(&s, Cell::new(2, 2), true);
        apply_pinch(&mut s, grab);
        apply_pinch(&mut s, PinchPoint { x: -500.0, y: -500.0, active: true });
        assert_eq!(s.pieces[0].cell, Cell::new(0, 0));
    }
}
