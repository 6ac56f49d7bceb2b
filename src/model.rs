//! Core data model for Pinch Recall.
//! One `PuzzleState` lives for the whole session and is reset at every round
//! start. All transitions go through `PuzzleAction` so the yew reducer, the
//! timers and the detector callback share one writer.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::Reducible;

use crate::config::GameConfig;
use crate::state::{GridGeometry, PinchPoint, apply_pinch};

/// Extra random draws allowed before the scatter falls back to a fixed neighbor.
pub const PLACEMENT_RETRIES: u32 = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
}

impl Cell {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// The cell flashed during the memorize phase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub cell: Cell,
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    /// Where the piece currently sits. Only the drag controller moves it.
    pub cell: Cell,
    pub color: String,
    /// Where the piece belongs. Fixed at scatter time.
    pub correct: Cell,
}

impl Piece {
    pub fn is_home(&self) -> bool {
        self.cell == self.correct
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Nothing started yet.
    Idle,
    /// Target visible: countdown, then the hold before scattering.
    ShowingPattern,
    /// Piece on the board, player may drag and submit.
    Scattered,
    /// Hint: target shown briefly over a scattered round.
    Peeking,
    /// Round won, next round pending.
    Advancing,
}

impl Phase {
    pub fn shows_pattern(self) -> bool {
        matches!(self, Phase::ShowingPattern | Phase::Peeking)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Waiting,
    Memorize,
    Relocate,
    Success,
    Failure,
}

impl Status {
    pub fn message(self) -> &'static str {
        match self {
            Status::Waiting => "",
            Status::Memorize => "Memorize the position...",
            Status::Relocate => "Move the square back to where it was",
            Status::Success => "Done! Moving on to the next level!",
            Status::Failure => "Not quite, try again!",
        }
    }
}

/// Uniform cell on an `n`x`n` grid.
fn random_cell<R: Rng>(grid_size: u32, rng: &mut R) -> Cell {
    let n = grid_size.max(1);
    Cell::new(rng.random_range(0..n), rng.random_range(0..n))
}

/// Neighbor used when random placement keeps hitting the target: one step
/// down/right, or up/left where that would leave the grid.
pub fn fallback_cell(target: Cell, grid_size: u32) -> Cell {
    let step = |v: u32| {
        if v + 1 < grid_size {
            v + 1
        } else {
            v.saturating_sub(1)
        }
    };
    Cell::new(step(target.row), step(target.col))
}

/// Scatter policy: random cells until one differs from the target, with at
/// most `PLACEMENT_RETRIES` redraws, then `fallback_cell`.
pub fn place_piece<R: Rng>(target: Cell, grid_size: u32, rng: &mut R) -> Cell {
    place_piece_with(target, grid_size, |n| rng.random_range(0..n))
}

/// `place_piece` with the coordinate source injected; `draw(n)` must return a value in `0..n`.
pub fn place_piece_with(target: Cell, grid_size: u32, mut draw: impl FnMut(u32) -> u32) -> Cell {
    let n = grid_size.max(1);
    let mut tries = 0;
    loop {
        let row = draw(n);
        let col = draw(n);
        let cell = Cell::new(row, col);
        if cell != target {
            return cell;
        }
        tries += 1;
        if tries > PLACEMENT_RETRIES {
            return fallback_cell(target, n);
        }
    }
}

// ---------------- Reducer & Actions -----------------
#[derive(Clone, Debug, PartialEq)]
pub enum PuzzleAction {
    Resize { width: f64, height: f64 },
    StartRound { seed: u64 },
    CountdownTick { round: u64 },
    Scatter { round: u64, seed: u64 },
    Check,
    NextRound { round: u64, seed: u64 },
    Hint,
    HintEnd { round: u64 },
    Pinch(PinchPoint),
}

/// Timer-driven step the game flow is waiting on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowStep {
    CountdownTick,
    Scatter,
    HintEnd,
    NextRound,
}

impl FlowStep {
    pub fn into_action(self, round: u64, seed: u64) -> PuzzleAction {
        match self {
            FlowStep::CountdownTick => PuzzleAction::CountdownTick { round },
            FlowStep::Scatter => PuzzleAction::Scatter { round, seed },
            FlowStep::HintEnd => PuzzleAction::HintEnd { round },
            FlowStep::NextRound => PuzzleAction::NextRound { round, seed },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PuzzleState {
    pub config: Rc<GameConfig>,
    /// 1-based; only ever goes up.
    pub level: u32,
    pub grid_size: u32,
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Bumped on every round start; timer actions carrying an older value are dropped.
    pub round: u64,
    pub phase: Phase,
    /// Number currently shown by the countdown; `None` once it has run out.
    pub countdown: Option<u8>,
    pub target: Option<Target>,
    pub pieces: Vec<Piece>,
    /// Index into `pieces` of the piece following the pinch.
    pub dragging: Option<usize>,
    pub status: Status,
    /// Incremented on every accepted action (drives redraws).
    pub version: u64,
}

impl Default for PuzzleState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl PuzzleState {
    pub fn new(config: GameConfig) -> Self {
        let grid_size = config.grid_size_for_level(1);
        let (width, height) = (config.fallback_width as f64, config.fallback_height as f64);
        Self {
            config: Rc::new(config),
            level: 1,
            grid_size,
            canvas_width: width,
            canvas_height: height,
            round: 0,
            phase: Phase::Idle,
            countdown: None,
            target: None,
            pieces: Vec::new(),
            dragging: None,
            status: Status::Waiting,
            version: 0,
        }
    }

    pub fn geometry(&self) -> GridGeometry {
        GridGeometry::compute(self.canvas_width, self.canvas_height, self.grid_size)
    }

    pub fn piece(&self) -> Option<&Piece> {
        self.pieces.first()
    }

    /// Next timed step and its delay in milliseconds, if the flow is waiting on one.
    pub fn pending_step(&self) -> Option<(FlowStep, u32)> {
        let cfg = &self.config;
        match self.phase {
            Phase::ShowingPattern => match self.countdown {
                Some(n) if n == cfg.countdown_ticks => Some((
                    FlowStep::CountdownTick,
                    cfg.countdown_tick_ms + cfg.countdown_fade_ms,
                )),
                Some(_) => Some((FlowStep::CountdownTick, cfg.countdown_tick_ms)),
                None => Some((FlowStep::Scatter, cfg.pattern_hold_ms)),
            },
            Phase::Peeking => Some((FlowStep::HintEnd, cfg.hint_peek_ms)),
            Phase::Advancing => Some((FlowStep::NextRound, cfg.level_advance_ms)),
            Phase::Idle | Phase::Scattered => None,
        }
    }

    fn begin_round(&mut self, seed: u64) {
        let mut rng = SmallRng::seed_from_u64(seed);
        self.round += 1;
        self.phase = Phase::ShowingPattern;
        let ticks = self.config.countdown_ticks;
        self.countdown = (ticks > 0).then_some(ticks);
        self.dragging = None;
        self.pieces.clear();
        self.target = Some(Target {
            cell: random_cell(self.grid_size, &mut rng),
            color: self.config.piece_color.clone(),
        });
        self.status = Status::Memorize;
        log::info!(
            "round {} (level {}, grid {}): target {:?}",
            self.round,
            self.level,
            self.grid_size,
            self.target.as_ref().map(|t| t.cell)
        );
    }

    fn scatter(&mut self, seed: u64) {
        let Some(target) = self.target.clone() else {
            return;
        };
        let mut rng = SmallRng::seed_from_u64(seed);
        let cell = place_piece(target.cell, self.grid_size, &mut rng);
        self.pieces = vec![Piece {
            cell,
            color: target.color,
            correct: target.cell,
        }];
        self.phase = Phase::Scattered;
        self.status = Status::Relocate;
        log::info!("round {}: piece scattered to {:?}", self.round, cell);
    }

    fn check(&mut self) -> bool {
        let Some((home, cell)) = self.piece().map(|p| (p.is_home(), p.cell)) else {
            return false;
        };
        if home {
            self.level += 1;
            self.grid_size = self.config.grid_size_for_level(self.level);
            self.dragging = None;
            self.phase = Phase::Advancing;
            self.status = Status::Success;
            log::info!("round {} cleared, advancing to level {}", self.round, self.level);
        } else {
            self.status = Status::Failure;
            log::info!("round {}: wrong cell {:?}", self.round, cell);
        }
        true
    }

    /// Apply one action. Returns `false` when the action was ignored and
    /// nothing changed.
    pub fn apply(&mut self, action: PuzzleAction) -> bool {
        use PuzzleAction::*;
        let current = self.round;
        let accepted = match action {
            Resize { width, height } => {
                if width == self.canvas_width && height == self.canvas_height {
                    false
                } else {
                    self.canvas_width = width.max(0.0);
                    self.canvas_height = height.max(0.0);
                    true
                }
            }
            StartRound { seed } => {
                self.begin_round(seed);
                true
            }
            NextRound { round, seed } if round == current && self.phase == Phase::Advancing => {
                self.begin_round(seed);
                true
            }
            CountdownTick { round } if round == current && self.phase == Phase::ShowingPattern => {
                match self.countdown {
                    Some(n) => {
                        self.countdown = n.checked_sub(1).filter(|left| *left > 0);
                        true
                    }
                    None => false,
                }
            }
            Scatter { round, seed }
                if round == current
                    && self.phase == Phase::ShowingPattern
                    && self.countdown.is_none() =>
            {
                self.scatter(seed);
                true
            }
            Check if matches!(self.phase, Phase::Scattered | Phase::Peeking) => self.check(),
            Hint if self.phase == Phase::Scattered => {
                self.dragging = None;
                self.phase = Phase::Peeking;
                true
            }
            HintEnd { round } if round == current && self.phase == Phase::Peeking => {
                self.phase = Phase::Scattered;
                true
            }
            Pinch(pinch) => apply_pinch(self, pinch),
            other => {
                log::debug!("ignored {:?} in {:?} (round {})", other, self.phase, current);
                false
            }
        };
        if accepted {
            self.version = self.version.wrapping_add(1);
        }
        accepted
    }
}

impl Reducible for PuzzleState {
    type Action = PuzzleAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut new = (*self).clone();
        if new.apply(action) {
            Rc::new(new)
        } else {
            self
        }
    }
}
