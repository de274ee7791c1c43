//! Board module - manages the panel grid
//!
//! The base board owns panel storage and the swap primitive, and transports
//! combo reports from the external match/clear logic to its subscribers.
//! Coordinates: (row, col) with row 0 at the bottom (the injection row) and
//! row height-1 at the top. Out-of-range access through `panel`/`set_panel`
//! is a programming-contract violation and panics; callers that may be out
//! of range check `bounds` first.

use crate::event::{ComboEvent, Event};
use crate::types::{Dimensions, Panel};

/// Base panel grid plus the per-tick collaborator surface.
#[derive(Debug)]
pub struct Board {
    dimensions: Dimensions,
    /// Flat array of cells, row-major (row * width + col), row 0 first.
    panels: Vec<Option<Panel>>,
    /// While true, a clear/landing animation is in progress and rising
    /// pauses. Owned by the external match logic.
    active: bool,
    /// Set whenever the grid geometry changed in a way that may have
    /// created matches; consumed by the external match logic.
    needs_check_matches: bool,
    /// True when the last swap was a deliberate player swap rather than an
    /// automatic one; the match logic reads it when assigning chain indices.
    last_swap_explicit: bool,
    /// Combos reported since the previous tick, delivered on `run_tick`.
    pending_combos: Vec<ComboEvent>,
    on_combo: Event<ComboEvent>,
}

impl Board {
    /// Create an empty board. The cursor spans two columns, so a playable
    /// board is at least 2x2.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width >= 2 && height >= 2, "board must be at least 2x2");
        Self {
            dimensions: Dimensions { width, height },
            panels: vec![None; width * height],
            active: false,
            needs_check_matches: false,
            last_swap_explicit: false,
            pending_combos: Vec::new(),
            on_combo: Event::new(),
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn width(&self) -> usize {
        self.dimensions.width
    }

    pub fn height(&self) -> usize {
        self.dimensions.height
    }

    /// True when (row, col) addresses a cell on the grid.
    pub fn bounds(&self, row: usize, col: usize) -> bool {
        row < self.dimensions.height && col < self.dimensions.width
    }

    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> usize {
        assert!(self.bounds(row, col), "cell ({row}, {col}) out of bounds");
        row * self.dimensions.width + col
    }

    /// Panel at (row, col), or None for an empty cell.
    pub fn panel(&self, row: usize, col: usize) -> Option<Panel> {
        self.panels[self.index(row, col)]
    }

    /// Place (or clear, with `None`) the panel at (row, col).
    pub fn set_panel(&mut self, row: usize, col: usize, panel: Option<Panel>) {
        let idx = self.index(row, col);
        self.panels[idx] = panel;
    }

    /// Two-panel swap primitive: exchanges (row, col) with (row, col + 1).
    /// The second panel is implied by the first, matching the two-column
    /// cursor. `explicit` distinguishes a deliberate player swap from an
    /// automatic/cascade swap. Returns false when either cell is off-grid.
    pub fn swap(&mut self, row: usize, col: usize, explicit: bool) -> bool {
        if !self.bounds(row, col) || !self.bounds(row, col + 1) {
            return false;
        }
        let a = self.index(row, col);
        let b = self.index(row, col + 1);
        self.panels.swap(a, b);
        self.needs_check_matches = true;
        self.last_swap_explicit = explicit;
        true
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn needs_check_matches(&self) -> bool {
        self.needs_check_matches
    }

    pub fn set_needs_check_matches(&mut self, value: bool) {
        self.needs_check_matches = value;
    }

    pub fn last_swap_explicit(&self) -> bool {
        self.last_swap_explicit
    }

    /// Entry point for the external match/clear logic: queue a combo for
    /// delivery on the next `run_tick`.
    pub fn report_combo(&mut self, combo: ComboEvent) {
        self.pending_combos.push(combo);
    }

    /// Subscribe to combo reports. Subscribers run synchronously during
    /// `run_tick`, in registration order.
    pub fn on_combo(&mut self) -> &mut Event<ComboEvent> {
        &mut self.on_combo
    }

    /// Per-tick seam for the board's own match/clear/landing simulation.
    /// The detection internals live outside this crate; this call delivers
    /// the combos reported since the previous tick to subscribers and
    /// returns them so the owner can react (stop-time extension).
    pub fn run_tick(&mut self) -> Vec<ComboEvent> {
        let combos = std::mem::take(&mut self.pending_combos);
        for combo in &combos {
            self.on_combo.fire(combo);
        }
        combos
    }

    /// Count of occupied cells, handy for asserting shift conservation.
    #[cfg(test)]
    pub fn occupied(&self) -> usize {
        self.panels.iter().filter(|cell| cell.is_some()).count()
    }
}
