//! Row generation for the rising board.
//!
//! The board asks its generator for the next row's colors on every shift
//! and keeps a small fixed lookahead so previews (and external UIs) can
//! see what is coming. The actual distribution is a collaborator concern;
//! the seeded default here is deterministic and never hands the board a
//! row that already contains a horizontal three-in-a-row.

use arrayvec::ArrayVec;

use crate::types::{PanelColor, PANEL_COLOR_COUNT, ROW_LOOKAHEAD};

/// Maximum lookahead depth the default generator supports.
pub const MAX_LOOKAHEAD: usize = 8;

/// Source of injected row contents.
pub trait RowGenerator {
    /// Advance to the next row, keeping `lookahead` rows precomputed.
    fn generate(&mut self, lookahead: usize);

    /// The row the board will inject next; length equals the board width.
    fn current(&self) -> &[PanelColor];
}

/// Simple LCG (Numerical Recipes constants), deterministic per seed.
#[derive(Debug, Clone)]
struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }
}

/// Deterministic seeded row generator with bounded lookahead.
#[derive(Debug, Clone)]
pub struct SeededRowGenerator {
    width: usize,
    rng: SimpleRng,
    current: Vec<PanelColor>,
    pending: ArrayVec<Vec<PanelColor>, MAX_LOOKAHEAD>,
}

impl SeededRowGenerator {
    pub fn new(width: usize, seed: u32) -> Self {
        let mut generator = Self {
            width,
            rng: SimpleRng::new(seed),
            current: Vec::new(),
            pending: ArrayVec::new(),
        };
        generator.generate(ROW_LOOKAHEAD);
        generator
    }

    fn make_row(&mut self) -> Vec<PanelColor> {
        let mut row = Vec::with_capacity(self.width);
        for col in 0..self.width {
            let mut color = self.rng.next_range(u32::from(PANEL_COLOR_COUNT)) as PanelColor;
            // Re-roll while this color would complete a horizontal triple.
            while col >= 2 && row[col - 1] == color && row[col - 2] == color {
                color = self.rng.next_range(u32::from(PANEL_COLOR_COUNT)) as PanelColor;
            }
            row.push(color);
        }
        row
    }

    /// Upcoming rows, nearest first (preview surface for UIs).
    pub fn pending(&self) -> &[Vec<PanelColor>] {
        &self.pending
    }
}

impl RowGenerator for SeededRowGenerator {
    fn generate(&mut self, lookahead: usize) {
        // At least one row must exist to become `current`.
        let lookahead = lookahead.clamp(1, MAX_LOOKAHEAD);
        while self.pending.len() < lookahead {
            let row = self.make_row();
            self.pending.push(row);
        }
        self.current = self.pending.remove(0);
    }

    fn current(&self) -> &[PanelColor] {
        &self.current
    }
}
