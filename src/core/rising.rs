//! Rising board - continuous upward scroll resolved into discrete rows.
//!
//! Each tick the board either burns one tick of stop-time or (while no
//! clear/landing animation is active) accumulates fractional rise. Whole
//! rows of accumulated rise shift the entire grid up and inject a freshly
//! generated bottom row. Noteworthy combos reported by the match logic
//! extend stop-time, freezing the rise as a reward.

use std::fmt;

use crate::core::board::Board;
use crate::core::generator::RowGenerator;
use crate::event::{ComboEvent, Event, RiseEvent, RowEvent, TopoutEvent};
use crate::types::{
    Dimensions, Panel, LIFT_SPEED, MAX_STOP_TICKS, RISE_SPEED, ROW_LOOKAHEAD, STOP_BONUS_TICKS,
    STOP_FIRST_MULTIPLIER,
};

/// Injected tuning knobs. Difficulty curves live outside this crate; both
/// speeds are rows per tick and therefore tick-rate independent.
#[derive(Debug, Clone, Copy)]
pub struct RiseConfig {
    pub rise_speed: f64,
    pub lift_speed: f64,
    pub row_lookahead: usize,
}

impl Default for RiseConfig {
    fn default() -> Self {
        Self {
            rise_speed: RISE_SPEED,
            lift_speed: LIFT_SPEED,
            row_lookahead: ROW_LOOKAHEAD,
        }
    }
}

/// Base board extended with rise/stop-time simulation and row injection.
pub struct RisingBoard {
    base: Board,
    config: RiseConfig,
    generator: Box<dyn RowGenerator>,
    /// Sub-row rise progress; renormalized below 1 by the shift loop.
    rise_offset: f64,
    /// While > 0, rising is frozen; one tick burns one unit.
    stop_ticks: u32,
    on_rise: Event<RiseEvent>,
    on_row: Event<RowEvent>,
    on_topout: Event<TopoutEvent>,
}

impl fmt::Debug for RisingBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RisingBoard")
            .field("base", &self.base)
            .field("config", &self.config)
            .field("rise_offset", &self.rise_offset)
            .field("stop_ticks", &self.stop_ticks)
            .finish_non_exhaustive()
    }
}

impl RisingBoard {
    pub fn new(
        width: usize,
        height: usize,
        generator: Box<dyn RowGenerator>,
        config: RiseConfig,
    ) -> Self {
        Self {
            base: Board::new(width, height),
            config,
            generator,
            rise_offset: 0.0,
            stop_ticks: 0,
            on_rise: Event::new(),
            on_row: Event::new(),
            on_topout: Event::new(),
        }
    }

    /// Advance the simulation by one fixed tick.
    ///
    /// Order within the tick is part of the contract: stop-time/rise and
    /// any row shifts complete (with their events delivered synchronously)
    /// before the base board's own simulation and combo delivery, and the
    /// driver runs the cursor's action phase only after this call returns.
    pub fn tick(&mut self) {
        if self.stop_ticks > 0 {
            self.stop_ticks -= 1;
        } else if !self.base.active() {
            self.rise_offset += self.config.rise_speed;
            // More than one row can inject per tick when rise_speed > 1.
            while self.rise_offset >= 1.0 {
                self.rise_offset -= 1.0;
                self.shift_rows();
            }
            let event = RiseEvent {
                rise_offset: self.rise_offset,
                top_row: self.top_row(),
            };
            self.on_rise.fire(&event);
        }

        let combos = self.base.run_tick();
        for combo in &combos {
            self.handle_combo(combo);
        }
    }

    /// One discrete row shift: move the whole grid up a row and inject a
    /// generated row at the bottom.
    fn shift_rows(&mut self) {
        let Dimensions { width, height } = self.base.dimensions();

        // The top row is about to be pushed off the board; panels there
        // mean the rise overflowed the playable space.
        let topout = (0..width).any(|col| self.base.panel(height - 1, col).is_some());

        // Top-down so lower rows are read before being overwritten.
        // Reversing this order corrupts the grid.
        for row in (1..height).rev() {
            for col in 0..width {
                let below = self.base.panel(row - 1, col);
                self.base.set_panel(row, col, below);
            }
        }

        for (col, &color) in self.generator.current().iter().enumerate() {
            self.base.set_panel(0, col, Some(Panel::new_row(color)));
        }
        self.base.set_needs_check_matches(true);
        self.generator.generate(self.config.row_lookahead);

        let event = RowEvent {
            top_row: self.top_row(),
        };
        self.on_row.fire(&event);

        if topout {
            self.on_topout.fire(&TopoutEvent);
        }
    }

    /// Extend stop-time for a good combo (more than three panels) or any
    /// multi-step chain. The first freeze of a spree is weighted heavier;
    /// follow-ups only add single increments so chains cannot freeze the
    /// board forever.
    fn handle_combo(&mut self, combo: &ComboEvent) {
        let Some(first) = combo.first() else {
            return;
        };
        if first.combo_size > 3 || first.chain_index > 1 {
            let multiplier = if self.stop_ticks == 0 {
                STOP_FIRST_MULTIPLIER
            } else {
                1
            };
            self.stop_ticks = (self.stop_ticks + STOP_BONUS_TICKS * multiplier).min(MAX_STOP_TICKS);
        }
    }

    /// Force an immediate partial rise. Cancels any stop-time; the next
    /// tick's shift loop normalizes the accumulator.
    pub fn lift(&mut self) {
        self.stop_ticks = 0;
        self.rise_offset += self.config.lift_speed;
    }

    /// Inject `n` rows immediately. Session setup and tests.
    pub fn raise_rows(&mut self, n: usize) {
        for _ in 0..n {
            self.shift_rows();
        }
    }

    /// Highest currently-playable row given current rise progress.
    pub fn top_row(&self) -> usize {
        (self.base.height() - 1).saturating_sub(self.rise_offset.ceil() as usize)
    }

    pub fn rise_offset(&self) -> f64 {
        self.rise_offset
    }

    pub fn stop_ticks(&self) -> u32 {
        self.stop_ticks
    }

    pub fn on_rise(&mut self) -> &mut Event<RiseEvent> {
        &mut self.on_rise
    }

    pub fn on_row(&mut self) -> &mut Event<RowEvent> {
        &mut self.on_row
    }

    pub fn on_topout(&mut self) -> &mut Event<TopoutEvent> {
        &mut self.on_topout
    }

    // Base-board surface, delegated.

    pub fn dimensions(&self) -> Dimensions {
        self.base.dimensions()
    }

    pub fn width(&self) -> usize {
        self.base.width()
    }

    pub fn height(&self) -> usize {
        self.base.height()
    }

    pub fn bounds(&self, row: usize, col: usize) -> bool {
        self.base.bounds(row, col)
    }

    pub fn panel(&self, row: usize, col: usize) -> Option<Panel> {
        self.base.panel(row, col)
    }

    pub fn set_panel(&mut self, row: usize, col: usize, panel: Option<Panel>) {
        self.base.set_panel(row, col, panel);
    }

    pub fn swap(&mut self, row: usize, col: usize, explicit: bool) -> bool {
        self.base.swap(row, col, explicit)
    }

    pub fn active(&self) -> bool {
        self.base.active()
    }

    pub fn set_active(&mut self, active: bool) {
        self.base.set_active(active);
    }

    pub fn needs_check_matches(&self) -> bool {
        self.base.needs_check_matches()
    }

    pub fn set_needs_check_matches(&mut self, value: bool) {
        self.base.set_needs_check_matches(value);
    }

    pub fn report_combo(&mut self, combo: ComboEvent) {
        self.base.report_combo(combo);
    }

    pub fn on_combo(&mut self) -> &mut Event<ComboEvent> {
        self.base.on_combo()
    }
}
