//! Cursor - held input to at-most-one board action per tick.
//!
//! Input bindings call `start_action`/`stop_action` on key transitions; the
//! repeat timing lives here, not at the device layer. The driver runs
//! `handle_action_phase` once per tick, strictly after the board's own
//! tick, because clamping depends on the post-rise geometry. The rise/row
//! handlers react to board events and keep the position inside the
//! playable region as it shrinks and scrolls.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::rising::RisingBoard;
use crate::event::{RiseEvent, RowEvent};
use crate::types::{Action, CursorPos, REPEAT_DELAY_TICKS};

/// Two-column player cursor with key-repeat state.
#[derive(Debug, Clone)]
pub struct Cursor {
    position: CursorPos,
    /// Desired action as set by the input bindings; single-action model,
    /// a new press overwrites any other held action.
    action: Action,
    last_action: Action,
    last_action_repeat: u32,
    /// Set on any effective position change; cleared only when a redraw
    /// consumes it via `take_moved`.
    moved: bool,
}

impl Cursor {
    pub fn new() -> Self {
        Self {
            position: CursorPos::default(),
            action: Action::Rest,
            last_action: Action::Rest,
            last_action_repeat: 0,
            moved: false,
        }
    }

    /// Subscribe the cursor's reactive handlers to the board's rise and row
    /// events. Delivery stays synchronous and in registration order; the
    /// payloads carry the post-rise geometry so the handlers never touch
    /// the board itself.
    pub fn attach(cursor: &Rc<RefCell<Cursor>>, board: &mut RisingBoard) {
        let on_rise = Rc::clone(cursor);
        board
            .on_rise()
            .subscribe(move |event| on_rise.borrow_mut().handle_rise(event));

        let on_row = Rc::clone(cursor);
        board
            .on_row()
            .subscribe(move |event| on_row.borrow_mut().handle_row(event));
    }

    pub fn position(&self) -> CursorPos {
        self.position
    }

    pub fn moved(&self) -> bool {
        self.moved
    }

    /// Read and clear the dirty flag. Call once per consumed redraw.
    pub fn take_moved(&mut self) -> bool {
        std::mem::take(&mut self.moved)
    }

    /// Begin holding `action`. Only one action is tracked at a time.
    pub fn start_action(&mut self, action: Action) {
        self.action = action;
    }

    /// Release `action`. A stale release of some other key must not cancel
    /// a newly pressed action, so the clear is conditional.
    pub fn stop_action(&mut self, action: Action) {
        if self.action == action {
            self.action = Action::Rest;
        }
    }

    /// Reposition directly. Fails (leaving everything untouched) outside
    /// the grid; on success the repeat state is reset.
    pub fn move_to(&mut self, board: &RisingBoard, row: usize, col: usize) -> bool {
        if !board.bounds(row, col) {
            return false;
        }
        self.position = CursorPos::new(row, col);
        self.moved = true;
        self.action = Action::Rest;
        self.last_action = Action::Rest;
        self.last_action_repeat = 0;
        true
    }

    /// Resolve and apply this tick's action. Runs once per tick, after the
    /// board has ticked.
    pub fn handle_action_phase(&mut self, board: &mut RisingBoard) {
        let mut action = self.action;

        if self.last_action == self.action {
            self.last_action_repeat = self.last_action_repeat.saturating_add(1);
            match action {
                // Continuous lift is intended; it fires every held tick.
                Action::Lift => {}
                // A swap requires a fresh press, never an auto-repeat.
                Action::Swap1 | Action::Swap2 => action = Action::Rest,
                _ => {
                    if self.last_action_repeat < REPEAT_DELAY_TICKS {
                        action = Action::Rest;
                    } else {
                        // The repeat fired; the next one waits a full window.
                        self.last_action_repeat = 0;
                    }
                }
            }
        } else {
            self.last_action = self.action;
            self.last_action_repeat = 0;
        }

        if action == Action::Rest {
            return;
        }

        let before = self.position;

        match action {
            // Row indices grow upward: Up is row + 1, Down is row - 1.
            Action::Up => self.position.row += 1,
            Action::Down => self.position.row = self.position.row.saturating_sub(1),
            Action::Left => self.position.col = self.position.col.saturating_sub(1),
            Action::Right => self.position.col += 1,
            Action::Swap1 | Action::Swap2 => {
                // Explicit: a deliberate player swap, not a cascade swap.
                let _ = board.swap(self.position.row, self.position.col, true);
            }
            Action::Lift => board.lift(),
            Action::Rest => unreachable!(),
        }

        self.clamp(board);

        if self.position != before {
            self.moved = true;
        }
    }

    /// React to rise progress: the playable region may have shrunk.
    pub fn handle_rise(&mut self, event: &RiseEvent) {
        if self.position.row > event.top_row {
            self.position.row = event.top_row;
            self.moved = true;
        }
    }

    /// React to a row injection: track the same physical row as the grid
    /// shifts up, then clamp to the (possibly shrunk) playable region.
    /// Runs once per injected row, several times a tick when needed.
    pub fn handle_row(&mut self, event: &RowEvent) {
        self.position.row += 1;
        if self.position.row > event.top_row {
            self.position.row = event.top_row;
        }
        self.moved = true;
    }

    /// Out-of-grid moves are not errors; they clamp silently. The column
    /// stops at width - 2 because the cursor spans two columns.
    fn clamp(&mut self, board: &RisingBoard) {
        self.position.row = self.position.row.min(board.top_row());
        self.position.col = self.position.col.min(board.width() - 2);
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::generator::SeededRowGenerator;
    use crate::core::rising::RiseConfig;

    fn test_board() -> RisingBoard {
        let generator = Box::new(SeededRowGenerator::new(6, 1));
        RisingBoard::new(6, 12, generator, RiseConfig::default())
    }

    #[test]
    fn test_stop_action_ignores_stale_release() {
        let mut cursor = Cursor::new();
        cursor.start_action(Action::Left);
        cursor.start_action(Action::Right); // overwrites

        cursor.stop_action(Action::Left); // stale release
        let mut board = test_board();
        cursor.handle_action_phase(&mut board);
        assert_eq!(cursor.position(), CursorPos::new(0, 1));
    }

    #[test]
    fn test_first_press_fires_immediately() {
        let mut cursor = Cursor::new();
        let mut board = test_board();
        cursor.start_action(Action::Up);
        cursor.handle_action_phase(&mut board);
        assert_eq!(cursor.position().row, 1);
    }

    #[test]
    fn test_down_left_clamp_at_origin() {
        let mut cursor = Cursor::new();
        let mut board = test_board();

        cursor.start_action(Action::Down);
        cursor.handle_action_phase(&mut board);
        assert_eq!(cursor.position(), CursorPos::new(0, 0));

        cursor.start_action(Action::Left);
        cursor.handle_action_phase(&mut board);
        assert_eq!(cursor.position(), CursorPos::new(0, 0));
        // Clamped moves are not effective moves.
        assert!(!cursor.take_moved());
    }

    #[test]
    fn test_right_clamps_to_two_column_span() {
        let mut cursor = Cursor::new();
        let mut board = test_board();
        for _ in 0..3 {
            // Re-press so each tick fires.
            cursor.start_action(Action::Rest);
            cursor.handle_action_phase(&mut board);
            cursor.start_action(Action::Right);
            cursor.handle_action_phase(&mut board);
        }
        // width 6: columns 0..=4 are valid cursor anchors.
        assert_eq!(cursor.position().col, 3);
        for _ in 0..5 {
            cursor.start_action(Action::Rest);
            cursor.handle_action_phase(&mut board);
            cursor.start_action(Action::Right);
            cursor.handle_action_phase(&mut board);
        }
        assert_eq!(cursor.position().col, 4);
    }

    #[test]
    fn test_move_to_bounds() {
        let mut cursor = Cursor::new();
        let board = test_board();

        assert!(!cursor.move_to(&board, 12, 0));
        assert_eq!(cursor.position(), CursorPos::new(0, 0));

        cursor.start_action(Action::Up);
        assert!(cursor.move_to(&board, 5, 3));
        assert_eq!(cursor.position(), CursorPos::new(5, 3));
        assert!(cursor.moved());
        // Repeat state was reset; the held action is forgotten.
        let mut board = test_board();
        cursor.handle_action_phase(&mut board);
        assert_eq!(cursor.position(), CursorPos::new(5, 3));
    }

    #[test]
    fn test_handle_row_tracks_shift() {
        let mut cursor = Cursor::new();
        cursor.position = CursorPos::new(4, 2);

        cursor.handle_row(&RowEvent { top_row: 11 });
        assert_eq!(cursor.position().row, 5);
        assert!(cursor.take_moved());

        // Clamps when the playable region is already tight.
        cursor.position.row = 11;
        cursor.handle_row(&RowEvent { top_row: 10 });
        assert_eq!(cursor.position().row, 10);
    }

    #[test]
    fn test_handle_rise_clamps_only_when_needed() {
        let mut cursor = Cursor::new();
        cursor.position = CursorPos::new(3, 0);

        cursor.handle_rise(&RiseEvent {
            rise_offset: 0.2,
            top_row: 10,
        });
        assert!(!cursor.take_moved());

        cursor.position.row = 11;
        cursor.handle_rise(&RiseEvent {
            rise_offset: 0.2,
            top_row: 10,
        });
        assert_eq!(cursor.position().row, 10);
        assert!(cursor.take_moved());
    }
}
