//! Core types shared across the crate
//! This module contains pure data types and tuning constants with no
//! external dependencies.

/// Default board dimensions (columns x rows) used by the binary.
/// The board itself takes dimensions as constructor parameters.
pub const BOARD_WIDTH: usize = 6;
pub const BOARD_HEIGHT: usize = 12;

/// Fixed simulation rate. All timing below is expressed in ticks.
pub const TICKS_PER_SECOND: u32 = 60;

/// Rows risen per tick: one row every ten seconds at 60 ticks/sec.
pub const RISE_SPEED: f64 = (1.0 / 60.0) / 10.0;

/// Extra rise applied by a single lift, in rows.
pub const LIFT_SPEED: f64 = 16.0 / 60.0;

/// How many generated rows are kept precomputed ahead of the injection row.
pub const ROW_LOOKAHEAD: usize = 5;

/// Ticks a directional action must be held before it repeats.
pub const REPEAT_DELAY_TICKS: u32 = 16;

/// Stop-time awarded per qualifying combo, in ticks (one second).
pub const STOP_BONUS_TICKS: u32 = 60;
/// The first freeze of a spree is weighted this many times the base bonus.
pub const STOP_FIRST_MULTIPLIER: u32 = 5;
/// Upper bound on accumulated stop-time (99 seconds).
pub const MAX_STOP_TICKS: u32 = 60 * 99;

/// Number of distinct panel colors the row generator draws from.
pub const PANEL_COLOR_COUNT: u8 = 6;

/// Player actions, one effective per tick at most.
///
/// The ordinals are a stable public contract consumed by input bindings;
/// do not reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Action {
    Rest = 0,
    Up = 1,
    Down = 2,
    Left = 3,
    Right = 4,
    Swap1 = 5,
    Swap2 = 6,
    Lift = 7,
}

impl Action {
    /// Stable ordinal value of the action.
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Parse an action from its stable ordinal.
    pub fn from_ordinal(value: u8) -> Option<Self> {
        match value {
            0 => Some(Action::Rest),
            1 => Some(Action::Up),
            2 => Some(Action::Down),
            3 => Some(Action::Left),
            4 => Some(Action::Right),
            5 => Some(Action::Swap1),
            6 => Some(Action::Swap2),
            7 => Some(Action::Lift),
            _ => None,
        }
    }

    /// Swap1 and Swap2 are two bindings for the same intent and must be
    /// treated alike for repeat suppression and the board swap primitive.
    pub fn is_swap(self) -> bool {
        matches!(self, Action::Swap1 | Action::Swap2)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Rest => "rest",
            Action::Up => "up",
            Action::Down => "down",
            Action::Left => "left",
            Action::Right => "right",
            Action::Swap1 => "swap1",
            Action::Swap2 => "swap2",
            Action::Lift => "lift",
        }
    }
}

/// Color identifier produced by the row generator.
pub type PanelColor = u8;

/// Lifecycle tag on a panel. Freshly injected panels are `New`; the external
/// match logic promotes them (and owns the remaining states).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PanelKind {
    Normal = 0,
    New = 1,
}

/// One panel occupying a single grid cell. Owned exclusively by its cell;
/// swap and row-shift move it, injection replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panel {
    pub kind: PanelKind,
    pub color: PanelColor,
}

impl Panel {
    /// A freshly generated panel as produced by row injection.
    pub fn new_row(color: PanelColor) -> Self {
        Self {
            kind: PanelKind::New,
            color,
        }
    }
}

/// Board dimensions, fixed for the lifetime of a game instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

/// Cursor position on the grid. Row 0 is the bottom row; a higher row index
/// is visually higher. The cursor spans `(row, col)` and `(row, col + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorPos {
    pub row: usize,
    pub col: usize,
}

impl CursorPos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}
