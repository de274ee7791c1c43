//! tui-panels: deterministic rising-block puzzle simulation core.
//!
//! The core is tick-driven and frame-rate independent: an external driver
//! calls [`core::RisingBoard::tick`] once per fixed tick, delivers the
//! board's events to the [`core::Cursor`], then runs the cursor's action
//! phase. The `input` and `term` modules are the terminal glue used by the
//! bundled binary; the simulation itself performs no I/O.

pub mod core;
pub mod event;
pub mod input;
pub mod term;
pub mod types;

pub use crate::core::{Cursor, RiseConfig, RisingBoard, RowGenerator, SeededRowGenerator};
pub use crate::event::{ComboEvent, ComboPanel, Event, RiseEvent, RowEvent, TopoutEvent};
pub use crate::types::Action;
