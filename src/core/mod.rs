//! Core module - pure simulation logic with no terminal dependencies
//!
//! Board storage, the rising-board state machine, the cursor, and row
//! generation live here. Rendering and key handling do not.

pub mod board;
pub mod cursor;
pub mod generator;
pub mod rising;

// Re-export commonly used types
pub use board::Board;
pub use cursor::Cursor;
pub use generator::{RowGenerator, SeededRowGenerator};
pub use rising::{RiseConfig, RisingBoard};
