//! TerminalRenderer: draws the board and cursor to a real terminal.
//!
//! Full redraws only; the board is small enough that diffing buys nothing
//! here. The renderer reads state, never mutates it — the `moved` flag is
//! consumed by the driver, which decides when to call `draw`.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::core::{Cursor, RisingBoard};
use crate::types::{PanelColor, PanelKind};

pub struct TerminalRenderer {
    stdout: io::Stdout,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Redraw the whole frame: grid (top row first), cursor brackets, and
    /// a status line.
    pub fn draw(&mut self, board: &RisingBoard, cursor: &Cursor) -> Result<()> {
        self.stdout
            .queue(terminal::Clear(terminal::ClearType::All))?;

        let height = board.height();
        let pos = cursor.position();

        for screen_y in 0..height {
            // Row indices grow upward; the screen draws top-down.
            let row = height - 1 - screen_y;
            self.stdout.queue(cursor::MoveTo(0, screen_y as u16))?;

            for col in 0..board.width() {
                let (left, right) = cursor_brackets(pos.row, pos.col, row, col);
                match board.panel(row, col) {
                    Some(panel) => {
                        self.stdout.queue(SetForegroundColor(panel_color(
                            panel.color,
                            panel.kind == PanelKind::New,
                        )))?;
                        self.stdout.queue(Print(format!("{left}#{right}")))?;
                        self.stdout.queue(ResetColor)?;
                    }
                    None => {
                        self.stdout.queue(Print(format!("{left}.{right}")))?;
                    }
                }
            }
        }

        self.stdout.queue(cursor::MoveTo(0, height as u16 + 1))?;
        self.stdout.queue(Print(format!(
            "rise {:.2}  stop {:>4}  [wasd/arrows move, z/x swap, space lift, q quit]",
            board.rise_offset(),
            board.stop_ticks(),
        )))?;

        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn cursor_brackets(
    cursor_row: usize,
    cursor_col: usize,
    row: usize,
    col: usize,
) -> (char, char) {
    if row == cursor_row && col == cursor_col {
        ('[', ' ')
    } else if row == cursor_row && col == cursor_col + 1 {
        (' ', ']')
    } else {
        (' ', ' ')
    }
}

fn panel_color(color: PanelColor, is_new: bool) -> Color {
    if is_new {
        // Injection-row panels render dimmed until they settle.
        return Color::DarkGrey;
    }
    match color % 6 {
        0 => Color::Red,
        1 => Color::Green,
        2 => Color::Yellow,
        3 => Color::Blue,
        4 => Color::Magenta,
        _ => Color::Cyan,
    }
}
