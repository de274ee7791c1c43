//! Terminal rising-panels runner.
//!
//! Fixed-tick driver: poll input until the tick deadline, tick the board
//! (events reach the cursor synchronously), then run the cursor's action
//! phase against the post-rise geometry. Redraws happen only when the rise
//! event or the cursor marked the frame dirty.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tui_panels::core::{Cursor, RiseConfig, RisingBoard, SeededRowGenerator};
use tui_panels::input::{should_quit, KeyTracker, Transition};
use tui_panels::term::TerminalRenderer;
use tui_panels::types::{BOARD_HEIGHT, BOARD_WIDTH, TICKS_PER_SECOND};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let seed = std::process::id();
    let generator = Box::new(SeededRowGenerator::new(BOARD_WIDTH, seed));
    let mut board = RisingBoard::new(BOARD_WIDTH, BOARD_HEIGHT, generator, RiseConfig::default());

    let cursor = Rc::new(RefCell::new(Cursor::new()));
    Cursor::attach(&cursor, &mut board);

    // External listeners: redraw on rise progress, end the session on topout.
    let dirty = Rc::new(Cell::new(true));
    {
        let dirty = Rc::clone(&dirty);
        board.on_rise().subscribe(move |_| dirty.set(true));
    }
    let topped_out = Rc::new(Cell::new(false));
    {
        let topped_out = Rc::clone(&topped_out);
        board.on_topout().subscribe(move |_| topped_out.set(true));
    }

    // Starter stack, then park the cursor mid-board.
    board.raise_rows(4);
    cursor
        .borrow_mut()
        .move_to(&board, 2, (BOARD_WIDTH - 2) / 2);

    let mut tracker = KeyTracker::new();
    let tick_duration = Duration::from_nanos(1_000_000_000 / u64::from(TICKS_PER_SECOND));
    let mut last_tick = Instant::now();

    loop {
        if dirty.take() || cursor.borrow().moved() {
            let _ = cursor.borrow_mut().take_moved();
            term.draw(&board, &cursor.borrow())?;
        }

        // Input with timeout until the next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        // Terminal auto-repeat only refreshes the hold; the
                        // cursor owns game-logic repeat timing.
                        if key.kind == KeyEventKind::Press && should_quit(key) {
                            return Ok(());
                        }
                        apply_transitions(
                            &cursor,
                            tracker.press(key.code, Instant::now()),
                        );
                    }
                    KeyEventKind::Release => {
                        if let Some(stop) = tracker.release(key.code) {
                            apply_transitions(&cursor, vec![stop]);
                        }
                    }
                }
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            if let Some(stop) = tracker.poll(Instant::now()) {
                apply_transitions(&cursor, vec![stop]);
            }

            board.tick();
            cursor.borrow_mut().handle_action_phase(&mut board);

            if topped_out.get() {
                return Ok(());
            }
        }
    }
}

fn apply_transitions(cursor: &Rc<RefCell<Cursor>>, transitions: Vec<Transition>) {
    let mut cursor = cursor.borrow_mut();
    for transition in transitions {
        match transition {
            Transition::Start(action) => cursor.start_action(action),
            Transition::Stop(action) => cursor.stop_action(action),
        }
    }
}
