//! Rising board tests - rise accumulation, row injection, stop time.

use std::cell::Cell;
use std::rc::Rc;

use tui_panels::core::{RiseConfig, RisingBoard, SeededRowGenerator};
use tui_panels::event::ComboEvent;
use tui_panels::types::{Panel, PanelKind, MAX_STOP_TICKS};

fn board(width: usize, height: usize, rise_speed: f64) -> RisingBoard {
    let generator = Box::new(SeededRowGenerator::new(width, 1));
    let config = RiseConfig {
        rise_speed,
        ..RiseConfig::default()
    };
    RisingBoard::new(width, height, generator, config)
}

fn normal_panel(color: u8) -> Panel {
    Panel {
        kind: PanelKind::Normal,
        color,
    }
}

#[test]
fn test_rise_offset_accumulates_per_tick() {
    let mut board = board(6, 12, 0.1);
    for tick in 1..=9 {
        board.tick();
        let expected = 0.1 * f64::from(tick);
        assert!((board.rise_offset() - expected).abs() < 1e-9);
        assert!(board.rise_offset() < 1.0);
    }
}

#[test]
fn test_frozen_board_does_not_rise() {
    let mut board = board(6, 12, 0.1);
    board.report_combo(ComboEvent::of_size(4, 1));
    board.tick(); // rises, then the combo freezes the board
    let offset = board.rise_offset();
    let stop = board.stop_ticks();
    assert!(stop > 0);

    for burned in 1..=10 {
        board.tick();
        assert_eq!(board.rise_offset(), offset, "frozen tick must not rise");
        assert_eq!(board.stop_ticks(), stop - burned);
    }
}

#[test]
fn test_active_board_does_not_rise_but_burns_no_stop() {
    let mut board = board(6, 12, 0.1);
    board.set_active(true);
    for _ in 0..10 {
        board.tick();
    }
    assert_eq!(board.rise_offset(), 0.0);

    board.set_active(false);
    board.tick();
    assert!(board.rise_offset() > 0.0);
}

#[test]
fn test_row_shift_moves_grid_up_and_fills_bottom() {
    let mut board = board(6, 12, 1.0);

    // Recognizable content on a few rows.
    for col in 0..6 {
        board.set_panel(0, col, Some(normal_panel(col as u8)));
        board.set_panel(1, col, Some(normal_panel(5 - col as u8)));
    }
    let before_row0: Vec<_> = (0..6).map(|c| board.panel(0, c)).collect();
    let before_row1: Vec<_> = (0..6).map(|c| board.panel(1, c)).collect();

    board.tick();

    // Every row r >= 1 now holds what r - 1 held before the shift.
    for col in 0..6 {
        assert_eq!(board.panel(1, col), before_row0[col]);
        assert_eq!(board.panel(2, col), before_row1[col]);
    }
    // Row 0 is freshly generated, all tagged as new.
    for col in 0..6 {
        let panel = board.panel(0, col).expect("injected row must be full");
        assert_eq!(panel.kind, PanelKind::New);
    }
    assert!(board.needs_check_matches());
    assert!(board.rise_offset() < 1.0);
}

#[test]
fn test_rise_speed_above_one_injects_multiple_rows() {
    let mut board = board(6, 12, 2.5);

    let rows = Rc::new(Cell::new(0u32));
    {
        let rows = Rc::clone(&rows);
        board.on_row().subscribe(move |_| rows.set(rows.get() + 1));
    }

    board.tick();
    assert_eq!(rows.get(), 2);
    assert!((board.rise_offset() - 0.5).abs() < 1e-9);

    board.tick();
    assert_eq!(rows.get(), 5); // 0.5 + 2.5 = 3 whole rows
    assert!(board.rise_offset() < 1.0);
}

#[test]
fn test_rise_event_fires_even_without_shift() {
    let mut board = board(6, 12, 0.1);

    let rises = Rc::new(Cell::new(0u32));
    {
        let rises = Rc::clone(&rises);
        board
            .on_rise()
            .subscribe(move |_| rises.set(rises.get() + 1));
    }

    for _ in 0..5 {
        board.tick();
    }
    assert_eq!(rises.get(), 5);

    // Frozen ticks fire no rise event.
    board.report_combo(ComboEvent::of_size(4, 1));
    board.tick();
    let after_freeze = rises.get();
    board.tick();
    assert_eq!(rises.get(), after_freeze);
}

#[test]
fn test_combo_stop_time_first_and_followup() {
    let mut board = board(6, 12, 0.0);

    board.report_combo(ComboEvent::of_size(4, 1));
    board.tick();
    assert_eq!(board.stop_ticks(), 300);

    // A follow-up while frozen adds one base bonus, not five. The tick
    // itself burns one stop tick before the combo lands.
    board.report_combo(ComboEvent::of_size(4, 1));
    board.tick();
    assert_eq!(board.stop_ticks(), 300 - 1 + 60);
}

#[test]
fn test_chain_qualifies_for_stop_time() {
    let mut board = board(6, 12, 0.0);
    board.report_combo(ComboEvent::of_size(3, 2));
    board.tick();
    assert_eq!(board.stop_ticks(), 300);
}

#[test]
fn test_plain_minimum_combo_earns_no_stop_time() {
    let mut board = board(6, 12, 0.0);
    board.report_combo(ComboEvent::of_size(3, 1));
    board.tick();
    assert_eq!(board.stop_ticks(), 0);
}

#[test]
fn test_stop_time_clamps_at_maximum() {
    let mut board = board(6, 12, 0.0);
    for _ in 0..120 {
        board.report_combo(ComboEvent::of_size(5, 2));
    }
    board.tick();
    assert_eq!(board.stop_ticks(), MAX_STOP_TICKS);
}

#[test]
fn test_combo_event_reaches_external_subscribers() {
    let mut board = board(6, 12, 0.0);

    let seen = Rc::new(Cell::new(0u32));
    {
        let seen = Rc::clone(&seen);
        board.on_combo().subscribe(move |combo| {
            seen.set(seen.get() + combo.first().unwrap().combo_size);
        });
    }

    board.report_combo(ComboEvent::of_size(4, 1));
    board.report_combo(ComboEvent::of_size(3, 1));
    board.tick();
    assert_eq!(seen.get(), 7);
}

#[test]
fn test_topout_fires_when_top_row_is_pushed_off() {
    let mut board = board(6, 12, 1.0);

    let topped = Rc::new(Cell::new(false));
    {
        let topped = Rc::clone(&topped);
        board.on_topout().subscribe(move |_| topped.set(true));
    }

    board.tick();
    assert!(!topped.get(), "empty top row is not a topout");

    board.set_panel(11, 3, Some(normal_panel(1)));
    board.tick();
    assert!(topped.get());
}

#[test]
fn test_lift_forces_partial_rise_and_cancels_stop() {
    let generator = Box::new(SeededRowGenerator::new(6, 1));
    let config = RiseConfig {
        rise_speed: 0.0,
        lift_speed: 0.25,
        ..RiseConfig::default()
    };
    let mut board = RisingBoard::new(6, 12, generator, config);

    board.report_combo(ComboEvent::of_size(4, 1));
    board.tick();
    assert!(board.stop_ticks() > 0);

    board.lift();
    assert_eq!(board.stop_ticks(), 0);
    assert!((board.rise_offset() - 0.25).abs() < 1e-9);

    // Enough lift accumulates into a real shift on the next tick.
    for _ in 0..3 {
        board.lift();
    }
    board.tick();
    assert!(board.panel(0, 0).is_some());
    assert!(board.rise_offset() < 1.0);
}

#[test]
fn test_raise_rows_prefills_stack() {
    let mut board = board(6, 12, 0.0);
    board.raise_rows(4);
    for row in 0..4 {
        for col in 0..6 {
            assert!(board.panel(row, col).is_some());
        }
    }
    for col in 0..6 {
        assert!(board.panel(4, col).is_none());
    }
}

#[test]
fn test_top_row_geometry() {
    let generator = Box::new(SeededRowGenerator::new(6, 1));
    let config = RiseConfig {
        rise_speed: 0.0,
        lift_speed: 2.5,
        ..RiseConfig::default()
    };
    let mut board = RisingBoard::new(6, 12, generator, config);

    assert_eq!(board.top_row(), 11);
    board.lift(); // rise_offset = 2.5
    assert_eq!(board.top_row(), 12 - 1 - 3);
}
