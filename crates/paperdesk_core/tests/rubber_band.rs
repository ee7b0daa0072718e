use chrono::{TimeZone, Utc};
use paperdesk_core::{
    BoardConfig, BoardEngine, FixedJitter, ManualClock, NoteId, PaperColor, Point, PointerTarget,
    Rect, Size,
};

const BOARD: Size = Size::new(1200.0, 900.0);

fn engine() -> BoardEngine<FixedJitter, ManualClock> {
    let start = Utc.with_ymd_and_hms(2025, 5, 20, 9, 0, 0).unwrap();
    BoardEngine::with_sources(
        BoardConfig::default(),
        FixedJitter(0.0),
        ManualClock::starting_at(start),
    )
}

fn place(
    board: &mut BoardEngine<FixedJitter, ManualClock>,
    text: &str,
    at: Point,
) -> NoteId {
    let id = board.create_note(text, PaperColor::Yellow, BOARD).unwrap().id;
    board.update_position(id, at, Point::new(600.0, 400.0), Point::default());
    id
}

#[test]
fn box_selects_overlapping_notes_only() {
    let mut board = engine();
    let near = place(&mut board, "near", Point::new(50.0, 50.0));
    let far = place(&mut board, "far", Point::new(200.0, 200.0));

    assert!(board.begin_selection(Point::new(0.0, 0.0), PointerTarget::Background));
    let rect = board.update_selection(Point::new(100.0, 100.0));

    assert_eq!(rect, Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
    assert!(board.note(near).unwrap().is_selected);
    assert!(!board.note(far).unwrap().is_selected);
}

#[test]
fn edge_contact_is_not_selection() {
    let mut board = engine();
    let touching = place(&mut board, "touching", Point::new(100.0, 0.0));

    board.begin_selection(Point::new(0.0, 0.0), PointerTarget::Background);
    board.update_selection(Point::new(100.0, 100.0));

    assert!(!board.note(touching).unwrap().is_selected);
}

#[test]
fn large_notes_use_larger_footprint() {
    let mut board = engine();
    let large = board
        .create_note("l".repeat(60), PaperColor::Blue, BOARD)
        .unwrap()
        .id;
    board.update_position(large, Point::new(0.0, 0.0), Point::new(600.0, 400.0), Point::default());
    let small = place(&mut board, "small", Point::new(0.0, 0.0));

    // Reaches x = 300, past the small footprint (256) but inside the large one (320).
    board.begin_selection(Point::new(300.0, 10.0), PointerTarget::Background);
    board.update_selection(Point::new(310.0, 20.0));

    assert!(board.note(large).unwrap().is_selected);
    assert!(!board.note(small).unwrap().is_selected);
}

#[test]
fn selection_is_recomputed_as_the_box_shrinks() {
    let mut board = engine();
    let a = place(&mut board, "a", Point::new(0.0, 0.0));
    let b = place(&mut board, "b", Point::new(600.0, 0.0));

    board.begin_selection(Point::new(200.0, 50.0), PointerTarget::Background);
    board.update_selection(Point::new(650.0, 60.0));
    assert_eq!(board.selected_ids(), vec![a, b]);

    board.update_selection(Point::new(550.0, 60.0));
    assert_eq!(board.selected_ids(), vec![a]);

    // Dragging back past the origin flips the box to the left.
    let flipped = board.update_selection(Point::new(150.0, 40.0));
    assert_eq!(flipped, Some(Rect::new(150.0, 40.0, 50.0, 10.0)));
    assert_eq!(board.selected_ids(), vec![a]);
}

#[test]
fn begin_clears_previous_selection() {
    let mut board = engine();
    let a = place(&mut board, "a", Point::new(0.0, 0.0));

    board.begin_selection(Point::new(0.0, 0.0), PointerTarget::Background);
    board.update_selection(Point::new(10.0, 10.0));
    board.end_selection();
    assert_eq!(board.selected_ids(), vec![a]);

    board.begin_selection(Point::new(900.0, 700.0), PointerTarget::Background);
    assert!(board.selected_ids().is_empty());
}

#[test]
fn pointer_down_on_note_or_control_does_not_start_gesture() {
    let mut board = engine();
    let a = place(&mut board, "a", Point::new(0.0, 0.0));
    board.begin_selection(Point::new(0.0, 0.0), PointerTarget::Background);
    board.update_selection(Point::new(10.0, 10.0));
    board.end_selection();

    assert!(!board.begin_selection(Point::new(5.0, 5.0), PointerTarget::Note(a)));
    assert!(!board.begin_selection(Point::new(5.0, 5.0), PointerTarget::Control));
    assert!(!board.is_selecting());
    assert_eq!(board.update_selection(Point::new(500.0, 500.0)), None);
    assert_eq!(board.selected_ids(), vec![a]);
}

#[test]
fn end_selection_keeps_flags_and_drops_gesture() {
    let mut board = engine();
    let a = place(&mut board, "a", Point::new(0.0, 0.0));

    board.begin_selection(Point::new(0.0, 0.0), PointerTarget::Background);
    board.update_selection(Point::new(10.0, 10.0));
    assert!(board.selection_rect().is_some());
    board.end_selection();

    assert!(!board.is_selecting());
    assert_eq!(board.selection_rect(), None);
    assert!(board.note(a).unwrap().is_selected);

    board.clear_selection();
    assert!(board.selected_ids().is_empty());
}
