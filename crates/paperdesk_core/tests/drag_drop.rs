use chrono::{TimeZone, Utc};
use paperdesk_core::{
    BoardConfig, BoardEngine, DragOutcome, FixedJitter, ManualClock, NoteId, PaperColor, Point,
    PointerTarget, Rect, Size,
};
use uuid::Uuid;

const BOARD: Size = Size::new(1200.0, 900.0);
const TRASH: Rect = Rect::new(32.0, 772.0, 96.0, 96.0);

fn engine() -> BoardEngine<FixedJitter, ManualClock> {
    let start = Utc.with_ymd_and_hms(2025, 5, 20, 9, 0, 0).unwrap();
    let mut board = BoardEngine::with_sources(
        BoardConfig::default(),
        FixedJitter(0.0),
        ManualClock::starting_at(start),
    );
    board.set_trash_target(Some(TRASH));
    board
}

fn print(board: &mut BoardEngine<FixedJitter, ManualClock>, text: &str) -> NoteId {
    board.create_note(text, PaperColor::Yellow, BOARD).unwrap().id
}

fn position(board: &BoardEngine<FixedJitter, ManualClock>, id: NoteId) -> Point {
    board.note(id).unwrap().position
}

/// Selects exactly the notes overlapping `area`.
fn select(board: &mut BoardEngine<FixedJitter, ManualClock>, area: Rect) {
    assert!(board.begin_selection(Point::new(area.x, area.y), PointerTarget::Background));
    board.update_selection(Point::new(area.right(), area.bottom()));
    board.end_selection();
}

#[test]
fn unselected_drag_moves_only_the_dragged_note() {
    let mut board = engine();
    let a = print(&mut board, "a");
    let b = print(&mut board, "b");
    let b_before = position(&board, b);

    let outcome = board.update_position(
        a,
        Point::new(300.0, 200.0),
        Point::new(420.0, 260.0),
        Point::new(5.0, 5.0),
    );

    assert_eq!(outcome, DragOutcome::Moved { moved: vec![a] });
    assert_eq!(position(&board, a), Point::new(300.0, 200.0));
    assert_eq!(position(&board, b), b_before);
}

#[test]
fn selected_drag_translates_peers_and_snaps_the_primary() {
    let mut board = engine();
    let a = print(&mut board, "a");
    let b = print(&mut board, "b");
    let c = print(&mut board, "c");
    board.update_position(a, Point::new(100.0, 100.0), Point::new(0.0, 0.0), Point::default());
    board.update_position(b, Point::new(400.0, 100.0), Point::new(0.0, 0.0), Point::default());
    board.update_position(c, Point::new(900.0, 500.0), Point::new(0.0, 0.0), Point::default());

    select(&mut board, Rect::new(90.0, 90.0, 320.0, 20.0));
    assert_eq!(board.selected_ids(), vec![a, b]);

    let outcome = board.update_position(
        a,
        Point::new(110.3, 120.7),
        Point::new(600.0, 300.0),
        Point::new(10.0, 20.0),
    );

    assert_eq!(outcome, DragOutcome::Moved { moved: vec![a, b] });
    assert_eq!(position(&board, a), Point::new(110.3, 120.7));
    assert_eq!(position(&board, b), Point::new(410.0, 120.0));
    assert_eq!(position(&board, c), Point::new(900.0, 500.0));
}

#[test]
fn dragging_an_unselected_note_keeps_existing_selection() {
    let mut board = engine();
    let a = print(&mut board, "a");
    let b = print(&mut board, "b");
    board.update_position(a, Point::new(100.0, 100.0), Point::new(0.0, 0.0), Point::default());
    board.update_position(b, Point::new(700.0, 500.0), Point::new(0.0, 0.0), Point::default());

    select(&mut board, Rect::new(90.0, 90.0, 20.0, 20.0));
    board.update_position(b, Point::new(720.0, 520.0), Point::new(0.0, 0.0), Point::new(20.0, 20.0));

    assert_eq!(board.selected_ids(), vec![a]);
    assert_eq!(position(&board, a), Point::new(100.0, 100.0));
}

#[test]
fn drop_on_trash_margin_deletes_single_note() {
    let mut board = engine();
    let a = print(&mut board, "a");
    let b = print(&mut board, "b");
    let b_before = position(&board, b);

    // 20 units left of and above the trash box, on the expanded edge.
    let outcome = board.update_position(
        a,
        Point::new(0.0, 700.0),
        Point::new(12.0, 752.0),
        Point::default(),
    );

    assert_eq!(outcome, DragOutcome::Deleted { removed: vec![a] });
    assert!(board.note(a).is_none());
    assert_eq!(position(&board, b), b_before);
    assert!(board.completed_notes().is_empty());
}

#[test]
fn drop_just_outside_margin_moves_instead() {
    let mut board = engine();
    let a = print(&mut board, "a");

    let outcome = board.update_position(
        a,
        Point::new(0.0, 700.0),
        Point::new(11.0, 752.0),
        Point::default(),
    );

    assert!(!outcome.is_delete());
    assert_eq!(position(&board, a), Point::new(0.0, 700.0));
}

#[test]
fn drop_of_selected_note_deletes_whole_group() {
    let mut board = engine();
    let a = print(&mut board, "a");
    let b = print(&mut board, "b");
    let c = print(&mut board, "c");
    board.update_position(a, Point::new(100.0, 100.0), Point::new(0.0, 0.0), Point::default());
    board.update_position(b, Point::new(400.0, 100.0), Point::new(0.0, 0.0), Point::default());
    board.update_position(c, Point::new(900.0, 500.0), Point::new(0.0, 0.0), Point::default());
    select(&mut board, Rect::new(90.0, 90.0, 320.0, 20.0));

    let outcome = board.update_position(b, Point::new(50.0, 780.0), TRASH.center(), Point::default());

    assert_eq!(outcome, DragOutcome::Deleted { removed: vec![a, b] });
    assert_eq!(board.notes().len(), 1);
    assert_eq!(position(&board, c), Point::new(900.0, 500.0));
}

#[test]
fn without_trash_target_drags_always_move() {
    let mut board = engine();
    board.set_trash_target(None);
    let a = print(&mut board, "a");

    let outcome = board.update_position(a, Point::new(1.0, 2.0), TRASH.center(), Point::default());
    assert_eq!(outcome, DragOutcome::Moved { moved: vec![a] });
}

#[test]
fn malformed_trash_measurement_disables_drop() {
    let mut board = engine();
    board.set_trash_target(Some(Rect::new(32.0, 772.0, f64::NAN, 96.0)));
    assert_eq!(board.trash_target(), None);

    let a = print(&mut board, "a");
    let outcome = board.update_position(a, Point::new(1.0, 2.0), TRASH.center(), Point::default());
    assert!(!outcome.is_delete());
}

#[test]
fn unknown_note_drag_is_ignored() {
    let mut board = engine();
    let a = print(&mut board, "a");
    let outcome = board.update_position(
        Uuid::new_v4(),
        Point::new(1.0, 2.0),
        TRASH.center(),
        Point::default(),
    );
    assert_eq!(outcome, DragOutcome::Ignored);
    assert!(board.note(a).is_some());
}

#[test]
fn trash_hover_uses_radius_from_center() {
    let board = engine();
    let center = TRASH.center();
    assert!(board.is_hovering_trash(Point::new(center.x + 149.0, center.y)));
    assert!(!board.is_hovering_trash(Point::new(center.x + 150.0, center.y)));
}
