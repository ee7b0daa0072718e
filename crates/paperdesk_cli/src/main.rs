//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `paperdesk_core` linkage.
//! - Walk one board through print, arrange and complete.

use paperdesk_core::{BoardEngine, Clock, Jitter, PaperColor, Size};

const BOARD: Size = Size::new(1280.0, 800.0);

fn main() {
    println!("paperdesk_core ping={}", paperdesk_core::ping());
    println!("paperdesk_core version={}", paperdesk_core::core_version());

    let mut board = BoardEngine::default();
    for line in smoke_walk(&mut board) {
        println!("{line}");
    }
}

/// Prints sample notes, cycles every arrangement and completes the first note.
fn smoke_walk<J: Jitter, C: Clock>(board: &mut BoardEngine<J, C>) -> Vec<String> {
    let samples = [
        ("buy milk", PaperColor::Yellow),
        ("call the plumber about the leaking kitchen sink before friday", PaperColor::Pink),
        ("stretch", PaperColor::Blue),
    ];
    let printed: Vec<_> = samples
        .into_iter()
        .filter_map(|(text, color)| board.create_note(text, color, BOARD))
        .map(|note| note.id)
        .collect();

    let mut lines = Vec::new();
    for _ in 0..3 {
        let mode = board.cycle_arrange(BOARD);
        lines.push(format!("arrange mode={} max_z={}", mode.label(), board.max_z_index()));
        for note in board.notes() {
            lines.push(format!(
                "  note={} color={} x={:.1} y={:.1} rot={:.2} z={}",
                note.id,
                note.color.as_str(),
                note.position.x,
                note.position.y,
                note.rotation,
                note.z_index
            ));
        }
    }

    let completed = printed
        .first()
        .and_then(|first| board.complete_note(*first));
    match completed {
        Some(done) => lines.push(format!(
            "complete note={} completed_at={} remaining={}",
            done.id,
            done.completed_at.to_rfc3339(),
            board.notes().len()
        )),
        None => lines.push("complete status=skipped".to_string()),
    }

    for folder in board.folders("") {
        lines.push(format!(
            "archive day={} items={}",
            folder.key(),
            folder.items.len()
        ));
    }
    lines
}
