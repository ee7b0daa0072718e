//! FFI use-case API for the Flutter board UI.
//!
//! # Responsibility
//! - Expose gesture-level board operations to Dart via FRB.
//! - Own the single process-wide board engine.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Unparsable note IDs behave exactly like unknown IDs.
//! - A poisoned board lock is reported as a failed envelope.

use log::{error, info, warn};
use paperdesk_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    BoardConfig, BoardEngine, DragOutcome, Folder, Note, NoteId, PaperColor, Point, PointerTarget,
    Rect, ScatterBias, Size,
};
use std::sync::{Mutex, MutexGuard, OnceLock};
use uuid::Uuid;

static BOARD: OnceLock<Mutex<BoardEngine>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Axis-aligned rectangle in board coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl From<Rect> for BoardRect {
    fn from(rect: Rect) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        }
    }
}

impl From<BoardRect> for Rect {
    fn from(rect: BoardRect) -> Self {
        Rect::new(rect.x, rect.y, rect.width, rect.height)
    }
}

/// Render-ready projection of one active note.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardNoteItem {
    /// Stable note ID in string form.
    pub note_id: String,
    pub text: String,
    /// Paper color (`yellow|pink|blue|white`).
    pub color: String,
    pub x: f64,
    pub y: f64,
    /// Tilt in degrees.
    pub rotation: f64,
    pub z_index: i64,
    pub is_large: bool,
    pub is_selected: bool,
    pub created_at_epoch_ms: i64,
}

/// Board listing envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardNotesResponse {
    /// Active notes in store order.
    pub items: Vec<BoardNoteItem>,
    /// Current arrangement label (`messy|columns|colors|grid`).
    pub mode: String,
    pub max_z_index: i64,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Generic action response envelope for board commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Affected note ID when the action targets a single note.
    pub note_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl BoardActionResponse {
    fn success(message: impl Into<String>, note_id: Option<String>) -> Self {
        Self {
            ok: true,
            note_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note_id: None,
            message: message.into(),
        }
    }
}

/// Result of one drag update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardDragResponse {
    pub ok: bool,
    /// `true` when the drop landed on the trash.
    pub deleted: bool,
    /// Notes moved or removed, dragged note first for moves.
    pub affected_ids: Vec<String>,
    pub message: String,
}

/// Result of advancing the arrangement cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardArrangeResponse {
    pub ok: bool,
    /// Numeric mode code (`0..=3`).
    pub mode_code: u8,
    pub mode: String,
    pub max_z_index: i64,
    pub message: String,
}

/// One archived note inside a day folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntryItem {
    pub note_id: String,
    pub text: String,
    pub color: String,
    pub is_large: bool,
    pub created_at_epoch_ms: i64,
    pub completed_at_epoch_ms: i64,
}

/// One local calendar day of completed notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveFolderItem {
    /// `YYYY-MM-DD`.
    pub date_key: String,
    pub items: Vec<ArchiveEntryItem>,
}

/// Archive listing envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveFoldersResponse {
    /// Newest day first.
    pub folders: Vec<ArchiveFolderItem>,
    pub message: String,
}

/// Prints a new note at the dispenser.
///
/// Zero or negative board dimensions fall back to the window size.
///
/// # FFI contract
/// - Sync call, in-memory execution.
/// - Never panics.
/// - Blank text or unknown color returns `ok=false` and leaves the board untouched.
#[flutter_rust_bridge::frb(sync)]
pub fn board_print_note(
    text: String,
    color: String,
    board_width: f64,
    board_height: f64,
) -> BoardActionResponse {
    let Some(color) = PaperColor::parse(color.trim()) else {
        return BoardActionResponse::failure(format!("unknown paper color `{}`", color.trim()));
    };
    let board = Size::new(board_width, board_height);
    match with_board(|engine| engine.create_note(text, color, board)) {
        Ok(Some(note)) => BoardActionResponse::success("Note printed.", Some(note.id.to_string())),
        Ok(None) => BoardActionResponse::failure("Note text is blank."),
        Err(err) => BoardActionResponse::failure(format!("board_print_note failed: {err}")),
    }
}

/// Tosses an existing note to a random spot.
///
/// `bias` is `left|right`; anything else scatters across the whole free area.
///
/// # FFI contract
/// - Sync call, in-memory execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn board_scatter_note(
    note_id: String,
    board_width: f64,
    board_height: f64,
    bias: String,
) -> BoardActionResponse {
    let bias = parse_bias(&bias);
    let board = Size::new(board_width, board_height);
    note_action(&note_id, "board_scatter_note", "Note scattered.", |engine, id| {
        engine.scatter_note(id, board, bias)
    })
}

/// Reports the measured trash rectangle, or clears it with `None`.
///
/// # FFI contract
/// - Sync call, in-memory execution.
/// - Malformed rectangles disable trash drops and return `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn board_set_trash_target(rect: Option<BoardRect>) -> BoardActionResponse {
    let requested = rect.is_some();
    match with_board(|engine| {
        engine.set_trash_target(rect.map(Rect::from));
        engine.trash_target().is_some()
    }) {
        Ok(active) if active || !requested => BoardActionResponse::success("Trash updated.", None),
        Ok(_) => BoardActionResponse::failure("Trash rectangle is malformed; drops disabled."),
        Err(err) => BoardActionResponse::failure(format!("board_set_trash_target failed: {err}")),
    }
}

/// Applies one drag update for `note_id`.
///
/// # FFI contract
/// - Sync call, in-memory execution.
/// - Never panics.
/// - Unknown IDs return `ok=false` with no affected notes.
#[flutter_rust_bridge::frb(sync)]
pub fn board_drag_note(
    note_id: String,
    x: f64,
    y: f64,
    pointer_x: f64,
    pointer_y: f64,
    delta_x: f64,
    delta_y: f64,
) -> BoardDragResponse {
    let Some(id) = parse_note_id(&note_id) else {
        return BoardDragResponse::unknown(&note_id);
    };
    let outcome = with_board(|engine| {
        engine.update_position(
            id,
            Point::new(x, y),
            Point::new(pointer_x, pointer_y),
            Point::new(delta_x, delta_y),
        )
    });
    match outcome {
        Ok(DragOutcome::Moved { moved }) => BoardDragResponse {
            ok: true,
            deleted: false,
            message: format!("Moved {} note(s).", moved.len()),
            affected_ids: to_id_strings(&moved),
        },
        Ok(DragOutcome::Deleted { removed }) => BoardDragResponse {
            ok: true,
            deleted: true,
            message: format!("Trashed {} note(s).", removed.len()),
            affected_ids: to_id_strings(&removed),
        },
        Ok(DragOutcome::Ignored) => BoardDragResponse::unknown(&note_id),
        Err(err) => BoardDragResponse {
            ok: false,
            deleted: false,
            affected_ids: Vec::new(),
            message: format!("board_drag_note failed: {err}"),
        },
    }
}

/// Whether the pointer is close enough to the trash to reveal it.
///
/// # FFI contract
/// - Sync call; returns `false` when no trash is measured or on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn board_trash_hover(pointer_x: f64, pointer_y: f64) -> bool {
    with_board(|engine| engine.is_hovering_trash(Point::new(pointer_x, pointer_y)))
        .unwrap_or(false)
}

/// Raises `note_id` above every other note.
///
/// # FFI contract
/// - Sync call; returns the new z-index, or `None` for unknown IDs.
#[flutter_rust_bridge::frb(sync)]
pub fn board_bring_to_front(note_id: String) -> Option<i64> {
    let id = parse_note_id(&note_id)?;
    with_board(|engine| engine.bring_to_front(id))
        .ok()
        .flatten()
}

/// Moves a note into the completion archive.
///
/// # FFI contract
/// - Sync call, in-memory execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn board_complete_note(note_id: String) -> BoardActionResponse {
    note_action(&note_id, "board_complete_note", "Note completed.", |engine, id| {
        engine.complete_note(id).is_some()
    })
}

/// Discards a note without archiving it.
///
/// # FFI contract
/// - Sync call, in-memory execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn board_delete_note(note_id: String) -> BoardActionResponse {
    note_action(&note_id, "board_delete_note", "Note deleted.", |engine, id| {
        engine.delete_note(id)
    })
}

/// Advances to the next arrangement and lays out the board.
///
/// # FFI contract
/// - Sync call, in-memory execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn board_cycle_arrange(board_width: f64, board_height: f64) -> BoardArrangeResponse {
    let board = Size::new(board_width, board_height);
    match with_board(|engine| (engine.cycle_arrange(board), engine.max_z_index())) {
        Ok((mode, max_z_index)) => BoardArrangeResponse {
            ok: true,
            mode_code: mode.code(),
            mode: mode.label().to_string(),
            max_z_index,
            message: format!("Arranged as {}.", mode.label()),
        },
        Err(err) => BoardArrangeResponse {
            ok: false,
            mode_code: 0,
            mode: String::new(),
            max_z_index: 0,
            message: format!("board_cycle_arrange failed: {err}"),
        },
    }
}

/// Starts a rubber-band gesture.
///
/// `hit_note_id` is the note under the pointer, if any; `hit_control` marks
/// pointer-down on a toolbar or other control.
///
/// # FFI contract
/// - Sync call; returns `true` only when a gesture started.
#[flutter_rust_bridge::frb(sync)]
pub fn board_begin_selection(
    x: f64,
    y: f64,
    hit_note_id: Option<String>,
    hit_control: bool,
) -> bool {
    let target = if hit_control {
        PointerTarget::Control
    } else {
        match hit_note_id {
            // Any non-background hit blocks the gesture, even a stale ID.
            Some(raw) => PointerTarget::Note(parse_note_id(&raw).unwrap_or_else(Uuid::nil)),
            None => PointerTarget::Background,
        }
    };
    with_board(|engine| engine.begin_selection(Point::new(x, y), target)).unwrap_or(false)
}

/// Extends the active gesture to the pointer and reselects notes.
///
/// # FFI contract
/// - Sync call; returns the box to draw, or `None` when no gesture is active.
#[flutter_rust_bridge::frb(sync)]
pub fn board_update_selection(x: f64, y: f64) -> Option<BoardRect> {
    with_board(|engine| engine.update_selection(Point::new(x, y)))
        .ok()
        .flatten()
        .map(BoardRect::from)
}

/// Ends the active gesture; selection flags stay.
///
/// # FFI contract
/// - Sync call, never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn board_end_selection() -> BoardActionResponse {
    match with_board(|engine| engine.end_selection()) {
        Ok(()) => BoardActionResponse::success("Selection ended.", None),
        Err(err) => BoardActionResponse::failure(format!("board_end_selection failed: {err}")),
    }
}

/// Lists active notes for rendering.
///
/// # FFI contract
/// - Sync call, read-only.
/// - Never panics; failure returns an empty list with a message.
#[flutter_rust_bridge::frb(sync)]
pub fn board_list_notes() -> BoardNotesResponse {
    match with_board(|engine| {
        let items = engine.notes().iter().map(to_note_item).collect::<Vec<_>>();
        (items, engine.arrange_mode(), engine.max_z_index())
    }) {
        Ok((items, mode, max_z_index)) => BoardNotesResponse {
            message: format!("{} note(s) on board.", items.len()),
            items,
            mode: mode.label().to_string(),
            max_z_index,
        },
        Err(err) => BoardNotesResponse {
            items: Vec::new(),
            mode: String::new(),
            max_z_index: 0,
            message: format!("board_list_notes failed: {err}"),
        },
    }
}

/// Lists archive folders matching `query` in the local time zone.
///
/// # FFI contract
/// - Sync call, read-only.
/// - Empty query returns every folder.
#[flutter_rust_bridge::frb(sync)]
pub fn board_archive_folders(query: String) -> ArchiveFoldersResponse {
    match with_board(|engine| engine.folders(&query)) {
        Ok(folders) => {
            let folders = folders.into_iter().map(to_folder_item).collect::<Vec<_>>();
            let message = if folders.is_empty() {
                "No completed notes.".to_string()
            } else {
                format!("Found {} folder(s).", folders.len())
            };
            ArchiveFoldersResponse { folders, message }
        }
        Err(err) => ArchiveFoldersResponse {
            folders: Vec::new(),
            message: format!("board_archive_folders failed: {err}"),
        },
    }
}

/// Records the host window size used when a board cannot be measured.
///
/// # FFI contract
/// - Sync call, in-memory execution.
/// - Zero, negative or non-finite sizes return `ok=false` and keep the previous size.
#[flutter_rust_bridge::frb(sync)]
pub fn board_set_window_size(width: f64, height: f64) -> BoardActionResponse {
    match with_board(|engine| engine.set_window_size(Size::new(width, height))) {
        Ok(true) => BoardActionResponse::success("Window size updated.", None),
        Ok(false) => BoardActionResponse::failure(format!(
            "window size {width}x{height} is not measurable"
        )),
        Err(err) => BoardActionResponse::failure(format!("board_set_window_size failed: {err}")),
    }
}

/// Replaces the board with an empty engine built from a JSON config.
///
/// Input semantics:
/// - `config_json`: `BoardConfig` document; missing fields take defaults, so
///   `{}` restores the stock geometry.
///
/// # FFI contract
/// - Sync call, never panics.
/// - Invalid JSON or values return `ok=false` and leave the current board untouched.
/// - Success discards all notes and the archive.
#[flutter_rust_bridge::frb(sync)]
pub fn board_configure(config_json: String) -> BoardActionResponse {
    let config = match BoardConfig::from_json(&config_json) {
        Ok(config) => config,
        Err(err) => {
            warn!("event=board_configure module=ffi status=rejected");
            return BoardActionResponse::failure(format!("board_configure failed: {err}"));
        }
    };
    let mut guard = lock_board_recovering("board_configure");
    *guard = BoardEngine::new(config);
    info!("event=board_configure module=ffi status=ok");
    BoardActionResponse::success("Board configured.", None)
}

/// Replaces the board with a fresh, empty engine.
///
/// The active config and window size carry over. Also recovers from a
/// poisoned lock.
///
/// # FFI contract
/// - Sync call, never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn board_reset() -> BoardActionResponse {
    let mut guard = lock_board_recovering("board_reset");
    let config = guard.config().clone();
    let window = guard.window_size();
    *guard = BoardEngine::new(config);
    guard.set_window_size(window);
    BoardActionResponse::success("Board reset.", None)
}

impl BoardDragResponse {
    fn unknown(note_id: &str) -> Self {
        Self {
            ok: false,
            deleted: false,
            affected_ids: Vec::new(),
            message: format!("note `{note_id}` not found"),
        }
    }
}

fn board() -> &'static Mutex<BoardEngine> {
    BOARD.get_or_init(|| Mutex::new(BoardEngine::default()))
}

fn lock_board_recovering(op: &str) -> MutexGuard<'static, BoardEngine> {
    match board().lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn!("event={op} module=ffi status=recovered reason=poisoned_lock");
            board().clear_poison();
            poisoned.into_inner()
        }
    }
}

fn with_board<T>(f: impl FnOnce(&mut BoardEngine) -> T) -> Result<T, String> {
    let mut guard = board().lock().map_err(|_| {
        error!("event=board_lock module=ffi status=error reason=poisoned_lock");
        "board state is unavailable after an earlier failure".to_string()
    })?;
    Ok(f(&mut guard))
}

fn note_action(
    note_id: &str,
    op: &str,
    success_message: &str,
    f: impl FnOnce(&mut BoardEngine, NoteId) -> bool,
) -> BoardActionResponse {
    let Some(id) = parse_note_id(note_id) else {
        return BoardActionResponse::failure(format!("note `{note_id}` not found"));
    };
    match with_board(|engine| f(engine, id)) {
        Ok(true) => BoardActionResponse::success(success_message, Some(id.to_string())),
        Ok(false) => BoardActionResponse::failure(format!("note `{note_id}` not found")),
        Err(err) => BoardActionResponse::failure(format!("{op} failed: {err}")),
    }
}

fn parse_note_id(raw: &str) -> Option<NoteId> {
    Uuid::parse_str(raw.trim()).ok()
}

fn parse_bias(raw: &str) -> ScatterBias {
    match raw.trim().to_ascii_lowercase().as_str() {
        "left" => ScatterBias::Left,
        "right" => ScatterBias::Right,
        _ => ScatterBias::Any,
    }
}

fn to_id_strings(ids: &[NoteId]) -> Vec<String> {
    ids.iter().map(ToString::to_string).collect()
}

fn to_note_item(note: &Note) -> BoardNoteItem {
    BoardNoteItem {
        note_id: note.id.to_string(),
        text: note.text.clone(),
        color: note.color.as_str().to_string(),
        x: note.position.x,
        y: note.position.y,
        rotation: note.rotation,
        z_index: note.z_index,
        is_large: note.is_large,
        is_selected: note.is_selected,
        created_at_epoch_ms: note.created_at.timestamp_millis(),
    }
}

fn to_folder_item(folder: Folder) -> ArchiveFolderItem {
    ArchiveFolderItem {
        date_key: folder.key(),
        items: folder
            .items
            .into_iter()
            .map(|item| ArchiveEntryItem {
                note_id: item.id.to_string(),
                color: item.color.as_str().to_string(),
                is_large: item.is_large,
                created_at_epoch_ms: item.created_at.timestamp_millis(),
                completed_at_epoch_ms: item.completed_at.timestamp_millis(),
                text: item.text,
            })
            .collect(),
    }
}
