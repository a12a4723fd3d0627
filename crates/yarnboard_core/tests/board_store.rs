use serde_json::{json, Value};
use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use yarnboard_core::{
    BoardKind, BoardStore, FileFilter, FixedPathChooser, LoadOutcome, LoadedBoard, PathChooser,
    SaveOutcome, StoreError,
};

/// Chooser that records how often each prompt was shown.
struct CountingChooser {
    path: Option<PathBuf>,
    save_calls: Cell<u32>,
    open_calls: Cell<u32>,
}

impl CountingChooser {
    fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            save_calls: Cell::new(0),
            open_calls: Cell::new(0),
        }
    }
}

impl PathChooser for CountingChooser {
    fn choose_save_destination(&self, _name: &str, _filter: &FileFilter) -> Option<PathBuf> {
        self.save_calls.set(self.save_calls.get() + 1);
        self.path.clone()
    }

    fn choose_open_source(&self, _filters: &[FileFilter]) -> Option<PathBuf> {
        self.open_calls.set(self.open_calls.get() + 1);
        self.path.clone()
    }
}

fn save(kind: BoardKind, path: &Path, document: &Value) -> PathBuf {
    let store = BoardStore::new(FixedPathChooser::saving_to(path));
    match store.save(kind, &document.to_string()).unwrap() {
        SaveOutcome::Saved { path } => path,
        SaveOutcome::Cancelled => panic!("save should not be cancelled"),
    }
}

fn load(path: &Path) -> LoadedBoard {
    let store = BoardStore::new(FixedPathChooser::cancelling());
    match store.load(Some(path)).unwrap() {
        LoadOutcome::Loaded(board) => board,
        LoadOutcome::Cancelled => panic!("load with explicit path should not be cancelled"),
    }
}

fn parse(text: &str) -> Value {
    serde_json::from_str(text).unwrap()
}

fn sample_board() -> Value {
    json!({
        "version": 1,
        "title": "Trip",
        "photos": [
            { "path": "trip/one.png", "x": 10.5, "y": -3, "tags": ["a"] },
            { "path": "relative/two.png", "note": { "text": "ünïcode", "pinned": true } },
            { "caption": "no path here" }
        ],
        "yarns": [{ "from": 0, "to": 1, "color": "#ff0000" }],
        "zoom": null
    })
}

#[test]
fn flat_file_round_trip_preserves_document() {
    let dir = tempfile::tempdir().unwrap();
    let board = sample_board();

    let saved = save(BoardKind::Yb, &dir.path().join("board.yb"), &board);
    let loaded = load(&saved);

    assert_eq!(loaded.kind, BoardKind::Yb);
    assert_eq!(loaded.path, saved);
    assert_eq!(parse(&loaded.json), board);
}

#[test]
fn sqlite_round_trip_preserves_document_and_reports_kind() {
    let dir = tempfile::tempdir().unwrap();
    let board = sample_board();

    let saved = save(BoardKind::Sqlite, &dir.path().join("board.db"), &board);
    let loaded = load(&saved);

    assert_eq!(loaded.kind, BoardKind::Sqlite);
    assert_eq!(parse(&loaded.json), board);
}

#[test]
fn flat_file_load_returns_raw_text_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("handmade.yb");
    let raw = "{\n  \"photos\" : [ ],\n  \"b\": 1 }\n";
    fs::write(&path, raw).unwrap();

    let loaded = load(&path);
    assert_eq!(loaded.json, raw);
}

#[test]
fn flat_file_save_writes_compact_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = save(BoardKind::Yb, &dir.path().join("b.yb"), &json!({ "photos": [] }));

    assert_eq!(fs::read_to_string(path).unwrap(), r#"{"photos":[]}"#);
}

#[test]
fn large_integers_and_decimals_keep_their_digits_in_both_backends() {
    let dir = tempfile::tempdir().unwrap();
    let text = r#"{"photos":[],"id":123456789012345678901234567890,"f":0.1}"#;

    for name in ["big.yb", "big.db"] {
        let path = dir.path().join(name);
        let store = BoardStore::new(FixedPathChooser::saving_to(&path));
        let outcome = store.save(BoardKind::from_path(&path), text).unwrap();
        assert_eq!(outcome, SaveOutcome::Saved { path: path.clone() });

        let loaded = load(&path);
        assert!(loaded.json.contains("123456789012345678901234567890"), "{name}: {}", loaded.json);
        assert!(loaded.json.contains("\"f\":0.1"), "{name}: {}", loaded.json);
    }
}

#[test]
fn empty_input_is_rejected_without_io() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.yb");

    for kind in [BoardKind::Yb, BoardKind::Sqlite] {
        for text in ["", "   ", "\n\t"] {
            let chooser = CountingChooser::new(Some(path.clone()));
            let store = BoardStore::new(&chooser);
            assert_eq!(store.save(kind, text), Err(StoreError::EmptyDocument));
            assert_eq!(chooser.save_calls.get(), 0);
        }
    }
    assert!(!path.exists());
}

#[test]
fn invalid_json_is_rejected_without_io() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.db");
    let chooser = CountingChooser::new(Some(path.clone()));
    let store = BoardStore::new(&chooser);

    let err = store.save(BoardKind::Sqlite, "{not json").unwrap_err();

    assert!(matches!(err, StoreError::InvalidJson(_)));
    assert_eq!(chooser.save_calls.get(), 0);
    assert!(!path.exists());
}

#[test]
fn cancelled_save_is_not_an_error_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let chooser = CountingChooser::new(None);
    let store = BoardStore::new(&chooser);

    let outcome = store.save(BoardKind::Yb, r#"{"photos":[]}"#).unwrap();

    assert_eq!(outcome, SaveOutcome::Cancelled);
    assert_eq!(chooser.save_calls.get(), 1);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn cancelled_load_is_not_an_error() {
    let chooser = CountingChooser::new(None);
    let store = BoardStore::new(&chooser);

    assert_eq!(store.load(None).unwrap(), LoadOutcome::Cancelled);
    assert_eq!(store.load(Some(Path::new(""))).unwrap(), LoadOutcome::Cancelled);
    assert_eq!(chooser.open_calls.get(), 2);
}

#[test]
fn load_without_path_uses_chooser() {
    let dir = tempfile::tempdir().unwrap();
    let saved = save(BoardKind::Yb, &dir.path().join("board.yb"), &json!({ "photos": [] }));

    let store = BoardStore::new(FixedPathChooser::opening(&saved));
    let LoadOutcome::Loaded(board) = store.load(None).unwrap() else {
        panic!("chooser path should load");
    };
    assert_eq!(board.path, saved);
}

#[test]
fn save_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b").join("board.db");

    let saved = save(BoardKind::Sqlite, &nested, &json!({ "photos": [] }));

    assert!(saved.exists());
}

#[test]
fn save_rewrites_absolute_photo_inside_destination() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("img").join("cat.png");
    fs::create_dir_all(image.parent().unwrap()).unwrap();
    fs::write(&image, b"png").unwrap();

    let board = json!({ "photos": [{ "path": image.to_str().unwrap(), "x": 1 }] });
    let saved = save(BoardKind::Yb, &dir.path().join("board.yb"), &board);
    let stored = parse(&load(&saved).json);

    let expected = Path::new("img").join("cat.png");
    assert_eq!(stored["photos"][0]["path"], json!(expected.to_str().unwrap()));
    assert_eq!(stored["photos"][0]["x"], json!(1));
}

#[test]
fn save_recovers_basename_for_flattened_copies() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("cat.png"), b"png").unwrap();

    let board = json!({ "photos": [{ "path": "old/cat.png" }] });
    let saved = save(BoardKind::Sqlite, &dir.path().join("board.sqlite"), &board);

    assert_eq!(parse(&load(&saved).json)["photos"][0]["path"], json!("cat.png"));
}

#[test]
fn save_leaves_paths_outside_destination_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let outside = tempfile::tempdir().unwrap();
    let image = outside.path().join("x.png");
    fs::write(&image, b"png").unwrap();
    let original = image.to_str().unwrap().to_string();

    let board = json!({ "photos": [{ "path": original.clone() }, { "path": "/outside/x.png" }] });
    let saved = save(BoardKind::Yb, &dir.path().join("board.yb"), &board);
    let stored = parse(&load(&saved).json);

    assert_eq!(stored["photos"][0]["path"], json!(original));
    assert_eq!(stored["photos"][1]["path"], json!("/outside/x.png"));
}

#[test]
fn sqlite_second_save_replaces_first_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.db");

    save(BoardKind::Sqlite, &path, &json!({ "photos": [], "rev": 1 }));
    save(BoardKind::Sqlite, &path, &json!({ "photos": [], "rev": 2 }));

    let conn = rusqlite::Connection::open(&path).unwrap();
    let rows: Vec<String> = conn
        .prepare("SELECT json FROM board")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(parse(&rows[0])["rev"], json!(2));
}

#[test]
fn flat_file_save_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.yb");
    fs::write(&path, "stale contents that are longer than the new board").unwrap();

    save(BoardKind::Yb, &path, &json!({ "photos": [] }));

    assert_eq!(parse(&load(&path).json), json!({ "photos": [] }));
}

#[test]
fn backend_is_selected_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let board = json!({ "photos": [] });

    for name in ["board.sqlite", "board.db", "BOARD.DB"] {
        let saved = save(BoardKind::Sqlite, &dir.path().join(name), &board);
        assert_eq!(load(&saved).kind, BoardKind::Sqlite, "{name}");
    }
    for name in ["board.yb", "board.json", "board"] {
        let saved = save(BoardKind::Yb, &dir.path().join(name), &board);
        assert_eq!(load(&saved).kind, BoardKind::Yb, "{name}");
    }
}

#[test]
fn flat_text_saved_under_db_extension_fails_as_io() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.db");
    fs::write(&path, r#"{"photos":[]}"#).unwrap();

    let store = BoardStore::new(FixedPathChooser::cancelling());
    let err = store.load(Some(&path)).unwrap_err();
    assert_eq!(err.code(), "io_failure");
}

#[test]
fn load_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.yb");

    let store = BoardStore::new(FixedPathChooser::cancelling());
    let err = store.load(Some(&path)).unwrap_err();

    assert_eq!(err, StoreError::NotFound(path.clone()));
    assert_eq!(err.to_string(), format!("File not found: {}", path.display()));
}

#[test]
fn load_empty_database_is_no_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.db");
    drop(yarnboard_core::db::open_board_db(&path).unwrap());

    let store = BoardStore::new(FixedPathChooser::cancelling());
    assert_eq!(
        store.load(Some(&path)).unwrap_err(),
        StoreError::NoData(path.clone())
    );
}

#[test]
fn load_database_without_board_table_fails_as_io() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("other.sqlite");
    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute_batch("CREATE TABLE unrelated (id INTEGER);").unwrap();
    drop(conn);

    let store = BoardStore::new(FixedPathChooser::cancelling());
    let err = store.load(Some(&path)).unwrap_err();

    assert_eq!(err.code(), "io_failure");
    assert!(err.to_string().contains("board"));
}

#[test]
fn load_rejects_invalid_stored_json() {
    let dir = tempfile::tempdir().unwrap();
    let flat = dir.path().join("broken.yb");
    fs::write(&flat, "{\"photos\": [").unwrap();

    let db = dir.path().join("broken.db");
    let conn = yarnboard_core::db::open_board_db(&db).unwrap();
    conn.execute("INSERT INTO board (json) VALUES ('nope')", [])
        .unwrap();
    drop(conn);

    let store = BoardStore::new(FixedPathChooser::cancelling());
    assert!(matches!(
        store.load(Some(&flat)).unwrap_err(),
        StoreError::InvalidJson(_)
    ));
    assert!(matches!(
        store.load(Some(&db)).unwrap_err(),
        StoreError::InvalidJson(_)
    ));
}

#[test]
fn save_into_unwritable_location_reports_failure() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("file");
    fs::write(&blocker, b"x").unwrap();
    let path = blocker.join("board.yb");

    let store = BoardStore::new(FixedPathChooser::saving_to(&path));
    let err = store.save(BoardKind::Yb, "{}").unwrap_err();

    assert_eq!(err.code(), "io_failure");
}
