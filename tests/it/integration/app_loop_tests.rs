//! Frame Loop Integration Tests
//!
//! `App` driven by a headless backend that replays scripted frames and asks
//! to quit once the script is exhausted.

use crate::helpers::{HeadlessBackend, typed};
use progression_graph::app::App;
use progression_graph::input::{InputEvent, Key};
use progression_graph::settings::EditorSettings;
use progression_graph::types::{GraphPos, ScreenPos};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn settings_for(save_file: &Path) -> EditorSettings {
    EditorSettings {
        default_save_file: save_file.to_path_buf(),
        fps: 1000,
        ..EditorSettings::default()
    }
}

#[test]
fn test_startup_opens_default_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("graph.txt");
    fs::write(&path, "P 1 1 0 0 0\nP 2 2 0 0 1\nL 0 1 0\n").unwrap();

    let app = App::new(HeadlessBackend::default(), settings_for(&path)).unwrap();
    assert_eq!(app.editor().store().point_count(), 2);
    assert_eq!(app.editor().store().link_count(), 1);
    assert_eq!(app.editor().save_path(), Some(path.as_path()));
}

#[test]
fn test_startup_with_broken_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("graph.txt");
    fs::write(&path, "P 1 1\n").unwrap();

    let err = App::new(HeadlessBackend::default(), settings_for(&path))
        .err()
        .unwrap();
    assert!(err.to_string().contains("failed to open startup file"));
}

#[test]
fn test_frames_reach_editor_and_get_drawn() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("graph.txt");
    let backend = HeadlessBackend::new(vec![
        vec![InputEvent::Key(Key::Char('p'))],
        Vec::new(),
    ])
    .with_mouse(ScreenPos::new(650.0, 250.0));

    let mut app = App::new(backend, settings_for(&path)).unwrap();
    assert!(app.tick());
    assert!(app.tick());
    assert!(!app.tick());

    let point = app.editor().store().points().next().unwrap();
    assert_eq!(point.pos, GraphPos::new(2.0, 0.0));
    assert_eq!(app.backend().presented, 2);
    assert!(app.backend().drew_text("P: new point"));
    assert_eq!(app.clock().total_frames(), 2);
}

#[test]
fn test_quit_inside_prompt_cancels_it() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("graph.txt");
    let frames = vec![
        vec![InputEvent::Key(Key::Char('o'))],
        typed("elsewhere.txt"),
        vec![InputEvent::Quit],
        vec![InputEvent::Key(Key::Char('p'))],
    ];

    let mut app = App::new(HeadlessBackend::new(frames), settings_for(&path)).unwrap();
    assert!(app.tick());
    // The quit seen by the prompt comes back on the next frame.
    assert!(!app.tick());
    assert!(app.editor().store().is_empty());
    assert_eq!(app.editor().save_path(), Some(path.as_path()));
    assert!(app.backend().drew_text("Enter save file:"));
}
