//! Editor Workflow Integration Tests
//!
//! Default camera: graph (0, 0) is at screen (450, 250), one unit is 100 px.

use crate::helpers::{
    ScriptedModals, TestGraphBuilder, click, frame, hover, press, screen_of, test_editor,
    write_png,
};
use progression_graph::input::{FrameInput, InputEvent, InteractionMode, Key, MouseButton, Selection};
use progression_graph::types::{GraphPos, ImageId, LinkEnds, LinkId, ProgressState, ScreenPos};
use tempfile::TempDir;

fn at(x: f64, y: f64) -> ScreenPos {
    ScreenPos::new(x, y)
}

// ============================================================================
// Creating
// ============================================================================

#[test]
fn test_new_point_under_mouse() {
    let mut editor = test_editor();
    let mut modals = ScriptedModals::new();

    press(&mut editor, &mut modals, at(550.0, 150.0), Key::Char('p'));

    let point = editor.store().points().next().unwrap();
    assert_eq!(point.pos, GraphPos::new(1.0, -1.0));
    assert_eq!(point.rank, 0);
    assert_eq!(point.state, ProgressState::Todo);
    assert!(editor.interaction().selection.is_none());
}

#[test]
fn test_link_two_points() {
    let (mut editor, ids) = TestGraphBuilder::new()
        .with_point(0.0, 0.0)
        .with_point(2.0, 0.0)
        .build_editor();
    let mut modals = ScriptedModals::new();

    click(&mut editor, &mut modals, at(450.0, 250.0));
    press(&mut editor, &mut modals, at(450.0, 250.0), Key::Char('l'));
    assert_eq!(editor.interaction().mode(), InteractionMode::LinkPending);

    // Clicking the start point again changes nothing.
    click(&mut editor, &mut modals, at(455.0, 250.0));
    assert!(editor.interaction().is_link_pending());

    click(&mut editor, &mut modals, at(650.0, 250.0));
    assert!(!editor.interaction().is_link_pending());
    assert!(editor.interaction().selection.is_none());
    assert_eq!(
        editor.store().link(LinkId(0)).unwrap().ends,
        LinkEnds::Complete {
            p1: ids[0],
            p2: ids[1]
        }
    );
}

#[test]
fn test_duplicate_link_stays_pending_until_escape() {
    let (mut editor, ids) = TestGraphBuilder::new()
        .with_point(0.0, 0.0)
        .with_point(2.0, 0.0)
        .with_link(0, 1)
        .build_editor();
    let mut modals = ScriptedModals::new();

    click(&mut editor, &mut modals, at(650.0, 250.0));
    press(&mut editor, &mut modals, at(650.0, 250.0), Key::Char('l'));
    click(&mut editor, &mut modals, at(450.0, 250.0));

    assert!(editor.interaction().is_link_pending());
    assert_eq!(editor.store().link_count(), 2);
    assert_eq!(editor.interaction().selection, Selection::Point(ids[0]));

    // Return keeps the selection while a link is pending.
    press(&mut editor, &mut modals, at(450.0, 250.0), Key::Return);
    assert_eq!(editor.interaction().selection, Selection::Point(ids[0]));

    press(&mut editor, &mut modals, at(450.0, 250.0), Key::Escape);
    assert!(!editor.interaction().is_link_pending());
    assert_eq!(editor.store().link_count(), 1);
}

#[test]
fn test_links_not_hoverable_while_pending() {
    let (mut editor, _) = TestGraphBuilder::new()
        .with_point(0.0, 0.0)
        .with_point(2.0, 0.0)
        .with_point(0.0, 2.0)
        .with_link(0, 1)
        .build_editor();
    let mut modals = ScriptedModals::new();

    hover(&mut editor, &mut modals, at(550.0, 250.0));
    assert_eq!(editor.interaction().hovered, Selection::Link(LinkId(0)));

    click(&mut editor, &mut modals, at(450.0, 450.0));
    press(&mut editor, &mut modals, at(450.0, 450.0), Key::Char('l'));
    hover(&mut editor, &mut modals, at(550.0, 250.0));
    assert_eq!(editor.interaction().hovered, Selection::None);
}

// ============================================================================
// Editing a Point
// ============================================================================

#[test]
fn test_cycle_rank_and_state_keys() {
    let (mut editor, ids) = TestGraphBuilder::new().with_point(0.0, 0.0).build_editor();
    let mut modals = ScriptedModals::new();

    click(&mut editor, &mut modals, at(450.0, 250.0));
    press(&mut editor, &mut modals, at(450.0, 250.0), Key::Char('r'));
    press(&mut editor, &mut modals, at(450.0, 250.0), Key::Char('c'));

    let point = editor.store().point(ids[0]).unwrap();
    assert_eq!(point.rank, 1);
    assert_eq!(point.state, ProgressState::Completed);
}

#[test]
fn test_text_prompt_sets_text() {
    let (mut editor, ids) = TestGraphBuilder::new().with_point(0.0, 0.0).build_editor();
    let mut modals = ScriptedModals::new()
        .answer("kick-off meeting")
        .answer("a".repeat(111))
        .answer("bad # text");

    click(&mut editor, &mut modals, at(450.0, 250.0));
    press(&mut editor, &mut modals, at(450.0, 250.0), Key::Char('t'));
    assert_eq!(
        editor.store().point(ids[0]).unwrap().text.as_deref(),
        Some("kick-off meeting")
    );

    // Too wide for the window, then not representable in a save file.
    press(&mut editor, &mut modals, at(450.0, 250.0), Key::Char('t'));
    press(&mut editor, &mut modals, at(450.0, 250.0), Key::Char('t'));
    assert_eq!(
        editor.store().point(ids[0]).unwrap().text.as_deref(),
        Some("kick-off meeting")
    );
    assert_eq!(modals.prompts, vec!["Enter point text:"; 3]);
}

#[test]
fn test_register_and_attach_image() {
    let dir = TempDir::new().unwrap();
    let png = write_png(dir.path(), "logo.png", 64, 32);
    let (mut editor, ids) = TestGraphBuilder::new().with_point(0.0, 0.0).build_editor();
    let mut modals = ScriptedModals::new()
        .answer(dir.path().join("missing.png").to_string_lossy())
        .answer(png.to_string_lossy())
        .choose(Some(ImageId(0)));

    press(&mut editor, &mut modals, at(100.0, 100.0), Key::Char('i'));
    assert_eq!(editor.store().image_count(), 0);
    press(&mut editor, &mut modals, at(100.0, 100.0), Key::Char('i'));
    assert_eq!(editor.store().image_count(), 1);
    assert_eq!(editor.store().image(ImageId(0)).unwrap().dimensions(), (64, 32));

    click(&mut editor, &mut modals, at(450.0, 250.0));
    press(&mut editor, &mut modals, at(450.0, 250.0), Key::Char('i'));
    assert_eq!(modals.galleries, vec![1]);
    assert_eq!(editor.store().point(ids[0]).unwrap().image, Some(ImageId(0)));
}

#[test]
fn test_delete_peels_image_then_text_then_point() {
    let dir = TempDir::new().unwrap();
    let png = write_png(dir.path(), "badge.png", 8, 8);
    let (mut editor, ids) = TestGraphBuilder::new()
        .with_point(0.0, 0.0)
        .with_point(2.0, 0.0)
        .with_point(0.0, 2.0)
        .with_link(0, 1)
        .with_link(2, 0)
        .build_editor();
    let image = editor.store_mut().create_image(&png, None).unwrap();
    editor.store_mut().attach_image(ids[0], image).unwrap();
    editor.store_mut().attach_text(ids[0], "beta").unwrap();
    let mut modals = ScriptedModals::new();

    click(&mut editor, &mut modals, at(450.0, 250.0));
    press(&mut editor, &mut modals, at(450.0, 250.0), Key::Delete);
    assert_eq!(editor.store().point(ids[0]).unwrap().image, None);
    // Images stay registered after being detached.
    assert_eq!(editor.store().image_count(), 1);

    press(&mut editor, &mut modals, at(450.0, 250.0), Key::Delete);
    assert_eq!(editor.store().point(ids[0]).unwrap().text, None);

    press(&mut editor, &mut modals, at(450.0, 250.0), Key::Delete);
    assert!(editor.store().point(ids[0]).is_none());
    assert_eq!(editor.store().link_count(), 0);
    assert!(editor.interaction().selection.is_none());
    assert_eq!(editor.store().point_count(), 2);
}

#[test]
fn test_delete_selected_link() {
    let (mut editor, _) = TestGraphBuilder::new()
        .with_point(0.0, 0.0)
        .with_point(2.0, 0.0)
        .with_link(0, 1)
        .build_editor();
    let mut modals = ScriptedModals::new();

    click(&mut editor, &mut modals, at(550.0, 250.0));
    assert_eq!(editor.interaction().mode(), InteractionMode::SelectedLink);
    press(&mut editor, &mut modals, at(550.0, 250.0), Key::Delete);

    assert_eq!(editor.store().link_count(), 0);
    assert_eq!(editor.store().point_count(), 2);
    assert_eq!(editor.interaction().mode(), InteractionMode::Idle);
}

#[test]
fn test_deleting_pending_start_point_clears_pending_link() {
    let (mut editor, _) = TestGraphBuilder::new().with_point(0.0, 0.0).build_editor();
    let mut modals = ScriptedModals::new();

    click(&mut editor, &mut modals, at(450.0, 250.0));
    press(&mut editor, &mut modals, at(450.0, 250.0), Key::Char('l'));
    press(&mut editor, &mut modals, at(450.0, 250.0), Key::Delete);

    assert_eq!(editor.store().point_count(), 0);
    assert_eq!(editor.store().link_count(), 0);
    assert!(!editor.interaction().is_link_pending());
}

// ============================================================================
// Camera and Dragging
// ============================================================================

#[test]
fn test_drag_moves_point() {
    let (mut editor, ids) = TestGraphBuilder::new().with_point(0.0, 0.0).build_editor();
    let mut modals = ScriptedModals::new();
    let start = screen_of(&editor, ids[0]);

    editor.update(
        &frame(
            start,
            vec![InputEvent::MouseDown {
                button: MouseButton::Primary,
                pos: start,
            }],
        ),
        &mut modals,
    );
    editor.update(&FrameInput::new(at(500.0, 300.0), true, Vec::new()), &mut modals);
    assert_eq!(editor.store().point(ids[0]).unwrap().pos, GraphPos::new(0.5, 0.5));

    editor.update(
        &frame(
            at(500.0, 300.0),
            vec![InputEvent::MouseUp {
                button: MouseButton::Primary,
                pos: at(500.0, 300.0),
            }],
        ),
        &mut modals,
    );
    hover(&mut editor, &mut modals, at(600.0, 400.0));
    assert_eq!(editor.store().point(ids[0]).unwrap().pos, GraphPos::new(0.5, 0.5));
}

#[test]
fn test_drag_on_empty_space_pans() {
    let mut editor = test_editor();
    let mut modals = ScriptedModals::new();

    editor.update(
        &frame(
            at(100.0, 100.0),
            vec![InputEvent::MouseDown {
                button: MouseButton::Primary,
                pos: at(100.0, 100.0),
            }],
        ),
        &mut modals,
    );
    editor.update(&FrameInput::new(at(200.0, 50.0), true, Vec::new()), &mut modals);

    assert_eq!(editor.camera().scroll(), GraphPos::new(-1.0, 0.5));
}

#[test]
fn test_wheel_zoom_ignored_while_dragging() {
    let mut editor = test_editor();
    let mut modals = ScriptedModals::new();
    let wheel = |delta_y| vec![InputEvent::Wheel { delta_y }];

    editor.update(&FrameInput::new(at(0.0, 0.0), true, wheel(1.0)), &mut modals);
    assert_eq!(editor.camera().zoom, 1.0);

    editor.update(&frame(at(0.0, 0.0), wheel(1.0)), &mut modals);
    assert!((editor.camera().zoom - 1.2).abs() < 1e-12);

    press(&mut editor, &mut modals, at(0.0, 0.0), Key::Char('z'));
    assert_eq!(editor.camera().zoom, 1.0);
}

#[test]
fn test_secondary_button_does_not_select() {
    let (mut editor, _) = TestGraphBuilder::new().with_point(0.0, 0.0).build_editor();
    let mut modals = ScriptedModals::new();

    editor.update(
        &frame(
            at(450.0, 250.0),
            vec![InputEvent::MouseDown {
                button: MouseButton::Secondary,
                pos: at(450.0, 250.0),
            }],
        ),
        &mut modals,
    );
    assert!(editor.interaction().selection.is_none());
    assert!(!editor.interaction().is_dragging());
}
