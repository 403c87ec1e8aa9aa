//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestGraphBuilder` - Builder pattern for creating stores with points and links
//! - `ScriptedModals` - Modal answers queued up front
//! - `HeadlessBackend` - A backend that plays back scripted frames
//! - Frame helpers like `click()` and `press()`

use progression_graph::app::Backend;
use progression_graph::editor::Editor;
use progression_graph::input::{FrameInput, InputEvent, Key, MouseButton};
use progression_graph::modal::{Modals, PromptRequest};
use progression_graph::render::{Color, Rect, RenderSurface, TextSize};
use progression_graph::settings::EditorSettings;
use progression_graph::store::Store;
use progression_graph::types::{GraphPos, Image, ImageId, PointId, ProgressState, ScreenPos};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Width of one character in the fake monospace font
pub const CHAR_WIDTH: f64 = 8.0;

// ============================================================================
// TestGraphBuilder - Builder pattern for creating test stores
// ============================================================================

/// Builder for creating test stores.
///
/// Links refer to points by the order they were added in.
pub struct TestGraphBuilder {
    points: Vec<(GraphPos, i32, ProgressState)>,
    links: Vec<(usize, usize)>,
}

impl Default for TestGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestGraphBuilder {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            links: Vec::new(),
        }
    }

    /// Add a rank 0 todo point
    pub fn with_point(self, x: f64, y: f64) -> Self {
        self.with_ranked_point(x, y, 0, ProgressState::Todo)
    }

    pub fn with_ranked_point(mut self, x: f64, y: f64, rank: i32, state: ProgressState) -> Self {
        self.points.push((GraphPos::new(x, y), rank, state));
        self
    }

    pub fn with_link(mut self, from: usize, to: usize) -> Self {
        self.links.push((from, to));
        self
    }

    pub fn build(self) -> (Store, Vec<PointId>) {
        let mut store = Store::new();
        let ids: Vec<PointId> = self
            .points
            .into_iter()
            .map(|(pos, rank, state)| store.create_point(pos, rank, state, None).unwrap())
            .collect();
        for (from, to) in self.links {
            store.create_link(ids[from], Some(ids[to]), None).unwrap();
        }
        (store, ids)
    }

    /// Build straight into an editor with default settings
    pub fn build_editor(self) -> (Editor, Vec<PointId>) {
        let (store, ids) = self.build();
        let mut editor = test_editor();
        *editor.store_mut() = store;
        (editor, ids)
    }
}

pub fn test_editor() -> Editor {
    Editor::new(&EditorSettings::default())
}

// ============================================================================
// ScriptedModals
// ============================================================================

/// Answers prompts and gallery requests from queues.
///
/// A prompt answer that does not pass the request's checks counts as a
/// cancellation, like a user giving up on an invalid entry.
#[derive(Default)]
pub struct ScriptedModals {
    answers: VecDeque<String>,
    choices: VecDeque<Option<ImageId>>,
    /// Messages of every prompt shown
    pub prompts: Vec<String>,
    /// Number of images offered by each gallery shown
    pub galleries: Vec<usize>,
}

impl ScriptedModals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, text: impl Into<String>) -> Self {
        self.answers.push_back(text.into());
        self
    }

    pub fn choose(mut self, image: Option<ImageId>) -> Self {
        self.choices.push_back(image);
        self
    }
}

impl Modals for ScriptedModals {
    fn prompt<T>(&mut self, request: &PromptRequest<'_, T>) -> Option<T> {
        self.prompts.push(request.message.to_string());
        let answer = self.answers.pop_front()?;
        let width = answer.chars().count() as f64 * CHAR_WIDTH;
        request.evaluate(&answer, width).ok()
    }

    fn choose_image(&mut self, images: &[&Image]) -> Option<ImageId> {
        self.galleries.push(images.len());
        self.choices.pop_front().flatten()
    }
}

// ============================================================================
// Frame helpers
// ============================================================================

pub fn frame(mouse: ScreenPos, events: Vec<InputEvent>) -> FrameInput {
    FrameInput::new(mouse, false, events)
}

/// Press and release the primary button at `pos` within one frame
pub fn click(editor: &mut Editor, modals: &mut ScriptedModals, pos: ScreenPos) {
    editor.update(
        &frame(
            pos,
            vec![
                InputEvent::MouseDown {
                    button: MouseButton::Primary,
                    pos,
                },
                InputEvent::MouseUp {
                    button: MouseButton::Primary,
                    pos,
                },
            ],
        ),
        modals,
    );
}

/// Press a key with the mouse at `mouse`
pub fn press(editor: &mut Editor, modals: &mut ScriptedModals, mouse: ScreenPos, key: Key) {
    editor.update(&frame(mouse, vec![InputEvent::Key(key)]), modals);
}

/// Move the mouse without any event
pub fn hover(editor: &mut Editor, modals: &mut ScriptedModals, mouse: ScreenPos) {
    editor.update(&frame(mouse, Vec::new()), modals);
}

pub fn screen_of(editor: &Editor, point: PointId) -> ScreenPos {
    let pos = editor.store().point(point).unwrap().pos;
    editor.camera().to_screen(pos)
}

// ============================================================================
// Files
// ============================================================================

/// Write a solid PNG of the given size and return its path
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    image::RgbaImage::from_pixel(width, height, image::Rgba([200, 80, 40, 255]))
        .save(&path)
        .unwrap();
    path
}

// ============================================================================
// HeadlessBackend
// ============================================================================

/// Backend that replays scripted frames and counts drawing calls.
///
/// Once the script runs out it reports a quit request.
#[derive(Default)]
pub struct HeadlessBackend {
    frames: VecDeque<Vec<InputEvent>>,
    requeued: Vec<InputEvent>,
    pub mouse: ScreenPos,
    pub presented: usize,
    pub texts: Vec<String>,
    pub rects: usize,
    pub lines: usize,
    pub images: usize,
}

impl HeadlessBackend {
    pub fn new(frames: Vec<Vec<InputEvent>>) -> Self {
        Self {
            frames: frames.into(),
            ..Self::default()
        }
    }

    pub fn with_mouse(mut self, mouse: ScreenPos) -> Self {
        self.mouse = mouse;
        self
    }

    pub fn drew_text(&self, needle: &str) -> bool {
        self.texts.iter().any(|text| text.contains(needle))
    }
}

impl RenderSurface for HeadlessBackend {
    fn fill_rect(&mut self, _rect: Rect, _color: Color) {
        self.rects += 1;
    }

    fn draw_line(&mut self, _from: ScreenPos, _to: ScreenPos, _width: f64, _color: Color) {
        self.lines += 1;
    }

    fn draw_text(&mut self, text: &str, _pos: ScreenPos, _size: TextSize, _color: Color) {
        self.texts.push(text.to_string());
    }

    fn text_width(&self, text: &str, _size: TextSize) -> f64 {
        text.chars().count() as f64 * CHAR_WIDTH
    }

    fn draw_image(&mut self, _image: &Image, _rect: Rect) {
        self.images += 1;
    }
}

impl Backend for HeadlessBackend {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events: Vec<InputEvent> = self.requeued.drain(..).collect();
        match self.frames.pop_front() {
            Some(frame) => events.extend(frame),
            None => events.push(InputEvent::Quit),
        }
        events
    }

    fn requeue(&mut self, event: InputEvent) {
        self.requeued.push(event);
    }

    fn mouse_position(&self) -> ScreenPos {
        self.mouse
    }

    fn primary_held(&self) -> bool {
        false
    }

    fn present(&mut self) {
        self.presented += 1;
    }

    fn wait(&mut self, _duration: Duration) {}
}

/// Key events typing `text`
pub fn typed(text: &str) -> Vec<InputEvent> {
    text.chars().map(|c| InputEvent::Key(Key::Char(c))).collect()
}
