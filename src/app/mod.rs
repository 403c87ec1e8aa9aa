//! Application module - the frame loop tying a windowing backend to the editor.
//!
//! This module is organized into:
//! - `Backend` - What a windowing layer must supply: drawing, input, pacing
//! - `App` - Startup, the per-frame tick and the run loop
//! - `modals` - Prompt and gallery loops that take over the backend while open

mod modals;

pub use modals::BackendModals;

use crate::editor::Editor;
use crate::input::{FrameInput, InputEvent};
use crate::perf::FrameClock;
use crate::render::{RenderSurface, draw_scene};
use crate::settings::EditorSettings;
use crate::types::ScreenPos;
use anyhow::Context;
use std::time::Duration;
use tracing::{debug, info};

/// Windowing layer the application runs on
pub trait Backend: RenderSurface {
    /// Drain the events received since the last call
    fn poll_events(&mut self) -> Vec<InputEvent>;

    /// Put an event back so the next `poll_events` returns it first
    fn requeue(&mut self, event: InputEvent);

    fn mouse_position(&self) -> ScreenPos;

    fn primary_held(&self) -> bool;

    /// Show everything drawn since the previous call
    fn present(&mut self);

    /// Block until the next frame is due
    fn wait(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

pub struct App<B: Backend> {
    backend: B,
    editor: Editor,
    clock: FrameClock,
    settings: EditorSettings,
}

impl<B: Backend> App<B> {
    /// Create the editor and open the default save file, starting empty if
    /// the file does not exist yet
    pub fn new(backend: B, settings: EditorSettings) -> anyhow::Result<Self> {
        let mut editor = Editor::new(&settings);
        editor
            .open_or_create(&settings.default_save_file)
            .with_context(|| {
                format!(
                    "failed to open startup file {}",
                    settings.default_save_file.display()
                )
            })?;

        info!(
            points = editor.store().point_count(),
            links = editor.store().link_count(),
            "Editor ready"
        );

        Ok(Self {
            backend,
            clock: FrameClock::new(settings.fps),
            editor,
            settings,
        })
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Run one frame. Returns false once the user asked to quit.
    pub fn tick(&mut self) -> bool {
        self.clock.begin_frame();

        let events = self.backend.poll_events();
        let input = FrameInput::new(
            self.backend.mouse_position(),
            self.backend.primary_held(),
            events,
        );
        if input.quit_requested() {
            debug!("Quit requested");
            return false;
        }

        let viewport = (self.editor.camera().width, self.editor.camera().height);
        let mut modals = BackendModals::new(&mut self.backend, viewport, self.settings.fps);
        self.editor.update(&input, &mut modals);

        draw_scene(&mut self.backend, &self.editor);
        self.backend.present();

        let wait = self.clock.end_frame();
        self.backend.wait(wait);
        true
    }

    /// Tick until quit
    pub fn run(mut self) -> anyhow::Result<()> {
        info!(fps = self.settings.fps, "Starting frame loop");
        while self.tick() {}
        info!(
            frames = self.clock.total_frames(),
            slow = format!("{:.1}%", self.clock.slow_frame_percentage()),
            "Frame loop stopped"
        );
        Ok(())
    }
}
