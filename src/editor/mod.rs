//! Interaction controller for the graph canvas.
//!
//! The editor owns the store, the camera and the interaction state. Each frame
//! it recomputes the hovered object, handles the frame's events in order and
//! then applies the active drag.
//!
//! ## Modules
//!
//! - `mouse` - Button presses/releases, wheel zoom, hover and drag application
//! - `keys` - Keyboard commands dispatched on the selection kind

mod keys;
mod mouse;

use crate::error::{GraphError, GraphResult};
use crate::input::{Camera, FrameInput, InputEvent, InteractionState};
use crate::modal::Modals;
use crate::persistence;
use crate::settings::{EditorSettings, Keymap};
use crate::store::Store;
use crate::types::ScreenPos;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

pub struct Editor {
    store: Store,
    camera: Camera,
    interaction: InteractionState,
    save_path: Option<PathBuf>,
    keymap: Keymap,
    /// Mouse position of the frame being processed
    mouse: ScreenPos,
}

impl Editor {
    pub fn new(settings: &EditorSettings) -> Self {
        Self {
            store: Store::new(),
            camera: Camera::new(
                settings.viewport_width,
                settings.viewport_height,
                settings.unit_size,
            ),
            interaction: InteractionState::default(),
            save_path: None,
            keymap: settings.keymap.clone(),
            mouse: ScreenPos::default(),
        }
    }

    // ==================== Accessors ====================

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Direct store access, for callers building a graph programmatically
    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn save_path(&self) -> Option<&Path> {
        self.save_path.as_deref()
    }

    pub fn set_save_path(&mut self, path: impl Into<PathBuf>) {
        self.save_path = Some(path.into());
    }

    pub fn mouse(&self) -> ScreenPos {
        self.mouse
    }

    // ==================== Frame ====================

    /// Advance one frame.
    ///
    /// Failed operations are logged and leave the graph as it was.
    pub fn update<M: Modals>(&mut self, input: &FrameInput, modals: &mut M) {
        self.mouse = input.mouse;
        self.refresh_hover();

        for event in &input.events {
            if let Err(e) = self.handle_event(event, input.primary_held, modals) {
                error!(error = %e, "Editor operation failed");
            }
        }

        self.apply_drag();
    }

    /// Handle a single event against the current hover state
    pub fn handle_event<M: Modals>(
        &mut self,
        event: &InputEvent,
        primary_held: bool,
        modals: &mut M,
    ) -> GraphResult<()> {
        match *event {
            InputEvent::MouseDown { button, pos } => self.mouse_down(button, pos),
            InputEvent::MouseUp { button, .. } => {
                self.mouse_up(button);
                Ok(())
            }
            InputEvent::Wheel { delta_y } => {
                self.wheel(delta_y, primary_held);
                Ok(())
            }
            InputEvent::Key(key) => self.key(key, modals),
            // Quitting is the application loop's business.
            InputEvent::Quit => Ok(()),
        }
    }

    // ==================== Files ====================

    /// Replace the graph with the contents of `path`.
    ///
    /// On failure the current graph, save path and selection are kept.
    pub fn open(&mut self, path: &Path) -> GraphResult<()> {
        let store = persistence::load(path)?;
        self.store = store;
        self.interaction.reset();
        self.save_path = Some(path.to_path_buf());
        self.refresh_hover();
        debug!(path = %path.display(), "Save file opened");
        Ok(())
    }

    /// Open `path` if it exists, otherwise start empty with it as the save target
    pub fn open_or_create(&mut self, path: &Path) -> GraphResult<()> {
        if path.exists() {
            return self.open(path);
        }
        info!(path = %path.display(), "Save file not found, starting an empty graph");
        self.store.reset();
        self.interaction.reset();
        self.save_path = Some(path.to_path_buf());
        Ok(())
    }

    pub fn save(&self) -> GraphResult<()> {
        let path = self.save_path.as_deref().ok_or(GraphError::NoSaveFile)?;
        persistence::save(&self.store, path)
    }
}
