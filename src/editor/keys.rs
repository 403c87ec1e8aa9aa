//! Keyboard commands.
//!
//! Escape, Return and the reset-zoom key work in every state. The remaining
//! commands depend on what is selected: nothing, a point or a link.

use super::Editor;
use crate::constants::PROMPT_SIDE_MARGIN;
use crate::error::GraphResult;
use crate::input::{Key, Selection};
use crate::modal::{Modals, PromptRequest};
use crate::persistence::{is_encodable_path, is_encodable_text};
use crate::settings::Command;
use crate::types::{Image, LinkId, PointId, ProgressState};
use std::path::PathBuf;
use tracing::{debug, info};

fn parse_path(input: &str) -> Option<PathBuf> {
    Some(PathBuf::from(input))
}

fn parse_text(input: &str) -> Option<String> {
    Some(input.to_string())
}

impl Editor {
    pub(super) fn key<M: Modals>(&mut self, key: Key, modals: &mut M) -> GraphResult<()> {
        match key {
            Key::Escape => {
                self.escape()?;
                return Ok(());
            }
            Key::Return => {
                if !self.interaction.is_link_pending() {
                    self.interaction.clear_selection();
                }
                return Ok(());
            }
            _ => {}
        }

        let command = match key {
            Key::Char(c) => self.keymap.command_for(c),
            _ => None,
        };
        if command == Some(Command::ResetZoom) {
            self.camera.reset_zoom();
            return Ok(());
        }

        match self.interaction.selection {
            Selection::None => match command {
                Some(command) => self.idle_command(command, modals),
                None => Ok(()),
            },
            Selection::Point(id) if key == Key::Delete => self.delete_from_point(id),
            Selection::Point(id) => match command {
                Some(command) => self.point_command(id, command, modals),
                None => Ok(()),
            },
            Selection::Link(id) if key == Key::Delete => self.delete_link(id),
            Selection::Link(_) => Ok(()),
        }
    }

    /// Abort the pending link, or drop the selection
    fn escape(&mut self) -> GraphResult<()> {
        match self.interaction.pending_link.take() {
            Some(link) => {
                if self.store.link(link).is_some() {
                    self.store.delete_link(link)?;
                }
                debug!(link = %link, "Pending link aborted");
            }
            None => self.interaction.clear_selection(),
        }
        Ok(())
    }

    // ==================== Nothing Selected ====================

    fn idle_command<M: Modals>(&mut self, command: Command, modals: &mut M) -> GraphResult<()> {
        match command {
            Command::NewPoint => {
                let pos = self.camera.to_graph(self.mouse);
                self.store.create_point(pos, 0, ProgressState::Todo, None)?;
            }
            Command::Save => self.save()?,
            Command::Open => {
                let is_file = |path: &PathBuf| path.is_file();
                let request = PromptRequest::<PathBuf>::new("Enter save file:", &parse_path, &is_file);
                if let Some(path) = modals.prompt(&request) {
                    self.open(&path)?;
                }
            }
            Command::Image => {
                let usable = |path: &PathBuf| path.is_file() && is_encodable_path(path);
                let request =
                    PromptRequest::<PathBuf>::new("Enter valid image path:", &parse_path, &usable);
                if let Some(path) = modals.prompt(&request) {
                    let id = self.store.create_image(&path, None)?;
                    info!(image = %id, path = %path.display(), "Image registered");
                }
            }
            _ => {}
        }
        Ok(())
    }

    // ==================== Point Selected ====================

    fn point_command<M: Modals>(
        &mut self,
        id: PointId,
        command: Command,
        modals: &mut M,
    ) -> GraphResult<()> {
        match command {
            Command::StartLink if !self.interaction.is_link_pending() => {
                let link = self.store.create_link(id, None, None)?;
                self.interaction.pending_link = Some(link);
            }
            Command::Image => {
                let images: Vec<&Image> = self.store.images().collect();
                if let Some(image) = modals.choose_image(&images) {
                    self.store.attach_image(id, image)?;
                }
            }
            Command::Text => {
                let max_width = self.camera.width - 2.0 * PROMPT_SIDE_MARGIN;
                let encodable = |text: &String| is_encodable_text(text);
                let request = PromptRequest::<String>::new("Enter point text:", &parse_text, &encodable)
                    .with_max_width(max_width);
                if let Some(text) = modals.prompt(&request) {
                    self.store.attach_text(id, &text)?;
                }
            }
            Command::CycleRank => {
                self.store.cycle_rank(id)?;
            }
            Command::CycleState => {
                self.store.cycle_state(id)?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Remove the point's image, else its text, else the point itself
    fn delete_from_point(&mut self, id: PointId) -> GraphResult<()> {
        let Some(point) = self.store.point(id) else {
            self.interaction.clear_selection();
            return Ok(());
        };
        let (has_image, has_text) = (point.image.is_some(), point.text.is_some());

        if has_image {
            self.store.clear_image(id)?;
        } else if has_text {
            self.store.clear_text(id)?;
        } else {
            self.store.delete_point(id)?;
            self.interaction.clear_selection();
            self.forget_removed();
        }
        Ok(())
    }

    // ==================== Link Selected ====================

    fn delete_link(&mut self, id: LinkId) -> GraphResult<()> {
        self.store.delete_link(id)?;
        self.interaction.clear_selection();
        self.forget_removed();
        Ok(())
    }

    /// Drop interaction references to entities that no longer exist
    fn forget_removed(&mut self) {
        let pending_gone = self
            .interaction
            .pending_link
            .is_some_and(|link| self.store.link(link).is_none());
        if pending_gone {
            self.interaction.pending_link = None;
        }
        self.interaction.hovered = Selection::None;
    }
}
