//! Mouse handling - selection, link completion, drag and zoom.
//!
//! ## Performance Notes
//!
//! Hover refresh and drag application run every frame. Both are bounded by
//! the visible points plus the links; nothing rescans the whole store twice.
//!
//! Enable profiling with `cargo build --features profiling` to see timing.

use super::Editor;
use crate::error::GraphResult;
use crate::hit_testing;
use crate::input::{DragKind, MouseButton, Selection};
use crate::profile_scope;
use crate::types::{GraphPos, ScreenPos};
use tracing::debug;

impl Editor {
    /// Recompute the object under the mouse
    pub(super) fn refresh_hover(&mut self) {
        profile_scope!("refresh_hover");

        self.interaction.hovered = hit_testing::pick(
            &self.store,
            &self.camera,
            self.mouse,
            self.interaction.is_link_pending(),
        );
    }

    pub(super) fn mouse_down(&mut self, button: MouseButton, pos: ScreenPos) -> GraphResult<()> {
        if button != MouseButton::Primary {
            return Ok(());
        }

        let hovered = self.interaction.hovered;
        self.interaction.selection = hovered;
        debug!(selection = ?hovered, "Selection changed");

        match hovered {
            Selection::None => self.interaction.start_pan(self.camera.scroll(), pos),
            Selection::Point(id) => {
                if let Some(point) = self.store.point(id) {
                    self.interaction.start_move(id, point.pos, pos);
                }
            }
            // Links have no position to drag.
            Selection::Link(_) => {}
        }

        if let (Selection::Point(target), Some(link)) = (hovered, self.interaction.pending_link) {
            let starts_here = self
                .store
                .link(link)
                .is_some_and(|pending| pending.ends.p1() == target);
            if !starts_here && self.store.complete_link(link, target)? {
                self.interaction.pending_link = None;
                self.interaction.end_drag();
                self.interaction.clear_selection();
            }
        }
        Ok(())
    }

    pub(super) fn mouse_up(&mut self, button: MouseButton) {
        if button == MouseButton::Primary {
            self.interaction.end_drag();
        }
    }

    /// Zoom one step per event; ignored while the primary button is held
    pub(super) fn wheel(&mut self, delta_y: f64, primary_held: bool) {
        if primary_held {
            return;
        }
        if delta_y > 0.0 {
            self.camera.zoom_in();
        } else if delta_y < 0.0 {
            self.camera.zoom_out();
        }
    }

    /// Move the dragged point or the camera.
    ///
    /// Recomputed from the fixed anchor each frame, so no error accumulates.
    pub(super) fn apply_drag(&mut self) {
        profile_scope!("apply_drag");

        let Some(anchor) = self.interaction.drag else {
            return;
        };
        let (dx, dy) = self.camera.delta_to_graph(
            anchor.mouse_start.x - self.mouse.x,
            anchor.mouse_start.y - self.mouse.y,
        );

        match anchor.kind {
            DragKind::Pan => {
                self.camera
                    .scroll_to(GraphPos::new(anchor.origin.x + dx, anchor.origin.y + dy));
            }
            DragKind::MovePoint(id) => {
                let target = GraphPos::new(anchor.origin.x - dx, anchor.origin.y - dy);
                if self.store.set_position(id, target).is_err() {
                    // The point was deleted mid-drag.
                    self.interaction.end_drag();
                }
            }
        }
    }
}
