//! Interaction state machine - selection, hover, pending link and drag anchor.
//!
//! ## State Transitions
//!
//! ```text
//! Idle          -> SelectedPoint   (primary press on a point)
//! Idle          -> SelectedLink    (primary press on a link)
//! SelectedPoint -> LinkPending     (start-link key)
//! LinkPending   -> Idle            (press on another point completes the link)
//! LinkPending   -> SelectedPoint   (Escape aborts the link)
//! Any           -> Idle            (press on empty canvas, Escape, Return)
//!
//! Dragging overlays any state while a drag anchor is armed.
//! ```

use crate::types::{GraphPos, LinkId, PointId, ScreenPos};

/// The hovered or selected object; points and links are mutually exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Point(PointId),
    Link(LinkId),
}

impl Selection {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn point(&self) -> Option<PointId> {
        match *self {
            Self::Point(id) => Some(id),
            _ => None,
        }
    }

    pub fn link(&self) -> Option<LinkId> {
        match *self {
            Self::Link(id) => Some(id),
            _ => None,
        }
    }
}

/// What a drag moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    /// Pan the camera
    Pan,
    /// Move one point
    MovePoint(PointId),
}

/// Fixed values a drag is recomputed from every frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragAnchor {
    pub kind: DragKind,
    /// Scroll offset (pan) or point position (move) when the drag began
    pub origin: GraphPos,
    /// Mouse position when the drag began
    pub mouse_start: ScreenPos,
}

/// Derived view of the interaction state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    Idle,
    SelectedPoint,
    SelectedLink,
    /// A point is selected and a half-built link starts from it
    LinkPending,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    pub hovered: Selection,
    pub selection: Selection,
    pub pending_link: Option<LinkId>,
    pub drag: Option<DragAnchor>,
}

impl InteractionState {
    pub fn mode(&self) -> InteractionMode {
        match (self.selection, self.pending_link) {
            (_, Some(_)) => InteractionMode::LinkPending,
            (Selection::Point(_), None) => InteractionMode::SelectedPoint,
            (Selection::Link(_), None) => InteractionMode::SelectedLink,
            (Selection::None, None) => InteractionMode::Idle,
        }
    }

    /// Returns true if a drag anchor is armed
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_link_pending(&self) -> bool {
        self.pending_link.is_some()
    }

    pub fn selected_point(&self) -> Option<PointId> {
        self.selection.point()
    }

    pub fn selected_link(&self) -> Option<LinkId> {
        self.selection.link()
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::None;
    }

    pub fn start_pan(&mut self, scroll: GraphPos, mouse: ScreenPos) {
        self.drag = Some(DragAnchor {
            kind: DragKind::Pan,
            origin: scroll,
            mouse_start: mouse,
        });
    }

    pub fn start_move(&mut self, point: PointId, pos: GraphPos, mouse: ScreenPos) {
        self.drag = Some(DragAnchor {
            kind: DragKind::MovePoint(point),
            origin: pos,
            mouse_start: mouse,
        });
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Forget everything; used after a new graph is opened
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
