//! Input types for the canvas.
//!
//! ## Modules
//!
//! - `coords` - Camera: graph/screen conversion, zoom and scroll
//! - `events` - Per-frame input events
//! - `state` - Interaction state machine (selection, pending link, drag anchor)

pub mod coords;
pub mod events;
mod state;

pub use coords::Camera;
pub use events::{FrameInput, InputEvent, Key, MouseButton};
pub use state::{DragAnchor, DragKind, InteractionMode, InteractionState, Selection};
