//! Blocking modal capabilities used by the editor.
//!
//! Both modals run their own nested input loop until the user confirms,
//! cancels or asks to quit. A quit observed inside a modal cancels it and is
//! handed back to the outer loop.
//!
//! ## Modules
//!
//! - `prompt` - Single-line text input with live parse/validate checks
//! - `gallery` - Scrollable grid of loaded images

pub mod gallery;
pub mod prompt;

pub use gallery::{Gallery, GalleryAction, Thumbnail};
pub use prompt::{PromptAction, PromptError, PromptRequest, TextPrompt};

use crate::types::{Image, ImageId};

/// Modal capabilities the editor invokes from its key handlers
pub trait Modals {
    /// Ask for a value; `None` if the user cancelled or quit
    fn prompt<T>(&mut self, request: &PromptRequest<'_, T>) -> Option<T>;

    /// Let the user pick one of `images`; `None` if nothing was chosen
    fn choose_image(&mut self, images: &[&Image]) -> Option<ImageId>;
}
