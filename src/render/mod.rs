//! Rendering of the graph and the modals onto a drawing surface.
//!
//! ## Modules
//!
//! - `palette` - State colours and their hovered/selected variants
//! - `text` - Shortening and word wrapping of point text
//! - `scene` - Links, points and the help bar
//! - `overlays` - Text prompt and image gallery screens

pub mod overlays;
pub mod palette;
pub mod scene;
pub mod text;

pub use overlays::{draw_gallery, draw_prompt};
pub use palette::{Palette, Variant};
pub use scene::{draw_scene, help_text};

use crate::types::{Image, ScreenPos};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Axis-aligned rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square of side `size` centred on `center`
    pub fn centered(center: ScreenPos, size: f64) -> Self {
        Self::new(center.x - size / 2.0, center.y - size / 2.0, size, size)
    }

    /// Shrink by `margin` on every side
    pub fn inset(&self, margin: f64) -> Self {
        Self::new(
            self.x + margin,
            self.y + margin,
            self.width - 2.0 * margin,
            self.height - 2.0 * margin,
        )
    }
}

/// Font used for a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    /// Help bar, prompts
    Normal,
    /// Point text
    Small,
}

/// Drawing capability supplied by the windowing backend
pub trait RenderSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn draw_line(&mut self, from: ScreenPos, to: ScreenPos, width: f64, color: Color);

    /// Draw `text` with its top-left corner at `pos`
    fn draw_text(&mut self, text: &str, pos: ScreenPos, size: TextSize, color: Color);

    /// Rendered width of `text` in pixels
    fn text_width(&self, text: &str, size: TextSize) -> f64;

    /// Draw `image` scaled into `rect`
    fn draw_image(&mut self, image: &Image, rect: Rect);
}
