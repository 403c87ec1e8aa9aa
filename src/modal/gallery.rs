//! Image gallery - a scrollable grid of every loaded image.
//!
//! Thumbnails are fitted into a square and placed on a grid of fixed cells
//! starting at the top-left margin. A primary click on a thumbnail chooses it.

use crate::constants::{
    GALLERY_CELL_SIZE, GALLERY_HOVER_PADDING, GALLERY_MARGIN, GALLERY_SCROLL_STEP,
    GALLERY_THUMB_SIZE,
};
use crate::input::{InputEvent, Key, MouseButton};
use crate::types::{Image, ImageId, ScreenPos};

/// Outcome of feeding one event to the gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryAction {
    Continue,
    Chosen(ImageId),
    Cancel,
    /// Application quit requested; must be re-queued by the caller
    Quit,
}

/// One thumbnail slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thumbnail {
    pub image: ImageId,
    /// Thumbnail size after fitting into the thumbnail square
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone)]
pub struct Gallery {
    thumbnails: Vec<Thumbnail>,
    columns: usize,
    scroll: f64,
    width: f64,
    height: f64,
}

impl Gallery {
    /// Lay out `images` for a viewport of `width`×`height` pixels
    pub fn new(images: &[&Image], width: f64, height: f64) -> Self {
        let thumbnails = images
            .iter()
            .map(|image| {
                let (w, h) = image.fit_within(GALLERY_THUMB_SIZE);
                Thumbnail {
                    image: image.id,
                    width: w,
                    height: h,
                }
            })
            .collect();
        let columns = (((width - GALLERY_MARGIN) / GALLERY_CELL_SIZE).floor() as usize).max(1);
        Self {
            thumbnails,
            columns,
            scroll: 0.0,
            width,
            height,
        }
    }

    pub fn thumbnails(&self) -> &[Thumbnail] {
        &self.thumbnails
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn scroll(&self) -> f64 {
        self.scroll
    }

    pub fn viewport(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Height of the whole grid including the top margin
    pub fn content_height(&self) -> f64 {
        let rows = self.thumbnails.len().div_ceil(self.columns);
        rows as f64 * GALLERY_CELL_SIZE + GALLERY_MARGIN
    }

    /// Scrolling is only possible when the grid is taller than the viewport
    pub fn can_scroll(&self) -> bool {
        self.content_height() > self.height
    }

    /// Wheel notches; positive scrolls towards the top
    pub fn scroll_by(&mut self, delta_y: f64) {
        if !self.can_scroll() {
            return;
        }
        let max = self.content_height() - self.height;
        self.scroll = (self.scroll - GALLERY_SCROLL_STEP * delta_y).clamp(0.0, max);
    }

    /// Screen position of the top-left corner of thumbnail `index`
    pub fn cell_origin(&self, index: usize) -> ScreenPos {
        let column = (index % self.columns) as f64;
        let row = (index / self.columns) as f64;
        ScreenPos::new(
            GALLERY_MARGIN + GALLERY_CELL_SIZE * column,
            GALLERY_MARGIN + GALLERY_CELL_SIZE * row - self.scroll,
        )
    }

    /// True if thumbnail `index` shows at least partly on screen
    pub fn is_cell_visible(&self, index: usize) -> bool {
        let y = self.cell_origin(index).y;
        -GALLERY_THUMB_SIZE < y && y < self.height
    }

    /// Index of the thumbnail whose highlight cell contains `mouse`
    pub fn hovered(&self, mouse: ScreenPos) -> Option<usize> {
        (0..self.thumbnails.len()).find(|&index| {
            if !self.is_cell_visible(index) {
                return false;
            }
            let origin = self.cell_origin(index);
            let (left, top) = (origin.x - GALLERY_HOVER_PADDING, origin.y - GALLERY_HOVER_PADDING);
            let right = origin.x + GALLERY_THUMB_SIZE + GALLERY_HOVER_PADDING;
            let bottom = origin.y + GALLERY_THUMB_SIZE + GALLERY_HOVER_PADDING;
            left <= mouse.x && mouse.x < right && top <= mouse.y && mouse.y < bottom
        })
    }

    pub fn handle_event(&mut self, event: &InputEvent) -> GalleryAction {
        match *event {
            InputEvent::Quit => GalleryAction::Quit,
            InputEvent::Key(Key::Escape) => GalleryAction::Cancel,
            InputEvent::Wheel { delta_y } => {
                self.scroll_by(delta_y);
                GalleryAction::Continue
            }
            InputEvent::MouseDown {
                button: MouseButton::Primary,
                pos,
            } => self
                .hovered(pos)
                .map_or(GalleryAction::Continue, |index| {
                    GalleryAction::Chosen(self.thumbnails[index].image)
                }),
            _ => GalleryAction::Continue,
        }
    }
}
