//! Coordinate conversion between graph space and screen space.
//!
//! The camera holds the pan origin (`scroll_x`, `scroll_y`, in graph units),
//! the multiplicative zoom and the viewport size. The scroll origin is drawn at
//! the centre of the viewport.

use crate::constants::{
    DEFAULT_UNIT_SIZE, DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH, DEFAULT_ZOOM,
    MAX_POINT_HALF_SIZE, MIN_ZOOM, ZOOM_STEP,
};
use crate::types::{GraphPos, ScreenPos};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub scroll_x: f64,
    pub scroll_y: f64,
    pub zoom: f64,
    /// Pixels per graph unit at zoom 1
    pub unit_size: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT, DEFAULT_UNIT_SIZE)
    }
}

impl Camera {
    pub fn new(width: f64, height: f64, unit_size: f64) -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            zoom: DEFAULT_ZOOM,
            unit_size,
            width,
            height,
        }
    }

    /// Pixels per graph unit at the current zoom
    #[inline]
    pub fn scale(&self) -> f64 {
        self.zoom * self.unit_size
    }

    /// Convert a graph position to a screen position
    #[inline]
    pub fn to_screen(&self, pos: GraphPos) -> ScreenPos {
        ScreenPos::new(
            (pos.x - self.scroll_x) * self.scale() + self.width / 2.0,
            (pos.y - self.scroll_y) * self.scale() + self.height / 2.0,
        )
    }

    /// Convert a screen position to a graph position
    #[inline]
    pub fn to_graph(&self, pos: ScreenPos) -> GraphPos {
        GraphPos::new(
            (pos.x - self.width / 2.0) / self.scale() + self.scroll_x,
            (pos.y - self.height / 2.0) / self.scale() + self.scroll_y,
        )
    }

    /// Convert a pixel delta to a graph-space delta (for drag operations)
    #[inline]
    pub fn delta_to_graph(&self, dx: f64, dy: f64) -> (f64, f64) {
        (dx / self.scale(), dy / self.scale())
    }

    pub fn zoom_in(&mut self) {
        self.zoom *= ZOOM_STEP;
    }

    /// Zoom out one step, never below the minimum zoom
    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / ZOOM_STEP).max(MIN_ZOOM);
    }

    /// Back to zoom 1; scroll is unaffected
    pub fn reset_zoom(&mut self) {
        self.zoom = DEFAULT_ZOOM;
    }

    pub fn scroll_to(&mut self, pos: GraphPos) {
        self.scroll_x = pos.x;
        self.scroll_y = pos.y;
    }

    pub fn scroll(&self) -> GraphPos {
        GraphPos::new(self.scroll_x, self.scroll_y)
    }

    /// Graph-space rectangle that may contain visible point centres.
    ///
    /// The viewport is widened by the largest point half-size so boxes
    /// straddling the border are kept.
    pub fn culling_rect(&self) -> (GraphPos, GraphPos) {
        let min = self.to_graph(ScreenPos::new(-MAX_POINT_HALF_SIZE, -MAX_POINT_HALF_SIZE));
        let max = self.to_graph(ScreenPos::new(
            self.width + MAX_POINT_HALF_SIZE,
            self.height + MAX_POINT_HALF_SIZE,
        ));
        (min, max)
    }
}
