//! Application-wide constants.
//!
//! Centralizes the size tables, camera parameters and layout values shared by
//! the store, hit tester, modals and renderer.

// ============================================================================
// Ranks
// ============================================================================

/// Number of distinct ranks a point can have
pub const RANK_COUNT: i32 = 5;

/// Pixel size of a point box for each rank
pub const POINT_RANK_SIZES: [f64; RANK_COUNT as usize] = [40.0, 50.0, 60.0, 80.0, 100.0];

/// Pixel width of a link line for each rank
pub const LINK_RANK_WIDTHS: [f64; RANK_COUNT as usize] = [2.0, 3.0, 5.0, 8.0, 15.0];

/// Largest half-size a point box can have, used to widen culling queries
pub const MAX_POINT_HALF_SIZE: f64 = 50.0;

// ============================================================================
// Camera
// ============================================================================

/// Default viewport width in pixels
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 900.0;

/// Default viewport height in pixels
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 500.0;

/// Pixels per graph unit at zoom 1
pub const DEFAULT_UNIT_SIZE: f64 = 100.0;

/// Multiplicative zoom step for one wheel notch
pub const ZOOM_STEP: f64 = 1.2;

/// Minimum zoom level
pub const MIN_ZOOM: f64 = 0.01;

/// Default zoom level
pub const DEFAULT_ZOOM: f64 = 1.0;

// ============================================================================
// Timing
// ============================================================================

/// Default frame rate of the editor loop
pub const DEFAULT_FPS: u32 = 60;

/// Text cursor blink period in milliseconds
pub const CURSOR_BLINK_PERIOD_MS: u128 = 1000;

/// Portion of the blink period during which the cursor is shown
pub const CURSOR_VISIBLE_MS: u128 = 600;

// ============================================================================
// Files
// ============================================================================

/// Save file opened at startup
pub const DEFAULT_SAVE_FILE: &str = "test_save.txt";

// ============================================================================
// Point Text
// ============================================================================

/// Maximum width of point text before it is shortened or wrapped
pub const POINT_TEXT_MAX_WIDTH: f64 = 100.0;

/// Gap between the bottom of a point box and its text
pub const POINT_TEXT_GAP: f64 = 5.0;

/// Line height of wrapped point text
pub const POINT_TEXT_LINE_HEIGHT: f64 = 12.0;

/// Maximum outline margin of a point box
pub const POINT_MAX_MARGIN: f64 = 5.0;

// ============================================================================
// Help Bar
// ============================================================================

/// Height of the help bar at the top of the screen
pub const HELP_BAR_HEIGHT: f64 = 40.0;

/// Inset of the help text inside the bar
pub const HELP_BAR_PADDING: f64 = 12.0;

/// Opacity of the help bar while the mouse hovers it
pub const HELP_BAR_HOVER_ALPHA: u8 = 100;

// ============================================================================
// Text Prompt
// ============================================================================

/// Minimum width of the prompt's input box
pub const PROMPT_MIN_INPUT_WIDTH: f64 = 200.0;

/// Height of one line of prompt text
pub const PROMPT_LINE_HEIGHT: f64 = 16.0;

/// Margin kept on each side when a prompt input may span the window
pub const PROMPT_SIDE_MARGIN: f64 = 10.0;

// ============================================================================
// Image Gallery
// ============================================================================

/// Size a gallery thumbnail is fitted into
pub const GALLERY_THUMB_SIZE: f64 = 50.0;

/// Distance between two thumbnails, in both directions
pub const GALLERY_CELL_SIZE: f64 = 90.0;

/// Offset of the first thumbnail from the top-left corner
pub const GALLERY_MARGIN: f64 = 50.0;

/// Padding of the hover highlight around a thumbnail
pub const GALLERY_HOVER_PADDING: f64 = 10.0;

/// Pixels scrolled per wheel notch
pub const GALLERY_SCROLL_STEP: f64 = 20.0;
