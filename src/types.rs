//! Core types for the graph.
//!
//! Defines entity identifiers, positions, progress states and the three entity
//! kinds owned by the [`Store`](crate::store::Store): points, links and images.

use crate::constants::{LINK_RANK_WIDTHS, POINT_RANK_SIZES, RANK_COUNT};
use crate::error::{GraphError, GraphResult};
use image::RgbaImage;
use std::fmt;
use std::path::{Path, PathBuf};

// ============================================================================
// Identifiers
// ============================================================================

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }
    };
}

entity_id!(
    /// Identifier of a point, unique among points
    PointId
);
entity_id!(
    /// Identifier of a link, unique among links
    LinkId
);
entity_id!(
    /// Identifier of an image, unique among images
    ImageId
);

/// Smallest non-negative id for which `in_use` returns false
pub(crate) fn smallest_unused(in_use: impl Fn(u32) -> bool) -> u32 {
    (0..).find(|&id| !in_use(id)).unwrap_or(u32::MAX)
}

// ============================================================================
// Positions
// ============================================================================

/// Position in graph space (unbounded, independent of scroll and zoom)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GraphPos {
    pub x: f64,
    pub y: f64,
}

impl GraphPos {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Position in screen space, in pixels from the top-left of the viewport
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenPos {
    pub x: f64,
    pub y: f64,
}

impl ScreenPos {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// ============================================================================
// Ranks
// ============================================================================

/// Index into the rank tables, clamping out-of-range ranks
#[inline]
pub fn rank_index(rank: i32) -> usize {
    rank.clamp(0, RANK_COUNT - 1) as usize
}

/// Pixel size of a point box of the given rank
#[inline]
pub fn point_size(rank: i32) -> f64 {
    POINT_RANK_SIZES[rank_index(rank)]
}

/// Pixel width of a link line of the given rank
#[inline]
pub fn link_width(rank: i32) -> f64 {
    LINK_RANK_WIDTHS[rank_index(rank)]
}

// ============================================================================
// Progress State
// ============================================================================

/// Progress of a point, and derived progress of a link
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProgressState {
    #[default]
    Todo,
    Doing,
    Completed,
}

impl ProgressState {
    pub const ALL: [ProgressState; 3] = [Self::Todo, Self::Doing, Self::Completed];

    /// Integer used for this state in save files
    pub fn code(self) -> u8 {
        match self {
            Self::Todo => 0,
            Self::Doing => 1,
            Self::Completed => 2,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Todo),
            1 => Some(Self::Doing),
            2 => Some(Self::Completed),
            _ => None,
        }
    }

    /// Next state in the editing cycle: todo -> completed -> doing -> todo
    pub fn cycled(self) -> Self {
        match self {
            Self::Todo => Self::Completed,
            Self::Completed => Self::Doing,
            Self::Doing => Self::Todo,
        }
    }
}

impl fmt::Display for ProgressState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Completed => "completed",
        })
    }
}

// ============================================================================
// Entities
// ============================================================================

/// A milestone placed on the canvas
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    pub id: PointId,
    pub pos: GraphPos,
    /// Raw rank; lookups clamp it into the rank tables
    pub rank: i32,
    pub state: ProgressState,
    pub text: Option<String>,
    /// Shared, non-owning reference into the store's images
    pub image: Option<ImageId>,
}

impl Point {
    pub fn new(id: PointId, pos: GraphPos, rank: i32, state: ProgressState) -> Self {
        Self {
            id,
            pos,
            rank,
            state,
            text: None,
            image: None,
        }
    }

    /// Pixel size of this point's box
    pub fn size(&self) -> f64 {
        point_size(self.rank)
    }
}

/// Endpoints of a link. A pending link only knows where it starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkEnds {
    Pending { p1: PointId },
    Complete { p1: PointId, p2: PointId },
}

impl LinkEnds {
    pub fn p1(&self) -> PointId {
        match *self {
            LinkEnds::Pending { p1 } | LinkEnds::Complete { p1, .. } => p1,
        }
    }

    pub fn p2(&self) -> Option<PointId> {
        match *self {
            LinkEnds::Pending { .. } => None,
            LinkEnds::Complete { p2, .. } => Some(p2),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, LinkEnds::Complete { .. })
    }

    /// True if either endpoint is `point`
    pub fn touches(&self, point: PointId) -> bool {
        self.p1() == point || self.p2() == Some(point)
    }

    /// True if this is a completed link between `a` and `b`, in either direction
    pub fn connects(&self, a: PointId, b: PointId) -> bool {
        match *self {
            LinkEnds::Complete { p1, p2 } => (p1 == a && p2 == b) || (p1 == b && p2 == a),
            LinkEnds::Pending { .. } => false,
        }
    }
}

/// A dependency between two points
#[derive(Clone, Debug, PartialEq)]
pub struct Link {
    pub id: LinkId,
    pub ends: LinkEnds,
    /// Highest rank of the endpoints (p1's alone while pending)
    pub rank: i32,
    /// Most advanced state of the endpoints (p1's alone while pending)
    pub state: ProgressState,
}

impl Link {
    /// Pixel width of the rendered line
    pub fn width(&self) -> f64 {
        link_width(self.rank)
    }

    /// Hit tolerance around the line, in pixels
    pub fn tolerance(&self) -> f64 {
        self.width() / 2.0
    }
}

/// Decoded picture that points can display
#[derive(Clone)]
pub struct Image {
    pub id: ImageId,
    pub path: PathBuf,
    /// File stem of `path`, used as a display name
    pub name: String,
    pub pixels: RgbaImage,
}

impl Image {
    pub fn new(id: ImageId, path: impl Into<PathBuf>, pixels: RgbaImage) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            id,
            path,
            name,
            pixels,
        }
    }

    /// Decode the file at `path`
    pub fn load(id: ImageId, path: &Path) -> GraphResult<Self> {
        let decoded = image::open(path).map_err(|source| GraphError::Image {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(id, path, decoded.to_rgba8()))
    }

    /// Pixel dimensions (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Size of this image scaled to fit a `bound`×`bound` square, keeping its aspect ratio
    pub fn fit_within(&self, bound: f64) -> (f64, f64) {
        let (w, h) = self.dimensions();
        let (w, h) = (f64::from(w.max(1)), f64::from(h.max(1)));
        if w > h {
            (bound, bound * h / w)
        } else {
            (bound * w / h, bound)
        }
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("id", &self.id)
            .field("path", &self.path)
            .field("name", &self.name)
            .field("dimensions", &self.dimensions())
            .finish()
    }
}
