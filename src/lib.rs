//! Progression graph editor engine.
//!
//! A graph of milestone points joined by links, shown on a pan/zoom canvas and
//! persisted in a line-oriented text format. The windowing layer plugs in
//! through [`app::Backend`].

pub mod app;
pub mod constants;
pub mod editor;
pub mod error;
pub mod hit_testing;
pub mod input;
pub mod modal;
pub mod perf;
pub mod persistence;
pub mod render;
pub mod settings;
pub mod spatial_index;
pub mod store;
pub mod types;

pub use app::{App, Backend};
pub use editor::Editor;
pub use error::{GraphError, GraphResult};
pub use settings::EditorSettings;
pub use store::Store;
pub use types::{
    GraphPos, Image, ImageId, Link, LinkEnds, LinkId, Point, PointId, ProgressState, ScreenPos,
};
