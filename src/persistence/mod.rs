//! Persistence - the line-oriented save file format.
//!
//! ## Modules
//!
//! - `parser` - Line normalization, command decoding, replay into a store
//! - `writer` - Serialization and atomic file writes

mod parser;
mod writer;

pub use parser::{SaveCommand, SaveLine, apply, normalize_line, parse, read_into, replay};
pub use writer::{is_encodable_path, is_encodable_text, serialize, write_atomic};

use crate::error::{GraphError, GraphResult};
use crate::store::Store;
use std::fs;
use std::path::Path;
use tracing::info;

/// Read a save file into a new store.
///
/// Lines are replayed in file order into a scratch store that is only
/// returned once the whole file has loaded.
pub fn load(path: &Path) -> GraphResult<Store> {
    let text = fs::read_to_string(path).map_err(|e| GraphError::io(path, e))?;
    let store = replay(&text)?;
    info!(
        path = %path.display(),
        points = store.point_count(),
        links = store.link_count(),
        images = store.image_count(),
        "Graph loaded"
    );
    Ok(store)
}

/// Write the store to `path`, replacing the file atomically
pub fn save(store: &Store, path: &Path) -> GraphResult<()> {
    let text = serialize(store)?;
    write_atomic(path, &text)?;
    info!(
        path = %path.display(),
        points = store.point_count(),
        links = store.link_count(),
        "Graph saved"
    );
    Ok(())
}
