//! Save file writer.
//!
//! Sections are written in a fixed order (points, links, referenced images,
//! point images, point text), each after a blank line and a comment header.
//! The writer refuses values the reader would not give back unchanged.

use crate::error::{GraphError, GraphResult};
use crate::store::Store;
use crate::types::{Image, LinkEnds};
use std::fmt::{self, Write as _};
use std::fs;
use std::io::Write as _;
use std::path::Path;
use tempfile::NamedTempFile;

const TITLE: &str = "# progression graph";

/// True if `text` survives a write/read cycle as point text
pub fn is_encodable_text(text: &str) -> bool {
    !text.is_empty()
        && !text.chars().any(|c| c.is_control() || c == '#')
        && text.trim() == text
        && !text.contains("  ")
}

/// True if `path` survives a write/read cycle as an image path
pub fn is_encodable_path(path: &Path) -> bool {
    path.to_str()
        .is_some_and(|s| !s.is_empty() && !s.chars().any(|c| c.is_whitespace() || c == '#'))
}

/// Render the store as save file text.
///
/// Pending links and images no point refers to are left out.
pub fn serialize(store: &Store) -> GraphResult<String> {
    check_encodable(store)?;

    let mut out = String::new();
    writeln!(out, "{TITLE}")?;
    write_points(&mut out, store)?;
    write_links(&mut out, store)?;
    write_images(&mut out, store)?;
    write_point_images(&mut out, store)?;
    write_text(&mut out, store)?;
    Ok(out)
}

fn referenced_images(store: &Store) -> impl Iterator<Item = &Image> + '_ {
    store
        .images()
        .filter(|image| store.is_image_referenced(image.id))
}

fn check_encodable(store: &Store) -> GraphResult<()> {
    for point in store.points() {
        check_coordinate(point.pos.x)?;
        check_coordinate(point.pos.y)?;
        if let Some(text) = point.text.as_deref().filter(|text| !is_encodable_text(text)) {
            return Err(GraphError::Unencodable {
                what: "text",
                value: text.to_string(),
            });
        }
    }
    if let Some(image) = referenced_images(store).find(|image| !is_encodable_path(&image.path)) {
        return Err(GraphError::Unencodable {
            what: "image path",
            value: image.path.display().to_string(),
        });
    }
    Ok(())
}

fn check_coordinate(value: f64) -> GraphResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GraphError::Unencodable {
            what: "coordinate",
            value: value.to_string(),
        })
    }
}

// ==================== Sections ====================

fn write_points(out: &mut String, store: &Store) -> fmt::Result {
    writeln!(out, "\n# POINTS")?;
    for point in store.points() {
        writeln!(
            out,
            "P {} {} {} {} {}",
            point.pos.x,
            point.pos.y,
            point.rank,
            point.state.code(),
            point.id
        )?;
    }
    Ok(())
}

fn write_links(out: &mut String, store: &Store) -> fmt::Result {
    writeln!(out, "\n# LINKS")?;
    for link in store.links() {
        if let LinkEnds::Complete { p1, p2 } = link.ends {
            writeln!(out, "L {} {} {}", p1, p2, link.id)?;
        }
    }
    Ok(())
}

fn write_images(out: &mut String, store: &Store) -> fmt::Result {
    writeln!(out, "\n# IMAGES")?;
    for image in referenced_images(store) {
        writeln!(out, "I {} {}", image.path.display(), image.id)?;
    }
    Ok(())
}

fn write_point_images(out: &mut String, store: &Store) -> fmt::Result {
    writeln!(out, "\n# POINT IMAGES")?;
    for point in store.points() {
        if let Some(image) = point.image {
            writeln!(out, "Ai {} {}", point.id, image)?;
        }
    }
    Ok(())
}

fn write_text(out: &mut String, store: &Store) -> fmt::Result {
    writeln!(out, "\n# TEXT")?;
    for point in store.points() {
        if let Some(text) = &point.text {
            writeln!(out, "At {} {}", point.id, text)?;
        }
    }
    Ok(())
}

/// Write `content` to `path` through a temporary file in the same directory.
///
/// An existing file keeps its permissions.
pub fn write_atomic(path: &Path, content: &str) -> GraphResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(|e| GraphError::io(dir, e))?;
    file.write_all(content.as_bytes())
        .and_then(|()| file.as_file().sync_all())
        .map_err(|e| GraphError::io(file.path(), e))?;
    if let Ok(existing) = fs::metadata(path) {
        file.as_file()
            .set_permissions(existing.permissions())
            .map_err(|e| GraphError::io(file.path(), e))?;
    }
    file.persist(path).map_err(|e| GraphError::io(path, e.error))?;
    Ok(())
}
