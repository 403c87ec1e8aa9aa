//! Hit testing - geometric predicates for points and links in screen space.
//!
//! ## Performance Notes
//!
//! Hover is recomputed every frame. Points are first culled with the R-tree
//! held by the store, then checked exactly against the viewport.
//!
//! Enable profiling with `cargo build --features profiling` to see timing.

use crate::input::{Camera, Selection};
use crate::profile_scope;
use crate::store::Store;
use crate::types::{PointId, ScreenPos};
use std::collections::HashSet;

/// True if `m` lies strictly inside the `size`×`size` box centred on `center`
#[inline]
pub fn point_hit(center: ScreenPos, size: f64, m: ScreenPos) -> bool {
    let half = size / 2.0;
    (m.x - center.x).abs() < half && (m.y - center.y).abs() < half
}

/// True if any part of the box centred on `center` can show in the viewport
#[inline]
pub fn point_visible(center: ScreenPos, size: f64, width: f64, height: f64) -> bool {
    let half = size / 2.0;
    -half < center.x && center.x < width + half && -half < center.y && center.y < height + half
}

/// True if `m` is within `tolerance` pixels of the segment `p1`-`p2`.
///
/// Points whose projection falls outside the segment never hit. A zero-length
/// segment is treated as a circle of radius `tolerance`.
pub fn link_hit(p1: ScreenPos, p2: ScreenPos, tolerance: f64, m: ScreenPos) -> bool {
    let (dx, dy) = (p2.x - p1.x, p2.y - p1.y);
    let length_sq = dx * dx + dy * dy;
    let tolerance_sq = tolerance * tolerance;

    if length_sq == 0.0 {
        let (ex, ey) = (m.x - p1.x, m.y - p1.y);
        return ex * ex + ey * ey <= tolerance_sq;
    }

    let t = ((m.x - p1.x) * dx + (m.y - p1.y) * dy) / length_sq;
    if !(0.0..=1.0).contains(&t) {
        return false;
    }

    let (cx, cy) = (p1.x + t * dx, p1.y + t * dy);
    let (ex, ey) = (m.x - cx, m.y - cy);
    ex * ex + ey * ey <= tolerance_sq
}

/// Points that can show in the viewport, in drawing order
pub fn visible_points(store: &Store, camera: &Camera) -> Vec<PointId> {
    let (min, max) = camera.culling_rect();
    let candidates: HashSet<PointId> = store.points_within(min, max).into_iter().collect();

    store
        .points()
        .filter(|point| candidates.contains(&point.id))
        .filter(|point| {
            point_visible(camera.to_screen(point.pos), point.size(), camera.width, camera.height)
        })
        .map(|point| point.id)
        .collect()
}

/// Object under the mouse.
///
/// Points take precedence, first match in drawing order. Links are only
/// considered when no point is hit and no link is under construction; the
/// last matching link wins since it is drawn on top.
pub fn pick(store: &Store, camera: &Camera, mouse: ScreenPos, link_pending: bool) -> Selection {
    profile_scope!("pick");

    let hit_point = visible_points(store, camera).into_iter().find(|&id| {
        store
            .point(id)
            .is_some_and(|point| point_hit(camera.to_screen(point.pos), point.size(), mouse))
    });
    if let Some(id) = hit_point {
        return Selection::Point(id);
    }
    if link_pending {
        return Selection::None;
    }

    store
        .links()
        .filter(|link| {
            let Some(p2) = link.ends.p2() else {
                return false;
            };
            let (Some(a), Some(b)) = (store.point(link.ends.p1()), store.point(p2)) else {
                return false;
            };
            link_hit(camera.to_screen(a.pos), camera.to_screen(b.pos), link.tolerance(), mouse)
        })
        .last()
        .map_or(Selection::None, |link| Selection::Link(link.id))
}
