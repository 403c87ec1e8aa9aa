//! Entity store - owns every point, link and image of the graph.
//!
//! The store allocates identifiers, keeps points in back-to-front drawing
//! order (ascending rank, stable), and maintains an index from each point to
//! the links touching it so that rank/state changes and deletions only visit
//! the affected links.
//!
//! Every mutation leaves the store referentially consistent: no link ever
//! references a point that is not present.

use crate::error::{GraphError, GraphResult};
use crate::spatial_index::SpatialIndex;
use crate::types::{
    GraphPos, Image, ImageId, Link, LinkEnds, LinkId, Point, PointId, ProgressState,
    smallest_unused,
};
use crate::constants::RANK_COUNT;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;
use tracing::debug;

#[derive(Default)]
pub struct Store {
    points: HashMap<PointId, Point>,
    /// Point ids sorted by ascending rank; later entries draw on top
    draw_order: Vec<PointId>,
    links: BTreeMap<LinkId, Link>,
    images: BTreeMap<ImageId, Image>,
    /// Links touching each point, pending links included
    incident: HashMap<PointId, BTreeSet<LinkId>>,
    spatial: SpatialIndex,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Lookups ====================

    pub fn point(&self, id: PointId) -> Option<&Point> {
        self.points.get(&id)
    }

    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.get(&id)
    }

    pub fn image(&self, id: ImageId) -> Option<&Image> {
        self.images.get(&id)
    }

    /// Points in drawing order (ascending rank)
    pub fn points(&self) -> impl Iterator<Item = &Point> + '_ {
        self.draw_order.iter().filter_map(|id| self.points.get(id))
    }

    /// Links in ascending id order
    pub fn links(&self) -> impl Iterator<Item = &Link> + '_ {
        self.links.values()
    }

    /// Images in ascending id order
    pub fn images(&self) -> impl Iterator<Item = &Image> + '_ {
        self.images.values()
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.links.is_empty() && self.images.is_empty()
    }

    /// Ids of the links touching `point`
    pub fn links_of(&self, point: PointId) -> impl Iterator<Item = LinkId> + '_ {
        self.incident
            .get(&point)
            .into_iter()
            .flat_map(|links| links.iter().copied())
    }

    /// True if a completed link joins `a` and `b`, in either direction
    pub fn has_link_between(&self, a: PointId, b: PointId) -> bool {
        self.links_of(a)
            .filter_map(|id| self.links.get(&id))
            .any(|link| link.ends.connects(a, b))
    }

    /// True if at least one point displays the image
    pub fn is_image_referenced(&self, image: ImageId) -> bool {
        self.points.values().any(|point| point.image == Some(image))
    }

    /// Points whose centre lies in the given graph-space rectangle, unordered
    pub fn points_within(&self, min: GraphPos, max: GraphPos) -> Vec<PointId> {
        self.spatial.query_rect(min, max)
    }

    fn point_mut(&mut self, id: PointId) -> GraphResult<&mut Point> {
        self.points.get_mut(&id).ok_or(GraphError::PointNotFound(id))
    }

    // ==================== Creation ====================

    /// Add a point. Without `id`, the smallest unused point id is assigned.
    pub fn create_point(
        &mut self,
        pos: GraphPos,
        rank: i32,
        state: ProgressState,
        id: Option<PointId>,
    ) -> GraphResult<PointId> {
        let id = match id {
            Some(id) if self.points.contains_key(&id) => {
                return Err(GraphError::DuplicatePointId(id));
            }
            Some(id) => id,
            None => PointId(smallest_unused(|n| self.points.contains_key(&PointId(n)))),
        };

        self.points.insert(id, Point::new(id, pos, rank, state));
        self.draw_order.push(id);
        self.sort_draw_order();
        self.spatial.insert(id, pos);
        debug!(point = %id, x = pos.x, y = pos.y, rank, %state, "Point created");
        Ok(id)
    }

    /// Add a link from `p1`. Without `p2` the link is pending.
    ///
    /// A completed link is refused if the two points are already linked.
    pub fn create_link(
        &mut self,
        p1: PointId,
        p2: Option<PointId>,
        id: Option<LinkId>,
    ) -> GraphResult<LinkId> {
        if !self.points.contains_key(&p1) {
            return Err(GraphError::PointNotFound(p1));
        }
        let ends = match p2 {
            Some(p2) if !self.points.contains_key(&p2) => {
                return Err(GraphError::PointNotFound(p2));
            }
            Some(p2) if self.has_link_between(p1, p2) => {
                return Err(GraphError::DuplicateLink(p1, p2));
            }
            Some(p2) => LinkEnds::Complete { p1, p2 },
            None => LinkEnds::Pending { p1 },
        };
        let id = match id {
            Some(id) if self.links.contains_key(&id) => return Err(GraphError::DuplicateLinkId(id)),
            Some(id) => id,
            None => LinkId(smallest_unused(|n| self.links.contains_key(&LinkId(n)))),
        };

        let (rank, state) = self.derived_attributes(ends);
        self.links.insert(
            id,
            Link {
                id,
                ends,
                rank,
                state,
            },
        );
        self.index_link(id, ends);
        debug!(link = %id, p1 = %p1, p2 = ?p2.map(|p| p.0), "Link created");
        Ok(id)
    }

    /// Attach the free end of a pending link to `p2`.
    ///
    /// Returns `Ok(false)`, leaving the link pending, when the two points are
    /// already joined by a completed link.
    pub fn complete_link(&mut self, link: LinkId, p2: PointId) -> GraphResult<bool> {
        let ends = self.links.get(&link).ok_or(GraphError::LinkNotFound(link))?.ends;
        let LinkEnds::Pending { p1 } = ends else {
            return Err(GraphError::LinkAlreadyComplete(link));
        };
        if !self.points.contains_key(&p2) {
            return Err(GraphError::PointNotFound(p2));
        }
        if self.has_link_between(p1, p2) {
            debug!(link = %link, p1 = %p1, p2 = %p2, "Link left pending: points already linked");
            return Ok(false);
        }

        let ends = LinkEnds::Complete { p1, p2 };
        if let Some(entry) = self.links.get_mut(&link) {
            entry.ends = ends;
        }
        self.index_link(link, ends);
        self.refresh_link(link);
        debug!(link = %link, p1 = %p1, p2 = %p2, "Link completed");
        Ok(true)
    }

    /// Decode the image at `path` and register it.
    pub fn create_image(&mut self, path: &Path, id: Option<ImageId>) -> GraphResult<ImageId> {
        let id = match id {
            Some(id) if self.images.contains_key(&id) => {
                return Err(GraphError::DuplicateImageId(id));
            }
            Some(id) => id,
            None => ImageId(smallest_unused(|n| self.images.contains_key(&ImageId(n)))),
        };
        let image = Image::load(id, path)?;
        debug!(image = %id, path = %path.display(), "Image loaded");
        self.images.insert(id, image);
        Ok(id)
    }

    // ==================== Attachments ====================

    pub fn attach_image(&mut self, point: PointId, image: ImageId) -> GraphResult<()> {
        if !self.images.contains_key(&image) {
            return Err(GraphError::ImageNotFound(image));
        }
        self.point_mut(point)?.image = Some(image);
        Ok(())
    }

    /// Set the point's text; an empty string clears it.
    pub fn attach_text(&mut self, point: PointId, text: &str) -> GraphResult<()> {
        let text = (!text.is_empty()).then(|| text.to_owned());
        self.point_mut(point)?.text = text;
        Ok(())
    }

    /// Remove the point's image reference, returning it
    pub fn clear_image(&mut self, point: PointId) -> GraphResult<Option<ImageId>> {
        Ok(self.point_mut(point)?.image.take())
    }

    /// Remove the point's text, returning it
    pub fn clear_text(&mut self, point: PointId) -> GraphResult<Option<String>> {
        Ok(self.point_mut(point)?.text.take())
    }

    // ==================== Point Mutations ====================

    pub fn set_position(&mut self, point: PointId, pos: GraphPos) -> GraphResult<()> {
        self.point_mut(point)?.pos = pos;
        self.spatial.update(point, pos);
        Ok(())
    }

    pub fn set_rank(&mut self, point: PointId, rank: i32) -> GraphResult<()> {
        self.point_mut(point)?.rank = rank;
        self.sort_draw_order();
        self.refresh_links_of(point);
        Ok(())
    }

    /// Advance the rank by one, wrapping after the highest rank
    pub fn cycle_rank(&mut self, point: PointId) -> GraphResult<i32> {
        let rank = self.point_mut(point)?.rank;
        let next = (rank + 1).rem_euclid(RANK_COUNT);
        self.set_rank(point, next)?;
        Ok(next)
    }

    pub fn set_state(&mut self, point: PointId, state: ProgressState) -> GraphResult<()> {
        self.point_mut(point)?.state = state;
        self.refresh_links_of(point);
        Ok(())
    }

    /// Advance the state along todo -> completed -> doing -> todo
    pub fn cycle_state(&mut self, point: PointId) -> GraphResult<ProgressState> {
        let next = self.point_mut(point)?.state.cycled();
        self.set_state(point, next)?;
        Ok(next)
    }

    // ==================== Deletion ====================

    /// Remove a point together with every link touching it.
    ///
    /// Returns the ids of the links removed by the cascade.
    pub fn delete_point(&mut self, point: PointId) -> GraphResult<Vec<LinkId>> {
        if !self.points.contains_key(&point) {
            return Err(GraphError::PointNotFound(point));
        }

        let cascade: Vec<LinkId> = self.links_of(point).collect();
        for &link in &cascade {
            self.delete_link(link)?;
        }

        self.points.remove(&point);
        self.incident.remove(&point);
        self.draw_order.retain(|&id| id != point);
        self.spatial.remove(point);
        debug!(point = %point, links = cascade.len(), "Point deleted");
        Ok(cascade)
    }

    pub fn delete_link(&mut self, link: LinkId) -> GraphResult<()> {
        let removed = self.links.remove(&link).ok_or(GraphError::LinkNotFound(link))?;
        let LinkEnds::Complete { p2, .. } = removed.ends else {
            self.unindex(removed.ends.p1(), link);
            debug!(link = %link, "Pending link deleted");
            return Ok(());
        };
        self.unindex(removed.ends.p1(), link);
        self.unindex(p2, link);
        debug!(link = %link, "Link deleted");
        Ok(())
    }

    /// Remove everything; used before loading another save file
    pub fn reset(&mut self) {
        self.points.clear();
        self.draw_order.clear();
        self.links.clear();
        self.images.clear();
        self.incident.clear();
        self.spatial.clear();
    }

    // ==================== Internals ====================

    fn sort_draw_order(&mut self) {
        let points = &self.points;
        self.draw_order
            .sort_by_key(|id| points.get(id).map_or(0, |point| point.rank));
    }

    fn index_link(&mut self, link: LinkId, ends: LinkEnds) {
        self.incident.entry(ends.p1()).or_default().insert(link);
        if let Some(p2) = ends.p2() {
            self.incident.entry(p2).or_default().insert(link);
        }
    }

    fn unindex(&mut self, point: PointId, link: LinkId) {
        if let Some(links) = self.incident.get_mut(&point) {
            links.remove(&link);
        }
    }

    fn derived_attributes(&self, ends: LinkEnds) -> (i32, ProgressState) {
        let p1 = self.points.get(&ends.p1());
        let p2 = ends.p2().and_then(|id| self.points.get(&id));
        let rank = p1.into_iter().chain(p2).map(|p| p.rank).max().unwrap_or(0);
        let state = p1
            .into_iter()
            .chain(p2)
            .map(|p| p.state)
            .max()
            .unwrap_or_default();
        (rank, state)
    }

    fn refresh_link(&mut self, link: LinkId) {
        let Some(ends) = self.links.get(&link).map(|l| l.ends) else {
            return;
        };
        let (rank, state) = self.derived_attributes(ends);
        if let Some(entry) = self.links.get_mut(&link) {
            entry.rank = rank;
            entry.state = state;
        }
    }

    fn refresh_links_of(&mut self, point: PointId) {
        let links: Vec<LinkId> = self.links_of(point).collect();
        for link in links {
            self.refresh_link(link);
        }
    }
}
