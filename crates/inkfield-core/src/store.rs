//! Ordered stroke log.

use kurbo::Point;

use crate::hit;
use crate::stroke::{Stroke, StrokeId};
use crate::tools::{Ink, ToolKind};

/// Append-only log of committed strokes plus at most one stroke in progress.
///
/// Insertion order is paint order: replaying the log oldest first reproduces
/// the raster. Strokes are tombstoned, never removed, except by [`clear`].
///
/// [`clear`]: StrokeStore::clear
#[derive(Debug, Clone, Default)]
pub struct StrokeStore {
    strokes: Vec<Stroke>,
    active: Option<Stroke>,
}

impl StrokeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed strokes, oldest first, tombstones included.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// The stroke currently being drawn.
    pub fn active(&self) -> Option<&Stroke> {
        self.active.as_ref()
    }

    /// Number of committed strokes, tombstones included.
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    /// True when nothing is committed or in progress.
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty() && self.active.is_none()
    }

    /// Start a new stroke at `point`.
    ///
    /// A stroke still in progress is committed first rather than dropped.
    pub fn begin(&mut self, point: Point, ink: Ink, tool: ToolKind) -> &Stroke {
        self.commit();
        self.active.insert(Stroke::new(point, ink.width, ink.color, tool))
    }

    /// Append a point to the stroke in progress.
    pub fn extend(&mut self, point: Point) -> Option<&Stroke> {
        let stroke = self.active.as_mut()?;
        stroke.push_point(point);
        Some(&*stroke)
    }

    /// Move the stroke in progress into the log.
    pub fn commit(&mut self) -> Option<StrokeId> {
        let stroke = self.active.take()?;
        let id = stroke.id();
        log::trace!("committed stroke {} with {} points", id, stroke.len());
        self.strokes.push(stroke);
        Some(id)
    }

    /// Tombstone every committed stroke within `tolerance` of `point`.
    ///
    /// Returns the ids that were newly erased, in log order. Already erased
    /// strokes never match, so repeating the call is a no-op.
    pub fn erase_at(&mut self, point: Point, tolerance: f64) -> Vec<StrokeId> {
        self.strokes
            .iter_mut()
            .filter(|stroke| hit::hit(stroke, point, tolerance))
            .map(|stroke| {
                stroke.erased = true;
                stroke.id()
            })
            .collect()
    }

    /// Tombstone a committed stroke by id. Returns false if it was missing or
    /// already erased.
    pub fn erase(&mut self, id: StrokeId) -> bool {
        match self.strokes.iter_mut().find(|stroke| stroke.id() == id) {
            Some(stroke) if !stroke.erased => {
                stroke.erased = true;
                true
            }
            _ => false,
        }
    }

    /// Strokes that contribute pixels, in paint order: live committed strokes
    /// followed by the stroke in progress if it belongs to `active_tool`.
    pub fn visible(&self, active_tool: ToolKind) -> impl Iterator<Item = &Stroke> {
        self.strokes
            .iter()
            .filter(|stroke| !stroke.is_erased())
            .chain(self.active.as_ref().filter(|stroke| stroke.tool() == active_tool))
    }

    /// Drop every stroke, committed or in progress.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.active = None;
    }
}
