//! On-demand growth of the backing raster.
//!
//! The raster never shrinks and is never shifted in place: when a touched
//! point falls near or outside an edge, a larger raster is allocated and the
//! stroke log is replayed into it.

use inkfield_core::{CanvasConfig, StrokeStore, ToolKind};
use kurbo::Point;

use crate::buffer::{CanvasBuffer, PixelRect};
use crate::compositor::Compositor;
use crate::error::{RenderError, RenderResult};

/// Sizing rules for raster growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthPolicy {
    /// Safety margin around every touched point.
    pub margin: u32,
    /// Extra pixels added to each side that has to grow, so nearby samples
    /// do not each trigger a reallocation.
    pub quantum: u32,
    /// Largest raster side that may be allocated.
    pub max_extent: u32,
}

impl GrowthPolicy {
    pub fn from_config(config: &CanvasConfig) -> Self {
        Self {
            margin: config.growth_margin,
            quantum: config.growth_quantum,
            max_extent: config.max_extent,
        }
    }

    /// Smallest rectangle that keeps `point` inflated by `radius` plus the
    /// margin on the raster.
    pub fn required(&self, point: Point, radius: f64) -> PixelRect {
        let reach = (radius.max(0.0).ceil() as i64).saturating_add(i64::from(self.margin));
        PixelRect::new(
            (point.x.floor() as i64).saturating_sub(reach),
            (point.y.floor() as i64).saturating_sub(reach),
            (point.x.ceil() as i64).saturating_add(reach),
            (point.y.ceil() as i64).saturating_add(reach),
        )
    }

    /// The rectangle the raster must grow to, or `None` if `current` already
    /// covers the requirement. Each short side is extended by the missing
    /// amount plus the quantum; the other sides are left alone.
    pub fn plan(&self, current: PixelRect, point: Point, radius: f64) -> Option<PixelRect> {
        let needed = self.required(point, radius);
        let quantum = i64::from(self.quantum);
        let mut next = current;
        if needed.x0 < current.x0 {
            next.x0 = needed.x0.saturating_sub(quantum);
        }
        if needed.x1 > current.x1 {
            next.x1 = needed.x1.saturating_add(quantum);
        }
        if needed.y0 < current.y0 {
            next.y0 = needed.y0.saturating_sub(quantum);
        }
        if needed.y1 > current.y1 {
            next.y1 = needed.y1.saturating_add(quantum);
        }
        (next != current).then_some(next)
    }
}

/// Keeps the raster large enough for every sample that gets drawn.
#[derive(Debug, Clone)]
pub struct GrowthManager {
    policy: GrowthPolicy,
}

impl GrowthManager {
    pub fn new(policy: GrowthPolicy) -> Self {
        Self { policy }
    }

    /// Make sure `point` inflated by `radius` plus the margin lies on the
    /// raster, growing and repainting it from `store` if needed.
    ///
    /// Returns whether the raster was replaced. On error the existing raster
    /// is left untouched.
    pub fn ensure_visible(
        &self,
        buffer: &mut CanvasBuffer,
        store: &StrokeStore,
        compositor: &Compositor,
        active_tool: ToolKind,
        point: Point,
        radius: f64,
    ) -> RenderResult<bool> {
        let Some(next) = self.policy.plan(buffer.rect(), point, radius) else {
            return Ok(false);
        };

        let max = u64::from(self.policy.max_extent);
        if next.width() > max || next.height() > max {
            log::warn!(
                "refusing to grow canvas to {}x{} (max side {})",
                next.width(),
                next.height(),
                max
            );
            return Err(RenderError::Allocation {
                width: next.width(),
                height: next.height(),
            });
        }

        let mut grown = CanvasBuffer::allocate(next, compositor.background())?;
        compositor.rebuild(&mut grown, store, active_tool);
        log::debug!(
            "canvas grew from {}x{} at ({}, {}) to {}x{} at ({}, {})",
            buffer.width(),
            buffer.height(),
            buffer.rect().x0,
            buffer.rect().y0,
            grown.width(),
            grown.height(),
            next.x0,
            next.y0
        );
        *buffer = grown;
        Ok(true)
    }
}
