//! The drawing surface: one context value owning the stroke log, the raster
//! and the camera, driven one tick at a time by host input.

use inkfield_core::{
    Camera, CanvasConfig, FrameInput, PointerState, StrokeId, StrokeStore, ToolKind, ToolSettings,
};
use kurbo::Point;

use crate::buffer::{CanvasBuffer, PixelRect};
use crate::compositor::Compositor;
use crate::error::RenderResult;
use crate::export::{CroppedImage, ExportCropper};
use crate::growth::{GrowthManager, GrowthPolicy};

/// What a single tick changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The raster was reallocated.
    pub grew: bool,
    /// The raster was repainted from the log.
    pub rebuilt: bool,
    /// Strokes tombstoned by this tick.
    pub erased: Vec<StrokeId>,
    /// A stroke was committed to the log.
    pub committed: Option<StrokeId>,
}

/// Behavior bound to a tool. Receives the pointer position in world space.
type ToolHandler = fn(&mut DrawingSurface, Point) -> TickReport;

/// Tool dispatch table.
fn tool_handler(tool: ToolKind) -> ToolHandler {
    match tool {
        ToolKind::Draw | ToolKind::PixelErase => DrawingSurface::record_stroke,
        ToolKind::StrokeErase => DrawingSurface::erase_strokes,
    }
}

/// An unbounded drawing surface.
///
/// The [`StrokeStore`] is the source of truth; the [`CanvasBuffer`] is a
/// cache of it that grows to follow the drawing and can be rebuilt at any
/// time.
#[derive(Debug, Clone)]
pub struct DrawingSurface {
    camera: Camera,
    store: StrokeStore,
    buffer: CanvasBuffer,
    growth: GrowthManager,
    compositor: Compositor,
    cropper: ExportCropper,
    settings: ToolSettings,
    tool: ToolKind,
    pointer: PointerState,
}

impl DrawingSurface {
    /// Create a surface with an empty log and a raster of
    /// `config.initial_size` centred on the world origin.
    pub fn new(config: &CanvasConfig) -> RenderResult<Self> {
        config.validate()?;
        let compositor = Compositor::new(config.background);
        let initial = PixelRect::centered(config.initial_size);
        let buffer = CanvasBuffer::allocate(initial, config.background)?;
        Ok(Self {
            camera: Camera::new(),
            store: StrokeStore::new(),
            buffer,
            growth: GrowthManager::new(GrowthPolicy::from_config(config)),
            compositor,
            cropper: ExportCropper::from_config(config),
            settings: ToolSettings::from_config(config),
            tool: ToolKind::default(),
            pointer: PointerState::new(),
        })
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn store(&self) -> &StrokeStore {
        &self.store
    }

    /// Current raster. Composite it at [`Camera::raster_offset`] of its
    /// origin.
    pub fn buffer(&self) -> &CanvasBuffer {
        &self.buffer
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// Switch tools. A stroke in progress is committed first.
    pub fn set_tool(&mut self, tool: ToolKind) -> Option<StrokeId> {
        if tool == self.tool {
            return None;
        }
        log::debug!("tool {} -> {}", self.tool.name(), tool.name());
        self.tool = tool;
        self.store.commit()
    }

    /// Screen offset at which the host composites the raster.
    pub fn raster_offset(&self) -> Point {
        self.camera.raster_offset(self.buffer.origin())
    }

    /// Apply one tick of host input.
    ///
    /// Raster growth is the only step that can fail, and it runs before
    /// anything else is applied: on error the surface is exactly as it was
    /// before the call, including tool, pointer, camera and settings.
    pub fn tick(&mut self, input: &FrameInput) -> RenderResult<TickReport> {
        let mut settings = self.settings.clone();
        if let Some(size) = input.brush_size {
            settings.set_brush_size(size);
        }
        if let Some(size) = input.eraser_size {
            settings.set_eraser_size(size);
        }
        if let Some(color) = input.brush_color {
            settings.set_brush_color(color);
        }
        let mut camera = self.camera;
        camera.pan(input.pan);

        let world = camera.screen_to_world(input.pointer);
        let finite = world.x.is_finite() && world.y.is_finite();
        let grew = if finite && input.pressed {
            self.make_room(input.tool, &settings, world)?
        } else {
            false
        };

        self.settings = settings;
        self.camera = camera;
        let switched = self.set_tool(input.tool);
        self.pointer.update(input.pressed);

        if !finite {
            log::warn!("ignoring non-finite pointer position {:?}", input.pointer);
            return Ok(TickReport {
                committed: switched,
                ..TickReport::default()
            });
        }

        let mut report = tool_handler(self.tool)(self, world);
        report.grew = grew;
        report.rebuilt |= grew;
        report.committed = report.committed.or(switched);
        Ok(report)
    }

    /// Grow the raster so a sample at `world` recorded with `tool` fits.
    ///
    /// Replays with the current tool so a stroke still in progress keeps its
    /// pixels.
    fn make_room(
        &mut self,
        tool: ToolKind,
        settings: &ToolSettings,
        world: Point,
    ) -> RenderResult<bool> {
        let Some(ink) = settings.ink(tool) else {
            return Ok(false);
        };
        let width = match self.store.active() {
            Some(stroke) if tool == self.tool => stroke.width(),
            _ => ink.width,
        };
        self.growth.ensure_visible(
            &mut self.buffer,
            &self.store,
            &self.compositor,
            self.tool,
            world,
            width,
        )
    }

    /// Draw and pixel-erase: extend the stroke while the pointer is held,
    /// commit it on release.
    fn record_stroke(&mut self, world: Point) -> TickReport {
        if !self.pointer.is_pressed() {
            return TickReport {
                committed: self.store.commit(),
                ..TickReport::default()
            };
        }

        let Some(ink) = self.settings.ink(self.tool) else {
            return TickReport::default();
        };
        let stroke = if self.store.active().is_some() {
            self.store.extend(world)
        } else {
            Some(self.store.begin(world, ink, self.tool))
        };
        if let Some(stroke) = stroke {
            self.compositor.draw_latest(&mut self.buffer, stroke);
        }
        TickReport::default()
    }

    /// Stroke erase: on the press edge, tombstone every stroke under the
    /// pointer and repaint once.
    fn erase_strokes(&mut self, world: Point) -> TickReport {
        if !self.pointer.just_pressed() {
            return TickReport::default();
        }

        let erased = self.store.erase_at(world, self.settings.erase_tolerance());
        let rebuilt = !erased.is_empty();
        if rebuilt {
            log::info!(
                "erased {} stroke(s) at ({:.1}, {:.1})",
                erased.len(),
                world.x,
                world.y
            );
            self.rebuild();
        }
        TickReport {
            rebuilt,
            erased,
            ..TickReport::default()
        }
    }

    /// Repaint the raster from the log.
    pub fn rebuild(&mut self) {
        self.compositor.rebuild(&mut self.buffer, &self.store, self.tool);
    }

    /// Forget every stroke and clear the raster. The raster keeps its size.
    pub fn clear(&mut self) {
        log::info!("clearing {} stroke(s)", self.store.len());
        self.store.clear();
        self.rebuild();
    }

    /// Pixels of the visible content, tightly cropped.
    pub fn export(&self) -> RenderResult<CroppedImage> {
        self.cropper
            .export(&self.buffer, &self.store, self.tool, self.compositor.background())
    }
}
