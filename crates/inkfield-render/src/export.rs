//! Tight cropping of the drawn region for export.

use inkfield_core::{CanvasConfig, StrokeColor, StrokeStore, ToolKind};
use kurbo::Rect;

use crate::buffer::{CanvasBuffer, PixelRect};
use crate::error::{RenderError, RenderResult};

/// Straight-alpha RGBA8 pixels, row-major, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CroppedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
    /// World position of the top-left pixel.
    pub origin: (i64, i64),
}

impl CroppedImage {
    /// RGBA of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = (y as usize * self.width as usize + x as usize) * 4;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.pixels[index..index + 4]);
        Some(rgba)
    }
}

/// Computes export bounds and extracts the matching pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportCropper {
    padding: u32,
}

impl ExportCropper {
    pub fn new(padding: u32) -> Self {
        Self { padding }
    }

    pub fn from_config(config: &CanvasConfig) -> Self {
        Self::new(config.export_padding)
    }

    /// World rectangle of everything visible, padded and snapped outward to
    /// whole pixels.
    ///
    /// Each visible stroke contributes its bounds grown by half its width.
    ///
    /// The result is never smaller than one pixel on a side, even for a
    /// zero-width stroke with no padding.
    pub fn content_bounds(
        &self,
        store: &StrokeStore,
        active_tool: ToolKind,
    ) -> RenderResult<PixelRect> {
        let union = painted_extent(store, active_tool).ok_or(RenderError::EmptyCanvas)?;
        let padding = f64::from(self.padding);
        let mut bounds = PixelRect::covering(union.inflate(padding, padding));
        bounds.x1 = bounds.x1.max(bounds.x0 + 1);
        bounds.y1 = bounds.y1.max(bounds.y0 + 1);
        Ok(bounds)
    }

    /// Crop the raster to the visible content.
    pub fn export(
        &self,
        buffer: &CanvasBuffer,
        store: &StrokeStore,
        active_tool: ToolKind,
        background: StrokeColor,
    ) -> RenderResult<CroppedImage> {
        let bounds = self.content_bounds(store, active_tool)?;
        let image = crop(buffer, bounds, background);
        log::info!(
            "exported {}x{} region at ({}, {})",
            image.width,
            image.height,
            bounds.x0,
            bounds.y0
        );
        Ok(image)
    }
}

/// Copy the world rectangle `rect` out of the raster.
///
/// Pixels outside the raster are filled with `background`; with the growth
/// invariant upheld this never happens for content bounds.
pub fn crop(buffer: &CanvasBuffer, rect: PixelRect, background: StrokeColor) -> CroppedImage {
    let width = rect.width() as u32;
    let height = rect.height() as u32;
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
    let source = buffer.rect();

    for y in rect.y0..rect.y1 {
        for x in rect.x0..rect.x1 {
            let rgba = if x >= source.x0 && x < source.x1 && y >= source.y0 && y < source.y1 {
                buffer
                    .pixel((x - source.x0) as u32, (y - source.y0) as u32)
                    .unwrap_or(background.to_array())
            } else {
                background.to_array()
            };
            pixels.extend_from_slice(&rgba);
        }
    }

    CroppedImage {
        width,
        height,
        pixels,
        origin: (rect.x0, rect.y0),
    }
}

/// Union of the painted bounds of visible strokes, without padding.
pub fn painted_extent(store: &StrokeStore, active_tool: ToolKind) -> Option<Rect> {
    store
        .visible(active_tool)
        .map(|stroke| stroke.painted_bounds())
        .reduce(|acc, bounds| acc.union(bounds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkfield_core::Ink;
    use kurbo::Point;

    const INK: Ink = Ink {
        width: 10.0,
        color: StrokeColor::white(),
    };

    fn store_with(lines: &[((f64, f64), (f64, f64))]) -> StrokeStore {
        let mut store = StrokeStore::new();
        for &((x0, y0), (x1, y1)) in lines {
            store.begin(Point::new(x0, y0), INK, ToolKind::Draw);
            store.extend(Point::new(x1, y1));
            store.commit();
        }
        store
    }

    #[test]
    fn test_empty_store_is_empty_canvas() {
        let cropper = ExportCropper::new(8);
        let result = cropper.content_bounds(&StrokeStore::new(), ToolKind::Draw);
        assert!(matches!(result, Err(RenderError::EmptyCanvas)));
    }

    #[test]
    fn test_all_erased_is_empty_canvas() {
        let mut store = store_with(&[((0.0, 0.0), (10.0, 0.0))]);
        let id = store.strokes()[0].id();
        store.erase(id);
        let result = ExportCropper::new(8).content_bounds(&store, ToolKind::Draw);
        assert!(matches!(result, Err(RenderError::EmptyCanvas)));
    }

    #[test]
    fn test_bounds_include_half_width_and_padding() {
        let store = store_with(&[((0.0, 0.0), (100.0, 0.0))]);
        let bounds = ExportCropper::new(8).content_bounds(&store, ToolKind::Draw).unwrap();
        assert_eq!(bounds, PixelRect::new(-13, -13, 113, 13));
    }

    #[test]
    fn test_active_stroke_counts() {
        let mut store = StrokeStore::new();
        store.begin(Point::new(50.0, 50.0), INK, ToolKind::Draw);
        let bounds = ExportCropper::new(0).content_bounds(&store, ToolKind::Draw).unwrap();
        assert_eq!(bounds, PixelRect::new(45, 45, 55, 55));
        assert!(ExportCropper::new(0).content_bounds(&store, ToolKind::StrokeErase).is_err());
    }

    #[test]
    fn test_zero_width_stroke_exports_at_least_one_pixel() {
        let hairline = Ink {
            width: 0.0,
            color: StrokeColor::white(),
        };
        let mut store = StrokeStore::new();
        store.begin(Point::new(50.0, 50.0), hairline, ToolKind::Draw);
        store.commit();
        let cropper = ExportCropper::new(0);
        assert_eq!(
            cropper.content_bounds(&store, ToolKind::Draw).unwrap(),
            PixelRect::new(50, 50, 51, 51)
        );

        store.begin(Point::new(0.0, 0.0), hairline, ToolKind::Draw);
        store.extend(Point::new(10.0, 0.0));
        store.commit();
        let dot = store.strokes()[0].id();
        store.erase(dot);
        assert_eq!(
            cropper.content_bounds(&store, ToolKind::Draw).unwrap(),
            PixelRect::new(0, 0, 10, 1)
        );

        let buffer =
            CanvasBuffer::allocate(PixelRect::centered(256), StrokeColor::black()).unwrap();
        let image = cropper
            .export(&buffer, &store, ToolKind::Draw, StrokeColor::black())
            .unwrap();
        assert_eq!((image.width, image.height), (10, 1));
    }

    #[test]
    fn test_bounds_are_minimal() {
        let store = store_with(&[
            ((0.0, 0.0), (40.0, 10.0)),
            ((-70.0, 25.0), (-10.0, 90.0)),
            ((5.0, -60.0), (6.0, -55.0)),
        ]);
        let padding = 6;
        let bounds = ExportCropper::new(padding)
            .content_bounds(&store, ToolKind::Draw)
            .unwrap();
        let pad = i64::from(padding);
        let shrunk = PixelRect::new(
            bounds.x0 + pad,
            bounds.y0 + pad,
            bounds.x1 - pad,
            bounds.y1 - pad,
        );

        let painted: Vec<Rect> = store.strokes().iter().map(|s| s.painted_bounds()).collect();
        assert!(painted.iter().any(|r| r.x0 as i64 == shrunk.x0));
        assert!(painted.iter().any(|r| r.y0 as i64 == shrunk.y0));
        assert!(painted.iter().any(|r| r.x1 as i64 == shrunk.x1));
        assert!(painted.iter().any(|r| r.y1 as i64 == shrunk.y1));
    }

    #[test]
    fn test_crop_fills_outside_with_background() {
        let buffer =
            CanvasBuffer::allocate(PixelRect::new(0, 0, 4, 4), StrokeColor::white()).unwrap();
        let image = crop(&buffer, PixelRect::new(2, 2, 6, 5), StrokeColor::black());
        assert_eq!((image.width, image.height), (4, 3));
        assert_eq!(image.pixels.len(), 4 * 3 * 4);
        assert_eq!(image.pixel(0, 0), Some([255, 255, 255, 255]));
        assert_eq!(image.pixel(3, 0), Some([0, 0, 0, 255]));
        assert_eq!(image.pixel(0, 2), Some([0, 0, 0, 255]));
        assert_eq!(image.pixel(4, 0), None);
    }

    #[test]
    fn test_painted_extent() {
        let store = store_with(&[((0.0, 0.0), (10.0, 0.0))]);
        assert_eq!(
            painted_extent(&store, ToolKind::Draw),
            Some(Rect::new(-5.0, -5.0, 15.0, 5.0))
        );
        assert_eq!(painted_extent(&StrokeStore::new(), ToolKind::Draw), None);
    }
}
