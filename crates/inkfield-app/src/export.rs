//! PNG encoding and saving of surface exports.

use std::path::{Path, PathBuf};

use inkfield_render::{CroppedImage, DrawingSurface};

use crate::error::{AppError, AppResult};

/// Encode straight-alpha RGBA8 pixels as PNG.
pub fn encode_png(image: &CroppedImage) -> AppResult<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, image.width, image.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&image.pixels)?;
        writer.finish()?;
    }
    Ok(png_data)
}

/// `path` with `.png` appended when it has no extension.
pub fn with_png_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension("png")
    }
}

/// Export the drawing and write it as PNG. Returns the path written.
pub fn save_png(surface: &DrawingSurface, path: &Path) -> AppResult<PathBuf> {
    let image = surface.export()?;
    let png_data = encode_png(&image)?;
    let path = with_png_extension(path);
    std::fs::write(&path, &png_data).map_err(|source| AppError::Write {
        path: path.clone(),
        source,
    })?;
    log::info!(
        "saved {}x{} PNG to {} ({} bytes)",
        image.width,
        image.height,
        path.display(),
        png_data.len()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkfield_core::{CanvasConfig, FrameInput, ToolKind};
    use kurbo::Point;

    fn surface() -> DrawingSurface {
        let config = CanvasConfig {
            initial_size: 256,
            ..CanvasConfig::default()
        };
        DrawingSurface::new(&config).unwrap()
    }

    #[test]
    fn test_with_png_extension() {
        assert_eq!(with_png_extension(Path::new("out/drawing")), PathBuf::from("out/drawing.png"));
        assert_eq!(with_png_extension(Path::new("drawing.png")), PathBuf::from("drawing.png"));
        assert_eq!(with_png_extension(Path::new("drawing.PNG")), PathBuf::from("drawing.PNG"));
    }

    #[test]
    fn test_save_empty_canvas() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nothing");
        let result = save_png(&surface(), &target);
        assert!(matches!(result, Err(AppError::EmptyCanvas)));
        assert!(!target.with_extension("png").exists());
    }

    #[test]
    fn test_unwritable_path_is_a_write_error() {
        let mut surface = surface();
        surface
            .tick(&FrameInput::press(Point::new(0.0, 0.0), ToolKind::Draw))
            .unwrap();
        surface
            .tick(&FrameInput::release(Point::new(0.0, 0.0), ToolKind::Draw))
            .unwrap();
        let strokes_before = surface.store().strokes().to_vec();

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("drawing.png");
        let result = save_png(&surface, &target);
        match result {
            Err(AppError::Write { path, .. }) => assert_eq!(path, target),
            other => panic!("expected a write error, got {other:?}"),
        }
        assert_eq!(surface.store().strokes(), strokes_before.as_slice());

        // A directory is not a file either.
        let folder = dir.path().join("folder.png");
        std::fs::create_dir(&folder).unwrap();
        let result = save_png(&surface, &folder);
        assert!(matches!(result, Err(AppError::Write { .. })));
    }

    #[test]
    fn test_save_writes_decodable_png() {
        let mut surface = surface();
        surface
            .tick(&FrameInput::press(Point::new(0.0, 0.0), ToolKind::Draw))
            .unwrap();
        surface
            .tick(&FrameInput::press(Point::new(100.0, 0.0), ToolKind::Draw))
            .unwrap();
        surface
            .tick(&FrameInput::release(Point::new(100.0, 0.0), ToolKind::Draw))
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let written = save_png(&surface, &dir.path().join("line")).unwrap();
        assert_eq!(written, dir.path().join("line.png"));

        let file = std::fs::File::open(&written).unwrap();
        let mut reader = png::Decoder::new(file).read_info().unwrap();
        let mut pixels = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut pixels).unwrap();
        assert_eq!((info.width, info.height), (126, 26));
        assert_eq!(info.color_type, png::ColorType::Rgba);

        let expected = surface.export().unwrap();
        assert_eq!(&pixels[..info.buffer_size()], expected.pixels.as_slice());
    }
}
