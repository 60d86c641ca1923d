//! Recorded input sessions.
//!
//! A session is a JSON document holding the ticks a host produced, in order:
//!
//! ```json
//! {
//!   "events": [
//!     { "kind": "frame", "pointer": { "x": 0.0, "y": 0.0 }, "pressed": true },
//!     { "kind": "frame", "pointer": { "x": 40.0, "y": 0.0 }, "pressed": true },
//!     { "kind": "frame", "pointer": { "x": 40.0, "y": 0.0 } },
//!     { "kind": "clear" }
//!   ]
//! }
//! ```

use std::path::Path;

use inkfield_core::FrameInput;
use inkfield_render::DrawingSurface;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionEvent {
    /// One tick of host input.
    Frame(FrameInput),
    /// Forget every stroke.
    Clear,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub events: Vec<SessionEvent>,
}

/// Totals gathered while replaying a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub frames: usize,
    pub growths: usize,
    pub erased: usize,
}

impl Session {
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| AppError::SessionRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Feed every event to `surface`.
    ///
    /// Stops at the first failing tick. A raster that cannot grow to hold a
    /// sample is fatal: carrying on would save a drawing missing that point.
    pub fn replay(&self, surface: &mut DrawingSurface) -> AppResult<ReplaySummary> {
        let mut summary = ReplaySummary::default();
        for event in &self.events {
            match event {
                SessionEvent::Frame(input) => {
                    summary.frames += 1;
                    let report = surface.tick(input).inspect_err(|err| {
                        log::error!("replay stopped at event {}: {err}", summary.frames);
                    })?;
                    summary.growths += usize::from(report.grew);
                    summary.erased += report.erased.len();
                }
                SessionEvent::Clear => surface.clear(),
            }
        }
        log::debug!("replayed {summary:?}");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkfield_core::{CanvasConfig, ToolKind};
    use inkfield_render::RenderError;
    use kurbo::Point;

    fn surface() -> DrawingSurface {
        let config = CanvasConfig {
            initial_size: 256,
            max_extent: 1024,
            ..CanvasConfig::default()
        };
        DrawingSurface::new(&config).unwrap()
    }

    #[test]
    fn test_parse_session() {
        let session = Session::from_json(
            r#"{
                "events": [
                    { "kind": "frame", "pointer": { "x": 1.0, "y": 2.0 }, "pressed": true, "brush_size": 4.0 },
                    { "kind": "frame", "pointer": { "x": 1.0, "y": 2.0 }, "tool": "StrokeErase" },
                    { "kind": "clear" }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(session.events.len(), 3);
        let SessionEvent::Frame(first) = &session.events[0] else {
            panic!("expected a frame");
        };
        assert!(first.pressed);
        assert_eq!(first.brush_size, Some(4.0));
        assert_eq!(first.tool, ToolKind::Draw);
        assert_eq!(session.events[2], SessionEvent::Clear);
    }

    #[test]
    fn test_malformed_session() {
        assert!(matches!(
            Session::from_json(r#"{ "events": [ { "kind": "teleport" } ] }"#),
            Err(AppError::SessionParse(_))
        ));
    }

    #[test]
    fn test_replay_draws_and_erases() {
        let session = Session {
            events: vec![
                SessionEvent::Frame(FrameInput::press(Point::new(-30.0, 0.0), ToolKind::Draw)),
                SessionEvent::Frame(FrameInput::press(Point::new(30.0, 0.0), ToolKind::Draw)),
                SessionEvent::Frame(FrameInput::release(Point::new(30.0, 0.0), ToolKind::Draw)),
                SessionEvent::Frame(FrameInput::press(Point::new(0.0, 0.0), ToolKind::StrokeErase)),
            ],
        };
        let mut surface = surface();
        let summary = session.replay(&mut surface).unwrap();
        assert_eq!(summary.frames, 4);
        assert_eq!(summary.erased, 1);
        assert_eq!(surface.store().len(), 1);
    }

    #[test]
    fn test_replay_stops_when_raster_cannot_grow() {
        let far = Point::new(90_000.0, 0.0);
        let session = Session {
            events: vec![
                SessionEvent::Frame(FrameInput::press(Point::new(0.0, 0.0), ToolKind::Draw)),
                SessionEvent::Frame(FrameInput::press(far, ToolKind::Draw)),
                SessionEvent::Frame(FrameInput::release(far, ToolKind::Draw)),
            ],
        };
        let mut surface = surface();
        let result = session.replay(&mut surface);
        assert!(matches!(
            result,
            Err(AppError::Render(RenderError::Allocation { .. }))
        ));
        // Nothing after the failing sample was applied.
        assert!(surface.store().is_empty());
        assert_eq!(surface.store().active().unwrap().len(), 1);
    }

    #[test]
    fn test_clear_event() {
        let session = Session {
            events: vec![
                SessionEvent::Frame(FrameInput::press(Point::new(0.0, 0.0), ToolKind::Draw)),
                SessionEvent::Frame(FrameInput::release(Point::new(0.0, 0.0), ToolKind::Draw)),
                SessionEvent::Clear,
            ],
        };
        let mut surface = surface();
        session.replay(&mut surface).unwrap();
        assert!(surface.store().is_empty());
    }
}
