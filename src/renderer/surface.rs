//! Drawing surface abstraction
//!
//! The renderer only issues these calls, in pixel coordinates. The browser
//! backend forwards them to a Canvas 2D context; `RecordingSurface` keeps them
//! for headless runs and tests.

use glam::DVec2;

/// Horizontal anchor for text labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// Line color and width for a stroked path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: &'static str,
    pub width: f64,
}

/// Fill color, font and anchor for a text label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Label {
    pub color: &'static str,
    pub font: &'static str,
    pub align: TextAlign,
}

/// A path made of one or more polylines (`move_to` starts a new one)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    subpaths: Vec<Vec<DVec2>>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Polyline through `points`
    pub fn polyline(points: impl IntoIterator<Item = DVec2>) -> Self {
        let mut path = Self::new();
        let mut points = points.into_iter();
        if let Some(first) = points.next() {
            path.move_to(first);
            for point in points {
                path.line_to(point);
            }
        }
        path
    }

    pub fn move_to(&mut self, point: DVec2) -> &mut Self {
        self.subpaths.push(vec![point]);
        self
    }

    /// Extend the current polyline (starts one if the path is empty)
    pub fn line_to(&mut self, point: DVec2) -> &mut Self {
        match self.subpaths.last_mut() {
            Some(current) => current.push(point),
            None => self.subpaths.push(vec![point]),
        }
        self
    }

    pub fn subpaths(&self) -> &[Vec<DVec2>] {
        &self.subpaths
    }

    pub fn is_empty(&self) -> bool {
        self.subpaths.is_empty()
    }
}

/// Anything the renderer can draw onto
pub trait DrawSurface {
    /// Logical size in pixels (width, height)
    fn size(&self) -> (f64, f64);
    fn clear(&mut self);
    fn stroke_path(&mut self, path: &Path, stroke: Stroke);
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: &'static str);
    fn fill_text(&mut self, text: &str, at: DVec2, label: Label);
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Stroke {
        path: Path,
        stroke: Stroke,
    },
    FillCircle {
        center: DVec2,
        radius: f64,
        color: &'static str,
    },
    Text {
        text: String,
        at: DVec2,
        label: Label,
    },
}

/// Surface that records draw calls instead of rasterizing them
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands issued since the most recent `clear`
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear))
            .unwrap_or(0);
        &self.commands[start..]
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn stroke_path(&mut self, path: &Path, stroke: Stroke) {
        self.commands.push(DrawCommand::Stroke {
            path: path.clone(),
            stroke,
        });
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: &'static str) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, at: DVec2, label: Label) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
            label,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_builder_subpaths() {
        let mut path = Path::new();
        path.move_to(DVec2::ZERO)
            .line_to(DVec2::ONE)
            .move_to(DVec2::new(2.0, 2.0))
            .line_to(DVec2::new(3.0, 3.0));
        assert_eq!(path.subpaths().len(), 2);
        assert_eq!(path.subpaths()[0], vec![DVec2::ZERO, DVec2::ONE]);
    }

    #[test]
    fn test_polyline_from_empty_iter() {
        assert!(Path::polyline(Vec::new()).is_empty());
        let path = Path::polyline([DVec2::ZERO, DVec2::X, DVec2::ONE]);
        assert_eq!(path.subpaths(), &[vec![DVec2::ZERO, DVec2::X, DVec2::ONE]]);
    }

    #[test]
    fn test_last_frame_starts_at_clear() {
        let mut surface = RecordingSurface::new(600.0, 400.0);
        surface.clear();
        surface.fill_circle(DVec2::ZERO, 1.0, "red");
        surface.clear();
        surface.fill_circle(DVec2::ONE, 2.0, "blue");

        let frame = surface.last_frame();
        assert_eq!(frame.len(), 2);
        assert_eq!(frame[0], DrawCommand::Clear);
        assert_eq!(surface.commands().len(), 4);
    }
}
