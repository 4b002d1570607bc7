//! Canvas 2D backend for the browser

use glam::DVec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::surface::{DrawSurface, Label, Path, Stroke};

/// Draws straight onto a `<canvas>` element's 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, context })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl DrawSurface for CanvasSurface {
    fn size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn clear(&mut self) {
        let (width, height) = self.size();
        self.context.clear_rect(0.0, 0.0, width, height);
    }

    fn stroke_path(&mut self, path: &Path, stroke: Stroke) {
        self.context.set_stroke_style_str(stroke.color);
        self.context.set_line_width(stroke.width);
        self.context.begin_path();
        for subpath in path.subpaths() {
            let mut points = subpath.iter();
            if let Some(first) = points.next() {
                self.context.move_to(first.x, first.y);
                for point in points {
                    self.context.line_to(point.x, point.y);
                }
            }
        }
        self.context.stroke();
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: &'static str) {
        self.context.set_fill_style_str(color);
        self.context.begin_path();
        if let Err(e) = self
            .context
            .arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU)
        {
            log::warn!("Canvas arc failed: {:?}", e);
            return;
        }
        self.context.fill();
    }

    fn fill_text(&mut self, text: &str, at: DVec2, label: Label) {
        self.context.set_fill_style_str(label.color);
        self.context.set_font(label.font);
        self.context.set_text_align(label.align.as_str());
        if let Err(e) = self.context.fill_text(text, at.x, at.y) {
            log::warn!("Canvas text failed: {:?}", e);
        }
    }
}
