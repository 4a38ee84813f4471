//! Canvas2D painter (WASM only)

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::Renderer;
use super::shapes::{DrawList, Shape};

/// Paints draw lists onto a `<canvas>` element
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Wrap a canvas; `None` if no 2D context is available
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Match the backing store to the CSS size
    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn path_circle(&self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)
            .is_err()
        {
            log::warn!("Canvas arc rejected at {:?} r={}", center, radius);
        }
    }

    fn paint(&self, shape: &Shape) {
        let ctx = &self.ctx;
        match shape {
            Shape::Circle {
                center,
                radius,
                fill,
            } => {
                ctx.set_fill_style_str(&fill.to_css());
                self.path_circle(*center, *radius);
                ctx.fill();
            }
            Shape::Glow {
                center,
                radius,
                color,
            } => {
                let (x, y) = (center.x as f64, center.y as f64);
                let Ok(gradient) = ctx.create_radial_gradient(x, y, 0.0, x, y, *radius as f64)
                else {
                    return;
                };
                let clear = color.rgb.with_alpha(0.0);
                if gradient.add_color_stop(0.0, &color.to_css()).is_err()
                    || gradient.add_color_stop(1.0, &clear.to_css()).is_err()
                {
                    return;
                }
                ctx.set_fill_style_canvas_gradient(&gradient);
                self.path_circle(*center, *radius);
                ctx.fill();
            }
            Shape::Ring {
                center,
                radius,
                width,
                color,
            } => {
                ctx.set_stroke_style_str(&color.to_css());
                ctx.set_line_width(*width as f64);
                self.path_circle(*center, *radius);
                ctx.stroke();
            }
            Shape::Line {
                from,
                to,
                width,
                color,
            } => {
                ctx.set_stroke_style_str(&color.to_css());
                ctx.set_line_width(*width as f64);
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.stroke();
            }
            Shape::Polygon { points, fill } => {
                let Some((first, rest)) = points.split_first() else {
                    return;
                };
                ctx.set_fill_style_str(&fill.to_css());
                ctx.begin_path();
                ctx.move_to(first.x as f64, first.y as f64);
                for p in rest {
                    ctx.line_to(p.x as f64, p.y as f64);
                }
                ctx.close_path();
                ctx.fill();
            }
            Shape::Rect {
                min,
                size,
                fill,
                stroke,
            } => {
                let (x, y, w, h) = (min.x as f64, min.y as f64, size.x as f64, size.y as f64);
                if let Some(fill) = fill {
                    ctx.set_fill_style_str(&fill.to_css());
                    ctx.fill_rect(x, y, w, h);
                }
                if let Some(stroke) = stroke {
                    ctx.set_stroke_style_str(&stroke.to_css());
                    ctx.set_line_width(2.0);
                    ctx.stroke_rect(x, y, w, h);
                }
            }
        }
    }
}

impl Renderer for CanvasRenderer {
    fn draw(&mut self, frame: &DrawList) {
        let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);
        let ctx = &self.ctx;

        ctx.set_fill_style_str(&frame.clear.with_alpha(1.0).to_css());
        ctx.fill_rect(0.0, 0.0, w, h);

        ctx.save();
        if ctx
            .translate(frame.offset.x as f64, frame.offset.y as f64)
            .is_err()
        {
            log::warn!("Canvas translate failed");
        }
        for shape in &frame.shapes {
            self.paint(shape);
        }
        ctx.restore();
    }
}
