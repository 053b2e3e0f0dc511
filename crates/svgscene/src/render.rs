// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A render tree walker.
//!
//! Rasterization is up to a [`Backend`].

use crate::{
    Color, Document, GraphicsNode, LayoutHandle, LineCap, NodeKind, PathSegment, Transform,
};

/// A graphics backend.
///
/// All coordinates are in the user space of the current transform.
pub trait Backend {
    /// Pushes a node's local transform.
    ///
    /// The local transform is applied before the inherited one.
    fn push_transform(&mut self, ts: &Transform);

    /// Restores the transform that was active before the last `push_transform`.
    fn pop_transform(&mut self);

    /// Fills a path.
    fn fill_path(&mut self, segments: &[PathSegment], color: Color);

    /// Strokes a path.
    fn stroke_path(&mut self, segments: &[PathSegment], color: Color, width: f64, cap: LineCap);

    /// Fills an ellipse.
    fn fill_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, color: Color);

    /// Strokes an ellipse.
    fn stroke_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, color: Color, width: f64);

    /// Strokes a line.
    #[allow(clippy::too_many_arguments)]
    fn draw_line(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
        width: f64,
        cap: LineCap,
    );

    /// Draws a text layout with its top-left corner at `x`, `y`.
    fn draw_text(&mut self, layout: LayoutHandle, x: f64, y: f64, color: Color);
}

/// Renders a document using the provided backend.
///
/// Nodes are visited in a pre-order depth-first order.
pub fn render(doc: &Document, backend: &mut dyn Backend) {
    render_node(doc.root(), backend);
}

fn render_node(node: &GraphicsNode, backend: &mut dyn Backend) {
    if let Some(ts) = node.transform() {
        backend.push_transform(&ts);
    }

    draw(node, backend);

    for child in node.children() {
        render_node(child, backend);
    }

    if node.transform().is_some() {
        backend.pop_transform();
    }
}

fn draw(node: &GraphicsNode, backend: &mut dyn Backend) {
    let fill = node.fill().and_then(|p| p.color());
    let stroke = node.stroke().and_then(|p| p.color());
    let width = node.stroke_width();
    let cap = node.stroke_cap();

    match *node.kind() {
        NodeKind::Group | NodeKind::Viewport { .. } => {}
        NodeKind::Rect {
            x,
            y,
            width: w,
            height: h,
        } => {
            let segments = rect_to_path(x, y, w, h);
            if let Some(color) = fill {
                backend.fill_path(&segments, color);
            }
            if let Some(color) = stroke {
                backend.stroke_path(&segments, color, width, cap);
            }
        }
        NodeKind::Circle { cx, cy, r } => draw_ellipse(cx, cy, r, r, fill, stroke, width, backend),
        NodeKind::Ellipse { cx, cy, rx, ry } => {
            draw_ellipse(cx, cy, rx, ry, fill, stroke, width, backend)
        }
        NodeKind::Line { x1, y1, x2, y2 } => {
            // Lines cannot be filled.
            if let Some(color) = stroke {
                backend.draw_line(x1, y1, x2, y2, color, width, cap);
            }
        }
        NodeKind::Path { ref segments } => {
            if let Some(color) = fill {
                backend.fill_path(segments, color);
            }
            if let Some(color) = stroke {
                backend.stroke_path(segments, color, width, cap);
            }
        }
        NodeKind::Text {
            baseline_offset,
            layout,
            ..
        } => {
            if let (Some(layout), Some(color)) = (layout, fill) {
                backend.draw_text(layout, 0.0, -baseline_offset, color);
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_ellipse(
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
    fill: Option<Color>,
    stroke: Option<Color>,
    width: f64,
    backend: &mut dyn Backend,
) {
    if let Some(color) = fill {
        backend.fill_ellipse(cx, cy, rx, ry, color);
    }
    if let Some(color) = stroke {
        backend.stroke_ellipse(cx, cy, rx, ry, color, width);
    }
}

fn rect_to_path(x: f64, y: f64, width: f64, height: f64) -> [PathSegment; 5] {
    [
        PathSegment::MoveTo { x, y },
        PathSegment::LineTo { x: x + width, y },
        PathSegment::LineTo {
            x: x + width,
            y: y + height,
        },
        PathSegment::LineTo { x, y: y + height },
        PathSegment::ClosePath,
    ]
}

/// A recorded backend call.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub enum DrawCommand {
    FillPath {
        segments: Vec<PathSegment>,
        color: Color,
        /// An absolute transform.
        transform: Transform,
    },
    StrokePath {
        segments: Vec<PathSegment>,
        color: Color,
        width: f64,
        cap: LineCap,
        transform: Transform,
    },
    FillEllipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
        color: Color,
        transform: Transform,
    },
    StrokeEllipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
        color: Color,
        width: f64,
        transform: Transform,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
        width: f64,
        cap: LineCap,
        transform: Transform,
    },
    Text {
        layout: LayoutHandle,
        x: f64,
        y: f64,
        color: Color,
        transform: Transform,
    },
}

/// A backend that records draw calls.
///
/// Transforms are accumulated, so each command stores an absolute transform.
#[derive(Clone, Default, Debug)]
pub struct RecordingBackend {
    stack: Vec<Transform>,
    commands: Vec<DrawCommand>,
}

impl RecordingBackend {
    /// Creates a new backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns recorded commands.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Returns recorded commands, consuming the backend.
    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    fn transform(&self) -> Transform {
        self.stack.last().copied().unwrap_or_default()
    }
}

impl Backend for RecordingBackend {
    fn push_transform(&mut self, ts: &Transform) {
        let ts = ts.multiply(&self.transform());
        self.stack.push(ts);
    }

    fn pop_transform(&mut self) {
        self.stack.pop();
    }

    fn fill_path(&mut self, segments: &[PathSegment], color: Color) {
        let transform = self.transform();
        self.commands.push(DrawCommand::FillPath {
            segments: segments.to_vec(),
            color,
            transform,
        });
    }

    fn stroke_path(&mut self, segments: &[PathSegment], color: Color, width: f64, cap: LineCap) {
        let transform = self.transform();
        self.commands.push(DrawCommand::StrokePath {
            segments: segments.to_vec(),
            color,
            width,
            cap,
            transform,
        });
    }

    fn fill_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, color: Color) {
        let transform = self.transform();
        self.commands.push(DrawCommand::FillEllipse {
            cx,
            cy,
            rx,
            ry,
            color,
            transform,
        });
    }

    fn stroke_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, color: Color, width: f64) {
        let transform = self.transform();
        self.commands.push(DrawCommand::StrokeEllipse {
            cx,
            cy,
            rx,
            ry,
            color,
            width,
            transform,
        });
    }

    fn draw_line(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
        width: f64,
        cap: LineCap,
    ) {
        let transform = self.transform();
        self.commands.push(DrawCommand::Line {
            x1,
            y1,
            x2,
            y2,
            color,
            width,
            cap,
            transform,
        });
    }

    fn draw_text(&mut self, layout: LayoutHandle, x: f64, y: f64, color: Color) {
        let transform = self.transform();
        self.commands.push(DrawCommand::Text {
            layout,
            x,
            y,
            color,
            transform,
        });
    }
}

impl std::fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        fn hex(c: &Color) -> String {
            let [r, g, b, a] = c.to_rgba8();
            format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
        }

        fn mat(ts: &Transform) -> String {
            format!(
                "matrix({} {} {} {} {} {})",
                ts.a, ts.b, ts.c, ts.d, ts.e, ts.f
            )
        }

        match *self {
            DrawCommand::FillPath {
                ref segments,
                ref color,
                ref transform,
            } => write!(
                f,
                "fill_path segments={} color={} {}",
                segments.len(),
                hex(color),
                mat(transform)
            ),
            DrawCommand::StrokePath {
                ref segments,
                ref color,
                width,
                cap,
                ref transform,
            } => write!(
                f,
                "stroke_path segments={} color={} width={} cap={:?} {}",
                segments.len(),
                hex(color),
                width,
                cap,
                mat(transform)
            ),
            DrawCommand::FillEllipse {
                cx,
                cy,
                rx,
                ry,
                ref color,
                ref transform,
            } => write!(
                f,
                "fill_ellipse {} {} {} {} color={} {}",
                cx,
                cy,
                rx,
                ry,
                hex(color),
                mat(transform)
            ),
            DrawCommand::StrokeEllipse {
                cx,
                cy,
                rx,
                ry,
                ref color,
                width,
                ref transform,
            } => write!(
                f,
                "stroke_ellipse {} {} {} {} color={} width={} {}",
                cx,
                cy,
                rx,
                ry,
                hex(color),
                width,
                mat(transform)
            ),
            DrawCommand::Line {
                x1,
                y1,
                x2,
                y2,
                ref color,
                width,
                cap,
                ref transform,
            } => write!(
                f,
                "draw_line {} {} {} {} color={} width={} cap={:?} {}",
                x1,
                y1,
                x2,
                y2,
                hex(color),
                width,
                cap,
                mat(transform)
            ),
            DrawCommand::Text {
                layout,
                x,
                y,
                ref color,
                ref transform,
            } => write!(
                f,
                "draw_text #{} {} {} color={} {}",
                layout.get(),
                x,
                y,
                hex(color),
                mat(transform)
            ),
        }
    }
}
