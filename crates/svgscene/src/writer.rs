// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use float_cmp::ApproxEqUlps;
use xmlwriter::{Indent, XmlWriter};

use crate::{Color, Document, GraphicsNode, LineCap, NodeKind, Paint, PathSegment, Transform};

/// Font properties that are written as is.
const FONT_PROPERTIES: &[&str] = &["font-family", "font-size", "font-weight", "font-style"];

impl Document {
    /// Writes the resolved scene back to SVG.
    ///
    /// Viewports are written as groups, so the output has no `viewBox`.
    pub fn to_svg_string(&self, opt: &WriteOptions) -> String {
        convert(self, opt)
    }
}

/// XML writing options.
#[derive(Clone, Debug)]
pub struct WriteOptions {
    /// Set the coordinates numeric precision.
    ///
    /// Smaller precision can lead to a malformed output in some cases.
    ///
    /// Default: 8
    pub coordinates_precision: u8,

    /// Set the transform values numeric precision.
    ///
    /// Smaller precision can lead to a malformed output in some cases.
    ///
    /// Default: 8
    pub transforms_precision: u8,

    /// Use single quote marks instead of double quote.
    ///
    /// Default: disabled
    pub use_single_quote: bool,

    /// Set XML nodes indention.
    ///
    /// Default: 4 spaces
    pub indent: Indent,

    /// Set XML attributes indention.
    ///
    /// Default: `None`
    pub attributes_indent: Indent,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            coordinates_precision: 8,
            transforms_precision: 8,
            use_single_quote: false,
            indent: Indent::Spaces(4),
            attributes_indent: Indent::None,
        }
    }
}

fn convert(doc: &Document, opt: &WriteOptions) -> String {
    let mut xml = XmlWriter::new(xmlwriter::Options {
        use_single_quote: opt.use_single_quote,
        indent: opt.indent,
        attributes_indent: opt.attributes_indent,
    });

    let root = doc.root();

    xml.start_element("svg");
    xml.write_number("width", doc.size().width(), opt.coordinates_precision);
    xml.write_number("height", doc.size().height(), opt.coordinates_precision);
    xml.write_attribute("xmlns", "http://www.w3.org/2000/svg");
    write_common(root, opt, &mut xml);

    match root.transform() {
        Some(ts) if !ts.is_identity() => {
            xml.start_element("g");
            xml.write_transform(ts, opt);
            write_children(root, opt, &mut xml);
            xml.end_element();
        }
        _ => write_children(root, opt, &mut xml),
    }

    xml.end_document()
}

fn write_children(node: &GraphicsNode, opt: &WriteOptions, xml: &mut XmlWriter) {
    for child in node.children() {
        write_node(child, opt, xml);
    }
}

fn write_node(node: &GraphicsNode, opt: &WriteOptions, xml: &mut XmlWriter) {
    let prec = opt.coordinates_precision;
    match *node.kind() {
        NodeKind::Group | NodeKind::Viewport { .. } => {
            xml.start_element("g");
        }
        NodeKind::Rect {
            x,
            y,
            width,
            height,
        } => {
            xml.start_element("rect");
            xml.write_number("x", x, prec);
            xml.write_number("y", y, prec);
            xml.write_number("width", width, prec);
            xml.write_number("height", height, prec);
        }
        NodeKind::Circle { cx, cy, r } => {
            xml.start_element("circle");
            xml.write_number("cx", cx, prec);
            xml.write_number("cy", cy, prec);
            xml.write_number("r", r, prec);
        }
        NodeKind::Ellipse { cx, cy, rx, ry } => {
            xml.start_element("ellipse");
            xml.write_number("cx", cx, prec);
            xml.write_number("cy", cy, prec);
            xml.write_number("rx", rx, prec);
            xml.write_number("ry", ry, prec);
        }
        NodeKind::Line { x1, y1, x2, y2 } => {
            xml.start_element("line");
            xml.write_number("x1", x1, prec);
            xml.write_number("y1", y1, prec);
            xml.write_number("x2", x2, prec);
            xml.write_number("y2", y2, prec);
        }
        NodeKind::Path { ref segments } => {
            xml.start_element("path");
            xml.write_path_data(segments, prec);
        }
        NodeKind::Text { .. } => {
            xml.start_element("text");
            xml.write_attribute("xml:space", "preserve");
        }
    }

    if let Some(ts) = node.transform() {
        if !ts.is_identity() {
            xml.write_transform(ts, opt);
        }
    }

    write_common(node, opt, xml);

    if let NodeKind::Text { ref content, .. } = *node.kind() {
        xml.set_preserve_whitespaces(true);
        xml.write_text(&content.replace('&', "&amp;"));
        write_children(node, opt, xml);
        xml.end_element();
        xml.set_preserve_whitespaces(false);
    } else {
        write_children(node, opt, xml);
        xml.end_element();
    }
}

/// Writes paint, stroke and font properties.
fn write_common(node: &GraphicsNode, opt: &WriteOptions, xml: &mut XmlWriter) {
    if let Some(paint) = node.fill() {
        xml.write_paint("fill", "fill-opacity", paint, opt);
    }

    if let Some(paint) = node.stroke() {
        xml.write_paint("stroke", "stroke-opacity", paint, opt);
    }

    if !node.stroke_width().approx_eq_ulps(&1.0, 4) {
        xml.write_number("stroke-width", node.stroke_width(), opt.coordinates_precision);
    }

    match node.stroke_cap() {
        LineCap::Butt => {}
        LineCap::Round => xml.write_attribute("stroke-linecap", "round"),
        LineCap::Square => xml.write_attribute("stroke-linecap", "square"),
    }

    for name in FONT_PROPERTIES {
        if let Some(value) = node.raw_styles().get(*name) {
            xml.write_attribute(name, value);
        }
    }
}

trait XmlWriterExt {
    fn write_number(&mut self, name: &str, n: f64, precision: u8);
    fn write_color(&mut self, name: &str, c: Color);
    fn write_paint(&mut self, name: &str, opacity_name: &str, paint: Paint, opt: &WriteOptions);
    fn write_transform(&mut self, ts: Transform, opt: &WriteOptions);
    fn write_path_data(&mut self, segments: &[PathSegment], precision: u8);
}

impl XmlWriterExt for XmlWriter {
    fn write_number(&mut self, name: &str, n: f64, precision: u8) {
        self.write_attribute_raw(name, |buf| write_num(n, buf, precision));
    }

    fn write_color(&mut self, name: &str, c: Color) {
        static CHARS: &[u8] = b"0123456789abcdef";

        #[inline]
        fn int2hex(n: u8) -> (u8, u8) {
            (CHARS[(n >> 4) as usize], CHARS[(n & 0xf) as usize])
        }

        let [r, g, b, a] = c.to_rgba8();
        let mut channels = vec![r, g, b];
        if a != 255 {
            channels.push(a);
        }

        self.write_attribute_raw(name, |buf| {
            buf.push(b'#');
            for n in channels {
                let (n1, n2) = int2hex(n);
                buf.push(n1);
                buf.push(n2);
            }
        });
    }

    fn write_paint(&mut self, name: &str, opacity_name: &str, paint: Paint, opt: &WriteOptions) {
        match paint {
            Paint::None => self.write_attribute(name, "none"),
            Paint::Color { color, opacity } => {
                // The color alpha already includes the opacity.
                let own_alpha = if opacity > 0.0 {
                    color.alpha as f64 / opacity
                } else {
                    1.0
                };

                let own = Color {
                    alpha: own_alpha as f32,
                    ..color
                };
                self.write_color(name, own);

                if !opacity.approx_eq_ulps(&1.0, 4) {
                    self.write_number(opacity_name, opacity, opt.coordinates_precision);
                }
            }
        }
    }

    fn write_transform(&mut self, ts: Transform, opt: &WriteOptions) {
        let prec = opt.transforms_precision;
        self.write_attribute_raw("transform", |buf| {
            buf.extend_from_slice(b"matrix(");
            for (i, n) in [ts.a, ts.b, ts.c, ts.d, ts.e, ts.f].iter().enumerate() {
                if i != 0 {
                    buf.push(b' ');
                }
                write_num(*n, buf, prec);
            }
            buf.push(b')');
        });
    }

    fn write_path_data(&mut self, segments: &[PathSegment], precision: u8) {
        self.write_attribute_raw("d", |buf| {
            let write_cmd = |cmd: u8, numbers: &[f64], buf: &mut Vec<u8>| {
                buf.push(cmd);
                buf.push(b' ');
                for n in numbers {
                    write_num(*n, buf, precision);
                    buf.push(b' ');
                }
            };

            for seg in segments {
                match *seg {
                    PathSegment::MoveTo { x, y } => write_cmd(b'M', &[x, y], buf),
                    PathSegment::LineTo { x, y } => write_cmd(b'L', &[x, y], buf),
                    PathSegment::QuadTo { x1, y1, x, y } => write_cmd(b'Q', &[x1, y1, x, y], buf),
                    PathSegment::CubicTo {
                        x1,
                        y1,
                        x2,
                        y2,
                        x,
                        y,
                    } => write_cmd(b'C', &[x1, y1, x2, y2, x, y], buf),
                    PathSegment::ArcTo {
                        rx,
                        ry,
                        x_axis_rotation,
                        large_arc,
                        sweep,
                        x,
                        y,
                    } => {
                        let large_arc = if large_arc { 1.0 } else { 0.0 };
                        let sweep = if sweep { 1.0 } else { 0.0 };
                        write_cmd(
                            b'A',
                            &[rx, ry, x_axis_rotation, large_arc, sweep, x, y],
                            buf,
                        )
                    }
                    PathSegment::ClosePath => write_cmd(b'Z', &[], buf),
                }
            }

            buf.pop();
        });
    }
}

static POW_VEC: &[f64] = &[
    1.0,
    10.0,
    100.0,
    1_000.0,
    10_000.0,
    100_000.0,
    1_000_000.0,
    10_000_000.0,
    100_000_000.0,
    1_000_000_000.0,
    10_000_000_000.0,
    100_000_000_000.0,
    1_000_000_000_000.0,
];

fn write_num(num: f64, buf: &mut Vec<u8>, precision: u8) {
    let pow = POW_VEC[(precision as usize).min(POW_VEC.len() - 1)];

    // Round numbers up to the specified precision to prevent writing
    // ugly numbers like 29.999999999999996.
    let mut v = (num * pow).round() / pow;

    // No `-0`.
    if v == 0.0 {
        v = 0.0;
    }

    if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        buf.extend_from_slice((v as i64).to_string().as_bytes());
    } else {
        buf.extend_from_slice(v.to_string().as_bytes());
    }
}
