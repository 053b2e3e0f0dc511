// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::tokens::{attribute, Attribute};
use super::units::{self, position, required_length};
use super::{Sink, SyntaxError};
use crate::{Diagnostic, NodeKind, PathSegment};

/// Checks that an element is a basic shape.
pub(crate) fn is_shape(tag: &str) -> bool {
    matches!(
        tag,
        "rect" | "circle" | "ellipse" | "line" | "path" | "polyline" | "polygon"
    )
}

/// Converts a basic shape element.
///
/// Returns `Ok(None)` when the element has to be skipped.
/// A diagnostic is already recorded in this case.
pub(crate) fn convert(
    tag: &str,
    attrs: &[Attribute],
    dpi: f64,
    sink: &mut Sink,
) -> Result<Option<NodeKind>, SyntaxError> {
    let kind = match tag {
        "rect" => convert_rect(attrs, dpi, sink),
        "circle" => convert_circle(attrs, dpi, sink),
        "ellipse" => convert_ellipse(attrs, dpi, sink),
        "line" => convert_line(attrs, dpi, sink),
        "path" => return convert_path(attrs, sink),
        "polyline" => convert_polyline(tag, attrs, false, sink),
        "polygon" => convert_polyline(tag, attrs, true, sink),
        _ => None,
    };

    Ok(kind)
}

fn convert_rect(attrs: &[Attribute], dpi: f64, sink: &mut Sink) -> Option<NodeKind> {
    let width = required_length("rect", attrs, "width", dpi, sink);
    let height = required_length("rect", attrs, "height", dpi, sink);
    let x = position("rect", attrs, "x", dpi, sink);
    let y = position("rect", attrs, "y", dpi, sink);

    Some(NodeKind::Rect {
        x: x?,
        y: y?,
        width: width?,
        height: height?,
    })
}

fn convert_circle(attrs: &[Attribute], dpi: f64, sink: &mut Sink) -> Option<NodeKind> {
    let r = required_length("circle", attrs, "r", dpi, sink);
    let cx = position("circle", attrs, "cx", dpi, sink);
    let cy = position("circle", attrs, "cy", dpi, sink);

    Some(NodeKind::Circle {
        cx: cx?,
        cy: cy?,
        r: r?,
    })
}

fn convert_ellipse(attrs: &[Attribute], dpi: f64, sink: &mut Sink) -> Option<NodeKind> {
    let rx = required_length("ellipse", attrs, "rx", dpi, sink);
    let ry = required_length("ellipse", attrs, "ry", dpi, sink);
    let cx = position("ellipse", attrs, "cx", dpi, sink);
    let cy = position("ellipse", attrs, "cy", dpi, sink);

    Some(NodeKind::Ellipse {
        cx: cx?,
        cy: cy?,
        rx: rx?,
        ry: ry?,
    })
}

fn convert_line(attrs: &[Attribute], dpi: f64, sink: &mut Sink) -> Option<NodeKind> {
    let x1 = position("line", attrs, "x1", dpi, sink);
    let y1 = position("line", attrs, "y1", dpi, sink);
    let x2 = position("line", attrs, "x2", dpi, sink);
    let y2 = position("line", attrs, "y2", dpi, sink);

    Some(NodeKind::Line {
        x1: x1?,
        y1: y1?,
        x2: x2?,
        y2: y2?,
    })
}

fn convert_path(attrs: &[Attribute], sink: &mut Sink) -> Result<Option<NodeKind>, SyntaxError> {
    let value = match attribute(attrs, "d") {
        Some(v) => v,
        None => {
            sink.record(Diagnostic::MissingRequiredAttribute {
                element: "path".to_string(),
                attribute: "d".to_string(),
            });
            return Ok(None);
        }
    };

    let segments = scenetypes::parse_path(value).map_err(|e| SyntaxError::new("d", e))?;
    Ok(Some(NodeKind::Path { segments }))
}

fn convert_polyline(
    tag: &str,
    attrs: &[Attribute],
    close: bool,
    sink: &mut Sink,
) -> Option<NodeKind> {
    let value = match attribute(attrs, "points") {
        Some(v) => v,
        None => {
            sink.record(Diagnostic::MissingRequiredAttribute {
                element: tag.to_string(),
                attribute: "points".to_string(),
            });
            return None;
        }
    };

    let numbers = match scenetypes::parse_number_list(value) {
        Ok(list) if list.len() >= 2 => list,
        _ => {
            sink.record(units::invalid(tag, "points", value));
            return None;
        }
    };

    // An odd coordinate is ignored.
    let mut segments: Vec<PathSegment> = numbers
        .chunks_exact(2)
        .enumerate()
        .map(|(i, p)| {
            if i == 0 {
                PathSegment::MoveTo { x: p[0], y: p[1] }
            } else {
                PathSegment::LineTo { x: p[0], y: p[1] }
            }
        })
        .collect();

    if close {
        segments.push(PathSegment::ClosePath);
    }

    Some(NodeKind::Path { segments })
}
