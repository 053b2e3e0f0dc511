// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use scenetypes::Stream;

use super::tokens::{attribute, Attribute};
use super::Sink;
use crate::{Diagnostic, ViewBox};

/// Parses a single number surrounded by optional spaces.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    let mut s = Stream::from(text);
    let n = s.parse_number().ok()?;
    s.skip_spaces();
    if s.at_end() {
        Some(n)
    } else {
        None
    }
}

#[inline]
pub(crate) fn parse_length(text: &str, dpi: f64) -> Option<f64> {
    scenetypes::resolve_length(text, dpi).ok()
}

/// Parses a `viewBox` attribute.
///
/// Boxes with a non-positive size are rejected.
pub(crate) fn parse_view_box(text: &str) -> Option<ViewBox> {
    let list = scenetypes::parse_number_list(text).ok()?;
    if list.len() != 4 {
        return None;
    }

    let (x, y, width, height) = (list[0], list[1], list[2], list[3]);
    if width <= 0.0 || height <= 0.0 {
        return None;
    }

    Some(ViewBox {
        x,
        y,
        width,
        height,
    })
}

/// Resolves a required non-negative length.
///
/// Records a diagnostic and returns `None` when the attribute
/// is missing or invalid.
pub(crate) fn required_length(
    tag: &str,
    attrs: &[Attribute],
    name: &str,
    dpi: f64,
    sink: &mut Sink,
) -> Option<f64> {
    let value = match attribute(attrs, name) {
        Some(v) => v,
        None => {
            sink.record(Diagnostic::MissingRequiredAttribute {
                element: tag.to_string(),
                attribute: name.to_string(),
            });
            return None;
        }
    };

    match parse_length(value, dpi) {
        Some(n) if n >= 0.0 => Some(n),
        _ => {
            sink.record(invalid(tag, name, value));
            None
        }
    }
}

/// Resolves an optional length with a zero default.
///
/// A present but unparsable value is an error.
pub(crate) fn position(
    tag: &str,
    attrs: &[Attribute],
    name: &str,
    dpi: f64,
    sink: &mut Sink,
) -> Option<f64> {
    match attribute(attrs, name) {
        Some(value) => match parse_length(value, dpi) {
            Some(n) => Some(n),
            None => {
                sink.record(invalid(tag, name, value));
                None
            }
        },
        None => Some(0.0),
    }
}

pub(crate) fn invalid(tag: &str, name: &str, value: &str) -> Diagnostic {
    Diagnostic::InvalidAttribute {
        element: tag.to_string(),
        attribute: name.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number() {
        assert_eq!(parse_number(" 0.5 "), Some(0.5));
        assert_eq!(parse_number("0.5px"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn view_box() {
        let vb = parse_view_box("0 0 50 100").unwrap();
        assert_eq!(vb.width, 50.0);
        assert_eq!(vb.height, 100.0);

        assert_eq!(parse_view_box("0,0,50"), None);
        assert_eq!(parse_view_box("0 0 0 100"), None);
        assert_eq!(parse_view_box("0 0 -5 100"), None);
    }

    #[test]
    fn required() {
        let attrs = [Attribute::new("width", "-1"), Attribute::new("r", "2in")];
        let mut sink = Sink::default();
        assert_eq!(required_length("rect", &attrs, "width", 96.0, &mut sink), None);
        assert_eq!(required_length("rect", &attrs, "height", 96.0, &mut sink), None);
        assert_eq!(required_length("circle", &attrs, "r", 96.0, &mut sink), Some(192.0));
        assert_eq!(sink.diagnostics.len(), 2);
        assert_eq!(
            sink.diagnostics[1],
            Diagnostic::MissingRequiredAttribute {
                element: "rect".to_string(),
                attribute: "height".to_string(),
            }
        );
    }

    #[test]
    fn optional_position() {
        let attrs = [Attribute::new("x", "zz")];
        let mut sink = Sink::default();
        assert_eq!(position("rect", &attrs, "x", 96.0, &mut sink), None);
        assert_eq!(position("rect", &attrs, "y", 96.0, &mut sink), Some(0.0));
        assert_eq!(sink.diagnostics.len(), 1);
    }
}
