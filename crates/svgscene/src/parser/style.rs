// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashMap;

use scenetypes::Stream;

use super::builder::Frame;
use super::tokens::{attribute, Attribute};
use super::{units, Options, Sink, SyntaxError};
use crate::{Diagnostic, FontStyle, LineCap, Paint};

/// Attributes that take part in the style cascade.
const PRESENTATION_ATTRIBUTES: &[&str] = &[
    "fill",
    "fill-opacity",
    "font-family",
    "font-size",
    "font-style",
    "font-weight",
    "stroke",
    "stroke-linecap",
    "stroke-opacity",
    "stroke-width",
    "white-space",
];

/// Collects element's own style declarations.
///
/// Declarations from the `style` attribute override presentation attributes.
pub(crate) fn collect(attrs: &[Attribute]) -> Result<HashMap<String, String>, SyntaxError> {
    let mut styles = HashMap::new();
    for attr in attrs {
        if PRESENTATION_ATTRIBUTES.contains(&attr.name) {
            styles.insert(attr.name.to_string(), attr.value.trim().to_string());
        } else if attr.name == "xml:space" {
            let value = match attr.value.trim() {
                "preserve" => "pre",
                "default" => "normal",
                _ => continue,
            };

            // An explicit `white-space` wins.
            styles
                .entry("white-space".to_string())
                .or_insert_with(|| value.to_string());
        }
    }

    if let Some(text) = attribute(attrs, "style") {
        let declarations = parse_declarations(text).map_err(|e| SyntaxError::new("style", e))?;
        for (name, value) in declarations {
            styles.insert(name.to_string(), value.to_string());
        }
    }

    Ok(styles)
}

/// Splits a `style` attribute into `name: value` pairs.
///
/// Empty declarations and declarations with an empty name or value are ignored.
pub(crate) fn parse_declarations(text: &str) -> Result<Vec<(&str, &str)>, scenetypes::Error> {
    let mut list = Vec::new();
    let mut offset = 0;
    for item in text.split(';') {
        let start = offset + (item.len() - item.trim_start().len());
        offset += item.len() + 1;

        let item = item.trim();
        if item.is_empty() {
            continue;
        }

        let (name, value) = match item.split_once(':') {
            Some(pair) => pair,
            None => {
                let pos = Stream::from(text).calc_char_pos_at(start);
                return Err(scenetypes::Error::UnexpectedData(pos));
            }
        };

        let (name, value) = (name.trim(), value.trim());
        if !name.is_empty() && !value.is_empty() {
            list.push((name, value));
        }
    }

    Ok(list)
}

/// A style lookup over an element and its open ancestors.
pub(crate) struct Cascade<'a> {
    own: &'a HashMap<String, String>,
    ancestors: &'a [Frame],
}

impl<'a> Cascade<'a> {
    pub fn new(own: &'a HashMap<String, String>, ancestors: &'a [Frame]) -> Self {
        Cascade { own, ancestors }
    }

    /// Returns the nearest declared value.
    ///
    /// Skipped ancestors are ignored and `inherit` defers to the next one.
    pub fn get(&self, name: &str) -> Option<&'a str> {
        let own = self.own.get(name).map(String::as_str);
        let inherited = self
            .ancestors
            .iter()
            .rev()
            .filter_map(|frame| frame.node())
            .map(|node| node.raw_styles.get(name).map(String::as_str));

        std::iter::once(own)
            .chain(inherited)
            .flatten()
            .find(|value| *value != "inherit")
    }
}

/// Resolved font properties.
#[derive(Clone, PartialEq, Debug)]
pub(crate) struct Font {
    pub families: Vec<String>,
    pub size: f64,
    pub weight: u16,
    pub style: FontStyle,
}

/// Resolves cascaded properties of a single element.
pub(crate) struct Resolver<'a> {
    pub tag: &'a str,
    pub cascade: Cascade<'a>,
    pub opt: &'a Options,
}

impl<'a> Resolver<'a> {
    pub fn fill(&self, sink: &mut Sink) -> Paint {
        self.paint("fill", "fill-opacity", self.opt.default_fill, sink)
    }

    pub fn stroke(&self, sink: &mut Sink) -> Paint {
        self.paint("stroke", "stroke-opacity", self.opt.default_stroke, sink)
    }

    fn paint(&self, name: &str, opacity_name: &str, default: Paint, sink: &mut Sink) -> Paint {
        let opacity = self.opacity(opacity_name, sink);

        let value = match self.cascade.get(name) {
            Some(v) => v,
            None => return apply_opacity(default, opacity),
        };

        match scenetypes::resolve_color(value) {
            Ok(scenetypes::Paint::None) => Paint::None,
            Ok(scenetypes::Paint::Color(color)) => Paint::Color {
                color: color.with_opacity(opacity),
                opacity,
            },
            Err(_) => {
                sink.record(Diagnostic::UnresolvedColor {
                    element: self.tag.to_string(),
                    property: name.to_string(),
                    value: value.to_string(),
                });
                apply_opacity(default, opacity)
            }
        }
    }

    fn opacity(&self, name: &str, sink: &mut Sink) -> f64 {
        match self.cascade.get(name) {
            Some(value) => match units::parse_number(value) {
                Some(n) => n.max(0.0).min(1.0),
                None => {
                    sink.record(units::invalid(self.tag, name, value));
                    1.0
                }
            },
            None => 1.0,
        }
    }

    pub fn stroke_width(&self, sink: &mut Sink) -> f64 {
        match self.cascade.get("stroke-width") {
            Some(value) => match units::parse_length(value, self.opt.dpi) {
                Some(n) if n >= 0.0 => n,
                _ => {
                    sink.record(units::invalid(self.tag, "stroke-width", value));
                    1.0
                }
            },
            None => 1.0,
        }
    }

    pub fn line_cap(&self, sink: &mut Sink) -> LineCap {
        match self.cascade.get("stroke-linecap") {
            Some("butt") | None => LineCap::Butt,
            Some("round") => LineCap::Round,
            Some("square") => LineCap::Square,
            Some(value) => {
                sink.record(units::invalid(self.tag, "stroke-linecap", value));
                LineCap::Butt
            }
        }
    }

    pub fn preserve_whitespace(&self) -> bool {
        matches!(self.cascade.get("white-space"), Some("pre") | Some("pre-wrap"))
    }

    pub fn font(&self, sink: &mut Sink) -> Font {
        let mut families = self
            .cascade
            .get("font-family")
            .map(parse_families)
            .unwrap_or_default();
        if families.is_empty() {
            families.push(self.opt.font_family.clone());
        }

        let size = match self.cascade.get("font-size") {
            Some(value) => match units::parse_length(value, self.opt.dpi) {
                Some(n) if n > 0.0 => n,
                _ => {
                    sink.record(units::invalid(self.tag, "font-size", value));
                    self.opt.font_size
                }
            },
            None => self.opt.font_size,
        };

        let weight = match self.cascade.get("font-weight") {
            Some("normal") | None => 400,
            Some("bold") => 700,
            Some(value) => match units::parse_number(value) {
                Some(n) if (1.0..=1000.0).contains(&n) => n.round() as u16,
                _ => {
                    sink.record(units::invalid(self.tag, "font-weight", value));
                    400
                }
            },
        };

        let style = match self.cascade.get("font-style") {
            Some("normal") | None => FontStyle::Normal,
            Some("italic") => FontStyle::Italic,
            Some("oblique") => FontStyle::Oblique,
            Some(value) => {
                sink.record(units::invalid(self.tag, "font-style", value));
                FontStyle::Normal
            }
        };

        Font {
            families,
            size,
            weight,
            style,
        }
    }
}

fn apply_opacity(paint: Paint, opacity: f64) -> Paint {
    match paint {
        Paint::None => Paint::None,
        Paint::Color { color, opacity: o } => Paint::Color {
            color: color.with_opacity(opacity),
            opacity: o * opacity,
        },
    }
}

fn parse_families(text: &str) -> Vec<String> {
    text.split(',')
        .map(|name| name.trim().trim_matches(|c| c == '\'' || c == '"').trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
