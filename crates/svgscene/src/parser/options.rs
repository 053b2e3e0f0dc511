// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::{Color, Paint, Size};

/// Defines what happens on a malformed path data, transform list or `style` attribute.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SyntaxErrorPolicy {
    /// The whole parsing fails.
    Fail,
    /// The offending element is skipped together with its children.
    SkipElement,
}

impl Default for SyntaxErrorPolicy {
    fn default() -> Self {
        SyntaxErrorPolicy::Fail
    }
}

/// Processing options.
#[derive(Clone, Debug)]
pub struct Options {
    /// Target DPI.
    ///
    /// Impacts units conversion.
    ///
    /// Default: 96.0
    pub dpi: f64,

    /// A default font family.
    ///
    /// Will be used when no `font-family` attribute is set in the SVG
    /// and when none of the requested families can be resolved.
    ///
    /// Default: Times New Roman
    pub font_family: String,

    /// A default font size.
    ///
    /// Will be used when no `font-size` attribute is set in the SVG.
    ///
    /// Default: 12
    pub font_size: f64,

    /// Default viewport size to assume if there are no `width`, `height`
    /// and `viewBox` attributes.
    ///
    /// Default: `(100, 100)`
    pub default_size: Size,

    /// A fill used when `fill` is not set or cannot be resolved.
    ///
    /// Default: black
    pub default_fill: Paint,

    /// A stroke used when `stroke` is not set or cannot be resolved.
    ///
    /// Default: none
    pub default_stroke: Paint,

    /// Syntax errors handling.
    ///
    /// Default: `SyntaxErrorPolicy::Fail`
    pub syntax_errors: SyntaxErrorPolicy,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            dpi: 96.0,
            // Default font is user-agent dependent so we can use whichever we like.
            font_family: "Times New Roman".to_owned(),
            font_size: 12.0,
            default_size: Size::from_wh(100.0, 100.0).unwrap(),
            default_fill: Paint::from_color(Color::black()),
            default_stroke: Paint::None,
            syntax_errors: SyntaxErrorPolicy::default(),
        }
    }
}

impl Options {
    /// Sets DPI from the horizontal and vertical device resolution.
    ///
    /// An average of the two is used.
    pub fn set_device_dpi(&mut self, horizontal: f64, vertical: f64) {
        self.dpi = (horizontal + vertical) / 2.0;
    }
}
