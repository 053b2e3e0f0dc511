// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashMap;
use std::fmt;

pub use scenetypes::{Color, PathSegment, Transform};

use crate::LayoutHandle;

/// A width and height pair.
///
/// Both values are guaranteed to be positive and finite.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    /// Creates a new `Size` from width and height.
    ///
    /// Returns `None` for non-positive or non-finite values.
    #[inline]
    pub fn from_wh(width: f64, height: f64) -> Option<Self> {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            Some(Size { width, height })
        } else {
            None
        }
    }

    /// Returns width.
    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns height.
    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }
}

/// A `viewBox` rectangle.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    /// Returns a transform that maps the view box onto a viewport of the specified size.
    ///
    /// Each axis is scaled independently.
    pub fn to_transform(&self, width: f64, height: f64) -> Transform {
        Transform::from_translate(-self.x, -self.y)
            .multiply(&Transform::from_scale(width / self.width, height / self.height))
    }
}

/// A resolved paint.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Paint {
    /// Explicit `none`.
    None,
    /// A color.
    ///
    /// `color.alpha` already includes `opacity`.
    Color {
        /// Color with a premultiplied opacity.
        color: Color,
        /// A resolved `fill-opacity` or `stroke-opacity`.
        opacity: f64,
    },
}

impl Paint {
    /// Creates an opaque color paint.
    #[inline]
    pub fn from_color(color: Color) -> Self {
        Paint::Color {
            color,
            opacity: 1.0,
        }
    }

    /// Returns the paint color, if any.
    #[inline]
    pub fn color(&self) -> Option<Color> {
        match *self {
            Paint::None => None,
            Paint::Color { color, .. } => Some(color),
        }
    }
}

/// A stroke line cap.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

impl Default for LineCap {
    fn default() -> Self {
        LineCap::Butt
    }
}

/// A node kind with a kind-specific payload.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub enum NodeKind {
    /// A container.
    ///
    /// Unknown elements are represented as groups too.
    Group,
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Path {
        segments: Vec<PathSegment>,
    },
    Text {
        content: String,
        /// The first line baseline offset reported by the layout service.
        baseline_offset: f64,
        /// `None` when no font could be resolved.
        layout: Option<LayoutHandle>,
    },
    /// An `svg` element.
    Viewport {
        view_box: Option<ViewBox>,
        width: f64,
        height: f64,
    },
}

/// A resolved scene node.
#[derive(Clone, PartialEq, Debug)]
pub struct GraphicsNode {
    pub(crate) tag: String,
    pub(crate) kind: NodeKind,
    pub(crate) children: Vec<GraphicsNode>,
    pub(crate) transform: Option<Transform>,
    pub(crate) fill: Option<Paint>,
    pub(crate) stroke: Option<Paint>,
    pub(crate) stroke_width: f64,
    pub(crate) stroke_cap: LineCap,
    pub(crate) raw_styles: HashMap<String, String>,
}

impl GraphicsNode {
    /// Element's tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Node's kind.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Node's children in document order.
    pub fn children(&self) -> &[GraphicsNode] {
        &self.children
    }

    /// Node's local transform.
    ///
    /// `None` means identity.
    pub fn transform(&self) -> Option<Transform> {
        self.transform
    }

    /// Resolved fill.
    ///
    /// Always `None` for groups and viewports.
    pub fn fill(&self) -> Option<Paint> {
        self.fill
    }

    /// Resolved stroke.
    ///
    /// Always `None` for groups and viewports.
    pub fn stroke(&self) -> Option<Paint> {
        self.stroke
    }

    /// Resolved stroke width.
    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    /// Resolved stroke line cap.
    pub fn stroke_cap(&self) -> LineCap {
        self.stroke_cap
    }

    /// Element's own style declarations.
    ///
    /// Presentation attributes overridden by the `style` attribute.
    pub fn raw_styles(&self) -> &HashMap<String, String> {
        &self.raw_styles
    }

    /// Returns an iterator over this node and all of its descendants.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// A pre-order iterator over nodes.
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a GraphicsNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a GraphicsNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// A non-fatal problem found during parsing.
#[derive(Clone, PartialEq, Debug)]
pub enum Diagnostic {
    /// A required attribute is not set. The element was skipped.
    MissingRequiredAttribute {
        /// Element's tag name.
        element: String,
        /// Attribute's name.
        attribute: String,
    },
    /// An attribute has an invalid value.
    ///
    /// Required attributes cause the element to be skipped,
    /// otherwise a default value is used.
    InvalidAttribute {
        /// Element's tag name.
        element: String,
        /// Attribute's name.
        attribute: String,
        /// Attribute's value.
        value: String,
    },
    /// A color cannot be resolved. A default paint was used.
    UnresolvedColor {
        /// Element's tag name.
        element: String,
        /// `fill` or `stroke`.
        property: String,
        /// Property's value.
        value: String,
    },
    /// None of the font families can be resolved, the default one included.
    UnresolvedFont {
        /// Element's tag name.
        element: String,
        /// Requested font families.
        families: Vec<String>,
    },
    /// An element with a syntax error was skipped.
    SkippedElement {
        /// Element's tag name.
        element: String,
        /// Attribute's name.
        attribute: String,
        /// Parsing error.
        error: scenetypes::Error,
    },
    /// The token stream ended before all elements were closed.
    TruncatedStream {
        /// The number of unclosed elements.
        open_elements: usize,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Diagnostic::MissingRequiredAttribute {
                ref element,
                ref attribute,
            } => {
                write!(
                    f,
                    "'{}' element without the '{}' attribute is skipped",
                    element, attribute
                )
            }
            Diagnostic::InvalidAttribute {
                ref element,
                ref attribute,
                ref value,
            } => {
                write!(
                    f,
                    "'{}' has an invalid '{}' value: '{}'",
                    element, attribute, value
                )
            }
            Diagnostic::UnresolvedColor {
                ref element,
                ref property,
                ref value,
            } => {
                write!(
                    f,
                    "failed to resolve '{}' color '{}' on '{}', fallback is used",
                    property, value, element
                )
            }
            Diagnostic::UnresolvedFont {
                ref element,
                ref families,
            } => {
                write!(
                    f,
                    "no font for '{}' on '{}' could be resolved",
                    families.join(", "),
                    element
                )
            }
            Diagnostic::SkippedElement {
                ref element,
                ref attribute,
                ref error,
            } => {
                write!(
                    f,
                    "'{}' is skipped because of an invalid '{}': {}",
                    element, attribute, error
                )
            }
            Diagnostic::TruncatedStream { open_elements } => {
                write!(f, "stream ended with {} unclosed elements", open_elements)
            }
        }
    }
}

/// A resolved SVG document.
#[derive(Clone, Debug)]
pub struct Document {
    pub(crate) root: GraphicsNode,
    pub(crate) size: Size,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl Document {
    /// The root `Viewport` node.
    pub fn root(&self) -> &GraphicsNode {
        &self.root
    }

    /// Document's size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Non-fatal problems found during parsing, in document order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
