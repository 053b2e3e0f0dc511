// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use super::style::{self, Cascade, Resolver};
use super::text::{self, TextState};
use super::tokens::{attribute, Attribute, Token};
use super::units::{self, position};
use super::{shapes, Error, Options, Sink, SyntaxError, SyntaxErrorPolicy};
use crate::tree::{Document, GraphicsNode, NodeKind, Size, Transform};
use crate::TextLayouter;

/// The maximum number of simultaneously open elements.
pub(crate) const MAX_DEPTH: usize = 1024;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum State {
    AwaitRoot,
    InDocument,
    Done,
}

/// An open element.
#[derive(Debug)]
pub(crate) struct Frame {
    tag: String,
    /// `None` for skipped elements.
    node: Option<GraphicsNode>,
    text: Option<TextState>,
}

impl Frame {
    fn skipped(tag: &str) -> Self {
        Frame {
            tag: tag.to_string(),
            node: None,
            text: None,
        }
    }

    #[inline]
    pub(crate) fn node(&self) -> Option<&GraphicsNode> {
        self.node.as_ref()
    }
}

/// Builds a [`Document`] from a token stream.
pub(crate) struct Builder<'a> {
    opt: &'a Options,
    layouter: &'a mut dyn TextLayouter,
    state: State,
    stack: Vec<Frame>,
    root: Option<GraphicsNode>,
    size: Option<Size>,
    sink: Sink,
}

impl<'a> Builder<'a> {
    pub fn new(opt: &'a Options, layouter: &'a mut dyn TextLayouter) -> Self {
        Builder {
            opt,
            layouter,
            state: State::AwaitRoot,
            stack: Vec::new(),
            root: None,
            size: None,
            sink: Sink::default(),
        }
    }

    pub fn feed(&mut self, token: Token) -> Result<(), Error> {
        match self.state {
            State::AwaitRoot => match token {
                Token::Start {
                    name: "svg",
                    attributes,
                    self_closing,
                } => {
                    log::debug!("Root element found.");
                    self.state = State::InDocument;
                    self.start_element("svg", &attributes, self_closing)
                }
                _ => Ok(()),
            },
            State::InDocument => match token {
                Token::Start {
                    name,
                    attributes,
                    self_closing,
                } => self.start_element(name, &attributes, self_closing),
                Token::Text(text) => {
                    if let Some(state) = self.stack.last_mut().and_then(|f| f.text.as_mut()) {
                        state.push(text);
                    }
                    Ok(())
                }
                Token::End(name) => {
                    self.end_element(name);
                    Ok(())
                }
            },
            State::Done => Ok(()),
        }
    }

    pub fn finish(mut self) -> Result<Document, Error> {
        if self.state == State::InDocument {
            self.sink.record(crate::Diagnostic::TruncatedStream {
                open_elements: self.stack.len(),
            });

            while let Some(frame) = self.stack.pop() {
                self.close(frame);
            }
        }

        match (self.root, self.size) {
            (Some(root), Some(size)) => Ok(Document {
                root,
                size,
                diagnostics: self.sink.diagnostics,
            }),
            _ => Err(Error::NoRootElement),
        }
    }

    fn start_element(
        &mut self,
        tag: &str,
        attrs: &[Attribute],
        self_closing: bool,
    ) -> Result<(), Error> {
        if self.stack.len() >= MAX_DEPTH {
            return Err(Error::ElementsLimitReached);
        }

        // Children of a skipped element are skipped too.
        let frame = if matches!(self.stack.last(), Some(f) if f.node.is_none()) {
            Frame::skipped(tag)
        } else {
            match self.convert(tag, attrs) {
                Ok(frame) => frame,
                Err(e) => match self.opt.syntax_errors {
                    SyntaxErrorPolicy::Fail => {
                        return Err(Error::InvalidSyntax {
                            element: tag.to_string(),
                            attribute: e.attribute.to_string(),
                            error: e.error,
                        });
                    }
                    SyntaxErrorPolicy::SkipElement => {
                        self.sink.record(crate::Diagnostic::SkippedElement {
                            element: tag.to_string(),
                            attribute: e.attribute.to_string(),
                            error: e.error,
                        });
                        Frame::skipped(tag)
                    }
                },
            }
        };

        if self_closing {
            self.close(frame);
        } else {
            self.stack.push(frame);
        }

        Ok(())
    }

    fn end_element(&mut self, tag: &str) {
        if let Some(frame) = self.stack.pop() {
            if frame.tag != tag {
                log::warn!("Expected '{}' end tag, got '{}'.", frame.tag, tag);
            }

            self.close(frame);
        }
    }

    /// Finalizes an element and attaches it to its parent.
    fn close(&mut self, frame: Frame) {
        let mut node = frame.node;
        if let (Some(node), Some(state)) = (node.as_mut(), frame.text) {
            let max_size = self.size.unwrap_or(self.opt.default_size);
            node.kind = text::layout(
                &node.tag,
                state,
                max_size,
                self.opt,
                &mut *self.layouter,
                &mut self.sink,
            );
        }

        match self.stack.last_mut() {
            Some(parent) => {
                if let (Some(parent), Some(node)) = (parent.node.as_mut(), node) {
                    parent.children.push(node);
                }
            }
            None => {
                if node.is_some() {
                    self.root = node;
                    self.state = State::Done;
                    log::debug!("Document is done.");
                } else {
                    // A skipped root. Wait for the next one.
                    self.state = State::AwaitRoot;
                }
            }
        }
    }

    fn convert(&mut self, tag: &str, attrs: &[Attribute]) -> Result<Frame, SyntaxError> {
        let raw_styles = style::collect(attrs)?;

        let own_transform = match attribute(attrs, "transform") {
            Some(value) => {
                Some(Transform::from_str(value).map_err(|e| SyntaxError::new("transform", e))?)
            }
            None => None,
        };

        let dpi = self.opt.dpi;
        let converted = match tag {
            "svg" => self.convert_viewport(attrs),
            "text" => {
                let x = position(tag, attrs, "x", dpi, &mut self.sink);
                let y = position(tag, attrs, "y", dpi, &mut self.sink);
                match (x, y) {
                    (Some(x), Some(y)) => Some((
                        NodeKind::Text {
                            content: String::new(),
                            baseline_offset: 0.0,
                            layout: None,
                        },
                        Some(Transform::from_translate(x, y)),
                    )),
                    _ => None,
                }
            }
            _ if shapes::is_shape(tag) => {
                shapes::convert(tag, attrs, dpi, &mut self.sink)?.map(|kind| (kind, None))
            }
            // Unknown elements are kept as groups.
            _ => Some((NodeKind::Group, None)),
        };

        let (kind, base_transform) = match converted {
            Some(v) => v,
            None => return Ok(Frame::skipped(tag)),
        };

        let transform = match own_transform {
            Some(ts) => Some(scenetypes::combine(base_transform, ts)),
            None => base_transform,
        };

        let resolver = Resolver {
            tag,
            cascade: Cascade::new(&raw_styles, &self.stack),
            opt: self.opt,
        };

        let sink = &mut self.sink;
        let painted = !matches!(kind, NodeKind::Group | NodeKind::Viewport { .. });
        let (fill, stroke) = if painted {
            (Some(resolver.fill(sink)), Some(resolver.stroke(sink)))
        } else {
            (None, None)
        };

        let text = if let NodeKind::Text { .. } = kind {
            Some(TextState::new(
                resolver.preserve_whitespace(),
                resolver.font(sink),
            ))
        } else {
            None
        };

        let stroke_width = resolver.stroke_width(sink);
        let stroke_cap = resolver.line_cap(sink);

        let node = GraphicsNode {
            tag: tag.to_string(),
            kind,
            children: Vec::new(),
            transform,
            fill,
            stroke,
            stroke_width,
            stroke_cap,
            raw_styles,
        };

        Ok(Frame {
            tag: tag.to_string(),
            node: Some(node),
            text,
        })
    }

    /// Converts an `svg` element.
    ///
    /// The root size is stored in the builder.
    fn convert_viewport(&mut self, attrs: &[Attribute]) -> Option<(NodeKind, Option<Transform>)> {
        let is_root = self.stack.is_empty();

        let view_box = match attribute(attrs, "viewBox") {
            Some(value) => {
                let vb = units::parse_view_box(value);
                if vb.is_none() {
                    self.sink.record(units::invalid("svg", "viewBox", value));
                }
                vb
            }
            None => None,
        };

        // Nested viewports are sized relative to the root one.
        let fallback = match self.size {
            Some(size) if !is_root => size,
            _ => self.opt.default_size,
        };

        let width = self.viewport_length(
            attrs,
            "width",
            view_box.map(|vb| vb.width),
            fallback.width(),
        );
        let height = self.viewport_length(
            attrs,
            "height",
            view_box.map(|vb| vb.height),
            fallback.height(),
        );

        let mut ts = match view_box {
            Some(vb) => vb.to_transform(width, height),
            None => Transform::default(),
        };

        if is_root {
            self.size = Size::from_wh(width, height);
        } else {
            let x = position("svg", attrs, "x", self.opt.dpi, &mut self.sink)?;
            let y = position("svg", attrs, "y", self.opt.dpi, &mut self.sink)?;
            ts = ts.multiply(&Transform::from_translate(x, y));
        }

        Some((
            NodeKind::Viewport {
                view_box,
                width,
                height,
            },
            Some(ts),
        ))
    }

    /// Resolves a viewport dimension.
    ///
    /// Falls back to the `viewBox` and then to the default size.
    fn viewport_length(
        &mut self,
        attrs: &[Attribute],
        name: &str,
        view_box: Option<f64>,
        default: f64,
    ) -> f64 {
        if let Some(value) = attribute(attrs, name) {
            match units::parse_length(value, self.opt.dpi) {
                Some(n) if n > 0.0 && n.is_finite() => return n,
                _ => self.sink.record(units::invalid("svg", name, value)),
            }
        }

        view_box.unwrap_or(default)
    }
}
