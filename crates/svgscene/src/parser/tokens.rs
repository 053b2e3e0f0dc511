// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt;

use roxmltree::{Edge, NodeId};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XML_NAMESPACE_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// An element attribute.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Attribute<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

impl<'a> Attribute<'a> {
    /// Creates a new attribute.
    #[inline]
    pub fn new(name: &'a str, value: &'a str) -> Self {
        Attribute { name, value }
    }
}

/// An XML token.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Token<'a> {
    /// An element start.
    Start {
        /// Element's local name.
        name: &'a str,
        /// Element's attributes in document order.
        attributes: Vec<Attribute<'a>>,
        /// A self-closing element is not followed by `End`.
        self_closing: bool,
    },
    /// Character data.
    Text(&'a str),
    /// An element end.
    End(&'a str),
}

/// A token source failure.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TransportError {
    /// The underlying reader has failed.
    ReadFailed(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            TransportError::ReadFailed(ref e) => write!(f, "read failed: {}", e),
        }
    }
}

impl std::error::Error for TransportError {}

/// A token source over a parsed `roxmltree::Document`.
///
/// Elements from foreign namespaces are skipped with all their children.
/// Comments and processing instructions are skipped too.
pub struct XmlTokens<'a, 'input: 'a> {
    edges: roxmltree::Traverse<'a, 'input>,
    skipped: Option<NodeId>,
}

impl<'a, 'input: 'a> XmlTokens<'a, 'input> {
    /// Creates a new token source.
    pub fn new(doc: &'a roxmltree::Document<'input>) -> Self {
        XmlTokens {
            edges: doc.root().traverse(),
            skipped: None,
        }
    }
}

impl fmt::Debug for XmlTokens<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("XmlTokens { ... }")
    }
}

impl<'a, 'input: 'a> Iterator for XmlTokens<'a, 'input> {
    type Item = Result<Token<'a>, TransportError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let edge = self.edges.next()?;

            if let Some(id) = self.skipped {
                if let Edge::Close(node) = edge {
                    if node.id() == id {
                        self.skipped = None;
                    }
                }

                continue;
            }

            match edge {
                Edge::Open(node) if node.is_element() => {
                    if !is_svg_namespace(node.tag_name().namespace()) {
                        self.skipped = Some(node.id());
                        continue;
                    }

                    return Some(Ok(Token::Start {
                        name: node.tag_name().name(),
                        attributes: collect_attributes(node),
                        self_closing: !node.has_children(),
                    }));
                }
                Edge::Open(node) if node.is_text() => {
                    if let Some(text) = node.text() {
                        return Some(Ok(Token::Text(text)));
                    }
                }
                Edge::Close(node) if node.is_element() && node.has_children() => {
                    return Some(Ok(Token::End(node.tag_name().name())));
                }
                _ => {}
            }
        }
    }
}

/// Returns the value of the first attribute with the specified name.
pub(crate) fn attribute<'a>(attrs: &[Attribute<'a>], name: &str) -> Option<&'a str> {
    attrs.iter().find(|a| a.name == name).map(|a| a.value)
}

fn is_svg_namespace(ns: Option<&str>) -> bool {
    matches!(ns, None | Some(SVG_NS))
}

fn collect_attributes<'a>(node: roxmltree::Node<'a, '_>) -> Vec<Attribute<'a>> {
    let mut list = Vec::new();
    for attr in node.attributes() {
        match attr.namespace() {
            None | Some(SVG_NS) => list.push(Attribute::new(attr.name(), attr.value())),
            Some(XML_NAMESPACE_NS) => {
                let name = match attr.name() {
                    "space" => "xml:space",
                    "lang" => "xml:lang",
                    _ => continue,
                };

                list.push(Attribute::new(name, attr.value()));
            }
            _ => {}
        }
    }

    list
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<String> {
        let doc = roxmltree::Document::parse(text).unwrap();
        XmlTokens::new(&doc)
            .map(|t| match t.unwrap() {
                Token::Start {
                    name,
                    attributes,
                    self_closing,
                } => {
                    let attrs: Vec<_> = attributes
                        .iter()
                        .map(|a| format!("{}={}", a.name, a.value))
                        .collect();
                    format!("<{} [{}] {}>", name, attrs.join(" "), self_closing)
                }
                Token::Text(text) => format!("'{}'", text),
                Token::End(name) => format!("</{}>", name),
            })
            .collect()
    }

    #[test]
    fn simple() {
        let list = tokens("<svg xmlns='http://www.w3.org/2000/svg'><rect width='5'/><text>a</text></svg>");
        assert_eq!(
            list,
            vec![
                "<svg [] false>",
                "<rect [width=5] true>",
                "<text [] false>",
                "'a'",
                "</text>",
                "</svg>",
            ]
        );
    }

    #[test]
    fn namespaces() {
        let list = tokens(
            "<svg xmlns='http://www.w3.org/2000/svg' xmlns:x='http://example.com' \
             x:foo='1' xml:space='preserve'><x:bar><rect/></x:bar><!-- c --><g/></svg>",
        );
        assert_eq!(
            list,
            vec!["<svg [xml:space=preserve] false>", "<g [] true>", "</svg>"]
        );
    }
}
