// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

mod builder;
mod options;
mod shapes;
mod style;
mod text;
mod tokens;
mod units;

pub use options::{Options, SyntaxErrorPolicy};
pub use tokens::{Attribute, Token, TransportError, XmlTokens};

use crate::{Diagnostic, Document, TextLayouter};

/// List of all errors.
#[derive(Debug)]
pub enum Error {
    /// Only UTF-8 content are supported.
    NotAnUtf8Str,

    /// Compressed SVG must use the GZip algorithm.
    MalformedGZip,

    /// We do not allow SVG with more than 1024 nested elements.
    ElementsLimitReached,

    /// The token stream doesn't have an `svg` element.
    NoRootElement,

    /// Failed to parse an SVG data.
    ParsingFailed(roxmltree::Error),

    /// The token source has failed.
    TransportFailed(TransportError),

    /// Malformed path data, transform list or `style` attribute.
    ///
    /// Returned only with [`SyntaxErrorPolicy::Fail`].
    InvalidSyntax {
        /// Element's tag name.
        element: String,
        /// Attribute's name.
        attribute: String,
        /// Parsing error.
        error: scenetypes::Error,
    },
}

impl From<roxmltree::Error> for Error {
    fn from(e: roxmltree::Error) -> Self {
        Error::ParsingFailed(e)
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Error::TransportFailed(e)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::NotAnUtf8Str => {
                write!(f, "provided data has not an UTF-8 encoding")
            }
            Error::MalformedGZip => {
                write!(f, "provided data has a malformed GZip content")
            }
            Error::ElementsLimitReached => {
                write!(f, "the maximum elements nesting depth has been reached")
            }
            Error::NoRootElement => {
                write!(f, "SVG has no root element")
            }
            Error::ParsingFailed(ref e) => {
                write!(f, "SVG data parsing failed cause {}", e)
            }
            Error::TransportFailed(ref e) => {
                write!(f, "token source failed cause {}", e)
            }
            Error::InvalidSyntax {
                ref element,
                ref attribute,
                ref error,
            } => {
                write!(
                    f,
                    "failed to parse the '{}' attribute of '{}' cause {}",
                    attribute, element, error
                )
            }
        }
    }
}

impl std::error::Error for Error {}

/// A syntax error in a single attribute.
#[derive(Clone, PartialEq, Debug)]
pub(crate) struct SyntaxError {
    pub attribute: &'static str,
    pub error: scenetypes::Error,
}

impl SyntaxError {
    #[inline]
    pub fn new(attribute: &'static str, error: scenetypes::Error) -> Self {
        SyntaxError { attribute, error }
    }
}

/// Collects diagnostics.
#[derive(Default, Debug)]
pub(crate) struct Sink {
    pub diagnostics: Vec<Diagnostic>,
}

impl Sink {
    pub fn record(&mut self, diagnostic: Diagnostic) {
        log::warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }
}

impl Document {
    /// Parses `Document` from an SVG data.
    ///
    /// Can contain an SVG string or a gzip compressed data.
    pub fn from_data(
        data: &[u8],
        opt: &Options,
        layouter: &mut dyn TextLayouter,
    ) -> Result<Self, Error> {
        if data.starts_with(&[0x1f, 0x8b]) {
            let data = decompress_svgz(data)?;
            let text = std::str::from_utf8(&data).map_err(|_| Error::NotAnUtf8Str)?;
            Self::from_str(text, opt, layouter)
        } else {
            let text = std::str::from_utf8(data).map_err(|_| Error::NotAnUtf8Str)?;
            Self::from_str(text, opt, layouter)
        }
    }

    /// Parses `Document` from an SVG string.
    pub fn from_str(
        text: &str,
        opt: &Options,
        layouter: &mut dyn TextLayouter,
    ) -> Result<Self, Error> {
        let xml_opt = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };

        let doc =
            roxmltree::Document::parse_with_options(text, xml_opt).map_err(Error::ParsingFailed)?;

        Self::from_xmltree(&doc, opt, layouter)
    }

    /// Parses `Document` from `roxmltree::Document`.
    pub fn from_xmltree(
        doc: &roxmltree::Document,
        opt: &Options,
        layouter: &mut dyn TextLayouter,
    ) -> Result<Self, Error> {
        Self::from_tokens(XmlTokens::new(doc), opt, layouter)
    }

    /// Builds `Document` from a token stream.
    ///
    /// Tokens are consumed one by one. Everything before the first `svg` element
    /// and after its end is ignored.
    pub fn from_tokens<'a, I>(
        tokens: I,
        opt: &Options,
        layouter: &mut dyn TextLayouter,
    ) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Result<Token<'a>, TransportError>>,
    {
        let mut builder = builder::Builder::new(opt, layouter);
        for token in tokens {
            builder.feed(token?)?;
        }

        builder.finish()
    }
}

/// Decompresses an SVGZ file.
pub fn decompress_svgz(data: &[u8]) -> Result<Vec<u8>, Error> {
    use std::io::Read;

    let mut decoder = flate2::read::GzDecoder::new(data);
    let mut decoded = Vec::with_capacity(data.len() * 2);
    decoder
        .read_to_end(&mut decoded)
        .map_err(|_| Error::MalformedGZip)?;
    Ok(decoded)
}
