// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A text layout service interface.
//!
//! Shaping and line breaking are not done by this crate.
//! A `text` element only provides the layout inputs and stores
//! the returned handle and baseline offset.

mod simple;

pub use simple::{LaidOutText, SimpleTextLayouter};

/// An opaque handle of a text layout.
///
/// Its meaning is defined by the [`TextLayouter`] that created it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct LayoutHandle(u64);

impl LayoutHandle {
    /// Creates a new handle.
    #[inline]
    pub fn new(id: u64) -> Self {
        LayoutHandle(id)
    }

    /// Returns the underlying value.
    #[inline]
    pub fn get(&self) -> u64 {
        self.0
    }
}

/// A font style.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FontStyle {
    Normal,
    Italic,
    Oblique,
}

impl Default for FontStyle {
    fn default() -> Self {
        FontStyle::Normal
    }
}

/// Text layout inputs.
#[derive(Clone, Copy, Debug)]
pub struct TextRequest<'a> {
    /// Text content with whitespace already processed.
    pub content: &'a str,
    /// Font families in the order they should be tried.
    pub families: &'a [String],
    /// Font weight, 1..=1000.
    pub weight: u16,
    /// Font style.
    pub style: FontStyle,
    /// Font size in pixels.
    pub size: f64,
    /// Maximum layout box width.
    pub max_width: f64,
    /// Maximum layout box height.
    pub max_height: f64,
}

/// A text layout result.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct TextLayout {
    /// Layout handle.
    pub handle: LayoutHandle,
    /// An offset of the first line baseline from the top of the layout box.
    pub baseline: f64,
}

/// A text layout service.
pub trait TextLayouter {
    /// Lays out a text.
    ///
    /// Returns `None` when none of the requested font families can be resolved.
    fn layout(&mut self, request: &TextRequest) -> Option<TextLayout>;
}
