// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::{LayoutHandle, TextLayout, TextLayouter, TextRequest};

/// A single line text produced by [`SimpleTextLayouter`].
#[derive(Clone, PartialEq, Debug)]
pub struct LaidOutText {
    /// Text content.
    pub content: String,
    /// The resolved font family.
    pub family: String,
    /// Font size.
    pub size: f64,
    /// Line width.
    pub width: f64,
    /// Line height.
    pub height: f64,
}

/// A metrics-only text layouter.
///
/// Every glyph advances by half of the font size and the ascent
/// is 0.8 of the font size. Text is never wrapped.
#[derive(Clone, Default, Debug)]
pub struct SimpleTextLayouter {
    installed: Option<Vec<String>>,
    layouts: Vec<LaidOutText>,
}

impl SimpleTextLayouter {
    /// Creates a layouter that accepts any font family.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a layouter that accepts only the listed font families.
    ///
    /// Family names are compared case-insensitively.
    pub fn with_families<I, S>(families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SimpleTextLayouter {
            installed: Some(families.into_iter().map(Into::into).collect()),
            layouts: Vec::new(),
        }
    }

    /// Returns a layout by its handle.
    pub fn get(&self, handle: LayoutHandle) -> Option<&LaidOutText> {
        self.layouts.get(usize::try_from(handle.get()).ok()?)
    }

    /// Returns the number of created layouts.
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    /// Checks that no layouts were created.
    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    fn resolve_family<'a>(&self, families: &'a [String]) -> Option<&'a String> {
        match self.installed {
            Some(ref installed) => families
                .iter()
                .find(|f| installed.iter().any(|i| i.eq_ignore_ascii_case(f))),
            None => families.first(),
        }
    }
}

impl TextLayouter for SimpleTextLayouter {
    fn layout(&mut self, request: &TextRequest) -> Option<TextLayout> {
        let family = self.resolve_family(request.families)?.clone();

        let ascent = request.size * 0.8;
        let width = request.content.chars().count() as f64 * request.size * 0.5;

        let handle = LayoutHandle::new(self.layouts.len() as u64);
        self.layouts.push(LaidOutText {
            content: request.content.to_string(),
            family,
            size: request.size,
            width: width.min(request.max_width),
            height: request.size.min(request.max_height),
        });

        Some(TextLayout {
            handle,
            baseline: ascent,
        })
    }
}
