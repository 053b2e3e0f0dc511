// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::style::Font;
use super::{Options, Sink};
use crate::{Diagnostic, NodeKind, Size, TextLayouter, TextRequest};

/// An open `text` element state.
#[derive(Clone, Debug)]
pub(crate) struct TextState {
    content: String,
    preserve: bool,
    font: Font,
}

impl TextState {
    pub fn new(preserve: bool, font: Font) -> Self {
        TextState {
            content: String::new(),
            preserve,
            font,
        }
    }

    pub fn push(&mut self, text: &str) {
        self.content.push_str(text);
    }
}

/// Lays out a closed `text` element.
///
/// When none of the requested families can be resolved, the default one is tried.
/// If it fails too, a text without a layout is produced.
pub(crate) fn layout(
    tag: &str,
    state: TextState,
    max_size: Size,
    opt: &Options,
    layouter: &mut dyn TextLayouter,
    sink: &mut Sink,
) -> NodeKind {
    let content = if state.preserve {
        state.content
    } else {
        collapse_whitespace(&state.content)
    };

    let mut request = TextRequest {
        content: &content,
        families: &state.font.families,
        weight: state.font.weight,
        style: state.font.style,
        size: state.font.size,
        max_width: max_size.width(),
        max_height: max_size.height(),
    };

    let mut result = layouter.layout(&request);
    if result.is_none() {
        log::debug!(
            "No font for '{}'. Fallback to '{}'.",
            state.font.families.join(", "),
            opt.font_family
        );

        let fallback = [opt.font_family.clone()];
        request.families = &fallback;
        result = layouter.layout(&request);
    }

    let (layout, baseline_offset) = match result {
        Some(layout) => (Some(layout.handle), layout.baseline),
        None => {
            sink.record(Diagnostic::UnresolvedFont {
                element: tag.to_string(),
                families: state.font.families.clone(),
            });
            (None, 0.0)
        }
    };

    NodeKind::Text {
        content,
        baseline_offset,
        layout,
    }
}

/// Trims the text and replaces whitespace runs with a single space.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
