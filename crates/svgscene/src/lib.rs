// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`svgscene` resolves an [SVG] document into a paintable scene graph.

It sits between an XML tokenizer on one side and a graphics backend
and a text layout service on the other. A document is consumed
as a forward-only token stream and every node is resolved at its start tag,
so the resulting tree has no references, no inheritance and no units left.

## Features

- Presentation attributes and inline `style` declarations are cascaded
  along the ancestor chain. `inherit` is supported.
- `fill` and `stroke` are resolved into colors with opacity already applied.
- Lengths are converted into pixels using the provided DPI.
- Path data is normalized into absolute segments.
  Relative, implicit and smooth segments are converted.
- `transform` lists are composed into a single matrix.
- The root and nested `svg` elements get a viewport transform.
- `polyline` and `polygon` are converted into paths.
- Text inputs are resolved and passed to a [`TextLayouter`].
- SVGZ input is supported.

## Limitations

- No CSS selectors, only presentation attributes and the `style` attribute.
- No gradients, patterns, filters, masks, markers and `use`.
- `viewBox` is always stretched, `preserveAspectRatio` is ignored.
- Only [static](http://www.w3.org/TR/SVG11/feature#SVG-static) SVG features,
  e.g. no `a`, `view`, `cursor`, `script`, no events and no animations.

[SVG]: https://en.wikipedia.org/wiki/Scalable_Vector_Graphics
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

mod parser;
mod render;
mod text;
mod tree;
mod writer;

pub use parser::*;
pub use render::{render, Backend, DrawCommand, RecordingBackend};
pub use text::*;
pub use tree::*;
pub use writer::WriteOptions;

pub use scenetypes;
pub use xmlwriter::Indent;
