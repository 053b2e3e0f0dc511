/*!
*scenetypes* is a collection of string-level parsers used to resolve
an [SVG](https://www.w3.org/TR/SVG2/) document into a scene.

## Supported types

- [`<color>`](https://www.w3.org/TR/css-color-3/), `#RRGGBB`, `#RRGGBBAA` and named colors only
- [`<number>`](https://www.w3.org/TR/SVG2/types.html#InterfaceSVGNumber)
- [`<length>`](https://www.w3.org/TR/SVG2/types.html#InterfaceSVGLength), resolved into device pixels
- [`<path>`](https://www.w3.org/TR/SVG2/paths.html#PathData), normalized into absolute segments
- [`<transform>`](https://www.w3.org/TR/SVG11/types.html#DataTypeTransformList), composed into a single matrix
- [`<list-of-numbers>`](https://www.w3.org/TR/SVG2/types.html#InterfaceSVGNumberList)

## Features

- Complete support of paths, so data like `M10-20A5.5.3-4 110-.1` will be parsed correctly.
- Implicit path commands will be automatically converted into explicit one.
- Smooth curves are converted into regular ones.

## Limitations

- Accepts only [normalized](https://www.w3.org/TR/REC-xml/#AVNormalize) values,
  e.g. an input text should not contain `&#x20;` or `&data;`.
- Function names and units must be lowercase.
  Only named colors are case-insensitive.
- `rgb()`, `hsl()` and the short `#RGB` notation are not supported.

## Safety

- The library should not panic. Any panic considered as a critical bug and should be reported.
- The library forbids unsafe code.
*/

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

mod color;
#[rustfmt::skip] mod colors;
mod error;
mod length;
mod path;
mod stream;
mod transform;

use crate::stream::ByteExt;

pub use crate::color::*;
pub use crate::error::*;
pub use crate::length::*;
pub use crate::path::*;
pub use crate::stream::{parse_number_list, Stream};
pub use crate::transform::*;
