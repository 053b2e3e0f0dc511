use crate::{Error, Stream};

/// A path segment exactly as it was written.
///
/// Implicit commands are already expanded, so `M 10 20 30 40`
/// produces a `MoveTo` followed by a `LineTo`.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum RawPathSegment {
    MoveTo {
        abs: bool,
        x: f64,
        y: f64,
    },
    LineTo {
        abs: bool,
        x: f64,
        y: f64,
    },
    HorizontalLineTo {
        abs: bool,
        x: f64,
    },
    VerticalLineTo {
        abs: bool,
        y: f64,
    },
    CurveTo {
        abs: bool,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
    },
    SmoothCurveTo {
        abs: bool,
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
    },
    Quadratic {
        abs: bool,
        x1: f64,
        y1: f64,
        x: f64,
        y: f64,
    },
    SmoothQuadratic {
        abs: bool,
        x: f64,
        y: f64,
    },
    EllipticalArc {
        abs: bool,
        rx: f64,
        ry: f64,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    },
    ClosePath {
        abs: bool,
    },
}

/// A pull-based path data tokenizer.
///
/// Commands and numbers can run together, so data like
/// `M10-20l30.1.5.1-20z` is accepted.
///
/// # Errors
///
/// The iterator yields a single error and stops afterwards.
///
/// # Examples
///
/// ```
/// use scenetypes::{PathParser, RawPathSegment};
///
/// let segments: Result<Vec<_>, _> = PathParser::from("M10-20l30.1.5.1-20z").collect();
///
/// assert_eq!(segments.unwrap(), &[
///     RawPathSegment::MoveTo { abs: true, x: 10.0, y: -20.0 },
///     RawPathSegment::LineTo { abs: false, x: 30.1, y: 0.5 },
///     RawPathSegment::LineTo { abs: false, x: 0.1, y: -20.0 },
///     RawPathSegment::ClosePath { abs: false },
/// ]);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PathParser<'a> {
    stream: Stream<'a>,
    prev_cmd: Option<u8>,
}

impl<'a> From<&'a str> for PathParser<'a> {
    #[inline]
    fn from(v: &'a str) -> Self {
        PathParser {
            stream: Stream::from(v),
            prev_cmd: None,
        }
    }
}

impl<'a> Iterator for PathParser<'a> {
    type Item = Result<RawPathSegment, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let s = &mut self.stream;

        s.skip_spaces();

        if s.at_end() {
            return None;
        }

        let res = next_impl(s, &mut self.prev_cmd);
        if res.is_err() {
            s.jump_to_end();
        }

        Some(res)
    }
}

fn next_impl(s: &mut Stream, prev_cmd: &mut Option<u8>) -> Result<RawPathSegment, Error> {
    let start = s.pos();
    let first_char = s.curr_byte_unchecked();

    let (cmd, implicit_line_to) = match *prev_cmd {
        None if matches!(first_char, b'M' | b'm') => {
            s.advance(1);
            (first_char, false)
        }
        // The first segment must be a MoveTo.
        None => return Err(Error::UnexpectedData(s.calc_char_pos_at(start))),
        Some(_) if is_cmd(first_char) => {
            s.advance(1);
            (first_char, false)
        }
        Some(prev) if is_number_start(first_char) => match prev {
            // ClosePath cannot be followed by a number.
            b'Z' | b'z' => return Err(Error::UnexpectedData(s.calc_char_pos_at(start))),
            // Pairs after a MoveTo are LineTo's.
            b'M' => (b'L', true),
            b'm' => (b'l', true),
            _ => (prev, false),
        },
        Some(_) => return Err(Error::UnexpectedData(s.calc_char_pos_at(start))),
    };

    let abs = cmd.is_ascii_uppercase();
    let segment = match cmd.to_ascii_lowercase() {
        b'm' => RawPathSegment::MoveTo {
            abs,
            x: s.parse_list_number()?,
            y: s.parse_list_number()?,
        },
        b'l' => RawPathSegment::LineTo {
            abs,
            x: s.parse_list_number()?,
            y: s.parse_list_number()?,
        },
        b'h' => RawPathSegment::HorizontalLineTo {
            abs,
            x: s.parse_list_number()?,
        },
        b'v' => RawPathSegment::VerticalLineTo {
            abs,
            y: s.parse_list_number()?,
        },
        b'c' => RawPathSegment::CurveTo {
            abs,
            x1: s.parse_list_number()?,
            y1: s.parse_list_number()?,
            x2: s.parse_list_number()?,
            y2: s.parse_list_number()?,
            x: s.parse_list_number()?,
            y: s.parse_list_number()?,
        },
        b's' => RawPathSegment::SmoothCurveTo {
            abs,
            x2: s.parse_list_number()?,
            y2: s.parse_list_number()?,
            x: s.parse_list_number()?,
            y: s.parse_list_number()?,
        },
        b'q' => RawPathSegment::Quadratic {
            abs,
            x1: s.parse_list_number()?,
            y1: s.parse_list_number()?,
            x: s.parse_list_number()?,
            y: s.parse_list_number()?,
        },
        b't' => RawPathSegment::SmoothQuadratic {
            abs,
            x: s.parse_list_number()?,
            y: s.parse_list_number()?,
        },
        b'a' => RawPathSegment::EllipticalArc {
            abs,
            rx: s.parse_list_number()?,
            ry: s.parse_list_number()?,
            x_axis_rotation: s.parse_list_number()?,
            large_arc: parse_flag(s)?,
            sweep: parse_flag(s)?,
            x: s.parse_list_number()?,
            y: s.parse_list_number()?,
        },
        _ => RawPathSegment::ClosePath { abs },
    };

    // Keep repeating LineTo's after a MoveTo.
    *prev_cmd = Some(match (implicit_line_to, abs) {
        (true, true) => b'M',
        (true, false) => b'm',
        (false, _) => cmd,
    });

    Ok(segment)
}

#[rustfmt::skip]
#[inline]
fn is_cmd(c: u8) -> bool {
    matches!(c,
          b'M' | b'm'
        | b'Z' | b'z'
        | b'L' | b'l'
        | b'H' | b'h'
        | b'V' | b'v'
        | b'C' | b'c'
        | b'S' | b's'
        | b'Q' | b'q'
        | b'T' | b't'
        | b'A' | b'a')
}

#[inline]
fn is_number_start(c: u8) -> bool {
    matches!(c, b'0'..=b'9' | b'.' | b'-' | b'+')
}

// Arc flags are a single char and can be written without separators,
// e.g. `10 20 30 01 10 20`.
fn parse_flag(s: &mut Stream) -> Result<bool, Error> {
    s.skip_spaces();

    let c = s.curr_byte()?;
    match c {
        b'0' | b'1' => {
            s.advance(1);
            s.skip_separators();
            Ok(c == b'1')
        }
        _ => Err(Error::UnexpectedData(s.calc_char_pos())),
    }
}

/// A normalized path segment.
///
/// All coordinates are absolute.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum PathSegment {
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    QuadTo {
        x1: f64,
        y1: f64,
        x: f64,
        y: f64,
    },
    CubicTo {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
    },
    ArcTo {
        rx: f64,
        ry: f64,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    },
    ClosePath,
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum Family {
    Other,
    Quadratic,
    Cubic,
}

/// Converts raw segments into absolute, normalized ones.
///
/// Keeps track of the current point, the subpath start and the last
/// control point of a curve. Every emitted subpath starts with exactly
/// one `MoveTo`.
#[derive(Clone, Debug)]
pub struct PathNormalizer {
    segments: Vec<PathSegment>,
    prev_x: f64,
    prev_y: f64,
    start_x: f64,
    start_y: f64,
    ctrl_x: f64,
    ctrl_y: f64,
    family: Family,
    in_figure: bool,
}

impl Default for PathNormalizer {
    fn default() -> Self {
        PathNormalizer {
            segments: Vec::new(),
            prev_x: 0.0,
            prev_y: 0.0,
            start_x: 0.0,
            start_y: 0.0,
            ctrl_x: 0.0,
            ctrl_y: 0.0,
            family: Family::Other,
            in_figure: false,
        }
    }
}

impl PathNormalizer {
    /// Creates a new normalizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a raw segment.
    pub fn push(&mut self, segment: RawPathSegment) {
        if let RawPathSegment::MoveTo { abs, x, y } = segment {
            let (x, y) = self.to_abs(abs, x, y);
            // An open figure simply ends here.
            self.segments.push(PathSegment::MoveTo { x, y });
            self.start_x = x;
            self.start_y = y;
            self.set_point(x, y, Family::Other);
            self.in_figure = true;
            return;
        }

        if let RawPathSegment::ClosePath { .. } = segment {
            if self.in_figure {
                self.segments.push(PathSegment::ClosePath);
                self.in_figure = false;
            }

            let (x, y) = (self.start_x, self.start_y);
            self.set_point(x, y, Family::Other);
            return;
        }

        if !self.in_figure {
            // Drawing after a ClosePath starts a new subpath at the same point.
            self.segments.push(PathSegment::MoveTo {
                x: self.start_x,
                y: self.start_y,
            });
            self.in_figure = true;
        }

        match segment {
            RawPathSegment::LineTo { abs, x, y } => {
                let (x, y) = self.to_abs(abs, x, y);
                self.line_to(x, y);
            }
            RawPathSegment::HorizontalLineTo { abs, x } => {
                let x = if abs { x } else { self.prev_x + x };
                self.line_to(x, self.prev_y);
            }
            RawPathSegment::VerticalLineTo { abs, y } => {
                let y = if abs { y } else { self.prev_y + y };
                self.line_to(self.prev_x, y);
            }
            RawPathSegment::CurveTo {
                abs,
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                let (x1, y1) = self.to_abs(abs, x1, y1);
                let (x2, y2) = self.to_abs(abs, x2, y2);
                let (x, y) = self.to_abs(abs, x, y);
                self.cubic_to(x1, y1, x2, y2, x, y);
            }
            RawPathSegment::SmoothCurveTo { abs, x2, y2, x, y } => {
                let (x1, y1) = self.reflect(Family::Cubic);
                let (x2, y2) = self.to_abs(abs, x2, y2);
                let (x, y) = self.to_abs(abs, x, y);
                self.cubic_to(x1, y1, x2, y2, x, y);
            }
            RawPathSegment::Quadratic { abs, x1, y1, x, y } => {
                let (x1, y1) = self.to_abs(abs, x1, y1);
                let (x, y) = self.to_abs(abs, x, y);
                self.quad_to(x1, y1, x, y);
            }
            RawPathSegment::SmoothQuadratic { abs, x, y } => {
                let (x1, y1) = self.reflect(Family::Quadratic);
                let (x, y) = self.to_abs(abs, x, y);
                self.quad_to(x1, y1, x, y);
            }
            RawPathSegment::EllipticalArc {
                abs,
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                x,
                y,
            } => {
                let (x, y) = self.to_abs(abs, x, y);
                self.segments.push(PathSegment::ArcTo {
                    rx,
                    ry,
                    x_axis_rotation,
                    large_arc,
                    sweep,
                    x,
                    y,
                });
                self.set_point(x, y, Family::Other);
            }
            RawPathSegment::MoveTo { .. } | RawPathSegment::ClosePath { .. } => {}
        }
    }

    /// Returns the normalized segments.
    ///
    /// A still open figure stays open.
    pub fn finish(self) -> Vec<PathSegment> {
        self.segments
    }

    fn to_abs(&self, abs: bool, x: f64, y: f64) -> (f64, f64) {
        if abs {
            (x, y)
        } else {
            (self.prev_x + x, self.prev_y + y)
        }
    }

    fn reflect(&self, family: Family) -> (f64, f64) {
        if self.family == family {
            (
                self.prev_x * 2.0 - self.ctrl_x,
                self.prev_y * 2.0 - self.ctrl_y,
            )
        } else {
            (self.prev_x, self.prev_y)
        }
    }

    fn set_point(&mut self, x: f64, y: f64, family: Family) {
        self.prev_x = x;
        self.prev_y = y;
        self.family = family;
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.segments.push(PathSegment::LineTo { x, y });
        self.set_point(x, y, Family::Other);
    }

    fn quad_to(&mut self, x1: f64, y1: f64, x: f64, y: f64) {
        self.segments.push(PathSegment::QuadTo { x1, y1, x, y });
        self.ctrl_x = x1;
        self.ctrl_y = y1;
        self.set_point(x, y, Family::Quadratic);
    }

    fn cubic_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) {
        self.segments.push(PathSegment::CubicTo {
            x1,
            y1,
            x2,
            y2,
            x,
            y,
        });
        self.ctrl_x = x2;
        self.ctrl_y = y2;
        self.set_point(x, y, Family::Cubic);
    }
}

/// Parses path data into normalized segments.
///
/// # Errors
///
/// Any malformed segment fails the whole path.
///
/// # Examples
///
/// ```
/// use scenetypes::{parse_path, PathSegment};
///
/// let segments = parse_path("M0 0 20 0").unwrap();
/// assert_eq!(segments, &[
///     PathSegment::MoveTo { x: 0.0, y: 0.0 },
///     PathSegment::LineTo { x: 20.0, y: 0.0 },
/// ]);
/// ```
pub fn parse_path(text: &str) -> Result<Vec<PathSegment>, Error> {
    let mut normalizer = PathNormalizer::new();
    for segment in PathParser::from(text) {
        normalizer.push(segment?);
    }

    Ok(normalizer.finish())
}

/// Returns an iterator over subpaths.
///
/// Each subpath starts with a `MoveTo`.
pub fn subpaths(segments: &[PathSegment]) -> Subpaths<'_> {
    Subpaths { segments }
}

/// An iterator over subpaths.
///
/// Created by [`subpaths`].
#[derive(Clone, Copy, Debug)]
pub struct Subpaths<'a> {
    segments: &'a [PathSegment],
}

impl<'a> Iterator for Subpaths<'a> {
    type Item = &'a [PathSegment];

    fn next(&mut self) -> Option<Self::Item> {
        if self.segments.is_empty() {
            return None;
        }

        let end = self
            .segments
            .iter()
            .skip(1)
            .position(|seg| matches!(seg, PathSegment::MoveTo { .. }))
            .map(|idx| idx + 1)
            .unwrap_or(self.segments.len());

        let (subpath, rest) = self.segments.split_at(end);
        self.segments = rest;
        Some(subpath)
    }
}
