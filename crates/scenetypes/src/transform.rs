use float_cmp::ApproxEq;

use crate::{Error, Stream};

/// A 2D affine transform.
///
/// Points are row vectors, so a point is mapped as
/// `x' = a*x + c*y + e` and `y' = b*x + d*y + f`.
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Transform {
    /// Constructs a new transform.
    #[inline]
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Transform { a, b, c, d, e, f }
    }

    /// Constructs a translate transform.
    #[inline]
    pub fn from_translate(tx: f64, ty: f64) -> Self {
        Transform::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Constructs a scale transform.
    #[inline]
    pub fn from_scale(sx: f64, sy: f64) -> Self {
        Transform::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Constructs a rotate transform. The angle is in degrees.
    pub fn from_rotate(angle: f64) -> Self {
        let (sin, cos) = angle.to_radians().sin_cos();
        Transform::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Constructs a rotate transform around the specified point.
    pub fn from_rotate_at(angle: f64, cx: f64, cy: f64) -> Self {
        Transform::from_translate(-cx, -cy)
            .multiply(&Transform::from_rotate(angle))
            .multiply(&Transform::from_translate(cx, cy))
    }

    /// Constructs a skew transform. Angles are in degrees.
    pub fn from_skew(ax: f64, ay: f64) -> Self {
        Transform::new(
            1.0,
            ay.to_radians().tan(),
            ax.to_radians().tan(),
            1.0,
            0.0,
            0.0,
        )
    }

    /// Returns a transform that applies `self` first and `other` second.
    #[inline]
    pub fn multiply(&self, other: &Transform) -> Transform {
        Transform {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    /// Maps a point.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// Checks that the transform is an identity one.
    pub fn is_identity(&self) -> bool {
        is_fuzzy_eq(self.a, 1.0)
            && is_fuzzy_eq(self.b, 0.0)
            && is_fuzzy_eq(self.c, 0.0)
            && is_fuzzy_eq(self.d, 1.0)
            && is_fuzzy_eq(self.e, 0.0)
            && is_fuzzy_eq(self.f, 0.0)
    }

    /// Checks that the transform contains only a translation.
    pub fn is_translate(&self) -> bool {
        is_fuzzy_eq(self.a, 1.0)
            && is_fuzzy_eq(self.b, 0.0)
            && is_fuzzy_eq(self.c, 0.0)
            && is_fuzzy_eq(self.d, 1.0)
    }

    /// Checks that two transforms are equal with a small tolerance.
    pub fn fuzzy_eq(&self, other: &Transform) -> bool {
        is_fuzzy_eq(self.a, other.a)
            && is_fuzzy_eq(self.b, other.b)
            && is_fuzzy_eq(self.c, other.c)
            && is_fuzzy_eq(self.d, other.d)
            && is_fuzzy_eq(self.e, other.e)
            && is_fuzzy_eq(self.f, other.f)
    }
}

impl Default for Transform {
    #[inline]
    fn default() -> Transform {
        Transform::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }
}

fn is_fuzzy_eq(a: f64, b: f64) -> bool {
    a.approx_eq(b, (f64::EPSILON * 16.0, 4))
}

/// Combines an already present transform with a new one.
///
/// The existing transform is applied to a point first.
pub fn combine(existing: Option<Transform>, new: Transform) -> Transform {
    match existing {
        Some(ts) => ts.multiply(&new),
        None => new,
    }
}

/// A single transform function.
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub enum TransformFunction {
    Matrix {
        a: f64,
        b: f64,
        c: f64,
        d: f64,
        e: f64,
        f: f64,
    },
    Translate {
        tx: f64,
        ty: f64,
    },
    Scale {
        sx: f64,
        sy: f64,
    },
    Rotate {
        angle: f64,
        center: Option<(f64, f64)>,
    },
    Skew {
        ax: f64,
        ay: f64,
    },
    SkewX {
        angle: f64,
    },
    SkewY {
        angle: f64,
    },
}

impl TransformFunction {
    /// Converts the function into a matrix.
    pub fn to_transform(&self) -> Transform {
        match *self {
            TransformFunction::Matrix { a, b, c, d, e, f } => Transform::new(a, b, c, d, e, f),
            TransformFunction::Translate { tx, ty } => Transform::from_translate(tx, ty),
            TransformFunction::Scale { sx, sy } => Transform::from_scale(sx, sy),
            TransformFunction::Rotate { angle, center: None } => Transform::from_rotate(angle),
            TransformFunction::Rotate {
                angle,
                center: Some((cx, cy)),
            } => Transform::from_rotate_at(angle, cx, cy),
            TransformFunction::Skew { ax, ay } => Transform::from_skew(ax, ay),
            TransformFunction::SkewX { angle } => Transform::from_skew(angle, 0.0),
            TransformFunction::SkewY { angle } => Transform::from_skew(0.0, angle),
        }
    }
}

/// Composes a list of functions into a single matrix.
///
/// The rightmost function is applied to a point first.
pub fn compose(functions: &[TransformFunction]) -> Transform {
    functions
        .iter()
        .rev()
        .fold(Transform::default(), |acc, func| {
            acc.multiply(&func.to_transform())
        })
}

/// A pull-based transform list parser.
///
/// Functions can be separated by spaces and/or a single comma.
///
/// # Errors
///
/// - `UnknownFunction` for an unsupported function name
/// - `UnterminatedFunction` when the closing `)` is missing
/// - `UnexpectedData` when a function has a wrong number of arguments
///
/// # Examples
///
/// ```
/// use scenetypes::{TransformListParser, TransformFunction};
///
/// let mut p = TransformListParser::from("scale(2) translate(10, -20)");
/// assert_eq!(p.next().unwrap().unwrap(), TransformFunction::Scale { sx: 2.0, sy: 2.0 });
/// assert_eq!(p.next().unwrap().unwrap(), TransformFunction::Translate { tx: 10.0, ty: -20.0 });
/// assert!(p.next().is_none());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TransformListParser<'a> {
    stream: Stream<'a>,
}

impl<'a> From<&'a str> for TransformListParser<'a> {
    fn from(text: &'a str) -> Self {
        TransformListParser {
            stream: Stream::from(text),
        }
    }
}

impl<'a> Iterator for TransformListParser<'a> {
    type Item = Result<TransformFunction, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.stream.skip_spaces();

        if self.stream.at_end() {
            // An empty list is still a valid value.
            return None;
        }

        let res = self.parse_next();
        if res.is_err() {
            self.stream.jump_to_end();
        }

        Some(res)
    }
}

const MAX_ARGS: usize = 6;

impl<'a> TransformListParser<'a> {
    fn parse_next(&mut self) -> Result<TransformFunction, Error> {
        let s = &mut self.stream;

        let start = s.pos();
        let name = s.consume_ascii_ident();
        if !matches!(
            name,
            "matrix" | "translate" | "scale" | "rotate" | "skew" | "skewX" | "skewY"
        ) {
            return Err(Error::UnknownFunction(s.calc_char_pos_at(start)));
        }

        s.skip_spaces();
        s.consume_byte(b'(')?;

        let mut args = [0.0; MAX_ARGS];
        let mut len = 0;
        loop {
            s.skip_spaces();

            if s.at_end() {
                return Err(Error::UnterminatedFunction(s.calc_char_pos_at(start)));
            }

            if s.is_curr_byte_eq(b')') {
                s.advance(1);
                break;
            }

            if len == MAX_ARGS {
                return Err(Error::UnexpectedData(s.calc_char_pos()));
            }

            args[len] = s.parse_list_number()?;
            len += 1;
        }

        let func = match (name, &args[..len]) {
            ("matrix", &[a, b, c, d, e, f]) => TransformFunction::Matrix { a, b, c, d, e, f },
            // A missing `ty` is zero.
            ("translate", &[tx]) => TransformFunction::Translate { tx, ty: 0.0 },
            ("translate", &[tx, ty]) => TransformFunction::Translate { tx, ty },
            // A missing `sy` is equal to `sx`.
            ("scale", &[sx]) => TransformFunction::Scale { sx, sy: sx },
            ("scale", &[sx, sy]) => TransformFunction::Scale { sx, sy },
            ("rotate", &[angle]) => TransformFunction::Rotate {
                angle,
                center: None,
            },
            ("rotate", &[angle, cx, cy]) => TransformFunction::Rotate {
                angle,
                center: Some((cx, cy)),
            },
            ("skew", &[ax, ay]) => TransformFunction::Skew { ax, ay },
            ("skewX", &[angle]) => TransformFunction::SkewX { angle },
            ("skewY", &[angle]) => TransformFunction::SkewY { angle },
            _ => return Err(Error::UnexpectedData(s.calc_char_pos_at(start))),
        };

        s.skip_separators();

        Ok(func)
    }
}

/// Parses a transform list into separate functions.
pub fn parse_transform_list(text: &str) -> Result<Vec<TransformFunction>, Error> {
    TransformListParser::from(text).collect()
}

impl std::str::FromStr for Transform {
    type Err = Error;

    /// Parses a transform list and composes it into a single matrix.
    fn from_str(text: &str) -> Result<Self, Error> {
        Ok(compose(&parse_transform_list(text)?))
    }
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use super::*;

    macro_rules! test {
        ($name:ident, $text:expr, $result:expr) => (
            #[test]
            fn $name() {
                let ts = Transform::from_str($text).unwrap();
                assert!(ts.fuzzy_eq(&$result), "{:?} != {:?}", ts, $result);
            }
        )
    }

    test!(parse_1,  "matrix(1 0 0 1 10 20)",         Transform::new(1.0, 0.0, 0.0, 1.0, 10.0, 20.0));
    test!(parse_2,  "translate(10 20)",              Transform::new(1.0, 0.0, 0.0, 1.0, 10.0, 20.0));
    test!(parse_3,  "translate(10)",                 Transform::new(1.0, 0.0, 0.0, 1.0, 10.0, 0.0));
    test!(parse_4,  "scale(2 3)",                    Transform::new(2.0, 0.0, 0.0, 3.0, 0.0, 0.0));
    test!(parse_5,  "scale(2)",                      Transform::new(2.0, 0.0, 0.0, 2.0, 0.0, 0.0));
    test!(parse_6,  "rotate(90)",                    Transform::new(0.0, 1.0, -1.0, 0.0, 0.0, 0.0));
    test!(parse_7,  "translate(10 15) translate(0 5)", Transform::new(1.0, 0.0, 0.0, 1.0, 10.0, 20.0));
    test!(parse_8,  "translate(10) scale(2)",        Transform::new(2.0, 0.0, 0.0, 2.0, 10.0, 0.0));
    test!(parse_9,  "scale(2) translate(10)",        Transform::new(2.0, 0.0, 0.0, 2.0, 20.0, 0.0));
    test!(parse_10, "skewX(45)",                     Transform::new(1.0, 0.0, 1.0, 1.0, 0.0, 0.0));
    test!(parse_11, "skewY(45)",                     Transform::new(1.0, 1.0, 0.0, 1.0, 0.0, 0.0));
    test!(parse_12, "skew(45, 0)",                   Transform::new(1.0, 0.0, 1.0, 1.0, 0.0, 0.0));
    test!(parse_13, "translate(10,20),scale(2)",     Transform::new(2.0, 0.0, 0.0, 2.0, 10.0, 20.0));
    test!(parse_14, " ",                             Transform::default());
    test!(parse_15, "rotate ( 90 ) ",                Transform::new(0.0, 1.0, -1.0, 0.0, 0.0, 0.0));

    #[test]
    fn apply_order() {
        let ts = Transform::from_str("translate(10,0) scale(2)").unwrap();
        let (x, y) = ts.apply(1.0, 0.0);
        assert!(is_fuzzy_eq(x, 12.0));
        assert!(is_fuzzy_eq(y, 0.0));
    }

    #[test]
    fn rotate_at() {
        let ts = Transform::from_str("rotate(90 10 10)").unwrap();
        let (x, y) = ts.apply(20.0, 10.0);
        assert!(is_fuzzy_eq(x, 10.0));
        assert!(is_fuzzy_eq(y, 20.0));
    }

    #[test]
    fn combine_existing_first() {
        let existing = Transform::from_translate(5.0, 0.0);
        let ts = combine(Some(existing), Transform::from_scale(2.0, 2.0));
        assert_eq!(ts.apply(1.0, 0.0), (12.0, 0.0));

        let ts = combine(None, Transform::from_scale(2.0, 2.0));
        assert_eq!(ts.apply(1.0, 0.0), (2.0, 0.0));
    }

    #[test]
    fn identity() {
        assert!(Transform::default().is_identity());
        assert!(Transform::from_rotate(360.0).is_identity());
        assert!(!Transform::from_translate(1.0, 0.0).is_identity());
        assert!(Transform::from_translate(1.0, 0.0).is_translate());
    }

    macro_rules! test_err {
        ($name:ident, $text:expr, $result:expr) => (
            #[test]
            fn $name() {
                let ts = Transform::from_str($text);
                assert_eq!(ts.unwrap_err().to_string(), $result);
            }
        )
    }

    test_err!(parse_err_1, "text",              "unknown transform function at position 1");
    test_err!(parse_err_2, "scale(2) rect()",   "unknown transform function at position 10");
    test_err!(parse_err_3, "???G",              "unknown transform function at position 1");
    test_err!(parse_err_4, "translate(10",      "unterminated transform function at position 1");
    test_err!(parse_err_5, "scale(2) rotate(",  "unterminated transform function at position 10");
    test_err!(parse_err_6, "translate(1 2 3)",  "unexpected data at position 1");
    test_err!(parse_err_7, "matrix(1 2 3)",     "unexpected data at position 1");
    test_err!(parse_err_8, "skew(10)",          "unexpected data at position 1");
    test_err!(parse_err_9, "scale 2",           "expected '(' not '2' at position 7");
    test_err!(parse_err_10, "scale(x)",         "invalid number at position 7");

    #[test]
    fn parse_list() {
        let list = parse_transform_list("rotate(45 1 2) skewY(3)").unwrap();
        assert_eq!(list, vec![
            TransformFunction::Rotate { angle: 45.0, center: Some((1.0, 2.0)) },
            TransformFunction::SkewY { angle: 3.0 },
        ]);
    }

    #[test]
    fn parse_empty() {
        let mut ts = TransformListParser::from(" ");
        assert!(ts.next().is_none());
    }
}
