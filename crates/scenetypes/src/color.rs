use crate::{colors, ByteExt, Error, Stream};

/// An RGBA color with channels normalized to the `0..=1` range.
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Color {
    /// Constructs a new `Color` from 8-bit RGB values.
    #[inline]
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Color {
        Color::from_rgba8(red, green, blue, 255)
    }

    /// Constructs a new `Color` from 8-bit RGBA values.
    #[inline]
    pub fn from_rgba8(red: u8, green: u8, blue: u8, alpha: u8) -> Color {
        Color {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: alpha as f32 / 255.0,
        }
    }

    /// Constructs a new `Color` set to black.
    #[inline]
    pub fn black() -> Color {
        Color::from_rgb8(0, 0, 0)
    }

    /// Returns a copy of the color with the alpha multiplied by `opacity`.
    ///
    /// `opacity` is clamped to the `0..=1` range.
    #[inline]
    pub fn with_opacity(mut self, opacity: f64) -> Color {
        self.alpha *= opacity.max(0.0).min(1.0) as f32;
        self
    }

    /// Converts channels back into 8-bit values.
    pub fn to_rgba8(&self) -> [u8; 4] {
        fn to_u8(c: f32) -> u8 {
            (c.max(0.0).min(1.0) * 255.0).round() as u8
        }

        [
            to_u8(self.red),
            to_u8(self.green),
            to_u8(self.blue),
            to_u8(self.alpha),
        ]
    }
}

/// A resolved color value.
///
/// `none` is a valid color value and not an error.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Paint {
    /// The explicit `none` keyword.
    None,
    /// A color.
    Color(Color),
}

/// Resolves a color string.
///
/// Accepts `none`, `#RRGGBB`, `#RRGGBBAA` and CSS named colors.
/// Named colors are case-insensitive.
///
/// # Errors
///
/// - `InvalidValue` when the hex literal has a wrong length
///   or the name is unknown
/// - `UnexpectedData` when a color is followed by something else
pub fn resolve_color(text: &str) -> Result<Paint, Error> {
    let mut s = Stream::from(text);
    s.skip_spaces();

    if s.starts_with(b"none") {
        s.advance(4);
        s.skip_spaces();
        return if s.at_end() {
            Ok(Paint::None)
        } else {
            Err(Error::UnexpectedData(s.calc_char_pos()))
        };
    }

    let color = s.parse_color()?;

    s.skip_spaces();
    if !s.at_end() {
        return Err(Error::UnexpectedData(s.calc_char_pos()));
    }

    Ok(Paint::Color(color))
}

impl std::str::FromStr for Color {
    type Err = Error;

    /// Parses a `Color` from a string.
    ///
    /// Unlike [`resolve_color`], `none` is an error here.
    fn from_str(text: &str) -> Result<Self, Error> {
        match resolve_color(text)? {
            Paint::Color(c) => Ok(c),
            Paint::None => Err(Error::InvalidValue),
        }
    }
}

impl<'a> Stream<'a> {
    /// Parses a color.
    pub fn parse_color(&mut self) -> Result<Color, Error> {
        self.skip_spaces();

        if self.curr_byte()? == b'#' {
            self.advance(1);
            let digits = self.consume_bytes(|_, c| c.is_hex_digit()).as_bytes();
            let alpha = match digits.len() {
                6 => 255,
                8 => hex_pair(digits[6], digits[7]),
                _ => return Err(Error::InvalidValue),
            };

            Ok(Color::from_rgba8(
                hex_pair(digits[0], digits[1]),
                hex_pair(digits[2], digits[3]),
                hex_pair(digits[4], digits[5]),
                alpha,
            ))
        } else {
            let name = self.consume_ascii_ident().to_ascii_lowercase();
            match colors::from_str(&name) {
                Some((r, g, b)) => Ok(Color::from_rgb8(r, g, b)),
                None => Err(Error::InvalidValue),
            }
        }
    }
}

#[inline]
fn from_hex(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => 0,
    }
}

#[inline]
fn hex_pair(c1: u8, c2: u8) -> u8 {
    (from_hex(c1) << 4) | from_hex(c2)
}
