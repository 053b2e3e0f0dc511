use crate::{Error, Stream};

/// List of length units that can be converted into pixels.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum LengthUnit {
    None,
    Px,
    In,
    Cm,
    Mm,
    Pt,
    Pc,
    /// Any other suffix, like `em` or `%`.
    ///
    /// Treated as a plain number.
    Unknown,
}

/// A number with a unit.
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Length {
    pub number: f64,
    pub unit: LengthUnit,
}

impl Length {
    /// Constructs a new length.
    #[inline]
    pub fn new(number: f64, unit: LengthUnit) -> Length {
        Length { number, unit }
    }

    /// Converts the length into device pixels.
    pub fn to_px(&self, dpi: f64) -> f64 {
        let n = self.number;
        match self.unit {
            LengthUnit::None | LengthUnit::Px | LengthUnit::Unknown => n,
            LengthUnit::In => n * dpi,
            LengthUnit::Cm => n * dpi / 2.54,
            LengthUnit::Mm => n * dpi / 25.4,
            LengthUnit::Pt => n * dpi / 72.0,
            LengthUnit::Pc => n * dpi / 6.0,
        }
    }
}

impl<'a> Stream<'a> {
    /// Parses a length from the stream.
    ///
    /// Only the leading number is required. Whatever follows it
    /// is checked against the known suffixes and is otherwise ignored.
    pub fn parse_length(&mut self) -> Result<Length, Error> {
        self.skip_spaces();

        let n = self.parse_number()?;

        let suffixes: [(&[u8], LengthUnit); 6] = [
            (b"px", LengthUnit::Px),
            (b"in", LengthUnit::In),
            (b"cm", LengthUnit::Cm),
            (b"mm", LengthUnit::Mm),
            (b"pt", LengthUnit::Pt),
            (b"pc", LengthUnit::Pc),
        ];

        for (suffix, unit) in suffixes {
            if self.starts_with(suffix) {
                self.advance(2);
                return Ok(Length::new(n, unit));
            }
        }

        let unit = if self.slice_tail().trim().is_empty() {
            LengthUnit::None
        } else {
            LengthUnit::Unknown
        };

        self.jump_to_end();
        Ok(Length::new(n, unit))
    }
}

/// Resolves a length string into device pixels.
///
/// `dpi` is the resolution of the target surface.
///
/// # Errors
///
/// - `InvalidNumber` when the text doesn't start with a number
pub fn resolve_length(text: &str, dpi: f64) -> Result<f64, Error> {
    let mut s = Stream::from(text);
    let l = s.parse_length()?;
    Ok(l.to_px(dpi))
}
