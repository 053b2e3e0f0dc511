/// List of all errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// An input data ended earlier than expected.
    ///
    /// Usually means that a command or a function has not enough operands.
    UnexpectedEndOfStream,

    /// An input text contains unknown data.
    UnexpectedData(usize),

    /// A provided string doesn't have a valid data.
    ///
    /// For example, if we try to parse a color from `zzz`
    /// string - we will get this error.
    /// But if we try to parse a number list like `1.2 zzz`,
    /// then we will get `InvalidNumber`, because at least some data is valid.
    InvalidValue,

    /// An invalid/unexpected character.
    ///
    /// The first byte is an actual one, others - expected.
    ///
    /// We are using a single value to reduce the struct size.
    InvalidChar(Vec<u8>, usize),

    /// An invalid number.
    InvalidNumber(usize),

    /// A transform function with an unknown name.
    UnknownFunction(usize),

    /// A transform function without a closing parenthesis.
    UnterminatedFunction(usize),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::UnexpectedEndOfStream => {
                write!(f, "unexpected end of stream")
            }
            Error::UnexpectedData(pos) => {
                write!(f, "unexpected data at position {}", pos)
            }
            Error::InvalidValue => {
                write!(f, "invalid value")
            }
            Error::InvalidChar(ref chars, pos) => {
                let list: Vec<String> = chars
                    .iter()
                    .skip(1)
                    .map(|c| (*c as char).to_string())
                    .collect();

                match chars.first() {
                    Some(actual) => write!(
                        f,
                        "expected '{}' not '{}' at position {}",
                        list.join("', '"),
                        *actual as char,
                        pos
                    ),
                    None => write!(f, "invalid char at position {}", pos),
                }
            }
            Error::InvalidNumber(pos) => {
                write!(f, "invalid number at position {}", pos)
            }
            Error::UnknownFunction(pos) => {
                write!(f, "unknown transform function at position {}", pos)
            }
            Error::UnterminatedFunction(pos) => {
                write!(f, "unterminated transform function at position {}", pos)
            }
        }
    }
}

impl std::error::Error for Error {}
