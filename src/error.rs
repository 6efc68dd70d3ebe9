use thiserror::Error;

/// Errors raised while reading, building or rescaling a color table.
///
/// Line numbers are 1-based and refer to the original input, comments
/// and metadata lines included.
#[derive(Error, Debug)]
pub enum Error {
    #[error("line {line}: cannot parse “{token}”: {reason}")]
    Parse { line: usize, token: String, reason: &'static str },
    #[error("line {line}: unknown color name “{name}”")]
    UnknownColorName { line: usize, name: String },
    #[error("color model `{0}` not understood (must be RGB or HSV)")]
    UnsupportedColorModel(String),
    #[error("failed to read color table\n{0}")]
    Io(#[from] std::io::Error),
    #[error("color table has no segment")]
    Empty,
    #[error("line {line}: segment starts at {found} but the previous one \
             ends at {expected}")]
    Discontinuous { line: usize, expected: f64, found: f64 },
    #[error("breakpoint {index} at {found} lies below the previous one at \
             {previous}")]
    Unsorted { index: usize, previous: f64, found: f64 },
    #[error("degenerate range: vmin = {vmin} and vmax = {vmax}")]
    DegenerateRange { vmin: f64, vmax: f64 },
    #[error("no color model named “{0}”")]
    UnknownModel(String),
}

pub type Result<T> = std::result::Result<T, Error>;
