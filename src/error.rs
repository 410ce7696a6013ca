use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A bot line that does not have the `"author";"date";"content"` shape.
    #[error("malformed record on line {row}: {reason}")]
    Format { row: usize, reason: String },

    /// The date column of a bot line is in none of the supported formats.
    #[error("unparseable date '{value}' on line {row}")]
    Parse { row: usize, value: String },

    /// Options that cannot drive an analysis, such as a zero bucket width.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// The export file is not UTF-8 text.
    #[error("chat export is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The export could not be opened or read.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
