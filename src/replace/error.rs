/// Validation failures raised while building a replacement table or converting pair lists.
/// Applying a built table never fails.
#[non_exhaustive]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("empty pairs slice")]
    EmptyInput,

    #[error("pairs slice length must be even, got {0}")]
    OddLength(usize),

    #[error("byte {value} at index {index} is outside the ASCII range 0-127")]
    OutOfRange { index: usize, value: u8 },

    #[error("entry at index {0} is longer than one byte; only single-byte search & replace is supported")]
    TooLong(usize),

    #[error("invalid key at index {0}, must be exactly one byte")]
    KeyNotOneByte(usize),

    #[error("invalid value at index {0}, must be zero or one bytes")]
    ValueTooLong(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
