mod core;
mod error;
mod escape;
mod pairs;


pub use self::core::{ASCII_MAX, Action, ByteReplacer, DELETE_SENTINEL};
pub use self::error::{Error, Result};
pub use self::escape::unescape;
pub use self::pairs::{
    Preset, REMOVE_PUNCTUATION_PAIRS, REMOVE_WHITESPACES_PAIRS, TO_LOWER_PAIRS, TO_UPPER_PAIRS,
    WHITESPACES_AS_SPACES_PAIRS, as_byte_pairs,
};
