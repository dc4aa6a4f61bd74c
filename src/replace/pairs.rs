use std::fmt;
use std::str::FromStr;

use super::core::DELETE_SENTINEL;
use super::error::{Error, Result};

/// ASCII punctuation, each mapped to deletion. The apostrophe is not included.
pub const REMOVE_PUNCTUATION_PAIRS: &[&str] = &[
    "!", "", "\"", "", "#", "", "$", "", "%", "", "&", "", "(", "", ")", "", "*", "", "+", "",
    ",", "", "\\", "", "-", "", ".", "", "/", "", ":", "", ";", "", "<", "", "=", "", ">", "",
    "?", "", "@", "", "[", "", "]", "", "^", "", "_", "", "`", "", "{", "", "|", "", "}", "",
    "~", "",
];

pub const WHITESPACES_AS_SPACES_PAIRS: &[&str] = &[
    "\t", " ", "\r", " ", "\n", " ", "\x0B", " ", "\x08", " ", "\x0C", " ",
];

pub const REMOVE_WHITESPACES_PAIRS: &[&str] = &[
    "\t", "", "\r", "", "\n", "", "\x0B", "", "\x08", "", "\x0C", "",
];

pub const TO_LOWER_PAIRS: &[&str] = &[
    "A", "a", "B", "b", "C", "c", "D", "d", "E", "e", "F", "f", "G", "g", "H", "h", "I", "i",
    "J", "j", "K", "k", "L", "l", "M", "m", "N", "n", "O", "o", "P", "p", "Q", "q", "R", "r",
    "S", "s", "T", "t", "U", "u", "V", "v", "W", "w", "X", "x", "Y", "y", "Z", "z",
];

pub const TO_UPPER_PAIRS: &[&str] = &[
    "a", "A", "b", "B", "c", "C", "d", "D", "e", "E", "f", "F", "g", "G", "h", "H", "i", "I",
    "j", "J", "k", "K", "l", "L", "m", "M", "n", "N", "o", "O", "p", "P", "q", "Q", "r", "R",
    "s", "S", "t", "T", "u", "U", "v", "V", "w", "W", "x", "X", "y", "Y", "z", "Z",
];

/// Named preset pair lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Lower,
    Upper,
    StripPunct,
    SpaceWhitespace,
    StripWhitespace,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::Lower,
        Preset::Upper,
        Preset::StripPunct,
        Preset::SpaceWhitespace,
        Preset::StripWhitespace,
    ];

    pub fn pairs(self) -> &'static [&'static str] {
        match self {
            Preset::Lower => TO_LOWER_PAIRS,
            Preset::Upper => TO_UPPER_PAIRS,
            Preset::StripPunct => REMOVE_PUNCTUATION_PAIRS,
            Preset::SpaceWhitespace => WHITESPACES_AS_SPACES_PAIRS,
            Preset::StripWhitespace => REMOVE_WHITESPACES_PAIRS,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Lower => "lower",
            Preset::Upper => "upper",
            Preset::StripPunct => "strip-punct",
            Preset::SpaceWhitespace => "space-whitespace",
            Preset::StripWhitespace => "strip-whitespace",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Preset::ALL.iter().map(|p| p.name()).collect();
                format!("unknown preset '{}' (expected one of: {})", s, names.join(", "))
            })
    }
}

/// Convert string pairs into the flat byte-pair form accepted by
/// [`ByteReplacer::from_byte_pairs`](super::ByteReplacer::from_byte_pairs).
/// An empty value becomes the BACKSPACE delete marker.
///
/// Only the pair shape is checked here; the 0-127 range is enforced by the builder.
pub fn as_byte_pairs<S: AsRef<[u8]>>(pairs: &[S]) -> Result<Vec<u8>> {
    if pairs.len() % 2 != 0 {
        return Err(Error::OddLength(pairs.len()));
    }
    let mut out = Vec::with_capacity(pairs.len());
    for (i, pair) in pairs.chunks_exact(2).enumerate() {
        let key = pair[0].as_ref();
        let value = pair[1].as_ref();
        if key.len() != 1 {
            return Err(Error::KeyNotOneByte(2 * i));
        }
        if value.len() > 1 {
            return Err(Error::ValueTooLong(2 * i + 1));
        }
        out.push(key[0]);
        out.push(value.first().copied().unwrap_or(DELETE_SENTINEL));
    }
    Ok(out)
}
