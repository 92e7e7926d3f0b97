//! Escape decoding for string literals
//!
//! The grammar hands over escape sequences one fragment at a time: either a two-character
//! escape such as `\n`, or a run of one or more `\uXXXX` code unit escapes. A run is
//! decoded as UTF-16, so a surrogate pair split over two escapes becomes one character.

use std::fmt;

/// Why an escape fragment was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnescapeError {
    /// The fragment does not start with a backslash.
    Malformed,
    /// A backslash followed by a character JSON does not define an escape for.
    UnknownEscape(char),
    /// The fragment ends in the middle of an escape.
    Truncated,
    /// A `\u` escape with a non-hexadecimal digit.
    InvalidHex,
    /// A surrogate code unit without its partner.
    LoneSurrogate(u16),
}

impl fmt::Display for UnescapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnescapeError::Malformed => write!(f, "not an escape sequence"),
            UnescapeError::UnknownEscape(c) => write!(f, "unknown escape character {:?}", c),
            UnescapeError::Truncated => write!(f, "escape sequence is truncated"),
            UnescapeError::InvalidHex => write!(f, "invalid hexadecimal digit in \\u escape"),
            UnescapeError::LoneSurrogate(unit) => {
                write!(f, "unpaired surrogate \\u{:04x}", unit)
            }
        }
    }
}

impl std::error::Error for UnescapeError {}

/// Decode an escape fragment into a new string.
pub fn unescape(fragment: &str) -> Result<String, UnescapeError> {
    let mut out = String::new();
    unescape_into(fragment, &mut out)?;
    Ok(out)
}

/// Decode an escape fragment, appending the characters it stands for to `out`.
///
/// On error `out` may have received the characters decoded before the bad escape.
pub fn unescape_into(fragment: &str, out: &mut String) -> Result<(), UnescapeError> {
    let mut rest = fragment;
    if rest.is_empty() {
        return Err(UnescapeError::Malformed);
    }
    while !rest.is_empty() {
        let after_backslash = rest.strip_prefix('\\').ok_or(UnescapeError::Malformed)?;
        let mut chars = after_backslash.chars();
        let kind = chars.next().ok_or(UnescapeError::Truncated)?;
        rest = chars.as_str();

        match kind {
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            '/' => out.push('/'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'u' => {
                let (unit, tail) = code_unit(rest)?;
                rest = tail;
                out.push(decode_unit(unit, &mut rest)?);
            }
            other => return Err(UnescapeError::UnknownEscape(other)),
        }
    }
    Ok(())
}

/// Read four hex digits.
fn code_unit(s: &str) -> Result<(u16, &str), UnescapeError> {
    let digits = s.get(..4).ok_or(UnescapeError::Truncated)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(UnescapeError::InvalidHex);
    }
    let unit = u16::from_str_radix(digits, 16).map_err(|_| UnescapeError::InvalidHex)?;
    Ok((unit, &s[4..]))
}

/// Turn a code unit into a character, pulling the low half of a surrogate pair from
/// `rest` when needed.
fn decode_unit(unit: u16, rest: &mut &str) -> Result<char, UnescapeError> {
    match unit {
        0xD800..=0xDBFF => {
            let tail = rest
                .strip_prefix("\\u")
                .ok_or(UnescapeError::LoneSurrogate(unit))?;
            let (low, after) = code_unit(tail)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(UnescapeError::LoneSurrogate(unit));
            }
            *rest = after;
            let scalar =
                0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
            char::from_u32(scalar).ok_or(UnescapeError::LoneSurrogate(unit))
        }
        0xDC00..=0xDFFF => Err(UnescapeError::LoneSurrogate(unit)),
        _ => char::from_u32(u32::from(unit)).ok_or(UnescapeError::InvalidHex),
    }
}
