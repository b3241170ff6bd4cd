//! Character encodings supported by the writers and XML escaping rules.

use crate::error::UnknownEncoding;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Output character encoding of a written document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Encoding {
    /// UTF-8.
    #[default]
    Utf8,
    /// 7-bit ASCII.
    UsAscii,
    /// ISO-8859-1.
    Latin1,
}

impl Encoding {
    /// Label written in the XML declaration.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::UsAscii => "us-ascii",
            Self::Latin1 => "iso-8859-1",
        }
    }

    /// Whether documents in this encoding start with an XML declaration.
    #[must_use]
    pub const fn declares_xml(self) -> bool {
        matches!(self, Self::Utf8 | Self::UsAscii)
    }

    /// Whether `ch` has a representation in this encoding.
    #[must_use]
    pub const fn can_encode(self, ch: char) -> bool {
        match self {
            Self::Utf8 => true,
            Self::UsAscii => ch.is_ascii(),
            Self::Latin1 => (ch as u32) < 0x100,
        }
    }

    /// Encode UTF-8 text into this encoding.
    pub(crate) fn encode(self, text: &str) -> Result<Vec<u8>, EncodingError> {
        match self {
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
            Self::UsAscii | Self::Latin1 => text
                .chars()
                .map(|ch| {
                    if self.can_encode(ch) {
                        u8::try_from(u32::from(ch)).map_err(|_| EncodingError::Unencodable(ch))
                    } else {
                        Err(EncodingError::Unencodable(ch))
                    }
                })
                .collect(),
        }
    }

    /// Decode bytes written in this encoding.
    ///
    /// Invalid sequences decode to U+FFFD.
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Self::UsAscii => bytes
                .iter()
                .map(|&b| {
                    if b.is_ascii() {
                        char::from(b)
                    } else {
                        char::REPLACEMENT_CHARACTER
                    }
                })
                .collect(),
            Self::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Encoding {
    type Err = UnknownEncoding;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "us-ascii" | "ascii" => Ok(Self::UsAscii),
            "iso-8859-1" | "latin-1" | "latin1" => Ok(Self::Latin1),
            _ => Err(UnknownEncoding(s.to_owned())),
        }
    }
}

impl TryFrom<String> for Encoding {
    type Error = UnknownEncoding;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Encoding> for String {
    fn from(value: Encoding) -> Self {
        value.label().to_owned()
    }
}

/// A document cannot be represented in the requested encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub(crate) enum EncodingError {
    /// Character not allowed anywhere in an XML 1.0 document.
    #[error("character {0:?} is not allowed in XML")]
    Illegal(char),
    /// Character without a representation in the target encoding, in markup
    /// where a character reference cannot be used.
    #[error("character {0:?} cannot be encoded")]
    Unencodable(char),
    /// Character that would end the processing instruction or its
    /// pseudo-attribute early.
    #[error("character {0:?} is not allowed in a processing instruction")]
    Instruction(char),
}

/// What to do with characters that are illegal in XML 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Policy {
    /// Fail with [`EncodingError::Illegal`].
    Strict,
    /// Substitute U+FFFD.
    Replace,
}

const fn is_xml_char(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..
    )
}

/// Escapes text and attribute values for a target encoding.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Escaper {
    encoding: Encoding,
    policy: Policy,
}

impl Escaper {
    pub(crate) const fn new(encoding: Encoding, policy: Policy) -> Self {
        Self { encoding, policy }
    }

    /// Escape character data.
    pub(crate) fn text(self, value: &str) -> Result<String, EncodingError> {
        let mut out = String::with_capacity(value.len());
        for ch in value.chars() {
            match ch {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                _ => self.push(ch, &mut out)?,
            }
        }
        Ok(out)
    }

    /// Escape a double-quoted attribute value. Whitespace control characters
    /// become character references so readers do not normalize them away.
    pub(crate) fn attribute(self, value: &str) -> Result<String, EncodingError> {
        let mut out = String::with_capacity(value.len());
        for ch in value.chars() {
            match ch {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                '\n' => out.push_str("&#10;"),
                '\r' => out.push_str("&#13;"),
                '\t' => out.push_str("&#09;"),
                _ => self.push(ch, &mut out)?,
            }
        }
        Ok(out)
    }

    /// Check a pseudo-attribute value of a processing instruction. Readers do
    /// not decode references there, so the value is written raw and any
    /// character the encoding lacks is an error.
    pub(crate) fn instruction(self, value: &str) -> Result<String, EncodingError> {
        let mut out = String::with_capacity(value.len());
        let mut previous = None;
        for ch in value.chars() {
            let ends_markup = ch == '"' || (ch == '>' && previous == Some('?'));
            let ch = match (is_xml_char(ch) && !ends_markup, self.policy) {
                (true, _) => ch,
                (false, Policy::Replace) => char::REPLACEMENT_CHARACTER,
                (false, Policy::Strict) if ends_markup => {
                    return Err(EncodingError::Instruction(ch));
                }
                (false, Policy::Strict) => return Err(EncodingError::Illegal(ch)),
            };
            if !self.encoding.can_encode(ch) {
                return Err(EncodingError::Unencodable(ch));
            }
            out.push(ch);
            previous = Some(ch);
        }
        Ok(out)
    }

    fn push(self, ch: char, out: &mut String) -> Result<(), EncodingError> {
        let ch = if is_xml_char(ch) {
            ch
        } else {
            match self.policy {
                Policy::Strict => return Err(EncodingError::Illegal(ch)),
                Policy::Replace => char::REPLACEMENT_CHARACTER,
            }
        };
        if self.encoding.can_encode(ch) {
            out.push(ch);
        } else {
            out.push_str("&#");
            out.push_str(&u32::from(ch).to_string());
            out.push(';');
        }
        Ok(())
    }
}
