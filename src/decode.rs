//! Bulk text decoding with encoding fallback
//!
//! Sensor dumps come from whatever machine captured them, so the bytes are
//! tried against a chain of encodings and the first clean decode wins.

use crate::error::{MonitorError, Result};
use clap::ValueEnum;
use encoding_rs::WINDOWS_1252;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Text encodings understood by the batch decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum TextEncoding {
    #[value(name = "utf-8")]
    Utf8,
    #[value(name = "latin-1")]
    Latin1,
    #[value(name = "windows-1252")]
    Windows1252,
}

/// Default fallback order
pub const DEFAULT_ENCODINGS: &[TextEncoding] = &[
    TextEncoding::Utf8,
    TextEncoding::Latin1,
    TextEncoding::Windows1252,
];

impl TextEncoding {
    /// Decode `bytes`, returning `None` if they are not valid in this encoding
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_owned),
            // ISO-8859-1 maps every byte to the code point of the same value
            TextEncoding::Latin1 => Some(bytes.iter().map(|&b| char::from(b)).collect()),
            TextEncoding::Windows1252 => WINDOWS_1252
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|text| text.into_owned()),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextEncoding::Utf8 => write!(f, "utf-8"),
            TextEncoding::Latin1 => write!(f, "latin-1"),
            TextEncoding::Windows1252 => write!(f, "windows-1252"),
        }
    }
}

/// Decode `bytes` with the default chain: UTF-8, Latin-1, Windows-1252
pub fn decode_text(bytes: &[u8], name: &str) -> Result<(String, TextEncoding)> {
    decode_with(bytes, name, DEFAULT_ENCODINGS)
}

/// Decode `bytes` trying each encoding in order
pub fn decode_with(
    bytes: &[u8],
    name: &str,
    encodings: &[TextEncoding],
) -> Result<(String, TextEncoding)> {
    for encoding in encodings {
        if let Some(text) = encoding.decode(bytes) {
            debug!("Decoded {} ({} bytes) as {}", name, bytes.len(), encoding);
            return Ok((text, *encoding));
        }
        debug!("{} is not valid {}", name, encoding);
    }

    Err(MonitorError::Decode {
        name: name.to_string(),
        tried: encodings
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(", "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_decodes_first() {
        let (text, encoding) = decode_text("Temperature IN: 21.0 °C".as_bytes(), "utf8").unwrap();

        assert_eq!(encoding, TextEncoding::Utf8);
        assert!(text.contains('°'));
    }

    #[test]
    fn test_latin1_fallback() {
        // 0xB0 is the degree sign in Latin-1 and invalid on its own in UTF-8
        let bytes = b"Temperature IN: 21.0 \xB0C";

        let (text, encoding) = decode_text(bytes, "latin1").unwrap();

        assert_eq!(encoding, TextEncoding::Latin1);
        assert_eq!(text, "Temperature IN: 21.0 °C");
    }

    #[test]
    fn test_windows_1252_when_latin1_not_tried() {
        // 0x80 is the euro sign in Windows-1252
        let bytes = b"cost \x80 5";

        let (text, encoding) =
            decode_with(bytes, "cp1252", &[TextEncoding::Utf8, TextEncoding::Windows1252])
                .unwrap();

        assert_eq!(encoding, TextEncoding::Windows1252);
        assert_eq!(text, "cost € 5");
    }

    #[test]
    fn test_decode_error_when_no_encoding_matches() {
        let bytes = b"\xFF\xFE broken";

        match decode_with(bytes, "dump.txt", &[TextEncoding::Utf8]) {
            Err(MonitorError::Decode { name, tried }) => {
                assert_eq!(name, "dump.txt");
                assert_eq!(tried, "utf-8");
            }
            other => panic!("Expected Decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_chain_fails() {
        assert!(decode_with(b"abc", "empty", &[]).is_err());
    }
}
