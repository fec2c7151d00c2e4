//! Text encodings for thermal printers
//!
//! Receipt text is UTF-8; most thermal printers only speak a legacy code
//! page. This module provides:
//! - The code-page selection commands each charset needs
//! - UTF-8 to code-page conversion that never emits encoder escapes
//! - Euro sign handling on GBK printers

use crate::error::PrintError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Placeholder for characters the printer code page lacks (one column wide)
const UNMAPPABLE: u8 = b'?';

/// Exit Chinese mode -> PC858 -> euro -> enter Chinese mode
const GBK_EURO: [u8; 8] = [0x1C, 0x2E, 0x1B, 0x74, 19, 0xD5, 0x1C, 0x26];

/// Printer text encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Charset {
    /// Printers with native UTF-8 support
    #[default]
    Utf8,
    /// Chinese printers (GBK code page)
    Gbk,
    /// Western printers (WPC1252 code page)
    Latin1,
}

impl Charset {
    /// Commands that select this charset, sent after every printer init
    pub fn preamble(self) -> &'static [u8] {
        match self {
            Self::Utf8 => &[],
            // FS & - Enable Chinese mode, FS C 1 - Select GBK
            Self::Gbk => &[0x1C, 0x26, 0x1C, 0x43, 0x01],
            // ESC t 16 - Select WPC1252
            Self::Latin1 => &[0x1B, 0x74, 16],
        }
    }

    /// Commands sent at the end of a job
    pub fn epilogue(self) -> &'static [u8] {
        match self {
            // FS . - Exit Chinese mode
            Self::Gbk => &[0x1C, 0x2E],
            Self::Utf8 | Self::Latin1 => &[],
        }
    }

    /// Encode text for this charset
    ///
    /// Characters the code page cannot represent become `?`.
    pub fn encode(self, text: &str) -> Vec<u8> {
        let encoding = match self {
            Self::Utf8 => return text.as_bytes().to_vec(),
            Self::Gbk => encoding_rs::GBK,
            Self::Latin1 => encoding_rs::WINDOWS_1252,
        };

        let mut result = Vec::with_capacity(text.len() * 2);
        let mut char_buf = [0u8; 4];

        for c in text.chars() {
            if c.is_ascii() {
                result.push(c as u8);
                continue;
            }
            if self == Self::Gbk && c == '€' {
                result.extend_from_slice(&GBK_EURO);
                continue;
            }

            let (bytes, _, had_errors) = encoding.encode(c.encode_utf8(&mut char_buf));
            if had_errors {
                result.push(UNMAPPABLE);
            } else {
                result.extend_from_slice(&bytes);
            }
        }

        result
    }
}

impl FromStr for Charset {
    type Err = PrintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Self::Utf8),
            "gbk" | "gb2312" => Ok(Self::Gbk),
            "latin1" | "cp1252" | "windows-1252" => Ok(Self::Latin1),
            other => Err(PrintError::InvalidConfig(format!(
                "Unknown charset: {}",
                other
            ))),
        }
    }
}
