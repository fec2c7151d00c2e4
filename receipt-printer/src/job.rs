//! Receipt print jobs
//!
//! Packs formatted receipt text into a complete ESC/POS job: printer init,
//! charset selection, the receipt body, paper feed and cut.

use crate::encoding::Charset;
use crate::error::PrintError;
use crate::escpos::EscPosBuilder;
use crate::formatter::ReceiptTextFormatter;
use serde::{Deserialize, Serialize};
use shared::BillData;
use std::str::FromStr;
use tracing::debug;

/// How the paper is cut after each copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CutMode {
    /// Feed and full cut in one command
    #[default]
    Full,
    /// Feed, then partial cut
    Partial,
    /// Feed only (printers without a cutter)
    None,
}

impl FromStr for CutMode {
    type Err = PrintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "partial" => Ok(Self::Partial),
            "none" => Ok(Self::None),
            other => Err(PrintError::InvalidConfig(format!("Unknown cut mode: {}", other))),
        }
    }
}

/// Device-side settings for a receipt job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintOptions {
    pub charset: Charset,
    /// Lines fed before the cut
    pub feed_lines: u8,
    pub cut: CutMode,
    /// Kick the cash drawer before printing
    pub open_drawer: bool,
    pub copies: u8,
    /// Print the whole receipt in bold
    pub bold: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            charset: Charset::default(),
            feed_lines: 4,
            cut: CutMode::default(),
            open_drawer: false,
            copies: 1,
            bold: false,
        }
    }
}

/// ESC/POS bytes for one receipt, ready for a [`Printer`](crate::Printer)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptJob {
    bytes: Vec<u8>,
}

impl ReceiptJob {
    /// Build a job from already formatted receipt text
    pub fn from_text(text: &str, options: &PrintOptions) -> Self {
        let mut b = EscPosBuilder::new(options.charset);

        if options.open_drawer {
            b.open_drawer();
        }

        let copies = options.copies.max(1);
        for copy in 0..copies {
            if copy > 0 {
                b.reset();
            }

            if options.bold {
                b.bold();
            }
            b.block(text);
            if options.bold {
                b.bold_off();
            }

            match options.cut {
                CutMode::Full => {
                    b.cut_feed(options.feed_lines);
                }
                CutMode::Partial => {
                    b.feed(options.feed_lines).cut_partial();
                }
                CutMode::None => {
                    b.feed(options.feed_lines);
                }
            }
        }

        let bytes = b.build();
        debug!(bytes = bytes.len(), copies, charset = ?options.charset, "receipt job built");
        Self { bytes }
    }

    /// Format a bill and build its job
    pub fn from_bill(
        formatter: &ReceiptTextFormatter,
        bill: &BillData,
        options: &PrintOptions,
    ) -> Self {
        Self::from_text(&formatter.format(bill), options)
    }

    /// Job payload
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
