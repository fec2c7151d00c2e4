//! # receipt-printer
//!
//! Fixed-width receipt layout and thermal printing.
//!
//! ## Scope
//!
//! - Receipt text layout for 58mm/80mm paper ([`ReceiptTextFormatter`])
//! - ESC/POS job building with code-page handling
//! - Network (TCP 9100) and file printer sinks
//!
//! The bill itself comes precomputed from the POS layer ([`shared::BillData`]);
//! nothing here does tax or total arithmetic.
//!
//! ## Example
//!
//! ```ignore
//! use receipt_printer::{NetworkPrinter, PrintOptions, Printer, ReceiptJob, ReceiptTextFormatter};
//!
//! let formatter = ReceiptTextFormatter::new(32)?;
//! let text = formatter.format(&bill);
//!
//! let job = ReceiptJob::from_text(&text, &PrintOptions::default());
//! let printer = NetworkPrinter::from_addr("192.168.1.100:9100")?;
//! printer.print(job.bytes()).await?;
//! ```

mod amount;
mod encoding;
mod error;
mod escpos;
mod formatter;
mod job;
mod printer;

// Re-exports
pub use amount::{fixed, money, percent};
pub use encoding::Charset;
pub use error::{PrintError, PrintResult};
pub use escpos::EscPosBuilder;
pub use formatter::{PaperWidth, ReceiptTextFormatter};
pub use job::{CutMode, PrintOptions, ReceiptJob};
pub use printer::{DEFAULT_PORT, FilePrinter, NetworkPrinter, Printer};
