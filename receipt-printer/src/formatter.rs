//! Fixed-width receipt text formatter
//!
//! Lays a [`BillData`] out as monospaced plain text: centered restaurant
//! header, bill metadata, itemized lines and the totals block. The output is
//! the same for the thermal printer and the print-to-PDF path.
//!
//! Widths are counted in `char`s, so a currency symbol such as `₹` takes one
//! column. Lines may run past the paper width when content does not fit;
//! nothing is ever truncated.

use crate::amount::{money, percent};
use crate::error::{PrintError, PrintResult};
use serde::{Deserialize, Serialize};
use shared::{Bill, BillData, BillItem, Restaurant};
use tracing::{debug, instrument};

const FOOTER: &str = "Thank you! Visit Again";

/// Thermal paper presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaperWidth {
    /// 58mm roll, 32 characters
    #[default]
    #[serde(rename = "58mm")]
    Mm58,
    /// 80mm roll, 48 characters
    #[serde(rename = "80mm")]
    Mm80,
}

impl PaperWidth {
    /// Characters per line
    pub fn columns(self) -> usize {
        match self {
            Self::Mm58 => 32,
            Self::Mm80 => 48,
        }
    }

    /// Parse "58", "58mm", "80" or "80mm"
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().trim_end_matches("mm") {
            "58" => Some(Self::Mm58),
            "80" => Some(Self::Mm80),
            _ => None,
        }
    }
}

/// Display width of a string in columns
fn text_width(s: &str) -> usize {
    s.chars().count()
}

/// Optional text that is set and non-empty
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Rate that should appear in a label (set, non-zero, a number)
fn label_rate(rate: Option<f64>) -> Option<f64> {
    rate.filter(|r| *r != 0.0 && !r.is_nan())
}

fn tax_label(name: &str, rate: Option<f64>) -> String {
    match rate {
        Some(r) => format!("{} {}", name, percent(r)),
        None => name.to_string(),
    }
}

/// Receipt text formatter
///
/// Holds only the paper width and can be shared freely between threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptTextFormatter {
    width: usize,
}

impl ReceiptTextFormatter {
    /// Create a formatter for `width` character columns
    ///
    /// Common widths:
    /// - 58mm paper: 32 characters
    /// - 80mm paper: 48 characters
    pub fn new(width: usize) -> PrintResult<Self> {
        if width == 0 {
            return Err(PrintError::InvalidConfig(
                "receipt width must be at least 1 column".to_string(),
            ));
        }
        Ok(Self { width })
    }

    /// Create a formatter for a paper preset
    pub fn for_paper(paper: PaperWidth) -> Self {
        Self {
            width: paper.columns(),
        }
    }

    /// Get the configured width
    pub fn width(&self) -> usize {
        self.width
    }

    // === Layout Primitives ===

    /// A full-width rule of `ch`
    pub fn line(&self, ch: char) -> String {
        std::iter::repeat_n(ch, self.width).collect()
    }

    /// Trimmed text, left-padded so it sits in the middle of the line
    ///
    /// Only the left side is padded; text wider than the line is kept whole.
    pub fn center(&self, text: &str) -> String {
        let text = text.trim();
        let padding = self.width.saturating_sub(text_width(text)) / 2;
        format!("{}{}", " ".repeat(padding), text)
    }

    /// Left and right text on the same line, at least one space apart
    pub fn pad_line(&self, left: &str, right: &str) -> String {
        let used = text_width(left) + text_width(right);
        let spaces = self.width.saturating_sub(used).max(1);
        format!("{}{}{}", left, " ".repeat(spaces), right)
    }

    /// Greedy word wrap to `width - indent` columns, each line prefixed with
    /// `indent` spaces
    ///
    /// A word longer than the limit is cut into chunks of exactly the limit
    /// (the last chunk takes the remainder). Blank input yields one line
    /// holding just the indent.
    pub fn wrap(&self, text: &str, indent: usize) -> Vec<String> {
        let max = self.width.saturating_sub(indent).max(1);
        let prefix = " ".repeat(indent);

        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();

        for word in text.split_whitespace() {
            let word_width = text_width(word);

            if word_width > max {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let chars: Vec<char> = word.chars().collect();
                lines.extend(chars.chunks(max).map(|chunk| chunk.iter().collect::<String>()));
                continue;
            }

            if current.is_empty() {
                current.push_str(word);
            } else if text_width(&current) + 1 + word_width <= max {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
        if lines.is_empty() {
            return vec![prefix];
        }

        lines
            .into_iter()
            .map(|line| format!("{}{}", prefix, line))
            .collect()
    }

    // === Rendering ===

    /// Render a bill as receipt text, lines joined by `\n`
    #[instrument(skip_all, fields(width = self.width, items = data.items.len()))]
    pub fn format(&self, data: &BillData) -> String {
        let mut lines = Vec::with_capacity(24 + data.items.len() * 2);

        self.render_header(&mut lines, &data.restaurant);
        self.render_meta(&mut lines, &data.bill);

        for item in &data.items {
            self.render_item(&mut lines, item, &data.currency);
        }

        self.render_totals(&mut lines, data);
        lines.push(self.center(FOOTER));

        debug!(lines = lines.len(), "receipt formatted");
        lines.join("\n")
    }

    /// Restaurant identity, centered, closed by a double rule
    fn render_header(&self, lines: &mut Vec<String>, restaurant: &Restaurant) {
        if !restaurant.name.is_empty() {
            lines.push(self.center(&restaurant.name.to_uppercase()));
        }

        for address in [
            present(&restaurant.address_line1),
            present(&restaurant.address_line2),
        ]
        .into_iter()
        .flatten()
        {
            lines.push(self.center(address));
        }

        let locality = [present(&restaurant.city), present(&restaurant.state)]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");
        if !locality.is_empty() {
            lines.push(self.center(&locality));
        }

        if let Some(postal_code) = present(&restaurant.postal_code) {
            lines.push(self.center(postal_code));
        }
        if let Some(phone) = present(&restaurant.phone) {
            lines.push(self.center(&format!("Phone: {}", phone)));
        }
        if let Some(email) = present(&restaurant.email) {
            lines.push(self.center(&format!("Email: {}", email)));
        }
        if let Some(gstin) = present(&restaurant.gst_number) {
            lines.push(self.center(&format!("GSTIN: {}", gstin)));
        }
        if let Some(fssai) = present(&restaurant.fssai_number) {
            lines.push(self.center(&format!("FSSAI LIC NO: {}", fssai)));
        }

        lines.push(self.line('='));
    }

    /// Bill metadata and the item column header
    fn render_meta(&self, lines: &mut Vec<String>, bill: &Bill) {
        if let Some(guest) = present(&bill.guest_name) {
            lines.push(format!("Name: {}", guest));
        }

        lines.push(
            format!("Date & time : {} {}", bill.time, bill.date)
                .trim()
                .to_string(),
        );

        if let Some(dine_in) = bill.dine_in.as_ref().filter(|d| d.is_truthy()) {
            lines.push(format!("Dine In: {}", dine_in));
        }
        if let Some(cashier) = present(&bill.cashier) {
            lines.push(format!("Cashier: {}", cashier));
        }
        if let Some(waiter) = present(&bill.waiter_name) {
            lines.push(format!("Waiter: {}", waiter));
        }
        lines.push(format!("Bill No.: {}", bill.bill_number));

        lines.push(self.line('-'));
        lines.push(self.pad_line("Item", "Amount"));
        lines.push(self.line('-'));
    }

    /// One item: name and amount share a line when they fit, otherwise the
    /// amount drops below with the quantity breakdown
    fn render_item(&self, lines: &mut Vec<String>, item: &BillItem, currency: &str) {
        let total = money(item.total, currency);
        let name_lines = self.wrap(&item.name, 0);

        match name_lines.as_slice() {
            [name] if text_width(name) + 1 + text_width(&total) <= self.width => {
                lines.push(self.pad_line(name, &total));
            }
            _ => {
                let qty_price = format!("{} x {}", item.quantity, money(item.price, currency));
                lines.extend(name_lines);
                lines.push(self.pad_line(&qty_price, &total));
            }
        }
    }

    /// Totals block, closed by the grand total between double rules
    fn render_totals(&self, lines: &mut Vec<String>, data: &BillData) {
        let totals = &data.totals;
        let amount = |value: f64| money(value, &data.currency);

        lines.push(self.line('-'));
        lines.push(self.pad_line("Sub Total", &amount(totals.subtotal)));

        if totals.service_charge > 0.0 {
            let label = tax_label("Service Charge", label_rate(data.tax_rate_service));
            lines.push(self.pad_line(&label, &amount(totals.service_charge)));
        }

        // A defined pair wins even at zero; the flat amount needs to be positive
        match (totals.sgst, totals.cgst) {
            (Some(sgst), Some(cgst)) => {
                let half_rate = label_rate(data.tax_rate_gst).map(|r| r / 2.0);
                lines.push(self.pad_line(&tax_label("SGST", half_rate), &amount(sgst)));
                lines.push(self.pad_line(&tax_label("CGST", half_rate), &amount(cgst)));
            }
            _ if totals.gst > 0.0 => {
                let label = tax_label("GST", label_rate(data.tax_rate_gst));
                lines.push(self.pad_line(&label, &amount(totals.gst)));
            }
            _ => {}
        }

        if let Some(discount) = totals.discount
            && discount > 0.0
        {
            lines.push(self.pad_line("Discount", &amount(discount)));
        }

        if let Some(round_off) = totals.round_off
            && round_off != 0.0
        {
            lines.push(self.pad_line("Round Off", &amount(round_off)));
        }

        lines.push(self.line('='));
        lines.push(self.pad_line("GRAND TOTAL", &amount(totals.grand_total)));
        lines.push(self.line('='));
    }
}

impl Default for ReceiptTextFormatter {
    fn default() -> Self {
        Self::for_paper(PaperWidth::default())
    }
}
