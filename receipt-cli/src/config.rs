use receipt_printer::{Charset, PaperWidth};

/// CLI configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | RECEIPT_WIDTH | 32 | characters per line |
/// | RECEIPT_CHARSET | utf8 | printer text encoding (utf8, gbk, latin1) |
/// | RECEIPT_FEED_LINES | 4 | lines fed before the cut |
/// | RECEIPT_CURRENCY | - | replaces the bill's currency symbol |
/// | PRINTER_ADDR | - | network printer, `host[:port]` |
/// | PRINTER_TIMEOUT_MS | 5000 | connection timeout |
/// | LOG_LEVEL | info | log filter when RUST_LOG is unset |
///
/// Unparseable values fall back to the default.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub width: usize,
    pub charset: Charset,
    pub feed_lines: u8,
    pub currency: Option<String>,
    pub printer_addr: Option<String>,
    pub printer_timeout_ms: u64,
    pub log_level: String,
}

impl Config {
    /// Load from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key lookup (used by tests)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            width: lookup("RECEIPT_WIDTH")
                .and_then(|v| v.parse::<usize>().ok())
                .filter(|w| *w > 0)
                .unwrap_or(defaults.width),
            charset: lookup("RECEIPT_CHARSET")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.charset),
            feed_lines: lookup("RECEIPT_FEED_LINES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.feed_lines),
            currency: lookup("RECEIPT_CURRENCY").filter(|v| !v.is_empty()),
            printer_addr: lookup("PRINTER_ADDR").filter(|v| !v.is_empty()),
            printer_timeout_ms: lookup("PRINTER_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.printer_timeout_ms),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: PaperWidth::default().columns(),
            charset: Charset::default(),
            feed_lines: 4,
            currency: None,
            printer_addr: None,
            printer_timeout_ms: 5000,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config, Config::default());
        assert_eq!(config.width, 32);
        assert_eq!(config.charset, Charset::Utf8);
    }

    #[test]
    fn test_env_values() {
        let config = Config::from_lookup(lookup_from(&[
            ("RECEIPT_WIDTH", "48"),
            ("RECEIPT_CHARSET", "gbk"),
            ("RECEIPT_FEED_LINES", "6"),
            ("RECEIPT_CURRENCY", "Rs."),
            ("PRINTER_ADDR", "192.168.1.50"),
            ("PRINTER_TIMEOUT_MS", "1500"),
            ("LOG_LEVEL", "debug"),
        ]));

        assert_eq!(config.width, 48);
        assert_eq!(config.charset, Charset::Gbk);
        assert_eq!(config.feed_lines, 6);
        assert_eq!(config.currency.as_deref(), Some("Rs."));
        assert_eq!(config.printer_addr.as_deref(), Some("192.168.1.50"));
        assert_eq!(config.printer_timeout_ms, 1500);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            ("RECEIPT_WIDTH", "0"),
            ("RECEIPT_CHARSET", "ebcdic"),
            ("RECEIPT_FEED_LINES", "lots"),
            ("PRINTER_ADDR", ""),
        ]));

        assert_eq!(config.width, 32);
        assert_eq!(config.charset, Charset::Utf8);
        assert_eq!(config.feed_lines, 4);
        assert_eq!(config.printer_addr, None);
    }
}
