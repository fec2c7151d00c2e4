//! ESC/POS command builder
//!
//! Provides a fluent API for building ESC/POS print data.

use crate::encoding::Charset;

/// ESC/POS command builder
///
/// Text is encoded for the target charset as soon as it is written, so
/// command parameters (drawer pulse timings and the like) pass through
/// untouched.
pub struct EscPosBuilder {
    buf: Vec<u8>,
    charset: Charset,
}

impl EscPosBuilder {
    /// Create a new builder that writes text in `charset`
    pub fn new(charset: Charset) -> Self {
        let mut builder = Self {
            buf: Vec::with_capacity(4096),
            charset,
        };
        builder.reset();
        builder
    }

    /// Get the configured charset
    pub fn charset(&self) -> Charset {
        self.charset
    }

    // === Text Output ===

    /// Write text in the printer's charset
    pub fn text(&mut self, s: &str) -> &mut Self {
        let encoded = self.charset.encode(s);
        self.buf.extend_from_slice(&encoded);
        self
    }

    /// Write text followed by newline
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.text(s);
        self.buf.push(b'\n');
        self
    }

    /// Write every line of a pre-laid-out text block
    pub fn block(&mut self, text: &str) -> &mut Self {
        for line in text.split('\n') {
            self.line(line);
        }
        self
    }

    /// Print and feed n lines
    pub fn feed(&mut self, lines: u8) -> &mut Self {
        // ESC d n
        self.buf.extend_from_slice(&[0x1B, 0x64, lines]);
        self
    }

    // === Text Style ===

    /// Enable bold text
    pub fn bold(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x01]);
        self
    }

    /// Disable bold text
    pub fn bold_off(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x00]);
        self
    }

    // === Paper Control ===

    /// Feed n lines then full cut in one command (GS V 66 n)
    ///
    /// The printer accounts for the cutter-to-head distance itself, which
    /// wastes less paper than feed() + cut().
    pub fn cut_feed(&mut self, lines: u8) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x56, 0x42, lines]);
        self
    }

    /// Partial cut (leave a small connection)
    pub fn cut_partial(&mut self) -> &mut Self {
        // GS V 1
        self.buf.extend_from_slice(&[0x1D, 0x56, 0x01]);
        self
    }

    // === Cash Drawer ===

    /// Open cash drawer (pin 2)
    pub fn open_drawer(&mut self) -> &mut Self {
        // ESC p m t1 t2 - Generate pulse on pin m
        self.buf.extend_from_slice(&[0x1B, 0x70, 0x00, 25, 250]);
        self
    }

    // === Printer Control ===

    /// Reset printer to default state and reselect the charset
    pub fn reset(&mut self) -> &mut Self {
        // ESC @
        self.buf.extend_from_slice(&[0x1B, 0x40]);
        self.buf.extend_from_slice(self.charset.preamble());
        self
    }

    // === Build ===

    /// Finish the job and return the byte buffer
    pub fn build(mut self) -> Vec<u8> {
        self.buf.extend_from_slice(self.charset.epilogue());
        self.buf
    }
}

impl Default for EscPosBuilder {
    fn default() -> Self {
        Self::new(Charset::default())
    }
}
