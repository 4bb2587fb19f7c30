/// Character-level cursor over an immutable source buffer.
///
/// The cursor never copies the source. Identifiers are returned as slices
/// borrowed from the original buffer. Line and column are 1-based and are
/// updated on every consumed character.
#[derive(Debug, Clone)]
pub struct SourceCursor<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
    col: usize,
}

impl<'a> SourceCursor<'a> {
    pub fn new(src: &'a str) -> Self {
        SourceCursor {
            src,
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Byte offset of the next unread character.
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// Returns the next character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    /// Returns the character after the next one without consuming anything.
    pub fn peek_next(&self) -> Option<char> {
        let mut chars = self.src[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Moves past the next character. Does nothing at end of input.
    pub fn advance(&mut self) {
        if let Some(ch) = self.peek() {
            self.pos += ch.len_utf8();
            if ch == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
    }

    /// Peeks and advances in one step.
    pub fn consume(&mut self) -> Option<char> {
        let ch = self.peek();
        self.advance();
        ch
    }

    /// Consumes everything up to and including the next newline.
    pub fn skip_to_line_end(&mut self) {
        while let Some(ch) = self.consume() {
            if ch == '\n' {
                return;
            }
        }
    }

    /// Scans the rest of an identifier whose first character `first` has
    /// already been consumed. The returned slice includes `first`.
    pub fn scan_identifier(&mut self, first: char) -> &'a str {
        let start = self.pos - first.len_utf8();
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                self.advance();
            } else {
                break;
            }
        }
        &self.src[start..self.pos]
    }

    /// Scans a decimal integer whose first digit has already been consumed.
    ///
    /// Accumulation wraps on overflow.
    pub fn scan_integer(&mut self, first_digit: char) -> i32 {
        let mut value = digit_value(first_digit);
        while let Some(ch) = self.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            value = value.wrapping_mul(10).wrapping_add(digit_value(ch));
            self.advance();
        }
        value
    }
}

fn digit_value(ch: char) -> i32 {
    ch.to_digit(10).map(|d| d as i32).unwrap_or(0)
}
