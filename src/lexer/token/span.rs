use std::ops::Range;

/// Byte range of a token inside the script source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// The byte position of the start of the token.
    pub start: u32,
    /// The length of the token in bytes.
    pub length: u32,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start as u32,
            length: end.saturating_sub(start) as u32,
        }
    }

    pub fn start(&self) -> usize {
        self.start as usize
    }

    pub fn end(&self) -> usize {
        (self.start + self.length) as usize
    }

    pub fn range(&self) -> Range<usize> {
        self.start()..self.end()
    }

    pub fn merge(&self, other: &Span) -> Span {
        let start = self.start().min(other.start());
        let end = self.end().max(other.end());
        Span::new(start, end)
    }

    /// Converts the byte range into a character range, which is what report
    /// renderers index by.
    pub fn char_range(&self, text: &str) -> Range<usize> {
        let start = text
            .get(..self.start())
            .map(|s| s.chars().count())
            .unwrap_or(0);
        let length = text
            .get(self.range())
            .map(|s| s.chars().count())
            .unwrap_or(0);
        start..start + length
    }
}
