#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawToken<'a> {
    /// Letters/digits, possibly joined by apostrophes or hyphens, or a dotted initialism.
    Word(&'a str),
    /// Digits with decimal or thousands separators ("3.5", "1,000").
    Number(&'a str),
    /// Any other single non-whitespace character.
    Punct(char),
}

impl<'a> RawToken<'a> {
    pub fn is_punct(&self, c: char) -> bool {
        matches!(self, RawToken::Punct(p) if *p == c)
    }
}
