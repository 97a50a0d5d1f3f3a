use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::model::ParsedSentence;

/// The language engine the extractor is driven by.
///
/// An implementation owns whatever model it needs (loaded once) and is
/// passed to the extractor explicitly; nothing about it is process-global.
pub trait Analyzer {
    type Error: fmt::Debug + fmt::Display;

    /// Splits a text blob into sentences, preserving order and original text.
    fn sentences(&self, text: &str) -> Result<Vec<String>, Self::Error>;

    /// Tokenizes, tags and dependency-parses a single sentence.
    fn parse(&self, sentence: &str) -> Result<ParsedSentence, Self::Error>;
}

impl<A: Analyzer + ?Sized> Analyzer for &A {
    type Error = A::Error;

    fn sentences(&self, text: &str) -> Result<Vec<String>, Self::Error> {
        (**self).sentences(text)
    }

    fn parse(&self, sentence: &str) -> Result<ParsedSentence, Self::Error> {
        (**self).parse(sentence)
    }
}
