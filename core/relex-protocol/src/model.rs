use rkyv::{Archive, Deserialize, Serialize};
use crate::ids::TokenId;
use crate::tags::{DepLabel, PosTag};
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// One analysed word of a sentence. Immutable once the engine produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Token {
    pub index: TokenId,
    pub text: String,
    pub pos: PosTag,
    pub dep: DepLabel,
    /// Syntactic parent. `None` (or a self reference) marks the root.
    pub head: Option<TokenId>,
}

impl Token {
    /// Parent of this token, with the self-reference sentinel folded into `None`.
    pub fn parent(&self) -> Option<TokenId> {
        self.head.filter(|head| *head != self.index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootError {
    /// No token carries the ROOT label.
    Missing,
    /// More than one token carries the ROOT label.
    Multiple(usize),
}

impl fmt::Display for RootError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootError::Missing => write!(f, "sentence has no ROOT token"),
            RootError::Multiple(n) => write!(f, "sentence has {} ROOT tokens", n),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RootError {}

/// A sentence together with its dependency parse.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct ParsedSentence {
    pub text: String,
    pub tokens: Vec<Token>,
}

impl ParsedSentence {
    pub fn new(text: impl Into<String>, tokens: Vec<Token>) -> Self {
        Self { text: text.into(), tokens }
    }

    pub fn get(&self, id: TokenId) -> Option<&Token> {
        self.tokens.get(id.index()).filter(|t| t.index == id)
    }

    /// The unique token labelled ROOT.
    pub fn root(&self) -> Result<&Token, RootError> {
        let mut roots = self.tokens.iter().filter(|t| t.dep == DepLabel::Root);
        let first = roots.next().ok_or(RootError::Missing)?;
        match roots.count() {
            0 => Ok(first),
            extra => Err(RootError::Multiple(extra + 1)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct LexiconEntry {
    pub text: String,
    /// Candidate tags; the tagger picks one in context.
    pub tags: Vec<PosTag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Lexicon {
    pub version: u32,
    pub entries: Vec<LexiconEntry>,
}
