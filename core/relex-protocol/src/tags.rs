use core::fmt;
use core::str::FromStr;

use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use bitflags::bitflags;

/// Coarse (universal) part-of-speech tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum PosTag {
    Adj = 0,
    Adp = 1,
    Adv = 2,
    Aux = 3,
    Cconj = 4,
    Det = 5,
    Intj = 6,
    Noun = 7,
    Num = 8,
    Part = 9,
    Pron = 10,
    Propn = 11,
    Punct = 12,
    Sconj = 13,
    Sym = 14,
    Verb = 15,
    X = 16,
}

impl PosTag {
    pub const ALL: [PosTag; 17] = [
        PosTag::Adj,
        PosTag::Adp,
        PosTag::Adv,
        PosTag::Aux,
        PosTag::Cconj,
        PosTag::Det,
        PosTag::Intj,
        PosTag::Noun,
        PosTag::Num,
        PosTag::Part,
        PosTag::Pron,
        PosTag::Propn,
        PosTag::Punct,
        PosTag::Sconj,
        PosTag::Sym,
        PosTag::Verb,
        PosTag::X,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PosTag::Adj => "ADJ",
            PosTag::Adp => "ADP",
            PosTag::Adv => "ADV",
            PosTag::Aux => "AUX",
            PosTag::Cconj => "CCONJ",
            PosTag::Det => "DET",
            PosTag::Intj => "INTJ",
            PosTag::Noun => "NOUN",
            PosTag::Num => "NUM",
            PosTag::Part => "PART",
            PosTag::Pron => "PRON",
            PosTag::Propn => "PROPN",
            PosTag::Punct => "PUNCT",
            PosTag::Sconj => "SCONJ",
            PosTag::Sym => "SYM",
            PosTag::Verb => "VERB",
            PosTag::X => "X",
        }
    }

    /// Nominal heads: the tokens a noun phrase is built around.
    pub fn is_nominal(&self) -> bool {
        matches!(self, PosTag::Noun | PosTag::Propn | PosTag::Pron)
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a label string is not part of the tag or label set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownLabel;

impl fmt::Display for UnknownLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown label")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UnknownLabel {}

impl FromStr for PosTag {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PosTag::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str() == s)
            .ok_or(UnknownLabel)
    }
}

/// Dependency-relation label (English ClearNLP-style scheme).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum DepLabel {
    #[cfg_attr(feature = "serde", serde(rename = "ROOT"))]
    Root,
    Acl,
    Acomp,
    Advcl,
    Advmod,
    Agent,
    Amod,
    Appos,
    Attr,
    Aux,
    Auxpass,
    Case,
    Cc,
    Ccomp,
    Compound,
    Conj,
    Csubj,
    Csubjpass,
    Dative,
    Dep,
    Det,
    Dobj,
    Expl,
    Intj,
    Mark,
    Meta,
    Neg,
    Nmod,
    Npadvmod,
    Nsubj,
    Nsubjpass,
    Nummod,
    Oprd,
    Parataxis,
    Pcomp,
    Pobj,
    Poss,
    Preconj,
    Predet,
    Prep,
    Prt,
    Punct,
    Quantmod,
    Relcl,
    Xcomp,
}

impl DepLabel {
    pub const ALL: [DepLabel; 45] = [
        DepLabel::Root,
        DepLabel::Acl,
        DepLabel::Acomp,
        DepLabel::Advcl,
        DepLabel::Advmod,
        DepLabel::Agent,
        DepLabel::Amod,
        DepLabel::Appos,
        DepLabel::Attr,
        DepLabel::Aux,
        DepLabel::Auxpass,
        DepLabel::Case,
        DepLabel::Cc,
        DepLabel::Ccomp,
        DepLabel::Compound,
        DepLabel::Conj,
        DepLabel::Csubj,
        DepLabel::Csubjpass,
        DepLabel::Dative,
        DepLabel::Dep,
        DepLabel::Det,
        DepLabel::Dobj,
        DepLabel::Expl,
        DepLabel::Intj,
        DepLabel::Mark,
        DepLabel::Meta,
        DepLabel::Neg,
        DepLabel::Nmod,
        DepLabel::Npadvmod,
        DepLabel::Nsubj,
        DepLabel::Nsubjpass,
        DepLabel::Nummod,
        DepLabel::Oprd,
        DepLabel::Parataxis,
        DepLabel::Pcomp,
        DepLabel::Pobj,
        DepLabel::Poss,
        DepLabel::Preconj,
        DepLabel::Predet,
        DepLabel::Prep,
        DepLabel::Prt,
        DepLabel::Punct,
        DepLabel::Quantmod,
        DepLabel::Relcl,
        DepLabel::Xcomp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DepLabel::Root => "ROOT",
            DepLabel::Acl => "acl",
            DepLabel::Acomp => "acomp",
            DepLabel::Advcl => "advcl",
            DepLabel::Advmod => "advmod",
            DepLabel::Agent => "agent",
            DepLabel::Amod => "amod",
            DepLabel::Appos => "appos",
            DepLabel::Attr => "attr",
            DepLabel::Aux => "aux",
            DepLabel::Auxpass => "auxpass",
            DepLabel::Case => "case",
            DepLabel::Cc => "cc",
            DepLabel::Ccomp => "ccomp",
            DepLabel::Compound => "compound",
            DepLabel::Conj => "conj",
            DepLabel::Csubj => "csubj",
            DepLabel::Csubjpass => "csubjpass",
            DepLabel::Dative => "dative",
            DepLabel::Dep => "dep",
            DepLabel::Det => "det",
            DepLabel::Dobj => "dobj",
            DepLabel::Expl => "expl",
            DepLabel::Intj => "intj",
            DepLabel::Mark => "mark",
            DepLabel::Meta => "meta",
            DepLabel::Neg => "neg",
            DepLabel::Nmod => "nmod",
            DepLabel::Npadvmod => "npadvmod",
            DepLabel::Nsubj => "nsubj",
            DepLabel::Nsubjpass => "nsubjpass",
            DepLabel::Nummod => "nummod",
            DepLabel::Oprd => "oprd",
            DepLabel::Parataxis => "parataxis",
            DepLabel::Pcomp => "pcomp",
            DepLabel::Pobj => "pobj",
            DepLabel::Poss => "poss",
            DepLabel::Preconj => "preconj",
            DepLabel::Predet => "predet",
            DepLabel::Prep => "prep",
            DepLabel::Prt => "prt",
            DepLabel::Punct => "punct",
            DepLabel::Quantmod => "quantmod",
            DepLabel::Relcl => "relcl",
            DepLabel::Xcomp => "xcomp",
        }
    }
}

impl fmt::Display for DepLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DepLabel {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DepLabel::ALL
            .iter()
            .copied()
            .find(|label| label.as_str() == s)
            .ok_or(UnknownLabel)
    }
}

bitflags! {
    /// A set of coarse tags, one bit per `PosTag` discriminant.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct TagSet: u32 {
        const ADJ = 1 << 0;
        const ADP = 1 << 1;
        const ADV = 1 << 2;
        const AUX = 1 << 3;
        const CCONJ = 1 << 4;
        const DET = 1 << 5;
        const INTJ = 1 << 6;
        const NOUN = 1 << 7;
        const NUM = 1 << 8;
        const PART = 1 << 9;
        const PRON = 1 << 10;
        const PROPN = 1 << 11;
        const PUNCT = 1 << 12;
        const SCONJ = 1 << 13;
        const SYM = 1 << 14;
        const VERB = 1 << 15;
        const X = 1 << 16;
    }
}

impl TagSet {
    pub const fn of(tag: PosTag) -> Self {
        Self::from_bits_truncate(1 << tag as u32)
    }

    pub fn has(&self, tag: PosTag) -> bool {
        self.contains(Self::of(tag))
    }

    /// Member tags in discriminant order.
    pub fn tags(&self) -> impl Iterator<Item = PosTag> + '_ {
        PosTag::ALL.into_iter().filter(move |tag| self.has(*tag))
    }

    /// The single member, if the set is unambiguous.
    pub fn single(&self) -> Option<PosTag> {
        if self.bits().count_ones() == 1 {
            self.tags().next()
        } else {
            None
        }
    }
}

impl From<PosTag> for TagSet {
    fn from(tag: PosTag) -> Self {
        Self::of(tag)
    }
}

impl FromIterator<PosTag> for TagSet {
    fn from_iter<I: IntoIterator<Item = PosTag>>(iter: I) -> Self {
        iter.into_iter().fold(TagSet::empty(), |set, tag| set | TagSet::of(tag))
    }
}
