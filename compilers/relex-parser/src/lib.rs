pub mod error;
pub mod lexicon;
pub mod morphology;
pub mod parser;
pub mod segment;
pub mod syntax;
pub mod tagger;
pub mod token;

use std::path::Path;

use relex_protocol::{Analyzer, DepLabel, Lexicon, ParsedSentence, TagSet, Token, TokenId};
use tracing::debug;

pub use crate::error::EngineError;
use crate::lexicon::{load_compiled, LexiconIndex};
use crate::morphology::{resolve_morphology, MorphKind};
use crate::parser::parse_with_spans;
use crate::segment::split_sentences;
use crate::syntax::{parse_greedy, TaggedToken};
use crate::tagger::disambiguate;
use crate::token::RawToken;

const SYMBOLS: &str = "$%&+=<>#@*~^|/\\€£";

const OPEN_CLASS: TagSet = TagSet::NOUN
    .union(TagSet::VERB)
    .union(TagSet::ADJ)
    .union(TagSet::ADV)
    .union(TagSet::PROPN);

/// Rule-based English analyzer: segmentation, tagging and dependency parsing.
///
/// Construct once and share; the lexicon is read-only after loading.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    lexicon: LexiconIndex,
}

impl Engine {
    /// Engine backed by the built-in lexicon only.
    pub fn new() -> Self {
        Self { lexicon: LexiconIndex::builtin() }
    }

    /// Built-in lexicon extended (and overridden) by `lexicon`.
    pub fn with_lexicon(lexicon: &Lexicon) -> Self {
        let mut index = LexiconIndex::builtin();
        index.extend(lexicon);
        Self { lexicon: index }
    }

    /// Loads a compiled lexicon from disk.
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let lexicon = load_compiled(path)?;
        let engine = Self::with_lexicon(&lexicon);
        debug!(words = engine.lexicon.len(), "engine ready");
        Ok(engine)
    }

    pub fn lexicon(&self) -> &LexiconIndex {
        &self.lexicon
    }

    fn candidates(&self, raw: &RawToken, initial: bool) -> TagSet {
        let word = match raw {
            RawToken::Punct(c) if SYMBOLS.contains(*c) => return TagSet::SYM,
            RawToken::Punct(_) => return TagSet::PUNCT,
            RawToken::Number(_) => return TagSet::NUM,
            RawToken::Word(word) => word,
        };

        let analysis = resolve_morphology(&self.lexicon, word);
        let capitalized = word.chars().next().map(char::is_uppercase).unwrap_or(false);

        if capitalized && !initial {
            // "I", "May" (modal) stay closed-class; anything else capitalised mid-sentence is a name
            let closed = analysis.kind == MorphKind::Lexicon && !analysis.tags.intersects(OPEN_CLASS);
            return if closed { analysis.tags } else { TagSet::PROPN };
        }
        if !analysis.tags.is_empty() {
            return analysis.tags;
        }
        if capitalized {
            TagSet::PROPN
        } else {
            TagSet::NOUN
        }
    }

    /// Tokenizes, tags and parses one sentence.
    pub fn analyze(&self, sentence: &str) -> ParsedSentence {
        let raw = parse_with_spans(sentence);

        let mut initial = true;
        let mut words = Vec::with_capacity(raw.len());
        let mut cands = Vec::with_capacity(raw.len());
        for (span, token) in &raw {
            cands.push(self.candidates(token, initial));
            words.push(sentence[span.start..span.end].to_lowercase());
            if !matches!(token, RawToken::Punct(_)) {
                initial = false;
            }
        }

        let tags = disambiguate(&words, &cands);
        let tagged: Vec<TaggedToken> = raw
            .iter()
            .zip(&tags)
            .map(|((span, _), pos)| TaggedToken::new(&sentence[span.start..span.end], *pos))
            .collect();

        let tree = parse_greedy(&tagged);
        let mut heads = vec![None; tagged.len()];
        for dep in &tree.deps {
            heads[dep.dependent_index] = Some((dep.head_index, dep.role));
        }

        let tokens = tagged
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let (head, dep) = if tree.root == Some(i) {
                    (None, DepLabel::Root)
                } else {
                    match heads[i] {
                        Some((h, role)) => (Some(TokenId::new(h as u32)), role),
                        None => (None, DepLabel::Dep),
                    }
                };
                Token {
                    index: TokenId::new(i as u32),
                    text: t.text.to_string(),
                    pos: t.pos,
                    dep,
                    head,
                }
            })
            .collect();

        ParsedSentence::new(sentence, tokens)
    }
}

impl Analyzer for Engine {
    type Error = EngineError;

    fn sentences(&self, text: &str) -> Result<Vec<String>, Self::Error> {
        Ok(split_sentences(text).into_iter().map(str::to_string).collect())
    }

    fn parse(&self, sentence: &str) -> Result<ParsedSentence, Self::Error> {
        Ok(self.analyze(sentence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relex_protocol::{LexiconEntry, PosTag};

    fn summary(parsed: &ParsedSentence) -> Vec<(&str, PosTag, DepLabel, Option<u32>)> {
        parsed
            .tokens
            .iter()
            .map(|t| (t.text.as_str(), t.pos, t.dep, t.head.map(u32::from)))
            .collect()
    }

    #[test]
    fn test_parse_simple_sentence() {
        let engine = Engine::new();
        let parsed = engine.parse("The cat chased the mouse.").expect("infallible");

        assert_eq!(
            summary(&parsed),
            vec![
                ("The", PosTag::Det, DepLabel::Det, Some(1)),
                ("cat", PosTag::Noun, DepLabel::Nsubj, Some(2)),
                ("chased", PosTag::Verb, DepLabel::Root, None),
                ("the", PosTag::Det, DepLabel::Det, Some(4)),
                ("mouse", PosTag::Noun, DepLabel::Dobj, Some(2)),
                (".", PosTag::Punct, DepLabel::Punct, Some(2)),
            ]
        );
        assert_eq!(parsed.root().map(|t| t.text.as_str()), Ok("chased"));
    }

    #[test]
    fn test_parse_without_articles() {
        let engine = Engine::new();
        let parsed = engine.parse("cat chased mouse .").expect("infallible");
        assert_eq!(
            summary(&parsed),
            vec![
                ("cat", PosTag::Noun, DepLabel::Nsubj, Some(1)),
                ("chased", PosTag::Verb, DepLabel::Root, None),
                ("mouse", PosTag::Noun, DepLabel::Dobj, Some(1)),
                (".", PosTag::Punct, DepLabel::Punct, Some(1)),
            ]
        );
    }

    #[test]
    fn test_capitalised_names() {
        let engine = Engine::new();
        let parsed = engine.parse("Steve Jobs founded Apple.").expect("infallible");
        let tags: Vec<PosTag> = parsed.tokens.iter().map(|t| t.pos).collect();
        assert_eq!(tags, vec![PosTag::Propn, PosTag::Propn, PosTag::Verb, PosTag::Propn, PosTag::Punct]);
        assert_eq!(parsed.tokens[0].dep, DepLabel::Compound);
        assert_eq!(parsed.tokens[1].dep, DepLabel::Nsubj);
        assert_eq!(parsed.tokens[3].dep, DepLabel::Dobj);
    }

    #[test]
    fn test_imperative() {
        let parsed = Engine::new().parse("Run.").expect("infallible");
        assert_eq!(
            summary(&parsed),
            vec![("Run", PosTag::Verb, DepLabel::Root, None), (".", PosTag::Punct, DepLabel::Punct, Some(0))]
        );
    }

    #[test]
    fn test_month_date_sentence() {
        let parsed = Engine::new().parse("January 5 was cold.").expect("infallible");
        assert_eq!(
            summary(&parsed),
            vec![
                ("January", PosTag::Propn, DepLabel::Nsubj, Some(2)),
                ("5", PosTag::Num, DepLabel::Nummod, Some(0)),
                ("was", PosTag::Aux, DepLabel::Root, None),
                ("cold", PosTag::Adj, DepLabel::Acomp, Some(2)),
                (".", PosTag::Punct, DepLabel::Punct, Some(2)),
            ]
        );
    }

    #[test]
    fn test_empty_sentence_has_no_root() {
        let parsed = Engine::new().parse("   ").expect("infallible");
        assert!(parsed.is_empty());
        assert!(parsed.root().is_err());
    }

    #[test]
    fn test_sentences_preserve_text_and_order() {
        let engine = Engine::new();
        let sentences = engine.sentences("The cat sat.  Dogs bark!\nBirds sing").expect("infallible");
        assert_eq!(sentences, vec!["The cat sat.", "Dogs bark!", "Birds sing"]);
    }

    #[test]
    fn test_custom_lexicon_changes_tags() {
        let engine = Engine::with_lexicon(&Lexicon {
            version: lexicon::LEXICON_VERSION,
            entries: vec![LexiconEntry { text: "blick".to_string(), tags: vec![PosTag::Verb] }],
        });
        let parsed = engine.parse("cats blick mice.").expect("infallible");
        assert_eq!(parsed.tokens[1].pos, PosTag::Verb);
        assert_eq!(parsed.tokens[1].dep, DepLabel::Root);
        assert_eq!(parsed.tokens[0].dep, DepLabel::Nsubj);
    }

    #[test]
    fn test_load_missing_lexicon_is_an_error() {
        let err = Engine::load(Path::new("/nonexistent/relex.rkyv")).unwrap_err();
        assert!(matches!(err, EngineError::Io { .. }));
    }
}
