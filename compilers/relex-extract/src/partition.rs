//! Splits a sentence's dependency tree into the tokens left and right of
//! its root verb.

use std::collections::BTreeMap;

use relex_protocol::{Analyzer, DepLabel, ParsedSentence, TagSet, Token, TokenId, Triple};

use crate::error::PartitionError;
use crate::graph::DependencyTree;

/// Article tokens removed before the second parse. Matching is case-sensitive.
pub const ARTICLES: [&str; 4] = ["a", "an", "the", "The"];

/// A path only counts when its leaf carries one of these tags.
pub const LEAF_TAGS: TagSet = TagSet::NOUN
    .union(TagSet::PROPN)
    .union(TagSet::PRON)
    .union(TagSet::ADJ)
    .union(TagSet::VERB);

/// Labels of the tokens kept from a path.
pub const ENTITY_LABELS: [DepLabel; 9] = [
    DepLabel::Nsubj,
    DepLabel::Conj,
    DepLabel::Compound,
    DepLabel::Nmod,
    DepLabel::Dobj,
    DepLabel::Oprd,
    DepLabel::Advcl,
    DepLabel::Amod,
    DepLabel::Appos,
];

/// Tokens on either side of the root, deduplicated and in sentence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub left: Vec<Token>,
    pub right: Vec<Token>,
    pub root: Token,
}

impl Partition {
    pub fn subject(&self) -> String {
        join(&self.left)
    }

    pub fn object(&self) -> String {
        join(&self.right)
    }

    pub fn relation(&self) -> String {
        self.root.text.trim().to_string()
    }

    /// The triple, or `None` when a side or the relation is empty.
    pub fn triple(&self) -> Option<Triple> {
        Triple::complete(&self.subject(), &self.object(), &self.relation())
    }
}

fn join(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Re-joins the sentence's tokens without articles, separated by single spaces.
/// `None` when there is no article to remove.
pub fn strip_articles(parsed: &ParsedSentence) -> Option<String> {
    let is_article = |t: &&Token| ARTICLES.contains(&t.text.as_str());
    if !parsed.tokens.iter().any(|t| is_article(&t)) {
        return None;
    }
    let kept: Vec<&str> = parsed
        .tokens
        .iter()
        .filter(|t| !is_article(t))
        .map(|t| t.text.as_str())
        .collect();
    Some(kept.join(" "))
}

/// Left/right split of an already validated tree.
///
/// Each root-to-leaf path whose leaf has a [`LEAF_TAGS`] tag is reduced to its
/// [`ENTITY_LABELS`] tokens. The path goes left when its last kept token
/// precedes the root, right otherwise.
pub fn partition_tree(tree: &DependencyTree<'_>) -> Partition {
    let root = tree.root();
    let mut left: BTreeMap<TokenId, &Token> = BTreeMap::new();
    let mut right: BTreeMap<TokenId, &Token> = BTreeMap::new();

    for path in tree.paths() {
        let Some(leaf) = path.last() else { continue };
        if !LEAF_TAGS.has(leaf.pos) {
            continue;
        }

        let kept: Vec<&Token> = path.into_iter().filter(|t| ENTITY_LABELS.contains(&t.dep)).collect();
        let side = match kept.last() {
            Some(last) if last.index < root.index => &mut left,
            _ => &mut right,
        };
        side.extend(kept.into_iter().map(|t| (t.index, t)));
    }

    Partition {
        left: left.into_values().cloned().collect(),
        right: right.into_values().cloned().collect(),
        root: root.clone(),
    }
}

/// Parses sentences with an [`Analyzer`] and partitions them.
#[derive(Debug, Clone)]
pub struct TreePartitioner<A> {
    analyzer: A,
}

impl<A: Analyzer> TreePartitioner<A> {
    pub fn new(analyzer: A) -> Self {
        Self { analyzer }
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// Parses `sentence`, re-parses it without articles when it has any, and
    /// partitions the resulting tree.
    pub fn partition(&self, sentence: &str) -> Result<Partition, PartitionError<A::Error>> {
        let parsed = self.analyzer.parse(sentence).map_err(PartitionError::Engine)?;
        let reduced = match strip_articles(&parsed) {
            Some(text) => self.analyzer.parse(&text).map_err(PartitionError::Engine)?,
            None => parsed,
        };

        let tree = DependencyTree::build(&reduced)?;
        Ok(partition_tree(&tree))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TreeError;
    use relex_protocol::PosTag;
    use std::cell::RefCell;
    use std::collections::HashMap;

    fn sentence(spec: &[(&str, PosTag, DepLabel, Option<u32>)]) -> ParsedSentence {
        let tokens: Vec<Token> = spec
            .iter()
            .enumerate()
            .map(|(i, (text, pos, dep, head))| Token {
                index: TokenId::new(i as u32),
                text: text.to_string(),
                pos: *pos,
                dep: *dep,
                head: head.map(TokenId::new),
            })
            .collect();
        let text = tokens.iter().map(|t| t.text.as_str()).collect::<Vec<_>>().join(" ");
        ParsedSentence::new(text, tokens)
    }

    fn split(parsed: &ParsedSentence) -> Partition {
        partition_tree(&DependencyTree::build(parsed).expect("valid tree"))
    }

    /// Answers only the sentences it was given, recording every request.
    #[derive(Default)]
    struct Scripted {
        parses: HashMap<String, ParsedSentence>,
        requests: RefCell<Vec<String>>,
    }

    impl Scripted {
        fn with(mut self, parsed: ParsedSentence) -> Self {
            self.parses.insert(parsed.text.clone(), parsed);
            self
        }
    }

    impl Analyzer for Scripted {
        type Error = String;

        fn sentences(&self, text: &str) -> Result<Vec<String>, String> {
            Ok(vec![text.to_string()])
        }

        fn parse(&self, sentence: &str) -> Result<ParsedSentence, String> {
            self.requests.borrow_mut().push(sentence.to_string());
            self.parses.get(sentence).cloned().ok_or_else(|| format!("no parse for {:?}", sentence))
        }
    }

    #[test]
    fn test_modifiers_follow_their_head() {
        let parsed = sentence(&[
            ("big", PosTag::Adj, DepLabel::Amod, Some(1)),
            ("dog", PosTag::Noun, DepLabel::Nsubj, Some(2)),
            ("chased", PosTag::Verb, DepLabel::Root, None),
            ("small", PosTag::Adj, DepLabel::Amod, Some(4)),
            ("cat", PosTag::Noun, DepLabel::Dobj, Some(2)),
            (".", PosTag::Punct, DepLabel::Punct, Some(2)),
        ]);
        let partition = split(&parsed);

        assert_eq!(partition.subject(), "big dog");
        assert_eq!(partition.object(), "small cat");
        assert_eq!(partition.relation(), "chased");
        let triple = partition.triple().expect("complete");
        assert_eq!((triple.subject.as_str(), triple.object.as_str()), ("big dog", "small cat"));
    }

    #[test]
    fn test_shared_prefix_counted_once() {
        let parsed = sentence(&[
            ("big", PosTag::Adj, DepLabel::Amod, Some(2)),
            ("brown", PosTag::Adj, DepLabel::Amod, Some(2)),
            ("dog", PosTag::Noun, DepLabel::Nsubj, Some(3)),
            ("barked", PosTag::Verb, DepLabel::Root, None),
        ]);
        let partition = split(&parsed);
        assert_eq!(partition.subject(), "big brown dog");
        assert_eq!(partition.left.len(), 3);
        assert!(partition.right.is_empty());
        assert!(partition.triple().is_none());
    }

    #[test]
    fn test_leaf_tag_filter() {
        let parsed = sentence(&[
            ("January", PosTag::Propn, DepLabel::Nsubj, Some(2)),
            ("5", PosTag::Num, DepLabel::Nummod, Some(0)),
            ("was", PosTag::Aux, DepLabel::Root, None),
            ("cold", PosTag::Adj, DepLabel::Acomp, Some(2)),
            (".", PosTag::Punct, DepLabel::Punct, Some(2)),
        ]);
        let partition = split(&parsed);
        assert!(partition.left.is_empty());
        assert!(partition.right.is_empty());
        assert_eq!(partition.relation(), "was");
        assert!(partition.triple().is_none());
    }

    #[test]
    fn test_side_follows_last_kept_token() {
        let parsed = sentence(&[
            ("Bob", PosTag::Propn, DepLabel::Nsubj, Some(1)),
            ("left", PosTag::Verb, DepLabel::Root, None),
            ("smiling", PosTag::Verb, DepLabel::Acl, Some(0)),
            ("Paris", PosTag::Propn, DepLabel::Dobj, Some(1)),
        ]);
        let partition = split(&parsed);
        assert_eq!(partition.subject(), "Bob");
        assert_eq!(partition.object(), "Paris");
    }

    #[test]
    fn test_strip_articles() {
        let parsed = sentence(&[
            ("The", PosTag::Det, DepLabel::Det, Some(1)),
            ("cat", PosTag::Noun, DepLabel::Nsubj, Some(2)),
            ("ate", PosTag::Verb, DepLabel::Root, None),
            ("an", PosTag::Det, DepLabel::Det, Some(4)),
            ("apple", PosTag::Noun, DepLabel::Dobj, Some(2)),
            (".", PosTag::Punct, DepLabel::Punct, Some(2)),
        ]);
        assert_eq!(strip_articles(&parsed).as_deref(), Some("cat ate apple ."));

        // Capitalised "A" and "An" are left alone
        let untouched = sentence(&[
            ("A", PosTag::Det, DepLabel::Det, Some(1)),
            ("dog", PosTag::Noun, DepLabel::Nsubj, Some(2)),
            ("barked", PosTag::Verb, DepLabel::Root, None),
        ]);
        assert_eq!(strip_articles(&untouched), None);
    }

    #[test]
    fn test_partitioner_reparses_reduced_sentence() {
        let analyzer = Scripted::default()
            .with(sentence(&[
                ("The", PosTag::Det, DepLabel::Det, Some(1)),
                ("cat", PosTag::Noun, DepLabel::Nsubj, Some(2)),
                ("chased", PosTag::Verb, DepLabel::Root, None),
                ("the", PosTag::Det, DepLabel::Det, Some(4)),
                ("mouse", PosTag::Noun, DepLabel::Dobj, Some(2)),
            ]))
            .with(sentence(&[
                ("cat", PosTag::Noun, DepLabel::Nsubj, Some(1)),
                ("chased", PosTag::Verb, DepLabel::Root, None),
                ("mouse", PosTag::Noun, DepLabel::Dobj, Some(1)),
            ]));
        let partitioner = TreePartitioner::new(&analyzer);

        let partition = partitioner.partition("The cat chased the mouse").expect("partition");
        assert_eq!(partition.triple(), Triple::complete("cat", "mouse", "chased"));
        assert_eq!(
            *analyzer.requests.borrow(),
            vec!["The cat chased the mouse".to_string(), "cat chased mouse".to_string()]
        );
    }

    #[test]
    fn test_partitioner_skips_second_parse_without_articles() {
        let analyzer = Scripted::default().with(sentence(&[
            ("birds", PosTag::Noun, DepLabel::Nsubj, Some(1)),
            ("sing", PosTag::Verb, DepLabel::Root, None),
        ]));
        let partitioner = TreePartitioner::new(&analyzer);

        let partition = partitioner.partition("birds sing").expect("partition");
        assert_eq!(partition.subject(), "birds");
        assert_eq!(analyzer.requests.borrow().len(), 1);
    }

    #[test]
    fn test_partitioner_errors() {
        let analyzer = Scripted::default().with(ParsedSentence::new("", Vec::new()));
        let partitioner = TreePartitioner::new(&analyzer);

        assert!(matches!(partitioner.partition(""), Err(PartitionError::Tree(TreeError::NoRoot))));
        assert!(matches!(partitioner.partition("unknown words"), Err(PartitionError::Engine(_))));
    }
}
