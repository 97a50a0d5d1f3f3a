#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod ids;
pub mod tags;

// Re-export core types for convenience
pub use ids::TokenId;
pub use tags::*;

pub mod model;
pub use model::*;

pub mod engine;
pub use engine::Analyzer;

pub mod triple;
pub use triple::{Extraction, Triple};

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;

    fn tok(i: u32, text: &str, pos: PosTag, dep: DepLabel, head: Option<u32>) -> Token {
        Token {
            index: TokenId(i),
            text: text.to_string(),
            pos,
            dep,
            head: head.map(TokenId),
        }
    }

    #[test]
    fn test_root_lookup() {
        let sentence = ParsedSentence::new(
            "cat chased mouse",
            vec![
                tok(0, "cat", PosTag::Noun, DepLabel::Nsubj, Some(1)),
                tok(1, "chased", PosTag::Verb, DepLabel::Root, None),
                tok(2, "mouse", PosTag::Noun, DepLabel::Dobj, Some(1)),
            ],
        );

        let root = sentence.root().expect("single root");
        assert_eq!(root.text, "chased");
        assert_eq!(sentence.get(TokenId(2)).map(|t| t.text.as_str()), Some("mouse"));
        assert!(sentence.get(TokenId(3)).is_none());
    }

    #[test]
    fn test_root_missing_and_multiple() {
        let none = ParsedSentence::new("", Vec::new());
        assert_eq!(none.root(), Err(RootError::Missing));

        let two = ParsedSentence::new(
            "run jump",
            vec![
                tok(0, "run", PosTag::Verb, DepLabel::Root, None),
                tok(1, "jump", PosTag::Verb, DepLabel::Root, None),
            ],
        );
        assert_eq!(two.root(), Err(RootError::Multiple(2)));
    }

    #[test]
    fn test_self_reference_is_root_sentinel() {
        let root = tok(3, "is", PosTag::Aux, DepLabel::Root, Some(3));
        assert_eq!(root.parent(), None);

        let child = tok(1, "sky", PosTag::Noun, DepLabel::Nsubj, Some(3));
        assert_eq!(child.parent(), Some(TokenId(3)));
    }

    #[test]
    fn test_label_parsing() {
        assert_eq!("nsubj".parse::<DepLabel>(), Ok(DepLabel::Nsubj));
        assert_eq!("ROOT".parse::<DepLabel>(), Ok(DepLabel::Root));
        assert!("root".parse::<DepLabel>().is_err());
        assert_eq!("PROPN".parse::<PosTag>(), Ok(PosTag::Propn));
        assert!("propn".parse::<PosTag>().is_err());
    }

    #[test]
    fn test_tagset_members() {
        let set: TagSet = [PosTag::Noun, PosTag::Verb].into_iter().collect();
        assert!(set.has(PosTag::Noun));
        assert!(set.has(PosTag::Verb));
        assert!(!set.has(PosTag::Adj));
        assert_eq!(set.single(), None);
        assert_eq!(set.tags().collect::<Vec<_>>(), vec![PosTag::Noun, PosTag::Verb]);
        assert_eq!(TagSet::of(PosTag::X).single(), Some(PosTag::X));
        assert_eq!(TagSet::of(PosTag::Propn), TagSet::PROPN);
    }

    #[test]
    fn test_triple_completeness() {
        let triple = Triple::complete(" cat ", "mouse", "chased").expect("complete");
        assert_eq!(triple.subject, "cat");
        assert!(Triple::complete("cat", "  ", "chased").is_none());
        assert!(Triple::complete("", "mouse", "chased").is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_extraction_json_shape() {
        let extraction = Extraction {
            triple: Triple::complete("cat", "mouse", "chased").expect("complete"),
            sentence: "The cat chased the mouse.".to_string(),
        };
        let json = serde_json::to_string(&vec![extraction]).expect("serialize");
        assert_eq!(json, r#"[[["cat","mouse","chased"],"The cat chased the mouse."]]"#);
    }
}
