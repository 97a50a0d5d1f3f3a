//! Picks one coarse tag per token from its candidate set using the left
//! context (tags already chosen) and the right context (candidates).

use relex_protocol::{PosTag, TagSet};

const PRIORITY: [PosTag; 17] = [
    PosTag::Noun,
    PosTag::Verb,
    PosTag::Adj,
    PosTag::Propn,
    PosTag::Adv,
    PosTag::Pron,
    PosTag::Det,
    PosTag::Adp,
    PosTag::Aux,
    PosTag::Sconj,
    PosTag::Cconj,
    PosTag::Part,
    PosTag::Num,
    PosTag::Intj,
    PosTag::Sym,
    PosTag::Punct,
    PosTag::X,
];

pub const POSSESSIVES: &[&str] = &["my", "your", "his", "her", "its", "our", "their", "whose"];
pub const SUBJECT_PRONOUNS: &[&str] = &["i", "you", "he", "she", "it", "we", "they"];

fn first_of(set: TagSet, order: &[PosTag]) -> Option<PosTag> {
    order.iter().copied().find(|tag| set.has(*tag))
}

fn by_priority(set: TagSet) -> PosTag {
    first_of(set, &PRIORITY).unwrap_or(PosTag::X)
}

struct Context<'a> {
    words: &'a [String],
    cands: &'a [TagSet],
    chosen: &'a [PosTag],
    i: usize,
}

impl<'a> Context<'a> {
    fn prev(&self) -> Option<PosTag> {
        self.chosen.last().copied()
    }

    fn prev_word(&self) -> Option<&str> {
        self.i.checked_sub(1).map(|j| self.words[j].as_str())
    }

    fn next(&self) -> TagSet {
        self.cands.get(self.i + 1).copied().unwrap_or(TagSet::empty())
    }

    /// Candidates of the next token that is not an adverb/particle ("did not go").
    fn next_content(&self) -> TagSet {
        self.cands[self.i + 1..]
            .iter()
            .copied()
            .find(|c| !TagSet::ADV.union(TagSet::PART).contains(*c) || c.is_empty())
            .unwrap_or(TagSet::empty())
    }

    /// Last chosen tag, looking through adverbs and negation.
    fn prev_content(&self) -> Option<PosTag> {
        self.chosen
            .iter()
            .rev()
            .copied()
            .find(|tag| !matches!(tag, PosTag::Adv | PosTag::Part))
            .or_else(|| self.prev())
    }

    fn prev_is_possessive(&self) -> bool {
        self.prev() == Some(PosTag::Pron) && self.prev_word().map(|w| POSSESSIVES.contains(&w)).unwrap_or(false)
    }
}

const NOMINAL: TagSet = TagSet::NOUN.union(TagSet::PROPN).union(TagSet::PRON);
const NP_START: TagSet = TagSet::DET.union(TagSet::NOUN).union(TagSet::PROPN).union(TagSet::PRON).union(TagSet::NUM).union(TagSet::ADJ);

fn closed_class(ctx: &Context, set: TagSet) -> Option<PosTag> {
    let word = ctx.words[ctx.i].as_str();
    let next = ctx.next();

    match word {
        "to" => return Some(if next.has(PosTag::Verb) { PosTag::Part } else { PosTag::Adp }),
        "that" => {
            if next.intersects(TagSet::NOUN.union(TagSet::ADJ)) && !next.has(PosTag::Verb) {
                return Some(PosTag::Det);
            }
            return Some(match ctx.prev() {
                Some(PosTag::Verb) | Some(PosTag::Aux) | Some(PosTag::Adj) => PosTag::Sconj,
                _ => PosTag::Pron,
            });
        }
        "there" => {
            return Some(if ctx.next_content().intersects(TagSet::AUX.union(TagSet::VERB)) && ctx.i == 0 {
                PosTag::Pron
            } else if set.has(PosTag::Adv) {
                PosTag::Adv
            } else {
                PosTag::Pron
            })
        }
        "one" => return Some(if next.intersects(TagSet::NOUN.union(TagSet::ADJ)) { PosTag::Num } else { PosTag::Pron }),
        "no" => return Some(if next.intersects(TagSet::NOUN.union(TagSet::ADJ)) { PosTag::Det } else { PosTag::Intj }),
        "'s" | "’s" => {
            return Some(match ctx.prev() {
                Some(tag) if tag.is_nominal() => PosTag::Part,
                _ => PosTag::Aux,
            })
        }
        "so" | "yet" if set.has(PosTag::Cconj) => return Some(PosTag::Cconj),
        _ => {}
    }

    // have/do and friends
    if set.has(PosTag::Aux) && set.has(PosTag::Verb) {
        let ahead = ctx.next_content();
        let question = ctx.i == 0 && ahead.intersects(NOMINAL.union(TagSet::DET));
        return Some(if ahead.has(PosTag::Verb) || question { PosTag::Aux } else { PosTag::Verb });
    }
    if set.has(PosTag::Aux) {
        return Some(PosTag::Aux);
    }

    // this/these/all/which/what ...
    if set.has(PosTag::Det) && set.has(PosTag::Pron) {
        return Some(if next.intersects(TagSet::NOUN.union(TagSet::ADJ).union(TagSet::PROPN).union(TagSet::NUM)) {
            PosTag::Det
        } else {
            PosTag::Pron
        });
    }

    // after/before/since/until
    if set.has(PosTag::Sconj) && set.has(PosTag::Adp) {
        let subject_follows = ctx
            .words
            .get(ctx.i + 1)
            .map(|w| SUBJECT_PRONOUNS.contains(&w.as_str()))
            .unwrap_or(false);
        return Some(if subject_follows { PosTag::Sconj } else { PosTag::Adp });
    }

    // up/out/off/down/over
    if set.has(PosTag::Adp) && set.has(PosTag::Adv) {
        return Some(if next.intersects(NP_START) { PosTag::Adp } else { PosTag::Adv });
    }

    if set.has(PosTag::Sconj) {
        return Some(PosTag::Sconj);
    }

    None
}

fn open_class(ctx: &Context, set: TagSet) -> PosTag {
    let next = ctx.next();
    let nominal_next = next.intersects(TagSet::NOUN.union(TagSet::PROPN));

    let modifier_context = ctx.prev_is_possessive()
        || matches!(ctx.prev(), Some(PosTag::Det | PosTag::Adj | PosTag::Num | PosTag::Adp));
    if modifier_context {
        if set.has(PosTag::Adj) && nominal_next {
            return PosTag::Adj;
        }
        return first_of(set, &[PosTag::Noun, PosTag::Adj, PosTag::Propn, PosTag::Verb]).unwrap_or_else(|| by_priority(set));
    }

    if set.has(PosTag::Adj) && nominal_next && !next.has(PosTag::Verb) {
        return PosTag::Adj;
    }
    if ctx.prev() == Some(PosTag::Part) && ctx.prev_word() == Some("to") && set.has(PosTag::Verb) {
        return PosTag::Verb;
    }

    match ctx.prev_content() {
        Some(PosTag::Aux) => {
            if let Some(tag) = first_of(set, &[PosTag::Verb, PosTag::Adj]) {
                return tag;
            }
        }
        Some(tag) if tag.is_nominal() => {
            if set.has(PosTag::Verb) {
                return PosTag::Verb;
            }
        }
        Some(PosTag::Verb) => {
            if set.has(PosTag::Adj) && nominal_next {
                return PosTag::Adj;
            }
            if let Some(tag) = first_of(set, &[PosTag::Noun, PosTag::Adj, PosTag::Adv]) {
                return tag;
            }
        }
        None => {
            // Imperatives: "Run.", "Open the door."
            let imperative_next = next.is_empty()
                || (next.intersects(TagSet::DET.union(TagSet::PRON).union(TagSet::PUNCT).union(TagSet::ADP).union(TagSet::ADV))
                    && !next.intersects(TagSet::NOUN.union(TagSet::VERB)));
            if set.has(PosTag::Verb) && imperative_next {
                return PosTag::Verb;
            }
        }
        _ => {}
    }

    by_priority(set)
}

/// Chooses a single tag for each token. `words` are lowercased surface forms.
pub fn disambiguate(words: &[String], cands: &[TagSet]) -> Vec<PosTag> {
    let mut chosen: Vec<PosTag> = Vec::with_capacity(cands.len());

    for (i, set) in cands.iter().copied().enumerate() {
        let tag = match set.single() {
            Some(tag) => tag,
            None if set.is_empty() => PosTag::X,
            None => {
                let ctx = Context { words, cands, chosen: &chosen, i };
                closed_class(&ctx, set).unwrap_or_else(|| open_class(&ctx, set))
            }
        };
        chosen.push(tag);
    }

    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::LexiconIndex;
    use crate::morphology::resolve_morphology;

    fn tag(sentence: &str) -> Vec<PosTag> {
        let lexicon = LexiconIndex::builtin();
        let words: Vec<String> = sentence.split_whitespace().map(|w| w.to_lowercase()).collect();
        let cands: Vec<TagSet> = sentence
            .split_whitespace()
            .map(|w| {
                if w == "." {
                    TagSet::PUNCT
                } else {
                    let tags = resolve_morphology(&lexicon, w).tags;
                    if tags.is_empty() { TagSet::NOUN } else { tags }
                }
            })
            .collect();
        disambiguate(&words, &cands)
    }

    use relex_protocol::PosTag::*;

    #[test]
    fn test_simple_clause() {
        assert_eq!(tag("cat chased mouse ."), vec![Noun, Verb, Noun, Punct]);
    }

    #[test]
    fn test_noun_verb_ambiguity() {
        assert_eq!(tag("cats chase mice ."), vec![Noun, Verb, Noun, Punct]);
        assert_eq!(tag("Run ."), vec![Verb, Punct]);
        assert_eq!(tag("the run was long ."), vec![Det, Noun, Aux, Adj, Punct]);
    }

    #[test]
    fn test_to_and_auxiliaries() {
        assert_eq!(tag("she wants to run ."), vec![Pron, Verb, Part, Verb, Punct]);
        assert_eq!(tag("he went to school ."), vec![Pron, Verb, Adp, Noun, Punct]);
        assert_eq!(tag("he did not go ."), vec![Pron, Aux, Part, Verb, Punct]);
        assert_eq!(tag("he has dog ."), vec![Pron, Verb, Noun, Punct]);
    }

    #[test]
    fn test_that() {
        assert_eq!(tag("dog that bit me ran ."), vec![Noun, Pron, Verb, Pron, Verb, Punct]);
        assert_eq!(tag("i know that man ."), vec![Pron, Verb, Det, Noun, Punct]);
        assert_eq!(tag("i know that he left ."), vec![Pron, Verb, Sconj, Pron, Verb, Punct]);
    }

    #[test]
    fn test_adjective_before_noun() {
        assert_eq!(tag("cold water is wet ."), vec![Adj, Noun, Aux, Adj, Punct]);
    }
}
