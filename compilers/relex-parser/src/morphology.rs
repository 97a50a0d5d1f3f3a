use relex_protocol::{PosTag, TagSet};
use crate::lexicon::LexiconIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphKind {
    /// Exact lexicon hit.
    Lexicon,
    /// Inflected form of a lexicon stem ("chased" from "chase").
    Inflected,
    /// Derivational suffix heuristic, no stem in the lexicon.
    Guessed,
    Unknown,
}

#[derive(Debug, Clone)]
pub struct MorphAnalysis {
    pub tags: TagSet,
    pub stem: String,
    pub kind: MorphKind,
}

impl MorphAnalysis {
    pub fn unknown(word: &str) -> Self {
        Self {
            tags: TagSet::empty(),
            stem: word.to_string(),
            kind: MorphKind::Unknown,
        }
    }

    fn new(tags: TagSet, stem: &str, kind: MorphKind) -> Self {
        Self { tags, stem: stem.to_string(), kind }
    }
}

/// Inflectional endings: (suffix, tag the stem must carry, resulting tags).
const INFLECTIONS: &[(&str, PosTag, TagSet)] = &[
    ("ies", PosTag::Noun, TagSet::NOUN),
    ("ies", PosTag::Verb, TagSet::VERB),
    ("es", PosTag::Noun, TagSet::NOUN),
    ("es", PosTag::Verb, TagSet::VERB),
    ("s", PosTag::Noun, TagSet::NOUN),
    ("s", PosTag::Verb, TagSet::VERB),
    ("ied", PosTag::Verb, TagSet::VERB),
    ("ed", PosTag::Verb, TagSet::VERB),
    ("d", PosTag::Verb, TagSet::VERB),
    ("ing", PosTag::Verb, TagSet::VERB),
    ("ly", PosTag::Adj, TagSet::ADV),
    ("ily", PosTag::Adj, TagSet::ADV),
    ("er", PosTag::Adj, TagSet::ADJ),
    ("est", PosTag::Adj, TagSet::ADJ),
];

/// Derivational endings guessed without a stem, longest first.
const SUFFIX_GUESSES: &[(&str, TagSet)] = &[
    ("ation", TagSet::NOUN),
    ("ments", TagSet::NOUN),
    ("ness", TagSet::NOUN),
    ("ment", TagSet::NOUN),
    ("tion", TagSet::NOUN),
    ("sion", TagSet::NOUN),
    ("ship", TagSet::NOUN),
    ("ence", TagSet::NOUN),
    ("ance", TagSet::NOUN),
    ("ity", TagSet::NOUN),
    ("ism", TagSet::NOUN),
    ("ist", TagSet::NOUN),
    ("ous", TagSet::ADJ),
    ("ful", TagSet::ADJ),
    ("ive", TagSet::ADJ),
    ("able", TagSet::ADJ),
    ("ible", TagSet::ADJ),
    ("less", TagSet::ADJ),
    ("ical", TagSet::ADJ),
    ("ish", TagSet::ADJ),
    ("ic", TagSet::ADJ),
    ("al", TagSet::ADJ),
    ("ly", TagSet::ADV),
    ("ing", TagSet::VERB),
    ("ed", TagSet::VERB),
    ("ize", TagSet::VERB),
    ("ise", TagSet::VERB),
    ("ate", TagSet::VERB),
    ("er", TagSet::NOUN),
    ("or", TagSet::NOUN),
];

fn stem_candidates(stem: &str) -> Vec<String> {
    let mut out = vec![stem.to_string()];
    // "chas" + e
    out.push(format!("{}e", stem));
    // "stopp" -> "stop"
    let mut tail = stem.chars().rev();
    if let (Some(last), Some(before)) = (tail.next(), tail.next()) {
        if last == before {
            out.push(stem[..stem.len() - last.len_utf8()].to_string());
        }
    }
    out
}

/// Resolves candidate tags for `word` (case-sensitive input, lowercased internally).
pub fn resolve_morphology(lexicon: &LexiconIndex, word: &str) -> MorphAnalysis {
    let lower = word.to_lowercase();

    // 1. Exact lexicon hit
    if let Some(tags) = lexicon.lookup(&lower) {
        return MorphAnalysis::new(tags, &lower, MorphKind::Lexicon);
    }

    if lower.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.') {
        return MorphAnalysis::new(TagSet::NUM, &lower, MorphKind::Guessed);
    }
    // "5th", "1990s"
    if lower.chars().next().map(|c| c.is_ascii_digit()).unwrap_or(false) {
        return MorphAnalysis::new(TagSet::NUM, &lower, MorphKind::Guessed);
    }

    // Possessive "John's", "cat's"
    if let Some(owner) = lower.strip_suffix("'s").or_else(|| lower.strip_suffix("’s")) {
        let base = resolve_morphology(lexicon, owner);
        let tags = if base.tags.is_empty() { TagSet::NOUN } else { base.tags & TagSet::NOUN.union(TagSet::PROPN) };
        if !tags.is_empty() {
            return MorphAnalysis::new(tags, owner, MorphKind::Inflected);
        }
    }

    // 2. Inflection of a known stem
    let mut inflected = TagSet::empty();
    let mut inflected_stem = None;
    for (suffix, stem_tag, result) in INFLECTIONS {
        let Some(stem) = lower.strip_suffix(suffix) else { continue };
        if stem.len() < 2 {
            continue;
        }
        let mut stems = stem_candidates(stem);
        if suffix.starts_with('i') {
            stems.push(format!("{}y", stem));
        }
        if let Some(found) = stems.iter().find(|s| lexicon.contains(s, *stem_tag)) {
            inflected |= *result;
            inflected_stem.get_or_insert_with(|| found.clone());
        }
    }
    if let Some(stem) = inflected_stem {
        return MorphAnalysis::new(inflected, &stem, MorphKind::Inflected);
    }

    // 3. Derivational guess
    for (suffix, tags) in SUFFIX_GUESSES {
        if lower.len() > suffix.len() + 2 && lower.ends_with(suffix) {
            return MorphAnalysis::new(*tags, &lower[..lower.len() - suffix.len()], MorphKind::Guessed);
        }
    }

    // Plural noun or third-person verb
    if lower.len() > 3 && lower.ends_with('s') && !lower.ends_with("ss") && !lower.ends_with("us") {
        return MorphAnalysis::new(TagSet::NOUN.union(TagSet::VERB), &lower[..lower.len() - 1], MorphKind::Guessed);
    }

    MorphAnalysis::unknown(&lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(word: &str) -> TagSet {
        resolve_morphology(&LexiconIndex::builtin(), word).tags
    }

    #[test]
    fn test_lexicon_hit() {
        let analysis = resolve_morphology(&LexiconIndex::builtin(), "Cat");
        assert_eq!(analysis.kind, MorphKind::Lexicon);
        assert_eq!(analysis.tags, TagSet::NOUN);
    }

    #[test]
    fn test_inflected_verbs() {
        let chased = resolve_morphology(&LexiconIndex::builtin(), "chased");
        assert_eq!(chased.kind, MorphKind::Inflected);
        assert_eq!(chased.stem, "chase");
        assert_eq!(chased.tags, TagSet::VERB);

        assert_eq!(tags("stopped"), TagSet::VERB);
        assert_eq!(tags("studied"), TagSet::VERB);
        assert_eq!(tags("jumping"), TagSet::VERB);
    }

    #[test]
    fn test_inflected_nouns_and_adverbs() {
        assert_eq!(tags("trees"), TagSet::NOUN);
        assert_eq!(tags("jumps"), TagSet::NOUN.union(TagSet::VERB));
        assert_eq!(tags("happily"), TagSet::ADV);
        assert_eq!(tags("quickly"), TagSet::ADV);
    }

    #[test]
    fn test_guesses() {
        assert_eq!(tags("globalization"), TagSet::NOUN);
        assert_eq!(tags("marvelous"), TagSet::ADJ);
        assert_eq!(tags("zorbled"), TagSet::VERB);
        assert_eq!(tags("1990s"), TagSet::NUM);
        assert_eq!(tags("3.5"), TagSet::NUM);
        assert_eq!(tags("John's"), TagSet::NOUN);
    }

    #[test]
    fn test_doubled_multibyte_stem() {
        // '奥' is E5 A5 A5: its last two bytes match but the chars do not double
        assert_eq!(stem_candidates("奥"), vec!["奥".to_string(), "奥e".to_string()]);
        assert_eq!(stem_candidates("ßß"), vec!["ßß".to_string(), "ßße".to_string(), "ß".to_string()]);

        let analysis = resolve_morphology(&LexiconIndex::builtin(), "奥s");
        assert_eq!(analysis.kind, MorphKind::Guessed);
        assert_eq!(analysis.tags, TagSet::NOUN.union(TagSet::VERB));
        assert_eq!(tags("ぁed"), TagSet::VERB);
    }

    #[test]
    fn test_unknown() {
        let analysis = resolve_morphology(&LexiconIndex::builtin(), "zyx");
        assert_eq!(analysis.kind, MorphKind::Unknown);
        assert!(analysis.tags.is_empty());
    }
}
