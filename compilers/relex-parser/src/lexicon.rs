//! Word → candidate tag lookup.
//!
//! The built-in table covers English closed-class words and a core of common
//! open-class words. A compiled lexicon (rkyv, see `lexicon-compiler`) can be
//! layered on top; its entries replace the built-in candidates for a word.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use relex_protocol::{Lexicon, PosTag, TagSet};
use rkyv::{AlignedVec, Deserialize};
use tracing::debug;

use crate::error::EngineError;

/// Only archives of this version are accepted.
pub const LEXICON_VERSION: u32 = 1;

const N: TagSet = TagSet::NOUN;
const V: TagSet = TagSet::VERB;
const A: TagSet = TagSet::ADJ;
const NV: TagSet = TagSet::NOUN.union(TagSet::VERB);
const NA: TagSet = TagSet::NOUN.union(TagSet::ADJ);

const BUILTIN: &[(TagSet, &[&str])] = &[
    (TagSet::DET, &[
        "a", "an", "the", "this", "that", "these", "those", "every", "each", "some", "any", "no",
        "another", "either", "neither", "all", "both", "which", "what", "whatever", "much", "many",
        "few", "several", "such",
    ]),
    (TagSet::PRON, &[
        "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "my", "your",
        "his", "its", "our", "their", "mine", "yours", "hers", "ours", "theirs", "myself",
        "yourself", "himself", "herself", "itself", "ourselves", "themselves", "who", "whom",
        "whose", "which", "what", "that", "this", "these", "those", "someone", "something",
        "somebody", "everyone", "everything", "everybody", "nobody", "nothing", "anyone",
        "anything", "anybody", "one", "none", "all", "both", "each", "there",
    ]),
    (TagSet::AUX, &[
        "be", "am", "is", "are", "was", "were", "been", "being", "have", "has", "had", "do",
        "does", "did", "will", "would", "shall", "should", "can", "could", "may", "might", "must",
        "ca", "wo", "'s", "'re", "'m", "'ve", "'d", "'ll",
    ]),
    (TagSet::AUX, &[
        "don't", "doesn't", "didn't", "isn't", "aren't", "wasn't", "weren't", "can't", "cannot",
        "won't", "couldn't", "wouldn't", "shouldn't", "hasn't", "haven't", "hadn't", "mustn't",
    ]),
    (TagSet::PRON, &[
        "it's", "that's", "he's", "she's", "there's", "what's", "who's", "i'm", "you're", "we're",
        "they're", "i've", "you've", "we've", "they've", "i'll", "you'll", "he'll", "she'll",
        "we'll", "they'll", "i'd", "you'd", "he'd", "she'd", "we'd", "they'd",
    ]),
    (TagSet::ADP, &[
        "of", "in", "on", "at", "by", "for", "with", "from", "to", "into", "onto", "about",
        "over", "under", "after", "before", "between", "through", "during", "without", "within",
        "against", "among", "across", "behind", "beyond", "near", "since", "until", "upon",
        "toward", "towards", "via", "like", "as", "per", "than", "off", "up", "down", "out",
        "around", "along", "despite", "inside", "outside", "above", "below", "beside", "besides",
        "except", "throughout", "unlike", "amid",
    ]),
    (TagSet::CCONJ, &["and", "or", "but", "nor", "yet", "so", "plus"]),
    (TagSet::SCONJ, &[
        "because", "although", "though", "while", "if", "unless", "whereas", "whether", "when",
        "whenever", "where", "wherever", "once", "since", "after", "before", "until", "as", "that",
        "than", "so",
    ]),
    (TagSet::PART, &["not", "n't", "to", "'s", "’s"]),
    (TagSet::ADV, &[
        "very", "too", "also", "just", "only", "still", "even", "never", "always", "often",
        "sometimes", "usually", "already", "soon", "now", "then", "here", "there", "quite",
        "rather", "almost", "really", "well", "again", "ever", "yet", "however", "perhaps",
        "maybe", "so", "later", "today", "tomorrow", "yesterday", "together", "away", "back",
        "down", "up", "out", "off", "over", "home", "abroad", "ago", "instead", "once", "twice",
        "how", "why", "when", "where", "more", "most", "less", "least", "far", "fast", "hard",
        "early", "late", "much",
    ]),
    (TagSet::NUM, &[
        "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
        "twelve", "twenty", "thirty", "forty", "fifty", "hundred", "thousand", "million",
        "billion", "dozen",
    ]),
    (TagSet::INTJ, &["yes", "oh", "hello", "hi", "please", "thanks", "wow", "okay", "ok", "hey", "no"]),
    (TagSet::PROPN, &[
        "january", "february", "march", "april", "may", "june", "july", "august", "september",
        "october", "november", "december", "monday", "tuesday", "wednesday", "thursday", "friday",
        "saturday", "sunday",
    ]),
    (V, &[
        "have", "has", "had", "having", "do", "does", "did", "doing", "done", "go", "goes", "went", "gone", "make", "makes", "made", "take", "takes", "took", "taken",
        "see", "sees", "saw", "seen", "come", "comes", "came", "know", "knows", "knew", "known",
        "get", "gets", "got", "gotten", "give", "gives", "gave", "given", "find", "finds", "found",
        "think", "thinks", "thought", "tell", "tells", "told", "become", "becomes", "became",
        "leave", "leaves", "left", "feel", "feels", "felt", "bring", "brings", "brought", "begin",
        "begins", "began", "begun", "keep", "keeps", "kept", "hold", "holds", "held", "write",
        "writes", "wrote", "written", "stand", "stands", "stood", "hear", "hears", "heard", "let",
        "mean", "means", "meant", "meet", "meets", "met", "ran", "pay", "pays", "paid", "sit",
        "sits", "sat", "speak", "speaks", "spoke", "spoken", "lead", "leads", "led", "grow",
        "grows", "grew", "grown", "lose", "loses", "lost", "fall", "falls", "fell", "fallen",
        "send", "sends", "sent", "build", "builds", "built", "understand", "understood", "draw",
        "drew", "drawn", "break", "broke", "broken", "spend", "spent", "rise", "rose", "risen",
        "drive", "drove", "driven", "buy", "buys", "bought", "wear", "wore", "worn", "choose",
        "chose", "chosen", "eat", "eats", "ate", "eaten", "win", "wins", "won", "sell", "sells",
        "sold", "teach", "teaches", "taught", "catch", "catches", "caught", "fight", "fought",
        "fly", "flew", "flown", "sing", "sang", "sung", "swim", "swam", "throw", "threw", "thrown",
        "sleep", "slept", "say", "says", "said", "put", "want", "wants", "live", "lives", "seem",
        "seems", "ask", "asks", "happen", "include", "includes", "continue", "learn", "follow",
        "create", "remember", "consider", "appear", "serve", "die", "expect", "stay", "reach",
        "kill", "remain", "suggest", "raise", "pass", "decide", "pull", "discover", "invent",
        "develop", "own", "contain", "join", "produce", "carry", "chase", "chases", "like",
        "likes", "love", "loves", "need", "needs", "enjoy", "believe", "hate", "prefer", "open",
        "close", "kiss", "marry", "founded", "acquire", "acquired", "launch", "launched", "manage",
        "employ", "hire", "bite", "bit", "bitten", "hit", "cut", "read", "shut",
    ]),
    (NV, &[
        "run", "runs", "walk", "walks", "work", "works", "play", "plays", "use", "uses", "show",
        "shows", "call", "calls", "try", "help", "turn", "start", "move", "change", "watch",
        "stop", "offer", "wait", "visit", "study", "report", "love", "need", "jump", "cook",
        "dance", "rain", "snow", "fish", "drink", "sleep", "dream", "plan", "name", "answer",
        "question", "look", "smile", "laugh", "cry", "climb", "paint", "design", "control",
        "support", "attack", "travel", "share", "trade", "release", "produce", "record", "lead",
        "kiss", "hope", "care", "cause", "fear", "score", "chase", "bite",
    ]),
    (N, &[
        "cat", "cats", "dog", "dogs", "mouse", "mice", "man", "men", "woman", "women", "child",
        "children", "people", "person", "time", "year", "years", "day", "days", "way", "thing",
        "things", "world", "life", "hand", "part", "place", "case", "week", "company", "system",
        "program", "government", "number", "night", "point", "house", "home", "water", "room",
        "mother", "father", "area", "money", "story", "fact", "month", "lot", "book", "books",
        "eye", "eyes", "job", "word", "words", "business", "issue", "side", "kind", "head",
        "service", "friend", "friends", "power", "hour", "game", "line", "end", "member", "law",
        "car", "cars", "city", "community", "president", "team", "minute", "idea", "kid", "kids",
        "body", "information", "school", "face", "level", "office", "door", "health", "art",
        "war", "history", "party", "result", "morning", "reason", "research", "girl", "boy",
        "moment", "air", "teacher", "student", "students", "force", "education", "food", "ball",
        "apple", "apples", "bird", "birds", "tree", "trees", "sun", "moon", "sky", "river",
        "country", "state", "market", "product", "products", "data", "software", "computer",
        "phone", "letter", "music", "film", "movie", "table", "chair", "window", "street", "road",
        "town", "village", "king", "queen", "army", "weather", "garden", "milk", "bread",
        "cheese", "horse", "fox", "wolf", "lion", "fruit", "field", "language", "science",
        "university", "hospital", "doctor", "engineer", "scientist", "author", "novel",
        "capital", "population", "island", "mountain", "sea", "ocean", "paper", "theory",
        "energy", "light", "picture", "team", "founder", "ceo", "firm", "bank", "price",
    ]),
    (NA, &[
        "cold", "light", "right", "public", "best", "chief", "standard", "native", "original",
        "individual", "average", "giant",
    ]),
    (A, &[
        "good", "new", "first", "last", "long", "great", "little", "own", "other", "old", "big",
        "high", "different", "small", "large", "next", "early", "young", "important", "few",
        "bad", "same", "able", "hot", "warm", "happy", "sad", "red", "blue", "green", "black",
        "white", "yellow", "brown", "free", "full", "real", "sure", "late", "hard", "easy",
        "strong", "weak", "better", "worse", "worst", "main", "major", "whole", "clear", "fast",
        "slow", "quick", "lazy", "rich", "poor", "dark", "bright", "beautiful", "famous",
        "popular", "ready", "wet", "dry", "tall", "short", "huge", "tiny", "nice", "kind",
        "angry", "busy", "empty", "heavy", "safe", "wild", "quiet", "loud", "deep", "wide",
        "certain", "likely", "open", "close", "national", "local", "social", "political",
        "economic", "international", "several", "many", "much", "more", "most", "less", "such",
    ]),
];

/// Case-insensitive word → candidate tag index.
#[derive(Debug, Clone)]
pub struct LexiconIndex {
    words: HashMap<String, TagSet>,
}

impl Default for LexiconIndex {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LexiconIndex {
    /// Built-in table; a word listed in several groups gets the union of their tags.
    pub fn builtin() -> Self {
        let mut words: HashMap<String, TagSet> = HashMap::new();
        for (tags, group) in BUILTIN {
            for word in group.iter() {
                *words.entry((*word).to_string()).or_insert(TagSet::empty()) |= *tags;
            }
        }
        Self { words }
    }

    /// Layers `lexicon` over the current entries. Entries with no tags are ignored.
    pub fn extend(&mut self, lexicon: &Lexicon) {
        for entry in &lexicon.entries {
            let tags: TagSet = entry.tags.iter().copied().collect();
            if tags.is_empty() {
                continue;
            }
            self.words.insert(entry.text.to_lowercase(), tags);
        }
    }

    pub fn lookup(&self, word: &str) -> Option<TagSet> {
        if let Some(tags) = self.words.get(word) {
            return Some(*tags);
        }
        self.words.get(&word.to_lowercase()).copied()
    }

    pub fn contains(&self, word: &str, tag: PosTag) -> bool {
        self.lookup(word).map(|tags| tags.has(tag)).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Validates and decodes a compiled (rkyv) lexicon.
pub fn decode_compiled(bytes: &[u8]) -> Result<Lexicon, EngineError> {
    let mut aligned = AlignedVec::with_capacity(bytes.len());
    aligned.extend_from_slice(bytes);

    let archived = rkyv::check_archived_root::<Lexicon>(&aligned)
        .map_err(|e| EngineError::Corrupt(format!("{:?}", e)))?;

    if archived.version != LEXICON_VERSION {
        return Err(EngineError::Version(archived.version));
    }

    let lexicon: Lexicon = archived
        .deserialize(&mut rkyv::Infallible)
        .unwrap_or_else(|never| match never {});
    Ok(lexicon)
}

pub fn load_compiled(path: &Path) -> Result<Lexicon, EngineError> {
    let bytes = fs::read(path).map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let lexicon = decode_compiled(&bytes)?;
    debug!(path = %path.display(), entries = lexicon.entries.len(), "loaded compiled lexicon");
    Ok(lexicon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use relex_protocol::LexiconEntry;
    use rkyv::to_bytes;

    #[test]
    fn test_builtin_merges_groups() {
        let index = LexiconIndex::builtin();
        let that = index.lookup("that").expect("closed-class word");
        assert!(that.has(PosTag::Det));
        assert!(that.has(PosTag::Pron));
        assert!(that.has(PosTag::Sconj));
        assert_eq!(index.lookup("cat"), Some(TagSet::NOUN));
        assert!(!index.contains("chased", PosTag::Verb));
        assert!(index.contains("Runs", PosTag::Verb));
    }

    #[test]
    fn test_extend_overrides() {
        let mut index = LexiconIndex::builtin();
        index.extend(&Lexicon {
            version: LEXICON_VERSION,
            entries: vec![
                LexiconEntry { text: "Cat".to_string(), tags: vec![PosTag::Propn] },
                LexiconEntry { text: "blorp".to_string(), tags: vec![] },
            ],
        });
        assert_eq!(index.lookup("cat"), Some(TagSet::PROPN));
        assert_eq!(index.lookup("blorp"), None);
    }

    #[test]
    fn test_compiled_lexicon_validation() {
        let lexicon = Lexicon {
            version: LEXICON_VERSION,
            entries: vec![LexiconEntry { text: "zyzzyva".to_string(), tags: vec![PosTag::Noun] }],
        };
        let bytes = to_bytes::<_, 256>(&lexicon).expect("serialize");

        let decoded = decode_compiled(&bytes).expect("valid archive");
        assert_eq!(decoded, lexicon);

        assert!(matches!(decode_compiled(&[1, 2, 3]), Err(EngineError::Corrupt(_))));
    }

    #[test]
    fn test_compiled_lexicon_version_check() {
        let lexicon = Lexicon { version: 99, entries: vec![] };
        let bytes = to_bytes::<_, 256>(&lexicon).expect("serialize");
        assert!(matches!(decode_compiled(&bytes), Err(EngineError::Version(99))));
    }
}
