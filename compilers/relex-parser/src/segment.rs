//! Sentence boundary detection over the token stream.
//!
//! A sentence ends at `.`, `!` or `?` (plus any adjacent closing quotes,
//! brackets or further terminators) when the next token is separated by
//! whitespace and opens a sentence: an upper-case letter, a digit, or an
//! opening quote/bracket. Titles and initialisms reach this module as single
//! words ("Dr.", "U.S.") and so never end a sentence. Month abbreviations
//! deliberately are not among them.

use crate::parser::parse_with_spans;
use crate::token::RawToken;

fn is_terminator(token: &RawToken) -> bool {
    matches!(token, RawToken::Punct('.' | '!' | '?'))
}

fn is_closer(token: &RawToken) -> bool {
    is_terminator(token) || matches!(token, RawToken::Punct('"' | '\'' | ')' | ']' | '”' | '’'))
}

fn opens_sentence(token: &RawToken) -> bool {
    match token {
        RawToken::Word(w) | RawToken::Number(w) => w
            .chars()
            .next()
            .map(|c| c.is_uppercase() || c.is_ascii_digit())
            .unwrap_or(false),
        RawToken::Punct(c) => matches!(c, '"' | '\'' | '(' | '[' | '“' | '‘'),
    }
}

/// Splits `text` into sentences, returning trimmed slices of the original text in order.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let tokens = parse_with_spans(text);
    let mut sentences = Vec::new();
    let mut start: Option<usize> = None;

    let mut i = 0;
    while i < tokens.len() {
        let (span, raw) = &tokens[i];
        let begin = *start.get_or_insert(span.start);

        if !is_terminator(raw) {
            i += 1;
            continue;
        }

        // Absorb adjacent closers: `?!`, `..."`, `.)`
        let mut end = span.end;
        let mut j = i + 1;
        while j < tokens.len() && tokens[j].0.start == end && is_closer(&tokens[j].1) {
            end = tokens[j].0.end;
            j += 1;
        }

        let boundary = match tokens.get(j) {
            None => true,
            Some((next, raw)) => next.start > end && opens_sentence(raw),
        };

        if boundary {
            sentences.push(&text[begin..end]);
            start = None;
        }
        i = j;
    }

    if let (Some(begin), Some((last, _))) = (start, tokens.last()) {
        sentences.push(&text[begin..last.end]);
    }

    sentences
}
