use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, digit1, multispace0, one_of, satisfy},
    combinator::{map, recognize, verify},
    multi::{many0, many1, many_m_n},
    sequence::pair,
    IResult,
};
use crate::token::{RawToken, Span};

fn word_chars(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric())(input)
}

/// Abbreviations that keep their period as part of the word.
pub const TITLES: &[&str] = &[
    "Mr", "Mrs", "Ms", "Dr", "Prof", "Sr", "Jr", "St", "Mt", "Gen", "Col", "Capt", "Lt", "Sgt", "Rev", "vs",
    "etc", "approx", "No",
];

/// "Dr.", "Mrs."
fn title(input: &str) -> IResult<&str, &str> {
    verify(recognize(pair(word_chars, char('.'))), |s: &str| {
        TITLES.contains(&s.trim_end_matches('.'))
    })(input)
}

/// "U.S.", "e.g." - letters each followed by a period.
fn initialism(input: &str) -> IResult<&str, &str> {
    recognize(many_m_n(2, 8, pair(satisfy(|c: char| c.is_alphabetic()), char('.'))))(input)
}

/// "3.5", "1,000" - plain digit runs fall through to `word`.
fn number(input: &str) -> IResult<&str, &str> {
    recognize(pair(digit1, many1(pair(one_of(".,"), digit1))))(input)
}

/// "don't", "well-known", "5th"
fn word(input: &str) -> IResult<&str, &str> {
    recognize(pair(word_chars, many0(pair(one_of("'’-"), word_chars))))(input)
}

fn punct(input: &str) -> IResult<&str, char> {
    satisfy(|c: char| !c.is_alphanumeric() && !c.is_whitespace())(input)
}

pub fn parse_with_spans(original_input: &str) -> Vec<(Span, RawToken)> {
    let mut input = original_input;
    let mut result = Vec::new();

    loop {
        // 1. Skip whitespace
        let (next_input, _) = match multispace0::<&str, nom::error::Error<&str>>(input) {
            Ok(res) => res,
            Err(_) => break,
        };
        input = next_input;

        if input.is_empty() {
            break;
        }

        // 2. Try to match a token
        let parse_res: IResult<&str, RawToken> = alt((
            map(title, RawToken::Word),
            map(initialism, RawToken::Word),
            map(number, RawToken::Number),
            map(word, RawToken::Word),
            map(punct, RawToken::Punct),
        ))(input);

        match parse_res {
            Ok((next_input, token)) => {
                let start = original_input.len() - input.len();
                let len = input.len() - next_input.len();

                result.push((Span::new(start, start + len), token));
                input = next_input;
            }
            Err(_) => {
                // Skip one char to recover (resilient parsing)
                if let Some(c) = input.chars().next() {
                    input = &input[c.len_utf8()..];
                } else {
                    break;
                }
            }
        }
    }

    result
}
