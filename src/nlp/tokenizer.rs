// Sentence and word tokenisation.
// Every piece returned is a slice of the input, so sentences can be matched back verbatim.
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Splits raw text into sentences and words.
pub trait Tokenizer {
    /// Ordered, trimmed sentences. Empty input yields no sentences.
    fn split_sentences<'a>(&self, text: &'a str) -> Vec<&'a str>;

    /// Ordered word tokens, punctuation removed.
    fn split_words<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

// Terminal punctuation, optional closing quotes/brackets, then whitespace or end of text.
static SENTENCE_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([.!?]+["'\u{201D}\u{2019})\]]*)(?:\s+|$)"#).unwrap()
});

static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\p{L}\p{N}']+").unwrap());

static ABBREVIATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "inc", "ltd", "co",
        "corp", "fig", "gen", "gov", "sen", "rep", "rev", "mt", "jan", "feb", "mar",
        "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec", "approx", "dept",
    ]
    .iter()
    .copied()
    .collect()
});

/// Default tokenizer built on a handful of precompiled patterns.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexTokenizer;

impl RegexTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for RegexTokenizer {
    fn split_sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for caps in SENTENCE_END.captures_iter(text) {
            let (whole, terminator) = match (caps.get(0), caps.get(1)) {
                (Some(w), Some(t)) => (w, t),
                _ => continue,
            };

            let punct = terminator
                .as_str()
                .trim_end_matches(|c: char| !matches!(c, '.' | '!' | '?'));
            if punct == "."
                && ends_with_abbreviation(&text[start..terminator.start()], &text[whole.end()..])
            {
                continue;
            }

            push_trimmed(&mut sentences, &text[start..terminator.end()]);
            start = whole.end();
        }

        push_trimmed(&mut sentences, &text[start..]);
        sentences
    }

    fn split_words<'a>(&self, text: &'a str) -> Vec<&'a str> {
        WORD_PATTERN
            .find_iter(text)
            .map(|m| m.as_str().trim_matches('\''))
            .filter(|w| !w.is_empty())
            .collect()
    }
}

fn push_trimmed<'a>(out: &mut Vec<&'a str>, piece: &'a str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        out.push(piece);
    }
}

/// True when the text before a lone period ends in something that is not a sentence end:
/// a known abbreviation, a dotted acronym such as "U.S", or a capital initial that sits
/// next to another initial ("J. K. Rowling"). A lone capital as in "Series A." still ends
/// the sentence.
fn ends_with_abbreviation(before: &str, after: &str) -> bool {
    let mut tokens = before.split_whitespace().rev();
    let word = match tokens.next() {
        Some(w) => w.trim_start_matches(|c: char| !c.is_alphanumeric()),
        None => return false,
    };
    if word.is_empty() {
        return false;
    }

    if is_capital_letter(word) {
        let previous_is_initial = tokens.next().map_or(false, is_initial);
        let next_is_initial = after.split_whitespace().next().map_or(false, is_initial);
        return previous_is_initial || next_is_initial;
    }

    if word.contains('.') && word.chars().all(|c| c.is_alphabetic() || c == '.') {
        return true;
    }

    ABBREVIATIONS.contains(word.to_lowercase().as_str())
}

fn is_capital_letter(word: &str) -> bool {
    let mut chars = word.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase())
}

/// A token like "J." or "(K.".
fn is_initial(token: &str) -> bool {
    token
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .strip_suffix('.')
        .map_or(false, is_capital_letter)
}

/// True for tokens made only of letters and digits.
pub fn is_alphanumeric_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(char::is_alphanumeric)
}

/// Lower-cased, purely alphanumeric words of `text`, in order.
pub fn scorable_words<T: Tokenizer + ?Sized>(tokenizer: &T, text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    tokenizer
        .split_words(&lowered)
        .into_iter()
        .filter(|w| is_alphanumeric_word(w))
        .map(str::to_string)
        .collect()
}
