use std::ops::Range;
use unicode_normalization::char::{decompose_canonical, is_combining_mark};

/// Straight, curly and angled quote glyphs treated as elision/quotation marks.
pub(crate) const APOSTROPHES: &[char] = &[
    '\'', '"', '\u{2018}', '\u{2019}', '\u{201A}', '\u{201B}', '\u{201C}', '\u{201D}',
    '\u{201E}', '\u{201F}', '\u{00AB}', '\u{00BB}', '\u{2039}', '\u{203A}',
];

pub(crate) fn is_apostrophe(ch: char) -> bool {
    APOSTROPHES.contains(&ch)
}

/// A normalized word together with the byte range it came from in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub span: Range<usize>,
}

enum CharClass {
    WordPart,
    Ignorable,
    Separator,
}

fn classify(ch: char) -> CharClass {
    if is_combining_mark(ch) {
        CharClass::Ignorable
    } else if ch.is_alphanumeric() {
        CharClass::WordPart
    } else {
        // whitespace, apostrophes, hyphens, underscores, zero-width format
        // characters and any other symbol
        CharClass::Separator
    }
}

fn fold_char(ch: char, out: &mut Vec<char>) {
    out.clear();
    for lower in ch.to_lowercase() {
        decompose_canonical(lower, |part| out.push(part));
    }
}

/// Splits `text` into lowercase, accent-free tokens.
///
/// Every step of the folding (lowercasing, canonical decomposition, mark
/// removal, separator detection) looks at a single source character, so each
/// token can report exactly which bytes of `text` produced it.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut span = 0..0;
    let mut folded = Vec::with_capacity(4);

    for (offset, ch) in text.char_indices() {
        let next = offset + ch.len_utf8();
        fold_char(ch, &mut folded);

        for &part in &folded {
            match classify(part) {
                CharClass::WordPart => {
                    if current.is_empty() {
                        span.start = offset;
                    }
                    current.push(part);
                    span.end = next;
                }
                CharClass::Ignorable => {
                    if !current.is_empty() {
                        span.end = next;
                    }
                }
                CharClass::Separator => flush(&mut tokens, &mut current, &span),
            }
        }
    }
    flush(&mut tokens, &mut current, &span);

    tokens
}

fn flush(tokens: &mut Vec<Token>, current: &mut String, span: &Range<usize>) {
    if !current.is_empty() {
        tokens.push(Token {
            text: std::mem::take(current),
            span: span.clone(),
        });
    }
}

/// Lowercases, strips accents, turns quotes/hyphens/punctuation into spaces,
/// turns zero-width characters into word breaks and collapses whitespace.
///
/// The result is idempotent: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    tokenize(text)
        .into_iter()
        .map(|token| token.text)
        .collect::<Vec<_>>()
        .join(" ")
}
