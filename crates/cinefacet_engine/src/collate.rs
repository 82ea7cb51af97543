use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Compare two titles the way a locale-aware collator would, in levels:
///
/// 1. base letters ignoring case and accents (`é` sorts with `e`, `æ` as `ae`),
///    with whitespace before punctuation and symbols, then digits, then letters
/// 2. accents (`resume` before `résumé`)
/// 3. case, lowercase first (`ace` before `Ace`)
/// 4. raw code points, so distinct strings never compare equal
///
/// Precomposed and decomposed accents compare the same on the first three levels.
/// Scripts other than Latin fall back to code point order within the letter class.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(primary_key(b))
        .then_with(|| accent_key(a).cmp(accent_key(b)))
        .then_with(|| case_key(a).cmp(case_key(b)))
        .then_with(|| a.cmp(b))
}

fn primary_key(s: &str) -> impl Iterator<Item = (u8, char)> + '_ {
    s.nfd()
        .filter(|&c| !is_combining_mark(c))
        .flat_map(char::to_lowercase)
        .flat_map(expand_letter)
        .map(|c| (char_class(c), c))
}

fn accent_key(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

/// Uppercase letters sort after their lowercase forms.
fn case_key(s: &str) -> impl Iterator<Item = bool> + '_ {
    s.nfd().map(char::is_uppercase)
}

fn char_class(c: char) -> u8 {
    if c.is_whitespace() {
        0
    } else if c.is_alphabetic() {
        3
    } else if c.is_numeric() {
        2
    } else {
        1
    }
}

/// Letters that canonical decomposition leaves alone but collators treat as
/// their base letters (or letter pairs).
fn expand_letter(c: char) -> impl Iterator<Item = char> {
    let (first, second) = match c {
        'æ' => ('a', Some('e')),
        'œ' => ('o', Some('e')),
        'ß' => ('s', Some('s')),
        'ø' => ('o', None),
        'ł' => ('l', None),
        'đ' => ('d', None),
        other => (other, None),
    };
    std::iter::once(first).chain(second)
}
