//! Unicode folding: reduce text to an ASCII-approximate form.
//!
//! Characters are NFKD-decomposed and combining marks dropped, so "é" becomes
//! "e" and "ﬁ" becomes "fi". Whatever is still outside ASCII is transliterated
//! (ß → ss, Ħ → H, Cyrillic and Greek romanised). Characters with no ASCII
//! approximation are removed.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold `text` to its ASCII-approximate form
pub fn fold(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.nfkd() {
        if c.is_ascii() {
            out.push(c);
        } else if is_combining_mark(c) {
            continue;
        } else if let Some(s) = deunicode::deunicode_char(c) {
            out.push_str(s);
        }
    }
    out
}
