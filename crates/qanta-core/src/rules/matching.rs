//! Match rules: reformat a candidate immediately before lookup.

use super::lemma::singularize;

/// Remove curly braces
pub fn remove_braces(text: &str) -> String {
    text.replace(['{', '}'], "")
}

/// Remove straight and curly double quotes
pub fn remove_quotes(text: &str) -> String {
    text.replace(['"', '\u{201C}', '\u{201D}'], "")
}

/// Remove parenthesis characters
pub fn remove_parens(text: &str) -> String {
    text.replace(['(', ')'], "")
}

pub fn identity(text: &str) -> Option<String> {
    Some(text.to_string())
}

pub fn braces(text: &str) -> Option<String> {
    Some(remove_braces(text))
}

pub fn quotes(text: &str) -> Option<String> {
    Some(remove_quotes(text))
}

pub fn parens(text: &str) -> Option<String> {
    Some(remove_parens(text))
}

pub fn braces_quotes(text: &str) -> Option<String> {
    Some(remove_quotes(&remove_braces(text)))
}

pub fn braces_plural(text: &str) -> Option<String> {
    Some(singularize(&remove_braces(text)))
}

pub fn braces_quotes_plural(text: &str) -> Option<String> {
    Some(singularize(&remove_quotes(&remove_braces(text))))
}

/// Trim and collapse internal whitespace runs to a single space
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
