//! Expansion rules: alternate phrasings of one answer.
//!
//! Each rule sees the raw answer and returns zero or more candidates. Rules
//! are independent of each other; the engine accumulates their output.

use crate::fold::fold;
use once_cell::sync::Lazy;
use regex::Regex;

static OR_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z]+or[^a-zA-Z]+").expect("valid or-separator pattern"));

static PROMPT_PAREN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+)\(.*(?:accept|prompt|pronounce).*\)").expect("valid prompt pattern")
});

static PROMPT_BRACKET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+)\[.*(?:accept|prompt|pronounce).*\]").expect("valid prompt pattern")
});

static OR_PAREN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+)\(.*or.*\)").expect("valid or-clause pattern"));

static OR_BRACKET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+)\[.*or.*\]").expect("valid or-clause pattern"));

static OPTIONAL_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(.+?\)").expect("valid optional-text pattern"));

/// "X or Y" → ["X", "Y"] when "or" stands between non-letters
pub fn or_split(answer: &str) -> Vec<String> {
    let parts: Vec<&str> = OR_SEPARATOR.split(answer).collect();
    if parts.len() > 1 {
        parts.into_iter().map(|p| p.trim().to_string()).collect()
    } else {
        Vec::new()
    }
}

/// Drop every "the" from the lower-cased answer, or prefix "the " if absent
pub fn the_toggle(answer: &str) -> Vec<String> {
    let lower = answer.to_lowercase();
    if lower.contains("the") {
        vec![lower.replace("the", "")]
    } else {
        vec![format!("the {lower}")]
    }
}

/// Text before a parenthetical/bracketed "accept"/"prompt"/"pronounce" clause,
/// falling back to a parenthetical/bracketed "or" clause
pub fn prompt_extract(answer: &str) -> Vec<String> {
    let lower = answer.to_lowercase();
    let patterns: [&Regex; 2] = if ["accept", "prompt", "pronounce"]
        .iter()
        .any(|w| lower.contains(w))
    {
        [&*PROMPT_PAREN, &*PROMPT_BRACKET]
    } else if lower.contains("or") {
        [&*OR_PAREN, &*OR_BRACKET]
    } else {
        return Vec::new();
    };

    patterns
        .iter()
        .find_map(|re| re.captures(&lower))
        .and_then(|caps| caps.get(1))
        .map(|m| vec![m.as_str().trim().to_string()])
        .unwrap_or_default()
}

/// Typographic apostrophe → straight apostrophe, and → removed
pub fn apostrophe(answer: &str) -> Vec<String> {
    if answer.contains('\u{2019}') {
        vec![
            answer.replace('\u{2019}', "'"),
            answer.replace('\u{2019}', ""),
        ]
    } else {
        Vec::new()
    }
}

/// Remove parenthesis characters, keeping what they enclose
pub fn parens_strip(answer: &str) -> Vec<String> {
    if answer.contains('(') && answer.contains(')') {
        vec![answer.replace(['(', ')'], "")]
    } else {
        Vec::new()
    }
}

pub fn unicode_fold(answer: &str) -> Vec<String> {
    let folded = fold(answer);
    if folded != answer {
        vec![folded]
    } else {
        Vec::new()
    }
}

/// Lower-cased answer with "sir" removed
pub fn sir_strip(answer: &str) -> Vec<String> {
    let lower = answer.to_lowercase();
    if lower.contains("sir") {
        vec![lower.replace("sir", "")]
    } else {
        Vec::new()
    }
}

/// Lower-cased answer with an "answers:"/"answer:" label removed
pub fn answer_label_strip(answer: &str) -> Vec<String> {
    let lower = answer.to_lowercase();
    if lower.contains("answers:") {
        vec![lower.replace("answers:", "")]
    } else if lower.contains("answer:") {
        vec![lower.replace("answer:", "")]
    } else {
        Vec::new()
    }
}

/// Remove the first parenthetical group together with its contents
pub fn optional_text_strip(answer: &str) -> Vec<String> {
    let stripped = OPTIONAL_TEXT.replacen(answer, 1, "");
    if stripped != answer {
        vec![stripped.into_owned()]
    } else {
        Vec::new()
    }
}
