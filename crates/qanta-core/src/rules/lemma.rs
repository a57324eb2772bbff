//! Singular-noun lemmatization for the head word of a candidate.
//!
//! Quiz bowl answers are often plural ("Great Lakes" is fine, "Ents" is not).
//! The final word is reduced to a singular form with an irregular table and
//! noun suffix rules. There is no dictionary to confirm the result, so words
//! that look singular already are left alone.

/// Irregular plurals (lower case)
const IRREGULAR: &[(&str, &str)] = &[
    ("children", "child"),
    ("people", "person"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("oxen", "ox"),
    ("lice", "louse"),
    ("dice", "die"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
];

/// Words ending in "s" that are not plurals
const INVARIANT: &[&str] = &[
    "series",
    "species",
    "news",
    "means",
    "physics",
    "mathematics",
    "economics",
    "politics",
    "ethics",
    "athletics",
    "mumps",
    "measles",
];

/// Stems whose "-men" plural becomes "-man". Other words ending in "men"
/// (Carmen, Yemen, abdomen) are left alone.
const MAN_STEMS: &[&str] = &[
    "wo", "fire", "fisher", "police", "gentle", "horse", "crafts", "states", "sea", "spokes",
    "chair", "free", "alder", "frontiers", "minute", "highway", "country", "kins", "noble",
    "trades", "work", "yeo", "line", "congress", "sales", "business", "mer", "snow",
];

/// Suffix rewrites, checked in order
const SUFFIXES: &[(&str, &str)] = &[
    ("sses", "ss"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("zzes", "zz"),
    ("xes", "x"),
    ("ies", "y"),
    ("s", ""),
];

const MIN_WORD_LEN: usize = 4;

/// Singular form of a single word, or `None` if it already looks singular
fn singular_word(word: &str) -> Option<String> {
    if word.len() < MIN_WORD_LEN || !word.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let lower = word.to_ascii_lowercase();
    if INVARIANT.contains(&lower.as_str()) {
        return None;
    }

    if let Some((_, singular)) = IRREGULAR.iter().find(|(plural, _)| *plural == lower) {
        return Some(match_case(word, singular));
    }

    if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
        return None;
    }

    if let Some(stem) = lower.strip_suffix("men") {
        if MAN_STEMS.contains(&stem) {
            return Some(format!("{}man", &word[..stem.len()]));
        }
    }

    SUFFIXES.iter().find_map(|(suffix, replacement)| {
        lower.strip_suffix(suffix).map(|stem| {
            // Keep the original spelling of the stem
            format!("{}{}", &word[..stem.len()], replacement)
        })
    })
}

/// Apply the capitalisation of `like` to `word`
fn match_case(like: &str, word: &str) -> String {
    let mut chars = word.chars();
    match (like.chars().next(), chars.next()) {
        (Some(first), Some(c)) if first.is_ascii_uppercase() => {
            c.to_ascii_uppercase().to_string() + chars.as_str()
        }
        _ => word.to_string(),
    }
}

/// Reduce the last word of `text` to its singular form.
///
/// Returns the input unchanged when nothing applies.
pub fn singularize(text: &str) -> String {
    let (head, last) = match text.rsplit_once(' ') {
        Some((head, last)) => (Some(head), last),
        None => (None, text),
    };

    match (singular_word(last), head) {
        (Some(singular), Some(head)) => format!("{head} {singular}"),
        (Some(singular), None) => singular,
        (None, _) => text.to_string(),
    }
}
