//! Human-readable labels inferred from field names.

use std::sync::OnceLock;

use regex::Regex;

static WORD_START_REGEX: OnceLock<Regex> = OnceLock::new();
static CASE_BOUNDARY_REGEX: OnceLock<Regex> = OnceLock::new();

fn word_start_regex() -> &'static Regex {
    WORD_START_REGEX.get_or_init(|| {
        Regex::new(r"(.)([A-Z][a-z]+)").expect("word start regex is valid")
    })
}

fn case_boundary_regex() -> &'static Regex {
    CASE_BOUNDARY_REGEX.get_or_init(|| {
        Regex::new(r"([a-z0-9])([A-Z])").expect("case boundary regex is valid")
    })
}

/// Turn a snake_case or camelCase name into a title-cased label.
///
/// ```
/// use signature_fields::infer_prefix;
///
/// assert_eq!(infer_prefix("question_text"), "Question Text");
/// assert_eq!(infer_prefix("camelCaseName"), "Camel Case Name");
/// assert_eq!(infer_prefix("source_URL"), "Source URL");
/// ```
pub fn infer_prefix(name: &str) -> String {
    let snake = word_start_regex().replace_all(name, "${1}_${2}");
    let snake = case_boundary_regex().replace_all(&snake, "${1}_${2}");

    snake
        .split('_')
        .filter(|word| !word.is_empty())
        .map(title_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_word(word: &str) -> String {
    if is_upper(word) {
        return word.to_string();
    }
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

// At least one cased character and none lowercase.
fn is_upper(word: &str) -> bool {
    word.chars().any(char::is_uppercase) && !word.chars().any(char::is_lowercase)
}
