//! Canonical operator form for raw user input

use regex::{Captures, Regex};
use std::sync::OnceLock;

static KEYWORDS: OnceLock<Regex> = OnceLock::new();
static OPERATORS: OnceLock<Regex> = OnceLock::new();
static WHITESPACE: OnceLock<Regex> = OnceLock::new();

fn keywords() -> &'static Regex {
    KEYWORDS.get_or_init(|| {
        Regex::new(r"\b(AND|OR|NOT|XOR|TRUE|FALSE)\b").expect("keyword pattern is valid")
    })
}

fn operators() -> &'static Regex {
    OPERATORS.get_or_init(|| Regex::new(r"[&|^~()]").expect("operator pattern is valid"))
}

fn whitespace() -> &'static Regex {
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

/// Symbol that replaces a whole-word keyword
fn keyword_symbol(word: &str) -> &'static str {
    match word {
        "AND" => "&",
        "OR" => "|",
        "NOT" => "~",
        "XOR" => "^",
        "TRUE" => "1",
        "FALSE" => "0",
        _ => unreachable!("keyword pattern only matches known words"),
    }
}

/// Normalize a raw expression.
///
/// Uppercases, swaps whole-word keywords for operator symbols (`OR` inside
/// `ORDER` is left alone), spells `!` as `~`, and puts exactly one space
/// around every operator and parenthesis.
///
/// Normalization never fails: anything it does not recognize is passed
/// through for the parser to reject.
pub fn normalize(raw: &str) -> String {
    let upper = raw.to_uppercase();
    let symbols = keywords().replace_all(&upper, |caps: &Captures| keyword_symbol(&caps[1]));
    let canonical = symbols.replace('!', "~");
    let spaced = operators().replace_all(&canonical, " $0 ");
    whitespace().replace_all(&spaced, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_become_symbols() {
        assert_eq!(normalize("a AND b"), "A & B");
        assert_eq!(normalize("a or not b"), "A | ~ B");
        assert_eq!(normalize("a xor b"), "A ^ B");
        assert_eq!(normalize("true and false"), "1 & 0");
    }

    #[test]
    fn test_spacing_is_canonical() {
        assert_eq!(normalize("(a&b)|~c"), "( A & B ) | ~ C");
        assert_eq!(normalize("   A\t&\n\nB   "), "A & B");
    }

    #[test]
    fn test_bang_is_not() {
        assert_eq!(normalize("!A"), "~ A");
    }

    #[test]
    fn test_keywords_inside_words_untouched() {
        assert_eq!(normalize("ORDER"), "ORDER");
        assert_eq!(normalize("candy"), "CANDY");
        assert_eq!(normalize("NOTE and a"), "NOTE & A");
    }

    #[test]
    fn test_idempotent() {
        let once = normalize("a and (b xor !c)");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }
}
