use std::sync::LazyLock;

use regex::Regex;

/// Anything that is neither a word character nor whitespace. Unicode-aware, so
/// accented letters survive as part of their word.
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));

/// Normalizes raw text into lowercase word tokens.
///
/// Punctuation is deleted rather than treated as a separator, so `"c++"` becomes
/// `"c"` and `"node.js"` becomes `"nodejs"`. No stemming and no stop-word removal;
/// repeats are kept in order.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    NON_WORD
        .replace_all(&lowered, "")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Tokenizes a comma-separated skills list. Commas become spaces first so
/// `"rust,go"` yields two tokens instead of `"rustgo"`.
pub fn tokenize_skills(skills: &str) -> Vec<String> {
    tokenize(&skills.replace(',', " "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_splits_on_whitespace() {
        assert_eq!(tokenize("Rust  Tokio\tAXUM\n"), vec!["rust", "tokio", "axum"]);
    }

    #[test]
    fn test_strips_punctuation_inside_words() {
        assert_eq!(
            tokenize("Node.js, C++ & CI/CD!"),
            vec!["nodejs", "c", "cicd"]
        );
    }

    #[test]
    fn test_keeps_digits_underscores_and_accents() {
        assert_eq!(
            tokenize("snake_case Python3 Diseño"),
            vec!["snake_case", "python3", "diseño"]
        );
    }

    #[test]
    fn test_keeps_repeated_tokens() {
        assert_eq!(tokenize("go go Go"), vec!["go", "go", "go"]);
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t ").is_empty());
        assert!(tokenize("!!! ... ,,,").is_empty());
    }

    #[test]
    fn test_skills_commas_are_separators() {
        assert_eq!(
            tokenize_skills("python,docker, Kubernetes"),
            vec!["python", "docker", "kubernetes"]
        );
        // Without the skills variant the comma is deleted and the words fuse.
        assert_eq!(tokenize("python,docker"), vec!["pythondocker"]);
    }
}
