//! Lexical-shape helpers shared by the scorer, feature extractor, and rules.

/// Check whether a text run is recognizably Western script: case-shape
/// features are only meaningful for runs whose letters are mostly Latin.
pub(crate) fn is_western(text: &str) -> bool {
    let letters: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.is_empty() {
        return false;
    }
    let latin = letters
        .iter()
        .filter(|c| c.is_ascii_alphabetic() || matches!(**c as u32, 0xC0..=0x24F))
        .count();
    latin * 2 > letters.len()
}

/// All alphabetic characters are uppercase (and at least one letter exists).
pub(crate) fn is_all_caps(text: &str) -> bool {
    let mut has_letter = false;
    for c in text.chars().filter(|c| c.is_alphabetic()) {
        has_letter = true;
        if !c.is_uppercase() {
            return false;
        }
    }
    has_letter
}

/// Every word starts with an uppercase letter followed by no further
/// uppercase letters, mirroring `str.istitle` semantics.
pub(crate) fn is_title_case(text: &str) -> bool {
    let mut saw_word = false;
    for word in text.split(|c: char| !c.is_alphanumeric()) {
        let mut chars = word.chars().filter(|c| c.is_alphabetic());
        match chars.next() {
            Some(first) => {
                if !first.is_uppercase() {
                    return false;
                }
                if chars.any(|c| c.is_uppercase()) {
                    return false;
                }
                saw_word = true;
            }
            None => continue,
        }
    }
    saw_word
}

/// A bare numeral token like "7" or "12.".
pub(crate) fn is_bare_numeral(text: &str) -> bool {
    let trimmed = text.trim().trim_end_matches('.');
    !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_western() {
        assert!(is_western("Introduction"));
        assert!(is_western("Résumé of results"));
        assert!(!is_western("第一章 概要"));
        assert!(!is_western("123 456"));
    }

    #[test]
    fn test_is_all_caps() {
        assert!(is_all_caps("INTRODUCTION"));
        assert!(is_all_caps("SECTION 2"));
        assert!(!is_all_caps("Introduction"));
        assert!(!is_all_caps("1234"));
    }

    #[test]
    fn test_is_title_case() {
        assert!(is_title_case("The Quick Brown Fox"));
        assert!(!is_title_case("The quick brown fox"));
        assert!(!is_title_case("THE QUICK"));
        assert!(!is_title_case("..."));
    }

    #[test]
    fn test_is_bare_numeral() {
        assert!(is_bare_numeral("7"));
        assert!(is_bare_numeral("12."));
        assert!(!is_bare_numeral("7a"));
        assert!(!is_bare_numeral(""));
    }
}
