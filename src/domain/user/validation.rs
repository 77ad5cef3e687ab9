//! Pure format predicates for user-supplied text fields.
//!
//! Each predicate takes a nullable string and returns a boolean; `None` is
//! always rejected. These are total functions with no side effects,
//! intended for the transport edge before requests reach the services.
//!
//! The rules are character-class matches with separate length bounds.
//! A username starts with a lowercase ASCII letter followed by lowercase
//! alphanumerics; free-text fields allow ASCII letters, a fixed set of
//! Latin-extended letters, digits, basic punctuation and spaces.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Latin-extended letters permitted in free-text fields.
static EXTENDED_LETTERS: Lazy<HashSet<char>> = Lazy::new(|| {
    ['Č', 'Ć', 'Š', 'Đ', 'Ž', 'č', 'ć', 'š', 'đ', 'ž']
        .into_iter()
        .collect()
});

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 35;
const ABOUT_MIN: usize = 1;
const ABOUT_MAX: usize = 300;
const SECURITY_QUESTION_MIN: usize = 1;
const SECURITY_QUESTION_MAX: usize = 60;

/// True iff the value is a well-formed username: a lowercase ASCII letter
/// followed by lowercase ASCII alphanumerics, 3 to 35 characters total.
pub fn is_valid_username(value: Option<&str>) -> bool {
    let Some(s) = value else {
        return false;
    };
    let count = s.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&count) {
        return false;
    }
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
}

/// True iff the value is well-formed "about" text: permitted characters
/// only, 1 to 300 characters.
pub fn is_valid_about(value: Option<&str>) -> bool {
    is_valid_free_text(value, ABOUT_MIN, ABOUT_MAX)
}

/// True iff the value is a well-formed security question: same character
/// class as "about", 1 to 60 characters.
pub fn is_valid_security_question(value: Option<&str>) -> bool {
    is_valid_free_text(value, SECURITY_QUESTION_MIN, SECURITY_QUESTION_MAX)
}

fn is_valid_free_text(value: Option<&str>, min: usize, max: usize) -> bool {
    let Some(s) = value else {
        return false;
    };
    let count = s.chars().count();
    if !(min..=max).contains(&count) {
        return false;
    }
    s.chars().all(is_free_text_char)
}

fn is_free_text_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || EXTENDED_LETTERS.contains(&c)
        || matches!(c, ',' | '.' | '!' | '?' | ' ' | '\'' | '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn none_is_always_rejected() {
        assert!(!is_valid_username(None));
        assert!(!is_valid_about(None));
        assert!(!is_valid_security_question(None));
    }

    #[test]
    fn accepts_well_formed_usernames() {
        assert!(is_valid_username(Some("abc")));
        assert!(is_valid_username(Some("arthas")));
        assert!(is_valid_username(Some("a2b3c4")));
        assert!(is_valid_username(Some(&format!("a{}", "b".repeat(34)))));
    }

    #[test]
    fn rejects_malformed_usernames() {
        assert!(!is_valid_username(Some("")));
        assert!(!is_valid_username(Some("ab")));
        assert!(!is_valid_username(Some("1abc")));
        assert!(!is_valid_username(Some("Arthas")));
        assert!(!is_valid_username(Some("arth as")));
        assert!(!is_valid_username(Some("arth-as")));
        assert!(!is_valid_username(Some(&"a".repeat(36))));
    }

    #[test]
    fn about_accepts_extended_letters_and_punctuation() {
        assert!(is_valid_about(Some("Paladin of the Silver Hand, 3rd legion!")));
        assert!(is_valid_about(Some("Šđčćž - it's fine?")));
        assert!(is_valid_about(Some("a")));
        assert!(is_valid_about(Some(&"a".repeat(300))));
    }

    #[test]
    fn about_rejects_forbidden_characters_and_lengths() {
        assert!(!is_valid_about(Some("")));
        assert!(!is_valid_about(Some(&"a".repeat(301))));
        assert!(!is_valid_about(Some("semi;colon")));
        assert!(!is_valid_about(Some("tab\there")));
        assert!(!is_valid_about(Some("ümlaut")));
    }

    #[test]
    fn security_question_uses_shorter_bound() {
        assert!(is_valid_security_question(Some(&"q".repeat(60))));
        assert!(!is_valid_security_question(Some(&"q".repeat(61))));
        assert!(is_valid_security_question(Some("Name of my steed?")));
    }

    proptest! {
        #[test]
        fn grammar_conforming_usernames_are_accepted(s in "[a-z][a-z0-9]{2,34}") {
            prop_assert!(is_valid_username(Some(&s)));
        }

        #[test]
        fn usernames_with_uppercase_are_rejected(s in "[a-z][a-z0-9]{1,10}[A-Z][a-z0-9]{0,10}") {
            prop_assert!(!is_valid_username(Some(&s)));
        }

        #[test]
        fn overlong_usernames_are_rejected(s in "[a-z][a-z0-9]{35,60}") {
            prop_assert!(!is_valid_username(Some(&s)));
        }
    }
}
