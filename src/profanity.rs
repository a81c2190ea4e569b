/// Chirp Content Filter
///
/// Redacts a fixed denylist of words from chirp bodies. Each denylist entry
/// is applied as an independent case-insensitive substring pass, in order;
/// every occurrence is replaced by a fixed 4-character mask. Pure and total.

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

const MASK: &str = "****";

const DENYLIST: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

lazy_static! {
    static ref DENYLIST_PATTERNS: Vec<Regex> = DENYLIST
        .iter()
        .map(|word| {
            RegexBuilder::new(&regex::escape(word))
                .case_insensitive(true)
                .build()
                .expect("denylist entry is not a valid pattern")
        })
        .collect();
}

/// Replaces every case-insensitive occurrence of each denylist word with the
/// mask. Already-filtered text passes through unchanged.
pub fn clean_body(body: &str) -> String {
    let mut result = body.to_string();
    for pattern in DENYLIST_PATTERNS.iter() {
        result = pattern.replace_all(&result, MASK).into_owned();
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_every_denylist_word() {
        assert_eq!(clean_body("kerfuffle"), "****");
        assert_eq!(clean_body("sharbert"), "****");
        assert_eq!(clean_body("fornax"), "****");
    }

    #[test]
    fn is_case_insensitive() {
        assert_eq!(clean_body("KERFUFFLE"), "****");
        assert_eq!(clean_body("ShArBeRt"), "****");
    }

    #[test]
    fn masks_inside_sentences() {
        assert_eq!(
            clean_body("this is a kerfuffle opinion"),
            "this is a **** opinion"
        );
    }

    #[test]
    fn masks_adjacent_punctuation_as_substring() {
        // The pass is a plain substring match, so trailing punctuation stays.
        assert_eq!(clean_body("what a Sharbert!"), "what a ****!");
    }

    #[test]
    fn masks_multiple_words_in_one_body() {
        assert_eq!(
            clean_body("kerfuffle and fornax and sharbert"),
            "**** and **** and ****"
        );
    }

    #[test]
    fn is_idempotent_on_filtered_text() {
        let once = clean_body("a kerfuffle here");
        assert_eq!(clean_body(&once), once);
    }

    #[test]
    fn leaves_clean_text_alone() {
        let body = "I had something interesting for breakfast";
        assert_eq!(clean_body(body), body);
    }

    #[test]
    fn empty_body_stays_empty() {
        assert_eq!(clean_body(""), "");
    }
}
