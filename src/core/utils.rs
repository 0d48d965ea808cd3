use chrono::Utc;
use uuid::Uuid;

/// Blank marker the generation prompts substitute for the target word in cloze text.
pub const CLOZE_BLANK: &str = "__________";

pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Number of blank markers in a cloze sentence. A well-formed cloze has exactly one.
pub fn cloze_blank_count(cloze: &str) -> usize {
    cloze.matches(CLOZE_BLANK).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_cloze_blanks() {
        assert_eq!(cloze_blank_count("She gave a __________ answer."), 1);
        assert_eq!(cloze_blank_count("No blank here."), 0);
        assert_eq!(cloze_blank_count("__________ and __________."), 2);
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(new_id(), new_id());
    }
}
