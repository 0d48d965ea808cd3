use serde::{
    Deserialize,
    Serialize,
};

use crate::core::{
    models::{
        Question,
        Word,
    },
    utils::{
        new_id,
        now_ms,
    },
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestion {
    pub sentence: String,
    pub translation: String,
    pub cloze: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedWord {
    pub original: String,
    pub word_translation: String,
    pub questions: Vec<GeneratedQuestion>,
}

impl GeneratedWord {
    /// Promote generated data to a full vocabulary entry: fresh ids, enabled,
    /// timestamped now, no category membership yet.
    pub fn into_word(self) -> Word {
        Word {
            id: new_id(),
            original: self.original,
            word_translation: self.word_translation,
            questions: self
                .questions
                .into_iter()
                .map(|q| Question {
                    id: new_id(),
                    sentence: q.sentence,
                    translation: q.translation,
                    cloze: q.cloze,
                })
                .collect(),
            enabled: true,
            added_at: now_ms(),
            category_ids: Vec::new(),
        }
    }
}

/// Flat wire shape the word-data prompt asks the model for. Carries a single
/// example sentence that becomes the word's first question.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawWordData {
    pub original: String,
    pub sentence: String,
    pub translation: String,
    pub word_translation: String,
    pub cloze: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvaluationKind {
    Correct,
    Typo,
    WrongMeaning,
    Unrelated,
    CloseSynonym,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub is_correct: bool,
    #[serde(rename = "type")]
    pub kind: EvaluationKind,
    pub feedback: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::utils::CLOZE_BLANK;

    #[test]
    fn into_word_assigns_fresh_ids_and_enables() {
        let generated = GeneratedWord {
            original: "keen".to_string(),
            word_translation: "敏銳的".to_string(),
            questions: vec![GeneratedQuestion {
                sentence: "She has a keen eye for detail.".to_string(),
                translation: "她對細節有敏銳的眼光。".to_string(),
                cloze: format!("She has a {} eye for detail.", CLOZE_BLANK),
            }],
        };

        let word = generated.into_word();
        assert!(!word.id.is_empty());
        assert!(word.enabled);
        assert!(word.category_ids.is_empty());
        assert_eq!(word.questions.len(), 1);
        assert!(!word.questions[0].id.is_empty());
        assert_ne!(word.id, word.questions[0].id);
    }

    #[test]
    fn evaluation_parses_wire_shape() {
        let json = r#"{"isCorrect": false, "type": "TYPO", "feedback": "差一個字母。"}"#;
        let evaluation: Evaluation = serde_json::from_str(json).unwrap();
        assert!(!evaluation.is_correct);
        assert_eq!(evaluation.kind, EvaluationKind::Typo);
    }
}
