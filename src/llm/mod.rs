use std::sync::Arc;

use async_trait::async_trait;

pub mod gemini;
pub mod openai;
pub mod prompts;
pub mod types;

use types::{
    Evaluation,
    GeneratedQuestion,
    GeneratedWord,
    RawWordData,
};

use crate::core::{
    errors::LexiflowError,
    models::{
        LlmProvider,
        Settings,
    },
    utils::cloze_blank_count,
};

/// The external language-model capability the rest of the crate depends on.
/// Every failure surfaces as `Enrichment`/`Evaluation` with no provider detail.
#[async_trait]
pub trait WordEnricher: Send + Sync {
    async fn generate_word_data(&self, word: &str) -> Result<GeneratedWord, LexiflowError>;

    async fn generate_question(&self, word: &str) -> Result<GeneratedQuestion, LexiflowError>;

    async fn evaluate_answer(
        &self,
        target_word: &str,
        user_input: &str,
        sentence: &str,
    ) -> Result<Evaluation, LexiflowError>;
}

pub fn create_enricher(settings: &Settings) -> Arc<dyn WordEnricher> {
    match settings.provider {
        LlmProvider::Gemini => Arc::new(gemini::GeminiEnricher::new(settings)),
        LlmProvider::OpenAi => Arc::new(openai::OpenAiEnricher::new(settings)),
    }
}

/// Models are asked for bare JSON but frequently wrap it in Markdown fences anyway.
fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

fn ensure_single_blank(cloze: &str) -> Result<(), LexiflowError> {
    match cloze_blank_count(cloze) {
        1 => Ok(()),
        n => Err(LexiflowError::Enrichment(format!(
            "generated cloze has {} blank markers, expected exactly 1",
            n
        ))),
    }
}

pub(crate) fn parse_word_data(text: &str) -> Result<GeneratedWord, LexiflowError> {
    let clean = strip_code_fences(text);
    let raw: RawWordData = serde_json::from_str(&clean)
        .map_err(|e| LexiflowError::Enrichment(format!("malformed word data: {}", e)))?;

    let question = GeneratedQuestion {
        sentence: raw.sentence,
        translation: raw.translation,
        cloze: raw.cloze,
    };
    ensure_single_blank(&question.cloze)?;

    Ok(GeneratedWord {
        original: raw.original,
        word_translation: raw.word_translation,
        questions: vec![question],
    })
}

pub(crate) fn parse_question(text: &str) -> Result<GeneratedQuestion, LexiflowError> {
    let clean = strip_code_fences(text);
    let question: GeneratedQuestion = serde_json::from_str(&clean)
        .map_err(|e| LexiflowError::Enrichment(format!("malformed question: {}", e)))?;
    ensure_single_blank(&question.cloze)?;
    Ok(question)
}

pub(crate) fn parse_evaluation(text: &str) -> Result<Evaluation, LexiflowError> {
    let clean = strip_code_fences(text);
    serde_json::from_str(&clean)
        .map_err(|e| LexiflowError::Evaluation(format!("malformed evaluation: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::utils::CLOZE_BLANK;

    #[test]
    fn parses_fenced_word_data() {
        let text = format!(
            "```json\n{{\"original\": \"keen\", \"sentence\": \"She has a keen eye.\", \
             \"translation\": \"她有敏銳的眼光。\", \"wordTranslation\": \"敏銳的\", \
             \"cloze\": \"She has a {} eye.\"}}\n```",
            CLOZE_BLANK
        );

        let generated = parse_word_data(&text).unwrap();
        assert_eq!(generated.original, "keen");
        assert_eq!(generated.questions.len(), 1);
        assert_eq!(generated.questions[0].cloze, format!("She has a {} eye.", CLOZE_BLANK));
    }

    #[test]
    fn rejects_cloze_without_blank() {
        let text = r#"{"original": "keen", "sentence": "s", "translation": "t",
                       "wordTranslation": "w", "cloze": "no blank here"}"#;
        assert!(matches!(parse_word_data(text), Err(LexiflowError::Enrichment(_))));
    }

    #[test]
    fn rejects_cloze_with_two_blanks() {
        let text = format!(
            "{{\"sentence\": \"s\", \"translation\": \"t\", \"cloze\": \"{} and {}\"}}",
            CLOZE_BLANK, CLOZE_BLANK
        );
        assert!(matches!(parse_question(&text), Err(LexiflowError::Enrichment(_))));
    }

    #[test]
    fn evaluation_parse_failure_is_an_evaluation_error() {
        assert!(matches!(parse_evaluation("not json"), Err(LexiflowError::Evaluation(_))));
    }
}
