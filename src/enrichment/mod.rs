pub mod queue;
pub mod types;

pub use queue::EnrichmentQueue;
pub use types::QueueEvent;

use crate::{
    core::{
        errors::LexiflowError,
        models::Question,
        utils::new_id,
    },
    llm::WordEnricher,
    store::SharedStore,
};

/// Generate one more practice question for an existing word and append it to
/// the word's question list. A one-off call outside the queue: the caller
/// awaits the result directly.
pub async fn generate_additional_question(
    store: &SharedStore,
    enricher: &dyn WordEnricher,
    word_id: &str,
) -> Result<Question, LexiflowError> {
    let original = {
        let store = store.lock().unwrap();
        store
            .words
            .get(word_id)
            .map(|w| w.original.clone())
            .ok_or_else(|| LexiflowError::Custom(format!("unknown word id: {}", word_id)))?
    };

    let generated = enricher.generate_question(&original).await?;
    let question = Question {
        id: new_id(),
        sentence: generated.sentence,
        translation: generated.translation,
        cloze: generated.cloze,
    };

    store.lock().unwrap().add_question(word_id, question.clone());
    Ok(question)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::{
        core::{
            models::Word,
            utils::{
                now_ms,
                CLOZE_BLANK,
            },
        },
        llm::types::{
            Evaluation,
            GeneratedQuestion,
            GeneratedWord,
        },
        store::{
            shared,
            VocabularyStore,
        },
    };

    struct QuestionOnly;

    #[async_trait]
    impl WordEnricher for QuestionOnly {
        async fn generate_word_data(&self, _word: &str) -> Result<GeneratedWord, LexiflowError> {
            Err(LexiflowError::Enrichment("not used".to_string()))
        }

        async fn generate_question(
            &self,
            word: &str,
        ) -> Result<GeneratedQuestion, LexiflowError> {
            Ok(GeneratedQuestion {
                sentence: format!("Another sentence with {}.", word),
                translation: "另一個例句。".to_string(),
                cloze: format!("Another sentence with {}.", CLOZE_BLANK),
            })
        }

        async fn evaluate_answer(
            &self,
            _target_word: &str,
            _user_input: &str,
            _sentence: &str,
        ) -> Result<Evaluation, LexiflowError> {
            Err(LexiflowError::Evaluation("not used".to_string()))
        }
    }

    #[tokio::test]
    async fn appends_a_generated_question_with_a_fresh_id() {
        let mut store = VocabularyStore::new();
        store.add_word(Word {
            id: "w1".to_string(),
            original: "keen".to_string(),
            word_translation: "敏銳的".to_string(),
            questions: Vec::new(),
            enabled: true,
            added_at: now_ms(),
            category_ids: Vec::new(),
        });
        let store = shared(store);

        let question =
            generate_additional_question(&store, &QuestionOnly, "w1").await.unwrap();

        assert!(!question.id.is_empty());
        let store = store.lock().unwrap();
        let word = store.words.get("w1").unwrap();
        assert_eq!(word.questions.len(), 1);
        assert_eq!(word.questions[0], question);
    }

    #[tokio::test]
    async fn unknown_word_id_is_an_error() {
        let store = shared(VocabularyStore::new());
        let result = generate_additional_question(&store, &QuestionOnly, "ghost").await;
        assert!(matches!(result, Err(LexiflowError::Custom(_))));
    }
}
