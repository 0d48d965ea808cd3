use std::sync::Arc;

use rand::Rng;

pub mod selection;
pub mod session;
pub mod srs;

pub use selection::{
    PracticeCard,
    WordSelector,
};
pub use session::{
    AttemptPhase,
    PracticeAttempt,
};
pub use srs::calculate_next_review;

use crate::{
    core::{
        errors::LexiflowError,
        models::ReviewItem,
    },
    llm::{
        types::Evaluation,
        WordEnricher,
    },
    store::SharedStore,
};

/// Drives practice against the shared store: draws the next attempt, routes
/// answers through the evaluation call, and writes interval updates back.
pub struct PracticeScheduler {
    store: SharedStore,
    enricher: Arc<dyn WordEnricher>,
    selector: WordSelector,
}

impl PracticeScheduler {
    pub fn new(store: SharedStore, enricher: Arc<dyn WordEnricher>) -> Self {
        Self { store, enricher, selector: WordSelector::new() }
    }

    /// Draw the next word and question under the store's current category
    /// filter. `None` is the empty state, distinct from any error.
    pub fn next_attempt<R: Rng>(&mut self, rng: &mut R) -> Option<PracticeAttempt> {
        let store = self.store.lock().unwrap();
        let card = self.selector.select_next(
            &store.words,
            &store.reviews,
            &store.selected_category_ids,
            rng,
        )?;
        let review = store
            .reviews
            .get(&card.word.id)
            .cloned()
            .unwrap_or_else(|| ReviewItem::fresh(card.word.id.clone()));

        Some(PracticeAttempt::new(card.word, card.question, review))
    }

    /// Evaluate the user's input. When the evaluation call itself fails the
    /// error propagates and neither the attempt nor the review changes; the
    /// user may retry the submission.
    pub async fn submit_answer(
        &self,
        attempt: &mut PracticeAttempt,
        user_input: &str,
    ) -> Result<Evaluation, LexiflowError> {
        let evaluation = self
            .enricher
            .evaluate_answer(
                &attempt.word().original,
                user_input,
                &attempt.question().sentence,
            )
            .await?;

        if let Some(updated) = attempt.submit(&evaluation) {
            self.store.lock().unwrap().update_review(updated);
        }
        Ok(evaluation)
    }

    /// Give up on the attempt, persisting the penalty interval immediately.
    pub fn give_up(&self, attempt: &mut PracticeAttempt) {
        if let Some(updated) = attempt.give_up() {
            self.store.lock().unwrap().update_review(updated);
        }
    }
}
