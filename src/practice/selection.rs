use std::collections::HashMap;

use rand::Rng;

use crate::core::models::{
    Question,
    ReviewItem,
    Word,
    ALL_CATEGORIES,
};

/// Softmax temperature. Lower sharpens the preference for under-practiced and
/// error-prone words; higher flattens toward uniform.
pub const TEMPERATURE: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct PracticeCard {
    pub word: Word,
    pub question: Question,
}

/// Weighted-random word picker with one-step anti-repetition. Holds the
/// previously drawn word id between calls; the random source is injected so
/// tests can seed it.
#[derive(Debug, Default)]
pub struct WordSelector {
    last_word_id: Option<String>,
}

impl WordSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_word_id(&self) -> Option<&str> {
        self.last_word_id.as_deref()
    }

    pub fn reset(&mut self) {
        self.last_word_id = None;
    }

    /// Draw the next word and one of its questions. `None` is the defined
    /// empty state: nothing enabled, nothing with questions, or nothing
    /// matching the category filter.
    pub fn select_next<R: Rng>(
        &mut self,
        words: &HashMap<String, Word>,
        reviews: &HashMap<String, ReviewItem>,
        selected_category_ids: &[String],
        rng: &mut R,
    ) -> Option<PracticeCard> {
        let unfiltered = selected_category_ids.is_empty()
            || selected_category_ids.iter().any(|id| id == ALL_CATEGORIES);

        let mut candidates: Vec<&Word> = words
            .values()
            .filter(|w| w.enabled && !w.questions.is_empty())
            .filter(|w| {
                unfiltered || w.category_ids.iter().any(|c| selected_category_ids.contains(c))
            })
            .collect();

        if candidates.is_empty() {
            return None;
        }

        // Stable order so a seeded rng draws reproducibly.
        candidates.sort_by(|a, b| a.id.cmp(&b.id));

        if candidates.len() > 1 {
            if let Some(last) = &self.last_word_id {
                candidates.retain(|w| &w.id != last);
            }
        }

        let word = Self::weighted_draw(&candidates, reviews, rng);
        let question = word.questions[rng.random_range(0..word.questions.len())].clone();
        self.last_word_id = Some(word.id.clone());

        Some(PracticeCard { word: word.clone(), question })
    }

    fn weighted_draw<'a, R: Rng>(
        candidates: &[&'a Word],
        reviews: &HashMap<String, ReviewItem>,
        rng: &mut R,
    ) -> &'a Word {
        let weights: Vec<f64> = candidates
            .iter()
            .map(|w| {
                let score = reviews
                    .get(&w.id)
                    .map(|r| r.review_count.saturating_sub(r.wrong_count))
                    .unwrap_or(0);
                (-(f64::from(score)) / TEMPERATURE).exp()
            })
            .collect();

        let total: f64 = weights.iter().sum();
        if !total.is_finite() || total <= 0.0 {
            // Every weight underflowed; degrade to a uniform draw.
            return candidates[rng.random_range(0..candidates.len())];
        }

        let mut remainder = rng.random_range(0.0..total);
        for (&candidate, weight) in candidates.iter().zip(&weights) {
            remainder -= weight;
            if remainder < 0.0 {
                return candidate;
            }
        }
        // Floating-point slack can exhaust the walk; the last candidate wins.
        candidates[candidates.len() - 1]
    }
}
