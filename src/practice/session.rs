use super::srs::calculate_next_review;
use crate::{
    core::models::{
        Question,
        ReviewItem,
        ReviewOutcome,
        Word,
    },
    llm::types::Evaluation,
};

pub const MAX_HINTS: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptPhase {
    /// Cloze shown, answer field open.
    Presented,
    /// The user gave up; the answer is revealed and must be acknowledged.
    Revealed,
    Completed(ReviewOutcome),
}

/// One practice attempt for one word and question. Hints reveal growing
/// prefixes of the answer; a correct submission after any hint downgrades the
/// outcome. A failed evaluation call never reaches this type, so the attempt
/// stays open for a retry.
#[derive(Debug, Clone)]
pub struct PracticeAttempt {
    word: Word,
    question: Question,
    review: ReviewItem,
    hints_used: u8,
    phase: AttemptPhase,
}

impl PracticeAttempt {
    pub fn new(word: Word, question: Question, review: ReviewItem) -> Self {
        Self { word, question, review, hints_used: 0, phase: AttemptPhase::Presented }
    }

    pub fn word(&self) -> &Word {
        &self.word
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn review(&self) -> &ReviewItem {
        &self.review
    }

    pub fn phase(&self) -> &AttemptPhase {
        &self.phase
    }

    pub fn hints_used(&self) -> u8 {
        self.hints_used
    }

    pub fn hints_remaining(&self) -> u8 {
        MAX_HINTS - self.hints_used
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.phase, AttemptPhase::Completed(_))
    }

    /// Take the next hint and return its text, or `None` once hints are
    /// exhausted or the attempt is no longer open.
    pub fn take_hint(&mut self) -> Option<String> {
        if self.phase != AttemptPhase::Presented || self.hints_used >= MAX_HINTS {
            return None;
        }
        self.hints_used += 1;
        Some(self.hint_text())
    }

    /// Prefix of the answer revealed by the hints taken so far: one character,
    /// two characters, then half the word (rounded up).
    pub fn hint_text(&self) -> String {
        let chars: Vec<char> = self.word.original.chars().collect();
        let visible = match self.hints_used {
            0 => return String::new(),
            1 => 1,
            2 => 2,
            _ => (chars.len() + 1) / 2,
        };

        let prefix: String = chars.into_iter().take(visible).collect();
        format!("{}...", prefix)
    }

    /// Apply a completed evaluation. A correct answer finishes the attempt and
    /// returns the updated review; an incorrect one leaves it open for retry.
    pub fn submit(&mut self, evaluation: &Evaluation) -> Option<ReviewItem> {
        if self.phase != AttemptPhase::Presented || !evaluation.is_correct {
            return None;
        }

        let outcome = if self.hints_used > 0 {
            ReviewOutcome::CorrectAfterHint
        } else {
            ReviewOutcome::CorrectImmediate
        };
        let updated = calculate_next_review(&self.review, outcome);
        self.review = updated.clone();
        self.phase = AttemptPhase::Completed(outcome);
        Some(updated)
    }

    /// Give up: the interval update applies immediately, but the attempt only
    /// completes after `acknowledge`, so the revealed answer stays on screen.
    pub fn give_up(&mut self) -> Option<ReviewItem> {
        if self.phase != AttemptPhase::Presented {
            return None;
        }
        let updated = calculate_next_review(&self.review, ReviewOutcome::WrongGiveUp);
        self.review = updated.clone();
        self.phase = AttemptPhase::Revealed;
        Some(updated)
    }

    pub fn acknowledge(&mut self) -> bool {
        if self.phase == AttemptPhase::Revealed {
            self.phase = AttemptPhase::Completed(ReviewOutcome::WrongGiveUp);
            true
        } else {
            false
        }
    }
}
