use crate::core::{
    models::{
        ReviewItem,
        ReviewOutcome,
        ReviewRecord,
    },
    utils::now_ms,
};

pub const CORRECT_FLOOR_MINUTES: u32 = 30; // Immediate recall never schedules sooner than this
pub const HINTED_INTERVAL_MINUTES: u32 = 10;
pub const WRONG_INTERVAL_MINUTES: u32 = 5;

/// Fixed-table interval update. Immediate recall doubles the interval with a
/// 30 minute floor; hinted recall and give-ups reset to short flat intervals.
pub fn calculate_next_review(item: &ReviewItem, outcome: ReviewOutcome) -> ReviewItem {
    let now = now_ms();

    let next_interval = match outcome {
        ReviewOutcome::CorrectImmediate => {
            item.interval.saturating_mul(2).max(CORRECT_FLOOR_MINUTES)
        }
        ReviewOutcome::CorrectAfterHint => HINTED_INTERVAL_MINUTES,
        ReviewOutcome::WrongGiveUp => WRONG_INTERVAL_MINUTES,
    };

    let mut updated = item.clone();
    updated.interval = next_interval;
    updated.next_review = now + i64::from(next_interval) * 60_000;
    updated.review_count += 1;
    if outcome == ReviewOutcome::WrongGiveUp {
        updated.wrong_count += 1;
    }
    updated.history.push(ReviewRecord { date: now, outcome });
    updated
}
