use std::{
    collections::{
        HashMap,
        VecDeque,
    },
    sync::{
        Arc,
        Mutex,
    },
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::{
    models::{
        Category,
        Question,
        QuestionPatch,
        ReviewItem,
        Settings,
        SettingsPatch,
        Word,
        ALL_CATEGORIES,
    },
    utils::{
        new_id,
        now_ms,
    },
};

/// The store is shared between the enrichment queue and user-facing callers.
/// Every mutation below runs under a single lock acquisition with no await,
/// which keeps each operation atomic.
pub type SharedStore = Arc<Mutex<VocabularyStore>>;

pub fn shared(store: VocabularyStore) -> SharedStore {
    Arc::new(Mutex::new(store))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Partial snapshot accepted by `import_data`. Absent collections are empty
/// and merge as no-ops.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportData {
    pub words: HashMap<String, Word>,
    pub categories: HashMap<String, Category>,
    pub reviews: HashMap<String, ReviewItem>,
    pub settings: Option<Settings>,
    pub selected_category_ids: Option<Vec<String>>,
    pub category_order: Vec<String>,
}

/// Single source of truth for all vocabulary state. Serializes as the
/// persisted document shape (camelCase keys).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VocabularyStore {
    pub words: HashMap<String, Word>,
    pub categories: HashMap<String, Category>,
    pub reviews: HashMap<String, ReviewItem>,
    pub settings: Settings,
    pub processing_queue: VecDeque<String>, // Word strings waiting for enrichment, FIFO
    pub active_queue: Vec<String>,          // Word strings currently in flight
    pub selected_category_ids: Vec<String>, // Multi-select filter, sentinel "all"
    pub category_order: Vec<String>,        // Display order of category ids
}

impl Default for VocabularyStore {
    fn default() -> Self {
        Self {
            words: HashMap::new(),
            categories: HashMap::new(),
            reviews: HashMap::new(),
            settings: Settings::default(),
            processing_queue: VecDeque::new(),
            active_queue: Vec::new(),
            selected_category_ids: vec![ALL_CATEGORIES.to_string()],
            category_order: Vec::new(),
        }
    }
}

impl VocabularyStore {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Words ---

    /// Upsert a word and give it a fresh review record due immediately.
    pub fn add_word(&mut self, word: Word) {
        let review = ReviewItem::fresh(word.id.clone());
        self.reviews.insert(word.id.clone(), review);
        self.words.insert(word.id.clone(), word);
    }

    pub fn delete_word(&mut self, id: &str) {
        self.words.remove(id);
        self.reviews.remove(id);
    }

    pub fn clear_all_words(&mut self) {
        self.words.clear();
        self.reviews.clear();
        self.processing_queue.clear();
        self.active_queue.clear();
    }

    pub fn toggle_word_status(&mut self, id: &str) {
        if let Some(word) = self.words.get_mut(id) {
            word.enabled = !word.enabled;
        }
    }

    // --- Questions ---

    pub fn add_question(&mut self, word_id: &str, question: Question) {
        if let Some(word) = self.words.get_mut(word_id) {
            word.questions.push(question);
        }
    }

    pub fn update_question(&mut self, word_id: &str, question_id: &str, patch: QuestionPatch) {
        let Some(word) = self.words.get_mut(word_id) else {
            return;
        };
        let Some(question) = word.questions.iter_mut().find(|q| q.id == question_id) else {
            return;
        };

        if let Some(sentence) = patch.sentence {
            question.sentence = sentence;
        }
        if let Some(translation) = patch.translation {
            question.translation = translation;
        }
        if let Some(cloze) = patch.cloze {
            question.cloze = cloze;
        }
    }

    /// Removing the last question is allowed here; callers wanting a
    /// minimum-one invariant enforce it themselves.
    pub fn delete_question(&mut self, word_id: &str, question_id: &str) {
        if let Some(word) = self.words.get_mut(word_id) {
            word.questions.retain(|q| q.id != question_id);
        }
    }

    // --- Reviews ---

    pub fn update_review(&mut self, review: ReviewItem) {
        self.reviews.insert(review.word_id.clone(), review);
    }

    pub fn reset_word_stats(&mut self, word_id: &str) {
        if let Some(review) = self.reviews.get_mut(word_id) {
            review.next_review = now_ms();
            review.interval = 0;
            review.review_count = 0;
            review.wrong_count = 0;
            review.history.clear();
        }
    }

    /// All reviews due now, soonest first.
    pub fn get_due_reviews(&self) -> Vec<ReviewItem> {
        let now = now_ms();
        let mut due: Vec<ReviewItem> =
            self.reviews.values().filter(|r| r.next_review <= now).cloned().collect();
        due.sort_by_key(|r| r.next_review);
        due
    }

    // --- Categories ---

    pub fn add_category(&mut self, name: &str) -> String {
        let id = new_id();
        let category =
            Category { id: id.clone(), name: name.to_string(), created_at: now_ms() };
        self.categories.insert(id.clone(), category);
        self.category_order.push(id.clone());
        id
    }

    pub fn rename_category(&mut self, id: &str, name: &str) {
        if let Some(category) = self.categories.get_mut(id) {
            category.name = name.to_string();
        }
    }

    /// Cascade: the id disappears from every word, the display order and the
    /// active selection. Words themselves are untouched.
    pub fn delete_category(&mut self, id: &str) {
        if self.categories.remove(id).is_none() {
            return;
        }

        for word in self.words.values_mut() {
            word.category_ids.retain(|c| c != id);
        }
        self.category_order.retain(|c| c != id);
        self.selected_category_ids.retain(|c| c != id);
        if self.selected_category_ids.is_empty() {
            self.selected_category_ids.push(ALL_CATEGORIES.to_string());
        }
    }

    pub fn move_category(&mut self, id: &str, direction: MoveDirection) {
        let Some(index) = self.category_order.iter().position(|c| c == id) else {
            return;
        };
        match direction {
            MoveDirection::Up if index > 0 => self.category_order.swap(index, index - 1),
            MoveDirection::Down if index + 1 < self.category_order.len() => {
                self.category_order.swap(index, index + 1)
            }
            _ => {} // Already at the boundary
        }
    }

    pub fn add_word_to_category(&mut self, word_id: &str, category_id: &str) {
        if let Some(word) = self.words.get_mut(word_id) {
            if !word.category_ids.iter().any(|c| c == category_id) {
                word.category_ids.push(category_id.to_string());
            }
        }
    }

    pub fn remove_word_from_category(&mut self, word_id: &str, category_id: &str) {
        if let Some(word) = self.words.get_mut(word_id) {
            word.category_ids.retain(|c| c != category_id);
        }
    }

    pub fn set_selected_categories(&mut self, ids: Vec<String>) {
        self.selected_category_ids =
            if ids.is_empty() { vec![ALL_CATEGORIES.to_string()] } else { ids };
    }

    // --- Settings ---

    pub fn set_settings(&mut self, patch: SettingsPatch) {
        patch.apply(&mut self.settings);
    }

    // --- Enrichment queue state ---

    /// Append word strings to the pending queue. Duplicates are legal and
    /// processed independently.
    pub fn enqueue_words(&mut self, words: Vec<String>) {
        self.processing_queue.extend(words);
    }

    /// Pop the pending head into the active set and return it.
    pub fn move_to_active(&mut self) -> Option<String> {
        let word = self.processing_queue.pop_front()?;
        self.active_queue.push(word.clone());
        Some(word)
    }

    /// Retire one occurrence of a word from the active set, freeing its slot.
    pub fn complete_processing(&mut self, word: &str) {
        if let Some(index) = self.active_queue.iter().position(|w| w == word) {
            self.active_queue.remove(index);
        }
    }

    // --- Import ---

    /// Merge a partial snapshot. Imported entries win on id collision, nothing
    /// already present is dropped. Queue state in the payload is ignored:
    /// replacing the live pipeline could drop words mid-enrichment.
    pub fn import_data(&mut self, data: ImportData) {
        self.words.extend(data.words);
        self.categories.extend(data.categories);
        self.reviews.extend(data.reviews);

        for id in data.category_order {
            if !self.category_order.contains(&id) {
                self.category_order.push(id);
            }
        }
        // Categories imported without an order entry still need a slot.
        let mut orphaned: Vec<String> = self
            .categories
            .keys()
            .filter(|id| !self.category_order.contains(id))
            .cloned()
            .collect();
        orphaned.sort();
        self.category_order.extend(orphaned);

        if let Some(selection) = data.selected_category_ids {
            self.set_selected_categories(selection);
        }
        if let Some(settings) = data.settings {
            self.settings = settings;
            self.settings.concurrency_limit = self.settings.concurrency_limit.max(1);
        }
    }
}
