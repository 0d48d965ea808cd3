use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    core::utils::now_ms,
    llm::prompts::PromptTemplates,
};

/// Sentinel category id meaning "no filter" in the selection state.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub sentence: String,    // Full example sentence containing the word
    pub translation: String, // Translation of the sentence
    pub cloze: String,       // Sentence with the word replaced by the blank marker
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub id: String,
    pub original: String,
    pub word_translation: String,
    pub questions: Vec<Question>,
    pub enabled: bool,
    pub added_at: i64, // Epoch millis
    #[serde(default)]
    pub category_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewOutcome {
    CorrectImmediate,
    CorrectAfterHint,
    WrongGiveUp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub date: i64,
    pub outcome: ReviewOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewItem {
    pub word_id: String,
    pub next_review: i64, // Epoch millis
    pub interval: u32,    // Minutes
    pub review_count: u32,
    #[serde(default)]
    pub wrong_count: u32,
    #[serde(default)]
    pub history: Vec<ReviewRecord>,
}

impl ReviewItem {
    /// A brand-new review record, due immediately.
    pub fn fresh(word_id: String) -> Self {
        Self {
            word_id,
            next_review: now_ms(),
            interval: 0,
            review_count: 0,
            wrong_count: 0,
            history: Vec::new(),
        }
    }
}

/// Per-field update for an embedded question. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuestionPatch {
    pub sentence: Option<String>,
    pub translation: Option<String>,
    pub cloze: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Gemini,
    OpenAi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub provider: LlmProvider,
    pub api_key: String,
    pub base_url: Option<String>,   // For local/custom OpenAI-compatible servers
    pub model_name: Option<String>, // Ditto
    pub concurrency_limit: usize,   // Max parallel enrichment requests, >= 1
    pub use_custom_prompts: bool,
    pub prompts: PromptTemplates,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: LlmProvider::Gemini,
            api_key: String::new(),
            base_url: Some("http://localhost:8000/v1".to_string()),
            model_name: Some("meta-llama/Meta-Llama-3-8B-Instruct".to_string()),
            concurrency_limit: 1,
            use_custom_prompts: false,
            prompts: PromptTemplates::default(),
            theme: Theme::Dark,
        }
    }
}

impl Settings {
    /// The templates enrichment calls should use: the user's overrides when
    /// enabled, the built-in defaults otherwise.
    pub fn active_prompts(&self) -> PromptTemplates {
        if self.use_custom_prompts {
            self.prompts.clone()
        } else {
            PromptTemplates::default()
        }
    }
}

/// Partial settings update. `None` keeps the current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    pub provider: Option<LlmProvider>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model_name: Option<String>,
    pub concurrency_limit: Option<usize>,
    pub use_custom_prompts: Option<bool>,
    pub prompts: Option<PromptTemplates>,
    pub theme: Option<Theme>,
}

impl SettingsPatch {
    pub fn apply(self, settings: &mut Settings) {
        if let Some(provider) = self.provider {
            settings.provider = provider;
        }
        if let Some(api_key) = self.api_key {
            settings.api_key = api_key;
        }
        if let Some(base_url) = self.base_url {
            settings.base_url = Some(base_url);
        }
        if let Some(model_name) = self.model_name {
            settings.model_name = Some(model_name);
        }
        if let Some(limit) = self.concurrency_limit {
            settings.concurrency_limit = limit.max(1);
        }
        if let Some(use_custom) = self.use_custom_prompts {
            settings.use_custom_prompts = use_custom;
        }
        if let Some(prompts) = self.prompts {
            settings.prompts = prompts;
        }
        if let Some(theme) = self.theme {
            settings.theme = theme;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_patch_merges_shallowly() {
        let mut settings = Settings::default();
        let patch = SettingsPatch {
            api_key: Some("sk-test".to_string()),
            concurrency_limit: Some(4),
            ..Default::default()
        };
        patch.apply(&mut settings);

        assert_eq!(settings.api_key, "sk-test");
        assert_eq!(settings.concurrency_limit, 4);
        // Untouched fields keep their defaults.
        assert_eq!(settings.provider, LlmProvider::Gemini);
        assert_eq!(settings.theme, Theme::Dark);
    }

    #[test]
    fn concurrency_limit_never_drops_below_one() {
        let mut settings = Settings::default();
        SettingsPatch { concurrency_limit: Some(0), ..Default::default() }.apply(&mut settings);
        assert_eq!(settings.concurrency_limit, 1);
    }

    #[test]
    fn review_outcome_uses_stored_names() {
        let json = serde_json::to_string(&ReviewOutcome::CorrectAfterHint).unwrap();
        assert_eq!(json, "\"CORRECT_AFTER_HINT\"");

        let parsed: ReviewOutcome = serde_json::from_str("\"WRONG_GIVE_UP\"").unwrap();
        assert_eq!(parsed, ReviewOutcome::WrongGiveUp);
    }

    #[test]
    fn fresh_review_is_due_immediately() {
        let review = ReviewItem::fresh("w1".to_string());
        assert!(review.next_review <= now_ms());
        assert_eq!(review.interval, 0);
        assert_eq!(review.review_count, 0);
        assert!(review.history.is_empty());
    }
}
