use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{
    parse_evaluation,
    parse_question,
    parse_word_data,
    prompts::{
        self,
        PromptTemplates,
    },
    types::{
        Evaluation,
        GeneratedQuestion,
        GeneratedWord,
    },
    WordEnricher,
};
use crate::core::{
    errors::LexiflowError,
    models::Settings,
};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const GEMINI_MODEL: &str = "gemini-1.5-flash";

pub struct GeminiEnricher {
    client: Client,
    api_key: String,
    prompts: PromptTemplates,
}

impl GeminiEnricher {
    pub fn new(settings: &Settings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, api_key: settings.api_key.clone(), prompts: settings.active_prompts() }
    }

    async fn generate_text(&self, prompt: &str) -> Result<String, LexiflowError> {
        let url =
            format!("{}/models/{}:generateContent?key={}", GEMINI_BASE_URL, GEMINI_MODEL, self.api_key);

        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response: GenerateContentResponse =
            self.client.post(&url).json(&body).send().await?.json().await?;

        response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| LexiflowError::Enrichment("empty Gemini response".to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: String,
}

#[async_trait]
impl WordEnricher for GeminiEnricher {
    async fn generate_word_data(&self, word: &str) -> Result<GeneratedWord, LexiflowError> {
        let prompt = prompts::render(&self.prompts.generate_data, &[("word", word)]);
        let text = self.generate_text(&prompt).await?;
        parse_word_data(&text)
    }

    async fn generate_question(&self, word: &str) -> Result<GeneratedQuestion, LexiflowError> {
        let prompt = prompts::render(&self.prompts.generate_question, &[("word", word)]);
        let text = self.generate_text(&prompt).await?;
        parse_question(&text)
    }

    async fn evaluate_answer(
        &self,
        target_word: &str,
        user_input: &str,
        sentence: &str,
    ) -> Result<Evaluation, LexiflowError> {
        let prompt = prompts::render(
            &self.prompts.evaluate_answer,
            &[("targetWord", target_word), ("userInput", user_input), ("sentence", sentence)],
        );
        let text = self
            .generate_text(&prompt)
            .await
            .map_err(|e| LexiflowError::Evaluation(e.to_string()))?;
        parse_evaluation(&text)
    }
}
