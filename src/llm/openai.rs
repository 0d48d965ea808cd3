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

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// OpenAI-compatible chat-completions client. A custom `base_url` points it at
/// local servers (llama.cpp, vLLM, Ollama) speaking the same protocol.
pub struct OpenAiEnricher {
    client: Client,
    api_key: String,
    base_url: String,
    model_name: String,
    prompts: PromptTemplates,
}

impl OpenAiEnricher {
    pub fn new(settings: &Settings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        let base_url = settings
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let model_name =
            settings.model_name.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Self {
            client,
            api_key: settings.api_key.clone(),
            base_url,
            model_name,
            prompts: settings.active_prompts(),
        }
    }

    async fn generate_text(&self, prompt: &str) -> Result<String, LexiflowError> {
        let body = serde_json::json!({
            "model": self.model_name,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": 0.7
        });

        let response: ChatCompletionResponse = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| LexiflowError::Enrichment("empty completion response".to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

#[async_trait]
impl WordEnricher for OpenAiEnricher {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let settings = Settings {
            base_url: Some("http://localhost:8000/v1/".to_string()),
            ..Settings::default()
        };
        let enricher = OpenAiEnricher::new(&settings);
        assert_eq!(enricher.base_url, "http://localhost:8000/v1");
    }

    #[test]
    fn missing_overrides_fall_back_to_defaults() {
        let settings = Settings { base_url: None, model_name: None, ..Settings::default() };
        let enricher = OpenAiEnricher::new(&settings);
        assert_eq!(enricher.base_url, DEFAULT_BASE_URL);
        assert_eq!(enricher.model_name, DEFAULT_MODEL);
    }
}
