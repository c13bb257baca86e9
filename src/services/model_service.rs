use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::error::Error;
use std::fmt;

use crate::models::chat::{ChatMessage, MessageRole};

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 2000;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ApiMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ApiMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug)]
pub enum ModelError {
    EnvironmentError(String),
    HttpError(reqwest::Error),
    ApiError(String),
    EmptyResponse,
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::EnvironmentError(msg) => write!(f, "Environment error: {}", msg),
            ModelError::HttpError(err) => write!(f, "HTTP error: {}", err),
            ModelError::ApiError(msg) => write!(f, "Model API error: {}", msg),
            ModelError::EmptyResponse => write!(f, "Empty response from AI"),
        }
    }
}

impl Error for ModelError {}

impl From<reqwest::Error> for ModelError {
    fn from(err: reqwest::Error) -> Self {
        ModelError::HttpError(err)
    }
}

/// Client for the hosted OpenAI-compatible chat-completions endpoint. One
/// network call per invocation, fixed sampling configuration, no retries; a
/// failed or empty call surfaces as a ModelError for the route to map.
#[derive(Clone)]
pub struct ModelService {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl ModelService {
    pub fn new() -> Result<Self, ModelError> {
        let api_key = env::var("GROQ_API_KEY")
            .map_err(|_| ModelError::EnvironmentError("GROQ_API_KEY not set".to_string()))?;
        let base_url = env::var("MODEL_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = env::var("MODEL_NAME").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self {
            client: Client::new(),
            api_key,
            base_url,
            model,
        })
    }

    /// Sends the system template plus the full turn history and returns the
    /// trimmed text of the first completion choice.
    pub async fn chat_completion(
        &self,
        system_prompt: &str,
        messages: &[ChatMessage],
    ) -> Result<String, ModelError> {
        let mut api_messages = Vec::with_capacity(messages.len() + 1);
        api_messages.push(ApiMessage {
            role: "system",
            content: system_prompt.to_string(),
        });
        for message in messages {
            api_messages.push(ApiMessage {
                role: match message.role {
                    MessageRole::User => "user",
                    MessageRole::Assistant => "assistant",
                },
                content: message.content.clone(),
            });
        }

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: api_messages,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::ApiError(format!(
                "status {}: {}",
                status, body
            )));
        }

        let completion: ChatCompletionResponse = response.json().await?;
        let raw = completion
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .map(|content| content.trim().to_string())
            .unwrap_or_default();

        if raw.is_empty() {
            return Err(ModelError::EmptyResponse);
        }

        log::debug!("AI raw response: {}", raw);
        Ok(raw)
    }

    /// Single-shot plan generation for the freeform endpoint: plain prose in,
    /// plain prose out.
    pub async fn freeform_plan(&self, prompt: &str) -> Result<String, ModelError> {
        let instruction = "You are a travel planner. Based on the user's request, produce a \
                           concise, day-by-day trip plan with headings and bullet points. Keep \
                           it practical and organized.";
        self.chat_completion(instruction, &[ChatMessage::user(prompt)])
            .await
    }
}
