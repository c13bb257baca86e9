use serde::{Deserialize, Serialize};

/// Which input widget the UI should render next, or a terminal signal.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiDirective {
    #[serde(rename = "groupSize")]
    GroupSize,
    #[serde(rename = "budget")]
    Budget,
    #[serde(rename = "tripDuration")]
    TripDuration,
    #[serde(rename = "destination")]
    Destination,
    #[serde(rename = "startingLocation")]
    StartingLocation,
    #[serde(rename = "interests")]
    Interests,
    #[serde(rename = "final")]
    Final,
    #[serde(rename = "limit")]
    Limit,
}

impl UiDirective {
    pub fn as_str(&self) -> &'static str {
        match self {
            UiDirective::GroupSize => "groupSize",
            UiDirective::Budget => "budget",
            UiDirective::TripDuration => "tripDuration",
            UiDirective::Destination => "destination",
            UiDirective::StartingLocation => "startingLocation",
            UiDirective::Interests => "interests",
            UiDirective::Final => "final",
            UiDirective::Limit => "limit",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub enum MessageRole {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
}

/// One turn of the planning conversation. The full ordered list is resent on
/// every model call; the model itself is stateless between calls.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ui: Option<UiDirective>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            ui: None,
        }
    }

    pub fn assistant(content: impl Into<String>, ui: Option<UiDirective>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            ui,
        }
    }
}

/// Body of POST /api/plan-generation.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PlanGenerationRequest {
    pub messages: Vec<ChatMessage>,
    #[serde(rename = "isFinal", default)]
    pub is_final: bool,
}

/// Collection-phase response envelope: the assistant's question plus the
/// widget tag the UI should render.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StepResponse {
    pub resp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ui: Option<UiDirective>,
}
