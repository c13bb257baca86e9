use std::collections::HashMap;
use std::error::Error;
use std::fmt;

use crate::models::chat::{ChatMessage, MessageRole, StepResponse, UiDirective};
use crate::models::trip::TripPlanEnvelope;

#[derive(Debug)]
pub enum ClassifierError {
    InvalidTripPlan,
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifierError::InvalidTripPlan => {
                write!(f, "Final output is not valid trip plan JSON")
            }
        }
    }
}

impl Error for ClassifierError {}

/// Ranked intent rules, scanned in order against the lowercased reply. The
/// first matching row wins, so "final" beats everything and "budget" beats
/// the broader interest keywords further down.
const INTENT_RULES: [(UiDirective, &[&str]); 7] = [
    (UiDirective::Final, &["final"]),
    (UiDirective::Budget, &["budget", "spend", "price range"]),
    (UiDirective::GroupSize, &["group", "how many people", "traveling with"]),
    (
        UiDirective::TripDuration,
        &["duration", "how many days", "trip length", "how long"],
    ),
    (UiDirective::Destination, &["destination", "where do you want to go"]),
    (UiDirective::StartingLocation, &["starting", "origin", "depart from"]),
    (
        UiDirective::Interests,
        &["interest", "activities", "adventure", "relaxation", "culture", "sightseeing"],
    ),
];

/// Keyword fallback for replies that are not the expected JSON envelope.
pub fn detect_ui_keyword(text: &str) -> Option<UiDirective> {
    let lower = text.to_lowercase();
    for (directive, keywords) in INTENT_RULES.iter() {
        if keywords.iter().any(|keyword| lower.contains(keyword)) {
            return Some(*directive);
        }
    }
    None
}

/// Turns a raw collection-phase model reply into a step response. A valid
/// `{resp, ui}` envelope passes through verbatim; anything else degrades to
/// the keyword rules with the raw text as the reply.
pub fn classify_step_reply(raw: &str) -> StepResponse {
    if let Ok(step) = serde_json::from_str::<StepResponse>(raw) {
        // Both fields must be present for a verbatim passthrough.
        if !step.resp.is_empty() && step.ui.is_some() {
            return step;
        }
    }

    StepResponse {
        resp: raw.to_string(),
        ui: detect_ui_keyword(raw),
    }
}

/// Final-phase replies must carry a trip_plan; anything else is a hard error
/// for this call, never retried.
pub fn classify_final_reply(raw: &str) -> Result<TripPlanEnvelope, ClassifierError> {
    serde_json::from_str::<TripPlanEnvelope>(raw).map_err(|err| {
        log::warn!("Final reply failed to parse as trip plan: {}", err);
        ClassifierError::InvalidTripPlan
    })
}

/// Per-directive memory of answers the user already gave this session,
/// rebuilt from the turn history on every request. When the model re-asks an
/// answered question, the plan handler resubmits the remembered value instead
/// of presenting the widget again.
#[derive(Debug, Default)]
pub struct AnswerMemory {
    answers: HashMap<UiDirective, String>,
}

impl AnswerMemory {
    pub fn from_messages(messages: &[ChatMessage]) -> Self {
        let mut answers = HashMap::new();

        for pair in messages.windows(2) {
            let (question, answer) = (&pair[0], &pair[1]);
            if question.role != MessageRole::Assistant || answer.role != MessageRole::User {
                continue;
            }
            let directive = question
                .ui
                .or_else(|| detect_ui_keyword(&question.content));
            if let Some(directive) = directive {
                if directive != UiDirective::Final
                    && directive != UiDirective::Limit
                    && !answer.content.trim().is_empty()
                {
                    answers.insert(directive, answer.content.clone());
                }
            }
        }

        Self { answers }
    }

    pub fn answer_for(&self, directive: UiDirective) -> Option<&str> {
        self.answers.get(&directive).map(|s| s.as_str())
    }

    pub fn is_answered(&self, directive: UiDirective) -> bool {
        self.answers.contains_key(&directive)
    }
}
