use actix_web::{web, HttpRequest, HttpResponse, Responder};
use mongodb::Client;
use serde_json::json;
use std::sync::Arc;

use crate::models::chat::{ChatMessage, PlanGenerationRequest, StepResponse, UiDirective};
use crate::models::trip::{TripPlan, TripPlanEnvelope};
use crate::services::assembler::merge_chunks;
use crate::services::classifier::{classify_final_reply, classify_step_reply, AnswerMemory};
use crate::services::image_service::ImageService;
use crate::services::model_service::{ModelError, ModelService};
use crate::services::prompts::{
    chunk_hint, chunk_ranges, requested_duration, FINAL_PROMPT, STEP_PROMPT,
};
use crate::services::quota_service::QuotaService;
use crate::services::trip_service::TripService;

/// Upper bound on auto-answer rounds per request, so a model that keeps
/// re-asking answered questions cannot loop us forever.
const MAX_AUTO_ANSWER_ROUNDS: usize = 3;

const IDENTITY_HEADER: &str = "X-User-Id";
const ANONYMOUS_IDENTITY: &str = "anonymous";

/*
    POST /api/plan-generation
*/
pub async fn plan_generation(
    req: HttpRequest,
    data: web::Data<Arc<Client>>,
    input: web::Json<PlanGenerationRequest>,
) -> impl Responder {
    let client = data.get_ref().clone();
    let request = input.into_inner();

    if request.messages.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "error": "Invalid or empty messages array"
        }));
    }

    if request.is_final {
        let identity = req
            .headers()
            .get(IDENTITY_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(ANONYMOUS_IDENTITY)
            .to_string();

        final_generation(client, request.messages, identity).await
    } else {
        let model = match ModelService::new() {
            Ok(model) => model,
            Err(err) => {
                eprintln!("Model service unavailable: {}", err);
                return HttpResponse::InternalServerError()
                    .json(json!({ "error": err.to_string() }));
            }
        };
        step_collection(model, request.messages).await
    }
}

/// Collection phase: one model call, classifier, then auto-answer rounds for
/// directives the user already answered earlier in the session.
async fn step_collection(model: ModelService, messages: Vec<ChatMessage>) -> HttpResponse {
    let memory = AnswerMemory::from_messages(&messages);
    let mut conversation = messages;

    let mut step = match call_step(&model, &conversation).await {
        Ok(step) => step,
        Err(resp) => return resp,
    };

    for _ in 0..MAX_AUTO_ANSWER_ROUNDS {
        let directive = match step.ui {
            Some(ui) if ui != UiDirective::Final && ui != UiDirective::Limit => ui,
            _ => break,
        };
        let remembered = match memory.answer_for(directive) {
            Some(answer) => answer.to_string(),
            None => break,
        };

        // Resubmit the remembered answer instead of re-presenting the widget.
        log::info!(
            "Auto-answering re-asked {} with remembered value",
            directive.as_str()
        );
        conversation.push(ChatMessage::assistant(step.resp.clone(), step.ui));
        conversation.push(ChatMessage::user(remembered));

        step = match call_step(&model, &conversation).await {
            Ok(step) => step,
            Err(resp) => return resp,
        };
    }

    HttpResponse::Ok().json(step)
}

async fn call_step(
    model: &ModelService,
    conversation: &[ChatMessage],
) -> Result<StepResponse, HttpResponse> {
    match model.chat_completion(STEP_PROMPT, conversation).await {
        Ok(raw) => Ok(classify_step_reply(&raw)),
        Err(ModelError::EmptyResponse) => Err(HttpResponse::BadRequest()
            .json(json!({ "error": ModelError::EmptyResponse.to_string() }))),
        Err(err) => {
            eprintln!("Model call failed: {}", err);
            Err(HttpResponse::InternalServerError().json(json!({ "error": err.to_string() })))
        }
    }
}

/// Final phase: quota gate, then one generation call (or sequential day-range
/// chunks for long trips), then image enrichment.
async fn final_generation(
    client: Arc<Client>,
    messages: Vec<ChatMessage>,
    identity: String,
) -> HttpResponse {
    let trip_service = TripService::new(client.clone());
    let subscriber = match trip_service.find_user(&identity).await {
        Ok(Some(user)) => user.is_subscriber(),
        Ok(None) => false,
        Err(err) => {
            eprintln!("Subscriber lookup failed: {:?}", err);
            false
        }
    };

    if !subscriber {
        let quota = QuotaService::new(client);
        match quota.check_and_consume(&identity).await {
            Ok(true) => {}
            Ok(false) => {
                // Normal response shape, not an error path: the UI renders
                // the limit widget from this envelope.
                return HttpResponse::TooManyRequests().json(json!({
                    "resp": "No Free Credit Remaining",
                    "ui": "limit"
                }));
            }
            Err(err) => {
                eprintln!("Quota check failed: {:?}", err);
                return HttpResponse::InternalServerError()
                    .json(json!({ "error": "Failed to check generation quota" }));
            }
        }
    }

    // The quota decision happens before the model is ever touched; an
    // exhausted bucket skips the call entirely.
    let model = match ModelService::new() {
        Ok(model) => model,
        Err(err) => {
            eprintln!("Model service unavailable: {}", err);
            return HttpResponse::InternalServerError().json(json!({ "error": err.to_string() }));
        }
    };

    let duration = requested_duration(&messages);
    let mut plan = match chunk_ranges(duration) {
        Some(ranges) => match chunked_generation(&model, &messages, ranges).await {
            Ok(plan) => plan,
            Err(resp) => return resp,
        },
        None => match single_generation(&model, &messages).await {
            Ok(plan) => plan,
            Err(resp) => return resp,
        },
    };

    ImageService::from_env().enrich_plan(&mut plan).await;

    HttpResponse::Ok().json(TripPlanEnvelope { trip_plan: plan })
}

async fn single_generation(
    model: &ModelService,
    messages: &[ChatMessage],
) -> Result<TripPlan, HttpResponse> {
    let raw = match model.chat_completion(FINAL_PROMPT, messages).await {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!("Final generation call failed: {}", err);
            return Err(
                HttpResponse::InternalServerError().json(json!({ "error": err.to_string() }))
            );
        }
    };

    match classify_final_reply(&raw) {
        Ok(envelope) => Ok(envelope.trip_plan),
        Err(err) => {
            Err(HttpResponse::InternalServerError().json(json!({ "error": err.to_string() })))
        }
    }
}

/// Issues the day-range calls strictly sequentially and merges what parsed.
/// A chunk that fails is logged and its days dropped; only a fully failed
/// generation surfaces as an error.
async fn chunked_generation(
    model: &ModelService,
    messages: &[ChatMessage],
    ranges: Vec<(u32, u32)>,
) -> Result<TripPlan, HttpResponse> {
    let mut chunks = Vec::with_capacity(ranges.len());

    for range in ranges {
        let mut chunk_messages = messages.to_vec();
        chunk_messages.push(ChatMessage::user(chunk_hint(range)));

        let chunk = match model.chat_completion(FINAL_PROMPT, &chunk_messages).await {
            Ok(raw) => match classify_final_reply(&raw) {
                Ok(envelope) => Some(envelope.trip_plan),
                Err(err) => {
                    eprintln!("Chunk {}-{} unparseable: {}", range.0, range.1, err);
                    None
                }
            },
            Err(err) => {
                eprintln!("Chunk {}-{} call failed: {}", range.0, range.1, err);
                None
            }
        };
        chunks.push(chunk);
    }

    let outcome = merge_chunks(chunks);
    match outcome.plan {
        Some(plan) => Ok(plan),
        None => Err(HttpResponse::InternalServerError().json(json!({
            "error": "Final output is not valid trip plan JSON"
        }))),
    }
}
