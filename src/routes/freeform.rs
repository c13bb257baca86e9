use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use crate::services::model_service::{ModelError, ModelService};

#[derive(Debug, Deserialize)]
pub struct FreeformRequest {
    #[serde(default)]
    pub prompt: String,
}

/// Canned plan served when no model credential is configured, so the
/// endpoint stays demoable without a key.
fn mock_plan(prompt: &str) -> String {
    format!(
        "Trip Plan (Mock)\n\nRequest: {}\n\nDay 1: Arrival and City Stroll\n- Check in to your \
         hotel\n- Evening walk around the main square\n\nDay 2: Landmarks\n- Visit two iconic \
         sights in the morning\n- Lunch at a local eatery\n- Museum in the afternoon\n\nDay 3: \
         Day Trip\n- Scenic train ride to nearby town\n- Explore markets and viewpoints\n\nDay \
         4: Food & Culture\n- Cooking class or food tour\n- Sunset viewpoint\n\nDay 5: Free day \
         & Departure\n- Souvenir shopping\n- Head to airport\n\nBudget Tips:\n- Use transit \
         passes\n- Book attractions online for discounts",
        prompt
    )
}

/*
    POST /api/freeform-plan
*/
pub async fn freeform_plan(input: web::Json<FreeformRequest>) -> impl Responder {
    let prompt = input.into_inner().prompt;
    if prompt.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({ "error": "Prompt is required" }));
    }

    let model = match ModelService::new() {
        Ok(model) => model,
        Err(ModelError::EnvironmentError(_)) => {
            // No credential configured: degrade to the mock itinerary.
            return HttpResponse::Ok().json(json!({ "plan": mock_plan(&prompt) }));
        }
        Err(err) => {
            eprintln!("Model service unavailable: {}", err);
            return HttpResponse::InternalServerError().json(json!({ "error": err.to_string() }));
        }
    };

    match model.freeform_plan(&prompt).await {
        Ok(plan) => HttpResponse::Ok().json(json!({ "plan": plan })),
        Err(err) => {
            eprintln!("Freeform plan generation failed: {}", err);
            HttpResponse::InternalServerError()
                .json(json!({ "error": "LLM error", "detail": err.to_string() }))
        }
    }
}
