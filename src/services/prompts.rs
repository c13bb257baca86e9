use regex::Regex;

use crate::models::chat::{ChatMessage, MessageRole};

/// Trips longer than this are generated in day-range chunks.
pub const CHUNK_THRESHOLD_DAYS: u32 = 7;
pub const CHUNK_SIZE_DAYS: u32 = 4;

/// Step-collection template: one trip-attribute question per turn, answered
/// only as a two-field JSON envelope.
pub const STEP_PROMPT: &str = r#"You are an AI Trip Planner Agent.

You must always respond in JSON format only.
Never send plain text or extra words.

JSON Schema:
{
  "resp": "string - your question for the user",
  "ui": "budget | groupSize | tripDuration | destination | startingLocation | interests | final"
}

Rules:
1. Ask ONE relevant trip-related question at a time.
2. Ask in this order:
   - Starting location (source)
   - Destination
   - Group size
   - Budget
   - Trip duration
   - Travel interests
   - Special requirements
3. Wait for the user's answer before moving on.
4. If information is missing or unclear, ask for clarification.
5. When ready to generate the trip, set "ui" to "final"."#;

/// Final-itinerary template: respond only with the trip_plan schema, no prose.
pub const FINAL_PROMPT: &str = r#"You are a travel assistant.
Generate ONLY a JSON object with this exact schema:
{
  "trip_plan": {
    "destination": "string",
    "duration": "string",
    "origin": "string",
    "budget": "string",
    "group_size": "string",
    "hotels": [
      {
        "hotel_name": "string",
        "hotel_address": "string",
        "price_per_night": "string",
        "hotel_image_url": "string",
        "geo_coordinates": { "latitude": "number", "longitude": "number" },
        "rating": "number",
        "description": "string"
      }
    ],
    "itinerary": [
      {
        "day": "number",
        "day_plan": "string",
        "best_time_to_visit_day": "string",
        "activities": [
          {
            "place_name": "string",
            "place_details": "string",
            "place_image_url": "string",
            "geo_coordinates": { "latitude": "number", "longitude": "number" },
            "place_address": "string",
            "ticket_pricing": "string",
            "time_travel_each_location": "string",
            "best_time_to_visit": "string"
          }
        ]
      }
    ]
  }
}

Rules:
- Respond ONLY with valid JSON.
- No markdown, no explanations."#;

pub fn select_template(is_final: bool) -> &'static str {
    if is_final {
        FINAL_PROMPT
    } else {
        STEP_PROMPT
    }
}

/// First integer found in a free-text duration ("5 Days" -> 5). Missing or
/// unparseable values come back as 0, which selects the unchunked path.
pub fn parse_duration_days(text: &str) -> u32 {
    let re = Regex::new(r"(\d+)").unwrap();
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .unwrap_or(0)
}

/// The requested trip length, taken from the latest user turn that mentions
/// a day count. 0 when no turn does.
pub fn requested_duration(messages: &[ChatMessage]) -> u32 {
    let re = Regex::new(r"(?i)(\d+)\s*[- ]?\s*day").unwrap();
    messages
        .iter()
        .rev()
        .filter(|m| m.role == MessageRole::User)
        .find_map(|m| {
            re.captures(&m.content)
                .and_then(|caps| caps.get(1))
                .and_then(|c| c.as_str().parse::<u32>().ok())
        })
        .unwrap_or(0)
}

/// Inclusive day ranges for chunked generation: 1-4, 5-8, ... None when the
/// trip is short enough for a single call.
pub fn chunk_ranges(duration_days: u32) -> Option<Vec<(u32, u32)>> {
    if duration_days <= CHUNK_THRESHOLD_DAYS {
        return None;
    }

    let mut ranges = Vec::new();
    let mut start = 1;
    while start <= duration_days {
        let end = (start + CHUNK_SIZE_DAYS - 1).min(duration_days);
        ranges.push((start, end));
        start = end + 1;
    }
    Some(ranges)
}

/// Hint appended to the turn history for one chunked call.
pub fn chunk_hint(range: (u32, u32)) -> String {
    format!(
        "Generate ONLY days {} to {} of the itinerary. Respond with the same trip_plan JSON \
         schema, but the itinerary array must cover only days {} through {}. Keep the hotels \
         and scalar fields consistent with the full trip.",
        range.0, range.1, range.0, range.1
    )
}
