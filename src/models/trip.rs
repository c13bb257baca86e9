use serde::{Deserialize, Serialize};

/// Envelope the model is instructed to emit in final mode.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TripPlanEnvelope {
    pub trip_plan: TripPlan,
}

/// The structured itinerary produced by final generation. Field names match
/// the wire schema the model is prompted with, so no renames are needed.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TripPlan {
    pub destination: String,
    pub duration: String,
    pub origin: String,
    pub budget: String,
    pub group_size: String,
    #[serde(default)]
    pub hotels: Vec<Hotel>,
    #[serde(default)]
    pub itinerary: Vec<ItineraryDay>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Hotel {
    pub hotel_name: String,
    pub hotel_address: String,
    pub price_per_night: String,
    #[serde(default)]
    pub hotel_image_url: String,
    pub geo_coordinates: GeoCoordinates,
    pub rating: f64,
    pub description: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ItineraryDay {
    pub day: u32,
    pub day_plan: String,
    pub best_time_to_visit_day: String,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Activity {
    pub place_name: String,
    pub place_details: String,
    #[serde(default)]
    pub place_image_url: String,
    pub geo_coordinates: GeoCoordinates,
    pub place_address: String,
    pub ticket_pricing: String,
    pub time_travel_each_location: String,
    pub best_time_to_visit: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Default)]
pub struct GeoCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}
