use mongodb::bson::oid::ObjectId;
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::models::trip::{Activity, GeoCoordinates, Hotel, ItineraryDay, TripPlan};

/// Top-level trip document. Hotels, days and activities live in their own
/// collections, keyed back to their parent's id with flattened coordinates.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TripRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub destination: String,
    pub duration: String,
    pub origin: String,
    pub budget: String,
    pub group_size: String,
    pub created_at: Option<DateTime>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HotelRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub trip_id: ObjectId,
    pub hotel_name: String,
    pub hotel_address: String,
    pub price_per_night: String,
    pub hotel_image_url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub rating: f64,
    pub description: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ItineraryDayRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub trip_id: ObjectId,
    pub day: u32,
    pub day_plan: String,
    pub best_time_to_visit_day: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ActivityRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub itinerary_day_id: ObjectId,
    pub place_name: String,
    pub place_details: String,
    pub place_image_url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub place_address: String,
    pub ticket_pricing: String,
    pub time_travel_each_location: String,
    pub best_time_to_visit: String,
}

/// A trip reassembled from its child records, as served by the trip routes.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PopulatedTrip {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user_id: ObjectId,
    pub created_at: Option<DateTime>,
    #[serde(flatten)]
    pub plan: TripPlan,
}

impl TripRecord {
    pub fn from_plan(plan: &TripPlan, user_id: ObjectId) -> Self {
        Self {
            id: None,
            user_id,
            destination: plan.destination.clone(),
            duration: plan.duration.clone(),
            origin: plan.origin.clone(),
            budget: plan.budget.clone(),
            group_size: plan.group_size.clone(),
            created_at: Some(DateTime::now()),
        }
    }
}

impl HotelRecord {
    pub fn from_hotel(hotel: &Hotel, trip_id: ObjectId) -> Self {
        Self {
            id: None,
            trip_id,
            hotel_name: hotel.hotel_name.clone(),
            hotel_address: hotel.hotel_address.clone(),
            price_per_night: hotel.price_per_night.clone(),
            hotel_image_url: hotel.hotel_image_url.clone(),
            latitude: hotel.geo_coordinates.latitude,
            longitude: hotel.geo_coordinates.longitude,
            rating: hotel.rating,
            description: hotel.description.clone(),
        }
    }

    pub fn into_hotel(self) -> Hotel {
        Hotel {
            hotel_name: self.hotel_name,
            hotel_address: self.hotel_address,
            price_per_night: self.price_per_night,
            hotel_image_url: self.hotel_image_url,
            geo_coordinates: GeoCoordinates {
                latitude: self.latitude,
                longitude: self.longitude,
            },
            rating: self.rating,
            description: self.description,
        }
    }
}

impl ItineraryDayRecord {
    pub fn from_day(day: &ItineraryDay, trip_id: ObjectId) -> Self {
        Self {
            id: None,
            trip_id,
            day: day.day,
            day_plan: day.day_plan.clone(),
            best_time_to_visit_day: day.best_time_to_visit_day.clone(),
        }
    }

    pub fn into_day(self, activities: Vec<Activity>) -> ItineraryDay {
        ItineraryDay {
            day: self.day,
            day_plan: self.day_plan,
            best_time_to_visit_day: self.best_time_to_visit_day,
            activities,
        }
    }
}

impl ActivityRecord {
    pub fn from_activity(activity: &Activity, itinerary_day_id: ObjectId) -> Self {
        Self {
            id: None,
            itinerary_day_id,
            place_name: activity.place_name.clone(),
            place_details: activity.place_details.clone(),
            place_image_url: activity.place_image_url.clone(),
            latitude: activity.geo_coordinates.latitude,
            longitude: activity.geo_coordinates.longitude,
            place_address: activity.place_address.clone(),
            ticket_pricing: activity.ticket_pricing.clone(),
            time_travel_each_location: activity.time_travel_each_location.clone(),
            best_time_to_visit: activity.best_time_to_visit.clone(),
        }
    }

    pub fn into_activity(self) -> Activity {
        Activity {
            place_name: self.place_name,
            place_details: self.place_details,
            place_image_url: self.place_image_url,
            geo_coordinates: GeoCoordinates {
                latitude: self.latitude,
                longitude: self.longitude,
            },
            place_address: self.place_address,
            ticket_pricing: self.ticket_pricing,
            time_travel_each_location: self.time_travel_each_location,
            best_time_to_visit: self.best_time_to_visit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::trip::GeoCoordinates;

    fn sample_hotel() -> Hotel {
        Hotel {
            hotel_name: "Gion Inn".to_string(),
            hotel_address: "1 Gion St".to_string(),
            price_per_night: "$120".to_string(),
            hotel_image_url: "https://images.example/gion.jpg".to_string(),
            geo_coordinates: GeoCoordinates {
                latitude: 35.0037,
                longitude: 135.7788,
            },
            rating: 4.5,
            description: "Quiet ryokan".to_string(),
        }
    }

    #[test]
    fn hotel_round_trips_through_flattened_record() {
        let hotel = sample_hotel();
        let trip_id = ObjectId::new();
        let record = HotelRecord::from_hotel(&hotel, trip_id);

        assert_eq!(record.trip_id, trip_id);
        assert!((record.latitude - 35.0037).abs() < f64::EPSILON);
        assert!((record.longitude - 135.7788).abs() < f64::EPSILON);

        let restored = record.into_hotel();
        assert_eq!(restored, hotel);
    }

    #[test]
    fn activity_round_trips_through_flattened_record() {
        let activity = Activity {
            place_name: "Fushimi Inari".to_string(),
            place_details: "Torii gates".to_string(),
            place_image_url: String::new(),
            geo_coordinates: GeoCoordinates {
                latitude: 34.9671,
                longitude: 135.7727,
            },
            place_address: "68 Fukakusa".to_string(),
            ticket_pricing: "Free".to_string(),
            time_travel_each_location: "30 min".to_string(),
            best_time_to_visit: "Early morning".to_string(),
        };
        let day_id = ObjectId::new();
        let record = ActivityRecord::from_activity(&activity, day_id);
        assert_eq!(record.itinerary_day_id, day_id);
        assert_eq!(record.into_activity(), activity);
    }
}
