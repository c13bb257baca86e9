use bson::doc;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::{Client, Collection};
use std::sync::Arc;

use crate::db::mongo::DATABASE;
use crate::models::records::{
    ActivityRecord, HotelRecord, ItineraryDayRecord, PopulatedTrip, TripRecord,
};
use crate::models::trip::TripPlan;
use crate::models::user::{User, UserIdentity};

const TRIPS: &str = "Trips";
const HOTELS: &str = "Hotels";
const ITINERARY_DAYS: &str = "ItineraryDays";
const ACTIVITIES: &str = "Activities";
const USERS: &str = "Users";

/// Gateway to the document store. The store is treated as a black box: no
/// schema management or referential integrity beyond "child rows name their
/// parent's id".
#[derive(Clone)]
pub struct TripService {
    client: Arc<Client>,
}

impl TripService {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.client.database(DATABASE).collection(name)
    }

    /// Persists a finished plan as one trip record plus hotel, day and
    /// activity child records, and returns the new trip id.
    pub async fn create_trip(
        &self,
        plan: &TripPlan,
        user_id: ObjectId,
    ) -> Result<ObjectId, mongodb::error::Error> {
        let trips: Collection<TripRecord> = self.collection(TRIPS);
        let inserted = trips.insert_one(TripRecord::from_plan(plan, user_id)).await?;
        let trip_id = inserted
            .inserted_id
            .as_object_id()
            .unwrap_or_else(ObjectId::new);

        let hotels: Collection<HotelRecord> = self.collection(HOTELS);
        for hotel in &plan.hotels {
            hotels.insert_one(HotelRecord::from_hotel(hotel, trip_id)).await?;
        }

        let days: Collection<ItineraryDayRecord> = self.collection(ITINERARY_DAYS);
        let activities: Collection<ActivityRecord> = self.collection(ACTIVITIES);
        for day in &plan.itinerary {
            let inserted_day = days
                .insert_one(ItineraryDayRecord::from_day(day, trip_id))
                .await?;
            let day_id = inserted_day
                .inserted_id
                .as_object_id()
                .unwrap_or_else(ObjectId::new);

            for activity in &day.activities {
                activities
                    .insert_one(ActivityRecord::from_activity(activity, day_id))
                    .await?;
            }
        }

        Ok(trip_id)
    }

    /// Reassembles a trip from its child records, days in ascending order.
    pub async fn get_trip_by_id(
        &self,
        trip_id: ObjectId,
    ) -> Result<Option<PopulatedTrip>, mongodb::error::Error> {
        let trips: Collection<TripRecord> = self.collection(TRIPS);
        let trip = match trips.find_one(doc! { "_id": trip_id }).await? {
            Some(trip) => trip,
            None => return Ok(None),
        };

        Ok(Some(self.populate(trip).await?))
    }

    /// Trip summaries for one user, newest first.
    pub async fn get_user_trips(
        &self,
        user_id: ObjectId,
    ) -> Result<Vec<TripRecord>, mongodb::error::Error> {
        let trips: Collection<TripRecord> = self.collection(TRIPS);
        let cursor = trips
            .find(doc! { "user_id": user_id })
            .sort(doc! { "created_at": -1 })
            .await?;
        cursor.try_collect().await
    }

    /// Fully populated trips for a destination, newest first.
    pub async fn get_trips_by_destination(
        &self,
        destination: &str,
    ) -> Result<Vec<PopulatedTrip>, mongodb::error::Error> {
        let trips: Collection<TripRecord> = self.collection(TRIPS);
        let cursor = trips
            .find(doc! { "destination": destination })
            .sort(doc! { "created_at": -1 })
            .await?;
        let records: Vec<TripRecord> = cursor.try_collect().await?;

        let mut populated = Vec::with_capacity(records.len());
        for record in records {
            populated.push(self.populate(record).await?);
        }
        Ok(populated)
    }

    async fn populate(&self, trip: TripRecord) -> Result<PopulatedTrip, mongodb::error::Error> {
        let trip_id = trip.id.unwrap_or_else(ObjectId::new);

        let hotels: Collection<HotelRecord> = self.collection(HOTELS);
        let hotel_records: Vec<HotelRecord> = hotels
            .find(doc! { "trip_id": trip_id })
            .await?
            .try_collect()
            .await?;

        let days: Collection<ItineraryDayRecord> = self.collection(ITINERARY_DAYS);
        let day_records: Vec<ItineraryDayRecord> = days
            .find(doc! { "trip_id": trip_id })
            .sort(doc! { "day": 1 })
            .await?
            .try_collect()
            .await?;

        let activities: Collection<ActivityRecord> = self.collection(ACTIVITIES);
        let mut itinerary = Vec::with_capacity(day_records.len());
        for day_record in day_records {
            let day_id = day_record.id.unwrap_or_else(ObjectId::new);
            let activity_records: Vec<ActivityRecord> = activities
                .find(doc! { "itinerary_day_id": day_id })
                .await?
                .try_collect()
                .await?;

            itinerary.push(day_record.into_day(
                activity_records
                    .into_iter()
                    .map(ActivityRecord::into_activity)
                    .collect(),
            ));
        }

        let plan = TripPlan {
            destination: trip.destination,
            duration: trip.duration,
            origin: trip.origin,
            budget: trip.budget,
            group_size: trip.group_size,
            hotels: hotel_records.into_iter().map(HotelRecord::into_hotel).collect(),
            itinerary,
        };

        Ok(PopulatedTrip {
            id: trip_id,
            user_id: trip.user_id,
            created_at: trip.created_at,
            plan,
        })
    }

    /// Finds a user by email, updating a missing external id, or creates a
    /// fresh record.
    pub async fn get_or_create_user(
        &self,
        identity: UserIdentity,
    ) -> Result<User, mongodb::error::Error> {
        let users: Collection<User> = self.collection(USERS);

        if let Some(mut existing) = users.find_one(doc! { "email": &identity.email }).await? {
            if existing.external_id.is_none() {
                if let Some(external_id) = identity.external_id {
                    users
                        .update_one(
                            doc! { "email": &identity.email },
                            doc! { "$set": { "external_id": &external_id } },
                        )
                        .await?;
                    existing.external_id = Some(external_id);
                }
            }
            return Ok(existing);
        }

        let mut user = User {
            id: None,
            name: identity.name,
            email: identity.email,
            image_url: identity.image_url,
            external_id: identity.external_id,
            subscription: None,
            created_at: Some(mongodb::bson::DateTime::now()),
        };
        let inserted = users.insert_one(&user).await?;
        user.id = inserted.inserted_id.as_object_id();
        Ok(user)
    }

    /// Looks up a user by hex ObjectId, external provider id, or email.
    /// Used for the subscriber check before final generation.
    pub async fn find_user(
        &self,
        identity: &str,
    ) -> Result<Option<User>, mongodb::error::Error> {
        let users: Collection<User> = self.collection(USERS);

        if let Ok(id) = ObjectId::parse_str(identity) {
            if let Some(user) = users.find_one(doc! { "_id": id }).await? {
                return Ok(Some(user));
            }
        }

        users
            .find_one(doc! { "$or": [
                { "external_id": identity },
                { "email": identity },
            ] })
            .await
    }
}
