use mongodb::bson::oid::ObjectId;
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

/// Account record for a trip-planning user. Identity itself comes from the
/// external provider; we only keep the profile plus the subscription tag the
/// quota check reads.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub image_url: String,
    /// Id assigned by the external identity provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Plan name when the user has an active subscription; None otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription: Option<String>,
    pub created_at: Option<DateTime>,
}

impl User {
    pub fn is_subscriber(&self) -> bool {
        self.subscription
            .as_deref()
            .map(|plan| !plan.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Body of POST /api/users.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct UserIdentity {
    pub name: String,
    pub email: String,
    #[serde(rename = "imageUrl", default)]
    pub image_url: String,
    #[serde(rename = "externalId", skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}
