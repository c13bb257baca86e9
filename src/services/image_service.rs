use reqwest::Client;
use serde::Deserialize;
use std::env;
use url::Url;

use crate::models::trip::TripPlan;

/// Static asset served by the frontend when no real photo can be found.
pub const PLACEHOLDER_ASSET: &str = "/placeholder.jpg";

/// Domains the model is known to emit when it invents an image URL.
const PLACEHOLDER_DOMAINS: [&str; 4] = [
    "example.com",
    "placeholder.com",
    "via.placeholder.com",
    "placehold.co",
];

const UNSPLASH_SEARCH_URL: &str = "https://api.unsplash.com/search/photos";

#[derive(Debug, Deserialize)]
struct UnsplashSearchResponse {
    results: Vec<UnsplashPhoto>,
}

#[derive(Debug, Deserialize)]
struct UnsplashPhoto {
    urls: UnsplashUrls,
}

#[derive(Debug, Deserialize)]
struct UnsplashUrls {
    regular: String,
}

/// True when the URL is unusable and should be replaced: empty, unparseable,
/// or whose host is a known placeholder domain or a subdomain of one.
pub fn needs_image(url: &str) -> bool {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return true;
    }
    let host = match Url::parse(trimmed)
        .ok()
        .and_then(|parsed| parsed.host_str().map(|host| host.to_ascii_lowercase()))
    {
        Some(host) => host,
        None => return true,
    };
    PLACEHOLDER_DOMAINS
        .iter()
        .any(|domain| host == *domain || host.ends_with(&format!(".{}", domain)))
}

/// Photo-search enricher. Runs after plan assembly and before persistence or
/// display; each lookup is independent and a failed one is logged and treated
/// as "no image found".
#[derive(Clone)]
pub struct ImageService {
    client: Client,
    access_key: Option<String>,
}

impl ImageService {
    pub fn from_env() -> Self {
        let access_key = env::var("UNSPLASH_ACCESS_KEY").ok().filter(|k| !k.is_empty());
        if access_key.is_none() {
            log::warn!("UNSPLASH_ACCESS_KEY not set; itineraries will use placeholder images");
        }

        Self {
            client: Client::new(),
            access_key,
        }
    }

    /// First landscape-oriented search hit for the query, or None when the
    /// key is missing, the search errors, or nothing matches.
    pub async fn search_photo(&self, query: &str) -> Option<String> {
        let access_key = self.access_key.as_ref()?;

        let response = self
            .client
            .get(UNSPLASH_SEARCH_URL)
            .query(&[
                ("query", query),
                ("client_id", access_key.as_str()),
                ("orientation", "landscape"),
                ("per_page", "1"),
            ])
            .send()
            .await;

        let response = match response {
            Ok(resp) if resp.status().is_success() => resp,
            Ok(resp) => {
                log::warn!("Unsplash search for {:?} returned {}", query, resp.status());
                return None;
            }
            Err(err) => {
                log::warn!("Unsplash search for {:?} failed: {}", query, err);
                return None;
            }
        };

        match response.json::<UnsplashSearchResponse>().await {
            Ok(body) => body.results.into_iter().next().map(|photo| photo.urls.regular),
            Err(err) => {
                log::warn!("Unsplash response for {:?} unparseable: {}", query, err);
                None
            }
        }
    }

    /// Replaces every missing or placeholder image URL in the plan, hotel by
    /// hotel and activity by activity. Sequential on purpose: lookups are
    /// independent and one failure must not abort the rest.
    pub async fn enrich_plan(&self, plan: &mut TripPlan) {
        let destination = plan.destination.clone();

        for hotel in plan.hotels.iter_mut() {
            if needs_image(&hotel.hotel_image_url) {
                let query = format!("{} {}", hotel.hotel_name, destination);
                hotel.hotel_image_url = self
                    .search_photo(&query)
                    .await
                    .unwrap_or_else(|| PLACEHOLDER_ASSET.to_string());
            }
        }

        for day in plan.itinerary.iter_mut() {
            for activity in day.activities.iter_mut() {
                if needs_image(&activity.place_image_url) {
                    let query = format!("{} {}", activity.place_name, destination);
                    activity.place_image_url = self
                        .search_photo(&query)
                        .await
                        .unwrap_or_else(|| PLACEHOLDER_ASSET.to_string());
                }
            }
        }
    }
}
