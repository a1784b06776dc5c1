use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to rank the candidate pool for a user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankMatchesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    /// When absent the full ranked pool is returned.
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request to create or replace a profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub orientation: Option<String>,
    #[serde(default)]
    pub ethnicity: Option<String>,
    #[serde(default)]
    pub income: Option<String>,
    #[serde(default)]
    pub smokes: Option<String>,
    #[serde(default)]
    pub drinks: Option<String>,
    /// Free-text place name, geocoded on save.
    #[serde(default)]
    pub location: Option<String>,
}

/// Request to create a room listing
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRoomRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(range(min = 0.0))]
    pub rent: f64,
    #[serde(alias = "available_from", rename = "availableFrom")]
    pub available_from: NaiveDate,
    pub duration: String,
    #[serde(alias = "type", rename = "roomType")]
    pub room_type: String,
    pub layout: String,
    #[validate(range(min = 0.0))]
    pub deposit: f64,
    pub description: String,
    #[validate(length(min = 1))]
    pub location: String,
    #[serde(alias = "images", rename = "imageUrls", default)]
    pub image_urls: Vec<String>,
}

/// Request to update a room listing. The caller must own the listing.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateRoomRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(range(min = 0.0))]
    pub rent: f64,
    #[serde(alias = "available_from", rename = "availableFrom")]
    pub available_from: NaiveDate,
    pub duration: String,
    #[serde(alias = "type", rename = "roomType")]
    pub room_type: String,
    pub layout: String,
    #[validate(range(min = 0.0))]
    pub deposit: f64,
    pub description: String,
    #[validate(length(min = 1))]
    pub location: String,
    #[serde(alias = "images", rename = "imageUrls", default)]
    pub image_urls: Vec<String>,
}
