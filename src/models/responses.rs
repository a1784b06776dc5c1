use serde::{Deserialize, Serialize};

use crate::models::domain::{Profile, RankedRoom, RankedUser, RoomListing};

/// Response for the user-ranking endpoint, ordered best-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedUsersResponse {
    pub matches: Vec<RankedUser>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Response for the room-ranking endpoint, ordered best-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedRoomsResponse {
    pub matches: Vec<RankedRoom>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Response after a profile write
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub profile: Profile,
}

/// Response after a room listing write
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomResponse {
    pub room: RoomListing,
}

/// Response listing rooms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomsResponse {
    pub rooms: Vec<RoomListing>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
