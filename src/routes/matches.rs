use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::Ranker;
use crate::models::{
    Coordinates, ErrorResponse, HealthResponse, RankMatchesRequest, RankedRoomsResponse,
    RankedUsersResponse,
};
use crate::services::{CacheKey, CacheManager, GeocoderClient, StoreClient, StoreError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<StoreClient>,
    pub cache: Arc<CacheManager>,
    pub geocoder: Arc<GeocoderClient>,
    pub ranker: Ranker,
}

impl AppState {
    /// Resolve a place name through the cache, falling back to the geocoder.
    ///
    /// Geocoding failure is absorbed: the record is saved without
    /// coordinates and the ranker later skips its geographic term.
    pub async fn geocode_place(&self, place: &str) -> Option<Coordinates> {
        let key = CacheKey::geocode(place);

        if let Ok(coords) = self.cache.get::<Coordinates>(&key).await {
            return Some(coords);
        }

        match self.geocoder.resolve(place).await {
            Ok(coords) => {
                if let Err(e) = self.cache.set(&key, &coords).await {
                    tracing::warn!("Failed to cache coordinates for {}: {}", place, e);
                }
                Some(coords)
            }
            Err(e) => {
                tracing::warn!("Geocoding failed for {}: {}", place, e);
                None
            }
        }
    }
}

/// Map a store error to its HTTP response.
pub fn store_error_response(err: &StoreError) -> HttpResponse {
    match err {
        StoreError::NotFound(message) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Not found".to_string(),
            message: message.clone(),
            status_code: 404,
        }),
        StoreError::Forbidden(message) => HttpResponse::Forbidden().json(ErrorResponse {
            error: "Forbidden".to_string(),
            message: message.clone(),
            status_code: 403,
        }),
        other => HttpResponse::InternalServerError().json(ErrorResponse {
            error: "Store error".to_string(),
            message: other.to_string(),
            status_code: 500,
        }),
    }
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches/users", web::post().to(rank_users))
        .route("/matches/rooms", web::post().to(rank_rooms));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Rank candidate users for a target user
///
/// POST /api/v1/matches/users
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "limit": 20
/// }
/// ```
///
/// Returns the full ranked pool, best match first, unless `limit` is given.
async fn rank_users(
    state: web::Data<AppState>,
    req: web::Json<RankMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    tracing::info!("Ranking users for {}", req.user_id);

    let target = match state.store.get_profile(&req.user_id).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::info!("Failed to load target {}: {}", req.user_id, e);
            return store_error_response(&e);
        }
    };

    let pool = match state.store.list_profiles_excluding(&req.user_id).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to load candidate pool for {}: {}", req.user_id, e);
            return store_error_response(&e);
        }
    };

    let total_candidates = pool.len();
    let limit = req.limit.map(usize::from);
    let matches = state.ranker.rank_users(&target, pool, limit);

    tracing::info!(
        "Ranked {} of {} candidates for {}",
        matches.len(),
        total_candidates,
        req.user_id
    );

    HttpResponse::Ok().json(RankedUsersResponse {
        matches,
        total_candidates,
    })
}

/// Rank candidate rooms for a target user
///
/// POST /api/v1/matches/rooms
///
/// The pool excludes listings owned by the target. Returns the full ranked
/// pool, best match first, unless `limit` is given.
async fn rank_rooms(
    state: web::Data<AppState>,
    req: web::Json<RankMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    tracing::info!("Ranking rooms for {}", req.user_id);

    let target = match state.store.get_profile(&req.user_id).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::info!("Failed to load target {}: {}", req.user_id, e);
            return store_error_response(&e);
        }
    };

    let pool = match state.store.list_rooms_excluding_owner(&req.user_id).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to load room pool for {}: {}", req.user_id, e);
            return store_error_response(&e);
        }
    };

    let total_candidates = pool.len();
    let limit = req.limit.map(usize::from);
    let matches = state.ranker.rank_rooms(&target, pool, limit);

    tracing::info!(
        "Ranked {} of {} rooms for {}",
        matches.len(),
        total_candidates,
        req.user_id
    );

    HttpResponse::Ok().json(RankedRoomsResponse {
        matches,
        total_candidates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response = store_error_response(&StoreError::NotFound("missing".to_string()));
        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_forbidden_maps_to_403() {
        let response = store_error_response(&StoreError::Forbidden("not yours".to_string()));
        assert_eq!(response.status(), actix_web::http::StatusCode::FORBIDDEN);
    }
}
