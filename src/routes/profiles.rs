use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{
    Drinks, Ethnicity, ErrorResponse, Gender, Location, Orientation, Profile, ProfileResponse,
    Smokes, UpdateProfileRequest,
};
use crate::routes::matches::{store_error_response, AppState};

/// Configure profile routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/profiles", web::put().to(update_profile))
        .route("/profiles/{user_id}", web::get().to(get_profile));
}

/// Fetch a profile by user id
///
/// GET /api/v1/profiles/{userId}
async fn get_profile(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let user_id = path.into_inner();

    match state.store.get_profile(&user_id).await {
        Ok(profile) => HttpResponse::Ok().json(ProfileResponse { profile }),
        Err(e) => store_error_response(&e),
    }
}

/// Create or replace a profile
///
/// PUT /api/v1/profiles
///
/// A changed place name is re-geocoded before the write; if geocoding fails
/// the profile is stored without coordinates.
async fn update_profile(
    state: web::Data<AppState>,
    req: web::Json<UpdateProfileRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let existing = state.store.get_profile(&req.user_id).await.ok();

    let location = match &req.location {
        Some(place) => {
            let unchanged = existing
                .as_ref()
                .and_then(|p| p.location.place.as_deref())
                .is_some_and(|stored| stored == place);

            let coordinates = if unchanged {
                // Same place as before: reuse stored coordinates when present,
                // otherwise retry the lookup that failed last time.
                match existing.as_ref().and_then(|p| p.location.coordinates()) {
                    Some(coords) => Some(coords),
                    None => state.geocode_place(place).await,
                }
            } else {
                state.geocode_place(place).await
            };

            Location::new(Some(place.clone()), coordinates)
        }
        None => Location::default(),
    };

    let profile = Profile {
        user_id: req.user_id.clone(),
        name: req.name.clone(),
        age: req.age,
        gender: req.gender.as_deref().map(Gender::parse),
        orientation: req.orientation.as_deref().map(Orientation::parse),
        ethnicity: req.ethnicity.as_deref().map(Ethnicity::parse),
        income: req.income.clone(),
        smokes: req.smokes.as_deref().map(Smokes::parse),
        drinks: req.drinks.as_deref().map(Drinks::parse),
        location,
    };

    match state.store.upsert_profile(&profile).await {
        Ok(()) => {
            tracing::info!("Saved profile for {}", profile.user_id);
            HttpResponse::Ok().json(ProfileResponse { profile })
        }
        Err(e) => {
            tracing::error!("Failed to save profile for {}: {}", req.user_id, e);
            store_error_response(&e)
        }
    }
}
