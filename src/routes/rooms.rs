use actix_web::{web, HttpResponse, Responder};
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    CreateRoomRequest, ErrorResponse, Location, RoomListing, RoomResponse, RoomsResponse,
    UpdateRoomRequest,
};
use crate::routes::matches::{store_error_response, AppState};
use crate::services::StoreError;

/// Configure room listing routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/rooms", web::post().to(create_room))
        .route("/rooms", web::get().to(my_rooms))
        .route("/rooms/others", web::get().to(other_rooms))
        .route("/rooms/{room_id}", web::put().to(update_room))
        .route("/rooms/{room_id}", web::delete().to(delete_room));
}

fn missing_user_id() -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Missing userId parameter".to_string(),
        message: "userId query parameter is required".to_string(),
        status_code: 400,
    })
}

/// Create a room listing
///
/// POST /api/v1/rooms
async fn create_room(
    state: web::Data<AppState>,
    req: web::Json<CreateRoomRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let coordinates = state.geocode_place(&req.location).await;

    let room = RoomListing {
        id: Uuid::new_v4(),
        owner_id: req.user_id.clone(),
        rent: req.rent,
        available_from: req.available_from,
        duration: req.duration.clone(),
        room_type: req.room_type.clone(),
        layout: req.layout.clone(),
        deposit: req.deposit,
        description: req.description.clone(),
        location: Location::new(Some(req.location.clone()), coordinates),
        image_urls: req.image_urls.clone(),
        created_at: chrono::Utc::now(),
    };

    match state.store.insert_room(&room).await {
        Ok(()) => {
            tracing::info!("Created room {} for {}", room.id, room.owner_id);
            HttpResponse::Created().json(RoomResponse { room })
        }
        Err(e) => {
            tracing::error!("Failed to create room for {}: {}", req.user_id, e);
            store_error_response(&e)
        }
    }
}

/// Update a room listing. The caller must own it.
///
/// PUT /api/v1/rooms/{roomId}
async fn update_room(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateRoomRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let room_id = path.into_inner();

    let existing = match state.store.get_room(room_id).await {
        Ok(room) => room,
        Err(e) => return store_error_response(&e),
    };

    if existing.owner_id != req.user_id {
        return store_error_response(&StoreError::Forbidden(format!(
            "Room {} is not owned by {}",
            room_id, req.user_id
        )));
    }

    let place_unchanged = existing
        .location
        .place
        .as_deref()
        .is_some_and(|stored| stored == req.location);

    let coordinates = if place_unchanged {
        match existing.location.coordinates() {
            Some(coords) => Some(coords),
            None => state.geocode_place(&req.location).await,
        }
    } else {
        state.geocode_place(&req.location).await
    };

    let room = RoomListing {
        id: existing.id,
        owner_id: existing.owner_id,
        rent: req.rent,
        available_from: req.available_from,
        duration: req.duration.clone(),
        room_type: req.room_type.clone(),
        layout: req.layout.clone(),
        deposit: req.deposit,
        description: req.description.clone(),
        location: Location::new(Some(req.location.clone()), coordinates),
        image_urls: req.image_urls.clone(),
        created_at: existing.created_at,
    };

    match state.store.update_room(&room).await {
        Ok(()) => {
            tracing::info!("Updated room {}", room.id);
            HttpResponse::Ok().json(RoomResponse { room })
        }
        Err(e) => {
            tracing::error!("Failed to update room {}: {}", room_id, e);
            store_error_response(&e)
        }
    }
}

/// Delete a room listing. The caller must own it.
///
/// DELETE /api/v1/rooms/{roomId}?userId={userId}
async fn delete_room(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let user_id = match query.get("userId") {
        Some(id) => id,
        None => return missing_user_id(),
    };

    let room_id = path.into_inner();

    let existing = match state.store.get_room(room_id).await {
        Ok(room) => room,
        Err(e) => return store_error_response(&e),
    };

    if existing.owner_id != *user_id {
        return store_error_response(&StoreError::Forbidden(format!(
            "Room {} is not owned by {}",
            room_id, user_id
        )));
    }

    match state.store.delete_room(room_id).await {
        Ok(_) => {
            tracing::info!("Deleted room {}", room_id);
            HttpResponse::Ok().json(serde_json::json!({
                "message": "Room deleted successfully",
                "roomId": room_id,
            }))
        }
        Err(e) => {
            tracing::error!("Failed to delete room {}: {}", room_id, e);
            store_error_response(&e)
        }
    }
}

/// List the caller's own listings
///
/// GET /api/v1/rooms?userId={userId}
async fn my_rooms(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let user_id = match query.get("userId") {
        Some(id) => id,
        None => return missing_user_id(),
    };

    match state.store.list_rooms_by_owner(user_id).await {
        Ok(rooms) => HttpResponse::Ok().json(RoomsResponse { rooms }),
        Err(e) => store_error_response(&e),
    }
}

/// List every listing not owned by the caller
///
/// GET /api/v1/rooms/others?userId={userId}
async fn other_rooms(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let user_id = match query.get("userId") {
        Some(id) => id,
        None => return missing_user_id(),
    };

    match state.store.list_rooms_excluding_owner(user_id).await {
        Ok(rooms) => HttpResponse::Ok().json(RoomsResponse { rooms }),
        Err(e) => store_error_response(&e),
    }
}
