use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Drinks, Ethnicity, Gender, Location, Orientation, Profile, RoomListing, Smokes};

/// Errors that can occur when interacting with the store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

/// PostgreSQL client for profiles and room listings.
///
/// The ranker reads whole-pool snapshots through this client on every
/// request; enumeration queries use a fixed ORDER BY so equal-score
/// candidates come back in a reproducible order.
pub struct StoreClient {
    pool: PgPool,
}

impl StoreClient {
    /// Create a new store client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new store client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Fetch one profile by user id. Missing profiles are a hard error.
    pub async fn get_profile(&self, user_id: &str) -> Result<Profile, StoreError> {
        let query = r#"
            SELECT user_id, name, age, gender, orientation, ethnicity, income,
                   smokes, drinks, place, latitude, longitude
            FROM profiles
            WHERE user_id = $1
        "#;

        let row = sqlx::query(query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| profile_from_row(&row))
            .ok_or_else(|| StoreError::NotFound(format!("Profile not found for user {}", user_id)))
    }

    /// Create or replace a profile.
    pub async fn upsert_profile(&self, profile: &Profile) -> Result<(), StoreError> {
        let query = r#"
            INSERT INTO profiles (user_id, name, age, gender, orientation, ethnicity,
                                  income, smokes, drinks, place, latitude, longitude, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, NOW())
            ON CONFLICT (user_id)
            DO UPDATE SET
                name = EXCLUDED.name,
                age = EXCLUDED.age,
                gender = EXCLUDED.gender,
                orientation = EXCLUDED.orientation,
                ethnicity = EXCLUDED.ethnicity,
                income = EXCLUDED.income,
                smokes = EXCLUDED.smokes,
                drinks = EXCLUDED.drinks,
                place = EXCLUDED.place,
                latitude = EXCLUDED.latitude,
                longitude = EXCLUDED.longitude,
                updated_at = EXCLUDED.updated_at
        "#;

        sqlx::query(query)
            .bind(&profile.user_id)
            .bind(&profile.name)
            .bind(profile.age.map(i16::from))
            .bind(profile.gender.map(Gender::as_str))
            .bind(profile.orientation.map(Orientation::as_str))
            .bind(profile.ethnicity.map(Ethnicity::as_str))
            .bind(&profile.income)
            .bind(profile.smokes.map(Smokes::as_str))
            .bind(profile.drinks.map(Drinks::as_str))
            .bind(&profile.location.place)
            .bind(profile.location.latitude)
            .bind(profile.location.longitude)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Upserted profile for {}", profile.user_id);

        Ok(())
    }

    /// Enumerate every profile except the given user's own.
    pub async fn list_profiles_excluding(&self, user_id: &str) -> Result<Vec<Profile>, StoreError> {
        let query = r#"
            SELECT user_id, name, age, gender, orientation, ethnicity, income,
                   smokes, drinks, place, latitude, longitude
            FROM profiles
            WHERE user_id <> $1
            ORDER BY user_id
        "#;

        let rows = sqlx::query(query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        let profiles = rows.iter().map(profile_from_row).collect::<Vec<_>>();

        tracing::debug!("Loaded {} candidate profiles for {}", profiles.len(), user_id);

        Ok(profiles)
    }

    /// Fetch one room listing by id.
    pub async fn get_room(&self, room_id: Uuid) -> Result<RoomListing, StoreError> {
        let query = r#"
            SELECT id, owner_id, rent, available_from, duration, room_type, layout,
                   deposit, description, place, latitude, longitude, image_urls, created_at
            FROM rooms
            WHERE id = $1
        "#;

        let row = sqlx::query(query)
            .bind(room_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| room_from_row(&row))
            .ok_or_else(|| StoreError::NotFound(format!("Room {} not found", room_id)))
    }

    /// Insert a new room listing.
    pub async fn insert_room(&self, room: &RoomListing) -> Result<(), StoreError> {
        let query = r#"
            INSERT INTO rooms (id, owner_id, rent, available_from, duration, room_type,
                               layout, deposit, description, place, latitude, longitude,
                               image_urls, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        "#;

        sqlx::query(query)
            .bind(room.id)
            .bind(&room.owner_id)
            .bind(room.rent)
            .bind(room.available_from)
            .bind(&room.duration)
            .bind(&room.room_type)
            .bind(&room.layout)
            .bind(room.deposit)
            .bind(&room.description)
            .bind(&room.location.place)
            .bind(room.location.latitude)
            .bind(room.location.longitude)
            .bind(&room.image_urls)
            .bind(room.created_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Replace the mutable fields of an existing listing.
    pub async fn update_room(&self, room: &RoomListing) -> Result<(), StoreError> {
        let query = r#"
            UPDATE rooms
            SET rent = $2,
                available_from = $3,
                duration = $4,
                room_type = $5,
                layout = $6,
                deposit = $7,
                description = $8,
                place = $9,
                latitude = $10,
                longitude = $11,
                image_urls = $12
            WHERE id = $1
        "#;

        let result = sqlx::query(query)
            .bind(room.id)
            .bind(room.rent)
            .bind(room.available_from)
            .bind(&room.duration)
            .bind(&room.room_type)
            .bind(&room.layout)
            .bind(room.deposit)
            .bind(&room.description)
            .bind(&room.location.place)
            .bind(room.location.latitude)
            .bind(room.location.longitude)
            .bind(&room.image_urls)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("Room {} not found", room.id)));
        }

        Ok(())
    }

    /// Delete a room listing.
    pub async fn delete_room(&self, room_id: Uuid) -> Result<bool, StoreError> {
        let query = r#"
            DELETE FROM rooms
            WHERE id = $1
        "#;

        let result = sqlx::query(query).bind(room_id).execute(&self.pool).await?;

        Ok(result.rows_affected() > 0)
    }

    /// Enumerate the listings owned by a user.
    pub async fn list_rooms_by_owner(&self, owner_id: &str) -> Result<Vec<RoomListing>, StoreError> {
        let query = r#"
            SELECT id, owner_id, rent, available_from, duration, room_type, layout,
                   deposit, description, place, latitude, longitude, image_urls, created_at
            FROM rooms
            WHERE owner_id = $1
            ORDER BY created_at, id
        "#;

        let rows = sqlx::query(query)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(room_from_row).collect())
    }

    /// Enumerate every listing not owned by the given user.
    pub async fn list_rooms_excluding_owner(
        &self,
        owner_id: &str,
    ) -> Result<Vec<RoomListing>, StoreError> {
        let query = r#"
            SELECT id, owner_id, rent, available_from, duration, room_type, layout,
                   deposit, description, place, latitude, longitude, image_urls, created_at
            FROM rooms
            WHERE owner_id <> $1
            ORDER BY created_at, id
        "#;

        let rows = sqlx::query(query)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;

        let rooms: Vec<RoomListing> = rows.iter().map(room_from_row).collect();

        tracing::debug!("Loaded {} candidate rooms for {}", rooms.len(), owner_id);

        Ok(rooms)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn profile_from_row(row: &PgRow) -> Profile {
    Profile {
        user_id: row.get("user_id"),
        name: row.get("name"),
        age: row.get::<Option<i16>, _>("age").map(|age| age as u8),
        gender: row
            .get::<Option<String>, _>("gender")
            .map(|v| Gender::parse(&v)),
        orientation: row
            .get::<Option<String>, _>("orientation")
            .map(|v| Orientation::parse(&v)),
        ethnicity: row
            .get::<Option<String>, _>("ethnicity")
            .map(|v| Ethnicity::parse(&v)),
        income: row.get("income"),
        smokes: row
            .get::<Option<String>, _>("smokes")
            .map(|v| Smokes::parse(&v)),
        drinks: row
            .get::<Option<String>, _>("drinks")
            .map(|v| Drinks::parse(&v)),
        location: Location {
            place: row.get("place"),
            latitude: row.get("latitude"),
            longitude: row.get("longitude"),
        },
    }
}

fn room_from_row(row: &PgRow) -> RoomListing {
    RoomListing {
        id: row.get("id"),
        owner_id: row.get("owner_id"),
        rent: row.get("rent"),
        available_from: row.get("available_from"),
        duration: row.get("duration"),
        room_type: row.get("room_type"),
        layout: row.get("layout"),
        deposit: row.get("deposit"),
        description: row.get("description"),
        location: Location {
            place: row.get("place"),
            latitude: row.get("latitude"),
            longitude: row.get("longitude"),
        },
        image_urls: row.get("image_urls"),
        created_at: row.get("created_at"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_formats_user_id() {
        let err = StoreError::NotFound("Profile not found for user abc".to_string());
        assert!(err.to_string().contains("abc"));
    }
}
