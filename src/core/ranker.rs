use std::cmp::Ordering;

use crate::core::distance::haversine_distance;
use crate::core::features::{extract_room_features, extract_user_features, normalize_column};
use crate::core::scoring::{score_room_pair, score_user_pair};
use crate::models::{Coordinates, Profile, RankedRoom, RankedUser, RoomListing};

/// Ranks a candidate pool against a target user.
///
/// Pure compute over the snapshots it is handed: one normalization pass per
/// request, one score per candidate, ascending sort. Candidates with equal
/// scores keep their pool enumeration order, so results are deterministic
/// for a given snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ranker;

impl Ranker {
    pub fn new() -> Self {
        Self
    }

    /// Rank all candidate users against the target, best match first.
    ///
    /// The pool must already exclude the target itself. `limit` truncates
    /// after sorting; `None` returns the full ranked pool.
    pub fn rank_users(
        &self,
        target: &Profile,
        pool: Vec<Profile>,
        limit: Option<usize>,
    ) -> Vec<RankedUser> {
        let features = extract_user_features(target, &pool);

        let distances_km = pairwise_km(
            features.target.coordinates,
            features.pool.iter().map(|f| f.coordinates),
        );
        let mut geo_terms = distances_km.clone();
        normalize_column(&mut geo_terms);

        let mut ranked: Vec<RankedUser> = pool
            .into_iter()
            .enumerate()
            .map(|(i, profile)| RankedUser {
                score: score_user_pair(&features.target, &features.pool[i], geo_terms[i]),
                distance_km: distances_km[i],
                profile,
            })
            .collect();

        sort_ascending(&mut ranked, |entry| entry.score);
        if let Some(limit) = limit {
            ranked.truncate(limit);
        }
        ranked
    }

    /// Rank all candidate rooms against the target, best match first.
    ///
    /// The pool must already exclude listings owned by the target.
    pub fn rank_rooms(
        &self,
        target: &Profile,
        pool: Vec<RoomListing>,
        limit: Option<usize>,
    ) -> Vec<RankedRoom> {
        let features = extract_room_features(target, &pool);

        let distances_km = pairwise_km(
            features.target_coordinates,
            features.pool.iter().map(|f| f.coordinates),
        );
        let mut geo_terms = distances_km.clone();
        normalize_column(&mut geo_terms);

        let mut ranked: Vec<RankedRoom> = pool
            .into_iter()
            .enumerate()
            .map(|(i, room)| RankedRoom {
                score: score_room_pair(features.target_income, features.pool[i].rent, geo_terms[i]),
                distance_km: distances_km[i],
                room,
            })
            .collect();

        sort_ascending(&mut ranked, |entry| entry.score);
        if let Some(limit) = limit {
            ranked.truncate(limit);
        }
        ranked
    }
}

/// Great-circle distance to each candidate, absent when either side has no
/// usable coordinates.
fn pairwise_km(
    target: Option<Coordinates>,
    candidates: impl Iterator<Item = Option<Coordinates>>,
) -> Vec<Option<f64>> {
    candidates
        .map(|candidate| match (target, candidate) {
            (Some(t), Some(c)) => Some(haversine_distance(
                t.latitude,
                t.longitude,
                c.latitude,
                c.longitude,
            )),
            _ => None,
        })
        .collect()
}

/// Stable ascending sort; scores are finite so the fallback never fires.
fn sort_ascending<T, F: Fn(&T) -> f64>(entries: &mut [T], score: F) {
    entries.sort_by(|a, b| score(a).partial_cmp(&score(b)).unwrap_or(Ordering::Equal));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, Location, Smokes};

    fn profile(id: &str, age: Option<u8>, coords: Option<(f64, f64)>) -> Profile {
        Profile {
            user_id: id.to_string(),
            name: format!("User {}", id),
            age,
            gender: Some(Gender::Male),
            orientation: None,
            ethnicity: None,
            income: None,
            smokes: Some(Smokes::No),
            drinks: None,
            location: Location {
                place: coords.map(|_| "somewhere".to_string()),
                latitude: coords.map(|c| c.0),
                longitude: coords.map(|c| c.1),
            },
        }
    }

    fn room(owner: &str, rent: f64, coords: Option<(f64, f64)>) -> RoomListing {
        RoomListing {
            id: uuid::Uuid::new_v4(),
            owner_id: owner.to_string(),
            rent,
            available_from: chrono::NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            duration: "6 months".to_string(),
            room_type: "private".to_string(),
            layout: "3BR".to_string(),
            deposit: 400.0,
            description: String::new(),
            location: Location {
                place: coords.map(|_| "somewhere".to_string()),
                latitude: coords.map(|c| c.0),
                longitude: coords.map(|c| c.1),
            },
            image_urls: vec![],
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_closer_age_ranks_first() {
        let ranker = Ranker::new();
        let target = profile("t", Some(30), None);
        let pool = vec![
            profile("far", Some(20), None),
            profile("near", Some(30), None),
            profile("mid", Some(25), None),
        ];

        let ranked = ranker.rank_users(&target, pool, None);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].profile.user_id, "near");
        assert_eq!(ranked[0].score, 0.0);
        assert_eq!(ranked[2].profile.user_id, "far");
    }

    #[test]
    fn test_every_candidate_returned_once() {
        let ranker = Ranker::new();
        let target = profile("t", Some(30), None);
        let pool: Vec<Profile> = (0..25)
            .map(|i| profile(&format!("u{}", i), Some(20 + (i % 15) as u8), None))
            .collect();

        let ranked = ranker.rank_users(&target, pool, None);
        assert_eq!(ranked.len(), 25);

        let mut ids: Vec<&str> = ranked.iter().map(|r| r.profile.user_id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 25);
    }

    #[test]
    fn test_equal_scores_keep_pool_order() {
        let ranker = Ranker::new();
        let target = profile("t", Some(30), None);
        // Three indistinguishable candidates.
        let pool = vec![
            profile("first", Some(30), None),
            profile("second", Some(30), None),
            profile("third", Some(30), None),
        ];

        let ranked = ranker.rank_users(&target, pool, None);
        let ids: Vec<&str> = ranked.iter().map(|r| r.profile.user_id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_limit_truncates_after_sorting() {
        let ranker = Ranker::new();
        let target = profile("t", Some(30), None);
        let pool = vec![
            profile("worst", Some(60), None),
            profile("best", Some(30), None),
            profile("ok", Some(35), None),
        ];

        let ranked = ranker.rank_users(&target, pool, Some(2));
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].profile.user_id, "best");
        assert_eq!(ranked[1].profile.user_id, "ok");
    }

    #[test]
    fn test_empty_pool_returns_empty() {
        let ranker = Ranker::new();
        let target = profile("t", Some(30), Some((42.0, 21.0)));
        assert!(ranker.rank_users(&target, vec![], None).is_empty());
        assert!(ranker.rank_rooms(&target, vec![], None).is_empty());
    }

    #[test]
    fn test_geo_outweighs_income_for_rooms() {
        let ranker = Ranker::new();
        let mut target = profile("t", None, Some((42.0, 21.0)));
        target.income = Some("1000".to_string());

        let pool = vec![
            // Rent far from income but on the doorstep.
            room("a", 2000.0, Some((42.0, 21.0))),
            // Rent equal to income but two degrees away.
            room("b", 1000.0, Some((40.0, 19.0))),
        ];

        let ranked = ranker.rank_rooms(&target, pool, None);
        assert_eq!(ranked[0].room.owner_id, "a");
        assert_eq!(ranked[0].distance_km, Some(0.0));
        assert!(ranked[1].distance_km.unwrap() > 100.0);
    }

    #[test]
    fn test_target_without_coordinates_falls_back_to_rent() {
        let ranker = Ranker::new();
        let mut target = profile("t", None, None);
        target.income = Some("1000".to_string());

        let pool = vec![
            room("far_rent", 3000.0, Some((42.0, 21.0))),
            room("near_rent", 1100.0, Some((48.0, 2.0))),
        ];

        let ranked = ranker.rank_rooms(&target, pool, None);
        // No geo term anywhere, so affordability decides.
        assert_eq!(ranked[0].room.owner_id, "near_rent");
        assert!(ranked.iter().all(|r| r.distance_km.is_none()));
        assert!(ranked.iter().all(|r| r.score.is_finite()));
    }

    #[test]
    fn test_candidate_without_coordinates_gets_no_geo_term() {
        let ranker = Ranker::new();
        let target = profile("t", Some(30), Some((42.0, 21.0)));
        let pool = vec![
            profile("located", Some(30), Some((42.5, 21.5))),
            profile("unlocated", Some(30), None),
        ];

        let ranked = ranker.rank_users(&target, pool, None);
        let unlocated = ranked
            .iter()
            .find(|r| r.profile.user_id == "unlocated")
            .unwrap();
        assert!(unlocated.distance_km.is_none());
        assert!(unlocated.score.is_finite());
    }

    #[test]
    fn test_moving_a_candidate_farther_never_improves_it() {
        let ranker = Ranker::new();
        let target = profile("t", Some(30), Some((42.0, 21.0)));

        let near_pool = vec![
            profile("a", Some(30), Some((42.1, 21.1))),
            profile("b", Some(30), Some((42.2, 21.2))),
        ];
        let far_pool = vec![
            profile("a", Some(30), Some((45.0, 24.0))),
            profile("b", Some(30), Some((42.2, 21.2))),
        ];

        let near_rank = ranker.rank_users(&target, near_pool, None);
        let far_rank = ranker.rank_users(&target, far_pool, None);

        let pos = |ranked: &[RankedUser], id: &str| {
            ranked.iter().position(|r| r.profile.user_id == id).unwrap()
        };
        assert!(pos(&far_rank, "a") >= pos(&near_rank, "a"));
    }
}
