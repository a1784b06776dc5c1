//! Feature extraction and pool-relative normalization.
//!
//! Numeric attributes are min-max normalized over the candidate pool plus the
//! target, so the scale is recomputed from scratch on every request. Nothing
//! here caches across calls.

use crate::models::{Coordinates, Drinks, Ethnicity, Gender, Orientation, Profile, RoomListing, Smokes};

/// Matching features of a single user.
///
/// Numeric fields are in [0,1] after extraction; categorical fields carry the
/// ordinal code of their bucket. An absent field stays absent and later drops
/// out of the weighted sum.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserFeatures {
    pub age: Option<f64>,
    pub income: Option<f64>,
    pub gender: Option<u8>,
    pub orientation: Option<u8>,
    pub ethnicity: Option<u8>,
    pub smokes: Option<u8>,
    pub drinks: Option<u8>,
    pub coordinates: Option<Coordinates>,
}

/// Features for one user-ranking request: the target plus its pool, all
/// normalized against the same bounds.
#[derive(Debug, Clone)]
pub struct UserFeatureSet {
    pub target: UserFeatures,
    pub pool: Vec<UserFeatures>,
}

/// Matching features of a single room listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoomFeatures {
    pub rent: Option<f64>,
    pub coordinates: Option<Coordinates>,
}

/// Features for one room-ranking request. Rents and the target's income share
/// one normalization scale so the rent-vs-income term compares like with like.
#[derive(Debug, Clone)]
pub struct RoomFeatureSet {
    pub target_income: Option<f64>,
    pub target_coordinates: Option<Coordinates>,
    pub pool: Vec<RoomFeatures>,
}

/// Extract and normalize features for a user-to-user ranking request.
///
/// Pure function of (target, pool); age and income bounds are taken over the
/// pool plus the target.
pub fn extract_user_features(target: &Profile, pool: &[Profile]) -> UserFeatureSet {
    let mut target_features = raw_user_features(target);
    let mut pool_features: Vec<UserFeatures> = pool.iter().map(raw_user_features).collect();

    let mut ages: Vec<Option<f64>> = std::iter::once(target_features.age)
        .chain(pool_features.iter().map(|f| f.age))
        .collect();
    normalize_column(&mut ages);
    target_features.age = ages[0];
    for (features, age) in pool_features.iter_mut().zip(&ages[1..]) {
        features.age = *age;
    }

    let mut incomes: Vec<Option<f64>> = std::iter::once(target_features.income)
        .chain(pool_features.iter().map(|f| f.income))
        .collect();
    normalize_column(&mut incomes);
    target_features.income = incomes[0];
    for (features, income) in pool_features.iter_mut().zip(&incomes[1..]) {
        features.income = *income;
    }

    UserFeatureSet {
        target: target_features,
        pool: pool_features,
    }
}

/// Extract and normalize features for a user-to-room ranking request.
pub fn extract_room_features(target: &Profile, pool: &[RoomListing]) -> RoomFeatureSet {
    let target_income = target.income.as_deref().and_then(parse_income);

    let mut money: Vec<Option<f64>> = std::iter::once(target_income)
        .chain(pool.iter().map(|room| Some(room.rent).filter(|rent| rent.is_finite())))
        .collect();
    normalize_column(&mut money);

    let pool_features = pool
        .iter()
        .zip(&money[1..])
        .map(|(room, rent)| RoomFeatures {
            rent: *rent,
            coordinates: room.location.coordinates(),
        })
        .collect();

    RoomFeatureSet {
        target_income: money[0],
        target_coordinates: target.location.coordinates(),
        pool: pool_features,
    }
}

/// Min-max normalize the present entries of a sparse column in place.
///
/// Absent entries stay absent. When every present entry carries the same
/// value the column collapses to 0 rather than dividing by zero.
pub fn normalize_column(values: &mut [Option<f64>]) {
    let mut bounds: Option<(f64, f64)> = None;
    for value in values.iter().flatten() {
        bounds = Some(match bounds {
            None => (*value, *value),
            Some((min, max)) => (min.min(*value), max.max(*value)),
        });
    }

    if let Some((min, max)) = bounds {
        for entry in values.iter_mut() {
            if let Some(value) = entry {
                *value = min_max_normalize(*value, min, max);
            }
        }
    }
}

/// Linear rescale of `value` into [0,1] relative to `[min, max]`.
#[inline]
pub fn min_max_normalize(value: f64, min: f64, max: f64) -> f64 {
    if max > min {
        (value - min) / (max - min)
    } else {
        0.0
    }
}

/// Income arrives as the free text the profile form collected ("45000",
/// "$45,000"). Strip currency formatting and parse; anything else counts as
/// a missing attribute.
pub fn parse_income(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn raw_user_features(profile: &Profile) -> UserFeatures {
    UserFeatures {
        age: profile.age.map(f64::from),
        income: profile.income.as_deref().and_then(parse_income),
        gender: profile.gender.map(Gender::code),
        orientation: profile.orientation.map(Orientation::code),
        ethnicity: profile.ethnicity.map(Ethnicity::code),
        smokes: profile.smokes.map(Smokes::code),
        drinks: profile.drinks.map(Drinks::code),
        coordinates: profile.location.coordinates(),
    }
}
