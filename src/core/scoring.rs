use crate::core::distance::{categorical_term, numeric_term};
use crate::core::features::UserFeatures;

/// Fixed scoring weights.
///
/// Location dominates both tables: geographic proximity is the primary
/// signal, demographic and financial compatibility come second. The values
/// are empirically chosen constants and are deliberately not configurable.
pub mod weights {
    // User-to-user
    pub const AGE: f64 = 0.5;
    pub const GENDER: f64 = 1.0;
    pub const ORIENTATION: f64 = 0.3;
    pub const ETHNICITY: f64 = 0.3;
    pub const INCOME: f64 = 0.5;
    pub const LOCATION: f64 = 2.0;
    pub const SMOKES: f64 = 0.2;
    pub const DRINKS: f64 = 0.2;

    // User-to-room
    pub const RENT_VS_INCOME: f64 = 1.0;
}

/// Score one candidate user against the target.
///
/// `geo_term` is the candidate's great-circle distance after pool-wide
/// min-max normalization, or `None` when either side lacks coordinates.
/// Attributes absent on either side are skipped: they neither contribute
/// nor zero the result. Lower is better; identical profiles score 0.
pub fn score_user_pair(
    target: &UserFeatures,
    candidate: &UserFeatures,
    geo_term: Option<f64>,
) -> f64 {
    let mut sum = 0.0;

    if let (Some(a), Some(b)) = (target.age, candidate.age) {
        sum += weights::AGE * numeric_term(a, b);
    }
    if let (Some(a), Some(b)) = (target.gender, candidate.gender) {
        sum += weights::GENDER * categorical_term(a, b);
    }
    if let (Some(a), Some(b)) = (target.orientation, candidate.orientation) {
        sum += weights::ORIENTATION * categorical_term(a, b);
    }
    if let (Some(a), Some(b)) = (target.ethnicity, candidate.ethnicity) {
        sum += weights::ETHNICITY * categorical_term(a, b);
    }
    if let (Some(a), Some(b)) = (target.income, candidate.income) {
        sum += weights::INCOME * numeric_term(a, b);
    }
    if let (Some(a), Some(b)) = (target.smokes, candidate.smokes) {
        sum += weights::SMOKES * categorical_term(a, b);
    }
    if let (Some(a), Some(b)) = (target.drinks, candidate.drinks) {
        sum += weights::DRINKS * categorical_term(a, b);
    }
    if let Some(geo) = geo_term {
        sum += weights::LOCATION * geo * geo;
    }

    sum.sqrt()
}

/// Score one candidate room against the target.
///
/// `income` and `rent` are already normalized onto a shared scale;
/// `geo_term` is the pool-normalized great-circle distance. Either term
/// drops out when its inputs are missing.
pub fn score_room_pair(income: Option<f64>, rent: Option<f64>, geo_term: Option<f64>) -> f64 {
    let mut sum = 0.0;

    if let (Some(income), Some(rent)) = (income, rent) {
        sum += weights::RENT_VS_INCOME * numeric_term(income, rent);
    }
    if let Some(geo) = geo_term {
        sum += weights::LOCATION * geo * geo;
    }

    sum.sqrt()
}
