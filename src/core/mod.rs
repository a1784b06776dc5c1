// Core algorithm exports
pub mod distance;
pub mod features;
pub mod ranker;
pub mod scoring;

pub use distance::{categorical_term, haversine_distance, numeric_term};
pub use features::{
    extract_room_features, extract_user_features, min_max_normalize, normalize_column,
    parse_income, RoomFeatureSet, RoomFeatures, UserFeatureSet, UserFeatures,
};
pub use ranker::Ranker;
pub use scoring::{score_room_pair, score_user_pair, weights};
