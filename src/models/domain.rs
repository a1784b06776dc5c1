use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Self-reported gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Male,
    Other,
}

impl Gender {
    /// Ordinal code used by the scorer. `Other` is always the highest code.
    pub fn code(self) -> u8 {
        match self {
            Gender::Male => 0,
            Gender::Other => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Other => "other",
        }
    }

    /// Unrecognized values land in the `Other` bucket, never an error.
    pub fn parse(value: &str) -> Self {
        match value {
            "male" => Gender::Male,
            _ => Gender::Other,
        }
    }
}

impl From<String> for Gender {
    fn from(value: String) -> Self {
        Gender::parse(&value)
    }
}

impl From<Gender> for String {
    fn from(value: Gender) -> Self {
        value.as_str().to_string()
    }
}

/// Sexual orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Orientation {
    Straight,
    Bisexual,
    Other,
}

impl Orientation {
    pub fn code(self) -> u8 {
        match self {
            Orientation::Straight => 0,
            Orientation::Bisexual => 1,
            Orientation::Other => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Straight => "straight",
            Orientation::Bisexual => "bisexual",
            Orientation::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "straight" => Orientation::Straight,
            "bisexual" => Orientation::Bisexual,
            _ => Orientation::Other,
        }
    }
}

impl From<String> for Orientation {
    fn from(value: String) -> Self {
        Orientation::parse(&value)
    }
}

impl From<Orientation> for String {
    fn from(value: Orientation) -> Self {
        value.as_str().to_string()
    }
}

/// Ethnicity, as self-reported on the profile form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Ethnicity {
    Asian,
    Black,
    Hispanic,
    Indian,
    MiddleEastern,
    NativeAmerican,
    PacificIslander,
    White,
    Other,
}

impl Ethnicity {
    pub fn code(self) -> u8 {
        match self {
            Ethnicity::Asian => 0,
            Ethnicity::Black => 1,
            Ethnicity::Hispanic => 2,
            Ethnicity::Indian => 3,
            Ethnicity::MiddleEastern => 4,
            Ethnicity::NativeAmerican => 5,
            Ethnicity::PacificIslander => 6,
            Ethnicity::White => 7,
            Ethnicity::Other => 8,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Ethnicity::Asian => "asian",
            Ethnicity::Black => "black",
            Ethnicity::Hispanic => "hispanic",
            Ethnicity::Indian => "indian",
            Ethnicity::MiddleEastern => "middle-eastern",
            Ethnicity::NativeAmerican => "native-american",
            Ethnicity::PacificIslander => "pacific-islander",
            Ethnicity::White => "white",
            Ethnicity::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "asian" => Ethnicity::Asian,
            "black" => Ethnicity::Black,
            "hispanic" => Ethnicity::Hispanic,
            "indian" => Ethnicity::Indian,
            "middle-eastern" => Ethnicity::MiddleEastern,
            "native-american" => Ethnicity::NativeAmerican,
            "pacific-islander" => Ethnicity::PacificIslander,
            "white" => Ethnicity::White,
            _ => Ethnicity::Other,
        }
    }
}

impl From<String> for Ethnicity {
    fn from(value: String) -> Self {
        Ethnicity::parse(&value)
    }
}

impl From<Ethnicity> for String {
    fn from(value: Ethnicity) -> Self {
        value.as_str().to_string()
    }
}

/// Smoking habits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Smokes {
    Yes,
    No,
    Other,
}

impl Smokes {
    pub fn code(self) -> u8 {
        match self {
            Smokes::Yes => 0,
            Smokes::No => 1,
            Smokes::Other => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Smokes::Yes => "yes",
            Smokes::No => "no",
            Smokes::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "yes" => Smokes::Yes,
            "no" => Smokes::No,
            _ => Smokes::Other,
        }
    }
}

impl From<String> for Smokes {
    fn from(value: String) -> Self {
        Smokes::parse(&value)
    }
}

impl From<Smokes> for String {
    fn from(value: Smokes) -> Self {
        value.as_str().to_string()
    }
}

/// Drinking habits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Drinks {
    Socially,
    Often,
    Other,
}

impl Drinks {
    pub fn code(self) -> u8 {
        match self {
            Drinks::Socially => 0,
            Drinks::Often => 1,
            Drinks::Other => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Drinks::Socially => "socially",
            Drinks::Often => "often",
            Drinks::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "socially" => Drinks::Socially,
            "often" => Drinks::Often,
            _ => Drinks::Other,
        }
    }
}

impl From<String> for Drinks {
    fn from(value: String) -> Self {
        Drinks::parse(&value)
    }
}

impl From<Drinks> for String {
    fn from(value: Drinks) -> Self {
        value.as_str().to_string()
    }
}

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Free-text place name plus the coordinates the geocoder resolved for it.
///
/// Coordinates are written by the profile/listing handlers at save time;
/// records created before geocoding succeeded simply carry none.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub place: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Location {
    pub fn new(place: Option<String>, coordinates: Option<Coordinates>) -> Self {
        Self {
            place,
            latitude: coordinates.map(|c| c.latitude),
            longitude: coordinates.map(|c| c.longitude),
        }
    }

    /// Both members present and finite, or no coordinates at all.
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) if latitude.is_finite() && longitude.is_finite() => {
                Some(Coordinates { latitude, longitude })
            }
            _ => None,
        }
    }
}

/// User profile with the attributes the ranker reads.
///
/// Every matching attribute is optional; a missing attribute drops out of
/// scoring instead of defaulting. Income stays as the free text the profile
/// form collected and is parsed at scoring time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub orientation: Option<Orientation>,
    #[serde(default)]
    pub ethnicity: Option<Ethnicity>,
    #[serde(default)]
    pub income: Option<String>,
    #[serde(default)]
    pub smokes: Option<Smokes>,
    #[serde(default)]
    pub drinks: Option<Drinks>,
    #[serde(default)]
    pub location: Location,
}

/// Room listing with the attributes the ranker reads plus listing details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomListing {
    pub id: Uuid,
    #[serde(rename = "ownerId")]
    pub owner_id: String,
    pub rent: f64,
    #[serde(rename = "availableFrom")]
    pub available_from: NaiveDate,
    pub duration: String,
    #[serde(rename = "roomType")]
    pub room_type: String,
    pub layout: String,
    pub deposit: f64,
    pub description: String,
    #[serde(default)]
    pub location: Location,
    #[serde(rename = "imageUrls", default)]
    pub image_urls: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// A candidate user with its computed score. Lower scores are better.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedUser {
    #[serde(flatten)]
    pub profile: Profile,
    pub score: f64,
    #[serde(rename = "distanceKm")]
    pub distance_km: Option<f64>,
}

/// A candidate room with its computed score. Lower scores are better.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedRoom {
    #[serde(flatten)]
    pub room: RoomListing,
    pub score: f64,
    #[serde(rename = "distanceKm")]
    pub distance_km: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_categories_parse_to_other() {
        assert_eq!(Gender::parse("nonbinary"), Gender::Other);
        assert_eq!(Orientation::parse("asexual"), Orientation::Other);
        assert_eq!(Ethnicity::parse("martian"), Ethnicity::Other);
        assert_eq!(Smokes::parse("sometimes"), Smokes::Other);
        assert_eq!(Drinks::parse("never"), Drinks::Other);
    }

    #[test]
    fn test_other_code_is_highest_plus_one() {
        assert_eq!(Gender::Other.code(), Gender::Male.code() + 1);
        assert_eq!(Orientation::Other.code(), Orientation::Bisexual.code() + 1);
        assert_eq!(Ethnicity::Other.code(), Ethnicity::White.code() + 1);
        assert_eq!(Smokes::Other.code(), Smokes::No.code() + 1);
        assert_eq!(Drinks::Other.code(), Drinks::Often.code() + 1);
    }

    #[test]
    fn test_roundtrip_through_strings() {
        assert_eq!(Ethnicity::parse(Ethnicity::MiddleEastern.as_str()), Ethnicity::MiddleEastern);
        assert_eq!(Gender::parse(Gender::Male.as_str()), Gender::Male);
    }

    #[test]
    fn test_coordinates_require_both_members() {
        let full = Location {
            place: Some("Skopje".to_string()),
            latitude: Some(42.0),
            longitude: Some(21.43),
        };
        assert!(full.coordinates().is_some());

        let partial = Location {
            place: Some("Skopje".to_string()),
            latitude: Some(42.0),
            longitude: None,
        };
        assert!(partial.coordinates().is_none());

        let malformed = Location {
            place: Some("Skopje".to_string()),
            latitude: Some(f64::NAN),
            longitude: Some(21.43),
        };
        assert!(malformed.coordinates().is_none());
    }
}
