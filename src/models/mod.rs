// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Coordinates, Drinks, Ethnicity, Gender, Location, Orientation, Profile, RankedRoom,
    RankedUser, RoomListing, Smokes,
};
pub use requests::{CreateRoomRequest, RankMatchesRequest, UpdateProfileRequest, UpdateRoomRequest};
pub use responses::{
    ErrorResponse, HealthResponse, ProfileResponse, RankedRoomsResponse, RankedUsersResponse,
    RoomResponse, RoomsResponse,
};
