pub mod player_profile;
pub mod player_response;

pub use player_profile::{PlayerAccount, PlayerPlatform, PlayerProfile};
pub use player_response::{PlayerDbResponse, RawPlayer};
