pub mod api;
pub mod dto;
pub mod normalize;

pub use normalize::normalize_player;
