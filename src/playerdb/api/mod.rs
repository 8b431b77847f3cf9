pub mod playerdb_api;

pub use playerdb_api::PlayerDbApi;
