pub mod config_state;
pub mod lookup_state;

pub use lookup_state::LookupState;
