pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod playerdb;
pub mod state;
pub mod utils;
