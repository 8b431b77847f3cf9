pub mod avatar_utils; // Fallback avatars for players without one
pub mod card_utils; // Plain-text rendering of profiles
pub mod format_utils; // Display formatting for loosely typed JSON values
pub mod merge_utils;
