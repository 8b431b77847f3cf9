use crate::error::{AppError, CommandError};
use crate::playerdb::api::playerdb_api::PlayerDbApi;
use crate::playerdb::dto::player_profile::{PlayerPlatform, PlayerProfile};
use crate::state::lookup_state::LookupState;
use log::debug;
use serde::Serialize;

/// A ready-made lookup offered next to the search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LookupPreset {
    pub label: &'static str,
    pub username: &'static str,
    pub platform: PlayerPlatform,
}

pub const LOOKUP_PRESETS: [LookupPreset; 2] = [
    LookupPreset {
        label: "Minecraft · Notch",
        username: "Notch",
        platform: PlayerPlatform::Minecraft,
    },
    LookupPreset {
        label: "Xbox · Ninja",
        username: "Ninja",
        platform: PlayerPlatform::Xbox,
    },
];

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PlatformOption {
    pub id: PlayerPlatform,
    pub label: &'static str,
}

pub fn list_platforms() -> Vec<PlatformOption> {
    PlayerPlatform::ALL
        .into_iter()
        .map(|platform| PlatformOption {
            id: platform,
            label: platform.label(),
        })
        .collect()
}

pub fn find_preset(index: usize) -> Result<LookupPreset, CommandError> {
    LOOKUP_PRESETS.get(index).copied().ok_or_else(|| {
        AppError::Validation(format!(
            "Unknown preset {}. Choose between 0 and {}",
            index,
            LOOKUP_PRESETS.len() - 1
        ))
        .into()
    })
}

/// Runs one lookup and records its outcome in `state`.
///
/// A blank query fails without touching the network, and still clears any
/// profile currently shown.
pub async fn lookup_player(
    api: &PlayerDbApi,
    state: &LookupState,
    query: &str,
    platform: PlayerPlatform,
) -> Result<PlayerProfile, CommandError> {
    debug!("Command called: lookup_player ({} on {})", query.trim(), platform);
    let ticket = state.begin();

    let result = api.fetch_player_profile(query, platform).await;
    state.complete(ticket, &result).await;

    if result.is_ok() {
        debug!("Command completed: lookup_player");
    } else {
        debug!("Command failed: lookup_player");
    }

    result.map_err(|e| e.into())
}
