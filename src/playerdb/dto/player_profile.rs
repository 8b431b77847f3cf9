use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Networks PlayerDB can resolve players on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerPlatform {
    Minecraft,
    Bedrock,
    Xbox,
    Psn,
    Steam,
}

impl PlayerPlatform {
    pub const ALL: [PlayerPlatform; 5] = [
        PlayerPlatform::Minecraft,
        PlayerPlatform::Bedrock,
        PlayerPlatform::Xbox,
        PlayerPlatform::Psn,
        PlayerPlatform::Steam,
    ];

    /// Path segment used by the PlayerDB API.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerPlatform::Minecraft => "minecraft",
            PlayerPlatform::Bedrock => "bedrock",
            PlayerPlatform::Xbox => "xbox",
            PlayerPlatform::Psn => "psn",
            PlayerPlatform::Steam => "steam",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlayerPlatform::Minecraft => "Minecraft Java",
            PlayerPlatform::Bedrock => "Minecraft Bedrock",
            PlayerPlatform::Xbox => "Xbox Live",
            PlayerPlatform::Psn => "PlayStation Network",
            PlayerPlatform::Steam => "Steam",
        }
    }
}

impl Default for PlayerPlatform {
    fn default() -> Self {
        PlayerPlatform::Minecraft
    }
}

impl fmt::Display for PlayerPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlayerPlatform {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_ascii_lowercase();
        PlayerPlatform::ALL
            .into_iter()
            .find(|platform| platform.as_str() == wanted)
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Unknown platform '{}'. Expected one of: minecraft, bedrock, xbox, psn, steam",
                    value.trim()
                ))
            })
    }
}

/// A linked account on another service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerAccount {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Remaining account fields, formatted for display. Never `Some` of an empty map.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<BTreeMap<String, String>>,
}

/// Platform-agnostic player profile built from a single PlayerDB response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_id: Option<String>,
    pub avatar: String,
    pub platform: PlayerPlatform,
    pub meta: BTreeMap<String, String>,
    pub accounts: Vec<PlayerAccount>,
}
