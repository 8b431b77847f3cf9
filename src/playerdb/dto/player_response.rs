use log::debug;
use serde::Deserialize;
use serde_json::Value;

/// Top-level envelope returned by `GET /api/player/<platform>/<query>`.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct PlayerDbResponse {
    #[serde(default)]
    pub success: bool,
    /// Machine-readable status such as `player.found` or `minecraft.invalid_username`.
    #[serde(default)]
    pub code: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
    /// Usually `{ "player": {...} }`; any other shape counts as no player.
    #[serde(default)]
    pub data: Option<Value>,
}

impl PlayerDbResponse {
    pub fn message(&self) -> Option<&str> {
        self.message.as_ref().and_then(Value::as_str)
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_ref().and_then(Value::as_str)
    }

    /// Consumes the envelope and returns the player payload when one is usable.
    /// A payload without a string `username` counts as absent.
    pub fn into_player(self) -> Option<RawPlayer> {
        let mut data = self.data?;
        let player = data.get_mut("player")?.take();
        if player.is_null() {
            return None;
        }
        match serde_json::from_value::<RawPlayer>(player) {
            Ok(raw) => Some(raw),
            Err(e) => {
                debug!("[PlayerDB API] Ignoring unusable player payload: {}", e);
                None
            }
        }
    }
}

/// The platform-specific player payload. Only `username` is required; every
/// other field is kept loosely typed and interpreted by the normalizer.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RawPlayer {
    pub username: String,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub raw_id: Option<Value>,
    #[serde(default)]
    pub avatar: Option<Value>,
    #[serde(default)]
    pub meta: Option<Value>,
    #[serde(default)]
    pub accounts: Option<Value>,
}

impl RawPlayer {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            id: None,
            raw_id: None,
            avatar: None,
            meta: None,
            accounts: None,
        }
    }

    pub fn avatar_str(&self) -> Option<&str> {
        self.avatar.as_ref().and_then(Value::as_str)
    }
}
