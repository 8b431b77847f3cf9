use crate::config::build_http_client;
use crate::error::{AppError, Result};
use crate::playerdb::dto::player_profile::{PlayerPlatform, PlayerProfile};
use crate::playerdb::dto::player_response::PlayerDbResponse;
use crate::playerdb::normalize::normalize_player;
use crate::state::config_state::LookupConfig;
use log::{debug, error, info};
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::Client;

const LOG_PREVIEW_LIMIT: usize = 1000;

/// Client for the PlayerDB lookup endpoint.
///
/// Holds no mutable state, so one instance can serve concurrent lookups.
#[derive(Debug, Clone)]
pub struct PlayerDbApi {
    client: Client,
    base_url: String,
}

impl PlayerDbApi {
    pub fn new(config: &LookupConfig) -> Result<Self> {
        Self::with_base_url(&config.api_base_url, config.request_timeout_secs)
    }

    pub fn with_base_url(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(AppError::Config("API base URL must not be empty".to_string()));
        }
        Ok(Self {
            client: build_http_client(timeout_secs)?,
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `<base>/<platform>/<percent-encoded query>`
    pub fn player_url(&self, platform: PlayerPlatform, username: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            platform.as_str(),
            urlencoding::encode(username)
        )
    }

    /// Looks a player up and normalizes the result.
    ///
    /// # Errors
    ///
    /// * `AppError::Validation` if `username` is blank; no request is sent.
    /// * `AppError::Transport` if the request fails, returns a non-2xx status or an unreadable body.
    /// * `AppError::NotFound` if the envelope reports failure or carries no player.
    pub async fn fetch_player_profile(
        &self,
        username: &str,
        platform: PlayerPlatform,
    ) -> Result<PlayerProfile> {
        let trimmed = username.trim();
        if trimmed.is_empty() {
            debug!("[PlayerDB API] Rejecting empty query");
            return Err(AppError::empty_query());
        }

        let envelope = self.fetch_envelope(trimmed, platform).await?;
        interpret_response(envelope, platform)
    }

    async fn fetch_envelope(
        &self,
        username: &str,
        platform: PlayerPlatform,
    ) -> Result<PlayerDbResponse> {
        let url = self.player_url(platform, username);
        info!("[PlayerDB API] Looking up '{}' on {}", username, platform.label());
        debug!("[PlayerDB API] Full URL: {}", url);

        let response = self
            .client
            .get(&url)
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|e| {
                error!("[PlayerDB API] Request failed: {}", e);
                AppError::transport()
            })?;

        let status = response.status();
        debug!("[PlayerDB API] Response status: {}", status);

        if !status.is_success() {
            error!("[PlayerDB API] Error response: Status {}", status);
            return Err(AppError::transport());
        }

        let response_text = response.text().await.map_err(|e| {
            error!("[PlayerDB API] Failed to read response body: {}", e);
            AppError::transport()
        })?;

        debug!(
            "[PlayerDB API] Received response body ({} bytes)",
            response_text.len()
        );

        serde_json::from_str::<PlayerDbResponse>(&response_text).map_err(|e| {
            error!(
                "[PlayerDB API] Failed to parse JSON response: {}. Response: {}",
                e,
                log_preview(&response_text)
            );
            AppError::transport()
        })
    }
}

/// Validates the envelope and normalizes its player.
pub fn interpret_response(
    envelope: PlayerDbResponse,
    platform: PlayerPlatform,
) -> Result<PlayerProfile> {
    if !envelope.success {
        debug!(
            "[PlayerDB API] Lookup unsuccessful (code: {:?})",
            envelope.code()
        );
        return Err(AppError::not_found(envelope.message()));
    }

    let message = envelope.message().map(str::to_string);
    match envelope.into_player() {
        Some(player) => {
            let profile = normalize_player(&player, platform);
            info!(
                "[PlayerDB API] Found '{}' with {} linked account(s)",
                profile.username,
                profile.accounts.len()
            );
            Ok(profile)
        }
        None => {
            debug!("[PlayerDB API] Envelope reported success without a player");
            Err(AppError::not_found(message.as_deref()))
        }
    }
}

fn log_preview(text: &str) -> String {
    if text.len() > LOG_PREVIEW_LIMIT {
        let cut = (0..=LOG_PREVIEW_LIMIT)
            .rev()
            .find(|&i| text.is_char_boundary(i))
            .unwrap_or(0);
        format!("{}... (truncated)", &text[..cut])
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EMPTY_QUERY_MESSAGE, NOT_FOUND_MESSAGE};
    use serde_json::json;

    fn envelope(value: serde_json::Value) -> PlayerDbResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_player_url_encodes_query() {
        let api = PlayerDbApi::with_base_url("https://playerdb.co/api/player/", 10).unwrap();
        assert_eq!(
            api.player_url(PlayerPlatform::Xbox, "Major Nelson"),
            "https://playerdb.co/api/player/xbox/Major%20Nelson"
        );
        assert_eq!(
            api.player_url(PlayerPlatform::Minecraft, "a/b?c"),
            "https://playerdb.co/api/player/minecraft/a%2Fb%3Fc"
        );
    }

    #[test]
    fn test_blank_base_url_is_rejected() {
        assert!(matches!(
            PlayerDbApi::with_base_url("  ", 10),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_default_config_points_at_playerdb() {
        let api = PlayerDbApi::new(&LookupConfig::default()).unwrap();
        assert_eq!(api.base_url(), crate::config::DEFAULT_API_BASE_URL);
    }

    #[tokio::test]
    async fn test_whitespace_query_fails_before_network() {
        // Port 9 (discard) is never contacted: validation short-circuits.
        let api = PlayerDbApi::with_base_url("http://127.0.0.1:9", 1).unwrap();
        let err = api
            .fetch_player_profile("   \t", PlayerPlatform::Steam)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == EMPTY_QUERY_MESSAGE));
    }

    #[test]
    fn test_unsuccessful_envelope_is_not_found_with_message() {
        let err = interpret_response(
            envelope(json!({ "success": false, "message": "Player not found" })),
            PlayerPlatform::Minecraft,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Player not found"));
    }

    #[test]
    fn test_unsuccessful_envelope_with_odd_data_is_not_found() {
        let err = interpret_response(
            envelope(json!({ "success": false, "message": "Unknown Steam ID", "data": false })),
            PlayerPlatform::Steam,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Unknown Steam ID"));
    }

    #[test]
    fn test_unsuccessful_envelope_without_message_uses_generic_text() {
        let err = interpret_response(envelope(json!({ "success": false })), PlayerPlatform::Psn)
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == NOT_FOUND_MESSAGE));
    }

    #[test]
    fn test_successful_envelope_without_player_is_not_found() {
        let err = interpret_response(
            envelope(json!({ "success": true, "message": "", "data": {} })),
            PlayerPlatform::Bedrock,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == NOT_FOUND_MESSAGE));
    }

    #[test]
    fn test_successful_envelope_is_normalized_for_queried_platform() {
        let profile = interpret_response(
            envelope(json!({
                "success": true,
                "message": "Successfully found player by given ID.",
                "data": { "player": { "username": "Ninja", "meta": { "gamerscore": 1337 } } }
            })),
            PlayerPlatform::Xbox,
        )
        .unwrap();
        assert_eq!(profile.platform, PlayerPlatform::Xbox);
        assert_eq!(profile.meta.get("Gamerscore").map(String::as_str), Some("1337"));
    }

    #[test]
    fn test_log_preview_truncates_on_char_boundary() {
        let long = "é".repeat(LOG_PREVIEW_LIMIT);
        let preview = log_preview(&long);
        assert!(preview.ends_with("... (truncated)"));
        assert!(log_preview("short").eq("short"));
    }
}
