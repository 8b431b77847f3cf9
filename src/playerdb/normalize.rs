//! Flattens PlayerDB's platform-specific player payloads into [`PlayerProfile`].
//!
//! Everything here is pure: the same payload and platform always produce the
//! same profile, and malformed optional fields are treated as absent.

use crate::playerdb::dto::player_profile::{PlayerAccount, PlayerPlatform, PlayerProfile};
use crate::playerdb::dto::player_response::RawPlayer;
use crate::utils::avatar_utils::resolve_avatar;
use crate::utils::format_utils::{format_fields, format_number};
use crate::utils::merge_utils::merge_dedup_by;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Account keys that map onto dedicated [`PlayerAccount`] fields.
const ACCOUNT_KEYS: [&str; 4] = ["id", "username", "service", "url"];

pub fn normalize_player(player: &RawPlayer, platform: PlayerPlatform) -> PlayerProfile {
    PlayerProfile {
        username: player.username.clone(),
        id: player.id.as_ref().and_then(scalar_text),
        raw_id: player.raw_id.as_ref().and_then(scalar_text),
        avatar: resolve_avatar(player.avatar_str(), &player.username),
        platform,
        meta: sanitize_meta(player.meta.as_ref()),
        accounts: extract_accounts(player),
    }
}

/// Formats every meta entry, dropping the ones with nothing to show.
/// The nested `accounts` list is formatted here like any other entry.
pub fn sanitize_meta(meta: Option<&Value>) -> BTreeMap<String, String> {
    match meta.and_then(Value::as_object) {
        Some(fields) => format_fields(fields, &[]),
        None => BTreeMap::new(),
    }
}

/// Top-level accounts followed by `meta.accounts`, de-duplicated by id (first wins).
pub fn extract_accounts(player: &RawPlayer) -> Vec<PlayerAccount> {
    let top_level = as_list(player.accounts.as_ref());
    let nested = as_list(
        player
            .meta
            .as_ref()
            .and_then(|meta| meta.get("accounts")),
    );

    // Placeholder ids count positions across both lists, before de-duplication.
    let offset = top_level.len();
    let top_level: Vec<PlayerAccount> = top_level
        .iter()
        .enumerate()
        .map(|(index, entry)| build_account(entry, index))
        .collect();
    let nested: Vec<PlayerAccount> = nested
        .iter()
        .enumerate()
        .map(|(index, entry)| build_account(entry, offset + index))
        .collect();

    merge_dedup_by([top_level, nested], |account| account.id.clone())
}

fn build_account(entry: &Value, index: usize) -> PlayerAccount {
    let empty = Map::new();
    let fields = entry.as_object().unwrap_or(&empty);

    let id = fields
        .get("id")
        .and_then(scalar_text)
        .or_else(|| fields.get("username").and_then(scalar_text))
        .unwrap_or_else(|| format!("account-{}", index));

    PlayerAccount {
        id,
        service: string_field(fields, "service"),
        username: string_field(fields, "username"),
        link: string_field(fields, "url"),
        extra: build_extra(fields),
    }
}

fn build_extra(fields: &Map<String, Value>) -> Option<BTreeMap<String, String>> {
    let extra = format_fields(fields, &ACCOUNT_KEYS);
    if extra.is_empty() {
        None
    } else {
        Some(extra)
    }
}

fn as_list(value: Option<&Value>) -> &[Value] {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(str::to_string)
}

// Identifiers may arrive as numbers (Steam, Xbox) as well as strings.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(format_number(n)),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
