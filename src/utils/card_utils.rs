use crate::playerdb::dto::player_profile::{PlayerAccount, PlayerProfile};
use std::fmt::Write;

/// Renders a profile as a plain-text card for the terminal.
pub fn render_profile_card(profile: &PlayerProfile) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", profile.platform.label().to_uppercase());
    let _ = writeln!(out, "{}", profile.username);
    let _ = writeln!(out, "Avatar: {}", profile.avatar);
    if let Some(id) = &profile.id {
        let _ = writeln!(out, "Profile ID: {}", id);
    }
    if let Some(raw_id) = &profile.raw_id {
        let _ = writeln!(out, "Raw ID: {}", raw_id);
    }

    if !profile.meta.is_empty() {
        let _ = writeln!(out, "\nPROFILE STATS");
        write_fields(&mut out, profile.meta.iter(), "  ");
    }

    if !profile.accounts.is_empty() {
        let _ = writeln!(out, "\nLINKED ACCOUNTS");
        for account in &profile.accounts {
            write_account(&mut out, account);
        }
    }

    let _ = write!(
        out,
        "\nShowing live data from PlayerDB for {} on {}.",
        profile.username,
        profile.platform.label()
    );
    out
}

pub fn render_error(message: &str) -> String {
    format!("Lookup failed: {}", message)
}

fn write_account(out: &mut String, account: &PlayerAccount) {
    let service = account.service.as_deref().unwrap_or("Account");
    let name = account.username.as_deref().unwrap_or(&account.id);
    let _ = writeln!(out, "  [{}] {}", service, name);
    if let Some(link) = &account.link {
        let _ = writeln!(out, "    View: {}", link);
    }
    if let Some(extra) = &account.extra {
        write_fields(out, extra.iter(), "    ");
    }
}

fn write_fields<'a>(
    out: &mut String,
    fields: impl Iterator<Item = (&'a String, &'a String)>,
    indent: &str,
) {
    for (label, value) in fields {
        let _ = writeln!(out, "{}{}: {}", indent, label, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playerdb::dto::player_profile::PlayerPlatform;
    use std::collections::BTreeMap;

    #[test]
    fn test_card_lists_stats_and_accounts() {
        let mut meta = BTreeMap::new();
        meta.insert("Gamerscore".to_string(), "1337".to_string());
        let mut extra = BTreeMap::new();
        extra.insert("Followers".to_string(), "19000000".to_string());

        let profile = PlayerProfile {
            username: "Ninja".to_string(),
            id: Some("2533274884045330".to_string()),
            raw_id: None,
            avatar: "https://avatar-ssl.xboxlive.com/ninja.png".to_string(),
            platform: PlayerPlatform::Xbox,
            meta,
            accounts: vec![
                PlayerAccount {
                    id: "twitch".to_string(),
                    service: Some("Twitch".to_string()),
                    username: None,
                    link: Some("https://twitch.tv/ninja".to_string()),
                    extra: Some(extra),
                },
                PlayerAccount {
                    id: "account-1".to_string(),
                    service: None,
                    username: None,
                    link: None,
                    extra: None,
                },
            ],
        };

        let card = render_profile_card(&profile);
        assert!(card.starts_with("XBOX LIVE\nNinja\n"));
        assert!(card.contains("Profile ID: 2533274884045330"));
        assert!(!card.contains("Raw ID"));
        assert!(card.contains("PROFILE STATS\n  Gamerscore: 1337"));
        assert!(card.contains("  [Twitch] twitch\n    View: https://twitch.tv/ninja\n    Followers: 19000000"));
        assert!(card.contains("  [Account] account-1"));
        assert!(card.ends_with("Showing live data from PlayerDB for Ninja on Xbox Live."));
    }

    #[test]
    fn test_render_error() {
        assert_eq!(render_error("Player not found"), "Lookup failed: Player not found");
    }
}
