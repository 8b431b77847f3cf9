use crate::config::FALLBACK_AVATAR_URL;
use url::Url;

/// Initials avatar seeded with the username. The same name always yields the same URL.
pub fn fallback_avatar(username: &str) -> String {
    let seed = urlencoding::encode(username);
    format!("{}?radius=50&seed={}", FALLBACK_AVATAR_URL, seed)
}

/// Returns the source avatar when it is a usable absolute URL, otherwise the fallback.
pub fn resolve_avatar(source: Option<&str>, username: &str) -> String {
    match source {
        Some(candidate) if !candidate.trim().is_empty() && Url::parse(candidate).is_ok() => {
            candidate.to_string()
        }
        _ => fallback_avatar(username),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_avatar_is_deterministic() {
        assert_eq!(fallback_avatar("Notch"), fallback_avatar("Notch"));
        assert_ne!(fallback_avatar("Notch"), fallback_avatar("jeb_"));
    }

    #[test]
    fn test_fallback_avatar_percent_encodes_seed() {
        assert_eq!(
            fallback_avatar("Ninja Gamer&co"),
            "https://api.dicebear.com/7.x/initials/svg?radius=50&seed=Ninja%20Gamer%26co"
        );
    }

    #[test]
    fn test_resolve_avatar_prefers_source() {
        let source = "https://crafthead.net/avatar/069a79f444e94726a5befca90e38aaf5";
        assert_eq!(resolve_avatar(Some(source), "Notch"), source);
    }

    #[test]
    fn test_resolve_avatar_rejects_blank_and_relative() {
        assert_eq!(resolve_avatar(Some("  "), "Notch"), fallback_avatar("Notch"));
        assert_eq!(resolve_avatar(Some("/img/a.png"), "Notch"), fallback_avatar("Notch"));
        assert_eq!(resolve_avatar(None, "Notch"), fallback_avatar("Notch"));
    }
}
