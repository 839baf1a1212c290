use url::Url;

use crate::models::{Glyph, StyleToken};

/// Ordered rule table for deriving a tile's badge from its url. First
/// match wins, so the chat providers sit above the generic `mail`
/// pattern (gmail would otherwise shadow them the other way around).
const RULES: &[(&[&str], Glyph, StyleToken)] = &[
    (&["openai", "chatgpt"], Glyph::MessageSquare, StyleToken::SolidEmerald),
    (&["gemini", "bard"], Glyph::Sparkles, StyleToken::SolidBlue),
    (&["claude", "anthropic"], Glyph::Brain, StyleToken::SolidOrange),
    (&["perplexity"], Glyph::Zap, StyleToken::SolidTeal),
    (&["github"], Glyph::Github, StyleToken::NeutralDark),
    (&["youtube"], Glyph::Youtube, StyleToken::RedOrange),
    (&["twitter", "x.com"], Glyph::Twitter, StyleToken::BlueSky),
    (&["mail", "gmail"], Glyph::Mail, StyleToken::EmeraldTeal),
];

pub const DEFAULT_GLYPH: Glyph = Glyph::Globe;
pub const DEFAULT_STYLE: StyleToken = StyleToken::IndigoPurple;

/// Map a url (possibly empty, partial, or malformed) to a glyph and
/// style token. Total: unrecognized input falls through to the default.
pub fn classify(url: &str) -> (Glyph, StyleToken) {
    let lower = url.to_lowercase();
    for (patterns, glyph, style) in RULES {
        if patterns.iter().any(|p| lower.contains(p)) {
            return (*glyph, *style);
        }
    }
    (DEFAULT_GLYPH, DEFAULT_STYLE)
}

/// Derive a display title from the url's host: strip a leading `www.`,
/// take the first dot-separated label, capitalize its first character.
/// Returns `None` when no host can be parsed; the caller keeps whatever
/// title it already has.
pub fn infer_title(url: &str) -> Option<String> {
    let candidate = if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    };

    let parsed = Url::parse(&candidate).ok()?;
    let host = parsed.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    let label = host.split('.').next()?;
    if label.is_empty() {
        return None;
    }

    let mut chars = label.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::classify;
    use super::infer_title;
    use crate::models::{Glyph, StyleToken};

    #[test]
    fn known_domains_map_to_documented_pairs() {
        assert_eq!(
            classify("https://github.com"),
            (Glyph::Github, StyleToken::NeutralDark)
        );
        assert_eq!(
            classify("https://youtube.com/watch"),
            (Glyph::Youtube, StyleToken::RedOrange)
        );
        assert_eq!(
            classify("https://twitter.com"),
            (Glyph::Twitter, StyleToken::BlueSky)
        );
        assert_eq!(classify("x.com"), (Glyph::Twitter, StyleToken::BlueSky));
        assert_eq!(
            classify("https://gmail.com"),
            (Glyph::Mail, StyleToken::EmeraldTeal)
        );
    }

    #[test]
    fn chat_providers_map_to_solid_badges() {
        assert_eq!(
            classify("https://chat.openai.com"),
            (Glyph::MessageSquare, StyleToken::SolidEmerald)
        );
        assert_eq!(
            classify("https://gemini.google.com"),
            (Glyph::Sparkles, StyleToken::SolidBlue)
        );
        assert_eq!(
            classify("https://claude.ai"),
            (Glyph::Brain, StyleToken::SolidOrange)
        );
        assert_eq!(
            classify("https://www.perplexity.ai"),
            (Glyph::Zap, StyleToken::SolidTeal)
        );
    }

    #[test]
    fn chat_providers_win_over_the_mail_pattern() {
        // "mail.anthropic.com" contains both "mail" and "anthropic".
        assert_eq!(
            classify("https://mail.anthropic.com"),
            (Glyph::Brain, StyleToken::SolidOrange)
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(
            classify("HTTPS://GITHUB.COM"),
            (Glyph::Github, StyleToken::NeutralDark)
        );
    }

    #[test]
    fn unknown_empty_and_malformed_input_fall_through_to_default() {
        assert_eq!(
            classify("https://example.com"),
            (Glyph::Globe, StyleToken::IndigoPurple)
        );
        assert_eq!(classify(""), (Glyph::Globe, StyleToken::IndigoPurple));
        assert_eq!(
            classify("not a url at all"),
            (Glyph::Globe, StyleToken::IndigoPurple)
        );
    }

    #[test]
    fn title_comes_from_first_host_label_capitalized() {
        assert_eq!(
            infer_title("https://www.Example.com/path"),
            Some("Example".to_string())
        );
        assert_eq!(infer_title("github.com"), Some("Github".to_string()));
        assert_eq!(
            infer_title("https://news.ycombinator.com"),
            Some("News".to_string())
        );
    }

    #[test]
    fn scheme_is_prepended_when_missing() {
        assert_eq!(
            infer_title("www.rust-lang.org"),
            Some("Rust-lang".to_string())
        );
    }

    #[test]
    fn unparseable_input_yields_none() {
        assert_eq!(infer_title("not a url"), None);
        assert_eq!(infer_title(""), None);
        assert_eq!(infer_title("https://"), None);
    }
}
