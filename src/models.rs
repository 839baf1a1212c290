use serde::{Deserialize, Serialize};

/// Icon identifier for a dashboard tile. Closed set; anything the
/// classifier does not recognize renders as `Globe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Glyph {
    Github,
    Twitter,
    Youtube,
    Mail,
    Globe,
    MessageSquare,
    Sparkles,
    Brain,
    Zap,
}

impl Glyph {
    /// Short marker rendered inside the tile badge.
    pub fn symbol(&self) -> &'static str {
        match self {
            Glyph::Github => "gh",
            Glyph::Twitter => "tw",
            Glyph::Youtube => "yt",
            Glyph::Mail => "@",
            Glyph::Globe => "www",
            Glyph::MessageSquare => "chat",
            Glyph::Sparkles => "gem",
            Glyph::Brain => "ai",
            Glyph::Zap => "zap",
        }
    }
}

/// Color token for a tile. Gradient tokens belong to shortcut tiles,
/// solid tokens to assistant badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleToken {
    // Gradients (shortcut tiles)
    PurpleIndigo,
    RedOrange,
    BlueSky,
    EmeraldTeal,
    NeutralDark,
    IndigoPurple,
    GraySlate,
    // Solids (assistant badges)
    SolidEmerald,
    SolidBlue,
    SolidOrange,
    SolidTeal,
    SolidNeutral,
    SolidIndigo,
}

impl StyleToken {
    pub fn is_solid(&self) -> bool {
        matches!(
            self,
            StyleToken::SolidEmerald
                | StyleToken::SolidBlue
                | StyleToken::SolidOrange
                | StyleToken::SolidTeal
                | StyleToken::SolidNeutral
                | StyleToken::SolidIndigo
        )
    }

    /// Assistant badges only carry solid tokens; gradients coerce to the
    /// solid fallback.
    pub fn coerce_solid(self) -> StyleToken {
        if self.is_solid() {
            self
        } else {
            StyleToken::SolidIndigo
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            StyleToken::PurpleIndigo => Color::Magenta,
            StyleToken::RedOrange => Color::Red,
            StyleToken::BlueSky => Color::LightBlue,
            StyleToken::EmeraldTeal => Color::Green,
            StyleToken::NeutralDark => Color::DarkGray,
            StyleToken::IndigoPurple => Color::LightMagenta,
            StyleToken::GraySlate => Color::Gray,
            StyleToken::SolidEmerald => Color::Green,
            StyleToken::SolidBlue => Color::Blue,
            StyleToken::SolidOrange => Color::Yellow,
            StyleToken::SolidTeal => Color::Cyan,
            StyleToken::SolidNeutral => Color::Gray,
            StyleToken::SolidIndigo => Color::LightMagenta,
        }
    }
}

/// Which collection an entry belongs to. Assistants differ only in their
/// placeholder title, default badge, and the solid-style restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Shortcut,
    Assistant,
}

impl EntryKind {
    pub fn placeholder_title(&self) -> &'static str {
        match self {
            EntryKind::Shortcut => "New Site",
            EntryKind::Assistant => "New Bot",
        }
    }

    pub fn default_glyph(&self) -> Glyph {
        match self {
            EntryKind::Shortcut => Glyph::Globe,
            EntryKind::Assistant => Glyph::MessageSquare,
        }
    }

    pub fn default_style(&self) -> StyleToken {
        match self {
            EntryKind::Shortcut => StyleToken::GraySlate,
            EntryKind::Assistant => StyleToken::SolidNeutral,
        }
    }
}

/// One tile on the dashboard: a shortcut or an assistant launcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub title: String,
    pub url: String,
    pub glyph: Glyph,
    pub style: StyleToken,
}

/// Editable entry fields. Url edits additionally re-derive glyph/style
/// and, while the title is still a placeholder, the title itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Title,
    Url,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn parse(s: &str) -> Option<Theme> {
        match s {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

/// Modal state of the TUI, one popup at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum PopupMode {
    None,
    Notes,
    Calendar,
    Search,
    EditTitle,
    EditUrl,
}
