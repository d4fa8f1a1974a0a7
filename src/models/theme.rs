use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The visual conventions a log can be rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    /// A single bookmarklet-style container with highlighted paragraphs.
    Bookmarklet,
    /// Chat layout with speech bubbles that carry a tail.
    Bubble,
    /// Chat layout with gradient pills.
    Pill,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Bookmarklet, Theme::Bubble, Theme::Pill];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Bookmarklet => "bookmarklet",
            Theme::Bubble => "bubble",
            Theme::Pill => "pill",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a theme name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown theme: {0}")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bookmarklet" | "bookmark" => Ok(Theme::Bookmarklet),
            "bubble" | "chat" | "chat-bubble" => Ok(Theme::Bubble),
            "pill" | "gradient" | "chat-pill" => Ok(Theme::Pill),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("bookmarklet".parse::<Theme>(), Ok(Theme::Bookmarklet));
        assert_eq!(" Chat ".parse::<Theme>(), Ok(Theme::Bubble));
        assert_eq!("gradient".parse::<Theme>(), Ok(Theme::Pill));
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn serde_uses_kebab_case() {
        let json = serde_json::to_string(&Theme::Bookmarklet).unwrap();
        assert_eq!(json, "\"bookmarklet\"");
        let theme: Theme = serde_json::from_str("\"pill\"").unwrap();
        assert_eq!(theme, Theme::Pill);
    }
}
