//! NEXUS orchestration modes.
//!
//! The server defines the accepted set. Known names get their own
//! variant; anything else is carried as `Other` and forwarded verbatim.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ChatMode {
    #[default]
    Chat,
    Code,
    Reasoning,
    SearchRag,
    MultiModel,
    Fast,
    Creative,
    /// A tag this client does not know about, sent as-is.
    Other(String),
}

impl ChatMode {
    pub const KNOWN: [ChatMode; 7] = [
        ChatMode::Chat,
        ChatMode::Code,
        ChatMode::Reasoning,
        ChatMode::SearchRag,
        ChatMode::MultiModel,
        ChatMode::Fast,
        ChatMode::Creative,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Chat => "chat",
            Self::Code => "code",
            Self::Reasoning => "reasoning",
            Self::SearchRag => "search_rag",
            Self::MultiModel => "multi_model",
            Self::Fast => "fast",
            Self::Creative => "creative",
            Self::Other(tag) => tag,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<&str> for ChatMode {
    fn from(tag: &str) -> Self {
        Self::KNOWN
            .into_iter()
            .find(|m| m.as_str() == tag)
            .unwrap_or_else(|| Self::Other(tag.to_string()))
    }
}

impl FromStr for ChatMode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for ChatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ChatMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ChatMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from(tag.as_str()))
    }
}
