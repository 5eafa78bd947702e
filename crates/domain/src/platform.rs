//! Platform: the closed set of targets a configuration can name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A device or automation platform.
///
/// `Maui` and `Macos` are valid automation platforms but have no device
/// backend; selecting them as a device platform fails at driver
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum Platform {
    #[default]
    Maui,
    Android,
    Ios,
    Tvos,
    Maccatalyst,
    Macos,
    Winappsdk,
}

impl Platform {
    /// Every variant, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Maui,
        Self::Android,
        Self::Ios,
        Self::Tvos,
        Self::Maccatalyst,
        Self::Macos,
        Self::Winappsdk,
    ];

    /// Lower-case wire name, as used in configuration files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Maui => "maui",
            Self::Android => "android",
            Self::Ios => "ios",
            Self::Tvos => "tvos",
            Self::Maccatalyst => "maccatalyst",
            Self::Macos => "macos",
            Self::Winappsdk => "winappsdk",
        }
    }

    /// Whether this is one of the Apple device platforms.
    #[must_use]
    pub fn is_apple(self) -> bool {
        matches!(self, Self::Ios | Self::Tvos | Self::Maccatalyst | Self::Macos)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known platform.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown platform '{0}'")]
pub struct ParsePlatformError(pub String);

impl FromStr for Platform {
    type Err = ParsePlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParsePlatformError(s.to_string()))
    }
}

impl Serialize for Platform {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Platform {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
