//! The `[log]` table. Every key may be left out.

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Log {
    #[serde(default)]
    pub console: LogConsole,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LogConsole {
    pub enabled: bool,
    /// Verbosity of the app's own crates; everything else logs at `warn`.
    pub level: Level,
    pub log_format: LogFormat,
    /// Full `EnvFilter` directive replacing the per-crate one.
    pub filtering_directive: Option<String>,
}

impl Default for LogConsole {
    fn default() -> Self {
        Self {
            enabled: true,
            level: Level::default(),
            log_format: LogFormat::default(),
            filtering_directive: None,
        }
    }
}

/// A [`tracing::Level`] read from its name, case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level(pub(super) tracing::Level);

impl Level {
    pub fn directive(self) -> String {
        self.0.as_str().to_lowercase()
    }
}

impl Default for Level {
    fn default() -> Self {
        Self(tracing::Level::INFO)
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        name.parse::<tracing::Level>()
            .map(Self)
            .map_err(|_| serde::de::Error::custom(format!("unknown log level `{name}`")))
    }
}

#[derive(Default, Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Plain lines for a terminal.
    Default,
    #[default]
    Json,
}
