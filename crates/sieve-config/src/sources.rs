use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The lookup source slots, named after the tables they read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Core 6k vocabulary list
    Core,
    /// User-maintained dictionary
    User,
    /// JMdict, the broad fallback
    Jmdict,
}

impl SourceKind {
    pub const ALL: [SourceKind; 3] = [SourceKind::Core, SourceKind::User, SourceKind::Jmdict];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Core => "core",
            SourceKind::User => "user",
            SourceKind::Jmdict => "jmdict",
        }
    }

    /// Heading used for the layer in reports
    pub fn title(&self) -> &'static str {
        match self {
            SourceKind::Core => "Core 6k list",
            SourceKind::User => "user list",
            SourceKind::Jmdict => "jmdict list",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        SourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| ConfigError::UnknownSource(s.to_string()))
    }
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// File backing the source, relative paths resolve against the data dir
    pub path: String,
}

impl SourceConfig {
    fn new(path: &str) -> Self {
        Self {
            enabled: default_enabled(),
            path: path.to_string(),
        }
    }
}

fn default_order() -> Vec<SourceKind> {
    SourceKind::ALL.to_vec()
}

fn default_core() -> SourceConfig {
    SourceConfig::new("core.db")
}

fn default_user() -> SourceConfig {
    SourceConfig::new("dict.db")
}

fn default_jmdict() -> SourceConfig {
    SourceConfig::new("jmdict.db")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Resolution order, earlier sources win
    #[serde(default = "default_order")]
    pub order: Vec<SourceKind>,
    #[serde(default = "default_core")]
    pub core: SourceConfig,
    #[serde(default = "default_user")]
    pub user: SourceConfig,
    #[serde(default = "default_jmdict")]
    pub jmdict: SourceConfig,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            order: default_order(),
            core: default_core(),
            user: default_user(),
            jmdict: default_jmdict(),
        }
    }
}

impl SourcesConfig {
    pub fn get(&self, kind: SourceKind) -> &SourceConfig {
        match kind {
            SourceKind::Core => &self.core,
            SourceKind::User => &self.user,
            SourceKind::Jmdict => &self.jmdict,
        }
    }

    fn get_mut(&mut self, kind: SourceKind) -> &mut SourceConfig {
        match kind {
            SourceKind::Core => &mut self.core,
            SourceKind::User => &mut self.user,
            SourceKind::Jmdict => &mut self.jmdict,
        }
    }

    pub fn is_enabled(&self, kind: SourceKind) -> bool {
        self.get(kind).enabled
    }

    /// Configured slots in resolution order; a kind listed twice is consulted once
    pub fn chain(&self) -> Vec<(SourceKind, &SourceConfig)> {
        let mut seen = Vec::new();
        for kind in &self.order {
            if !seen.contains(kind) {
                seen.push(*kind);
            }
        }
        seen.into_iter().map(|kind| (kind, self.get(kind))).collect()
    }

    pub fn with_enabled(mut self, kind: SourceKind, enabled: bool) -> Self {
        self.get_mut(kind).enabled = enabled;
        self
    }
}
