use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use sieve_config::Preferences;

/// Represents a saved preference profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Preferences,
}

impl Profile {
    fn main(value: Preferences) -> Self {
        Self {
            name: "main".into(),
            value,
        }
    }
}

/// Preferences as stored in the profile at `path`, without environment overrides.
///
/// A missing file is created from the defaults. A file that does not parse
/// is left alone and the defaults are used for this session.
pub fn load_profile(path: &Path) -> anyhow::Result<Preferences> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "no profile, writing defaults");
            let prefs = Preferences::default();
            save_preferences(path, &prefs)?;
            return Ok(prefs);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()));
        }
    };

    match serde_json::from_str::<Profile>(&data) {
        Ok(profile) => {
            tracing::debug!(path = %path.display(), profile = %profile.name, "loaded profile");
            Ok(profile.value)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "profile is corrupt, using defaults");
            Ok(Preferences::default())
        }
    }
}

/// Preferences for this session: the stored profile with `SIEVE_*` overrides applied
pub fn load_preferences(path: &Path) -> anyhow::Result<Preferences> {
    Ok(load_profile(path)?.with_env_overrides())
}

pub fn save_preferences(path: &Path, prefs: &Preferences) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let profile = Profile::main(prefs.clone());
    fs::write(path, serde_json::to_string_pretty(&profile)?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "saved profile");
    Ok(())
}
