use std::path::Path;

use sieve_config::Preferences;

use crate::profile::{load_profile, save_preferences};

/// `key = value` per line, in the keys `prefs set` accepts
pub fn handle_prefs_show(prefs: &Preferences) -> String {
    prefs
        .settings()
        .into_iter()
        .map(|(key, value)| format!("{key} = {value}\n"))
        .collect()
}

/// Change one toggle in the stored profile. Environment overrides never reach the file.
pub fn handle_prefs_set(profile: &Path, key: &str, value: &str) -> anyhow::Result<Preferences> {
    let next = load_profile(profile)?.with_setting(key, value)?;
    save_preferences(profile, &next)?;
    tracing::info!(key, value, "preference changed");
    Ok(next)
}
