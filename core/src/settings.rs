//! Settings persistence boundary
//!
//! The panel config is stored as TOML in the platform config directory via
//! `confy`. Loading never fails the caller: any read/parse problem logs a
//! warning and falls back to defaults, so a corrupt settings file can only
//! cost the user their customizations, never the overlay.

use aurapane_types::PanelConfig;
use thiserror::Error;

const APP_NAME: &str = "aurapane";

/// Errors from explicit settings writes.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to persist settings: {0}")]
    Store(#[from] confy::ConfyError),
}

/// Load the panel config, falling back to defaults on any error.
pub fn load() -> PanelConfig {
    match confy::load(APP_NAME, None) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "failed to load settings, using defaults");
            PanelConfig::default()
        }
    }
}

/// Persist the panel config.
pub fn store(config: &PanelConfig) -> Result<(), SettingsError> {
    confy::store(APP_NAME, None, config)?;
    Ok(())
}
