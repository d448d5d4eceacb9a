//! Settings port: durable storage for operator-editable settings.

use std::future::Future;
use std::sync::Arc;

use planthub_domain::error::PlantHubError;
use planthub_domain::settings::Settings;

/// Loads and saves [`Settings`].
pub trait SettingsStore: Send + Sync {
    /// Load the stored settings, or defaults when nothing was saved yet.
    fn load(&self) -> impl Future<Output = Result<Settings, PlantHubError>> + Send;

    fn save(&self, settings: &Settings) -> impl Future<Output = Result<(), PlantHubError>> + Send;
}

impl<T: SettingsStore> SettingsStore for Arc<T> {
    fn load(&self) -> impl Future<Output = Result<Settings, PlantHubError>> + Send {
        (**self).load()
    }

    fn save(&self, settings: &Settings) -> impl Future<Output = Result<(), PlantHubError>> + Send {
        (**self).save(settings)
    }
}
