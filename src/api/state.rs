use std::sync::{Arc, RwLock};

use crate::{
    error::{Error, Result},
    models::configuration::Configuration,
};

/// Shared application state: the currently loaded configuration.
///
/// Handlers take an `Arc` snapshot and simulate outside the lock, so an upload
/// never disturbs a run in progress.
#[derive(Debug, Default)]
pub struct AppState {
    configuration: RwLock<Option<Arc<Configuration>>>,
}

impl AppState {
    pub fn new(configuration: Option<Configuration>) -> Self {
        Self {
            configuration: RwLock::new(configuration.map(Arc::new)),
        }
    }

    /// Replaces the loaded configuration wholesale.
    pub fn replace(&self, configuration: Configuration) {
        let mut guard = self
            .configuration
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(Arc::new(configuration));
    }

    pub fn current(&self) -> Result<Arc<Configuration>> {
        self.configuration
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
            .ok_or_else(|| Error::not_found("Loaded configuration"))
    }
}
