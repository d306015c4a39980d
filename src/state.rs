use std::sync::Arc;

use sqlx::MySqlPool;

use crate::config::Settings;
use crate::normalize::{NormalizeError, Normalizer};

/// Shared handles injected into every handler and middleware.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub pool: MySqlPool,
    pub normalizer: Arc<Normalizer>,
}

impl AppState {
    pub fn new(settings: Settings, pool: MySqlPool) -> Result<Self, NormalizeError> {
        let normalizer = Normalizer::from_settings(&settings)?;
        Ok(Self {
            settings: Arc::new(settings),
            pool,
            normalizer: Arc::new(normalizer),
        })
    }

    /// Physical name of a logical table.
    pub fn table(&self, name: &str) -> String {
        self.settings.table(name)
    }
}
