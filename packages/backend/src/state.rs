use std::sync::Arc;
use std::time::{Instant, SystemTime};

use vocab_deck_core::{StarterEntry, STARTER_DECK};

use crate::config::Config;
use crate::db::DatabaseProxy;

#[derive(Clone)]
pub struct AppState {
    started_at: Instant,
    started_at_system: SystemTime,
    config: Arc<Config>,
    db_proxy: Arc<DatabaseProxy>,
    starter_deck: &'static [StarterEntry],
}

impl AppState {
    pub fn new(config: Config, db_proxy: Arc<DatabaseProxy>) -> Self {
        Self {
            started_at: Instant::now(),
            started_at_system: SystemTime::now(),
            config: Arc::new(config),
            db_proxy,
            starter_deck: STARTER_DECK,
        }
    }

    pub fn with_starter_deck(mut self, template: &'static [StarterEntry]) -> Self {
        self.starter_deck = template;
        self
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn started_at_system(&self) -> SystemTime {
        self.started_at_system
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn db_proxy(&self) -> Arc<DatabaseProxy> {
        Arc::clone(&self.db_proxy)
    }

    pub fn starter_deck(&self) -> &'static [StarterEntry] {
        self.starter_deck
    }
}
