pub mod analytics;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod review;
pub mod settings;
pub mod users;
pub mod wallet;

pub use analytics::*;
pub use auth::*;
pub use dashboard::*;
pub use health::*;
pub use review::*;
pub use settings::*;
pub use users::*;
pub use wallet::*;

use crate::{
    config::Config,
    services::{Analytics, AdminStore, Dataset, FraudRules, SessionStore, SystemConfigStore},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: Arc<SessionStore>,
    pub store: Arc<AdminStore>,
    pub system_config: Arc<SystemConfigStore>,
    pub analytics: Arc<Analytics>,
}

impl AppState {
    pub fn new(config: Config, dataset: Dataset) -> Self {
        Self {
            sessions: Arc::new(SessionStore::new(config.session_ttl())),
            store: Arc::new(AdminStore::new(dataset, FraudRules::default())),
            system_config: Arc::new(SystemConfigStore::default()),
            analytics: Arc::new(Analytics::new()),
            config: Arc::new(config),
        }
    }
}
