pub mod analytics;
pub mod fraud;
pub mod metrics;
pub mod review;
pub mod sessions;
pub mod store;
pub mod system_config;
pub mod users;
pub mod wallet;

pub use analytics::Analytics;
pub use fraud::FraudRules;
pub use sessions::{AdminSession, SessionStore, SESSION_COOKIE};
pub use store::{AdminStore, Dataset};
pub use system_config::SystemConfigStore;
