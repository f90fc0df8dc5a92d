use crate::models::{FeatureFlags, SettingsPage, SystemConfig};
use serde_json::Value;
use tokio::sync::RwLock;

/// The live system configuration document. Stored exactly as last written;
/// nothing inside it is checked.
pub struct SystemConfigStore {
    current: RwLock<Value>,
}

impl SystemConfigStore {
    pub fn new(initial: Value) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }

    pub async fn get(&self) -> Value {
        self.current.read().await.clone()
    }

    pub async fn replace(&self, next: Value) {
        *self.current.write().await = next;
        tracing::info!("System configuration replaced");
    }

    pub async fn settings_page(&self) -> SettingsPage {
        let config = self.get().await;
        SettingsPage {
            feature_flags: FeatureFlags::from_document(&config),
            config,
        }
    }
}

impl Default for SystemConfigStore {
    fn default() -> Self {
        Self::new(serde_json::to_value(SystemConfig::default()).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn replace_then_get() {
        let store = SystemConfigStore::default();
        assert_eq!(store.get().await["payment"]["maxDepositInRupees"], 2000.0);

        let mut next = store.get().await;
        next["sessions"]["maintenanceMode"] = json!(true);
        next["payment"]["mode"] = json!("live");
        store.replace(next.clone()).await;

        assert_eq!(store.get().await, next);
        let page = store.settings_page().await;
        assert!(page.feature_flags.maintenance_mode_enabled);
    }

    #[tokio::test]
    async fn partial_documents_are_stored_verbatim() {
        let store = SystemConfigStore::default();
        let partial = json!({
            "wallet": {"enabled": false},
            "sessions": {"maxSessionMinutes": 90.5},
            "experimental": {"darkLaunch": true}
        });
        store.replace(partial.clone()).await;

        assert_eq!(store.get().await, partial);

        let page = store.settings_page().await;
        assert_eq!(page.config, partial);
        assert!(!page.feature_flags.wallet_enforcement_enabled);
        assert!(page.feature_flags.badge_rewards_enabled);
    }
}
