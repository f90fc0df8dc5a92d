use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSettings {
    pub enabled: bool,
    pub deposit_amount_in_rupees: f64,
    pub session_failure_fine: f64,
    pub phub_fine: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSettings {
    pub maintenance_mode: bool,
    pub max_session_minutes: u32,
    pub phub_tilt_angle: u32,
    pub phub_timeout_seconds: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamificationSettings {
    pub badges_enabled: bool,
    pub coins_enabled: bool,
    pub sprint_mode_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarSettings {
    pub slow_on_tilt: bool,
    pub fall_on_timeout: bool,
    pub celebration_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub email_enabled: bool,
    pub push_enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    Test,
    Live,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSettings {
    pub provider: String,
    pub mode: PaymentMode,
    pub currency: String,
    pub min_deposit_in_rupees: f64,
    pub max_deposit_in_rupees: f64,
    pub upi_enabled: bool,
    pub cards_enabled: bool,
}

/// Default shape of the runtime settings. The live document is stored as
/// arbitrary JSON and may drift from this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemConfig {
    pub wallet: WalletSettings,
    pub sessions: SessionSettings,
    pub gamification: GamificationSettings,
    pub avatar: AvatarSettings,
    pub notifications: NotificationSettings,
    pub payment: PaymentSettings,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            wallet: WalletSettings {
                enabled: true,
                deposit_amount_in_rupees: 200.0,
                session_failure_fine: 20.0,
                phub_fine: 20.0,
            },
            sessions: SessionSettings {
                maintenance_mode: false,
                max_session_minutes: 120,
                phub_tilt_angle: 45,
                phub_timeout_seconds: 30,
            },
            gamification: GamificationSettings {
                badges_enabled: true,
                coins_enabled: true,
                sprint_mode_enabled: true,
            },
            avatar: AvatarSettings {
                slow_on_tilt: true,
                fall_on_timeout: true,
                celebration_enabled: true,
            },
            notifications: NotificationSettings {
                email_enabled: true,
                push_enabled: true,
            },
            payment: PaymentSettings {
                provider: "Razorpay".to_string(),
                mode: PaymentMode::Test,
                currency: "INR".to_string(),
                min_deposit_in_rupees: 200.0,
                max_deposit_in_rupees: 2000.0,
                upi_enabled: true,
                cards_enabled: true,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlags {
    pub wallet_enforcement_enabled: bool,
    pub badge_rewards_enabled: bool,
    pub maintenance_mode_enabled: bool,
    pub deposit_amount_in_rupees: f64,
    pub coins_enabled: bool,
    pub sprint_mode_enabled: bool,
    pub avatar_celebration_enabled: bool,
    pub email_notifications_enabled: bool,
    pub push_notifications_enabled: bool,
}

impl From<&SystemConfig> for FeatureFlags {
    fn from(config: &SystemConfig) -> Self {
        Self {
            wallet_enforcement_enabled: config.wallet.enabled,
            badge_rewards_enabled: config.gamification.badges_enabled,
            maintenance_mode_enabled: config.sessions.maintenance_mode,
            deposit_amount_in_rupees: config.wallet.deposit_amount_in_rupees,
            coins_enabled: config.gamification.coins_enabled,
            sprint_mode_enabled: config.gamification.sprint_mode_enabled,
            avatar_celebration_enabled: config.avatar.celebration_enabled,
            email_notifications_enabled: config.notifications.email_enabled,
            push_notifications_enabled: config.notifications.push_enabled,
        }
    }
}

impl FeatureFlags {
    /// Reads flags from a stored settings document. Missing or mistyped keys
    /// keep their default value.
    pub fn from_document(document: &Value) -> Self {
        let defaults = Self::from(&SystemConfig::default());
        let flag = |pointer: &str, fallback: bool| {
            document
                .pointer(pointer)
                .and_then(Value::as_bool)
                .unwrap_or(fallback)
        };

        Self {
            wallet_enforcement_enabled: flag("/wallet/enabled", defaults.wallet_enforcement_enabled),
            badge_rewards_enabled: flag("/gamification/badgesEnabled", defaults.badge_rewards_enabled),
            maintenance_mode_enabled: flag(
                "/sessions/maintenanceMode",
                defaults.maintenance_mode_enabled,
            ),
            deposit_amount_in_rupees: document
                .pointer("/wallet/depositAmountInRupees")
                .and_then(Value::as_f64)
                .unwrap_or(defaults.deposit_amount_in_rupees),
            coins_enabled: flag("/gamification/coinsEnabled", defaults.coins_enabled),
            sprint_mode_enabled: flag(
                "/gamification/sprintModeEnabled",
                defaults.sprint_mode_enabled,
            ),
            avatar_celebration_enabled: flag(
                "/avatar/celebrationEnabled",
                defaults.avatar_celebration_enabled,
            ),
            email_notifications_enabled: flag(
                "/notifications/emailEnabled",
                defaults.email_notifications_enabled,
            ),
            push_notifications_enabled: flag(
                "/notifications/pushEnabled",
                defaults.push_notifications_enabled,
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPage {
    pub config: Value,
    pub feature_flags: FeatureFlags,
}
