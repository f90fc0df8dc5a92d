//! Windowed fraud-signal scan over wallet transactions.
//!
//! Transactions are grouped per user and swept in ascending time order. Each
//! user yields at most one alert of each kind; the final list is ordered by
//! the latest contributing transaction, newest first.

use crate::models::{FraudAlert, FraudAlertKind, WalletTransaction};
use chrono::Duration;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct FraudRules {
    /// Forward-looking window opened at every transaction.
    pub deposit_window: Duration,
    pub min_rapid_deposits: usize,
    /// Maximum span between a user's first and last withdrawal.
    pub withdrawal_window: Duration,
    pub min_rapid_withdrawals: usize,
    pub attempts_threshold: u32,
    pub refunds_threshold: u32,
}

impl Default for FraudRules {
    fn default() -> Self {
        Self {
            deposit_window: Duration::minutes(10),
            min_rapid_deposits: 3,
            withdrawal_window: Duration::minutes(15),
            min_rapid_withdrawals: 2,
            attempts_threshold: 3,
            refunds_threshold: 2,
        }
    }
}

impl FraudRules {
    pub fn has_fraud_flags(&self, transaction: &WalletTransaction) -> bool {
        transaction.attempts >= self.attempts_threshold
            || transaction.refunds >= self.refunds_threshold
    }
}

pub fn scan(transactions: &[WalletTransaction], rules: &FraudRules) -> Vec<FraudAlert> {
    let mut by_user: BTreeMap<&str, Vec<&WalletTransaction>> = BTreeMap::new();
    for transaction in transactions {
        by_user
            .entry(transaction.user_id.as_str())
            .or_default()
            .push(transaction);
    }

    let mut alerts = Vec::new();
    for (user_id, mut history) in by_user {
        history.sort_by_key(|transaction| transaction.created_at);

        alerts.extend(rapid_deposits(user_id, &history, rules));
        alerts.extend(rapid_withdrawals(user_id, &history, rules));
        alerts.extend(flagged(user_id, &history, rules));
    }

    alerts.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });

    tracing::debug!(
        transactions = transactions.len(),
        alerts = alerts.len(),
        "Fraud scan complete"
    );

    alerts
}

fn rapid_deposits(
    user_id: &str,
    history: &[&WalletTransaction],
    rules: &FraudRules,
) -> Option<FraudAlert> {
    // The first qualifying window wins; later windows would produce the same key.
    history.iter().enumerate().find_map(|(start, opening)| {
        let window_end = opening.created_at + rules.deposit_window;
        let deposits: Vec<&WalletTransaction> = history[start..]
            .iter()
            .take_while(|transaction| transaction.created_at <= window_end)
            .filter(|transaction| transaction.is_deposit())
            .copied()
            .collect();

        (deposits.len() >= rules.min_rapid_deposits).then(|| {
            build_alert(
                user_id,
                FraudAlertKind::RapidDeposits,
                format!(
                    "Rapid deposits within {} minutes",
                    rules.deposit_window.num_minutes()
                ),
                &deposits,
            )
        })
    })
}

fn rapid_withdrawals(
    user_id: &str,
    history: &[&WalletTransaction],
    rules: &FraudRules,
) -> Option<FraudAlert> {
    let withdrawals: Vec<&WalletTransaction> = history
        .iter()
        .filter(|transaction| transaction.is_withdrawal())
        .copied()
        .collect();

    if withdrawals.len() < rules.min_rapid_withdrawals {
        return None;
    }

    let first = withdrawals.first()?.created_at;
    let last = withdrawals.last()?.created_at;
    if last - first > rules.withdrawal_window {
        return None;
    }

    Some(build_alert(
        user_id,
        FraudAlertKind::RapidWithdrawals,
        format!(
            "Multiple withdrawals within {} minutes",
            rules.withdrawal_window.num_minutes()
        ),
        &withdrawals,
    ))
}

fn flagged(
    user_id: &str,
    history: &[&WalletTransaction],
    rules: &FraudRules,
) -> Option<FraudAlert> {
    let flagged: Vec<&WalletTransaction> = history
        .iter()
        .filter(|transaction| rules.has_fraud_flags(transaction))
        .copied()
        .collect();

    if flagged.is_empty() {
        return None;
    }

    Some(build_alert(
        user_id,
        FraudAlertKind::Flagged,
        "High retries or refunds detected".to_string(),
        &flagged,
    ))
}

// `contributing` is in ascending time order.
fn build_alert(
    user_id: &str,
    kind: FraudAlertKind,
    reason: String,
    contributing: &[&WalletTransaction],
) -> FraudAlert {
    let created_at = contributing
        .iter()
        .map(|transaction| transaction.created_at)
        .max()
        .unwrap_or_default();

    FraudAlert {
        id: format!("alert_{}_{}", user_id, kind.key()),
        user_id: user_id.to_string(),
        kind,
        reason,
        created_at,
        transaction_ids: contributing
            .iter()
            .map(|transaction| transaction.id.clone())
            .collect(),
    }
}
