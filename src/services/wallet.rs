use crate::{
    error::{AdminError, AdminResult},
    models::*,
    services::store::{positive_amount, required_text, AdminStore},
};
use chrono::Utc;

impl AdminStore {
    pub async fn wallet_page(&self) -> WalletPage {
        let state = self.state.read().await;
        let alerts = state.alerts(&self.rules);

        let transactions: Vec<TransactionView> = state
            .data
            .transactions
            .iter()
            .map(|transaction| TransactionView {
                fraud_flag: self.rules.has_fraud_flags(transaction),
                reconciled: state.reconciled.contains(&transaction.id),
                transaction: transaction.clone(),
            })
            .collect();

        let total_deposits: f64 = state
            .data
            .transactions
            .iter()
            .filter(|t| t.is_deposit() && t.status == TransactionStatus::Success)
            .map(|t| t.amount)
            .sum();
        let total_withdrawals: f64 = state
            .data
            .transactions
            .iter()
            .filter(|t| t.is_withdrawal() && t.status == TransactionStatus::Success)
            .map(|t| -t.amount)
            .sum();

        WalletPage {
            overview: WalletOverview {
                total_deposits,
                total_withdrawals,
                total_manual_credits: state.credits.iter().map(|c| c.amount).sum(),
                transaction_count: transactions.len(),
                open_alerts: alerts.len(),
            },
            transactions,
            alerts,
            credits: state.credits.clone(),
            session_resets: state.session_resets.clone(),
        }
    }

    pub async fn visible_alerts(&self) -> Vec<FraudAlert> {
        self.state.read().await.alerts(&self.rules)
    }

    /// Hides the alert and marks every transaction it references as reconciled.
    pub async fn resolve_alert(&self, alert_id: &str, admin: &str) -> AdminResult<FraudAlert> {
        let mut state = self.state.write().await;

        let alert = state
            .alerts(&self.rules)
            .into_iter()
            .find(|alert| alert.id == alert_id)
            .ok_or_else(|| AdminError::not_found(format!("No open fraud alert {}", alert_id)))?;

        state.resolved_alerts.insert(alert.id.clone());
        state
            .reconciled
            .extend(alert.transaction_ids.iter().cloned());
        state.record_action(admin, "Resolved fraud alert", &alert.id);

        Ok(alert)
    }

    pub async fn record_credit(
        &self,
        request: ManualCreditRequest,
        admin: &str,
    ) -> AdminResult<ManualCredit> {
        let user_id = required_text(&request.user_id, "User ID is required for manual credit.")?;
        let amount = positive_amount(request.amount, "Enter a positive amount to credit.")?;
        let note = required_text(&request.note, "Please provide a short admin note.")?;

        let mut state = self.state.write().await;
        let credit = ManualCredit {
            id: state.next_credit_id(),
            user_id,
            amount,
            note,
            created_at: Utc::now(),
        };

        state.credits.insert(0, credit.clone());
        state.record_action(
            admin,
            format!("Manual wallet credit of {:.2}", credit.amount),
            &credit.user_id,
        );

        Ok(credit)
    }

    pub async fn apply_bulk_action(
        &self,
        request: BulkActionRequest,
        admin: &str,
    ) -> AdminResult<BulkActionOutcome> {
        let mut state = self.state.write().await;

        // Distinct users in transaction-table order.
        let mut user_ids: Vec<String> = Vec::new();
        for transaction in &state.data.transactions {
            if request.transaction_ids.contains(&transaction.id)
                && !user_ids.contains(&transaction.user_id)
            {
                user_ids.push(transaction.user_id.clone());
            }
        }

        if user_ids.is_empty() {
            return Err(AdminError::validation(
                "Select at least one user from the transactions table first.",
            ));
        }

        let now = Utc::now();
        let stamp = now.format("%Y%m%dT%H%M%S%3f").to_string();
        let mut outcome = BulkActionOutcome {
            user_ids: user_ids.clone(),
            credits: Vec::new(),
            session_resets: Vec::new(),
        };

        match request.action {
            BulkAction::Topup => {
                let amount = positive_amount(request.amount, "Enter a positive top-up amount.")?;
                let note = required_text(&request.note, "Add a short reason for the bulk top-up.")?;

                outcome.credits = user_ids
                    .iter()
                    .enumerate()
                    .map(|(index, user_id)| ManualCredit {
                        id: format!("bulk_{}_{}", stamp, index + 1),
                        user_id: user_id.clone(),
                        amount,
                        note: note.clone(),
                        created_at: now,
                    })
                    .collect();

                let mut credits = outcome.credits.clone();
                credits.append(&mut state.credits);
                state.credits = credits;
                state.record_action(
                    admin,
                    format!("Bulk top-up of {:.2}", amount),
                    &user_ids.join(","),
                );
            }
            BulkAction::SessionReset => {
                let reason = match request.note.trim() {
                    "" => "Bulk session reset".to_string(),
                    note => note.to_string(),
                };

                outcome.session_resets = user_ids
                    .iter()
                    .enumerate()
                    .map(|(index, user_id)| SessionReset {
                        id: format!("reset_{}_{}", stamp, index + 1),
                        user_id: user_id.clone(),
                        reason: reason.clone(),
                        created_at: now,
                    })
                    .collect();

                let mut resets = outcome.session_resets.clone();
                resets.append(&mut state.session_resets);
                state.session_resets = resets;
                state.record_action(admin, "Bulk session reset", &user_ids.join(","));
            }
        }

        Ok(outcome)
    }

    pub async fn reconcile_transaction(
        &self,
        transaction_id: &str,
        admin: &str,
    ) -> AdminResult<WalletTransaction> {
        let mut state = self.state.write().await;
        let transaction = state
            .data
            .transactions
            .iter()
            .find(|t| t.id == transaction_id)
            .cloned()
            .ok_or_else(|| AdminError::not_found(format!("Transaction {} not found", transaction_id)))?;

        state.reconciled.insert(transaction.id.clone());
        state.record_action(admin, "Reconciled transaction", &transaction.id);

        Ok(transaction)
    }

    /// Queues a payment-provider verification retry. Only the audit entry is
    /// recorded; the provider call itself happens outside this service.
    pub async fn retry_verification(
        &self,
        transaction_id: &str,
        admin: &str,
    ) -> AdminResult<WalletTransaction> {
        let mut state = self.state.write().await;
        let transaction = state
            .data
            .transactions
            .iter()
            .find(|t| t.id == transaction_id)
            .cloned()
            .ok_or_else(|| AdminError::not_found(format!("Transaction {} not found", transaction_id)))?;

        state.record_action(admin, "Retried payment verification", &transaction.id);
        Ok(transaction)
    }

    pub async fn transaction(&self, transaction_id: &str) -> AdminResult<WalletTransaction> {
        self.state
            .read()
            .await
            .data
            .transactions
            .iter()
            .find(|t| t.id == transaction_id)
            .cloned()
            .ok_or_else(|| AdminError::not_found(format!("Transaction {} not found", transaction_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{fraud::FraudRules, store::Dataset};
    use chrono::{Duration, TimeZone};

    fn tx(id: &str, user: &str, amount: f64, minutes: i64) -> WalletTransaction {
        WalletTransaction {
            id: id.to_string(),
            user_id: user.to_string(),
            amount,
            method: PaymentMethod::Upi,
            payment_reference: format!("pay_{}", id),
            status: TransactionStatus::Success,
            created_at: Utc.with_ymd_and_hms(2026, 1, 5, 7, 0, 0).unwrap()
                + Duration::minutes(minutes),
            attempts: 1,
            refunds: 0,
        }
    }

    fn store() -> AdminStore {
        let data = Dataset {
            transactions: vec![
                tx("t1", "usr_01", 25.0, 0),
                tx("t2", "usr_01", 25.0, 4),
                tx("t3", "usr_01", 25.0, 7),
                tx("w1", "usr_02", -20.0, 60),
                tx("w2", "usr_02", -15.0, 65),
            ],
            ..Dataset::default()
        };
        AdminStore::new(data, FraudRules::default())
    }

    #[tokio::test]
    async fn resolving_hides_alert_and_reconciles() {
        let store = store();
        assert_eq!(store.visible_alerts().await.len(), 2);

        let resolved = store
            .resolve_alert("alert_usr_01_rapid_deposits", "admin@example.com")
            .await
            .unwrap();
        assert_eq!(resolved.transaction_ids.len(), 3);

        let page = store.wallet_page().await;
        assert_eq!(page.alerts.len(), 1);
        assert_eq!(page.overview.open_alerts, 1);
        assert!(page
            .transactions
            .iter()
            .filter(|view| view.transaction.user_id == "usr_01")
            .all(|view| view.reconciled));

        let again = store
            .resolve_alert("alert_usr_01_rapid_deposits", "admin@example.com")
            .await;
        assert!(matches!(again, Err(AdminError::NotFound(_))));
    }

    #[tokio::test]
    async fn credit_validation_messages() {
        let store = store();
        let err = store
            .record_credit(
                ManualCreditRequest {
                    user_id: "  ".to_string(),
                    amount: Some(5.0),
                    note: "n".to_string(),
                },
                "admin",
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "User ID is required for manual credit.");

        let err = store
            .record_credit(
                ManualCreditRequest {
                    user_id: "usr_01".to_string(),
                    amount: Some(-5.0),
                    note: "n".to_string(),
                },
                "admin",
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Enter a positive amount to credit.");

        let credit = store
            .record_credit(
                ManualCreditRequest {
                    user_id: " usr_01 ".to_string(),
                    amount: Some(12.5),
                    note: " goodwill ".to_string(),
                },
                "admin",
            )
            .await
            .unwrap();
        assert_eq!(credit.id, "manual_1");
        assert_eq!(credit.user_id, "usr_01");
        assert_eq!(credit.note, "goodwill");
        assert_eq!(store.wallet_page().await.overview.total_manual_credits, 12.5);
    }

    #[tokio::test]
    async fn bulk_topup_credits_each_distinct_user() {
        let store = store();
        let outcome = store
            .apply_bulk_action(
                BulkActionRequest {
                    action: BulkAction::Topup,
                    transaction_ids: vec!["w1".into(), "t1".into(), "t2".into()],
                    amount: Some(10.0),
                    note: "promo".to_string(),
                },
                "admin",
            )
            .await
            .unwrap();

        assert_eq!(outcome.user_ids, vec!["usr_01", "usr_02"]);
        assert_eq!(outcome.credits.len(), 2);
        assert_eq!(store.wallet_page().await.credits.len(), 2);
    }

    #[tokio::test]
    async fn manual_credit_ids_ignore_bulk_topups() {
        let store = store();
        store
            .apply_bulk_action(
                BulkActionRequest {
                    action: BulkAction::Topup,
                    transaction_ids: vec!["t1".into(), "w1".into()],
                    amount: Some(5.0),
                    note: "promo".to_string(),
                },
                "admin",
            )
            .await
            .unwrap();

        let credit = store
            .record_credit(
                ManualCreditRequest {
                    user_id: "usr_01".to_string(),
                    amount: Some(7.0),
                    note: "goodwill".to_string(),
                },
                "admin",
            )
            .await
            .unwrap();

        assert_eq!(credit.id, "manual_1");
        assert_eq!(store.wallet_page().await.credits.len(), 3);
    }

    #[tokio::test]
    async fn bulk_action_needs_a_selection() {
        let store = store();
        let err = store
            .apply_bulk_action(
                BulkActionRequest {
                    action: BulkAction::SessionReset,
                    transaction_ids: vec!["missing".into()],
                    amount: None,
                    note: String::new(),
                },
                "admin",
            )
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Select at least one user from the transactions table first."
        );
    }

    #[tokio::test]
    async fn bulk_session_reset_defaults_reason() {
        let store = store();
        let outcome = store
            .apply_bulk_action(
                BulkActionRequest {
                    action: BulkAction::SessionReset,
                    transaction_ids: vec!["w2".into()],
                    amount: None,
                    note: "   ".to_string(),
                },
                "admin",
            )
            .await
            .unwrap();
        assert_eq!(outcome.session_resets[0].reason, "Bulk session reset");
        assert_eq!(store.logs_page().await.admin_actions.len(), 1);
    }
}
