use crate::{
    error::{AdminError, AdminResult},
    models::*,
    services::store::{required_text, AdminStore, StoreState},
};
use chrono::Utc;
use std::cmp::Ordering;

const LOW_WALLET_THRESHOLD: f64 = 5.0;

pub fn matches_query(user: &AdminUser, query: &UserQuery) -> bool {
    if let Some(phone) = query.phone.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
        if !user.phone.to_lowercase().contains(&phone.to_lowercase()) {
            return false;
        }
    }

    let status_ok = match query.status {
        StatusFilter::All => true,
        StatusFilter::Active => user.is_effectively_active(),
        StatusFilter::Inactive => !user.is_effectively_active(),
    };
    let wallet_ok = match query.wallet {
        WalletFilter::All => true,
        WalletFilter::Low => user.wallet_balance < LOW_WALLET_THRESHOLD,
    };

    status_ok && wallet_ok
}

fn sort_value(user: &AdminUser, key: UserSortKey) -> f64 {
    match key {
        UserSortKey::Streak => user.current_streak_days as f64,
        UserSortKey::PartnerMatches => user.partner_match_count as f64,
        UserSortKey::ComplianceRate => user.compliance_rate,
    }
}

impl StoreState {
    fn user_mut(&mut self, user_id: &str) -> AdminResult<&mut AdminUser> {
        self.data
            .users
            .iter_mut()
            .find(|user| user.id == user_id)
            .ok_or_else(|| AdminError::not_found(format!("User {} not found", user_id)))
    }
}

impl AdminStore {
    pub async fn list_users(&self, query: &UserQuery) -> Vec<AdminUser> {
        let state = self.state.read().await;
        let mut users: Vec<AdminUser> = state
            .data
            .users
            .iter()
            .filter(|user| matches_query(user, query))
            .cloned()
            .collect();

        // Stable sort keeps seed order for equal values.
        users.sort_by(|a, b| {
            let ordering = sort_value(a, query.sort)
                .partial_cmp(&sort_value(b, query.sort))
                .unwrap_or(Ordering::Equal);
            match query.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        users
    }

    pub async fn user_detail(&self, user_id: &str) -> AdminResult<UserDetail> {
        let state = self.state.read().await;
        let data = &state.data;

        let user = data
            .users
            .iter()
            .find(|user| user.id == user_id)
            .cloned()
            .ok_or_else(|| AdminError::not_found(format!("User {} not found", user_id)))?;

        let mut ocr_submissions: Vec<OcrSubmission> = data
            .ocr_submissions
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        ocr_submissions.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));

        Ok(UserDetail {
            transactions: data
                .transactions
                .iter()
                .filter(|t| t.user_id == user_id)
                .cloned()
                .collect(),
            badges: data
                .badge_events
                .iter()
                .filter(|b| b.user_id == user_id)
                .cloned()
                .collect(),
            ocr_submissions,
            sessions: data
                .sessions
                .iter()
                .filter(|s| s.user_id == user_id)
                .cloned()
                .collect(),
            wallet_adjustments: state
                .wallet_adjustments
                .iter()
                .filter(|a| a.user_id == user_id)
                .cloned()
                .collect(),
            notes: state
                .notes
                .iter()
                .filter(|n| n.user_id == user_id)
                .cloned()
                .collect(),
            user,
        })
    }

    /// Flips the soft-block flag. Disabling also marks the user inactive.
    pub async fn toggle_user_disabled(&self, user_id: &str, admin: &str) -> AdminResult<AdminUser> {
        let mut state = self.state.write().await;
        let user = state.user_mut(user_id)?;

        user.is_disabled = !user.is_disabled;
        if user.is_disabled {
            user.is_active = false;
        }
        let updated = user.clone();

        let action = if updated.is_disabled {
            "Disabled user"
        } else {
            "Re-enabled user"
        };
        state.record_action(admin, action, user_id);

        Ok(updated)
    }

    pub async fn reset_avatar(&self, user_id: &str, admin: &str) -> AdminResult<AdminUser> {
        let mut state = self.state.write().await;
        let user = state.user_mut(user_id)?;
        user.avatar = "Default avatar".to_string();
        let updated = user.clone();

        state.record_action(admin, "Reset avatar", user_id);
        Ok(updated)
    }

    /// Credits (positive) or debits (negative) the user's wallet balance.
    pub async fn adjust_wallet(
        &self,
        user_id: &str,
        request: WalletAdjustmentRequest,
        admin: &str,
    ) -> AdminResult<AdminUser> {
        let amount = match request.amount {
            Some(amount) if amount.is_finite() && amount != 0.0 => amount,
            _ => {
                return Err(AdminError::validation(
                    "Enter a non-zero amount to credit or debit.",
                ))
            }
        };
        let reason = required_text(
            &request.reason,
            "Please provide a short reason for the adjustment.",
        )?;

        let mut state = self.state.write().await;
        let user = state.user_mut(user_id)?;
        user.wallet_balance += amount;
        let updated = user.clone();

        state.wallet_adjustments.insert(
            0,
            WalletAdjustment {
                user_id: user_id.to_string(),
                amount,
                reason,
                created_at: Utc::now(),
            },
        );
        let action = if amount > 0.0 {
            format!("Wallet credited {:.2}", amount)
        } else {
            format!("Wallet debited {:.2}", -amount)
        };
        state.record_action(admin, action, user_id);

        Ok(updated)
    }

    pub async fn add_note(
        &self,
        user_id: &str,
        request: AdminNoteRequest,
        admin: &str,
    ) -> AdminResult<AdminNote> {
        let text = required_text(&request.text, "Note text cannot be empty.")?;

        let mut state = self.state.write().await;
        state.user_mut(user_id)?;

        let note = AdminNote {
            id: format!("note_{}", state.notes.len() + 1),
            user_id: user_id.to_string(),
            text,
            author: admin.to_string(),
            created_at: Utc::now(),
        };
        state.notes.insert(0, note.clone());
        state.record_action(admin, "Added admin note", user_id);

        Ok(note)
    }

    pub async fn fines_page(&self) -> FinesPage {
        let state = self.state.read().await;
        let users = &state.data.users;

        let total_wallet: f64 = users.iter().map(|u| u.wallet_balance).sum();
        let total_fines: f64 = users.iter().map(|u| u.total_fine_collected).sum();
        let total_applicable_today: f64 = users.iter().map(|u| u.refund_eligible_amount).sum();

        FinesPage {
            totals: FineTotals {
                total_wallet,
                total_fines,
                total_applicable_today,
                total_difference_today: total_wallet - total_applicable_today,
            },
            users: users
                .iter()
                .map(|u| FineBreakdown {
                    user_id: u.id.clone(),
                    avatar: u.avatar.clone(),
                    subscription_tier: u.subscription_tier,
                    wallet_balance: u.wallet_balance,
                    total_fine_collected: u.total_fine_collected,
                    refund_eligible_amount: u.refund_eligible_amount,
                })
                .collect(),
        }
    }
}
