use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Cents;

pub type AccountId = Uuid;

/// A named ledger entry with a balance and a notification preference.
/// The last name is unique across all accounts and is the key every
/// mutating operation looks accounts up by.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub first_name: String,
    pub last_name: String,
    /// Current balance in cents. Never negative: withdrawals are rejected
    /// before they would drive it below zero.
    pub balance_cents: Cents,
    /// Name of the notification channel welcome messages go through.
    pub notification_preference: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with a zero balance.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        notification_preference: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            balance_cents: 0,
            notification_preference: notification_preference.into(),
            created_at: Utc::now(),
        }
    }
}
