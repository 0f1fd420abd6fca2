use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AccountId, Cents};

pub type TransactionId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money entering the account. Counts toward the daily deposit limit.
    Deposit,
    /// Money leaving the account.
    #[serde(rename = "withdraw")]
    Withdrawal,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdrawal => "withdraw",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "deposit" => Some(TransactionKind::Deposit),
            "withdraw" => Some(TransactionKind::Withdrawal),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An immutable record of a single deposit or withdrawal against one account.
/// Recorded exactly once per successful operation, never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    /// Monotonically increasing sequence number defining store order.
    pub sequence: i64,
    /// The single account this transaction belongs to.
    pub account_id: AccountId,
    pub kind: TransactionKind,
    /// Amount in cents (always positive).
    pub amount_cents: Cents,
    /// Calendar date of creation, no time component. The daily deposit
    /// limit aggregates deposits sharing this date.
    pub date: NaiveDate,
}

impl Transaction {
    /// Create a new transaction dated today. Sequence number must be
    /// assigned by the repository.
    pub fn new(account_id: AccountId, kind: TransactionKind, amount_cents: Cents) -> Self {
        Self {
            id: Uuid::new_v4(),
            sequence: 0, // Will be set by repository
            account_id,
            kind,
            amount_cents,
            date: Utc::now().date_naive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip() {
        for kind in [TransactionKind::Deposit, TransactionKind::Withdrawal] {
            let s = kind.as_str();
            let parsed = TransactionKind::from_str(s).unwrap();
            assert_eq!(kind, parsed);
        }
    }

    #[test]
    fn test_new_transaction_dated_today() {
        let tx = Transaction::new(Uuid::new_v4(), TransactionKind::Deposit, 100);
        assert_eq!(tx.date, Utc::now().date_naive());
    }

    #[test]
    fn test_kind_serializes_to_wire_names() {
        let deposit = serde_json::to_string(&TransactionKind::Deposit).unwrap();
        let withdraw = serde_json::to_string(&TransactionKind::Withdrawal).unwrap();
        assert_eq!(deposit, "\"deposit\"");
        assert_eq!(withdraw, "\"withdraw\"");
    }
}
