use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{
    Account, AccountId, Cents, Transaction, TransactionKind, DAILY_DEPOSIT_LIMIT,
};
use crate::notification::NotificationGateway;
use crate::storage::Repository;

use super::AppError;

/// Application service providing the ledger operations.
/// This is the primary interface for any client (CLI, HTTP API, tests).
pub struct BankService {
    repo: Repository,
    notifications: NotificationGateway,
}

/// Public view of an account: the subset of fields exposed across the
/// service boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountView {
    pub first_name: String,
    pub last_name: String,
    pub balance_cents: Cents,
    pub notification_preference: String,
}

impl From<Account> for AccountView {
    fn from(account: Account) -> Self {
        Self {
            first_name: account.first_name,
            last_name: account.last_name,
            balance_cents: account.balance_cents,
            notification_preference: account.notification_preference,
        }
    }
}

/// Public view of a transaction: kind and amount only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionView {
    pub kind: TransactionKind,
    pub amount_cents: Cents,
}

impl From<Transaction> for TransactionView {
    fn from(transaction: Transaction) -> Self {
        Self {
            kind: transaction.kind,
            amount_cents: transaction.amount_cents,
        }
    }
}

impl BankService {
    /// Create a new service with the given repository and notification gateway.
    pub fn new(repo: Repository, notifications: NotificationGateway) -> Self {
        Self {
            repo,
            notifications,
        }
    }

    /// Initialize a new database at the given path.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Ok(Self::new(repo, NotificationGateway::with_defaults()))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        Ok(Self::new(repo, NotificationGateway::with_defaults()))
    }

    // ========================
    // Account creation & lookup
    // ========================

    /// Create a new account with a zero balance and the default notification
    /// preference, then send a best-effort welcome message.
    pub async fn create_account(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<AccountView, AppError> {
        if self.repo.get_account_by_last_name(last_name).await?.is_some() {
            return Err(AppError::DuplicateAccount(last_name.to_string()));
        }

        let account = Account::new(
            first_name,
            last_name,
            self.notifications.default_channel().name(),
        );
        self.repo.save_account(&account).await?;

        // Welcome message through the preferred channel, falling back to the
        // default when the preference names an unknown channel. Failures do
        // not roll back creation.
        let channel = self
            .notifications
            .channel_by_name(&account.notification_preference)
            .unwrap_or_else(|| self.notifications.default_channel());
        if let Err(e) = channel.send("bank", &account.last_name, "Account Created", "Welcome aboard!")
        {
            warn!(last_name = %account.last_name, error = %e, "welcome notification failed");
        }

        Ok(account.into())
    }

    /// Get an account's public view by last name.
    pub async fn account_by_last_name(&self, last_name: &str) -> Result<AccountView, AppError> {
        Ok(self.get_by_last_name(last_name).await?.into())
    }

    /// Get an account's public view by first name.
    pub async fn account_by_first_name(&self, first_name: &str) -> Result<AccountView, AppError> {
        self.repo
            .get_account_by_first_name(first_name)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::AccountNotFound(first_name.to_string()))
    }

    /// Get an account's public view by identifier.
    pub async fn account_by_id(&self, id: AccountId) -> Result<AccountView, AppError> {
        self.repo
            .get_account(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::AccountNotFound(id.to_string()))
    }

    /// List all accounts.
    pub async fn list_accounts(&self) -> Result<Vec<AccountView>, AppError> {
        let accounts = self.repo.list_accounts().await?;
        Ok(accounts.into_iter().map(Into::into).collect())
    }

    async fn get_by_last_name(&self, last_name: &str) -> Result<Account, AppError> {
        self.repo
            .get_account_by_last_name(last_name)
            .await?
            .ok_or_else(|| AppError::AccountNotFound(last_name.to_string()))
    }

    // ========================
    // Deposits & withdrawals
    // ========================

    /// Deposit an amount into an account.
    ///
    /// The same-day deposit total is recomputed from the transaction log on
    /// every call; the deposit is rejected when that total plus the new
    /// amount would exceed the daily limit. A total landing exactly on the
    /// limit is allowed. Nothing is persisted on rejection.
    pub async fn deposit(&self, last_name: &str, amount: Cents) -> Result<AccountView, AppError> {
        let mut account = self.get_by_last_name(last_name).await?;

        let today = Utc::now().date_naive();
        let daily_total = self.repo.deposits_total_on(account.id, today).await?;
        if daily_total + amount > DAILY_DEPOSIT_LIMIT {
            return Err(AppError::DepositLimitExceeded {
                requested: amount,
                daily_total,
                limit: DAILY_DEPOSIT_LIMIT,
            });
        }

        account.balance_cents += amount;
        self.repo.save_account(&account).await?;

        let mut transaction = Transaction::new(account.id, TransactionKind::Deposit, amount);
        self.repo.save_transaction(&mut transaction).await?;

        Ok(account.into())
    }

    /// Withdraw an amount from an account.
    ///
    /// Rejected without mutation when the withdrawal would drive the balance
    /// negative.
    pub async fn withdraw(&self, last_name: &str, amount: Cents) -> Result<AccountView, AppError> {
        let mut account = self.get_by_last_name(last_name).await?;

        if account.balance_cents - amount < 0 {
            return Err(AppError::InsufficientFunds {
                last_name: last_name.to_string(),
                balance: account.balance_cents,
                requested: amount,
            });
        }

        account.balance_cents -= amount;
        self.repo.save_account(&account).await?;

        let mut transaction = Transaction::new(account.id, TransactionKind::Withdrawal, amount);
        self.repo.save_transaction(&mut transaction).await?;

        Ok(account.into())
    }

    /// Transfer an amount between two accounts: a withdrawal from the source
    /// followed by a deposit to the destination. A withdrawal failure aborts
    /// the transfer before the deposit runs. The two steps are not atomic; a
    /// deposit failure after a committed withdrawal leaves the withdrawal in
    /// place.
    pub async fn transfer(&self, from: &str, to: &str, amount: Cents) -> Result<(), AppError> {
        self.withdraw(from, amount).await?;
        self.deposit(to, amount).await?;
        Ok(())
    }

    // ========================
    // Transaction history
    // ========================

    /// Get the most recent transactions for an account: the last 10 entries
    /// of the store's ordered sequence, in original relative order.
    pub async fn latest_transactions(
        &self,
        last_name: &str,
    ) -> Result<Vec<TransactionView>, AppError> {
        let account = self.get_by_last_name(last_name).await?;
        let transactions = self.repo.transactions_for_account(account.id).await?;

        let skip = transactions.len().saturating_sub(10);
        Ok(transactions
            .into_iter()
            .skip(skip)
            .map(Into::into)
            .collect())
    }
}
