use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::domain::{Account, AccountId, Cents, Transaction, TransactionKind};

use super::MIGRATION_001_INITIAL;

/// Repository for persisting and querying accounts and transactions.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given path.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;

        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    // ========================
    // Account operations
    // ========================

    /// Save an account, inserting it on first save and updating the balance
    /// on subsequent saves. The UNIQUE constraint on last_name backstops the
    /// duplicate check done before creation.
    pub async fn save_account(&self, account: &Account) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, first_name, last_name, balance_cents, notification_preference, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET balance_cents = excluded.balance_cents
            "#,
        )
        .bind(account.id.to_string())
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(account.balance_cents)
        .bind(&account.notification_preference)
        .bind(account.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .context("Failed to save account")?;
        Ok(())
    }

    /// Get an account by ID.
    pub async fn get_account(&self, id: AccountId) -> Result<Option<Account>> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, balance_cents, notification_preference, created_at
            FROM accounts
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch account")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    /// Get an account by last name.
    pub async fn get_account_by_last_name(&self, last_name: &str) -> Result<Option<Account>> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, balance_cents, notification_preference, created_at
            FROM accounts
            WHERE last_name = ?
            "#,
        )
        .bind(last_name)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch account by last name")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    /// Get an account by first name.
    pub async fn get_account_by_first_name(&self, first_name: &str) -> Result<Option<Account>> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, balance_cents, notification_preference, created_at
            FROM accounts
            WHERE first_name = ?
            "#,
        )
        .bind(first_name)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch account by first name")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    /// List all accounts, ordered by last name.
    pub async fn list_accounts(&self) -> Result<Vec<Account>> {
        let rows = sqlx::query(
            r#"
            SELECT id, first_name, last_name, balance_cents, notification_preference, created_at
            FROM accounts
            ORDER BY last_name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list accounts")?;

        rows.iter().map(Self::row_to_account).collect()
    }

    fn row_to_account(row: &sqlx::sqlite::SqliteRow) -> Result<Account> {
        let id_str: String = row.get("id");
        let created_at_str: String = row.get("created_at");

        Ok(Account {
            id: Uuid::parse_str(&id_str).context("Invalid account ID")?,
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            balance_cents: row.get("balance_cents"),
            notification_preference: row.get("notification_preference"),
            created_at: DateTime::parse_from_rfc3339(&created_at_str)
                .context("Invalid created_at timestamp")?
                .with_timezone(&Utc),
        })
    }

    // ========================
    // Transaction operations
    // ========================

    /// Save a new transaction to the database.
    /// Automatically assigns the next sequence number.
    pub async fn save_transaction(&self, transaction: &mut Transaction) -> Result<()> {
        let sequence = self.next_sequence().await?;
        transaction.sequence = sequence;

        sqlx::query(
            r#"
            INSERT INTO transactions (id, sequence, account_id, kind, amount_cents, date)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(transaction.id.to_string())
        .bind(transaction.sequence)
        .bind(transaction.account_id.to_string())
        .bind(transaction.kind.as_str())
        .bind(transaction.amount_cents)
        .bind(transaction.date.to_string())
        .execute(&self.pool)
        .await
        .context("Failed to save transaction")?;

        Ok(())
    }

    /// Get the next sequence number and increment the counter.
    async fn next_sequence(&self) -> Result<i64> {
        let row = sqlx::query(
            r#"
            UPDATE sequence_counter
            SET value = value + 1
            WHERE name = 'transaction_sequence'
            RETURNING value
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .context("Failed to get next sequence number")?;

        Ok(row.get("value"))
    }

    /// List all transactions for an account, in store order (by sequence).
    pub async fn transactions_for_account(&self, account_id: AccountId) -> Result<Vec<Transaction>> {
        let rows = sqlx::query(
            r#"
            SELECT id, sequence, account_id, kind, amount_cents, date
            FROM transactions
            WHERE account_id = ?
            ORDER BY sequence
            "#,
        )
        .bind(account_id.to_string())
        .fetch_all(&self.pool)
        .await
        .context("Failed to list transactions for account")?;

        rows.iter().map(Self::row_to_transaction).collect()
    }

    /// Sum the deposit amounts recorded for an account on a given calendar
    /// date. Always computed from the live transaction log, never cached.
    pub async fn deposits_total_on(&self, account_id: AccountId, date: NaiveDate) -> Result<Cents> {
        let row = sqlx::query(
            r#"
            SELECT COALESCE(SUM(amount_cents), 0) as total
            FROM transactions
            WHERE account_id = ? AND kind = 'deposit' AND date = ?
            "#,
        )
        .bind(account_id.to_string())
        .bind(date.to_string())
        .fetch_one(&self.pool)
        .await
        .context("Failed to sum deposits for date")?;

        Ok(row.get("total"))
    }

    fn row_to_transaction(row: &sqlx::sqlite::SqliteRow) -> Result<Transaction> {
        let id_str: String = row.get("id");
        let account_id_str: String = row.get("account_id");
        let kind_str: String = row.get("kind");
        let date_str: String = row.get("date");

        Ok(Transaction {
            id: Uuid::parse_str(&id_str).context("Invalid transaction ID")?,
            sequence: row.get("sequence"),
            account_id: Uuid::parse_str(&account_id_str).context("Invalid account ID")?,
            kind: TransactionKind::from_str(&kind_str)
                .ok_or_else(|| anyhow::anyhow!("Invalid transaction kind: {}", kind_str))?,
            amount_cents: row.get("amount_cents"),
            date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").context("Invalid date")?,
        })
    }
}
