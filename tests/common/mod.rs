// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use bankledger::application::BankService;
use tempfile::TempDir;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(BankService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = BankService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Test fixture: Standard account setup
pub struct StandardAccounts;

impl StandardAccounts {
    /// Create the two accounts most scenarios need
    pub async fn create_scott_and_yarow(service: &BankService) -> Result<()> {
        service.create_account("Ben", "Scott").await?;
        service.create_account("Dana", "Yarow").await?;
        Ok(())
    }

    /// Create an account and fund it with a single deposit
    pub async fn create_funded(
        service: &BankService,
        first_name: &str,
        last_name: &str,
        amount_cents: i64,
    ) -> Result<()> {
        service.create_account(first_name, last_name).await?;
        service.deposit(last_name, amount_cents).await?;
        Ok(())
    }
}
