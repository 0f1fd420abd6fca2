mod common;

use anyhow::Result;
use bankledger::application::AppError;
use common::{test_service, StandardAccounts};

#[tokio::test]
async fn test_transfer_moves_amount_between_accounts() -> Result<()> {
    let (service, _temp) = test_service().await?;

    StandardAccounts::create_scott_and_yarow(&service).await?;
    service.deposit("Scott", 10_000).await?;

    service.transfer("Scott", "Yarow", 4_000).await?;

    let scott = service.account_by_last_name("Scott").await?;
    let yarow = service.account_by_last_name("Yarow").await?;
    assert_eq!(scott.balance_cents, 6_000);
    assert_eq!(yarow.balance_cents, 4_000);

    Ok(())
}

#[tokio::test]
async fn test_transfer_with_insufficient_funds_changes_nothing() -> Result<()> {
    let (service, _temp) = test_service().await?;

    StandardAccounts::create_scott_and_yarow(&service).await?;
    service.deposit("Scott", 1_000).await?;

    let err = service.transfer("Scott", "Yarow", 2_000).await.unwrap_err();
    assert!(matches!(err, AppError::InsufficientFunds { .. }));

    let scott = service.account_by_last_name("Scott").await?;
    let yarow = service.account_by_last_name("Yarow").await?;
    assert_eq!(scott.balance_cents, 1_000);
    assert_eq!(yarow.balance_cents, 0);

    Ok(())
}

#[tokio::test]
async fn test_transfer_from_missing_account_aborts_before_deposit() -> Result<()> {
    let (service, _temp) = test_service().await?;

    service.create_account("Dana", "Yarow").await?;

    let err = service.transfer("Nobody", "Yarow", 1_000).await.unwrap_err();
    assert!(matches!(err, AppError::AccountNotFound(_)));

    let yarow = service.account_by_last_name("Yarow").await?;
    assert_eq!(yarow.balance_cents, 0);

    Ok(())
}

#[tokio::test]
async fn test_failed_deposit_leg_leaves_withdrawal_applied() -> Result<()> {
    let (service, _temp) = test_service().await?;

    StandardAccounts::create_funded(&service, "Ben", "Scott", 10_000).await?;

    // Destination doesn't exist: the withdrawal commits, then the deposit
    // fails, leaving the transfer partially applied. Known behavior.
    let err = service.transfer("Scott", "Nobody", 4_000).await.unwrap_err();
    assert!(matches!(err, AppError::AccountNotFound(_)));

    let scott = service.account_by_last_name("Scott").await?;
    assert_eq!(scott.balance_cents, 6_000);

    Ok(())
}

#[tokio::test]
async fn test_transfer_deposit_leg_honors_daily_limit() -> Result<()> {
    let (service, _temp) = test_service().await?;

    StandardAccounts::create_scott_and_yarow(&service).await?;
    service.deposit("Scott", 500_000).await?;
    service.deposit("Yarow", 500_000).await?;

    // Yarow is already at the daily deposit limit; the deposit leg fails
    // after Scott's withdrawal committed
    let err = service.transfer("Scott", "Yarow", 1_000).await.unwrap_err();
    assert!(matches!(err, AppError::DepositLimitExceeded { .. }));

    let scott = service.account_by_last_name("Scott").await?;
    let yarow = service.account_by_last_name("Yarow").await?;
    assert_eq!(scott.balance_cents, 499_000);
    assert_eq!(yarow.balance_cents, 500_000);

    Ok(())
}
