mod common;

use anyhow::Result;
use bankledger::application::AppError;
use common::test_service;

/// End-to-end scenario: account lifecycle through create, deposit, a
/// rejected over-limit deposit, withdraw, and a transfer to a second account.
#[tokio::test]
async fn test_ben_scott_scenario() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let view = service.create_account("Ben", "Scott").await?;
    assert_eq!(view.balance_cents, 0);

    let view = service.deposit("Scott", 10_000).await?; // 100.00
    assert_eq!(view.balance_cents, 10_000);

    let err = service.deposit("Scott", 510_000).await.unwrap_err(); // 5100.00
    assert!(matches!(err, AppError::DepositLimitExceeded { .. }));
    let view = service.account_by_last_name("Scott").await?;
    assert_eq!(view.balance_cents, 10_000);

    let view = service.withdraw("Scott", 5_000).await?; // 50.00
    assert_eq!(view.balance_cents, 5_000);

    let yarow = service.create_account("Dana", "Yarow").await?;
    assert_eq!(yarow.balance_cents, 0);

    service.transfer("Scott", "Yarow", 5_000).await?;

    let scott = service.account_by_last_name("Scott").await?;
    let yarow = service.account_by_last_name("Yarow").await?;
    assert_eq!(scott.balance_cents, 0);
    assert_eq!(yarow.balance_cents, 5_000);

    Ok(())
}

/// The accounting identity: balance equals deposits minus withdrawals
/// recorded in the history.
#[tokio::test]
async fn test_balance_matches_transaction_history() -> Result<()> {
    let (service, _temp) = test_service().await?;

    service.create_account("Ben", "Scott").await?;
    service.deposit("Scott", 30_000).await?;
    service.deposit("Scott", 7_500).await?;
    service.withdraw("Scott", 12_000).await?;
    service.withdraw("Scott", 500).await?;

    let view = service.account_by_last_name("Scott").await?;
    let transactions = service.latest_transactions("Scott").await?;

    let net: i64 = transactions
        .iter()
        .map(|t| match t.kind {
            bankledger::domain::TransactionKind::Deposit => t.amount_cents,
            bankledger::domain::TransactionKind::Withdrawal => -t.amount_cents,
        })
        .sum();

    assert_eq!(view.balance_cents, net);
    assert_eq!(view.balance_cents, 25_000);

    Ok(())
}
