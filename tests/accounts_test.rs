mod common;

use anyhow::Result;
use bankledger::application::AppError;
use bankledger::Repository;
use common::test_service;
use uuid::Uuid;

#[tokio::test]
async fn test_new_account_has_zero_balance_and_default_preference() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let view = service.create_account("Ben", "Scott").await?;

    assert_eq!(view.first_name, "Ben");
    assert_eq!(view.last_name, "Scott");
    assert_eq!(view.balance_cents, 0);
    assert_eq!(view.notification_preference, "email");

    Ok(())
}

#[tokio::test]
async fn test_duplicate_last_name_is_rejected() -> Result<()> {
    let (service, _temp) = test_service().await?;

    service.create_account("Ben", "Scott").await?;
    let err = service.create_account("Other", "Scott").await.unwrap_err();

    assert!(matches!(err, AppError::DuplicateAccount(name) if name == "Scott"));

    Ok(())
}

#[tokio::test]
async fn test_lookup_by_last_name() -> Result<()> {
    let (service, _temp) = test_service().await?;

    service.create_account("Ben", "Scott").await?;
    let view = service.account_by_last_name("Scott").await?;
    assert_eq!(view.first_name, "Ben");

    let err = service.account_by_last_name("Nobody").await.unwrap_err();
    assert!(matches!(err, AppError::AccountNotFound(_)));

    Ok(())
}

#[tokio::test]
async fn test_lookup_by_first_name() -> Result<()> {
    let (service, _temp) = test_service().await?;

    service.create_account("Ben", "Scott").await?;
    let view = service.account_by_first_name("Ben").await?;
    assert_eq!(view.last_name, "Scott");

    let err = service.account_by_first_name("Nobody").await.unwrap_err();
    assert!(matches!(err, AppError::AccountNotFound(_)));

    Ok(())
}

#[tokio::test]
async fn test_lookup_by_id() -> Result<()> {
    let temp_dir = tempfile::TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = bankledger::BankService::init(db_path.to_str().unwrap()).await?;

    service.create_account("Ben", "Scott").await?;

    // The public view hides the identifier; read it through the store
    let repo = Repository::connect(&format!("sqlite:{}", db_path.to_str().unwrap())).await?;
    let account = repo.get_account_by_last_name("Scott").await?.unwrap();

    let view = service.account_by_id(account.id).await?;
    assert_eq!(view.last_name, "Scott");

    let err = service.account_by_id(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, AppError::AccountNotFound(_)));

    Ok(())
}

#[tokio::test]
async fn test_list_accounts_ordered_by_last_name() -> Result<()> {
    let (service, _temp) = test_service().await?;

    service.create_account("Dana", "Yarow").await?;
    service.create_account("Ben", "Scott").await?;

    let accounts = service.list_accounts().await?;
    let last_names: Vec<_> = accounts.iter().map(|a| a.last_name.as_str()).collect();
    assert_eq!(last_names, vec!["Scott", "Yarow"]);

    Ok(())
}
