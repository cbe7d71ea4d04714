mod common;

use campus_backend::entities::TransactionKind;
use campus_backend::error::AppError;
use campus_backend::models::*;
use campus_backend::services::AccountService;
use rust_decimal_macros::dec;

fn account_request(number: &str) -> AccountRequest {
    AccountRequest {
        branch_office: "Downtown Branch".to_string(),
        account_number: number.to_string(),
        holder_name: "Jane Holloway".to_string(),
        address: "12 Elm Street".to_string(),
    }
}

#[tokio::test]
async fn balance_is_derived_from_transactions() {
    let pool = common::setup().await;
    let service = AccountService::new(pool);

    let account = service
        .create_account(account_request("1023-4456-01"))
        .await
        .unwrap();
    assert_eq!(account.balance, dec!(0));

    service
        .create_transaction(
            account.id,
            CreateTransactionRequest {
                kind: TransactionKind::Credit,
                amount: dec!(100.00),
            },
        )
        .await
        .unwrap();
    service
        .create_transaction(
            account.id,
            CreateTransactionRequest {
                kind: TransactionKind::Debit,
                amount: dec!(30.00),
            },
        )
        .await
        .unwrap();

    let detail = service.get_account(account.id).await.unwrap();
    assert_eq!(detail.balance, dec!(70.00));
    assert_eq!(detail.transactions.len(), 2);

    let listed = service.list_accounts().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].balance, dec!(70.00));
}

#[tokio::test]
async fn deleting_a_transaction_moves_the_balance() {
    let pool = common::setup().await;
    let service = AccountService::new(pool);

    let account = service
        .create_account(account_request("2000-0001-99"))
        .await
        .unwrap();
    let credit = service
        .create_transaction(
            account.id,
            CreateTransactionRequest {
                kind: TransactionKind::Credit,
                amount: dec!(250.00),
            },
        )
        .await
        .unwrap();
    let debit = service
        .create_transaction(
            account.id,
            CreateTransactionRequest {
                kind: TransactionKind::Debit,
                amount: dec!(40.00),
            },
        )
        .await
        .unwrap();
    assert_eq!(
        service.get_account(account.id).await.unwrap().balance,
        dec!(210.00)
    );

    service.delete_transaction(debit.id).await.unwrap();
    assert_eq!(
        service.get_account(account.id).await.unwrap().balance,
        dec!(250.00)
    );

    service.delete_transaction(credit.id).await.unwrap();
    assert_eq!(
        service.get_account(account.id).await.unwrap().balance,
        dec!(0)
    );
}

#[tokio::test]
async fn non_positive_amounts_are_rejected() {
    let pool = common::setup().await;
    let service = AccountService::new(pool);

    let account = service
        .create_account(account_request("3000-1111-22"))
        .await
        .unwrap();

    for amount in [dec!(0), dec!(-5.00)] {
        let err = service
            .create_transaction(
                account.id,
                CreateTransactionRequest {
                    kind: TransactionKind::Credit,
                    amount,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    assert!(
        service
            .get_account(account.id)
            .await
            .unwrap()
            .transactions
            .is_empty()
    );
}

#[tokio::test]
async fn deleting_an_account_removes_its_transactions() {
    let pool = common::setup().await;
    let service = AccountService::new(pool);

    let account = service
        .create_account(account_request("4000-2222-33"))
        .await
        .unwrap();
    service
        .create_transaction(
            account.id,
            CreateTransactionRequest {
                kind: TransactionKind::Credit,
                amount: dec!(10.00),
            },
        )
        .await
        .unwrap();

    service.delete_account(account.id).await.unwrap();

    let err = service.get_account(account.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    let err = service.list_transactions(account.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn missing_account_returns_not_found() {
    let pool = common::setup().await;
    let service = AccountService::new(pool);

    let err = service.get_account(999).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    let err = service
        .update_account(999, account_request("0000-0000-00"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    let err = service.delete_account(999).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
