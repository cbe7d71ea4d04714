use crate::entities::{TransactionKind, accounts, bank_transactions};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use std::collections::HashMap;

/// Signed sum over ledger entries. The balance is never stored; every
/// read recomputes it from the transaction rows.
pub fn balance_of<'a, I>(transactions: I) -> Decimal
where
    I: IntoIterator<Item = &'a bank_transactions::Model>,
{
    transactions
        .into_iter()
        .fold(Decimal::ZERO, |acc, tx| match tx.kind {
            TransactionKind::Credit => acc + tx.amount,
            TransactionKind::Debit => acc - tx.amount,
        })
}

#[derive(Clone)]
pub struct AccountService {
    pool: DatabaseConnection,
}

impl AccountService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list_accounts(&self) -> AppResult<Vec<AccountResponse>> {
        let accounts = accounts::Entity::find().all(&self.pool).await?;
        let ids: Vec<i64> = accounts.iter().map(|a| a.id).collect();

        let transactions = bank_transactions::Entity::find()
            .filter(bank_transactions::Column::AccountId.is_in(ids))
            .all(&self.pool)
            .await?;

        let mut balances: HashMap<i64, Decimal> = HashMap::new();
        for tx in &transactions {
            let entry = balances.entry(tx.account_id).or_insert(Decimal::ZERO);
            match tx.kind {
                TransactionKind::Credit => *entry += tx.amount,
                TransactionKind::Debit => *entry -= tx.amount,
            }
        }

        Ok(accounts
            .into_iter()
            .map(|a| {
                let balance = balances.get(&a.id).copied().unwrap_or(Decimal::ZERO);
                AccountResponse {
                    id: a.id,
                    branch_office: a.branch_office,
                    account_number: a.account_number,
                    holder_name: a.holder_name,
                    address: a.address,
                    balance,
                }
            })
            .collect())
    }

    pub async fn create_account(&self, req: AccountRequest) -> AppResult<AccountResponse> {
        let account = accounts::ActiveModel {
            branch_office: Set(req.branch_office),
            account_number: Set(req.account_number),
            holder_name: Set(req.holder_name),
            address: Set(req.address),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(AccountResponse {
            id: account.id,
            branch_office: account.branch_office,
            account_number: account.account_number,
            holder_name: account.holder_name,
            address: account.address,
            balance: Decimal::ZERO,
        })
    }

    pub async fn get_account(&self, id: i64) -> AppResult<AccountDetailResponse> {
        let account = self.find_account(id).await?;

        let transactions = bank_transactions::Entity::find()
            .filter(bank_transactions::Column::AccountId.eq(id))
            .order_by_desc(bank_transactions::Column::PostedAt)
            .all(&self.pool)
            .await?;

        let balance = balance_of(&transactions);

        Ok(AccountDetailResponse {
            id: account.id,
            branch_office: account.branch_office,
            account_number: account.account_number,
            holder_name: account.holder_name,
            address: account.address,
            balance,
            transactions: transactions
                .into_iter()
                .map(TransactionResponse::from)
                .collect(),
        })
    }

    pub async fn update_account(&self, id: i64, req: AccountRequest) -> AppResult<AccountResponse> {
        let account = self.find_account(id).await?;

        let mut model = account.into_active_model();
        model.branch_office = Set(req.branch_office);
        model.account_number = Set(req.account_number);
        model.holder_name = Set(req.holder_name);
        model.address = Set(req.address);
        let account = model.update(&self.pool).await?;

        let transactions = bank_transactions::Entity::find()
            .filter(bank_transactions::Column::AccountId.eq(id))
            .all(&self.pool)
            .await?;

        Ok(AccountResponse {
            id: account.id,
            branch_office: account.branch_office,
            account_number: account.account_number,
            holder_name: account.holder_name,
            address: account.address,
            balance: balance_of(&transactions),
        })
    }

    pub async fn delete_account(&self, id: i64) -> AppResult<()> {
        let res = accounts::Entity::delete_by_id(id).exec(&self.pool).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Account {id} not found")));
        }
        Ok(())
    }

    pub async fn list_transactions(&self, account_id: i64) -> AppResult<Vec<TransactionResponse>> {
        self.find_account(account_id).await?;

        let transactions = bank_transactions::Entity::find()
            .filter(bank_transactions::Column::AccountId.eq(account_id))
            .order_by_desc(bank_transactions::Column::PostedAt)
            .all(&self.pool)
            .await?;

        Ok(transactions
            .into_iter()
            .map(TransactionResponse::from)
            .collect())
    }

    pub async fn create_transaction(
        &self,
        account_id: i64,
        req: CreateTransactionRequest,
    ) -> AppResult<TransactionResponse> {
        self.find_account(account_id).await?;

        if req.amount <= Decimal::ZERO {
            return Err(AppError::ValidationError(
                "Amount must be greater than 0".to_string(),
            ));
        }

        let tx = bank_transactions::ActiveModel {
            account_id: Set(account_id),
            kind: Set(req.kind),
            amount: Set(req.amount),
            posted_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(TransactionResponse::from(tx))
    }

    pub async fn delete_transaction(&self, id: i64) -> AppResult<()> {
        let res = bank_transactions::Entity::delete_by_id(id)
            .exec(&self.pool)
            .await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Transaction {id} not found")));
        }
        Ok(())
    }

    async fn find_account(&self, id: i64) -> AppResult<accounts::Model> {
        accounts::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Account {id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn tx(id: i64, kind: TransactionKind, amount: Decimal) -> bank_transactions::Model {
        bank_transactions::Model {
            id,
            account_id: 1,
            kind,
            amount,
            posted_at: Utc::now(),
        }
    }

    #[test]
    fn test_balance_credit_minus_debit() {
        let txs = vec![
            tx(1, TransactionKind::Credit, dec!(100.00)),
            tx(2, TransactionKind::Debit, dec!(30.00)),
        ];
        assert_eq!(balance_of(&txs), dec!(70.00));
    }

    #[test]
    fn test_balance_independent_of_order() {
        let a = vec![
            tx(1, TransactionKind::Credit, dec!(10.50)),
            tx(2, TransactionKind::Debit, dec!(4.25)),
            tx(3, TransactionKind::Credit, dec!(1.00)),
        ];
        let mut b = a.clone();
        b.reverse();
        assert_eq!(balance_of(&a), balance_of(&b));
        assert_eq!(balance_of(&a), dec!(7.25));
    }

    #[test]
    fn test_balance_empty_is_zero() {
        let txs: Vec<bank_transactions::Model> = vec![];
        assert_eq!(balance_of(&txs), Decimal::ZERO);
    }

    #[test]
    fn test_balance_can_go_negative() {
        let txs = vec![tx(1, TransactionKind::Debit, dec!(5.00))];
        assert_eq!(balance_of(&txs), dec!(-5.00));
    }
}
