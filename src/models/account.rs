use crate::entities::{TransactionKind, bank_transactions};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Used for both create and update; account updates are full-row
/// overwrites.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccountRequest {
    #[schema(example = "Downtown Branch")]
    pub branch_office: String,
    #[schema(example = "1023-4456-01")]
    pub account_number: String,
    #[schema(example = "Jane Holloway")]
    pub holder_name: String,
    #[schema(example = "12 Elm Street")]
    pub address: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccountResponse {
    pub id: i64,
    pub branch_office: String,
    pub account_number: String,
    pub holder_name: String,
    pub address: String,
    /// Derived on every read, never stored.
    pub balance: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccountDetailResponse {
    pub id: i64,
    pub branch_office: String,
    pub account_number: String,
    pub holder_name: String,
    pub address: String,
    pub balance: Decimal,
    pub transactions: Vec<TransactionResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateTransactionRequest {
    pub kind: TransactionKind,
    #[schema(example = "100.00")]
    pub amount: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransactionResponse {
    pub id: i64,
    pub account_id: i64,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub posted_at: DateTime<Utc>,
}

impl From<bank_transactions::Model> for TransactionResponse {
    fn from(tx: bank_transactions::Model) -> Self {
        Self {
            id: tx.id,
            account_id: tx.account_id,
            kind: tx.kind,
            amount: tx.amount,
            posted_at: tx.posted_at,
        }
    }
}
