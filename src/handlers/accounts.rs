use actix_web::{HttpResponse, ResponseError, Result, web};

use crate::models::*;
use crate::services::AccountService;

#[utoipa::path(
    get,
    path = "/accounts",
    tag = "accounts",
    responses(
        (status = 200, description = "All accounts with derived balances", body = [AccountResponse])
    )
)]
pub async fn list_accounts(account_service: web::Data<AccountService>) -> Result<HttpResponse> {
    match account_service.list_accounts().await {
        Ok(accounts) => Ok(HttpResponse::Ok().json(ApiResponse::success(accounts))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/accounts",
    tag = "accounts",
    request_body = AccountRequest,
    responses(
        (status = 200, description = "Account created", body = AccountResponse),
        (status = 400, description = "Invalid account data")
    )
)]
pub async fn create_account(
    account_service: web::Data<AccountService>,
    request: web::Json<AccountRequest>,
) -> Result<HttpResponse> {
    match account_service.create_account(request.into_inner()).await {
        Ok(account) => Ok(HttpResponse::Ok().json(ApiResponse::success(account))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/accounts/{id}",
    tag = "accounts",
    params(("id" = i64, Path, description = "Account id")),
    responses(
        (status = 200, description = "Account with its transactions", body = AccountDetailResponse),
        (status = 404, description = "Account not found")
    )
)]
pub async fn get_account(
    account_service: web::Data<AccountService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match account_service.get_account(path.into_inner()).await {
        Ok(account) => Ok(HttpResponse::Ok().json(ApiResponse::success(account))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/accounts/{id}",
    tag = "accounts",
    params(("id" = i64, Path, description = "Account id")),
    request_body = AccountRequest,
    responses(
        (status = 200, description = "Account updated", body = AccountResponse),
        (status = 404, description = "Account not found")
    )
)]
pub async fn update_account(
    account_service: web::Data<AccountService>,
    path: web::Path<i64>,
    request: web::Json<AccountRequest>,
) -> Result<HttpResponse> {
    match account_service
        .update_account(path.into_inner(), request.into_inner())
        .await
    {
        Ok(account) => Ok(HttpResponse::Ok().json(ApiResponse::success(account))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/accounts/{id}",
    tag = "accounts",
    params(("id" = i64, Path, description = "Account id")),
    responses(
        (status = 200, description = "Account and its transactions deleted"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn delete_account(
    account_service: web::Data<AccountService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match account_service.delete_account(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::message("Account deleted"))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/accounts/{id}/transactions",
    tag = "accounts",
    params(("id" = i64, Path, description = "Account id")),
    responses(
        (status = 200, description = "Transactions, newest first", body = [TransactionResponse]),
        (status = 404, description = "Account not found")
    )
)]
pub async fn list_transactions(
    account_service: web::Data<AccountService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match account_service.list_transactions(path.into_inner()).await {
        Ok(transactions) => Ok(HttpResponse::Ok().json(ApiResponse::success(transactions))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/accounts/{id}/transactions",
    tag = "accounts",
    params(("id" = i64, Path, description = "Account id")),
    request_body = CreateTransactionRequest,
    responses(
        (status = 200, description = "Transaction posted", body = TransactionResponse),
        (status = 400, description = "Amount not positive"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn create_transaction(
    account_service: web::Data<AccountService>,
    path: web::Path<i64>,
    request: web::Json<CreateTransactionRequest>,
) -> Result<HttpResponse> {
    match account_service
        .create_transaction(path.into_inner(), request.into_inner())
        .await
    {
        Ok(transaction) => Ok(HttpResponse::Ok().json(ApiResponse::success(transaction))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/transactions/{id}",
    tag = "accounts",
    params(("id" = i64, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Transaction deleted; balance shifts accordingly"),
        (status = 404, description = "Transaction not found")
    )
)]
pub async fn delete_transaction(
    account_service: web::Data<AccountService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match account_service.delete_transaction(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::message("Transaction deleted"))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn account_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/accounts")
            .route("", web::get().to(list_accounts))
            .route("", web::post().to(create_account))
            .route("/{id}", web::get().to(get_account))
            .route("/{id}", web::put().to(update_account))
            .route("/{id}", web::delete().to(delete_account))
            .route("/{id}/transactions", web::get().to(list_transactions))
            .route("/{id}/transactions", web::post().to(create_transaction)),
    )
    .service(web::scope("/transactions").route("/{id}", web::delete().to(delete_transaction)));
}
