use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};

use crate::error::AppError;
use crate::middlewares::CurrentUser;
use crate::models::*;
use crate::services::CartService;

fn current_user(req: &HttpRequest) -> Result<CurrentUser, AppError> {
    req.extensions()
        .get::<CurrentUser>()
        .copied()
        .ok_or_else(|| AppError::AuthError("Authentication required".to_string()))
}

#[utoipa::path(
    get,
    path = "/cart",
    tag = "store",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user's cart", body = CartResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_cart(cart_service: web::Data<CartService>, req: HttpRequest) -> Result<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match cart_service.get_cart(user.id).await {
        Ok(cart) => Ok(HttpResponse::Ok().json(ApiResponse::success(cart))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/cart/items",
    tag = "store",
    security(("bearer_auth" = [])),
    request_body = AddCartItemRequest,
    responses(
        (status = 200, description = "Item added; same product merges quantities", body = CartResponse),
        (status = 400, description = "Quantity not positive or exceeds stock"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn add_item(
    cart_service: web::Data<CartService>,
    req: HttpRequest,
    request: web::Json<AddCartItemRequest>,
) -> Result<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match cart_service.add_item(user.id, request.into_inner()).await {
        Ok(cart) => Ok(HttpResponse::Ok().json(ApiResponse::success(cart))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/cart/items/{id}",
    tag = "store",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Cart item id")),
    request_body = UpdateCartItemRequest,
    responses(
        (status = 200, description = "Quantity updated", body = CartResponse),
        (status = 400, description = "Quantity not positive or exceeds stock"),
        (status = 404, description = "Cart item not found")
    )
)]
pub async fn update_item(
    cart_service: web::Data<CartService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UpdateCartItemRequest>,
) -> Result<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match cart_service
        .update_item(user.id, path.into_inner(), request.into_inner())
        .await
    {
        Ok(cart) => Ok(HttpResponse::Ok().json(ApiResponse::success(cart))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/cart/items/{id}",
    tag = "store",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Cart item id")),
    responses(
        (status = 200, description = "Item removed", body = CartResponse),
        (status = 404, description = "Cart item not found")
    )
)]
pub async fn remove_item(
    cart_service: web::Data<CartService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match cart_service.remove_item(user.id, path.into_inner()).await {
        Ok(cart) => Ok(HttpResponse::Ok().json(ApiResponse::success(cart))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/cart",
    tag = "store",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Cart emptied"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn clear_cart(
    cart_service: web::Data<CartService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match cart_service.clear_cart(user.id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::message("Cart cleared"))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn cart_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/cart")
            .route("", web::get().to(get_cart))
            .route("", web::delete().to(clear_cart))
            .route("/items", web::post().to(add_item))
            .route("/items/{id}", web::put().to(update_item))
            .route("/items/{id}", web::delete().to(remove_item)),
    );
}
