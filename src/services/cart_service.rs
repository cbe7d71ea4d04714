use crate::entities::{cart_items, carts, products};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, Set,
};

#[derive(Clone)]
pub struct CartService {
    pool: DatabaseConnection,
}

impl CartService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn get_cart(&self, user_id: i64) -> AppResult<CartResponse> {
        let cart = self.get_or_create_cart(user_id).await?;
        self.build_cart_response(cart).await
    }

    pub async fn add_item(&self, user_id: i64, req: AddCartItemRequest) -> AppResult<CartResponse> {
        if req.quantity <= 0 {
            return Err(AppError::ValidationError(
                "Quantity must be positive".to_string(),
            ));
        }

        let product = products::Entity::find_by_id(req.product_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", req.product_id)))?;

        let cart = self.get_or_create_cart(user_id).await?;

        let existing = cart_items::Entity::find()
            .filter(cart_items::Column::CartId.eq(cart.id))
            .filter(cart_items::Column::ProductId.eq(req.product_id))
            .one(&self.pool)
            .await?;

        // Same product twice merges into one line instead of a second row.
        let new_quantity = match &existing {
            Some(item) => item.quantity + req.quantity,
            None => req.quantity,
        };
        if new_quantity > product.stock {
            return Err(AppError::ValidationError(format!(
                "Only {} of '{}' in stock",
                product.stock, product.name
            )));
        }

        match existing {
            Some(item) => {
                let mut model = item.into_active_model();
                model.quantity = Set(new_quantity);
                model.update(&self.pool).await?;
            }
            None => {
                cart_items::ActiveModel {
                    cart_id: Set(cart.id),
                    product_id: Set(req.product_id),
                    quantity: Set(new_quantity),
                    ..Default::default()
                }
                .insert(&self.pool)
                .await?;
            }
        }

        self.build_cart_response(cart).await
    }

    pub async fn update_item(
        &self,
        user_id: i64,
        item_id: i64,
        req: UpdateCartItemRequest,
    ) -> AppResult<CartResponse> {
        if req.quantity <= 0 {
            return Err(AppError::ValidationError(
                "Quantity must be positive".to_string(),
            ));
        }

        let cart = self.get_or_create_cart(user_id).await?;
        let item = self.find_cart_item(&cart, item_id).await?;

        let product = products::Entity::find_by_id(item.product_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Product no longer exists".to_string()))?;
        if req.quantity > product.stock {
            return Err(AppError::ValidationError(format!(
                "Only {} of '{}' in stock",
                product.stock, product.name
            )));
        }

        let mut model = item.into_active_model();
        model.quantity = Set(req.quantity);
        model.update(&self.pool).await?;

        self.build_cart_response(cart).await
    }

    pub async fn remove_item(&self, user_id: i64, item_id: i64) -> AppResult<CartResponse> {
        let cart = self.get_or_create_cart(user_id).await?;
        let item = self.find_cart_item(&cart, item_id).await?;
        item.delete(&self.pool).await?;
        self.build_cart_response(cart).await
    }

    pub async fn clear_cart(&self, user_id: i64) -> AppResult<()> {
        let cart = self.get_or_create_cart(user_id).await?;
        cart_items::Entity::delete_many()
            .filter(cart_items::Column::CartId.eq(cart.id))
            .exec(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn get_or_create_cart(&self, user_id: i64) -> AppResult<carts::Model> {
        if let Some(cart) = carts::Entity::find()
            .filter(carts::Column::UserId.eq(user_id))
            .one(&self.pool)
            .await?
        {
            return Ok(cart);
        }

        let cart = carts::ActiveModel {
            user_id: Set(user_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        Ok(cart)
    }

    async fn find_cart_item(
        &self,
        cart: &carts::Model,
        item_id: i64,
    ) -> AppResult<cart_items::Model> {
        cart_items::Entity::find_by_id(item_id)
            .filter(cart_items::Column::CartId.eq(cart.id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Cart item {item_id} not found")))
    }

    async fn build_cart_response(&self, cart: carts::Model) -> AppResult<CartResponse> {
        let rows = cart_items::Entity::find()
            .filter(cart_items::Column::CartId.eq(cart.id))
            .find_also_related(products::Entity)
            .all(&self.pool)
            .await?;

        let mut items = Vec::with_capacity(rows.len());
        let mut total_price = Decimal::ZERO;
        for (item, product) in rows {
            let product = product
                .ok_or_else(|| AppError::InternalError("Cart item without product".to_string()))?;
            let subtotal = product.price * Decimal::from(item.quantity);
            total_price += subtotal;
            items.push(CartItemResponse {
                id: item.id,
                product: ProductResponse::from(product),
                quantity: item.quantity,
                subtotal,
            });
        }

        Ok(CartResponse {
            id: cart.id,
            items,
            total_price,
            created_at: cart.created_at,
        })
    }
}
