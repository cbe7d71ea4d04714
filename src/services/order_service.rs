use crate::entities::{OrderStatus, cart_items, carts, order_items, orders, products};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::collections::HashMap;

#[derive(Clone)]
pub struct OrderService {
    pool: DatabaseConnection,
}

impl OrderService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Turns the user's cart into an order. Runs inside a single database
    /// transaction: stock checks, the order insert, item snapshots, stock
    /// decrements and the cart wipe all commit together or not at all.
    pub async fn checkout(&self, user_id: i64, req: CreateOrderRequest) -> AppResult<OrderResponse> {
        if req.shipping_address.trim().len() < 10 {
            return Err(AppError::ValidationError(
                "Shipping address must be at least 10 characters".to_string(),
            ));
        }

        let txn = self.pool.begin().await?;

        let cart = carts::Entity::find()
            .filter(carts::Column::UserId.eq(user_id))
            .one(&txn)
            .await?;
        let lines = match &cart {
            Some(cart) => {
                cart_items::Entity::find()
                    .filter(cart_items::Column::CartId.eq(cart.id))
                    .find_also_related(products::Entity)
                    .all(&txn)
                    .await?
            }
            None => Vec::new(),
        };
        if lines.is_empty() {
            return Err(AppError::ValidationError("Cart is empty".to_string()));
        }

        // Re-validate stock at checkout time; the cart may be stale.
        let mut total_price = Decimal::ZERO;
        for (item, product) in &lines {
            let product = product
                .as_ref()
                .ok_or_else(|| AppError::InternalError("Cart item without product".to_string()))?;
            if item.quantity > product.stock {
                return Err(AppError::ValidationError(format!(
                    "Only {} of '{}' in stock",
                    product.stock, product.name
                )));
            }
            total_price += product.price * Decimal::from(item.quantity);
        }

        let order = orders::ActiveModel {
            user_id: Set(user_id),
            total_price: Set(total_price),
            status: Set(OrderStatus::Pending),
            shipping_address: Set(req.shipping_address),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut item_responses = Vec::with_capacity(lines.len());
        for (item, product) in lines {
            let product = product
                .ok_or_else(|| AppError::InternalError("Cart item without product".to_string()))?;

            let snapshot = order_items::ActiveModel {
                order_id: Set(order.id),
                product_name: Set(product.name.clone()),
                product_price: Set(product.price),
                quantity: Set(item.quantity),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            item_responses.push(OrderItemResponse::from(snapshot));

            let new_stock = product.stock - item.quantity;
            let mut model = product.into_active_model();
            model.stock = Set(new_stock);
            model.update(&txn).await?;
        }

        if let Some(cart) = cart {
            cart_items::Entity::delete_many()
                .filter(cart_items::Column::CartId.eq(cart.id))
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;

        Ok(OrderResponse {
            id: order.id,
            total_price: order.total_price,
            status: order.status,
            shipping_address: order.shipping_address,
            created_at: order.created_at,
            items: item_responses,
        })
    }

    pub async fn list_orders(
        &self,
        user_id: i64,
        query: &OrderQuery,
    ) -> AppResult<PaginatedResponse<OrderResponse>> {
        let params = PaginationParams {
            page: query.page,
            per_page: query.per_page,
        };

        let paginator = orders::Entity::find()
            .filter(orders::Column::UserId.eq(user_id))
            .order_by_desc(orders::Column::CreatedAt)
            .paginate(&self.pool, params.get_per_page());
        let total = paginator.num_items().await?;
        let page = paginator.fetch_page(params.get_page() - 1).await?;

        let order_ids: Vec<i64> = page.iter().map(|o| o.id).collect();
        let mut items_by_order: HashMap<i64, Vec<OrderItemResponse>> = HashMap::new();
        if !order_ids.is_empty() {
            let rows = order_items::Entity::find()
                .filter(order_items::Column::OrderId.is_in(order_ids))
                .all(&self.pool)
                .await?;
            for row in rows {
                items_by_order
                    .entry(row.order_id)
                    .or_default()
                    .push(OrderItemResponse::from(row));
            }
        }

        let responses = page
            .into_iter()
            .map(|order| {
                let items = items_by_order.remove(&order.id).unwrap_or_default();
                OrderResponse {
                    id: order.id,
                    total_price: order.total_price,
                    status: order.status,
                    shipping_address: order.shipping_address,
                    created_at: order.created_at,
                    items,
                }
            })
            .collect();

        Ok(PaginatedResponse::new(
            responses,
            params.get_page(),
            params.get_per_page(),
            total,
        ))
    }

    pub async fn get_order(&self, user_id: i64, order_id: i64) -> AppResult<OrderResponse> {
        let order = orders::Entity::find_by_id(order_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Order {order_id} not found")))?;
        // Orders are private; someone else's id reads as missing.
        if order.user_id != user_id {
            return Err(AppError::NotFound(format!("Order {order_id} not found")));
        }

        let items = order_items::Entity::find()
            .filter(order_items::Column::OrderId.eq(order.id))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(OrderItemResponse::from)
            .collect();

        Ok(OrderResponse {
            id: order.id,
            total_price: order.total_price,
            status: order.status,
            shipping_address: order.shipping_address,
            created_at: order.created_at,
            items,
        })
    }
}
