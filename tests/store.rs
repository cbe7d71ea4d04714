mod common;

use campus_backend::entities::{OrderStatus, Role};
use campus_backend::error::AppError;
use campus_backend::models::*;
use campus_backend::services::{AuthService, CartService, OrderService, ProductService};
use campus_backend::utils::JwtService;
use rust_decimal_macros::dec;
use sea_orm::DatabaseConnection;

fn store_services(
    pool: DatabaseConnection,
) -> (ProductService, CartService, OrderService, AuthService) {
    let jwt = JwtService::new("test-secret", 3600, 86400);
    (
        ProductService::new(pool.clone()),
        CartService::new(pool.clone()),
        OrderService::new(pool.clone()),
        AuthService::new(pool, jwt),
    )
}

async fn seed_user(auth: &AuthService, email: &str) -> i64 {
    auth.register(RegisterRequest {
        email: email.to_string(),
        username: "shopper".to_string(),
        full_name: "Jane Holloway".to_string(),
        password: "Password123".to_string(),
        role: Some(Role::Student),
        major: None,
    })
    .await
    .unwrap()
    .user
    .id
}

async fn seed_product(products: &ProductService, name: &str, stock: i32) -> ProductResponse {
    products
        .create_product(ProductRequest {
            name: name.to_string(),
            description: "Test item".to_string(),
            price: dec!(10.00),
            stock,
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn adding_the_same_product_merges_quantities() {
    let pool = common::setup().await;
    let (products, carts, _, auth) = store_services(pool);

    let user_id = seed_user(&auth, "merge@example.edu").await;
    let product = seed_product(&products, "Keyboard", 10).await;

    carts
        .add_item(
            user_id,
            AddCartItemRequest {
                product_id: product.id,
                quantity: 2,
            },
        )
        .await
        .unwrap();
    let cart = carts
        .add_item(
            user_id,
            AddCartItemRequest {
                product_id: product.id,
                quantity: 3,
            },
        )
        .await
        .unwrap();

    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].quantity, 5);
    assert_eq!(cart.items[0].subtotal, dec!(50.00));
    assert_eq!(cart.total_price, dec!(50.00));
}

#[tokio::test]
async fn cart_quantity_cannot_exceed_stock() {
    let pool = common::setup().await;
    let (products, carts, _, auth) = store_services(pool);

    let user_id = seed_user(&auth, "stock@example.edu").await;
    let product = seed_product(&products, "Mouse", 3).await;

    let err = carts
        .add_item(
            user_id,
            AddCartItemRequest {
                product_id: product.id,
                quantity: 4,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    // Merging past the ceiling is rejected too
    carts
        .add_item(
            user_id,
            AddCartItemRequest {
                product_id: product.id,
                quantity: 2,
            },
        )
        .await
        .unwrap();
    let err = carts
        .add_item(
            user_id,
            AddCartItemRequest {
                product_id: product.id,
                quantity: 2,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn checkout_with_an_empty_cart_is_rejected() {
    let pool = common::setup().await;
    let (_, _, orders, auth) = store_services(pool);

    let user_id = seed_user(&auth, "empty@example.edu").await;

    let err = orders
        .checkout(
            user_id,
            CreateOrderRequest {
                shipping_address: "12 Elm Street".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn checkout_snapshots_items_decrements_stock_and_empties_the_cart() {
    let pool = common::setup().await;
    let (products, carts, orders, auth) = store_services(pool);

    let user_id = seed_user(&auth, "buyer@example.edu").await;
    let keyboard = seed_product(&products, "Keyboard", 10).await;
    let mouse = seed_product(&products, "Mouse", 5).await;

    carts
        .add_item(
            user_id,
            AddCartItemRequest {
                product_id: keyboard.id,
                quantity: 2,
            },
        )
        .await
        .unwrap();
    carts
        .add_item(
            user_id,
            AddCartItemRequest {
                product_id: mouse.id,
                quantity: 1,
            },
        )
        .await
        .unwrap();

    let order = orders
        .checkout(
            user_id,
            CreateOrderRequest {
                shipping_address: "12 Elm Street".to_string(),
            },
        )
        .await
        .unwrap();

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total_price, dec!(30.00));
    assert_eq!(order.items.len(), 2);

    assert_eq!(products.get_product(keyboard.id).await.unwrap().stock, 8);
    assert_eq!(products.get_product(mouse.id).await.unwrap().stock, 4);

    let cart = carts.get_cart(user_id).await.unwrap();
    assert!(cart.items.is_empty());

    // Item snapshots survive later product edits
    products
        .update_product(
            keyboard.id,
            ProductRequest {
                name: "Keyboard v2".to_string(),
                description: "Renamed".to_string(),
                price: dec!(99.00),
                stock: 8,
            },
        )
        .await
        .unwrap();
    let fetched = orders.get_order(user_id, order.id).await.unwrap();
    assert_eq!(fetched.items[0].product_name, "Keyboard");
    assert_eq!(fetched.items[0].product_price, dec!(10.00));
}

#[tokio::test]
async fn failed_checkout_changes_nothing() {
    let pool = common::setup().await;
    let (products, carts, orders, auth) = store_services(pool);

    let user_id = seed_user(&auth, "atomic@example.edu").await;
    let product = seed_product(&products, "Monitor", 5).await;

    carts
        .add_item(
            user_id,
            AddCartItemRequest {
                product_id: product.id,
                quantity: 4,
            },
        )
        .await
        .unwrap();

    // Stock drops below the carted quantity before checkout
    products
        .update_product(
            product.id,
            ProductRequest {
                name: "Monitor".to_string(),
                description: "Test item".to_string(),
                price: dec!(10.00),
                stock: 2,
            },
        )
        .await
        .unwrap();

    let err = orders
        .checkout(
            user_id,
            CreateOrderRequest {
                shipping_address: "12 Elm Street".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    // No order, no stock change, the cart is intact
    let listed = orders
        .list_orders(user_id, &OrderQuery::default())
        .await
        .unwrap();
    assert!(listed.items.is_empty());
    assert_eq!(products.get_product(product.id).await.unwrap().stock, 2);
    assert_eq!(carts.get_cart(user_id).await.unwrap().items.len(), 1);
}

#[tokio::test]
async fn orders_are_private_to_their_owner() {
    let pool = common::setup().await;
    let (products, carts, orders, auth) = store_services(pool);

    let buyer = seed_user(&auth, "owner@example.edu").await;
    let stranger = seed_user(&auth, "stranger@example.edu").await;
    let product = seed_product(&products, "Webcam", 5).await;

    carts
        .add_item(
            buyer,
            AddCartItemRequest {
                product_id: product.id,
                quantity: 1,
            },
        )
        .await
        .unwrap();
    let order = orders
        .checkout(
            buyer,
            CreateOrderRequest {
                shipping_address: "12 Elm Street".to_string(),
            },
        )
        .await
        .unwrap();

    let err = orders.get_order(stranger, order.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert!(
        orders
            .list_orders(stranger, &OrderQuery::default())
            .await
            .unwrap()
            .items
            .is_empty()
    );
}

#[tokio::test]
async fn product_validation_rejects_negatives() {
    let pool = common::setup().await;
    let (products, _, _, _) = store_services(pool);

    let err = products
        .create_product(ProductRequest {
            name: "Broken".to_string(),
            description: String::new(),
            price: dec!(-1.00),
            stock: 1,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    let err = products
        .create_product(ProductRequest {
            name: "Broken".to_string(),
            description: String::new(),
            price: dec!(1.00),
            stock: -1,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn product_catalog_pages_and_filters() {
    let pool = common::setup().await;
    let (products, _, _, _) = store_services(pool);

    for i in 0..5 {
        seed_product(&products, &format!("Widget {i}"), 10).await;
    }
    seed_product(&products, "Gadget", 10).await;

    let page = products
        .list_products(&ProductQuery {
            name: Some("widget".to_string()),
            page: Some(1),
            per_page: Some(2),
        })
        .await
        .unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.pagination.total, 5);
    assert_eq!(page.pagination.total_pages, 3);
}

#[tokio::test]
async fn a_user_keeps_a_single_cart() {
    let pool = common::setup().await;
    let (products, carts, _, auth) = store_services(pool);

    let user_id = seed_user(&auth, "single@example.edu").await;

    // The first read creates the cart, later reads find the same one
    let empty = carts.get_cart(user_id).await.unwrap();
    assert!(empty.items.is_empty());

    let product = seed_product(&products, "Mouse", 5).await;
    carts
        .add_item(
            user_id,
            AddCartItemRequest {
                product_id: product.id,
                quantity: 1,
            },
        )
        .await
        .unwrap();

    let again = carts.get_cart(user_id).await.unwrap();
    assert_eq!(again.id, empty.id);
    assert_eq!(again.items.len(), 1);
}
