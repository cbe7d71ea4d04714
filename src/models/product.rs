use crate::entities::products;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductRequest {
    #[schema(example = "Mechanical keyboard")]
    pub name: String,
    pub description: String,
    #[schema(example = "49.99")]
    pub price: Decimal,
    #[schema(example = 25)]
    pub stock: i32,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ProductQuery {
    /// Case-insensitive substring match.
    pub name: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i32,
}

impl From<products::Model> for ProductResponse {
    fn from(p: products::Model) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price,
            stock: p.stock,
        }
    }
}
