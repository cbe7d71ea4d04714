use crate::entities::products;
use crate::error::{AppError, AppResult};
use crate::models::*;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, Set,
};

#[derive(Clone)]
pub struct ProductService {
    pool: DatabaseConnection,
}

impl ProductService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list_products(
        &self,
        query: &ProductQuery,
    ) -> AppResult<PaginatedResponse<ProductResponse>> {
        let params = PaginationParams {
            page: query.page,
            per_page: query.per_page,
        };

        let mut select = products::Entity::find();
        if let Some(name) = &query.name {
            select = select.filter(products::Column::Name.contains(name));
        }

        let paginator = select.paginate(&self.pool, params.get_per_page());
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(params.get_page() - 1).await?;

        Ok(PaginatedResponse::new(
            rows.into_iter().map(ProductResponse::from).collect(),
            params.get_page(),
            params.get_per_page(),
            total,
        ))
    }

    pub async fn create_product(&self, req: ProductRequest) -> AppResult<ProductResponse> {
        validate_product(&req)?;

        let product = products::ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            price: Set(req.price),
            stock: Set(req.stock),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        Ok(ProductResponse::from(product))
    }

    pub async fn get_product(&self, id: i64) -> AppResult<ProductResponse> {
        Ok(ProductResponse::from(self.find_product(id).await?))
    }

    pub async fn update_product(&self, id: i64, req: ProductRequest) -> AppResult<ProductResponse> {
        validate_product(&req)?;

        let product = self.find_product(id).await?;
        let mut model = product.into_active_model();
        model.name = Set(req.name);
        model.description = Set(req.description);
        model.price = Set(req.price);
        model.stock = Set(req.stock);
        Ok(ProductResponse::from(model.update(&self.pool).await?))
    }

    pub async fn delete_product(&self, id: i64) -> AppResult<()> {
        let res = products::Entity::delete_by_id(id).exec(&self.pool).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Product {id} not found")));
        }
        Ok(())
    }

    async fn find_product(&self, id: i64) -> AppResult<products::Model> {
        products::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product {id} not found")))
    }
}

fn validate_product(req: &ProductRequest) -> AppResult<()> {
    if req.price < Decimal::ZERO {
        return Err(AppError::ValidationError(
            "Price must not be negative".to_string(),
        ));
    }
    if req.stock < 0 {
        return Err(AppError::ValidationError(
            "Stock must not be negative".to_string(),
        ));
    }
    Ok(())
}
