use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct PaginationParams {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl PaginationParams {
    pub fn get_page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn get_per_page(&self) -> u64 {
        self.per_page.unwrap_or(20).clamp(1, 100)
    }

    pub fn get_offset(&self) -> u64 {
        (self.get_page() - 1) * self.get_per_page()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginationInfo {
    pub current_page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub pagination: PaginationInfo,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, page: u64, per_page: u64, total: u64) -> Self {
        let total_pages = total.div_ceil(per_page);
        Self {
            items,
            pagination: PaginationInfo {
                current_page: page,
                per_page,
                total,
                total_pages,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_clamping() {
        let p = PaginationParams::default();
        assert_eq!(p.get_page(), 1);
        assert_eq!(p.get_per_page(), 20);
        assert_eq!(p.get_offset(), 0);

        let p = PaginationParams {
            page: Some(0),
            per_page: Some(1000),
        };
        assert_eq!(p.get_page(), 1);
        assert_eq!(p.get_per_page(), 100);

        let p = PaginationParams {
            page: Some(3),
            per_page: Some(10),
        };
        assert_eq!(p.get_offset(), 20);
    }

    #[test]
    fn test_total_pages() {
        let r: PaginatedResponse<i32> = PaginatedResponse::new(vec![], 1, 10, 21);
        assert_eq!(r.pagination.total_pages, 3);
        let r: PaginatedResponse<i32> = PaginatedResponse::new(vec![], 1, 10, 20);
        assert_eq!(r.pagination.total_pages, 2);
    }
}
