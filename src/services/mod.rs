pub mod academic_service;
pub mod account_service;
pub mod auth_service;
pub mod cart_service;
pub mod grade_service;
pub mod news_service;
pub mod order_service;
pub mod product_service;
pub mod registration_service;

pub use academic_service::*;
pub use account_service::*;
pub use auth_service::*;
pub use cart_service::*;
pub use grade_service::*;
pub use news_service::*;
pub use order_service::*;
pub use product_service::*;
pub use registration_service::*;
