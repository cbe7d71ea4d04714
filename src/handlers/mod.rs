pub mod academics;
pub mod accounts;
pub mod auth;
pub mod cart;
pub mod grades;
pub mod news;
pub mod orders;
pub mod products;
pub mod registrations;

pub use academics::academic_config;
pub use accounts::account_config;
pub use auth::auth_config;
pub use cart::cart_config;
pub use grades::grade_config;
pub use news::news_config;
pub use orders::order_config;
pub use products::product_config;
pub use registrations::registration_config;
