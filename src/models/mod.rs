pub mod academic;
pub mod account;
pub mod article;
pub mod cart;
pub mod common;
pub mod grade;
pub mod order;
pub mod pagination;
pub mod product;
pub mod registration;
pub mod user;

pub use academic::*;
pub use account::*;
pub use article::*;
pub use cart::*;
pub use common::*;
pub use grade::*;
pub use order::*;
pub use pagination::*;
pub use product::*;
pub use registration::*;
pub use user::*;
