pub mod accounts;
pub mod articles;
pub mod bank_transactions;
pub mod cart_items;
pub mod carts;
pub mod comments;
pub mod courses;
pub mod grades;
pub mod order_items;
pub mod orders;
pub mod products;
pub mod programs;
pub mod registrations;
pub mod students;
pub mod users;

pub use bank_transactions::TransactionKind;
pub use courses::CourseDay;
pub use orders::OrderStatus;
pub use users::Role;
