pub mod jwt;
pub mod password;
pub mod permissions;

pub use jwt::*;
pub use password::*;
pub use permissions::{Action, can};
