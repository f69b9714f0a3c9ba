//! HTTP handlers for record CRUD and the current caller.

pub mod records;
pub mod user;
pub use records::{create, delete, list, read, update};
pub use user::current_user;
