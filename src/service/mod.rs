//! CrudService: generic authorized CRUD over record stores.

mod crud;
mod validation;
pub use crud::{CrudService, Reader, Writer};
pub use validation::RequestValidator;
