//! Book resource: records and the protected CRUD handlers.

pub mod handlers;
pub mod models;

pub use models::{Book, BookCreate, BookUpdate, Pagination};
