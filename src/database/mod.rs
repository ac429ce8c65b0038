pub mod repo;
pub mod schema;

pub use repo::{Insertable, LoadTransaction, Store};
