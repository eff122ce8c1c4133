pub mod entity;

pub use entity::{Transaction, TransactionStatus};
