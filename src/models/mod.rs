//! Data models for library transactions

pub mod book;
pub mod dates;
pub mod issued_book;
pub mod transaction;
pub mod user;

// Re-export commonly used types
pub use book::Book;
pub use issued_book::IssuedBook;
pub use transaction::{Transaction, TransactionStatus, UNKNOWN_DOMAIN};
pub use user::User;
