//! Common types shared across database implementations

pub mod error;
pub mod timeout;

pub use error::{DatabaseError, DatabaseResult};
pub use timeout::bounded;
