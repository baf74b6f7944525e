pub mod error;
pub mod record;

pub use error::{Result, StoreError};
pub use record::{Record, fresh_id};
