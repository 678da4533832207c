mod api;
mod error;

pub use api::{TaskClient, ALL_TASKS};
pub use error::{ClientError, Result};
