pub mod error;

pub use error::{AutoconfError, Result};
