pub mod config;
pub mod error;
pub mod types;

pub use config::ClozeConfig;
pub use error::{ClozeError, Result};
pub use types::*;
