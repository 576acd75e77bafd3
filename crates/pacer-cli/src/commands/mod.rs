//! Command implementations.

pub mod config;
pub mod extract;
pub mod predict;

pub use self::config::execute_config;
pub use self::extract::execute_extract;
pub use self::predict::{execute_predict, trigger, PredictionOutcome, MISSING_DATA_REASON};
