pub mod classify;
pub mod commands;
pub mod contracts;
pub mod error;
pub mod import;
pub mod records;
pub mod reconcile;

pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{EngineError, EngineResult};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
