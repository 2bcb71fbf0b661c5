// Config layer - environment, secrets and logging
pub mod database;
pub mod logging;
pub mod secrets;

pub use logging::{init_logging, LoggingError};
pub use secrets::{SecretError, Secrets};
