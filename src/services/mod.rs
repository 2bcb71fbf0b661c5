// Services layer - Business logic and orchestration
pub mod access_control;
pub mod audit_logger;
pub mod password;
pub mod token_service;

pub use access_control::AccessControl;
pub use audit_logger::AuditLogger;
pub use password::PasswordService;
pub use token_service::TokenService;
