// Database entities - SeaORM models
pub mod audit_log;
pub mod event;
pub mod event_attendee;
pub mod event_creator;
pub mod user;
