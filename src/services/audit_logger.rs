use std::sync::Arc;

use crate::stores::AuditStore;

/// Best-effort audit logging.
///
/// Audit writes must never abort or fail the action they record, so failures
/// are logged and swallowed here instead of propagating.
pub struct AuditLogger {
    store: Arc<AuditStore>,
}

impl AuditLogger {
    pub fn new(store: Arc<AuditStore>) -> Self {
        Self { store }
    }

    /// Record an action for a user
    pub async fn log(&self, user_id: i32, action: &str, details: impl Into<String>) {
        if let Err(e) = self.store.append(user_id, action, details.into()).await {
            tracing::warn!(action = action, user_id = user_id, error = %e, "audit log write failed");
        }
    }
}
