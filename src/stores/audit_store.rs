use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, Set};

use crate::types::db::audit_log;

/// Repository for the append-only audit trail
pub struct AuditStore {
    db: DatabaseConnection,
}

impl AuditStore {
    /// Create a new AuditStore with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Append one audit entry. Entries are never updated or deleted.
    pub async fn append(&self, user_id: i32, action: &str, details: String) -> Result<(), DbErr> {
        let entry = audit_log::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            user_id: Set(user_id),
            action: Set(action.to_string()),
            timestamp: Set(Utc::now().to_rfc3339()),
            details: Set(details),
        };

        entry.insert(&self.db).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ColumnTrait, Database, EntityTrait, QueryFilter};

    async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    #[tokio::test]
    async fn test_append_persists_entry() {
        let db = setup_test_db().await;
        let store = AuditStore::new(db.clone());

        store
            .append(1, "login", "user logged in".to_string())
            .await
            .unwrap();

        let rows = audit_log::Entity::find()
            .filter(audit_log::Column::Action.eq("login"))
            .all(&db)
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].user_id, 1);
        assert_eq!(rows[0].details, "user logged in");
        assert!(!rows[0].timestamp.is_empty());
    }

    #[tokio::test]
    async fn test_append_is_append_only() {
        let db = setup_test_db().await;
        let store = AuditStore::new(db.clone());

        store.append(1, "signup", "first".to_string()).await.unwrap();
        store.append(1, "signup", "second".to_string()).await.unwrap();

        let rows = audit_log::Entity::find().all(&db).await.unwrap();

        assert_eq!(rows.len(), 2);
        assert_ne!(rows[0].id, rows[1].id);
    }
}
