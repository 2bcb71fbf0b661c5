use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::errors::event::EventError;
use crate::types::db::event::{self, EventStatus};
use crate::types::db::{event_attendee, event_creator, user};
use crate::types::dto::event::EventPayload;

/// EventStore manages events and their creator/attendee relations.
///
/// Ownership checks live here: update and delete answer with the same
/// "nothing there" result whether the event is missing or the actor is not
/// one of its creators.
pub struct EventStore {
    db: DatabaseConnection,
}

impl EventStore {
    /// Create a new EventStore with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db_error(operation: &str, e: sea_orm::DbErr) -> EventError {
        EventError::internal_error(format!("{}: {}", operation, e))
    }

    fn encode_photos(photos: &[String]) -> Result<String, EventError> {
        serde_json::to_string(photos)
            .map_err(|e| EventError::internal_error(format!("Failed to encode photos: {}", e)))
    }

    /// Create an event with the given creator
    ///
    /// New events always start pending and unflagged. The event row and the
    /// creator link are inserted in one transaction.
    pub async fn create_event(
        &self,
        data: &EventPayload,
        creator_id: i32,
    ) -> Result<event::Model, EventError> {
        let photos = Self::encode_photos(&data.photos)?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| Self::db_error("create_event", e))?;

        let new_event = event::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            name: Set(data.name.clone()),
            description: Set(data.description.clone()),
            location: Set(data.location.clone()),
            start_datetime: Set(data.start_datetime),
            end_datetime: Set(data.end_datetime),
            registration_start_datetime: Set(data.registration_start_datetime),
            registration_end_datetime: Set(data.registration_end_datetime),
            photos: Set(photos),
            category: Set(data.category.clone()),
            status: Set(EventStatus::Pending),
            flag: Set(false),
            created_at: Set(Utc::now().timestamp()),
        };

        let created = new_event
            .insert(&txn)
            .await
            .map_err(|e| Self::db_error("create_event", e))?;

        let creator_link = event_creator::ActiveModel {
            user_id: Set(creator_id),
            event_id: Set(created.id),
        };
        creator_link
            .insert(&txn)
            .await
            .map_err(|e| Self::db_error("create_event", e))?;

        txn.commit()
            .await
            .map_err(|e| Self::db_error("create_event", e))?;

        Ok(created)
    }

    /// List events visible to the public: approved and not flagged
    pub async fn list_public(&self) -> Result<Vec<event::Model>, EventError> {
        event::Entity::find()
            .filter(event::Column::Status.eq(EventStatus::Approved))
            .filter(event::Column::Flag.eq(false))
            .order_by_asc(event::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| Self::db_error("list_public", e))
    }

    /// List every event regardless of status or flag
    pub async fn list_all(&self) -> Result<Vec<event::Model>, EventError> {
        event::Entity::find()
            .order_by_asc(event::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| Self::db_error("list_all", e))
    }

    /// Load an event by id
    pub async fn find_by_id(&self, id: i32) -> Result<Option<event::Model>, EventError> {
        event::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| Self::db_error("find_by_id", e))
    }

    /// List events that the given user created
    pub async fn list_by_creator(&self, user_id: i32) -> Result<Vec<event::Model>, EventError> {
        let event_ids: Vec<i32> = event_creator::Entity::find()
            .filter(event_creator::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(|e| Self::db_error("list_by_creator", e))?
            .into_iter()
            .map(|link| link.event_id)
            .collect();

        if event_ids.is_empty() {
            return Ok(Vec::new());
        }

        event::Entity::find()
            .filter(event::Column::Id.is_in(event_ids))
            .order_by_asc(event::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| Self::db_error("list_by_creator", e))
    }

    async fn is_creator(&self, event_id: i32, user_id: i32) -> Result<bool, EventError> {
        let link = event_creator::Entity::find_by_id((user_id, event_id))
            .one(&self.db)
            .await
            .map_err(|e| Self::db_error("is_creator", e))?;

        Ok(link.is_some())
    }

    /// Overwrite an event's mutable fields
    ///
    /// Status, flag and creation time are not mutable here; only admins move
    /// status and flag, through `set_status` and `set_flag`.
    ///
    /// # Returns
    /// * `Ok(Some(event::Model))` - The updated event
    /// * `Ok(None)` - Event missing, or the actor is not one of its creators
    pub async fn update_event(
        &self,
        event_id: i32,
        data: &EventPayload,
        actor_id: i32,
    ) -> Result<Option<event::Model>, EventError> {
        let Some(existing) = self.find_by_id(event_id).await? else {
            return Ok(None);
        };

        if !self.is_creator(event_id, actor_id).await? {
            return Ok(None);
        }

        let photos = Self::encode_photos(&data.photos)?;

        let mut active: event::ActiveModel = existing.into();
        active.name = Set(data.name.clone());
        active.description = Set(data.description.clone());
        active.location = Set(data.location.clone());
        active.start_datetime = Set(data.start_datetime);
        active.end_datetime = Set(data.end_datetime);
        active.registration_start_datetime = Set(data.registration_start_datetime);
        active.registration_end_datetime = Set(data.registration_end_datetime);
        active.photos = Set(photos);
        active.category = Set(data.category.clone());

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| Self::db_error("update_event", e))?;

        Ok(Some(updated))
    }

    /// Delete an event and its association rows
    ///
    /// # Returns
    /// * `Ok(true)` - Event deleted
    /// * `Ok(false)` - Event missing, or the actor is not one of its creators
    pub async fn delete_event(&self, event_id: i32, actor_id: i32) -> Result<bool, EventError> {
        if self.find_by_id(event_id).await?.is_none() {
            return Ok(false);
        }

        if !self.is_creator(event_id, actor_id).await? {
            return Ok(false);
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| Self::db_error("delete_event", e))?;

        event_creator::Entity::delete_many()
            .filter(event_creator::Column::EventId.eq(event_id))
            .exec(&txn)
            .await
            .map_err(|e| Self::db_error("delete_event", e))?;

        event_attendee::Entity::delete_many()
            .filter(event_attendee::Column::EventId.eq(event_id))
            .exec(&txn)
            .await
            .map_err(|e| Self::db_error("delete_event", e))?;

        event::Entity::delete_by_id(event_id)
            .exec(&txn)
            .await
            .map_err(|e| Self::db_error("delete_event", e))?;

        txn.commit()
            .await
            .map_err(|e| Self::db_error("delete_event", e))?;

        Ok(true)
    }

    /// Register a user as an attendee. Set semantics: registering twice is a
    /// no-op, not an error and not a duplicate row.
    ///
    /// # Returns
    /// * `Err(EventError::NotFound)` - No event with that id
    pub async fn register(&self, event_id: i32, user_id: i32) -> Result<(), EventError> {
        if self.find_by_id(event_id).await?.is_none() {
            return Err(EventError::not_found());
        }

        let existing = event_attendee::Entity::find_by_id((user_id, event_id))
            .one(&self.db)
            .await
            .map_err(|e| Self::db_error("register", e))?;

        if existing.is_some() {
            return Ok(());
        }

        let link = event_attendee::ActiveModel {
            user_id: Set(user_id),
            event_id: Set(event_id),
        };
        link.insert(&self.db)
            .await
            .map_err(|e| Self::db_error("register", e))?;

        Ok(())
    }

    /// Remove a user from an event's attendees. Set semantics: unregistering
    /// when absent is a no-op.
    pub async fn unregister(&self, event_id: i32, user_id: i32) -> Result<(), EventError> {
        if self.find_by_id(event_id).await?.is_none() {
            return Err(EventError::not_found());
        }

        event_attendee::Entity::delete_many()
            .filter(event_attendee::Column::EventId.eq(event_id))
            .filter(event_attendee::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| Self::db_error("unregister", e))?;

        Ok(())
    }

    /// List the users registered to attend an event
    pub async fn attendees(&self, event_id: i32) -> Result<Vec<user::Model>, EventError> {
        if self.find_by_id(event_id).await?.is_none() {
            return Err(EventError::not_found());
        }

        let user_ids: Vec<i32> = event_attendee::Entity::find()
            .filter(event_attendee::Column::EventId.eq(event_id))
            .all(&self.db)
            .await
            .map_err(|e| Self::db_error("attendees", e))?
            .into_iter()
            .map(|link| link.user_id)
            .collect();

        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        user::Entity::find()
            .filter(user::Column::Id.is_in(user_ids))
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| Self::db_error("attendees", e))
    }

    /// Set an event's moderation status. Admin-only at the API boundary.
    ///
    /// # Returns
    /// * `Ok(true)` - Status changed
    /// * `Ok(false)` - No event with that id
    pub async fn set_status(&self, event_id: i32, status: EventStatus) -> Result<bool, EventError> {
        let Some(existing) = self.find_by_id(event_id).await? else {
            return Ok(false);
        };

        let mut active: event::ActiveModel = existing.into();
        active.status = Set(status);
        active
            .update(&self.db)
            .await
            .map_err(|e| Self::db_error("set_status", e))?;

        Ok(true)
    }

    /// Set or clear an event's moderation hold. Admin-only at the API
    /// boundary. Orthogonal to status.
    pub async fn set_flag(&self, event_id: i32, flag: bool) -> Result<bool, EventError> {
        let Some(existing) = self.find_by_id(event_id).await? else {
            return Ok(false);
        };

        let mut active: event::ActiveModel = existing.into();
        active.flag = Set(flag);
        active
            .update(&self.db)
            .await
            .map_err(|e| Self::db_error("set_flag", e))?;

        Ok(true)
    }
}
