use poem_openapi::{param::Path, payload::Json, ApiResponse, OpenApi, Tags};
use std::sync::Arc;

use crate::api::auth::BearerAuth;
use crate::errors::event::EventError;
use crate::services::{AccessControl, AuditLogger};
use crate::stores::EventStore;
use crate::types::db::event::EventStatus;
use crate::types::dto::common::{DeleteResponse, MessageResponse};
use crate::types::dto::event::{EventPayload, EventResponse};
use crate::types::dto::user::UserResponse;

/// API tags for event endpoints
#[derive(Tags)]
enum EventTags {
    /// Event browsing, creation and registration
    Events,
}

/// Response for event creation
#[derive(ApiResponse)]
pub enum CreateEventResponse {
    /// Event created
    #[oai(status = 201)]
    Created(Json<EventResponse>),
}

/// Event API endpoints
pub struct EventsApi {
    event_store: Arc<EventStore>,
    access_control: Arc<AccessControl>,
    audit: Arc<AuditLogger>,
}

impl EventsApi {
    pub fn new(
        event_store: Arc<EventStore>,
        access_control: Arc<AccessControl>,
        audit: Arc<AuditLogger>,
    ) -> Self {
        Self {
            event_store,
            access_control,
            audit,
        }
    }
}

#[OpenApi]
impl EventsApi {
    /// List approved, unflagged events
    #[oai(path = "/events", method = "get", tag = "EventTags::Events")]
    pub async fn list_public(&self) -> Result<Json<Vec<EventResponse>>, EventError> {
        let events = self.event_store.list_public().await?;

        Ok(Json(events.into_iter().map(EventResponse::from).collect()))
    }

    /// List every event regardless of moderation state
    #[oai(path = "/events/all", method = "get", tag = "EventTags::Events")]
    pub async fn list_all(&self) -> Result<Json<Vec<EventResponse>>, EventError> {
        let events = self.event_store.list_all().await?;

        Ok(Json(events.into_iter().map(EventResponse::from).collect()))
    }

    /// Fetch a single approved event
    #[oai(path = "/events/:id", method = "get", tag = "EventTags::Events")]
    pub async fn get_event(&self, id: Path<i32>) -> Result<Json<EventResponse>, EventError> {
        let event = self.event_store.find_by_id(id.0).await?;

        match event {
            Some(e) if e.status == EventStatus::Approved => Ok(Json(EventResponse::from(e))),
            _ => Err(EventError::not_found()),
        }
    }

    /// Create an event; the caller becomes its creator
    #[oai(path = "/events", method = "post", tag = "EventTags::Events")]
    pub async fn create_event(
        &self,
        auth: BearerAuth,
        body: Json<EventPayload>,
    ) -> Result<CreateEventResponse, EventError> {
        let user = self.access_control.current_user(&auth.0.token).await?;

        let event = self.event_store.create_event(&body.0, user.id).await?;

        self.audit
            .log(user.id, "event_create", format!("created event {} '{}'", event.id, event.name))
            .await;

        Ok(CreateEventResponse::Created(Json(EventResponse::from(event))))
    }

    /// Overwrite an event's fields. Creators only.
    #[oai(path = "/events/:id", method = "put", tag = "EventTags::Events")]
    pub async fn update_event(
        &self,
        auth: BearerAuth,
        id: Path<i32>,
        body: Json<EventPayload>,
    ) -> Result<Json<EventResponse>, EventError> {
        let user = self.access_control.current_user(&auth.0.token).await?;

        let updated = self.event_store.update_event(id.0, &body.0, user.id).await?;

        match updated {
            Some(event) => {
                self.audit
                    .log(user.id, "event_update", format!("updated event {}", event.id))
                    .await;
                Ok(Json(EventResponse::from(event)))
            }
            None => Err(EventError::not_found()),
        }
    }

    /// Delete an event. Creators only.
    #[oai(path = "/events/:id", method = "delete", tag = "EventTags::Events")]
    pub async fn delete_event(
        &self,
        auth: BearerAuth,
        id: Path<i32>,
    ) -> Result<Json<DeleteResponse>, EventError> {
        let user = self.access_control.current_user(&auth.0.token).await?;

        if !self.event_store.delete_event(id.0, user.id).await? {
            return Err(EventError::not_found());
        }

        self.audit
            .log(user.id, "event_delete", format!("deleted event {}", id.0))
            .await;

        Ok(Json(DeleteResponse { ok: true }))
    }

    /// Register the caller as an attendee
    #[oai(path = "/events/:id/register", method = "post", tag = "EventTags::Events")]
    pub async fn register(
        &self,
        auth: BearerAuth,
        id: Path<i32>,
    ) -> Result<Json<MessageResponse>, EventError> {
        let user = self.access_control.current_user(&auth.0.token).await?;

        self.event_store.register(id.0, user.id).await?;

        self.audit
            .log(user.id, "event_register", format!("registered for event {}", id.0))
            .await;

        Ok(Json(MessageResponse {
            message: "Registered".to_string(),
        }))
    }

    /// Remove the caller from an event's attendees
    #[oai(path = "/events/:id/unregister", method = "post", tag = "EventTags::Events")]
    pub async fn unregister(
        &self,
        auth: BearerAuth,
        id: Path<i32>,
    ) -> Result<Json<MessageResponse>, EventError> {
        let user = self.access_control.current_user(&auth.0.token).await?;

        self.event_store.unregister(id.0, user.id).await?;

        self.audit
            .log(user.id, "event_unregister", format!("unregistered from event {}", id.0))
            .await;

        Ok(Json(MessageResponse {
            message: "Unregistered".to_string(),
        }))
    }

    /// List the users registered to attend an event
    #[oai(path = "/events/:id/registered", method = "get", tag = "EventTags::Events")]
    pub async fn registered(&self, id: Path<i32>) -> Result<Json<Vec<UserResponse>>, EventError> {
        let attendees = self.event_store.attendees(id.0).await?;

        Ok(Json(attendees.into_iter().map(UserResponse::from).collect()))
    }

    /// List the events a user has created
    #[oai(path = "/users/:id/events", method = "get", tag = "EventTags::Events")]
    pub async fn events_by_creator(&self, id: Path<i32>) -> Result<Json<Vec<EventResponse>>, EventError> {
        let events = self.event_store.list_by_creator(id.0).await?;

        Ok(Json(events.into_iter().map(EventResponse::from).collect()))
    }
}
