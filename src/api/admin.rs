use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::auth::BearerAuth;
use crate::errors::admin::AdminError;
use crate::services::{AccessControl, AuditLogger};
use crate::stores::{EventStore, UserStore};
use crate::types::db::event::EventStatus;
use crate::types::dto::common::MessageResponse;

/// API tags for admin endpoints
#[derive(Tags)]
enum AdminTags {
    /// Moderation: bans, approvals and flags
    Admin,
}

enum ModerationChange {
    Status(EventStatus),
    Flag(bool),
}

/// Admin moderation API endpoints
pub struct AdminApi {
    user_store: Arc<UserStore>,
    event_store: Arc<EventStore>,
    access_control: Arc<AccessControl>,
    audit: Arc<AuditLogger>,
}

impl AdminApi {
    pub fn new(
        user_store: Arc<UserStore>,
        event_store: Arc<EventStore>,
        access_control: Arc<AccessControl>,
        audit: Arc<AuditLogger>,
    ) -> Self {
        Self {
            user_store,
            event_store,
            access_control,
            audit,
        }
    }

    async fn moderate(
        &self,
        token: &str,
        event_id: i32,
        action: &str,
        message: &str,
        change: ModerationChange,
    ) -> Result<Json<MessageResponse>, AdminError> {
        let admin = self.access_control.current_admin(token).await?;

        let changed = match change {
            ModerationChange::Status(status) => {
                self.event_store.set_status(event_id, status).await?
            }
            ModerationChange::Flag(flag) => self.event_store.set_flag(event_id, flag).await?,
        };

        if !changed {
            return Err(AdminError::not_found("Event"));
        }

        self.audit
            .log(admin.id, action, format!("event {}", event_id))
            .await;

        Ok(Json(MessageResponse {
            message: message.to_string(),
        }))
    }
}

#[OpenApi(prefix_path = "/admin")]
impl AdminApi {
    /// Ban a user account
    #[oai(path = "/ban/:user_id", method = "post", tag = "AdminTags::Admin")]
    pub async fn ban(
        &self,
        auth: BearerAuth,
        user_id: Path<i32>,
    ) -> Result<Json<MessageResponse>, AdminError> {
        let admin = self.access_control.current_admin(&auth.0.token).await?;

        if !self.user_store.ban_user(user_id.0).await? {
            return Err(AdminError::not_found("User"));
        }

        self.audit
            .log(admin.id, "user_ban", format!("banned user {}", user_id.0))
            .await;

        Ok(Json(MessageResponse {
            message: "User banned".to_string(),
        }))
    }

    /// Approve a pending event
    #[oai(path = "/events/:id/approve", method = "post", tag = "AdminTags::Admin")]
    pub async fn approve(
        &self,
        auth: BearerAuth,
        id: Path<i32>,
    ) -> Result<Json<MessageResponse>, AdminError> {
        self.moderate(
            &auth.0.token,
            id.0,
            "event_approve",
            "Event approved",
            ModerationChange::Status(EventStatus::Approved),
        )
        .await
    }

    /// Reject a pending event
    #[oai(path = "/events/:id/reject", method = "post", tag = "AdminTags::Admin")]
    pub async fn reject(
        &self,
        auth: BearerAuth,
        id: Path<i32>,
    ) -> Result<Json<MessageResponse>, AdminError> {
        self.moderate(
            &auth.0.token,
            id.0,
            "event_reject",
            "Event rejected",
            ModerationChange::Status(EventStatus::Rejected),
        )
        .await
    }

    /// Put a moderation hold on an event, hiding it from the public listing
    #[oai(path = "/events/:id/flag", method = "post", tag = "AdminTags::Admin")]
    pub async fn flag(
        &self,
        auth: BearerAuth,
        id: Path<i32>,
    ) -> Result<Json<MessageResponse>, AdminError> {
        self.moderate(
            &auth.0.token,
            id.0,
            "event_flag",
            "Event flagged",
            ModerationChange::Flag(true),
        )
        .await
    }

    /// Lift an event's moderation hold
    #[oai(path = "/events/:id/unflag", method = "post", tag = "AdminTags::Admin")]
    pub async fn unflag(
        &self,
        auth: BearerAuth,
        id: Path<i32>,
    ) -> Result<Json<MessageResponse>, AdminError> {
        self.moderate(
            &auth.0.token,
            id.0,
            "event_unflag",
            "Event unflagged",
            ModerationChange::Flag(false),
        )
        .await
    }
}
