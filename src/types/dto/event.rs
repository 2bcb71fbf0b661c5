use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::event;

/// Request model for creating or updating an event.
///
/// Status and flag are intentionally absent: new events always start pending
/// and only admins move them afterwards.
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct EventPayload {
    /// Event name
    pub name: String,

    /// Longer description, optional
    pub description: Option<String>,

    /// Venue or address, optional
    pub location: Option<String>,

    /// Event start (Unix timestamp)
    pub start_datetime: i64,

    /// Event end (Unix timestamp)
    pub end_datetime: i64,

    /// Registration window start (Unix timestamp)
    pub registration_start_datetime: i64,

    /// Registration window end (Unix timestamp)
    pub registration_end_datetime: i64,

    /// Ordered photo URLs
    #[oai(default)]
    pub photos: Vec<String>,

    /// Free-form category tag, optional
    pub category: Option<String>,
}

/// Public view of an event
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct EventResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_datetime: i64,
    pub end_datetime: i64,
    pub registration_start_datetime: i64,
    pub registration_end_datetime: i64,

    /// Ordered photo URLs
    pub photos: Vec<String>,
    pub category: Option<String>,

    /// Moderation status: "pending", "approved" or "rejected"
    pub status: String,

    /// Moderation hold, independent of status
    pub flag: bool,

    /// Creation time (Unix timestamp)
    pub created_at: i64,
}

impl From<event::Model> for EventResponse {
    fn from(e: event::Model) -> Self {
        // Photos are stored JSON-encoded; an unreadable column degrades to
        // an empty list rather than failing the whole response.
        let photos: Vec<String> = serde_json::from_str(&e.photos).unwrap_or_default();

        Self {
            id: e.id,
            name: e.name,
            description: e.description,
            location: e.location,
            start_datetime: e.start_datetime,
            end_datetime: e.end_datetime,
            registration_start_datetime: e.registration_start_datetime,
            registration_end_datetime: e.registration_end_datetime,
            photos,
            category: e.category,
            status: e.status.as_str().to_string(),
            flag: e.flag,
            created_at: e.created_at,
        }
    }
}
