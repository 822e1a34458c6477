use serde::{Deserialize, Serialize};

use crate::{
    ids::{CategoryId, EventId, VenueId},
    time::Timestamp,
};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Draft,
    Published,
    Ongoing,
    Completed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl EventStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub events_count: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub full_address: Option<String>,
    #[serde(default)]
    pub upcoming_events_count: u64,
}

/// Row shape returned by the catalog listing endpoints.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventSummary {
    pub id: EventId,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub venue_name: Option<String>,
    #[serde(default)]
    pub venue_city: Option<String>,
    #[serde(default)]
    pub organizer_name: Option<String>,
    pub start_date: Timestamp,
    #[serde(default)]
    pub end_date: Option<Timestamp>,
    #[serde(default)]
    pub is_free: bool,
    #[serde(default)]
    pub max_attendees: Option<u32>,
    #[serde(default)]
    pub available_spots: Option<i64>,
    pub status: EventStatus,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub views_count: u64,
    #[serde(default)]
    pub days_until_event: Option<i64>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventDetail {
    pub id: EventId,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub venue: Option<Venue>,
    #[serde(default)]
    pub organizer_name: Option<String>,
    #[serde(default)]
    pub organizer_email: Option<String>,
    pub start_date: Timestamp,
    #[serde(default)]
    pub end_date: Option<Timestamp>,
    #[serde(default)]
    pub registration_start: Option<Timestamp>,
    #[serde(default)]
    pub registration_end: Option<Timestamp>,
    #[serde(default)]
    pub is_free: bool,
    #[serde(default)]
    pub max_attendees: Option<u32>,
    #[serde(default)]
    pub available_spots: Option<i64>,
    pub status: EventStatus,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub views_count: u64,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub total_attendees: u64,
    #[serde(default)]
    pub total_tickets_sold: u64,
    #[serde(default)]
    pub ticket_types_count: u64,
    #[serde(default)]
    pub sponsors_count: u64,
    #[serde(default)]
    pub published_at: Option<Timestamp>,
}

impl EventDetail {
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EventStats {
    pub id: EventId,
    pub title: String,
    #[serde(default)]
    pub total_revenue: serde_json::Value,
    #[serde(default)]
    pub total_attendees: u64,
    #[serde(default)]
    pub total_tickets_sold: u64,
    #[serde(default)]
    pub attendance_rate: Option<f64>,
    #[serde(default)]
    pub most_popular_ticket: Option<serde_json::Value>,
}

/// Create/update payload for an organizer's event.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub short_description: String,
    pub category_id: Option<CategoryId>,
    pub venue_id: Option<VenueId>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub is_free: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attendees: Option<u32>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tags: String,
}
