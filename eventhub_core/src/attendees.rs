use serde::{Deserialize, Serialize};

use crate::{
    ids::{AttendeeId, EventId},
    time::Timestamp,
};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AttendeeStatus {
    Pending,
    Confirmed,
    CheckedIn,
    Cancelled,
    NoShow,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attendee {
    pub id: AttendeeId,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub event_title: Option<String>,
    pub status: AttendeeStatus,
    #[serde(default)]
    pub registration_date: Option<Timestamp>,
    #[serde(default)]
    pub checked_in_at: Option<Timestamp>,
}

#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct AttendeeRegistration {
    pub event: Option<EventId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub company: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dietary_restrictions: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct CheckInReceipt {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub attendee: Attendee,
}
