use serde::{Deserialize, Serialize};

use crate::ids::{EventId, SponsorId, SponsorTierId, SponsorshipId};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SponsorStatus {
    Prospective,
    Negotiating,
    Confirmed,
    Active,
    Completed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Partial,
    Completed,
    Refunded,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sponsor {
    pub id: SponsorId,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub tier_name: Option<String>,
    pub status: SponsorStatus,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub active_sponsorships: u64,
}

#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct SponsorDraft {
    pub name: String,
    pub description: String,
    pub industry: String,
    pub contact_person: String,
    pub contact_email: String,
    pub contact_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<SponsorTierId>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub website: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Sponsorship {
    pub id: SponsorshipId,
    #[serde(default)]
    pub sponsor_name: Option<String>,
    #[serde(default)]
    pub event_title: Option<String>,
    #[serde(default)]
    pub tier_name: Option<String>,
    pub contribution_amount: String,
    #[serde(default)]
    pub amount_paid: Option<String>,
    #[serde(default)]
    pub remaining_balance: Option<serde_json::Value>,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub payment_progress: Option<f64>,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct SponsorshipDraft {
    pub sponsor: SponsorId,
    pub event: EventId,
    pub tier: SponsorTierId,
    pub contribution_amount: String,
}
