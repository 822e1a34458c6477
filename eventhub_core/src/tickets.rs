use serde::{Deserialize, Serialize};

use crate::{
    ids::{EventId, TicketCode, TicketId, TicketTypeId},
    time::Timestamp,
};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Reserved,
    Paid,
    Confirmed,
    Used,
    Cancelled,
    Refunded,
    #[serde(other)]
    Unknown,
}

impl TicketStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reserved => "reserved",
            Self::Paid => "paid",
            Self::Confirmed => "confirmed",
            Self::Used => "used",
            Self::Cancelled => "cancelled",
            Self::Refunded => "refunded",
            Self::Unknown => "unknown",
        }
    }

    pub fn is_valid_for_entry(self) -> bool {
        matches!(self, Self::Paid | Self::Confirmed)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketType {
    pub id: TicketTypeId,
    pub event: EventId,
    #[serde(default)]
    pub event_title: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: String,
    #[serde(default)]
    pub quantity_available: u32,
    #[serde(default)]
    pub quantity_sold: u32,
    #[serde(default)]
    pub quantity_remaining: Option<i64>,
    #[serde(default)]
    pub is_sold_out: bool,
    #[serde(default)]
    pub max_per_order: Option<u32>,
    #[serde(default)]
    pub is_on_sale: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketSummary {
    pub id: TicketId,
    pub ticket_code: TicketCode,
    #[serde(default)]
    pub event_title: Option<String>,
    #[serde(default)]
    pub ticket_type_name: Option<String>,
    #[serde(default)]
    pub buyer_name: Option<String>,
    pub status: TicketStatus,
    #[serde(default)]
    pub purchase_date: Option<Timestamp>,
    #[serde(default)]
    pub final_price: Option<String>,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PurchaseRequest {
    pub ticket_type_id: TicketTypeId,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_code: Option<String>,
    pub payment_method: String,
}

/// Purchased tickets come back in their detailed shape; only the fields
/// shared with the listing are decoded.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct PurchaseReceipt {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub tickets: Vec<PurchasedTicket>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct PurchasedTicket {
    pub id: TicketId,
    pub ticket_code: TicketCode,
    pub status: TicketStatus,
    #[serde(default)]
    pub original_price: Option<String>,
    #[serde(default)]
    pub discount_applied: Option<String>,
    #[serde(default)]
    pub final_price: Option<String>,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct DiscountCheckRequest {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_type_id: Option<TicketTypeId>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct DiscountCheck {
    pub valid: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub discount: Option<DiscountCode>,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    Percentage,
    Fixed,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct DiscountCode {
    pub code: String,
    pub discount_type: DiscountKind,
    pub discount_value: String,
    #[serde(default)]
    pub valid_until: Option<Timestamp>,
}

impl DiscountCode {
    pub fn describe(&self) -> String {
        match self.discount_type {
            DiscountKind::Percentage => format!("{}% off", self.discount_value),
            DiscountKind::Fixed => format!("{} off", self.discount_value),
        }
    }
}
