use std::sync::OnceLock;

use regex::Regex;

use crate::{
    attendees::AttendeeRegistration,
    catalog::EventDraft,
    ids::{AttendeeId, TicketCode, TicketTypeId},
    sponsors::SponsorDraft,
    tickets::PurchaseRequest,
};

const MIN_PASSWORD_LEN: usize = 8;
const MAX_PAYMENT_METHOD_LEN: usize = 50;
const MAX_CHECKIN_LOCATION_LEN: usize = 200;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require("username", &self.username)?;
        if self.password.is_empty() {
            return Err(ValidationError::new("password", "is required"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub first_name: String,
    pub last_name: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("username", &self.username)?;
        require("email", &self.email)?;
        require("first_name", &self.first_name)?;
        require("last_name", &self.last_name)?;
        validate_email("email", &self.email)?;

        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::new(
                "password",
                format!("must be at least {MIN_PASSWORD_LEN} characters"),
            ));
        }
        if self.password != self.password_confirm {
            return Err(ValidationError::new(
                "password_confirm",
                "passwords do not match",
            ));
        }
        Ok(())
    }

    pub fn to_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "username": self.username.trim(),
            "email": self.email.trim(),
            "password": self.password,
            "first_name": self.first_name.trim(),
            "last_name": self.last_name.trim(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PurchaseForm {
    pub ticket_type_id: TicketTypeId,
    pub quantity: u32,
    pub discount_code: Option<String>,
    pub payment_method: String,
}

impl PurchaseForm {
    pub fn validate(&self) -> Result<PurchaseRequest, ValidationError> {
        if self.quantity < 1 {
            return Err(ValidationError::new("quantity", "must be at least 1"));
        }
        let payment_method = self.payment_method.trim();
        require("payment_method", payment_method)?;
        if payment_method.chars().count() > MAX_PAYMENT_METHOD_LEN {
            return Err(ValidationError::new(
                "payment_method",
                format!("must be at most {MAX_PAYMENT_METHOD_LEN} characters"),
            ));
        }

        Ok(PurchaseRequest {
            ticket_type_id: self.ticket_type_id,
            quantity: self.quantity,
            discount_code: normalize_discount_code(self.discount_code.as_deref()),
            payment_method: payment_method.to_owned(),
        })
    }
}

/// Discount codes are matched upper-case by the backend.
pub fn normalize_discount_code(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_uppercase)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckInForm {
    pub attendee_id: Option<AttendeeId>,
    pub ticket_code: Option<TicketCode>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl CheckInForm {
    pub fn validate(&self) -> Result<serde_json::Value, ValidationError> {
        let mut payload = serde_json::Map::new();
        match (self.attendee_id, self.ticket_code) {
            (Some(attendee_id), _) => {
                payload.insert("attendee_id".into(), attendee_id.0.into());
            }
            (None, Some(ticket_code)) => {
                payload.insert("ticket_code".into(), ticket_code.to_string().into());
            }
            (None, None) => {
                return Err(ValidationError::new(
                    "attendee_id",
                    "provide an attendee id or a ticket code",
                ));
            }
        }

        if let Some(location) = self.location.as_deref().map(str::trim) {
            if location.chars().count() > MAX_CHECKIN_LOCATION_LEN {
                return Err(ValidationError::new(
                    "location",
                    format!("must be at most {MAX_CHECKIN_LOCATION_LEN} characters"),
                ));
            }
            if !location.is_empty() {
                payload.insert("location".into(), location.into());
            }
        }
        if let Some(notes) = self.notes.as_deref() {
            payload.insert("notes".into(), notes.into());
        }

        Ok(serde_json::Value::Object(payload))
    }
}

impl EventDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)?;
        require("description", &self.description)?;
        if self.category_id.is_none() {
            return Err(ValidationError::new("category_id", "is required"));
        }
        if self.venue_id.is_none() {
            return Err(ValidationError::new("venue_id", "is required"));
        }

        let Some(start) = self.start_date else {
            return Err(ValidationError::new("start_date", "is required"));
        };
        let Some(end) = self.end_date else {
            return Err(ValidationError::new("end_date", "is required"));
        };
        if end <= start {
            return Err(ValidationError::new(
                "end_date",
                "must be after the start date",
            ));
        }

        if !self.is_free && self.max_attendees == Some(0) {
            return Err(ValidationError::new(
                "max_attendees",
                "must be greater than 0",
            ));
        }
        Ok(())
    }
}

impl AttendeeRegistration {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.event.is_none() {
            return Err(ValidationError::new("event", "is required"));
        }
        require("first_name", &self.first_name)?;
        require("last_name", &self.last_name)?;
        require("email", &self.email)?;
        validate_email("email", &self.email)
    }
}

impl SponsorDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("description", &self.description)?;
        require("contact_person", &self.contact_person)?;
        require("contact_email", &self.contact_email)?;
        validate_email("contact_email", &self.contact_email)?;
        require("contact_phone", &self.contact_phone)
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "is required"));
    }
    Ok(())
}

fn validate_email(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if email_pattern().is_match(value.trim()) {
        Ok(())
    } else {
        Err(ValidationError::new(field, "is not a valid email address"))
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex should compile")
    })
}
