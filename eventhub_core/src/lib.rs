pub mod account;
pub mod attendees;
pub mod catalog;
pub mod forms;
pub mod health;
pub mod ids;
pub mod page;
pub mod query;
pub mod sponsors;
pub mod tickets;
pub mod time;

pub use account::{ProfileUpdate, ProfileUpdated, RefreshedAccess, Registration, TokenPair, UserProfile};
pub use attendees::{Attendee, AttendeeRegistration, AttendeeStatus, CheckInReceipt};
pub use catalog::{Category, EventDetail, EventDraft, EventStats, EventStatus, EventSummary, Venue};
pub use forms::{CheckInForm, LoginForm, PurchaseForm, RegistrationForm, ValidationError};
pub use health::HealthReport;
pub use ids::{
    AttendeeId, CategoryId, EventId, SponsorId, SponsorTierId, SponsorshipId, TicketCode, TicketId,
    TicketTypeId, UserId, VenueId,
};
pub use page::{Page, decode_listing};
pub use query::{EventOrdering, EventQuery, QueryParams, TicketQuery};
pub use sponsors::{PaymentStatus, Sponsor, SponsorDraft, SponsorStatus, Sponsorship, SponsorshipDraft};
pub use tickets::{
    DiscountCheck, DiscountCheckRequest, DiscountCode, DiscountKind, PurchaseReceipt, PurchaseRequest,
    PurchasedTicket, TicketStatus, TicketSummary, TicketType,
};
pub use time::Timestamp;
