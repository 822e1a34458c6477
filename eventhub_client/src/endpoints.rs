//! Paths of the EventHub REST API, relative to the configured base url.

use eventhub_core::{EventId, TicketId};

pub const HEALTH: &str = "/health/";

pub const TOKEN_OBTAIN: &str = "/token/";
pub const TOKEN_REFRESH: &str = "/token/refresh/";
pub const TOKEN_VERIFY: &str = "/token/verify/";
pub const REGISTER: &str = "/auth/register/";
pub const CURRENT_USER: &str = "/auth/me/";
pub const UPDATE_PROFILE: &str = "/auth/profile/";

pub const EVENTS: &str = "/events/events/";
pub const FEATURED_EVENTS: &str = "/events/events/featured/";
pub const UPCOMING_EVENTS: &str = "/events/events/upcoming/";
pub const MY_EVENTS: &str = "/events/events/my_events/";
pub const CATEGORIES: &str = "/events/categories/";
pub const VENUES: &str = "/events/venues/";

pub const TICKET_TYPES: &str = "/tickets/ticket-types/";
pub const PURCHASE_TICKETS: &str = "/tickets/tickets/purchase/";
pub const MY_TICKETS: &str = "/tickets/tickets/my_tickets/";
pub const VERIFY_DISCOUNT: &str = "/tickets/discount-codes/verify/";

pub const ATTENDEES: &str = "/attendees/attendees/";
pub const MY_REGISTRATIONS: &str = "/attendees/attendees/my_registrations/";
pub const CHECK_IN: &str = "/attendees/attendees/checkin/";

pub const SPONSORS: &str = "/sponsors/sponsors/";
pub const SPONSORSHIPS: &str = "/sponsors/sponsorships/";

pub fn event(id: EventId) -> String {
    format!("{EVENTS}{id}/")
}

pub fn publish_event(id: EventId) -> String {
    format!("{EVENTS}{id}/publish/")
}

pub fn event_stats(id: EventId) -> String {
    format!("{EVENTS}{id}/stats/")
}

pub fn cancel_ticket(id: TicketId) -> String {
    format!("/tickets/tickets/{id}/cancel/")
}

#[cfg(test)]
mod tests {
    use eventhub_core::{EventId, TicketId};

    #[test]
    fn detail_paths_keep_trailing_slashes() {
        assert_eq!(super::event(EventId(7)), "/events/events/7/");
        assert_eq!(super::publish_event(EventId(7)), "/events/events/7/publish/");
        assert_eq!(super::event_stats(EventId(7)), "/events/events/7/stats/");
        assert_eq!(super::cancel_ticket(TicketId(9)), "/tickets/tickets/9/cancel/");
    }
}
