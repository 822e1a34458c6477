use std::{fs, path::PathBuf};

use eventhub_core::{
    EventDetail, EventId, EventStatus, EventSummary, Page, TicketStatus, TicketSummary, Timestamp,
    decode_listing,
};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("payloads")
        .join(name)
}

fn read_fixture(name: &str) -> serde_json::Value {
    let raw = fs::read_to_string(fixture_path(name)).expect("fixture should be readable");
    serde_json::from_str(&raw).expect("fixture should be valid json")
}

#[test]
fn decodes_paginated_event_listing() {
    let page: Page<EventSummary> =
        decode_listing(read_fixture("events_page.json")).expect("listing should decode");

    assert_eq!(page.count, 2);
    assert!(!page.has_next());

    let jazz = &page.results[0];
    assert_eq!(jazz.id, EventId(11));
    assert_eq!(jazz.status, EventStatus::Published);
    assert_eq!(jazz.venue_city.as_deref(), Some("Bogotá"));
    assert_eq!(
        jazz.start_date,
        Timestamp::parse_rfc3339("2030-12-02T00:00:00Z").expect("valid timestamp")
    );

    assert_eq!(page.results[1].status, EventStatus::Unknown);
    assert!(page.results[1].is_free);
}

#[test]
fn decodes_bare_ticket_array_as_single_page() {
    let page: Page<TicketSummary> =
        decode_listing(read_fixture("my_tickets.json")).expect("tickets should decode");

    assert_eq!(page.count, 2);
    assert_eq!(page.results[0].status, TicketStatus::Confirmed);
    assert!(page.results[0].status.is_valid_for_entry());
    assert!(!page.results[1].status.is_valid_for_entry());
    assert_eq!(page.results[1].final_price.as_deref(), Some("0.00"));
}

#[test]
fn decodes_event_detail_with_nested_venue() {
    let detail: EventDetail =
        serde_json::from_value(read_fixture("event_detail.json")).expect("detail should decode");

    let venue = detail.venue.as_ref().expect("venue present");
    assert_eq!(venue.capacity, Some(900));
    assert_eq!(
        detail.category.as_ref().map(|category| category.name.as_str()),
        Some("Música")
    );
    assert_eq!(detail.tag_list(), vec!["jazz", "live music", "outdoor"]);
    assert_eq!(detail.sponsors_count, 2);
}
