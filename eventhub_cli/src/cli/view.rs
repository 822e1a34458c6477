use eventhub_core::{
    Attendee, Category, EventDetail, EventStats, EventSummary, HealthReport, Page, Sponsor,
    Sponsorship, TicketSummary, TicketType, Timestamp, UserProfile, Venue,
};

pub(crate) fn event_row(event: &EventSummary, now: Timestamp) -> String {
    let place = match (&event.venue_name, &event.venue_city) {
        (Some(venue), Some(city)) => format!("{venue}, {city}"),
        (Some(venue), None) => venue.clone(),
        (None, Some(city)) => city.clone(),
        (None, None) => "<no venue>".to_owned(),
    };
    let price = if event.is_free { "free" } else { "paid" };
    let starts_in = match event.start_date.days_until(now) {
        0 if event.start_date <= now => String::new(),
        0 => " (today)".to_owned(),
        1 => " (in 1 day)".to_owned(),
        days => format!(" (in {days} days)"),
    };

    format!(
        "#{:<5} {}  [{}] {} | {} | {}{}",
        event.id,
        event.title,
        event.status.as_str(),
        place,
        price,
        event.start_date.display_short(),
        starts_in,
    )
}

pub(crate) fn page_footer<T>(page: &Page<T>) -> String {
    let mut footer = format!("{} of {} result(s)", page.results.len(), page.count);
    if page.has_previous() {
        footer.push_str(", previous page available");
    }
    if page.has_next() {
        footer.push_str(", more with --page");
    }
    footer
}

pub(crate) fn print_events(page: &Page<EventSummary>) {
    if page.is_empty() {
        println!("No events found.");
        return;
    }
    let now = Timestamp::now();
    for event in &page.results {
        println!("{}", event_row(event, now));
    }
    println!("{}", page_footer(page));
}

pub(crate) fn print_event_detail(event: &EventDetail) {
    println!("#{} {} [{}]", event.id, event.title, event.status.as_str());
    if let Some(category) = &event.category {
        println!("Category: {}", category.name);
    }
    if let Some(venue) = &event.venue {
        let address = venue
            .full_address
            .clone()
            .unwrap_or_else(|| format!("{}, {}", venue.address, venue.city));
        println!("Venue: {} ({address})", venue.name);
    }
    match event.end_date {
        Some(end) => println!(
            "When: {} to {}",
            event.start_date.display_short(),
            end.display_short()
        ),
        None => println!("When: {}", event.start_date.display_short()),
    }
    if let Some(organizer) = &event.organizer_name {
        println!("Organizer: {organizer}");
    }
    match (event.max_attendees, event.available_spots) {
        (Some(max), Some(spots)) => println!("Capacity: {spots} of {max} spots left"),
        (Some(max), None) => println!("Capacity: {max}"),
        _ => {}
    }
    println!("Price: {}", if event.is_free { "free" } else { "paid" });
    let tags = event.tag_list();
    if !tags.is_empty() {
        println!("Tags: {}", tags.join(", "));
    }
    if !event.description.trim().is_empty() {
        println!();
        println!("{}", event.description.trim());
    }
}

pub(crate) fn print_event_stats(stats: &EventStats) {
    println!("#{} {}", stats.id, stats.title);
    println!("Tickets sold: {}", stats.total_tickets_sold);
    println!("Attendees: {}", stats.total_attendees);
    println!("Revenue: {}", plain_value(&stats.total_revenue));
    if let Some(rate) = stats.attendance_rate {
        println!("Attendance rate: {rate:.1}%");
    }
}

pub(crate) fn print_categories(page: &Page<Category>) {
    for category in &page.results {
        println!(
            "#{:<4} {} ({} event(s))",
            category.id, category.name, category.events_count
        );
    }
    println!("{}", page_footer(page));
}

pub(crate) fn print_venues(page: &Page<Venue>) {
    for venue in &page.results {
        let capacity = venue
            .capacity
            .map(|capacity| format!(", capacity {capacity}"))
            .unwrap_or_default();
        println!("#{:<4} {} - {}{capacity}", venue.id, venue.name, venue.city);
    }
    println!("{}", page_footer(page));
}

pub(crate) fn ticket_row(ticket: &TicketSummary) -> String {
    format!(
        "#{:<5} {} | {} | {} | {}{}",
        ticket.id,
        ticket.event_title.as_deref().unwrap_or("<event>"),
        ticket.ticket_type_name.as_deref().unwrap_or("<type>"),
        ticket.status.as_str(),
        ticket.ticket_code,
        ticket
            .final_price
            .as_deref()
            .map(|price| format!(" | {price}"))
            .unwrap_or_default(),
    )
}

pub(crate) fn print_tickets(page: &Page<TicketSummary>) {
    if page.is_empty() {
        println!("No tickets yet.");
        return;
    }
    for ticket in &page.results {
        println!("{}", ticket_row(ticket));
    }
    println!("{}", page_footer(page));
}

pub(crate) fn print_ticket_types(page: &Page<TicketType>) {
    for ticket_type in &page.results {
        let availability = if ticket_type.is_sold_out {
            "sold out".to_owned()
        } else {
            let remaining = ticket_type.quantity_remaining.unwrap_or_else(|| {
                i64::from(ticket_type.quantity_available) - i64::from(ticket_type.quantity_sold)
            });
            format!("{remaining} left")
        };
        let on_sale = if ticket_type.is_on_sale { "" } else { " (not on sale)" };
        println!(
            "#{:<4} {} - {} | {availability}{on_sale}",
            ticket_type.id, ticket_type.name, ticket_type.price
        );
    }
}

pub(crate) fn print_attendees(page: &Page<Attendee>) {
    if page.is_empty() {
        println!("No registrations.");
        return;
    }
    for attendee in &page.results {
        println!(
            "#{:<5} {} <{}> | {} | {:?}",
            attendee.id,
            attendee.full_name,
            attendee.email,
            attendee.event_title.as_deref().unwrap_or("<event>"),
            attendee.status,
        );
    }
}

pub(crate) fn print_sponsors(page: &Page<Sponsor>) {
    for sponsor in &page.results {
        println!(
            "#{:<4} {} | {} | {} | {:?}",
            sponsor.id,
            sponsor.name,
            sponsor.industry,
            sponsor.tier_name.as_deref().unwrap_or("<no tier>"),
            sponsor.status,
        );
    }
    println!("{}", page_footer(page));
}

pub(crate) fn print_sponsorships(page: &Page<Sponsorship>) {
    for sponsorship in &page.results {
        let progress = sponsorship
            .payment_progress
            .map(|progress| format!(" ({progress:.0}% paid)"))
            .unwrap_or_default();
        println!(
            "#{:<4} {} -> {} | {} | {} {:?}{progress}",
            sponsorship.id,
            sponsorship.sponsor_name.as_deref().unwrap_or("<sponsor>"),
            sponsorship.event_title.as_deref().unwrap_or("<event>"),
            sponsorship.tier_name.as_deref().unwrap_or("<tier>"),
            sponsorship.contribution_amount,
            sponsorship.payment_status,
        );
    }
    println!("{}", page_footer(page));
}

pub(crate) fn print_profile(profile: &UserProfile) {
    println!("User: {} ({})", profile.display_name(), profile.username);
    if !profile.email.is_empty() {
        println!("Email: {}", profile.email);
    }
    if profile.is_staff {
        println!("Role: staff");
    }
    if let Some(joined) = profile.date_joined {
        println!("Joined: {}", joined.display_short());
    }
}

pub(crate) fn print_health(report: &HealthReport) {
    println!(
        "{} {} is {}",
        report.service.as_deref().unwrap_or("EventHub API"),
        report.version.as_deref().unwrap_or(""),
        report.status
    );
    for name in report.checks.keys() {
        println!("  {name}: {}", report.check_status(name).unwrap_or("unknown"));
    }
}

fn plain_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        serde_json::Value::Null => "0".to_owned(),
        other => other.to_string(),
    }
}
