use clap::{Args, Subcommand, ValueEnum};
use eventhub_core::{
    CategoryId, EventDraft, EventId, EventOrdering, EventQuery, Timestamp, VenueId,
};

use crate::cli::{
    common::{connect, explain, require_login},
    root::GlobalOpts,
    view,
};

#[derive(Debug, Args)]
pub(crate) struct EventsCommand {
    #[command(subcommand)]
    subcmd: EventsSubcommand,
}

#[derive(Debug, Subcommand)]
enum EventsSubcommand {
    /// Search the published catalog.
    List(ListCommand),

    /// Show one event in detail.
    Show { id: EventId },

    /// Featured events.
    Featured,

    /// Events starting soon.
    Upcoming,

    /// Events you organize, drafts included.
    Mine,

    /// Create a draft event.
    Create(DraftArgs),

    /// Replace the editable fields of an event.
    Update {
        id: EventId,
        #[command(flatten)]
        draft: DraftArgs,
    },

    /// Delete an event you organize.
    Delete { id: EventId },

    /// Publish a draft event.
    Publish { id: EventId },

    /// Sales and attendance numbers for an event.
    Stats { id: EventId },

    /// List event categories.
    Categories,

    /// List venues.
    Venues {
        #[arg(long)]
        city: Option<String>,
    },
}

impl EventsCommand {
    pub(crate) async fn run(&self, globals: &GlobalOpts) -> anyhow::Result<()> {
        let client = connect(globals)?;
        let events = client.events();

        match &self.subcmd {
            EventsSubcommand::List(cmd) => {
                let page = events.list(&cmd.to_query()).await.map_err(explain)?;
                view::print_events(&page);
            }
            EventsSubcommand::Show { id } => {
                let event = events.get(*id).await.map_err(explain)?;
                view::print_event_detail(&event);
            }
            EventsSubcommand::Featured => {
                view::print_events(&events.featured().await.map_err(explain)?);
            }
            EventsSubcommand::Upcoming => {
                view::print_events(&events.upcoming().await.map_err(explain)?);
            }
            EventsSubcommand::Mine => {
                require_login(&client)?;
                view::print_events(&events.mine().await.map_err(explain)?);
            }
            EventsSubcommand::Create(draft) => {
                require_login(&client)?;
                let event = events.create(&draft.to_draft()).await.map_err(explain)?;
                println!("Created draft event #{}.", event.id);
                view::print_event_detail(&event);
            }
            EventsSubcommand::Update { id, draft } => {
                require_login(&client)?;
                let event = events
                    .update(*id, &draft.to_draft())
                    .await
                    .map_err(explain)?;
                println!("Updated event #{}.", event.id);
                view::print_event_detail(&event);
            }
            EventsSubcommand::Delete { id } => {
                require_login(&client)?;
                events.delete(*id).await.map_err(explain)?;
                println!("Deleted event #{id}.");
            }
            EventsSubcommand::Publish { id } => {
                require_login(&client)?;
                let event = events.publish(*id).await.map_err(explain)?;
                println!("Published event #{}.", event.id);
            }
            EventsSubcommand::Stats { id } => {
                let stats = events.stats(*id).await.map_err(explain)?;
                view::print_event_stats(&stats);
            }
            EventsSubcommand::Categories => {
                view::print_categories(&events.categories().await.map_err(explain)?);
            }
            EventsSubcommand::Venues { city } => {
                let page = events.venues(city.as_deref()).await.map_err(explain)?;
                view::print_venues(&page);
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Ordering {
    Newest,
    Soonest,
    Created,
    Popular,
}

impl From<Ordering> for EventOrdering {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Newest => EventOrdering::NewestStart,
            Ordering::Soonest => EventOrdering::SoonestStart,
            Ordering::Created => EventOrdering::RecentlyCreated,
            Ordering::Popular => EventOrdering::MostViewed,
        }
    }
}

#[derive(Debug, Args)]
struct ListCommand {
    /// Matches title, description and tags.
    #[arg(long, short)]
    search: Option<String>,

    #[arg(long)]
    category: Option<CategoryId>,

    #[arg(long)]
    venue: Option<VenueId>,

    #[arg(long)]
    city: Option<String>,

    /// Only free events.
    #[arg(long)]
    free: bool,

    /// Earliest start, RFC 3339.
    #[arg(long)]
    from: Option<Timestamp>,

    /// Latest start, RFC 3339.
    #[arg(long)]
    to: Option<Timestamp>,

    #[arg(long, value_enum)]
    order: Option<Ordering>,

    #[arg(long)]
    page: Option<u32>,

    #[arg(long)]
    page_size: Option<u32>,
}

impl ListCommand {
    fn to_query(&self) -> EventQuery {
        EventQuery {
            search: self.search.clone(),
            category: self.category,
            venue: self.venue,
            city: self.city.clone(),
            is_free: self.free.then_some(true),
            starts_after: self.from,
            starts_before: self.to,
            ordering: self.order.map(EventOrdering::from),
            page: self.page,
            page_size: self.page_size,
        }
    }
}

#[derive(Debug, Args)]
struct DraftArgs {
    #[arg(long)]
    title: String,

    #[arg(long)]
    description: String,

    #[arg(long, default_value = "")]
    summary: String,

    #[arg(long)]
    category: CategoryId,

    #[arg(long)]
    venue: VenueId,

    /// RFC 3339, e.g. 2025-09-01T09:00:00Z.
    #[arg(long)]
    start: Timestamp,

    #[arg(long)]
    end: Timestamp,

    #[arg(long)]
    free: bool,

    #[arg(long)]
    max_attendees: Option<u32>,

    /// Comma separated.
    #[arg(long, default_value = "")]
    tags: String,
}

impl DraftArgs {
    fn to_draft(&self) -> EventDraft {
        EventDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            short_description: self.summary.clone(),
            category_id: Some(self.category),
            venue_id: Some(self.venue),
            start_date: Some(self.start),
            end_date: Some(self.end),
            is_free: self.free,
            max_attendees: self.max_attendees,
            tags: self.tags.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::EventsCommand;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        events: EventsCommand,
    }

    #[test]
    fn list_flags_become_query_params() {
        let harness = Harness::try_parse_from([
            "events", "list", "--search", "rust", "--free", "--order", "soonest", "--from",
            "2025-01-01T00:00:00Z", "--page", "2",
        ])
        .expect("arguments should parse");

        let super::EventsSubcommand::List(list) = &harness.events.subcmd else {
            panic!("expected list subcommand");
        };
        let params = list.to_query().to_params();
        assert_eq!(params.get("search"), Some("rust"));
        assert_eq!(params.get("is_free"), Some("true"));
        assert_eq!(params.get("ordering"), Some("start_date"));
        assert_eq!(params.get("start_date_gte"), Some("2025-01-01T00:00:00Z"));
        assert_eq!(params.get("page"), Some("2"));
    }
}
