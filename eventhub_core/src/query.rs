use crate::{
    ids::{CategoryId, EventId, VenueId},
    tickets::TicketStatus,
    time::Timestamp,
};

/// Ordered key/value pairs appended to a request URL's query string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl ToString) {
        self.pairs.push((key.into(), value.to_string()));
    }

    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.push(key, value);
        self
    }

    pub fn push_opt<V: ToString>(&mut self, key: &str, value: Option<V>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EventOrdering {
    #[default]
    NewestStart,
    SoonestStart,
    RecentlyCreated,
    MostViewed,
}

impl EventOrdering {
    pub fn as_param(self) -> &'static str {
        match self {
            Self::NewestStart => "-start_date",
            Self::SoonestStart => "start_date",
            Self::RecentlyCreated => "-created_at",
            Self::MostViewed => "-views_count",
        }
    }
}

/// Filters accepted by the event catalog listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventQuery {
    pub search: Option<String>,
    pub category: Option<CategoryId>,
    pub venue: Option<VenueId>,
    pub city: Option<String>,
    pub is_free: Option<bool>,
    pub starts_after: Option<Timestamp>,
    pub starts_before: Option<Timestamp>,
    pub ordering: Option<EventOrdering>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl EventQuery {
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_opt("search", non_blank(self.search.as_deref()));
        params.push_opt("category", self.category);
        params.push_opt("venue", self.venue);
        params.push_opt("city", non_blank(self.city.as_deref()));
        params.push_opt("is_free", self.is_free);
        params.push_opt("start_date_gte", self.starts_after.map(Timestamp::to_rfc3339));
        params.push_opt("start_date_lte", self.starts_before.map(Timestamp::to_rfc3339));
        params.push_opt("ordering", self.ordering.map(EventOrdering::as_param));
        params.push_opt("page", self.page.filter(|page| *page > 0));
        params.push_opt("page_size", self.page_size.filter(|size| *size > 0));
        params
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TicketQuery {
    pub event: Option<EventId>,
    pub status: Option<TicketStatus>,
}

impl TicketQuery {
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_opt("event", self.event);
        params.push_opt("status", self.status.map(TicketStatus::as_str));
        params
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{EventOrdering, EventQuery, QueryParams, TicketQuery};
    use crate::{ids::CategoryId, tickets::TicketStatus};

    #[test]
    fn default_event_query_has_no_params() {
        assert!(EventQuery::default().to_params().is_empty());
    }

    #[test]
    fn event_query_skips_blank_text_and_zero_pages() {
        let query = EventQuery {
            search: Some("  ".to_owned()),
            city: Some(" Bogotá ".to_owned()),
            category: Some(CategoryId(3)),
            ordering: Some(EventOrdering::SoonestStart),
            page: Some(0),
            page_size: Some(12),
            ..EventQuery::default()
        };

        let params = query.to_params();
        let pairs: Vec<(&str, &str)> = params.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("category", "3"),
                ("city", "Bogotá"),
                ("ordering", "start_date"),
                ("page_size", "12"),
            ]
        );
    }

    #[test]
    fn ticket_query_uses_backend_status_names() {
        let params = TicketQuery {
            event: None,
            status: Some(TicketStatus::Confirmed),
        }
        .to_params();
        assert_eq!(params.get("status"), Some("confirmed"));
        assert_eq!(params.get("event"), None);
    }

    #[test]
    fn builder_preserves_insertion_order() {
        let params = QueryParams::new().with("b", 2).with("a", 1);
        let keys: Vec<&str> = params.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }
}
