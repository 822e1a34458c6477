use eventhub_core::{
    Category, EventDetail, EventDraft, EventId, EventQuery, EventStats, EventSummary, Page,
    QueryParams, Venue,
};

use super::{decode, decode_page};
use crate::{
    ApiClient, ClientResult, endpoints, session_store::SessionStore, transport::HttpTransport,
};

pub struct EventsApi<'a, T, S> {
    client: &'a ApiClient<T, S>,
}

impl<T, S> ApiClient<T, S>
where
    T: HttpTransport,
    S: SessionStore,
{
    pub fn events(&self) -> EventsApi<'_, T, S> {
        EventsApi { client: self }
    }
}

impl<T, S> EventsApi<'_, T, S>
where
    T: HttpTransport,
    S: SessionStore,
{
    pub async fn list(&self, query: &EventQuery) -> ClientResult<Page<EventSummary>> {
        self.page(endpoints::EVENTS, &query.to_params()).await
    }

    pub async fn get(&self, id: EventId) -> ClientResult<EventDetail> {
        let payload = self
            .client
            .get(&endpoints::event(id), &QueryParams::new())
            .await?;
        decode(payload)
    }

    pub async fn create(&self, draft: &EventDraft) -> ClientResult<EventDetail> {
        draft.validate()?;
        let payload = self.client.post(endpoints::EVENTS, draft).await?;
        decode(payload)
    }

    pub async fn update(&self, id: EventId, draft: &EventDraft) -> ClientResult<EventDetail> {
        draft.validate()?;
        let payload = self.client.patch(&endpoints::event(id), draft).await?;
        decode(payload)
    }

    pub async fn delete(&self, id: EventId) -> ClientResult<()> {
        self.client.delete(&endpoints::event(id)).await?;
        Ok(())
    }

    pub async fn featured(&self) -> ClientResult<Page<EventSummary>> {
        self.page(endpoints::FEATURED_EVENTS, &QueryParams::new())
            .await
    }

    pub async fn upcoming(&self) -> ClientResult<Page<EventSummary>> {
        self.page(endpoints::UPCOMING_EVENTS, &QueryParams::new())
            .await
    }

    /// Events organized by the signed-in user, drafts included.
    pub async fn mine(&self) -> ClientResult<Page<EventSummary>> {
        self.page(endpoints::MY_EVENTS, &QueryParams::new()).await
    }

    pub async fn publish(&self, id: EventId) -> ClientResult<EventDetail> {
        let payload = self
            .client
            .post(&endpoints::publish_event(id), &serde_json::json!({}))
            .await?;
        decode(payload)
    }

    pub async fn stats(&self, id: EventId) -> ClientResult<EventStats> {
        let payload = self
            .client
            .get(&endpoints::event_stats(id), &QueryParams::new())
            .await?;
        decode(payload)
    }

    pub async fn categories(&self) -> ClientResult<Page<Category>> {
        self.page(endpoints::CATEGORIES, &QueryParams::new()).await
    }

    pub async fn venues(&self, city: Option<&str>) -> ClientResult<Page<Venue>> {
        let mut params = QueryParams::new();
        params.push_opt("city", city.map(str::trim).filter(|city| !city.is_empty()));
        self.page(endpoints::VENUES, &params).await
    }

    async fn page<R>(&self, endpoint: &str, params: &QueryParams) -> ClientResult<Page<R>>
    where
        R: serde::de::DeserializeOwned,
    {
        let payload = self.client.get(endpoint, params).await?;
        decode_page(payload)
    }
}
