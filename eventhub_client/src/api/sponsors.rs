use eventhub_core::{
    EventId, Page, QueryParams, Sponsor, SponsorDraft, Sponsorship, SponsorshipDraft,
    ValidationError,
};

use super::{decode, decode_page};
use crate::{
    ApiClient, ClientResult, endpoints, session_store::SessionStore, transport::HttpTransport,
};

pub struct SponsorsApi<'a, T, S> {
    client: &'a ApiClient<T, S>,
}

impl<T, S> ApiClient<T, S>
where
    T: HttpTransport,
    S: SessionStore,
{
    pub fn sponsors(&self) -> SponsorsApi<'_, T, S> {
        SponsorsApi { client: self }
    }
}

impl<T, S> SponsorsApi<'_, T, S>
where
    T: HttpTransport,
    S: SessionStore,
{
    pub async fn list(&self, search: Option<&str>) -> ClientResult<Page<Sponsor>> {
        let mut params = QueryParams::new();
        params.push_opt("search", search.map(str::trim).filter(|term| !term.is_empty()));
        let payload = self.client.get(endpoints::SPONSORS, &params).await?;
        decode_page(payload)
    }

    pub async fn create(&self, draft: &SponsorDraft) -> ClientResult<Sponsor> {
        draft.validate()?;
        let payload = self.client.post(endpoints::SPONSORS, draft).await?;
        decode(payload)
    }

    pub async fn sponsorships(&self, event: Option<EventId>) -> ClientResult<Page<Sponsorship>> {
        let mut params = QueryParams::new();
        params.push_opt("event", event);
        let payload = self.client.get(endpoints::SPONSORSHIPS, &params).await?;
        decode_page(payload)
    }

    pub async fn create_sponsorship(&self, draft: &SponsorshipDraft) -> ClientResult<Sponsorship> {
        let amount = draft.contribution_amount.trim().parse::<f64>();
        if !matches!(amount, Ok(amount) if amount > 0.0) {
            return Err(ValidationError::new(
                "contribution_amount",
                "must be a positive amount",
            )
            .into());
        }
        let payload = self.client.post(endpoints::SPONSORSHIPS, draft).await?;
        decode(payload)
    }
}
