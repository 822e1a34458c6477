use eventhub_core::{
    Attendee, AttendeeRegistration, CheckInForm, CheckInReceipt, Page, QueryParams,
};

use super::{decode, decode_page};
use crate::{
    ApiClient, ClientResult, endpoints, session_store::SessionStore, transport::HttpTransport,
};

pub struct AttendeesApi<'a, T, S> {
    client: &'a ApiClient<T, S>,
}

impl<T, S> ApiClient<T, S>
where
    T: HttpTransport,
    S: SessionStore,
{
    pub fn attendees(&self) -> AttendeesApi<'_, T, S> {
        AttendeesApi { client: self }
    }
}

impl<T, S> AttendeesApi<'_, T, S>
where
    T: HttpTransport,
    S: SessionStore,
{
    pub async fn register(&self, registration: &AttendeeRegistration) -> ClientResult<Attendee> {
        registration.validate()?;
        let payload = self.client.post(endpoints::ATTENDEES, registration).await?;
        decode(payload)
    }

    pub async fn mine(&self, upcoming_only: bool) -> ClientResult<Page<Attendee>> {
        let mut params = QueryParams::new();
        if upcoming_only {
            params.push("upcoming", "true");
        }
        let payload = self.client.get(endpoints::MY_REGISTRATIONS, &params).await?;
        decode_page(payload)
    }

    pub async fn check_in(&self, form: &CheckInForm) -> ClientResult<CheckInReceipt> {
        let body = form.validate()?;
        let payload = self.client.post(endpoints::CHECK_IN, &body).await?;
        let receipt: CheckInReceipt = decode(payload)?;
        log::info!("checked in attendee {}", receipt.attendee.id);
        Ok(receipt)
    }
}
