use eventhub_core::{
    DiscountCheck, DiscountCheckRequest, EventId, Page, PurchaseForm, PurchaseReceipt,
    QueryParams, TicketId, TicketQuery, TicketSummary, TicketType, TicketTypeId,
    ValidationError, forms::normalize_discount_code,
};
use serde_json::{Value, json};

use super::{decode, decode_page};
use crate::{
    ApiClient, ClientError, ClientResult, endpoints, session_store::SessionStore,
    transport::HttpTransport,
};

pub struct TicketsApi<'a, T, S> {
    client: &'a ApiClient<T, S>,
}

impl<T, S> ApiClient<T, S>
where
    T: HttpTransport,
    S: SessionStore,
{
    pub fn tickets(&self) -> TicketsApi<'_, T, S> {
        TicketsApi { client: self }
    }
}

impl<T, S> TicketsApi<'_, T, S>
where
    T: HttpTransport,
    S: SessionStore,
{
    pub async fn types_for_event(&self, event: EventId) -> ClientResult<Page<TicketType>> {
        let params = QueryParams::new().with("event", event);
        let payload = self.client.get(endpoints::TICKET_TYPES, &params).await?;
        decode_page(payload)
    }

    pub async fn purchase(&self, form: &PurchaseForm) -> ClientResult<PurchaseReceipt> {
        let request = form.validate()?;
        let payload = self
            .client
            .post(endpoints::PURCHASE_TICKETS, &request)
            .await?;
        let receipt: PurchaseReceipt = decode(payload)?;
        log::info!(
            "purchased {} ticket(s) of type {}",
            receipt.tickets.len(),
            request.ticket_type_id
        );
        Ok(receipt)
    }

    pub async fn mine(&self, query: &TicketQuery) -> ClientResult<Page<TicketSummary>> {
        let payload = self
            .client
            .get(endpoints::MY_TICKETS, &query.to_params())
            .await?;
        decode_page(payload)
    }

    /// Returns the server's confirmation message, when it sends one.
    pub async fn cancel(&self, id: TicketId, reason: Option<&str>) -> ClientResult<Option<String>> {
        let body = match reason.map(str::trim).filter(|reason| !reason.is_empty()) {
            Some(reason) => json!({ "reason": reason }),
            None => json!({}),
        };
        let payload = self
            .client
            .post(&endpoints::cancel_ticket(id), &body)
            .await?;
        Ok(payload
            .get("message")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned))
    }

    /// An unknown or inapplicable code is reported as an invalid check, not
    /// an error.
    pub async fn verify_discount(
        &self,
        code: &str,
        ticket_type: Option<TicketTypeId>,
    ) -> ClientResult<DiscountCheck> {
        let code = normalize_discount_code(Some(code))
            .ok_or_else(|| ValidationError::new("code", "is required"))?;
        let request = DiscountCheckRequest {
            code,
            ticket_type_id: ticket_type,
        };

        match self.client.post(endpoints::VERIFY_DISCOUNT, &request).await {
            Ok(payload) => decode(payload),
            Err(ClientError::Api {
                status: 400 | 404,
                message,
            }) => Ok(DiscountCheck {
                valid: false,
                error: Some(message),
                discount: None,
            }),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use eventhub_core::{
        EventId, PurchaseForm, TicketId, TicketQuery, TicketStatus, TicketTypeId,
    };
    use reqwest::Method;
    use serde_json::json;

    use crate::{
        ClientError,
        api::testing::{StubTransport, sent_json},
        session_store::MemorySessionStore,
    };

    #[tokio::test]
    async fn purchase_normalizes_discount_code() {
        let (transport, client) = StubTransport::default()
            .route(
                Method::POST,
                "/tickets/tickets/purchase/",
                201,
                json!({
                    "success": true,
                    "message": "2 ticket(s) comprado(s) exitosamente",
                    "tickets": [
                        {"id": 1, "ticket_code": "5f0c1f5e-8a47-4a61-9d55-3c1f0c1a2b3c",
                         "status": "paid", "final_price": "45.00"},
                        {"id": 2, "ticket_code": "7a1d2e3f-1b2c-4d5e-8f90-a1b2c3d4e5f6",
                         "status": "paid", "final_price": "45.00"}
                    ]
                }),
            )
            .into_client(MemorySessionStore::with_tokens("A1", "R1"));

        let form = PurchaseForm {
            ticket_type_id: TicketTypeId(3),
            quantity: 2,
            discount_code: Some(" earlybird ".to_owned()),
            payment_method: "credit_card".to_owned(),
        };
        let receipt = client
            .tickets()
            .purchase(&form)
            .await
            .expect("purchase should succeed");

        assert!(receipt.success);
        assert_eq!(receipt.tickets.len(), 2);
        assert_eq!(receipt.tickets[0].status, TicketStatus::Paid);
        assert_eq!(
            sent_json(&transport.last_request()),
            json!({
                "ticket_type_id": 3,
                "quantity": 2,
                "discount_code": "EARLYBIRD",
                "payment_method": "credit_card"
            })
        );
    }

    #[tokio::test]
    async fn zero_quantity_never_reaches_the_server() {
        let (transport, client) =
            StubTransport::default().into_client(MemorySessionStore::with_tokens("A1", "R1"));

        let form = PurchaseForm {
            ticket_type_id: TicketTypeId(3),
            quantity: 0,
            discount_code: None,
            payment_method: "cash".to_owned(),
        };
        let err = client
            .tickets()
            .purchase(&form)
            .await
            .expect_err("purchase should fail");

        assert!(matches!(err, ClientError::Validation(ref inner) if inner.field == "quantity"));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn my_tickets_filters_by_event_and_status() {
        let (transport, client) = StubTransport::default()
            .route(
                Method::GET,
                "/tickets/tickets/my_tickets/",
                200,
                json!([{
                    "id": 9,
                    "ticket_code": "5f0c1f5e-8a47-4a61-9d55-3c1f0c1a2b3c",
                    "event_title": "Rust Meetup",
                    "ticket_type_name": "General",
                    "status": "confirmed"
                }]),
            )
            .into_client(MemorySessionStore::with_tokens("A1", "R1"));

        let query = TicketQuery {
            event: Some(EventId(4)),
            status: Some(TicketStatus::Confirmed),
        };
        let page = client
            .tickets()
            .mine(&query)
            .await
            .expect("tickets should load");

        assert_eq!(page.results[0].id, TicketId(9));
        assert_eq!(
            transport.last_request().url.query(),
            Some("event=4&status=confirmed")
        );
    }

    #[tokio::test]
    async fn cancel_returns_server_message() {
        let (transport, client) = StubTransport::default()
            .route(
                Method::POST,
                "/tickets/tickets/9/cancel/",
                200,
                json!({"success": true, "message": "Ticket cancelado exitosamente"}),
            )
            .into_client(MemorySessionStore::with_tokens("A1", "R1"));

        let message = client
            .tickets()
            .cancel(TicketId(9), Some("No puedo asistir"))
            .await
            .expect("cancel should succeed");

        assert_eq!(message.as_deref(), Some("Ticket cancelado exitosamente"));
        assert_eq!(
            sent_json(&transport.last_request()),
            json!({"reason": "No puedo asistir"})
        );
    }

    #[tokio::test]
    async fn unknown_discount_is_an_invalid_check() {
        let (transport, client) = StubTransport::default()
            .route(
                Method::POST,
                "/tickets/discount-codes/verify/",
                404,
                json!({"valid": false, "error": "Código no encontrado"}),
            )
            .into_client(MemorySessionStore::new());

        let check = client
            .tickets()
            .verify_discount("nope", Some(TicketTypeId(1)))
            .await
            .expect("verification should complete");

        assert!(!check.valid);
        assert_eq!(check.error.as_deref(), Some("Código no encontrado"));
        assert_eq!(
            sent_json(&transport.last_request()),
            json!({"code": "NOPE", "ticket_type_id": 1})
        );
    }

    #[tokio::test]
    async fn types_for_event_passes_event_filter() {
        let (transport, client) = StubTransport::default()
            .route(
                Method::GET,
                "/tickets/ticket-types/",
                200,
                json!({"count": 1, "next": null, "previous": null, "results": [{
                    "id": 3, "event": 4, "name": "General", "price": "50.00",
                    "quantity_available": 100, "quantity_sold": 10, "is_on_sale": true
                }]}),
            )
            .into_client(MemorySessionStore::new());

        let page = client
            .tickets()
            .types_for_event(EventId(4))
            .await
            .expect("types should load");

        assert_eq!(page.results[0].price, "50.00");
        assert_eq!(transport.last_request().url.query(), Some("event=4"));
    }
}
