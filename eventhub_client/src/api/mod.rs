//! Typed feature calls layered over [`ApiClient`](crate::ApiClient).

mod attendees;
mod auth;
mod events;
mod health;
mod sponsors;
mod tickets;

use eventhub_core::{Page, decode_listing};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::ClientResult;

pub use attendees::AttendeesApi;
pub use auth::AuthApi;
pub use events::EventsApi;
pub use health::HealthApi;
pub use sponsors::SponsorsApi;
pub use tickets::TicketsApi;

fn decode<R: DeserializeOwned>(payload: Value) -> ClientResult<R> {
    Ok(serde_json::from_value(payload)?)
}

fn decode_page<R: DeserializeOwned>(payload: Value) -> ClientResult<Page<R>> {
    Ok(decode_listing(payload)?)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use reqwest::Method;
    use serde_json::{Value, json};

    use crate::{
        ApiClient, ClientResult,
        config::ClientConfig,
        session_store::MemorySessionStore,
        transport::{HttpRequest, HttpResponse, HttpTransport},
    };

    pub(crate) type StubClient = ApiClient<Arc<StubTransport>, MemorySessionStore>;

    /// Canned responses keyed by method and path; anything else is a 404.
    #[derive(Default)]
    pub(crate) struct StubTransport {
        routes: Vec<(Method, String, u16, Value)>,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl StubTransport {
        pub(crate) fn route(mut self, method: Method, path: &str, status: u16, body: Value) -> Self {
            self.routes.push((method, format!("/api{path}"), status, body));
            self
        }

        pub(crate) fn requests(&self) -> Vec<HttpRequest> {
            self.seen.lock().expect("lock should work").clone()
        }

        pub(crate) fn last_request(&self) -> HttpRequest {
            self.requests().pop().expect("a request should have been sent")
        }

        pub(crate) fn into_client(self, store: MemorySessionStore) -> (Arc<Self>, StubClient) {
            let transport = Arc::new(self);
            let config = ClientConfig {
                base_url: "http://eventhub.test/api".to_owned(),
                ..ClientConfig::default()
            };
            let client = ApiClient::with_parts(config, Arc::clone(&transport), store)
                .expect("client should build");
            (transport, client)
        }
    }

    #[async_trait]
    impl HttpTransport for StubTransport {
        async fn send(&self, request: HttpRequest) -> ClientResult<HttpResponse> {
            self.seen
                .lock()
                .expect("lock should work")
                .push(request.clone());

            let (status, body) = self
                .routes
                .iter()
                .find(|(method, path, _, _)| *method == request.method && path == request.url.path())
                .map(|(_, _, status, body)| (*status, body.clone()))
                .unwrap_or((404, json!({"detail": "Not found."})));

            Ok(HttpResponse {
                status,
                body: body.to_string().into_bytes(),
            })
        }
    }

    pub(crate) fn sent_json(request: &HttpRequest) -> Value {
        let body = request.body.as_deref().expect("request should carry a body");
        serde_json::from_slice(body).expect("body should be json")
    }
}
