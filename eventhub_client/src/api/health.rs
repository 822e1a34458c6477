use eventhub_core::HealthReport;

use super::decode;
use crate::{
    ApiClient, ClientResult, RequestOptions, endpoints, session_store::SessionStore,
    transport::HttpTransport,
};

pub struct HealthApi<'a, T, S> {
    client: &'a ApiClient<T, S>,
}

impl<T, S> ApiClient<T, S>
where
    T: HttpTransport,
    S: SessionStore,
{
    pub fn health(&self) -> HealthApi<'_, T, S> {
        HealthApi { client: self }
    }
}

impl<T, S> HealthApi<'_, T, S>
where
    T: HttpTransport,
    S: SessionStore,
{
    /// An unhealthy server answers 503, which surfaces as an API error.
    pub async fn check(&self) -> ClientResult<HealthReport> {
        let options = RequestOptions::default().without_auth().without_retry();
        let payload = self.client.request(endpoints::HEALTH, options).await?;
        decode(payload)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::{Method, header::AUTHORIZATION};
    use serde_json::json;

    use crate::{api::testing::StubTransport, session_store::MemorySessionStore};

    #[tokio::test]
    async fn health_check_is_anonymous() {
        let (transport, client) = StubTransport::default()
            .route(
                Method::GET,
                "/health/",
                200,
                json!({
                    "status": "healthy",
                    "service": "EventHub API",
                    "version": "1.0.0",
                    "checks": {"database": {"status": "healthy"}}
                }),
            )
            .into_client(MemorySessionStore::with_tokens("A1", "R1"));

        let report = client.health().check().await.expect("health should load");

        assert!(report.is_healthy());
        assert_eq!(report.check_status("database"), Some("healthy"));
        assert!(transport.last_request().headers.get(AUTHORIZATION).is_none());
    }

    #[tokio::test]
    async fn unhealthy_server_is_an_error() {
        let (_transport, client) = StubTransport::default()
            .route(
                Method::GET,
                "/health/",
                503,
                json!({"status": "unhealthy", "checks": {"database": {"status": "unhealthy"}}}),
            )
            .into_client(MemorySessionStore::new());

        let err = client.health().check().await.expect_err("health should fail");

        assert_eq!(err.status(), Some(503));
        assert_eq!(err.user_message(), "Error 503");
    }
}
