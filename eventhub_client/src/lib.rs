pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod errors;
pub mod session_store;
pub mod transport;

pub use api::{AttendeesApi, AuthApi, EventsApi, HealthApi, SponsorsApi, TicketsApi};
pub use auth::{AuthEvent, AuthState};
pub use client::{ApiClient, RequestOptions};
pub use config::ClientConfig;
pub use errors::{ClientError, ClientResult};
pub use session_store::{KeyringSessionStore, MemorySessionStore, SessionKey, SessionStore};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
