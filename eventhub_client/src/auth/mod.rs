mod state;

pub use state::{AuthEvent, AuthState};
