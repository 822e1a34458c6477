#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthState {
    Anonymous,
    Authenticated,
    Refreshing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthEvent {
    /// Login or registration stored a fresh token pair.
    SignedIn,
    /// A request that carried a bearer token came back 401.
    AccessRejected,
    /// Caller asked for a refresh without a rejected request.
    RefreshRequested,
    RefreshSucceeded,
    /// Refresh call failed or no refresh token was stored.
    RefreshFailed,
    SignedOut,
}

impl AuthState {
    pub fn initial(has_access_token: bool) -> Self {
        if has_access_token {
            Self::Authenticated
        } else {
            Self::Anonymous
        }
    }

    /// Returns `None` when `event` is not legal in the current state.
    pub fn on(self, event: AuthEvent) -> Option<Self> {
        use AuthEvent::*;
        use AuthState::*;

        match (self, event) {
            (Anonymous | Authenticated, SignedIn) => Some(Authenticated),
            (Authenticated | Refreshing, AccessRejected | RefreshRequested) => Some(Refreshing),
            (Refreshing, RefreshSucceeded) => Some(Authenticated),
            (Refreshing, RefreshFailed) => Some(Anonymous),
            (_, SignedOut) => Some(Anonymous),
            _ => None,
        }
    }

    pub fn is_authenticated(self) -> bool {
        !matches!(self, Self::Anonymous)
    }
}
