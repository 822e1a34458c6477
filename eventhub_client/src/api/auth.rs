use eventhub_core::{
    LoginForm, ProfileUpdate, ProfileUpdated, Registration, RegistrationForm, TokenPair,
    UserProfile, ValidationError,
};
use reqwest::Method;
use serde_json::json;

use super::decode;
use crate::{
    ApiClient, ClientError, ClientResult, RequestOptions, endpoints,
    session_store::{SessionKey, SessionStore},
    transport::HttpTransport,
};

pub struct AuthApi<'a, T, S> {
    client: &'a ApiClient<T, S>,
}

impl<T, S> ApiClient<T, S>
where
    T: HttpTransport,
    S: SessionStore,
{
    pub fn auth(&self) -> AuthApi<'_, T, S> {
        AuthApi { client: self }
    }
}

impl<T, S> AuthApi<'_, T, S>
where
    T: HttpTransport,
    S: SessionStore,
{
    /// Obtains a token pair and stores it. The profile is loaded afterwards
    /// on a best-effort basis; `None` means the sign-in still succeeded.
    /// A profile failure that cost the session is returned as an error.
    pub async fn login(&self, form: &LoginForm) -> ClientResult<Option<UserProfile>> {
        form.validate()?;

        let options = RequestOptions::new(Method::POST)
            .with_body(json!({
                "username": form.username.trim(),
                "password": form.password,
            }))
            .without_auth()
            .without_retry();
        let payload = self.client.request(endpoints::TOKEN_OBTAIN, options).await?;
        let tokens: TokenPair = decode(payload)?;
        self.client.establish_session(&tokens, None)?;
        log::info!("signed in as {}", form.username.trim());

        match self.current_user().await {
            Ok(profile) => Ok(Some(profile)),
            Err(err) if err.requires_login() || !self.client.is_authenticated() => {
                log::warn!("session lost while loading the profile: {:?}", err.display_chain());
                Err(err)
            }
            Err(err) => {
                log::warn!("signed in but the profile could not be loaded: {:?}", err.display_chain());
                Ok(None)
            }
        }
    }

    pub async fn register(&self, form: &RegistrationForm) -> ClientResult<Registration> {
        form.validate()?;

        let options = RequestOptions::new(Method::POST)
            .with_body(form.to_payload())
            .without_auth()
            .without_retry();
        let payload = self.client.request(endpoints::REGISTER, options).await?;
        let registration: Registration = decode(payload)?;
        self.client
            .establish_session(&registration.tokens, Some(&registration.user))?;
        log::info!("registered {}", registration.user.username);
        Ok(registration)
    }

    /// Local sign-out; the API keeps no server-side session to end.
    pub fn logout(&self) -> ClientResult<()> {
        self.client.sign_out()?;
        log::info!("signed out");
        Ok(())
    }

    pub async fn current_user(&self) -> ClientResult<UserProfile> {
        let payload = self
            .client
            .get(endpoints::CURRENT_USER, &Default::default())
            .await?;
        let profile: UserProfile = decode(payload)?;
        self.client.cache_profile(&profile)?;
        Ok(profile)
    }

    pub fn cached_profile(&self) -> Option<UserProfile> {
        let raw = self
            .client
            .session_store()
            .get(SessionKey::UserProfile)?;
        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(err) => {
                log::debug!("ignoring unreadable cached profile: {err}");
                None
            }
        }
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> ClientResult<UserProfile> {
        if update.is_empty() {
            return Err(ValidationError::new("profile", "nothing to update").into());
        }

        let payload = self.client.patch(endpoints::UPDATE_PROFILE, update).await?;
        let updated: ProfileUpdated = decode(payload)?;
        let mut profile = updated.user;
        if let Some(cached) = self.cached_profile().filter(|cached| cached.id == profile.id) {
            profile.is_staff = cached.is_staff;
            profile.date_joined = profile.date_joined.or(cached.date_joined);
        }
        self.client.cache_profile(&profile)?;
        Ok(profile)
    }

    /// Asks the server whether the stored access token is still accepted.
    pub async fn verify_token(&self) -> ClientResult<bool> {
        let token = self
            .client
            .session_store()
            .get(SessionKey::AccessToken)
            .ok_or(ClientError::MissingAccessToken)?;

        let options = RequestOptions::new(Method::POST)
            .with_body(json!({ "token": token }))
            .without_auth()
            .without_retry();
        match self.client.request(endpoints::TOKEN_VERIFY, options).await {
            Ok(_) => Ok(true),
            Err(ClientError::Unauthorized { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }
}
