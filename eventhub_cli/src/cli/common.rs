use std::{
    env,
    io::{self, BufRead, Write},
    time::Duration,
};

use anyhow::Context;
use eventhub_client::{
    ApiClient, ClientConfig, ClientError, KeyringSessionStore, MemorySessionStore,
    ReqwestTransport, SessionStore,
};

use crate::cli::root::GlobalOpts;

pub(crate) type Client = ApiClient<ReqwestTransport, Box<dyn SessionStore + Send + Sync>>;

pub(crate) fn load_client_config() -> anyhow::Result<ClientConfig> {
    let defaults = ClientConfig::default();
    let timeout = match env::var("EVENTHUB_TIMEOUT_MS") {
        Ok(raw) => Duration::from_millis(
            raw.trim()
                .parse::<u64>()
                .with_context(|| format!("EVENTHUB_TIMEOUT_MS must be milliseconds, got `{raw}`"))?,
        ),
        Err(_) => defaults.timeout,
    };

    let config = ClientConfig {
        base_url: env::var("EVENTHUB_API_URL").unwrap_or(defaults.base_url),
        timeout,
        user_agent: env::var("EVENTHUB_USER_AGENT").unwrap_or(defaults.user_agent),
        keyring_service: env::var("EVENTHUB_KEYRING_SERVICE").unwrap_or(defaults.keyring_service),
    };
    config.validate()?;
    Ok(config)
}

pub(crate) fn connect(globals: &GlobalOpts) -> anyhow::Result<Client> {
    let config = load_client_config()?;
    let store: Box<dyn SessionStore + Send + Sync> = if globals.ephemeral {
        log::debug!("using an in-memory session");
        Box::new(MemorySessionStore::new())
    } else {
        Box::new(KeyringSessionStore::for_config(&config)?)
    };

    log::debug!("connecting to {}", config.base_url);
    ApiClient::with_store(config, store).context("failed to create EventHub client")
}

const SIGN_IN_HINT: &str = "Run `eventhub auth login` to sign in again.";

/// Prints the user-facing part of a client failure and hands the error back
/// for the top-level log.
pub(crate) fn explain(err: ClientError) -> anyhow::Error {
    report(err, false)
}

/// Like [`explain`], for the commands that are themselves signing in.
pub(crate) fn explain_sign_in(err: ClientError) -> anyhow::Error {
    report(err, true)
}

fn report(err: ClientError, signing_in: bool) -> anyhow::Error {
    log::debug!("{:?}", err.display_chain());
    eprintln!("{}", err.user_message());
    if let Some(hint) = sign_in_hint(&err, signing_in) {
        eprintln!("{hint}");
    }
    anyhow::Error::new(err)
}

fn sign_in_hint(err: &ClientError, signing_in: bool) -> Option<&'static str> {
    (!signing_in && err.requires_login()).then_some(SIGN_IN_HINT)
}

pub(crate) fn require_login(client: &Client) -> anyhow::Result<()> {
    if client.is_authenticated() {
        return Ok(());
    }
    Err(explain(ClientError::MissingAccessToken))
}

/// Falls back to `EVENTHUB_PASSWORD`, then to a line read from stdin.
pub(crate) fn resolve_secret(explicit: Option<&str>, prompt: &str) -> anyhow::Result<String> {
    if let Some(secret) = explicit {
        return Ok(secret.to_owned());
    }
    if let Ok(secret) = env::var("EVENTHUB_PASSWORD") {
        return Ok(secret);
    }

    eprint!("{prompt}: ");
    io::stderr().flush().context("failed to flush prompt")?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}
