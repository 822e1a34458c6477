use clap::{Args, Subcommand};
use eventhub_client::AuthState;
use eventhub_core::{LoginForm, ProfileUpdate, RegistrationForm};

use crate::cli::{
    common::{connect, explain, explain_sign_in, require_login, resolve_secret},
    root::GlobalOpts,
    view::print_profile,
};

#[derive(Debug, Args)]
pub(crate) struct AuthCommand {
    #[command(subcommand)]
    subcmd: AuthSubcommand,
}

#[derive(Debug, Subcommand)]
enum AuthSubcommand {
    /// Sign in and store the session in the keyring.
    Login(LoginCommand),

    /// Create an account and sign in with it.
    Register(RegisterCommand),

    /// Show the stored session.
    Status(StatusCommand),

    /// Fetch the signed-in user's profile from the server.
    Whoami,

    /// Update first name, last name, email or password.
    Profile(ProfileCommand),

    /// Exchange the refresh token for a new access token now.
    Refresh,

    /// Remove the stored session.
    Logout,
}

impl AuthCommand {
    pub(crate) async fn run(&self, globals: &GlobalOpts) -> anyhow::Result<()> {
        match &self.subcmd {
            AuthSubcommand::Login(cmd) => cmd.run(globals).await,
            AuthSubcommand::Register(cmd) => cmd.run(globals).await,
            AuthSubcommand::Status(cmd) => cmd.run(globals).await,
            AuthSubcommand::Whoami => whoami(globals).await,
            AuthSubcommand::Profile(cmd) => cmd.run(globals).await,
            AuthSubcommand::Refresh => refresh(globals).await,
            AuthSubcommand::Logout => logout(globals),
        }
    }
}

#[derive(Debug, Args)]
struct LoginCommand {
    #[arg(long, short)]
    username: String,

    /// Read from EVENTHUB_PASSWORD or stdin when omitted.
    #[arg(long)]
    password: Option<String>,
}

impl LoginCommand {
    async fn run(&self, globals: &GlobalOpts) -> anyhow::Result<()> {
        let client = connect(globals)?;
        let password = resolve_secret(self.password.as_deref(), "Password")?;
        let form = LoginForm::new(self.username.as_str(), password);

        match client.auth().login(&form).await.map_err(explain_sign_in)? {
            Some(profile) => {
                println!("Signed in.");
                print_profile(&profile);
            }
            None => println!("Signed in as {}.", self.username.trim()),
        }
        Ok(())
    }
}

#[derive(Debug, Args)]
struct RegisterCommand {
    #[arg(long)]
    username: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    first_name: String,

    #[arg(long)]
    last_name: String,

    /// Read from EVENTHUB_PASSWORD or stdin when omitted.
    #[arg(long)]
    password: Option<String>,
}

impl RegisterCommand {
    async fn run(&self, globals: &GlobalOpts) -> anyhow::Result<()> {
        let client = connect(globals)?;
        let password = resolve_secret(self.password.as_deref(), "Password")?;
        let password_confirm = match &self.password {
            Some(password) => password.clone(),
            None => resolve_secret(None, "Confirm password")?,
        };

        let form = RegistrationForm {
            username: self.username.clone(),
            email: self.email.clone(),
            password,
            password_confirm,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        };
        let registration = client.auth().register(&form).await.map_err(explain_sign_in)?;

        println!(
            "{}",
            registration
                .message
                .as_deref()
                .unwrap_or("Account created.")
        );
        print_profile(&registration.user);
        Ok(())
    }
}

#[derive(Debug, Args)]
struct StatusCommand {
    /// Also ask the server whether the access token is still accepted.
    #[arg(long)]
    verify: bool,
}

impl StatusCommand {
    async fn run(&self, globals: &GlobalOpts) -> anyhow::Result<()> {
        let client = connect(globals)?;
        let state = client.auth_state();
        println!("Server: {}", client.config().base_url);
        println!(
            "Session: {}",
            match state {
                AuthState::Anonymous => "signed out",
                AuthState::Authenticated => "signed in",
                AuthState::Refreshing => "refreshing",
            }
        );
        if let Some(profile) = client.auth().cached_profile() {
            print_profile(&profile);
        }

        if self.verify && state.is_authenticated() {
            let accepted = client.auth().verify_token().await.map_err(explain)?;
            println!(
                "Access token: {}",
                if accepted { "accepted" } else { "expired, will refresh on next request" }
            );
        }
        Ok(())
    }
}

async fn whoami(globals: &GlobalOpts) -> anyhow::Result<()> {
    let client = connect(globals)?;
    require_login(&client)?;
    let profile = client.auth().current_user().await.map_err(explain)?;
    print_profile(&profile);
    Ok(())
}

#[derive(Debug, Args)]
struct ProfileCommand {
    #[arg(long)]
    first_name: Option<String>,

    #[arg(long)]
    last_name: Option<String>,

    #[arg(long)]
    email: Option<String>,

    /// Prompt for a new password.
    #[arg(long)]
    change_password: bool,
}

impl ProfileCommand {
    async fn run(&self, globals: &GlobalOpts) -> anyhow::Result<()> {
        let client = connect(globals)?;
        require_login(&client)?;

        let password = if self.change_password {
            Some(resolve_secret(None, "New password")?)
        } else {
            None
        };
        let update = ProfileUpdate {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            password,
        };
        let profile = client
            .auth()
            .update_profile(&update)
            .await
            .map_err(explain)?;

        println!("Profile updated.");
        print_profile(&profile);
        Ok(())
    }
}

async fn refresh(globals: &GlobalOpts) -> anyhow::Result<()> {
    let client = connect(globals)?;
    client.refresh_session().await.map_err(explain)?;
    println!("Access token refreshed.");
    Ok(())
}

fn logout(globals: &GlobalOpts) -> anyhow::Result<()> {
    let client = connect(globals)?;
    client.auth().logout().map_err(explain)?;
    println!("Signed out.");
    Ok(())
}
