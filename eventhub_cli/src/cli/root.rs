use clap::{ArgAction, Args, Parser, Subcommand};

use crate::cli::{
    attendees::AttendeesCommand, auth::AuthCommand, dashboard::DashboardCommand,
    events::EventsCommand, health::HealthCommand, sponsors::SponsorsCommand,
    tickets::TicketsCommand,
};

pub(crate) fn get_args() -> CliOpts {
    CliOpts::parse()
}

#[derive(Debug, Parser)]
#[command(version = clap::crate_version!(), about = "Command line client for the EventHub API")]
pub(crate) struct CliOpts {
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    globals: GlobalOpts,

    #[command(subcommand)]
    subcmd: Command,
}

#[derive(Debug, Args)]
pub(crate) struct GlobalOpts {
    /// Keep the session in memory for this run instead of the system keyring.
    #[arg(long, global = true)]
    pub(crate) ephemeral: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in, sign out and inspect the stored session.
    Auth(AuthCommand),

    /// Browse and manage events.
    Events(EventsCommand),

    /// Buy, list and cancel tickets.
    Tickets(TicketsCommand),

    /// Event registrations and door check-in.
    Attendees(AttendeesCommand),

    /// Sponsors and event sponsorships.
    Sponsors(SponsorsCommand),

    /// Overview of your events, tickets and profile.
    Dashboard(DashboardCommand),

    /// Check API availability.
    Health(HealthCommand),
}

impl CliOpts {
    pub(crate) fn verbose(&self) -> u8 {
        self.verbose
    }

    pub(crate) async fn run(&self) -> anyhow::Result<()> {
        let globals = &self.globals;
        match &self.subcmd {
            Command::Auth(cmd) => cmd.run(globals).await,
            Command::Events(cmd) => cmd.run(globals).await,
            Command::Tickets(cmd) => cmd.run(globals).await,
            Command::Attendees(cmd) => cmd.run(globals).await,
            Command::Sponsors(cmd) => cmd.run(globals).await,
            Command::Dashboard(cmd) => cmd.run(globals).await,
            Command::Health(cmd) => cmd.run(globals).await,
        }
    }
}
