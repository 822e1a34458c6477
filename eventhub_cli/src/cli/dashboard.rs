use clap::Args;
use eventhub_client::ClientError;
use eventhub_core::{Timestamp, TicketQuery};

use crate::cli::{
    common::{connect, require_login},
    root::GlobalOpts,
    view,
};

#[derive(Debug, Args)]
pub(crate) struct DashboardCommand {
    /// Number of rows shown per panel.
    #[arg(long, default_value_t = 5)]
    limit: usize,
}

impl DashboardCommand {
    pub(crate) async fn run(&self, globals: &GlobalOpts) -> anyhow::Result<()> {
        let client = connect(globals)?;
        require_login(&client)?;

        let ticket_query = TicketQuery::default();
        let auth = client.auth();
        let events = client.events();
        let tickets = client.tickets();
        let (profile, my_events, my_tickets) = tokio::join!(
            auth.current_user(),
            events.mine(),
            tickets.mine(&ticket_query),
        );

        let mut failures = 0;

        println!("== Profile");
        match profile {
            Ok(profile) => view::print_profile(&profile),
            Err(err) => failures += panel_error(&err),
        }

        println!();
        println!("== My events");
        match my_events {
            Ok(page) if page.is_empty() => println!("No events yet."),
            Ok(page) => {
                let now = Timestamp::now();
                for event in page.results.iter().take(self.limit) {
                    println!("{}", view::event_row(event, now));
                }
                println!("{}", view::page_footer(&page));
            }
            Err(err) => failures += panel_error(&err),
        }

        println!();
        println!("== My tickets");
        match my_tickets {
            Ok(page) if page.is_empty() => println!("No tickets yet."),
            Ok(page) => {
                for ticket in page.results.iter().take(self.limit) {
                    println!("{}", view::ticket_row(ticket));
                }
                println!("{}", view::page_footer(&page));
            }
            Err(err) => failures += panel_error(&err),
        }

        if failures == 3 {
            anyhow::bail!("dashboard could not load any panel");
        }
        Ok(())
    }
}

fn panel_error(err: &ClientError) -> u32 {
    log::debug!("dashboard panel failed: {}", err.display_chain());
    println!("  unavailable: {}", err.user_message());
    if err.requires_login() {
        println!("  Run `eventhub auth login` to sign in again.");
    }
    1
}
