use clap::{Args, Subcommand};
use eventhub_core::{AttendeeId, AttendeeRegistration, CheckInForm, EventId, TicketCode};

use crate::cli::{
    common::{connect, explain, require_login},
    root::GlobalOpts,
    view,
};

#[derive(Debug, Args)]
pub(crate) struct AttendeesCommand {
    #[command(subcommand)]
    subcmd: AttendeesSubcommand,
}

#[derive(Debug, Subcommand)]
enum AttendeesSubcommand {
    /// Register someone for an event.
    Register(RegisterCommand),

    /// Your event registrations.
    Mine {
        /// Only events that have not started yet.
        #[arg(long)]
        upcoming: bool,
    },

    /// Check an attendee in at the door.
    Checkin(CheckInCommand),
}

#[derive(Debug, Args)]
struct RegisterCommand {
    event: EventId,

    #[arg(long)]
    first_name: String,

    #[arg(long)]
    last_name: String,

    #[arg(long)]
    email: String,

    #[arg(long, default_value = "")]
    phone: String,

    #[arg(long, default_value = "")]
    company: String,

    #[arg(long, default_value = "")]
    dietary_restrictions: String,
}

#[derive(Debug, Args)]
struct CheckInCommand {
    #[arg(long, required_unless_present = "ticket_code", conflicts_with = "ticket_code")]
    attendee: Option<AttendeeId>,

    #[arg(long)]
    ticket_code: Option<TicketCode>,

    #[arg(long)]
    location: Option<String>,

    #[arg(long)]
    notes: Option<String>,
}

impl AttendeesCommand {
    pub(crate) async fn run(&self, globals: &GlobalOpts) -> anyhow::Result<()> {
        let client = connect(globals)?;
        require_login(&client)?;
        let attendees = client.attendees();

        match &self.subcmd {
            AttendeesSubcommand::Register(cmd) => {
                let registration = AttendeeRegistration {
                    event: Some(cmd.event),
                    first_name: cmd.first_name.clone(),
                    last_name: cmd.last_name.clone(),
                    email: cmd.email.clone(),
                    phone: cmd.phone.clone(),
                    company: cmd.company.clone(),
                    dietary_restrictions: cmd.dietary_restrictions.clone(),
                };
                let attendee = attendees.register(&registration).await.map_err(explain)?;
                println!(
                    "Registered {} as attendee #{}.",
                    attendee.full_name, attendee.id
                );
            }
            AttendeesSubcommand::Mine { upcoming } => {
                let page = attendees.mine(*upcoming).await.map_err(explain)?;
                view::print_attendees(&page);
            }
            AttendeesSubcommand::Checkin(cmd) => {
                let form = CheckInForm {
                    attendee_id: cmd.attendee,
                    ticket_code: cmd.ticket_code,
                    location: cmd.location.clone(),
                    notes: cmd.notes.clone(),
                };
                let receipt = attendees.check_in(&form).await.map_err(explain)?;
                println!(
                    "{}",
                    receipt
                        .message
                        .unwrap_or_else(|| format!("{} checked in.", receipt.attendee.full_name))
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::AttendeesCommand;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        attendees: AttendeesCommand,
    }

    #[test]
    fn checkin_needs_exactly_one_identifier() {
        assert!(Harness::try_parse_from(["attendees", "checkin"]).is_err());
        assert!(
            Harness::try_parse_from([
                "attendees",
                "checkin",
                "--attendee",
                "4",
                "--ticket-code",
                "5f0c1f5e-8a47-4a61-9d55-3c1f0c1a2b3c",
            ])
            .is_err()
        );
        assert!(Harness::try_parse_from(["attendees", "checkin", "--attendee", "4"]).is_ok());
    }
}
