use clap::{Args, Subcommand, ValueEnum};
use eventhub_core::{EventId, PurchaseForm, TicketId, TicketQuery, TicketStatus, TicketTypeId};

use crate::cli::{
    common::{connect, explain, require_login},
    root::GlobalOpts,
    view,
};

#[derive(Debug, Args)]
pub(crate) struct TicketsCommand {
    #[command(subcommand)]
    subcmd: TicketsSubcommand,
}

#[derive(Debug, Subcommand)]
enum TicketsSubcommand {
    /// Ticket types on sale for an event.
    Types { event: EventId },

    /// Buy tickets of one type.
    Buy(BuyCommand),

    /// Tickets you own.
    Mine {
        #[arg(long)]
        event: Option<EventId>,

        #[arg(long, value_enum)]
        status: Option<Status>,
    },

    /// Cancel a ticket.
    Cancel {
        id: TicketId,

        #[arg(long)]
        reason: Option<String>,
    },

    /// Check whether a discount code applies.
    VerifyDiscount {
        code: String,

        /// Ticket type the code would be applied to.
        #[arg(long = "type")]
        ticket_type: Option<TicketTypeId>,
    },
}

#[derive(Debug, Args)]
struct BuyCommand {
    #[arg(long = "type")]
    ticket_type: TicketTypeId,

    #[arg(long, default_value_t = 1)]
    quantity: u32,

    #[arg(long)]
    discount: Option<String>,

    #[arg(long, default_value = "credit_card")]
    payment: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Status {
    Reserved,
    Paid,
    Confirmed,
    Used,
    Cancelled,
    Refunded,
}

impl From<Status> for TicketStatus {
    fn from(status: Status) -> Self {
        match status {
            Status::Reserved => TicketStatus::Reserved,
            Status::Paid => TicketStatus::Paid,
            Status::Confirmed => TicketStatus::Confirmed,
            Status::Used => TicketStatus::Used,
            Status::Cancelled => TicketStatus::Cancelled,
            Status::Refunded => TicketStatus::Refunded,
        }
    }
}

impl TicketsCommand {
    pub(crate) async fn run(&self, globals: &GlobalOpts) -> anyhow::Result<()> {
        let client = connect(globals)?;
        let tickets = client.tickets();

        match &self.subcmd {
            TicketsSubcommand::Types { event } => {
                let page = tickets.types_for_event(*event).await.map_err(explain)?;
                view::print_ticket_types(&page);
            }
            TicketsSubcommand::Buy(cmd) => {
                require_login(&client)?;
                let form = PurchaseForm {
                    ticket_type_id: cmd.ticket_type,
                    quantity: cmd.quantity,
                    discount_code: cmd.discount.clone(),
                    payment_method: cmd.payment.clone(),
                };
                let receipt = tickets.purchase(&form).await.map_err(explain)?;
                if let Some(message) = &receipt.message {
                    println!("{message}");
                }
                for ticket in &receipt.tickets {
                    println!(
                        "#{:<5} {} | {}{}",
                        ticket.id,
                        ticket.ticket_code,
                        ticket.status.as_str(),
                        ticket
                            .final_price
                            .as_deref()
                            .map(|price| format!(" | {price}"))
                            .unwrap_or_default(),
                    );
                }
            }
            TicketsSubcommand::Mine { event, status } => {
                require_login(&client)?;
                let query = TicketQuery {
                    event: *event,
                    status: status.map(TicketStatus::from),
                };
                let page = tickets.mine(&query).await.map_err(explain)?;
                view::print_tickets(&page);
            }
            TicketsSubcommand::Cancel { id, reason } => {
                require_login(&client)?;
                let message = tickets
                    .cancel(*id, reason.as_deref())
                    .await
                    .map_err(explain)?;
                println!(
                    "{}",
                    message.unwrap_or_else(|| format!("Ticket #{id} cancelled."))
                );
            }
            TicketsSubcommand::VerifyDiscount { code, ticket_type } => {
                let check = tickets
                    .verify_discount(code, *ticket_type)
                    .await
                    .map_err(explain)?;
                match (check.valid, &check.discount) {
                    (true, Some(discount)) => {
                        println!("{} is valid: {}", discount.code, discount.describe());
                        if let Some(until) = discount.valid_until {
                            println!("Valid until {}", until.display_short());
                        }
                    }
                    (true, None) => println!("Code is valid."),
                    (false, _) => println!(
                        "Code is not valid: {}",
                        check.error.as_deref().unwrap_or("unknown code")
                    ),
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use eventhub_core::{TicketStatus, TicketTypeId};

    use super::{TicketsCommand, TicketsSubcommand};

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        tickets: TicketsCommand,
    }

    #[test]
    fn buy_defaults_to_one_card_payment() {
        let harness = Harness::try_parse_from(["tickets", "buy", "--type", "3"])
            .expect("arguments should parse");

        let TicketsSubcommand::Buy(buy) = &harness.tickets.subcmd else {
            panic!("expected buy subcommand");
        };
        assert_eq!(buy.ticket_type, TicketTypeId(3));
        assert_eq!(buy.quantity, 1);
        assert_eq!(buy.payment, "credit_card");
    }

    #[test]
    fn status_filter_maps_to_ticket_status() {
        let harness = Harness::try_parse_from(["tickets", "mine", "--status", "cancelled"])
            .expect("arguments should parse");

        let TicketsSubcommand::Mine { status, .. } = &harness.tickets.subcmd else {
            panic!("expected mine subcommand");
        };
        assert_eq!(status.map(TicketStatus::from), Some(TicketStatus::Cancelled));
    }
}
