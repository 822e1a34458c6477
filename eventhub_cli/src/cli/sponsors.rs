use clap::{Args, Subcommand};
use eventhub_core::{EventId, SponsorDraft, SponsorId, SponsorTierId, SponsorshipDraft};

use crate::cli::{
    common::{connect, explain, require_login},
    root::GlobalOpts,
    view,
};

#[derive(Debug, Args)]
pub(crate) struct SponsorsCommand {
    #[command(subcommand)]
    subcmd: SponsorsSubcommand,
}

#[derive(Debug, Subcommand)]
enum SponsorsSubcommand {
    /// List sponsors.
    List {
        #[arg(long, short)]
        search: Option<String>,
    },

    /// Add a sponsor.
    Create(CreateSponsorCommand),

    /// List sponsorships, optionally for one event.
    Sponsorships {
        #[arg(long)]
        event: Option<EventId>,
    },

    /// Attach a sponsor to an event.
    Sponsor(SponsorEventCommand),
}

#[derive(Debug, Args)]
struct CreateSponsorCommand {
    #[arg(long)]
    name: String,

    #[arg(long)]
    description: String,

    #[arg(long, default_value = "")]
    industry: String,

    #[arg(long)]
    contact_person: String,

    #[arg(long)]
    contact_email: String,

    #[arg(long)]
    contact_phone: String,

    #[arg(long)]
    tier: Option<SponsorTierId>,

    #[arg(long, default_value = "")]
    website: String,
}

#[derive(Debug, Args)]
struct SponsorEventCommand {
    #[arg(long)]
    sponsor: SponsorId,

    #[arg(long)]
    event: EventId,

    #[arg(long)]
    tier: SponsorTierId,

    /// Decimal amount, e.g. 2500.00.
    #[arg(long)]
    amount: String,
}

impl SponsorsCommand {
    pub(crate) async fn run(&self, globals: &GlobalOpts) -> anyhow::Result<()> {
        let client = connect(globals)?;
        let sponsors = client.sponsors();

        match &self.subcmd {
            SponsorsSubcommand::List { search } => {
                let page = sponsors.list(search.as_deref()).await.map_err(explain)?;
                view::print_sponsors(&page);
            }
            SponsorsSubcommand::Create(cmd) => {
                require_login(&client)?;
                let draft = SponsorDraft {
                    name: cmd.name.clone(),
                    description: cmd.description.clone(),
                    industry: cmd.industry.clone(),
                    contact_person: cmd.contact_person.clone(),
                    contact_email: cmd.contact_email.clone(),
                    contact_phone: cmd.contact_phone.clone(),
                    tier: cmd.tier,
                    website: cmd.website.clone(),
                };
                let sponsor = sponsors.create(&draft).await.map_err(explain)?;
                println!("Created sponsor #{} {}.", sponsor.id, sponsor.name);
            }
            SponsorsSubcommand::Sponsorships { event } => {
                let page = sponsors.sponsorships(*event).await.map_err(explain)?;
                view::print_sponsorships(&page);
            }
            SponsorsSubcommand::Sponsor(cmd) => {
                require_login(&client)?;
                let draft = SponsorshipDraft {
                    sponsor: cmd.sponsor,
                    event: cmd.event,
                    tier: cmd.tier,
                    contribution_amount: cmd.amount.trim().to_owned(),
                };
                let sponsorship = sponsors
                    .create_sponsorship(&draft)
                    .await
                    .map_err(explain)?;
                println!("Created sponsorship #{}.", sponsorship.id);
            }
        }
        Ok(())
    }
}
