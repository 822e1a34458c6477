use clap::Args;

use crate::cli::{
    common::{connect, explain},
    root::GlobalOpts,
    view::print_health,
};

#[derive(Debug, Args)]
pub(crate) struct HealthCommand {}

impl HealthCommand {
    pub(crate) async fn run(&self, globals: &GlobalOpts) -> anyhow::Result<()> {
        let client = connect(globals)?;
        let report = client.health().check().await.map_err(explain)?;
        print_health(&report);

        if !report.is_healthy() {
            anyhow::bail!("API reported status `{}`", report.status);
        }
        Ok(())
    }
}
