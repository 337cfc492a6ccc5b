use clap::Subcommand;

use crate::cli::host::PageHost;
use crate::cli::{utils, OutputFormat};

#[derive(Subcommand)]
pub enum PageCommands {
    #[command(about = "Load the page, running the silent session refresh")]
    Load,

    #[command(about = "List actions whose controls are present on the page")]
    Actions,
}

pub async fn handle(cmd: PageCommands, host: &PageHost, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        PageCommands::Load => {
            let page = host.load().await;
            utils::output_bootstrap(&output_format, &page)
        }
        PageCommands::Actions => {
            let page = host.load().await;
            utils::output_actions(&output_format, &page.controller.available_actions())
        }
    }
}
