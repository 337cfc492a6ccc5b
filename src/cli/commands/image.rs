use clap::Subcommand;

use crate::actions::Action;
use crate::cli::host::PageHost;
use crate::cli::OutputFormat;

use super::run_action;

#[derive(Subcommand)]
pub enum ImageCommands {
    #[command(about = "Generate an image from a prompt")]
    Create {
        #[arg(help = "Prompt describing the image")]
        prompt: String,
    },

    #[command(about = "Toggle the image between public and private")]
    Visibility,

    #[command(about = "Delete the image (asks for confirmation)")]
    Delete,

    #[command(about = "Like the image")]
    Like,

    #[command(about = "Remove your like from the image")]
    Unlike,
}

pub async fn handle(cmd: ImageCommands, host: &PageHost, output_format: OutputFormat) -> anyhow::Result<()> {
    let action = match cmd {
        ImageCommands::Create { prompt } => Action::CreateImage { prompt },
        ImageCommands::Visibility => Action::ToggleVisibility,
        ImageCommands::Delete => Action::DeleteImage,
        ImageCommands::Like => Action::PlaceLike,
        ImageCommands::Unlike => Action::RemoveLike,
    };

    run_action(host, action, &output_format).await
}
