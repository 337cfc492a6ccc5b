use clap::Subcommand;

use crate::actions::{Action, LoginForm, RegisterForm};
use crate::cli::host::PageHost;
use crate::cli::terminal::read_password;
use crate::cli::OutputFormat;

use super::run_action;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Log in")]
    Login {
        #[arg(help = "Username")]
        username: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Register a new user and log in")]
    Register {
        #[arg(help = "Username")]
        username: String,
        #[arg(help = "Email")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
        #[arg(long, help = "Password confirmation (will prompt if not provided)")]
        confirm_password: Option<String>,
    },

    #[command(about = "Log out")]
    Logout,

    #[command(about = "Delete your account (asks for confirmation)")]
    Delete,
}

fn or_prompt(value: Option<String>, prompt: &str) -> anyhow::Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(read_password(prompt)?),
    }
}

pub async fn handle(cmd: AuthCommands, host: &PageHost, output_format: OutputFormat) -> anyhow::Result<()> {
    let action = match cmd {
        AuthCommands::Login { username, password } => {
            let password = or_prompt(password, "Password: ")?;
            Action::Login(LoginForm::new(username, password))
        }
        AuthCommands::Register {
            username,
            email,
            password,
            confirm_password,
        } => {
            let password = or_prompt(password, "Password: ")?;
            let confirm_password = or_prompt(confirm_password, "Confirm password: ")?;
            Action::Register(RegisterForm {
                username,
                email,
                password,
                confirm_password,
            })
        }
        AuthCommands::Logout => Action::Logout,
        AuthCommands::Delete => Action::DeleteAccount,
    };

    run_action(host, action, &output_format).await
}
