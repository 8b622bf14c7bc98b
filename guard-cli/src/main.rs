mod cli;
mod commands;
mod logging;
mod output;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use guard::GrantKind;

use cli::{Cli, Commands, InitCommands, TokenCommands};
use commands::init::CaOutcome;
use output::print_error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            print_error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    match &cli.command {
        Commands::Init(args) => match args.command {
            InitCommands::Ca => {
                let dir = cli.pki_dir()?;
                if commands::init::ca(&dir)? == CaOutcome::Declined {
                    return Ok(ExitCode::FAILURE);
                }
            }
        },
        Commands::Token(args) => match &args.command {
            TokenCommands::ClientCredential(provider) => {
                commands::token::exchange(GrantKind::ClientCredential, provider.config()?, "")
                    .await?;
            }
            TokenCommands::Obo(obo) => {
                commands::token::exchange(GrantKind::OnBehalfOf, obo.provider.config()?, &obo.token)
                    .await?;
            }
        },
    }
    Ok(ExitCode::SUCCESS)
}
