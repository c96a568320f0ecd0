//! Claimgate CLI: the `claimgate` command.

mod cli;
mod commands;
mod support;

use clap::Parser;
use cli::{Cli, Commands, TokenCommands};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            timeline,
            viewer,
            ledger,
            payout,
            submit,
            json,
        } => commands::resolve::run(commands::resolve::Args {
            timeline,
            viewer,
            ledger,
            payout,
            submit,
            json,
        }),

        Commands::Extract {
            path,
            owner,
            repo,
            json,
        } => commands::extract::run(path, owner, repo, json),

        Commands::ClaimantId {
            claimant,
            asset,
            json,
        } => commands::claimant_id::run(claimant, asset, json),

        Commands::Token { command } => match command {
            TokenCommands::Sign {
                token,
                secret,
                json,
            } => commands::token::run_sign(token, secret, json),
            TokenCommands::Verify {
                signed,
                secret,
                json,
            } => commands::token::run_verify(signed, secret, json),
        },
    }
}
