use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "claimgate",
    about = "Claimgate: bounty withdrawal eligibility resolution and claim orchestration",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve withdrawal eligibility against a timeline and ledger snapshot
    Resolve {
        /// Path to the issue-timeline JSON
        #[arg(long)]
        timeline: String,

        /// Login of the authenticated caller
        #[arg(long)]
        viewer: String,

        /// Path to the ledger snapshot JSON
        #[arg(long)]
        ledger: String,

        /// Payout address for the claim
        #[arg(long)]
        payout: String,

        /// Also submit the claim against the snapshot ledger (dry run)
        #[arg(long)]
        submit: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract closing issue references and the tier marker from text
    Extract {
        /// Path to a text file (pull-request body or comment)
        path: String,

        /// Repository owner the references must resolve within
        #[arg(long)]
        owner: String,

        /// Repository name the references must resolve within
        #[arg(long)]
        repo: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Derive the deterministic claimant id for a claimant/asset pair
    ClaimantId {
        /// Claimant login
        claimant: String,

        /// Claimant asset (pull-request URL)
        asset: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sign and verify oauth tokens under a shared secret
    Token {
        #[command(subcommand)]
        command: TokenCommands,
    },
}

#[derive(Subcommand)]
pub enum TokenCommands {
    /// Produce a signed token
    Sign {
        /// Bare oauth token
        token: String,

        /// Shared signing secret
        #[arg(long)]
        secret: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Verify a signed token and print the bare token
    Verify {
        /// Signed token, with or without the `s:` prefix
        signed: String,

        /// Shared signing secret
        #[arg(long)]
        secret: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
