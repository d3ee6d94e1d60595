//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{request::RequestArgs, token::TokenArgs};

/// Itaú API CLI for exploring endpoints with client-credentials auth.
#[derive(Parser, Debug)]
#[command(name = "itau")]
#[command(author, version = env!("ITAU_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Obtain an access token with client credentials
    Token(TokenArgs),

    /// Perform one authenticated API request
    Request(RequestArgs),
}
