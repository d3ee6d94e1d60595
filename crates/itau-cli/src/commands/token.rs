//! Token command implementation.

use anyhow::Result;
use clap::Args;

use super::ConnectionArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct TokenArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Print the full access token instead of a redacted prefix
    #[arg(long)]
    pub show_token: bool,
}

pub async fn run(args: TokenArgs) -> Result<()> {
    let client = args.connection.connect().await?;
    let credential = client.credential();

    let Some(token) = credential.authorization_token() else {
        output::warning("Token endpoint returned no content; no token issued");
        return Ok(());
    };

    output::success("Authenticated");
    println!();
    output::field("Client", credential.client_id());
    output::field("Auth URL", credential.auth_url().as_str());

    if args.show_token {
        output::field("Token", token.as_str());
    } else {
        output::field("Token", &redact(token.as_str()));
    }

    if let Some(key) = credential.session_cache_key()
        && let Some(entry) = client.token_manager().cached(key).await
    {
        output::field("Session", key);
        output::field("Expires in", &format!("{}s", entry.expires_in()));
    }

    Ok(())
}

fn redact(token: &str) -> String {
    let prefix: String = token.chars().take(6).collect();
    format!("{}…", prefix)
}
