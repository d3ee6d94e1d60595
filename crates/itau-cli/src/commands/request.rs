//! Request command implementation.

use std::fs;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use itau_core::{Body, Method};

use super::ConnectionArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct RequestArgs {
    /// HTTP method (GET, POST, PUT, DELETE)
    pub method: String,

    /// Path relative to the API URL, or an absolute URL under it
    pub path: String,

    /// Request body: inline JSON, or @file to read it from disk
    #[arg(long, short)]
    pub data: Option<String>,

    /// Pretty-print the response
    #[arg(long)]
    pub pretty: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

pub async fn run(args: RequestArgs) -> Result<()> {
    let method: Method = args.method.parse().context("Invalid method")?;
    let body = args.data.as_deref().map(read_body).transpose()?;

    let client = args.connection.connect().await?;
    tracing::debug!(%method, path = %args.path, "Sending request");
    let response = client
        .send(&args.path, method, body)
        .await
        .with_context(|| format!("{} {} failed", method, args.path))?;

    if args.pretty {
        output::json_pretty(&response)
    } else {
        output::json(&response)
    }
}

/// Inline JSON is sent as JSON; anything that does not parse is sent as-is.
fn read_body(data: &str) -> Result<Body> {
    let text = match data.strip_prefix('@') {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read body file {}", path))?
        }
        None => data.to_string(),
    };

    Ok(match serde_json::from_str::<Value>(&text) {
        Ok(value) => Body::Json(value),
        Err(_) => Body::Raw(text),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn inline_json_body() {
        assert_eq!(
            read_body(r#"{"valor":"1.00"}"#).unwrap(),
            Body::Json(json!({"valor": "1.00"}))
        );
    }

    #[test]
    fn non_json_body_is_raw() {
        assert_eq!(read_body("plain").unwrap(), Body::Raw("plain".to_string()));
    }

    #[test]
    fn body_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"chave":"abc"}}"#).unwrap();
        let arg = format!("@{}", file.path().display());

        assert_eq!(read_body(&arg).unwrap(), Body::Json(json!({"chave": "abc"})));
    }
}
