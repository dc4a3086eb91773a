use std::path::PathBuf;

use clap::Parser;
use igdb_fetch_core::Credentials;

const USAGE_HINT: &str =
    "Please run: igdb-fetch -k YOUR_CLIENT_ID -t YOUR_APP_ACCESS_TOKEN -n GAME_NAME";

/// Download IGDB metadata and artwork for PlayStation 4 / PlayStation VR games.
#[derive(Debug, Parser)]
#[command(name = "igdb-fetch", version)]
pub struct Cli {
    /// IGDB client id
    #[arg(short = 'k', value_name = "CLIENT_ID")]
    pub client_id: Option<String>,

    /// IGDB app access token
    #[arg(short = 't', value_name = "APP_ACCESS_TOKEN")]
    pub token: Option<String>,

    /// Game name to search for
    #[arg(short = 'n', value_name = "GAME_NAME")]
    pub name: Option<String>,

    /// Directory to create result directories in
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Configuration file to use instead of the default location
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// A complete set of required inputs.
#[derive(Debug, Clone)]
pub struct Request {
    pub credentials: Credentials,
    pub name: String,
}

impl Cli {
    /// The request, or the hint to print when an input is missing.
    pub fn request(&self) -> Result<Request, String> {
        let client_id = required(&self.client_id, "client id")?;
        let access_token = required(&self.token, "token")?;
        let name = required(&self.name, "game name")?;
        Ok(Request {
            credentials: Credentials {
                client_id,
                access_token,
            },
            name,
        })
    }
}

fn required(value: &Option<String>, what: &str) -> Result<String, String> {
    value
        .as_deref()
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| format!("No {what} provided. {USAGE_HINT}"))
}
