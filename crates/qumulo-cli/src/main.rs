//! `qumulo-cli` — log in to a Qumulo appliance and manage the session.

mod cred_store;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use qumulo_sdk::{ConnectionInfo, RestClient, Scheme, DEFAULT_PORT};
use serde::Serialize;
use tracing::{debug, info};

use crate::cred_store::SavedSession;

#[derive(Parser, Debug)]
#[command(name = "qumulo-cli")]
#[command(author, version, about = "Qumulo appliance session client", long_about = None)]
pub struct Cli {
    /// Appliance host name or address
    #[arg(long, env = "QUMULO_HOST", default_value = "localhost")]
    pub host: String,

    /// REST API port
    #[arg(long, env = "QUMULO_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Connect and read timeout, in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Use plain HTTP instead of HTTPS
    #[arg(long)]
    pub http: bool,

    /// Reject self-signed TLS certificates
    #[arg(long)]
    pub verify_certificates: bool,

    /// Where the session is stored (default: ~/.qfsd_cred)
    #[arg(long, env = "QUMULO_CREDENTIALS_FILE")]
    pub credentials_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Log in and save the session
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "QUMULO_PASSWORD")]
        password: String,
    },
    /// Change the password of the logged-in user
    ChangePassword {
        #[arg(long)]
        old_password: String,
        #[arg(long)]
        new_password: String,
    },
    /// Show the logged-in user
    WhoAmI,
    /// Show the appliance software version
    Version,
    /// Forget the saved session
    Logout,
}

impl Cli {
    fn connection_info(&self) -> ConnectionInfo {
        let scheme = if self.http { Scheme::Http } else { Scheme::Https };
        let mut info = ConnectionInfo::new(&self.host, self.port)
            .with_scheme(scheme)
            .verify_certificates(self.verify_certificates);
        if let Some(secs) = self.timeout {
            info = info.with_timeout(Duration::from_secs(secs));
        }
        info
    }

    fn credentials_path(&self) -> Result<PathBuf> {
        match &self.credentials_file {
            Some(path) => Ok(path.clone()),
            None => cred_store::default_path().context("cannot determine home directory"),
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let path = cli.credentials_path()?;
    let mut client = RestClient::connect(cli.connection_info())?;

    if let Some(session) = cred_store::load(&path)? {
        if session.belongs_to(&cli.host, cli.port) {
            client.set_credentials(session.credentials);
        } else {
            debug!(saved_host = %session.host, "saved session is for another appliance");
        }
    }

    match cli.command {
        Commands::Login { username, password } => {
            let credentials = client.login(&username, &password).await?.clone();
            cred_store::save(
                &path,
                &SavedSession {
                    host: cli.host.clone(),
                    port: cli.port,
                    credentials,
                },
            )?;
            info!(%username, path = %path.display(), "session saved");
        }
        Commands::ChangePassword {
            old_password,
            new_password,
        } => {
            client
                .auth()
                .change_password(&old_password, &new_password)
                .await?;
            println!("password changed");
        }
        Commands::WhoAmI => print_json(&client.auth().who_am_i().await?.data)?,
        Commands::Version => print_json(&client.version().version().await?.data)?,
        Commands::Logout => {
            if cred_store::remove(&path)? {
                info!(path = %path.display(), "session removed");
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Structured logging (controlled via RUST_LOG env var).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse()).await
}
