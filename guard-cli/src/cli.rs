use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use guard::RefresherConfig;

#[derive(Parser)]
#[command(name = "guard")]
#[command(about = "Exchange OAuth2 tokens and bootstrap the guard CA")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding certificates (defaults to ~/.guard/pki)
    #[arg(long, global = true, env = "GUARD_PKI_DIR")]
    pub pki_dir: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace with curl commands)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize PKI material
    Init(InitArgs),
    /// Request a token from an identity provider
    Token(TokenArgs),
}

#[derive(Args)]
pub struct InitArgs {
    #[command(subcommand)]
    pub command: InitCommands,
}

#[derive(Subcommand)]
pub enum InitCommands {
    /// Create a self-signed certificate authority
    Ca,
}

#[derive(Args)]
pub struct TokenArgs {
    #[command(subcommand)]
    pub command: TokenCommands,
}

#[derive(Subcommand)]
pub enum TokenCommands {
    /// client_credentials grant
    ClientCredential(ProviderArgs),
    /// On-Behalf-Of exchange of a caller's token
    Obo(OboArgs),
}

#[derive(Args, Debug)]
pub struct ProviderArgs {
    /// Application (client) ID
    #[arg(long, env = "GUARD_CLIENT_ID")]
    pub client_id: String,

    /// Client secret
    #[arg(long, env = "GUARD_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: String,

    /// Token endpoint URL; takes precedence over --tenant
    #[arg(long, env = "GUARD_LOGIN_URL")]
    pub login_url: Option<String>,

    /// Azure AD tenant; derives the login URL and Graph scope
    #[arg(long, env = "AZURE_TENANT_ID")]
    pub tenant: Option<String>,

    /// Requested scope
    #[arg(long, env = "GUARD_SCOPE")]
    pub scope: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,
}

#[derive(Args, Debug)]
pub struct OboArgs {
    #[command(flatten)]
    pub provider: ProviderArgs,

    /// Caller's access token to exchange
    #[arg(long, env = "GUARD_INPUT_TOKEN", hide_env_values = true)]
    pub token: String,
}

impl ProviderArgs {
    /// Resolve into a refresher config.
    pub fn config(&self) -> Result<RefresherConfig> {
        let mut config = match (&self.login_url, &self.tenant) {
            (Some(url), _) => RefresherConfig::new(&self.client_id, &self.client_secret, url),
            (None, Some(tenant)) => {
                RefresherConfig::azure(tenant, &self.client_id, &self.client_secret)
            }
            (None, None) => bail!("either --login-url or --tenant is required"),
        };
        if let Some(scope) = &self.scope {
            config = config.with_scope(scope);
        }
        if let Some(secs) = self.timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}

/// Default PKI directory under the user's home.
pub fn default_pki_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home.join(".guard").join("pki"))
}

impl Cli {
    pub fn pki_dir(&self) -> Result<PathBuf> {
        match &self.pki_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_pki_dir(),
        }
    }
}
