//! Command line definition

use crate::config::Fields;
use clap::Parser;
use std::path::PathBuf;

/// Command line arguments
#[derive(Parser)]
#[command(name = "uplynk-jwt")]
#[command(version, about = "Mint signed tokens for the video services API")]
pub struct Cli {
    /// Subject (`sub` claim), usually the owner GUID
    #[arg(long)]
    pub sub: Option<String>,

    /// Key id (`kid` header)
    #[arg(long)]
    pub kid: Option<String>,

    /// Base64-encoded PKCS#8 private key (PEM or DER)
    #[arg(long, env = "UPLYNK_JWT_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// Signing algorithm [default: ES256]
    #[arg(long)]
    pub alg: Option<String>,

    /// Expiration such as `3m`, `2 hours` or an RFC 3339 instant.
    /// Omit for a token that never expires.
    #[arg(long)]
    pub exp: Option<String>,

    /// Toggle a scope; repeat to select several, repeating one deselects it
    #[arg(long = "scope", value_name = "SCOPE")]
    pub scopes: Vec<String>,

    /// Accept scopes that are not in the catalog
    #[arg(long)]
    pub allow_unknown_scope: bool,

    /// Print the scope catalog and exit
    #[arg(long)]
    pub list_scopes: bool,

    /// Fill fields not given on the command line from the field store
    #[arg(long)]
    pub load: bool,

    /// Do not write the given fields to the field store
    #[arg(long)]
    pub no_save: bool,

    /// Field store location (default: <config dir>/uplynk-jwt/fields.json)
    #[arg(long, env = "UPLYNK_JWT_STORE")]
    pub store: Option<PathBuf>,
}

impl Cli {
    /// Fields given on the command line
    #[must_use]
    pub fn fields(&self) -> Fields {
        Fields {
            sub: self.sub.clone(),
            kid: self.kid.clone(),
            key: self.key.clone(),
            alg: self.alg.clone(),
            exp: self.exp.clone(),
        }
    }
}
