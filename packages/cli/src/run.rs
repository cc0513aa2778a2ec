//! Command execution

use crate::cli::Cli;
use crate::config::FieldStore;
use crate::error::{CliError, CliResult};
use log::{debug, warn};
use std::io::Write;
use uplynk_jwt::{Jwt, ScopeCatalog, ScopeSet};

/// Algorithm used when neither the flags nor the store name one
pub const DEFAULT_ALGORITHM: &str = "ES256";

/// Run one invocation, writing the token (or the catalog) to `out`.
///
/// # Errors
/// Returns `CliError` for store failures, unknown scopes, and any signing
/// pipeline rejection. Nothing is written to `out` on failure.
pub async fn run<W: Write>(cli: Cli, out: &mut W) -> CliResult<()> {
    if cli.list_scopes {
        for scope in ScopeCatalog::all() {
            writeln!(out, "{scope}")?;
        }
        return Ok(());
    }

    let scopes = collect_scopes(&cli.scopes, cli.allow_unknown_scope)?;
    let supplied = cli.fields();

    let fields = if cli.load {
        supplied.clone().or(field_store(&cli)?.load()?)
    } else {
        supplied.clone()
    };
    if !cli.no_save && !supplied.is_empty() {
        let store = field_store(&cli)?;
        store.record(&supplied)?;
        debug!("Saved fields to {}", store.path().display());
    }

    let token = Jwt::builder()
        .with_subject(fields.sub.as_deref().unwrap_or_default())
        .with_key_id(fields.kid.as_deref().unwrap_or_default())
        .with_encoded_key(fields.key.as_deref().unwrap_or_default())
        .with_algorithm(fields.alg.as_deref().unwrap_or(DEFAULT_ALGORITHM))
        .with_scopes(scopes)
        .with_expiration(fields.exp.as_deref().unwrap_or_default())
        .sign()
        .await?;

    writeln!(out, "{token}")?;
    Ok(())
}

fn field_store(cli: &Cli) -> CliResult<FieldStore> {
    match &cli.store {
        Some(path) => Ok(FieldStore::at(path)),
        None => FieldStore::default_location(),
    }
}

/// Apply `--scope` toggles in order
fn collect_scopes(toggles: &[String], allow_unknown: bool) -> CliResult<ScopeSet> {
    let mut scopes = ScopeSet::new();
    for scope in toggles {
        if !ScopeCatalog::is_known(scope) {
            if !allow_unknown {
                return Err(CliError::UnknownScope(scope.clone()));
            }
            warn!("Scope {scope} is not in the catalog");
        }
        scopes.toggle(scope.as_str());
    }
    Ok(scopes)
}
