//! Operator command line for minting video services API tokens
//!
//! Collects the signing fields from flags (optionally filled from the field
//! store), applies scope toggles against the catalog, and prints the token.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod run;

pub use cli::Cli;
pub use config::{FieldStore, Fields};
pub use error::{CliError, CliResult};
pub use run::{DEFAULT_ALGORITHM, run};
