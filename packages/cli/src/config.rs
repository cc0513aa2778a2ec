//! Persisted form fields
//!
//! The last value entered for each field is kept as JSON under the OS config
//! directory so repeated invocations only need to name what changed.

use crate::error::{CliError, CliResult};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const APP_DIR: &str = "uplynk-jwt";
const STORE_FILE: &str = "fields.json";

/// Form fields, keyed the way they are persisted (`sub`, `kid`, `key`, `alg`, `exp`)
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fields {
    /// Subject
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Key id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    /// Base64-encoded PKCS#8 private key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Algorithm tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
    /// Expiration expression
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<String>,
}

impl Fields {
    /// Take each field from `self`, falling back to `fallback` where unset
    #[must_use]
    pub fn or(self, fallback: Fields) -> Fields {
        Fields {
            sub: self.sub.or(fallback.sub),
            kid: self.kid.or(fallback.kid),
            key: self.key.or(fallback.key),
            alg: self.alg.or(fallback.alg),
            exp: self.exp.or(fallback.exp),
        }
    }

    /// Whether no field is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Fields::default()
    }
}

impl std::fmt::Debug for Fields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fields")
            .field("sub", &self.sub)
            .field("kid", &self.kid)
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("alg", &self.alg)
            .field("exp", &self.exp)
            .finish()
    }
}

/// JSON file holding the last-entered [`Fields`]
#[derive(Debug, Clone)]
pub struct FieldStore {
    path: PathBuf,
}

impl FieldStore {
    /// Store at an explicit path
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the OS config directory
    ///
    /// # Errors
    /// Returns `NoConfigDir` if the platform has no config directory.
    pub fn default_location() -> CliResult<Self> {
        let mut path = dirs::config_dir().ok_or(CliError::NoConfigDir)?;
        path.push(APP_DIR);
        path.push(STORE_FILE);
        Ok(Self::at(path))
    }

    /// File backing this store
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored fields; a missing file reads as empty.
    ///
    /// # Errors
    /// Returns `Store` on I/O failure and `CorruptStore` if the file is not
    /// valid JSON.
    pub fn load(&self) -> CliResult<Fields> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Fields::default()),
            Err(source) => return Err(self.io_error(source)),
        };
        serde_json::from_slice(&bytes).map_err(|source| CliError::CorruptStore {
            path: self.path.clone(),
            source,
        })
    }

    /// Write `fields`, creating the directory owner-only if needed.
    ///
    /// The file is replaced atomically: the JSON goes to an owner-only temp
    /// file beside the store, which is then renamed over it.
    ///
    /// # Errors
    /// Returns `Store` if the directory or file cannot be written.
    pub fn save(&self, fields: &Fields) -> CliResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                create_private_dir(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let json = serde_json::to_vec_pretty(fields)?;
        let temp_path = self.path.with_extension(format!("tmp.{}", Uuid::new_v4()));
        let written = write_private_file(&temp_path, &json)
            .and_then(|()| std::fs::rename(&temp_path, &self.path));
        if let Err(e) = written {
            // Clean up temp file on failure
            let _ = std::fs::remove_file(&temp_path);
            return Err(self.io_error(e));
        }

        debug!("saved fields to {}", self.path.display());
        Ok(())
    }

    /// Merge `changed` over the stored fields and write the result back
    ///
    /// # Errors
    /// As for [`FieldStore::load`] and [`FieldStore::save`].
    pub fn record(&self, changed: &Fields) -> CliResult<Fields> {
        let merged = changed.clone().or(self.load()?);
        self.save(&merged)?;
        Ok(merged)
    }

    fn io_error(&self, source: std::io::Error) -> CliError {
        CliError::Store {
            path: self.path.clone(),
            source,
        }
    }
}

/// Create `path` with a fresh file that only the owner can read (the key
/// field is sensitive). Fails if `path` already exists.
fn write_private_file(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.create_new(true).write(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600); // Owner read/write only
    }

    let mut file = options.open(path)?;
    file.write_all(data)?;
    file.sync_all()
}

fn create_private_dir(path: &Path) -> std::io::Result<()> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder.create(path)
}
