//! Gem existence probing via `gem fetch`, with a name-keyed artifact cache.
//!
//! The raw fetch output is persisted to `gem-fetch-<name>` inside the
//! cache directory so repeated probes for the same name skip the external
//! command. The cache is an explicit object with a caller-chosen
//! directory; it is not authoritative truth, just memoization. Writes are
//! uncoordinated, so concurrent probes for the same name must be
//! serialized by the caller.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use gemorder_util::errors::{GemorderError, GemorderResult};
use gemorder_util::fs::ensure_dir;

use crate::client::{is_valid_name, GemClient};

/// Name-keyed store of raw `gem fetch` output.
#[derive(Debug, Clone)]
pub struct ProbeCache {
    dir: PathBuf,
}

impl ProbeCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the cache artifact for a gem name.
    pub fn artifact_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("gem-fetch-{name}"))
    }

    fn read(&self, name: &str) -> std::io::Result<String> {
        std::fs::read_to_string(self.artifact_path(name))
    }

    fn write(&self, name: &str, output: &str) -> std::io::Result<()> {
        ensure_dir(&self.dir)?;
        std::fs::write(self.artifact_path(name), output)
    }
}

/// Checks whether a name refers to a fetchable gem at all.
pub struct ExistenceProber {
    client: GemClient,
    cache: ProbeCache,
}

impl ExistenceProber {
    pub fn new(client: GemClient, cache: ProbeCache) -> Self {
        Self { client, cache }
    }

    /// Probe the registry for `name`.
    ///
    /// Names with path separators are rejected without any external call.
    /// Otherwise the cached fetch output is consulted, refreshed via
    /// `gem fetch` if absent, and scanned for an error marker; output
    /// free of `ERROR` confirms existence. Any failure along the way is
    /// logged and answered with `false`.
    pub fn probe(&self, name: &str) -> bool {
        if !is_valid_name(name) {
            info!(gem = name, "invalid name, cannot be a gem");
            return false;
        }
        match self.probe_cached(name) {
            Ok(exists) => exists,
            Err(err) => {
                warn!(gem = name, error = %err, "existence probe failed");
                false
            }
        }
    }

    fn probe_cached(&self, name: &str) -> GemorderResult<bool> {
        let artifact = self.cache.artifact_path(name);
        if !artifact.is_file() {
            ensure_dir(self.cache.dir()).map_err(GemorderError::Io)?;
            let captured = self.client.fetch(name, self.cache.dir())?;
            self.cache
                .write(name, &captured.combined())
                .map_err(GemorderError::Io)?;
            if !captured.success {
                return Ok(false);
            }
        } else {
            debug!(gem = name, "reusing cached fetch output");
        }

        let output = self.cache.read(name).map_err(GemorderError::Io)?;
        Ok(!output.to_lowercase().contains("error"))
    }
}
