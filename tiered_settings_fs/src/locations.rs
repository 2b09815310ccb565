// Copyright 2025 the Tiered Settings Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Where the global and local tiers live on disk.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;

use crate::split::SplitStore;

/// Name of the directory holding per-run settings, relative to the global
/// directory.
pub const RUNS_DIR: &str = "runs";

/// A run name that would not name a directory directly under
/// [`RUNS_DIR`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid run name `{0}`: expected a single directory name")]
pub struct InvalidRunName(pub String);

/// Directories of the global and local tiers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Locations {
    /// Persistent, cross-session settings.
    pub global: PathBuf,
    /// Per-run settings.
    pub local: PathBuf,
}

impl Locations {
    /// Uses `root` for global settings and `root/runs` for local ones.
    #[must_use]
    pub fn in_dir(root: impl Into<PathBuf>) -> Self {
        let global = root.into();
        let local = global.join(RUNS_DIR);
        Self { global, local }
    }

    /// Uses the platform configuration directory for `app`, falling back to
    /// the working directory when the platform has none.
    #[must_use]
    pub fn for_app(app: &str) -> Self {
        let root = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(app);
        Self::in_dir(root)
    }

    /// Returns a copy whose local tier lives in the named run directory.
    ///
    /// The name must be one plain path component: empty names, `.`, `..`,
    /// separators and absolute paths are rejected, so the local tier never
    /// leaves [`RUNS_DIR`].
    pub fn with_run(&self, run: &str) -> Result<Self, InvalidRunName> {
        let mut components = Path::new(run).components();
        let single = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !single || run.contains(['/', '\\']) {
            return Err(InvalidRunName(run.to_owned()));
        }
        Ok(Self {
            global: self.global.clone(),
            local: self.global.join(RUNS_DIR).join(run),
        })
    }

    /// Creates unloaded stores for both tiers.
    #[must_use]
    pub fn stores(&self) -> (SplitStore, SplitStore) {
        (SplitStore::new(&self.global), SplitStore::new(&self.local))
    }
}
