//! Provisions the bundled reveal.js asset tree into a writable cache directory.
//!
//! The cache lives at `<cache_root>/reveal.js` and is shared by every run of
//! the program. Provisioning copies the source tree into it and never deletes
//! anything: files already in the cache survive unless a source file with the
//! same relative path overwrites them.

use crate::error::{Result, SlidevError};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Name of the application folder created under the system temp directory.
pub const APP_DIR_NAME: &str = "slidev";

/// Name of the provisioned asset directory inside the cache root.
pub const ASSET_DIR_NAME: &str = "reveal.js";

/// Stamp written next to the provisioned assets by [`CachePolicy::Fingerprint`].
pub const STAMP_FILE_NAME: &str = ".slidev-cache.json";

/// Returns `<system temp dir>/slidev`.
pub fn default_cache_root() -> PathBuf {
    std::env::temp_dir().join(APP_DIR_NAME)
}

/// Returns the `reveal.js` directory that ships next to the running executable.
pub fn default_asset_source() -> io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let dir = exe.parent().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("executable {} has no parent directory", exe.display()),
        )
    })?;
    Ok(dir.join(ASSET_DIR_NAME))
}

/// Decides when an existing cache directory is reused as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CachePolicy {
    /// Reuse the cache whenever the directory exists.
    Presence,
    /// Reuse the cache only when its stamp matches the source tree fingerprint.
    #[default]
    Fingerprint,
}

/// Outcome of [`AssetCache::ensure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provisioned {
    /// The provisioned asset directory. Always exists.
    pub dir: PathBuf,
    /// Number of files copied from the source tree during this call.
    pub copied: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
struct CacheStamp {
    fingerprint: String,
    files: usize,
}

/// The asset cache: where the assets come from, where they go, and when to
/// copy them again.
#[derive(Debug, Clone)]
pub struct AssetCache {
    root: PathBuf,
    source: PathBuf,
    policy: CachePolicy,
}

impl AssetCache {
    pub fn new(root: impl Into<PathBuf>, source: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            source: source.into(),
            policy: CachePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: CachePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// The directory the assets are provisioned into.
    pub fn asset_dir(&self) -> PathBuf {
        self.root.join(ASSET_DIR_NAME)
    }

    /// Makes sure the asset directory exists and is populated, copying the
    /// source tree into it when the policy asks for it.
    pub fn ensure(&self) -> Result<Provisioned> {
        let dir = self.asset_dir();
        debug!("asset cache directory: {}", dir.display());

        if self.policy == CachePolicy::Presence && dir.exists() {
            debug!("asset cache present, skipping copy");
            return Ok(Provisioned { dir, copied: 0 });
        }

        if !self.source.is_dir() {
            if dir.exists() {
                warn!(
                    "Asset source {} is missing; reusing existing cache at {}",
                    self.source.display(),
                    dir.display()
                );
                return Ok(Provisioned { dir, copied: 0 });
            }
            return Err(SlidevError::AssetsMissing(self.source.clone()));
        }

        match self.policy {
            CachePolicy::Presence => {
                let copied = copy_tree(&self.source, &dir)?;
                info!("Extracted reveal.js to {}", dir.display());
                Ok(Provisioned { dir, copied })
            }
            CachePolicy::Fingerprint => {
                let fingerprint = fingerprint(&self.source)?;
                debug!("asset source fingerprint: {fingerprint}");

                if let Some(stamp) = read_stamp(&dir) {
                    if stamp.fingerprint == fingerprint {
                        debug!("asset cache stamp matches, skipping copy");
                        return Ok(Provisioned { dir, copied: 0 });
                    }
                    info!(
                        "Asset cache at {} is stale ({} != {}), refreshing",
                        dir.display(),
                        stamp.fingerprint,
                        fingerprint
                    );
                }

                let copied = copy_tree(&self.source, &dir)?;
                write_stamp(
                    &dir,
                    &CacheStamp {
                        fingerprint,
                        files: copied,
                    },
                )?;
                info!("Extracted reveal.js to {}", dir.display());
                Ok(Provisioned { dir, copied })
            }
        }
    }
}

/// Ensures `cache_root/reveal.js` exists, copying `source` into it only when
/// the directory is absent. Returns the provisioned directory.
pub fn ensure_cache(cache_root: &Path, source: &Path) -> Result<PathBuf> {
    AssetCache::new(cache_root, source)
        .with_policy(CachePolicy::Presence)
        .ensure()
        .map(|provisioned| provisioned.dir)
}

/// Computes a short hex digest over the relative paths and contents of every
/// file below `source`, visited in file-name order. Symlinks are followed.
pub fn fingerprint(source: &Path) -> Result<String> {
    if !source.is_dir() {
        return Err(SlidevError::AssetsMissing(source.to_path_buf()));
    }

    let mut hasher = Sha256::new();
    for entry in WalkDir::new(source)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }

        let relative = relative_key(source, entry.path());
        hasher.update(relative.as_bytes());
        hasher.update([0u8]);

        let content = fs::read(entry.path()).map_err(|e| SlidevError::io(entry.path(), e))?;
        hasher.update((content.len() as u64).to_le_bytes());
        hasher.update(&content);
    }

    let result = hasher.finalize();
    Ok(hex::encode(&result[..8]))
}

/// Recursively copies `from` into `to`, creating directories as needed and
/// overwriting files with the same relative path. Symlinks are followed and
/// their targets copied. Returns the number of files copied.
fn copy_tree(from: &Path, to: &Path) -> Result<usize> {
    fs::create_dir_all(to).map_err(|e| SlidevError::io(to, e))?;

    let mut copied = 0;
    for entry in WalkDir::new(from).min_depth(1).follow_links(true) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(from)
            .map_err(|e| SlidevError::io(entry.path(), io::Error::other(e)))?;
        let target = to.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| SlidevError::io(&target, e))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| SlidevError::io(parent, e))?;
        }
        fs::copy(entry.path(), &target).map_err(|e| SlidevError::io(&target, e))?;
        copied += 1;
    }

    debug!("copied {copied} files from {}", from.display());
    Ok(copied)
}

fn relative_key(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn read_stamp(dir: &Path) -> Option<CacheStamp> {
    let path = dir.join(STAMP_FILE_NAME);
    let content = fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&content) {
        Ok(stamp) => Some(stamp),
        Err(err) => {
            warn!("Ignoring unreadable cache stamp {}: {err}", path.display());
            None
        }
    }
}

fn write_stamp(dir: &Path, stamp: &CacheStamp) -> Result<()> {
    let path = dir.join(STAMP_FILE_NAME);
    let json =
        serde_json::to_string_pretty(stamp).map_err(|e| SlidevError::Stamp(e.to_string()))?;
    fs::write(&path, json).map_err(|e| SlidevError::io(&path, e))
}
