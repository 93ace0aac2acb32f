// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Claim backed by an exclusive advisory file lock

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use sole_core::{ClaimError, Config};

use super::{ClaimAdapter, ClaimOutcome};
#[cfg(unix)]
use crate::shared;

/// Claims the primary role by locking `<runtime_dir>/sole-<hash>.lock`.
///
/// The kernel drops the lock when the holder exits, including on a crash, so
/// a dead primary never blocks its successor. The lock file itself is left in
/// place: unlinking it while locked would let two processes lock two
/// different inodes under the same name.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileLockClaim;

impl FileLockClaim {
    pub fn new() -> Self {
        Self
    }
}

/// Held lock; released on drop
#[derive(Debug)]
pub struct FileLock {
    file: File,
    path: PathBuf,
}

impl FileLock {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to unlock claim");
        }
    }
}

impl ClaimAdapter for FileLockClaim {
    type Token = FileLock;

    fn try_claim(&self, config: &Config) -> Result<ClaimOutcome<FileLock>, ClaimError> {
        create_runtime_dir(config)
            .map_err(|e| ClaimError::CreateDir(config.runtime_dir.clone(), e))?;

        let file = open_lock_file(config)
            .map_err(|e| ClaimError::Open(config.lock_path.clone(), e))?;

        if let Err(e) = file.try_lock_exclusive() {
            if is_contended(&e) {
                return Ok(ClaimOutcome::Lost);
            }
            return Err(ClaimError::Lock(config.lock_path.clone(), e));
        }

        // Diagnostic only; the lock is what matters
        if let Err(e) = write_pid(&file) {
            tracing::warn!(path = %config.lock_path.display(), error = %e, "failed to write PID");
        }

        Ok(ClaimOutcome::Won(FileLock {
            file,
            path: config.lock_path.clone(),
        }))
    }
}

#[cfg(unix)]
fn create_runtime_dir(config: &Config) -> std::io::Result<()> {
    if config.shared_dir {
        return shared::create_dir(&config.runtime_dir);
    }
    std::fs::create_dir_all(&config.runtime_dir)
}

#[cfg(not(unix))]
fn create_runtime_dir(config: &Config) -> std::io::Result<()> {
    std::fs::create_dir_all(&config.runtime_dir)
}

fn lock_file_options() -> OpenOptions {
    let mut options = OpenOptions::new();
    options.read(true).write(true).create(true).truncate(false);
    options
}

// The lock file outlives its holder, so in a shared directory it must stay
// openable by whichever user claims next
#[cfg(unix)]
fn open_lock_file(config: &Config) -> std::io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    let mut options = lock_file_options();
    if !config.shared_dir {
        return options.open(&config.lock_path);
    }
    let file = options.mode(shared::FILE_MODE).open(&config.lock_path)?;
    shared::open_up(&file, &config.lock_path);
    Ok(file)
}

#[cfg(not(unix))]
fn open_lock_file(config: &Config) -> std::io::Result<File> {
    lock_file_options().open(&config.lock_path)
}

fn is_contended(err: &std::io::Error) -> bool {
    let contended = fs2::lock_contended_error();
    match (err.raw_os_error(), contended.raw_os_error()) {
        (Some(a), Some(b)) => a == b,
        _ => err.kind() == contended.kind(),
    }
}

fn write_pid(mut file: &File) -> std::io::Result<()> {
    file.set_len(0)?;
    writeln!(file, "{}", std::process::id())?;
    file.flush()
}

#[cfg(test)]
#[path = "flock_tests.rs"]
mod tests;
