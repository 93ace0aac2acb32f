// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Permissions for the world-shared temp fallback directory
//!
//! Without an XDG runtime dir every user resolves to the same
//! `<temp>/sole`. Whatever one user leaves there must stay usable by the
//! next, or that user is locked out of every identifier.

use std::fs::{DirBuilder, File, Permissions};
use std::io::ErrorKind;
use std::os::unix::fs::{DirBuilderExt, PermissionsExt};
use std::path::Path;

/// Sticky and world-writable, like `/tmp`: anyone may create, only the
/// owner may remove
pub const DIR_MODE: u32 = 0o1777;

/// Lock files and sockets
pub const FILE_MODE: u32 = 0o666;

pub fn create_dir(dir: &Path) -> std::io::Result<()> {
    if let Some(parent) = dir.parent() {
        std::fs::create_dir_all(parent)?;
    }
    match DirBuilder::new().mode(DIR_MODE).create(dir) {
        // umask strips the bits at creation
        Ok(()) => std::fs::set_permissions(dir, Permissions::from_mode(DIR_MODE)),
        Err(e) if e.kind() == ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        Err(e) => Err(e),
    }
}

/// Widen a lock file we may have just created. Only its owner can; for
/// everyone else it is already as open as the owner made it.
pub fn open_up(file: &File, path: &Path) {
    let Ok(metadata) = file.metadata() else {
        return;
    };
    if metadata.permissions().mode() & 0o7777 == FILE_MODE {
        return;
    }
    if let Err(e) = file.set_permissions(Permissions::from_mode(FILE_MODE)) {
        tracing::debug!(path = %path.display(), error = %e, "cannot widen permissions");
    }
}

/// Let every user connect to a socket this process just bound
pub fn open_up_path(path: &Path) -> std::io::Result<()> {
    std::fs::set_permissions(path, Permissions::from_mode(FILE_MODE))
}

#[cfg(test)]
#[path = "shared_tests.rs"]
mod tests;
