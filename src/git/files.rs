// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Reading files out of a clone.

use std::path::{Component, Path};

use crate::error::{FsError, KitResult};

/// Reads `relative` inside `root` as UTF-8.
///
/// Returns `Ok(None)` if the file does not exist.
///
/// # Errors
///
/// - `FsError::PathEscapesRoot` for absolute paths or paths containing `..`.
/// - `FsError` for any other I/O failure, including invalid UTF-8.
pub async fn read_repo_file(root: &Path, relative: &str) -> KitResult<Option<String>> {
    let rel = Path::new(relative);
    let escapes = rel.components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes || relative.is_empty() {
        return Err(FsError::PathEscapesRoot {
            path: relative.to_string(),
        }
        .into());
    }

    let path = root.join(rel);
    match tokio::fs::read_to_string(&path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(FsError::from_io(&path, e).into()),
    }
}
