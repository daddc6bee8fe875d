//! Pointer folders: the editor's per-workspace storage directories and the
//! `workspace.json` file inside each that names the project folder.

use percent_encoding::percent_decode_str;
use serde::Deserialize;
use std::path::{Path, PathBuf, MAIN_SEPARATOR_STR};
use url::Url;

use crate::read::{read_text, MAX_METADATA_SIZE};

pub const METADATA_FILE: &str = "workspace.json";

#[derive(Debug, Deserialize)]
struct PointerMetadata {
    folder: Option<String>,
}

/// Project folder named by the pointer folder's metadata, or `None` if the
/// pointer is not a directory, has no readable metadata, or the metadata has
/// no decodable `folder` entry.
pub fn project_path(pointer_folder: &Path) -> Option<PathBuf> {
    if !pointer_folder.is_dir() {
        tracing::debug!(path = %pointer_folder.display(), "Pointer is not a directory");
        return None;
    }
    let metadata_path = pointer_folder.join(METADATA_FILE);
    let content = match read_text(&metadata_path, MAX_METADATA_SIZE) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!(path = %metadata_path.display(), "Skipping pointer: {}", e);
            return None;
        }
    };
    let metadata: PointerMetadata = match serde_json::from_str(&content) {
        Ok(metadata) => metadata,
        Err(e) => {
            tracing::debug!(path = %metadata_path.display(), "Malformed pointer metadata: {}", e);
            return None;
        }
    };
    let Some(folder) = metadata.folder else {
        tracing::debug!(path = %metadata_path.display(), "Pointer metadata has no folder");
        return None;
    };
    let decoded = decode_folder_uri(&folder);
    if decoded.is_none() {
        tracing::debug!(path = %metadata_path.display(), folder = %folder, "Undecodable folder URI");
    }
    decoded
}

/// Decode a `file://` URI as written by the editor (`file:///c%3A/Users/...`)
/// into a native path. A leading slash before a drive letter is dropped and a
/// UNC host is kept as `//host/...`.
pub fn decode_folder_uri(uri: &str) -> Option<PathBuf> {
    let url = Url::parse(uri).ok()?;
    if url.scheme() != "file" {
        return None;
    }
    let mut path = percent_decode_str(url.path())
        .decode_utf8()
        .ok()?
        .into_owned();
    if has_drive_prefix(&path) {
        path.remove(0);
    }
    if let Some(host) = url.host_str().filter(|host| !host.is_empty()) {
        path = format!("//{host}{path}");
    }
    if path.is_empty() {
        return None;
    }
    Some(PathBuf::from(to_native_separators(&path)))
}

/// `/c:` or `/c:/...`
fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 3
        && bytes[0] == b'/'
        && bytes[1].is_ascii_alphabetic()
        && bytes[2] == b':'
        && (bytes.len() == 3 || bytes[3] == b'/')
}

fn to_native_separators(path: &str) -> String {
    path.replace(['/', '\\'], MAIN_SEPARATOR_STR)
}
