use std::path::Path;

use crate::read::{read_text, MAX_METADATA_SIZE};

pub const VCS_DIR: &str = ".git";
pub const CONFIG_FILE: &str = "config";

/// Remote URL from `<project>/.git/config`, or `None` when there is no Git
/// directory, no config file, or no `url` line.
pub fn repository_url(project_path: &Path) -> Option<String> {
    let vcs_dir = project_path.join(VCS_DIR);
    if !vcs_dir.is_dir() {
        return None;
    }
    let config_path = vcs_dir.join(CONFIG_FILE);
    if !config_path.is_file() {
        tracing::debug!(path = %vcs_dir.display(), "Git directory has no config file");
        return None;
    }
    match read_text(&config_path, MAX_METADATA_SIZE) {
        Ok(content) => parse_remote_url(&content),
        Err(e) => {
            tracing::debug!(path = %config_path.display(), "Skipping git config: {}", e);
            None
        }
    }
}

/// Value of the first line that starts with `url` once trimmed and
/// lowercased. The line is split on its first `=`; a line with no `=` or an
/// empty value yields `None`.
pub fn parse_remote_url(config: &str) -> Option<String> {
    let line = config
        .lines()
        .find(|line| line.trim().to_lowercase().starts_with("url"))?;
    let (_, value) = line.split_once('=')?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
