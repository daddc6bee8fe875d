use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Inputs for one catalog scan. Resolved once from the settings file and
/// never mutated while a scan is in flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// The editor's `workspaceStorage` directory.
    pub workspace_root: PathBuf,
    /// Omit workspaces whose project folder no longer exists.
    pub hide_missing: bool,
    /// Allow deleting pointer folders of missing projects.
    pub clean_up_orphans: bool,
    /// Append the repository URL to display names.
    pub show_repos: bool,
    /// Prefix known repository hosts with a glyph.
    pub show_glyphs: bool,
}

impl CatalogSettings {
    /// Settings rooted at `workspace_root` with the same toggles a missing
    /// settings file would produce.
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            hide_missing: true,
            clean_up_orphans: false,
            show_repos: true,
            show_glyphs: false,
        }
    }
}
