mod browser;
mod editor;

pub use browser::open_repository;
pub use editor::EditorLauncher;

use wl_workspace::WorkspaceRecord;

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("Failed to start editor {}: {source}", exe.display())]
    Spawn {
        exe: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to open {url} in the browser: {source}")]
    Browser {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

/// What to do with a selected workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchActions {
    pub editor: bool,
    pub repository: bool,
}

impl Default for LaunchActions {
    fn default() -> Self {
        Self {
            editor: true,
            repository: false,
        }
    }
}

/// Apply `actions` to `workspace`. A repository action on a workspace without
/// a URL is skipped.
pub fn launch(
    launcher: &EditorLauncher,
    workspace: &WorkspaceRecord,
    actions: LaunchActions,
) -> Result<(), LaunchError> {
    if actions.editor {
        launcher.launch(workspace.project_path())?;
    }
    if actions.repository {
        match workspace.repository_url() {
            Some(url) => open_repository(url)?,
            None => tracing::info!(
                path = %workspace.project_path().display(),
                "Workspace has no repository URL"
            ),
        }
    }
    Ok(())
}
