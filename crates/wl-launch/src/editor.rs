use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use crate::LaunchError;

/// Starts the editor on a project folder without waiting for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorLauncher {
    exe_path: PathBuf,
}

impl EditorLauncher {
    pub fn new(exe_path: impl Into<PathBuf>) -> Self {
        Self {
            exe_path: exe_path.into(),
        }
    }

    pub fn exe_path(&self) -> &Path {
        &self.exe_path
    }

    pub fn command(&self, project_path: &Path) -> Command {
        let mut cmd = Command::new(&self.exe_path);
        cmd.arg(project_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }

    /// Spawn the editor with `project_path` as its only argument. The child is
    /// left running; its output is discarded.
    pub fn launch(&self, project_path: &Path) -> Result<Child, LaunchError> {
        let child = self
            .command(project_path)
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                exe: self.exe_path.clone(),
                source,
            })?;
        tracing::info!(
            exe = %self.exe_path.display(),
            path = %project_path.display(),
            pid = child.id(),
            "Launched editor"
        );
        Ok(child)
    }
}
